//! Hand-built course fixtures. The analysis passes only look at the
//! checkpoint tables, so everything else stays at its default.

use trackbreak_kmp::{Ckph, Ckpt, Kmp, Section, NO_LINK};

pub fn cp(idx: usize, p1: [f32; 2], p2: [f32; 2], kind: u8, prev: u8, next: u8) -> Ckpt {
    Ckpt {
        idx,
        p1,
        p2,
        res: 0,
        kind,
        prev,
        next,
    }
}

/// Group literal; unused link slots are filled with [`NO_LINK`].
pub fn grp(gidx: usize, start: u8, len: u8, prev: &[u8], next: &[u8], layer: i32) -> Ckph {
    let mut group = Ckph {
        gidx,
        start,
        len,
        prev: [NO_LINK; 6],
        next: [NO_LINK; 6],
        layer,
    };
    for (slot, &g) in group.prev.iter_mut().zip(prev) {
        *slot = g;
    }
    for (slot, &g) in group.next.iter_mut().zip(next) {
        *slot = g;
    }
    group
}

pub fn course(ckpt: Vec<Ckpt>, ckph: Vec<Ckph>) -> Kmp {
    Kmp {
        ckpt: Section {
            additional: 0,
            entries: ckpt,
        },
        ckph: Section {
            additional: 0,
            entries: ckph,
        },
        ..Kmp::default()
    }
}
