//! Ghost-checkpoint finder.
//!
//! A ghost checkpoint is one whose quadrilateral (the region between a
//! checkpoint line and the next) self-overlaps, letting a player
//! register the checkpoint from the wrong side of the track. For every
//! checkpoint and every (previous, next) neighbor pair, the finder
//! builds two small constraint systems over the ground plane, one per
//! side of the checkpoint line, and reports the checkpoint whenever
//! either system has a feasible point.
//!
//! Plot coordinates negate the stored z axis so the figures match the
//! in-game overhead map.

use log::warn;
use serde::Serialize;

use trackbreak_kmp::{Kmp, NO_LINK};

use crate::halfplane::{boxed, feasible_point, HalfPlane};

/// Search window for feasible points, in plot coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Default for Bounds {
    /// Wide enough to cover every coordinate a course can use.
    fn default() -> Self {
        Self {
            min: -500_000.0,
            max: 500_000.0,
        }
    }
}

/// A checkpoint crossable out of order, with a witness point inside the
/// region that makes the crossing reachable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GhostCheckpoint {
    pub index: usize,
    pub point: [f64; 2],
}

/// Indices of all ghost checkpoints, in checkpoint order.
///
/// An index appears once per feasible neighbor pair, so a checkpoint at
/// a multi-way branch can be reported more than once.
pub fn find_ghost_checkpoints(kmp: &Kmp, bounds: Bounds) -> Vec<usize> {
    find_witnesses(kmp, bounds)
        .into_iter()
        .map(|(i, _)| i)
        .collect()
}

/// Like [`find_ghost_checkpoints`], but keeps the witness points.
pub fn find_ghost_checkpoints_with_points(kmp: &Kmp, bounds: Bounds) -> Vec<GhostCheckpoint> {
    find_witnesses(kmp, bounds)
        .into_iter()
        .map(|(index, point)| GhostCheckpoint { index, point })
        .collect()
}

/// Previous and next checkpoint indices for every checkpoint.
///
/// Local prev/next links of 255 defer to the group table: the previous
/// checkpoints are then the last checkpoints of the preceding groups
/// and the next ones the first checkpoints of the following groups.
/// The group is tracked by walking the table in order, advancing past
/// a group whenever a checkpoint ends it. Links leading outside the
/// tables are dropped with a warning.
pub(crate) fn neighbors(kmp: &Kmp) -> (Vec<Vec<usize>>, Vec<Vec<usize>>) {
    let ckpt = kmp.checkpoints();
    let groups = kmp.checkpoint_groups();
    let n = ckpt.len();
    let mut grp = 0usize;
    let mut prevs = Vec::with_capacity(n);
    let mut nexts = Vec::with_capacity(n);

    for (i, cp) in ckpt.iter().enumerate() {
        let here = groups.get(grp);
        if here.is_none() && (cp.prev == NO_LINK || cp.next == NO_LINK) {
            warn!("checkpoint {i} walks past the last checkpoint group");
        }

        if cp.prev == NO_LINK {
            let mut list = Vec::new();
            if let Some(g) = here {
                for p in g.prev_groups() {
                    match groups.get(p) {
                        Some(pg) if pg.len > 0 => {
                            let last = pg.checkpoints().end - 1;
                            if last < n {
                                list.push(last);
                            } else {
                                warn!("group {p} ends past the checkpoint table");
                            }
                        }
                        Some(_) => warn!("group {p} before checkpoint {i} is empty"),
                        None => warn!("checkpoint {i} walks back to nonexistent group {p}"),
                    }
                }
            }
            prevs.push(list);
        } else if i > 0 {
            prevs.push(vec![i - 1]);
        } else {
            warn!("checkpoint 0 claims a local previous checkpoint");
            prevs.push(Vec::new());
        }

        if cp.next == NO_LINK {
            let mut list = Vec::new();
            if let Some(g) = here {
                for nx in g.next_groups() {
                    match groups.get(nx) {
                        Some(ng) => {
                            let first = usize::from(ng.start);
                            if first < n {
                                list.push(first);
                            } else {
                                warn!("group {nx} starts past the checkpoint table");
                            }
                        }
                        None => warn!("checkpoint {i} walks on to nonexistent group {nx}"),
                    }
                }
            }
            nexts.push(list);
            grp += 1;
        } else if i + 1 < n {
            nexts.push(vec![i + 1]);
        } else {
            warn!("checkpoint {i} claims a local next checkpoint past the table");
            nexts.push(Vec::new());
        }
    }
    (prevs, nexts)
}

fn diff(p: HalfPlane, q: HalfPlane) -> HalfPlane {
    HalfPlane::new(p.a - q.a, p.b - q.b, p.c - q.c)
}

fn find_witnesses(kmp: &Kmp, bounds: Bounds) -> Vec<(usize, [f64; 2])> {
    let ckpt = kmp.checkpoints();
    let n = ckpt.len();
    let (prevs, nexts) = neighbors(kmp);

    let a: Vec<f64> = ckpt.iter().map(|cp| f64::from(cp.p1[0])).collect();
    let b: Vec<f64> = ckpt.iter().map(|cp| f64::from(-cp.p1[1])).collect();
    let c: Vec<f64> = ckpt.iter().map(|cp| f64::from(cp.p2[0])).collect();
    let d: Vec<f64> = ckpt.iter().map(|cp| f64::from(-cp.p2[1])).collect();

    // Unit normal (s0, s1) of each checkpoint line, and the line itself
    // anchored at p2. A zero-length checkpoint yields NaN coefficients
    // and with them a system no point can satisfy.
    let mut s0 = Vec::with_capacity(n);
    let mut s1 = Vec::with_capacity(n);
    let mut cpline = Vec::with_capacity(n);
    for i in 0..n {
        let h = (a[i] - c[i]).hypot(d[i] - b[i]);
        s1.push((a[i] - c[i]) / h);
        s0.push((d[i] - b[i]) / h);
        cpline.push(HalfPlane::new(
            s0[i],
            s1[i],
            s0[i] * -c[i] + s1[i] * -d[i],
        ));
    }

    let bbox = boxed(bounds.min, bounds.max);
    let mut found = Vec::new();

    for i in 0..n {
        for &nx in &nexts[i] {
            let fb1 = {
                let v1 = -(b[nx] - b[i]);
                let v2 = a[nx] - a[i];
                HalfPlane::new(v1, v2, -a[nx] * v1 - b[nx] * v2)
            };
            let fb2 = {
                let v1 = d[nx] - d[i];
                let v2 = -(c[nx] - c[i]);
                HalfPlane::new(v1, v2, -c[i] * v1 - d[i] * v2)
            };
            let nline = HalfPlane::new(s0[nx], s1[nx], s0[nx] * -a[nx] + s1[nx] * -b[nx]);
            let vfor = diff(cpline[i], nline);

            for &pv in &prevs[i] {
                let rb1 = {
                    let v1 = -(b[i] - b[pv]);
                    let v2 = a[i] - a[pv];
                    HalfPlane::new(v1, v2, -a[i] * v1 - b[i] * v2)
                };
                let rb2 = {
                    let v1 = d[i] - d[pv];
                    let v2 = -(c[i] - c[pv]);
                    HalfPlane::new(v1, v2, -c[i] * v1 - d[i] * v2)
                };
                let pline = HalfPlane::new(s0[pv], s1[pv], s0[pv] * -a[pv] + s1[pv] * -b[pv]);
                let vback = diff(cpline[i], pline);

                // One system per side of the checkpoint line; a point on
                // either side proves the out-of-order crossing.
                let mut sys = vec![fb1, rb1, fb2, rb2, cpline[i].flipped(), vfor, vback];
                sys.extend_from_slice(&bbox);
                let hit = feasible_point(&sys).or_else(|| {
                    let mut sys = vec![
                        fb1,
                        rb1,
                        fb2,
                        rb2,
                        cpline[i],
                        vfor.flipped(),
                        vback.flipped(),
                    ];
                    sys.extend_from_slice(&bbox);
                    feasible_point(&sys)
                });
                if let Some(point) = hit {
                    found.push((i, point));
                }
            }
        }
    }
    found
}
