//! Builds complete course files for end-to-end runs of the binary.
//! Everything is big-endian, matching the on-disk formats.

/// Tag, entry count, extra header word, then the record bytes.
fn section(tag: &str, count: u16, body: &[u8]) -> Vec<u8> {
    let mut s = Vec::with_capacity(8 + body.len());
    s.extend_from_slice(tag.as_bytes());
    s.extend_from_slice(&count.to_be_bytes());
    s.extend_from_slice(&0u16.to_be_bytes());
    s.extend_from_slice(body);
    s
}

fn put_f32s(out: &mut Vec<u8>, values: &[f32]) {
    for v in values {
        out.extend_from_slice(&v.to_be_bytes());
    }
}

/// A four-checkpoint corridor along the x axis in one self-looping
/// group, with a start position and a three-lap stage entry.
///
/// `flip_last` swaps the endpoints of the final checkpoint line, which
/// makes checkpoints 2 and 3 crossable out of order. `extra_start`
/// marks checkpoint 2 as a second lap start.
pub fn corridor_kmp(flip_last: bool, extra_start: bool) -> Vec<u8> {
    let mut ktpt = Vec::new();
    put_f32s(&mut ktpt, &[0.0, 0.0, -50.0]);
    put_f32s(&mut ktpt, &[0.0, 0.0, 0.0]);
    ktpt.extend_from_slice(&0xFFFFu16.to_be_bytes());
    ktpt.extend_from_slice(&[0, 0]);

    let mut ckpt = Vec::new();
    for i in 0..4u8 {
        let x = f32::from(i) * 200.0;
        let (p1, p2) = if i == 3 && flip_last {
            ([x, 0.0], [x, -100.0])
        } else {
            ([x, -100.0], [x, 0.0])
        };
        put_f32s(&mut ckpt, &p1);
        put_f32s(&mut ckpt, &p2);
        ckpt.push(0);
        ckpt.push(if i == 0 || (i == 2 && extra_start) {
            0
        } else {
            255
        });
        ckpt.push(if i == 0 { 255 } else { i - 1 });
        ckpt.push(if i == 3 { 255 } else { i + 1 });
    }

    let mut ckph = vec![0u8, 4];
    ckph.extend_from_slice(&[0, 255, 255, 255, 255, 255]);
    ckph.extend_from_slice(&[0, 255, 255, 255, 255, 255]);
    ckph.extend_from_slice(&[0, 0]);

    let mut stgi = vec![3u8, 0, 0, 0, 0];
    stgi.extend_from_slice(&[0, 0, 0, 0]);
    stgi.push(0);
    // Half-precision 1.0.
    stgi.extend_from_slice(&0x3C00u16.to_be_bytes());

    let sections = [
        section("KTPT", 1, &ktpt),
        section("ENPT", 0, &[]),
        section("ENPH", 0, &[]),
        section("ITPT", 0, &[]),
        section("ITPH", 0, &[]),
        section("CKPT", 4, &ckpt),
        section("CKPH", 1, &ckph),
        section("GOBJ", 0, &[]),
        section("POTI", 0, &[]),
        section("AREA", 0, &[]),
        section("CAME", 0, &[]),
        section("JGPT", 0, &[]),
        section("CNPT", 0, &[]),
        section("MSPT", 0, &[]),
        section("STGI", 1, &stgi),
    ];

    let header_len = 0x4Cu16;
    let mut offsets = Vec::with_capacity(sections.len());
    let mut body = Vec::new();
    for s in &sections {
        offsets.push(body.len() as u32);
        body.extend_from_slice(s);
    }

    let mut out = Vec::new();
    out.extend_from_slice(b"RKMD");
    out.extend_from_slice(&((usize::from(header_len) + body.len()) as u32).to_be_bytes());
    out.extend_from_slice(&15u16.to_be_bytes());
    out.extend_from_slice(&header_len.to_be_bytes());
    out.extend_from_slice(&2520u32.to_be_bytes());
    for off in offsets {
        out.extend_from_slice(&off.to_be_bytes());
    }
    out.extend_from_slice(&body);
    out
}

/// Wrap a payload as the only file of an uncompressed U8 archive.
pub fn u8_archive(name: &str, payload: &[u8]) -> Vec<u8> {
    let first_offset = 0x20u32;
    let pool_len = 1 + name.len() as u32 + 1;
    let data_start = first_offset + 2 * 12 + pool_len;

    let mut out = Vec::new();
    out.extend_from_slice(&[0x55, 0xAA, 0x38, 0x2D]);
    out.extend_from_slice(&first_offset.to_be_bytes());
    out.extend_from_slice(&(2 * 12 + pool_len).to_be_bytes());
    out.extend_from_slice(&data_start.to_be_bytes());
    out.extend_from_slice(&[0u8; 16]);

    // Root directory node: the size field is the node count.
    out.push(1);
    out.extend_from_slice(&[0, 0, 0]);
    out.extend_from_slice(&0u32.to_be_bytes());
    out.extend_from_slice(&2u32.to_be_bytes());

    // The file node, pointing past the string pool.
    out.push(0);
    out.extend_from_slice(&[0, 0, 1]);
    out.extend_from_slice(&data_start.to_be_bytes());
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());

    out.push(0);
    out.extend_from_slice(name.as_bytes());
    out.push(0);
    out.extend_from_slice(payload);
    out
}
