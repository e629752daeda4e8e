//! Shared builders for synthesizing course files and U8 archives in
//! tests. Everything is big-endian, matching the on-disk formats.

// Not every test target uses every builder.
#![allow(dead_code)]

/// Chainable big-endian byte builder.
pub struct Bytes(Vec<u8>);

impl Bytes {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn u8(mut self, v: u8) -> Self {
        self.0.push(v);
        self
    }

    pub fn u16(mut self, v: u16) -> Self {
        self.0.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn u24(mut self, v: u32) -> Self {
        self.0.extend_from_slice(&v.to_be_bytes()[1..]);
        self
    }

    pub fn u32(mut self, v: u32) -> Self {
        self.0.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn f32(mut self, v: f32) -> Self {
        self.0.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn vec3(self, x: f32, y: f32, z: f32) -> Self {
        self.f32(x).f32(y).f32(z)
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.0.extend_from_slice(bytes);
        self
    }

    pub fn done(self) -> Vec<u8> {
        self.0
    }
}

/// Section tags in canonical file order.
pub const TAGS: [&str; 15] = [
    "KTPT", "ENPT", "ENPH", "ITPT", "ITPH", "CKPT", "CKPH", "GOBJ", "POTI", "AREA", "CAME",
    "JGPT", "CNPT", "MSPT", "STGI",
];

/// Encode one section: tag, entry count, the extra header word, body.
pub fn section(tag: &str, count: u16, additional: u16, body: Bytes) -> Vec<u8> {
    let mut v = Bytes::new()
        .raw(tag.as_bytes())
        .u16(count)
        .u16(additional)
        .done();
    v.extend(body.done());
    v
}

/// A section with zero entries.
pub fn empty(tag: &str) -> Vec<u8> {
    section(tag, 0, 0, Bytes::new())
}

/// All fifteen sections, each empty, in file order. Tests replace the
/// indices they care about.
pub fn empty_course() -> Vec<Vec<u8>> {
    TAGS.iter().map(|t| empty(t)).collect()
}

/// Assemble encoded sections into a full course file with a correct
/// header and offset table.
pub fn kmp_file(sections: Vec<Vec<u8>>) -> Vec<u8> {
    assert_eq!(sections.len(), 15, "a course file has 15 sections");
    let header_len: u16 = 0x4C;
    let mut offsets = Vec::with_capacity(sections.len());
    let mut body = Vec::new();
    for s in &sections {
        offsets.push(body.len() as u32);
        body.extend_from_slice(s);
    }
    let mut out = Bytes::new()
        .raw(b"RKMD")
        .u32((usize::from(header_len) + body.len()) as u32)
        .u16(15)
        .u16(header_len)
        .u32(2520);
    for off in offsets {
        out = out.u32(off);
    }
    let mut v = out.done();
    v.extend_from_slice(&body);
    v
}

/// Build an uncompressed U8 archive. Each entry is a name plus either
/// file contents or `None` for a directory node.
pub fn u8_archive(entries: &[(&str, Option<&[u8]>)]) -> Vec<u8> {
    let count = entries.len() + 1;
    let first_offset = 0x20usize;

    let mut pool = vec![0u8];
    let mut name_offsets = Vec::with_capacity(entries.len());
    for (name, _) in entries {
        name_offsets.push(pool.len() as u32);
        pool.extend_from_slice(name.as_bytes());
        pool.push(0);
    }

    let data_start = first_offset + count * 12 + pool.len();
    let mut blobs = Vec::new();
    let mut spans = Vec::with_capacity(entries.len());
    for (_, data) in entries {
        match data {
            Some(d) => {
                spans.push(((data_start + blobs.len()) as u32, d.len() as u32));
                blobs.extend_from_slice(d);
            }
            None => spans.push((0, count as u32)),
        }
    }

    let mut out = Bytes::new()
        .raw(&[0x55, 0xAA, 0x38, 0x2D])
        .u32(first_offset as u32)
        .u32((count * 12 + pool.len()) as u32)
        .u32(data_start as u32)
        .raw(&[0u8; 16])
        // Root node: a directory whose size field is the node count.
        .u8(1)
        .u24(0)
        .u32(0)
        .u32(count as u32);
    for (i, (_, data)) in entries.iter().enumerate() {
        let flag = if data.is_some() { 0 } else { 1 };
        let (start, end) = spans[i];
        out = out.u8(flag).u24(name_offsets[i]).u32(start).u32(end);
    }
    let mut v = out.raw(&pool).done();
    v.extend_from_slice(&blobs);
    v
}
