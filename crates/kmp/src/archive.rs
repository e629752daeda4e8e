//! U8 archive reader.
//!
//! Courses ship as `.szs` files: a Yaz0-compressed U8 archive whose
//! `course.kmp` entry holds the track layout. This module sniffs the
//! container kind and pulls single files out of an uncompressed U8
//! archive. Yaz0 decompression is out of scope; callers decompress
//! before handing data here.

use log::debug;

use crate::error::{ArchiveError, FormatError, Result};
use crate::reader::ByteReader;

/// U8 archive magic, `0x55AA382D` big-endian.
pub const U8_MAGIC: [u8; 4] = [0x55, 0xAA, 0x38, 0x2D];

/// Yaz0 compression magic.
pub const YAZ0_MAGIC: [u8; 4] = *b"Yaz0";

const NODE_SIZE: usize = 12;

/// Container format recognized from the leading bytes of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    /// Uncompressed U8 archive.
    U8,
    /// Yaz0-compressed stream, usually wrapping a U8 archive.
    Yaz0,
    /// Anything else.
    Unknown,
}

/// Sniff the container kind from the first four bytes.
pub fn detect(data: &[u8]) -> Container {
    match data.get(..4) {
        Some(magic) if magic == U8_MAGIC => Container::U8,
        Some(magic) if magic == YAZ0_MAGIC => Container::Yaz0,
        _ => Container::Unknown,
    }
}

struct Node {
    flag: u8,
    name_offset: u32,
    start: u32,
    end: u32,
}

fn read_node(r: &mut ByteReader<'_>) -> Result<Node> {
    let flag = r.read_u8("node flag")?;
    let name_offset = r.read_u24("node name offset")?;
    let start = r.read_u32("node data offset")?;
    let end = r.read_u32("node data size")?;
    Ok(Node {
        flag,
        name_offset,
        start,
        end,
    })
}

/// NUL-terminated name of node `index`, read from the string pool.
fn node_name<'a>(data: &'a [u8], pool: usize, node: &Node, index: usize) -> Result<&'a [u8]> {
    let at = pool + node.name_offset as usize;
    let tail = data.get(at..).ok_or(FormatError::BadNode {
        index,
        reason: "name offset outside string pool",
    })?;
    let len = tail
        .iter()
        .position(|&b| b == 0)
        .ok_or(FormatError::BadNode {
            index,
            reason: "unterminated name",
        })?;
    Ok(&tail[..len])
}

/// Extract the file called `name` from an uncompressed U8 archive.
///
/// Directory structure is ignored: the whole node table is scanned and
/// the first file node whose name matches wins. Returns
/// [`ArchiveError::NotFound`] when no entry carries that name.
pub fn extract<'a>(data: &'a [u8], name: &str) -> Result<&'a [u8], ArchiveError> {
    let mut r = ByteReader::new(data);
    let magic = r.read_bytes::<4>("archive magic")?;
    if magic != U8_MAGIC {
        return Err(FormatError::bad_magic(&U8_MAGIC, &magic).into());
    }
    let first_offset = r.read_u32("node table offset")? as usize;

    r.seek(first_offset, "node table")?;
    let root = read_node(&mut r)?;
    let count = root.end as usize;
    let pool = first_offset + count * NODE_SIZE;
    debug!("U8 archive: {count} nodes, string pool at {pool:#x}");

    for index in 1..count {
        r.seek(first_offset + index * NODE_SIZE, "node table entry")?;
        let node = read_node(&mut r)?;
        if node.flag != 0 {
            continue;
        }
        if node_name(data, pool, &node, index)? != name.as_bytes() {
            continue;
        }
        let start = node.start as usize;
        let len = node.end as usize;
        return data
            .get(start..start + len)
            .ok_or(FormatError::BadNode {
                index,
                reason: "file data outside archive",
            })
            .map_err(ArchiveError::from);
    }

    Err(ArchiveError::NotFound(name.to_string()))
}
