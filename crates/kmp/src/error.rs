use thiserror::Error;

/// Result type for decoding operations
pub type Result<T, E = FormatError> = std::result::Result<T, E>;

/// Errors raised by malformed course or archive bytes. All of these are
/// fatal for the file being decoded.
#[derive(Error, Debug)]
pub enum FormatError {
    /// File or section magic did not match
    #[error("bad magic: expected {expected}, found {found}")]
    BadMagic { expected: String, found: String },

    /// A read would run past the end of the input
    #[error("truncated input: {what} needs {needed} bytes at offset {offset}, {left} left")]
    Truncated {
        what: &'static str,
        offset: usize,
        needed: usize,
        left: usize,
    },

    /// A section offset from the file header points outside the file
    #[error("{tag} section offset {offset:#x} is outside the {file_len}-byte file")]
    OffsetOutOfBounds {
        tag: &'static str,
        offset: u32,
        file_len: usize,
    },

    /// An archive node references data outside the file
    #[error("archive node {index} is malformed: {reason}")]
    BadNode { index: usize, reason: &'static str },
}

impl FormatError {
    /// Create a bad-magic error from the raw byte sequences
    pub fn bad_magic(expected: &[u8], found: &[u8]) -> Self {
        Self::BadMagic {
            expected: printable(expected),
            found: printable(found),
        }
    }

    /// Create a truncation error for a read of `needed` bytes at `offset`
    pub fn truncated(what: &'static str, offset: usize, needed: usize, left: usize) -> Self {
        Self::Truncated {
            what,
            offset,
            needed,
            left,
        }
    }
}

/// Render magic bytes as ASCII where possible, hex otherwise
fn printable(bytes: &[u8]) -> String {
    if bytes.iter().all(|b| b.is_ascii_graphic()) {
        String::from_utf8_lossy(bytes).into_owned()
    } else {
        let hex: Vec<String> = bytes.iter().map(|b| format!("{b:02x}")).collect();
        format!("0x{}", hex.join(""))
    }
}

/// Errors from U8 archive extraction.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The archive bytes themselves are malformed
    #[error(transparent)]
    Format(#[from] FormatError),

    /// No file with the requested name exists in the archive.
    /// Recoverable: the archive is fine, the name is not in it.
    #[error("no file named {0:?} in archive")]
    NotFound(String),
}
