//! # Trackbreak KMP
//!
//! Decoder for Mario Kart Wii course files (KMP) and the U8 archives
//! they ship in.
//!
//! ## Features
//!
//! - **Full section coverage** - all fifteen KMP sections decoded into
//!   typed tables
//! - **Checkpoint layering** - group depths assigned at decode time,
//!   ready for lap-completion math
//! - **Archive access** - pull `course.kmp` straight out of an
//!   uncompressed U8 archive
//! - **Honest errors** - every failure names the section, field and
//!   offset that broke
//!
//! ## Architecture
//!
//! ```text
//! .szs / .u8 bytes
//!     │
//!     ├──> archive::detect (U8 / Yaz0 sniffing)
//!     │
//!     ├──> archive::extract ("course.kmp" from the node table)
//!     │
//!     └──> decode::decode
//!            ├─ Header + 15 section offsets
//!            ├─ Section tables (KTPT .. STGI)
//!            └─ layer::assign_layers (checkpoint group depths)
//! ```

mod archive;
mod decode;
mod error;
mod layer;
mod reader;
mod sections;

pub use archive::{detect, extract, Container, U8_MAGIC, YAZ0_MAGIC};
pub use decode::{decode, KMP_MAGIC};
pub use error::{ArchiveError, FormatError, Result};
pub use layer::assign_layers;
pub use reader::{half_to_f32, ByteReader};
pub use sections::{
    Area, Came, Ckph, Ckpt, Cnpt, Enpt, Gobj, Header, Itpt, Jgpt, Kmp, Ktpt, Mspt, PathGroup,
    PotiPoint, PotiRoute, Section, Stgi, NO_LINK,
};
