//! Typed section tables of a decoded course file.
//!
//! Field names and record shapes follow the on-disk format. Every entry
//! carries a synthesized `idx` (`gidx` for group sections) giving its
//! position in the section; the file itself does not store indices.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Link slot value meaning "no link" in prev/next tables.
pub const NO_LINK: u8 = 0xFF;

/// File header preceding the section offset table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Total file length as recorded in the header (not trusted).
    pub file_len: u32,
    pub section_count: u16,
    /// Base offset every section offset is relative to.
    pub header_len: u16,
    pub version: u32,
}

/// One decoded section: the extra header value and the entry list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section<T> {
    /// The u16 stored next to the entry count (total point count for
    /// POTI, otherwise padding).
    pub additional: u16,
    pub entries: Vec<T>,
}

impl<T> Section<T> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for Section<T> {
    fn default() -> Self {
        Self {
            additional: 0,
            entries: Vec::new(),
        }
    }
}

/// Kart start point (KTPT).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ktpt {
    pub idx: usize,
    pub pos: [f32; 3],
    pub rot: [f32; 3],
    pub player_id: u16,
}

/// Enemy route point (ENPT).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enpt {
    pub idx: usize,
    pub pos: [f32; 3],
    pub variance: f32,
    pub s1: u16,
    pub s2: u8,
    pub s3: u8,
}

/// Item route point (ITPT).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itpt {
    pub idx: usize,
    pub pos: [f32; 3],
    pub variance: f32,
    pub s1: u16,
    pub s2: u16,
}

/// Route grouping entry shared by the enemy (ENPH) and item (ITPH)
/// sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathGroup {
    pub gidx: usize,
    /// Index of the group's first point.
    pub start: u8,
    /// Number of points in the group.
    pub len: u8,
    /// Backward-linked groups; [`NO_LINK`] marks unused slots.
    pub prev: [u8; 6],
    /// Forward-linked groups; [`NO_LINK`] marks unused slots.
    pub next: [u8; 6],
}

/// A checkpoint: one line on the ground plane, given by its two
/// endpoints' x/z coordinates (CKPT).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ckpt {
    pub idx: usize,
    /// First endpoint, x and z.
    pub p1: [f32; 2],
    /// Second endpoint, x and z.
    pub p2: [f32; 2],
    /// Respawn point id.
    pub res: u8,
    /// 0 = lap checkpoint, 1..99 = ordered key checkpoints,
    /// 255 = non-key checkpoint.
    pub kind: u8,
    /// Previous checkpoint in the group; [`NO_LINK`] defers to the
    /// group-level links.
    pub prev: u8,
    /// Next checkpoint in the group; [`NO_LINK`] defers to the
    /// group-level links.
    pub next: u8,
}

impl Ckpt {
    /// Whether this is a key checkpoint (anything but 255).
    pub fn is_key(&self) -> bool {
        self.kind < 255
    }
}

/// Checkpoint group (CKPH): a contiguous run of checkpoints plus links
/// to the groups before and after it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ckph {
    pub gidx: usize,
    /// Index of the group's first checkpoint.
    pub start: u8,
    /// Number of checkpoints in the group.
    pub len: u8,
    /// Backward-linked groups; [`NO_LINK`] marks unused slots.
    pub prev: [u8; 6],
    /// Forward-linked groups; [`NO_LINK`] marks unused slots.
    pub next: [u8; 6],
    /// Depth of the first depth-first path from group 0, assigned during
    /// decode; -1 until reached.
    pub layer: i32,
}

impl Ckph {
    /// Checkpoint index range covered by this group.
    pub fn checkpoints(&self) -> Range<usize> {
        let start = usize::from(self.start);
        start..start + usize::from(self.len)
    }

    /// Indices of the real backward-linked groups.
    pub fn prev_groups(&self) -> impl Iterator<Item = usize> + '_ {
        self.prev
            .iter()
            .filter(|&&g| g != NO_LINK)
            .map(|&g| usize::from(g))
    }

    /// Indices of the real forward-linked groups.
    pub fn next_groups(&self) -> impl Iterator<Item = usize> + '_ {
        self.next
            .iter()
            .filter(|&&g| g != NO_LINK)
            .map(|&g| usize::from(g))
    }
}

/// Placed object (GOBJ).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gobj {
    pub idx: usize,
    pub id: u16,
    pub xpf_id: u16,
    pub pos: [f32; 3],
    pub rot: [f32; 3],
    pub scale: [f32; 3],
    pub route: u16,
    pub settings: [u16; 8],
    pub presence: u16,
}

/// One point of a route (POTI entry payload).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotiPoint {
    pub idx: usize,
    pub pos: [f32; 3],
    pub s1: u16,
    pub s2: u16,
}

/// Object/camera route (POTI). The only variable-length record in the
/// format: each route nests its own point list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotiRoute {
    pub idx: usize,
    pub smooth: u8,
    pub motion_type: u8,
    pub points: Vec<PotiPoint>,
}

/// Effect region (AREA).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub idx: usize,
    pub shape: u8,
    pub kind: u8,
    pub camera: u8,
    pub priority: u8,
    pub pos: [f32; 3],
    pub rot: [f32; 3],
    pub scale: [f32; 3],
    pub s1: u16,
    pub s2: u16,
    pub route: u8,
    pub enpt: u8,
}

/// Camera (CAME).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Came {
    pub idx: usize,
    pub kind: u8,
    pub next: u8,
    pub shake: u8,
    pub route: u8,
    pub point_speed: u16,
    pub zoom_speed: u16,
    pub view_speed: u16,
    pub start: u8,
    pub movie: u8,
    pub pos: [f32; 3],
    pub rot: [f32; 3],
    pub zoom_start: f32,
    pub zoom_end: f32,
    pub view_start: [f32; 3],
    pub view_end: [f32; 3],
    pub time: f32,
}

/// Respawn point (JGPT).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Jgpt {
    pub idx: usize,
    pub pos: [f32; 3],
    pub rot: [f32; 3],
    pub id: u16,
    pub range: u16,
}

/// Cannon target (CNPT).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cnpt {
    pub idx: usize,
    pub pos: [f32; 3],
    pub rot: [f32; 3],
    pub id: u16,
    pub effect: u16,
}

/// Battle-mode end position (MSPT).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mspt {
    pub idx: usize,
    pub pos: [f32; 3],
    pub rot: [f32; 3],
    pub id: u16,
}

/// Stage settings (STGI).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stgi {
    pub idx: usize,
    pub laps: u8,
    pub pole_position: u8,
    pub narrow: u8,
    pub lens_flare: u8,
    pub flare_color: [u8; 4],
    /// Stored as a big-endian half-precision float.
    pub speed_mod: f32,
}

/// A fully decoded course file: the header plus all fifteen sections in
/// file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Kmp {
    pub header: Header,
    pub ktpt: Section<Ktpt>,
    pub enpt: Section<Enpt>,
    pub enph: Section<PathGroup>,
    pub itpt: Section<Itpt>,
    pub itph: Section<PathGroup>,
    pub ckpt: Section<Ckpt>,
    pub ckph: Section<Ckph>,
    pub gobj: Section<Gobj>,
    pub poti: Section<PotiRoute>,
    pub area: Section<Area>,
    pub came: Section<Came>,
    pub jgpt: Section<Jgpt>,
    pub cnpt: Section<Cnpt>,
    pub mspt: Section<Mspt>,
    pub stgi: Section<Stgi>,
}

impl Kmp {
    /// The checkpoint table.
    pub fn checkpoints(&self) -> &[Ckpt] {
        &self.ckpt.entries
    }

    /// The checkpoint group table.
    pub fn checkpoint_groups(&self) -> &[Ckph] {
        &self.ckph.entries
    }
}
