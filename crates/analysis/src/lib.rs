//! # Trackbreak Analysis
//!
//! Checkpoint analysis for decoded courses: the connectivity graph and
//! completion math, the 95% statistics used to judge shortcuts, the
//! ghost checkpoint search, and an interactive map export.
//!
//! ## Features
//!
//! - **Checkpoint graph** - group connectivity as a directed graph,
//!   with layer totals and per-checkpoint race completion
//! - **95% statistics** - how far back a shortcut may start and still
//!   count as finishing the lap
//! - **Ghost checkpoints** - finds checkpoints that can be triggered
//!   from outside their intended region, by half-plane feasibility
//! - **Map export** - renders the whole checkpoint layout, with ghost
//!   regions shaded, as a Desmos HTML page
//!
//! ## Architecture
//!
//! ```text
//! Kmp (trackbreak-kmp)
//!     │
//!     ├──> graph::CheckpointGraph ── completions ──> stats::CheckpointStats
//!     │
//!     ├──> gcp::neighbors ── half-plane systems ──> gcp::GhostCheckpoint
//!     │
//!     └──> render::render ──> Desmos HTML page
//! ```

mod error;
mod gcp;
mod graph;
mod halfplane;
mod render;
mod stats;

pub use error::{AnalysisError, Result};
pub use gcp::{
    find_ghost_checkpoints, find_ghost_checkpoints_with_points, Bounds, GhostCheckpoint,
};
pub use graph::CheckpointGraph;
pub use halfplane::{boxed, feasible_point, HalfPlane};
pub use render::{render, RenderOptions};
pub use stats::{checkpoint_statistics, CheckpointStats, UNAVAILABLE};
