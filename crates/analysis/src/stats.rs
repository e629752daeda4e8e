//! Checkpoint statistics and the 95% rule.
//!
//! Ultra shortcuts skip most of a lap by crossing the finish line
//! backwards. The game forgives this only while the player's lap
//! completion stays within 95% of where the lap started, so the two
//! interesting numbers for a track are the highest checkpoint index a
//! shortcut may touch, measured from the lap-start checkpoint and from
//! the checkpoint right after it.

use log::{debug, warn};
use serde::Serialize;

use trackbreak_kmp::{Ckph, Kmp, NO_LINK};

use crate::error::{AnalysisError, Result};
use crate::graph::CheckpointGraph;

/// Sentinel for derived values that cannot be computed for a course.
pub const UNAVAILABLE: f64 = -1.0;

/// Summary of a course's checkpoint layout.
///
/// The four derived fields collapse to [`UNAVAILABLE`] when the course
/// does not have exactly one lap-start checkpoint (kind 0); the counts
/// are always real.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckpointStats {
    pub group_count: usize,
    pub checkpoint_count: usize,
    /// Checkpoints with kind below 255.
    pub key_checkpoint_count: usize,
    /// Index of the highest-numbered key checkpoint.
    pub last_key_checkpoint: usize,
    /// Highest checkpoint index reachable without tripping the 95%
    /// rule, measured from the lap-start checkpoint. Fractional:
    /// interpolated between checkpoint lines.
    pub from_cp0: f64,
    /// Same bound measured from the checkpoint after the lap start.
    pub from_cp1: f64,
    /// Lap completion at the highest key checkpoint.
    pub last_key_completion: f64,
    /// Highest completion a shortcut may reach while still skipping
    /// the lap.
    pub max_ultra_completion: f64,
    /// Free-form notes attached by callers; never set here.
    pub anomalies: Option<String>,
}

/// Compute checkpoint statistics for a decoded course.
pub fn checkpoint_statistics(kmp: &Kmp) -> Result<CheckpointStats> {
    let ckpt = kmp.checkpoints();
    let groups = kmp.checkpoint_groups();

    let mut cp0_count = 0usize;
    let mut key_count = 0usize;
    let mut kcp0 = 0usize;
    let mut cp1s: Vec<usize> = Vec::new();
    let mut last_cps: Vec<usize> = Vec::new();
    // Indices of the highest-numbered key checkpoints seen so far.
    let mut max_kcps: Vec<usize> = vec![0];

    for cp in ckpt {
        if !cp.is_key() {
            continue;
        }
        key_count += 1;

        if cp.kind == 0 {
            kcp0 = cp.idx;
            cp0_count += 1;
            let home = covering_group(groups, kcp0)
                .ok_or(AnalysisError::UncoveredCheckpoint(kcp0))?;

            if cp.next == NO_LINK {
                for g in groups[home].next_groups() {
                    match groups.get(g) {
                        Some(grp) => cp1s.push(usize::from(grp.start)),
                        None => warn!("group {home} links forward to nonexistent group {g}"),
                    }
                }
            } else {
                cp1s = vec![usize::from(cp.next)];
            }

            for g in groups[home].prev_groups() {
                match groups.get(g) {
                    Some(grp) if grp.len > 0 => {
                        last_cps.push(usize::from(grp.start) + usize::from(grp.len) - 1);
                    }
                    Some(_) => warn!("group {g} behind the lap start is empty"),
                    None => warn!("group {home} links backward to nonexistent group {g}"),
                }
            }
        }

        let best = ckpt[max_kcps[0]].kind;
        if best < cp.kind && cp.kind < 100 {
            max_kcps = vec![cp.idx];
        } else if best == cp.kind {
            max_kcps.push(cp.idx);
        }
    }

    let base = CheckpointStats {
        group_count: groups.len(),
        checkpoint_count: ckpt.len(),
        key_checkpoint_count: key_count,
        last_key_checkpoint: max_kcps[0],
        from_cp0: UNAVAILABLE,
        from_cp1: UNAVAILABLE,
        last_key_completion: UNAVAILABLE,
        max_ultra_completion: UNAVAILABLE,
        anomalies: None,
    };

    if cp0_count != 1 {
        debug!("found {cp0_count} lap-start checkpoints, statistics unavailable");
        return Ok(base);
    }

    let graph = CheckpointGraph::build(kmp)?;
    let home = graph
        .group_of(kcp0)
        .ok_or(AnalysisError::UncoveredCheckpoint(kcp0))?;
    let total_layers = graph.total_layers_from(home);
    if total_layers <= 0 {
        warn!("no layered path reaches the lap start group, statistics unavailable");
        return Ok(base);
    }
    let completion = graph.completions(total_layers);

    cp1s.retain(|&cp| {
        let ok = cp < ckpt.len();
        if !ok {
            warn!("checkpoint {cp} after the lap start is outside the table");
        }
        ok
    });
    last_cps.retain(|&cp| {
        let ok = cp < ckpt.len();
        if !ok {
            warn!("checkpoint {cp} behind the lap start is outside the table");
        }
        ok
    });
    if cp1s.is_empty() || last_cps.is_empty() {
        warn!("lap start has no usable neighbor checkpoints, statistics unavailable");
        return Ok(base);
    }

    // Most advanced of the checkpoints right after the lap start, and
    // least advanced of the highest-numbered key checkpoints.
    let mut cp1 = cp1s[0];
    for &cp in &cp1s {
        if completion[cp1] < completion[cp] {
            cp1 = cp;
        }
    }
    let last_cp = last_cps[0];
    let mut max_kcp = max_kcps[0];
    for &kcp in &max_kcps {
        if completion[max_kcp] > completion[kcp] {
            max_kcp = kcp;
        }
    }

    // Walk backwards from the checkpoint behind the lap start until the
    // completion deficit passes 95%, interpolating a fractional index
    // within the crossing interval.
    let owner = graph.group_map();
    let mut ifrom0 = 0.0f64;
    let mut ifrom1 = 0.0f64;
    for i in (1..=last_cp).rev() {
        let len = groups[owner[i]].len;
        let interval = 1.0 / (f64::from(len) * f64::from(total_layers));

        if ifrom1 == 0.0 && completion[i] <= 0.95 + completion[cp1] {
            ifrom1 = i as f64 + (0.95 + completion[cp1] - completion[i]) / interval;
        }
        if ifrom0 == 0.0 && completion[i] <= 0.95 + completion[kcp0] {
            ifrom0 = i as f64 + (0.95 + completion[kcp0] - completion[i]) / interval;
            break;
        }
    }

    Ok(CheckpointStats {
        from_cp0: round_to(ifrom0.min(last_cp as f64), 2),
        from_cp1: round_to(ifrom1.min(last_cp as f64), 2),
        last_key_completion: round_to(completion[max_kcp], 4),
        max_ultra_completion: round_to((0.95 + completion[cp1]).min(completion[last_cp]), 4),
        ..base
    })
}

/// Group owning checkpoint `cp`. When group ranges overlap, the last
/// group in table order wins.
fn covering_group(groups: &[Ckph], cp: usize) -> Option<usize> {
    groups
        .iter()
        .filter(|g| g.checkpoints().contains(&cp))
        .last()
        .map(|g| g.gidx)
}

fn round_to(v: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (v * scale).round() / scale
}
