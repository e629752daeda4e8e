//! Group connectivity and lap-completion math.
//!
//! Checkpoint groups form a small directed graph: each group names up
//! to six predecessors and six successors. This module turns the link
//! tables into a petgraph digraph, maps every checkpoint back to the
//! group that owns it, and computes the fractional lap completion that
//! the statistics engine and the 95% rule are built on.

use log::warn;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Bfs, Reversed};
use trackbreak_kmp::Kmp;

use crate::error::{AnalysisError, Result};

/// Connectivity view over the checkpoint group table.
#[derive(Debug)]
pub struct CheckpointGraph {
    graph: DiGraph<usize, ()>,
    nodes: Vec<NodeIndex>,
    /// Per group: start, len, layer.
    spans: Vec<(usize, usize, i32)>,
    /// Checkpoint index to owning group index.
    group_of: Vec<usize>,
}

impl CheckpointGraph {
    /// Build the group graph from a decoded course.
    ///
    /// Forward links to nonexistent groups are dropped with a warning,
    /// as are group ranges that run past the checkpoint table. When two
    /// group ranges overlap, the later group in table order owns the
    /// shared checkpoints. A checkpoint covered by no group at all is an
    /// error: it would have no completion value.
    pub fn build(kmp: &Kmp) -> Result<Self> {
        let groups = kmp.checkpoint_groups();
        let n = kmp.checkpoints().len();

        let mut graph = DiGraph::new();
        let nodes: Vec<NodeIndex> = (0..groups.len()).map(|g| graph.add_node(g)).collect();
        for g in groups {
            for next in g.next_groups() {
                if next >= groups.len() {
                    warn!("group {} links forward to nonexistent group {next}", g.gidx);
                    continue;
                }
                if !groups[next].prev_groups().any(|p| p == g.gidx) {
                    warn!("group {} -> {next} has no matching backward link", g.gidx);
                }
                graph.add_edge(nodes[g.gidx], nodes[next], ());
            }
        }

        let spans = groups
            .iter()
            .map(|g| (usize::from(g.start), usize::from(g.len), g.layer))
            .collect();

        let mut group_of = vec![usize::MAX; n];
        for g in groups {
            for cp in g.checkpoints() {
                if cp < n {
                    group_of[cp] = g.gidx;
                } else {
                    warn!(
                        "group {} covers checkpoint {cp}, but the table ends at {n}",
                        g.gidx
                    );
                }
            }
        }
        if let Some(cp) = group_of.iter().position(|&g| g == usize::MAX) {
            return Err(AnalysisError::UncoveredCheckpoint(cp));
        }

        Ok(Self {
            graph,
            nodes,
            spans,
            group_of,
        })
    }

    pub fn group_count(&self) -> usize {
        self.spans.len()
    }

    pub fn checkpoint_count(&self) -> usize {
        self.group_of.len()
    }

    /// Group owning the given checkpoint.
    pub fn group_of(&self, checkpoint: usize) -> Option<usize> {
        self.group_of.get(checkpoint).copied()
    }

    /// The full checkpoint index to group index map.
    pub fn group_map(&self) -> &[usize] {
        &self.group_of
    }

    /// Layer assigned to a group during decode.
    pub fn layer_of(&self, group: usize) -> Option<i32> {
        self.spans.get(group).map(|s| s.2)
    }

    /// Total layer count seen from `group`: the maximum layer among all
    /// groups that can reach it along forward links, the group itself
    /// included. For the lap-start group of an ordinary closed course
    /// this is the depth of the whole lap.
    pub fn total_layers_from(&self, group: usize) -> i32 {
        let Some(&start) = self.nodes.get(group) else {
            return 0;
        };
        let reversed = Reversed(&self.graph);
        let mut bfs = Bfs::new(reversed, start);
        let mut max = 0;
        while let Some(node) = bfs.next(reversed) {
            max = max.max(self.spans[self.graph[node]].2);
        }
        max
    }

    /// Fractional lap completion for every checkpoint.
    ///
    /// Checkpoint `i` in a group spanning `start..start+len` at layer
    /// `l` completes `((i - start) / len + l - 1) / total_layers` of
    /// the lap.
    pub fn completions(&self, total_layers: i32) -> Vec<f64> {
        self.group_of
            .iter()
            .enumerate()
            .map(|(cp, &g)| {
                let (start, len, layer) = self.spans[g];
                let within = (cp - start) as f64 / len as f64;
                (within + f64::from(layer - 1)) / f64::from(total_layers)
            })
            .collect()
    }
}
