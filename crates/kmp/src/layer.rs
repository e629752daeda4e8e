//! Checkpoint-group layering.
//!
//! Lap completion needs to know how "deep" into the course each group
//! sits. The layer of a group is the depth of the first depth-first path
//! that reaches it from group 0, starting at 1. Once assigned, a layer is
//! never rewritten: alternate routes joining a group later keep the
//! depth of the path that got there first.

use log::warn;

use crate::sections::{Ckph, NO_LINK};

/// Assign layers to every group reachable from group 0.
///
/// Uses an explicit stack so link cycles and long chains cannot exhaust
/// the call stack. Successors are pushed in reverse slot order, which
/// makes the pop order identical to a recursive depth-first walk over
/// the `next` slots. Groups never reached keep layer -1.
pub fn assign_layers(groups: &mut [Ckph]) {
    if groups.is_empty() {
        return;
    }

    let mut stack: Vec<(usize, i32)> = vec![(0, 1)];
    while let Some((g, layer)) = stack.pop() {
        if groups[g].layer != -1 {
            continue;
        }
        groups[g].layer = layer;

        let next = groups[g].next;
        for &slot in next.iter().rev() {
            if slot == NO_LINK {
                continue;
            }
            let n = usize::from(slot);
            if n >= groups.len() {
                warn!("group {g} links forward to nonexistent group {n}");
                continue;
            }
            if groups[n].layer == -1 {
                stack.push((n, layer + 1));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(gidx: usize, start: u8, len: u8, prev: &[u8], next: &[u8]) -> Ckph {
        let mut p = [NO_LINK; 6];
        let mut n = [NO_LINK; 6];
        p[..prev.len()].copy_from_slice(prev);
        n[..next.len()].copy_from_slice(next);
        Ckph {
            gidx,
            start,
            len,
            prev: p,
            next: n,
            layer: -1,
        }
    }

    fn layers(groups: &[Ckph]) -> Vec<i32> {
        groups.iter().map(|g| g.layer).collect()
    }

    #[test]
    fn test_chain_gets_increasing_layers() {
        let mut g = vec![
            group(0, 0, 2, &[2], &[1]),
            group(1, 2, 2, &[0], &[2]),
            group(2, 4, 2, &[1], &[0]),
        ];
        assign_layers(&mut g);
        assert_eq!(layers(&g), vec![1, 2, 3]);
    }

    #[test]
    fn test_single_group_self_link() {
        let mut g = vec![group(0, 0, 4, &[0], &[0])];
        assign_layers(&mut g);
        assert_eq!(layers(&g), vec![1]);
    }

    #[test]
    fn test_diamond_keeps_first_path_layer() {
        // 0 -> {1, 2}, 1 -> 3, 2 -> 3: the walk reaches 3 through 1
        // before the 0 -> 2 branch runs, so 3 keeps depth 3.
        let mut g = vec![
            group(0, 0, 1, &[], &[1, 2]),
            group(1, 1, 1, &[0], &[3]),
            group(2, 2, 1, &[0], &[3]),
            group(3, 3, 1, &[1, 2], &[]),
        ];
        assign_layers(&mut g);
        assert_eq!(layers(&g), vec![1, 2, 2, 3]);
    }

    #[test]
    fn test_shortcut_edge_does_not_rewrite() {
        // 0 -> {1, 3} with 1 -> 2 -> 3: slot order walks the long path
        // first, so 3 is layered at depth 4 before the direct 0 -> 3
        // edge is considered.
        let mut g = vec![
            group(0, 0, 1, &[], &[1, 3]),
            group(1, 1, 1, &[0], &[2]),
            group(2, 2, 1, &[1], &[3]),
            group(3, 3, 1, &[2, 0], &[]),
        ];
        assign_layers(&mut g);
        assert_eq!(layers(&g), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_unreachable_group_stays_unassigned() {
        let mut g = vec![
            group(0, 0, 2, &[0], &[0]),
            group(1, 2, 2, &[], &[]),
        ];
        assign_layers(&mut g);
        assert_eq!(layers(&g), vec![1, -1]);
    }

    #[test]
    fn test_cycle_terminates() {
        let mut g = vec![
            group(0, 0, 1, &[1], &[1]),
            group(1, 1, 1, &[0], &[0]),
        ];
        assign_layers(&mut g);
        assert_eq!(layers(&g), vec![1, 2]);
    }

    #[test]
    fn test_dangling_link_is_skipped() {
        let mut g = vec![group(0, 0, 2, &[], &[5])];
        assign_layers(&mut g);
        assert_eq!(layers(&g), vec![1]);
    }

    #[test]
    fn test_empty_table_is_a_no_op() {
        let mut g: Vec<Ckph> = Vec::new();
        assign_layers(&mut g);
        assert!(g.is_empty());
    }
}
