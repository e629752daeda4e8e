//! Feasibility search on small corridor courses.

mod support;

use pretty_assertions::assert_eq;
use trackbreak_analysis::{find_ghost_checkpoints, find_ghost_checkpoints_with_points, Bounds};
use trackbreak_kmp::{Kmp, NO_LINK};

use support::{course, cp, grp};

/// Four checkpoint lines across a straight corridor. With `flipped`
/// the last line's endpoints are swapped, which folds the quadrilateral
/// after checkpoint 2 over itself.
fn corridor(flipped: bool) -> Kmp {
    let mut cps = vec![
        cp(0, [0.0, -100.0], [0.0, 0.0], 255, NO_LINK, 1),
        cp(1, [200.0, -100.0], [200.0, 0.0], 255, 0, 2),
        cp(2, [400.0, -100.0], [400.0, 0.0], 255, 1, 3),
        cp(3, [600.0, -100.0], [600.0, 0.0], 255, 2, NO_LINK),
    ];
    if flipped {
        cps[3] = cp(3, [600.0, 0.0], [600.0, -100.0], 255, 2, NO_LINK);
    }
    course(cps, vec![grp(0, 0, 4, &[], &[], 1)])
}

#[test]
fn straight_corridor_has_no_ghost_checkpoints() {
    assert_eq!(
        find_ghost_checkpoints(&corridor(false), Bounds::default()),
        Vec::<usize>::new()
    );
}

#[test]
fn flipped_line_makes_its_predecessor_a_ghost_checkpoint() {
    assert_eq!(
        find_ghost_checkpoints(&corridor(true), Bounds::default()),
        vec![2]
    );
}

#[test]
fn witness_point_lies_in_the_reachable_region() {
    let ghosts = find_ghost_checkpoints_with_points(&corridor(true), Bounds::default());

    assert_eq!(ghosts.len(), 1);
    assert_eq!(ghosts[0].index, 2);
    // Plot coordinates negate z, so the corridor runs from y = 0 to
    // y = 100. The fold is reachable between x = 400 and x = 500.
    let [x, y] = ghosts[0].point;
    assert!(x >= 399.999 && x <= 500.001, "x = {x}");
    assert!(y >= -0.001 && y <= 100.001, "y = {y}");
}

#[test]
fn tight_bounds_exclude_far_regions() {
    let bounds = Bounds {
        min: 0.0,
        max: 10.0,
    };

    assert_eq!(
        find_ghost_checkpoints(&corridor(true), bounds),
        Vec::<usize>::new()
    );
}
