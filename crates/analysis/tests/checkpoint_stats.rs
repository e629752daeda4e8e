//! Statistics over hand-built checkpoint layouts.

mod support;

use pretty_assertions::assert_eq;
use trackbreak_analysis::{checkpoint_statistics, AnalysisError, CheckpointStats, UNAVAILABLE};
use trackbreak_kmp::{Kmp, NO_LINK};

use support::{course, cp, grp};

/// One self-looping group of `n` checkpoints marching along the x axis.
/// Checkpoint 0 is the lap start, the rest are non-key.
fn loop_course(n: u8) -> Kmp {
    let mut cps = Vec::new();
    for i in 0..n {
        let x = f32::from(i) * 100.0;
        let prev = if i == 0 { NO_LINK } else { i - 1 };
        let next = if i + 1 == n { NO_LINK } else { i + 1 };
        let kind = if i == 0 { 0 } else { 255 };
        cps.push(cp(usize::from(i), [x, -100.0], [x, 0.0], kind, prev, next));
    }
    course(cps, vec![grp(0, 0, n, &[0], &[0], 1)])
}

#[test]
fn single_group_loop_reports_the_full_summary() {
    let mut kmp = loop_course(50);
    kmp.ckpt.entries[25].kind = 1;

    let stats = checkpoint_statistics(&kmp).unwrap();

    assert_eq!(
        stats,
        CheckpointStats {
            group_count: 1,
            checkpoint_count: 50,
            key_checkpoint_count: 2,
            last_key_checkpoint: 25,
            from_cp0: 47.5,
            from_cp1: 48.5,
            last_key_completion: 0.5,
            max_ultra_completion: 0.97,
            anomalies: None,
        }
    );
}

#[test]
fn two_group_course_measures_completion_across_layers() {
    let cps = vec![
        cp(0, [0.0, -100.0], [0.0, 0.0], 0, NO_LINK, NO_LINK),
        cp(1, [100.0, -100.0], [100.0, 0.0], 255, 0, 2),
        cp(2, [200.0, -100.0], [200.0, 0.0], 255, 1, 3),
        cp(3, [300.0, -100.0], [300.0, 0.0], 255, 2, NO_LINK),
        cp(4, [400.0, -100.0], [400.0, 0.0], 1, NO_LINK, 5),
        cp(5, [500.0, -100.0], [500.0, 0.0], 255, 4, 6),
        cp(6, [600.0, -100.0], [600.0, 0.0], 255, 5, 7),
        cp(7, [700.0, -100.0], [700.0, 0.0], 255, 6, NO_LINK),
    ];
    let groups = vec![grp(0, 0, 4, &[1], &[1], 1), grp(1, 4, 4, &[0], &[0], 2)];

    let stats = checkpoint_statistics(&course(cps, groups)).unwrap();

    assert_eq!(stats.group_count, 2);
    assert_eq!(stats.checkpoint_count, 8);
    assert_eq!(stats.key_checkpoint_count, 2);
    assert_eq!(stats.last_key_checkpoint, 4);
    // The lap start defers to the group table, so the checkpoint after
    // it is the first checkpoint of group 1, half a lap in. Both walks
    // then run past the last checkpoint and are clamped to it.
    assert_eq!(stats.from_cp0, 7.0);
    assert_eq!(stats.from_cp1, 7.0);
    assert_eq!(stats.last_key_completion, 0.5);
    assert_eq!(stats.max_ultra_completion, 0.875);
}

#[test]
fn multiple_lap_starts_leave_derived_fields_unavailable() {
    let cps = vec![
        cp(0, [0.0, -100.0], [0.0, 0.0], 0, NO_LINK, 1),
        cp(1, [100.0, -100.0], [100.0, 0.0], 255, 0, 2),
        cp(2, [200.0, -100.0], [200.0, 0.0], 0, 1, 3),
        cp(3, [300.0, -100.0], [300.0, 0.0], 255, 2, NO_LINK),
    ];

    let stats = checkpoint_statistics(&course(cps, vec![grp(0, 0, 4, &[0], &[0], 1)])).unwrap();

    assert_eq!(stats.group_count, 1);
    assert_eq!(stats.checkpoint_count, 4);
    assert_eq!(stats.key_checkpoint_count, 2);
    assert_eq!(stats.from_cp0, UNAVAILABLE);
    assert_eq!(stats.from_cp1, UNAVAILABLE);
    assert_eq!(stats.last_key_completion, UNAVAILABLE);
    assert_eq!(stats.max_ultra_completion, UNAVAILABLE);
}

#[test]
fn empty_course_reports_counts_only() {
    let stats = checkpoint_statistics(&Kmp::default()).unwrap();

    assert_eq!(stats.group_count, 0);
    assert_eq!(stats.checkpoint_count, 0);
    assert_eq!(stats.key_checkpoint_count, 0);
    assert_eq!(stats.from_cp0, UNAVAILABLE);
    assert_eq!(stats.max_ultra_completion, UNAVAILABLE);
}

#[test]
fn statistics_are_pure() {
    let mut kmp = loop_course(12);
    kmp.ckpt.entries[6].kind = 1;

    let first = checkpoint_statistics(&kmp).unwrap();
    let second = checkpoint_statistics(&kmp).unwrap();

    assert_eq!(first, second);
}

#[test]
fn lap_start_outside_every_group_is_an_error() {
    let cps = vec![
        cp(0, [0.0, -100.0], [0.0, 0.0], 0, NO_LINK, 1),
        cp(1, [100.0, -100.0], [100.0, 0.0], 255, 0, NO_LINK),
    ];

    let err = checkpoint_statistics(&course(cps, vec![grp(0, 1, 1, &[0], &[0], 1)])).unwrap_err();

    assert!(matches!(err, AnalysisError::UncoveredCheckpoint(0)));
}
