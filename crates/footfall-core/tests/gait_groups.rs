use std::f32::consts::TAU;

use footfall_core::math::horizontal_distance;
use footfall_core::{
    CreatureProfile, FlatTerrain, FootEventKind, GaitGroups, GaitParameters, LayoutError,
    LegLayout, Vec3, WalkController,
};

/// Walk `profile` in a straight line and return the gait group of every lift, in order.
///
/// Every tick also checks that group members share one swing state and that no more groups are
/// in the air than the layout allows.
fn lift_sequence(profile: &CreatureProfile, ticks: usize) -> Vec<usize> {
    let mut walker =
        WalkController::from_profile(FlatTerrain::default(), profile).expect("valid profile");
    let groups = walker.gait_groups().clone();
    let mut sequence = Vec::new();

    for tick in 0..ticks {
        walker.tick(1.0 / 60.0, Vec3::new(0.0, 100.0, 0.0));

        let mut airborne = 0;
        for members in groups.iter() {
            let first = walker.legs()[members[0]].foot.planted;
            for &leg in members {
                assert_eq!(
                    walker.legs()[leg].foot.planted,
                    first,
                    "group split on tick {tick}"
                );
            }
            if !first {
                airborne += 1;
            }
        }
        assert!(
            airborne <= groups.max_airborne(),
            "{airborne} groups airborne on tick {tick}"
        );

        let lifted: Vec<usize> = walker
            .events()
            .iter()
            .filter(|e| e.kind == FootEventKind::Lifted)
            .map(|e| e.leg)
            .collect();
        if let Some(&leg) = lifted.first() {
            let group = groups.group_of(leg);
            let mut expected = groups.members(group).to_vec();
            let mut actual = lifted.clone();
            expected.sort_unstable();
            actual.sort_unstable();
            assert_eq!(actual, expected, "partial group lift on tick {tick}");
            sequence.push(group);
        }
    }
    sequence
}

fn assert_alternates(sequence: &[usize], group_count: usize) {
    assert!(sequence.len() >= 4, "only {} lifts", sequence.len());
    for (i, &group) in sequence.iter().enumerate() {
        assert_eq!(group, i % group_count, "lift {i} out of order: {sequence:?}");
    }
}

#[test]
fn hexapod_uses_alternating_tripods() {
    let profile = CreatureProfile::hexapod();
    let groups = profile.layout.resolve().expect("valid layout");
    assert_eq!(groups.members(0), &[0, 3, 4]);
    assert_eq!(groups.members(1), &[1, 2, 5]);

    assert_alternates(&lift_sequence(&profile, 600), 2);
}

#[test]
fn quadruped_trots_in_diagonal_pairs() {
    let profile = CreatureProfile::quadruped();
    let groups = profile.layout.resolve().expect("valid layout");
    assert_eq!(groups.members(0), &[0, 3]);
    assert_eq!(groups.members(1), &[1, 2]);

    assert_alternates(&lift_sequence(&profile, 600), 2);
}

#[test]
fn biped_alternates_single_legs() {
    assert_alternates(&lift_sequence(&CreatureProfile::biped(), 600), 2);
}

#[test]
fn every_leg_count_defaults_to_two_alternating_groups() {
    for legs in 2..=8 {
        let groups = GaitGroups::default_for(legs);
        assert_eq!(groups.len(), 2, "{legs} legs");
        assert_eq!(groups.max_airborne(), 1);
    }
    let groups = GaitGroups::default_for(5);
    assert_eq!(groups.members(0), &[0, 3, 4]);
    assert_eq!(groups.members(1), &[1, 2]);
}

/// Hips evenly spaced on a ring of radius 40.
fn ring_layout(legs: usize) -> LegLayout {
    LegLayout::new(
        (0..legs)
            .map(|i| {
                let angle = TAU * i as f32 / legs as f32;
                Vec3::new(angle.cos() * 40.0, angle.sin() * 40.0, 0.0)
            })
            .collect(),
    )
}

/// Largest horizontal hip-to-foot distance seen while walking at 100 units/s.
fn max_trailing_distance(layout: &LegLayout) -> f32 {
    let mut walker = WalkController::new(FlatTerrain::default(), layout, GaitParameters::default())
        .expect("valid layout");
    let mut worst = 0.0_f32;
    for _ in 0..1200 {
        walker.tick(1.0 / 60.0, Vec3::new(0.0, 100.0, 0.0));
        let position = walker.character().position;
        for leg in walker.legs() {
            worst = worst.max(horizontal_distance(leg.hip_anchor(position), leg.foot.position));
        }
    }
    worst
}

#[test]
fn feet_keep_up_with_their_hips_for_any_leg_count() {
    // Two strides of travel at 100 units/s: 2 * 100 * 0.375.
    let bound = 75.0;
    for legs in [3, 5, 8] {
        let worst = max_trailing_distance(&ring_layout(legs));
        assert!(worst < bound, "{legs} legs trailed by {worst}");
    }
}

#[test]
fn many_single_leg_groups_step_concurrently() {
    let layout = ring_layout(8).with_groups((0..8).map(|leg| vec![leg]).collect());
    let worst = max_trailing_distance(&layout);
    assert!(worst < 75.0, "trailed by {worst}");

    assert_eq!(lift_count_in_one_tick(&layout), 4);
}

/// Most lifts recorded during any single tick of a straight walk.
fn lift_count_in_one_tick(layout: &LegLayout) -> usize {
    let mut walker = WalkController::new(FlatTerrain::default(), layout, GaitParameters::default())
        .expect("valid layout");
    let mut most = 0;
    for _ in 0..300 {
        walker.tick(1.0 / 60.0, Vec3::new(0.0, 100.0, 0.0));
        let lifts = walker
            .events()
            .iter()
            .filter(|e| e.kind == FootEventKind::Lifted)
            .count();
        most = most.max(lifts);
    }
    most
}

#[test]
fn explicit_groups_are_validated() {
    let hips = vec![Vec3::X, -Vec3::X, Vec3::Y];

    let missing = LegLayout::new(hips.clone()).with_groups(vec![vec![0, 1]]);
    assert_eq!(missing.resolve(), Err(LayoutError::LegWithoutGroup { leg: 2 }));

    let out_of_range = LegLayout::new(hips.clone()).with_groups(vec![vec![0, 1], vec![2, 7]]);
    assert_eq!(
        out_of_range.resolve(),
        Err(LayoutError::LegOutOfRange {
            group: 1,
            leg: 7,
            count: 3
        })
    );

    let custom = LegLayout::new(hips).with_groups(vec![vec![2], vec![0, 1]]);
    let groups = custom.resolve().expect("valid partition");
    assert_eq!(groups.group_of(2), 0);
    assert_eq!(groups.group_of(0), 1);
}
