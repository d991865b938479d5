use footfall_core::{
    FlatTerrain, FootState, GaitParameters, HeightGrid, ProbeConfig, SwingTrajectoryGenerator,
    TerrainAdapter, Vec3,
};

/// One row of ten 10-unit cells with cells 4 and 5 raised to `bump`.
fn bump_row(bump: f32) -> TerrainAdapter<HeightGrid> {
    let mut grid = HeightGrid::new(10, 1, 10.0);
    grid.fill_height(4, 0, 6, 1, bump);
    TerrainAdapter::new(grid, ProbeConfig::default())
}

#[test]
fn lift_is_zero_at_both_ends_and_positive_between() {
    assert_eq!(SwingTrajectoryGenerator::lift(0.0, 10.0), 0.0);
    assert_eq!(SwingTrajectoryGenerator::lift(1.0, 10.0), 0.0);
    assert_eq!(SwingTrajectoryGenerator::lift(-0.5, 10.0), 0.0);
    assert_eq!(SwingTrajectoryGenerator::lift(1.5, 10.0), 0.0);
    assert!((SwingTrajectoryGenerator::lift(0.5, 10.0) - 10.0).abs() < 1e-5);

    for step in 1..100 {
        let phase = step as f32 / 100.0;
        assert!(SwingTrajectoryGenerator::lift(phase, 10.0) > 0.0, "phase {phase}");
    }
}

#[test]
fn lift_is_symmetric_about_mid_swing() {
    let early = SwingTrajectoryGenerator::lift(0.2, 8.0);
    let late = SwingTrajectoryGenerator::lift(0.8, 8.0);
    assert!((early - late).abs() < 1e-5);
}

#[test]
fn flat_ground_needs_no_obstacle_clearance() {
    let adapter = TerrainAdapter::new(FlatTerrain::default(), ProbeConfig::default());
    let obstacle = SwingTrajectoryGenerator::obstacle_height(
        &adapter,
        Vec3::ZERO,
        Vec3::new(100.0, 0.0, 0.0),
        15.0,
    );
    assert_eq!(obstacle, 0.0);

    let gait = GaitParameters::default();
    assert_eq!(
        SwingTrajectoryGenerator::max_lift(&gait, obstacle),
        gait.step_height * gait.lift_height_multiplier
    );
}

#[test]
fn tall_bump_adds_clearance_above_half_step_height() {
    let adapter = bump_row(30.0);
    let obstacle = SwingTrajectoryGenerator::obstacle_height(
        &adapter,
        Vec3::new(5.0, 5.0, 0.0),
        Vec3::new(95.0, 5.0, 0.0),
        15.0,
    );
    assert!((obstacle - 22.5).abs() < 1e-4, "got {obstacle}");
}

#[test]
fn small_bump_is_absorbed_by_nominal_lift() {
    let adapter = bump_row(5.0);
    let obstacle = SwingTrajectoryGenerator::obstacle_height(
        &adapter,
        Vec3::new(5.0, 5.0, 0.0),
        Vec3::new(95.0, 5.0, 0.0),
        15.0,
    );
    assert_eq!(obstacle, 0.0);
}

#[test]
fn sample_interpolates_and_lifts() {
    let sample = SwingTrajectoryGenerator::sample(
        Vec3::ZERO,
        Vec3::new(10.0, 0.0, 0.0),
        0.5,
        4.0,
    );
    assert!((sample.position - Vec3::new(5.0, 0.0, 4.0)).length() < 1e-5);
    assert_eq!(sample.offset.x, 0.0);
    assert_eq!(sample.offset.y, 0.0);
}

#[test]
fn advance_follows_the_arc_and_plants_on_target() {
    let adapter = TerrainAdapter::new(FlatTerrain::default(), ProbeConfig::default());
    let gait = GaitParameters::default();
    let generator = SwingTrajectoryGenerator::new();
    let target = Vec3::new(30.0, 0.0, 0.0);
    let mut foot = FootState {
        target,
        planted: false,
        ..FootState::at_rest(Vec3::ZERO, Vec3::Z)
    };

    let mut phases = Vec::new();
    for _ in 0..3 {
        assert!(!generator.advance(&mut foot, 0.125, 0.5, &gait, &adapter));
        assert!(foot.is_swinging());
        assert!(foot.swing_offset.z > 0.0);
        assert!((foot.position.z - foot.swing_offset.z).abs() < 1e-5);
        phases.push(foot.phase);
    }
    assert_eq!(phases, vec![0.25, 0.5, 0.75]);
    assert!((foot.position.x - 22.5).abs() < 1e-4);

    assert!(generator.advance(&mut foot, 0.125, 0.5, &gait, &adapter));
    assert!(foot.is_planted());
    assert_eq!(foot.position, target);
    assert_eq!(foot.swing_offset, Vec3::ZERO);
    assert_eq!(foot.phase, 0.0);
}

#[test]
fn advance_ignores_planted_feet() {
    let adapter = TerrainAdapter::new(FlatTerrain::default(), ProbeConfig::default());
    let mut foot = FootState::at_rest(Vec3::new(1.0, 2.0, 0.0), Vec3::Z);
    let before = foot;
    let planted = SwingTrajectoryGenerator::new().advance(
        &mut foot,
        0.1,
        0.5,
        &GaitParameters::default(),
        &adapter,
    );
    assert!(!planted);
    assert_eq!(foot, before);
}
