use boxsim::config::SimConfig;
use boxsim::core::{
    step_particle, Bounds, CollisionLog, ContactRule, NullObserver, Particle, Simulation,
    StepOutcome,
};
use boxsim::error::Result;

/// Particle just short of the x-max wall: the tentative x overshoots, so vx flips
/// and the position stays where it was.
#[test]
fn wall_bounce_keeps_position_and_flips_velocity() -> Result<()> {
    let bounds = Bounds::square(0.0, 1.0)?;
    let mut ps = vec![Particle::new([0.995, 0.5], [1.0, 0.0], 0.0)?];

    let out = step_particle(0, &mut ps, 0.01, &bounds, ContactRule::Overlap, &mut NullObserver)?;

    assert_eq!(out, StepOutcome::Wall { x: true, y: false });
    assert_eq!(ps[0].v, [-1.0, 0.0]);
    assert_eq!(ps[0].r, [0.995, 0.5]);
    Ok(())
}

/// Reflection negates exactly the contacted component and nothing else.
#[test]
fn wall_reflection_is_sign_exact() -> Result<()> {
    let bounds = Bounds::new(-2.0, 2.0, -1.0, 1.0)?;
    let v0 = [0.3, -0.731];
    let mut ps = vec![Particle::new([0.0, -0.9], v0, 0.05)?];

    let out = step_particle(0, &mut ps, 0.2, &bounds, ContactRule::Overlap, &mut NullObserver)?;

    assert_eq!(out, StepOutcome::Wall { x: false, y: true });
    assert_eq!(ps[0].v, [v0[0], -v0[1]]);
    assert_eq!(ps[0].r, [0.0 + 0.3 * 0.2, -0.9]);
    Ok(())
}

/// A wall contact ends the step even if the tentative position overlaps another particle.
#[test]
fn wall_contact_skips_particle_scan() -> Result<()> {
    let bounds = Bounds::square(0.0, 1.0)?;
    let mut ps = vec![
        Particle::new([0.9, 0.5], [1.0, 1.0], 0.1)?,
        Particle::new([0.95, 0.55], [0.0, 0.0], 0.1)?,
    ];
    let mut log = CollisionLog::new();

    let out = step_particle(0, &mut ps, 0.05, &bounds, ContactRule::Overlap, &mut log)?;

    assert_eq!(out, StepOutcome::Wall { x: true, y: false });
    assert!(log.is_empty(), "no particle notification after a wall bounce");
    assert_eq!(ps[0].v, [-1.0, 1.0]);
    assert_eq!(ps[0].r, [0.9, 0.5 + 1.0 * 0.05]);
    Ok(())
}

/// Every particle stays inside the box at the end of every tick, for both contact rules.
#[test]
fn positions_stay_in_box_every_tick() -> Result<()> {
    for rule in [ContactRule::Overlap, ContactRule::ExactCoordinate] {
        let config = SimConfig {
            num_particles: 40,
            dt: 0.05,
            total_time: 25.0,
            bounds: Bounds::new(0.0, 5.0, -1.0, 2.0)?,
            radius: 0.15,
            contact_rule: rule,
            seed: Some(2024),
            ..SimConfig::default()
        };
        let bounds = config.bounds;
        let mut sim = Simulation::new(config)?;
        while !sim.is_finished() {
            sim.tick(&mut NullObserver)?;
            for (i, p) in sim.particles.iter().enumerate() {
                assert!(
                    bounds.contains(&p.r),
                    "particle {i} left the box at tick {}: {:?}",
                    sim.ticks(),
                    p.r
                );
            }
        }
    }
    Ok(())
}
