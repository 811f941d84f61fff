//! Astro Drift headless demo
//!
//! Stands in for the external game loop: spawns a seeded asteroid field,
//! then drives the physics at 120 updates per second with the accumulator
//! pattern, decoupled from a notional 60 fps frame cadence. Collisions are
//! logged; the momentum summary once per simulated second is the quickest
//! way to eyeball energy drift.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use astro_drift::consts::{MAX_SUBSTEPS, SIM_DT};
use astro_drift::sim::{PhysicsEntity, World};

const FRAME_MS: f64 = 1000.0 / 60.0;
const DEMO_SECONDS: u64 = 10;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xA57E_401D);
    log::info!("Astro Drift demo starting (seed {seed})");

    let mut rng = Pcg32::seed_from_u64(seed);
    let mut world = World::new();

    // drifting asteroids
    for _ in 0..24 {
        let radius = rng.random_range(4.0..14.0);
        let mut asteroid = PhysicsEntity::disc(radius);
        asteroid.pos = DVec2::new(rng.random_range(-300.0..300.0), rng.random_range(-200.0..200.0));
        asteroid.vel = DVec2::new(rng.random_range(-0.15..0.15), rng.random_range(-0.15..0.15));
        asteroid.angular_vel = rng.random_range(-0.002..0.002);
        asteroid.mass = radius * radius / 25.0;
        asteroid.inertia = asteroid.collider.inertia(asteroid.mass);
        asteroid.max_velocity = 0.5;
        world.spawn(asteroid);
    }

    // tumbling debris slabs
    for _ in 0..4 {
        let mut slab = PhysicsEntity::rect(rng.random_range(20.0..40.0), rng.random_range(10.0..20.0));
        slab.pos = DVec2::new(rng.random_range(-300.0..300.0), rng.random_range(-200.0..200.0));
        slab.vel = DVec2::new(rng.random_range(-0.1..0.1), rng.random_range(-0.1..0.1));
        slab.rotation = rng.random_range(0.0..std::f64::consts::TAU);
        slab.mass = 3.0;
        slab.inertia = slab.collider.inertia(slab.mass);
        slab.max_velocity = 0.5;
        world.spawn(slab);
    }

    // a pinned wreck in the middle of the field
    let mut wreck = PhysicsEntity::rect(60.0, 24.0);
    wreck.mass = 50.0;
    wreck.inertia = wreck.collider.inertia(wreck.mass);
    wreck.frozen = true;
    world.spawn(wreck);

    let mut collisions = 0u64;
    let mut accumulator = 0.0;
    let mut simulated_ms = 0.0;
    let mut next_summary_ms = 0.0;

    let frames = DEMO_SECONDS * 60;
    for _ in 0..frames {
        accumulator += FRAME_MS;

        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            world.tick(SIM_DT, |a_id, b_id, _a, _b, point, _normal, overlap| {
                collisions += 1;
                log::debug!(
                    "t={simulated_ms:.1}ms {a_id:?} hit {b_id:?} at {point} (overlap {overlap:.4})"
                );
            });
            accumulator -= SIM_DT;
            simulated_ms += SIM_DT;
            substeps += 1;
        }

        if simulated_ms >= next_summary_ms {
            log::info!(
                "t={:.0}s entities={} momentum={:.3}",
                simulated_ms / 1000.0,
                world.len(),
                world.total_momentum()
            );
            next_summary_ms += 1000.0;
        }
    }

    println!(
        "{collisions} collisions across {DEMO_SECONDS} simulated seconds ({} entities)",
        world.len()
    );
}
