//! Fixed-timestep kinematic integration
//!
//! Velocity-Verlet style advance: position moves by the current velocity plus
//! a half-step acceleration contribution, then velocity absorbs the drag-
//! scaled acceleration, then acceleration is recomputed from the force
//! accumulator and the accumulator cleared. The angular channel follows the
//! same law with torque over inertia.

use glam::DVec2;

use super::diag::{self, Recovery};
use super::entity::PhysicsEntity;

/// Advance one entity by `dt`, self-healing any numeric corruption.
pub fn integrate(entity: &mut PhysicsEntity, dt: f64) {
    integrate_with(entity, dt, Recovery::default());
}

/// Advance one entity by `dt` with an explicit recovery mode.
///
/// Frozen entities are left completely untouched: no motion and no
/// accumulator reset, so forces applied while frozen are discarded on the
/// first step after unfreezing.
pub fn integrate_with(entity: &mut PhysicsEntity, dt: f64, recovery: Recovery) {
    if entity.frozen {
        return;
    }

    // linear
    entity.pos += entity.vel * dt + 0.5 * entity.acc * dt * dt;
    entity.vel += entity.drag * entity.acc * dt;
    entity.acc = entity.force / entity.mass;
    entity.force = DVec2::ZERO;

    // angular
    entity.rotation += entity.angular_vel * dt + 0.5 * entity.angular_acc * dt * dt;
    entity.angular_vel += entity.angular_acc * dt;
    entity.angular_acc = entity.torque / entity.inertia;
    entity.torque = 0.0;

    // check max-velocity, preserving direction
    let speed = entity.vel.length();
    if speed > entity.max_velocity {
        entity.vel *= entity.max_velocity / speed;
    }

    // corrupted mass or upstream NaN must not leak into the next frame
    entity.pos = diag::heal_vec(recovery, "position after integration", entity.pos);
    entity.vel = diag::heal_vec(recovery, "velocity after integration", entity.vel);
    entity.acc = diag::heal_vec(recovery, "acceleration from force/mass", entity.acc);
    entity.rotation = diag::heal_scalar(recovery, "rotation after integration", entity.rotation);
    entity.angular_vel =
        diag::heal_scalar(recovery, "angular velocity after integration", entity.angular_vel);
    entity.angular_acc =
        diag::heal_scalar(recovery, "angular acceleration from torque/inertia", entity.angular_acc);
}

/// Accumulate a force and torque for the next integrate step.
///
/// No immediate kinematic effect.
pub fn apply_force(entity: &mut PhysicsEntity, force: DVec2, torque: f64) {
    entity.force += force;
    entity.torque += torque;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn free_disc() -> PhysicsEntity {
        let mut entity = PhysicsEntity::disc(5.0);
        entity.max_velocity = 1000.0;
        entity
    }

    #[test]
    fn test_position_half_step() {
        let mut entity = free_disc();
        entity.vel = DVec2::new(1.0, 0.0);
        entity.acc = DVec2::new(0.2, 0.0);

        integrate(&mut entity, 2.0);

        // pos = v*dt + 0.5*a*dt^2 = 2.0 + 0.4
        assert!((entity.pos.x - 2.4).abs() < 1e-12);
        // vel = 1.0 + drag * 0.2 * 2.0
        assert!((entity.vel.x - 1.4).abs() < 1e-12);
        // no force pending, acceleration recomputed to zero
        assert_eq!(entity.acc, DVec2::ZERO);
    }

    #[test]
    fn test_drag_scales_acceleration_pickup() {
        let mut entity = free_disc();
        entity.drag = 0.5;
        entity.acc = DVec2::new(1.0, 0.0);

        integrate(&mut entity, 1.0);

        assert!((entity.vel.x - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_angular_channel() {
        let mut entity = free_disc();
        entity.angular_vel = 0.5;
        entity.angular_acc = 0.1;
        entity.inertia = 2.0;
        apply_force(&mut entity, DVec2::ZERO, 4.0);

        integrate(&mut entity, 1.0);

        assert!((entity.rotation - 0.55).abs() < 1e-12);
        assert!((entity.angular_vel - 0.6).abs() < 1e-12);
        // torque/inertia becomes the next step's angular acceleration
        assert!((entity.angular_acc - 2.0).abs() < 1e-12);
        assert_eq!(entity.torque, 0.0);
    }

    #[test]
    fn test_force_accumulates_without_moving() {
        let mut entity = free_disc();
        apply_force(&mut entity, DVec2::new(1.0, 2.0), 0.5);
        apply_force(&mut entity, DVec2::new(1.0, 0.0), 0.5);

        assert_eq!(entity.force, DVec2::new(2.0, 2.0));
        assert_eq!(entity.torque, 1.0);
        assert_eq!(entity.pos, DVec2::ZERO);
        assert_eq!(entity.vel, DVec2::ZERO);

        entity.mass = 2.0;
        integrate(&mut entity, 1.0);
        assert_eq!(entity.acc, DVec2::new(1.0, 1.0));
        assert_eq!(entity.force, DVec2::ZERO);
    }

    #[test]
    fn test_max_velocity_clamp_preserves_direction() {
        let mut entity = PhysicsEntity::disc(1.0);
        entity.max_velocity = 2.5;
        entity.vel = DVec2::new(3.0, 4.0);

        integrate(&mut entity, 1.0);

        assert!((entity.vel.length() - 2.5).abs() < 1e-12);
        assert_eq!(entity.vel, DVec2::new(1.5, 2.0));
    }

    #[test]
    fn test_frozen_is_a_full_no_op() {
        let mut entity = free_disc();
        entity.frozen = true;
        entity.vel = DVec2::new(1.0, 1.0);
        apply_force(&mut entity, DVec2::new(5.0, 0.0), 1.0);

        integrate(&mut entity, 1.0);

        assert_eq!(entity.pos, DVec2::ZERO);
        // accumulators stay pending while frozen
        assert_eq!(entity.force, DVec2::new(5.0, 0.0));
        assert_eq!(entity.torque, 1.0);
    }

    #[test]
    fn test_corrupted_mass_self_heals() {
        let mut entity = free_disc();
        entity.mass = 0.0; // upstream corruption
        apply_force(&mut entity, DVec2::ZERO, 0.0);

        integrate(&mut entity, 1.0);

        // 0/0 acceleration must not survive as NaN
        assert!(entity.acc.is_finite());
        assert!(entity.pos.is_finite());
        assert!(entity.vel.is_finite());
    }

    #[test]
    #[should_panic]
    fn test_fail_fast_surfaces_nan_velocity() {
        let mut entity = free_disc();
        entity.vel = DVec2::new(f64::NAN, 0.0);
        integrate_with(&mut entity, 1.0, Recovery::FailFast);
    }
}
