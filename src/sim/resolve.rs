//! Impulse-based collision resolution
//!
//! Consumes a contact from the detector and mutates both entities in place:
//! positional correction first (heavier bodies move less), then a fully
//! elastic impulse with rotational coupling. The host learns about the
//! collision exclusively through the callback, which receives shape-tagged
//! before/after snapshots of both bodies.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_PLAUSIBLE_OVERLAP;

use super::detect::Contact;
use super::diag::{self, Recovery};
use super::entity::{Collider, PhysicsEntity};

/// Per-body snapshot handed to the collision callback.
///
/// The collider tag carries the body's dimensions, so audio and visual
/// collaborators can size their effects without reaching back into the world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionBody {
    pub collider: Collider,
    /// Position after positional correction.
    pub pos: DVec2,
    pub rotation: f64,
    pub old_vel: DVec2,
    pub new_vel: DVec2,
    pub old_angular_vel: f64,
    pub new_angular_vel: f64,
}

/// Resolve a detected contact, self-healing any numeric corruption.
pub fn resolve<F>(a: &mut PhysicsEntity, b: &mut PhysicsEntity, contact: &Contact, on_collision: F)
where
    F: FnMut(CollisionBody, CollisionBody, DVec2, DVec2, f64),
{
    resolve_with(a, b, contact, Recovery::default(), on_collision);
}

/// Resolve a detected contact with an explicit recovery mode.
///
/// Correction and impulse weights treat frozen bodies as infinitely massive:
/// a frozen body never moves, and its partner absorbs the full separation.
/// When both bodies are immovable the impulse is skipped entirely, but the
/// callback still fires with identical before/after snapshots.
pub fn resolve_with<F>(
    a: &mut PhysicsEntity,
    b: &mut PhysicsEntity,
    contact: &Contact,
    recovery: Recovery,
    mut on_collision: F,
) where
    F: FnMut(CollisionBody, CollisionBody, DVec2, DVec2, f64),
{
    let Contact { point, normal, overlap } = *contact;

    if overlap > MAX_PLAUSIBLE_OVERLAP {
        log::warn!(
            "implausibly large overlap {overlap} between bodies at {} and {}",
            a.pos,
            b.pos
        );
    }

    // contact offsets from the pre-correction centers
    let r_a = point - a.pos;
    let r_b = point - b.pos;

    let inv_mass_a = a.inv_mass();
    let inv_mass_b = b.inv_mass();

    // separate the shapes, each body displaced by the other's mass share
    let inv_mass_total = inv_mass_a + inv_mass_b;
    if inv_mass_total > 0.0 {
        a.pos -= normal * (overlap * inv_mass_a / inv_mass_total);
        b.pos += normal * (overlap * inv_mass_b / inv_mass_total);
    }

    let old_vel_a = a.vel;
    let old_vel_b = b.vel;
    let old_angular_a = a.angular_vel;
    let old_angular_b = b.angular_vel;

    // velocity of each body at the contact point, rotation included
    let contact_vel_a = a.vel + a.angular_vel * r_a.perp();
    let contact_vel_b = b.vel + b.angular_vel * r_b.perp();
    let rel_vel = (contact_vel_a - contact_vel_b).dot(normal);

    let ra_n = r_a.perp_dot(normal);
    let rb_n = r_b.perp_dot(normal);
    let inv_mass_sum = inv_mass_a
        + inv_mass_b
        + ra_n * ra_n * a.inv_inertia()
        + rb_n * rb_n * b.inv_inertia();

    // the factor 2 bakes in a fully elastic response
    let j = if inv_mass_sum > f64::EPSILON {
        -2.0 * rel_vel / inv_mass_sum
    } else {
        0.0 // both bodies immovable
    };
    let impulse = j * normal;

    if !a.frozen {
        a.vel += impulse * inv_mass_a;
        a.angular_vel += r_a.perp_dot(impulse) * a.inv_inertia();
    }
    if !b.frozen {
        b.vel -= impulse * inv_mass_b;
        b.angular_vel -= r_b.perp_dot(impulse) * b.inv_inertia();
    }

    // nothing non-finite may survive into entity state
    a.pos = diag::heal_vec(recovery, "position after correction", a.pos);
    b.pos = diag::heal_vec(recovery, "position after correction", b.pos);
    a.vel = diag::heal_vec(recovery, "velocity after impulse", a.vel);
    b.vel = diag::heal_vec(recovery, "velocity after impulse", b.vel);
    a.angular_vel = diag::heal_scalar(recovery, "angular velocity after impulse", a.angular_vel);
    b.angular_vel = diag::heal_scalar(recovery, "angular velocity after impulse", b.angular_vel);

    let result_a = CollisionBody {
        collider: a.collider,
        pos: a.pos,
        rotation: a.rotation,
        old_vel: old_vel_a,
        new_vel: a.vel,
        old_angular_vel: old_angular_a,
        new_angular_vel: a.angular_vel,
    };
    let result_b = CollisionBody {
        collider: b.collider,
        pos: b.pos,
        rotation: b.rotation,
        old_vel: old_vel_b,
        new_vel: b.vel,
        old_angular_vel: old_angular_b,
        new_angular_vel: b.angular_vel,
    };

    on_collision(result_a, result_b, point, normal, overlap);
}
