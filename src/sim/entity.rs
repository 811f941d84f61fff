//! Physical entity state and collider variants
//!
//! Pure data: the entity carries kinematic state, mass properties and exactly
//! one collider shape. Behavior lives in the integrator, detector and
//! resolver. Entities are created by the host (spawning is game logic) and
//! the engine never destroys them.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Geometric shape of an entity, centered on its position.
///
/// Exactly one shape is active per entity; the detector matches exhaustively
/// over the four pair cases.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Collider {
    /// Circle of the given radius (rotation-independent).
    Disc { radius: f64 },
    /// Rectangle oriented by the entity's rotation.
    Box { width: f64, height: f64 },
}

impl Collider {
    /// Moment of inertia of a uniform body of this shape with the given mass.
    ///
    /// Convenience for hosts configuring entities; the engine itself only
    /// reads the `inertia` field.
    pub fn inertia(&self, mass: f64) -> f64 {
        match *self {
            Collider::Disc { radius } => 0.5 * mass * radius * radius,
            Collider::Box { width, height } => mass * (width * width + height * height) / 12.0,
        }
    }
}

/// A rigid body in the simulation.
///
/// `mass` and `inertia` must stay positive for any entity that can receive an
/// impulse. After every integrate step the linear speed is at most
/// `max_velocity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsEntity {
    pub pos: DVec2,
    pub vel: DVec2,
    pub acc: DVec2,
    /// Force accumulated since the last integrate step.
    pub force: DVec2,
    /// Orientation in radians.
    pub rotation: f64,
    pub angular_vel: f64,
    pub angular_acc: f64,
    /// Torque accumulated since the last integrate step.
    pub torque: f64,
    pub mass: f64,
    pub inertia: f64,
    pub collider: Collider,
    /// Velocity decay multiplier applied each integrate step.
    pub drag: f64,
    /// Hard clamp on linear speed, enforced by uniform rescale.
    pub max_velocity: f64,
    /// Pinned in place: skipped by integration, immune to impulses.
    pub frozen: bool,
}

impl Default for PhysicsEntity {
    /// At rest at the origin with unit mass properties, matching what hosts
    /// expect to configure afterwards (shape, mass, shape-derived inertia).
    fn default() -> Self {
        Self {
            pos: DVec2::ZERO,
            vel: DVec2::ZERO,
            acc: DVec2::ZERO,
            force: DVec2::ZERO,
            rotation: 0.0,
            angular_vel: 0.0,
            angular_acc: 0.0,
            torque: 0.0,
            mass: 1.0,
            inertia: 1.0,
            collider: Collider::Disc { radius: 0.0 },
            drag: 1.0,
            max_velocity: 1.0,
            frozen: false,
        }
    }
}

impl PhysicsEntity {
    /// A disc-shaped entity at rest at the origin.
    pub fn disc(radius: f64) -> Self {
        Self {
            collider: Collider::Disc { radius },
            ..Self::default()
        }
    }

    /// A box-shaped entity at rest at the origin.
    pub fn rect(width: f64, height: f64) -> Self {
        Self {
            collider: Collider::Box { width, height },
            ..Self::default()
        }
    }

    /// Inverse mass, treating frozen bodies as infinitely massive.
    pub fn inv_mass(&self) -> f64 {
        if self.frozen { 0.0 } else { 1.0 / self.mass }
    }

    /// Inverse moment of inertia, treating frozen bodies as immovable.
    pub fn inv_inertia(&self) -> f64 {
        if self.frozen { 0.0 } else { 1.0 / self.inertia }
    }
}
