//! Astro Drift - 2D rigid-body physics core for an asteroid-field arcade game
//!
//! Core modules:
//! - `sim`: fixed-timestep physics (integration, overlap detection, impulse
//!   resolution, entity arena)
//!
//! The engine is deterministic and single-threaded. A host game loop drives
//! [`sim::World::tick`] at a fixed cadence (accumulator pattern) decoupled
//! from rendering. Rendering, input, audio and game rules are external
//! collaborators: they observe the simulation through entity state and the
//! collision callback, and feed it only through forces and entity fields.

pub mod sim;

pub use sim::{Collider, Contact, PhysicsEntity, World};

/// Engine configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (120 Hz)
    pub const SIM_DT: f64 = 1000.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Nudge added to every reported overlap so a pair separated by exactly
    /// the corrected distance is not re-detected on the next tick
    pub const OVERLAP_EPS: f64 = 1e-5;
    /// Overlaps beyond this indicate an upstream integration bug
    pub const MAX_PLAUSIBLE_OVERLAP: f64 = 10.0;
    /// Center distances below this cannot yield a meaningful contact normal
    pub const MIN_SEPARATION: f64 = 1e-9;
}
