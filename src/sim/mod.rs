//! Deterministic physics simulation
//!
//! All engine logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (by entity id)
//! - Single-threaded, no suspension points inside a tick
//! - No rendering or platform dependencies

pub mod detect;
pub mod diag;
pub mod entity;
pub mod integrate;
pub mod resolve;
pub mod world;

pub use detect::{Contact, detect};
pub use diag::Recovery;
pub use entity::{Collider, PhysicsEntity};
pub use integrate::{apply_force, integrate, integrate_with};
pub use resolve::{CollisionBody, resolve, resolve_with};
pub use world::{EntityId, World};
