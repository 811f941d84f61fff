//! Index-based entity arena and the fixed-timestep tick
//!
//! Entities live in a flat arena addressed by stable ids, so the exhaustive
//! pairwise sweep can mutate pairs without aliasing. One tick integrates
//! every entity, then resolves contacts immediately in index order - a
//! sequential relaxation pass. A body caught in several contacts settles
//! against them one at a time, so dense packings can keep residual
//! penetration across a single tick; that ordering is part of the engine's
//! observable behavior, not an accident.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::detect::detect;
use super::diag::Recovery;
use super::entity::PhysicsEntity;
use super::integrate::integrate_with;
use super::resolve::{CollisionBody, resolve_with};

/// Stable handle to an entity in a [`World`].
///
/// The engine never removes entities, so ids stay valid for the lifetime of
/// the world. Despawning is game logic: hosts flag dead entities on their
/// side and simply stop reading them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(u32);

/// Entity storage plus the per-tick control flow.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct World {
    entities: Vec<PhysicsEntity>,
    #[serde(skip)]
    recovery: Recovery,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// A world whose tick uses the given recovery mode.
    pub fn with_recovery(recovery: Recovery) -> Self {
        Self {
            entities: Vec::new(),
            recovery,
        }
    }

    pub fn spawn(&mut self, entity: PhysicsEntity) -> EntityId {
        let id = EntityId(self.entities.len() as u32);
        self.entities.push(entity);
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&PhysicsEntity> {
        self.entities.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut PhysicsEntity> {
        self.entities.get_mut(id.0 as usize)
    }

    pub fn entities(&self) -> &[PhysicsEntity] {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut [PhysicsEntity] {
        &mut self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Advance the simulation by one fixed timestep.
    ///
    /// Integrates every entity, then runs the O(n²) pairwise sweep in id
    /// order, resolving each detected contact immediately. The callback
    /// fires once per resolved contact with both bodies' snapshots.
    pub fn tick<F>(&mut self, dt: f64, mut on_collision: F)
    where
        F: FnMut(EntityId, EntityId, CollisionBody, CollisionBody, DVec2, DVec2, f64),
    {
        let recovery = self.recovery;

        for entity in &mut self.entities {
            integrate_with(entity, dt, recovery);
        }

        for i in 0..self.entities.len() {
            for j in (i + 1)..self.entities.len() {
                let (head, tail) = self.entities.split_at_mut(j);
                let a = &mut head[i];
                let b = &mut tail[0];
                if let Some(contact) = detect(a, b) {
                    resolve_with(a, b, &contact, recovery, |ra, rb, point, normal, overlap| {
                        on_collision(
                            EntityId(i as u32),
                            EntityId(j as u32),
                            ra,
                            rb,
                            point,
                            normal,
                            overlap,
                        );
                    });
                }
            }
        }
    }

    /// Magnitude of the summed linear momentum over non-frozen entities.
    ///
    /// Diagnostic for hosts watching energy drift; frozen bodies are pinned
    /// and carry no momentum worth counting.
    pub fn total_momentum(&self) -> f64 {
        let total = self
            .entities
            .iter()
            .filter(|e| !e.frozen)
            .fold(DVec2::ZERO, |acc, e| acc + e.vel * e.mass);

        if !total.is_finite() {
            log::warn!("total momentum is non-finite: {total}");
        }

        total.length()
    }
}
