//! Shape-polymorphic overlap detection
//!
//! The tricky part of the engine: four pair cases (disc-disc, disc-box and
//! its mirror, box-box via the separating axis theorem), each producing a
//! contact point, a unit normal from the first entity toward the second, and
//! a penetration depth. Detection is pure: it never mutates entities, and two
//! consecutive calls on unchanged entities return identical contacts.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{MIN_SEPARATION, OVERLAP_EPS};

use super::entity::{Collider, PhysicsEntity};

/// A detected overlap between two entities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// World-space contact point.
    pub point: DVec2,
    /// Unit normal pointing from the first entity toward the second.
    pub normal: DVec2,
    /// Penetration depth along the normal, including the epsilon nudge.
    pub overlap: f64,
}

/// Test two entities for overlap.
///
/// Returns `None` when the shapes are separated, and also when the geometry
/// is too degenerate to produce a usable normal (coincident centers, disc
/// center exactly on a box surface point) - those cases are logged and
/// dropped rather than poisoning the resolver with NaN.
pub fn detect(a: &PhysicsEntity, b: &PhysicsEntity) -> Option<Contact> {
    match (a.collider, b.collider) {
        (Collider::Disc { radius: ra }, Collider::Disc { radius: rb }) => disc_disc(a, ra, b, rb),
        (Collider::Disc { radius }, Collider::Box { width, height }) => {
            disc_box(a, radius, b, width, height)
        }
        (Collider::Box { width, height }, Collider::Disc { radius }) => {
            // mirror call: the normal convention is first-toward-second
            disc_box(b, radius, a, width, height).map(|c| Contact {
                normal: -c.normal,
                ..c
            })
        }
        (Collider::Box { width: wa, height: ha }, Collider::Box { width: wb, height: hb }) => {
            box_box(a, wa, ha, b, wb, hb)
        }
    }
}

fn disc_disc(a: &PhysicsEntity, ra: f64, b: &PhysicsEntity, rb: f64) -> Option<Contact> {
    let distance = a.pos.distance(b.pos);
    let radii = ra + rb;
    if distance >= radii {
        return None;
    }
    if distance < MIN_SEPARATION {
        log::warn!("coincident disc centers at {}, no contact normal exists", a.pos);
        return None;
    }

    Some(Contact {
        point: a.pos.lerp(b.pos, ra / distance),
        normal: (b.pos - a.pos) / distance,
        overlap: radii - distance + OVERLAP_EPS,
    })
}

fn disc_box(
    disc: &PhysicsEntity,
    radius: f64,
    bx: &PhysicsEntity,
    width: f64,
    height: f64,
) -> Option<Contact> {
    // disc center in the box's unrotated frame
    let local = DVec2::from_angle(-bx.rotation).rotate(disc.pos - bx.pos);
    let half = DVec2::new(width / 2.0, height / 2.0);
    let closest = local.clamp(-half, half);
    let distance = local.distance(closest);
    if distance >= radius {
        return None;
    }

    let closest_world = bx.pos + DVec2::from_angle(bx.rotation).rotate(closest);
    let mut normal = (disc.pos - closest_world).normalize_or_zero();
    if normal == DVec2::ZERO {
        // center exactly on the clamped point, typically deep inside the box
        log::warn!(
            "disc at {} has no separation from box at {}, dropping contact",
            disc.pos,
            bx.pos
        );
        return None;
    }

    // orient the normal along the disc-to-box direction
    if normal.dot(bx.pos - disc.pos) < 0.0 {
        normal = -normal;
    }

    Some(Contact {
        point: disc.pos + normal * radius,
        normal,
        overlap: radius - distance + OVERLAP_EPS,
    })
}

fn box_box(
    a: &PhysicsEntity,
    wa: f64,
    ha: f64,
    b: &PhysicsEntity,
    wb: f64,
    hb: f64,
) -> Option<Contact> {
    let a_u = DVec2::from_angle(a.rotation);
    let a_v = a_u.perp();
    let b_u = DVec2::from_angle(b.rotation);
    let b_v = b_u.perp();

    let a_corners = corners(a.pos, a_u, a_v, wa, ha);
    let b_corners = corners(b.pos, b_u, b_v, wb, hb);

    // candidate separating axes: each box's local unit axes
    let axes = [a_u, a_v, b_u, b_v];

    // corners of each box whose projections stay inside the other box's
    // interval on the other box's axes; survivors form the contact patch
    let mut a_inside = [true; 4];
    let mut b_inside = [true; 4];

    let mut normal = axes[0];
    let mut overlap = f64::INFINITY;

    for (i, axis) in axes.iter().enumerate() {
        let a_proj = a_corners.map(|c| c.dot(*axis));
        let b_proj = b_corners.map(|c| c.dot(*axis));

        let (a_min, a_max) = interval(&a_proj);
        let (b_min, b_max) = interval(&b_proj);

        if a_max < b_min || b_max < a_min {
            return None; // separating axis found
        }

        if i < 2 {
            for j in 0..4 {
                b_inside[j] &= b_proj[j] >= a_min && b_proj[j] <= a_max;
            }
        } else {
            for j in 0..4 {
                a_inside[j] &= a_proj[j] >= b_min && a_proj[j] <= b_max;
            }
        }

        // the minimum-translation axis is the contact normal
        let axis_overlap = a_max.min(b_max) - a_min.max(b_min);
        if axis_overlap < overlap {
            overlap = axis_overlap;
            normal = *axis;
        }
    }

    let mut sum = DVec2::ZERO;
    let mut count = 0;
    for j in 0..4 {
        if a_inside[j] {
            sum += a_corners[j];
            count += 1;
        }
        if b_inside[j] {
            sum += b_corners[j];
            count += 1;
        }
    }
    if count == 0 {
        // genuine overlaps always leave at least one corner inside
        log::warn!(
            "box overlap with no contained corners (a at {}, b at {})",
            a.pos,
            b.pos
        );
        return None;
    }
    let point = sum / count as f64;

    if !point.is_finite() || !normal.is_finite() || !overlap.is_finite() {
        log::warn!("box-box contact is non-finite (point {point}, normal {normal}, overlap {overlap})");
        return None;
    }

    // orient the normal from a toward b
    if normal.dot(b.pos - a.pos) < 0.0 {
        normal = -normal;
    }

    Some(Contact {
        point,
        normal,
        overlap: overlap + OVERLAP_EPS,
    })
}

fn interval(proj: &[f64; 4]) -> (f64, f64) {
    let mut min = proj[0];
    let mut max = proj[0];
    for &p in &proj[1..] {
        min = min.min(p);
        max = max.max(p);
    }
    (min, max)
}

/// World-space corners, counter-clockwise from the (-x, -y) local corner.
fn corners(center: DVec2, u: DVec2, v: DVec2, width: f64, height: f64) -> [DVec2; 4] {
    let x = u * (width / 2.0);
    let y = v * (height / 2.0);
    [
        center - x - y,
        center + x - y,
        center + x + y,
        center - x + y,
    ]
}
