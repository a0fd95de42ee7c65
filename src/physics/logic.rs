//! Physics stepping: integration, collision response, contact-begin detection.

use super::types::{Aabb, Body, Category, Collider, ColliderId, Contact, Vec2};
use crate::constants::EDGE_CATEGORY;
use std::collections::BTreeSet;

/// Distance within which a resolved body still counts as touching.
const CONTACT_SLOP: f64 = 0.01;

/// Gravity, scene bounds and the set of colliders currently touched.
#[derive(Debug, Clone)]
pub struct PhysicsWorld {
    /// Points per second squared.
    pub gravity: Vec2,
    /// Edge loop around the scene. Clamps bodies whose collision mask has
    /// the edge category; never reports contacts.
    pub bounds: Aabb,
    touching: BTreeSet<ColliderId>,
}

impl PhysicsWorld {
    pub fn new(gravity: Vec2, bounds: Aabb) -> Self {
        Self {
            gravity,
            bounds,
            touching: BTreeSet::new(),
        }
    }

    /// Forget every ongoing contact.
    pub fn reset_contacts(&mut self) {
        self.touching.clear();
    }

    /// Number of colliders the body is touching right now.
    pub fn touching_count(&self) -> usize {
        self.touching.len()
    }

    /// Advance `body` by `dt` seconds against `colliders`.
    ///
    /// Returns the colliders the body began touching during this step,
    /// in collider-id order.
    pub fn step(&mut self, body: &mut Body, colliders: &[Collider], dt: f64) -> Vec<Contact> {
        if body.dynamic {
            body.velocity += self.gravity * dt;
            body.position += body.velocity * dt;

            for collider in colliders {
                if body.collision_mask.intersects(collider.category) {
                    resolve_circle_box(body, &collider.bounds);
                }
            }
            if body.collision_mask.intersects(Category(EDGE_CATEGORY)) {
                clamp_inside(body, &self.bounds);
            }
        }

        let mut now_touching = BTreeSet::new();
        let mut began = Vec::new();
        for collider in colliders {
            let wants_contact = body.contact_test.intersects(collider.category)
                || collider.contact_test.intersects(body.category);
            if !wants_contact {
                continue;
            }
            if circle_box_distance(body.position, &collider.bounds) <= body.radius + CONTACT_SLOP {
                now_touching.insert(collider.id);
                if !self.touching.contains(&collider.id) {
                    began.push(Contact {
                        collider: collider.id,
                        category: collider.category,
                    });
                }
            }
        }
        self.touching = now_touching;
        began.sort_by_key(|c| c.collider);
        began
    }
}

/// Closest point of `b` to `p`.
fn closest_point(p: Vec2, b: &Aabb) -> Vec2 {
    Vec2::new(p.x.clamp(b.min.x, b.max.x), p.y.clamp(b.min.y, b.max.y))
}

/// Distance from `p` to the box; zero when `p` is inside.
pub fn circle_box_distance(p: Vec2, b: &Aabb) -> f64 {
    let c = closest_point(p, b);
    let d = p - c;
    (d.x * d.x + d.y * d.y).sqrt()
}

/// Push a penetrating circle out of `b` and cancel velocity into it.
fn resolve_circle_box(body: &mut Body, b: &Aabb) {
    let p = body.position;
    let r = body.radius;
    let inside = p.x >= b.min.x && p.x <= b.max.x && p.y >= b.min.y && p.y <= b.max.y;

    if inside {
        // Centre is in the box or on its boundary: leave through the nearest face
        let exits = [
            (p.x - b.min.x, Vec2::new(-1.0, 0.0)),
            (b.max.x - p.x, Vec2::new(1.0, 0.0)),
            (p.y - b.min.y, Vec2::new(0.0, -1.0)),
            (b.max.y - p.y, Vec2::new(0.0, 1.0)),
        ];
        let (depth, normal) = exits
            .iter()
            .copied()
            .fold(exits[0], |best, e| if e.0 < best.0 { e } else { best });
        body.position += normal * (depth + r);
        cancel_into(body, normal);
        return;
    }

    let c = closest_point(p, b);
    let d = p - c;
    let dist = (d.x * d.x + d.y * d.y).sqrt();
    if dist >= r || dist == 0.0 {
        return;
    }
    let normal = d * (1.0 / dist);
    body.position += normal * (r - dist);
    cancel_into(body, normal);
}

/// Remove the velocity component heading against `normal`.
fn cancel_into(body: &mut Body, normal: Vec2) {
    let along = body.velocity.x * normal.x + body.velocity.y * normal.y;
    if along < 0.0 {
        body.velocity = body.velocity - normal * along;
    }
}

/// Keep the whole circle within `bounds`.
fn clamp_inside(body: &mut Body, bounds: &Aabb) {
    let r = body.radius;
    if body.position.x - r < bounds.min.x {
        body.position.x = bounds.min.x + r;
        body.velocity.x = body.velocity.x.max(0.0);
    } else if body.position.x + r > bounds.max.x {
        body.position.x = bounds.max.x - r;
        body.velocity.x = body.velocity.x.min(0.0);
    }
    if body.position.y - r < bounds.min.y {
        body.position.y = bounds.min.y + r;
        body.velocity.y = body.velocity.y.max(0.0);
    } else if body.position.y + r > bounds.max.y {
        body.position.y = bounds.max.y - r;
        body.velocity.y = body.velocity.y.min(0.0);
    }
}
