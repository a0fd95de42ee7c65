//! Physics value types: vectors, boxes, bodies and static colliders.

use crate::constants::POINTS_PER_METER;
use std::ops::{Add, AddAssign, Mul, Sub};

/// A 2D vector in scene points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box of the given size centred on `center`.
    pub fn from_center(center: Vec2, width: f64, height: f64) -> Self {
        let half = Vec2::new(width / 2.0, height / 2.0);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// Point inside or on the edge.
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Same box moved by `dx` horizontally.
    pub fn shifted_x(&self, dx: f64) -> Self {
        let d = Vec2::new(dx, 0.0);
        Self {
            min: self.min + d,
            max: self.max + d,
        }
    }
}

/// Collision category bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Category(pub u32);

impl Category {
    pub const NONE: Category = Category(0);

    pub fn intersects(self, other: Category) -> bool {
        self.0 & other.0 != 0
    }

    pub fn contains(self, other: Category) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for Category {
    type Output = Category;
    fn bitor(self, rhs: Category) -> Category {
        Category(self.0 | rhs.0)
    }
}

/// Stable identity of a static collider across steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColliderId(pub u64);

/// A static rectangle the body can hit or pass through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub id: ColliderId,
    pub bounds: Aabb,
    pub category: Category,
    pub contact_test: Category,
}

/// The dynamic circular body.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub position: Vec2,
    /// Points per second.
    pub velocity: Vec2,
    pub radius: f64,
    /// Static bodies ignore gravity, impulses and collisions.
    pub dynamic: bool,
    /// Kilograms: unit density over the circle's area in square metres.
    pub mass: f64,
    pub category: Category,
    pub collision_mask: Category,
    pub contact_test: Category,
}

impl Body {
    pub fn circle(position: Vec2, radius: f64, category: Category) -> Self {
        let radius_m = radius / POINTS_PER_METER;
        Self {
            position,
            velocity: Vec2::ZERO,
            radius,
            dynamic: true,
            mass: std::f64::consts::PI * radius_m * radius_m,
            category,
            collision_mask: Category(u32::MAX),
            contact_test: Category::NONE,
        }
    }

    /// Add `impulse / mass` to the velocity. Ignored for static bodies.
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        if !self.dynamic || self.mass <= 0.0 {
            return;
        }
        self.velocity += impulse * (1.0 / self.mass);
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.position, self.radius * 2.0, self.radius * 2.0)
    }
}

/// A collider the body started touching during a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub collider: ColliderId,
    pub category: Category,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_from_center() {
        let b = Aabb::from_center(Vec2::new(10.0, 20.0), 4.0, 6.0);
        assert_eq!(b.min, Vec2::new(8.0, 17.0));
        assert_eq!(b.max, Vec2::new(12.0, 23.0));
        assert_eq!(b.center(), Vec2::new(10.0, 20.0));
        assert_eq!(b.width(), 4.0);
        assert_eq!(b.height(), 6.0);
        assert!(b.contains_point(Vec2::new(8.0, 23.0)));
        assert!(!b.contains_point(Vec2::new(7.9, 20.0)));
    }

    #[test]
    fn test_category_masks() {
        let a = Category(0b0110);
        assert!(a.intersects(Category(0b0100)));
        assert!(!a.intersects(Category(0b1000)));
        assert!(a.contains(Category(0b0010)));
        assert!(!a.contains(Category(0b0011)));
        assert_eq!(Category(1) | Category(4), Category(5));
    }

    #[test]
    fn test_circle_mass_uses_square_metres() {
        let body = Body::circle(Vec2::ZERO, 15.0, Category(1));
        // 15 points = 0.1 m
        assert!((body.mass - std::f64::consts::PI * 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_impulse_divides_by_mass() {
        let mut body = Body::circle(Vec2::ZERO, 15.0, Category(1));
        let mass = body.mass;
        body.apply_impulse(Vec2::new(0.0, 2.0));
        assert!((body.velocity.y - 2.0 / mass).abs() < 1e-9);
    }

    #[test]
    fn test_impulse_ignored_when_static() {
        let mut body = Body::circle(Vec2::ZERO, 15.0, Category(1));
        body.dynamic = false;
        body.apply_impulse(Vec2::new(0.0, 10.0));
        assert_eq!(body.velocity, Vec2::ZERO);
    }
}
