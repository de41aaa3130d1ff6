//! Minimal geometry types for block shapes (vectors, boxes, box unions).
#![forbid(unsafe_code)]

use core::ops::{Mul, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub const ONE: Vec3 = Vec3::new(1.0, 1.0, 1.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn dot(self, rhs: Vec3) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[inline]
    pub fn min(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x.min(rhs.x), self.y.min(rhs.y), self.z.min(rhs.z))
    }

    #[inline]
    pub fn max(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x.max(rhs.x), self.y.max(rhs.y), self.z.max(rhs.z))
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Axis-aligned box in block-local space (a full block spans 0..1 on each axis).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub const UNIT: Aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);

    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box from sixteenth-of-a-block coordinates, e.g. `(0, 0, 0, 16, 1, 16)` is a floor slab.
    #[inline]
    pub fn from_pixels(x0: f32, y0: f32, z0: f32, x1: f32, y1: f32, z1: f32) -> Self {
        Self::new(
            Vec3::new(x0, y0, z0) * (1.0 / 16.0),
            Vec3::new(x1, y1, z1) * (1.0 / 16.0),
        )
    }

    /// True if the box has no volume on at least one axis.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.max.x <= self.min.x || self.max.y <= self.min.y || self.max.z <= self.min.z
    }

    #[inline]
    pub fn volume(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        let e = self.max - self.min;
        e.x * e.y * e.z
    }

    /// Closed containment test.
    #[inline]
    pub fn contains_point(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    #[inline]
    pub fn contains_box(&self, other: &Aabb) -> bool {
        self.contains_point(other.min) && self.contains_point(other.max)
    }

    /// Smallest box enclosing both inputs.
    #[inline]
    pub fn enclose(&self, other: &Aabb) -> Aabb {
        Aabb::new(self.min.min(other.min), self.max.max(other.max))
    }
}

/// A union of boxes used for collision and selection queries.
///
/// Boxes may overlap; duplicate boxes are dropped on union so that repeated
/// unions stay small.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VoxelShape {
    boxes: Vec<Aabb>,
}

impl VoxelShape {
    #[inline]
    pub const fn empty() -> Self {
        Self { boxes: Vec::new() }
    }

    #[inline]
    pub fn full_cube() -> Self {
        Self::from_box(Aabb::UNIT)
    }

    pub fn from_box(b: Aabb) -> Self {
        if b.is_empty() {
            Self::empty()
        } else {
            Self { boxes: vec![b] }
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    #[inline]
    pub fn boxes(&self) -> &[Aabb] {
        &self.boxes
    }

    pub fn union(&self, other: &VoxelShape) -> VoxelShape {
        let mut boxes = self.boxes.clone();
        for b in &other.boxes {
            if !boxes.contains(b) {
                boxes.push(*b);
            }
        }
        VoxelShape { boxes }
    }

    /// Bounding box of the whole union, `None` for the empty shape.
    pub fn bounds(&self) -> Option<Aabb> {
        let (first, rest) = self.boxes.split_first()?;
        Some(rest.iter().fold(*first, |acc, b| acc.enclose(b)))
    }

    pub fn contains_point(&self, p: Vec3) -> bool {
        self.boxes.iter().any(|b| b.contains_point(p))
    }
}

impl From<Aabb> for VoxelShape {
    fn from(b: Aabb) -> Self {
        VoxelShape::from_box(b)
    }
}
