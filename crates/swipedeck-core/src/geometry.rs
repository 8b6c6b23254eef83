#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Continuous (f32) points, vectors, rectangles, and the decomposed affine
//! pose applied to a card. Coordinates are container-relative with the origin
//! at the top-left and `y` growing downward.

/// A location in container coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A displacement in container coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector {
    pub dx: f32,
    pub dy: f32,
}

impl Vector {
    pub const ZERO: Vector = Vector { dx: 0.0, dy: 0.0 };

    /// Create a new vector.
    #[inline]
    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    /// Displacement from `origin` to `target`.
    #[inline]
    pub fn between(origin: Point, target: Point) -> Self {
        Self {
            dx: target.x - origin.x,
            dy: target.y - origin.y,
        }
    }

    /// Dot product.
    #[inline]
    pub fn dot(self, other: Vector) -> f32 {
        self.dx * other.dx + self.dy * other.dy
    }

    /// Euclidean length.
    #[inline]
    pub fn length(self) -> f32 {
        self.dx.hypot(self.dy)
    }

    /// Unit vector in the same heading.
    ///
    /// A zero-length vector normalizes to the zero vector rather than NaN.
    #[inline]
    pub fn normalized(self) -> Vector {
        let len = self.length();
        if len == 0.0 {
            Vector::ZERO
        } else {
            Vector::new(self.dx / len, self.dy / len)
        }
    }

    /// Component-wise scale by a scalar.
    #[inline]
    pub fn scaled(self, factor: f32) -> Vector {
        Vector::new(self.dx * factor, self.dy * factor)
    }
}

impl std::ops::Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl std::ops::Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::new(-self.dx, -self.dy)
    }
}

/// Width and height.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Length of the shorter side.
    #[inline]
    pub fn min_side(self) -> f32 {
        self.width.min(self.height)
    }

    /// Length of the longer side.
    #[inline]
    pub fn max_side(self) -> f32 {
        self.width.max(self.height)
    }

    /// Corner-to-corner length.
    #[inline]
    pub fn diagonal(self) -> f32 {
        self.width.hypot(self.height)
    }
}

/// A rectangle in container coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    /// Create a rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self {
            origin: Point::ZERO,
            size,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.height
    }

    /// Geometric center.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.x < self.origin.x + self.size.width
            && point.y >= self.origin.y
            && point.y < self.origin.y + self.size.height
    }

    /// Create a new rectangle inside the current one with the given margin.
    ///
    /// Margins larger than the rectangle clamp to an empty rectangle at the
    /// inset origin.
    pub fn inset_by(&self, insets: Insets) -> Rect {
        Rect::new(
            self.origin.x + insets.left,
            self.origin.y + insets.top,
            (self.size.width - insets.left - insets.right).max(0.0),
            (self.size.height - insets.top - insets.bottom).max(0.0),
        )
    }
}

/// Edge margins for layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insets {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Insets {
    /// Create new insets with equal values.
    pub const fn all(val: f32) -> Self {
        Self {
            top: val,
            right: val,
            bottom: val,
            left: val,
        }
    }

    /// Create new insets with specific values.
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// The affine pose applied to a card, kept decomposed so a presentation layer
/// can consume it directly.
///
/// Rotation is in radians about the card center; positive is clockwise in a
/// y-down coordinate system. Applied as scale, then rotation, then
/// translation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    pub translation: Vector,
    pub rotation: f32,
    pub scale_x: f32,
    pub scale_y: f32,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translation: Vector::ZERO,
        rotation: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
    };

    /// A pure translation.
    #[inline]
    pub const fn translation(translation: Vector) -> Self {
        Transform {
            translation,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    /// A uniform-axis scale.
    #[inline]
    pub const fn scale(scale_x: f32, scale_y: f32) -> Self {
        Transform {
            translation: Vector::ZERO,
            rotation: 0.0,
            scale_x,
            scale_y,
        }
    }

    /// A translation combined with a rotation.
    #[inline]
    pub const fn translation_rotation(translation: Vector, rotation: f32) -> Self {
        Transform {
            translation,
            rotation,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform::IDENTITY
    }
}
