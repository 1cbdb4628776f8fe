use crate::core::scalar::{self, Scalar};
use crate::util;
use crate::util::linalg::{write_components, Vector2};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::{
    fmt,
    fmt::Formatter,
    ops::{Div, Mul},
};

/// Trait for types that occupy an axis-aligned region of the plane.
///
/// Implementors provide [`position()`](AxisAlignedExtent::position) (the corner with the smallest
/// coordinates) and [`size()`](AxisAlignedExtent::size); every other query has a default
/// implementation in terms of those two. With y pointing down, `position()` is the top-left
/// corner.
///
/// # Examples
///
/// ```
/// use linalg_kernel::util::linalg::{AxisAlignedExtent, Rectangle, Vector2};
///
/// fn is_visible<T: AxisAlignedExtent<i32>>(object: &T, viewport: &T) -> bool {
///     object.intersects(viewport)
/// }
///
/// let viewport = Rectangle::new(0, 0, 640, 480);
/// assert!(is_visible(&Rectangle::new(630, 10, 20, 20), &viewport));
/// assert!(!is_visible(&Rectangle::new(640, 10, 20, 20), &viewport));
/// ```
pub trait AxisAlignedExtent<T: Scalar> {
    fn position(&self) -> Vector2<T>;
    fn size(&self) -> Vector2<T>;

    fn left(&self) -> T {
        self.position().x
    }
    fn top(&self) -> T {
        self.position().y
    }
    fn right(&self) -> T {
        self.position().x + self.size().x
    }
    fn bottom(&self) -> T {
        self.position().y + self.size().y
    }

    fn top_left(&self) -> Vector2<T> {
        self.position()
    }
    fn top_right(&self) -> Vector2<T> {
        Vector2::new(self.right(), self.top())
    }
    fn bottom_left(&self) -> Vector2<T> {
        Vector2::new(self.left(), self.bottom())
    }
    fn bottom_right(&self) -> Vector2<T> {
        self.position() + self.size()
    }
    /// The midpoint. For integer scalars this rounds towards zero.
    fn centre(&self) -> Vector2<T> {
        self.position() + self.size() / (T::one() + T::one())
    }

    fn as_rect(&self) -> Rectangle<T> {
        Rectangle::from_position_size(self.position(), self.size())
    }

    /// Tests whether `point` lies inside the region. The left and top edges are inside, the
    /// right and bottom edges are not.
    fn contains_point(&self, point: Vector2<T>) -> bool {
        (self.left()..self.right()).contains(&point.x)
            && (self.top()..self.bottom()).contains(&point.y)
    }

    /// Tests whether `rect` lies entirely inside the region, edges included.
    fn contains_rect(&self, rect: &impl AxisAlignedExtent<T>) -> bool {
        self.left() <= rect.left()
            && self.right() >= rect.right()
            && self.top() <= rect.top()
            && self.bottom() >= rect.bottom()
    }

    /// Tests whether the two regions overlap with positive area. Touching edges do not count.
    fn intersects(&self, rect: &impl AxisAlignedExtent<T>) -> bool {
        self.left() < rect.right()
            && rect.left() < self.right()
            && self.top() < rect.bottom()
            && rect.top() < self.bottom()
    }

    fn union(&self, rhs: &impl AxisAlignedExtent<T>) -> Rectangle<T> {
        self.as_rect().union(&rhs.as_rect())
    }
}

/// An axis-aligned rectangle stored as its `position` corner and `width`/`height`.
///
/// The right and bottom edges are derived: `right = x + width`, `bottom = y + height`.
///
/// # Examples
///
/// ```
/// use linalg_kernel::util::linalg::{AxisAlignedExtent, Rectangled, Vector2d};
///
/// let rect = Rectangled::new(1.0, 2.0, 4.0, 6.0);
/// assert_eq!(rect.right(), 5.0);
/// assert_eq!(rect.bottom(), 8.0);
/// assert_eq!(rect.centre(), Vector2d::new(3.0, 5.0));
/// assert!(rect.contains_point(Vector2d::new(1.0, 2.0)));
/// assert!(!rect.contains_point(Vector2d::new(5.0, 8.0)));
///
/// let rect = Rectangled::from_corners(Vector2d::new(3.0, 4.0), Vector2d::new(-1.0, -2.0));
/// assert_eq!(rect, Rectangled::new(-1.0, -2.0, 4.0, 6.0));
/// ```
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct Rectangle<T> {
    pub x: T,
    pub y: T,
    pub width: T,
    pub height: T,
}

pub type Rectanglef = Rectangle<f32>;
pub type Rectangled = Rectangle<f64>;
pub type Rectanglei = Rectangle<i32>;

impl<T: Scalar> Rectangle<T> {
    pub fn new(x: T, y: T, width: T, height: T) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_position_size(position: Vector2<T>, size: Vector2<T>) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    /// Creates the smallest rectangle with both points on its boundary, in either order.
    pub fn from_corners(a: Vector2<T>, b: Vector2<T>) -> Self {
        let top_left = a.component_min(b);
        let bottom_right = a.component_max(b);
        Self::from_position_size(top_left, bottom_right - top_left)
    }

    /// Creates an empty rectangle with zero size at the origin.
    pub fn empty() -> Self {
        Self::new(T::zero(), T::zero(), T::zero(), T::zero())
    }

    /// True if the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        self.width <= T::zero() || self.height <= T::zero()
    }

    /// The overlapping region, or [`None`] if the rectangles do not overlap with positive area.
    #[must_use]
    pub fn intersection(&self, rhs: &Self) -> Option<Self> {
        let top_left = self.top_left().component_max(rhs.top_left());
        let bottom_right = self.bottom_right().component_min(rhs.bottom_right());
        if bottom_right.x > top_left.x && bottom_right.y > top_left.y {
            Some(Self::from_corners(top_left, bottom_right))
        } else {
            None
        }
    }

    /// The smallest rectangle containing both.
    pub fn union(&self, rhs: &Self) -> Self {
        let top_left = self.top_left().component_min(rhs.top_left());
        let bottom_right = self.bottom_right().component_max(rhs.bottom_right());
        Self::from_corners(top_left, bottom_right)
    }

    pub fn translated(&self, offset: Vector2<T>) -> Self {
        Self::from_position_size(self.position() + offset, self.size())
    }

    /// Grows each edge outward by `amount` (shrinks, for negative amounts), keeping the centre.
    pub fn inflated(&self, amount: Vector2<T>) -> Self {
        Self::from_position_size(self.position() - amount, self.size() + amount + amount)
    }

    #[must_use]
    pub fn to_array(self) -> [T; 4] {
        [self.x, self.y, self.width, self.height]
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Rectangle<U> {
        Rectangle {
            x: f(self.x),
            y: f(self.y),
            width: f(self.width),
            height: f(self.height),
        }
    }

    /// Converts to another scalar type, returning [`None`] if any field is not representable in
    /// `U`.
    #[must_use]
    pub fn cast<U: Scalar>(&self) -> Option<Rectangle<U>> {
        Some(Rectangle {
            x: scalar::cast(self.x)?,
            y: scalar::cast(self.y)?,
            width: scalar::cast(self.width)?,
            height: scalar::cast(self.height)?,
        })
    }
}

impl<T: Scalar + Into<f64>> Rectangle<T> {
    pub fn to_f64(&self) -> Rectangle<f64> {
        self.map(Into::into)
    }
}

impl Rectangle<f64> {
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_f32_lossy(&self) -> Rectangle<f32> {
        self.map(|v| v as f32)
    }

    pub fn try_to_f32(&self) -> Result<Rectangle<f32>> {
        Ok(Rectangle {
            x: util::f64_to_f32(self.x)?,
            y: util::f64_to_f32(self.y)?,
            width: util::f64_to_f32(self.width)?,
            height: util::f64_to_f32(self.height)?,
        })
    }
}

impl<T: Scalar> AxisAlignedExtent<T> for Rectangle<T> {
    fn position(&self) -> Vector2<T> {
        Vector2::new(self.x, self.y)
    }
    fn size(&self) -> Vector2<T> {
        Vector2::new(self.width, self.height)
    }
}

impl<T: Scalar> Hash for Rectangle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.hash_scalar(state);
        self.y.hash_scalar(state);
        self.width.hash_scalar(state);
        self.height.hash_scalar(state);
    }
}

impl<T: Scalar> From<[T; 4]> for Rectangle<T> {
    fn from([x, y, width, height]: [T; 4]) -> Self {
        Self::new(x, y, width, height)
    }
}
impl<T: Scalar> From<Rectangle<T>> for [T; 4] {
    fn from(value: Rectangle<T>) -> Self {
        value.to_array()
    }
}
impl<T: Scalar> From<(T, T, T, T)> for Rectangle<T> {
    fn from((x, y, width, height): (T, T, T, T)) -> Self {
        Self::new(x, y, width, height)
    }
}
impl<T: Scalar> From<Rectangle<T>> for (T, T, T, T) {
    fn from(value: Rectangle<T>) -> Self {
        (value.x, value.y, value.width, value.height)
    }
}
impl From<Rectangle<f32>> for Rectangle<f64> {
    fn from(value: Rectangle<f32>) -> Self {
        value.to_f64()
    }
}
impl From<Rectangle<i32>> for Rectangle<f64> {
    fn from(value: Rectangle<i32>) -> Self {
        value.to_f64()
    }
}

impl<T: Scalar> fmt::Display for Rectangle<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        write_components(f, &self.to_array(), ", ")?;
        write!(f, "]")
    }
}

impl<T: Scalar> Mul<T> for Rectangle<T> {
    type Output = Rectangle<T>;

    fn mul(self, rhs: T) -> Self::Output {
        self.map(|v| v * rhs)
    }
}
impl<T: Scalar> Div<T> for Rectangle<T> {
    type Output = Rectangle<T>;

    fn div(self, rhs: T) -> Self::Output {
        self.map(|v| v / rhs)
    }
}
