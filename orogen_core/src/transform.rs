// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 2-D coordinate math for sprite frames.
//!
//! Game coordinates are y-up with rotation measured in degrees clockwise.
//! Each sprite defines a local frame via its [`BaseProps`]: the forward
//! transform (local → parent) positions the sprite for drawing, and the
//! inverse mapping (parent → local) interprets pointer coordinates relative
//! to the sprite's own rotated, scaled, and anchored frame.
//!
//! [`FrameLink`] chains these inverse mappings one tree level at a time.
//! Links borrow their parent and live only for the duration of a traversal;
//! nothing is cached across ticks, since any level's rotation or scale can
//! change between renders.

use kurbo::{Affine, Point};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::props::BaseProps;

/// One sprite's placement within its parent frame.
///
/// Extracted from normalized [`BaseProps`]; the `opacity` and `mask` fields
/// do not participate in coordinate math.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalTransform {
    /// Offset in the parent's coordinates.
    pub x: f64,
    /// Offset in the parent's coordinates.
    pub y: f64,
    /// Rotation in degrees, clockwise.
    pub rotation: f64,
    /// Horizontal scale factor.
    pub scale_x: f64,
    /// Vertical scale factor.
    pub scale_y: f64,
    /// Horizontal anchor offset.
    pub anchor_x: f64,
    /// Vertical anchor offset.
    pub anchor_y: f64,
}

impl LocalTransform {
    /// The identity placement.
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        rotation: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
        anchor_x: 0.0,
        anchor_y: 0.0,
    };

    /// Extracts the placement fields from base props.
    #[must_use]
    pub fn from_props(props: &BaseProps) -> Self {
        Self {
            x: props.x,
            y: props.y,
            rotation: props.rotation,
            scale_x: props.scale_x,
            scale_y: props.scale_y,
            anchor_x: props.anchor_x,
            anchor_y: props.anchor_y,
        }
    }

    /// Maps a point in the parent's frame into this sprite's local frame.
    ///
    /// Applies the inverse placement: subtract the offset, rotate by the
    /// negated rotation, divide by the scale factors, then add the anchor
    /// offset. Division by a zero scale produces infinities rather than
    /// panicking, mirroring how a zero-scaled sprite collapses visually.
    #[must_use]
    pub fn to_local(&self, point: Point) -> Point {
        let dx = point.x - self.x;
        let dy = point.y - self.y;
        let radians = radians(self.rotation);
        #[cfg(feature = "std")]
        let (s, c) = radians.sin_cos();
        #[cfg(not(feature = "std"))]
        let (s, c) = (radians.sin(), radians.cos());
        // Counterclockwise by `rotation`, undoing the clockwise placement.
        let rx = dx * c - dy * s;
        let ry = dx * s + dy * c;
        Point::new(
            rx / self.scale_x + self.anchor_x,
            ry / self.scale_y + self.anchor_y,
        )
    }

    /// Returns the forward (local → parent) affine transform.
    ///
    /// Composition order: anchor offset, then scale, then clockwise
    /// rotation, then translation.
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        Affine::translate((self.x, self.y))
            * Affine::rotate(-radians(self.rotation))
            * Affine::scale_non_uniform(self.scale_x, self.scale_y)
            * Affine::translate((-self.anchor_x, -self.anchor_y))
    }
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[inline]
fn radians(degrees: f64) -> f64 {
    degrees * (core::f64::consts::PI / 180.0)
}

/// A borrowed chain of sprite placements from the root down to one sprite.
///
/// Mapping a game-global point into a sprite's local frame walks the chain
/// outermost-first, applying each level's inverse placement in turn.
#[derive(Clone, Copy, Debug)]
pub struct FrameLink<'a> {
    transform: LocalTransform,
    parent: Option<&'a FrameLink<'a>>,
}

impl<'a> FrameLink<'a> {
    /// The root frame: game-global coordinates, identity placement.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            transform: LocalTransform::IDENTITY,
            parent: None,
        }
    }

    /// Creates the frame of a child placed at `transform` within `parent`.
    #[must_use]
    pub const fn child(parent: &'a FrameLink<'a>, transform: LocalTransform) -> Self {
        Self {
            transform,
            parent: Some(parent),
        }
    }

    /// Maps a game-global point into this frame's local coordinates.
    #[must_use]
    pub fn to_local(&self, point: Point) -> Point {
        let point = match self.parent {
            Some(parent) => parent.to_local(point),
            None => point,
        };
        self.transform.to_local(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(x: f64, y: f64, rotation: f64) -> LocalTransform {
        LocalTransform {
            x,
            y,
            rotation,
            ..LocalTransform::IDENTITY
        }
    }

    #[test]
    fn translation_only() {
        // A sprite at x=100 sees a global pointer at x=50 as local x=-50.
        let t = placed(100.0, 0.0, 0.0);
        let local = t.to_local(Point::new(50.0, 0.0));
        assert_eq!(local, Point::new(-50.0, 0.0));
    }

    #[test]
    fn clockwise_rotation_inverts() {
        // Sprite rotated 90 degrees clockwise: its local +y axis points
        // along the parent's +x axis.
        let t = placed(0.0, 0.0, 90.0);
        let local = t.to_local(Point::new(1.0, 0.0));
        assert!((local.x - 0.0).abs() < 1e-12);
        assert!((local.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn scale_divides() {
        let t = LocalTransform {
            scale_x: 2.0,
            scale_y: 4.0,
            ..LocalTransform::IDENTITY
        };
        let local = t.to_local(Point::new(8.0, 8.0));
        assert_eq!(local, Point::new(4.0, 2.0));
    }

    #[test]
    fn anchor_offsets_after_scale() {
        let t = LocalTransform {
            scale_x: 2.0,
            scale_y: 2.0,
            anchor_x: 3.0,
            anchor_y: -1.0,
            ..LocalTransform::IDENTITY
        };
        let local = t.to_local(Point::new(4.0, 4.0));
        assert_eq!(local, Point::new(5.0, 1.0));
    }

    #[test]
    fn forward_and_inverse_round_trip() {
        let t = LocalTransform {
            x: 12.0,
            y: -7.0,
            rotation: 30.0,
            scale_x: 2.0,
            scale_y: 0.5,
            anchor_x: 4.0,
            anchor_y: 1.0,
        };
        let local = Point::new(3.0, -2.0);
        let parent = t.to_affine() * local;
        let back = t.to_local(parent);
        assert!((back.x - local.x).abs() < 1e-9);
        assert!((back.y - local.y).abs() < 1e-9);
    }

    #[test]
    fn identity_affine() {
        assert_eq!(LocalTransform::IDENTITY.to_affine(), Affine::IDENTITY);
    }

    #[test]
    fn frame_chain_composes_per_level() {
        // Parent at (10, 0); child at (5, 0) within the parent. A global
        // point at (20, 0) is (10, 0) in the parent and (5, 0) in the child.
        let root = FrameLink::root();
        let parent = FrameLink::child(&root, placed(10.0, 0.0, 0.0));
        let child = FrameLink::child(&parent, placed(5.0, 0.0, 0.0));
        assert_eq!(child.to_local(Point::new(20.0, 0.0)), Point::new(5.0, 0.0));
    }

    #[test]
    fn frame_chain_with_rotation_and_scale() {
        // Parent rotated 90 degrees clockwise, child scaled by 2.
        let root = FrameLink::root();
        let parent = FrameLink::child(&root, placed(0.0, 0.0, 90.0));
        let child_t = LocalTransform {
            scale_x: 2.0,
            scale_y: 2.0,
            ..LocalTransform::IDENTITY
        };
        let child = FrameLink::child(&parent, child_t);
        let local = child.to_local(Point::new(2.0, 0.0));
        assert!((local.x - 0.0).abs() < 1e-12);
        assert!((local.y - 1.0).abs() < 1e-12);
    }
}
