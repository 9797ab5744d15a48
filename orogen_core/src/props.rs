// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Positional and visual properties shared by every sprite node.
//!
//! Every node in the tree carries a [`BaseProps`] alongside its
//! sprite-specific props. Fields default to the neutral element of their
//! operation (zero offsets and rotation, unit opacity and scale, no mask), so
//! authors only spell out what they change:
//!
//! ```rust,ignore
//! BaseProps { x: 100.0, rotation: 45.0, ..Default::default() }
//! ```
//!
//! Opacity is clamped into `[0, 1]` by [`normalize`](BaseProps::normalize)
//! before any value leaves the core; final opacities are the product of a
//! node's own clamped opacity and all of its ancestors', computed when the
//! output tree is flattened into a draw plan.

use kurbo::{Circle, Rect};

/// A shape that clips a sprite's content and descendants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MaskShape {
    /// An axis-aligned rectangle in the sprite's local coordinates.
    Rect(Rect),
    /// A circle in the sprite's local coordinates.
    Circle(Circle),
}

/// Positional and visual fields common to all sprites and textures.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BaseProps {
    /// Horizontal offset in the parent's coordinates.
    pub x: f64,
    /// Vertical offset in the parent's coordinates (y grows upward).
    pub y: f64,
    /// Rotation in degrees, clockwise.
    pub rotation: f64,
    /// Opacity in `[0, 1]`; composes multiplicatively down the tree.
    pub opacity: f64,
    /// Horizontal scale factor.
    pub scale_x: f64,
    /// Vertical scale factor.
    pub scale_y: f64,
    /// Horizontal anchor offset in local coordinates.
    pub anchor_x: f64,
    /// Vertical anchor offset in local coordinates.
    pub anchor_y: f64,
    /// Optional clip shape applied to this node and its subtree.
    pub mask: Option<MaskShape>,
}

impl Default for BaseProps {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            opacity: 1.0,
            scale_x: 1.0,
            scale_y: 1.0,
            anchor_x: 0.0,
            anchor_y: 0.0,
            mask: None,
        }
    }
}

impl BaseProps {
    /// Returns a copy with `opacity` clamped into `[0, 1]`.
    ///
    /// All other fields pass through unchanged; out-of-range positions,
    /// rotations, and scales are meaningful.
    #[must_use]
    pub fn normalize(&self) -> Self {
        Self {
            opacity: self.opacity.clamp(0.0, 1.0),
            ..*self
        }
    }
}
