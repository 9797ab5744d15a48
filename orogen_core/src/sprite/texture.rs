// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawable primitives.
//!
//! Textures are the leaves of the sprite tree: the reconciler passes them
//! through untouched and the draw-plan flattener turns them into draw items.
//! Colors are CSS color strings (names or hex), resolved by the renderer.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;

use crate::props::BaseProps;
use crate::size::FontSpec;

/// A drawable leaf node: a primitive plus its placement.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    /// Placement and visual properties.
    pub base: BaseProps,
    /// The primitive to draw.
    pub kind: TextureKind,
}

/// The primitive shapes a renderer must support.
#[derive(Clone, Debug, PartialEq)]
pub enum TextureKind {
    /// A filled axis-aligned rectangle centered on the local origin.
    Rectangle {
        /// Width in local units.
        width: f64,
        /// Height in local units.
        height: f64,
        /// Fill color.
        color: String,
    },
    /// A filled circle centered on the local origin.
    Circle {
        /// Radius in local units.
        radius: f64,
        /// Fill color.
        color: String,
    },
    /// A stroked polyline through `points` in local coordinates.
    Line {
        /// Vertices of the polyline.
        points: Vec<Point>,
        /// Stroke color.
        color: String,
        /// Stroke thickness in local units.
        thickness: f64,
    },
    /// A text run centered on the local origin.
    Text {
        /// The text to draw.
        text: String,
        /// Fill color.
        color: String,
        /// Font override; falls back to the game's default font.
        font: Option<FontSpec>,
    },
    /// A preloaded image drawn centered on the local origin.
    Image {
        /// File name as passed to the preload hook.
        file: String,
        /// Drawn width in local units.
        width: f64,
        /// Drawn height in local units.
        height: f64,
    },
    /// One cell of a preloaded sprite sheet.
    SpriteSheet {
        /// File name as passed to the preload hook.
        file: String,
        /// Number of columns in the sheet.
        columns: u32,
        /// Number of rows in the sheet.
        rows: u32,
        /// Zero-based cell index, row-major.
        index: u32,
        /// Drawn width in local units.
        width: f64,
        /// Drawn height in local units.
        height: f64,
    },
}
