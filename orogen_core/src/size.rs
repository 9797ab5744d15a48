// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Game size configuration and viewport resolution.
//!
//! A game declares its coordinate space once at startup via [`GameConfig`]:
//! either one [`OrientationSize`] used everywhere, or a portrait/landscape
//! pair selected by the device's aspect ratio. [`resolve_size`] scales that
//! space to fit the device, splitting any leftover room into letterbox
//! margins capped by the declared maximums, and decides whether the XL
//! render variants apply.
//!
//! Hosts call [`resolve_size`] whenever the window or screen changes and
//! serve the result from their device implementation; the core reads it for
//! render-variant selection and native-sprite coordinate mapping.

use alloc::string::String;

/// The game-coordinate size for one orientation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrientationSize {
    /// Width of the game coordinate space.
    pub width: f64,
    /// Height of the game coordinate space.
    pub height: f64,
    /// Maximum extra width (per side) revealed as letterbox margin.
    pub max_width_margin: f64,
    /// Maximum extra height (per side) revealed as letterbox margin.
    pub max_height_margin: f64,
    /// Device width (in device pixels) at or above which the XL render
    /// variants are selected.
    pub min_width_xl: Option<f64>,
    /// Device height (in device pixels) at or above which the XL render
    /// variants are selected.
    pub min_height_xl: Option<f64>,
}

impl OrientationSize {
    /// Creates a size with no margins and no XL thresholds.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            max_width_margin: 0.0,
            max_height_margin: 0.0,
            min_width_xl: None,
            min_height_xl: None,
        }
    }
}

/// The game's declared coordinate space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameSizeSpec {
    /// One size used regardless of device orientation.
    Single(OrientationSize),
    /// Distinct sizes, selected by device aspect ratio.
    Dual {
        /// Used when the device is taller than it is wide.
        portrait: OrientationSize,
        /// Used when the device is at least as wide as it is tall.
        landscape: OrientationSize,
    },
}

/// A font request for text textures.
#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
    /// Font family name, resolved by the renderer.
    pub family: String,
    /// Size in game-coordinate units.
    pub size: f64,
}

/// Startup configuration consumed by the host.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    /// The game's coordinate space.
    pub size: GameSizeSpec,
    /// Default font for text textures that don't specify one.
    pub default_font: Option<FontSpec>,
}

/// The viewport resolution for the current device, produced by
/// [`resolve_size`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedSize {
    /// Game-coordinate width (excluding margins).
    pub width: f64,
    /// Game-coordinate height (excluding margins).
    pub height: f64,
    /// Extra game-coordinate width revealed on each side.
    pub width_margin: f64,
    /// Extra game-coordinate height revealed on each side.
    pub height_margin: f64,
    /// Device width in physical pixels.
    pub device_width: f64,
    /// Device height in physical pixels.
    pub device_height: f64,
    /// Whether the portrait orientation was selected.
    pub portrait: bool,
    /// Whether the XL render variants apply.
    pub xl: bool,
}

impl ResolvedSize {
    /// Total game-coordinate width including both margins.
    #[inline]
    #[must_use]
    pub fn full_width(&self) -> f64 {
        self.width + 2.0 * self.width_margin
    }

    /// Total game-coordinate height including both margins.
    #[inline]
    #[must_use]
    pub fn full_height(&self) -> f64 {
        self.height + 2.0 * self.height_margin
    }

    /// Device pixels per game-coordinate unit.
    #[inline]
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.device_width / self.full_width()
    }
}

/// Resolves the game's coordinate space against a device viewport.
///
/// The game space is scaled uniformly to fit the device. Leftover room in
/// the non-limiting dimension becomes letterbox margin, split evenly per
/// side and capped at the orientation's declared maximums.
///
/// # Panics
///
/// Panics if the device dimensions or the selected orientation size are not
/// strictly positive.
#[must_use]
pub fn resolve_size(spec: &GameSizeSpec, device_width: f64, device_height: f64) -> ResolvedSize {
    assert!(
        device_width > 0.0 && device_height > 0.0,
        "device dimensions must be positive"
    );
    let portrait = device_height > device_width;
    let size = match spec {
        GameSizeSpec::Single(size) => size,
        GameSizeSpec::Dual {
            portrait: p,
            landscape: l,
        } => {
            if portrait {
                p
            } else {
                l
            }
        }
    };
    assert!(
        size.width > 0.0 && size.height > 0.0,
        "game dimensions must be positive"
    );

    let scale = (device_width / size.width).min(device_height / size.height);
    let width_margin = ((device_width / scale - size.width) / 2.0).clamp(0.0, size.max_width_margin);
    let height_margin =
        ((device_height / scale - size.height) / 2.0).clamp(0.0, size.max_height_margin);

    let xl = size.min_width_xl.is_some_and(|min| device_width >= min)
        || size.min_height_xl.is_some_and(|min| device_height >= min);

    ResolvedSize {
        width: size.width,
        height: size.height,
        width_margin,
        height_margin,
        device_width,
        device_height,
        portrait,
        xl,
    }
}
