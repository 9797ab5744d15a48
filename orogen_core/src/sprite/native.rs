// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-implemented ("native") sprites.
//!
//! Some sprites wrap platform widgets the core cannot draw — a text input,
//! a web view. The host registers an implementation per name in a
//! [`NativeRegistry`]; nodes reference it by that name. The core only
//! sequences `create`/`update`/`cleanup` and never inspects the state.
//!
//! Implementations position their widget in platform pixels; the
//! [`NativeSpriteUtils`] passed to `create` and `update` maps game
//! coordinates (origin at the viewport center, y up) into platform
//! coordinates (origin top-left, y down).

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::string::String;
use core::any::Any;
use core::fmt;

use crate::size::ResolvedSize;

/// Coordinate and viewport helpers for native sprite implementations.
#[derive(Debug)]
pub struct NativeSpriteUtils<'a> {
    /// The current viewport resolution.
    pub size: &'a ResolvedSize,
    /// Whether the viewport was resized since the implementation last ran.
    pub did_resize: bool,
}

impl NativeSpriteUtils<'_> {
    /// Device pixels per game unit.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.size.scale()
    }

    /// Maps a game x coordinate to platform pixels.
    #[must_use]
    pub fn game_x_to_platform_x(&self, x: f64) -> f64 {
        (x + self.size.full_width() / 2.0) * self.scale()
    }

    /// Maps a game y coordinate to platform pixels.
    #[must_use]
    pub fn game_y_to_platform_y(&self, y: f64) -> f64 {
        (self.size.full_height() / 2.0 - y) * self.scale()
    }
}

/// A host implementation of one native sprite kind.
///
/// State is owned by the container and threaded through these hooks; the
/// core never reads it.
pub trait NativeSprite {
    /// Creates the platform widget. Runs when a node with this name first
    /// appears under a parent.
    fn create(
        &self,
        props: &dyn Any,
        parent_global_id: &str,
        utils: &mut NativeSpriteUtils<'_>,
    ) -> Box<dyn Any>;

    /// Runs once per logical tick while the node remains in the tree.
    fn update(
        &self,
        props: &dyn Any,
        state: &mut dyn Any,
        parent_global_id: &str,
        utils: &mut NativeSpriteUtils<'_>,
    );

    /// Tears the widget down. Runs as soon as the node leaves the tree.
    fn cleanup(&self, state: Box<dyn Any>, parent_global_id: &str);
}

/// Name-keyed registry of native sprite implementations, built by the host
/// at startup.
#[derive(Default)]
pub struct NativeRegistry {
    sprites: BTreeMap<String, Rc<dyn NativeSprite>>,
}

impl NativeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an implementation under `name`, replacing any previous
    /// registration.
    pub fn register(&mut self, name: impl Into<String>, sprite: Rc<dyn NativeSprite>) {
        self.sprites.insert(name.into(), sprite);
    }

    /// Looks up an implementation by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Rc<dyn NativeSprite>> {
        self.sprites.get(name).map(Rc::clone)
    }
}

impl fmt::Debug for NativeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.sprites.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::size::{GameSizeSpec, OrientationSize, resolve_size};

    #[test]
    fn coordinate_mapping_centers_origin() {
        // 300x200 game on a 600x400 device: scale 2, origin at the center.
        let size = resolve_size(
            &GameSizeSpec::Single(OrientationSize::new(300.0, 200.0)),
            600.0,
            400.0,
        );
        let utils = NativeSpriteUtils {
            size: &size,
            did_resize: false,
        };
        assert_eq!(utils.scale(), 2.0);
        assert_eq!(utils.game_x_to_platform_x(0.0), 300.0);
        assert_eq!(utils.game_y_to_platform_y(0.0), 200.0);
        assert_eq!(utils.game_x_to_platform_x(-150.0), 0.0);
        assert_eq!(utils.game_y_to_platform_y(100.0), 0.0);
    }

    #[test]
    fn registry_lookup() {
        struct Nop;
        impl NativeSprite for Nop {
            fn create(
                &self,
                _props: &dyn Any,
                _parent: &str,
                _utils: &mut NativeSpriteUtils<'_>,
            ) -> Box<dyn Any> {
                Box::new(())
            }
            fn update(
                &self,
                _props: &dyn Any,
                _state: &mut dyn Any,
                _parent: &str,
                _utils: &mut NativeSpriteUtils<'_>,
            ) {
            }
            fn cleanup(&self, _state: Box<dyn Any>, _parent: &str) {}
        }

        let mut registry = NativeRegistry::new();
        registry.register("text-input", Rc::new(Nop));
        assert!(registry.get("text-input").is_some());
        assert!(registry.get("slider").is_none());
    }
}
