// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render output consumed by renderers.
//!
//! Each call to the scheduler produces one [`RenderedNode`] tree. Every
//! node's base props are normalized and **local** to its parent; renderers
//! (or [`orogen_render`]'s flattener) compose transforms and multiply
//! opacities while walking the tree.
//!
//! [`orogen_render`]: https://docs.rs/orogen_render

use alloc::vec::Vec;

use crate::props::BaseProps;
use crate::sprite::{SpriteId, Texture, TextureKind};

/// One node of the resolved output tree.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderedNode {
    /// A sprite instance and its rendered children.
    Group {
        /// The sprite's declared id.
        id: SpriteId,
        /// Normalized placement, local to the parent.
        base: BaseProps,
        /// Rendered children, back-to-front.
        children: Vec<RenderedNode>,
    },
    /// A drawable primitive.
    Texture {
        /// Normalized placement, local to the parent.
        base: BaseProps,
        /// The primitive to draw.
        kind: TextureKind,
    },
}

impl RenderedNode {
    /// Wraps a texture node, normalizing its base props.
    #[must_use]
    pub fn from_texture(texture: Texture) -> Self {
        Self::Texture {
            base: texture.base.normalize(),
            kind: texture.kind,
        }
    }
}
