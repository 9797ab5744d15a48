// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sprite tree nodes.
//!
//! A render method returns a list of [`SpriteNode`]s describing the
//! sprite's children for this tick. Nodes are values: the reconciler
//! consumes them, matching each against the previous tick's containers by
//! declared [`SpriteId`].
//!
//! Identity is (parent, id) alone — reordering siblings preserves their
//! state; renaming resets it. Ids must be unique among the siblings
//! produced by one render call; a repeat is a fatal authoring error caught
//! every tick.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use core::any::Any;
use core::fmt;

use crate::props::BaseProps;
use crate::sprite::definition::{AnyCustomSprite, AnyPureSprite, CustomSprite, PureSprite};
use crate::sprite::texture::Texture;

/// A sprite's declared identifier, unique among its siblings.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpriteId(String);

impl SpriteId {
    /// Returns the id as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SpriteId {
    fn from(id: &str) -> Self {
        Self(String::from(id))
    }
}

impl From<String> for SpriteId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Debug for SpriteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SpriteId({:?})", self.0)
    }
}

impl fmt::Display for SpriteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One child produced by a render call.
///
/// `I` is the host platform's input snapshot type.
pub enum SpriteNode<I> {
    /// A stateful sprite (see [`CustomSprite`]).
    Custom(CustomNode<I>),
    /// A memoized sprite (see [`PureSprite`]).
    Pure(PureSpriteNode),
    /// A host-implemented sprite, resolved by name at reconcile time.
    Native(NativeNode),
    /// A drawable leaf.
    Texture(Texture),
    /// Nothing; useful for conditional children.
    Empty,
}

impl<I: 'static> SpriteNode<I> {
    /// Creates a custom sprite node.
    pub fn custom<D: CustomSprite<I>>(
        id: impl Into<SpriteId>,
        def: &Rc<D>,
        base: BaseProps,
        props: D::Props,
    ) -> Self {
        Self::Custom(CustomNode {
            id: id.into(),
            base,
            def: Rc::clone(def) as Rc<dyn AnyCustomSprite<I>>,
            props: Box::new(props),
        })
    }

    /// Creates a pure sprite node.
    pub fn pure<D: PureSprite>(
        id: impl Into<SpriteId>,
        def: &Rc<D>,
        base: BaseProps,
        props: D::Props,
    ) -> Self {
        Self::Pure(PureSpriteNode::new(id, def, base, props))
    }

    /// Creates a native sprite node. `name` must match a registered host
    /// implementation; `props` are interpreted by that implementation only.
    pub fn native(
        id: impl Into<SpriteId>,
        name: impl Into<String>,
        props: impl Any,
    ) -> Self {
        Self::Native(NativeNode {
            id: id.into(),
            name: name.into(),
            props: Box::new(props),
        })
    }
}

impl<I> From<Texture> for SpriteNode<I> {
    fn from(texture: Texture) -> Self {
        Self::Texture(texture)
    }
}

impl<I> fmt::Debug for SpriteNode<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(n) => write!(f, "Custom({})", n.id),
            Self::Pure(n) => write!(f, "Pure({})", n.id),
            Self::Native(n) => write!(f, "Native({} as {})", n.id, n.name),
            Self::Texture(_) => f.write_str("Texture"),
            Self::Empty => f.write_str("Empty"),
        }
    }
}

/// A custom sprite child: erased definition handle plus this tick's props.
pub struct CustomNode<I> {
    /// Sibling-unique identifier.
    pub id: SpriteId,
    /// Placement and visual properties.
    pub base: BaseProps,
    pub(crate) def: Rc<dyn AnyCustomSprite<I>>,
    pub(crate) props: Box<dyn Any>,
}

impl<I> fmt::Debug for CustomNode<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CustomNode({})", self.id)
    }
}

/// A pure sprite child.
pub struct PureSpriteNode {
    /// Sibling-unique identifier.
    pub id: SpriteId,
    /// Placement and visual properties.
    pub base: BaseProps,
    pub(crate) def: Rc<dyn AnyPureSprite>,
    pub(crate) props: Box<dyn Any>,
}

impl PureSpriteNode {
    fn new<D: PureSprite>(
        id: impl Into<SpriteId>,
        def: &Rc<D>,
        base: BaseProps,
        props: D::Props,
    ) -> Self {
        Self {
            id: id.into(),
            base,
            def: Rc::clone(def) as Rc<dyn AnyPureSprite>,
            props: Box::new(props),
        }
    }
}

impl fmt::Debug for PureSpriteNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PureSpriteNode({})", self.id)
    }
}

/// A native sprite child. The core never interprets `props`.
pub struct NativeNode {
    /// Sibling-unique identifier.
    pub id: SpriteId,
    /// Registry name of the host implementation.
    pub name: String,
    pub(crate) props: Box<dyn Any>,
}

impl fmt::Debug for NativeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeNode({} as {})", self.id, self.name)
    }
}

/// A child produced by a pure sprite's render: only other pure sprites or
/// textures. Custom and native sprites cannot appear here, which keeps pure
/// subtrees device-independent by construction.
pub enum PureNode {
    /// A nested pure sprite.
    Sprite(PureSpriteNode),
    /// A drawable leaf.
    Texture(Texture),
}

impl PureNode {
    /// Creates a nested pure sprite node.
    pub fn sprite<D: PureSprite>(
        id: impl Into<SpriteId>,
        def: &Rc<D>,
        base: BaseProps,
        props: D::Props,
    ) -> Self {
        Self::Sprite(PureSpriteNode::new(id, def, base, props))
    }
}

impl From<Texture> for PureNode {
    fn from(texture: Texture) -> Self {
        Self::Texture(texture)
    }
}

impl fmt::Debug for PureNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sprite(n) => write!(f, "PureSprite({})", n.id),
            Self::Texture(_) => f.write_str("Texture"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sprite_id_conversions() {
        let a: SpriteId = "player".into();
        let b: SpriteId = String::from("player").into();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "player");
    }

    #[test]
    fn sprite_id_orders_lexically() {
        let a: SpriteId = "a".into();
        let b: SpriteId = "b".into();
        assert!(a < b);
    }
}
