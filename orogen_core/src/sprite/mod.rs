// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sprite data model.
//!
//! A *sprite* is a unit of the declarative tree. Each render call produces a
//! list of child nodes, and the reconciler matches them against the previous
//! tick by declared id. Five node kinds flow through render output:
//!
//! - **Custom** — stateful; owns per-instance state advanced once per tick
//!   (see [`CustomSprite`]).
//! - **Pure** — memoized; recomputed only when its props change or the
//!   viewport resizes (see [`PureSprite`]).
//! - **Native** — host-bridged; opaque state sequenced through a
//!   name-keyed registry (see [`NativeSprite`]).
//! - **Texture** — a drawable primitive leaf.
//! - **Empty** — the absent child.
//!
//! Definitions are plain types implementing the author traits; nodes carry
//! type-erased handles so one tree can mix definitions with different
//! props/state types.

mod definition;
mod native;
mod node;
mod texture;
mod variant;

pub use definition::{CustomSprite, InitCtx, PureSprite, SpriteCtx};
pub use native::{NativeRegistry, NativeSprite, NativeSpriteUtils};
pub use node::{CustomNode, NativeNode, PureNode, PureSpriteNode, SpriteId, SpriteNode};
pub use texture::{Texture, TextureKind};
pub use variant::{RenderVariant, VariantSet, resolve_render_variant};

pub(crate) use definition::{AnyCustomSprite, AnyPureSprite};
