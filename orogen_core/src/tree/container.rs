// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-instance containers.
//!
//! A container holds everything one sprite instance accumulates across
//! ticks. Containers are created lazily the first time an id appears under
//! a parent and destroyed (recursively, depth-first) the first tick the id
//! is absent from the parent's freshly rendered child list. Re-adding an id
//! later creates a brand-new container — prior state is never resurrected.
//!
//! Each container is owned exclusively by its parent's child map; the
//! `global_id` path (`parent-path/id`) scopes asset acquire/release calls
//! and diagnostics.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use crate::device::LoadTicket;
use crate::output::RenderedNode;
use crate::sprite::{AnyCustomSprite, AnyPureSprite, NativeSprite, SpriteId};
use crate::update::SharedUpdateQueue;

use super::store::ContainerId;

/// A container plus its tree-scoped identity path.
pub(crate) struct Container<I> {
    pub(crate) global_id: String,
    pub(crate) kind: ContainerKind<I>,
}

impl<I> fmt::Debug for Container<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.kind {
            ContainerKind::Custom(_) => "custom",
            ContainerKind::Pure(_) => "pure",
            ContainerKind::Native(_) => "native",
        };
        write!(f, "Container({} {})", kind, self.global_id)
    }
}

/// The three container kinds, matching the reconcilable node kinds.
pub(crate) enum ContainerKind<I> {
    Custom(CustomContainer<I>),
    Pure(PureContainer),
    Native(NativeContainer),
}

/// State for one stateful sprite instance.
pub(crate) struct CustomContainer<I> {
    /// The definition, refreshed from the node each tick.
    pub(crate) def: Rc<dyn AnyCustomSprite<I>>,
    /// The state produced by `init` and advanced by `update`.
    pub(crate) state: Box<dyn Any>,
    /// FIFO of pending state updates, shared with `Updater` handles.
    pub(crate) queue: SharedUpdateQueue,
    /// Child containers by declared id; doubles as the previous tick's
    /// child-id set for the unused-id sweep.
    pub(crate) children: BTreeMap<SpriteId, ContainerId>,
    /// Outstanding asset preload, if `init` requested one.
    pub(crate) load: Option<LoadTicket>,
    /// Set until the end of the container's first state tick; `update` is
    /// skipped while set.
    pub(crate) just_created: bool,
}

/// State for one memoized sprite instance.
pub(crate) struct PureContainer {
    pub(crate) def: Rc<dyn AnyPureSprite>,
    /// Props the cache was produced from.
    pub(crate) last_props: Box<dyn Any>,
    /// Rendered children in this sprite's own frame. `None` until the
    /// first render.
    pub(crate) cache: Option<Vec<RenderedNode>>,
    pub(crate) children: BTreeMap<SpriteId, ContainerId>,
}

/// State for one host-implemented sprite instance.
pub(crate) struct NativeContainer {
    pub(crate) imp: Rc<dyn NativeSprite>,
    /// Opaque to the core; interpreted only by `imp`.
    pub(crate) state: Box<dyn Any>,
    /// The parent's path, handed to every host hook.
    pub(crate) parent_global_id: String,
}
