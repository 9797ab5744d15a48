// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The sprite tree: container lifecycle and reconciliation.
//!
//! [`SpriteTree`] owns every live container, rooted at the game's top-level
//! custom sprite. The [`Scheduler`](crate::scheduler::Scheduler) drives it
//! through two pass kinds:
//!
//! - **State tick** — advances every custom sprite once: drain queued
//!   updates, run `update` (skipped on the creation tick), drain, render,
//!   drain, then reconcile the produced children against the previous
//!   tick's containers by id — creating, reusing, and destroying
//!   containers as ids appear, persist, and vanish.
//! - **Render-only pass** — re-renders the tree with an extrapolation
//!   factor and collects the output for the renderer without touching
//!   state, queues, caches, or container lifecycle.
//!
//! Container identity is (parent path, declared id) alone. Duplicate
//! sibling ids and unregistered native sprite names are fatal authoring
//! errors and panic with the offending name.

mod container;
mod render;
mod store;
mod tick;

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use crate::device::{Device, LoadTicket};
use crate::sprite::{AnyCustomSprite, CustomSprite, NativeRegistry, SpriteId};
use crate::update::new_shared_queue;

use container::{Container, ContainerKind, CustomContainer};
use store::{ContainerId, ContainerStore};

/// The root sprite's id and global path.
const ROOT_ID: &str = "game";

/// All live sprite containers for one game, plus the root definition.
pub struct SpriteTree<I> {
    store: ContainerStore<I>,
    registry: NativeRegistry,
    root_def: Rc<dyn AnyCustomSprite<I>>,
    root_props: Rc<dyn Any>,
    root: Option<ContainerId>,
    did_resize: bool,
    /// Removed containers whose asset preload is still in flight; released
    /// once the load settles.
    pending_release: Vec<(String, LoadTicket)>,
}

impl<I: 'static> SpriteTree<I> {
    /// Creates a tree rooted at `def` with fixed root props.
    ///
    /// No container exists until the first state tick runs; the scheduler's
    /// first `advance` call performs that creation tick.
    pub fn new<D: CustomSprite<I>>(def: Rc<D>, props: D::Props, registry: NativeRegistry) -> Self {
        Self {
            store: ContainerStore::new(),
            registry,
            root_def: def as Rc<dyn AnyCustomSprite<I>>,
            root_props: Rc::new(props),
            root: None,
            did_resize: false,
            pending_release: Vec::new(),
        }
    }

    /// Marks the viewport as resized.
    ///
    /// The next state tick invalidates every pure sprite cache and reports
    /// `did_resize` to native sprite implementations, then clears the flag.
    pub fn notify_resize(&mut self) {
        self.did_resize = true;
    }

    /// Number of live containers, for diagnostics and tests.
    #[must_use]
    pub fn container_count(&self) -> usize {
        self.store.len()
    }

    /// Releases files of removed containers whose preload has now settled.
    pub(crate) fn poll_pending_releases(&mut self, device: &mut dyn Device) {
        let pending = core::mem::take(&mut self.pending_release);
        for (global_id, ticket) in pending {
            if device.load_settled(ticket) {
                device.cleanup_files(&global_id);
            } else {
                self.pending_release.push((global_id, ticket));
            }
        }
    }

    /// Creates a custom container for `id` under `parent_gid`, running the
    /// definition's `init` exactly once.
    fn create_custom(
        &mut self,
        parent_gid: Option<&str>,
        id: &SpriteId,
        def: &Rc<dyn AnyCustomSprite<I>>,
        props: &dyn Any,
        device: &mut dyn Device,
    ) -> ContainerId {
        let global_id = match parent_gid {
            Some(parent) => format!("{parent}/{id}"),
            None => String::from(ROOT_ID),
        };
        let queue = new_shared_queue();
        let mut load = None;
        let state = def.init_erased(props, device, &queue, &global_id, &mut load);
        self.store.insert(Container {
            global_id,
            kind: ContainerKind::Custom(CustomContainer {
                def: Rc::clone(def),
                state,
                queue,
                children: BTreeMap::new(),
                load,
                just_created: true,
            }),
        })
    }

    /// Destroys a container and its entire subtree, depth-first.
    ///
    /// Custom containers release their id-scoped files immediately, unless
    /// an asset preload is still in flight — then the release is parked in
    /// `pending_release` so the in-flight load is never corrupted. Native
    /// containers run the host `cleanup` hook with their last state.
    fn destroy_container(
        &mut self,
        cid: ContainerId,
        device: &mut dyn Device,
        tracer: &mut crate::trace::Tracer<'_>,
    ) {
        let container = self.store.take(cid);
        match container.kind {
            ContainerKind::Custom(custom) => {
                for (_, child) in custom.children {
                    self.destroy_container(child, device, tracer);
                }
                match custom.load {
                    Some(ticket) if !device.load_settled(ticket) => {
                        self.pending_release
                            .push((container.global_id.clone(), ticket));
                    }
                    _ => device.cleanup_files(&container.global_id),
                }
            }
            ContainerKind::Pure(pure) => {
                for (_, child) in pure.children {
                    self.destroy_container(child, device, tracer);
                }
            }
            ContainerKind::Native(native) => {
                native.imp.cleanup(native.state, &native.parent_global_id);
            }
        }
        tracer.container_destroyed(&container.global_id);
        self.store.discard(cid);
    }
}

impl<I> fmt::Debug for SpriteTree<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SpriteTree(containers: {})", self.store.len())
    }
}

/// Panics on a repeated sibling id. Called for every id-bearing node kind
/// in every pass; a repeat is always a fatal authoring error, never
/// deduplicated.
fn note_sibling_id(seen: &mut alloc::collections::BTreeSet<SpriteId>, id: &SpriteId, parent: &str) {
    assert!(
        seen.insert(id.clone()),
        "duplicate sprite id \"{id}\" under \"{parent}\""
    );
}

