// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slot-arena storage for sprite containers.
//!
//! Containers live in a flat arena addressed by [`ContainerId`] handles.
//! Destroyed slots are recycled via a free list, and generation counters
//! make stale handles fail loudly instead of aliasing a newer container.
//!
//! Traversals temporarily [`take`](ContainerStore::take) a container out of
//! its slot while visiting it (so the visit can borrow the container and
//! the store independently) and [`restore`](ContainerStore::restore) it
//! afterwards; a slot observed empty by another accessor is a traversal
//! bug, not a user error.

use alloc::vec::Vec;
use core::fmt;

use super::container::Container;

/// A generational handle to a container slot.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ContainerId {
    idx: u32,
    generation: u32,
}

impl fmt::Debug for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContainerId({}@gen{})", self.idx, self.generation)
    }
}

struct Slot<I> {
    generation: u32,
    payload: Option<Container<I>>,
}

/// The arena of all live containers in one tree.
pub(crate) struct ContainerStore<I> {
    slots: Vec<Slot<I>>,
    free: Vec<u32>,
}

impl<I> ContainerStore<I> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Number of live containers.
    pub(crate) fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Stores a container, reusing a freed slot when available.
    pub(crate) fn insert(&mut self, container: Container<I>) -> ContainerId {
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.payload = Some(container);
            ContainerId {
                idx,
                generation: slot.generation,
            }
        } else {
            let idx = u32::try_from(self.slots.len()).expect("container arena overflow");
            self.slots.push(Slot {
                generation: 0,
                payload: Some(container),
            });
            ContainerId { idx, generation: 0 }
        }
    }

    /// Borrows a container.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the container is currently taken.
    pub(crate) fn get(&self, id: ContainerId) -> &Container<I> {
        self.validate(id);
        self.slots[id.idx as usize]
            .payload
            .as_ref()
            .expect("container accessed while taken for traversal")
    }

    /// Mutably borrows a container.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the container is currently taken.
    pub(crate) fn get_mut(&mut self, id: ContainerId) -> &mut Container<I> {
        self.validate(id);
        self.slots[id.idx as usize]
            .payload
            .as_mut()
            .expect("container accessed while taken for traversal")
    }

    /// Moves a container out of its slot for the duration of a visit.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the container is already taken.
    pub(crate) fn take(&mut self, id: ContainerId) -> Container<I> {
        self.validate(id);
        self.slots[id.idx as usize]
            .payload
            .take()
            .expect("container taken twice")
    }

    /// Puts a taken container back.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the slot is occupied.
    pub(crate) fn restore(&mut self, id: ContainerId, container: Container<I>) {
        self.validate(id);
        let slot = &mut self.slots[id.idx as usize];
        assert!(slot.payload.is_none(), "restoring into an occupied slot");
        slot.payload = Some(container);
    }

    /// Frees a slot whose container has been taken and dropped, bumping the
    /// generation so outstanding handles go stale.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the container was never taken.
    pub(crate) fn discard(&mut self, id: ContainerId) {
        self.validate(id);
        let slot = &mut self.slots[id.idx as usize];
        assert!(
            slot.payload.is_none(),
            "discarding a slot that still holds a container"
        );
        slot.generation += 1;
        self.free.push(id.idx);
    }

    fn validate(&self, id: ContainerId) {
        assert!(
            (id.idx as usize) < self.slots.len()
                && self.slots[id.idx as usize].generation == id.generation,
            "stale ContainerId: {id:?}"
        );
    }
}

impl<I> fmt::Debug for ContainerStore<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContainerStore(live: {})", self.len())
    }
}
