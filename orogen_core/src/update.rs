// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Queued state updates.
//!
//! Sprites never mutate their state from callbacks directly; they enqueue
//! closures through an [`Updater`] handle. The owning container drains its
//! queue at fixed points in the tick (before `update`, after `update`, and
//! after `render`), applying closures strictly in enqueue order.
//!
//! # Re-entrancy
//!
//! Draining pops one closure at a time and releases the queue borrow before
//! invoking it, so a closure that enqueues further updates is legal and
//! those updates are applied *within the same drain*, after everything
//! already queued. The drain runs to fixpoint: it only stops once the queue
//! is observed empty.
//!
//! The queue is the only channel by which host callbacks (timers, network
//! responses) feed back into sprite state, so a callback firing between
//! ticks can never race a traversal.

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::rc::Rc;
use core::any::Any;
use core::cell::RefCell;
use core::fmt;
use core::marker::PhantomData;

/// A queued update, erased over the concrete state type.
pub(crate) type ErasedUpdate = Box<dyn FnOnce(&mut dyn Any)>;

/// The shared FIFO behind one container's [`Updater`] handles.
pub(crate) type SharedUpdateQueue = Rc<RefCell<VecDeque<ErasedUpdate>>>;

/// Creates an empty shared queue for a new container.
pub(crate) fn new_shared_queue() -> SharedUpdateQueue {
    Rc::new(RefCell::new(VecDeque::new()))
}

/// A cloneable handle for enqueueing state updates from anywhere: render
/// hooks, timer callbacks, network callbacks.
///
/// Updates are never applied synchronously; [`queue`](Self::queue) always
/// appends, so calling it from inside a render or another update closure is
/// free of re-entrancy hazards.
pub struct Updater<S> {
    queue: SharedUpdateQueue,
    _state: PhantomData<fn(S)>,
}

impl<S: 'static> Updater<S> {
    pub(crate) fn new(queue: SharedUpdateQueue) -> Self {
        Self {
            queue,
            _state: PhantomData,
        }
    }

    /// Enqueues an update to run against the sprite's state at the next
    /// drain point.
    pub fn queue(&self, update: impl FnOnce(&mut S) + 'static) {
        self.queue.borrow_mut().push_back(Box::new(move |state| {
            let state = state
                .downcast_mut::<S>()
                .expect("queued update applied to a different state type");
            update(state);
        }));
    }
}

impl<S> Clone for Updater<S> {
    fn clone(&self) -> Self {
        Self {
            queue: Rc::clone(&self.queue),
            _state: PhantomData,
        }
    }
}

impl<S> fmt::Debug for Updater<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Updater(pending: {})", self.queue.borrow().len())
    }
}

/// Applies every queued update to `state` in FIFO order, including updates
/// enqueued by the updates themselves, until the queue is empty.
pub(crate) fn drain_to_fixpoint(queue: &SharedUpdateQueue, state: &mut dyn Any) {
    loop {
        // Release the borrow before invoking so the closure may enqueue.
        let next = queue.borrow_mut().pop_front();
        match next {
            Some(update) => update(state),
            None => break,
        }
    }
}
