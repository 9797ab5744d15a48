// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing hooks for the tick loop.
//!
//! [`TraceSink`] has one method per event, all defaulting to no-ops, so a
//! sink implements only what it cares about. [`Tracer`] wraps an optional
//! `&mut dyn TraceSink`; with the `trace` feature **off** every `Tracer`
//! method compiles to nothing, and with it **on** each method costs one
//! `Option` branch before dispatch.
//!
//! Sinks are supplied per call via
//! [`Scheduler::advance_traced`](crate::scheduler::Scheduler::advance_traced);
//! recording and pretty-printing sinks live in the harness crate.

use core::fmt;

/// Receives tick-loop events.
#[allow(unused_variables, reason = "default bodies ignore their arguments")]
pub trait TraceSink {
    /// A state tick is about to run. `index` counts ticks from game start.
    fn tick_started(&mut self, index: u64) {}

    /// A render-only pass is about to run with the given extrapolation
    /// factor.
    fn render_pass(&mut self, extrapolation: f64) {}

    /// A container was created at `global_id`.
    fn container_created(&mut self, global_id: &str) {}

    /// A container at `global_id` (and its subtree) was destroyed.
    fn container_destroyed(&mut self, global_id: &str) {}

    /// A pure sprite served its cached output.
    fn pure_cache_hit(&mut self, global_id: &str) {}

    /// A pure sprite re-rendered.
    fn pure_cache_miss(&mut self, global_id: &str) {}
}

/// A zero-overhead handle to an optional [`TraceSink`].
pub struct Tracer<'a> {
    sink: Option<&'a mut dyn TraceSink>,
}

impl<'a> Tracer<'a> {
    /// A tracer that records nothing.
    #[must_use]
    pub fn disabled() -> Self {
        Self { sink: None }
    }

    /// A tracer forwarding to `sink`.
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        Self { sink: Some(sink) }
    }

    pub(crate) fn tick_started(&mut self, index: u64) {
        #[cfg(feature = "trace")]
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.tick_started(index);
        }
        #[cfg(not(feature = "trace"))]
        let _ = index;
    }

    pub(crate) fn render_pass(&mut self, extrapolation: f64) {
        #[cfg(feature = "trace")]
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.render_pass(extrapolation);
        }
        #[cfg(not(feature = "trace"))]
        let _ = extrapolation;
    }

    pub(crate) fn container_created(&mut self, global_id: &str) {
        #[cfg(feature = "trace")]
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.container_created(global_id);
        }
        #[cfg(not(feature = "trace"))]
        let _ = global_id;
    }

    pub(crate) fn container_destroyed(&mut self, global_id: &str) {
        #[cfg(feature = "trace")]
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.container_destroyed(global_id);
        }
        #[cfg(not(feature = "trace"))]
        let _ = global_id;
    }

    pub(crate) fn pure_cache_hit(&mut self, global_id: &str) {
        #[cfg(feature = "trace")]
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.pure_cache_hit(global_id);
        }
        #[cfg(not(feature = "trace"))]
        let _ = global_id;
    }

    pub(crate) fn pure_cache_miss(&mut self, global_id: &str) {
        #[cfg(feature = "trace")]
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.pure_cache_miss(global_id);
        }
        #[cfg(not(feature = "trace"))]
        let _ = global_id;
    }
}

impl fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.sink.is_some() {
            "Tracer(active)"
        } else {
            "Tracer(disabled)"
        })
    }
}
