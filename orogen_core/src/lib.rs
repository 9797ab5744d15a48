// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reconciliation and scheduling core for declarative sprite-tree games.
//!
//! `orogen_core` runs games written as a tree of *sprites*: stateful units
//! that re-render their children every logical tick. It is `no_std`
//! compatible (with `alloc`) and owns no platform code — hosts supply a
//! device, an input platform, and a frame clock, and consume the resolved
//! output tree.
//!
//! # Architecture
//!
//! Each host frame flows through a fixed pipeline:
//!
//! ```text
//!   Host frame callback (timestamp)
//!       │
//!       ▼
//!   Scheduler::advance ──► 0..n state ticks ──► SpriteTree reconcile
//!       │                                           │
//!       │                   containers created/reused/destroyed by id
//!       │                                           │
//!       └──► render-only pass (extrapolation) ──► RenderedNode tree
//!                                                   │
//!                                                   ▼
//!                            renderer / orogen_render flattener
//! ```
//!
//! **[`sprite`]** — The node model and author traits: stateful
//! ([`CustomSprite`](sprite::CustomSprite)), memoized
//! ([`PureSprite`](sprite::PureSprite)), host-bridged
//! ([`NativeSprite`](sprite::NativeSprite)), and drawable textures.
//!
//! **[`tree`]** — Container storage and the reconciler. Containers persist
//! per-(parent, id) state across ticks; ids that disappear are destroyed
//! depth-first, with asset release deferred past in-flight preloads.
//!
//! **[`scheduler`]** — The fixed-timestep accumulator: state advances at
//! exactly the configured tick rate regardless of host frame jitter, and a
//! fractional extrapolation factor feeds a render-only pass per frame.
//!
//! **[`update`]** — The queued-state-update channel: FIFO, drained to
//! fixpoint at defined points in the tick, and the only way callbacks feed
//! back into sprite state.
//!
//! **[`transform`]** / **[`props`]** — Coordinate frames (y-up, degrees
//! clockwise) and the shared positional props with their defaulting and
//! opacity-clamping rules.
//!
//! **[`device`]** — The host boundary: device capabilities and the input
//! platform.
//!
//! **[`size`]** — Game-size configuration and viewport resolution,
//! including orientation and XL selection.
//!
//! **[`output`]** — The rendered tree handed to renderers.
//!
//! **[`trace`]** — Tick-loop instrumentation with a zero-overhead wrapper.
//!
//! # Fatal errors
//!
//! Authoring errors — duplicate sibling ids, unregistered native sprite
//! names — are unrecoverable: the tree they describe cannot be rendered
//! meaningfully, so the core panics with the offending name rather than
//! dropping frames. Host-side failures (network, asset loads) stay in host
//! callback channels and never pass through the core.
//!
//! # Crate features
//!
//! - `std` (disabled by default): enables `std` support in dependencies.
//! - `trace` (disabled by default): enables [`trace::Tracer`] method bodies
//!   (one branch per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod device;
pub mod output;
pub mod props;
pub mod scheduler;
pub mod size;
pub mod sprite;
pub mod time;
pub mod trace;
pub mod transform;
pub mod tree;
pub mod update;

#[cfg(test)]
pub(crate) mod testing;
