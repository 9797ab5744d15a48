// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic doubles for driving orogen games headlessly.
//!
//! Real games run against a host device, a pointer platform, and a display
//! clock. This crate replaces all three with scripted equivalents so whole
//! games can be exercised tick by tick in tests and demos:
//!
//! - [`ScriptedClock`] — hand-cranked frame timestamps.
//! - [`TestDevice`] — records logs, preloads, cleanups, copies, and alerts;
//!   timers, network responses, and asset-load settlement fire only when
//!   the test says so.
//! - [`ScriptedPlatform`] — a pointer with real edge-flag semantics.
//! - [`RecordingSink`] — captures trace events, exportable as JSON.
//!
//! The integration tests at the bottom of this crate double as examples of
//! wiring a game together: build a [`SpriteTree`], a [`Scheduler`], the
//! doubles, and call `advance` per frame.
//!
//! [`SpriteTree`]: orogen_core::tree::SpriteTree
//! [`Scheduler`]: orogen_core::scheduler::Scheduler

mod clock;
mod device;
mod platform;
mod recorder;

pub use clock::ScriptedClock;
pub use device::{PendingRequest, TestAlerts, TestClipboard, TestDevice, TestNetwork, TestStorage};
pub use platform::{PointerInputs, ScriptedPlatform};
pub use recorder::{RecordingSink, TraceEvent};
