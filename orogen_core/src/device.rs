// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host contracts for platform integrations.
//!
//! Orogen splits platform-specific work into *host* crates. The core never
//! implements any device capability; it threads a [`Device`] down to each
//! sprite's hooks and sequences the calls. Each host provides:
//!
//! - **Device** — The [`Device`] trait: viewport size, logging, randomness,
//!   wall-clock time, timers, audio, network, storage, alerts, clipboard,
//!   and asset preload/cleanup.
//!
//! - **Platform inputs** — The [`Platform`] trait: a per-sprite input
//!   snapshot already translated into the sprite's local frame via the
//!   mapping function the reconciler supplies, plus the per-tick reset of
//!   "just pressed"-style edge flags.
//!
//! - **Frame driver** — Something that calls
//!   [`Scheduler::advance`](crate::scheduler::Scheduler::advance) once per
//!   display frame with the host's timestamp. The mechanism (display link,
//!   `requestAnimationFrame`, a game loop) differs fundamentally across
//!   platforms and is not abstracted by a trait.
//!
//! Non-fatal failures (asset load rejection, network errors, timer misuse)
//! are the host's to report through these callback channels; the core never
//! sees or swallows them.

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use kurbo::Point;

use crate::size::ResolvedSize;

/// A handle to a running timer, returned by [`Device::timer_start`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

impl fmt::Debug for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimerId({})", self.0)
    }
}

/// A handle to an in-flight asset preload, returned by
/// [`Device::preload_files`].
///
/// The reconciler polls [`Device::load_settled`] with this handle to decide
/// when a removed container's files may be released: a container destroyed
/// while its preload is still in flight is parked until the load settles, so
/// the release never corrupts a load in progress.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(pub u64);

impl fmt::Debug for LoadTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LoadTicket({})", self.0)
    }
}

/// An asset file requested by a sprite's `init` hook.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FileRef {
    /// An image file, referenced later by `TextureKind::Image`.
    Image(String),
    /// An audio file, referenced later by [`Device::audio`].
    Audio(String),
}

/// A one-shot timer callback.
pub type TimerCallback = Box<dyn FnOnce()>;

/// Callback receiving a network response body.
pub type NetworkCallback = Box<dyn FnOnce(&str)>;

/// Playback control for one loaded audio file.
pub trait Audio {
    /// Starts or resumes playback, optionally from a position in seconds.
    fn play(&mut self, from_position: Option<f64>, looped: bool);
    /// Pauses playback, keeping the position.
    fn pause(&mut self);
    /// Current playback position in seconds.
    fn position(&self) -> f64;
    /// Total duration in seconds.
    fn duration(&self) -> f64;
    /// Sets the volume in `[0, 1]`.
    fn set_volume(&mut self, volume: f64);
    /// Current volume in `[0, 1]`.
    fn volume(&self) -> f64;
}

/// HTTP requests with callback delivery.
///
/// Responses arrive between ticks; handlers feed results back into sprite
/// state through [`Updater`](crate::update::Updater) handles only.
pub trait Network {
    /// Issues a GET request.
    fn get(&mut self, url: &str, on_response: NetworkCallback);
    /// Issues a POST request with a body.
    fn post(&mut self, url: &str, body: &str, on_response: NetworkCallback);
    /// Issues a PUT request with a body.
    fn put(&mut self, url: &str, body: &str, on_response: NetworkCallback);
    /// Issues a DELETE request.
    fn delete(&mut self, url: &str, on_response: NetworkCallback);
}

/// Persistent key/value storage.
pub trait Storage {
    /// Reads a stored value.
    fn get_item(&mut self, key: &str) -> Option<String>;
    /// Writes a value, or removes the key when `value` is `None`.
    fn set_item(&mut self, key: &str, value: Option<&str>);
}

/// Modal alerts.
pub trait Alerts {
    /// Shows a message with a single OK button.
    fn ok(&mut self, message: &str, on_close: Option<Box<dyn FnOnce()>>);
    /// Shows a message with OK and Cancel; the callback receives `true` for
    /// OK.
    fn ok_cancel(&mut self, message: &str, on_response: Box<dyn FnOnce(bool)>);
}

/// System clipboard access.
pub trait Clipboard {
    /// Copies text; the callback receives whether the copy succeeded.
    fn copy(&mut self, text: &str, on_complete: Box<dyn FnOnce(bool)>);
}

/// Capabilities a host device supplies to every sprite.
///
/// The core treats all of these as opaque: it forwards calls and sequences
/// lifecycle, nothing more. Implementations live in host crates and test
/// harnesses.
pub trait Device {
    /// The resolved viewport (see [`resolve_size`](crate::size::resolve_size)).
    fn size(&self) -> ResolvedSize;

    /// Writes a log line.
    fn log(&mut self, message: &str);

    /// Returns a uniformly distributed value in `[0, 1)`.
    fn random(&mut self) -> f64;

    /// Wall-clock time in milliseconds since the Unix epoch.
    ///
    /// Distinct from the scheduler's timestamps: this is calendar time for
    /// game logic, not the frame clock.
    fn now_millis(&mut self) -> f64;

    /// Whether the primary input is a touch screen.
    fn is_touch_screen(&self) -> bool;

    /// Starts a one-shot timer firing after `duration_ms`.
    fn timer_start(&mut self, duration_ms: f64, callback: TimerCallback) -> TimerId;
    /// Pauses a running timer.
    fn timer_pause(&mut self, id: TimerId);
    /// Resumes a paused timer.
    fn timer_resume(&mut self, id: TimerId);
    /// Cancels a timer; its callback never fires.
    fn timer_cancel(&mut self, id: TimerId);

    /// Returns playback control for a loaded audio file.
    fn audio(&mut self, filename: &str) -> Box<dyn Audio>;

    /// HTTP access.
    fn network(&mut self) -> &mut dyn Network;
    /// Key/value storage.
    fn storage(&mut self) -> &mut dyn Storage;
    /// Modal alerts.
    fn alerts(&mut self) -> &mut dyn Alerts;
    /// Clipboard access.
    fn clipboard(&mut self) -> &mut dyn Clipboard;

    /// Begins loading `files` on behalf of the container identified by
    /// `global_id`, bumping each file's reference count.
    fn preload_files(&mut self, global_id: &str, files: &[FileRef]) -> LoadTicket;

    /// Whether a preload has finished (successfully or not).
    fn load_settled(&self, ticket: LoadTicket) -> bool;

    /// Releases every file reference held by `global_id`.
    fn cleanup_files(&mut self, global_id: &str);
}

/// Produces per-sprite input snapshots.
///
/// The reconciler calls [`inputs`](Self::inputs) once per sprite per pass,
/// supplying the mapping from game-global coordinates into that sprite's
/// local frame; the snapshot must report pointer positions already mapped.
///
/// [`end_tick`](Self::end_tick) is called after every logical tick so
/// "just pressed"/"just released" edge flags last exactly one tick. When
/// several logical ticks run inside one `advance` call (catch-up), only the
/// first tick observes the edge flags.
pub trait Platform {
    /// The input snapshot type handed to sprite hooks.
    type Inputs;

    /// Builds the input snapshot for a sprite whose local frame is reached
    /// via `to_local`.
    fn inputs(&mut self, to_local: &dyn Fn(Point) -> Point) -> Self::Inputs;

    /// Resets per-tick edge flags. Called after every logical tick, never
    /// after render-only passes.
    fn end_tick(&mut self);
}
