// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal device and platform doubles for this crate's unit tests.
//!
//! Richer scripted doubles for whole-game tests live in the harness crate;
//! these only satisfy the boundary traits with recordable no-ops.

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::Point;

use crate::device::{
    Alerts, Audio, Clipboard, Device, FileRef, LoadTicket, Network, NetworkCallback, Platform,
    Storage, TimerCallback, TimerId,
};
use crate::size::{GameSizeSpec, OrientationSize, ResolvedSize, resolve_size};

/// A device whose every capability is an inert stub, with enough recording
/// for lifecycle assertions.
pub(crate) struct NullDevice {
    size: ResolvedSize,
    /// Whether preloads report settled; tests flip this to exercise
    /// deferred cleanup.
    pub(crate) loads_settled: bool,
    /// Arguments of every `cleanup_files` call, in order.
    pub(crate) cleanups: Vec<String>,
    /// Arguments of every `preload_files` call, in order.
    pub(crate) preloads: Vec<String>,
    /// Every `log` line, in order.
    pub(crate) logs: Vec<String>,
    next_ticket: u64,
    network: NullNetwork,
    storage: NullStorage,
    alerts: NullAlerts,
    clipboard: NullClipboard,
}

impl NullDevice {
    /// A 300x200 game on a 600x400 landscape device.
    pub(crate) fn new() -> Self {
        let spec = GameSizeSpec::Single(OrientationSize::new(300.0, 200.0));
        Self {
            size: resolve_size(&spec, 600.0, 400.0),
            loads_settled: true,
            cleanups: Vec::new(),
            preloads: Vec::new(),
            logs: Vec::new(),
            next_ticket: 0,
            network: NullNetwork,
            storage: NullStorage,
            alerts: NullAlerts,
            clipboard: NullClipboard,
        }
    }
}

impl Device for NullDevice {
    fn size(&self) -> ResolvedSize {
        self.size
    }

    fn log(&mut self, message: &str) {
        self.logs.push(message.to_string());
    }

    fn random(&mut self) -> f64 {
        0.5
    }

    fn now_millis(&mut self) -> f64 {
        0.0
    }

    fn is_touch_screen(&self) -> bool {
        false
    }

    fn timer_start(&mut self, _duration_ms: f64, _callback: TimerCallback) -> TimerId {
        TimerId(0)
    }

    fn timer_pause(&mut self, _id: TimerId) {}
    fn timer_resume(&mut self, _id: TimerId) {}
    fn timer_cancel(&mut self, _id: TimerId) {}

    fn audio(&mut self, _filename: &str) -> Box<dyn Audio> {
        Box::new(NullAudio)
    }

    fn network(&mut self) -> &mut dyn Network {
        &mut self.network
    }

    fn storage(&mut self) -> &mut dyn Storage {
        &mut self.storage
    }

    fn alerts(&mut self) -> &mut dyn Alerts {
        &mut self.alerts
    }

    fn clipboard(&mut self) -> &mut dyn Clipboard {
        &mut self.clipboard
    }

    fn preload_files(&mut self, global_id: &str, _files: &[FileRef]) -> LoadTicket {
        self.preloads.push(global_id.to_string());
        self.next_ticket += 1;
        LoadTicket(self.next_ticket)
    }

    fn load_settled(&self, _ticket: LoadTicket) -> bool {
        self.loads_settled
    }

    fn cleanup_files(&mut self, global_id: &str) {
        self.cleanups.push(global_id.to_string());
    }
}

struct NullAudio;
impl Audio for NullAudio {
    fn play(&mut self, _from_position: Option<f64>, _looped: bool) {}
    fn pause(&mut self) {}
    fn position(&self) -> f64 {
        0.0
    }
    fn duration(&self) -> f64 {
        0.0
    }
    fn set_volume(&mut self, _volume: f64) {}
    fn volume(&self) -> f64 {
        1.0
    }
}

struct NullNetwork;
impl Network for NullNetwork {
    fn get(&mut self, _url: &str, _on_response: NetworkCallback) {}
    fn post(&mut self, _url: &str, _body: &str, _on_response: NetworkCallback) {}
    fn put(&mut self, _url: &str, _body: &str, _on_response: NetworkCallback) {}
    fn delete(&mut self, _url: &str, _on_response: NetworkCallback) {}
}

struct NullStorage;
impl Storage for NullStorage {
    fn get_item(&mut self, _key: &str) -> Option<String> {
        None
    }
    fn set_item(&mut self, _key: &str, _value: Option<&str>) {}
}

struct NullAlerts;
impl Alerts for NullAlerts {
    fn ok(&mut self, _message: &str, _on_close: Option<Box<dyn FnOnce()>>) {}
    fn ok_cancel(&mut self, _message: &str, _on_response: Box<dyn FnOnce(bool)>) {}
}

struct NullClipboard;
impl Clipboard for NullClipboard {
    fn copy(&mut self, _text: &str, _on_complete: Box<dyn FnOnce(bool)>) {}
}

/// A platform with unit inputs that counts edge-flag resets.
#[derive(Default)]
pub(crate) struct NullPlatform {
    pub(crate) ended_ticks: u32,
}

impl Platform for NullPlatform {
    type Inputs = ();

    fn inputs(&mut self, _to_local: &dyn Fn(Point) -> Point) {}

    fn end_tick(&mut self) {
        self.ended_ticks += 1;
    }
}

