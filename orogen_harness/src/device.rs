// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A recording, scripted device.
//!
//! Every capability either records what games do with it (logs, copies,
//! preloads, cleanups) or is driven explicitly by test code (timer firing,
//! network responses, load settlement), so whole games run headlessly and
//! deterministically.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

use orogen_core::device::{
    Alerts, Audio, Clipboard, Device, FileRef, LoadTicket, Network, NetworkCallback,
    TimerCallback, TimerId,
};
use orogen_core::size::{GameConfig, ResolvedSize, resolve_size};

/// A queued HTTP request captured by [`TestNetwork`].
pub struct PendingRequest {
    /// HTTP method name.
    pub method: &'static str,
    /// Request URL.
    pub url: String,
    /// Request body, empty for GET and DELETE.
    pub body: String,
    callback: NetworkCallback,
}

impl std::fmt::Debug for PendingRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

/// Captures requests until the test responds to them.
#[derive(Debug, Default)]
pub struct TestNetwork {
    /// Requests awaiting a response, oldest first.
    pub pending: Vec<PendingRequest>,
}

impl TestNetwork {
    /// Responds to every pending request with the same body.
    pub fn respond_all(&mut self, body: &str) {
        for request in self.pending.drain(..) {
            (request.callback)(body);
        }
    }
}

impl Network for TestNetwork {
    fn get(&mut self, url: &str, on_response: NetworkCallback) {
        self.pending.push(PendingRequest {
            method: "GET",
            url: url.into(),
            body: String::new(),
            callback: on_response,
        });
    }

    fn post(&mut self, url: &str, body: &str, on_response: NetworkCallback) {
        self.pending.push(PendingRequest {
            method: "POST",
            url: url.into(),
            body: body.into(),
            callback: on_response,
        });
    }

    fn put(&mut self, url: &str, body: &str, on_response: NetworkCallback) {
        self.pending.push(PendingRequest {
            method: "PUT",
            url: url.into(),
            body: body.into(),
            callback: on_response,
        });
    }

    fn delete(&mut self, url: &str, on_response: NetworkCallback) {
        self.pending.push(PendingRequest {
            method: "DELETE",
            url: url.into(),
            body: String::new(),
            callback: on_response,
        });
    }
}

/// In-memory key/value storage.
#[derive(Debug, Default)]
pub struct TestStorage {
    /// Backing map, directly inspectable.
    pub map: HashMap<String, String>,
}

impl orogen_core::device::Storage for TestStorage {
    fn get_item(&mut self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: Option<&str>) {
        match value {
            Some(value) => {
                self.map.insert(key.into(), value.into());
            }
            None => {
                self.map.remove(key);
            }
        }
    }
}

/// Records alert messages and answers `ok_cancel` with a scripted choice.
#[derive(Debug)]
pub struct TestAlerts {
    /// Messages shown, in order.
    pub messages: Vec<String>,
    /// The answer every `ok_cancel` receives.
    pub response: bool,
}

impl Default for TestAlerts {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            response: true,
        }
    }
}

impl Alerts for TestAlerts {
    fn ok(&mut self, message: &str, on_close: Option<Box<dyn FnOnce()>>) {
        self.messages.push(message.into());
        if let Some(on_close) = on_close {
            on_close();
        }
    }

    fn ok_cancel(&mut self, message: &str, on_response: Box<dyn FnOnce(bool)>) {
        self.messages.push(message.into());
        on_response(self.response);
    }
}

/// Records copied text; every copy succeeds.
#[derive(Debug, Default)]
pub struct TestClipboard {
    /// Copied strings, in order.
    pub copied: Vec<String>,
}

impl Clipboard for TestClipboard {
    fn copy(&mut self, text: &str, on_complete: Box<dyn FnOnce(bool)>) {
        self.copied.push(text.into());
        on_complete(true);
    }
}

struct TestAudioHandle {
    filename: String,
    events: Rc<RefCell<Vec<String>>>,
}

impl Audio for TestAudioHandle {
    fn play(&mut self, from_position: Option<f64>, looped: bool) {
        self.events.borrow_mut().push(format!(
            "play:{}:{}:{looped}",
            self.filename,
            from_position.unwrap_or(0.0)
        ));
    }

    fn pause(&mut self) {
        self.events.borrow_mut().push(format!("pause:{}", self.filename));
    }

    fn position(&self) -> f64 {
        0.0
    }

    fn duration(&self) -> f64 {
        0.0
    }

    fn set_volume(&mut self, volume: f64) {
        self.events
            .borrow_mut()
            .push(format!("volume:{}:{volume}", self.filename));
    }

    fn volume(&self) -> f64 {
        1.0
    }
}

/// A fully scripted [`Device`].
pub struct TestDevice {
    size: ResolvedSize,
    config: GameConfig,
    /// Every `log` line, in order.
    pub logs: Vec<String>,
    /// Values served by `random`, cycled; defaults to 0.5 when empty.
    pub random_values: VecDeque<f64>,
    /// The wall clock served by `now_millis`.
    pub wall_clock_ms: f64,
    /// Whether `is_touch_screen` reports a touch screen.
    pub touch_screen: bool,
    /// HTTP double; respond via [`TestNetwork::respond_all`].
    pub net: TestNetwork,
    /// Storage double.
    pub store: TestStorage,
    /// Alerts double.
    pub dialogs: TestAlerts,
    /// Clipboard double.
    pub clip: TestClipboard,
    /// Audio playback events from every handle, in order.
    pub audio_events: Rc<RefCell<Vec<String>>>,
    /// Every `preload_files` call: the container path and its files.
    pub preloads: Vec<(String, Vec<FileRef>)>,
    /// Every `cleanup_files` call, in order.
    pub cleanups: Vec<String>,
    /// Whether new preloads settle immediately.
    pub auto_settle: bool,
    unsettled: HashSet<u64>,
    next_ticket: u64,
    timers: Vec<(TimerId, f64, Option<TimerCallback>)>,
    paused_timers: HashSet<u64>,
    next_timer: u64,
}

impl TestDevice {
    /// A device showing `config` at the given physical dimensions.
    #[must_use]
    pub fn new(config: GameConfig, device_width: f64, device_height: f64) -> Self {
        let size = resolve_size(&config.size, device_width, device_height);
        Self {
            size,
            config,
            logs: Vec::new(),
            random_values: VecDeque::new(),
            wall_clock_ms: 0.0,
            touch_screen: false,
            net: TestNetwork::default(),
            store: TestStorage::default(),
            dialogs: TestAlerts::default(),
            clip: TestClipboard::default(),
            audio_events: Rc::new(RefCell::new(Vec::new())),
            preloads: Vec::new(),
            cleanups: Vec::new(),
            auto_settle: true,
            unsettled: HashSet::new(),
            next_ticket: 0,
            timers: Vec::new(),
            paused_timers: HashSet::new(),
            next_timer: 0,
        }
    }

    /// Re-resolves the viewport for new physical dimensions.
    ///
    /// Callers must also invoke
    /// [`SpriteTree::notify_resize`](orogen_core::tree::SpriteTree::notify_resize)
    /// so caches invalidate, as a real host would.
    pub fn resize(&mut self, device_width: f64, device_height: f64) {
        self.size = resolve_size(&self.config.size, device_width, device_height);
    }

    /// Fires every running timer's callback, regardless of duration.
    pub fn fire_timers(&mut self) {
        let timers = std::mem::take(&mut self.timers);
        for (id, duration, callback) in timers {
            match callback {
                Some(callback) if !self.paused_timers.contains(&id.0) => callback(),
                Some(callback) => {
                    self.timers.push((id, duration, Some(callback)));
                }
                None => {}
            }
        }
    }

    /// Marks every in-flight preload as settled.
    pub fn settle_loads(&mut self) {
        self.unsettled.clear();
    }
}

impl std::fmt::Debug for TestDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TestDevice(logs: {}, timers: {}, pending requests: {})",
            self.logs.len(),
            self.timers.len(),
            self.net.pending.len()
        )
    }
}

impl Device for TestDevice {
    fn size(&self) -> ResolvedSize {
        self.size
    }

    fn log(&mut self, message: &str) {
        self.logs.push(message.into());
    }

    fn random(&mut self) -> f64 {
        match self.random_values.pop_front() {
            Some(value) => {
                self.random_values.push_back(value);
                value
            }
            None => 0.5,
        }
    }

    fn now_millis(&mut self) -> f64 {
        self.wall_clock_ms
    }

    fn is_touch_screen(&self) -> bool {
        self.touch_screen
    }

    fn timer_start(&mut self, duration_ms: f64, callback: TimerCallback) -> TimerId {
        self.next_timer += 1;
        let id = TimerId(self.next_timer);
        self.timers.push((id, duration_ms, Some(callback)));
        id
    }

    fn timer_pause(&mut self, id: TimerId) {
        self.paused_timers.insert(id.0);
    }

    fn timer_resume(&mut self, id: TimerId) {
        self.paused_timers.remove(&id.0);
    }

    fn timer_cancel(&mut self, id: TimerId) {
        for (timer_id, _, callback) in &mut self.timers {
            if *timer_id == id {
                *callback = None;
            }
        }
    }

    fn audio(&mut self, filename: &str) -> Box<dyn Audio> {
        Box::new(TestAudioHandle {
            filename: filename.into(),
            events: Rc::clone(&self.audio_events),
        })
    }

    fn network(&mut self) -> &mut dyn Network {
        &mut self.net
    }

    fn storage(&mut self) -> &mut dyn orogen_core::device::Storage {
        &mut self.store
    }

    fn alerts(&mut self) -> &mut dyn Alerts {
        &mut self.dialogs
    }

    fn clipboard(&mut self) -> &mut dyn Clipboard {
        &mut self.clip
    }

    fn preload_files(&mut self, global_id: &str, files: &[FileRef]) -> LoadTicket {
        self.preloads.push((global_id.into(), files.to_vec()));
        self.next_ticket += 1;
        if !self.auto_settle {
            self.unsettled.insert(self.next_ticket);
        }
        LoadTicket(self.next_ticket)
    }

    fn load_settled(&self, ticket: LoadTicket) -> bool {
        !self.unsettled.contains(&ticket.0)
    }

    fn cleanup_files(&mut self, global_id: &str) {
        self.cleanups.push(global_id.into());
    }
}
