// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A trace sink that records events for assertions and JSON export.

use orogen_core::trace::TraceSink;
use serde_json::{Value, json};

/// One recorded tick-loop event.
#[derive(Clone, Debug, PartialEq)]
pub enum TraceEvent {
    /// A state tick began.
    TickStarted(u64),
    /// A render-only pass began with this extrapolation factor.
    RenderPass(f64),
    /// A container was created.
    ContainerCreated(String),
    /// A container was destroyed.
    ContainerDestroyed(String),
    /// A pure sprite served its cache.
    PureCacheHit(String),
    /// A pure sprite re-rendered.
    PureCacheMiss(String),
}

/// Records every event in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    /// Recorded events, oldest first.
    pub events: Vec<TraceEvent>,
}

impl RecordingSink {
    /// An empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes the recording as a JSON array, one object per event.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let events: Vec<Value> = self
            .events
            .iter()
            .map(|event| match event {
                TraceEvent::TickStarted(index) => {
                    json!({"event": "tick_started", "index": index})
                }
                TraceEvent::RenderPass(extrapolation) => {
                    json!({"event": "render_pass", "extrapolation": extrapolation})
                }
                TraceEvent::ContainerCreated(id) => {
                    json!({"event": "container_created", "id": id})
                }
                TraceEvent::ContainerDestroyed(id) => {
                    json!({"event": "container_destroyed", "id": id})
                }
                TraceEvent::PureCacheHit(id) => {
                    json!({"event": "pure_cache_hit", "id": id})
                }
                TraceEvent::PureCacheMiss(id) => {
                    json!({"event": "pure_cache_miss", "id": id})
                }
            })
            .collect();
        Value::Array(events)
    }
}

impl TraceSink for RecordingSink {
    fn tick_started(&mut self, index: u64) {
        self.events.push(TraceEvent::TickStarted(index));
    }

    fn render_pass(&mut self, extrapolation: f64) {
        self.events.push(TraceEvent::RenderPass(extrapolation));
    }

    fn container_created(&mut self, global_id: &str) {
        self.events.push(TraceEvent::ContainerCreated(global_id.into()));
    }

    fn container_destroyed(&mut self, global_id: &str) {
        self.events
            .push(TraceEvent::ContainerDestroyed(global_id.into()));
    }

    fn pure_cache_hit(&mut self, global_id: &str) {
        self.events.push(TraceEvent::PureCacheHit(global_id.into()));
    }

    fn pure_cache_miss(&mut self, global_id: &str) {
        self.events.push(TraceEvent::PureCacheMiss(global_id.into()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_export_shape() {
        let mut sink = RecordingSink::new();
        sink.tick_started(0);
        sink.container_created("game/kid");
        let json = sink.to_json();
        assert_eq!(json[0]["event"], "tick_started");
        assert_eq!(json[0]["index"], 0);
        assert_eq!(json[1]["event"], "container_created");
        assert_eq!(json[1]["id"], "game/kid");
    }
}
