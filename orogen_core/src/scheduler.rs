// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-timestep scheduling with render extrapolation.
//!
//! The host calls [`Scheduler::advance`] once per display frame with its
//! timestamp. The scheduler accumulates elapsed time and converts it into
//! zero or more whole logical ticks — state advances at exactly the
//! configured rate no matter how irregularly frames arrive. A host running
//! faster than the tick rate produces frames with zero ticks; one running
//! slower catches up with several ticks in one call, and the accumulator
//! self-balances as long as the caller keeps feeding real timestamps.
//!
//! The very first call runs the creation tick (root `init` plus the initial
//! render; `update` is skipped everywhere) and consumes no lag.
//!
//! After the tick loop, the fractional remainder `lag / step ∈ [0, 1)`
//! drives one render-only pass over unchanged state, giving renderers an
//! extrapolation factor to interpolate motion between ticks. Per-tick input
//! edge flags are reset after every logical tick, so "just pressed" state
//! is seen by exactly one tick even during catch-up bursts.

use crate::device::{Device, Platform};
use crate::output::RenderedNode;
use crate::time::{TickInterval, Timestamp};
use crate::trace::Tracer;
use crate::tree::SpriteTree;

/// Scheduler configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SchedulerConfig {
    /// Length of one logical tick.
    pub step: TickInterval,
}

impl SchedulerConfig {
    /// 60 logical ticks per second, the conventional rate.
    #[must_use]
    pub const fn sixty_hz() -> Self {
        Self {
            step: TickInterval::SIXTY_HZ,
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::sixty_hz()
    }
}

/// Converts host frame timestamps into logical ticks and render passes.
#[derive(Debug)]
pub struct Scheduler {
    config: SchedulerConfig,
    prev: Option<Timestamp>,
    lag_millis: f64,
    ticks: u64,
}

impl Scheduler {
    /// Creates a scheduler. State is seeded by the first
    /// [`advance`](Self::advance) call.
    #[must_use]
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            prev: None,
            lag_millis: 0.0,
            ticks: 0,
        }
    }

    /// Total logical ticks run since creation (including the creation
    /// tick).
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Runs due logical ticks for `now`, then one render-only pass, and
    /// returns the output tree.
    pub fn advance<I: 'static>(
        &mut self,
        now: Timestamp,
        tree: &mut SpriteTree<I>,
        platform: &mut dyn Platform<Inputs = I>,
        device: &mut dyn Device,
    ) -> RenderedNode {
        self.advance_traced(now, tree, platform, device, Tracer::disabled())
    }

    /// Like [`advance`](Self::advance), with trace events delivered to the
    /// given tracer.
    pub fn advance_traced<I: 'static>(
        &mut self,
        now: Timestamp,
        tree: &mut SpriteTree<I>,
        platform: &mut dyn Platform<Inputs = I>,
        device: &mut dyn Device,
        mut tracer: Tracer<'_>,
    ) -> RenderedNode {
        tree.poll_pending_releases(device);

        let step = self.config.step.millis();
        match self.prev {
            None => {
                self.prev = Some(now);
                self.run_tick(tree, platform, device, &mut tracer);
            }
            Some(prev) => {
                self.lag_millis += now.saturating_since(prev).millis();
                self.prev = Some(now);
                while self.lag_millis >= step {
                    self.lag_millis -= step;
                    self.run_tick(tree, platform, device, &mut tracer);
                }
            }
        }

        let extrapolation = self.lag_millis / step;
        tracer.render_pass(extrapolation);
        tree.render_pass(extrapolation, platform, device, &mut tracer)
    }

    fn run_tick<I: 'static>(
        &mut self,
        tree: &mut SpriteTree<I>,
        platform: &mut dyn Platform<Inputs = I>,
        device: &mut dyn Device,
        tracer: &mut Tracer<'_>,
    ) {
        tracer.tick_started(self.ticks);
        tree.state_tick(platform, device, tracer);
        platform.end_tick();
        self.ticks += 1;
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec::Vec;

    use super::*;
    use crate::sprite::{CustomSprite, NativeRegistry, SpriteCtx, SpriteNode};
    use crate::testing::{NullDevice, NullPlatform};

    struct Root;
    impl CustomSprite<()> for Root {
        type Props = ();
        type State = ();
        fn render(
            &self,
            _props: &(),
            _state: &(),
            _ctx: &mut SpriteCtx<'_, (), ()>,
        ) -> Vec<SpriteNode<()>> {
            Vec::new()
        }
    }

    fn fixture() -> (Scheduler, SpriteTree<()>, NullPlatform, NullDevice) {
        (
            Scheduler::new(SchedulerConfig::sixty_hz()),
            SpriteTree::new(Rc::new(Root), (), NativeRegistry::new()),
            NullPlatform::default(),
            NullDevice::new(),
        )
    }

    #[test]
    fn first_call_runs_exactly_the_creation_tick() {
        let (mut sched, mut tree, mut platform, mut device) = fixture();
        let _ = sched.advance(Timestamp::from_millis(0.0), &mut tree, &mut platform, &mut device);
        assert_eq!(sched.tick_count(), 1);
    }

    #[test]
    fn sixteen_then_seventeen_millis_tick_once_each_pattern() {
        // Timestamps 0, 16, 33 at a ~16.667ms step: the creation tick on
        // the first call, none on the second (lag 16), one on the third
        // (lag 33) — never zero or two past that point.
        let (mut sched, mut tree, mut platform, mut device) = fixture();
        for (ms, expected_ticks) in [(0.0, 1), (16.0, 1), (33.0, 2)] {
            let _ = sched.advance(
                Timestamp::from_millis(ms),
                &mut tree,
                &mut platform,
                &mut device,
            );
            assert_eq!(sched.tick_count(), expected_ticks, "after t={ms}");
        }
    }

    #[test]
    fn fast_host_runs_zero_ticks_but_still_renders() {
        let (mut sched, mut tree, mut platform, mut device) = fixture();
        let _ = sched.advance(Timestamp::from_millis(0.0), &mut tree, &mut platform, &mut device);
        // 4ms frames: no tick is due for several calls.
        for ms in [4.0, 8.0, 12.0] {
            let _ = sched.advance(
                Timestamp::from_millis(ms),
                &mut tree,
                &mut platform,
                &mut device,
            );
            assert_eq!(sched.tick_count(), 1, "after t={ms}");
        }
        // Crossing the step boundary finally ticks.
        let _ = sched.advance(Timestamp::from_millis(17.0), &mut tree, &mut platform, &mut device);
        assert_eq!(sched.tick_count(), 2);
    }

    #[test]
    fn slow_host_catches_up_with_multiple_ticks() {
        let (mut sched, mut tree, mut platform, mut device) = fixture();
        let _ = sched.advance(Timestamp::from_millis(0.0), &mut tree, &mut platform, &mut device);
        // One 90ms frame owes five whole ticks (90 / 16.667 = 5.4).
        let _ = sched.advance(Timestamp::from_millis(90.0), &mut tree, &mut platform, &mut device);
        assert_eq!(sched.tick_count(), 6);
    }

    #[test]
    fn edge_flags_reset_after_every_tick() {
        let (mut sched, mut tree, mut platform, mut device) = fixture();
        let _ = sched.advance(Timestamp::from_millis(0.0), &mut tree, &mut platform, &mut device);
        assert_eq!(platform.ended_ticks, 1);
        let _ = sched.advance(Timestamp::from_millis(90.0), &mut tree, &mut platform, &mut device);
        // Catch-up burst: one end_tick per logical tick, none for the
        // render-only pass.
        assert_eq!(platform.ended_ticks, 6);
    }

    #[test]
    fn backwards_clock_is_ignored() {
        let (mut sched, mut tree, mut platform, mut device) = fixture();
        let _ = sched.advance(Timestamp::from_millis(50.0), &mut tree, &mut platform, &mut device);
        let _ = sched.advance(Timestamp::from_millis(10.0), &mut tree, &mut platform, &mut device);
        assert_eq!(sched.tick_count(), 1, "negative delta must not tick");
        // Time resumes from the new reference point.
        let _ = sched.advance(Timestamp::from_millis(30.0), &mut tree, &mut platform, &mut device);
        assert_eq!(sched.tick_count(), 2);
    }
}
