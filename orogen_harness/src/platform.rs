// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted pointer platform.

use kurbo::Point;

use orogen_core::device::Platform;

/// One pointer snapshot, already mapped into a sprite's local frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerInputs {
    /// Pointer position in the receiving sprite's local coordinates.
    pub position: Point,
    /// Whether the pointer is currently down.
    pub pressed: bool,
    /// Whether the pointer went down since the last tick.
    pub just_pressed: bool,
    /// Whether the pointer went up since the last tick.
    pub just_released: bool,
}

/// A platform whose pointer is driven by test code.
///
/// `just_pressed`/`just_released` behave like real edge flags: they stay
/// set until the scheduler ends a logical tick, so exactly one tick
/// observes each edge even when several ticks run in one frame.
#[derive(Debug, Default)]
pub struct ScriptedPlatform {
    pointer: Point,
    pressed: bool,
    just_pressed: bool,
    just_released: bool,
    /// Number of logical ticks ended so far.
    pub ended_ticks: u32,
}

impl ScriptedPlatform {
    /// A platform with the pointer up at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the pointer without changing the button state.
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.pointer = Point::new(x, y);
    }

    /// Presses the pointer at a position.
    pub fn press(&mut self, x: f64, y: f64) {
        self.move_to(x, y);
        self.pressed = true;
        self.just_pressed = true;
    }

    /// Releases the pointer.
    pub fn release(&mut self) {
        self.pressed = false;
        self.just_released = true;
    }
}

impl Platform for ScriptedPlatform {
    type Inputs = PointerInputs;

    fn inputs(&mut self, to_local: &dyn Fn(Point) -> Point) -> PointerInputs {
        PointerInputs {
            position: to_local(self.pointer),
            pressed: self.pressed,
            just_pressed: self.just_pressed,
            just_released: self.just_released,
        }
    }

    fn end_tick(&mut self) {
        self.just_pressed = false;
        self.just_released = false;
        self.ended_ticks += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_flags_last_until_end_tick() {
        let mut platform = ScriptedPlatform::new();
        platform.press(10.0, 5.0);

        let identity = |p: Point| p;
        let snapshot = platform.inputs(&identity);
        assert!(snapshot.pressed);
        assert!(snapshot.just_pressed);

        platform.end_tick();
        let snapshot = platform.inputs(&identity);
        assert!(snapshot.pressed, "level state survives the tick boundary");
        assert!(!snapshot.just_pressed, "edge state does not");
    }

    #[test]
    fn positions_go_through_the_mapper() {
        let mut platform = ScriptedPlatform::new();
        platform.move_to(50.0, 0.0);
        let shifted = |p: Point| Point::new(p.x - 100.0, p.y);
        assert_eq!(platform.inputs(&shifted).position, Point::new(-50.0, 0.0));
    }
}
