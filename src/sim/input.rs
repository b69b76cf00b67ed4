//! Two-button input decoding
//!
//! The simulation only ever sees one sample of both buttons per frame. Steering
//! reads the held combination directly; phase changes consume press edges.

/// Raw button levels sampled for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Buttons {
    pub left: bool,
    pub right: bool,
}

/// What the ship controller cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonCombo {
    None,
    Left,
    Right,
    Both,
}

impl Buttons {
    pub const NONE: Self = Self {
        left: false,
        right: false,
    };
    pub const LEFT: Self = Self {
        left: true,
        right: false,
    };
    pub const RIGHT: Self = Self {
        left: false,
        right: true,
    };
    pub const BOTH: Self = Self {
        left: true,
        right: true,
    };

    pub fn combo(self) -> ButtonCombo {
        match (self.left, self.right) {
            (true, true) => ButtonCombo::Both,
            (true, false) => ButtonCombo::Left,
            (false, true) => ButtonCombo::Right,
            (false, false) => ButtonCombo::None,
        }
    }

    #[inline]
    pub fn any(self) -> bool {
        self.left || self.right
    }
}

/// Emits exactly one event per physical press
///
/// After `disarm` the detector ignores everything until it has seen both
/// buttons released, so a button held through a phase change does not count
/// as a fresh press.
#[derive(Debug, Clone, Default)]
pub struct EdgeDetector {
    armed: bool,
    was_pressed: bool,
}

impl EdgeDetector {
    pub fn disarm(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Feed one frame's sample; true on a released -> pressed transition
    pub fn update(&mut self, buttons: Buttons) -> bool {
        let pressed = buttons.any();
        if !self.armed {
            self.armed = !pressed;
            self.was_pressed = pressed;
            return false;
        }
        let edge = pressed && !self.was_pressed;
        self.was_pressed = pressed;
        edge
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combo_table() {
        assert_eq!(Buttons::NONE.combo(), ButtonCombo::None);
        assert_eq!(Buttons::LEFT.combo(), ButtonCombo::Left);
        assert_eq!(Buttons::RIGHT.combo(), ButtonCombo::Right);
        assert_eq!(Buttons::BOTH.combo(), ButtonCombo::Both);
    }

    #[test]
    fn test_one_edge_per_press() {
        let mut edge = EdgeDetector::default();
        assert!(!edge.update(Buttons::NONE)); // arms
        assert!(edge.update(Buttons::LEFT));
        assert!(!edge.update(Buttons::LEFT));
        assert!(!edge.update(Buttons::BOTH));
        assert!(!edge.update(Buttons::NONE));
        assert!(edge.update(Buttons::RIGHT));
    }

    #[test]
    fn test_disarmed_needs_release_first() {
        let mut edge = EdgeDetector::default();
        edge.update(Buttons::NONE);
        edge.disarm();
        assert!(!edge.update(Buttons::LEFT));
        assert!(!edge.update(Buttons::LEFT));
        assert!(!edge.is_armed());
        assert!(!edge.update(Buttons::NONE));
        assert!(edge.is_armed());
        assert!(edge.update(Buttons::LEFT));
    }
}
