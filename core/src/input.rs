use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Raw pressed state of the pointer buttons for one frame.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct MouseButtons: u8 {
        const PRIMARY   = 1;
        const SECONDARY = 1 << 1;
    }
}

/// Turns per-frame pressed state into one-shot click events.
///
/// A click fires on the frame the button is released after having been pressed, so a press
/// alone, or a button held across many frames, produces nothing until it is let go.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct InputEdgeTracker {
    previous: MouseButtons,
    current: MouseButtons,
}

impl InputEdgeTracker {
    /// Must run exactly once per frame, before any phase reads the edges.
    pub fn refresh(&mut self, pressed: MouseButtons) {
        self.previous = self.current;
        self.current = pressed;
    }

    pub fn primary_released(&self) -> bool {
        self.released(MouseButtons::PRIMARY)
    }

    pub fn secondary_released(&self) -> bool {
        self.released(MouseButtons::SECONDARY)
    }

    fn released(&self, button: MouseButtons) -> bool {
        self.previous.contains(button) && !self.current.contains(button)
    }
}
