use crate::config;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Finger moved left.
    Next,
    /// Finger moved right.
    Prev,
}

/// Turns a touchstart/touchend pair into a slide change.
#[derive(Debug, Default)]
pub struct SwipeTracker {
    origin: Option<(f64, f64)>,
}

impl SwipeTracker {
    pub fn begin(&mut self, x: f64, y: f64) {
        self.origin = Some((x, y));
    }

    pub fn cancel(&mut self) {
        self.origin = None;
    }

    /// A touch began somewhere inside the hero. Multi-touch gestures are
    /// not swipes.
    pub fn touch_start(&mut self, touch_count: u32, first: Option<(f64, f64)>) {
        match first {
            Some((x, y)) if touch_count == 1 => self.begin(x, y),
            _ => self.cancel(),
        }
    }

    /// Only mostly-horizontal movement past the threshold counts.
    pub fn end(&mut self, x: f64, y: f64) -> Option<SwipeDirection> {
        let (start_x, start_y) = self.origin.take()?;
        let dx = x - start_x;
        let dy = y - start_y;
        if dx.abs() > dy.abs() && dx.abs() > config::SWIPE_THRESHOLD_PX {
            Some(if dx < 0.0 {
                SwipeDirection::Next
            } else {
                SwipeDirection::Prev
            })
        } else {
            None
        }
    }
}
