//! The `minifb` window: presents the rendered [`Canvas`] and forwards mouse
//! input to the simulator.
//!
//! The frame loop talks to the window through [`Surface`] so it can run
//! headless in tests.

use std::sync::mpsc::Sender;
use std::time::Duration;

use minifb::{Key, MouseButton, MouseMode, ScaleMode, Window, WindowOptions};
use tracing::info;

use pinch_keys::NormPoint;

use crate::canvas::Canvas;
use crate::error::AppResult;
use crate::tracker::SimInput;

pub const WINDOW_TITLE: &str = "Advanced Virtual Keyboard";

// ════════════════════════════════════════════════════════════════════════════
// Surface
// ════════════════════════════════════════════════════════════════════════════

/// Somewhere to draw frames and read the user's quit request from.
pub trait Surface {
    fn is_open(&self) -> bool;

    /// Handle host input for this frame.  Returns false when the user asked
    /// to quit.
    fn poll_input(&mut self) -> bool;

    fn canvas_mut(&mut self) -> &mut Canvas;

    /// Show the canvas.
    fn present(&mut self) -> AppResult<()>;
}

// ════════════════════════════════════════════════════════════════════════════
// Pointer tracking
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct PointerState {
    pos:   Option<NormPoint>,
    left:  bool,
    right: bool,
}

/// Simulator input for what changed between two pointer samples.
fn pointer_events(prev: PointerState, next: PointerState) -> Vec<SimInput> {
    let mut out = Vec::new();
    if next.pos != prev.pos {
        out.push(match next.pos {
            Some(p) => SimInput::PointerMoved(p),
            None    => SimInput::PointerLeft,
        });
    }
    if next.left != prev.left {
        out.push(SimInput::Pinch(next.left));
    }
    if next.right != prev.right {
        out.push(SimInput::SecondHand(next.right));
    }
    out
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window:  Window,
    canvas:  Canvas,
    sim_tx:  Option<Sender<SimInput>>,
    pointer: PointerState,
}

impl Visualizer {
    /// Open the window.  With `sim_tx` set, mouse input is forwarded to a
    /// [`crate::tracker::SimTracker`].
    pub fn new(title: &str, width: usize, height: usize, sim_tx: Option<Sender<SimInput>>) -> AppResult<Self> {
        let mut window = Window::new(
            title,
            width, height,
            WindowOptions {
                resize:     true,
                scale_mode: ScaleMode::Stretch,
                ..WindowOptions::default()
            },
        )?;

        window.limit_update_rate(Some(Duration::from_millis(16))); // ~60fps
        info!(width, height, simulated = sim_tx.is_some(), "window opened");

        Ok(Visualizer {
            window,
            canvas: Canvas::new(width, height),
            sim_tx,
            pointer: PointerState::default(),
        })
    }

    fn sample_pointer(&self) -> PointerState {
        let (w, h) = self.window.get_size();
        let pos = self
            .window
            .get_mouse_pos(MouseMode::Discard)
            .filter(|_| w > 0 && h > 0)
            .map(|(x, y)| NormPoint::new(x / w as f32, y / h as f32));
        PointerState {
            pos,
            left:  self.window.get_mouse_down(MouseButton::Left),
            right: self.window.get_mouse_down(MouseButton::Right),
        }
    }
}

impl Surface for Visualizer {
    fn is_open(&self) -> bool { self.window.is_open() }

    fn poll_input(&mut self) -> bool {
        if !self.window.is_open() || self.window.is_key_down(Key::Escape) {
            return false;
        }

        if let Some(tx) = &self.sim_tx {
            let next = self.sample_pointer();
            for input in pointer_events(self.pointer, next) {
                let _ = tx.send(input);
            }
            self.pointer = next;
        }
        true
    }

    fn canvas_mut(&mut self) -> &mut Canvas { &mut self.canvas }

    fn present(&mut self) -> AppResult<()> {
        self.window.update_with_buffer(self.canvas.pixels(), self.canvas.width(), self.canvas.height())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f32, y: f32) -> Option<NormPoint> { Some(NormPoint::new(x, y)) }

    #[test]
    fn unchanged_pointer_sends_nothing() {
        let s = PointerState { pos: at(0.5, 0.5), left: true, right: false };
        assert!(pointer_events(s, s).is_empty());
    }

    #[test]
    fn move_and_press_in_one_sample() {
        let prev = PointerState::default();
        let next = PointerState { pos: at(0.2, 0.3), left: true, right: false };
        assert_eq!(
            pointer_events(prev, next),
            vec![SimInput::PointerMoved(NormPoint::new(0.2, 0.3)), SimInput::Pinch(true)],
        );
    }

    #[test]
    fn leaving_and_releasing() {
        let prev = PointerState { pos: at(0.2, 0.3), left: true, right: true };
        let next = PointerState { pos: None, left: false, right: false };
        assert_eq!(
            pointer_events(prev, next),
            vec![SimInput::PointerLeft, SimInput::Pinch(false), SimInput::SecondHand(false)],
        );
    }
}
