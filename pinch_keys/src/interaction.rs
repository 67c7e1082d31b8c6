//! Interaction state machine.
//!
//! Turns the per-frame set of detected hands into debounced key presses.
//!
//! The lock is level-triggered with a single-shot commit: a continuous pinch
//! over a key fires exactly once, however many frames it lasts, and the
//! keyboard re-arms only after a frame in which **no** hand is pinching over
//! a key.  Release is not debounced, so rapid successive presses work.
//!
//! ## Multiple hands
//!
//! Hands are visited in detector delivery order.
//!
//! * Hover: every hand over a key overwrites the previous one, so the **last**
//!   such hand wins.
//! * Press: the **first** hand that produces a rising edge wins and the scan
//!   stops there, so a second simultaneous pinch can neither double-fire nor
//!   replace `pressed_key`.
//!
//! The two rules are asymmetric: with two hands over different keys and only
//! the first one pinching, the highlighted hover key and the pressed key
//! differ.  That quirk is kept on purpose.

use std::time::Instant;

use tracing::debug;

use crate::geometry::to_pixel;
use crate::gesture::{is_pinching, HandObservation};
use crate::layout::{KeyId, Layout};
use crate::text::TextBuffer;

/// A press produced by a rising edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyPress {
    pub key:  KeyId,
    /// Position of the pressing hand in delivery order.
    pub hand: usize,
}

/// State carried from one frame to the next.
///
/// Invariant: `pressed_key` is `Some` only while `pinch_locked` is true.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InteractionState {
    hovered_key:  Option<KeyId>,
    pinch_locked: bool,
    pressed_key:  Option<KeyId>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key under a tracked fingertip in the last frame.
    pub fn hovered_key(&self) -> Option<KeyId> { self.hovered_key }

    /// True while a pinch that already fired is being held.
    pub fn is_pinch_locked(&self) -> bool { self.pinch_locked }

    /// Key that the held pinch fired on.
    pub fn pressed_key(&self) -> Option<KeyId> { self.pressed_key }

    /// Advance one frame.
    ///
    /// Returns the press to commit, if this frame contained a rising edge.
    /// Never fails: zero hands, pinches over empty space and off-screen
    /// fingertips all simply contribute nothing.
    pub fn update<'h, I>(&mut self, layout: &Layout, hands: I, pinch_threshold: f32) -> Option<KeyPress>
    where
        I: IntoIterator<Item = &'h HandObservation>,
    {
        let viewport = layout.viewport();
        let mut hover      = None;
        let mut pinch_seen = false;
        let mut press      = None;

        for (idx, hand) in hands.into_iter().enumerate() {
            let Some(key) = layout.key_at(to_pixel(hand.index_tip(), viewport)) else {
                continue;
            };
            hover = Some(key);

            // A pinch only counts for the lock when it is over a key.
            if !is_pinching(hand, pinch_threshold) {
                continue;
            }
            pinch_seen = true;

            if !self.pinch_locked {
                self.pinch_locked = true;
                self.pressed_key  = Some(key);
                press = Some(KeyPress { key, hand: idx });
                break;
            }
        }

        self.hovered_key = hover;

        if !pinch_seen {
            if self.pinch_locked {
                debug!(key = ?self.pressed_key, "pinch released");
            }
            self.pinch_locked = false;
            self.pressed_key  = None;
        }

        press
    }
}

/// Run one frame of the state machine and commit any press into `text`.
///
/// This is the whole per-frame core: both pieces of persistent state are
/// passed in by the owner of the frame loop.
pub fn process_frame<'h, I>(
    state:           &mut InteractionState,
    text:            &mut TextBuffer,
    layout:          &Layout,
    hands:           I,
    pinch_threshold: f32,
    now:             Instant,
) -> Option<KeyPress>
where
    I: IntoIterator<Item = &'h HandObservation>,
{
    let press = state.update(layout, hands, pinch_threshold)?;
    text.commit(press.key, now);
    Some(press)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
