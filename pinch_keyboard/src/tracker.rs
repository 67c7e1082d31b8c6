//! Capture and hand detection seams, plus the mouse-driven simulator.
//!
//! The frame loop only sees two traits: [`FrameSource`] (blocking frame
//! acquisition) and [`HandDetector`] (landmarks for a frame).  Whether hands
//! come from a real detector process ([`crate::pipe::PipeTracker`]) or from the
//! window's mouse ([`SimTracker`]) is invisible to it.

use std::sync::mpsc::{Receiver, TryRecvError};

use pinch_keys::{HandObservation, NormPoint, Viewport};

use crate::error::CaptureError;

// ════════════════════════════════════════════════════════════════════════════
// Frame
// ════════════════════════════════════════════════════════════════════════════

/// One captured image.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub width:  u32,
    pub height: u32,
    /// Row-major ARGB pixels, if the source delivers an image at all.
    pub pixels: Option<Vec<u32>>,
}

impl Frame {
    /// A frame with dimensions but no image (simulation, landmark-only pipes).
    pub fn blank(width: u32, height: u32) -> Self {
        Frame { width, height, pixels: None }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    /// Flip the image left-to-right in place.
    pub fn mirror_horizontal(&mut self) {
        let w = self.width as usize;
        if w == 0 { return; }
        if let Some(px) = self.pixels.as_mut() {
            for row in px.chunks_exact_mut(w) {
                row.reverse();
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Collaborator traits
// ════════════════════════════════════════════════════════════════════════════

/// Delivers camera frames.  `read_frame` may block.
pub trait FrameSource {
    fn read_frame(&mut self) -> Result<Frame, CaptureError>;
}

/// Finds hands in a frame.  Zero hands is a normal result, not an error.
pub trait HandDetector {
    fn detect(&mut self, frame: &Frame) -> Vec<HandObservation>;
}

/// Anything that both captures and detects.
pub trait Tracker: FrameSource + HandDetector {}

impl<T: FrameSource + HandDetector> Tracker for T {}

// ════════════════════════════════════════════════════════════════════════════
// DetectorConfig
// ════════════════════════════════════════════════════════════════════════════

/// Settings handed to the hand detector when it is constructed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectorConfig {
    pub max_hands:                usize,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence:  f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig {
            max_hands:                2,
            min_detection_confidence: 0.7,
            min_tracking_confidence:  0.7,
        }
    }
}

impl DetectorConfig {
    /// Command-line flags understood by the external detector script.
    pub fn to_args(&self) -> Vec<String> {
        vec![
            "--max-hands".to_string(),
            self.max_hands.to_string(),
            "--min-detection-confidence".to_string(),
            self.min_detection_confidence.to_string(),
            "--min-tracking-confidence".to_string(),
            self.min_tracking_confidence.to_string(),
        ]
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SimTracker: mouse simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Raw pointer input forwarded from the window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimInput {
    /// Pointer position in normalized window coordinates.
    PointerMoved(NormPoint),
    /// Pointer left the window.
    PointerLeft,
    /// Left button: pinch.
    Pinch(bool),
    /// Right button: show a second hand at the mirrored position.
    SecondHand(bool),
}

/// Offset of the thumb tip from the fingertip when the simulated hand is open.
const OPEN_THUMB: (f32, f32) = (-0.06, 0.05);

/// Simulated hands driven by [`SimInput`] from the visualizer's window.
///
/// The pointer is the index fingertip of hand 0.  Holding the left button
/// closes the thumb onto it.  Holding the right button adds hand 1 at the
/// horizontally mirrored position, pinching together with hand 0.  The
/// window sends input over a channel so the window loop and the simulator
/// stay decoupled.
pub struct SimTracker {
    rx:       Receiver<SimInput>,
    viewport: Viewport,
    config:   DetectorConfig,
    pointer:  Option<NormPoint>,
    pinch:    bool,
    second:   bool,
}

impl SimTracker {
    pub fn new(rx: Receiver<SimInput>, viewport: Viewport, config: DetectorConfig) -> Self {
        SimTracker { rx, viewport, config, pointer: None, pinch: false, second: false }
    }

    fn apply(&mut self, input: SimInput) {
        match input {
            SimInput::PointerMoved(p) => self.pointer = Some(p),
            SimInput::PointerLeft     => self.pointer = None,
            SimInput::Pinch(down)     => self.pinch = down,
            SimInput::SecondHand(on)  => self.second = on,
        }
    }

    fn hand_at(&self, tip: NormPoint) -> HandObservation {
        let thumb = if self.pinch {
            tip
        } else {
            NormPoint::new(tip.x + OPEN_THUMB.0, tip.y + OPEN_THUMB.1)
        };
        HandObservation::from_tips(tip, thumb)
    }
}

impl FrameSource for SimTracker {
    fn read_frame(&mut self) -> Result<Frame, CaptureError> {
        loop {
            match self.rx.try_recv() {
                Ok(input)                       => self.apply(input),
                Err(TryRecvError::Empty)        => break,
                Err(TryRecvError::Disconnected) => return Err(CaptureError::EndOfStream),
            }
        }
        Ok(Frame::blank(self.viewport.width, self.viewport.height))
    }
}

impl HandDetector for SimTracker {
    fn detect(&mut self, _frame: &Frame) -> Vec<HandObservation> {
        let Some(tip) = self.pointer else { return Vec::new() };

        let mut hands = vec![self.hand_at(tip)];
        if self.second {
            hands.push(self.hand_at(tip.mirrored()));
        }
        hands.truncate(self.config.max_hands);
        hands
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use pinch_keys::{is_pinching, PINCH_THRESHOLD};
    use std::sync::mpsc;

    fn sim() -> (mpsc::Sender<SimInput>, SimTracker) {
        let (tx, rx) = mpsc::channel();
        (tx, SimTracker::new(rx, Viewport::new(1280, 720), DetectorConfig::default()))
    }

    fn step(t: &mut SimTracker) -> Vec<HandObservation> {
        let frame = t.read_frame().unwrap();
        t.detect(&frame)
    }

    #[test]
    fn no_pointer_no_hands() {
        let (_tx, mut t) = sim();
        assert!(step(&mut t).is_empty());
    }

    #[test]
    fn frame_has_requested_size() {
        let (_tx, mut t) = sim();
        let f = t.read_frame().unwrap();
        assert_eq!((f.width, f.height), (1280, 720));
        assert!(f.pixels.is_none());
    }

    #[test]
    fn pointer_drives_fingertip() {
        let (tx, mut t) = sim();
        tx.send(SimInput::PointerMoved(NormPoint::new(0.3, 0.6))).unwrap();
        let hands = step(&mut t);
        assert_eq!(hands.len(), 1);
        assert_eq!(hands[0].index_tip(), NormPoint::new(0.3, 0.6));
        assert!(!is_pinching(&hands[0], PINCH_THRESHOLD));
    }

    #[test]
    fn left_button_pinches() {
        let (tx, mut t) = sim();
        tx.send(SimInput::PointerMoved(NormPoint::new(0.3, 0.6))).unwrap();
        tx.send(SimInput::Pinch(true)).unwrap();
        assert!(is_pinching(&step(&mut t)[0], PINCH_THRESHOLD));
        tx.send(SimInput::Pinch(false)).unwrap();
        assert!(!is_pinching(&step(&mut t)[0], PINCH_THRESHOLD));
    }

    #[test]
    fn second_hand_is_mirrored_and_capped() {
        let (tx, rx) = mpsc::channel();
        let one = DetectorConfig { max_hands: 1, ..DetectorConfig::default() };
        let mut capped = SimTracker::new(rx, Viewport::new(640, 480), one);
        tx.send(SimInput::PointerMoved(NormPoint::new(0.25, 0.5))).unwrap();
        tx.send(SimInput::SecondHand(true)).unwrap();
        assert_eq!(step(&mut capped).len(), 1);

        let (tx, mut t) = sim();
        tx.send(SimInput::PointerMoved(NormPoint::new(0.25, 0.5))).unwrap();
        tx.send(SimInput::SecondHand(true)).unwrap();
        let hands = step(&mut t);
        assert_eq!(hands.len(), 2);
        assert!((hands[1].index_tip().x - 0.75).abs() < 1e-6);
    }

    #[test]
    fn pointer_leaving_removes_hand() {
        let (tx, mut t) = sim();
        tx.send(SimInput::PointerMoved(NormPoint::new(0.3, 0.6))).unwrap();
        tx.send(SimInput::PointerLeft).unwrap();
        assert!(step(&mut t).is_empty());
    }

    #[test]
    fn closed_window_ends_stream() {
        let (tx, mut t) = sim();
        drop(tx);
        assert!(matches!(t.read_frame(), Err(CaptureError::EndOfStream)));
    }

    #[test]
    fn mirror_reverses_rows() {
        let mut f = Frame { width: 3, height: 2, pixels: Some(vec![1, 2, 3, 4, 5, 6]) };
        f.mirror_horizontal();
        assert_eq!(f.pixels, Some(vec![3, 2, 1, 6, 5, 4]));
    }

    #[test]
    fn detector_args_carry_defaults() {
        let args = DetectorConfig::default().to_args();
        assert_eq!(args, ["--max-hands", "2", "--min-detection-confidence", "0.7", "--min-tracking-confidence", "0.7"]);
    }
}
