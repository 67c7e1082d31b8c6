//! Top-level application: configuration, per-frame processing and the frame
//! loop.
//!
//! `App` owns the keyboard layout cache, the [`InteractionState`] and the
//! [`TextBuffer`].  [`drive`] pulls frames from a [`Tracker`], feeds them
//! through `App::process_frame`, renders into the surface's canvas and
//! presents.  Everything runs on one thread.

use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use pinch_keys::{
    build_layout, process_frame, HandObservation, InteractionState, KeyPress, Layout, TextBuffer,
    Viewport, PINCH_THRESHOLD,
};

use crate::error::{AppResult, CaptureError};
use crate::pipe::PipeTracker;
use crate::render::{render, Scene};
use crate::tracker::{DetectorConfig, Frame, FrameSource, SimTracker, Tracker};
use crate::visualizer::{Surface, Visualizer, WINDOW_TITLE};

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Where hands come from.
#[derive(Clone, Debug, PartialEq)]
pub enum TrackerKind {
    /// Mouse-driven simulation inside the window.
    Simulated,
    /// External detector process; `command[0]` is the program.
    Pipe { command: Vec<String> },
}

/// Bounded exponential backoff for transient capture faults.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RetryPolicy {
    pub max_retries:     u32,
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_retries:     3,
            initial_backoff: Duration::from_millis(20),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (0-based): doubles each time.
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.initial_backoff.saturating_mul(1u32 << attempt.min(16))
    }
}

/// Configuration for the full application.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// Requested window size; also the simulated frame size.
    pub width:           u32,
    pub height:          u32,
    pub tracker:         TrackerKind,
    /// Flip detector frames and landmarks so the user sees a mirror image.
    pub mirror:          bool,
    pub detector:        DetectorConfig,
    pub retry:           RetryPolicy,
    pub pinch_threshold: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            width:           1280,
            height:          720,
            tracker:         TrackerKind::Simulated,
            mirror:          true,
            detector:        DetectorConfig::default(),
            retry:           RetryPolicy::default(),
            pinch_threshold: PINCH_THRESHOLD,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// App
// ════════════════════════════════════════════════════════════════════════════

/// What one processed frame did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    pub press:          Option<KeyPress>,
    pub layout_rebuilt: bool,
}

pub struct App {
    layout:          Option<Layout>,
    state:           InteractionState,
    text:            TextBuffer,
    hands:           Vec<HandObservation>,
    pinch_threshold: f32,
}

impl App {
    pub fn new(pinch_threshold: f32) -> Self {
        App {
            layout: None,
            state: InteractionState::new(),
            text: TextBuffer::new(),
            hands: Vec::new(),
            pinch_threshold,
        }
    }

    pub fn layout(&self) -> Option<&Layout> { self.layout.as_ref() }
    pub fn state(&self) -> &InteractionState { &self.state }
    pub fn text(&self) -> &TextBuffer { &self.text }

    /// Run one frame: rebuild the layout if the frame size changed, advance
    /// the state machine and commit any press.
    pub fn process_frame(&mut self, frame: &Frame, hands: Vec<HandObservation>, now: Instant) -> FrameReport {
        let viewport = frame.viewport();
        let (layout, layout_rebuilt) = match self.layout.take() {
            Some(l) if l.viewport() == viewport => (l, false),
            _ => (build_layout(frame.width, frame.height), true),
        };
        let layout = self.layout.insert(layout);

        let press = process_frame(
            &mut self.state,
            &mut self.text,
            layout,
            &hands,
            self.pinch_threshold,
            now,
        );
        self.hands = hands;

        FrameReport { press, layout_rebuilt }
    }

    /// What to draw for `frame`.  `None` until a frame has been processed.
    pub fn scene<'a>(&'a self, frame: &'a Frame, now: Instant) -> Option<Scene<'a>> {
        let layout = self.layout.as_ref()?;
        Some(Scene {
            frame,
            layout,
            hovered: self.state.hovered_key(),
            pressed: self.state.pressed_key(),
            text:    &self.text,
            hands:   &self.hands,
            now,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Frame loop
// ════════════════════════════════════════════════════════════════════════════

/// Read one frame, retrying transient faults per `policy`.
///
/// `sleep` is called with each backoff delay.
pub fn read_frame_with_retry<S, F>(source: &mut S, policy: &RetryPolicy, mut sleep: F) -> Result<Frame, CaptureError>
where
    S: FrameSource + ?Sized,
    F: FnMut(Duration),
{
    let mut attempt = 0;
    loop {
        match source.read_frame() {
            Ok(frame) => return Ok(frame),
            Err(e) if e.is_transient() && attempt < policy.max_retries => {
                let delay = policy.backoff(attempt);
                warn!(error = %e, attempt = attempt + 1, ?delay, "transient capture fault, retrying");
                sleep(delay);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Run frames until the user quits, the window closes or the stream ends.
/// Returns the number of frames presented.
pub fn drive<S, T>(surface: &mut S, tracker: &mut T, app: &mut App, retry: &RetryPolicy) -> AppResult<u64>
where
    S: Surface + ?Sized,
    T: Tracker + ?Sized,
{
    let mut frames = 0u64;

    while surface.is_open() {
        if !surface.poll_input() {
            info!("exit requested");
            break;
        }

        let frame = match read_frame_with_retry(&mut *tracker, retry, thread::sleep) {
            Ok(frame) => frame,
            Err(CaptureError::EndOfStream) => {
                info!("camera stream ended");
                break;
            }
            Err(e) => {
                error!(error = %e, "capture failed");
                return Err(e.into());
            }
        };

        let hands = tracker.detect(&frame);
        let now = Instant::now();
        let report = app.process_frame(&frame, hands, now);
        if report.layout_rebuilt {
            info!(width = frame.width, height = frame.height, "keyboard layout built");
        }
        if let Some(press) = report.press {
            debug!(key = %press.key, hand = press.hand, "key pressed");
        }

        if let Some(scene) = app.scene(&frame, now) {
            render(surface.canvas_mut(), &scene);
        }
        surface.present()?;
        frames += 1;
    }

    Ok(frames)
}

/// Open the window, start the configured tracker and run until exit.
pub fn run(cfg: AppConfig) -> AppResult<()> {
    let mut app = App::new(cfg.pinch_threshold);
    let (w, h) = (cfg.width as usize, cfg.height as usize);

    let frames = match &cfg.tracker {
        TrackerKind::Simulated => {
            info!("tracker: mouse simulation");
            let (sim_tx, sim_rx) = mpsc::channel();
            let mut vis = Visualizer::new(WINDOW_TITLE, w, h, Some(sim_tx))?;
            let mut tracker = SimTracker::new(sim_rx, Viewport::new(cfg.width, cfg.height), cfg.detector);
            drive(&mut vis, &mut tracker, &mut app, &cfg.retry)?
        }
        TrackerKind::Pipe { command } => {
            info!(command = ?command, mirror = cfg.mirror, "tracker: detector process");
            let mut tracker = PipeTracker::spawn(command, cfg.detector, cfg.mirror)?;
            let mut vis = Visualizer::new(WINDOW_TITLE, w, h, None)?;
            drive(&mut vis, &mut tracker, &mut app, &cfg.retry)?
        }
    };

    info!(frames, text = %app.text().as_str(), "shutting down");
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
