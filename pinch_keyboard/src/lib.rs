//! # pinch_keyboard
//!
//! Touchless on-screen keyboard.  A hand detector reports 21 landmarks per
//! hand; the index fingertip hovers over keys and a thumb-to-index pinch
//! types the hovered key once per pinch.
//!
//! ## Trackers
//!
//! | Tracker | Source of hands |
//! |---|---|
//! | (default) simulation | The window's mouse: pointer = fingertip, left button = pinch, right button = second hand |
//! | `--detector CMD…` | External process (e.g. a MediaPipe script) writing one JSON record per frame |
//!
//! ## Modules
//!
//! | Module | Role |
//! |---|---|
//! | [`tracker`] | `FrameSource` / `HandDetector` seams, `SimTracker` |
//! | [`pipe`] | `PipeTracker`: detector process over stdout |
//! | [`canvas`] | Software framebuffer and 3×5 bitmap font |
//! | [`render`] | Keyboard, text, `[SPACE]` flash and hand overlay |
//! | [`visualizer`] | `minifb` window behind the `Surface` trait |
//! | [`app`] | Configuration, `App` state and the frame loop |
//!
//! ESC or closing the window exits.

pub mod error;
pub mod tracker;
pub mod pipe;
pub mod canvas;
pub mod render;
pub mod visualizer;
pub mod app;

pub use app::{run, App, AppConfig, FrameReport, RetryPolicy, TrackerKind};
pub use error::{AppError, AppResult, CaptureError};
pub use tracker::{DetectorConfig, Frame, FrameSource, HandDetector, SimInput, SimTracker, Tracker};
pub use pipe::PipeTracker;
