//! # pinch_keys
//!
//! The input core of a touchless virtual keyboard: a fingertip hovers over a
//! key, a thumb-to-index pinch presses it.
//!
//! | Module | Role |
//! |---|---|
//! | [`layout`] | Key geometry for a viewport size |
//! | [`hit`] | Pixel → key lookup |
//! | [`gesture`] | Hand landmarks and the pinch classifier |
//! | [`geometry`] | Normalized ↔ pixel coordinates |
//! | [`interaction`] | Debounced press state machine |
//! | [`text`] | Committed text + SPACE flash timestamp |
//!
//! Nothing here performs I/O and nothing here can fail.  Camera capture,
//! landmark detection and drawing belong to the caller.
//!
//! ## Quick start
//!
//! ```rust
//! use std::time::Instant;
//! use pinch_keys::{build_layout, process_frame, HandObservation, InteractionState,
//!                  KeyId, NormPoint, TextBuffer, PINCH_THRESHOLD};
//!
//! let layout = build_layout(1280, 720);
//! let mut state = InteractionState::new();
//! let mut text  = TextBuffer::new();
//!
//! // Index fingertip over the centre of Q, thumb touching it.
//! let q = NormPoint::new(207.0 / 1280.0, 395.0 / 720.0);
//! let hand = HandObservation::from_tips(q, q);
//!
//! process_frame(&mut state, &mut text, &layout, [&hand], PINCH_THRESHOLD, Instant::now());
//! assert_eq!(text.as_str(), "Q");
//! assert_eq!(state.pressed_key(), Some(KeyId::Letter('Q')));
//! ```

pub mod geometry;
pub mod layout;
pub mod hit;
pub mod gesture;
pub mod interaction;
pub mod text;

pub use geometry::{to_pixel, NormPoint, PixelPoint, Rect, Viewport};
pub use layout::{build_layout, Key, KeyId, Layout};
pub use hit::key_at;
pub use gesture::{is_pinching, HandObservation, PINCH_THRESHOLD};
pub use interaction::{process_frame, InteractionState, KeyPress};
pub use text::{TextBuffer, SPACE_FLASH};
