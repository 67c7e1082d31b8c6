//! Detector records in, typed text out: the whole pipeline without a window.

use std::io::Cursor;

use pinch_keyboard::app::{drive, App, RetryPolicy};
use pinch_keyboard::canvas::Canvas;
use pinch_keyboard::pipe::LandmarkStream;
use pinch_keyboard::visualizer::Surface;
use pinch_keyboard::{AppResult, DetectorConfig};
use pinch_keys::PINCH_THRESHOLD;
use std::time::Duration;

struct Headless {
    canvas:    Canvas,
    presented: usize,
}

impl Surface for Headless {
    fn is_open(&self) -> bool { true }
    fn poll_input(&mut self) -> bool { true }
    fn canvas_mut(&mut self) -> &mut Canvas { &mut self.canvas }
    fn present(&mut self) -> AppResult<()> {
        self.presented += 1;
        Ok(())
    }
}

/// One JSON record with a single hand: index tip at `tip`, thumb on it when
/// pinching, every other landmark at the wrist.
fn record(tip: (f32, f32), pinch: bool) -> String {
    let thumb = if pinch { tip } else { (tip.0 - 0.06, tip.1 + 0.05) };
    let pts: Vec<String> = (0..21)
        .map(|i| {
            let (x, y) = match i {
                4 => thumb,
                8 => tip,
                _ => (0.5, 0.9),
            };
            format!(r#"{{"x":{},"y":{}}}"#, x, y)
        })
        .collect();
    format!(r#"{{"width":1280,"height":720,"hands":[{{"score":0.95,"landmarks":[{}]}}]}}"#, pts.join(","))
}

/// Normalized centre of a key on a 1280×720 frame.
fn centre(x: i32, y: i32) -> (f32, f32) {
    ((x + 35) as f32 / 1280.0, (y + 35) as f32 / 720.0)
}

fn run_lines(lines: &[String]) -> (App, Headless, u64) {
    let input = lines.iter().map(|l| format!("{}\n", l)).collect::<String>().into_bytes();
    let mut tracker = LandmarkStream::from_reader(Cursor::new(input), DetectorConfig::default(), false);
    let mut surface = Headless { canvas: Canvas::new(1, 1), presented: 0 };
    let mut app = App::new(PINCH_THRESHOLD);
    let retry = RetryPolicy { max_retries: 3, initial_backoff: Duration::ZERO };
    let frames = drive(&mut surface, &mut tracker, &mut app, &retry).unwrap();
    (app, surface, frames)
}

#[test]
fn types_hi_then_deletes() {
    // H: row 1, col 5 → x = 172 + 35 + 5·85 = 632, y = 445
    // I: row 0, col 7 → x = 172 + 7·85 = 767,       y = 360
    // BACK follows P:  x = 172 + 10·85 = 1022,      y = 360
    let h = centre(632, 445);
    let i = centre(767, 360);
    let back = (1022.0 / 1280.0 + 0.05, 395.0 / 720.0);

    let lines = vec![
        record(h, false),
        record(h, true),
        record(h, true),
        record(h, false),
        record(i, true),
        record(i, false),
        record(back, true),
    ];
    let (app, surface, frames) = run_lines(&lines);

    assert_eq!(frames, 7);
    assert_eq!(surface.presented, 7);
    assert_eq!(app.text().as_str(), "H");
    assert_eq!((surface.canvas.width(), surface.canvas.height()), (1280, 720));
}

#[test]
fn garbage_lines_are_skipped() {
    let q = centre(172, 360);
    let lines = vec![
        "{not json".to_string(),
        record(q, true),
    ];
    let (app, _, frames) = run_lines(&lines);
    assert_eq!(frames, 1);
    assert_eq!(app.text().as_str(), "Q");
}
