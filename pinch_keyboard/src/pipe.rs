//! Landmarks from an external detector process.
//!
//! The child process owns the camera and the hand landmark model (typically a
//! MediaPipe script).  It receives the [`DetectorConfig`] as command-line
//! flags and writes one JSON record per captured frame to stdout:
//!
//! ```text
//! {"width":1280,"height":720,"rgb":false,
//!  "hands":[{"score":0.93,"landmarks":[{"x":0.41,"y":0.62}, … 21 points]}]}
//! ```
//!
//! When `rgb` is true the line is followed by exactly `width × height × 3`
//! raw RGB bytes, row-major.  End of stdout is end of stream.  Coordinates are
//! in raw camera space; with mirroring on, both the image and the landmarks
//! are flipped so the user sees themselves as in a mirror.

use std::io::{self, BufRead, BufReader, Read};
use std::process::{Child, ChildStdout, Command, Stdio};

use serde::Deserialize;
use tracing::{info, warn};

use pinch_keys::{HandObservation, NormPoint};

use crate::error::CaptureError;
use crate::tracker::{DetectorConfig, Frame, FrameSource, HandDetector};

/// Largest frame a record may announce (8K UHD).
pub const MAX_FRAME_PIXELS: usize = 7680 * 4320;

#[derive(Deserialize, Debug)]
struct LandmarkJson {
    x: f32,
    y: f32,
}

#[derive(Deserialize, Debug)]
struct HandJson {
    #[serde(default)]
    score:     Option<f32>,
    landmarks: Vec<LandmarkJson>,
}

#[derive(Deserialize, Debug)]
struct FrameJson {
    width:  u32,
    height: u32,
    #[serde(default)]
    rgb:    bool,
    #[serde(default)]
    hands:  Vec<HandJson>,
    #[serde(default)]
    error:  Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// LandmarkStream
// ════════════════════════════════════════════════════════════════════════════

/// Reads detector records from any buffered reader.
///
/// Hands parsed while reading a frame are held until the next
/// [`HandDetector::detect`] call.
pub struct LandmarkStream<R> {
    reader:  R,
    config:  DetectorConfig,
    mirror:  bool,
    line:    Vec<u8>,
    pending: Vec<HandObservation>,
    child:   Option<Child>,
}

/// A [`LandmarkStream`] attached to a spawned detector process.
pub type PipeTracker = LandmarkStream<BufReader<ChildStdout>>;

impl PipeTracker {
    /// Start `command[0]` with `command[1..]` followed by the detector flags.
    pub fn spawn(command: &[String], config: DetectorConfig, mirror: bool) -> Result<Self, CaptureError> {
        let (program, args) = command
            .split_first()
            .ok_or(CaptureError::EmptyCommand)?;

        let mut child = Command::new(program)
            .args(args)
            .args(config.to_args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| CaptureError::Spawn { program: program.clone(), source })?;

        let stdout = child.stdout.take().ok_or_else(|| {
            CaptureError::Io(io::Error::new(io::ErrorKind::BrokenPipe, "detector stdout unavailable"))
        })?;

        info!(program = %program, pid = child.id(), "detector process started");

        let mut stream = LandmarkStream::from_reader(BufReader::new(stdout), config, mirror);
        stream.child = Some(child);
        Ok(stream)
    }
}

impl<R: BufRead> LandmarkStream<R> {
    pub fn from_reader(reader: R, config: DetectorConfig, mirror: bool) -> Self {
        LandmarkStream {
            reader,
            config,
            mirror,
            line: Vec::new(),
            pending: Vec::new(),
            child: None,
        }
    }

    /// Read the raw RGB payload of `pixels` pixels that follows a record.
    fn read_rgb(&mut self, pixels: usize) -> Result<Vec<u32>, CaptureError> {
        let mut raw = vec![0u8; pixels * 3];
        self.reader.read_exact(&mut raw).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => CaptureError::EndOfStream,
            _                            => CaptureError::Io(e),
        })?;
        Ok(raw
            .chunks_exact(3)
            .map(|p| 0xFF000000 | (p[0] as u32) << 16 | (p[1] as u32) << 8 | p[2] as u32)
            .collect())
    }

    fn collect_hands(&self, hands: Vec<HandJson>) -> Vec<HandObservation> {
        let mut out = Vec::with_capacity(hands.len().min(self.config.max_hands));
        for hand in hands {
            if out.len() == self.config.max_hands {
                break;
            }
            if hand.score.is_some_and(|s| s < self.config.min_detection_confidence) {
                continue;
            }
            let points: Vec<NormPoint> = hand.landmarks.iter().map(|l| NormPoint::new(l.x, l.y)).collect();
            match HandObservation::from_slice(&points) {
                Some(obs) if self.mirror => out.push(obs.mirrored()),
                Some(obs)                => out.push(obs),
                None => warn!(count = points.len(), "dropping hand with unexpected landmark count"),
            }
        }
        out
    }
}

impl<R: BufRead> FrameSource for LandmarkStream<R> {
    fn read_frame(&mut self) -> Result<Frame, CaptureError> {
        self.line.clear();
        if self.reader.read_until(b'\n', &mut self.line)? == 0 {
            return Err(CaptureError::EndOfStream);
        }

        // Bytes, not str: invalid UTF-8 is a bad record like any other.
        let record: FrameJson = serde_json::from_slice(&self.line)?;
        let area = (record.width as usize)
            .checked_mul(record.height as usize)
            .filter(|&n| n > 0 && n <= MAX_FRAME_PIXELS)
            .ok_or_else(|| {
                CaptureError::Malformed(format!("bad frame size {}x{}", record.width, record.height))
            })?;

        // The payload is consumed even for an error record so the next line
        // starts on a record boundary.
        let pixels = if record.rgb { Some(self.read_rgb(area)?) } else { None };
        if let Some(err) = record.error {
            return Err(CaptureError::Malformed(format!("detector reported: {}", err)));
        }

        let mut frame = Frame { width: record.width, height: record.height, pixels };
        if self.mirror {
            frame.mirror_horizontal();
        }
        self.pending = self.collect_hands(record.hands);
        Ok(frame)
    }
}

impl<R: BufRead> HandDetector for LandmarkStream<R> {
    fn detect(&mut self, _frame: &Frame) -> Vec<HandObservation> {
        std::mem::take(&mut self.pending)
    }
}

impl<R> Drop for LandmarkStream<R> {
    fn drop(&mut self) {
        if let Some(child) = self.child.as_mut() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
