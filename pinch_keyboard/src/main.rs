//! pinch_keyboard: interactive entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pinch_keyboard::{run, AppConfig, DetectorConfig, RetryPolicy, TrackerKind};

#[derive(Parser, Debug)]
#[command(name = "pinch_keyboard", version, about = "Type by pinching over an on-screen keyboard")]
struct Cli {
    /// Window width (and simulated frame width)
    #[arg(long, default_value_t = 1280, value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// Window height (and simulated frame height)
    #[arg(long, default_value_t = 720, value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    /// External landmark detector command; without it the mouse simulates a hand
    #[arg(long, num_args = 1.., value_name = "CMD", allow_hyphen_values = true)]
    detector: Option<Vec<String>>,

    /// Maximum number of hands the detector reports
    #[arg(long, default_value_t = 2)]
    max_hands: usize,

    /// Show the camera feed unmirrored
    #[arg(long)]
    no_mirror: bool,

    /// Retries for a malformed detector record before giving up
    #[arg(long, default_value_t = 3)]
    retries: u32,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> AppConfig {
        let tracker = match self.detector {
            Some(command) => TrackerKind::Pipe { command },
            None          => TrackerKind::Simulated,
        };
        AppConfig {
            width:    self.width,
            height:   self.height,
            tracker,
            mirror:   !self.no_mirror,
            detector: DetectorConfig { max_hands: self.max_hands, ..DetectorConfig::default() },
            retry:    RetryPolicy { max_retries: self.retries, ..RetryPolicy::default() },
            ..AppConfig::default()
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "pinch_keyboard=debug,pinch_keys=debug"
    } else {
        "pinch_keyboard=info,pinch_keys=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .init();

    let cfg = cli.into_config();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║         Pinch Keyboard :: touchless virtual keyboard         ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    match &cfg.tracker {
        TrackerKind::Simulated => {
            println!("  Mode: Mouse simulation  (use --detector CMD… for a camera)");
            println!("    move = fingertip   left button = pinch   right button = second hand");
        }
        TrackerKind::Pipe { command } => println!("  Mode: Detector  `{}`", command.join(" ")),
    }
    println!("  ESC or close the window to quit.");
    println!();

    if let Err(e) = run(cfg) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_app_config() {
        let cfg = Cli::parse_from(["pinch_keyboard"]).into_config();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn detector_command_selects_pipe() {
        let cfg = Cli::parse_from(["pinch_keyboard", "--no-mirror", "--detector", "python3", "hands.py"])
            .into_config();
        assert!(!cfg.mirror);
        assert_eq!(
            cfg.tracker,
            TrackerKind::Pipe { command: vec!["python3".into(), "hands.py".into()] },
        );
    }

    #[test]
    fn zero_width_rejected() {
        assert!(Cli::try_parse_from(["pinch_keyboard", "--width", "0"]).is_err());
    }
}
