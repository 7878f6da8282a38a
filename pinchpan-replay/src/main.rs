use anyhow::{Context, Result};
use clap::Parser;
use pinchpan_camera::{CameraController, ControllerConfig, SimpleCamera};
use std::path::{Path, PathBuf};
use tracing::info;

mod replay;
mod script;

use script::Script;

/// Field of view used for `--perspective` runs.
const PERSPECTIVE_FIELD_OF_VIEW: f32 = 60.0;

#[derive(Parser, Debug)]
#[command(name = "pinchpan-replay")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Replay script (TOML, one [[frames]] table per frame)
    #[arg(value_name = "SCRIPT")]
    script: PathBuf,

    /// Controller configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Simulated window width
    #[arg(long, default_value_t = 1024)]
    width: u32,

    /// Simulated window height
    #[arg(long, default_value_t = 768)]
    height: u32,

    /// Use a perspective camera instead of an orthographic one
    #[arg(long)]
    perspective: bool,

    /// Verbose logging level (repeat for more verbosity: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(level: u8) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = match level {
        0 => EnvFilter::new("info"),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}

fn load_config(path: Option<&Path>) -> Result<ControllerConfig> {
    let Some(path) = path else {
        return Ok(ControllerConfig::default());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = ControllerConfig::from_toml_str(&content)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

fn camera_for(args: &Args, config: &ControllerConfig) -> SimpleCamera {
    if args.perspective {
        SimpleCamera::perspective(args.width, args.height, PERSPECTIVE_FIELD_OF_VIEW)
    } else {
        SimpleCamera::orthographic(args.width, args.height, config.default_zoom)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose);

    let config = load_config(args.config.as_deref())?;
    let script = Script::load(&args.script)?;

    let camera = camera_for(&args, &config);
    let mut controller = CameraController::builder(camera)
        .config(config)
        .touch_supported(true)
        .build()
        .context("Failed to create camera controller")?;
    info!("Replaying with {} input", controller.input_mode());

    replay::attach_logging(controller.listeners_mut());
    let counts = replay::run(&mut controller, &script);

    info!("Events: {}", counts);
    println!("{}", controller.viewport());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["pinchpan-replay", "demo.toml"]);
        assert_eq!(args.script, PathBuf::from("demo.toml"));
        assert_eq!(args.width, 1024);
        assert_eq!(args.height, 768);
        assert!(!args.perspective);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_args_verbose_count() {
        let args = Args::parse_from(["pinchpan-replay", "-vv", "--perspective", "demo.toml"]);
        assert_eq!(args.verbose, 2);
        assert!(args.perspective);
    }

    #[test]
    fn test_camera_for_projection() {
        let config = ControllerConfig::default();
        let args = Args::parse_from(["pinchpan-replay", "--width", "800", "demo.toml"]);
        let camera = camera_for(&args, &config);
        assert_eq!(camera.orthographic_size(), config.default_zoom);

        let args = Args::parse_from(["pinchpan-replay", "--perspective", "demo.toml"]);
        let camera = camera_for(&args, &config);
        assert_eq!(camera.field_of_view(), PERSPECTIVE_FIELD_OF_VIEW);
    }

    #[test]
    fn test_load_config_missing_file() {
        assert!(load_config(Some(Path::new("/nonexistent/pinchpan.toml"))).is_err());
        assert_eq!(load_config(None).unwrap(), ControllerConfig::default());
    }
}
