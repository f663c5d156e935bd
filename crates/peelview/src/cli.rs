use std::path::PathBuf;

use clap::Parser;
use renderer::{Antialiasing, DEFAULT_PRESS_SECONDS, DEFAULT_SUBDIVISIONS};

#[derive(Parser, Debug)]
#[command(
    name = "peelview",
    author,
    version,
    about = "Press-to-peel image viewer rendered on a GPU-deformed surface"
)]
pub struct Cli {
    /// Image to map onto the surface (png, jpeg, bmp, or gif).
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    /// Window size in physical pixels (e.g. `1280x720`).
    #[arg(
        long,
        value_name = "WIDTHxHEIGHT",
        value_parser = parse_dimensions,
        default_value = "1280x720"
    )]
    pub size: (u32, u32),

    /// Grid cells along each axis of the deformable plane.
    #[arg(
        long,
        value_name = "CELLS",
        value_parser = parse_subdivisions,
        default_value_t = DEFAULT_SUBDIVISIONS
    )]
    pub subdivisions: u32,

    /// Press/release transition length in seconds (0 snaps instantly).
    #[arg(
        long,
        value_name = "SECONDS",
        value_parser = parse_press_duration,
        default_value_t = DEFAULT_PRESS_SECONDS
    )]
    pub press_duration: f32,

    /// Render interpolated uv coordinates instead of the image.
    #[arg(long)]
    pub debug_uv: bool,

    /// Anti-aliasing policy: `auto`, `off`, or an explicit MSAA sample count (e.g. `4`).
    #[arg(
        long,
        value_name = "MODE",
        value_parser = parse_antialias,
        default_value = "auto"
    )]
    pub antialias: Antialiasing,

    /// Optional FPS cap for continuous rendering (0=uncapped).
    #[arg(long, value_name = "FPS")]
    pub fps: Option<f32>,

    /// Freeze the ripple clock instead of animating continuously.
    #[arg(long)]
    pub still: bool,

    /// Timestamp (seconds) to freeze the ripple clock at; ignored unless `--still` is set.
    #[arg(long, value_name = "SECONDS")]
    pub still_time: Option<f32>,

    /// Window title.
    #[arg(long, value_name = "TITLE")]
    pub title: Option<String>,
}

pub fn parse() -> Cli {
    Cli::parse()
}

pub fn parse_antialias(value: &str) -> Result<Antialiasing, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("anti-alias mode must not be empty".to_string());
    }

    let normalized = trimmed.to_ascii_lowercase();
    match normalized.as_str() {
        "auto" | "max" | "default" => Ok(Antialiasing::Auto),
        "off" | "none" | "disable" | "disabled" | "0" => Ok(Antialiasing::Off),
        _ => {
            let samples: u32 = normalized.parse().map_err(|_| {
                format!("invalid anti-alias sample count '{trimmed}'; use auto/off or 2/4/8/16")
            })?;

            if samples == 0 || samples == 1 {
                return Ok(Antialiasing::Off);
            }

            if !matches!(samples, 2 | 4 | 8 | 16) {
                return Err(format!(
                    "unsupported sample count {samples}; supported values are 2, 4, 8, or 16"
                ));
            }

            Ok(Antialiasing::Samples(samples))
        }
    }
}

fn parse_dimensions(value: &str) -> Result<(u32, u32), String> {
    let (w, h) = value
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(|| "expected WIDTHxHEIGHT".to_string())?;
    let width = w
        .trim()
        .parse::<u32>()
        .map_err(|_| "invalid width in window dimensions".to_string())?;
    let height = h
        .trim()
        .parse::<u32>()
        .map_err(|_| "invalid height in window dimensions".to_string())?;
    if width == 0 || height == 0 {
        return Err("window dimensions must be greater than zero".into());
    }
    Ok((width, height))
}

fn parse_subdivisions(value: &str) -> Result<u32, String> {
    let cells: u32 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid cell count '{value}'"))?;
    if cells == 0 {
        return Err("the grid needs at least one cell along each axis".into());
    }
    Ok(cells)
}

fn parse_press_duration(value: &str) -> Result<f32, String> {
    let seconds: f32 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid duration '{value}'"))?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err("press duration must be a non-negative number of seconds".into());
    }
    Ok(seconds)
}
