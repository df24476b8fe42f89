use circledet::io::load_gray_image;
use circledet::{CandidatePoint, Detector, DetectorConfig, Strategy};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "CircleDet CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
enum StrategyConfig {
    SingleScale,
    #[default]
    MultiScale,
}

impl From<StrategyConfig> for Strategy {
    fn from(value: StrategyConfig) -> Self {
        match value {
            StrategyConfig::SingleScale => Strategy::SingleScale,
            StrategyConfig::MultiScale => Strategy::MultiScale,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct DetectorConfigJson {
    strategy: StrategyConfig,
    radius_min: Option<usize>,
    radius_max: Option<usize>,
    threshold_coef: f32,
    score_cutoff: f32,
    downscale_bands: usize,
    neighbor_distance: usize,
    parallel: bool,
}

impl Default for DetectorConfigJson {
    fn default() -> Self {
        let cfg = DetectorConfig::default();
        Self {
            strategy: StrategyConfig::default(),
            radius_min: cfg.radius_min,
            radius_max: cfg.radius_max,
            threshold_coef: cfg.threshold_coef,
            score_cutoff: cfg.score_cutoff,
            downscale_bands: cfg.downscale_bands,
            neighbor_distance: cfg.neighbor_distance,
            parallel: cfg.parallel,
        }
    }
}

impl From<DetectorConfigJson> for DetectorConfig {
    fn from(value: DetectorConfigJson) -> Self {
        Self {
            strategy: value.strategy.into(),
            radius_min: value.radius_min,
            radius_max: value.radius_max,
            threshold_coef: value.threshold_coef,
            score_cutoff: value.score_cutoff,
            downscale_bands: value.downscale_bands,
            neighbor_distance: value.neighbor_distance,
            parallel: value.parallel,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct Config {
    image_path: String,
    output_path: Option<String>,
    render_path: Option<String>,
    detector: DetectorConfigJson,
}

#[derive(Debug, Serialize)]
struct CircleRecord {
    row: usize,
    col: usize,
    radius: usize,
    score: f32,
}

impl From<CandidatePoint> for CircleRecord {
    fn from(value: CandidatePoint) -> Self {
        Self {
            row: value.row,
            col: value.col,
            radius: value.radius,
            score: value.score,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    candidates: usize,
    circles: Vec<CircleRecord>,
    elapsed_ms: u128,
}

/// Midpoint circle rasterization, clipped to the image bounds.
fn draw_circle_outline(img: &mut image::RgbaImage, cx: i64, cy: i64, radius: i64) {
    const COLOR: image::Rgba<u8> = image::Rgba([255, 0, 0, 255]);
    let mut x = radius;
    let mut y = 0i64;
    let mut err = 1 - radius;
    while x >= y {
        let octants = [
            (cx + x, cy + y),
            (cx - x, cy + y),
            (cx + x, cy - y),
            (cx - x, cy - y),
            (cx + y, cy + x),
            (cx - y, cy + x),
            (cx + y, cy - x),
            (cx - y, cy - x),
        ];
        for (px, py) in octants {
            if px >= 0 && py >= 0 && (px as u32) < img.width() && (py as u32) < img.height() {
                img.put_pixel(px as u32, py as u32, COLOR);
            }
        }
        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

fn render_overlay(
    source: &image::DynamicImage,
    circles: &[CandidatePoint],
    path: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut canvas = source.to_rgba8();
    for circle in circles {
        draw_circle_outline(
            &mut canvas,
            circle.col as i64,
            circle.row as i64,
            circle.radius as i64,
        );
    }
    canvas.save(path)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("circledet=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.image_path.is_empty() {
        return Err("image_path must be set in the config".into());
    }

    let gray = load_gray_image(&config.image_path)?;
    let detector_config: DetectorConfig = config.detector.into();
    let detector = Detector::new().with_config(detector_config);

    let start = Instant::now();
    let candidates = detector.detect_candidates(gray.view())?;
    let circles = if candidates.is_empty() {
        Vec::new()
    } else {
        circledet::select_above_cutoff(&candidates, detector_config.score_cutoff)?
    };
    let elapsed_ms = start.elapsed().as_millis();
    tracing::info!(
        circles = circles.len(),
        candidates = candidates.len(),
        elapsed_ms,
        "detection done"
    );

    if let Some(render_path) = &config.render_path {
        // Re-open the original so color and alpha survive in the overlay.
        let source = image::open(&config.image_path)?;
        render_overlay(&source, &circles, render_path)?;
    }

    let output = Output {
        candidates: candidates.len(),
        circles: circles.into_iter().map(CircleRecord::from).collect(),
        elapsed_ms,
    };
    let json = serde_json::to_string_pretty(&output)?;
    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
