use clap::Parser;
use humatch::io::{load_bgr_image, save_grid};
use humatch::{
    overlay_detections, show_rois, AcceptanceRange, BoundingBox, Detector, DetectorConfig,
    HsvBounds, ShapeTemplate,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Humatch shape detector CLI (JSON config driven)")]
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

#[derive(Debug, Deserialize)]
#[serde(default)]
struct TemplateJson {
    m6: [f64; 2],
    m7: [f64; 2],
    area_ratio: [f64; 2],
}

impl Default for TemplateJson {
    fn default() -> Self {
        let tpl = ShapeTemplate::default();
        Self {
            m6: [tpl.m6.low, tpl.m6.high],
            m7: [tpl.m7.low, tpl.m7.high],
            area_ratio: [tpl.area_ratio.low, tpl.area_ratio.high],
        }
    }
}

impl TemplateJson {
    fn to_template(&self) -> humatch::HumatchResult<ShapeTemplate> {
        Ok(ShapeTemplate {
            m6: AcceptanceRange::new(self.m6[0], self.m6[1])?,
            m7: AcceptanceRange::new(self.m7[0], self.m7[1])?,
            area_ratio: AcceptanceRange::new(self.area_ratio[0], self.area_ratio[1])?,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct DetectorConfigJson {
    scale_percent: f64,
    hsv_lower: [u8; 3],
    hsv_upper: [u8; 3],
    morphology_size: usize,
    morphology_value: u8,
    min_width: usize,
    min_height: usize,
    max_width: Option<usize>,
    max_height: Option<usize>,
    parallel: bool,
    template: TemplateJson,
}

impl Default for DetectorConfigJson {
    fn default() -> Self {
        let cfg = DetectorConfig::default();
        Self {
            scale_percent: cfg.scale_percent,
            hsv_lower: cfg.hsv.lower,
            hsv_upper: cfg.hsv.upper,
            morphology_size: cfg.morphology_size,
            morphology_value: cfg.morphology_value,
            min_width: cfg.min_width,
            min_height: cfg.min_height,
            max_width: cfg.max_width,
            max_height: cfg.max_height,
            parallel: cfg.parallel,
            template: TemplateJson::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    image_path: String,
    output_path: Option<String>,
    candidates_path: Option<String>,
    report_path: Option<String>,
    detector: DetectorConfigJson,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_path: String::new(),
            output_path: None,
            candidates_path: None,
            report_path: None,
            detector: DetectorConfigJson::default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct BoxRecord {
    x1: usize,
    y1: usize,
    x2: usize,
    y2: usize,
}

impl From<BoundingBox> for BoxRecord {
    fn from(value: BoundingBox) -> Self {
        Self {
            x1: value.x1,
            y1: value.y1,
            x2: value.x2,
            y2: value.y2,
        }
    }
}

#[derive(Debug, Serialize)]
struct Report {
    image_width: usize,
    image_height: usize,
    working_width: usize,
    working_height: usize,
    candidates: Vec<BoxRecord>,
    confirmed: Vec<BoxRecord>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("humatch=info".parse()?))
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

    let d = &config.detector;
    let detector = Detector::new().with_config(DetectorConfig {
        scale_percent: d.scale_percent,
        hsv: HsvBounds::new(d.hsv_lower, d.hsv_upper),
        morphology_size: d.morphology_size,
        morphology_value: d.morphology_value,
        min_width: d.min_width,
        min_height: d.min_height,
        max_width: d.max_width,
        max_height: d.max_height,
        template: d.template.to_template()?,
        parallel: d.parallel,
    });
    detector.config().validate()?;

    let image = load_bgr_image(&config.image_path)?;
    let detection = detector.detect(&image)?;

    if let Some(path) = &config.candidates_path {
        let rois = show_rois(&detection.mask, &detection.candidates)?;
        save_grid(&rois, path)?;
        tracing::info!(path = path.as_str(), "wrote candidate overlay");
    }
    if let Some(path) = &config.output_path {
        let annotated = overlay_detections(&image, &detection.confirmed_original)?;
        save_grid(&annotated, path)?;
        tracing::info!(path = path.as_str(), "wrote detection overlay");
    }

    let report = Report {
        image_width: image.width(),
        image_height: image.height(),
        working_width: detection.mask.width(),
        working_height: detection.mask.height(),
        candidates: detection.candidates.into_iter().map(BoxRecord::from).collect(),
        confirmed: detection
            .confirmed_original
            .into_iter()
            .map(BoxRecord::from)
            .collect(),
    };
    let json = serde_json::to_string_pretty(&report)?;

    match config.report_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
