use clap::Parser;
use detpost::{
    DetectionResult, LabelSet, PostConfig, PostProcessor, SuppressionScope, TensorView,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Detpost CLI (JSON config driven)")]
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
    /// Enable tracing output for pipeline instrumentation.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ScopeConfig {
    Global,
    PerClass,
}

impl From<ScopeConfig> for SuppressionScope {
    fn from(value: ScopeConfig) -> Self {
        match value {
            ScopeConfig::Global => SuppressionScope::Global,
            ScopeConfig::PerClass => SuppressionScope::PerClass,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct PostConfigJson {
    confidence_threshold: f32,
    iou_threshold: f32,
    scope: ScopeConfig,
    parallel: bool,
}

impl Default for PostConfigJson {
    fn default() -> Self {
        let cfg = PostConfig::default();
        Self {
            confidence_threshold: cfg.confidence_threshold,
            iou_threshold: cfg.iou_threshold,
            scope: ScopeConfig::Global,
            parallel: cfg.parallel,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    coordinates_path: String,
    confidence_path: String,
    labels: String,
    output_path: Option<String>,
    post: PostConfigJson,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            coordinates_path: String::new(),
            confidence_path: String::new(),
            labels: String::new(),
            output_path: None,
            post: PostConfigJson::default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct DetectionRecord {
    label: String,
    confidence: f32,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl From<detpost::Detection> for DetectionRecord {
    fn from(value: detpost::Detection) -> Self {
        Self {
            label: value.label,
            confidence: value.confidence,
            x: value.rect.x,
            y: value.rect.y,
            width: value.rect.width,
            height: value.rect.height,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    top: Option<DetectionRecord>,
    detections: Vec<DetectionRecord>,
}

impl From<DetectionResult> for Output {
    fn from(value: DetectionResult) -> Self {
        Self {
            top: value.top.map(DetectionRecord::from),
            detections: value.detections.into_iter().map(Into::into).collect(),
        }
    }
}

/// Flat row-major tensor loaded from a JSON file of nested arrays.
struct LoadedTensor {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

/// Loads `[[f64; cols]; rows]` from `path`.
///
/// `empty_cols` supplies the column count when the file holds zero rows,
/// since nothing else pins the shape then.
fn load_tensor(path: &str, empty_cols: usize) -> Result<LoadedTensor, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)?;
    let nested: Vec<Vec<f64>> = serde_json::from_str(&text)?;

    let rows = nested.len();
    let cols = match nested.first() {
        Some(row) => row.len(),
        None => empty_cols,
    };
    let mut data = Vec::with_capacity(rows * cols);
    for (idx, row) in nested.into_iter().enumerate() {
        if row.len() != cols {
            return Err(format!(
                "{path}: row {idx} has {} values, expected {cols}",
                row.len()
            )
            .into());
        }
        data.extend(row);
    }

    Ok(LoadedTensor { data, rows, cols })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("detpost=info".parse()?))
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
    if config.coordinates_path.is_empty() || config.confidence_path.is_empty() {
        return Err("coordinates_path and confidence_path must be set in the config".into());
    }

    let coordinates = load_tensor(&config.coordinates_path, 4)?;
    let confidence = load_tensor(&config.confidence_path, 0)?;
    let coordinates_view =
        TensorView::from_slice(&coordinates.data, coordinates.rows, coordinates.cols)?;
    let confidence_view =
        TensorView::from_slice(&confidence.data, confidence.rows, confidence.cols)?;

    let labels = LabelSet::from_comma_separated(&config.labels);
    let processor = PostProcessor::new(labels).with_config(PostConfig {
        confidence_threshold: config.post.confidence_threshold,
        iou_threshold: config.post.iou_threshold,
        scope: config.post.scope.into(),
        parallel: config.post.parallel,
    });

    let result = processor.process(coordinates_view, confidence_view)?;
    let output = Output::from(result);
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
