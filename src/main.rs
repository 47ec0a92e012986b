// ./src/main.rs
use anyhow::{Context, Result, bail};
use clap::Parser;
use std::{fs, path::PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;
use wildlife_heatmap::{
    AppConfig, HeatmapPipeline, HeatmapRequest,
    debug::visualization::SvgDump,
    heatmap::to_feature_collection,
    math::probability::ProbabilityShape,
    regions::{BoundsResolver, LookupTable, PresenceTable, RegionKey, Species, TimeOfDay},
};

/// Builds a wildlife appearance heatmap for one region and writes it out.
#[derive(Parser, Debug)]
#[command(version, about)]
struct ClArgs {
    /// Prefecture, e.g. 東京都
    #[arg(short, long, default_value = "東京都")]
    prefecture: String,

    /// Hokkaido sub-region (道南, 道央, 道北, 道東)
    #[arg(long)]
    hokkaido_part: Option<String>,

    /// Species: 熊, 鹿, 猪 (or bear, deer, boar)
    #[arg(short, long, default_value = "熊")]
    species: String,

    /// Base date, e.g. 2025-09-09
    #[arg(short, long)]
    date: String,

    /// 午前/AM/morning, anything else is afternoon
    #[arg(short, long, default_value = "午前")]
    time_of_day: String,

    /// Forecast days ahead (1..=30)
    #[arg(long)]
    horizon_days: Option<i64>,

    /// Cell edge in kilometers (at least 0.1)
    #[arg(long)]
    km_step: Option<f64>,

    #[arg(long)]
    padding_km: Option<f64>,

    #[arg(long)]
    min_probability: Option<f64>,

    #[arg(long)]
    opacity: Option<f64>,

    /// Use uniform instead of squared probabilities
    #[arg(long)]
    uniform: bool,

    /// JSON config file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON table of bounding boxes, `{"東京都": [min_lon, min_lat, max_lon, max_lat]}`
    #[arg(long)]
    bboxes: Option<PathBuf>,

    /// JSON table of presence flags, `{"東京都": {"熊": false}}`
    #[arg(long)]
    presence: Option<PathBuf>,

    /// GeoJSON output path
    #[arg(short = 'o', long = "output", default_value = "heatmap.geojson")]
    output: PathBuf,

    /// Optional SVG debug dump
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Also draw cells below the threshold in the SVG dump
    #[arg(long)]
    svg_all_cells: bool,
}

impl ClArgs {
    fn app_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                AppConfig::from_json_str(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => AppConfig::default(),
        };
        if let Some(km_step) = self.km_step {
            config.mesh.km_step = km_step;
        }
        if let Some(padding_km) = self.padding_km {
            config.mesh.padding_km = padding_km;
        }
        if let Some(min_probability) = self.min_probability {
            config.display.min_probability = min_probability;
        }
        if let Some(opacity) = self.opacity {
            config.display.opacity = opacity;
        }
        if let Some(horizon_days) = self.horizon_days {
            config.horizon_days = horizon_days;
        }
        if self.uniform {
            config.shape = ProbabilityShape::Uniform;
        }
        config.display = config.display.clamped();
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = ClArgs::parse();
    let config = args.app_config()?;

    let bounds = match &args.bboxes {
        Some(path) => BoundsResolver::new(
            LookupTable::from_path(path).with_context(|| format!("loading bounding boxes {}", path.display()))?,
        ),
        None => BoundsResolver::default(),
    };
    let presence = match &args.presence {
        Some(path) => PresenceTable::new(
            LookupTable::from_path(path).with_context(|| format!("loading presence table {}", path.display()))?,
        ),
        None => PresenceTable::default(),
    };

    let species: Species = args.species.parse()?;
    if args.date.trim().is_empty() {
        bail!("date must not be empty");
    }
    let request = HeatmapRequest::new(
        RegionKey::new(args.prefecture.as_str(), args.hokkaido_part.as_deref()),
        species,
        args.date.trim(),
        TimeOfDay::normalize(&args.time_of_day),
    );

    let mut pipeline = HeatmapPipeline::new(config)
        .with_bounds(bounds)
        .with_presence(presence);
    let layer = pipeline.run(&request)?;

    let collection = to_feature_collection(&layer.cells);
    let json = serde_json::to_string(&collection)?;
    fs::write(&args.output, json).with_context(|| format!("writing {}", args.output.display()))?;
    info!(
        "Wrote {} cells ({} shown) for {} to {}{}",
        layer.cells.len(),
        layer.included_count(),
        layer.region.label(),
        args.output.display(),
        if layer.species_present { "" } else { " (species not recorded here)" }
    );

    if let Some(path) = &args.svg {
        SvgDump::new()
            .with_grid_outline_width(layer.display.grid_outline_width)
            .with_draw_excluded(args.svg_all_cells)
            .save(path, &layer.cells, &layer.bounds)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    Ok(())
}
