// src/pipeline.rs

use crate::{
    config::{AppConfig, DisplayConfig},
    heatmap::{RenderCell, assemble},
    math::{
        error::MathResult,
        geometry::mesh::{Mesh, MeshBuilder},
        probability::{ForecastKey, ProbabilityField, ProbabilitySynthesizer},
        scalar_field::FieldStats,
        types::GeoBounds,
    },
    regions::{BoundsResolver, CENTER_HALF_SIZE_DEG, JAPAN_CENTER, PresenceTable, RegionKey, Species, TimeOfDay},
};
use std::{collections::HashMap, sync::Arc};
use tracing::{debug, info, warn};

/// What the caller wants to see.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapRequest {
    pub region: RegionKey,
    pub species: Species,
    pub date: String,
    pub time_of_day: TimeOfDay,
}

impl HeatmapRequest {
    pub fn new(region: RegionKey, species: Species, date: impl Into<String>, time_of_day: TimeOfDay) -> Self {
        Self {
            region,
            species,
            date: date.into(),
            time_of_day,
        }
    }
}

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct HeatmapLayer {
    pub region: RegionKey,
    /// The box the mesh was actually built for
    pub bounds: GeoBounds,
    /// `true` if the default box replaced the region's own
    pub used_fallback: bool,
    /// Presence flag of the region/species pair. The layer is computed either way.
    pub species_present: bool,
    pub key: ForecastKey,
    pub mesh: Arc<Mesh>,
    pub field: ProbabilityField,
    pub cells: Vec<RenderCell>,
    pub display: DisplayConfig,
    pub stats: Option<FieldStats>,
}

impl HeatmapLayer {
    pub fn included_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.included).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct MeshCacheKey {
    bounds: [u64; 4],
    step: u64,
    padding: u64,
}

impl MeshCacheKey {
    fn new(bounds: &GeoBounds, builder: &MeshBuilder) -> Self {
        let config = builder.config();
        Self {
            bounds: bounds.to_array().map(f64::to_bits),
            step: config.effective_km_step().to_bits(),
            padding: config.padding_km.to_bits(),
        }
    }
}

/// Meshes kept by a pipeline before the cache is emptied.
pub const DEFAULT_MESH_CACHE_CAPACITY: usize = 16;

/// Resolve → mesh → synthesize → assemble, with meshes cached per box.
///
/// The cache holds at most `mesh_cache_capacity` meshes. Inserting into a
/// full cache drops all entries first; a capacity of 0 disables caching.
#[derive(Debug)]
pub struct HeatmapPipeline {
    config: AppConfig,
    bounds: BoundsResolver,
    presence: PresenceTable,
    mesh_cache: HashMap<MeshCacheKey, Arc<Mesh>>,
    mesh_cache_capacity: usize,
}

impl Default for HeatmapPipeline {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            bounds: BoundsResolver::default(),
            presence: PresenceTable::default(),
            mesh_cache: HashMap::new(),
            mesh_cache_capacity: DEFAULT_MESH_CACHE_CAPACITY,
        }
    }
}

impl HeatmapPipeline {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn with_bounds(mut self, bounds: BoundsResolver) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_presence(mut self, presence: PresenceTable) -> Self {
        self.presence = presence;
        self
    }

    pub fn with_mesh_cache_capacity(mut self, capacity: usize) -> Self {
        self.mesh_cache_capacity = capacity;
        self.mesh_cache.clear();
        self
    }

    pub fn clear_mesh_cache(&mut self) {
        self.mesh_cache.clear();
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn cached_meshes(&self) -> usize {
        self.mesh_cache.len()
    }

    /// Default box around the center of Japan
    pub fn default_bounds() -> MathResult<GeoBounds> {
        GeoBounds::around(JAPAN_CENTER, CENTER_HALF_SIZE_DEG)
    }

    pub fn run(&mut self, request: &HeatmapRequest) -> MathResult<HeatmapLayer> {
        self.config.mesh.validate()?;
        let display_config = self.config.display.clamped();

        let species_present = self.presence.is_present(&request.region, request.species);
        if !species_present {
            warn!(
                "No presence record for {} in {}; showing synthetic values anyway",
                request.species, request.region
            );
        }

        let builder = MeshBuilder::new(self.config.mesh);
        let (bounds, mesh, used_fallback) = match self.bounds.resolve(&request.region) {
            Some(bounds) => match self.mesh_for(&builder, bounds) {
                Ok(mesh) => (bounds, mesh, false),
                Err(err) if err.is_projection_error() => {
                    warn!("Mesh for {} failed ({}); using default box", request.region, err);
                    self.fallback_mesh(&builder)?
                }
                Err(err) => return Err(err),
            },
            None => {
                warn!("Unknown region {}; using default box", request.region);
                self.fallback_mesh(&builder)?
            }
        };

        let key = ForecastKey::new(
            request.region.table_key(),
            request.species.as_str(),
            request.date.as_str(),
            request.time_of_day.as_str(),
        )
        .with_horizon_days(self.config.horizon_days);

        let field = ProbabilitySynthesizer::new()
            .with_shape(self.config.shape)
            .synthesize(&mesh, &key);
        let cells = assemble(
            &field,
            &mesh,
            display_config.min_probability,
            display_config.opacity,
        )?;
        let stats = FieldStats::of(&field);

        if let Some(stats) = &stats {
            info!(
                "Heatmap {}: {} cells, {} shown, mean {:.3}, max {:.3}",
                key,
                stats.count,
                FieldStats::count_at_least(&field, display_config.min_probability),
                stats.mean,
                stats.max
            );
        }

        Ok(HeatmapLayer {
            region: request.region.clone(),
            bounds,
            used_fallback,
            species_present,
            key,
            mesh,
            field,
            cells,
            display: display_config,
            stats,
        })
    }

    fn fallback_mesh(&mut self, builder: &MeshBuilder) -> MathResult<(GeoBounds, Arc<Mesh>, bool)> {
        let bounds = Self::default_bounds()?;
        let mesh = self.mesh_for(builder, bounds)?;
        Ok((bounds, mesh, true))
    }

    fn mesh_for(&mut self, builder: &MeshBuilder, bounds: GeoBounds) -> MathResult<Arc<Mesh>> {
        let cache_key = MeshCacheKey::new(&bounds, builder);
        if let Some(mesh) = self.mesh_cache.get(&cache_key) {
            debug!("Mesh cache hit for {}", bounds);
            return Ok(Arc::clone(mesh));
        }
        let mesh = Arc::new(builder.build(&bounds)?);
        if self.mesh_cache_capacity == 0 {
            return Ok(mesh);
        }
        if self.mesh_cache.len() >= self.mesh_cache_capacity {
            debug!("Mesh cache full ({} entries), clearing", self.mesh_cache.len());
            self.mesh_cache.clear();
        }
        self.mesh_cache.insert(cache_key, Arc::clone(&mesh));
        Ok(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::LookupTable;

    fn request(region: RegionKey, time_of_day: TimeOfDay) -> HeatmapRequest {
        HeatmapRequest::new(region, Species::Bear, "2025-09-09", time_of_day)
    }

    fn small_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.mesh = config.mesh.with_km_step(10.0);
        config
    }

    #[test]
    fn test_run_and_cache() {
        let mut pipeline = HeatmapPipeline::new(small_config());
        let tokyo = RegionKey::prefecture("東京都");

        let morning = pipeline.run(&request(tokyo.clone(), TimeOfDay::Morning)).unwrap();
        assert!(!morning.used_fallback);
        assert!(morning.species_present);
        assert_eq!(morning.cells.len(), morning.mesh.len());
        assert_eq!(morning.key.region(), "東京都");
        assert_eq!(morning.key.time_of_day(), "午前");
        assert_eq!(pipeline.cached_meshes(), 1);

        let again = pipeline.run(&request(tokyo.clone(), TimeOfDay::Morning)).unwrap();
        assert!(Arc::ptr_eq(&morning.mesh, &again.mesh));
        assert_eq!(morning.field, again.field);

        let afternoon = pipeline.run(&request(tokyo, TimeOfDay::Afternoon)).unwrap();
        assert_eq!(pipeline.cached_meshes(), 1);
        assert_ne!(morning.field, afternoon.field);
    }

    #[test]
    fn test_mesh_cache_is_bounded() {
        let mut pipeline = HeatmapPipeline::new(small_config()).with_mesh_cache_capacity(2);
        for name in ["東京都", "千葉県", "埼玉県"] {
            pipeline
                .run(&request(RegionKey::prefecture(name), TimeOfDay::Morning))
                .unwrap();
            assert!(pipeline.cached_meshes() <= 2);
        }
        assert_eq!(pipeline.cached_meshes(), 1);

        let mut uncached = HeatmapPipeline::new(small_config()).with_mesh_cache_capacity(0);
        uncached
            .run(&request(RegionKey::prefecture("東京都"), TimeOfDay::Morning))
            .unwrap();
        assert_eq!(uncached.cached_meshes(), 0);

        pipeline.clear_mesh_cache();
        assert_eq!(pipeline.cached_meshes(), 0);
    }

    #[test]
    fn test_display_config_is_clamped_before_assembly() {
        let mut config = small_config();
        config.display = config.display.with_min_probability(1.7).with_opacity(0.0);
        let mut pipeline = HeatmapPipeline::new(config);
        let layer = pipeline
            .run(&request(RegionKey::prefecture("東京都"), TimeOfDay::Morning))
            .unwrap();
        assert_eq!(layer.display.min_probability, 1.0);
        assert_eq!(layer.display.opacity, crate::config::MIN_OPACITY);
        assert_eq!(
            layer.included_count(),
            FieldStats::count_at_least(&layer.field, 1.0)
        );
        assert!(layer.cells.iter().all(|c| c.included == (c.probability >= 1.0)));
    }

    #[test]
    fn test_display_changes_keep_field() {
        let mut pipeline = HeatmapPipeline::new(small_config());
        let tokyo = RegionKey::prefecture("東京都");
        let base = pipeline.run(&request(tokyo.clone(), TimeOfDay::Morning)).unwrap();

        let mut config = small_config();
        config.display = config.display.with_min_probability(0.5).with_opacity(0.4);
        let mut filtered_pipeline = HeatmapPipeline::new(config);
        let filtered = filtered_pipeline.run(&request(tokyo, TimeOfDay::Morning)).unwrap();

        assert_eq!(base.field, filtered.field);
        assert_eq!(filtered.display.opacity, 0.4);
        for cell in &filtered.cells {
            assert_eq!(cell.included, cell.probability >= 0.5);
        }
    }

    #[test]
    fn test_absent_species_still_computes() {
        let table = LookupTable::from_json_str(r#"{"沖縄県": {"熊": false}}"#).unwrap();
        let mut pipeline = HeatmapPipeline::new(small_config()).with_presence(PresenceTable::new(table));
        let layer = pipeline
            .run(&request(RegionKey::prefecture("沖縄県"), TimeOfDay::Morning))
            .unwrap();
        assert!(!layer.species_present);
        assert!(!layer.cells.is_empty());
    }

    #[test]
    fn test_fallbacks() {
        let table = LookupTable::from_json_str(r#"{"東京都": [10.0, 89.0, 11.0, 90.0]}"#).unwrap();
        let mut pipeline = HeatmapPipeline::new(small_config()).with_bounds(BoundsResolver::new(table));
        let expected = HeatmapPipeline::default_bounds().unwrap();

        let polar = pipeline
            .run(&request(RegionKey::prefecture("東京都"), TimeOfDay::Morning))
            .unwrap();
        assert!(polar.used_fallback);
        assert_eq!(polar.bounds, expected);

        let unknown = pipeline
            .run(&request(RegionKey::prefecture("Atlantis"), TimeOfDay::Morning))
            .unwrap();
        assert!(unknown.used_fallback);
        assert_eq!(unknown.bounds, expected);
    }

    #[test]
    fn test_horizon_from_config() {
        let mut config = small_config();
        config.horizon_days = 99;
        let mut pipeline = HeatmapPipeline::new(config);
        let layer = pipeline
            .run(&request(RegionKey::hokkaido("道央"), TimeOfDay::Afternoon))
            .unwrap();
        assert_eq!(layer.key.horizon_days(), 30);
        assert_eq!(layer.key.region(), "北海道|道央");
    }
}
