pub mod error;
pub mod geometry;
pub mod probability;
pub mod scalar_field;
pub mod types;
pub mod utils;

// Re-exports for convenience
pub use error::{MathError, MathResult};
pub use types::*;

// Public API
pub mod prelude {
    pub use super::{
        error::{MathError, MathResult},
        geometry::{
            mesh::{GridCell, Mesh, MeshBuilder, MeshConfig, build_mesh},
            projection::{Hemisphere, ProjectionContext, choose_context},
        },
        probability::{ForecastKey, ProbabilityField, ProbabilityShape, ProbabilitySynthesizer, synthesize},
        scalar_field::{FieldStats, ScalarField2D},
        types::*,
    };
}
