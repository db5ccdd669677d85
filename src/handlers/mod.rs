pub mod diagnosis;
pub mod liveness;
pub mod nutrition;
pub mod prediction;

pub use liveness::{run_mounted, Liveness};
pub use nutrition::RecommendationController;
pub use prediction::PredictionController;
