use std::sync::Arc;

use super::Liveness;
use crate::error::WorkflowError;
use crate::models::RecommendationQuery;
use crate::services::RecommendationSource;

pub use crate::models::breeds::filter_suggestions;

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch recommendations.";

/// Drives one recommendation request for a `RecommendationQuery`.
pub struct RecommendationController {
    source: Arc<dyn RecommendationSource>,
}

impl RecommendationController {
    pub fn new(source: Arc<dyn RecommendationSource>) -> Self {
        Self { source }
    }

    pub async fn submit(&self, query: &mut RecommendationQuery, liveness: &Liveness) -> Result<(), WorkflowError> {
        let breed = query.begin()?;

        let result = self.source.recommendations(&breed).await;

        if !liveness.is_mounted() {
            log::debug!("🔕 Dropping advice for {}: screen gone", breed);
            return Err(WorkflowError::Cancelled);
        }

        match result {
            Ok(recommendations) => {
                query.succeed(breed, recommendations);
                Ok(())
            }
            Err(e) => {
                log::error!("❌ Recommendation request for {} failed: {}", breed, e);
                query.fail(FETCH_FAILED_MESSAGE);
                Err(e)
            }
        }
    }
}
