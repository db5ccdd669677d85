use std::sync::Arc;

use super::TextGenerator;
use crate::error::WorkflowError;
use crate::models::Recommendation;

/// Anything that can produce feeding advice for a breed.
#[async_trait::async_trait]
pub trait RecommendationSource: Send + Sync {
    async fn recommendations(&self, breed: &str) -> Result<Vec<Recommendation>, WorkflowError>;
}

/// Asks a generative model for advice and reads its JSON answer.
pub struct NutritionAdvisor {
    generator: Arc<dyn TextGenerator>,
}

impl NutritionAdvisor {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

pub fn build_prompt(breed: &str) -> String {
    format!(
        "You are an expert in Indian bovine health. Provide specific nutritional recommendations for a \"{breed}\" bovine.\n\
         Generate the response as a JSON array of objects. Each object must have an 'icon', 'heading', and 'text' property.\n\
         \n\
         The 'icon' property must be one of the following strings:\n\
         - \"Dog\" for general health/diet tips.\n\
         - \"Bone\" for calcium/mineral needs.\n\
         - \"Leaf\" for forage/plant-based diet.\n\
         - \"Droplet\" for hydration.\n\
         - \"Star\" for a key fact or overall tip.\n\
         \n\
         The 'heading' property should be a concise title for the recommendation.\n\
         The 'text' property should contain the detailed description.\n\
         \n\
         Example format:\n\
         [\n\
           {{\n\
             \"icon\": \"Leaf\",\n\
             \"heading\": \"High-quality roughage\",\n\
             \"text\": \"Sahiwals need a diet predominantly based on high-quality roughage, such as berseem clover, lucerne (alfalfa), and other legumes. Ensure a minimum of 50-60% of their total daily intake comes from good quality green fodder. The fodder should be free of toxins and mold.\"\n\
           }},\n\
           {{\n\
             \"icon\": \"Droplet\",\n\
             \"heading\": \"Clean water access\",\n\
             \"text\": \"Always ensure access to clean and fresh water. Water intake is crucial, especially for lactating cows, to maintain milk production and overall health. Water troughs should be cleaned regularly.\"\n\
           }}\n\
         ]\n\
         \n\
         Do not include any text, markdown, or code blocks outside of the JSON array.\n\
         Provide at least 5 recommendations.",
        breed = breed
    )
}

/// Reads the model output as-is; only the closed icon set is enforced.
pub fn parse_recommendations(text: &str) -> Result<Vec<Recommendation>, WorkflowError> {
    Ok(serde_json::from_str(text)?)
}

#[async_trait::async_trait]
impl RecommendationSource for NutritionAdvisor {
    async fn recommendations(&self, breed: &str) -> Result<Vec<Recommendation>, WorkflowError> {
        log::info!("🌿 Requesting nutrition advice for breed: {}", breed);

        let text = self
            .generator
            .generate_json(&build_prompt(breed))
            .await
            .map_err(|e| WorkflowError::RequestFailed(e.to_string()))?;

        let recommendations = parse_recommendations(&text).map_err(|e| {
            log::error!("❌ Could not parse generated advice: {}", e);
            log::debug!("📦 Raw generated text: {}", text);
            e
        })?;

        log::info!("✅ Parsed {} recommendations for {}", recommendations.len(), breed);
        Ok(recommendations)
    }
}
