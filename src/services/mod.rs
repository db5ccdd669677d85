pub mod advisor; // Nutrition prompt + parsing
pub mod ai_service;
pub mod classifier; // Remote breed classifier
pub mod gemini; // Google Gemini generateContent client

pub use advisor::{NutritionAdvisor, RecommendationSource};
pub use ai_service::TextGenerator;
pub use classifier::{BreedClassifier, HttpClassifier};
pub use gemini::GeminiService;

/// Serves `router` on an ephemeral local port and returns its base URL.
#[cfg(test)]
pub(crate) async fn serve_stub(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}
