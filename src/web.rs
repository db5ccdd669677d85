use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::handlers::nutrition::FETCH_FAILED_MESSAGE;
use crate::handlers::prediction::{REQUEST_FAILED_MESSAGE, UPLOAD_TOO_LARGE_MESSAGE, UPLOAD_UNREADABLE_MESSAGE};
use crate::handlers::{diagnosis, run_mounted, PredictionController, RecommendationController};
use crate::models::{ImageUpload, RecommendationQuery, UploadTask};
use crate::services::{BreedClassifier, RecommendationSource};

pub mod api;
pub mod pages;

pub struct AppState {
    pub prediction: PredictionController,
    pub recommendations: RecommendationController,
    pub advisor: Arc<dyn RecommendationSource>,
}

impl AppState {
    pub fn new(classifier: Arc<dyn BreedClassifier>, advisor: Arc<dyn RecommendationSource>) -> Self {
        Self {
            prediction: PredictionController::new(classifier),
            recommendations: RecommendationController::new(advisor.clone()),
            advisor,
        }
    }
}

pub fn create_router(state: AppState, static_dir: &str, max_upload_bytes: usize) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/", get(landing_handler))
        .route("/predict", get(predict_page).post(predict_submit))
        .route("/nutrition", get(nutrition_page).post(nutrition_submit))
        .route("/disease", get(disease_page).post(disease_submit))
        .route("/api/nutritional-recommendations", post(api::nutritional_recommendations))
        .route("/api/breeds/suggestions", get(api::breed_suggestions))
        .route("/health", get(health_check))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

async fn landing_handler() -> Html<String> {
    Html(pages::landing_page())
}

async fn health_check() -> &'static str {
    "OK"
}

/// A fresh page is a fresh (reset) task.
async fn predict_page() -> Html<String> {
    Html(pages::predict_page(&UploadTask::new()))
}

/// Pulls the `file` part out of the upload form. Empty parts count as no file.
async fn read_image(multipart: &mut Multipart) -> Result<Option<ImageUpload>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field.bytes().await?;

        if bytes.is_empty() {
            return Ok(None);
        }

        return Ok(Some(ImageUpload::new(file_name, content_type, bytes.to_vec())));
    }

    Ok(None)
}

fn upload_error_message(err: &MultipartError) -> &'static str {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        UPLOAD_TOO_LARGE_MESSAGE
    } else {
        UPLOAD_UNREADABLE_MESSAGE
    }
}

async fn predict_submit(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> Html<String> {
    let mut task = UploadTask::new();

    match read_image(&mut multipart).await {
        Ok(Some(image)) => {
            log::info!("📁 Received upload {} ({} bytes)", image.file_name, image.bytes.len());
            task.select_file(image);
        }
        Ok(None) => log::info!("ℹ️ Prediction submitted without a file"),
        Err(e) => {
            log::warn!("⚠️ Failed to read upload form ({}): {}", e.status(), e.body_text());
            task.fail(upload_error_message(&e));
            return Html(pages::predict_page(&task));
        }
    }

    let worker = run_mounted(move |liveness| async move {
        if let Err(e) = state.prediction.submit(&mut task, &liveness).await {
            log::info!("Prediction ended without result: {}", e);
        }
        task
    });

    let task = match worker.await {
        Ok(task) => task,
        Err(e) => {
            log::error!("❌ Prediction task aborted: {}", e);
            let mut task = UploadTask::new();
            task.fail(REQUEST_FAILED_MESSAGE);
            task
        }
    };

    Html(pages::predict_page(&task))
}

async fn nutrition_page() -> Html<String> {
    Html(pages::nutrition_page(&RecommendationQuery::new()))
}

#[derive(Deserialize)]
struct NutritionForm {
    #[serde(default)]
    breed: String,
}

async fn nutrition_submit(State(state): State<Arc<AppState>>, Form(form): Form<NutritionForm>) -> Html<String> {
    let mut query = RecommendationQuery::new();
    query.set_input(form.breed);

    let worker = run_mounted(move |liveness| async move {
        if let Err(e) = state.recommendations.submit(&mut query, &liveness).await {
            log::info!("Recommendation lookup ended without result: {}", e);
        }
        query
    });

    let query = match worker.await {
        Ok(query) => query,
        Err(e) => {
            log::error!("❌ Recommendation task aborted: {}", e);
            let mut query = RecommendationQuery::new();
            query.fail(FETCH_FAILED_MESSAGE);
            query
        }
    };

    Html(pages::nutrition_page(&query))
}

async fn disease_page() -> Html<String> {
    Html(pages::disease_page(None))
}

async fn disease_submit(Form(submitted): Form<Vec<(String, String)>>) -> Html<String> {
    let form = diagnosis::capture(&submitted);
    log::info!("🩺 Diagnosis form captured with {} selections", form.len());
    Html(pages::disease_page(Some(&form)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WorkflowError;
    use crate::models::{RawPrediction, Recommendation, RecommendationIcon};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    struct FakeClassifier {
        confidence: &'static str,
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl BreedClassifier for FakeClassifier {
        async fn classify(&self, image: &ImageUpload) -> Result<RawPrediction, WorkflowError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(image.content_type, "image/jpeg");
            Ok(RawPrediction {
                breed: "Sahiwal".to_string(),
                confidence: self.confidence.to_string(),
            })
        }
    }

    struct FakeAdvisor {
        fail: bool,
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl RecommendationSource for FakeAdvisor {
        async fn recommendations(&self, _breed: &str) -> Result<Vec<Recommendation>, WorkflowError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(WorkflowError::Parse("expected value at line 1".to_string()));
            }
            Ok(vec![Recommendation {
                icon: RecommendationIcon::Droplet,
                heading: "Clean water access".to_string(),
                text: "Keep troughs clean.".to_string(),
            }])
        }
    }

    struct Harness {
        classifier: Arc<FakeClassifier>,
        advisor: Arc<FakeAdvisor>,
        router: Router,
    }

    fn harness(confidence: &'static str, advisor_fails: bool) -> Harness {
        harness_with_limit(confidence, advisor_fails, 1024 * 1024)
    }

    fn harness_with_limit(confidence: &'static str, advisor_fails: bool, max_upload_bytes: usize) -> Harness {
        let classifier = Arc::new(FakeClassifier {
            confidence,
            calls: AtomicUsize::new(0),
        });
        let advisor = Arc::new(FakeAdvisor {
            fail: advisor_fails,
            calls: AtomicUsize::new(0),
        });
        let router = create_router(
            AppState::new(classifier.clone(), advisor.clone()),
            "static",
            max_upload_bytes,
        );
        Harness { classifier, advisor, router }
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn upload_request(file: Option<&[u8]>) -> Request<Body> {
        let boundary = "XBOUNDARYX";
        let mut body: Vec<u8> = Vec::new();
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        match file {
            Some(bytes) => {
                body.extend_from_slice(
                    b"Content-Disposition: form-data; name=\"file\"; filename=\"cow.jpg\"\r\nContent-Type: image/jpeg\r\n\r\n",
                );
                body.extend_from_slice(bytes);
            }
            None => {
                body.extend_from_slice(
                    b"Content-Disposition: form-data; name=\"file\"; filename=\"\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                );
            }
        }
        body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

        Request::builder()
            .method("POST")
            .uri("/predict")
            .header("content-type", format!("multipart/form-data; boundary={}", boundary))
            .body(Body::from(body))
            .unwrap()
    }

    fn json_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/nutritional-recommendations")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn form_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let h = harness("90%", false);
        let response = h
            .router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "OK");
    }

    #[tokio::test]
    async fn test_predict_with_image_shows_breed() {
        let h = harness("87.30%", false);
        let response = h.router.oneshot(upload_request(Some(&[0xFF, 0xD8, 0xFF]))).await.unwrap();
        let html = body_text(response).await;

        assert!(html.contains("<p class=\"breed\">Sahiwal</p>"));
        assert!(html.contains("data:image/jpeg;base64,/9j/"));
        assert_eq!(h.classifier.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_predict_low_confidence_shows_advisory() {
        let h = harness("12.5%", false);
        let response = h.router.oneshot(upload_request(Some(&[1, 2, 3]))).await.unwrap();
        let html = body_text(response).await;

        assert!(html.contains("Confidence Is Too Low"));
        assert!(!html.contains("Sahiwal"));
    }

    #[tokio::test]
    async fn test_predict_without_file_makes_no_call() {
        let h = harness("90%", false);
        let response = h.router.oneshot(upload_request(None)).await.unwrap();
        let html = body_text(response).await;

        assert!(html.contains("Please select a file first."));
        assert_eq!(h.classifier.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_predict_oversized_upload_is_reported() {
        let h = harness_with_limit("90%", false, 16);
        let response = h.router.oneshot(upload_request(Some(&[7u8; 4096]))).await.unwrap();
        let html = body_text(response).await;

        assert!(html.contains(UPLOAD_TOO_LARGE_MESSAGE));
        assert!(!html.contains("Please select a file first."));
        assert_eq!(h.classifier.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_predict_truncated_form_is_reported() {
        let h = harness("90%", false);
        let request = Request::builder()
            .method("POST")
            .uri("/predict")
            .header("content-type", "multipart/form-data; boundary=XBOUNDARYX")
            .body(Body::from(
                "--XBOUNDARYX\r\nContent-Disposition: form-data; name=\"file\"; filename=\"cow.jpg\"\r\n\r\nabc",
            ))
            .unwrap();
        let html = body_text(h.router.oneshot(request).await.unwrap()).await;

        assert!(html.contains(UPLOAD_UNREADABLE_MESSAGE));
        assert!(!html.contains("Please select a file first."));
        assert_eq!(h.classifier.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_api_missing_breed_is_400() {
        let h = harness("90%", false);
        let response = h.router.oneshot(json_request(r#"{"breed": ""}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, r#"{"error":"Breed is required."}"#);
        assert_eq!(h.advisor.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_api_body_not_json_is_500() {
        let h = harness("90%", false);
        let response = h.router.oneshot(json_request("breed=Gir")).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, r#"{"error":"Failed to get recommendations."}"#);
    }

    #[tokio::test]
    async fn test_api_null_body_is_500_but_other_shapes_are_400() {
        let h = harness("90%", false);
        let response = h.router.clone().oneshot(json_request("null")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, r#"{"error":"Failed to get recommendations."}"#);

        for body in ["[]", "7", r#"{"breed": null}"#] {
            let response = h.router.clone().oneshot(json_request(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {}", body);
        }
        assert_eq!(h.advisor.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_api_generation_failure_is_500() {
        let h = harness("90%", true);
        let response = h.router.oneshot(json_request(r#"{"breed": "Gir"}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(h.advisor.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_api_success() {
        let h = harness("90%", false);
        let response = h.router.oneshot(json_request(r#"{"breed": "Gir"}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["recommendations"][0]["icon"], "Droplet");
        assert_eq!(json["recommendations"][0]["heading"], "Clean water access");
    }

    #[tokio::test]
    async fn test_suggestions_endpoint() {
        let h = harness("90%", false);
        let response = h
            .router
            .oneshot(
                Request::builder()
                    .uri("/api/breeds/suggestions?q=ni")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(body_text(response).await, r#"{"suggestions":["Nili Ravi","Nimari"]}"#);
    }

    #[tokio::test]
    async fn test_nutrition_form_renders_heading() {
        let h = harness("90%", false);
        let response = h.router.oneshot(form_request("/nutrition", "breed=Gir")).await.unwrap();
        let html = body_text(response).await;

        assert!(html.contains("For the Gir breed:"));
        assert!(html.contains("Clean water access"));
    }

    #[tokio::test]
    async fn test_nutrition_form_blank_breed() {
        let h = harness("90%", false);
        let response = h.router.oneshot(form_request("/nutrition", "breed=+")).await.unwrap();
        let html = body_text(response).await;

        assert!(html.contains("Please enter a bovine breed."));
        assert_eq!(h.advisor.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_nutrition_form_failure_is_generic() {
        let h = harness("90%", true);
        let response = h.router.oneshot(form_request("/nutrition", "breed=Gir")).await.unwrap();
        let html = body_text(response).await;

        assert!(html.contains("Failed to fetch recommendations."));
        assert!(!html.contains("expected value"));
    }

    #[tokio::test]
    async fn test_disease_form_serializes_selection() {
        let h = harness("90%", false);
        let response = h
            .router
            .oneshot(form_request("/disease", "Breed=Gir&Age=&Symptom+1=Fever"))
            .await
            .unwrap();
        let html = body_text(response).await;

        assert!(html.contains("&quot;Breed&quot;: &quot;Gir&quot;"));
        assert!(html.contains("&quot;Symptom 1&quot;: &quot;Fever&quot;"));
        assert!(!html.contains("&quot;Age&quot;"));
    }
}
