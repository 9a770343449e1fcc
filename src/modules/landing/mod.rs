pub mod content;

use async_trait::async_trait;
use axum::{routing::get, Json, Router};
use fluffy_kernel::{InitCtx, Module};
use serde_json::json;

/// Read-only marketing content for the landing page
pub struct LandingModule;

impl LandingModule {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Module for LandingModule {
    fn name(&self) -> &'static str {
        "landing"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "landing module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(|| async { Json(content::landing_page()) }))
            .route("/services", get(|| async { Json(content::services()) }))
            .route("/process", get(|| async { Json(content::process()) }))
            .route("/testimonials", get(|| async { Json(content::testimonials()) }))
            .route("/faq", get(|| async { Json(content::faq()) }))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let section = |summary: &str, schema: serde_json::Value| {
            json!({
                "get": {
                    "summary": summary,
                    "tags": ["Landing"],
                    "responses": {
                        "200": {
                            "description": "OK",
                            "content": { "application/json": { "schema": schema } }
                        }
                    }
                }
            })
        };
        let list_of = |name: &str| {
            json!({ "type": "array", "items": { "$ref": format!("#/components/schemas/{name}") } })
        };

        Some(json!({
            "paths": {
                "/": section("Full landing page content", json!({ "type": "object" })),
                "/services": section("Grooming services and prices", list_of("ServiceOffer")),
                "/process": section("Steps of a grooming visit", list_of("ProcessStep")),
                "/testimonials": section("Customer testimonials", list_of("Testimonial")),
                "/faq": section("Frequently asked questions", list_of("FaqEntry"))
            },
            "components": {
                "schemas": {
                    "ServiceOffer": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string" },
                            "priceTwd": { "type": "integer", "description": "Price in NT$" },
                            "highlights": { "type": "array", "items": { "type": "string" } },
                            "serviceType": { "type": "string", "enum": ["basic", "style", "care"] }
                        },
                        "required": ["title", "priceTwd", "highlights", "serviceType"]
                    },
                    "ProcessStep": {
                        "type": "object",
                        "properties": {
                            "step": { "type": "integer" },
                            "title": { "type": "string" },
                            "description": { "type": "string" }
                        },
                        "required": ["step", "title", "description"]
                    },
                    "Testimonial": {
                        "type": "object",
                        "properties": {
                            "name": { "type": "string" },
                            "content": { "type": "string" }
                        },
                        "required": ["name", "content"]
                    },
                    "FaqEntry": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string" },
                            "question": { "type": "string" },
                            "answer": { "type": "string" }
                        },
                        "required": ["id", "question", "answer"]
                    }
                }
            }
        }))
    }
}

/// Create a new instance of the landing module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(LandingModule::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn get_json(uri: &str) -> serde_json::Value {
        let response = LandingModule::new()
            .routes()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn serves_full_page() {
        let page = get_json("/").await;
        assert_eq!(page["hero"]["stats"].as_array().unwrap().len(), 3);
        assert_eq!(page["contact"]["brand"], "Fluffy Spa");
        assert_eq!(page["booking"]["petTypes"][0]["value"], "dog");
    }

    #[tokio::test]
    async fn serves_sections() {
        let services = get_json("/services").await;
        assert_eq!(services[0]["priceTwd"], 900);
        assert_eq!(services[2]["serviceType"], "style");

        let faq = get_json("/faq").await;
        assert_eq!(faq.as_array().unwrap().len(), 4);

        assert_eq!(get_json("/process").await.as_array().unwrap().len(), 4);
        assert_eq!(get_json("/testimonials").await.as_array().unwrap().len(), 3);
    }

    #[test]
    fn openapi_documents_every_route() {
        let spec = LandingModule::new().openapi().unwrap();
        for path in ["/", "/services", "/process", "/testimonials", "/faq"] {
            assert!(spec["paths"][path]["get"].is_object(), "missing {path}");
        }
    }
}
