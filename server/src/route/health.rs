use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::handler::AppModule;

pub trait HealthRouter {
    fn route_health(self) -> Self;
}

impl HealthRouter for Router<AppModule> {
    fn route_health(self) -> Self {
        self.route("/health", get(health))
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "message": "healthy" }))
}
