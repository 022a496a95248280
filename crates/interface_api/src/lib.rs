//! HTTP API Layer
//!
//! This crate provides the REST API for CampusFind using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for accounts, items and claims
//! - **Middleware**: Bearer-token authentication context, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent `{error, message}` responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::new(users, items, claims, health, config);
//! axum::serve(listener, create_router(state)).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;
pub mod extract;

use std::sync::Arc;

use axum::{
    body::Body,
    http::Request,
    middleware as axum_middleware,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use core_kernel::HealthCheckable;
use domain_claims::{ClaimService, ClaimStore};
use domain_identity::{AccountPolicy, AccountService, UserStore};
use domain_items::{ItemService, ItemStore};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::handlers::{auth as account, claims, health, items};
use crate::middleware::{audit_middleware, auth_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,
    pub items: ItemService,
    pub claims: ClaimService,
    pub health: Arc<dyn HealthCheckable>,
    pub config: ApiConfig,
}

impl AppState {
    /// Wires the domain services over the given store adapters
    pub fn new(
        users: Arc<dyn UserStore>,
        items: Arc<dyn ItemStore>,
        claims: Arc<dyn ClaimStore>,
        health: Arc<dyn HealthCheckable>,
        config: ApiConfig,
    ) -> Self {
        let policy = AccountPolicy::new(config.verified_email_suffix.clone());
        Self {
            accounts: AccountService::new(users, policy),
            items: ItemService::new(items),
            claims: ClaimService::new(claims),
            health,
            config,
        }
    }
}

async fn index() -> Json<Value> {
    Json(json!({
        "message": "CampusFind API is running",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "auth": "/api/v1/auth",
            "items": "/api/v1/items",
            "claims": "/api/v1/claims",
            "health": "/health",
        },
    }))
}

async fn route_not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}

/// Creates the main API router
///
/// Every `/api/v1` request passes through the auth middleware, which
/// attaches the caller when a valid token is sent; handlers that need a
/// caller reject with 401 otherwise.
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(index))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let auth_routes = Router::new()
        .route("/register", post(account::register))
        .route("/login", post(account::login))
        .route("/me", get(account::me));

    let item_routes = Router::new()
        .route("/", get(items::list_items))
        .route("/found", post(items::report_found))
        .route("/lost", post(items::report_lost))
        .route(
            "/:id",
            get(items::get_item)
                .put(items::update_item)
                .delete(items::delete_item),
        )
        .route("/:id/status", put(items::set_item_status))
        .route("/:id/claims", get(claims::item_claims));

    let claims_routes = Router::new()
        .route("/", post(claims::submit_claim))
        .route("/user/my-claims", get(claims::my_claims))
        .route(
            "/:id",
            get(claims::get_claim)
                .put(claims::update_claim)
                .delete(claims::delete_claim),
        )
        .route("/:id/verify", put(claims::verify_claim));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/items", item_routes)
        .nest("/claims", claims_routes)
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    let http_layers = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            let request_id = request
                .headers()
                .get("x-request-id")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("-");
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id,
            )
        }))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .fallback(route_not_found)
        .layer(http_layers)
        .with_state(state)
}
