use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::business::update_business;
use super::handlers::products::create_product;
use super::handlers::products::delete_product;
use super::handlers::products::get_product;
use super::handlers::products::list_products;
use super::handlers::products::update_product;
use super::handlers::profile::get_profile;
use super::handlers::register::register;
use super::handlers::token::issue_token;
use super::handlers::verification::verify_email;
use super::middleware::authenticate as auth_middleware;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::business::ports::BusinessServicePort;
use crate::domain::product::ports::ProductServicePort;
use crate::domain::user::ports::UserServicePort;
use crate::domain::verification::ports::VerificationGatePort;

/// Services shared by all handlers, behind their ports.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub auth_service: Arc<dyn AuthServicePort>,
    pub verification_gate: Arc<dyn VerificationGatePort>,
    pub business_service: Arc<dyn BusinessServicePort>,
    pub product_service: Arc<dyn ProductServicePort>,
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/registration", post(register))
        .route("/token", post(issue_token))
        .route("/verification", get(verify_email))
        .route("/products", get(list_products))
        .route("/products/:id", get(get_product));

    let protected_routes = Router::new()
        .route("/user/me", get(get_profile).post(get_profile))
        .route("/products", post(create_product))
        .route("/products/:id", put(update_product).delete(delete_product))
        .route("/business/:id", put(update_business))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
