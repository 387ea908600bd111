pub mod health;

use axum::{
    http::{
        header::{self, HeaderName},
        HeaderValue, Method,
    },
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::assistant::handlers as assistant;
use crate::errors::panic_response;
use crate::listings::handlers as listings;
use crate::state::AppState;

/// Headers browser clients of the hosted platform send on cross-origin calls.
const CORS_ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            header::CONTENT_TYPE,
        ])
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Assistant API
        .route("/api/v1/chat-assistant", post(assistant::handle_chat))
        .route("/api/v1/languages", get(assistant::handle_languages))
        // Listings API
        .route(
            "/api/v1/jobs",
            get(listings::handle_list_jobs).post(listings::handle_create_job),
        )
        .route("/api/v1/employer/jobs", get(listings::handle_employer_jobs))
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors_layer())
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(CORS_ALLOW_HEADERS),
        ))
        .layer(TraceLayer::new_for_http())
}
