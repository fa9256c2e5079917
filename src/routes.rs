// src/routes.rs

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    routing::{delete, get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{
    config::{Config, MAX_IMPORT_BYTES},
    handlers::{import, questions, results, test_banks},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (test banks, questions, import, results).
/// * Applies global middleware (Trace, CORS).
/// * Serves image files from the media root for any other path.
/// * Injects global state (Database Pool, Config).
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    let media = ServeDir::new(&state.config.media_root);

    let test_bank_routes = Router::new()
        .route("/", get(test_banks::list_test_banks).post(test_banks::create_test_bank))
        .route("/{id}", delete(test_banks::delete_test_bank));

    let question_routes = Router::new()
        .route("/", get(questions::list_questions))
        .route("/{id}", get(questions::get_question));

    let import_routes = Router::new()
        .route("/", post(import::import_questions))
        .layer(DefaultBodyLimit::max(MAX_IMPORT_BYTES));

    let result_routes = Router::new()
        .route("/exam_results", post(results::save_exam_result))
        .route("/exam_results/{test_bank_id}", get(results::get_exam_results))
        .route("/exam_history/{test_bank_id}", get(results::get_exam_history));

    let api_routes = Router::new()
        .nest("/test_banks", test_bank_routes)
        .nest("/questions", question_routes)
        .nest("/import", import_routes)
        .route("/answer", post(questions::check_answer))
        .merge(result_routes);

    Router::new()
        .nest("/api", api_routes)
        .fallback_service(media)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins = if config.cors_origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        let parsed: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin: {}", o);
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}
