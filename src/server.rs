use std::sync::Arc;

use axum::{http::HeaderValue, middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::api::translator::Translator;
use crate::config::AppConfig;
use crate::database::QueryExecutor;
use crate::handlers::{self, protected, public};
use crate::middleware::{handle_panic, require_api_key, resolve_instance_mode};
use crate::unflatten::Unflattener;

/// Shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub executor: Arc<dyn QueryExecutor>,
    pub translator: Translator,
    pub unflattener: Unflattener,
}

impl AppState {
    pub fn new(config: AppConfig, executor: Arc<dyn QueryExecutor>) -> Self {
        Self {
            translator: Translator::new(config.app.locale),
            unflattener: Unflattener::new(config.unflatten.mode),
            config: Arc::new(config),
            executor,
        }
    }
}

pub fn app(state: AppState) -> Router {
    let translator = state.translator;
    let cors = cors_layer(&state.config.security.cors_origins);

    Router::new()
        .route("/", get(public::service_info))
        .route("/live", get(public::live))
        .route("/ready", get(public::ready))
        .nest("/api/misca", misca_routes(state.clone()))
        .fallback(handlers::route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(CatchPanicLayer::custom(handle_panic(translator)))
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

fn misca_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/semesters", get(protected::semesters::list))
        .route("/semesters/active", get(protected::semesters::active))
        .route("/students", get(protected::students::list))
        .route("/students/total", get(protected::students::total))
        .route("/lecturers", get(protected::lecturers::list))
        .route("/lecturers/total", get(protected::lecturers::total))
        .route("/classes", get(protected::classes::list))
        .route("/classes/total", get(protected::classes::total))
        .route("/student_classes", get(protected::student_classes::list))
        .route("/student_classes/total", get(protected::student_classes::total))
        .route("/student_classes_details", get(protected::student_classes::list_details))
        .route("/student_classes_details/total", get(protected::student_classes::total_details))
        .route("/rooms", get(protected::rooms::list))
        .route("/rooms/total", get(protected::rooms::total))
        .route("/study_programs", get(protected::study_programs::list))
        .route("/study_programs/total", get(protected::study_programs::total))
        // Outermost runs first: the key is checked before the mode is read.
        .layer(middleware::from_fn_with_state(state.clone(), resolve_instance_mode))
        .layer(middleware::from_fn_with_state(state, require_api_key))
}

/// Permissive when no origins (or `*`) are configured.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                None
            }
        })
        .collect();
    CorsLayer::new().allow_origin(origins).allow_methods(Any).allow_headers(Any)
}
