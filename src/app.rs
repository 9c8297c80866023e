use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use http::{header, HeaderValue, Method};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::{
    handlers::{auth, contact_skills, contacts, skills},
    middleware_layer::auth::require_auth,
    state::AppState,
    store::Store,
};

/// Largest accepted request body.
const BODY_LIMIT_BYTES: usize = 64 * 1024;

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://127.0.0.1:3000"),
            HeaderValue::from_static("http://[::1]:3000"),
        ])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .max_age(Duration::from_secs(86400))
}

/// Builds the application router.
///
/// Every route except registration, login and token renewal sits behind
/// [`require_auth`].
pub fn router<S: Store>(state: AppState<S>) -> Router {
    let public_routes = Router::new()
        .route("/users", post(auth::create_user::<S>))
        .route("/users/login", post(auth::login::<S>))
        .route("/tokens/renew_access", post(auth::renew_access_token::<S>));

    let protected_routes = Router::new()
        .route("/users/logout", post(auth::logout::<S>))
        .route("/sessions/{id}/block", post(auth::block_session::<S>))
        .route(
            "/contacts",
            post(contacts::create_contact::<S>)
                .get(contacts::list_contacts::<S>)
                .patch(contacts::update_contact::<S>),
        )
        .route(
            "/contacts/{id}",
            get(contacts::get_contact::<S>).delete(contacts::delete_contact::<S>),
        )
        .route("/contact-skills/{id}", get(contacts::contact_skills::<S>))
        .route("/contacts-with-skill", get(contacts::contacts_with_skill::<S>))
        .route(
            "/contacts-with-skill-and-level",
            get(contacts::contacts_with_skill_and_level::<S>),
        )
        .route(
            "/skills",
            post(skills::create_skill::<S>)
                .get(skills::list_skills::<S>)
                .patch(skills::update_skill::<S>),
        )
        .route(
            "/skills/{id}",
            get(skills::get_skill::<S>).delete(skills::delete_skill::<S>),
        )
        .route("/add-skill", post(contact_skills::add_skill::<S>))
        .route_layer(from_fn_with_state(state.tokens.clone(), require_auth));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default())
                .on_request(DefaultOnRequest::default().level(Level::DEBUG))
                .on_response(DefaultOnResponse::default().level(Level::DEBUG))
                .on_failure(DefaultOnFailure::default().level(Level::ERROR)),
        )
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(cors())
        .with_state(state)
}
