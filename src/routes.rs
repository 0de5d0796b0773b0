//! Router assembly.

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{admin, auth, bookings, chatbot, events, health},
    middleware::admin_auth::admin_auth_middleware,
    state::AppState,
};

/// Builds the application router.
pub fn app(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route(
            "/api/admin/events",
            post(admin::create_event).get(admin::list_events),
        )
        .route("/api/admin/events/{event_id}", delete(admin::delete_event))
        .route("/api/admin/registrations", get(admin::list_registrations))
        .route("/api/admin/dashboard", get(admin::dashboard))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth_middleware,
        ));

    Router::new()
        .route("/", get(health::health))
        .route("/api/events", get(events::list_events))
        .route("/api/events/{event_id}", get(events::get_event))
        .route("/api/events/{event_id}/book", post(bookings::book_event))
        .route(
            "/api/events/{event_id}/bookings",
            get(bookings::list_event_bookings),
        )
        .route("/api/bookings/{email}", get(bookings::list_bookings_by_email))
        .route(
            "/api/bookings/cancel/{booking_id}",
            delete(bookings::cancel_booking),
        )
        .route("/api/chatbot/query", post(chatbot::query))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/admin/login", post(admin::login))
        .merge(admin_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
