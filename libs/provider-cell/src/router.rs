// libs/provider-cell/src/router.rs
use axum::{
    Router,
    routing::{get, post},
};

use shared_database::DatabaseContext;

use crate::handlers;

pub fn provider_routes(db: DatabaseContext) -> Router {
    Router::new()
        .route("/", post(handlers::create_provider))
        .route(
            "/{provider_id}",
            get(handlers::get_provider)
                .put(handlers::update_provider)
                .delete(handlers::delete_provider),
        )
        .route("/{provider_id}/appointments/today", get(handlers::get_today_appointments))
        .route("/{provider_id}/patients", get(handlers::get_provider_patients))
        .with_state(db)
}
