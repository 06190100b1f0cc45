use axum::{
    routing::{get, post},
    Router,
};

mod events;
mod flags;
mod json_body;
mod status;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(status::root))
        .route("/track", post(events::routes::track))
        .route("/flush", post(events::routes::flush))
        .route("/identify", post(events::routes::identify))
        .route("/allFlags", post(flags::routes::all_flags))
        .route("/feature/{key}/eval", post(flags::routes::eval))
}
