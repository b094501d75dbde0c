//! API endpoint modules.

pub mod admin;
pub mod health;
pub mod leaderboard;
pub mod notes;
pub mod openapi;
pub mod scores;
pub mod session;

use actix_web::web;

pub use health::configure_health_routes;
pub use openapi::ApiDoc;

/// Configure every route under the `/api/v1` scope.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_health_routes)
        .configure(session::configure_routes)
        .configure(scores::configure_routes)
        .configure(notes::configure_routes)
        .configure(leaderboard::configure_routes)
        .configure(admin::configure_routes);
}
