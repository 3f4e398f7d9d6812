//! HTTP API
//!
//! JSON over HTTP. Every route below `/campaigns/:campaign_id` resolves the
//! caller's campaign role through [`auth::CampaignAccess`] and checks the
//! permission it needs against the single access policy in
//! [`crate::core::access`].

pub mod auth;
mod campaigns;
mod creatures;
mod currencies;
pub mod error;
mod extract;
mod keep;
mod members;
mod shops;

use std::sync::Arc;

use axum::{
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::{AppConfig, HistoryConfig};
use crate::core::access::AccessPolicy;
use crate::core::input_validator::InputValidator;
use crate::database::Database;

pub use error::{ApiError, ApiResult};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub policy: Arc<AccessPolicy>,
    pub validator: Arc<InputValidator>,
    pub history: Arc<HistoryConfig>,
}

impl AppState {
    pub fn new(db: Database, config: &AppConfig) -> Self {
        Self {
            db,
            policy: Arc::new(AccessPolicy::new(config.auth.admin_users.iter())),
            validator: Arc::new(InputValidator::new()),
            history: Arc::new(config.history.clone()),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState, cors_permissive: bool) -> Router {
    let keep_routes = Router::new()
        .route("/", get(keep::get_keep).put(keep::update_keep))
        .route(
            "/facilities",
            get(keep::list_facilities).post(keep::create_facility),
        )
        .route(
            "/facilities/:facility_id",
            put(keep::update_facility).delete(keep::delete_facility),
        )
        .route(
            "/hirelings",
            get(keep::list_hirelings).post(keep::create_hireling),
        )
        .route(
            "/hirelings/:hireling_id",
            put(keep::update_hireling).delete(keep::delete_hireling),
        )
        .route("/ledger", post(keep::preview_ledger))
        .route(
            "/check-ins",
            get(keep::list_check_ins).post(keep::record_check_in),
        )
        .route("/check-ins/:check_in_id", get(keep::get_check_in));

    let shop_routes = Router::new()
        .route("/", get(shops::list_shops).post(shops::create_shop))
        .route(
            "/:shop_id",
            get(shops::get_shop)
                .put(shops::update_shop)
                .delete(shops::delete_shop),
        )
        .route("/:shop_id/items", post(shops::add_item))
        .route(
            "/:shop_id/items/:item_id",
            put(shops::update_item).delete(shops::remove_item),
        );

    let campaign_routes = Router::new()
        .route(
            "/",
            get(campaigns::get_campaign)
                .put(campaigns::update_campaign)
                .delete(campaigns::delete_campaign),
        )
        .route(
            "/members",
            get(members::list_members).post(members::add_member),
        )
        .route(
            "/members/:user_id",
            put(members::update_member).delete(members::remove_member),
        )
        .route(
            "/currencies",
            get(currencies::list_currencies).post(currencies::create_currency),
        )
        .route(
            "/currencies/:currency_id",
            put(currencies::update_currency).delete(currencies::delete_currency),
        )
        .route(
            "/creatures",
            get(creatures::list_creatures).post(creatures::create_creature),
        )
        .route(
            "/creatures/:creature_id",
            get(creatures::get_creature)
                .put(creatures::update_creature)
                .delete(creatures::delete_creature),
        )
        .nest("/keep", keep_routes)
        .nest("/shops", shop_routes);

    let app = Router::new()
        .route("/health", get(health_check))
        .route(
            "/campaigns",
            get(campaigns::list_campaigns).post(campaigns::create_campaign),
        )
        .nest("/campaigns/:campaign_id", campaign_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if cors_permissive {
        app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        app
    }
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
    }))
}
