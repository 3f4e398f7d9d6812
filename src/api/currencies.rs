//! Currency handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::auth::CampaignAccess;
use super::extract::JsonBody;
use super::{ApiError, ApiResult, AppState};
use crate::core::access::{Action, Resource};
use crate::core::input_validator::ValidationError;
use crate::database::{CurrencyOps, CurrencyRecord};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyInput {
    pub name: String,
    pub abbreviation: String,
    #[serde(default)]
    pub description: Option<String>,
}

pub async fn list_currencies(
    State(state): State<AppState>,
    access: CampaignAccess,
) -> ApiResult<Json<Vec<CurrencyRecord>>> {
    access.require(Resource::Currencies, Action::Read)?;
    Ok(Json(state.db.list_currencies(access.campaign_id()).await?))
}

pub async fn create_currency(
    State(state): State<AppState>,
    access: CampaignAccess,
    JsonBody(input): JsonBody<CurrencyInput>,
) -> ApiResult<(StatusCode, Json<CurrencyRecord>)> {
    access.require(Resource::Currencies, Action::Manage)?;

    let v = &state.validator;
    let mut currency = CurrencyRecord::new(
        access.campaign_id().to_string(),
        v.name("name", &input.name)?,
        v.abbreviation("abbreviation", &input.abbreviation)?,
    );
    currency.description = v.optional_text("description", input.description.as_deref())?;

    state.db.create_currency(&currency).await?;
    Ok((StatusCode::CREATED, Json(currency)))
}

pub async fn update_currency(
    State(state): State<AppState>,
    access: CampaignAccess,
    Path((_, currency_id)): Path<(String, String)>,
    JsonBody(input): JsonBody<CurrencyInput>,
) -> ApiResult<Json<CurrencyRecord>> {
    access.require(Resource::Currencies, Action::Manage)?;

    let mut currency = state
        .db
        .get_currency(access.campaign_id(), &currency_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Currency {currency_id}")))?;

    let v = &state.validator;
    currency.name = v.name("name", &input.name)?;
    currency.abbreviation = v.abbreviation("abbreviation", &input.abbreviation)?;
    currency.description = v.optional_text("description", input.description.as_deref())?;

    state.db.update_currency(&currency).await?;
    Ok(Json(currency))
}

pub async fn delete_currency(
    State(state): State<AppState>,
    access: CampaignAccess,
    Path((_, currency_id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    access.require(Resource::Currencies, Action::Manage)?;

    if state
        .db
        .get_currency(access.campaign_id(), &currency_id)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound(format!("Currency {currency_id}")));
    }

    state.db.delete_currency(access.campaign_id(), &currency_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Reject amounts denominated in a currency the campaign does not define.
pub(super) async fn ensure_currency(
    state: &AppState,
    campaign_id: &str,
    abbreviation: &str,
) -> ApiResult<()> {
    if state.db.currency_exists(campaign_id, abbreviation).await? {
        Ok(())
    } else {
        Err(ValidationError::UnknownCurrency(abbreviation.to_string()).into())
    }
}
