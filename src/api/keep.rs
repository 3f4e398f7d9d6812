//! Player keep handlers
//!
//! The keep, its facilities and hirelings, the ledger preview and the
//! check-in history. Recording a check-in always recomputes the ledger from
//! the stored rates; the client only supplies the number of weeks.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use super::auth::CampaignAccess;
use super::currencies::ensure_currency;
use super::extract::{JsonBody, QueryParams};
use super::{ApiError, ApiResult, AppState};
use crate::core::access::{Action, Resource};
use crate::core::keep::{self, CheckIn, CheckInPage, CheckInView, KeepLedger, PageRequest};
use crate::database::models::now_timestamp;
use crate::database::{CheckInOps, FacilityRecord, HirelingRecord, KeepOps, KeepRecord};

// ============================================================================
// Request / Response Types
// ============================================================================

/// Keep with everything that feeds its ledger
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeepView {
    #[serde(flatten)]
    pub keep: KeepRecord,
    pub facilities: Vec<FacilityRecord>,
    pub hirelings: Vec<HirelingRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeepInput {
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityInput {
    pub name: String,
    pub upkeep_amount: f64,
    pub upkeep_currency: String,
    pub profit_amount: f64,
    pub profit_currency: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HirelingInput {
    pub name: String,
    pub salary_amount: f64,
    pub salary_currency: String,
    pub profit_amount: f64,
    pub profit_currency: String,
}

#[derive(Debug, Deserialize)]
pub struct WeeksInput {
    pub weeks: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// Validated `(amount, currency)` pair
struct Rate(f64, String);

impl Rate {
    async fn parse(
        state: &AppState,
        campaign_id: &str,
        field: &'static str,
        amount: f64,
        currency: &str,
    ) -> ApiResult<Self> {
        let amount = state.validator.amount(field, amount)?;
        let currency = state.validator.abbreviation("currency", currency)?;
        ensure_currency(state, campaign_id, &currency).await?;
        Ok(Self(amount, currency))
    }
}

// ============================================================================
// Keep
// ============================================================================

async fn campaign_keep(state: &AppState, access: &CampaignAccess) -> ApiResult<KeepRecord> {
    Ok(state.db.get_or_create_keep(access.campaign_id()).await?)
}

pub async fn get_keep(
    State(state): State<AppState>,
    access: CampaignAccess,
) -> ApiResult<Json<KeepView>> {
    access.require(Resource::Keep, Action::Read)?;

    let keep = campaign_keep(&state, &access).await?;
    let facilities = state.db.list_facilities(&keep.id).await?;
    let hirelings = state.db.list_hirelings(&keep.id).await?;

    Ok(Json(KeepView {
        keep,
        facilities,
        hirelings,
    }))
}

pub async fn update_keep(
    State(state): State<AppState>,
    access: CampaignAccess,
    JsonBody(input): JsonBody<KeepInput>,
) -> ApiResult<Json<KeepRecord>> {
    access.require(Resource::Keep, Action::Manage)?;

    let mut keep = campaign_keep(&state, &access).await?;
    keep.icon_url = state.validator.icon_url(input.icon_url.as_deref())?;
    keep.description = state
        .validator
        .optional_text("description", input.description.as_deref())?;
    keep.updated_at = now_timestamp();

    state.db.update_keep(&keep).await?;
    Ok(Json(keep))
}

// ============================================================================
// Facilities
// ============================================================================

pub async fn list_facilities(
    State(state): State<AppState>,
    access: CampaignAccess,
) -> ApiResult<Json<Vec<FacilityRecord>>> {
    access.require(Resource::Keep, Action::Read)?;
    let keep = campaign_keep(&state, &access).await?;
    Ok(Json(state.db.list_facilities(&keep.id).await?))
}

pub async fn create_facility(
    State(state): State<AppState>,
    access: CampaignAccess,
    JsonBody(input): JsonBody<FacilityInput>,
) -> ApiResult<(StatusCode, Json<FacilityRecord>)> {
    access.require(Resource::Keep, Action::Manage)?;

    let keep = campaign_keep(&state, &access).await?;
    let name = state.validator.name("name", &input.name)?;
    let Rate(upkeep, upkeep_currency) = Rate::parse(
        &state,
        access.campaign_id(),
        "upkeepAmount",
        input.upkeep_amount,
        &input.upkeep_currency,
    )
    .await?;
    let Rate(profit, profit_currency) = Rate::parse(
        &state,
        access.campaign_id(),
        "profitAmount",
        input.profit_amount,
        &input.profit_currency,
    )
    .await?;

    let facility = FacilityRecord::new(
        keep.id,
        name,
        (upkeep, upkeep_currency),
        (profit, profit_currency),
    );
    state.db.create_facility(&facility).await?;
    Ok((StatusCode::CREATED, Json(facility)))
}

pub async fn update_facility(
    State(state): State<AppState>,
    access: CampaignAccess,
    Path((_, facility_id)): Path<(String, String)>,
    JsonBody(input): JsonBody<FacilityInput>,
) -> ApiResult<Json<FacilityRecord>> {
    access.require(Resource::Keep, Action::Manage)?;

    let keep = campaign_keep(&state, &access).await?;
    let mut facility = state
        .db
        .get_facility(&keep.id, &facility_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Facility {facility_id}")))?;

    let Rate(upkeep, upkeep_currency) = Rate::parse(
        &state,
        access.campaign_id(),
        "upkeepAmount",
        input.upkeep_amount,
        &input.upkeep_currency,
    )
    .await?;
    let Rate(profit, profit_currency) = Rate::parse(
        &state,
        access.campaign_id(),
        "profitAmount",
        input.profit_amount,
        &input.profit_currency,
    )
    .await?;

    facility.name = state.validator.name("name", &input.name)?;
    facility.upkeep_amount = upkeep;
    facility.upkeep_currency = upkeep_currency;
    facility.profit_amount = profit;
    facility.profit_currency = profit_currency;
    facility.updated_at = now_timestamp();

    state.db.update_facility(&facility).await?;
    Ok(Json(facility))
}

pub async fn delete_facility(
    State(state): State<AppState>,
    access: CampaignAccess,
    Path((_, facility_id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    access.require(Resource::Keep, Action::Manage)?;

    let keep = campaign_keep(&state, &access).await?;
    if state.db.get_facility(&keep.id, &facility_id).await?.is_none() {
        return Err(ApiError::NotFound(format!("Facility {facility_id}")));
    }
    state.db.delete_facility(&keep.id, &facility_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Hirelings
// ============================================================================

pub async fn list_hirelings(
    State(state): State<AppState>,
    access: CampaignAccess,
) -> ApiResult<Json<Vec<HirelingRecord>>> {
    access.require(Resource::Keep, Action::Read)?;
    let keep = campaign_keep(&state, &access).await?;
    Ok(Json(state.db.list_hirelings(&keep.id).await?))
}

pub async fn create_hireling(
    State(state): State<AppState>,
    access: CampaignAccess,
    JsonBody(input): JsonBody<HirelingInput>,
) -> ApiResult<(StatusCode, Json<HirelingRecord>)> {
    access.require(Resource::Keep, Action::Manage)?;

    let keep = campaign_keep(&state, &access).await?;
    let name = state.validator.name("name", &input.name)?;
    let Rate(salary, salary_currency) = Rate::parse(
        &state,
        access.campaign_id(),
        "salaryAmount",
        input.salary_amount,
        &input.salary_currency,
    )
    .await?;
    let Rate(profit, profit_currency) = Rate::parse(
        &state,
        access.campaign_id(),
        "profitAmount",
        input.profit_amount,
        &input.profit_currency,
    )
    .await?;

    let hireling = HirelingRecord::new(
        keep.id,
        name,
        (salary, salary_currency),
        (profit, profit_currency),
    );
    state.db.create_hireling(&hireling).await?;
    Ok((StatusCode::CREATED, Json(hireling)))
}

pub async fn update_hireling(
    State(state): State<AppState>,
    access: CampaignAccess,
    Path((_, hireling_id)): Path<(String, String)>,
    JsonBody(input): JsonBody<HirelingInput>,
) -> ApiResult<Json<HirelingRecord>> {
    access.require(Resource::Keep, Action::Manage)?;

    let keep = campaign_keep(&state, &access).await?;
    let mut hireling = state
        .db
        .get_hireling(&keep.id, &hireling_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Hireling {hireling_id}")))?;

    let Rate(salary, salary_currency) = Rate::parse(
        &state,
        access.campaign_id(),
        "salaryAmount",
        input.salary_amount,
        &input.salary_currency,
    )
    .await?;
    let Rate(profit, profit_currency) = Rate::parse(
        &state,
        access.campaign_id(),
        "profitAmount",
        input.profit_amount,
        &input.profit_currency,
    )
    .await?;

    hireling.name = state.validator.name("name", &input.name)?;
    hireling.salary_amount = salary;
    hireling.salary_currency = salary_currency;
    hireling.profit_amount = profit;
    hireling.profit_currency = profit_currency;
    hireling.updated_at = now_timestamp();

    state.db.update_hireling(&hireling).await?;
    Ok(Json(hireling))
}

pub async fn delete_hireling(
    State(state): State<AppState>,
    access: CampaignAccess,
    Path((_, hireling_id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    access.require(Resource::Keep, Action::Manage)?;

    let keep = campaign_keep(&state, &access).await?;
    if state.db.get_hireling(&keep.id, &hireling_id).await?.is_none() {
        return Err(ApiError::NotFound(format!("Hireling {hireling_id}")));
    }
    state.db.delete_hireling(&keep.id, &hireling_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Ledger and Check-ins
// ============================================================================

pub async fn preview_ledger(
    State(state): State<AppState>,
    access: CampaignAccess,
    JsonBody(input): JsonBody<WeeksInput>,
) -> ApiResult<Json<KeepLedger>> {
    access.require(Resource::Keep, Action::Read)?;

    let keep = campaign_keep(&state, &access).await?;
    let ledger = keep::preview_ledger(&state.db, &keep.id, input.weeks).await?;
    Ok(Json(ledger))
}

pub async fn record_check_in(
    State(state): State<AppState>,
    access: CampaignAccess,
    JsonBody(input): JsonBody<WeeksInput>,
) -> ApiResult<(StatusCode, Json<CheckIn>)> {
    access.require(Resource::Keep, Action::Manage)?;

    let keep = campaign_keep(&state, &access).await?;
    let check_in = keep::settle_keep(&state.db, &keep.id, input.weeks).await?;
    Ok((StatusCode::CREATED, Json(check_in)))
}

pub async fn list_check_ins(
    State(state): State<AppState>,
    access: CampaignAccess,
    QueryParams(query): QueryParams<HistoryQuery>,
) -> ApiResult<Json<CheckInPage>> {
    access.require(Resource::Keep, Action::Read)?;

    let keep = campaign_keep(&state, &access).await?;
    let request = PageRequest::new(query.page, query.page_size, &state.history);
    Ok(Json(keep::list_check_ins(&state.db, &keep.id, request).await?))
}

pub async fn get_check_in(
    State(state): State<AppState>,
    access: CampaignAccess,
    Path((_, check_in_id)): Path<(String, String)>,
) -> ApiResult<Json<CheckInView>> {
    access.require(Resource::Keep, Action::Read)?;

    let keep = campaign_keep(&state, &access).await?;
    let record = state
        .db
        .get_check_in(&keep.id, &check_in_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Check-in {check_in_id}")))?;

    let check_in = CheckIn::try_from(record)?;
    Ok(Json(keep::format_check_in(&check_in)))
}
