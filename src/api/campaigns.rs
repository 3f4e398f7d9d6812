//! Campaign handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::auth::{AuthUser, CampaignAccess};
use super::extract::JsonBody;
use super::{ApiResult, AppState};
use crate::core::access::{Action, Resource, Role};
use crate::database::models::now_timestamp;
use crate::database::{CampaignOps, CampaignRecord, CampaignRole, MemberRecord};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignInput {
    pub name: String,
    pub system: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Creator's display name; defaults to the user id.
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Campaign plus the caller's role in it
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignView {
    #[serde(flatten)]
    pub campaign: CampaignRecord,
    pub role: Role,
}

pub async fn list_campaigns(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<CampaignRecord>>> {
    let campaigns = if state.policy.is_admin(&user.user_id) {
        state.db.list_campaigns().await?
    } else {
        state.db.list_campaigns_for_user(&user.user_id).await?
    };
    Ok(Json(campaigns))
}

pub async fn create_campaign(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(input): JsonBody<CampaignInput>,
) -> ApiResult<(StatusCode, Json<CampaignView>)> {
    let v = &state.validator;
    let mut campaign = CampaignRecord::new(
        v.name("name", &input.name)?,
        v.name("system", &input.system)?,
    );
    campaign.description = v.optional_text("description", input.description.as_deref())?;

    let display_name = match input.display_name.as_deref() {
        Some(name) => v.name("displayName", name)?,
        None => user.user_id.clone(),
    };
    let owner = MemberRecord::new(
        campaign.id.clone(),
        user.user_id.clone(),
        display_name,
        CampaignRole::DungeonMaster,
    );

    state.db.create_campaign(&campaign, &owner).await?;
    info!(campaign_id = %campaign.id, owner = %user.user_id, "Campaign created");

    Ok((
        StatusCode::CREATED,
        Json(CampaignView {
            campaign,
            role: Role::DungeonMaster,
        }),
    ))
}

pub async fn get_campaign(access: CampaignAccess) -> ApiResult<Json<CampaignView>> {
    access.require(Resource::Campaign, Action::Read)?;
    Ok(Json(CampaignView {
        role: access.role,
        campaign: access.campaign,
    }))
}

pub async fn update_campaign(
    State(state): State<AppState>,
    access: CampaignAccess,
    JsonBody(input): JsonBody<CampaignInput>,
) -> ApiResult<Json<CampaignRecord>> {
    access.require(Resource::Campaign, Action::Manage)?;

    let v = &state.validator;
    let mut campaign = access.campaign;
    campaign.name = v.name("name", &input.name)?;
    campaign.system = v.name("system", &input.system)?;
    campaign.description = v.optional_text("description", input.description.as_deref())?;
    campaign.updated_at = now_timestamp();

    state.db.update_campaign(&campaign).await?;
    Ok(Json(campaign))
}

pub async fn delete_campaign(
    State(state): State<AppState>,
    access: CampaignAccess,
) -> ApiResult<StatusCode> {
    access.require(Resource::Campaign, Action::Manage)?;

    state.db.delete_campaign(access.campaign_id()).await?;
    info!(campaign_id = %access.campaign_id(), user_id = %access.user_id, "Campaign deleted");
    Ok(StatusCode::NO_CONTENT)
}
