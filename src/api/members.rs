//! Campaign membership handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use super::auth::CampaignAccess;
use super::extract::JsonBody;
use super::{ApiError, ApiResult, AppState};
use crate::core::access::{Action, Resource};
use crate::core::input_validator::ValidationError;
use crate::database::{CampaignRole, MemberOps, MemberRecord};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberInput {
    pub user_id: String,
    pub display_name: String,
    pub role: CampaignRole,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberInput {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub role: Option<CampaignRole>,
}

pub async fn list_members(
    State(state): State<AppState>,
    access: CampaignAccess,
) -> ApiResult<Json<Vec<MemberRecord>>> {
    access.require(Resource::Members, Action::Read)?;
    Ok(Json(state.db.list_members(access.campaign_id()).await?))
}

pub async fn add_member(
    State(state): State<AppState>,
    access: CampaignAccess,
    JsonBody(input): JsonBody<AddMemberInput>,
) -> ApiResult<(StatusCode, Json<MemberRecord>)> {
    access.require(Resource::Members, Action::Manage)?;

    let v = &state.validator;
    let user_id = input.user_id.trim();
    if user_id.is_empty() {
        return Err(ValidationError::Empty { field: "userId" }.into());
    }

    if state.db.get_member(access.campaign_id(), user_id).await?.is_some() {
        return Err(ApiError::Conflict(format!(
            "User {user_id} is already a member of this campaign"
        )));
    }

    let member = MemberRecord::new(
        access.campaign_id().to_string(),
        user_id.to_string(),
        v.name("displayName", &input.display_name)?,
        input.role,
    );
    state.db.add_member(&member).await?;
    info!(campaign_id = %member.campaign_id, user_id = %member.user_id, role = %member.role, "Member added");

    Ok((StatusCode::CREATED, Json(member)))
}

pub async fn update_member(
    State(state): State<AppState>,
    access: CampaignAccess,
    Path((_, user_id)): Path<(String, String)>,
    JsonBody(input): JsonBody<UpdateMemberInput>,
) -> ApiResult<Json<MemberRecord>> {
    access.require(Resource::Members, Action::Manage)?;

    let mut member = find_member(&state, access.campaign_id(), &user_id).await?;

    if let Some(name) = input.display_name.as_deref() {
        member.display_name = state.validator.name("displayName", name)?;
    }
    if let Some(role) = input.role {
        member.role = role.as_str().to_string();
    }

    if !state.db.update_member(&member).await? {
        return Err(last_dm_or_missing(&state, access.campaign_id(), &user_id).await);
    }
    Ok(Json(member))
}

pub async fn remove_member(
    State(state): State<AppState>,
    access: CampaignAccess,
    Path((_, user_id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    access.require(Resource::Members, Action::Manage)?;

    if !state.db.remove_member(access.campaign_id(), &user_id).await? {
        return Err(last_dm_or_missing(&state, access.campaign_id(), &user_id).await);
    }
    info!(campaign_id = %access.campaign_id(), user_id = %user_id, "Member removed");
    Ok(StatusCode::NO_CONTENT)
}

async fn find_member(state: &AppState, campaign_id: &str, user_id: &str) -> ApiResult<MemberRecord> {
    state
        .db
        .get_member(campaign_id, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Member {user_id}")))
}

/// A write that changed no row either targeted a missing member or would
/// have left the campaign without a DM.
async fn last_dm_or_missing(state: &AppState, campaign_id: &str, user_id: &str) -> ApiError {
    match find_member(state, campaign_id, user_id).await {
        Ok(_) => ApiError::Conflict("A campaign must keep at least one DM".to_string()),
        Err(err) => err,
    }
}
