//! Creature (bestiary) handlers
//!
//! Players only ever see creatures flagged `visibleToPlayers`; a hidden
//! creature answers 404 to them rather than 403.

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
use crate::database::models::now_timestamp;
use crate::database::{CreatureOps, CreatureRecord};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatureInput {
    pub name: String,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub challenge_rating: Option<String>,
    #[serde(default)]
    pub armor_class: Option<i64>,
    #[serde(default)]
    pub hit_points: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub visible_to_players: bool,
}

impl CreatureInput {
    fn apply(&self, state: &AppState, creature: &mut CreatureRecord) -> ApiResult<()> {
        let v = &state.validator;
        creature.name = v.name("name", &self.name)?;
        creature.kind = v.optional_text("kind", self.kind.as_deref())?;
        creature.challenge_rating = v.optional_text("challengeRating", self.challenge_rating.as_deref())?;
        creature.armor_class = v.count("armorClass", self.armor_class)?;
        creature.hit_points = v.count("hitPoints", self.hit_points)?;
        creature.description = v.optional_text("description", self.description.as_deref())?;
        creature.visible_to_players = self.visible_to_players;
        Ok(())
    }
}

async fn find_creature(
    state: &AppState,
    access: &CampaignAccess,
    creature_id: &str,
) -> ApiResult<CreatureRecord> {
    state
        .db
        .get_creature(access.campaign_id(), creature_id)
        .await?
        .filter(|c| c.visible_to_players || access.role.is_manager())
        .ok_or_else(|| ApiError::NotFound(format!("Creature {creature_id}")))
}

pub async fn list_creatures(
    State(state): State<AppState>,
    access: CampaignAccess,
) -> ApiResult<Json<Vec<CreatureRecord>>> {
    access.require(Resource::Creatures, Action::Read)?;

    let visible_only = !access.role.is_manager();
    Ok(Json(
        state
            .db
            .list_creatures(access.campaign_id(), visible_only)
            .await?,
    ))
}

pub async fn get_creature(
    State(state): State<AppState>,
    access: CampaignAccess,
    Path((_, creature_id)): Path<(String, String)>,
) -> ApiResult<Json<CreatureRecord>> {
    access.require(Resource::Creatures, Action::Read)?;
    Ok(Json(find_creature(&state, &access, &creature_id).await?))
}

pub async fn create_creature(
    State(state): State<AppState>,
    access: CampaignAccess,
    JsonBody(input): JsonBody<CreatureInput>,
) -> ApiResult<(StatusCode, Json<CreatureRecord>)> {
    access.require(Resource::Creatures, Action::Manage)?;

    let mut creature = CreatureRecord::new(access.campaign_id().to_string(), String::new());
    input.apply(&state, &mut creature)?;

    state.db.create_creature(&creature).await?;
    Ok((StatusCode::CREATED, Json(creature)))
}

pub async fn update_creature(
    State(state): State<AppState>,
    access: CampaignAccess,
    Path((_, creature_id)): Path<(String, String)>,
    JsonBody(input): JsonBody<CreatureInput>,
) -> ApiResult<Json<CreatureRecord>> {
    access.require(Resource::Creatures, Action::Manage)?;

    let mut creature = find_creature(&state, &access, &creature_id).await?;
    input.apply(&state, &mut creature)?;
    creature.updated_at = now_timestamp();

    state.db.update_creature(&creature).await?;
    Ok(Json(creature))
}

pub async fn delete_creature(
    State(state): State<AppState>,
    access: CampaignAccess,
    Path((_, creature_id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    access.require(Resource::Creatures, Action::Manage)?;

    find_creature(&state, &access, &creature_id).await?;
    state.db.delete_creature(access.campaign_id(), &creature_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
