//! Shop handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::auth::CampaignAccess;
use super::currencies::ensure_currency;
use super::extract::JsonBody;
use super::{ApiError, ApiResult, AppState};
use crate::core::access::{Action, Resource};
use crate::database::models::now_timestamp;
use crate::database::{ShopItemRecord, ShopOps, ShopRecord, ShopWithItems};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopInput {
    pub name: String,
    #[serde(default)]
    pub keeper: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopItemInput {
    pub name: String,
    pub price: f64,
    pub currency: String,
    /// Omitted for unlimited stock.
    #[serde(default)]
    pub quantity: Option<i64>,
}

async fn find_shop(state: &AppState, campaign_id: &str, shop_id: &str) -> ApiResult<ShopRecord> {
    state
        .db
        .get_shop(campaign_id, shop_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Shop {shop_id}")))
}

pub async fn list_shops(
    State(state): State<AppState>,
    access: CampaignAccess,
) -> ApiResult<Json<Vec<ShopWithItems>>> {
    access.require(Resource::Shops, Action::Read)?;

    let shops = state.db.list_shops(access.campaign_id()).await?;
    let mut result = Vec::with_capacity(shops.len());
    for shop in shops {
        let items = state.db.list_shop_items(&shop.id).await?;
        result.push(ShopWithItems { shop, items });
    }
    Ok(Json(result))
}

pub async fn create_shop(
    State(state): State<AppState>,
    access: CampaignAccess,
    JsonBody(input): JsonBody<ShopInput>,
) -> ApiResult<(StatusCode, Json<ShopRecord>)> {
    access.require(Resource::Shops, Action::Manage)?;

    let v = &state.validator;
    let mut shop = ShopRecord::new(access.campaign_id().to_string(), v.name("name", &input.name)?);
    shop.keeper = v.optional_text("keeper", input.keeper.as_deref())?;
    shop.description = v.optional_text("description", input.description.as_deref())?;

    state.db.create_shop(&shop).await?;
    Ok((StatusCode::CREATED, Json(shop)))
}

pub async fn get_shop(
    State(state): State<AppState>,
    access: CampaignAccess,
    Path((_, shop_id)): Path<(String, String)>,
) -> ApiResult<Json<ShopWithItems>> {
    access.require(Resource::Shops, Action::Read)?;

    let shop = find_shop(&state, access.campaign_id(), &shop_id).await?;
    let items = state.db.list_shop_items(&shop.id).await?;
    Ok(Json(ShopWithItems { shop, items }))
}

pub async fn update_shop(
    State(state): State<AppState>,
    access: CampaignAccess,
    Path((_, shop_id)): Path<(String, String)>,
    JsonBody(input): JsonBody<ShopInput>,
) -> ApiResult<Json<ShopRecord>> {
    access.require(Resource::Shops, Action::Manage)?;

    let mut shop = find_shop(&state, access.campaign_id(), &shop_id).await?;
    let v = &state.validator;
    shop.name = v.name("name", &input.name)?;
    shop.keeper = v.optional_text("keeper", input.keeper.as_deref())?;
    shop.description = v.optional_text("description", input.description.as_deref())?;
    shop.updated_at = now_timestamp();

    state.db.update_shop(&shop).await?;
    Ok(Json(shop))
}

pub async fn delete_shop(
    State(state): State<AppState>,
    access: CampaignAccess,
    Path((_, shop_id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    access.require(Resource::Shops, Action::Manage)?;

    find_shop(&state, access.campaign_id(), &shop_id).await?;
    state.db.delete_shop(access.campaign_id(), &shop_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn item_fields(
    state: &AppState,
    campaign_id: &str,
    input: &ShopItemInput,
) -> ApiResult<(String, f64, String, Option<i64>)> {
    let v = &state.validator;
    let name = v.name("name", &input.name)?;
    let price = v.amount("price", input.price)?;
    let currency = v.abbreviation("currency", &input.currency)?;
    let quantity = v.count("quantity", input.quantity)?;
    ensure_currency(state, campaign_id, &currency).await?;
    Ok((name, price, currency, quantity))
}

pub async fn add_item(
    State(state): State<AppState>,
    access: CampaignAccess,
    Path((_, shop_id)): Path<(String, String)>,
    JsonBody(input): JsonBody<ShopItemInput>,
) -> ApiResult<(StatusCode, Json<ShopItemRecord>)> {
    access.require(Resource::Shops, Action::Manage)?;

    let shop = find_shop(&state, access.campaign_id(), &shop_id).await?;
    let (name, price, currency, quantity) = item_fields(&state, access.campaign_id(), &input).await?;

    let mut item = ShopItemRecord::new(shop.id, name, price, currency);
    item.quantity = quantity;
    state.db.add_shop_item(&item).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_item(
    State(state): State<AppState>,
    access: CampaignAccess,
    Path((_, shop_id, item_id)): Path<(String, String, String)>,
    JsonBody(input): JsonBody<ShopItemInput>,
) -> ApiResult<Json<ShopItemRecord>> {
    access.require(Resource::Shops, Action::Manage)?;

    let shop = find_shop(&state, access.campaign_id(), &shop_id).await?;
    let mut item = state
        .db
        .get_shop_item(&shop.id, &item_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Shop item {item_id}")))?;

    let (name, price, currency, quantity) = item_fields(&state, access.campaign_id(), &input).await?;
    item.name = name;
    item.price = price;
    item.currency = currency;
    item.quantity = quantity;

    state.db.update_shop_item(&item).await?;
    Ok(Json(item))
}

pub async fn remove_item(
    State(state): State<AppState>,
    access: CampaignAccess,
    Path((_, shop_id, item_id)): Path<(String, String, String)>,
) -> ApiResult<StatusCode> {
    access.require(Resource::Shops, Action::Manage)?;

    let shop = find_shop(&state, access.campaign_id(), &shop_id).await?;
    if state.db.get_shop_item(&shop.id, &item_id).await?.is_none() {
        return Err(ApiError::NotFound(format!("Shop item {item_id}")));
    }
    state.db.remove_shop_item(&shop.id, &item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
