//! Request identity and campaign scoping
//!
//! Authentication happens upstream; the caller's user id arrives in the
//! [`IDENTITY_HEADER`] header. [`CampaignAccess`] resolves the caller's
//! effective role in the campaign named by the `:campaign_id` path segment
//! once per request, and handlers assert the permission they need.

use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use super::error::ApiError;
use super::AppState;
use crate::core::access::{self, AccessError, Action, Resource, Role};
use crate::database::{CampaignOps, CampaignRecord, MemberOps};

/// Header carrying the authenticated user id.
pub const IDENTITY_HEADER: &str = "x-user-id";

/// Authenticated caller
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(IDENTITY_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(AccessError::Unauthenticated)?;

        Ok(Self {
            user_id: user_id.to_string(),
        })
    }
}

/// Caller's resolved standing in one campaign
#[derive(Debug, Clone)]
pub struct CampaignAccess {
    pub campaign: CampaignRecord,
    pub user_id: String,
    pub role: Role,
}

impl CampaignAccess {
    pub fn campaign_id(&self) -> &str {
        &self.campaign.id
    }

    pub fn require(&self, resource: Resource, action: Action) -> Result<(), ApiError> {
        access::require(self.role, resource, action).map_err(ApiError::from)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CampaignAccess {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;

        let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::Internal(format!("campaign route without path params: {e}")))?;
        let campaign_id = params
            .get("campaign_id")
            .ok_or_else(|| ApiError::Internal("route has no :campaign_id segment".to_string()))?;

        let campaign = state
            .db
            .get_campaign(campaign_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Campaign {campaign_id}")))?;

        let membership = state.db.get_member(campaign_id, &user.user_id).await?;
        let role = state
            .policy
            .effective_role(&user.user_id, membership.as_ref())
            .ok_or_else(|| AccessError::NotMember {
                campaign_id: campaign_id.clone(),
            })?;

        tracing::debug!(
            campaign_id = %campaign.id,
            user_id = %user.user_id,
            role = %role,
            "Resolved campaign access"
        );

        Ok(Self {
            campaign,
            user_id: user.user_id,
            role,
        })
    }
}
