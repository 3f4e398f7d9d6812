//! Campaign Access Policy
//!
//! All authorization decisions go through [`permits`], a single table keyed
//! by effective role, resource and action. Site administrators are named in
//! configuration; every other role comes from campaign membership.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::database::{CampaignRole, MemberRecord};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Not a member of campaign {campaign_id}")]
    NotMember { campaign_id: String },

    #[error("Role '{role}' may not {action} {resource}")]
    Denied {
        role: Role,
        resource: Resource,
        action: Action,
    },
}

// ============================================================================
// Roles, Resources, Actions
// ============================================================================

/// Effective role of a caller within one campaign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    #[serde(rename = "dm")]
    DungeonMaster,
    Player,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::DungeonMaster => "dm",
            Role::Player => "player",
        }
    }

    /// Admins and DMs manage a campaign; players only view it.
    pub fn is_manager(&self) -> bool {
        matches!(self, Role::Admin | Role::DungeonMaster)
    }
}

impl From<CampaignRole> for Role {
    fn from(role: CampaignRole) -> Self {
        match role {
            CampaignRole::DungeonMaster => Role::DungeonMaster,
            CampaignRole::Player => Role::Player,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Campaign,
    Members,
    Currencies,
    Keep,
    Shops,
    Creatures,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Resource::Campaign => "the campaign",
            Resource::Members => "members",
            Resource::Currencies => "currencies",
            Resource::Keep => "the player keep",
            Resource::Shops => "shops",
            Resource::Creatures => "creatures",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Read,
    Manage,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Action::Read => "read",
            Action::Manage => "manage",
        })
    }
}

/// The permission table.
pub fn permits(role: Role, resource: Resource, action: Action) -> bool {
    match (role, action) {
        (Role::Admin | Role::DungeonMaster, _) => true,
        (Role::Player, Action::Read) => matches!(
            resource,
            Resource::Campaign
                | Resource::Members
                | Resource::Currencies
                | Resource::Keep
                | Resource::Shops
                | Resource::Creatures
        ),
        (Role::Player, Action::Manage) => false,
    }
}

/// Check a permission, producing the matching error on refusal.
pub fn require(role: Role, resource: Resource, action: Action) -> Result<(), AccessError> {
    if permits(role, resource, action) {
        Ok(())
    } else {
        Err(AccessError::Denied {
            role,
            resource,
            action,
        })
    }
}

// ============================================================================
// Policy
// ============================================================================

/// Resolves callers to effective roles
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    admins: HashSet<String>,
}

impl AccessPolicy {
    pub fn new<I, S>(admins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            admins: admins.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_admin(&self, user_id: &str) -> bool {
        self.admins.contains(user_id)
    }

    /// Site admins outrank any membership; non-members without admin rights
    /// have no role at all.
    pub fn effective_role(&self, user_id: &str, membership: Option<&MemberRecord>) -> Option<Role> {
        if self.is_admin(user_id) {
            return Some(Role::Admin);
        }
        membership.map(|member| Role::from(member.campaign_role()))
    }
}
