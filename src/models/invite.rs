//! Invite code models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::Role;

/// Single-use invite code stored in database.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InviteCode {
    pub code: String,
    /// Role granted to the profile created from this code
    pub role: Role,
    pub created_at: DateTime<Utc>,
    /// Profile created from this code, once redeemed
    pub used_by: Option<Uuid>,
    pub used_at: Option<DateTime<Utc>>,
}

impl InviteCode {
    pub fn is_used(&self) -> bool {
        self.used_at.is_some()
    }
}

/// Request body for minting invite codes.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateInvitesRequest {
    /// Number of codes to mint (default: 1, max: 50)
    pub count: Option<u32>,
    /// Role granted on redemption (default: student)
    pub role: Option<Role>,
}

/// Response after minting invite codes.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateInvitesResponse {
    pub codes: Vec<String>,
    pub role: Role,
}

/// Request body for redeeming an invite code.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RedeemInviteRequest {
    pub code: String,
    pub username: String,
}

/// Request body for logging in.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    /// Personal access key issued at redemption
    pub access_key: String,
}

/// Response after redemption or login.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    /// Bearer token for subsequent requests
    pub token: String,
    pub expires_in: u64,
    /// Personal access key. Only returned once, at redemption.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,
    pub profile: super::ProfileResponse,
}

/// Session JWT claims.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub iss: String,
    pub exp: usize,
    pub iat: usize,
    pub username: String,
}
