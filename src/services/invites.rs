//! Invite code minting.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{InviteCode, Role};
use crate::store::PortalStore;

/// Invite code prefix.
const INVITE_PREFIX: &str = "inv_";
/// Upper bound on codes minted per request.
pub const MAX_INVITES_PER_REQUEST: u32 = 50;

/// Who is asking for invite codes.
#[derive(Debug, Clone, Copy)]
pub enum InviteIssuer {
    /// Bootstrap admin key; may grant any role.
    AdminKey,
    /// Logged-in profile; must be the super-user.
    Profile(Uuid),
}

/// Generate a random invite code.
pub fn generate_invite_code() -> String {
    let random_bytes: [u8; 12] = rand::random();
    format!("{}{}", INVITE_PREFIX, hex::encode(random_bytes))
}

/// Mint `count` single-use codes granting `role`.
pub async fn mint_invites(
    store: &dyn PortalStore,
    issuer: InviteIssuer,
    count: u32,
    role: Role,
) -> AppResult<Vec<String>> {
    if count == 0 || count > MAX_INVITES_PER_REQUEST {
        return Err(AppError::InvalidInput(format!(
            "Count must be between 1 and {}",
            MAX_INVITES_PER_REQUEST
        )));
    }

    if let InviteIssuer::Profile(id) = issuer {
        let caller = store
            .find_profile(id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Session no longer matches a profile".to_string()))?;
        if !caller.role.is_super_user() {
            return Err(AppError::PermissionDenied(
                "Only the super-user may mint invite codes".to_string(),
            ));
        }
        if role.is_super_user() {
            return Err(AppError::PermissionDenied(
                "Super-user invites require the admin key".to_string(),
            ));
        }
    }

    let mut codes = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let invite = InviteCode {
            code: generate_invite_code(),
            role,
            created_at: Utc::now(),
            used_by: None,
            used_at: None,
        };
        store.insert_invite(&invite).await?;
        codes.push(invite.code);
    }

    info!("Minted {} invite code(s) granting {}", codes.len(), role);
    Ok(codes)
}
