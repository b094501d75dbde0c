//! Database operations for invite codes.

use sea_orm::*;
use tracing::debug;

use super::{DbPool, profiles};
use crate::entity::invite_code;
use crate::error::AppResult;
use crate::models::{InviteCode, NewProfile, Role};
use crate::store::Redemption;

impl DbPool {
    /// Insert a new invite code.
    pub async fn insert_invite_row(&self, invite: &InviteCode) -> AppResult<()> {
        let model = invite_code::ActiveModel {
            code: Set(invite.code.clone()),
            role: Set(invite.role.as_str().to_string()),
            created_at: Set(invite.created_at),
            used_by: Set(invite.used_by),
            used_at: Set(invite.used_at),
        };

        invite_code::Entity::insert(model)
            .exec(self.connection())
            .await?;

        Ok(())
    }

    /// Find an invite code.
    pub async fn find_invite_row(&self, code: &str) -> AppResult<Option<InviteCode>> {
        let result = invite_code::Entity::find_by_id(code.to_string())
            .one(self.connection())
            .await?;

        Ok(result.map(model_to_invite))
    }

    /// Consume an invite code and create its profile in one transaction.
    ///
    /// The code row is locked `FOR UPDATE`, so two concurrent redemptions of
    /// the same code serialize and the second sees it used.
    pub async fn redeem_invite_tx(&self, code: &str, new: NewProfile) -> AppResult<Redemption> {
        let txn = self.connection().begin().await?;

        let Some(invite) = invite_code::Entity::find_by_id(code.to_string())
            .lock_exclusive()
            .one(&txn)
            .await?
        else {
            return Ok(Redemption::UnknownCode);
        };

        if invite.used_at.is_some() {
            return Ok(Redemption::CodeUsed);
        }

        if profiles::find_by_username_key(&txn, &new.username)
            .await?
            .is_some()
        {
            return Ok(Redemption::UsernameTaken);
        }

        let created = match profiles::insert(&txn, new).await {
            Ok(created) => created,
            // Lost a race for the same username with a different code
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                debug!("Username taken during redemption: {}", e);
                return Ok(Redemption::UsernameTaken);
            }
            Err(e) => return Err(e.into()),
        };

        let mut active: invite_code::ActiveModel = invite.into();
        active.used_by = Set(Some(created.id));
        active.used_at = Set(Some(created.created_at));
        active.update(&txn).await?;

        txn.commit().await?;

        Ok(Redemption::Created(created))
    }
}

fn model_to_invite(m: invite_code::Model) -> InviteCode {
    InviteCode {
        code: m.code,
        role: Role::parse(&m.role).unwrap_or_default(),
        created_at: m.created_at,
        used_by: m.used_by,
        used_at: m.used_at,
    }
}
