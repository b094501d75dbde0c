//! Migration: Create invite_codes table.
//!
//! Codes are single use: `used_at` is set in the same transaction that
//! creates the profile.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TABLE invite_codes (
                    code VARCHAR(64) PRIMARY KEY,
                    role VARCHAR(20) NOT NULL DEFAULT 'student'
                        CHECK (role IN ('student', 'moderator', 'elite_moderator', 'super_user')),
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    -- Not a foreign key: the profile may be purged later
                    used_by UUID,
                    used_at TIMESTAMPTZ,
                    CHECK ((used_by IS NULL) = (used_at IS NULL))
                );

                CREATE INDEX idx_invite_codes_unused ON invite_codes(created_at)
                    WHERE used_at IS NULL;
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS invite_codes CASCADE;")
            .await?;

        Ok(())
    }
}
