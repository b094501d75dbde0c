//! Migration: Add the local creation day to profiles.
//!
//! Profiles without any activity age from the day they were created. That
//! day must be the portal's local day, not the UTC date of `created_at`.
//! Existing rows are backfilled with the UTC date.

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
                ALTER TABLE profiles ADD COLUMN created_on DATE;

                UPDATE profiles SET created_on = (created_at AT TIME ZONE 'UTC')::date;

                ALTER TABLE profiles ALTER COLUMN created_on SET NOT NULL;

                -- Reaper fallback for profiles that never scored
                CREATE INDEX idx_profiles_created_on ON profiles(created_on)
                    WHERE last_mock_date IS NULL;
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DROP INDEX IF EXISTS idx_profiles_created_on;
                ALTER TABLE profiles DROP COLUMN IF EXISTS created_on;
                "#,
            )
            .await?;

        Ok(())
    }
}
