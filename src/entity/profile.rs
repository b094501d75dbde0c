//! User profile entity.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub username: String,
    /// Lowercased username, unique
    #[sea_orm(unique)]
    pub username_key: String,
    pub role: String,
    pub streak_count: i32,
    pub streak_points: i32,
    pub last_mock_date: Option<Date>,
    pub total_percentage_points: f64,
    pub total_exams_completed: i32,
    pub access_key_hash: String,
    pub created_at: DateTimeUtc,
    /// Local calendar day of `created_at`
    pub created_on: Date,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::score::Entity")]
    Scores,
    #[sea_orm(has_many = "super::personal_note::Entity")]
    PersonalNotes,
}

impl Related<super::score::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Scores.def()
    }
}

impl Related<super::personal_note::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PersonalNotes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
