//! User profile domain model, roles, and DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::lifecycle::InactivityTier;

/// Minimum username length.
pub const USERNAME_MIN_LEN: usize = 3;
/// Maximum username length.
pub const USERNAME_MAX_LEN: usize = 32;

/// Ordered permission tier.
///
/// `SuperUser` is the only role allowed to run the reaper, is hidden from the
/// public leaderboard and is never purged.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Student,
    Moderator,
    EliteModerator,
    SuperUser,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Moderator => "moderator",
            Self::EliteModerator => "elite_moderator",
            Self::SuperUser => "super_user",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "student" => Some(Self::Student),
            "moderator" | "mod" => Some(Self::Moderator),
            "elite_moderator" | "elite_mod" => Some(Self::EliteModerator),
            "super_user" | "superuser" => Some(Self::SuperUser),
            _ => None,
        }
    }

    pub fn is_moderator(&self) -> bool {
        *self >= Self::Moderator
    }

    pub fn is_elite_mod(&self) -> bool {
        *self >= Self::EliteModerator
    }

    pub fn is_super_user(&self) -> bool {
        matches!(self, Self::SuperUser)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User profile as held by the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
    pub streak_count: u32,
    pub streak_points: u32,
    pub last_mock_date: Option<NaiveDate>,
    pub total_percentage_points: f64,
    pub total_exams_completed: u32,
    #[serde(skip)]
    pub access_key_hash: String,
    pub created_at: DateTime<Utc>,
    /// Local calendar day the account was created on
    pub created_on: NaiveDate,
}

impl UserProfile {
    /// Lifetime average percentage, `None` before the first exam.
    pub fn gpa(&self) -> Option<f64> {
        if self.total_exams_completed == 0 {
            None
        } else {
            Some(self.total_percentage_points / f64::from(self.total_exams_completed))
        }
    }

    /// Day the inactivity clock runs from: the last scored activity, or the
    /// day the account was created if there has been none yet.
    pub fn activity_anchor(&self) -> NaiveDate {
        self.last_mock_date.unwrap_or(self.created_on)
    }
}

/// Fields required to create a profile.
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
    pub access_key_hash: String,
    pub created_at: DateTime<Utc>,
    /// `created_at` truncated to the portal's local day
    pub created_on: NaiveDate,
}

impl NewProfile {
    /// Materialize the profile a store persists for this request.
    pub fn into_profile(self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username,
            role: self.role,
            streak_count: 0,
            streak_points: 0,
            last_mock_date: None,
            total_percentage_points: 0.0,
            total_exams_completed: 0,
            access_key_hash: self.access_key_hash,
            created_at: self.created_at,
            created_on: self.created_on,
        }
    }
}

/// Partial update of a profile. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePatch {
    pub role: Option<Role>,
    pub streak_count: Option<u32>,
    pub streak_points: Option<u32>,
    pub last_mock_date: Option<Option<NaiveDate>>,
    pub total_percentage_points: Option<f64>,
    pub total_exams_completed: Option<u32>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Patch carrying every field of `after` that differs from `before`.
    pub fn diff(before: &UserProfile, after: &UserProfile) -> Self {
        fn changed<T: PartialEq + Clone>(a: &T, b: &T) -> Option<T> {
            (a != b).then(|| b.clone())
        }

        Self {
            role: changed(&before.role, &after.role),
            streak_count: changed(&before.streak_count, &after.streak_count),
            streak_points: changed(&before.streak_points, &after.streak_points),
            last_mock_date: changed(&before.last_mock_date, &after.last_mock_date),
            total_percentage_points: changed(
                &before.total_percentage_points,
                &after.total_percentage_points,
            ),
            total_exams_completed: changed(
                &before.total_exams_completed,
                &after.total_exams_completed,
            ),
        }
    }

    /// Apply the patch to an in-memory snapshot.
    pub fn apply_to(&self, profile: &mut UserProfile) {
        if let Some(role) = self.role {
            profile.role = role;
        }
        if let Some(count) = self.streak_count {
            profile.streak_count = count;
        }
        if let Some(points) = self.streak_points {
            profile.streak_points = points;
        }
        if let Some(date) = self.last_mock_date {
            profile.last_mock_date = date;
        }
        if let Some(total) = self.total_percentage_points {
            profile.total_percentage_points = total;
        }
        if let Some(exams) = self.total_exams_completed {
            profile.total_exams_completed = exams;
        }
    }
}

/// Validate and normalize a requested username.
///
/// Returns the trimmed name, or a message describing the problem.
pub fn validate_username(raw: &str) -> Result<String, String> {
    let name = raw.trim();
    let len = name.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(format!(
            "Username must be between {} and {} characters",
            USERNAME_MIN_LEN, USERNAME_MAX_LEN
        ));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        return Err("Username may only contain letters, digits, '_', '.' and '-'".to_string());
    }
    Ok(name.to_string())
}

/// Profile as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
    pub streak_count: u32,
    pub streak_points: u32,
    pub last_mock_date: Option<NaiveDate>,
    pub total_exams_completed: u32,
    /// Lifetime average percentage
    pub gpa: Option<f64>,
    pub inactivity: InactivityTier,
    pub created_at: DateTime<Utc>,
}

impl ProfileResponse {
    pub fn new(profile: UserProfile, today: NaiveDate) -> Self {
        let inactivity = crate::lifecycle::classify_inactivity(Some(profile.activity_anchor()), today);
        Self {
            gpa: profile.gpa(),
            inactivity,
            id: profile.id,
            username: profile.username,
            role: profile.role,
            streak_count: profile.streak_count,
            streak_points: profile.streak_points,
            last_mock_date: profile.last_mock_date,
            total_exams_completed: profile.total_exams_completed,
            created_at: profile.created_at,
        }
    }
}

/// Request body for changing a user's role.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetRoleRequest {
    pub role: Role,
}
