//! Domain models for the exam portal.

pub mod invite;
pub mod leaderboard;
pub mod note;
pub mod profile;
pub mod score;

// Re-export commonly used types
pub use invite::{
    CreateInvitesRequest, CreateInvitesResponse, InviteCode, LoginRequest, RedeemInviteRequest,
    SessionClaims, SessionResponse,
};
pub use leaderboard::{LeaderboardEntry, LeaderboardQuery, LeaderboardResponse, SweepReport};
pub use note::{CreateNoteRequest, NoteListResponse, PersonalNote};
pub use profile::{
    NewProfile, ProfilePatch, ProfileResponse, Role, SetRoleRequest, UserProfile,
    validate_username,
};
pub use score::{
    ScoreListResponse, Score, SubmitScoreRequest, SubmitScoreResponse, score_credit,
};
