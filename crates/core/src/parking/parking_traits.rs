use async_trait::async_trait;

use super::parking_model::{ParkingSession, SessionTarget, StartParking, StatusPreview};
use crate::accounts::{CurrentAccount, LedgerEntry};
use crate::errors::Result;

/// Trait for parking session repository operations
///
/// Implementations should also refuse to store a second active session for
/// the same patent, reporting `DatabaseError::UniqueViolation`.
#[async_trait]
pub trait ParkingSessionRepositoryTrait: Send + Sync {
    fn find_active_by_patent(&self, patent: &str) -> Result<Option<ParkingSession>>;

    /// Most recently started active session of the user, if any.
    fn find_active_by_user(&self, user_id: &str) -> Result<Option<ParkingSession>>;

    fn find_by_id(&self, session_id: &str) -> Result<Option<ParkingSession>>;

    /// All sessions of a user, newest first.
    fn list_by_user(&self, user_id: &str) -> Result<Vec<ParkingSession>>;

    async fn create(&self, session: ParkingSession) -> Result<ParkingSession>;

    /// Overwrites the stored session. Fails with `DatabaseError::NotFound`
    /// for an unknown id.
    async fn update(&self, session: ParkingSession) -> Result<ParkingSession>;

    /// Stores the finished `session` together with the settled `account` and
    /// its ledger `entry`, all or nothing.
    ///
    /// Fails with `DatabaseError::NotFound` when the stored session is no
    /// longer active, and with `DatabaseError::TransactionFailed` when the
    /// stored balance differs from `entry.previous_balance()`.
    async fn finish_and_settle(
        &self,
        session: ParkingSession,
        account: CurrentAccount,
        entry: LedgerEntry,
    ) -> Result<ParkingSession>;
}

/// Trait for the session lifecycle engine
#[async_trait]
pub trait ParkingServiceTrait: Send + Sync {
    /// Starts metering a vehicle.
    async fn start_parking(&self, request: StartParking) -> Result<ParkingSession>;

    /// Finishes the active session of a vehicle or user and settles its cost.
    async fn finish_parking(&self, target: SessionTarget) -> Result<ParkingSession>;

    /// Current cost of the user's active session. `None` when nothing is
    /// running.
    fn status_preview(&self, user_id: &str) -> Result<Option<StatusPreview>>;

    fn has_active_session(&self, user_id: &str) -> Result<bool>;

    fn get_session(&self, session_id: &str) -> Result<ParkingSession>;

    fn list_sessions(&self, user_id: &str) -> Result<Vec<ParkingSession>>;
}
