use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use log::debug;
use parking_core::accounts::{CurrentAccount, LedgerEntry};
use parking_core::errors::{DatabaseError, Error, Result};
use parking_core::parking::{ParkingSession, ParkingSessionRepositoryTrait};
use std::sync::Arc;

use super::model::ParkingSessionDB;
use crate::accounts::apply_settlement;
use crate::db::{get_connection, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::parking_sessions;

/// Sessions live in `parking_sessions`. A partial unique index keeps at most
/// one active row per patent.
pub struct ParkingSessionRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl ParkingSessionRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }

    fn to_domain(row: Option<ParkingSessionDB>) -> Result<Option<ParkingSession>> {
        row.map(ParkingSession::try_from)
            .transpose()
            .map_err(Error::from)
    }
}

#[async_trait]
impl ParkingSessionRepositoryTrait for ParkingSessionRepository {
    fn find_active_by_patent(&self, patent: &str) -> Result<Option<ParkingSession>> {
        let mut conn = get_connection(&self.pool)?;
        let row = parking_sessions::table
            .filter(parking_sessions::patent.eq(patent))
            .filter(parking_sessions::active.eq(true))
            .select(ParkingSessionDB::as_select())
            .first::<ParkingSessionDB>(&mut conn)
            .optional()
            .into_core()?;
        Self::to_domain(row)
    }

    fn find_active_by_user(&self, user_id: &str) -> Result<Option<ParkingSession>> {
        let mut conn = get_connection(&self.pool)?;
        let row = parking_sessions::table
            .filter(parking_sessions::user_id.eq(user_id))
            .filter(parking_sessions::active.eq(true))
            .order(parking_sessions::started_at.desc())
            .select(ParkingSessionDB::as_select())
            .first::<ParkingSessionDB>(&mut conn)
            .optional()
            .into_core()?;
        Self::to_domain(row)
    }

    fn find_by_id(&self, session_id: &str) -> Result<Option<ParkingSession>> {
        let mut conn = get_connection(&self.pool)?;
        let row = parking_sessions::table
            .find(session_id)
            .select(ParkingSessionDB::as_select())
            .first::<ParkingSessionDB>(&mut conn)
            .optional()
            .into_core()?;
        Self::to_domain(row)
    }

    fn list_by_user(&self, user_id: &str) -> Result<Vec<ParkingSession>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = parking_sessions::table
            .filter(parking_sessions::user_id.eq(user_id))
            .order(parking_sessions::started_at.desc())
            .select(ParkingSessionDB::as_select())
            .load::<ParkingSessionDB>(&mut conn)
            .into_core()?;

        rows.into_iter()
            .map(|row| ParkingSession::try_from(row).map_err(Error::from))
            .collect()
    }

    async fn create(&self, session: ParkingSession) -> Result<ParkingSession> {
        let session_db = ParkingSessionDB::from(session);
        self.writer
            .exec(move |conn| -> Result<ParkingSession> {
                diesel::insert_into(parking_sessions::table)
                    .values(&session_db)
                    .execute(conn)
                    .into_core()?;
                Ok(ParkingSession::try_from(session_db)?)
            })
            .await
    }

    async fn update(&self, session: ParkingSession) -> Result<ParkingSession> {
        let session_db = ParkingSessionDB::from(session);
        self.writer
            .exec(move |conn| -> Result<ParkingSession> {
                let updated = diesel::update(parking_sessions::table.find(&session_db.id))
                    .set((
                        parking_sessions::finished_at.eq(session_db.finished_at),
                        parking_sessions::active.eq(session_db.active),
                        parking_sessions::amount_charged.eq(&session_db.amount_charged),
                    ))
                    .execute(conn)
                    .into_core()?;
                if updated == 0 {
                    return Err(DatabaseError::NotFound(format!(
                        "Parking session {}",
                        session_db.id
                    ))
                    .into());
                }
                debug!("Updated parking session {}", session_db.id);
                Ok(ParkingSession::try_from(session_db)?)
            })
            .await
    }

    async fn finish_and_settle(
        &self,
        session: ParkingSession,
        account: CurrentAccount,
        entry: LedgerEntry,
    ) -> Result<ParkingSession> {
        let session_db = ParkingSessionDB::from(session);
        self.writer
            .exec(move |conn| -> Result<ParkingSession> {
                // Only an active row may be closed, so a session is billed once
                // even across processes sharing the file.
                let updated = diesel::update(
                    parking_sessions::table
                        .filter(parking_sessions::id.eq(&session_db.id))
                        .filter(parking_sessions::active.eq(true)),
                )
                .set((
                    parking_sessions::finished_at.eq(session_db.finished_at),
                    parking_sessions::active.eq(session_db.active),
                    parking_sessions::amount_charged.eq(&session_db.amount_charged),
                ))
                .execute(conn)
                .into_core()?;
                if updated == 0 {
                    return Err(DatabaseError::NotFound(format!(
                        "Active parking session {}",
                        session_db.id
                    ))
                    .into());
                }

                let account_db = apply_settlement(conn, account, entry)?;
                debug!(
                    "Closed parking session {} and settled account {}",
                    session_db.id, account_db.id
                );
                Ok(ParkingSession::try_from(session_db)?)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::AccountRepository;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use chrono::{Duration, TimeZone, Utc};
    use parking_core::accounts::{settle, AccountRepositoryTrait, NewCurrentAccount};
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    struct Repos {
        sessions: ParkingSessionRepository,
        accounts: AccountRepository,
        _temp_dir: tempfile::TempDir,
    }

    async fn create_test_repositories() -> Repos {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let pool = create_pool(&db_path.to_string_lossy()).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());
        Repos {
            sessions: ParkingSessionRepository::new(pool.clone(), writer.clone()),
            accounts: AccountRepository::new(pool, writer),
            _temp_dir: temp_dir,
        }
    }

    async fn open_account(repos: &Repos, balance: rust_decimal::Decimal) -> CurrentAccount {
        repos
            .accounts
            .create(NewCurrentAccount {
                user_id: "u1".to_string(),
                opening_balance: balance,
            })
            .await
            .unwrap()
    }

    fn t0() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, 10, 0, 0).unwrap()
    }

    // Ledger timestamps after the account row, so entries sort in write order.
    fn settled_at() -> chrono::DateTime<Utc> {
        Utc::now() + Duration::minutes(90)
    }

    #[tokio::test]
    async fn test_create_and_find_active() {
        let repos = create_test_repositories().await;
        let repo = &repos.sessions;
        let session = ParkingSession::start("AB123CD", "u1", "1", t0());
        repo.create(session.clone()).await.unwrap();

        assert_eq!(repo.find_active_by_patent("AB123CD").unwrap(), Some(session.clone()));
        assert_eq!(repo.find_active_by_user("u1").unwrap(), Some(session.clone()));
        assert_eq!(repo.find_by_id(&session.id).unwrap(), Some(session));
        assert_eq!(repo.find_active_by_patent("ZZ999ZZ").unwrap(), None);
    }

    #[tokio::test]
    async fn test_second_active_session_for_patent_is_refused() {
        let repos = create_test_repositories().await;
        let repo = &repos.sessions;
        repo.create(ParkingSession::start("AB123CD", "u1", "1", t0()))
            .await
            .unwrap();

        let err = repo
            .create(ParkingSession::start("AB123CD", "u2", "1", t0()))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Database(DatabaseError::UniqueViolation(_))
        ));
    }

    #[tokio::test]
    async fn test_finished_sessions_free_the_patent() {
        let repos = create_test_repositories().await;
        let repo = &repos.sessions;
        let account = open_account(&repos, dec!(500)).await;
        let first = repo
            .create(ParkingSession::start("AB123CD", "u1", "1", t0()))
            .await
            .unwrap();

        let finished = first.finish(t0() + Duration::minutes(90), dec!(200)).unwrap();
        let (debited, entry) = settle(&account, dec!(200), "Parking AB123CD", settled_at()).unwrap();
        let saved = repo
            .finish_and_settle(finished.clone(), debited, entry)
            .await
            .unwrap();
        assert_eq!(saved, finished);
        assert_eq!(repo.find_active_by_patent("AB123CD").unwrap(), None);
        assert_eq!(repos.accounts.get_by_user("u1").unwrap().balance, dec!(300));

        let second = repo
            .create(ParkingSession::start(
                "AB123CD",
                "u1",
                "1",
                t0() + Duration::hours(2),
            ))
            .await
            .unwrap();

        let history = repo.list_by_user("u1").unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, second.id);
        assert_eq!(history[1].amount_charged, Some(dec!(200)));
        assert_eq!(history[1].finished_at, Some(t0() + Duration::minutes(90)));
    }

    #[tokio::test]
    async fn test_session_is_settled_at_most_once() {
        let repos = create_test_repositories().await;
        let repo = &repos.sessions;
        let account = open_account(&repos, dec!(500)).await;
        let session = repo
            .create(ParkingSession::start("AB123CD", "u1", "1", t0()))
            .await
            .unwrap();
        let finished = session.finish(t0() + Duration::minutes(30), dec!(100)).unwrap();

        let (debited, entry) = settle(&account, dec!(100), "Parking AB123CD", settled_at()).unwrap();
        repo.finish_and_settle(finished.clone(), debited, entry)
            .await
            .unwrap();

        // A second writer working from a fresh balance read still finds the
        // session closed.
        let reread = repos.accounts.get_by_user("u1").unwrap();
        let (debited, entry) = settle(&reread, dec!(100), "Parking AB123CD", settled_at()).unwrap();
        assert!(matches!(
            repo.finish_and_settle(finished, debited, entry).await,
            Err(Error::Database(DatabaseError::NotFound(_)))
        ));

        assert_eq!(repos.accounts.get_by_user("u1").unwrap().balance, dec!(400));
        assert_eq!(repos.accounts.list_entries(&account.id).unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_refused_settlement_keeps_session_active() {
        let repos = create_test_repositories().await;
        let repo = &repos.sessions;
        let account = open_account(&repos, dec!(500)).await;
        let session = repo
            .create(ParkingSession::start("AB123CD", "u1", "1", t0()))
            .await
            .unwrap();

        // The balance moves after the snapshot the settlement was computed from
        let (other, other_entry) = settle(&account, dec!(50), "Parking XY987WV", settled_at()).unwrap();
        repos.accounts.persist(other, other_entry).await.unwrap();

        let finished = session
            .clone()
            .finish(t0() + Duration::minutes(30), dec!(100))
            .unwrap();
        let (stale, stale_entry) = settle(&account, dec!(100), "Parking AB123CD", settled_at()).unwrap();
        assert!(matches!(
            repo.finish_and_settle(finished, stale, stale_entry).await,
            Err(Error::Database(DatabaseError::TransactionFailed(_)))
        ));

        // The session close was rolled back with the refused ledger write
        assert_eq!(repo.find_active_by_patent("AB123CD").unwrap(), Some(session));
        assert_eq!(repos.accounts.get_by_user("u1").unwrap().balance, dec!(450));
        assert_eq!(repos.accounts.list_entries(&account.id).unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_overwrites_stored_session() {
        let repos = create_test_repositories().await;
        let session = repos
            .sessions
            .create(ParkingSession::start("AB123CD", "u1", "1", t0()))
            .await
            .unwrap();
        let finished = session.finish(t0() + Duration::hours(1), dec!(100)).unwrap();

        repos.sessions.update(finished.clone()).await.unwrap();
        assert_eq!(repos.sessions.find_by_id(&finished.id).unwrap(), Some(finished));
    }

    #[tokio::test]
    async fn test_update_unknown_session_is_not_found() {
        let repos = create_test_repositories().await;
        let ghost = ParkingSession::start("AB123CD", "u1", "1", t0())
            .finish(t0(), dec!(100))
            .unwrap();
        assert!(matches!(
            repos.sessions.update(ghost).await,
            Err(Error::Database(DatabaseError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_finish_unknown_session_is_not_found() {
        let repos = create_test_repositories().await;
        let account = open_account(&repos, dec!(500)).await;
        let ghost = ParkingSession::start("AB123CD", "u1", "1", t0())
            .finish(t0(), dec!(100))
            .unwrap();
        let (debited, entry) = settle(&account, dec!(100), "Parking AB123CD", settled_at()).unwrap();

        assert!(matches!(
            repos.sessions.finish_and_settle(ghost, debited, entry).await,
            Err(Error::Database(DatabaseError::NotFound(_)))
        ));
        assert_eq!(repos.accounts.get_by_user("u1").unwrap().balance, dec!(500));
    }
}
