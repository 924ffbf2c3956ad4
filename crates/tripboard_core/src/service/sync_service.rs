//! Session sync between the in-memory store and the trip document repository.
//!
//! # Responsibility
//! - Follow sign-in/sign-out and load the signed-in user's trips.
//! - Save point-in-time snapshots of the store and expose a status flag.
//!
//! # Invariants
//! - No signed-in user means an empty trip list.
//! - A failed load leaves the list empty; a failed save leaves it untouched.
//! - A save writes the snapshot taken in `begin_save`, never later edits.
//! - Failures are reported once and never retried automatically.

use crate::repo::trip_document_repo::{TripDocumentRepoError, TripDocumentRepository};
use crate::store::trip_store::{TripSnapshot, TripStore};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Opaque id of the signed-in user, as issued by the identity provider.
pub type UserId = String;

pub type SyncResult<T> = Result<T, SyncError>;

#[derive(Debug)]
pub enum SyncError {
    NotSignedIn,
    Load(TripDocumentRepoError),
    Save(TripDocumentRepoError),
}

impl Display for SyncError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotSignedIn => write!(f, "no signed-in user; trips cannot be saved"),
            Self::Load(err) => write!(f, "failed to load trips: {err}"),
            Self::Save(err) => write!(f, "failed to save trips: {err}"),
        }
    }
}

impl Error for SyncError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotSignedIn => None,
            Self::Load(err) | Self::Save(err) => Some(err),
        }
    }
}

/// User-visible persistence status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    Idle,
    Loading,
    Loaded,
    LoadFailed(String),
    Saving,
    Saved,
    SaveFailed(String),
}

impl SyncStatus {
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Loading | Self::Saving)
    }

    /// Failure message to show, if the last round trip failed.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::LoadFailed(message) | Self::SaveFailed(message) => Some(message),
            _ => None,
        }
    }
}

/// A save whose snapshot has been taken but not yet written.
#[derive(Debug, Clone)]
pub struct PendingSave {
    user_id: UserId,
    snapshot: TripSnapshot,
    started_at: Instant,
}

impl PendingSave {
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn snapshot(&self) -> &TripSnapshot {
        &self.snapshot
    }
}

/// Identity + persistence orchestration for one session.
pub struct TripSync<R: TripDocumentRepository> {
    repo: R,
    user_id: Option<UserId>,
    status: SyncStatus,
}

impl<R: TripDocumentRepository> TripSync<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            user_id: None,
            status: SyncStatus::Idle,
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn status(&self) -> &SyncStatus {
        &self.status
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Reacts to the identity provider reporting a (possibly absent) user.
    ///
    /// The store is replaced wholesale: with the user's saved trips, or with
    /// an empty list on sign-out or load failure.
    pub fn on_auth_changed(
        &mut self,
        user_id: Option<UserId>,
        store: &mut TripStore,
    ) -> SyncResult<()> {
        self.user_id = user_id;
        let Some(user_id) = self.user_id.clone() else {
            store.clear();
            self.status = SyncStatus::Idle;
            info!("event=trips_load module=sync status=ok reason=signed_out");
            return Ok(());
        };
        self.load_into(&user_id, store)
    }

    /// Reloads the signed-in user's trips, replacing the store's list.
    pub fn reload(&mut self, store: &mut TripStore) -> SyncResult<()> {
        let user_id = self.user_id.clone().ok_or(SyncError::NotSignedIn)?;
        self.load_into(&user_id, store)
    }

    fn load_into(&mut self, user_id: &str, store: &mut TripStore) -> SyncResult<()> {
        let started_at = Instant::now();
        self.status = SyncStatus::Loading;
        info!("event=trips_load module=sync status=start");

        match self.repo.load(user_id) {
            Ok(trips) => {
                let count = trips.len();
                store.set_trips(trips);
                self.status = SyncStatus::Loaded;
                info!(
                    "event=trips_load module=sync status=ok trips={count} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                store.clear();
                self.status = SyncStatus::LoadFailed(err.to_string());
                error!(
                    "event=trips_load module=sync status=error duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                Err(SyncError::Load(err))
            }
        }
    }

    /// Takes the snapshot for a save. Edits after this call are not part of it.
    pub fn begin_save(&mut self, store: &TripStore) -> SyncResult<PendingSave> {
        let user_id = self.user_id.clone().ok_or(SyncError::NotSignedIn)?;
        self.status = SyncStatus::Saving;
        info!(
            "event=trips_save module=sync status=start trips={}",
            store.len()
        );
        Ok(PendingSave {
            user_id,
            snapshot: store.snapshot(),
            started_at: Instant::now(),
        })
    }

    /// Writes a previously taken snapshot.
    pub fn complete_save(&mut self, pending: PendingSave) -> SyncResult<()> {
        let trips = pending.snapshot.to_trips();
        match self.repo.save(&pending.user_id, &trips) {
            Ok(()) => {
                self.status = SyncStatus::Saved;
                info!(
                    "event=trips_save module=sync status=ok trips={} duration_ms={}",
                    trips.len(),
                    pending.started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                self.status = SyncStatus::SaveFailed(err.to_string());
                error!(
                    "event=trips_save module=sync status=error duration_ms={} error={err}",
                    pending.started_at.elapsed().as_millis()
                );
                Err(SyncError::Save(err))
            }
        }
    }

    /// Snapshot and write in one step.
    pub fn save_now(&mut self, store: &TripStore) -> SyncResult<()> {
        let pending = self.begin_save(store)?;
        self.complete_save(pending)
    }
}
