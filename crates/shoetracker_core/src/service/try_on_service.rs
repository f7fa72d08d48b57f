//! TryOn use-case service.
//!
//! # Responsibility
//! - Provide create/delete/read entry points for presentation callers.
//! - Notify subscribers after each applied mutation.
//! - Hold records whose insert failed so callers can retry.
//!
//! # Invariants
//! - Drafts are validated before any persistence attempt.
//! - Subscribers run synchronously, after the mutation is visible to reads.
//! - A failed insert is reported once and kept in `pending_writes` until a
//!   retry persists it or it is deleted.

use crate::model::try_on::{TryOn, TryOnDraft, TryOnId, TryOnValidationError};
use crate::repo::try_on_repo::{RepoError, TryOnRepository};
use crate::search::predicate::{filter_try_ons, TryOnFilter};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, TryOnServiceError>;

/// Service error for try-on use-cases.
#[derive(Debug)]
pub enum TryOnServiceError {
    /// Input violates a domain rule; nothing was stored.
    Validation(TryOnValidationError),
    /// Target record does not exist.
    NotFound(TryOnId),
    /// The store failed to read or write.
    Persistence(RepoError),
}

impl Display for TryOnServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "invalid try-on: {err}"),
            Self::NotFound(id) => write!(f, "try-on not found: {id}"),
            Self::Persistence(err) => write!(f, "failed to persist try-on: {err}"),
        }
    }
}

impl Error for TryOnServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<TryOnValidationError> for TryOnServiceError {
    fn from(value: TryOnValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for TryOnServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Persistence(other),
        }
    }
}

/// Mutation applied to the try-on collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TryOnChange {
    Created(TryOnId),
    Deleted(TryOnId),
}

/// Handle returned by [`TryOnService::on_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type ChangeListener = Box<dyn FnMut(&TryOnChange)>;

/// Try-on service facade over repository implementations.
pub struct TryOnService<R: TryOnRepository> {
    repo: R,
    listeners: Vec<(SubscriptionId, ChangeListener)>,
    next_subscription: u64,
    pending: Vec<TryOn>,
}

impl<R: TryOnRepository> TryOnService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            listeners: Vec::new(),
            next_subscription: 0,
            pending: Vec::new(),
        }
    }

    /// Validates a draft, assigns a fresh id and persists the record.
    ///
    /// # Errors
    /// - `Validation` when the draft breaks a domain rule.
    /// - `Persistence` when the store rejects the insert. The record is kept
    ///   in [`Self::pending_writes`] for [`Self::retry_pending`].
    pub fn create(&mut self, draft: TryOnDraft) -> ServiceResult<TryOn> {
        let try_on = TryOn::create(draft)?;

        match self.repo.create_try_on(&try_on) {
            Ok(id) => {
                info!("event=try_on_create module=service status=ok id={id}");
                self.notify(TryOnChange::Created(id));
                Ok(try_on)
            }
            Err(RepoError::Validation(err)) => Err(TryOnServiceError::Validation(err)),
            Err(err) => {
                error!(
                    "event=try_on_create module=service status=error id={} error_code=persist_failed error={}",
                    try_on.id, err
                );
                self.pending.push(try_on);
                Err(TryOnServiceError::Persistence(err))
            }
        }
    }

    /// Re-attempts every pending insert and returns how many were persisted.
    ///
    /// Records that fail again stay pending.
    pub fn retry_pending(&mut self) -> usize {
        let pending = std::mem::take(&mut self.pending);
        let mut persisted = 0;

        for try_on in pending {
            match self.repo.create_try_on(&try_on) {
                Ok(id) => {
                    persisted += 1;
                    self.notify(TryOnChange::Created(id));
                }
                Err(err) => {
                    warn!(
                        "event=try_on_retry module=service status=error id={} error={}",
                        try_on.id, err
                    );
                    self.pending.push(try_on);
                }
            }
        }

        info!(
            "event=try_on_retry module=service status=ok persisted={} remaining={}",
            persisted,
            self.pending.len()
        );
        persisted
    }

    /// Records whose insert failed and that await a retry.
    pub fn pending_writes(&self) -> &[TryOn] {
        &self.pending
    }

    /// Permanently removes one record.
    ///
    /// A record still pending its first write is dropped from memory instead,
    /// without a notification: subscribers never saw it as created.
    pub fn delete(&mut self, id: TryOnId) -> ServiceResult<()> {
        if let Some(index) = self.pending.iter().position(|try_on| try_on.id == id) {
            self.pending.remove(index);
            info!("event=try_on_delete module=service status=ok id={id} source=pending");
            return Ok(());
        }

        match self.repo.delete_try_on(id) {
            Ok(()) => {
                info!("event=try_on_delete module=service status=ok id={id}");
                self.notify(TryOnChange::Deleted(id));
                Ok(())
            }
            Err(err) => {
                warn!("event=try_on_delete module=service status=error id={id} error={err}");
                Err(err.into())
            }
        }
    }

    /// Returns every stored record ordered by date, newest first.
    pub fn get_all(&self) -> ServiceResult<Vec<TryOn>> {
        Ok(self.repo.list_try_ons()?)
    }

    /// Gets one stored record by id.
    pub fn get(&self, id: TryOnId) -> ServiceResult<Option<TryOn>> {
        Ok(self.repo.get_try_on(id)?)
    }

    /// Returns stored records matching `filter`, ordered like [`Self::get_all`].
    pub fn search(&self, filter: &TryOnFilter) -> ServiceResult<Vec<TryOn>> {
        let all = self.get_all()?;
        Ok(filter_try_ons(&all, filter))
    }

    /// Returns the number of stored records.
    pub fn count(&self) -> ServiceResult<u64> {
        Ok(self.repo.count_try_ons()?)
    }

    /// Registers a callback invoked after every applied mutation.
    pub fn on_change(&mut self, listener: impl FnMut(&TryOnChange) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a callback. Returns `false` when the handle is unknown.
    pub fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(id, _)| *id != subscription);
        self.listeners.len() != before
    }

    fn notify(&mut self, change: TryOnChange) {
        for (_, listener) in &mut self.listeners {
            listener(&change);
        }
    }
}
