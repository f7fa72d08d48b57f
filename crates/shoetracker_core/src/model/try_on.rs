//! TryOn domain model.
//!
//! # Responsibility
//! - Define the canonical record for one logged shoe try-on.
//! - Provide the creation-form draft with explicit defaults.
//! - Validate domain invariants independent of any UI widget constraints.
//!
//! # Invariants
//! - `id` is stable, never nil and never reassigned.
//! - `name` is never blank.
//! - `rating` is finite and within `RATING_MIN..=RATING_MAX`.
//! - Optional text fields are empty strings, never absent.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier of one try-on record.
pub type TryOnId = Uuid;

/// Lowest rating accepted by the domain.
pub const RATING_MIN: f64 = 0.0;
/// Highest rating accepted by the domain.
pub const RATING_MAX: f64 = 10.0;
/// Rating preselected by the creation form.
pub const DEFAULT_RATING: f64 = 5.0;

/// Domain validation errors for try-on records.
#[derive(Debug, Clone, PartialEq)]
pub enum TryOnValidationError {
    /// `id` must not be the nil UUID.
    NilId,
    /// `name` is required and must contain non-whitespace text.
    EmptyName,
    /// `rating` must be a finite number.
    NonFiniteRating(f64),
    /// `rating` must be within `RATING_MIN..=RATING_MAX`.
    RatingOutOfRange(f64),
}

impl Display for TryOnValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "id must not be nil"),
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::NonFiniteRating(value) => write!(f, "rating ({value}) must be a finite number"),
            Self::RatingOutOfRange(value) => write!(
                f,
                "rating ({value}) must be within {RATING_MIN}..={RATING_MAX}"
            ),
        }
    }
}

impl Error for TryOnValidationError {}

/// Every user-editable attribute of a try-on, as captured by the creation form.
///
/// `TryOnDraft::new` spells out the form defaults so callers never rely on
/// implicit empty values.
#[derive(Debug, Clone, PartialEq)]
pub struct TryOnDraft {
    pub name: String,
    pub details: String,
    pub rating: f64,
    pub purchased: bool,
    pub size: String,
    /// Unix epoch milliseconds.
    pub date: i64,
    pub color: String,
    pub width: String,
    pub location: String,
}

impl TryOnDraft {
    /// Creates a draft with creation-form defaults.
    ///
    /// # Invariants
    /// - `rating` starts at `DEFAULT_RATING`, `purchased` at `false`.
    /// - `date` starts at the current time.
    /// - All other text fields start empty.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            details: String::new(),
            rating: DEFAULT_RATING,
            purchased: false,
            size: String::new(),
            date: now_epoch_ms(),
            color: String::new(),
            width: String::new(),
            location: String::new(),
        }
    }

    /// Validates draft fields that carry domain rules.
    pub fn validate(&self) -> Result<(), TryOnValidationError> {
        validate_fields(&self.name, self.rating)
    }
}

impl Default for TryOnDraft {
    fn default() -> Self {
        Self::new(String::new())
    }
}

/// Canonical persisted record for one try-on.
///
/// Identity is the `id`: two records compare equal when their ids match,
/// regardless of the other fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "TryOnRecord")]
pub struct TryOn {
    pub id: TryOnId,
    pub name: String,
    pub details: String,
    pub rating: f64,
    pub purchased: bool,
    pub size: String,
    /// Unix epoch milliseconds.
    pub date: i64,
    pub color: String,
    pub width: String,
    pub location: String,
}

impl TryOn {
    /// Builds a record from a draft with a freshly generated id.
    pub fn create(draft: TryOnDraft) -> Result<Self, TryOnValidationError> {
        Self::from_draft(Uuid::new_v4(), draft)
    }

    /// Builds a record from a caller-provided id and a complete draft.
    ///
    /// Used by import paths and tests where identity already exists.
    pub fn from_draft(id: TryOnId, draft: TryOnDraft) -> Result<Self, TryOnValidationError> {
        let try_on = Self {
            id,
            name: draft.name,
            details: draft.details,
            rating: draft.rating,
            purchased: draft.purchased,
            size: draft.size,
            date: draft.date,
            color: draft.color,
            width: draft.width,
            location: draft.location,
        };
        try_on.validate()?;
        Ok(try_on)
    }

    /// Validates all record invariants.
    pub fn validate(&self) -> Result<(), TryOnValidationError> {
        if self.id.is_nil() {
            return Err(TryOnValidationError::NilId);
        }
        validate_fields(&self.name, self.rating)
    }

    /// Returns the user-editable fields as a draft.
    pub fn to_draft(&self) -> TryOnDraft {
        TryOnDraft {
            name: self.name.clone(),
            details: self.details.clone(),
            rating: self.rating,
            purchased: self.purchased,
            size: self.size.clone(),
            date: self.date,
            color: self.color.clone(),
            width: self.width.clone(),
            location: self.location.clone(),
        }
    }
}

impl PartialEq for TryOn {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TryOn {}

impl Hash for TryOn {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[derive(Deserialize)]
struct TryOnRecord {
    id: TryOnId,
    name: String,
    details: String,
    rating: f64,
    purchased: bool,
    size: String,
    date: i64,
    color: String,
    width: String,
    location: String,
}

impl TryFrom<TryOnRecord> for TryOn {
    type Error = TryOnValidationError;

    fn try_from(value: TryOnRecord) -> Result<Self, Self::Error> {
        let draft = TryOnDraft {
            name: value.name,
            details: value.details,
            rating: value.rating,
            purchased: value.purchased,
            size: value.size,
            date: value.date,
            color: value.color,
            width: value.width,
            location: value.location,
        };
        Self::from_draft(value.id, draft)
    }
}

fn validate_fields(name: &str, rating: f64) -> Result<(), TryOnValidationError> {
    if name.trim().is_empty() {
        return Err(TryOnValidationError::EmptyName);
    }
    if !rating.is_finite() {
        return Err(TryOnValidationError::NonFiniteRating(rating));
    }
    if !(RATING_MIN..=RATING_MAX).contains(&rating) {
        return Err(TryOnValidationError::RatingOutOfRange(rating));
    }
    Ok(())
}

/// Current time as Unix epoch milliseconds.
///
/// Falls back to `0` if the system clock is set before the epoch.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
