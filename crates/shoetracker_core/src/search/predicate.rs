//! Combined search/filter predicate.
//!
//! # Responsibility
//! - Match records against a free-text query, a purchase-status filter and a
//!   minimum rating.
//!
//! # Invariants
//! - Criteria combine with logical AND; inactive criteria match everything.
//! - Filtering preserves input order and never mutates the input.
//! - Text matching is case-insensitive and covers `name`, `details`, `color`
//!   and `location` only.

use crate::model::try_on::TryOn;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Purchase-status filter criterion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PurchaseFilter {
    #[default]
    All,
    PurchasedOnly,
    NotPurchasedOnly,
}

impl PurchaseFilter {
    /// Returns whether a record with the given purchase flag passes.
    pub fn matches(self, purchased: bool) -> bool {
        match self {
            Self::All => true,
            Self::PurchasedOnly => purchased,
            Self::NotPurchasedOnly => !purchased,
        }
    }

    /// Stable lowercase label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::PurchasedOnly => "purchased",
            Self::NotPurchasedOnly => "not_purchased",
        }
    }
}

impl Display for PurchaseFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a purchase filter label is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePurchaseFilterError(String);

impl Display for ParsePurchaseFilterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported purchase filter `{}`; expected all|purchased|not_purchased",
            self.0
        )
    }
}

impl Error for ParsePurchaseFilterError {}

impl FromStr for PurchaseFilter {
    type Err = ParsePurchaseFilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "purchased" => Ok(Self::PurchasedOnly),
            "not_purchased" | "not-purchased" => Ok(Self::NotPurchasedOnly),
            other => Err(ParsePurchaseFilterError(other.to_string())),
        }
    }
}

/// Search and filter criteria for the try-on list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TryOnFilter {
    /// Free-text query. Blank means unconstrained.
    pub query: String,
    pub purchase: PurchaseFilter,
    /// Inclusive lower bound on `rating`. `None` means unconstrained.
    pub min_rating: Option<f64>,
}

impl TryOnFilter {
    /// Creates a filter with only a text query set.
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Returns whether any criterion constrains the result.
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty()
            || self.purchase != PurchaseFilter::All
            || self.min_rating.is_some()
    }

    /// Returns whether one record satisfies every active criterion.
    pub fn matches(&self, try_on: &TryOn) -> bool {
        let needle = normalize_query(&self.query);
        matches_with_needle(try_on, needle.as_deref(), self)
    }
}

/// Returns the records matching `filter`, preserving input order.
pub fn filter_try_ons(try_ons: &[TryOn], filter: &TryOnFilter) -> Vec<TryOn> {
    let needle = normalize_query(&filter.query);
    try_ons
        .iter()
        .filter(|try_on| matches_with_needle(try_on, needle.as_deref(), filter))
        .cloned()
        .collect()
}

fn matches_with_needle(try_on: &TryOn, needle: Option<&str>, filter: &TryOnFilter) -> bool {
    let text_match = needle.map_or(true, |needle| text_matches(try_on, needle));
    let rating_match = filter
        .min_rating
        .map_or(true, |min_rating| try_on.rating >= min_rating);

    text_match && filter.purchase.matches(try_on.purchased) && rating_match
}

fn text_matches(try_on: &TryOn, needle: &str) -> bool {
    [
        try_on.name.as_str(),
        try_on.details.as_str(),
        try_on.color.as_str(),
        try_on.location.as_str(),
    ]
    .iter()
    .any(|field| fold_case(field).contains(needle))
}

fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(fold_case(trimmed))
    }
}

/// Lowercases one character at a time, so `Σ` always folds to `σ` whatever
/// its position in the word.
fn fold_case(value: &str) -> String {
    value.chars().flat_map(char::to_lowercase).collect()
}

#[cfg(test)]
mod tests {
    use super::{fold_case, normalize_query, PurchaseFilter};

    #[test]
    fn normalize_query_treats_whitespace_as_empty() {
        assert_eq!(normalize_query("   "), None);
        assert_eq!(normalize_query(" AiR "), Some("air".to_string()));
    }

    #[test]
    fn fold_case_ignores_sigma_position() {
        assert_eq!(fold_case("ΟΔΟΣ"), "οδοσ");
        assert_eq!(fold_case("ΟΣΑ"), "οσα");
    }

    #[test]
    fn purchase_filter_parses_labels() {
        assert_eq!("ALL".parse::<PurchaseFilter>(), Ok(PurchaseFilter::All));
        assert_eq!(
            "not-purchased".parse::<PurchaseFilter>(),
            Ok(PurchaseFilter::NotPurchasedOnly)
        );
        assert!("maybe".parse::<PurchaseFilter>().is_err());
    }

    #[test]
    fn purchase_filter_label_roundtrips() {
        for filter in [
            PurchaseFilter::All,
            PurchaseFilter::PurchasedOnly,
            PurchaseFilter::NotPurchasedOnly,
        ] {
            assert_eq!(filter.as_str().parse::<PurchaseFilter>(), Ok(filter));
        }
    }
}
