//! Read-only projections for list rows, the detail screen and sharing.
//!
//! # Responsibility
//! - Derive display strings from a `TryOn` without touching storage.
//!
//! # Invariants
//! - Blank text renders as `EMPTY_PLACEHOLDER`.
//! - Ratings render with one decimal place.
//! - Dates render in UTC; out-of-range timestamps render as `EMPTY_PLACEHOLDER`.
//! - The star display maps the 0-10 rating onto five stars in half steps.

use crate::model::try_on::{TryOn, TryOnId};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// Placeholder shown for blank text fields.
pub const EMPTY_PLACEHOLDER: &str = "—";
/// Number of stars in the rating display.
pub const STAR_COUNT: usize = 5;

const DETAILS_PREVIEW_MAX_CHARS: usize = 100;
const LONG_DATE_FORMAT: &str = "%B %-d, %Y";
const SHORT_DATE_FORMAT: &str = "%b %-d, %Y";

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Fill state of one star in the rating display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarFill {
    Full,
    Half,
    Empty,
}

/// Display-ready projection of one try-on for the detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TryOnDetail {
    pub id: TryOnId,
    pub name: String,
    pub purchase_label: &'static str,
    pub rating: String,
    pub stars: [StarFill; STAR_COUNT],
    /// Try-on date, e.g. `March 10, 2025`.
    pub date: String,
    pub size: String,
    pub width: String,
    pub color: String,
    pub location: String,
    pub details: String,
    pub share_text: String,
}

impl From<&TryOn> for TryOnDetail {
    fn from(try_on: &TryOn) -> Self {
        Self {
            id: try_on.id,
            name: try_on.name.clone(),
            purchase_label: purchase_label(try_on.purchased),
            rating: format_rating(try_on.rating),
            stars: rating_stars(try_on.rating),
            date: format_date_long(try_on.date),
            size: display_value(&try_on.size),
            width: display_value(&try_on.width),
            color: display_value(&try_on.color),
            location: display_value(&try_on.location),
            details: display_value(&try_on.details),
            share_text: share_text(try_on),
        }
    }
}

/// Badge text for the purchase status.
pub fn purchase_label(purchased: bool) -> &'static str {
    if purchased {
        "PURCHASED"
    } else {
        "TRY-ON ONLY"
    }
}

/// Formats a rating with one decimal place.
pub fn format_rating(rating: f64) -> String {
    format!("{rating:.1}")
}

/// Maps a 0-10 rating onto five stars.
///
/// Star `i` (1-based) is full when `i <= rating / 2` and half when
/// `i - 0.5 <= rating / 2`.
pub fn rating_stars(rating: f64) -> [StarFill; STAR_COUNT] {
    let half_scale = rating / 2.0;
    let mut stars = [StarFill::Empty; STAR_COUNT];
    for (index, star) in stars.iter_mut().enumerate() {
        let position = (index + 1) as f64;
        *star = if position <= half_scale {
            StarFill::Full
        } else if position - 0.5 <= half_scale {
            StarFill::Half
        } else {
            StarFill::Empty
        };
    }
    stars
}

/// Formats epoch milliseconds as a long date (`March 10, 2025`).
pub fn format_date_long(epoch_ms: i64) -> String {
    format_date(epoch_ms, LONG_DATE_FORMAT)
}

/// Formats epoch milliseconds as an abbreviated date for list rows (`Mar 10, 2025`).
pub fn format_date_short(epoch_ms: i64) -> String {
    format_date(epoch_ms, SHORT_DATE_FORMAT)
}

fn format_date(epoch_ms: i64, format: &str) -> String {
    DateTime::<Utc>::from_timestamp_millis(epoch_ms)
        .map(|date| date.format(format).to_string())
        .unwrap_or_else(|| EMPTY_PLACEHOLDER.to_string())
}

/// Returns `value`, or the placeholder when it is blank.
pub fn display_value(value: &str) -> String {
    if value.trim().is_empty() {
        EMPTY_PLACEHOLDER.to_string()
    } else {
        value.to_string()
    }
}

/// Plain-text message used by the share action.
pub fn share_text(try_on: &TryOn) -> String {
    format!(
        "Check out this shoe I tried: {} - Rating: {}/10",
        try_on.name,
        format_rating(try_on.rating)
    )
}

/// One-line notes summary for list rows.
///
/// Whitespace runs collapse to single spaces and the result is capped at 100
/// characters. Returns `None` for blank notes.
pub fn details_preview(details: &str) -> Option<String> {
    let normalized = WHITESPACE_RE.replace_all(details, " ");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(DETAILS_PREVIEW_MAX_CHARS).collect())
}

#[cfg(test)]
mod tests {
    use super::{
        details_preview, display_value, format_date_long, format_date_short, format_rating,
        rating_stars, StarFill,
    };

    #[test]
    fn rating_stars_maps_half_steps() {
        use StarFill::{Empty, Full, Half};
        assert_eq!(rating_stars(10.0), [Full; 5]);
        assert_eq!(rating_stars(0.0), [Empty; 5]);
        assert_eq!(rating_stars(7.0), [Full, Full, Full, Half, Empty]);
        assert_eq!(rating_stars(8.0), [Full, Full, Full, Full, Empty]);
        assert_eq!(rating_stars(1.0), [Half, Empty, Empty, Empty, Empty]);
    }

    #[test]
    fn format_rating_uses_one_decimal() {
        assert_eq!(format_rating(8.0), "8.0");
        assert_eq!(format_rating(8.5), "8.5");
    }

    #[test]
    fn dates_format_in_long_and_short_form() {
        // 2025-03-10T09:46:40Z
        assert_eq!(format_date_long(1_741_600_000_000), "March 10, 2025");
        assert_eq!(format_date_short(1_741_600_000_000), "Mar 10, 2025");
        assert_eq!(format_date_long(0), "January 1, 1970");
    }

    #[test]
    fn out_of_range_date_renders_placeholder() {
        assert_eq!(format_date_long(i64::MAX), "—");
    }

    #[test]
    fn display_value_replaces_blank_text() {
        assert_eq!(display_value("  "), "—");
        assert_eq!(display_value("10.5"), "10.5");
    }

    #[test]
    fn details_preview_collapses_whitespace_and_truncates() {
        assert_eq!(details_preview(" \n "), None);
        assert_eq!(
            details_preview("snug\n\n  toe box").as_deref(),
            Some("snug toe box")
        );
        let long = "a".repeat(150);
        assert_eq!(details_preview(&long).map(|text| text.len()), Some(100));
    }
}
