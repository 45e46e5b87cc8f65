//! # Reviews and Ratings
//!
//! Insert-or-replace of a shopper's review and the product rating derived
//! from all reviews.
//!
//! ## Review Submission
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  current reviews (fetched)       submitted review (client u7, ★4)       │
//! │  [u3 ★5, u7 ★2, u1 ★3]                                                  │
//! │            │                                                            │
//! │            ▼                                                            │
//! │  add_or_update ──► u7 exists → replace in place                         │
//! │            │       [u3 ★5, u7 ★4, u1 ★3]                                │
//! │            │                                                            │
//! │            │       unknown client → prepend                             │
//! │            │       [new, u3 ★5, ...]                                    │
//! │            ▼                                                            │
//! │  aggregate_rating ──► mean 4.0 → "4.0"                                  │
//! │            │                                                            │
//! │            ▼                                                            │
//! │  ReviewPatch { reviews, rating } ──► PATCH products/{id}                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::types::Review;

/// Highest star count.
pub const MAX_STARS: u8 = 5;

// =============================================================================
// Rating
// =============================================================================

/// A mean star rating with one decimal, stored as tenths (45 = 4.5).
///
/// On the wire it is the string `"4.5"`; plain numbers are accepted on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u16);

impl Rating {
    /// Creates a rating from tenths of a star.
    pub const fn from_tenths(tenths: u16) -> Self {
        Rating(tenths)
    }

    pub const fn tenths(&self) -> u16 {
        self.0
    }

    /// Arithmetic mean of star counts, rounded half-up to one decimal.
    ///
    /// Returns `None` for an empty slice.
    ///
    /// ```rust
    /// use darb_core::review::Rating;
    ///
    /// assert_eq!(Rating::mean(&[4, 5]).unwrap().to_string(), "4.5");
    /// assert_eq!(Rating::mean(&[4, 4, 5]).unwrap().to_string(), "4.3");
    /// assert!(Rating::mean(&[]).is_none());
    /// ```
    pub fn mean(stars: &[u8]) -> Option<Rating> {
        if stars.is_empty() {
            return None;
        }
        let sum: u64 = stars.iter().map(|&s| u64::from(s)).sum();
        let n = stars.len() as u64;
        // round(sum * 10 / n) with half-up: (sum * 20 + n) / (2n)
        let tenths = (sum * 20 + n) / (2 * n);
        Some(Rating(tenths as u16))
    }

    /// Full / half / empty stars out of five, for display.
    pub fn stars(&self) -> StarBreakdown {
        let full = (self.0 / 10).min(u16::from(MAX_STARS)) as u8;
        let half = self.0 % 10 != 0 && full < MAX_STARS;
        let shown = full + u8::from(half);
        StarBreakdown {
            full,
            half,
            empty: MAX_STARS - shown,
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

impl FromStr for Rating {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s.trim().parse().map_err(|_| ValidationError::InvalidFormat {
            field: "rating".to_string(),
            reason: format!("'{}' is not a number", s),
        })?;
        Rating::try_from(value)
    }
}

impl TryFrom<f64> for Rating {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || !(0.0..=f64::from(MAX_STARS)).contains(&value) {
            return Err(ValidationError::OutOfRange {
                field: "rating".to_string(),
                min: 0,
                max: i64::from(MAX_STARS),
            });
        }
        Ok(Rating((value * 10.0).round() as u16))
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(f64),
        }

        let parsed = match Raw::deserialize(deserializer)? {
            Raw::Text(text) => text.parse::<Rating>(),
            Raw::Number(value) => Rating::try_from(value),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}

/// Star icons to draw for a rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarBreakdown {
    pub full: u8,
    pub half: bool,
    pub empty: u8,
}

// =============================================================================
// Review List Operations
// =============================================================================

/// What [`add_or_update`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewChange {
    /// New review, inserted first.
    Added,
    /// The client's earlier review was replaced at this index.
    Updated { index: usize },
}

/// Inserts `review`, replacing the same client's earlier review in place.
pub fn add_or_update(reviews: &mut Vec<Review>, review: Review) -> ReviewChange {
    match reviews.iter().position(|r| r.client_id == review.client_id) {
        Some(index) => {
            reviews[index] = review;
            ReviewChange::Updated { index }
        }
        None => {
            reviews.insert(0, review);
            ReviewChange::Added
        }
    }
}

/// Mean rating of a review list.
pub fn aggregate_rating(reviews: &[Review]) -> Option<Rating> {
    let stars: Vec<u8> = reviews.iter().map(|r| r.rating).collect();
    Rating::mean(&stars)
}

/// The review a client already posted, if any (the form opens in edit mode).
pub fn find_by_client<'a>(reviews: &'a [Review], client_id: &str) -> Option<&'a Review> {
    reviews.iter().find(|r| r.client_id == client_id)
}

/// Body of the product update that stores a review change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewPatch {
    pub reviews: Vec<Review>,
    pub rating: Option<Rating>,
}

impl ReviewPatch {
    /// Applies `review` to the fetched list and recomputes the rating.
    pub fn build(mut current: Vec<Review>, review: Review) -> (Self, ReviewChange) {
        let change = add_or_update(&mut current, review);
        let rating = aggregate_rating(&current);
        (
            ReviewPatch {
                reviews: current,
                rating,
            },
            change,
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
