//! Driver and travel records.
//!
//! Committed records live in the [`crate::RecordStore`]; a draft is the same
//! struct owned by a conversation until commit, with `id` still unassigned.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Driver {
    /// Display id, assigned by the store at commit.
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub vehicle: String,
    /// 0 means unrated; user-assigned values are 1–10.
    pub rating: i64,
    /// Opaque foreign key linking travels to this driver. Unique among live
    /// drivers; minted once when the draft is created.
    pub token: String,
}

impl Driver {
    /// Empty draft with a freshly minted token. The id stays 0 until the
    /// store assigns one at commit.
    pub fn draft() -> Self {
        Self {
            id: 0,
            name: String::new(),
            age: 0,
            vehicle: String::new(),
            rating: 0,
            token: Uuid::new_v4().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Travel {
    /// Display id, assigned by the store at commit.
    pub id: i64,
    pub destination: String,
    pub date: NaiveDate,
    /// Foreign key into [`Driver::token`].
    pub driver_token: String,
    pub price: f64,
    /// Seats still available; decremented by bookings.
    pub seats: i64,
}

impl Travel {
    /// Empty draft; every field is collected by the dialogue before commit.
    pub fn draft() -> Self {
        Self {
            id: 0,
            destination: String::new(),
            date: NaiveDate::default(),
            driver_token: String::new(),
            price: 0.0,
            seats: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_drivers_get_distinct_tokens() {
        let a = Driver::draft();
        let b = Driver::draft();
        assert_ne!(a.token, b.token);
        assert_eq!(a.id, 0);
        assert_eq!(a.rating, 0);
    }
}
