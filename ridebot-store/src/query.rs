//! Stateless queries over the record store: travel search and best-rated
//! drivers. Results are snapshots; concurrent commits are not reflected in an
//! iteration already under way.

use crate::models::{Driver, Travel};
use crate::store::RecordStore;

/// Result ordering for travel search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending price.
    Price,
    /// Descending rating of the associated driver.
    Rating,
}

impl RecordStore {
    /// Travels whose destination contains `destination` (case-sensitive) and
    /// with at least `min_seats` seats left, joined to their driver. Travels
    /// whose token no longer resolves are not displayable and are skipped.
    /// An empty result is a valid outcome, not an error.
    pub async fn search(
        &self,
        destination: &str,
        min_seats: i64,
        order: SortOrder,
    ) -> Vec<(Travel, Driver)> {
        let drivers = self.drivers.read().await;
        let travels = self.travels.read().await;

        let mut results: Vec<(Travel, Driver)> = travels
            .values()
            .filter(|t| t.destination.contains(destination) && t.seats >= min_seats)
            .filter_map(|t| {
                drivers
                    .values()
                    .find(|d| d.token == t.driver_token)
                    .map(|d| (t.clone(), d.clone()))
            })
            .collect();

        drop(travels);
        drop(drivers);

        match order {
            SortOrder::Price => results.sort_by(|a, b| a.0.price.total_cmp(&b.0.price)),
            SortOrder::Rating => results.sort_by(|a, b| b.1.rating.cmp(&a.1.rating)),
        }

        results
    }

    /// All drivers sharing the maximum rating; ties are all included. Empty
    /// iff the store holds no drivers.
    pub async fn best_rated_drivers(&self) -> Vec<Driver> {
        let drivers = self.drivers.read().await;
        let best = drivers.values().map(|d| d.rating).max().unwrap_or(0);
        drivers
            .values()
            .filter(|d| d.rating == best)
            .cloned()
            .collect()
    }

    /// All travels joined to their driver, in id order, skipping travels
    /// whose driver no longer resolves.
    pub async fn list_travels_joined(&self) -> Vec<(Travel, Driver)> {
        let drivers = self.drivers.read().await;
        let travels = self.travels.read().await;

        travels
            .values()
            .filter_map(|t| {
                drivers
                    .values()
                    .find(|d| d.token == t.driver_token)
                    .map(|d| (t.clone(), d.clone()))
            })
            .collect()
    }
}
