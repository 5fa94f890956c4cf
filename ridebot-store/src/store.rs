//! Shared in-memory record store.
//!
//! Two ordered maps keyed by display id, each behind its own `RwLock`: reads
//! (listing, search) take shared locks, commits take the write lock so no two
//! mutations interleave on the same record. Every committed mutation spawns a
//! fire-and-forget write-through to the archive; a failed save is logged and
//! the in-memory state stands.

use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

use crate::archive::Archive;
use crate::error::StoreError;
use crate::models::{Driver, Travel};

pub struct RecordStore {
    pub(crate) drivers: RwLock<BTreeMap<i64, Driver>>,
    pub(crate) travels: RwLock<BTreeMap<i64, Travel>>,
    archive: Option<Arc<dyn Archive>>,
}

impl RecordStore {
    /// Empty store with no persistence (tests, dry runs).
    pub fn new() -> Self {
        Self {
            drivers: RwLock::new(BTreeMap::new()),
            travels: RwLock::new(BTreeMap::new()),
            archive: None,
        }
    }

    /// Loads both collections from the archive and keeps it for write-through.
    pub async fn load(archive: Arc<dyn Archive>) -> Result<Self, StoreError> {
        let drivers = archive.load_drivers().await?;
        let travels = archive.load_travels().await?;

        info!(
            drivers = drivers.len(),
            travels = travels.len(),
            "Record store loaded"
        );

        Ok(Self {
            drivers: RwLock::new(drivers.into_iter().map(|d| (d.id, d)).collect()),
            travels: RwLock::new(travels.into_iter().map(|t| (t.id, t)).collect()),
            archive: Some(archive),
        })
    }

    // --- Drivers ---

    /// Commits a draft driver: assigns the next id and stores it. Returns the
    /// stored record.
    pub async fn add_driver(&self, mut draft: Driver) -> Driver {
        let mut drivers = self.drivers.write().await;
        let id = drivers.keys().next_back().copied().unwrap_or(0) + 1;
        draft.id = id;
        drivers.insert(id, draft.clone());

        info!(driver_id = id, name = %draft.name, "Driver added");
        self.persist_drivers(drivers.values().cloned().collect());
        draft
    }

    pub async fn driver_by_id(&self, id: i64) -> Option<Driver> {
        self.drivers.read().await.get(&id).cloned()
    }

    pub async fn driver_by_token(&self, token: &str) -> Option<Driver> {
        self.drivers
            .read()
            .await
            .values()
            .find(|d| d.token == token)
            .cloned()
    }

    /// Overwrites the stored driver with the same id.
    pub async fn update_driver(&self, driver: Driver) -> Result<Driver, StoreError> {
        let mut drivers = self.drivers.write().await;
        if !drivers.contains_key(&driver.id) {
            return Err(StoreError::DriverNotFound(driver.id));
        }
        drivers.insert(driver.id, driver.clone());

        info!(driver_id = driver.id, "Driver updated");
        self.persist_drivers(drivers.values().cloned().collect());
        Ok(driver)
    }

    /// Sets the driver's rating. Range checks belong to the dialogue; the
    /// store only requires the driver to exist.
    pub async fn rate_driver(&self, id: i64, rating: i64) -> Result<Driver, StoreError> {
        let mut drivers = self.drivers.write().await;
        let driver = drivers.get_mut(&id).ok_or(StoreError::DriverNotFound(id))?;
        driver.rating = rating;
        let updated = driver.clone();

        info!(driver_id = id, rating, "Driver rated");
        self.persist_drivers(drivers.values().cloned().collect());
        Ok(updated)
    }

    /// Removes a driver and cascades to every travel referencing its token.
    /// Returns false if no driver had the id.
    pub async fn delete_driver(&self, id: i64) -> bool {
        let mut drivers = self.drivers.write().await;
        let Some(driver) = drivers.remove(&id) else {
            return false;
        };

        let mut travels = self.travels.write().await;
        let before = travels.len();
        travels.retain(|_, t| t.driver_token != driver.token);

        info!(
            driver_id = id,
            cascaded = before - travels.len(),
            "Driver deleted"
        );
        self.persist_drivers(drivers.values().cloned().collect());
        self.persist_travels(travels.values().cloned().collect());
        true
    }

    /// All drivers in id order.
    pub async fn list_drivers(&self) -> Vec<Driver> {
        self.drivers.read().await.values().cloned().collect()
    }

    // --- Travels ---

    /// Commits a draft travel: assigns the next id and stores it.
    pub async fn add_travel(&self, mut draft: Travel) -> Travel {
        let mut travels = self.travels.write().await;
        let id = travels.keys().next_back().copied().unwrap_or(0) + 1;
        draft.id = id;
        travels.insert(id, draft.clone());

        info!(travel_id = id, destination = %draft.destination, "Travel added");
        self.persist_travels(travels.values().cloned().collect());
        draft
    }

    pub async fn travel_by_id(&self, id: i64) -> Option<Travel> {
        self.travels.read().await.get(&id).cloned()
    }

    /// Overwrites the stored travel with the same id.
    pub async fn update_travel(&self, travel: Travel) -> Result<Travel, StoreError> {
        let mut travels = self.travels.write().await;
        if !travels.contains_key(&travel.id) {
            return Err(StoreError::TravelNotFound(travel.id));
        }
        travels.insert(travel.id, travel.clone());

        info!(travel_id = travel.id, "Travel updated");
        self.persist_travels(travels.values().cloned().collect());
        Ok(travel)
    }

    /// Returns false if no travel had the id.
    pub async fn delete_travel(&self, id: i64) -> bool {
        let mut travels = self.travels.write().await;
        if travels.remove(&id).is_none() {
            return false;
        }

        info!(travel_id = id, "Travel deleted");
        self.persist_travels(travels.values().cloned().collect());
        true
    }

    /// All travels in id order.
    pub async fn list_travels(&self) -> Vec<Travel> {
        self.travels.read().await.values().cloned().collect()
    }

    /// Books `seats` on the travel, re-checking availability under the write
    /// lock so concurrent bookings cannot oversell. On success the seat count
    /// decreases by exactly `seats`.
    pub async fn book_seats(&self, travel_id: i64, seats: i64) -> Result<Travel, StoreError> {
        let mut travels = self.travels.write().await;
        let travel = travels
            .get_mut(&travel_id)
            .ok_or(StoreError::TravelNotFound(travel_id))?;

        if seats > travel.seats {
            return Err(StoreError::InsufficientSeats {
                requested: seats,
                available: travel.seats,
            });
        }

        travel.seats -= seats;
        let updated = travel.clone();

        info!(travel_id, seats, remaining = updated.seats, "Travel booked");
        self.persist_travels(travels.values().cloned().collect());
        Ok(updated)
    }

    // --- Write-through ---

    fn persist_drivers(&self, snapshot: Vec<Driver>) {
        if let Some(archive) = &self.archive {
            let archive = archive.clone();
            tokio::spawn(async move {
                if let Err(e) = archive.save_drivers(&snapshot).await {
                    error!(error = %e, "Failed to persist drivers");
                }
            });
        }
    }

    fn persist_travels(&self, snapshot: Vec<Travel>) {
        if let Some(archive) = &self.archive {
            let archive = archive.clone();
            tokio::spawn(async move {
                if let Err(e) = archive.save_travels(&snapshot).await {
                    error!(error = %e, "Failed to persist travels");
                }
            });
        }
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}
