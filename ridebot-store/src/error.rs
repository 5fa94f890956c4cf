use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Driver not found: {0}")]
    DriverNotFound(i64),

    #[error("Travel not found: {0}")]
    TravelNotFound(i64),

    #[error("Insufficient seats: requested {requested}, available {available}")]
    InsufficientSeats { requested: i64, available: i64 },
}
