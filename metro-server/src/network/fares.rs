//! Fare and travel-time lookup between station pairs.

use std::collections::HashMap;

use crate::domain::{DomainError, StationId};

/// Price and duration for one ordered station pair.
///
/// Fares and durations come from separate sources, so either may be
/// absent for a given pair.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FareRecord {
    pub price: Option<f64>,
    pub minutes: Option<u32>,
}

/// Fare/time table keyed by ordered `(origin, destination)` pairs.
///
/// Lookups try the exact pair first and fall back to the reverse pair,
/// field by field, since the network charges the same in both directions.
#[derive(Debug, Clone, Default)]
pub struct FareTable {
    records: HashMap<(StationId, StationId), FareRecord>,
}

impl FareTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the price for a pair, replacing any previous value.
    pub fn set_price(
        &mut self,
        origin: StationId,
        destination: StationId,
        price: f64,
    ) -> Result<(), DomainError> {
        if !price.is_finite() || price < 0.0 {
            return Err(DomainError::InvalidFare(price));
        }
        self.records
            .entry((origin, destination))
            .or_default()
            .price = Some(price);
        Ok(())
    }

    /// Set the duration for a pair, replacing any previous value.
    pub fn set_minutes(
        &mut self,
        origin: StationId,
        destination: StationId,
        minutes: i64,
    ) -> Result<(), DomainError> {
        let minutes = u32::try_from(minutes).map_err(|_| DomainError::InvalidDuration(minutes))?;
        self.records
            .entry((origin, destination))
            .or_default()
            .minutes = Some(minutes);
        Ok(())
    }

    /// The record for a pair, merging the reverse direction for missing fields.
    pub fn get(&self, origin: StationId, destination: StationId) -> Option<FareRecord> {
        let forward = self.records.get(&(origin, destination));
        let reverse = self.records.get(&(destination, origin));
        let record = FareRecord {
            price: forward
                .and_then(|r| r.price)
                .or_else(|| reverse.and_then(|r| r.price)),
            minutes: forward
                .and_then(|r| r.minutes)
                .or_else(|| reverse.and_then(|r| r.minutes)),
        };
        if record == FareRecord::default() {
            None
        } else {
            Some(record)
        }
    }

    pub fn price(&self, origin: StationId, destination: StationId) -> Option<f64> {
        self.get(origin, destination).and_then(|r| r.price)
    }

    pub fn minutes(&self, origin: StationId, destination: StationId) -> Option<u32> {
        self.get(origin, destination).and_then(|r| r.minutes)
    }

    /// Number of stored ordered pairs.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
