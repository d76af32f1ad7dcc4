//! Availability domain entity

use chrono::NaiveDate;
use serde::Serialize;

/// One bookable day for a provider. Unique per (provider, date).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Availability {
    pub id: i32,
    pub provider_id: i32,
    pub date: NaiveDate,
}
