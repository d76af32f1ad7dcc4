//! Provider domain entity

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Kind of green service a provider offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Solar,
    Insulation,
    Compost,
    Rainwater,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Solar,
        Category::Insulation,
        Category::Compost,
        Category::Rainwater,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Solar => "solar",
            Self::Insulation => "insulation",
            Self::Compost => "compost",
            Self::Rainwater => "rainwater",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Solar => "Solar Installation",
            Self::Insulation => "Home Insulation",
            Self::Compost => "Compost Pickup",
            Self::Rainwater => "Rainwater Harvesting",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::Invalid(format!("Unknown service type: {}", s)))
    }
}

/// Service provider profile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Provider {
    pub id: i32,
    /// Owning user
    pub user_id: String,
    pub name: String,
    pub category: Category,
    pub location: String,
    /// Reference returned by the file store, if a certification was uploaded
    pub certification: Option<String>,
    pub bio: String,
    pub price_note: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Provider {
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.category)
    }
}

/// Raw provider form input, before validation.
#[derive(Debug, Clone, Default)]
pub struct ProviderInput {
    pub name: String,
    pub category: Option<Category>,
    pub location: String,
    pub bio: String,
    pub price_note: String,
}

/// Validated, normalized provider fields ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderProfile {
    pub name: String,
    pub category: Category,
    pub location: String,
    pub bio: String,
    pub price_note: String,
}

/// Provider list filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderFilter {
    /// Exact category match
    pub category: Option<Category>,
    /// Case-insensitive substring of the location
    pub location: Option<String>,
}

impl ProviderFilter {
    pub fn new(category: Option<Category>, location: Option<&str>) -> Self {
        Self {
            category,
            location: location
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
