//! Collaborator seam for persistence and settings.
//!
//! The scheduling services only read items, categories, the latest review of
//! an item and the global retention, and append new reviews. Anything that
//! implements these traits can back them; [`MemoryStore`] is the in-process
//! implementation.

mod memory;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dory_algo::{ParameterSet, Rating};

use crate::config::Config;

pub use memory::MemoryStore;

macro_rules! id_type {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(ItemId);
id_type!(CategoryId);
id_type!(ReviewId);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub source: String,
    pub category_id: Option<CategoryId>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub is_archived: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub title: String,
    pub source: String,
    pub category_id: Option<CategoryId>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewItem {
    pub fn new(title: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            source: String::new(),
            category_id: None,
            notes: None,
            created_at,
        }
    }

    pub fn in_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Retention override, independent of `parameters_json`
    pub desired_retention: Option<f64>,
    /// Serialized `{ "w": [...], "desiredRetention": .. }` override, decoded leniently
    pub parameters_json: Option<String>,
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            desired_retention: None,
            parameters_json: None,
        }
    }

    pub fn with_retention(mut self, desired_retention: f64) -> Self {
        self.desired_retention = Some(desired_retention);
        self
    }

    pub fn with_parameters(mut self, params: &ParameterSet) -> Self {
        self.parameters_json = Some(params.to_json());
        self
    }
}

/// Persisted outcome of one review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub item_id: ItemId,
    pub rating: Rating,
    pub notes: Option<String>,
    pub reviewed_at: DateTime<Utc>,
    pub stability_after: f64,
    pub difficulty_after: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub item_id: ItemId,
    pub rating: Rating,
    pub notes: Option<String>,
    pub reviewed_at: DateTime<Utc>,
    pub stability_after: f64,
    pub difficulty_after: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("store backend error: {0}")]
    Backend(String),
}

pub trait ItemStore: Send + Sync {
    fn item(&self, id: ItemId) -> Result<Option<Item>, StoreError>;

    /// Non-archived items
    fn active_items(&self) -> Result<Vec<Item>, StoreError>;
}

pub trait ReviewStore: Send + Sync {
    fn latest_review(&self, item_id: ItemId) -> Result<Option<Review>, StoreError>;

    fn insert_review(&self, review: NewReview) -> Result<Review, StoreError>;
}

pub trait CategoryStore: Send + Sync {
    fn category(&self, id: CategoryId) -> Result<Option<Category>, StoreError>;

    fn categories(&self) -> Result<Vec<Category>, StoreError>;
}

pub trait SettingsStore: Send + Sync {
    /// Process-wide retention, `None` when unset
    fn desired_retention(&self) -> Option<f64>;
}

impl SettingsStore for Config {
    fn desired_retention(&self) -> Option<f64> {
        Some(self.desired_retention)
    }
}

/// Everything the review workflow and dashboard need
pub trait Store: ItemStore + ReviewStore + CategoryStore + SettingsStore {}

impl<T> Store for T where T: ItemStore + ReviewStore + CategoryStore + SettingsStore + ?Sized {}
