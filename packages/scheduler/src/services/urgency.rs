use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use dory_algo::{FsrsEngine, ParameterSet};

use crate::services::parameters::resolve_for;
use crate::store::{CategoryId, Item, Review, Store, StoreError};

/// Due status of an item. Ordering is presentation order, most urgent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ReviewUrgency {
    Overdue,
    DueToday,
    NotDue,
}

impl ReviewUrgency {
    pub fn is_due(self) -> bool {
        matches!(self, Self::Overdue | Self::DueToday)
    }
}

/// Whole days between two instants, truncated and never negative
pub fn days_since(from: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    now.signed_duration_since(from).num_days().max(0)
}

pub fn classify(
    latest: Option<&Review>,
    params: &ParameterSet,
    retention: f64,
    now: DateTime<Utc>,
) -> ReviewUrgency {
    let Some(review) = latest else {
        return ReviewUrgency::Overdue;
    };

    let interval = i64::from(
        FsrsEngine::new(*params).next_interval_with_retention(review.stability_after, retention),
    );
    let elapsed = days_since(review.reviewed_at, now);

    match elapsed.cmp(&interval) {
        std::cmp::Ordering::Greater => ReviewUrgency::Overdue,
        std::cmp::Ordering::Equal => ReviewUrgency::DueToday,
        std::cmp::Ordering::Less => ReviewUrgency::NotDue,
    }
}

/// When the item becomes due, for reminder scheduling.
///
/// Saturates at the latest representable instant when the interval runs
/// past chrono's range.
pub fn next_due_at(review: &Review, params: &ParameterSet, retention: f64) -> DateTime<Utc> {
    let interval =
        FsrsEngine::new(*params).next_interval_with_retention(review.stability_after, retention);
    review
        .reviewed_at
        .checked_add_signed(Duration::days(i64::from(interval)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardItem {
    pub item: Item,
    pub urgency: ReviewUrgency,
    pub category_name: Option<String>,
}

/// Active items with their urgency, most urgent first (stable within a group)
pub fn dashboard_items<S>(store: &S, now: DateTime<Utc>) -> Result<Vec<DashboardItem>, StoreError>
where
    S: Store + ?Sized,
{
    let categories: HashMap<CategoryId, _> = store
        .categories()?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();
    let global_retention = store.desired_retention();

    let mut out = Vec::new();
    for item in store.active_items()? {
        let category = item.category_id.and_then(|id| categories.get(&id));
        let resolved = resolve_for(category, global_retention);
        let latest = store.latest_review(item.id)?;
        let urgency = classify(latest.as_ref(), &resolved.params, resolved.retention, now);

        out.push(DashboardItem {
            category_name: category.map(|c| c.name.clone()),
            item,
            urgency,
        });
    }

    out.sort_by_key(|entry| entry.urgency);
    tracing::debug!(count = out.len(), "dashboard items classified");
    Ok(out)
}

/// Overdue and due-today items only
pub fn due_items<S>(store: &S, now: DateTime<Utc>) -> Result<Vec<DashboardItem>, StoreError>
where
    S: Store + ?Sized,
{
    let mut items = dashboard_items(store, now)?;
    items.retain(|entry| entry.urgency.is_due());
    Ok(items)
}

/// Counts for a daily digest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DueSummary {
    pub overdue: usize,
    pub due_today: usize,
    pub not_due: usize,
}

impl DueSummary {
    pub fn from_items(items: &[DashboardItem]) -> Self {
        items.iter().fold(Self::default(), |mut acc, entry| {
            match entry.urgency {
                ReviewUrgency::Overdue => acc.overdue += 1,
                ReviewUrgency::DueToday => acc.due_today += 1,
                ReviewUrgency::NotDue => acc.not_due += 1,
            }
            acc
        })
    }

    pub fn nothing_due(&self) -> bool {
        self.overdue == 0 && self.due_today == 0
    }
}
