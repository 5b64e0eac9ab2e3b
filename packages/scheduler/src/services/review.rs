use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use dory_algo::{FsrsEngine, Rating, SchedulingState};

use crate::services::parameters::ParameterResolver;
use crate::services::urgency::days_since;
use crate::store::{ItemId, NewReview, Review, Store, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    #[error("item {0} not found")]
    ItemNotFound(ItemId),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One mutex per item; held across read-latest / compute / append.
///
/// Entries live only while some submission holds a handle, so the table is
/// bounded by the number of in-flight submissions.
#[derive(Default)]
pub struct ItemLocks {
    locks: Mutex<HashMap<ItemId, Arc<Mutex<()>>>>,
}

impl ItemLocks {
    pub fn handle(&self, item_id: ItemId) -> Arc<Mutex<()>> {
        Arc::clone(self.locks.lock().entry(item_id).or_default())
    }

    /// Drops the entry for `item_id` once no handle to it is outstanding.
    /// Callers must drop their own handle first.
    pub fn release(&self, item_id: ItemId) {
        let mut locks = self.locks.lock();
        // handles are only cloned under the table lock, so a count of one is final
        if locks
            .get(&item_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&item_id);
        }
    }

    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct ReviewService<S: ?Sized> {
    store: Arc<S>,
    locks: ItemLocks,
}

impl<S> ReviewService<S>
where
    S: Store + ?Sized,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            locks: ItemLocks::default(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Records a review for `item_id` at `now` and returns the persisted outcome.
    ///
    /// Submissions for the same item are serialized through this service;
    /// writers that bypass it get no such guarantee.
    pub fn submit_review(
        &self,
        item_id: ItemId,
        rating: Rating,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Review, ReviewError> {
        let item = self
            .store
            .item(item_id)?
            .ok_or(ReviewError::ItemNotFound(item_id))?;

        let resolver = ParameterResolver::new(&*self.store, &*self.store);
        let resolved = resolver.resolve(item.category_id)?;
        let engine = FsrsEngine::new(resolved.params);

        let outcome = {
            let lock = self.locks.handle(item_id);
            let _guard = lock.lock();
            self.apply_review(&engine, item_id, rating, notes, resolved.retention, now)
        };
        self.locks.release(item_id);
        outcome
    }

    fn apply_review(
        &self,
        engine: &FsrsEngine,
        item_id: ItemId,
        rating: Rating,
        notes: Option<String>,
        retention: f64,
        now: DateTime<Utc>,
    ) -> Result<Review, ReviewError> {
        let latest = self.store.latest_review(item_id)?;
        let prior = latest.as_ref().map(|review| SchedulingState {
            stability: review.stability_after,
            difficulty: review.difficulty_after,
            // not an input to the transition
            interval: 0,
        });
        let elapsed_days = latest
            .as_ref()
            .map_or(0, |review| days_since(review.reviewed_at, now));

        let next = engine.review(prior.as_ref(), elapsed_days as f64, rating, retention);

        let stored = self.store.insert_review(NewReview {
            item_id,
            rating,
            notes,
            reviewed_at: now,
            stability_after: next.stability,
            difficulty_after: next.difficulty,
        })?;

        tracing::info!(
            item_id = %item_id,
            rating = %rating,
            first_review = latest.is_none(),
            elapsed_days,
            stability = next.stability,
            difficulty = next.difficulty,
            interval = next.interval,
            "review recorded"
        );

        Ok(stored)
    }
}
