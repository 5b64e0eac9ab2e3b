use std::collections::BTreeMap;

use parking_lot::RwLock;

use super::{
    Category, CategoryId, CategoryStore, Item, ItemId, ItemStore, NewItem, NewReview, Review,
    ReviewId, ReviewStore, SettingsStore, StoreError,
};

#[derive(Default)]
struct Inner {
    items: BTreeMap<ItemId, Item>,
    categories: BTreeMap<CategoryId, Category>,
    reviews: Vec<Review>,
    next_item_id: i64,
    next_category_id: i64,
    next_review_id: i64,
    desired_retention: Option<f64>,
}

/// In-process store backed by `parking_lot` locks
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_item(&self, new: NewItem) -> Item {
        let mut inner = self.inner.write();
        inner.next_item_id += 1;
        let item = Item {
            id: ItemId(inner.next_item_id),
            title: new.title,
            source: new.source,
            category_id: new.category_id,
            notes: new.notes,
            created_at: new.created_at,
            is_archived: false,
        };
        inner.items.insert(item.id, item.clone());
        item
    }

    pub fn set_archived(&self, id: ItemId, archived: bool) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        let item = inner
            .items
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("item {id}")))?;
        item.is_archived = archived;
        Ok(())
    }

    /// Creates a category; the id on `category` is replaced
    pub fn insert_category(&self, category: Category) -> Category {
        let mut inner = self.inner.write();
        inner.next_category_id += 1;
        let category = Category {
            id: CategoryId(inner.next_category_id),
            ..category
        };
        inner.categories.insert(category.id, category.clone());
        category
    }

    pub fn update_category(&self, category: Category) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        match inner.categories.get_mut(&category.id) {
            Some(existing) => {
                *existing = category;
                Ok(())
            }
            None => Err(StoreError::NotFound(format!("category {}", category.id))),
        }
    }

    pub fn set_desired_retention(&self, value: Option<f64>) {
        self.inner.write().desired_retention = value;
    }

    /// Review history of one item, newest first
    pub fn reviews_for_item(&self, item_id: ItemId) -> Vec<Review> {
        let inner = self.inner.read();
        let mut reviews: Vec<Review> = inner
            .reviews
            .iter()
            .filter(|r| r.item_id == item_id)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| (b.reviewed_at, b.id).cmp(&(a.reviewed_at, a.id)));
        reviews
    }
}

impl ItemStore for MemoryStore {
    fn item(&self, id: ItemId) -> Result<Option<Item>, StoreError> {
        Ok(self.inner.read().items.get(&id).cloned())
    }

    fn active_items(&self) -> Result<Vec<Item>, StoreError> {
        Ok(self
            .inner
            .read()
            .items
            .values()
            .filter(|item| !item.is_archived)
            .cloned()
            .collect())
    }
}

impl ReviewStore for MemoryStore {
    fn latest_review(&self, item_id: ItemId) -> Result<Option<Review>, StoreError> {
        Ok(self
            .inner
            .read()
            .reviews
            .iter()
            .filter(|r| r.item_id == item_id)
            .max_by_key(|r| (r.reviewed_at, r.id))
            .cloned())
    }

    fn insert_review(&self, review: NewReview) -> Result<Review, StoreError> {
        let mut inner = self.inner.write();
        inner.next_review_id += 1;
        let stored = Review {
            id: ReviewId(inner.next_review_id),
            item_id: review.item_id,
            rating: review.rating,
            notes: review.notes,
            reviewed_at: review.reviewed_at,
            stability_after: review.stability_after,
            difficulty_after: review.difficulty_after,
        };
        inner.reviews.push(stored.clone());
        Ok(stored)
    }
}

impl CategoryStore for MemoryStore {
    fn category(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        Ok(self.inner.read().categories.get(&id).cloned())
    }

    fn categories(&self) -> Result<Vec<Category>, StoreError> {
        Ok(self.inner.read().categories.values().cloned().collect())
    }
}

impl SettingsStore for MemoryStore {
    fn desired_retention(&self) -> Option<f64> {
        self.inner.read().desired_retention
    }
}
