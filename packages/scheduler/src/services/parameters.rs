//! Parameter and retention resolution: category override, then global default.
//!
//! The two lookups are independent. A category may carry only a retention,
//! only a weight set, both, or neither.

use dory_algo::{ParameterSet, DEFAULT_DESIRED_RETENTION};

use crate::store::{Category, CategoryId, CategoryStore, SettingsStore, StoreError};

/// Effective scheduling inputs for one item
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedParameters {
    pub params: ParameterSet,
    pub retention: f64,
}

/// Lenient override decoding: anything that does not yield a valid
/// [`ParameterSet`] counts as "no override".
pub fn category_parameters(category: &Category) -> Option<ParameterSet> {
    let raw = category.parameters_json.as_deref()?;
    match ParameterSet::from_json(raw) {
        Ok(params) => Some(params),
        Err(err) => {
            tracing::warn!(
                category_id = %category.id,
                error = %err,
                "category override unusable, using defaults"
            );
            None
        }
    }
}

pub fn parameters_for(category: Option<&Category>) -> ParameterSet {
    category
        .and_then(category_parameters)
        .unwrap_or_default()
}

pub fn retention_for(category: Option<&Category>, global: Option<f64>) -> f64 {
    category
        .and_then(|c| c.desired_retention)
        .or(global)
        .unwrap_or(DEFAULT_DESIRED_RETENTION)
}

pub fn resolve_for(category: Option<&Category>, global: Option<f64>) -> ResolvedParameters {
    ResolvedParameters {
        params: parameters_for(category),
        retention: retention_for(category, global),
    }
}

pub struct ParameterResolver<'a, C: ?Sized, S: ?Sized> {
    categories: &'a C,
    settings: &'a S,
}

impl<'a, C, S> ParameterResolver<'a, C, S>
where
    C: CategoryStore + ?Sized,
    S: SettingsStore + ?Sized,
{
    pub fn new(categories: &'a C, settings: &'a S) -> Self {
        Self {
            categories,
            settings,
        }
    }

    pub fn resolve_parameters(
        &self,
        category_id: Option<CategoryId>,
    ) -> Result<ParameterSet, StoreError> {
        let category = self.load(category_id)?;
        Ok(parameters_for(category.as_ref()))
    }

    pub fn resolve_retention(&self, category_id: Option<CategoryId>) -> Result<f64, StoreError> {
        let category = self.load(category_id)?;
        Ok(retention_for(
            category.as_ref(),
            self.settings.desired_retention(),
        ))
    }

    /// Both resolutions from a single category read
    pub fn resolve(&self, category_id: Option<CategoryId>) -> Result<ResolvedParameters, StoreError> {
        let category = self.load(category_id)?;
        Ok(resolve_for(
            category.as_ref(),
            self.settings.desired_retention(),
        ))
    }

    fn load(&self, category_id: Option<CategoryId>) -> Result<Option<Category>, StoreError> {
        let Some(id) = category_id else {
            return Ok(None);
        };
        let category = self.categories.category(id)?;
        if category.is_none() {
            tracing::debug!(category_id = %id, "category missing, using global defaults");
        }
        Ok(category)
    }
}
