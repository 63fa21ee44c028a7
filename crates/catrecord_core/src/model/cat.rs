//! Cat domain model.
//!
//! # Responsibility
//! - Define the single persisted entity of the catalog.
//! - Provide mutation helpers that keep the identificator fresh.
//!
//! # Invariants
//! - `id` is `None` until the store assigns one and never changes afterwards.
//! - `name` emptiness is a service rule, not a model rule.

use crate::model::identificator::IdentificatorStrategy;
use serde::{Deserialize, Serialize};

/// Store-assigned numeric identifier of a cat record.
pub type CatId = i64;

/// Canonical cat record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cat {
    /// Assigned by the store on first save.
    pub id: Option<CatId>,
    pub name: String,
    /// No range is enforced.
    pub age: i32,
    /// Display stamp derived from `name`/`age`/`id`.
    pub identificator: Option<String>,
}

impl Cat {
    /// Creates an unsaved cat without identificator.
    pub fn new(name: impl Into<String>, age: i32) -> Self {
        Self {
            id: None,
            name: name.into(),
            age,
            identificator: None,
        }
    }

    /// Returns whether the store has assigned an identifier.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Recomputes `identificator` from the current fields.
    pub fn refresh_identificator(&mut self, strategy: &impl IdentificatorStrategy) {
        self.identificator = Some(strategy.derive(self.name.as_str(), self.age, self.id));
    }

    /// Replaces the name and recomputes the identificator.
    pub fn rename(&mut self, name: impl Into<String>, strategy: &impl IdentificatorStrategy) {
        self.name = name.into();
        self.refresh_identificator(strategy);
    }
}

#[cfg(test)]
mod tests {
    use super::Cat;
    use crate::model::identificator::StandardIdentificator;

    #[test]
    fn new_cat_is_not_persisted() {
        let cat = Cat::new("Leo", 3);
        assert!(!cat.is_persisted());
        assert!(cat.identificator.is_none());
    }

    #[test]
    fn rename_refreshes_identificator() {
        let mut cat = Cat::new("Leo", 3);
        cat.id = Some(4);
        cat.refresh_identificator(&StandardIdentificator);
        let before = cat.identificator.clone();

        cat.rename("Milo", &StandardIdentificator);
        assert_eq!(cat.name, "Milo");
        assert_ne!(cat.identificator, before);
        assert_eq!(cat.identificator.as_deref(), Some("milo-3-4"));
    }

    #[test]
    fn serializes_with_plain_field_names() {
        let mut cat = Cat::new("Leo", 3);
        cat.id = Some(1);
        let json = serde_json::to_value(&cat).expect("cat should serialize");
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Leo");
        assert_eq!(json["age"], 3);
        assert!(json["identificator"].is_null());
    }
}
