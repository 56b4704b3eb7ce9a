//! First-class category handling.
//!
//! Categories used to be an emergent property of sentinel catalog rows: a
//! fake product existed solely so its `categoria` value did. The gateway
//! keeps a real registry instead, while the read side still counts whatever
//! `categoria` values the catalog data carries - sentinel rows included -
//! so legacy data keeps injecting its filter options.

use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard};

use crate::models::Product;

/// The pseudo-category selecting the whole catalog.
pub const ALL_CATEGORY: &str = "Todos";

/// Categories that always exist and cannot be deleted.
pub const BASE_CATEGORIES: &[&str] = &["Sedán", "Deportivo", "SUV"];

/// Derive the selectable category set for the catalog page.
///
/// Union of the base list, every `categoria` value present in the
/// *unfiltered* product data, and the admin-registered categories, with
/// [`ALL_CATEGORY`] first.
#[must_use]
pub fn selectable_categories(products: &[Product], registered: &[String]) -> Vec<String> {
    let mut set = BTreeSet::new();
    for base in BASE_CATEGORIES {
        set.insert((*base).to_string());
    }
    for categoria in products.iter().filter_map(|p| p.categoria.as_deref()) {
        if !categoria.trim().is_empty() {
            set.insert(categoria.trim().to_string());
        }
    }
    for categoria in registered {
        set.insert(categoria.clone());
    }
    set.remove(ALL_CATEGORY);

    let mut all = Vec::with_capacity(set.len() + 1);
    all.push(ALL_CATEGORY.to_string());
    all.extend(set);
    all
}

/// In-state registry of admin-created categories.
///
/// Holds only the names created through the back-office; categories in use
/// by real products exist regardless of this registry.
#[derive(Debug, Default)]
pub struct CategoryRegistry {
    names: Mutex<BTreeSet<String>>,
}

impl CategoryRegistry {
    fn lock(&self) -> MutexGuard<'_, BTreeSet<String>> {
        match self.names.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Register a category name. Returns false if an equivalent name
    /// (case-insensitive) is already registered.
    pub fn register(&self, name: &str) -> bool {
        let name = name.trim();
        let mut names = self.lock();
        if names.iter().any(|n| n.eq_ignore_ascii_case(name)) {
            return false;
        }
        names.insert(name.to_string())
    }

    /// Remove a registered category. Returns false if it was not registered.
    pub fn unregister(&self, name: &str) -> bool {
        let mut names = self.lock();
        match names.iter().find(|n| n.eq_ignore_ascii_case(name)).cloned() {
            Some(found) => names.remove(&found),
            None => false,
        }
    }

    /// Snapshot of the registered names.
    #[must_use]
    pub fn all(&self) -> Vec<String> {
        self.lock().iter().cloned().collect()
    }
}
