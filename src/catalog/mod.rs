//! Plan store: the course catalog for the session

mod category;
mod course;
mod source;

pub use category::{Category, CATEGORY_ORDER};
pub use course::CourseItem;
pub use source::{create_source, PlanSource};

use std::collections::HashMap;
use tracing::warn;

/// Courses known to the session. Replaced wholesale on reload, never merged.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CourseItem>,
    index: HashMap<String, usize>,
    version: u64,
}

impl Catalog {
    pub fn new(items: Vec<CourseItem>) -> Self {
        let mut catalog = Self::default();
        catalog.replace(items);
        catalog
    }

    /// Swap in a freshly fetched plan. The first entry wins on duplicate codes.
    pub fn replace(&mut self, items: Vec<CourseItem>) {
        let mut kept = Vec::with_capacity(items.len());
        let mut index = HashMap::with_capacity(items.len());

        for item in items {
            if index.contains_key(&item.code) {
                warn!("Duplicate course code '{}' in plan, keeping first", item.code);
                continue;
            }
            index.insert(item.code.clone(), kept.len());
            kept.push(item);
        }

        self.items = kept;
        self.index = index;
        self.version += 1;
    }

    pub fn get(&self, code: &str) -> Option<&CourseItem> {
        self.index.get(code).map(|&i| &self.items[i])
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    pub fn items(&self) -> &[CourseItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Bumped on every replacement; part of the view cache key
    pub fn version(&self) -> u64 {
        self.version
    }
}

#[cfg(test)]
pub(crate) fn course(code: &str, name: &str, category: Category, prereqs: &[&str]) -> CourseItem {
    CourseItem {
        code: code.to_string(),
        name: name.to_string(),
        category,
        hours: Some(3.0),
        prerequisites: prereqs.iter().map(|p| p.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_version() {
        let mut catalog = Catalog::default();
        assert_eq!(catalog.version(), 0);
        assert!(catalog.is_empty());

        catalog.replace(vec![course("A", "أ", Category::Other, &[])]);
        assert_eq!(catalog.version(), 1);
        assert!(catalog.contains("A"));
        assert_eq!(catalog.get("A").map(|c| c.name.as_str()), Some("أ"));

        catalog.replace(vec![course("B", "ب", Category::Other, &[])]);
        assert_eq!(catalog.version(), 2);
        assert!(!catalog.contains("A"));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_duplicate_codes_keep_first() {
        let catalog = Catalog::new(vec![
            course("A", "first", Category::Other, &[]),
            course("A", "second", Category::Other, &[]),
        ]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("A").map(|c| c.name.as_str()), Some("first"));
    }
}
