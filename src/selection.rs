//! Selected (completed) courses and prerequisite gating

use std::collections::BTreeSet;
use tracing::debug;

use crate::catalog::{Catalog, CourseItem};
use crate::error::SelectionError;

/// Prerequisites of `item` not yet in `selection`, in declaration order
pub fn unmet_prerequisites<'a>(item: &'a CourseItem, selection: &SelectionSet) -> Vec<&'a str> {
    item.prerequisites
        .iter()
        .map(String::as_str)
        .filter(|code| !selection.contains(code))
        .collect()
}

/// Result of a successful toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    Added,
    Removed,
}

/// Course codes the student has marked as completed
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SelectionSet {
    codes: BTreeSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Flip membership of `code`.
    ///
    /// Selecting a course whose prerequisites are not all selected is
    /// rejected and leaves the set untouched. Deselecting never cascades.
    pub fn toggle(&mut self, catalog: &Catalog, code: &str) -> Result<Toggled, SelectionError> {
        let item = catalog
            .get(code)
            .ok_or_else(|| SelectionError::UnknownCode(code.to_string()))?;

        let unmet = unmet_prerequisites(item, self);
        if !unmet.is_empty() {
            debug!(code, ?unmet, "Toggle rejected");
            return Err(SelectionError::Blocked {
                code: code.to_string(),
                unmet: unmet.into_iter().map(str::to_string).collect(),
            });
        }

        if self.codes.remove(code) {
            Ok(Toggled::Removed)
        } else {
            self.codes.insert(code.to_string());
            Ok(Toggled::Added)
        }
    }

    pub fn clear(&mut self) {
        self.codes.clear();
    }

    /// Drop codes the catalog no longer knows. Returns the dropped codes.
    pub fn retain_known(&mut self, catalog: &Catalog) -> Vec<String> {
        let dropped: Vec<String> = self
            .codes
            .iter()
            .filter(|code| !catalog.contains(code))
            .cloned()
            .collect();
        for code in &dropped {
            self.codes.remove(code);
        }
        dropped
    }

    /// Ordered snapshot, used for requests and cache keys
    pub fn snapshot(&self) -> Vec<String> {
        self.codes.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{course, Category};

    fn two_course_catalog() -> Catalog {
        Catalog::new(vec![
            course("A", "برمجة 1", Category::MajorRequired, &[]),
            course("B", "برمجة 2", Category::MajorRequired, &["A"]),
        ])
    }

    #[test]
    fn test_unmet_preserves_declaration_order() {
        let item = course("D", "d", Category::Other, &["C", "A", "B"]);
        let mut selection = SelectionSet::new();
        assert_eq!(unmet_prerequisites(&item, &selection), vec!["C", "A", "B"]);

        let catalog = Catalog::new(vec![course("A", "a", Category::Other, &[])]);
        selection.toggle(&catalog, "A").unwrap();
        assert_eq!(unmet_prerequisites(&item, &selection), vec!["C", "B"]);
    }

    #[test]
    fn test_items_without_prerequisites_always_toggle() {
        let catalog = Catalog::new(
            (0..20)
                .map(|i| course(&format!("C{i}"), "x", Category::Other, &[]))
                .collect(),
        );
        let mut selection = SelectionSet::new();
        for item in catalog.items() {
            assert_eq!(selection.toggle(&catalog, &item.code), Ok(Toggled::Added));
        }
        for item in catalog.items().iter().step_by(3) {
            assert_eq!(selection.toggle(&catalog, &item.code), Ok(Toggled::Removed));
        }
    }

    #[test]
    fn test_blocked_toggle_leaves_state_unchanged() {
        let catalog = two_course_catalog();
        let mut selection = SelectionSet::new();
        let before = selection.clone();

        let err = selection.toggle(&catalog, "B").unwrap_err();
        assert_eq!(
            err,
            SelectionError::Blocked {
                code: "B".to_string(),
                unmet: vec!["A".to_string()],
            }
        );
        assert!(err.to_string().contains('A'));
        assert_eq!(selection, before);
    }

    #[test]
    fn test_prerequisite_scenario() {
        let catalog = two_course_catalog();
        let mut selection = SelectionSet::new();

        assert!(selection.toggle(&catalog, "B").is_err());
        assert_eq!(selection.toggle(&catalog, "A"), Ok(Toggled::Added));
        assert_eq!(selection.toggle(&catalog, "B"), Ok(Toggled::Added));
        assert_eq!(selection.snapshot(), vec!["A", "B"]);
    }

    #[test]
    fn test_toggle_round_trip() {
        let catalog = two_course_catalog();
        let mut selection = SelectionSet::new();
        selection.toggle(&catalog, "A").unwrap();
        let before = selection.clone();

        selection.toggle(&catalog, "B").unwrap();
        selection.toggle(&catalog, "B").unwrap();
        assert_eq!(selection, before);
    }

    #[test]
    fn test_deselect_does_not_cascade() {
        let catalog = two_course_catalog();
        let mut selection = SelectionSet::new();
        selection.toggle(&catalog, "A").unwrap();
        selection.toggle(&catalog, "B").unwrap();

        assert_eq!(selection.toggle(&catalog, "A"), Ok(Toggled::Removed));
        assert!(selection.contains("B"));
        // B is now blocked, so it cannot be deselected until A is back
        assert!(selection.toggle(&catalog, "B").is_err());
    }

    #[test]
    fn test_unknown_code_rejected() {
        let catalog = two_course_catalog();
        let mut selection = SelectionSet::new();
        assert_eq!(
            selection.toggle(&catalog, "Z"),
            Err(SelectionError::UnknownCode("Z".to_string()))
        );
        assert!(selection.is_empty());
    }

    #[test]
    fn test_clear_and_retain_known() {
        let catalog = two_course_catalog();
        let mut selection = SelectionSet::new();
        selection.toggle(&catalog, "A").unwrap();
        selection.toggle(&catalog, "B").unwrap();

        let reloaded = Catalog::new(vec![course("A", "برمجة 1", Category::MajorRequired, &[])]);
        assert_eq!(selection.retain_known(&reloaded), vec!["B"]);
        assert_eq!(selection.snapshot(), vec!["A"]);

        selection.clear();
        assert!(selection.is_empty());
    }
}
