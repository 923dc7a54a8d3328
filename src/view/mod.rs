//! View compositor: the grouped, filtered, availability-annotated projection
//! of catalog + selection that every front end renders.
//!
//! [`compose`] is pure. Identical inputs always produce identical output, so
//! callers recompute the whole view after each mutation instead of patching it.

mod collation;

use collation::compare_names;

use serde::Serialize;
use std::collections::BTreeMap;

use crate::catalog::{Catalog, Category, CourseItem, CATEGORY_ORDER};
use crate::config::Density;
use crate::selection::{unmet_prerequisites, SelectionSet};
use crate::text;

/// One selectable chip
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChipView {
    pub code: String,
    pub name: String,
    /// Text on the chip: name (or code) plus hours when known
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<f64>,
    pub selected: bool,
    pub blocked: bool,
    /// Unmet prerequisites in declaration order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unmet: Vec<String>,
    /// Why the chip is blocked, naming the unmet prerequisites
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl ChipView {
    /// Hover text: the blocking explanation, or the course code
    pub fn tooltip(&self) -> &str {
        self.explanation.as_deref().unwrap_or(&self.code)
    }
}

/// A category heading with its (possibly empty) list of chips
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup {
    pub category: Category,
    pub label: &'static str,
    pub expanded: bool,
    pub items: Vec<ChipView>,
}

impl CategoryGroup {
    /// Heading text, e.g. `متطلبات التخصص الإجباريّة (4)`
    pub fn header(&self) -> String {
        format!("{} ({})", self.label, self.items.len())
    }

    /// Marker rendered in place of chips when the filter hides every item
    pub fn empty_marker(&self) -> Option<&'static str> {
        self.items.is_empty().then_some(text::EMPTY_GROUP)
    }
}

/// The full composed view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogView {
    pub groups: Vec<CategoryGroup>,
    pub selected_count: usize,
}

impl CatalogView {
    /// Marker rendered when the catalog has nothing to show at all
    pub fn empty_marker(&self) -> Option<&'static str> {
        self.groups.is_empty().then_some(text::EMPTY_PLAN)
    }

    pub fn chips(&self) -> impl Iterator<Item = &ChipView> {
        self.groups.iter().flat_map(|g| g.items.iter())
    }

    pub fn chip(&self, code: &str) -> Option<&ChipView> {
        self.chips().find(|c| c.code == code)
    }
}

/// Everything a view depends on. Equal keys always compose to equal views.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewKey {
    pub catalog_version: u64,
    pub selection: Vec<String>,
    pub filter: String,
    pub density: Density,
}

impl ViewKey {
    pub fn new(catalog: &Catalog, selection: &SelectionSet, filter: &str, density: Density) -> Self {
        Self {
            catalog_version: catalog.version(),
            selection: selection.snapshot(),
            filter: filter.trim().to_string(),
            density,
        }
    }
}

/// True when `filter` (already trimmed) is empty or occurs in the name or code
pub fn matches_filter(item: &CourseItem, filter: &str) -> bool {
    filter.is_empty() || item.name.contains(filter) || item.code.contains(filter)
}

/// Compose the grouped view.
///
/// Groups follow [`CATEGORY_ORDER`]. Categories with no catalog items are
/// omitted; categories whose items are all filtered out stay, with no chips.
pub fn compose(
    catalog: &Catalog,
    selection: &SelectionSet,
    filter: &str,
    density: Density,
) -> CatalogView {
    let filter = filter.trim();

    let mut buckets: BTreeMap<usize, Vec<&CourseItem>> = BTreeMap::new();
    for item in catalog.items() {
        buckets
            .entry(item.category.position())
            .or_default()
            .push(item);
    }

    let groups = CATEGORY_ORDER
        .iter()
        .enumerate()
        .filter_map(|(position, &category)| {
            let mut members = buckets.remove(&position)?;
            members.sort_by(|a, b| {
                compare_names(&a.name, &b.name).then_with(|| a.code.cmp(&b.code))
            });

            let items = members
                .into_iter()
                .filter(|item| matches_filter(item, filter))
                .map(|item| chip_for(item, selection))
                .collect();

            Some(CategoryGroup {
                category,
                label: category.label(),
                expanded: density == Density::Comfortable,
                items,
            })
        })
        .collect();

    CatalogView {
        groups,
        selected_count: selection.len(),
    }
}

fn chip_for(item: &CourseItem, selection: &SelectionSet) -> ChipView {
    let unmet: Vec<String> = unmet_prerequisites(item, selection)
        .into_iter()
        .map(str::to_string)
        .collect();
    let blocked = !unmet.is_empty();
    let explanation = blocked.then(|| text::blocked_explanation(&unmet));

    let mut label = item.display_name().to_string();
    if let Some(hours) = item.hours {
        label.push_str(&format!(" • {}{}", text::format_number(hours), text::HOURS_SUFFIX));
    }

    ChipView {
        code: item.code.clone(),
        name: item.name.clone(),
        label,
        hours: item.hours,
        selected: selection.contains(&item.code),
        blocked,
        unmet,
        explanation,
    }
}
