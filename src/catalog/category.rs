//! Fixed course categories and their canonical display order

use serde::{Deserialize, Serialize};

/// Classification bucket used to group courses for display.
///
/// Every course maps to exactly one category; anything unrecognised lands in
/// [`Category::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Category {
    MajorRequired,
    MajorOptional,
    CollegeRequired,
    UniversityRequired,
    ElectiveRequirements,
    Remedial,
    Other,
}

impl From<Category> for &'static str {
    fn from(category: Category) -> Self {
        category.key()
    }
}

/// Canonical render order. Views always list groups in this order.
pub const CATEGORY_ORDER: [Category; 7] = [
    Category::MajorRequired,
    Category::MajorOptional,
    Category::CollegeRequired,
    Category::UniversityRequired,
    Category::ElectiveRequirements,
    Category::Remedial,
    Category::Other,
];

// Classification phrases used by the faculty plan sheets, checked in order.
const LABEL_PHRASES: [(&str, Category); 7] = [
    ("متطلبات الجامعة الاجبارية", Category::UniversityRequired),
    ("متطلبات الجامعة الإجباري", Category::UniversityRequired),
    ("متطلبات الجامعة الاختيارية", Category::ElectiveRequirements),
    ("متطلبات الكلية الاجبارية", Category::CollegeRequired),
    ("متطلبات التخصص الاجبارية", Category::MajorRequired),
    ("متطلبات التخصص الاختيارية", Category::MajorOptional),
    ("مواد استدراكية", Category::Remedial),
];

impl Category {
    /// Key used on the wire by the plan endpoint
    pub fn key(self) -> &'static str {
        match self {
            Category::MajorRequired => "major_required",
            Category::MajorOptional => "major_optional",
            Category::CollegeRequired => "college_required",
            Category::UniversityRequired => "university_required",
            Category::ElectiveRequirements => "elective_requirements",
            Category::Remedial => "Remedial materials",
            Category::Other => "other",
        }
    }

    /// Heading shown above the group
    pub fn label(self) -> &'static str {
        match self {
            Category::MajorRequired => "متطلبات التخصص الإجباريّة",
            Category::MajorOptional => "متطلبات التخصص الاختياريّة",
            Category::CollegeRequired => "متطلبات الكلية الإجباريّة",
            Category::UniversityRequired => "متطلبات الجامعة الإجباريّة",
            Category::ElectiveRequirements => "متطلبات الجامعة الاختياريّة",
            Category::Remedial => "مواد استدراكية",
            Category::Other => "أخرى",
        }
    }

    pub fn position(self) -> usize {
        CATEGORY_ORDER
            .iter()
            .position(|c| *c == self)
            .unwrap_or(CATEGORY_ORDER.len() - 1)
    }

    /// Parse a wire key, falling back to the Arabic classification text of the
    /// plan sheets. Unknown or empty values map to `Other`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Category::Other;
        }
        if let Some(category) = CATEGORY_ORDER.iter().find(|c| c.key() == raw) {
            return *category;
        }
        Self::from_classification_text(raw).unwrap_or(Category::Other)
    }

    fn from_classification_text(text: &str) -> Option<Self> {
        if let Some((_, category)) = LABEL_PHRASES.iter().find(|(p, _)| text.contains(p)) {
            return Some(*category);
        }

        let mandatory = text.contains("اجبار") || text.contains("إجبار");
        let optional = text.contains("اختيار");
        let university = text.contains("جامعة");
        let college = text.contains("كلية");
        let major = text.contains("تخصص");

        if mandatory {
            if university {
                return Some(Category::UniversityRequired);
            }
            if college {
                return Some(Category::CollegeRequired);
            }
            if major {
                return Some(Category::MajorRequired);
            }
        }
        if optional {
            if university {
                return Some(Category::ElectiveRequirements);
            }
            if major {
                return Some(Category::MajorOptional);
            }
        }
        None
    }
}

impl From<String> for Category {
    fn from(raw: String) -> Self {
        Category::parse(&raw)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wire_keys() {
        for category in CATEGORY_ORDER {
            assert_eq!(Category::parse(category.key()), category);
        }
    }

    #[test]
    fn test_unknown_maps_to_other() {
        assert_eq!(Category::parse(""), Category::Other);
        assert_eq!(Category::parse("free_elective"), Category::Other);
        assert_eq!(Category::parse("MAJOR_REQUIRED"), Category::Other);
    }

    #[test]
    fn test_parse_classification_text() {
        assert_eq!(
            Category::parse("متطلبات التخصص الاجبارية (93 ساعة)"),
            Category::MajorRequired
        );
        assert_eq!(
            Category::parse("مواد استدراكية"),
            Category::Remedial
        );
        assert_eq!(
            Category::parse("اختياري جامعة"),
            Category::ElectiveRequirements
        );
        assert_eq!(Category::parse("إجباري كلية"), Category::CollegeRequired);
    }

    #[test]
    fn test_order_positions() {
        assert_eq!(Category::MajorRequired.position(), 0);
        assert_eq!(Category::Other.position(), 6);
        let mut shuffled = vec![Category::Other, Category::Remedial, Category::MajorRequired];
        shuffled.sort_by_key(|c| c.position());
        assert_eq!(
            shuffled,
            vec![Category::MajorRequired, Category::Remedial, Category::Other]
        );
    }

    #[test]
    fn test_serde_roundtrip_uses_wire_key() {
        let json = serde_json::to_string(&Category::Remedial).unwrap();
        assert_eq!(json, "\"Remedial materials\"");
        assert_eq!(serde_json::to_string(&Category::MajorOptional).unwrap(), "\"major_optional\"");
        let parsed: Category = serde_json::from_str("\"unheard_of\"").unwrap();
        assert_eq!(parsed, Category::Other);
    }
}
