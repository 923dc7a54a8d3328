use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Category;

/// A course offered in the study plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCourseItem")]
pub struct CourseItem {
    /// Unique identity key
    pub code: String,

    #[serde(default)]
    pub name: String,

    pub category: Category,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<f64>,

    /// Prerequisite codes in declaration order
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

impl CourseItem {
    /// Name used on chips and result rows; falls back to the code
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.code
        } else {
            &self.name
        }
    }
}

/// Wire shape of a plan entry. Servers have shipped prerequisites as either
/// `prerequisites` or `prereqs`, and `hours` as a number or a string.
#[derive(Deserialize)]
struct RawCourseItem {
    code: String,

    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    category: Option<Value>,

    #[serde(default)]
    hours: Option<Value>,

    #[serde(default)]
    prerequisites: Option<Value>,

    #[serde(default)]
    prereqs: Option<Value>,
}

impl From<RawCourseItem> for CourseItem {
    fn from(raw: RawCourseItem) -> Self {
        let category = raw
            .category
            .as_ref()
            .and_then(Value::as_str)
            .map(Category::parse)
            .unwrap_or(Category::Other);

        let prerequisites = code_list(raw.prerequisites.as_ref())
            .or_else(|| code_list(raw.prereqs.as_ref()))
            .unwrap_or_default();

        Self {
            code: raw.code,
            name: raw.name.unwrap_or_default(),
            category,
            hours: raw.hours.as_ref().and_then(parse_hours),
            prerequisites,
        }
    }
}

/// `Some` only when the value is a sequence; non-string entries are dropped.
fn code_list(value: Option<&Value>) -> Option<Vec<String>> {
    let entries = value?.as_array()?;
    Some(
        entries
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
    )
}

fn parse_hours(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
