//! Wire types for the recommendation endpoint and their display forms

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::Category;
use crate::text;

/// Body of `POST /api/recommend`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub taken_codes: Vec<String>,
    pub max_hours: u32,
    pub use_offered: bool,
    /// Ask the server to refresh its offered-sections cache first
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub refresh_offered: bool,
}

/// Response body. Only `ok` is mandatory; everything else depends on it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendationResponse {
    pub ok: bool,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub courses: Option<Vec<ScheduledCourse>>,

    #[serde(default)]
    pub total_hours: Option<f64>,

    #[serde(default)]
    pub conflicts: Option<Vec<Value>>,

    #[serde(default)]
    pub redirect_url: Option<String>,

    #[serde(default)]
    pub can_refresh: Option<bool>,
}

/// A course placed in the generated schedule
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduledCourse {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub hours: Option<Value>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub instructor: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// One row of the result table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleRow {
    pub code: String,
    pub name: String,
    pub hours: String,
    pub time: String,
    pub instructor: String,
    pub category: String,
}

impl From<&ScheduledCourse> for ScheduleRow {
    fn from(course: &ScheduledCourse) -> Self {
        let code = course.code.clone().unwrap_or_default();
        let name = course
            .name
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| code.clone());
        let hours = match &course.hours {
            Some(Value::Number(n)) => n.as_f64().map(text::format_number).unwrap_or_default(),
            Some(Value::String(s)) => s.clone(),
            _ => String::new(),
        };
        let category = match course.category.as_deref() {
            None | Some("") => String::new(),
            Some(raw) => match Category::parse(raw) {
                Category::Other if raw.trim() != Category::Other.key() => raw.to_string(),
                category => category.label().to_string(),
            },
        };

        Self {
            code,
            name,
            hours,
            time: course.time.clone().unwrap_or_default(),
            instructor: course.instructor.clone().unwrap_or_default(),
            category,
        }
    }
}

/// The three summary metrics, taken verbatim from the response
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Kpis {
    pub total_hours: f64,
    pub course_count: usize,
    pub conflict_count: usize,
}

impl Kpis {
    pub fn hours_text(&self) -> String {
        text::format_number(self.total_hours)
    }

    pub fn count_text(&self) -> String {
        self.course_count.to_string()
    }

    pub fn conflicts_text(&self) -> String {
        self.conflict_count.to_string()
    }
}

/// A successful generation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    pub rows: Vec<ScheduleRow>,
    pub kpis: Kpis,
    pub summary: String,
}

/// The server declined to build a schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusinessFailure {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    pub can_refresh: bool,
}

/// How a generate call ended
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerateOutcome {
    Success(Schedule),
    BusinessFailure(BusinessFailure),
    /// Network or parse failure; the detail is for logs, not for display
    TransportFailure { detail: String },
}

impl GenerateOutcome {
    pub fn rows(&self) -> &[ScheduleRow] {
        match self {
            GenerateOutcome::Success(schedule) => &schedule.rows,
            _ => &[],
        }
    }

    /// Metrics to display; all zero unless the call succeeded
    pub fn kpis(&self) -> Kpis {
        match self {
            GenerateOutcome::Success(schedule) => schedule.kpis,
            _ => Kpis::default(),
        }
    }

    /// Text for the summary line under the results
    pub fn summary(&self) -> &str {
        match self {
            GenerateOutcome::Success(schedule) => &schedule.summary,
            GenerateOutcome::BusinessFailure(failure) => &failure.message,
            GenerateOutcome::TransportFailure { .. } => "",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, GenerateOutcome::Success(_))
    }
}
