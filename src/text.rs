//! Student-facing strings. The planner's audience reads Arabic, so every notice,
//! marker and label shown in a view comes from here.

pub const EMPTY_GROUP: &str = "لا توجد عناصر.";
pub const EMPTY_PLAN: &str = "لا توجد بيانات خطة.";
pub const PLAN_LOAD_FAILED: &str = "خطأ في تحميل الخطة";
pub const GENERATE_FAILED: &str = "فشل التوليد، تحقّق من الخادم";
pub const GENERATE_FALLBACK_MESSAGE: &str = "تعذّر توليد الجدول.";
pub const GENERATING: &str = "جارِ التوليد…";
pub const NAMES_ONLY_SUFFIX: &str = " — (وضع بدون أوقات)";
pub const HOURS_SUFFIX: &str = "س";

/// Arabic list separator used when naming several courses.
pub const LIST_SEPARATOR: &str = "، ";

/// Explanation attached to a blocked chip and raised when it is toggled.
pub fn blocked_explanation(unmet: &[String]) -> String {
    format!("لا بد من إنهاء: {}", unmet.join(LIST_SEPARATOR))
}

/// Summary line under a generated schedule.
pub fn hours_summary(total_hours: f64, max_hours: u32, use_offered: bool) -> String {
    let mut line = format!("عدد الساعات: {} / {}", format_number(total_hours), max_hours);
    if !use_offered {
        line.push_str(NAMES_ONLY_SUFFIX);
    }
    line
}

/// Notice raised when a plan fetch installs a new catalog.
pub fn plan_loaded_notice(count: usize) -> String {
    format!("تم تحميل الخطة: {} مادة", count)
}

/// Notice raised when a reloaded catalog no longer contains selected codes.
pub fn dropped_selection_notice(dropped: &[String]) -> String {
    format!(
        "أُزيلت مواد لم تعد في الخطة: {}",
        dropped.join(LIST_SEPARATOR)
    )
}

/// Render a numeric value without a trailing `.0` for whole numbers.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
