use crate::recommend::GenerateOutcome;
use crate::text;

/// Render a generate outcome: result table, KPIs and summary line
pub fn render_outcome(outcome: &GenerateOutcome) -> String {
    let mut content = String::new();

    if let GenerateOutcome::TransportFailure { .. } = outcome {
        content.push_str(text::GENERATE_FAILED);
        content.push('\n');
        return content;
    }

    let kpis = outcome.kpis();
    content.push_str("| Hours | Courses | Conflicts |\n");
    content.push_str("|-------|---------|-----------|\n");
    content.push_str(&format!(
        "| {} | {} | {} |\n\n",
        kpis.hours_text(),
        kpis.count_text(),
        kpis.conflicts_text()
    ));

    let rows = outcome.rows();
    if !rows.is_empty() {
        content.push_str("| Course | Hours | Time | Instructor | Category |\n");
        content.push_str("|--------|-------|------|------------|----------|\n");
        for row in rows {
            content.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                row.name, row.hours, row.time, row.instructor, row.category
            ));
        }
        content.push('\n');
    }

    content.push_str(outcome.summary());
    content.push('\n');

    if let GenerateOutcome::BusinessFailure(failure) = outcome {
        if let Some(url) = &failure.redirect_url {
            content.push_str(&format!("Course bulletin: {}\n", url));
        }
        if failure.can_refresh {
            content.push_str("Retry with --refresh-offered to refresh offered sections.\n");
        }
    }

    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommend::{BusinessFailure, Kpis, Schedule, ScheduleRow};

    #[test]
    fn test_render_success() {
        let outcome = GenerateOutcome::Success(Schedule {
            rows: vec![ScheduleRow {
                code: "A".to_string(),
                name: "برمجة 1".to_string(),
                hours: "3".to_string(),
                time: "ث 10:00 11:00".to_string(),
                instructor: "د. ليلى".to_string(),
                category: "أخرى".to_string(),
            }],
            kpis: Kpis {
                total_hours: 3.0,
                course_count: 1,
                conflict_count: 0,
            },
            summary: "عدد الساعات: 3 / 18".to_string(),
        });
        let out = render_outcome(&outcome);
        assert!(out.contains("| 3 | 1 | 0 |"));
        assert!(out.contains("| برمجة 1 | 3 | ث 10:00 11:00 | د. ليلى | أخرى |"));
        assert!(out.ends_with("عدد الساعات: 3 / 18\n"));
    }

    #[test]
    fn test_render_business_failure() {
        let outcome = GenerateOutcome::BusinessFailure(BusinessFailure {
            message: "لا يوجد جدول مناسب".to_string(),
            redirect_url: None,
            can_refresh: true,
        });
        let out = render_outcome(&outcome);
        assert!(out.contains("| 0 | 0 | 0 |"));
        assert!(!out.contains("| Course |"));
        assert!(out.contains("لا يوجد جدول مناسب"));
        assert!(out.contains("--refresh-offered"));
    }

    #[test]
    fn test_render_transport_failure() {
        let outcome = GenerateOutcome::TransportFailure {
            detail: "connection refused".to_string(),
        };
        assert_eq!(render_outcome(&outcome), format!("{}\n", text::GENERATE_FAILED));
    }
}
