//! Recommendation client: shapes the request, submits it, and interprets the
//! response. Schedule generation itself happens on the server.

mod types;

pub use types::*;

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::error::RecommendError;
use crate::text;

#[async_trait]
pub trait RecommendationService: Send + Sync {
    /// Submit one request. `Ok` means the body was well formed, whatever its `ok` flag says.
    async fn submit(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResponse, RecommendError>;
}

/// Recommendation endpoint over HTTP
pub struct HttpRecommendationService {
    pub http: reqwest::Client,
    pub url: String,
}

#[async_trait]
impl RecommendationService for HttpRecommendationService {
    async fn submit(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResponse, RecommendError> {
        debug!(url = %self.url, taken = request.taken_codes.len(), "Submitting recommendation request");

        let response = self.http.post(&self.url).json(request).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        let parsed: RecommendationResponse = serde_json::from_slice(&body)?;

        // An error status only carries a trustworthy body when it reports a refusal
        if !status.is_success() && parsed.ok {
            return Err(RecommendError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        Ok(parsed)
    }
}

/// Submit `request` and classify the result
pub async fn generate(
    service: &dyn RecommendationService,
    request: &RecommendationRequest,
) -> GenerateOutcome {
    let reply = service.submit(request).await;
    interpret(request, reply)
}

/// Map a service reply onto a display outcome.
///
/// Metrics come straight from the payload; nothing is recomputed here.
pub fn interpret(
    request: &RecommendationRequest,
    reply: Result<RecommendationResponse, RecommendError>,
) -> GenerateOutcome {
    let response = match reply {
        Ok(response) => response,
        Err(e) => {
            error!("Recommendation failed: {}", e);
            return GenerateOutcome::TransportFailure {
                detail: e.to_string(),
            };
        }
    };

    if !response.ok {
        let message = response
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| text::GENERATE_FALLBACK_MESSAGE.to_string());
        info!("Server declined to generate a schedule: {}", message);
        return GenerateOutcome::BusinessFailure(BusinessFailure {
            message,
            redirect_url: response.redirect_url,
            can_refresh: response.can_refresh.unwrap_or(false),
        });
    }

    let courses = response.courses.unwrap_or_default();
    let rows: Vec<ScheduleRow> = courses.iter().map(ScheduleRow::from).collect();
    let kpis = Kpis {
        total_hours: response.total_hours.unwrap_or(0.0),
        course_count: courses.len(),
        conflict_count: response.conflicts.map(|c| c.len()).unwrap_or(0),
    };
    let summary = text::hours_summary(kpis.total_hours, request.max_hours, request.use_offered);

    info!(
        "Schedule generated: {} courses, {} hours",
        kpis.course_count,
        kpis.hours_text()
    );

    GenerateOutcome::Success(Schedule {
        rows,
        kpis,
        summary,
    })
}


#[cfg(test)]
mod tests {
    use super::fake::ScriptedService;
    use super::*;

    fn request(use_offered: bool) -> RecommendationRequest {
        RecommendationRequest {
            taken_codes: vec!["A".to_string(), "B".to_string()],
            max_hours: 18,
            use_offered,
            refresh_offered: false,
        }
    }

    #[test]
    fn test_request_wire_shape() {
        let value = serde_json::to_value(request(true)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"taken_codes": ["A", "B"], "max_hours": 18, "use_offered": true})
        );

        let mut refreshing = request(true);
        refreshing.refresh_offered = true;
        let value = serde_json::to_value(refreshing).unwrap();
        assert_eq!(value["refresh_offered"], true);
    }

    #[tokio::test]
    async fn test_business_failure_shows_message_verbatim() {
        let service = ScriptedService::replying(r#"{"ok": false, "message": "لا يوجد جدول مناسب"}"#);
        let outcome = generate(&service, &request(true)).await;

        assert_eq!(outcome.summary(), "لا يوجد جدول مناسب");
        assert!(outcome.rows().is_empty());
        assert_eq!(outcome.kpis(), Kpis::default());
        assert_eq!(outcome.kpis().hours_text(), "0");
        assert_eq!(outcome.kpis().count_text(), "0");
        assert_eq!(outcome.kpis().conflicts_text(), "0");
        assert_eq!(service.seen.lock().unwrap()[0], request(true));
    }

    #[tokio::test]
    async fn test_business_failure_without_message_uses_fallback() {
        let service = ScriptedService::replying(
            r#"{"ok": false, "redirect_url": "http://bulletin.example/courses", "can_refresh": true}"#,
        );
        let outcome = generate(&service, &request(true)).await;
        match outcome {
            GenerateOutcome::BusinessFailure(failure) => {
                assert_eq!(failure.message, text::GENERATE_FALLBACK_MESSAGE);
                assert_eq!(
                    failure.redirect_url.as_deref(),
                    Some("http://bulletin.example/courses")
                );
                assert!(failure.can_refresh);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_success_maps_rows_and_kpis() {
        let service = ScriptedService::replying(
            r#"{
                "ok": true,
                "total_hours": 8,
                "courses": [
                    {"code": "ELE201", "name": "برمجة 2", "hours": 3, "time": "ث 10:00 11:00", "instructor": "د. سامي", "category": "major_required"},
                    {"code": "PHY101", "name": "", "hours": 5, "category": ""}
                ],
                "conflicts": []
            }"#,
        );
        let outcome = generate(&service, &request(true)).await;

        assert!(outcome.is_success());
        let kpis = outcome.kpis();
        assert_eq!(kpis.hours_text(), "8");
        assert_eq!(kpis.count_text(), "2");
        assert_eq!(kpis.conflicts_text(), "0");

        let rows = outcome.rows();
        assert_eq!(rows[0].name, "برمجة 2");
        assert_eq!(rows[0].hours, "3");
        assert_eq!(rows[0].category, "متطلبات التخصص الإجباريّة");
        assert_eq!(rows[1].name, "PHY101");
        assert_eq!(rows[1].time, "");
        assert_eq!(rows[1].category, "");
        assert_eq!(outcome.summary(), "عدد الساعات: 8 / 18");
    }

    #[tokio::test]
    async fn test_unrecognised_row_category_shown_as_sent() {
        let service = ScriptedService::replying(
            r#"{"ok": true, "total_hours": 6, "courses": [
                {"code": "W1", "category": "ورشة عمل"},
                {"code": "O1", "category": "other"}
            ]}"#,
        );
        let outcome = generate(&service, &request(false)).await;
        let rows = outcome.rows();
        assert_eq!(rows[0].category, "ورشة عمل");
        assert_eq!(rows[1].category, "أخرى");
    }

    #[tokio::test]
    async fn test_kpis_come_from_payload_not_rows() {
        // total_hours disagrees with the rows on purpose; the payload wins
        let service = ScriptedService::replying(
            r#"{"ok": true, "total_hours": 12, "courses": [{"code": "A", "hours": 3}], "conflicts": [{"a": 1}, {"b": 2}]}"#,
        );
        let outcome = generate(&service, &request(false)).await;
        let kpis = outcome.kpis();
        assert_eq!(kpis.hours_text(), "12");
        assert_eq!(kpis.count_text(), "1");
        assert_eq!(kpis.conflicts_text(), "2");
        assert!(outcome.summary().ends_with(text::NAMES_ONLY_SUFFIX));
    }

    #[tokio::test]
    async fn test_malformed_body_is_transport_failure() {
        let service = ScriptedService::replying(r#"{"ok": true, "courses": "oops"}"#);
        let outcome = generate(&service, &request(true)).await;
        assert!(matches!(outcome, GenerateOutcome::TransportFailure { .. }));
        assert!(outcome.rows().is_empty());
        assert_eq!(outcome.summary(), "");
    }

    #[tokio::test]
    async fn test_unexpected_status_is_transport_failure() {
        let service = ScriptedService::default();
        service.push_error(RecommendError::UnexpectedStatus { status: 502 });
        let outcome = generate(&service, &request(true)).await;
        assert!(matches!(outcome, GenerateOutcome::TransportFailure { .. }));
        assert_eq!(outcome.kpis(), Kpis::default());
    }
}
