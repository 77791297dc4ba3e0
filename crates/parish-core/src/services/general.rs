use serde_json::Value;

use crate::api::{ApiError, ApiResponse, FileUpload, Gateway, RequestContext};
use crate::models::{AltarSchedule, AltarScheduleInput, Birthday, MonthlyPdf, Notification};

/// Notifications, newsletters, altar schedules and birthdays.
pub struct GeneralService<'a> {
    gateway: &'a Gateway,
}

impl<'a> GeneralService<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    // ===== Notifications =====

    pub async fn notifications(&self) -> Result<ApiResponse<Vec<Notification>>, ApiError> {
        self.gateway.send(RequestContext::get("/api/notifications")).await
    }

    /// Title and message travel as query parameters, not a body
    pub async fn create_notification(&self, title: &str, message: &str) -> Result<ApiResponse<Notification>, ApiError> {
        let ctx = RequestContext::post("/api/notifications")
            .query("title", title)
            .query("message", message);
        self.gateway.send(ctx).await
    }

    pub async fn delete_notification(&self, id: i64) -> Result<ApiResponse<Value>, ApiError> {
        let ctx = RequestContext::delete(format!("/api/notifications/{}", id));
        self.gateway.send(ctx).await
    }

    // ===== Newsletters =====

    pub async fn monthly_pdf(&self, month: &str, year: i32) -> Result<ApiResponse<MonthlyPdf>, ApiError> {
        let ctx = RequestContext::get("/api/monthly-pdf")
            .query("month", month)
            .query("year", year);
        self.gateway.send(ctx).await
    }

    pub async fn upload_monthly_pdf(
        &self,
        month: &str,
        year: i32,
        file: FileUpload,
    ) -> Result<ApiResponse<MonthlyPdf>, ApiError> {
        let form = file.into_form().await?;
        let ctx = RequestContext::post("/api/monthly-pdf")
            .query("month", month)
            .query("year", year)
            .multipart(form);
        self.gateway.send(ctx).await
    }

    pub async fn all_monthly_pdfs(&self) -> Result<ApiResponse<Vec<MonthlyPdf>>, ApiError> {
        self.gateway.send(RequestContext::get("/api/monthly-pdf/all")).await
    }

    // ===== Altar schedules =====

    pub async fn altar_schedules(&self) -> Result<ApiResponse<Vec<AltarSchedule>>, ApiError> {
        self.gateway.send(RequestContext::get("/api/altar-schedule")).await
    }

    pub async fn create_altar_schedule(&self, input: &AltarScheduleInput) -> Result<ApiResponse<AltarSchedule>, ApiError> {
        let ctx = RequestContext::post("/api/altar-schedule").json(input)?;
        self.gateway.send(ctx).await
    }

    pub async fn update_altar_schedule(
        &self,
        id: i64,
        input: &AltarScheduleInput,
    ) -> Result<ApiResponse<AltarSchedule>, ApiError> {
        let ctx = RequestContext::put(format!("/api/altar-schedule/{}", id)).json(input)?;
        self.gateway.send(ctx).await
    }

    /// Schedule for a `YYYY-MM-DD` service date
    pub async fn altar_schedule_by_date(&self, date: &str) -> Result<ApiResponse<AltarSchedule>, ApiError> {
        let ctx = RequestContext::get(format!("/api/altar-schedule/{}", urlencoding::encode(date)));
        self.gateway.send(ctx).await
    }

    // ===== Birthdays =====

    pub async fn birthdays_today(&self) -> Result<ApiResponse<Vec<Birthday>>, ApiError> {
        self.gateway.send(RequestContext::get("/api/birthdays/today")).await
    }

    pub async fn birthdays_by_month(&self, month: u32) -> Result<ApiResponse<Vec<Birthday>>, ApiError> {
        let ctx = RequestContext::get(format!("/api/birthdays/month/{}", month));
        self.gateway.send(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path, query_param};
    use wiremock::{Mock, ResponseTemplate};

    use super::*;
    use crate::services::test_support::logged_in;

    #[tokio::test]
    async fn test_create_notification_uses_query_params() {
        let (server, gateway) = logged_in().await;
        Mock::given(method("POST"))
            .and(path("/api/notifications"))
            .and(query_param("title", "Choir practice"))
            .and(query_param("message", "Thursday 7pm & bring music"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {"id": 5, "title": "Choir practice", "message": "Thursday 7pm & bring music"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let created = gateway
            .general()
            .create_notification("Choir practice", "Thursday 7pm & bring music")
            .await
            .unwrap()
            .into_data()
            .unwrap();
        assert_eq!(created.id, 5);
    }

    #[tokio::test]
    async fn test_delete_notification() {
        let (server, gateway) = logged_in().await;
        Mock::given(method("DELETE"))
            .and(path("/api/notifications/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;

        assert!(gateway.general().delete_notification(5).await.unwrap().success);
    }

    #[tokio::test]
    async fn test_monthly_pdf_query() {
        let (server, gateway) = logged_in().await;
        Mock::given(method("GET"))
            .and(path("/api/monthly-pdf"))
            .and(query_param("month", "MARCH"))
            .and(query_param("year", "2025"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {"id": 1, "month": "MARCH", "year": 2025}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let pdf = gateway.general().monthly_pdf("MARCH", 2025).await.unwrap().into_data().unwrap();
        assert_eq!(pdf.year, 2025);
    }

    #[tokio::test]
    async fn test_upload_monthly_pdf() {
        let (server, gateway) = logged_in().await;
        Mock::given(method("POST"))
            .and(path("/api/monthly-pdf"))
            .and(query_param("month", "4"))
            .and(query_param("year", "2025"))
            .and(body_string_contains("filename=\"april.pdf\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {"id": 2, "month": 4, "year": 2025}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let upload = FileUpload::from_bytes(b"%PDF".to_vec(), "april.pdf", "application/pdf");
        let pdf = gateway
            .general()
            .upload_monthly_pdf("4", 2025, upload)
            .await
            .unwrap()
            .into_data()
            .unwrap();
        assert_eq!(pdf.month, "4");
    }

    #[tokio::test]
    async fn test_altar_schedule_by_date_and_update() {
        let (server, gateway) = logged_in().await;
        Mock::given(method("GET"))
            .and(path("/api/altar-schedule/2025-06-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {"id": 3, "serviceDate": "2025-06-01", "readers": "Anna"}
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/altar-schedule/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {"id": 3, "serviceDate": "2025-06-01", "readers": "Paul"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let general = gateway.general();
        let schedule = general
            .altar_schedule_by_date("2025-06-01")
            .await
            .unwrap()
            .into_data()
            .unwrap();
        assert_eq!(schedule.readers.as_deref(), Some("Anna"));

        let updated = general
            .update_altar_schedule(
                schedule.id,
                &AltarScheduleInput {
                    service_date: schedule.service_date.clone(),
                    altar_boys: "Tom".to_string(),
                    readers: "Paul".to_string(),
                    choir_members: "St. Cecilia choir".to_string(),
                },
            )
            .await
            .unwrap()
            .into_data()
            .unwrap();
        assert_eq!(updated.readers.as_deref(), Some("Paul"));
    }

    #[tokio::test]
    async fn test_birthdays_by_month() {
        let (server, gateway) = logged_in().await;
        Mock::given(method("GET"))
            .and(path("/api/birthdays/month/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [{"id": 1, "feastName": "St. Anne", "user": {"name": "Anne"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let birthdays = gateway.general().birthdays_by_month(7).await.unwrap().data_or_default();
        assert_eq!(birthdays.len(), 1);
    }
}
