use serde_json::Value;

use crate::api::{ApiError, ApiResponse, Gateway, RequestContext};
use crate::models::{MassIntention, NewMassIntention};

pub struct MassIntentionService<'a> {
    gateway: &'a Gateway,
}

impl<'a> MassIntentionService<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    pub async fn all(&self) -> Result<ApiResponse<Vec<MassIntention>>, ApiError> {
        self.gateway.send(RequestContext::get("/api/mass-intentions")).await
    }

    pub async fn create(&self, intention: &NewMassIntention) -> Result<ApiResponse<MassIntention>, ApiError> {
        let ctx = RequestContext::post("/api/mass-intentions").json(intention)?;
        self.gateway.send(ctx).await
    }

    pub async fn mine(&self) -> Result<ApiResponse<Vec<MassIntention>>, ApiError> {
        self.gateway.send(RequestContext::get("/api/mass-intentions/me")).await
    }

    pub async fn approve(&self, id: i64) -> Result<ApiResponse<Value>, ApiError> {
        self.transition(id, "approve").await
    }

    pub async fn reject(&self, id: i64) -> Result<ApiResponse<Value>, ApiError> {
        self.transition(id, "reject").await
    }

    pub async fn pay(&self, id: i64) -> Result<ApiResponse<Value>, ApiError> {
        self.transition(id, "pay").await
    }

    async fn transition(&self, id: i64, action: &str) -> Result<ApiResponse<Value>, ApiError> {
        let ctx = RequestContext::put(format!("/api/mass-intentions/{}/{}", id, action));
        self.gateway.send(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, ResponseTemplate};

    use super::*;
    use crate::services::test_support::logged_in;

    #[tokio::test]
    async fn test_create_intention() {
        let (server, gateway) = logged_in().await;
        Mock::given(method("POST"))
            .and(path("/api/mass-intentions"))
            .and(body_json(json!({
                "intentionFor": "Late grandparents",
                "intentionDate": "2025-11-02",
                "description": "All Souls"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {"id": 12, "intentionFor": "Late grandparents", "status": "PENDING"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let created = gateway
            .mass_intentions()
            .create(&NewMassIntention {
                intention_for: "Late grandparents".to_string(),
                intention_date: "2025-11-02".to_string(),
                description: "All Souls".to_string(),
            })
            .await
            .unwrap()
            .into_data()
            .unwrap();
        assert_eq!(created.id, 12);
    }

    #[tokio::test]
    async fn test_transitions_use_put() {
        let (server, gateway) = logged_in().await;
        for action in ["approve", "reject", "pay"] {
            Mock::given(method("PUT"))
                .and(path(format!("/api/mass-intentions/4/{}", action)))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
                .expect(1)
                .mount(&server)
                .await;
        }

        let service = gateway.mass_intentions();
        assert!(service.approve(4).await.unwrap().success);
        assert!(service.reject(4).await.unwrap().success);
        assert!(service.pay(4).await.unwrap().success);
    }
}
