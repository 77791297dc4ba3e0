use serde_json::Value;

use crate::api::{ApiError, ApiResponse, FileUpload, Gateway, RequestContext};
use crate::models::{Certificate, CertificateRequest, CertificateType};

pub struct CertificateService<'a> {
    gateway: &'a Gateway,
}

impl<'a> CertificateService<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    pub async fn request(
        &self,
        certificate_type: CertificateType,
        remarks: Option<&str>,
    ) -> Result<ApiResponse<Value>, ApiError> {
        let ctx = RequestContext::post("/api/certificates/request").json(&CertificateRequest {
            certificate_type,
            remarks: remarks.map(str::to_string),
        })?;
        self.gateway.send(ctx).await
    }

    /// Attach the issued certificate file to a request (parish office only)
    pub async fn upload(&self, id: i64, file: FileUpload) -> Result<ApiResponse<Certificate>, ApiError> {
        let form = file.into_form().await?;
        let ctx = RequestContext::post(format!("/api/certificates/{}/upload", id)).multipart(form);
        self.gateway.send(ctx).await
    }

    pub async fn all(&self) -> Result<ApiResponse<Vec<Certificate>>, ApiError> {
        self.gateway.send(RequestContext::get("/api/certificates")).await
    }

    pub async fn mine(&self) -> Result<ApiResponse<Vec<Certificate>>, ApiError> {
        self.gateway.send(RequestContext::get("/api/certificates/me")).await
    }
}
