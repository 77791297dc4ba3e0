use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::RequestStatus;

/// Sacramental certificates the parish office issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CertificateType {
    Baptism,
    Confirmation,
    Marriage,
    FirstCommunion,
}

impl CertificateType {
    pub const ALL: [CertificateType; 4] = [
        CertificateType::Baptism,
        CertificateType::Confirmation,
        CertificateType::Marriage,
        CertificateType::FirstCommunion,
    ];

    /// Wire value, e.g. `FIRST_COMMUNION`
    pub fn code(self) -> &'static str {
        match self {
            CertificateType::Baptism => "BAPTISM",
            CertificateType::Confirmation => "CONFIRMATION",
            CertificateType::Marriage => "MARRIAGE",
            CertificateType::FirstCommunion => "FIRST_COMMUNION",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CertificateType::Baptism => "Baptism Certificate",
            CertificateType::Confirmation => "Confirmation Certificate",
            CertificateType::Marriage => "Marriage Certificate",
            CertificateType::FirstCommunion => "First Communion Certificate",
        }
    }
}

impl FromStr for CertificateType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        CertificateType::ALL
            .into_iter()
            .find(|t| t.code() == normalized)
            .ok_or_else(|| {
                let known: Vec<&str> = CertificateType::ALL.iter().map(|t| t.code()).collect();
                format!("Unknown certificate type '{}' (expected one of {})", s, known.join(", "))
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateRequest {
    #[serde(rename = "certificateType")]
    pub certificate_type: CertificateType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Certificate {
    pub id: i64,
    // Kept as sent so unknown types from newer backends still parse
    #[serde(rename = "certificateType")]
    pub certificate_type: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(rename = "requestedAt", default)]
    pub requested_at: Option<String>,
    #[serde(rename = "fileUrl", default)]
    pub file_url: Option<String>,
}

impl Certificate {
    pub fn kind(&self) -> Option<CertificateType> {
        self.certificate_type.parse().ok()
    }

    pub fn display_name(&self) -> String {
        self.kind()
            .map(|k| k.label().to_string())
            .unwrap_or_else(|| self.certificate_type.clone())
    }

    pub fn status_kind(&self) -> RequestStatus {
        RequestStatus::parse(self.status.as_deref())
    }

    /// A certificate is ready for download once the office uploaded a file
    pub fn is_ready(&self) -> bool {
        self.file_url.as_deref().is_some_and(|url| !url.is_empty())
    }
}
