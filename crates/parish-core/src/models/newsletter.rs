use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
}

/// Monthly parish newsletter PDF.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyPdf {
    pub id: i64,
    // Sent either as "3" or "MARCH" depending on who uploaded it
    #[serde(deserialize_with = "string_or_number")]
    pub month: String,
    pub year: i32,
    #[serde(rename = "uploadedAt", default)]
    pub uploaded_at: Option<String>,
    #[serde(rename = "fileUrl", alias = "pdfUrl", default)]
    pub file_url: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected month as string or number, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_monthly_pdf_numeric_month() {
        let json = r#"{"id": 1, "month": 3, "year": 2025, "uploadedAt": "2025-03-02T08:00:00Z"}"#;
        let pdf: MonthlyPdf = serde_json::from_str(json).unwrap();
        assert_eq!(pdf.month, "3");
        assert_eq!(pdf.year, 2025);
    }

    #[test]
    fn test_parse_monthly_pdf_named_month() {
        let json = r#"{"id": 2, "month": "APRIL", "year": 2025, "pdfUrl": "/pdf/2.pdf"}"#;
        let pdf: MonthlyPdf = serde_json::from_str(json).unwrap();
        assert_eq!(pdf.month, "APRIL");
        assert_eq!(pdf.file_url.as_deref(), Some("/pdf/2.pdf"));
    }

    #[test]
    fn test_parse_notification() {
        let json = r#"{"id": 4, "title": "Feast day", "message": "Procession at 5pm"}"#;
        let n: Notification = serde_json::from_str(json).unwrap();
        assert_eq!(n.title, "Feast day");
        assert!(n.created_at.is_none());
    }
}
