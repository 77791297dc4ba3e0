use serde::{Deserialize, Serialize};

use super::RequestStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MassIntention {
    pub id: i64,
    #[serde(rename = "intentionFor")]
    pub intention_for: String,
    #[serde(rename = "intentionDate", default)]
    pub intention_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "paymentStatus", default)]
    pub payment_status: Option<String>,
}

impl MassIntention {
    pub fn status_kind(&self) -> RequestStatus {
        RequestStatus::parse(self.status.as_deref())
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status
            .as_deref()
            .map(|s| s.eq_ignore_ascii_case("paid"))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMassIntention {
    #[serde(rename = "intentionFor")]
    pub intention_for: String,
    #[serde(rename = "intentionDate")]
    pub intention_date: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_intention() {
        let json = r#"{"id": 1, "intentionFor": "John Doe", "intentionDate": "2025-04-20",
            "description": "Repose of soul", "status": "APPROVED", "paymentStatus": "PAID"}"#;
        let intention: MassIntention = serde_json::from_str(json).unwrap();
        assert_eq!(intention.intention_for, "John Doe");
        assert_eq!(intention.status_kind(), RequestStatus::Approved);
        assert!(intention.is_paid());
    }

    #[test]
    fn test_unpaid_when_payment_status_missing() {
        let json = r#"{"id": 2, "intentionFor": "Family"}"#;
        let intention: MassIntention = serde_json::from_str(json).unwrap();
        assert!(!intention.is_paid());
        assert_eq!(intention.status_kind(), RequestStatus::Other);
    }
}
