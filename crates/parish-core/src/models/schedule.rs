use serde::{Deserialize, Serialize};

/// Who serves at the altar, reads, and sings for a given service date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AltarSchedule {
    pub id: i64,
    #[serde(rename = "serviceDate")]
    pub service_date: String,
    #[serde(rename = "altarBoys", default)]
    pub altar_boys: Option<String>,
    #[serde(default)]
    pub readers: Option<String>,
    #[serde(rename = "choirMembers", default)]
    pub choir_members: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AltarScheduleInput {
    #[serde(rename = "serviceDate")]
    pub service_date: String,
    #[serde(rename = "altarBoys")]
    pub altar_boys: String,
    pub readers: String,
    #[serde(rename = "choirMembers")]
    pub choir_members: String,
}
