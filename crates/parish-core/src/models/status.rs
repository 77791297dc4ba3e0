/// Coarse classification of the status strings the backend attaches to
/// orders, intentions and certificate requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
    Other,
}

impl RequestStatus {
    /// Classify a backend status string, ignoring case.
    pub fn parse(status: Option<&str>) -> Self {
        match status.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("pending") => RequestStatus::Pending,
            Some("approved") | Some("completed") | Some("paid") => RequestStatus::Approved,
            Some("rejected") | Some("cancelled") => RequestStatus::Rejected,
            _ => RequestStatus::Other,
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestStatus::Pending => write!(f, "Pending"),
            RequestStatus::Approved => write!(f, "Approved"),
            RequestStatus::Rejected => write!(f, "Rejected"),
            RequestStatus::Other => write!(f, "Unknown"),
        }
    }
}
