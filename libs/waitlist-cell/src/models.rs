use std::fmt;

use serde::{Deserialize, Serialize};

use shared_database::Record;

pub const DEFAULT_LOCATION: &str = "Main Branch - OPD";
pub const DEFAULT_TIME: &str = "Requested for Today";
pub const DEFAULT_REQ_TIME: &str = "Just now";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RequestType {
    Doctor,
    Bed,
    Lab,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestStatus::Approved | RequestStatus::Rejected)
    }

    pub fn can_transition_to(&self, target: &RequestStatus) -> bool {
        use RequestStatus::*;
        matches!((self, target), (Pending, Approved) | (Pending, Rejected))
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Approved => "Approved",
            RequestStatus::Rejected => "Rejected",
        };
        f.write_str(label)
    }
}

/// Colour band of a waitlist card.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Warning,
    Gold,
    Danger,
}

/// A pending service request as stored under `active_waitlist`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WaitlistRequest {
    pub id: i64,
    #[serde(rename = "type")]
    pub request_type: RequestType,
    pub title: String,
    pub subtitle: String,
    pub location: String,
    pub time: String,
    /// Display price, e.g. `₹1500`.
    pub price: String,
    pub status: RequestStatus,
    pub priority: Priority,
    #[serde(rename = "reqTime")]
    pub req_time: String,
}

impl Record for WaitlistRequest {
    fn id(&self) -> i64 {
        self.id
    }
}

/// A processed request as stored under `request_history`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub request: WaitlistRequest,
    #[serde(rename = "finalStatus")]
    pub final_status: RequestStatus,
    #[serde(rename = "processedAt")]
    pub processed_at: String,
}

/// A request as shown on the dashboard, with its place in its type's queue.
#[derive(Debug, Clone, Serialize)]
pub struct WaitlistItem {
    #[serde(flatten)]
    pub request: WaitlistRequest,
    pub position: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct WaitlistCounts {
    pub doctor: usize,
    pub bed: usize,
    pub lab: usize,
    pub total: usize,
}

// ==============================================================================
// REQUEST DTOs
// ==============================================================================

/// Booking request sent from a hospital's details page. Doctors and labs are
/// referenced by id; bed requests carry their own description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitWaitlistRequest {
    #[serde(rename = "type")]
    pub request_type: RequestType,
    pub resource_id: Option<i64>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub price: Option<String>,
    pub location: Option<String>,
    pub time: Option<String>,
    pub priority: Option<Priority>,
    #[serde(rename = "reqTime")]
    pub req_time: Option<String>,
}

impl SubmitWaitlistRequest {
    pub fn for_resource(request_type: RequestType, resource_id: i64) -> Self {
        Self {
            request_type,
            resource_id: Some(resource_id),
            title: None,
            subtitle: None,
            price: None,
            location: None,
            time: None,
            priority: None,
            req_time: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WaitlistQuery {
    pub status: Option<RequestStatus>,
    pub priority: Option<Priority>,
    #[serde(rename = "type")]
    pub request_type: Option<RequestType>,
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_transitions() {
        assert!(RequestStatus::Pending.can_transition_to(&RequestStatus::Approved));
        assert!(RequestStatus::Pending.can_transition_to(&RequestStatus::Rejected));
        assert!(!RequestStatus::Approved.can_transition_to(&RequestStatus::Rejected));
        assert!(!RequestStatus::Pending.can_transition_to(&RequestStatus::Pending));
        assert!(RequestStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_history_entry_shape() {
        let entry = HistoryEntry {
            request: WaitlistRequest {
                id: 17,
                request_type: RequestType::Bed,
                title: "ICU Bed".to_string(),
                subtitle: "Critical Care".to_string(),
                location: DEFAULT_LOCATION.to_string(),
                time: DEFAULT_TIME.to_string(),
                price: "₹5000".to_string(),
                status: RequestStatus::Approved,
                priority: Priority::Danger,
                req_time: DEFAULT_REQ_TIME.to_string(),
            },
            final_status: RequestStatus::Approved,
            processed_at: "10/19/2026, 9:15:00 AM".to_string(),
        };

        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["type"], "bed");
        assert_eq!(value["priority"], "danger");
        assert_eq!(value["reqTime"], "Just now");
        assert_eq!(value["finalStatus"], "Approved");
        assert_eq!(value["processedAt"], json!("10/19/2026, 9:15:00 AM"));
        assert_eq!(serde_json::from_value::<HistoryEntry>(value).unwrap(), entry);
    }
}
