use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::UserId;

/// The authenticated shopper.
///
/// Serialized with camelCase keys; this is the record the session persists and
/// restores verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl Identity {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn identity() -> Identity {
        Identity {
            id: UserId::new(),
            email: "jane@example.com".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            is_admin: false,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(identity()).unwrap();
        assert_eq!(json["firstName"], "Jane");
        assert_eq!(json["lastName"], "Doe");
        assert_eq!(json["isAdmin"], false);
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn record_round_trips_verbatim() {
        let original = identity();
        let text = serde_json::to_string(&original).unwrap();
        let restored: Identity = serde_json::from_str(&text).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn full_name_joins_parts() {
        assert_eq!(identity().full_name(), "Jane Doe");
    }
}
