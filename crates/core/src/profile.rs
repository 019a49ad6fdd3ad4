use serde::{Deserialize, Serialize};

use crate::{Role, SocietyId, UserId};

/// Profile of the signed-in user as issued by the server at login.
///
/// Immutable once issued: login replaces the whole record, nothing is merged
/// field by field. Serialized form matches the server's camelCase wire shape
/// (this is also what the credential store persists).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub society_id: SocietyId,
    pub society_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_camel_case_wire_shape() {
        let json = r#"{
            "id": 12,
            "name": "Asha Rao",
            "email": "asha@example.com",
            "role": "RESIDENT",
            "societyId": 3,
            "societyName": "Green Meadows"
        }"#;

        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.id, UserId::new(12));
        assert_eq!(profile.role, Role::RESIDENT);
        assert_eq!(profile.society_id, SocietyId::new(3));

        let out = serde_json::to_value(&profile).unwrap();
        assert_eq!(out["societyName"], "Green Meadows");
    }
}
