//! Wire DTOs for the endpoints the core touches (camelCase JSON).

use chrono::NaiveTime;
use merchantdesk_auth::{AuthToken, UserAccount};
use merchantdesk_core::{BusinessId, UserId};
use serde::{Deserialize, Serialize};

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub device: DeviceMetadata,
}

/// Device metadata attached to every login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceMetadata {
    pub device_id: String,
    pub platform: String,
    pub app_version: String,
}

/// Successful authentication exchange: identity plus credential.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    pub user: UserAccount,
    pub token: AuthToken,
}

/// Response of `GET /auth/verify`: the token may be absent, in which case
/// the client falls back to the currently persisted credential.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyPayload {
    pub user: UserAccount,
    #[serde(default)]
    pub token: Option<AuthToken>,
}

/// Owned business, as consumed by this core: enough to render a picker and
/// to confirm provisioning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessSummary {
    pub id: BusinessId,
    pub name: String,
    pub owner_id: UserId,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub location: BusinessLocation,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessLocation {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

/// One day's opening hours; times travel as `"HH:MM"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningHours {
    pub day: String,
    #[serde(with = "hhmm")]
    pub opens: NaiveTime,
    #[serde(with = "hhmm")]
    pub closes: NaiveTime,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinks {
    #[serde(default)]
    pub facebook: String,
    #[serde(default)]
    pub instagram: String,
    #[serde(default)]
    pub website: String,
}

/// Payload of `POST /businesses` (sent as the `business` multipart part).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBusiness {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub email: String,
    pub location: BusinessLocation,
    pub opening_hours: Vec<OpeningHours>,
    pub social_links: SocialLinks,
}

const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

impl NewBusiness {
    /// The default business auto-provisioned for a marketplace user who owns
    /// none: "<display name or 'Marketplace'> Store", the user's own contact
    /// details, a blank location, and 09:00-17:00 seven days a week.
    pub fn default_for_owner(user: &UserAccount) -> Self {
        let owner_name = user.name.trim();
        let name = if owner_name.is_empty() {
            "Marketplace Store".to_string()
        } else {
            format!("{owner_name} Store")
        };

        let opens = NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default();
        let closes = NaiveTime::from_hms_opt(17, 0, 0).unwrap_or_default();

        Self {
            name,
            description: "Tell your customers about your store.".to_string(),
            phone: user.phone.clone(),
            email: user.email.clone(),
            location: BusinessLocation::default(),
            opening_hours: WEEKDAYS
                .iter()
                .map(|day| OpeningHours {
                    day: (*day).to_string(),
                    opens,
                    closes,
                })
                .collect(),
            social_links: SocialLinks::default(),
        }
    }
}

/// `"HH:MM"` serde representation for opening-hours times.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
