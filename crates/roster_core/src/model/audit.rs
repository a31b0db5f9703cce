//! Creation/modification timestamps embedded in every entity.
//!
//! # Invariants
//! - Values are Unix epoch milliseconds assigned by SQLite.
//! - `created_at` never changes after insert.
//! - `updated_at >= created_at`.
//! - JSON form is second-precision UTC text, `YYYY-MM-DDTHH:MM:SS`.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

const AUDIT_TEXT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Audit columns read back from storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTimestamps {
    #[serde(with = "epoch_ms_text")]
    pub created_at: i64,
    #[serde(with = "epoch_ms_text")]
    pub updated_at: i64,
}

impl AuditTimestamps {
    /// Renders `created_at` as `YYYY-MM-DDTHH:MM:SS` (UTC).
    pub fn created_at_text(&self) -> Option<String> {
        format_epoch_ms(self.created_at)
    }

    /// Renders `updated_at` as `YYYY-MM-DDTHH:MM:SS` (UTC).
    pub fn updated_at_text(&self) -> Option<String> {
        format_epoch_ms(self.updated_at)
    }
}

fn format_epoch_ms(value: i64) -> Option<String> {
    DateTime::from_timestamp_millis(value).map(|dt| dt.format(AUDIT_TEXT_FORMAT).to_string())
}

fn parse_audit_text(value: &str) -> Result<i64, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, AUDIT_TEXT_FORMAT)
        .map(|naive| naive.and_utc().timestamp_millis())
}

mod epoch_ms_text {
    use serde::{de, ser, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        let text = super::format_epoch_ms(*value).ok_or_else(|| {
            <S::Error as ser::Error>::custom(format!("timestamp out of range: {value}"))
        })?;
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse_audit_text(&text).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::AuditTimestamps;

    #[test]
    fn text_rendering_truncates_to_seconds_in_utc() {
        let audit = AuditTimestamps {
            created_at: 1_700_000_000_123,
            updated_at: 1_700_000_060_999,
        };
        assert_eq!(audit.created_at_text().as_deref(), Some("2023-11-14T22:13:20"));
        assert_eq!(audit.updated_at_text().as_deref(), Some("2023-11-14T22:14:20"));
    }

    #[test]
    fn json_uses_text_form_and_parses_back_at_second_precision() {
        let audit = AuditTimestamps {
            created_at: 1_700_000_000_000,
            updated_at: 1_700_000_000_000,
        };
        let json = serde_json::to_value(audit).unwrap();
        assert_eq!(json["created_at"], "2023-11-14T22:13:20");

        let decoded: AuditTimestamps = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, audit);
    }

    #[test]
    fn json_rejects_unexpected_text_format() {
        let json = serde_json::json!({
            "created_at": "14/11/2023 22:13",
            "updated_at": "2023-11-14T22:13:20",
        });
        assert!(serde_json::from_value::<AuditTimestamps>(json).is_err());
    }
}
