//! A catalog block with a temporal claim attached.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use netlease_catalog::IpBlock;

/// A block held for an order.
///
/// Carries a full copy of the catalog record (not a reference) so the hold
/// stays renderable after the block leaves the available view. On the wire
/// the block fields are flattened into the same object as the timestamps,
/// matching the persisted blob format; timestamps are epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeldBlock {
    #[serde(flatten)]
    pub block: IpBlock,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub selected_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub expires_at: DateTime<Utc>,
}

impl HeldBlock {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Strip the temporal claim, leaving the plain catalog record for
    /// re-insertion into the available view.
    pub fn into_block(self) -> IpBlock {
        self.block
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netlease_catalog::{IpBlockKind, PurityLevel};
    use netlease_core::BlockId;

    fn test_held(selected_ms: i64, expires_ms: i64) -> HeldBlock {
        HeldBlock {
            block: IpBlock {
                id: BlockId::new("r1"),
                location: "US".to_string(),
                kind: IpBlockKind::Native,
                subnet: "192.168.1.0/24".to_string(),
                price: 1999,
                isp: "ExampleNet".to_string(),
                purity_level: PurityLevel::new(1).unwrap(),
            },
            selected_at: DateTime::from_timestamp_millis(selected_ms).unwrap(),
            expires_at: DateTime::from_timestamp_millis(expires_ms).unwrap(),
        }
    }

    #[test]
    fn wire_format_is_flat_with_millisecond_timestamps() {
        let held = test_held(1_000, 901_000);
        let json = serde_json::to_value(&held).unwrap();

        // Block fields and timestamps live in one flat object.
        assert_eq!(json["id"], "r1");
        assert_eq!(json["type"], "native");
        assert_eq!(json["purityLevel"], 1);
        assert_eq!(json["selectedAt"], 1_000);
        assert_eq!(json["expiresAt"], 901_000);
    }

    #[test]
    fn round_trips_through_json() {
        let held = test_held(1_000, 901_000);
        let json = serde_json::to_string(&held).unwrap();
        let back: HeldBlock = serde_json::from_str(&json).unwrap();
        assert_eq!(back, held);
    }

    #[test]
    fn expiry_boundary_is_inclusive() {
        let held = test_held(1_000, 901_000);
        let just_before = DateTime::from_timestamp_millis(900_999).unwrap();
        let at_deadline = DateTime::from_timestamp_millis(901_000).unwrap();

        assert!(!held.is_expired(just_before));
        assert!(held.is_expired(at_deadline));
    }

    #[test]
    fn into_block_strips_timestamps() {
        let held = test_held(1_000, 901_000);
        let block = held.clone().into_block();
        assert_eq!(block, held.block);

        let json = serde_json::to_value(&block).unwrap();
        assert!(json.get("selectedAt").is_none());
        assert!(json.get("expiresAt").is_none());
    }
}
