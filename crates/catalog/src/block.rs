use serde::{Deserialize, Serialize};

use netlease_core::{BlockId, DomainError};

/// How the addresses in a block are announced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IpBlockKind {
    /// Addresses registered to the hosting region itself.
    Native,
    /// Addresses announced from a different region than registered.
    Broadcast,
}

/// Cleanliness/abuse-history tier of a block: 1 (cleanest) through 5 (riskiest).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct PurityLevel(u8);

impl PurityLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(level: u8) -> Result<Self, DomainError> {
        if !(Self::MIN..=Self::MAX).contains(&level) {
            return Err(DomainError::validation(format!(
                "purity level must be between {} and {}, got {level}",
                Self::MIN,
                Self::MAX
            )));
        }
        Ok(Self(level))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Human-readable tier label for display.
    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "extremely clean",
            2 => "clean",
            3 => "slight risk",
            4 => "high risk",
            _ => "extreme risk",
        }
    }
}

impl TryFrom<u8> for PurityLevel {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PurityLevel> for u8 {
    fn from(value: PurityLevel) -> Self {
        value.0
    }
}

impl core::fmt::Display for PurityLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A leasable IP block as listed in the catalog.
///
/// Immutable once sourced; reservation state only ever copies these fields,
/// it never mutates them. Field names on the wire follow the persisted blob
/// format (`type`, `purityLevel`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpBlock {
    pub id: BlockId,
    /// Region/country tag, e.g. `"US"`.
    pub location: String,
    #[serde(rename = "type")]
    pub kind: IpBlockKind,
    /// CIDR-style subnet descriptor, e.g. `"192.168.1.0/24"`.
    pub subnet: String,
    /// Monthly price for the whole block, in whole currency units.
    pub price: u64,
    pub isp: String,
    pub purity_level: PurityLevel,
}
