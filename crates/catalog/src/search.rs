//! Search-page filtering and sorting over catalog blocks.

use crate::block::{IpBlock, IpBlockKind};
use crate::subnet::ips_in_subnet;

/// Criteria from the search form. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockFilter {
    pub location: Option<String>,
    pub kind: Option<IpBlockKind>,
}

impl BlockFilter {
    pub fn matches(&self, block: &IpBlock) -> bool {
        if let Some(location) = &self.location {
            if block.location != *location {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if block.kind != kind {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, blocks: &[IpBlock]) -> Vec<IpBlock> {
        blocks
            .iter()
            .filter(|b| self.matches(b))
            .cloned()
            .collect()
    }
}

/// Column the block list is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Price,
    /// Number of addresses in the subnet. Unparseable subnets sort first.
    SubnetSize,
    Purity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Stable sort of blocks by the given column and direction.
pub fn sort_blocks(blocks: &mut [IpBlock], field: SortField, direction: SortDirection) {
    blocks.sort_by_key(|block| match field {
        SortField::Price => block.price,
        SortField::SubnetSize => ips_in_subnet(&block.subnet).unwrap_or(0),
        SortField::Purity => u64::from(block.purity_level.get()),
    });
    if direction == SortDirection::Descending {
        blocks.reverse();
    }
}
