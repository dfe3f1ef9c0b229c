//! Read-only catalog capability.

use std::collections::HashSet;

use netlease_core::BlockId;

use crate::block::IpBlock;

/// Source of leasable inventory records.
///
/// The catalog is a read-only collaborator: reservation logic never mutates
/// it, only copies records out of it.
pub trait Catalog: Send + Sync {
    /// Full snapshot of every leasable block.
    fn list_all(&self) -> Vec<IpBlock>;
}

/// In-memory catalog over a fixed snapshot of blocks.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    blocks: Vec<IpBlock>,
}

impl StaticCatalog {
    pub fn new(blocks: Vec<IpBlock>) -> Self {
        Self { blocks }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl Catalog for StaticCatalog {
    fn list_all(&self) -> Vec<IpBlock> {
        self.blocks.clone()
    }
}

/// The catalog blocks not currently held by any order.
///
/// The reservation core only tracks held identifiers; presentation code uses
/// this set-difference to render its "available" list.
pub fn available_blocks(catalog: &dyn Catalog, held: &[BlockId]) -> Vec<IpBlock> {
    let held: HashSet<&BlockId> = held.iter().collect();
    catalog
        .list_all()
        .into_iter()
        .filter(|block| !held.contains(&block.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{IpBlockKind, PurityLevel};

    fn test_block(id: &str) -> IpBlock {
        IpBlock {
            id: BlockId::new(id),
            location: "US".to_string(),
            kind: IpBlockKind::Native,
            subnet: "192.168.1.0/24".to_string(),
            price: 1000,
            isp: "ExampleNet".to_string(),
            purity_level: PurityLevel::new(2).unwrap(),
        }
    }

    #[test]
    fn list_all_returns_snapshot() {
        let catalog = StaticCatalog::new(vec![test_block("a"), test_block("b")]);
        assert_eq!(catalog.list_all().len(), 2);
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn available_excludes_held_ids() {
        let catalog = StaticCatalog::new(vec![test_block("a"), test_block("b"), test_block("c")]);
        let held = vec![BlockId::new("b")];

        let available = available_blocks(&catalog, &held);
        let ids: Vec<&str> = available.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn available_with_nothing_held_is_everything() {
        let catalog = StaticCatalog::new(vec![test_block("a")]);
        assert_eq!(available_blocks(&catalog, &[]).len(), 1);
    }
}
