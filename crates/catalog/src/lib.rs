//! Inventory catalog domain module.
//!
//! This crate contains the leasable-unit types and the read-only catalog
//! capability, implemented purely as deterministic domain logic (no IO, no
//! HTTP, no storage).

pub mod block;
pub mod catalog;
pub mod search;
pub mod subnet;

pub use block::{IpBlock, IpBlockKind, PurityLevel};
pub use catalog::{available_blocks, Catalog, StaticCatalog};
pub use search::{sort_blocks, BlockFilter, SortDirection, SortField};
pub use subnet::{format_price_per_ip, ips_in_subnet, price_per_ip};
