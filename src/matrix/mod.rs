//! Build matrix layer: expansion and filtering of task variants.
//!
//! Everything in here is pure in-memory computation. It owns:
//! - Entry (one variant assignment)
//! - cartesian_product (sorted odometer enumeration)
//! - Filter (`-m` match/ignore criteria)
//! - Spec + generate_entries (declared matrix => ordered entries)

pub mod entry;
pub mod filter;
pub mod generate;
pub mod product;
pub mod spec;

pub use entry::Entry;
pub use filter::Filter;
pub use generate::generate_entries;
pub use product::{DimensionSet, cartesian_product};
pub use spec::Spec;
