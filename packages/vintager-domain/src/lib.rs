//! Catalog query engine.
//!
//! Everything in this crate is synchronous and free of I/O. Callers hand in immutable snapshots of
//! items, item/tag links and the tag dictionary; the engine stitches, filters, sorts and groups them
//! into the ordered result the presentation layer renders.

pub mod criteria;
pub mod display;
pub mod facets;
pub mod filter;
pub mod group;
pub mod loose;
pub mod model;
pub mod query;
pub mod sort;
pub mod stitch;

pub use criteria::{FilterCriteria, MatchMode, NumericRange};
pub use facets::{Facets, NumericExtent, extract_facets};
pub use filter::{filter, matches};
pub use group::{Group, group_by_category};
pub use model::{AnnotatedItem, CatalogItem, ItemTagLink, OTHER_GROUP, ProfileAxis, ProfileScores, Tag};
pub use query::{QueryResult, run_query};
pub use sort::{SortKey, collate, sort_items};
pub use stitch::stitch;
