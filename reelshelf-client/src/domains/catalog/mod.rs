//! Catalog domain - the incremental, paged view over the record listing
//!
//! Pages are fetched on demand as the user scrolls, aggregated into one
//! de-duplicated list per query signature, and rendered through a windowed
//! list. [`CatalogView`] holds the state; [`CatalogRuntime`] drives it.

pub mod aggregator;
pub mod facets;
pub mod fetcher;
pub mod loader;
pub mod messages;
pub mod runtime;
pub mod state;
pub mod update;

pub use self::aggregator::{AppendOutcome, PageCache};
pub use self::facets::{Facets, derive_facets};
pub use self::fetcher::PageFetcher;
pub use self::loader::{ScrollLoader, ScrollMetrics};
pub use self::messages::{CatalogEvent, Effect};
pub use self::runtime::{CatalogHandle, CatalogRuntime};
pub use self::state::{CatalogSnapshot, CatalogView, FetchState, ViewSettings};
