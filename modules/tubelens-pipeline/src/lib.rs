#[cfg(any(test, feature = "test-support"))]
pub mod fixtures;
pub mod pipeline;
pub mod reconciler;
pub mod renderer;
pub mod routes;
pub mod scanner;
pub mod state;
pub mod traits;

pub use pipeline::{CycleOutcome, CycleReport, Pipeline};
pub use routes::{Route, SelectorProfile};
pub use traits::{EntryRef, ListingDom, StatsFetcher};
