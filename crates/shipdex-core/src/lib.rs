//! shipdex-core: paged starship catalog loading, aggregation and filtering.

pub mod config;
pub mod logging;

pub mod aggregate;
pub mod batch;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod model;
pub mod pagination;
pub mod session;
pub mod view;

pub use aggregate::{Catalog, LoadOptions};
pub use error::FetchError;
pub use fetch::{CurlFetcher, JsonFetcher};
pub use filter::ManufacturerSelector;
pub use session::Session;
pub use view::{ViewController, ViewEvent, ViewStatus};
