pub mod config;
pub mod documents;
pub mod error;
pub mod images;
pub mod logging;
pub mod report;
pub mod strip;

pub use config::{load_config, load_default_config, Config};
pub use error::{ConfigError, DocumentError, FixtureError, ImageError, Result, StripError};
pub use strip::{StripOutcome, StripSummary, WidgetStripper};
