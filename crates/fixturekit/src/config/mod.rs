pub mod loader;
pub mod schema;

pub use loader::{load_config, load_config_from_str, load_default_config, CONFIG_ENV, CONFIG_FILE};
pub use schema::{Config, DocumentsConfig, ImagesConfig, StripperConfig};
