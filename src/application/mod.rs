//! Application layer - use cases orchestrating domain and infrastructure

pub mod generate;
pub mod init;
pub mod list_tags;
pub mod manage_config;
pub mod refresh;

pub use generate::{GenerateOptions, GenerateService};
pub use init::InitService;
pub use list_tags::ListTagsService;
pub use manage_config::ConfigService;
pub use refresh::RefreshService;
