pub mod config_service;
pub mod file_sink;
pub mod json_file_store;
pub mod memory_store;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::file_sink::{FsFileSink, NoShareSurface};
pub use crate::json_file_store::JsonFileKeyedStore;
pub use crate::memory_store::MemoryKeyedStore;
