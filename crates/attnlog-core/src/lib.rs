//! Domain core of attnlog: identities, sessions, bounded log lists, the undo
//! engine, CSV export tables and the ports the outer layers implement.

pub mod clock;
pub mod config;
pub mod confirm;
pub mod error;
pub mod export;
pub mod ids;
pub mod log;
pub mod repository;
pub mod session;
pub mod store;

// Re-export common types
pub use error::{AttnError, Result};
pub use ids::{SessionId, StudentId};
pub use repository::LogbookRepository;
pub use store::{KeyedStore, LogScope, StoreKey};
