//! Session domain module.
//!
//! - `model`: `Session` metadata with creation/last-access bookkeeping
//! - `registry`: the ordered `SessionRegistry` of one student

mod model;
mod registry;

pub use model::Session;
pub use registry::{Selection, SessionRegistry};
