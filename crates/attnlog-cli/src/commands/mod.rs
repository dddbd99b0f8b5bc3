pub mod export;
pub mod identity;
pub mod log;
pub mod session;
pub mod status;
