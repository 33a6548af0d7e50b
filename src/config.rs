//! configuration loading, validation and the global instance
pub mod instance;
pub mod options;
pub mod validate;

pub use options::DeliciousCfg;
