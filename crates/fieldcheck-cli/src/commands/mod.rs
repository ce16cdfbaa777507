//! Command implementations.

pub mod config;
pub mod seed;
pub mod sources;
pub mod verify;

pub use self::config::execute_config;
pub use self::seed::execute_seed;
pub use self::sources::execute_sources;
pub use self::verify::execute_verify;
