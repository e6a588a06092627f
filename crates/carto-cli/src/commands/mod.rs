//! CLI command implementations.

mod admin;
mod serve;

pub use admin::{run_init_db, run_migrate};
pub use serve::{run_server, ServeConfig};
