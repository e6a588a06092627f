//! # carto-api
//!
//! REST API server for Cartographe. Exposes CRUD endpoints for every
//! inventory entity type, per-layer aggregation endpoints, statistics,
//! search, and the database administration routes, all wrapped in a
//! uniform `{success, data?, error?}` envelope.

pub mod dto;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;
pub mod test_helpers;

pub use error::ApiError;
pub use server::{ApiServer, ApiServerConfig};
pub use state::AppState;
