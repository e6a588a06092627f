//! # carto-core
//!
//! Core crate for Cartographe, an enterprise-architecture inventory.
//!
//! This crate provides the domain models for the four cartography layers
//! (métier, fonctionnel, applicatif, technique), the SQLite persistence
//! layer with one repository per entity type, the aggregation service with
//! its TTL cache, and on-demand statistics and search.

pub mod db;
pub mod logging;
pub mod model;
pub mod service;

pub use db::{create_pool, DbError, DbPool, PoolOptions};
pub use service::{DataService, ResultatRecherche, Statistiques};
