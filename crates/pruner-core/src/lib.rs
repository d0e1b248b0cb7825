pub mod config;
pub mod error;
pub mod grouping;
pub mod model;
pub mod plan;
pub mod prune;
pub mod store;
