pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::Store;
