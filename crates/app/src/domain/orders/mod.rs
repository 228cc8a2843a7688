//! Orders

pub mod errors;
pub mod records;
mod repositories;
pub mod service;
pub mod totals;

pub use errors::OrdersServiceError;
pub use service::*;
