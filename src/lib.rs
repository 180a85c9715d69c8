pub mod api;
pub mod config;
pub mod error;
pub mod idempotency;
pub mod models;
pub mod observability;
pub mod services;

pub use error::SettlementError;
pub use models::{Contribution, SettlementTransaction};
pub use services::{calculate_fair_share_rate, calculate_settlement};
