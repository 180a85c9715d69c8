pub mod contribution;
pub mod participant_balance;
pub mod precision;
pub mod settlement_report;
pub mod settlement_transaction;

pub use contribution::{checked_sum, total_value, total_weight, Contribution};
pub use participant_balance::ParticipantBalance;
pub use precision::{Precision, DEFAULT_AMOUNT_SCALE, MIN_RATE_SCALE, ROUNDING};
pub use settlement_report::{SettlementReport, SettlementSummary};
pub use settlement_transaction::{net_transfer, SettlementTransaction};
