pub mod fair_share;
pub mod settlement_service;

pub use fair_share::{calculate_fair_share_rate, fair_share_rate_with};
pub use settlement_service::{
    calculate_balances, calculate_settlement, SettlementMetrics, SettlementService,
};
