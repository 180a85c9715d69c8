pub mod requests;
pub mod responses;

pub use requests::{max_magnitude, ContributionRequest, SettlementRequest, ValidationError};
pub use responses::{
    ApiResponse, BalanceResponse, ErrorResponse, SettlementResponse, TransactionResponse,
    ValidationErrorDetail,
};
