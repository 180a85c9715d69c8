use ffp_settlement::api::{ApiResponse, ErrorResponse, SettlementRequest, SettlementResponse};
use ffp_settlement::services::SettlementService;
use ffp_settlement::SettlementError;
use rust_decimal_macros::dec;

fn settle(json: &str) -> ApiResponse<SettlementResponse> {
    let request: SettlementRequest = serde_json::from_str(json).unwrap();
    if let Err(errors) = request.validate() {
        return ApiResponse::error(ErrorResponse::validation(errors));
    }

    let contributions = request.to_contributions();
    match SettlementService::default().generate_report(request.event_id(), &contributions) {
        Ok(report) => ApiResponse::success(report.into()),
        Err(err) => ApiResponse::error(err.into()),
    }
}

#[test]
fn test_request_to_response() {
    let response = settle(
        r#"{"event_id": null, "contributions": [
            {"participant_id": 1, "value": "0", "weight": "0.75"},
            {"participant_id": 2, "value": "1.21", "weight": "1.5"},
            {"participant_id": 3, "value": "2.68", "weight": "2"}
        ]}"#,
    );

    assert!(response.success);
    let data = response.data.unwrap();
    assert_eq!(data.fair_share_rate, dec!(0.9152941176));
    assert_eq!(data.transactions.len(), 2);
    assert_eq!(data.transactions[0].amount, dec!(0.69));
    assert_eq!(data.transactions[1].amount, dec!(0.16));
    assert_eq!(data.summary.transaction_count, 2);
}

#[test]
fn test_zero_weight_request_maps_to_error() {
    let response = settle(
        r#"{"event_id": null, "contributions": [
            {"participant_id": 1, "value": "10", "weight": "0"},
            {"participant_id": 2, "value": "0", "weight": "0"}
        ]}"#,
    );

    assert!(!response.success);
    assert_eq!(response.error.unwrap().code, SettlementError::DivisionByZero.code());
}

#[test]
fn test_invalid_request_is_rejected_before_settlement() {
    let response = settle(
        r#"{"event_id": null, "contributions": [
            {"participant_id": 1, "value": "10", "weight": "-1"}
        ]}"#,
    );

    assert!(!response.success);
    let error = response.error.unwrap();
    assert_eq!(error.code, "VALIDATION_ERROR");
    assert_eq!(error.details.unwrap().len(), 1);
}

#[test]
fn test_response_serializes_amounts_as_strings() {
    let response = settle(
        r#"{"event_id": null, "contributions": [
            {"participant_id": 1, "value": "1", "weight": "1"},
            {"participant_id": 2, "value": "0", "weight": "1"}
        ]}"#,
    );

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["data"]["transactions"][0]["amount"], "0.50");
    assert_eq!(json["data"]["transactions"][0]["from_participant_id"], 2);
}

#[test]
fn test_whole_amounts_serialize_with_two_decimals() {
    let response = settle(
        r#"{"event_id": null, "contributions": [
            {"participant_id": 1, "value": "10", "weight": "1"},
            {"participant_id": 2, "value": "0", "weight": "1"}
        ]}"#,
    );

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["data"]["fair_share_rate"], "5.0000000000");
    assert_eq!(json["data"]["transactions"][0]["amount"], "5.00");
}

#[test]
fn test_oversized_values_are_rejected_before_settlement() {
    let response = settle(
        r#"{"event_id": null, "contributions": [
            {"participant_id": 1, "value": "79228162514264337593543950335", "weight": "1"},
            {"participant_id": 2, "value": "79228162514264337593543950335", "weight": "1"}
        ]}"#,
    );

    assert!(!response.success);
    let error = response.error.unwrap();
    assert_eq!(error.code, "VALIDATION_ERROR");
    assert_eq!(error.details.unwrap().len(), 2);
}
