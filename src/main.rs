use std::path::Path;

use ffp_settlement::api::{ApiResponse, ErrorResponse, SettlementRequest, SettlementResponse};
use ffp_settlement::config::Settings;
use ffp_settlement::error::{AppError, Result};
use ffp_settlement::idempotency::contribution_key;
use ffp_settlement::observability::{export_metrics, init_logging, init_metrics, mask_amount};
use ffp_settlement::services::SettlementService;
use tracing::{error, info};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    init_logging(&settings.log_config());
    let metrics_handle = init_metrics()?;
    info!("Configuration loaded");

    let outcome = run(&settings);

    export_metrics(&metrics_handle, settings.metrics.path.as_deref().map(Path::new))?;
    outcome
}

fn run(settings: &Settings) -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| settings.input.path.clone())
        .ok_or_else(|| AppError::Validation("no contribution file given".to_string()))?;

    info!("Reading contributions from {}", path);
    let request: SettlementRequest = serde_json::from_str(&std::fs::read_to_string(&path)?)?;

    if let Err(errors) = request.validate() {
        error!(errors = errors.len(), "Settlement request rejected");
        let response: ApiResponse<SettlementResponse> =
            ApiResponse::error(ErrorResponse::validation(errors));
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Err(AppError::Validation(format!("invalid settlement request in {}", path)));
    }

    let contributions = request.to_contributions();
    info!(
        input_key = %contribution_key(&contributions),
        "Settling {} contributions",
        contributions.len()
    );

    let service = SettlementService::new(settings.precision());
    let response = match service.generate_report(request.event_id(), &contributions) {
        Ok(report) => {
            info!(
                transactions = report.transactions.len(),
                volume = %mask_amount(&report.summary.transferred_volume),
                fingerprint = %report.fingerprint,
                "Settlement complete"
            );
            ApiResponse::success(SettlementResponse::from(report))
        }
        Err(err) => {
            error!(code = err.code(), "Settlement failed: {}", err);
            let response: ApiResponse<SettlementResponse> = ApiResponse::error(err.into());
            println!("{}", serde_json::to_string_pretty(&response)?);
            return Err(err.into());
        }
    };

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
