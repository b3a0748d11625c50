use axum::{
    Router,
    extract::Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::core::{
    FireInput, InvestmentProjectionInput, PortfolioProjectionInput, calculate_fire,
    project_investment, project_portfolio,
};

#[derive(Debug, Serialize)]
struct RootResponse {
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("FI/RE dashboard API listening on http://{addr}");

    axum::serve(listener, router()).await
}

fn router() -> Router {
    // The dashboard frontend is served from a different origin. Wildcard
    // origins cannot be combined with credentials, so none are allowed.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/calculate", post(calculate_fire_handler))
        .route("/project-investment", post(project_investment_handler))
        .route("/project-portfolio", post(project_portfolio_handler))
        .fallback(not_found_handler)
        .layer(cors)
}

async fn root_handler() -> Response {
    json_response(
        StatusCode::OK,
        RootResponse {
            message: "FI/RE Dashboard API",
        },
    )
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "healthy" })
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn calculate_fire_handler(Json(input): Json<FireInput>) -> Response {
    if let Err(msg) = validate_fire_input(&input) {
        return error_response(StatusCode::BAD_REQUEST, &msg);
    }
    match calculate_fire(&input) {
        Ok(metrics) => json_response(StatusCode::OK, metrics),
        Err(e) => error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    }
}

async fn project_investment_handler(Json(input): Json<InvestmentProjectionInput>) -> Response {
    if let Err(msg) = validate_investment_input(&input) {
        return error_response(StatusCode::BAD_REQUEST, &msg);
    }
    match project_investment(&input) {
        Ok(result) => json_response(StatusCode::OK, result),
        Err(e) => error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    }
}

async fn project_portfolio_handler(Json(input): Json<PortfolioProjectionInput>) -> Response {
    if let Err(msg) = validate_portfolio_input(&input) {
        return error_response(StatusCode::BAD_REQUEST, &msg);
    }
    match project_portfolio(&input) {
        Ok(result) => json_response(StatusCode::OK, result),
        Err(e) => error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    }
}

fn validate_fire_input(input: &FireInput) -> Result<(), String> {
    for (name, value) in [
        ("current_savings", input.current_savings),
        ("annual_income", input.annual_income),
        ("annual_expenses", input.annual_expenses),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(format!("{name} must be a finite number >= 0"));
        }
    }
    for (name, value) in [
        ("savings_rate", input.savings_rate),
        ("expected_return", input.expected_return),
        ("withdrawal_rate", input.withdrawal_rate),
    ] {
        if !value.is_finite() {
            return Err(format!("{name} must be a finite number"));
        }
    }
    Ok(())
}

fn validate_investment_input(input: &InvestmentProjectionInput) -> Result<(), String> {
    for (name, value) in [
        ("current_value", input.current_value),
        ("monthly_contribution", input.monthly_contribution),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(format!("{name} must be a finite number >= 0"));
        }
    }
    if !input.expected_annual_return.is_finite() {
        return Err("expected_annual_return must be a finite number".to_string());
    }
    Ok(())
}

fn validate_portfolio_input(input: &PortfolioProjectionInput) -> Result<(), String> {
    for (index, investment) in input.investments.iter().enumerate() {
        validate_investment_input(&InvestmentProjectionInput {
            current_value: investment.current_value,
            monthly_contribution: investment.monthly_contribution,
            expected_annual_return: investment.expected_annual_return,
            projection_years: input.projection_years,
        })
        .map_err(|msg| format!("investments[{index}]: {msg}"))?;
    }
    Ok(())
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}
