use crate::models::{ErrorResponse, Portfolio};
use crate::services::portfolio;
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PortfolioQuery {
    pub address: Option<String>,
}

pub async fn get_portfolio(
    State(state): State<AppState>,
    Query(query): Query<PortfolioQuery>,
) -> Result<Json<Portfolio>, (StatusCode, Json<ErrorResponse>)> {
    let Some(address) = query.address.filter(|a| !a.is_empty()) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Address parameter is required".to_string(),
            }),
        ));
    };

    match portfolio::fetch_portfolio(state.chain.as_ref(), state.prices.as_ref(), &address).await {
        Ok(data) => Ok(Json(data)),
        Err(e) => {
            tracing::error!("Error fetching portfolio data: {e}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch portfolio data".to_string(),
                }),
            ))
        }
    }
}
