use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use etfguide_core::catalog::{CatalogStats, PortfolioQuery};
use etfguide_core::domain::portfolio::{Portfolio, RiskBand};
use etfguide_core::domain::questionnaire::{self, Question};
use etfguide_core::domain::recommendation::RecommendationResult;
use etfguide_core::recommend::reasons::reasons_for;
use etfguide_core::{Catalog, UserAnswers};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = etfguide_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let catalog = match Catalog::from_settings(&settings) {
        Ok(catalog) => catalog,
        Err(e) => {
            sentry_anyhow::capture_anyhow(&e);
            tracing::error!(error = ?e, "catalog load failed");
            return Err(e);
        }
    };
    for rejected in catalog.rejected() {
        sentry::capture_message(&rejected.to_string(), sentry::Level::Warning);
    }
    tracing::info!(
        as_of_date = %catalog.as_of_date,
        portfolios = catalog.len(),
        rejected = catalog.rejected().len(),
        "catalog loaded"
    );

    let app = router(AppState {
        catalog: Arc::new(catalog),
    });

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/catalog", get(get_catalog))
        .route("/portfolios", get(list_portfolios))
        .route("/portfolios/:id", get(get_portfolio))
        .route("/questionnaire", get(get_questionnaire))
        .route("/recommendations", post(create_recommendation))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Clone)]
struct AppState {
    catalog: Arc<Catalog>,
}

#[derive(Debug, Serialize)]
struct ApiCatalog {
    as_of_date: NaiveDate,
    stats: CatalogStats,
}

#[derive(Debug, Serialize)]
struct ApiPortfolio {
    risk_band: RiskBand,
    holding_count: usize,
    weighted_cost_ratio: f64,
    #[serde(flatten)]
    portfolio: Portfolio,
}

impl From<&Portfolio> for ApiPortfolio {
    fn from(p: &Portfolio) -> Self {
        Self {
            risk_band: p.risk_band(),
            holding_count: p.holding_count(),
            weighted_cost_ratio: p.weighted_cost_ratio(),
            portfolio: p.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ApiRecommendation {
    request_id: Uuid,
    generated_at: DateTime<Utc>,
    result: RecommendationResult,
    /// Reason lines per ranked portfolio, same order as `result.ranked_portfolios`.
    reasons: Vec<Vec<String>>,
}

async fn get_catalog(State(state): State<AppState>) -> Json<ApiCatalog> {
    Json(ApiCatalog {
        as_of_date: state.catalog.as_of_date,
        stats: state.catalog.stats(),
    })
}

async fn list_portfolios(
    State(state): State<AppState>,
    Query(query): Query<PortfolioQuery>,
) -> Json<Vec<ApiPortfolio>> {
    let items = state
        .catalog
        .query(&query)
        .into_iter()
        .map(ApiPortfolio::from)
        .collect();
    Json(items)
}

async fn get_portfolio(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiPortfolio>, StatusCode> {
    let portfolio = state.catalog.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(ApiPortfolio::from(portfolio)))
}

async fn get_questionnaire() -> Json<Vec<Question>> {
    Json(questionnaire::questions())
}

async fn create_recommendation(
    State(state): State<AppState>,
    Json(answers): Json<UserAnswers>,
) -> Json<ApiRecommendation> {
    let request_id = Uuid::new_v4();
    let result = state.catalog.recommend(&answers);
    let reasons = result
        .ranked_portfolios
        .iter()
        .map(|r| reasons_for(&r.portfolio, &answers, result.ideal_risk_level))
        .collect();

    tracing::info!(
        %request_id,
        allowed_risk_levels = ?result.allowed_risk_levels,
        ranked = result.ranked_portfolios.len(),
        "recommendation served"
    );

    Json(ApiRecommendation {
        request_id,
        generated_at: Utc::now(),
        result,
        reasons,
    })
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &etfguide_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
