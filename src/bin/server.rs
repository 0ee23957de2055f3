use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use pick_grader::{
    compute_win_rates, connect_pool, run_score_update, PgGameCache, PgPickStore, PickStore,
    ScoresApiClient, Sport,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

struct AppState {
    feed: ScoresApiClient,
    store: PgPickStore,
    cache: PgGameCache,
    sports: Vec<Sport>,
}

/// Batch trigger: fetch the latest results and grade everything they
/// settle. Hit by the scheduler and by the app's pull-to-refresh.
async fn update_scores(State(state): State<Arc<AppState>>) -> Response {
    match run_score_update(&state.feed, &state.store, &state.cache, &state.sports).await {
        Ok(summary) => Json(json!({
            "message": "Scores updated successfully",
            "processed": summary.processed,
        }))
        .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

async fn user_picks(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Response {
    match state.store.list_by_user(user_id).await {
        Ok(picks) => Json(picks).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

async fn user_record(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Response {
    match state.store.list_by_user(user_id).await {
        Ok(picks) => Json(compute_win_rates(&picks)).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt::init();

    let api_key = std::env::var("RESULTS_API_KEY").expect("RESULTS_API_KEY not set in .env file");
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL not set in .env file");
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());

    let pool = match connect_pool(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Error connecting to database: {e:#}");
            std::process::exit(1);
        }
    };

    let state = Arc::new(AppState {
        feed: ScoresApiClient::new(api_key),
        store: PgPickStore::new(pool.clone()),
        cache: PgGameCache::new(pool),
        sports: Sport::ALL.to_vec(),
    });

    println!("Starting pick grading server at http://{}", bind_addr);
    println!("Press Ctrl+C to stop\n");

    let app = Router::new()
        .route("/update-scores", post(update_scores))
        .route("/users/:user_id/picks", get(user_picks))
        .route("/users/:user_id/record", get(user_record))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
