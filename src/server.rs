//! HTTP JSON API over the published index.

use std::sync::Arc;

use axum::{
   Json, Router,
   extract::{State, rejection::JsonRejection},
   http::StatusCode,
   response::{IntoResponse, Response},
   routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::{
   Result,
   error::{Error, ErrorKind},
   search,
   snapshot::SharedIndex,
   types::Recommendation,
};

pub const NO_MATCHES: &str = "No matching assessments found";

#[derive(Clone)]
pub struct AppState {
   pub index: Arc<SharedIndex>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecommendRequest {
   #[serde(default)]
   pub query:        Option<String>,
   #[serde(default)]
   pub max_duration: Option<f64>,
}

/// One recommendation as rendered on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultItem {
   pub assessment_title: String,
   pub url:              String,
   pub similarity_score: f64,
   pub adaptive_support: String,
   pub description:      String,
   pub duration:         i64,
   pub remote_support:   String,
   pub test_types:       Vec<String>,
}

impl From<&Recommendation<'_>> for ResultItem {
   fn from(rec: &Recommendation<'_>) -> Self {
      let record = rec.record;
      Self {
         assessment_title: record.title.clone(),
         url:              record.url.clone(),
         similarity_score: rec.score,
         adaptive_support: record.adaptive_support.clone(),
         description:      record.description.clone(),
         duration:         record.whole_minutes().unwrap_or(0),
         remote_support:   record.remote_indicator.clone(),
         test_types:       record.test_type_list(),
      }
   }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecommendResponse {
   Found { query: String, results: Vec<ResultItem> },
   Empty { message: &'static str, results: Vec<ResultItem> },
}

impl RecommendResponse {
   pub fn new(query: &str, recommendations: &[Recommendation<'_>]) -> Self {
      if recommendations.is_empty() {
         Self::Empty { message: NO_MATCHES, results: Vec::new() }
      } else {
         Self::Found {
            query:   query.to_string(),
            results: recommendations.iter().map(ResultItem::from).collect(),
         }
      }
   }
}

/// Maps a core error onto a status code and a `{detail, code}` body.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
   fn from(err: Error) -> Self {
      Self(err)
   }
}

impl From<JsonRejection> for ApiError {
   fn from(rejection: JsonRejection) -> Self {
      Self(Error::InvalidBody(rejection.body_text()))
   }
}

impl IntoResponse for ApiError {
   fn into_response(self) -> Response {
      let kind = self.0.kind();
      let (status, detail) = match kind {
         ErrorKind::Validation => {
            warn!(error = %self.0, "rejected request");
            (StatusCode::BAD_REQUEST, self.0.to_string())
         },
         ErrorKind::Computation => {
            error!(error = %self.0, "recommendation failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Processing error".to_string())
         },
         ErrorKind::Load | ErrorKind::Configuration => {
            error!(error = %self.0, "index unavailable");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
         },
      };
      (status, Json(json!({ "detail": detail, "code": kind.code() }))).into_response()
   }
}

pub async fn root() -> Json<Value> {
   Json(json!({
      "message": "Assessment Recommendation API",
      "endpoints": {
         "health_check": "/health",
         "recommendations": "/recommend (POST)",
      },
   }))
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
   let loaded = state.index.current().len();
   Json(json!({
      "status": "healthy",
      "data_status": format!("{loaded} assessments loaded"),
   }))
}

pub async fn recommend(
   State(state): State<AppState>,
   payload: std::result::Result<Json<RecommendRequest>, JsonRejection>,
) -> std::result::Result<Json<RecommendResponse>, ApiError> {
   let Json(request) = payload?;
   let handle = state.index.current();
   let query = request.query.unwrap_or_default();
   let recommendations = search::recommend(&handle, &query, request.max_duration)?;
   Ok(Json(RecommendResponse::new(&query, &recommendations)))
}

pub fn router(state: AppState) -> Router {
   Router::new()
      .route("/", get(root))
      .route("/health", get(health))
      .route("/recommend", post(recommend))
      .with_state(state)
}

/// Serves the API on `bind` until ctrl-c.
pub async fn serve(state: AppState, bind: &str) -> Result<()> {
   let listener = TcpListener::bind(bind).await?;
   info!(addr = %listener.local_addr()?, "listening");

   axum::serve(listener, router(state))
      .with_graceful_shutdown(async {
         let _ = tokio::signal::ctrl_c().await;
         info!("shutting down");
      })
      .await?;
   Ok(())
}
