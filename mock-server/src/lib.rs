//! In-memory stand-in for the KYC onboarding backend.
//!
//! Serves fixture metadata on the GET endpoints and stores every POSTed
//! payload. `Faults` lets tests delay or fail individual paths.

pub mod fixtures;

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{
    extract::{Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, MethodRouter},
    Json, Router,
};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub use fixtures::{Field, KycType, Step};

/// A stored form submission, echoed back to the caller.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Submission {
    pub id: Uuid,
    pub section: String,
    pub data: Map<String, Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    pub id: Uuid,
    pub status: String,
    pub data: Map<String, Value>,
}

#[derive(Deserialize)]
pub struct FieldsQuery {
    pub type_key: String,
}

pub type Db = Arc<RwLock<HashMap<Uuid, Submission>>>;

/// Per-path fault injection, applied before routing.
#[derive(Clone, Debug, Default)]
pub struct Faults {
    delays: HashMap<String, Duration>,
    statuses: HashMap<String, StatusCode>,
}

impl Faults {
    /// Hold requests to `path` for `delay` before handling them.
    pub fn delay(mut self, path: &str, delay: Duration) -> Self {
        self.delays.insert(path.to_string(), delay);
        self
    }

    /// Answer requests to `path` with `status` instead of the real handler.
    pub fn fail(mut self, path: &str, status: StatusCode) -> Self {
        self.statuses.insert(path.to_string(), status);
        self
    }
}

#[derive(Clone)]
struct AppState {
    db: Db,
    faults: Arc<Faults>,
}

pub fn app() -> Router {
    router(Db::default(), Faults::default())
}

pub fn router(db: Db, faults: Faults) -> Router {
    let state = AppState {
        db,
        faults: Arc::new(faults),
    };
    Router::new()
        .route("/types", get(list_types))
        .route("/steps", get(list_steps))
        .route("/fields", get(list_fields))
        .route("/identity", section("identity"))
        .route("/address", section("address"))
        .route("/promoter", section("promoter"))
        .route("/bank", section("bank"))
        .route("/trading", section("trading"))
        .route("/additional", section("additional"))
        .route("/kyc/save", section("kyc"))
        .route("/payment/save", post(create_payment))
        .layer(middleware::from_fn_with_state(state.clone(), inject_faults))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Faults::default()).await
}

pub async fn run_with(listener: TcpListener, faults: Faults) -> Result<(), std::io::Error> {
    axum::serve(listener, router(Db::default(), faults)).await
}

fn section(name: &'static str) -> MethodRouter<AppState> {
    post(
        move |State(state): State<AppState>, Json(data): Json<Map<String, Value>>| {
            save_section(state, name, data)
        },
    )
}

async fn inject_faults(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    if let Some(delay) = state.faults.delays.get(&path) {
        debug!("delaying {path} by {}ms", delay.as_millis());
        tokio::time::sleep(*delay).await;
    }
    if let Some(status) = state.faults.statuses.get(&path) {
        debug!("forcing {status} on {path}");
        let body = json!({ "error": format!("injected fault on {path}") });
        return (*status, Json(body)).into_response();
    }
    next.run(request).await
}

async fn list_types() -> Json<Vec<KycType>> {
    Json(fixtures::types())
}

async fn list_steps() -> Json<Vec<Step>> {
    Json(fixtures::steps())
}

async fn list_fields(
    Query(query): Query<FieldsQuery>,
) -> Result<Json<Vec<Field>>, (StatusCode, Json<Value>)> {
    fixtures::fields_for(&query.type_key).map(Json).ok_or_else(|| {
        let body = json!({ "error": format!("unknown type_key '{}'", query.type_key) });
        (StatusCode::NOT_FOUND, Json(body))
    })
}

async fn save_section(
    state: AppState,
    section: &'static str,
    data: Map<String, Value>,
) -> Json<Submission> {
    let submission = Submission {
        id: Uuid::new_v4(),
        section: section.to_string(),
        data,
    };
    debug!("stored {section} submission {}", submission.id);
    state.db.write().await.insert(submission.id, submission.clone());
    Json(submission)
}

async fn create_payment(
    State(state): State<AppState>,
    Json(data): Json<Map<String, Value>>,
) -> (StatusCode, Json<Payment>) {
    let payment = Payment {
        id: Uuid::new_v4(),
        status: "created".to_string(),
        data: data.clone(),
    };
    let record = Submission {
        id: payment.id,
        section: "payment".to_string(),
        data,
    };
    state.db.write().await.insert(record.id, record);
    (StatusCode::CREATED, Json(payment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_serializes_to_json() {
        let mut data = Map::new();
        data.insert("pan".to_string(), json!("ABCDE1234F"));
        let submission = Submission {
            id: Uuid::nil(),
            section: "identity".to_string(),
            data,
        };
        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["section"], "identity");
        assert_eq!(json["data"]["pan"], "ABCDE1234F");
    }

    #[test]
    fn fields_query_requires_type_key() {
        let result: Result<FieldsQuery, _> = serde_json::from_str(r#"{}"#);
        assert!(result.is_err());
    }

    #[test]
    fn faults_builder_accumulates() {
        let faults = Faults::default()
            .delay("/types", Duration::from_millis(10))
            .fail("/steps", StatusCode::INTERNAL_SERVER_ERROR)
            .fail("/bank", StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(faults.delays.len(), 1);
        assert_eq!(faults.statuses.get("/bank"), Some(&StatusCode::SERVICE_UNAVAILABLE));
    }
}
