//! HTTP surface of the coordinator: inbound updates and status output

use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use log::{debug, warn};
use serde::Serialize;

use crate::coordinator::ingest::ingest;
use crate::coordinator::store::ReadingStore;
use crate::models::{StoreSnapshot, DISTANCE_NO_DATA, TEMPERATURE_NO_DATA};
use crate::utils::{format_rfc3339, format_value};

#[derive(Clone)]
struct AppState {
    store: ReadingStore,
    distance_limit: f32,
}

/// JSON status; a no-data sentinel is reported as `null`
#[derive(Debug, Serialize)]
struct StatusBody {
    temperature: Option<f32>,
    distance: Option<f32>,
    alert_message: String,
    updated_at: Option<String>,
}

impl From<StoreSnapshot> for StatusBody {
    fn from(snapshot: StoreSnapshot) -> Self {
        Self {
            temperature: known(snapshot.temperature, TEMPERATURE_NO_DATA),
            distance: known(snapshot.distance, DISTANCE_NO_DATA),
            alert_message: snapshot.alert_message,
            updated_at: snapshot.updated_at.as_ref().map(format_rfc3339),
        }
    }
}

fn known(value: f32, no_data: f32) -> Option<f32> {
    (value != no_data).then_some(value)
}

pub fn router(store: ReadingStore, distance_limit: f32) -> Router {
    Router::new()
        .route("/", get(status_page))
        .route("/status", get(status_json))
        .route("/update", post(update_handler))
        .with_state(AppState {
            store,
            distance_limit,
        })
}

/// Accept `temperature=..&distance=..`; 400 leaves the store untouched
async fn update_handler(State(state): State<AppState>, body: String) -> (StatusCode, String) {
    match ingest(&state.store, &body, state.distance_limit) {
        Ok(reading) => {
            debug!(
                "Stored reading: temperature={:.2} F, distance={:.2} cm",
                reading.temperature, reading.distance
            );
            (StatusCode::OK, "OK".to_string())
        }
        Err(e) => {
            warn!("Rejected update: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string())
        }
    }
}

async fn status_json(State(state): State<AppState>) -> Json<StatusBody> {
    Json(state.store.snapshot().into())
}

async fn status_page(State(state): State<AppState>) -> Html<String> {
    Html(render_page(&state.store.snapshot()))
}

/// Status page polled by browsers; the script re-fetches it every second
/// and shows the alert box whenever `alertMessage` is non-empty.
fn render_page(snapshot: &StoreSnapshot) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Fridge Monitor</title>
    <style>
        body {{ font-family: sans-serif; text-align: center; }}
        #alertBox {{ display: none; color: white; background: red; padding: 15px; }}
    </style>
    <script>
        function refresh() {{
            fetch("/")
                .then(response => response.text())
                .then(html => {{
                    const doc = new DOMParser().parseFromString(html, "text/html");
                    for (const id of ["temperature", "distance"]) {{
                        document.getElementById(id).innerText = doc.getElementById(id).innerText;
                    }}
                    const message = doc.getElementById("alertMessage").innerText.trim();
                    const box = document.getElementById("alertBox");
                    box.innerText = message;
                    box.style.display = message === "" ? "none" : "block";
                }})
                .catch(error => console.error("Refresh failed:", error));
        }}
        setInterval(refresh, 1000);
    </script>
</head>
<body>
    <h1>Fridge Monitor</h1>
    <div id="alertBox"></div>
    <p>Temperature: <span id="temperature">{temperature}</span> &deg;F</p>
    <p>Distance: <span id="distance">{distance}</span> cm</p>
    <div id="alertMessage" style="display: none;">{alert}</div>
</body>
</html>
"#,
        temperature = format_value(snapshot.temperature, TEMPERATURE_NO_DATA),
        distance = format_value(snapshot.distance, DISTANCE_NO_DATA),
        alert = snapshot.alert_message,
    )
}
