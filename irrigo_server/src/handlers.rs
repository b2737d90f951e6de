//! Request handlers: form parsing, validation, and the calls into core.
//!
//! Error surfacing follows one rule: user mistakes come back as rendered
//! messages on the page (HTTP 200 for the form endpoints, 400 for the
//! device endpoints), internal failures map to fixed safe messages and
//! the detail goes to the log.

use std::collections::HashMap;
use std::str::FromStr;

use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use irrigo_core::{
    ContactMessage, PredictionRecord, PumpStatus, SensorReading, SoilType, adjust_features,
};
use irrigo_traits::FEATURE_COUNT;

use crate::html;
use crate::state::AppState;

const INVALID_DATA: &str = "Invalid Data";
const MSG_FILL_ALL_FIELDS: &str = "Please fill in all fields!";
const MSG_MESSAGE_TOO_LONG: &str = "Message too long! (Max: 500 characters)";
const MSG_MESSAGE_SENT: &str = "Your message has been sent successfully!";
const MSG_MESSAGE_LOG_DOWN: &str = "Error: could not save your message";
const MSG_MODEL_MISSING: &str = "Model not found!";
const MSG_INVALID_SOIL: &str = "Invalid Soil Type";
const MSG_INVALID_NUMBER: &str = "Error: invalid numeric input";
const MSG_PREDICTION_FAILED: &str = "Error: prediction failed";
const MSG_SENSOR_LOG_DOWN: &str = "sensor log unavailable";

pub const MAX_MESSAGE_CHARS: usize = 500;
pub const SENSOR_PAGE_ROWS: usize = 10;

/// Form fields feeding the model, in classifier order.
const FEATURE_FIELDS: [&str; FEATURE_COUNT] =
    ["N", "P", "K", "temperature", "humidity", "ph", "rainfall"];

fn field<'a>(form: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    form.get(key).map(|s| s.trim()).filter(|s| !s.is_empty())
}

fn parse_field<T: FromStr>(form: &HashMap<String, String>, key: &str) -> Option<T> {
    field(form, key)?.parse().ok()
}

async fn render_index(state: &AppState, message: &str) -> Html<String> {
    let history = state.history.lock().await.snapshot();
    Html(html::index_page(Some(message), &history))
}

// --- pages ---

pub async fn home(State(state): State<AppState>) -> Html<String> {
    let history = state.history.lock().await.snapshot();
    Html(html::index_page(None, &history))
}

pub async fn seed_bank() -> Html<String> {
    Html(html::seed_bank_page())
}

pub async fn contact() -> Html<String> {
    Html(html::contact_page(None))
}

pub async fn healthz() -> &'static str {
    "ok"
}

// --- telemetry ---

/// `POST /update_data`: append the reading, re-evaluate the pump, reply
/// with the status word the polling device acts on.
pub async fn update_data(
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let (Some(temperature), Some(humidity), Some(moisture)) = (
        parse_field::<f32>(&form, "temperature"),
        parse_field::<f32>(&form, "humidity"),
        parse_field::<i32>(&form, "moisture"),
    ) else {
        return (StatusCode::BAD_REQUEST, INVALID_DATA).into_response();
    };

    let reading = SensorReading {
        temperature,
        humidity,
        moisture,
    };
    if let Err(e) = state.sensor_log.lock().await.append(&reading) {
        tracing::error!(error = %e, "sensor append failed");
        return (StatusCode::INTERNAL_SERVER_ERROR, MSG_SENSOR_LOG_DOWN).into_response();
    }

    let status = state.pump.lock().await.evaluate(moisture);
    (StatusCode::OK, status.to_string()).into_response()
}

/// `GET /sensor_data`: last readings plus the current pump status.
pub async fn sensor_data(State(state): State<AppState>) -> Response {
    let rows = state.sensor_log.lock().await.read_last(SENSOR_PAGE_ROWS);
    let status = state.pump.lock().await.status();
    match rows {
        Ok(rows) => Html(html::sensor_page(&rows, status)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "sensor read failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(html::error_page(MSG_SENSOR_LOG_DOWN)),
            )
                .into_response()
        }
    }
}

/// `POST /control_pump`: manual override, restricted to the two status
/// words; anything else is rejected without touching the state.
pub async fn control_pump(
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let Some(status) = parse_field::<PumpStatus>(&form, "status") else {
        return (StatusCode::BAD_REQUEST, INVALID_DATA).into_response();
    };
    state.pump.lock().await.set_status(status);
    (StatusCode::OK, format!("Pump turned {status}")).into_response()
}

// --- contact ---

pub async fn submit_contact(
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> Html<String> {
    let (Some(name), Some(email), Some(message)) = (
        field(&form, "name"),
        field(&form, "email"),
        field(&form, "message"),
    ) else {
        return Html(html::contact_page(Some(MSG_FILL_ALL_FIELDS)));
    };
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Html(html::contact_page(Some(MSG_MESSAGE_TOO_LONG)));
    }

    let row = ContactMessage {
        name: name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
    };
    if let Err(e) = state.message_log.lock().await.append(&row) {
        tracing::error!(error = %e, "message append failed");
        return Html(html::contact_page(Some(MSG_MESSAGE_LOG_DOWN)));
    }
    Html(html::contact_page(Some(MSG_MESSAGE_SENT)))
}

// --- prediction ---

/// `POST /predict`: validate the form, apply the soil adjustment, ask
/// the engine, record the outcome in the bounded history, render.
pub async fn predict(
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> Html<String> {
    let Some(model) = state.model.clone() else {
        return render_index(&state, MSG_MODEL_MISSING).await;
    };

    // Presence first, conversion second: an empty field is a different
    // user mistake than a non-numeric one.
    let all_present = FEATURE_FIELDS.iter().all(|k| field(&form, k).is_some())
        && field(&form, "soil_type").is_some();
    if !all_present {
        return render_index(&state, MSG_FILL_ALL_FIELDS).await;
    }

    let mut features = [0.0f32; FEATURE_COUNT];
    for (slot, key) in features.iter_mut().zip(FEATURE_FIELDS) {
        match parse_field::<f32>(&form, key) {
            Some(v) => *slot = v,
            None => return render_index(&state, MSG_INVALID_NUMBER).await,
        }
    }

    let soil = match field(&form, "soil_type").unwrap_or_default().parse::<SoilType>() {
        Ok(soil) => soil,
        Err(_) => return render_index(&state, MSG_INVALID_SOIL).await,
    };

    let adjusted = adjust_features(&features, soil);
    let label = match model.predict(&adjusted) {
        Ok(label) => label,
        Err(e) => {
            tracing::error!(error = %e, "prediction failed");
            return render_index(&state, MSG_PREDICTION_FAILED).await;
        }
    };

    let history = {
        let mut history = state.history.lock().await;
        history.record(PredictionRecord::new(label.clone(), soil));
        history.snapshot()
    };
    Html(html::index_page(
        Some(&format!("Recommended Crop: {label}")),
        &history,
    ))
}
