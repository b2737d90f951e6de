use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use irrigo_core::mocks::StubModel;
use irrigo_core::{
    CsvStore, PredictionHistory, PumpController, PumpStatus, adjust_features,
};
use irrigo_server::{AppState, handlers};
use irrigo_traits::CropModel;
use tempfile::TempDir;

struct TestCtx {
    state: AppState,
    stub: Arc<StubModel>,
    sensor_path: PathBuf,
    message_path: PathBuf,
    _dir: TempDir,
}

fn ctx() -> TestCtx {
    let dir = tempfile::tempdir().unwrap();
    let sensor_path = dir.path().join("sensor_data.csv");
    let message_path = dir.path().join("messages.csv");
    let sensor_log = CsvStore::open(&sensor_path).unwrap();
    let message_log = CsvStore::open(&message_path).unwrap();
    let stub = Arc::new(StubModel::new("rice"));
    let model: Arc<dyn CropModel + Send + Sync> = stub.clone();
    let state = AppState::new(
        PumpController::default(),
        PredictionHistory::default(),
        sensor_log,
        message_log,
        Some(model),
        32 * 1024,
    );
    TestCtx {
        state,
        stub,
        sensor_path,
        message_path,
        _dir: dir,
    }
}

fn form(pairs: &[(&str, &str)]) -> Form<HashMap<String, String>> {
    Form(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

async fn into_parts(resp: Response) -> (StatusCode, String) {
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

// --- /update_data ---

#[tokio::test]
async fn update_data_appends_and_returns_on() {
    let t = ctx();
    let resp = handlers::update_data(
        State(t.state.clone()),
        form(&[
            ("temperature", "25.0"),
            ("humidity", "60.0"),
            ("moisture", "450"),
        ]),
    )
    .await;
    let (status, body) = into_parts(resp).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ON");

    let contents = fs::read_to_string(&t.sensor_path).unwrap();
    assert_eq!(contents.lines().nth(1), Some("25.0,60.0,450"));
    assert_eq!(t.state.pump.lock().await.status(), PumpStatus::On);
}

#[tokio::test]
async fn update_data_at_threshold_returns_off() {
    let t = ctx();
    let resp = handlers::update_data(
        State(t.state.clone()),
        form(&[
            ("temperature", "25.0"),
            ("humidity", "60.0"),
            ("moisture", "500"),
        ]),
    )
    .await;
    let (status, body) = into_parts(resp).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OFF");
}

#[tokio::test]
async fn update_data_missing_moisture_is_rejected() {
    let t = ctx();
    let resp = handlers::update_data(
        State(t.state.clone()),
        form(&[("temperature", "25.0"), ("humidity", "60.0")]),
    )
    .await;
    let (status, body) = into_parts(resp).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Invalid Data");

    // Nothing appended beyond the header.
    let contents = fs::read_to_string(&t.sensor_path).unwrap();
    assert_eq!(contents.lines().count(), 1);
}

#[tokio::test]
async fn update_data_non_numeric_is_rejected() {
    let t = ctx();
    let resp = handlers::update_data(
        State(t.state.clone()),
        form(&[
            ("temperature", "warm"),
            ("humidity", "60.0"),
            ("moisture", "450"),
        ]),
    )
    .await;
    let (status, body) = into_parts(resp).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Invalid Data");
}

// --- /control_pump ---

#[tokio::test]
async fn control_pump_accepts_status_words() {
    let t = ctx();
    let resp = handlers::control_pump(State(t.state.clone()), form(&[("status", "ON")])).await;
    let (status, body) = into_parts(resp).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Pump turned ON");
    assert_eq!(t.state.pump.lock().await.status(), PumpStatus::On);

    let resp = handlers::control_pump(State(t.state.clone()), form(&[("status", "off")])).await;
    let (_, body) = into_parts(resp).await;
    assert_eq!(body, "Pump turned OFF");
    assert_eq!(t.state.pump.lock().await.status(), PumpStatus::Off);
}

#[tokio::test]
async fn control_pump_rejects_arbitrary_strings() {
    let t = ctx();
    let resp = handlers::control_pump(State(t.state.clone()), form(&[("status", "drain")])).await;
    let (status, body) = into_parts(resp).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Invalid Data");
    // State untouched.
    assert_eq!(t.state.pump.lock().await.status(), PumpStatus::Off);
}

// --- /submit_contact ---

#[tokio::test]
async fn submit_contact_appends_and_confirms() {
    let t = ctx();
    let resp = handlers::submit_contact(
        State(t.state.clone()),
        form(&[
            ("name", "Asha"),
            ("email", "asha@example.com"),
            ("message", "Need drip advice"),
        ]),
    )
    .await
    .into_response();
    let (status, body) = into_parts(resp).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Your message has been sent successfully!"));

    let contents = fs::read_to_string(&t.message_path).unwrap();
    assert_eq!(
        contents.lines().nth(1),
        Some("Asha,asha@example.com,Need drip advice")
    );
}

#[tokio::test]
async fn submit_contact_rejects_overlong_message() {
    let t = ctx();
    let long = "x".repeat(501);
    let resp = handlers::submit_contact(
        State(t.state.clone()),
        form(&[
            ("name", "Asha"),
            ("email", "asha@example.com"),
            ("message", &long),
        ]),
    )
    .await
    .into_response();
    let (status, body) = into_parts(resp).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Message too long!"));

    let contents = fs::read_to_string(&t.message_path).unwrap();
    assert_eq!(contents.lines().count(), 1, "no row should be appended");
}

#[tokio::test]
async fn submit_contact_message_of_exactly_500_chars_is_accepted() {
    let t = ctx();
    let exact = "y".repeat(500);
    let resp = handlers::submit_contact(
        State(t.state.clone()),
        form(&[
            ("name", "Asha"),
            ("email", "asha@example.com"),
            ("message", &exact),
        ]),
    )
    .await
    .into_response();
    let (_, body) = into_parts(resp).await;
    assert!(body.contains("sent successfully"));
}

#[tokio::test]
async fn submit_contact_requires_every_field() {
    let t = ctx();
    let resp = handlers::submit_contact(
        State(t.state.clone()),
        form(&[("name", "Asha"), ("email", ""), ("message", "hi")]),
    )
    .await
    .into_response();
    let (_, body) = into_parts(resp).await;
    assert!(body.contains("Please fill in all fields!"));

    let contents = fs::read_to_string(&t.message_path).unwrap();
    assert_eq!(contents.lines().count(), 1);
}

// --- /predict ---

fn predict_form(soil: &str) -> Form<HashMap<String, String>> {
    form(&[
        ("N", "90"),
        ("P", "42"),
        ("K", "43"),
        ("temperature", "21"),
        ("humidity", "82"),
        ("ph", "6.5"),
        ("rainfall", "203"),
        ("soil_type", soil),
    ])
}

#[tokio::test]
async fn predict_scales_features_and_records_history() {
    let t = ctx();
    let resp = handlers::predict(State(t.state.clone()), predict_form("clay"))
        .await
        .into_response();
    let (status, body) = into_parts(resp).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Recommended Crop: rice"));
    assert!(body.contains("rice (Soil: clay)"));

    let raw = [90.0f32, 42.0, 43.0, 21.0, 82.0, 6.5, 203.0];
    let calls = t.stub.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], adjust_features(&raw, irrigo_core::SoilType::Clay));

    let history = t.state.history.lock().await.snapshot();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].label, "rice");
}

#[tokio::test]
async fn predict_rejects_unknown_soil_without_calling_engine() {
    let t = ctx();
    let resp = handlers::predict(State(t.state.clone()), predict_form("unknown"))
        .await
        .into_response();
    let (status, body) = into_parts(resp).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Invalid Soil Type"));
    assert!(t.stub.calls().is_empty());
    assert!(t.state.history.lock().await.is_empty());
}

#[tokio::test]
async fn predict_requires_every_field() {
    let t = ctx();
    let resp = handlers::predict(
        State(t.state.clone()),
        form(&[("N", "90"), ("soil_type", "clay")]),
    )
    .await
    .into_response();
    let (_, body) = into_parts(resp).await;
    assert!(body.contains("Please fill in all fields!"));
    assert!(t.stub.calls().is_empty());
}

#[tokio::test]
async fn predict_rejects_non_numeric_input() {
    let t = ctx();
    let pairs = [
        ("N", "ninety"),
        ("P", "42"),
        ("K", "43"),
        ("temperature", "21"),
        ("humidity", "82"),
        ("ph", "6.5"),
        ("rainfall", "203"),
        ("soil_type", "clay"),
    ];
    let resp = handlers::predict(State(t.state.clone()), form(&pairs))
        .await
        .into_response();
    let (_, body) = into_parts(resp).await;
    assert!(body.contains("invalid numeric input"));
    assert!(t.stub.calls().is_empty());
}

#[tokio::test]
async fn predict_without_model_short_circuits() {
    let t = ctx();
    let mut state = t.state.clone();
    state.model = None;
    let resp = handlers::predict(State(state), predict_form("clay"))
        .await
        .into_response();
    let (_, body) = into_parts(resp).await;
    assert!(body.contains("Model not found!"));
}

#[tokio::test]
async fn history_shown_on_home_is_capped_at_five() {
    let t = ctx();
    for _ in 0..6 {
        let _ = handlers::predict(State(t.state.clone()), predict_form("loamy")).await;
    }
    assert_eq!(t.state.history.lock().await.len(), 5);

    let resp = handlers::home(State(t.state.clone())).await.into_response();
    let (_, body) = into_parts(resp).await;
    assert_eq!(body.matches("rice (Soil: loamy)").count(), 5);
}

// --- /sensor_data ---

#[tokio::test]
async fn sensor_page_shows_last_ten_and_status() {
    let t = ctx();
    for i in 0..12 {
        let _ = handlers::update_data(
            State(t.state.clone()),
            form(&[
                ("temperature", "25.0"),
                ("humidity", "60.0"),
                ("moisture", &format!("{}", 600 + i)),
            ]),
        )
        .await;
    }

    let resp = handlers::sensor_data(State(t.state.clone())).await;
    let (status, body) = into_parts(resp).await;
    assert_eq!(status, StatusCode::OK);
    // Oldest two rows fell out of the ten-row window.
    assert!(!body.contains("<td>600</td>"));
    assert!(!body.contains("<td>601</td>"));
    assert!(body.contains("<td>602</td>"));
    assert!(body.contains("<td>611</td>"));
    assert!(body.contains("OFF"));
}

// --- misc ---

#[tokio::test]
async fn healthz_is_plain_ok() {
    assert_eq!(handlers::healthz().await, "ok");
}
