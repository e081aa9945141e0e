//! A stand-in for the vPIC `DecodeVinValuesExtended` endpoint.
//!
//! Known VINs answer with a fixture record, an all-wildcard VIN answers with
//! an empty `Results` array, and anything else answers the way vPIC does for
//! a bad check digit: HTTP 200 with a non-zero `ErrorCode`.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const DECODE_PATH: &str = "/api/vehicles/DecodeVinValuesExtended/{vin}";

pub const CHECK_DIGIT_ERROR: &str =
    "1 - Check Digit (9th position) does not calculate properly";

#[derive(Debug, Default)]
pub struct MockState {
    vehicles: HashMap<String, Value>,
    requests: AtomicUsize,
}

impl MockState {
    pub fn with_fixtures() -> Self {
        let mut state = Self::default();
        state.add_vehicle(
            "19UUA56922A021559",
            json!({
                "Make": "BMW",
                "Model": "X3",
                "ModelYear": "2011",
                "Manufacturer": "BMW MANUFACTURER CORPORATION / BMW NORTH AMERICA",
                "MakeID": "452",
                "ModelID": "1717",
                "BodyClass": "Sport Utility Vehicle (SUV)/Multi-Purpose Vehicle (MPV)",
                "Doors": "4",
                "Trim": "",
                "DisplacementL": "3.0",
                "EngineCylinders": "6",
                "FuelTypePrimary": "Gasoline",
                "DriveType": "AWD/All-Wheel Drive",
                "PlantCity": "GREER",
                "PlantState": "SOUTH CAROLINA",
                "PlantCountry": "UNITED STATES (USA)",
                "EngineHP": "300",
                "GVWR": "Class 1D: 5,001 - 6,000 lb (2,268 - 2,722 kg)",
                "Note": ""
            }),
        );
        state.add_vehicle(
            "1HGCM82633A004352",
            json!({
                "Make": "HONDA",
                "Model": "Accord",
                "ModelYear": "2003",
                "BodyClass": "Coupe",
                "Doors": "2",
                "FuelTypePrimary": "Gasoline"
            }),
        );
        state
    }

    /// Register a VIN. Blank-valued wire fields the fixture omits are filled
    /// in, as vPIC always sends the full column set.
    pub fn add_vehicle(&mut self, vin: &str, fields: Value) {
        let mut record = json!({
            "VIN": vin,
            "ErrorCode": "0",
            "ErrorText": "0 - VIN decoded clean. Check Digit (9th position) is correct",
            "AdditionalErrorText": "",
            "SuggestedVIN": "",
            "PossibleValues": "",
            "Series": "",
        });
        if let (Some(record), Value::Object(fields)) = (record.as_object_mut(), fields) {
            record.extend(fields);
        }
        self.vehicles.insert(vin.to_uppercase(), record);
    }

    /// Number of decode requests served so far.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

pub type Db = Arc<MockState>;

#[derive(Deserialize)]
pub struct DecodeParams {
    pub format: Option<String>,
}

pub fn app() -> Router {
    app_with_state(Arc::new(MockState::with_fixtures()))
}

pub fn app_with_state(state: Db) -> Router {
    Router::new()
        .route(DECODE_PATH, get(decode_vin))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with_state(listener: TcpListener, state: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_state(state)).await
}

async fn decode_vin(
    State(db): State<Db>,
    Path(vin): Path<String>,
    Query(params): Query<DecodeParams>,
) -> Result<Json<Value>, (StatusCode, String)> {
    db.requests.fetch_add(1, Ordering::SeqCst);

    if params.format.as_deref() != Some("json") {
        return Err((
            StatusCode::BAD_REQUEST,
            "only format=json is supported".to_string(),
        ));
    }

    let vin = vin.to_uppercase();
    let results = if !vin.is_empty() && vin.chars().all(|c| c == '*') {
        Vec::new()
    } else if let Some(record) = db.vehicles.get(&vin) {
        vec![record.clone()]
    } else {
        vec![json!({
            "VIN": vin,
            "Make": "",
            "Model": "",
            "ErrorCode": "1",
            "ErrorText": CHECK_DIGIT_ERROR,
            "SuggestedVIN": "",
        })]
    };

    Ok(Json(json!({
        "Count": results.len(),
        "Message": "Results returned successfully. NOTE: Any missing decoded values should be interpreted as NHTSA does not have data on the specific variable. Missing value should NOT be interpreted as an indication that a specific feature or technology is unavailable for a vehicle.",
        "SearchCriteria": format!("VIN:{vin}"),
        "Results": results,
    })))
}
