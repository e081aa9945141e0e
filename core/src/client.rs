//! Stateless request builder and response parser for the vPIC API.
//!
//! # Design
//! `VpicClient` holds only the endpoint settings and carries no mutable
//! state between calls. The decode operation is split into `build_decode`,
//! which produces an `HttpRequest`, and `parse_decode`, which turns an
//! `HttpResponse` into a `DecodedVehicle` or a classified `DecoderError`.
//! Executing the round-trip is left to a `Transport`.

use crate::config::DecoderConfig;
use crate::error::DecoderError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{DecodeResponse, DecodedVehicle};
use crate::vin::Vin;

/// Request builder and response parser for `DecodeVinValuesExtended`.
#[derive(Debug, Clone)]
pub struct VpicClient {
    base_url: String,
    endpoint: String,
    format: String,
}

impl VpicClient {
    pub fn new(config: &DecoderConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            endpoint: config.endpoint.trim_matches('/').to_string(),
            format: config.format.clone(),
        }
    }

    pub fn build_decode(&self, vin: &Vin) -> HttpRequest {
        HttpRequest {
            url: format!("{}/{}/{vin}", self.base_url, self.endpoint),
            query: vec![("format".to_string(), self.format.clone())],
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }

    /// Classify the response and map the first result into a record.
    ///
    /// # Errors
    ///
    /// `DecoderError::Network` for a non-2xx status, `DecoderError::Api` for
    /// a malformed body, an empty `Results` array, or a non-zero `ErrorCode`.
    pub fn parse_decode(&self, response: HttpResponse) -> Result<DecodedVehicle, DecoderError> {
        check_status(&response)?;

        let envelope: DecodeResponse = serde_json::from_str(&response.body)
            .map_err(|e| DecoderError::Api(format!("malformed response: {e}")))?;

        let first = envelope
            .results
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| DecoderError::Api("no results returned from API".to_string()))?;

        let vehicle = DecodedVehicle::from_value(first)
            .map_err(|e| DecoderError::Api(format!("malformed result: {e}")))?;

        if !vehicle.is_success() {
            let text = vehicle.error_text.clone().unwrap_or_else(|| {
                format!("error code {}", vehicle.error_code.as_deref().unwrap_or_default())
            });
            return Err(DecoderError::Api(text));
        }

        Ok(vehicle)
    }
}

/// Map non-2xx status codes to `DecoderError::Network`.
fn check_status(response: &HttpResponse) -> Result<(), DecoderError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    Err(DecoderError::Network(format!(
        "HTTP {}: {}",
        response.status, response.body
    )))
}
