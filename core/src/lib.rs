//! Blocking client for the NHTSA vPIC VIN decoding API.
//!
//! # Overview
//! Turns a raw VIN string into a [`DecodedVehicle`]: the input is normalized
//! and checked locally, the `DecodeVinValuesExtended` endpoint is queried,
//! and the response is validated and mapped into a typed record.
//!
//! # Design
//! - `VpicClient` is stateless. It builds `HttpRequest` values and parses
//!   `HttpResponse` values without touching the network.
//! - A `Transport` executes the round-trip. `UreqTransport` is the default;
//!   tests plug in their own.
//! - `VinDecoder` ties the pieces together and memoizes successful decodes
//!   in a bounded LRU keyed by the normalized VIN.
//! - All failures are a [`DecoderError`]: `InvalidVin`, `Network`, or `Api`.
//!
//! ```no_run
//! use vin_core::{DecoderConfig, VinDecoder};
//!
//! let decoder = VinDecoder::new(&DecoderConfig::default());
//! let vehicle = decoder.decode("19UUA56922A021559")?;
//! println!("{:?} {:?}", vehicle.make, vehicle.model);
//! # Ok::<(), vin_core::DecoderError>(())
//! ```

pub mod client;
pub mod config;
pub mod decoder;
pub mod error;
pub mod http;
pub mod types;
pub mod vin;

pub use client::VpicClient;
pub use config::DecoderConfig;
pub use decoder::{MemoStats, VinDecoder};
pub use error::{DecoderError, ErrorKind, TransportError};
pub use http::{HttpRequest, HttpResponse, Transport, UreqTransport};
pub use types::{DecodedVehicle, ExtraFields};
pub use vin::{validate_and_normalize, Vin};
