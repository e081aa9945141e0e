//! Command-line front end for `vin-core`.
//!
//! Parses arguments, loads layered settings, runs one decode, and renders
//! the outcome. The binary in `main.rs` is a thin wrapper around [`run`].

pub mod args;
pub mod logging;
pub mod render;
pub mod settings;

use std::io::Write;

use anyhow::Context;
use tracing::info;
use vin_core::VinDecoder;

use crate::args::Cli;
use crate::render::Status;

/// Decode `cli.vin` and write the result.
///
/// Decoder failures are rendered and reflected in the returned [`Status`];
/// only settings and output errors surface as `Err`.
pub fn run(cli: &Cli, out: &mut impl Write, err: &mut impl Write) -> anyhow::Result<Status> {
    let config = settings::resolve(cli).context("failed to load settings")?;
    info!(base_url = %config.base_url, timeout_secs = config.timeout_secs, "decoding");

    let decoder = VinDecoder::new(&config);
    let outcome = decoder.decode(&cli.vin);

    render::render(&outcome, cli.json, out, err).context("failed to write output")
}
