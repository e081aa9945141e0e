//! Turns a decode outcome into terminal output.
//!
//! Invalid input, remote failures, and success are reported differently and
//! map to distinct exit statuses.

use std::io::{self, Write};

use vin_core::{DecodedVehicle, DecoderError};

/// Process exit status for each outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Decoded,
    RemoteFailure,
    InvalidInput,
}

impl Status {
    pub fn code(self) -> u8 {
        match self {
            Status::Decoded => 0,
            Status::RemoteFailure => 1,
            Status::InvalidInput => 2,
        }
    }
}

/// Write the outcome: the record to `out`, problems to `err`.
pub fn render<V>(
    outcome: &Result<V, DecoderError>,
    json: bool,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<Status>
where
    V: AsRef<DecodedVehicle>,
{
    match outcome {
        Ok(vehicle) => {
            let vehicle = vehicle.as_ref();
            if json {
                serde_json::to_writer_pretty(&mut *out, vehicle)?;
                writeln!(out)?;
            } else {
                write_fields(vehicle, out)?;
            }
            Ok(Status::Decoded)
        }
        Err(DecoderError::InvalidVin { reason, .. }) => {
            writeln!(err, "Invalid VIN: {reason}")?;
            writeln!(err, "Use * for positions you do not know.")?;
            Ok(Status::InvalidInput)
        }
        Err(e) => {
            writeln!(err, "Could not decode VIN: {e}")?;
            Ok(Status::RemoteFailure)
        }
    }
}

fn write_fields(vehicle: &DecodedVehicle, out: &mut impl Write) -> io::Result<()> {
    for (name, value) in vehicle.present_fields() {
        writeln!(out, "{name}: {value}")?;
    }
    Ok(())
}
