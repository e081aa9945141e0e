//! End-to-end decode: validate, consult the memo, fetch, parse.
//!
//! # Design
//! `VinDecoder` owns a `VpicClient`, a `Transport`, and a bounded LRU memo
//! keyed by the normalized VIN, so `"19uua56922a021559 "` and
//! `"19UUA56922A021559"` share one entry. Only successful decodes are
//! stored; every error reaches the caller and the next call tries again.
//! There are no retries and no time-based expiry.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use moka::policy::EvictionPolicy;
use moka::sync::Cache;
use tracing::{debug, warn};

use crate::client::VpicClient;
use crate::config::DecoderConfig;
use crate::error::DecoderError;
use crate::http::{Transport, UreqTransport};
use crate::types::DecodedVehicle;
use crate::vin::{validate_and_normalize, Vin};

/// Memo counters since construction or the last [`VinDecoder::clear_memo`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: u64,
}

/// Validates, memoizes, and fetches VIN decodes through a [`Transport`].
pub struct VinDecoder<T = UreqTransport> {
    client: VpicClient,
    transport: T,
    memo: Cache<Vin, Arc<DecodedVehicle>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<T: fmt::Debug> fmt::Debug for VinDecoder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VinDecoder")
            .field("client", &self.client)
            .field("transport", &self.transport)
            .field("memo_entries", &self.memo.entry_count())
            .finish_non_exhaustive()
    }
}

impl VinDecoder<UreqTransport> {
    /// Decoder that talks to the configured service over HTTP.
    pub fn new(config: &DecoderConfig) -> Self {
        Self::with_transport(config, UreqTransport::new(config.timeout()))
    }
}

impl<T: Transport> VinDecoder<T> {
    pub fn with_transport(config: &DecoderConfig, transport: T) -> Self {
        let memo = Cache::builder()
            .max_capacity(config.memo_capacity)
            .eviction_policy(EvictionPolicy::lru())
            .build();
        Self {
            client: VpicClient::new(config),
            transport,
            memo,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Decode a raw VIN.
    ///
    /// # Errors
    ///
    /// `DecoderError::InvalidVin` before any I/O if the input is malformed,
    /// `DecoderError::Network` if the service is unreachable or answers with
    /// a non-2xx status, `DecoderError::Api` if the payload is unusable.
    pub fn decode(&self, raw: &str) -> Result<Arc<DecodedVehicle>, DecoderError> {
        let vin = validate_and_normalize(raw)?;

        if let Some(hit) = self.memo.get(&vin) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(%vin, "memo hit");
            return Ok(hit);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        let vehicle = Arc::new(self.fetch(&vin)?);
        self.memo.insert(vin, Arc::clone(&vehicle));
        Ok(vehicle)
    }

    fn fetch(&self, vin: &Vin) -> Result<DecodedVehicle, DecoderError> {
        let request = self.client.build_decode(vin);
        debug!(url = %request.full_url(), "requesting decode");

        let response = self.transport.execute(&request).map_err(|e| {
            warn!(%vin, error = %e, "transport failure");
            DecoderError::from(e)
        })?;

        self.client.parse_decode(response).inspect_err(|e| {
            warn!(%vin, error = %e, "decode rejected");
        })
    }

    pub fn memo_stats(&self) -> MemoStats {
        self.memo.run_pending_tasks();
        MemoStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.memo.entry_count(),
        }
    }

    /// Drop every memoized record and reset the counters.
    pub fn clear_memo(&self) {
        self.memo.invalidate_all();
        self.memo.run_pending_tasks();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}
