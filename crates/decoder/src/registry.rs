use crate::codec::PcmDecoder;
use crate::config::DecoderConfig;
use crate::error::DecoderError;
use crate::stats::{RegistryStats, StatsSnapshot};
use std::collections::HashMap;
use std::fmt::Display;
use std::num::NonZeroI64;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Opaque identifier of a registered decoder. Never zero, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecoderHandle(NonZeroI64);

impl DecoderHandle {
    pub fn raw(self) -> i64 {
        self.0.get()
    }
}

impl TryFrom<i64> for DecoderHandle {
    type Error = DecoderError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        NonZeroI64::new(value)
            .map(DecoderHandle)
            .ok_or(DecoderError::InvalidHandle(value))
    }
}

impl Display for DecoderHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

type Slot<D> = Arc<Mutex<D>>;

/// Table of live decoders keyed by handle. The table lock is held only for
/// lookup, insert and remove; each decoder has its own lock for the codec
/// call itself.
pub struct DecoderRegistry<D: PcmDecoder> {
    decoders: Mutex<HashMap<DecoderHandle, Slot<D>>>,
    next_id: AtomicI64,
    stats: RegistryStats,
}

impl<D: PcmDecoder> Default for DecoderRegistry<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: PcmDecoder> DecoderRegistry<D> {
    pub fn new() -> Self {
        DecoderRegistry {
            decoders: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
            stats: RegistryStats::default(),
        }
    }

    /// Validates the parameters, then allocates codec state. Nothing is
    /// allocated for an unsupported configuration.
    pub fn create(&self, sample_rate_hz: i32, channels: i32) -> Result<DecoderHandle, DecoderError> {
        let config = DecoderConfig::new(sample_rate_hz, channels)?;
        let decoder = D::new(config)?;

        let handle = DecoderHandle::try_from(self.next_id.fetch_add(1, Ordering::Relaxed))?;
        self.decoders
            .lock()
            .map_err(|_| DecoderError::PoisonedLock)?
            .insert(handle, Arc::new(Mutex::new(decoder)));
        self.stats.record_created();

        log::info!("Created decoder {} ({})", handle, config);
        Ok(handle)
    }

    /// Configuration of a live decoder.
    pub fn config(&self, handle: i64) -> Result<DecoderConfig, DecoderError> {
        let slot = self.slot(handle)?;
        let decoder = slot.lock().map_err(|_| DecoderError::PoisonedLock)?;
        Ok(decoder.config())
    }

    /// Decodes one packet into `output`; the frame size is
    /// `output.len() / channels`. Returns samples decoded per channel.
    pub fn decode(&self, handle: i64, input: &[u8], output: &mut [i16]) -> Result<usize, DecoderError> {
        let slot = self.slot(handle)?;
        let mut decoder = slot.lock().map_err(|_| DecoderError::PoisonedLock)?;

        let samples = decoder
            .decode(input, output)
            .inspect_err(|_| self.stats.record_codec_error())?;

        log::debug!("Decoded {} samples from {} bytes", samples, input.len());
        Ok(samples)
    }

    pub fn reset(&self, handle: i64) -> Result<(), DecoderError> {
        let slot = self.slot(handle)?;
        let mut decoder = slot.lock().map_err(|_| DecoderError::PoisonedLock)?;

        decoder
            .reset()
            .inspect_err(|_| self.stats.record_codec_error())?;

        log::info!("Decoder #{} reset", handle);
        Ok(())
    }

    /// Removes the decoder from the table. Its codec state is released once
    /// any in-flight call on it returns.
    pub fn destroy(&self, handle: i64) -> Result<DecoderConfig, DecoderError> {
        let removed = match DecoderHandle::try_from(handle) {
            Ok(key) => self
                .decoders
                .lock()
                .map_err(|_| DecoderError::PoisonedLock)?
                .remove(&key),
            Err(_) => None,
        };

        let Some(slot) = removed else {
            self.stats.record_invalid_handle();
            return Err(DecoderError::InvalidHandle(handle));
        };
        self.stats.record_destroyed();

        let config = slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .config();
        log::info!("Decoder #{} destroyed ({})", handle, config);
        Ok(config)
    }

    pub fn len(&self) -> usize {
        self.decoders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn record_buffer_failure(&self) {
        self.stats.record_buffer_failure();
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    fn slot(&self, handle: i64) -> Result<Slot<D>, DecoderError> {
        let found = match DecoderHandle::try_from(handle) {
            Ok(key) => self
                .decoders
                .lock()
                .map_err(|_| DecoderError::PoisonedLock)?
                .get(&key)
                .cloned(),
            Err(_) => None,
        };

        found.ok_or_else(|| {
            self.stats.record_invalid_handle();
            DecoderError::InvalidHandle(handle)
        })
    }
}
