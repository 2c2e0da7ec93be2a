use crate::buffers::FrameBuffers;
use decoder::{DecoderError, DecoderRegistry, PcmDecoder, StatsSnapshot};

/// Returned by `create_decoder` when no decoder could be created.
pub const INVALID_HANDLE: i64 = 0;

/// Error-code contract of the boundary: creation fails through the sentinel
/// handle, decode returns a negative code, reset and destroy only log.
pub struct Bridge<D: PcmDecoder> {
    registry: DecoderRegistry<D>,
}

impl<D: PcmDecoder> Default for Bridge<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: PcmDecoder> Bridge<D> {
    pub fn new() -> Self {
        Bridge {
            registry: DecoderRegistry::new(),
        }
    }

    pub fn create_decoder(&self, sample_rate: i32, channels: i32) -> i64 {
        log::info!(
            "Creating Opus decoder: {}Hz, {} channel(s)",
            sample_rate,
            channels
        );

        match self.registry.create(sample_rate, channels) {
            Ok(handle) => handle.raw(),
            Err(err) => {
                log::error!("Failed to create decoder: {}", err);
                INVALID_HANDLE
            }
        }
    }

    /// Returns samples decoded per channel, or a negative libopus code.
    pub fn decode<B: FrameBuffers>(
        &self,
        handle: i64,
        buffers: &mut B,
        encoded_length: i32,
        frame_size: i32,
    ) -> i32 {
        match self.try_decode(handle, buffers, encoded_length, frame_size) {
            Ok(samples) => samples as i32,
            Err(err) => {
                if matches!(err, DecoderError::BufferUnavailable(_)) {
                    self.registry.record_buffer_failure();
                }
                log::error!("Decode error on #{}: {}", handle, err);
                err.code()
            }
        }
    }

    pub fn reset_decoder(&self, handle: i64) {
        if let Err(err) = self.registry.reset(handle) {
            log::error!("Failed to reset decoder #{}: {}", handle, err);
        }
    }

    pub fn destroy_decoder(&self, handle: i64) {
        if let Err(err) = self.registry.destroy(handle) {
            log::error!("Failed to destroy decoder #{}: {}", handle, err);
        }
    }

    pub fn live_decoders(&self) -> usize {
        self.registry.len()
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.registry.stats()
    }

    fn try_decode<B: FrameBuffers>(
        &self,
        handle: i64,
        buffers: &mut B,
        encoded_length: i32,
        frame_size: i32,
    ) -> Result<usize, DecoderError> {
        // The handle is checked before either buffer is touched.
        let config = self.registry.config(handle)?;

        // Output capacity for libopus; it decodes as much as fits.
        let frame_size = usize::try_from(frame_size)
            .ok()
            .filter(|&size| size > 0)
            .ok_or(DecoderError::InvalidFrameSize(frame_size))?;

        let available = buffers.encoded_len()?;
        let length = usize::try_from(encoded_length)
            .ok()
            .filter(|&length| length <= available)
            .ok_or(DecoderError::InvalidEncodedLength {
                length: encoded_length,
                available,
            })?;
        let encoded = buffers.encoded(length)?;

        let required = config.interleaved_len(frame_size);
        let capacity = buffers.pcm_capacity()?;
        if capacity < required {
            return Err(DecoderError::BufferTooSmall { capacity, required });
        }

        let mut pcm = vec![0; required];
        let samples = self.registry.decode(handle, &encoded, &mut pcm)?;
        buffers.write_pcm(&pcm[..config.interleaved_len(samples)])?;
        Ok(samples)
    }
}
