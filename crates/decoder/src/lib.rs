//! Opus decoder handles for callers on the far side of a language boundary.
//!
//! Decoders live in a [`DecoderRegistry`] and are addressed by opaque,
//! never-reused [`DecoderHandle`]s, so no raw address ever leaves the crate.
//!
//! ```no_run
//! use decoder::{DecoderRegistry, OpusPcmDecoder, DEFAULT_FRAME_SIZE};
//!
//! let registry = DecoderRegistry::<OpusPcmDecoder>::new();
//! let handle = registry.create(48000, 2)?;
//!
//! let packet: Vec<u8> = vec![0xFC, 0xFF, 0xFE];
//! let mut pcm = vec![0i16; DEFAULT_FRAME_SIZE * 2];
//! let samples = registry.decode(handle.raw(), &packet, &mut pcm)?;
//! println!("decoded {} samples per channel", samples);
//!
//! registry.destroy(handle.raw())?;
//! # Ok::<(), decoder::DecoderError>(())
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod registry;
pub mod stats;

pub use codec::{opus::OpusPcmDecoder, PcmDecoder};
pub use config::{ChannelCount, DecoderConfig, SampleRate, DEFAULT_FRAME_SIZE, MAX_FRAME_SIZE};
pub use error::DecoderError;
pub use registry::{DecoderHandle, DecoderRegistry};
pub use stats::StatsSnapshot;

/// Version string of the linked libopus.
pub fn opus_version() -> &'static str {
    opus::version()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_report_opus_version() {
        assert!(opus_version().contains("opus"));
    }
}
