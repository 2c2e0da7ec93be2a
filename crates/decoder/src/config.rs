use crate::error::DecoderError;
use std::fmt::Display;

/// 20 ms at 48 kHz.
pub const DEFAULT_FRAME_SIZE: usize = 960;

/// Largest frame libopus produces: 120 ms at 48 kHz.
pub const MAX_FRAME_SIZE: usize = 5760;

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleRate {
    Hz8000 = 8000,
    Hz12000 = 12000,
    Hz16000 = 16000,
    Hz24000 = 24000,
    Hz48000 = 48000,
}

impl SampleRate {
    pub fn from_hz(hz: i32) -> Result<Self, DecoderError> {
        match hz {
            8000 => Ok(SampleRate::Hz8000),
            12000 => Ok(SampleRate::Hz12000),
            16000 => Ok(SampleRate::Hz16000),
            24000 => Ok(SampleRate::Hz24000),
            48000 => Ok(SampleRate::Hz48000),
            _ => Err(DecoderError::UnsupportedSampleRate(hz)),
        }
    }

    pub fn hz(self) -> u32 {
        self as i32 as u32
    }

    pub fn samples_per_ms(self) -> usize {
        self.hz() as usize / 1000
    }
}

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelCount {
    Mono = 1,
    Stereo = 2,
}

impl ChannelCount {
    pub fn from_count(channels: i32) -> Result<Self, DecoderError> {
        match channels {
            1 => Ok(ChannelCount::Mono),
            2 => Ok(ChannelCount::Stereo),
            _ => Err(DecoderError::InvalidChannelCount(channels)),
        }
    }

    pub fn count(self) -> usize {
        self as i32 as usize
    }
}

impl From<ChannelCount> for opus::Channels {
    fn from(channels: ChannelCount) -> Self {
        match channels {
            ChannelCount::Mono => opus::Channels::Mono,
            ChannelCount::Stereo => opus::Channels::Stereo,
        }
    }
}

/// Construction-time parameters, fixed for the lifetime of a decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecoderConfig {
    pub sample_rate: SampleRate,
    pub channels: ChannelCount,
}

impl DecoderConfig {
    pub fn new(sample_rate_hz: i32, channels: i32) -> Result<Self, DecoderError> {
        Ok(DecoderConfig {
            sample_rate: SampleRate::from_hz(sample_rate_hz)?,
            channels: ChannelCount::from_count(channels)?,
        })
    }

    /// Interleaved samples needed to hold `frame_size` samples per channel.
    pub fn interleaved_len(&self, frame_size: usize) -> usize {
        frame_size * self.channels.count()
    }
}

impl Display for DecoderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}Hz, {} channel(s)",
            self.sample_rate.hz(),
            self.channels.count()
        )
    }
}
