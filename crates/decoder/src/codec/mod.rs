use crate::config::DecoderConfig;
use crate::error::DecoderError;

pub mod opus;

/// Turns encoded packets into interleaved `i16` samples.
pub trait PcmDecoder: Send {
    fn new(config: DecoderConfig) -> Result<Self, DecoderError>
    where
        Self: Sized;

    fn config(&self) -> DecoderConfig;

    /// Decodes one packet into `output` with FEC disabled. The frame size is
    /// `output.len() / channels`; returns samples decoded per channel.
    fn decode(&mut self, input: &[u8], output: &mut [i16]) -> Result<usize, DecoderError>;

    fn reset(&mut self) -> Result<(), DecoderError>;

    /// Decodes one packet into a fresh buffer trimmed to the decoded length.
    fn decode_frame(&mut self, input: &[u8], frame_size: usize) -> Result<Vec<i16>, DecoderError> {
        let config = self.config();
        let mut pcm = vec![0; config.interleaved_len(frame_size)];
        let samples = self.decode(input, &mut pcm)?;
        pcm.truncate(config.interleaved_len(samples));
        Ok(pcm)
    }
}
