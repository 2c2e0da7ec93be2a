use super::PcmDecoder;
use crate::config::DecoderConfig;
use crate::error::DecoderError;
use opus::Decoder;

pub struct OpusPcmDecoder {
    decoder: Decoder,
    config: DecoderConfig,
}

impl std::fmt::Debug for OpusPcmDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpusPcmDecoder")
            .field("config", &self.config)
            .finish()
    }
}

impl PcmDecoder for OpusPcmDecoder {
    fn new(config: DecoderConfig) -> Result<Self, DecoderError> {
        let decoder = Decoder::new(config.sample_rate.hz(), config.channels.into())?;
        Ok(OpusPcmDecoder { decoder, config })
    }

    fn config(&self) -> DecoderConfig {
        self.config
    }

    fn decode(&mut self, input: &[u8], output: &mut [i16]) -> Result<usize, DecoderError> {
        Ok(self.decoder.decode(input, output, false)?)
    }

    fn reset(&mut self) -> Result<(), DecoderError> {
        Ok(self.decoder.reset_state()?)
    }
}
