use thiserror::Error;

pub const OPUS_OK: i32 = 0;
pub const OPUS_BAD_ARG: i32 = -1;
pub const OPUS_BUFFER_TOO_SMALL: i32 = -2;
pub const OPUS_INTERNAL_ERROR: i32 = -3;
pub const OPUS_INVALID_PACKET: i32 = -4;
pub const OPUS_UNIMPLEMENTED: i32 = -5;
pub const OPUS_INVALID_STATE: i32 = -6;
pub const OPUS_ALLOC_FAIL: i32 = -7;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecoderError {
    #[error("unsupported sample rate: {0} Hz")]
    UnsupportedSampleRate(i32),

    #[error("invalid channel count: {0}")]
    InvalidChannelCount(i32),

    #[error("invalid decoder handle: {0}")]
    InvalidHandle(i64),

    #[error("failed to access caller buffer: {0}")]
    BufferUnavailable(String),

    #[error("invalid frame size: {0}")]
    InvalidFrameSize(i32),

    #[error("encoded length {length} out of range for {available} bytes")]
    InvalidEncodedLength { length: i32, available: usize },

    #[error("pcm buffer holds {capacity} samples, {required} required")]
    BufferTooSmall { capacity: usize, required: usize },

    #[error("failed within opus: {} (code: {})", describe(.0), .0)]
    Codec(i32),

    #[error("poisoned lock")]
    PoisonedLock,
}

impl DecoderError {
    /// Negative libopus-compatible code handed back across the boundary.
    pub fn code(&self) -> i32 {
        match self {
            DecoderError::UnsupportedSampleRate(_)
            | DecoderError::InvalidChannelCount(_)
            | DecoderError::InvalidFrameSize(_)
            | DecoderError::InvalidEncodedLength { .. } => OPUS_BAD_ARG,
            DecoderError::InvalidHandle(_) => OPUS_INVALID_STATE,
            DecoderError::BufferUnavailable(_) => OPUS_ALLOC_FAIL,
            DecoderError::BufferTooSmall { .. } => OPUS_BUFFER_TOO_SMALL,
            DecoderError::Codec(code) => *code,
            DecoderError::PoisonedLock => OPUS_INTERNAL_ERROR,
        }
    }
}

/// Keeps the libopus code of the failure. The `opus` crate only knows the
/// codes -1 to -7; anything else reaches us as `ErrorCode::Unknown` with the
/// original value lost, and is reported as `OPUS_INTERNAL_ERROR`.
impl From<opus::Error> for DecoderError {
    fn from(err: opus::Error) -> Self {
        let code = match err.code() {
            opus::ErrorCode::BadArg => OPUS_BAD_ARG,
            opus::ErrorCode::BufferTooSmall => OPUS_BUFFER_TOO_SMALL,
            opus::ErrorCode::InternalError => OPUS_INTERNAL_ERROR,
            opus::ErrorCode::InvalidPacket => OPUS_INVALID_PACKET,
            opus::ErrorCode::Unimplemented => OPUS_UNIMPLEMENTED,
            opus::ErrorCode::InvalidState => OPUS_INVALID_STATE,
            opus::ErrorCode::AllocFail => OPUS_ALLOC_FAIL,
            _ => OPUS_INTERNAL_ERROR,
        };
        DecoderError::Codec(code)
    }
}

fn describe(code: &i32) -> &'static str {
    error_message(*code)
}

/// Same wording libopus uses in `opus_strerror`.
pub fn error_message(code: i32) -> &'static str {
    match code {
        OPUS_OK => "success",
        OPUS_BAD_ARG => "invalid argument",
        OPUS_BUFFER_TOO_SMALL => "buffer too small",
        OPUS_INTERNAL_ERROR => "internal error",
        OPUS_INVALID_PACKET => "corrupted stream",
        OPUS_UNIMPLEMENTED => "request not implemented",
        OPUS_INVALID_STATE => "invalid state",
        OPUS_ALLOC_FAIL => "memory allocation failed",
        _ => "unknown error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_errors_to_codes() {
        assert_eq!(DecoderError::UnsupportedSampleRate(44100).code(), OPUS_BAD_ARG);
        assert_eq!(DecoderError::InvalidChannelCount(3).code(), OPUS_BAD_ARG);
        assert_eq!(DecoderError::InvalidHandle(0).code(), OPUS_INVALID_STATE);
        assert_eq!(
            DecoderError::BufferUnavailable("null array".into()).code(),
            OPUS_ALLOC_FAIL
        );
        assert_eq!(
            DecoderError::BufferTooSmall {
                capacity: 10,
                required: 960
            }
            .code(),
            OPUS_BUFFER_TOO_SMALL
        );
        assert_eq!(DecoderError::PoisonedLock.code(), OPUS_INTERNAL_ERROR);
    }

    #[test]
    fn should_pass_codec_codes_through() {
        for code in [OPUS_INVALID_PACKET, OPUS_UNIMPLEMENTED, -42] {
            assert_eq!(DecoderError::Codec(code).code(), code);
        }
    }

    #[test]
    fn should_display_codec_error() {
        assert_eq!(
            DecoderError::Codec(OPUS_INVALID_PACKET).to_string(),
            "failed within opus: corrupted stream (code: -4)"
        );
        assert_eq!(error_message(-100), "unknown error");
    }
}
