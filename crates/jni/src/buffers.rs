use decoder::DecoderError;
use jni::objects::{JByteArray, JShortArray};
use jni::sys::jbyte;
use jni::JNIEnv;

/// Caller-owned buffers of one decode call. Nothing is retained after the
/// call returns.
pub trait FrameBuffers {
    fn encoded_len(&mut self) -> Result<usize, DecoderError>;
    /// Copies the first `length` encoded bytes; `length` never exceeds
    /// `encoded_len`.
    fn encoded(&mut self, length: usize) -> Result<Vec<u8>, DecoderError>;
    fn pcm_capacity(&mut self) -> Result<usize, DecoderError>;
    fn write_pcm(&mut self, samples: &[i16]) -> Result<(), DecoderError>;
}

pub struct JniFrameBuffers<'a, 'local> {
    env: &'a JNIEnv<'local>,
    encoded: &'a JByteArray<'local>,
    pcm: &'a JShortArray<'local>,
}

impl<'a, 'local> JniFrameBuffers<'a, 'local> {
    pub fn new(
        env: &'a JNIEnv<'local>,
        encoded: &'a JByteArray<'local>,
        pcm: &'a JShortArray<'local>,
    ) -> Self {
        JniFrameBuffers { env, encoded, pcm }
    }
}

impl FrameBuffers for JniFrameBuffers<'_, '_> {
    fn encoded_len(&mut self) -> Result<usize, DecoderError> {
        let length = self
            .env
            .get_array_length(self.encoded)
            .map_err(|err| DecoderError::BufferUnavailable(format!("encoded frame: {}", err)))?;
        Ok(usize::try_from(length).unwrap_or(0))
    }

    fn encoded(&mut self, length: usize) -> Result<Vec<u8>, DecoderError> {
        let mut bytes: Vec<jbyte> = vec![0; length];
        self.env
            .get_byte_array_region(self.encoded, 0, &mut bytes)
            .map_err(|err| DecoderError::BufferUnavailable(format!("encoded frame: {}", err)))?;
        Ok(bytes.into_iter().map(|byte| byte as u8).collect())
    }

    fn pcm_capacity(&mut self) -> Result<usize, DecoderError> {
        let length = self
            .env
            .get_array_length(self.pcm)
            .map_err(|err| DecoderError::BufferUnavailable(format!("pcm buffer: {}", err)))?;
        Ok(usize::try_from(length).unwrap_or(0))
    }

    fn write_pcm(&mut self, samples: &[i16]) -> Result<(), DecoderError> {
        self.env
            .set_short_array_region(self.pcm, 0, samples)
            .map_err(|err| DecoderError::BufferUnavailable(format!("pcm buffer: {}", err)))
    }
}

#[cfg(all(test, feature = "jvm-tests"))]
mod tests {
    use super::*;
    use crate::bridge::Bridge;
    use decoder::error::{OPUS_ALLOC_FAIL, OPUS_BAD_ARG};
    use decoder::OpusPcmDecoder;
    use jni::{InitArgsBuilder, JNIVersion, JavaVM};
    use opus::{Application, Channels, Encoder};
    use std::sync::OnceLock;

    fn jvm() -> &'static JavaVM {
        static JVM: OnceLock<JavaVM> = OnceLock::new();
        JVM.get_or_init(|| {
            let args = InitArgsBuilder::new()
                .version(JNIVersion::V8)
                .build()
                .unwrap();
            JavaVM::new(args).unwrap()
        })
    }

    fn silent_frame() -> Vec<u8> {
        let mut encoder = Encoder::new(48000, Channels::Mono, Application::Audio).unwrap();
        let mut encoded = vec![0; 4000];
        let len = encoder.encode(&[0; 960], &mut encoded).unwrap();
        encoded.truncate(len);
        encoded
    }

    #[test]
    fn should_decode_through_java_arrays() {
        let env = jvm().attach_current_thread().unwrap();
        let bridge = Bridge::<OpusPcmDecoder>::new();
        let handle = bridge.create_decoder(48000, 1);

        let frame = silent_frame();
        let encoded = env.byte_array_from_slice(&frame).unwrap();
        let pcm = env.new_short_array(960).unwrap();

        let mut buffers = JniFrameBuffers::new(&env, &encoded, &pcm);
        assert_eq!(buffers.encoded_len().unwrap(), frame.len());
        assert_eq!(buffers.encoded(frame.len()).unwrap(), frame);
        assert_eq!(
            bridge.decode(handle, &mut buffers, frame.len() as i32, 960),
            960
        );
        assert_eq!(
            bridge.decode(handle, &mut buffers, frame.len() as i32 + 1, 960),
            OPUS_BAD_ARG
        );

        let mut decoded = vec![0i16; 960];
        env.get_short_array_region(&pcm, 0, &mut decoded).unwrap();
        assert!(decoded.iter().all(|sample| sample.abs() < 16));
    }

    #[test]
    fn should_report_null_array_as_alloc_failure() {
        let env = jvm().attach_current_thread().unwrap();
        let bridge = Bridge::<OpusPcmDecoder>::new();
        let handle = bridge.create_decoder(48000, 1);

        let encoded = JByteArray::default();
        let pcm = env.new_short_array(960).unwrap();

        let mut buffers = JniFrameBuffers::new(&env, &encoded, &pcm);
        assert_eq!(bridge.decode(handle, &mut buffers, 10, 960), OPUS_ALLOC_FAIL);
        assert_eq!(bridge.stats().buffer_failures, 1);
    }
}
