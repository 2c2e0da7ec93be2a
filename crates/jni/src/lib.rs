//! JNI surface of the Opus decoder, loaded by the host as `libopusdemo.so`.
//!
//! The exports back the native methods of
//! `com.example.demoplayvideo.decoder.OpusDecoder`. Each one marshals its
//! arguments and forwards to a process-wide [`Bridge`]; no panic unwinds
//! into the JVM.

use decoder::error::OPUS_INTERNAL_ERROR;
use decoder::OpusPcmDecoder;
use jni::objects::{JByteArray, JObject, JShortArray};
use jni::sys::{jint, jlong, JNI_VERSION_1_6};
use jni::{JNIEnv, JavaVM};
use std::ffi::c_void;
use std::panic::{self, AssertUnwindSafe};
use std::sync::OnceLock;

pub mod bridge;
pub mod buffers;
pub mod logging;

pub use bridge::{Bridge, INVALID_HANDLE};
pub use buffers::{FrameBuffers, JniFrameBuffers};

static BRIDGE: OnceLock<Bridge<OpusPcmDecoder>> = OnceLock::new();

pub fn bridge() -> &'static Bridge<OpusPcmDecoder> {
    BRIDGE.get_or_init(Bridge::new)
}

fn guard<T>(name: &str, fallback: T, call: impl FnOnce() -> T) -> T {
    match panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(value) => value,
        Err(_) => {
            log::error!("{} panicked, returning failure to caller", name);
            fallback
        }
    }
}

#[no_mangle]
pub extern "system" fn JNI_OnLoad(_vm: JavaVM, _reserved: *mut c_void) -> jint {
    guard("JNI_OnLoad", JNI_VERSION_1_6, || {
        logging::init();
        log::info!(
            "OpusJNI library loaded - Opus version: {}",
            decoder::opus_version()
        );
        JNI_VERSION_1_6
    })
}

#[no_mangle]
pub extern "system" fn Java_com_example_demoplayvideo_decoder_OpusDecoder_nativeCreateDecoder<
    'local,
>(
    _env: JNIEnv<'local>,
    _this: JObject<'local>,
    sample_rate: jint,
    channels: jint,
) -> jlong {
    guard("nativeCreateDecoder", INVALID_HANDLE, || {
        bridge().create_decoder(sample_rate, channels)
    })
}

#[no_mangle]
pub extern "system" fn Java_com_example_demoplayvideo_decoder_OpusDecoder_nativeDecode<'local>(
    env: JNIEnv<'local>,
    _this: JObject<'local>,
    decoder_handle: jlong,
    opus_data: JByteArray<'local>,
    opus_length: jint,
    pcm_data: JShortArray<'local>,
    frame_size: jint,
) -> jint {
    guard("nativeDecode", OPUS_INTERNAL_ERROR, || {
        let mut buffers = JniFrameBuffers::new(&env, &opus_data, &pcm_data);
        bridge().decode(decoder_handle, &mut buffers, opus_length, frame_size)
    })
}

#[no_mangle]
pub extern "system" fn Java_com_example_demoplayvideo_decoder_OpusDecoder_nativeResetDecoder<
    'local,
>(
    _env: JNIEnv<'local>,
    _this: JObject<'local>,
    decoder_handle: jlong,
) {
    guard("nativeResetDecoder", (), || {
        bridge().reset_decoder(decoder_handle)
    })
}

#[no_mangle]
pub extern "system" fn Java_com_example_demoplayvideo_decoder_OpusDecoder_nativeDestroyDecoder<
    'local,
>(
    _env: JNIEnv<'local>,
    _this: JObject<'local>,
    decoder_handle: jlong,
) {
    guard("nativeDestroyDecoder", (), || {
        bridge().destroy_decoder(decoder_handle)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_return_fallback_on_panic() {
        let code = guard("test", OPUS_INTERNAL_ERROR, || -> i32 { panic!("boom") });
        assert_eq!(code, OPUS_INTERNAL_ERROR);
        assert_eq!(guard("test", 0, || 7), 7);
    }

    #[test]
    fn should_share_one_bridge() {
        let handle = bridge().create_decoder(48000, 1);
        assert_ne!(handle, INVALID_HANDLE);
        assert!(std::ptr::eq(bridge(), bridge()));
        bridge().destroy_decoder(handle);
    }
}
