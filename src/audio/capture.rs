//! Live system-audio capture.
//!
//! Opens the default input device (a monitor/loopback source on hosts that
//! expose one) and downmixes everything it delivers into a sample tap.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::SampleFormat;

use super::{AudioError, SampleTap};

/// Running capture stream (capture stops when dropped)
pub struct CaptureStream {
    device_name: String,

    /// Audio input stream (kept alive; absent for streams built in tests)
    _stream: Option<cpal::Stream>,
}

impl CaptureStream {
    /// Name of the input device being captured
    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    /// Stream with no device behind it
    #[cfg(test)]
    pub(crate) fn detached(device_name: &str) -> Self {
        Self {
            device_name: device_name.to_string(),
            _stream: None,
        }
    }
}

/// Request a capture stream feeding `tap`
pub fn request_capture(tap: SampleTap) -> Result<CaptureStream, AudioError> {
    let host = cpal::default_host();
    let device = host
        .default_input_device()
        .ok_or(AudioError::NoDevice("input"))?;

    let supported = device.default_input_config()?;
    let channels = supported.channels() as usize;
    if channels == 0 {
        return Err(AudioError::NoAudioTrack);
    }

    let sample_format = supported.sample_format();
    let config: cpal::StreamConfig = supported.into();
    let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());

    let stream = match sample_format {
        SampleFormat::F32 => device.build_input_stream(
            &config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                tap.push_frames(data, channels, |s| s)
            },
            stream_error,
            None,
        )?,
        SampleFormat::I16 => device.build_input_stream(
            &config,
            move |data: &[i16], _: &cpal::InputCallbackInfo| {
                tap.push_frames(data, channels, |s| s as f32 / i16::MAX as f32)
            },
            stream_error,
            None,
        )?,
        SampleFormat::U16 => device.build_input_stream(
            &config,
            move |data: &[u16], _: &cpal::InputCallbackInfo| {
                tap.push_frames(data, channels, |s| (s as f32 - 32768.0) / 32768.0)
            },
            stream_error,
            None,
        )?,
        other => return Err(AudioError::UnsupportedSampleFormat(other)),
    };

    stream.play()?;

    tracing::info!(
        "Capture: {} @ {}Hz, {} channel(s)",
        device_name,
        config.sample_rate.0,
        channels
    );

    Ok(CaptureStream {
        device_name,
        _stream: Some(stream),
    })
}

fn stream_error(err: cpal::StreamError) {
    tracing::error!("Capture stream error: {}", err);
}
