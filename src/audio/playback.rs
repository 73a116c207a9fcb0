//! Decoded track playback.
//!
//! WAV files are decoded up front with hound and streamed to the default
//! output device through cpal. Everything the stream emits (including the
//! silence while paused) is mirrored into the shared sample tap so the
//! spectrum follows what is actually heard.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{AudioError, SampleTap};

/// Interleaved PCM decoded from a file
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    samples: Vec<f32>,
    channels: usize,
    sample_rate: u32,
}

impl DecodedAudio {
    pub fn new(samples: Vec<f32>, channels: usize, sample_rate: u32) -> Self {
        Self {
            samples,
            channels: channels.max(1),
            sample_rate,
        }
    }

    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Sample of `frame` for output channel `channel` (wrapped onto the source channels)
    pub fn sample(&self, frame: usize, channel: usize) -> f32 {
        self.samples
            .get(frame * self.channels + channel % self.channels)
            .copied()
            .unwrap_or(0.0)
    }

    /// Mono downmix of one frame
    pub fn mono(&self, frame: usize) -> f32 {
        let start = frame * self.channels;
        match self.samples.get(start..start + self.channels) {
            Some(frame) => frame.iter().sum::<f32>() / self.channels as f32,
            None => 0.0,
        }
    }
}

/// Decode a WAV file into normalized f32 samples
pub fn decode_wav(path: &Path) -> Result<DecodedAudio, AudioError> {
    let is_wav = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"));
    if !is_wav {
        return Err(AudioError::UnsupportedFormat(path.to_path_buf()));
    }

    let decode_err = |source| AudioError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = hound::WavReader::open(path).map_err(decode_err)?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(decode_err)?,
        hound::SampleFormat::Int => {
            let scale = 1.0 / (1i64 << (spec.bits_per_sample.clamp(1, 32) - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 * scale))
                .collect::<Result<_, _>>()
                .map_err(decode_err)?
        }
    };

    if samples.is_empty() {
        return Err(AudioError::EmptyTrack(path.to_path_buf()));
    }

    Ok(DecodedAudio::new(
        samples,
        spec.channels as usize,
        spec.sample_rate,
    ))
}

/// Transport state shared with the output callback
#[derive(Debug, Clone)]
struct Transport {
    playing: bool,
    gain: f32,
    /// Playhead in source frames (fractional when resampling)
    position: f64,
}

impl Transport {
    /// Render one output frame, returning the mono sample that was played
    fn render_frame(&mut self, audio: &DecodedAudio, step: f64, out: &mut [f32]) -> f32 {
        if !self.playing {
            out.fill(0.0);
            return 0.0;
        }

        let frame = self.position as usize;
        if frame >= audio.frames() {
            // End of track: stop and rewind
            self.playing = false;
            self.position = 0.0;
            out.fill(0.0);
            return 0.0;
        }

        for (channel, sample) in out.iter_mut().enumerate() {
            *sample = audio.sample(frame, channel) * self.gain;
        }
        self.position += step;
        audio.mono(frame) * self.gain
    }
}

/// A loaded track bound to an output stream
pub struct Track {
    path: PathBuf,
    transport: Arc<Mutex<Transport>>,
    output_rate: u32,

    /// Audio output stream (kept alive; absent for tracks built in tests)
    _stream: Option<cpal::Stream>,
}

impl Track {
    /// Decode `path` and open a paused output stream for it
    pub fn load(path: &Path, tap: SampleTap) -> Result<Self, AudioError> {
        let audio = decode_wav(path)?;
        Self::from_decoded(path, audio, tap)
    }

    fn from_decoded(path: &Path, audio: DecodedAudio, tap: SampleTap) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::NoDevice("output"))?;

        let config: cpal::StreamConfig = device.default_output_config()?.into();
        let channels = config.channels as usize;
        let output_rate = config.sample_rate.0;
        let step = audio.sample_rate() as f64 / output_rate as f64;
        let duration_secs = audio.frames() as f32 / audio.sample_rate().max(1) as f32;

        tracing::info!(
            "Audio: {} @ {}Hz, track {} ({:.1}s, {}Hz, {}ch)",
            device.name().unwrap_or_else(|_| "Unknown".to_string()),
            output_rate,
            path.display(),
            duration_secs,
            audio.sample_rate(),
            audio.channels()
        );

        let transport = Arc::new(Mutex::new(Transport {
            playing: false,
            gain: 1.0,
            position: 0.0,
        }));
        let transport_cb = Arc::clone(&transport);
        let mut mono = Vec::new();

        let stream = device.build_output_stream(
            &config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                let mut transport = lock(&transport_cb);
                mono.clear();
                for frame in data.chunks_mut(channels.max(1)) {
                    mono.push(transport.render_frame(&audio, step, frame));
                }
                drop(transport);
                tap.push(mono.iter().copied());
            },
            |err| tracing::error!("Audio stream error: {}", err),
            None,
        )?;

        stream.play()?;

        Ok(Self {
            path: path.to_path_buf(),
            transport,
            output_rate,
            _stream: Some(stream),
        })
    }

    /// Paused track with no output device behind it
    #[cfg(test)]
    pub(crate) fn detached(path: &Path, output_rate: u32) -> Self {
        Self {
            path: path.to_path_buf(),
            transport: Arc::new(Mutex::new(Transport {
                playing: false,
                gain: 1.0,
                position: 0.0,
            })),
            output_rate,
            _stream: None,
        }
    }

    pub fn play(&self) {
        lock(&self.transport).playing = true;
    }

    pub fn pause(&self) {
        lock(&self.transport).playing = false;
    }

    pub fn is_playing(&self) -> bool {
        lock(&self.transport).playing
    }

    /// Output gain (0.0..=1.0)
    pub fn set_gain(&self, level: f32) {
        lock(&self.transport).gain = level.clamp(0.0, 1.0);
    }

    /// Rate of the output stream feeding the analyzer
    pub fn sample_rate(&self) -> u32 {
        self.output_rate
    }

    /// File name for display
    pub fn name(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

fn lock(transport: &Mutex<Transport>) -> MutexGuard<'_, Transport> {
    transport.lock().unwrap_or_else(PoisonError::into_inner)
}
