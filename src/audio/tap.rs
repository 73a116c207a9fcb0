//! Sample tap shared between audio callbacks and the frame loop.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Rolling window of the most recent mono samples (thread-safe)
///
/// Audio callbacks push into it; the frame loop copies the latest window out
/// once per frame for analysis.
#[derive(Clone, Debug)]
pub struct SampleTap {
    buffer: Arc<Mutex<VecDeque<f32>>>,
    capacity: usize,
}

impl SampleTap {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append mono samples, dropping the oldest beyond capacity
    pub fn push<I>(&self, samples: I)
    where
        I: IntoIterator<Item = f32>,
    {
        let mut buf = self.lock();
        for sample in samples {
            if buf.len() == self.capacity {
                buf.pop_front();
            }
            buf.push_back(sample);
        }
    }

    /// Downmix interleaved frames to mono and append them
    pub fn push_frames<T, F>(&self, interleaved: &[T], channels: usize, convert: F)
    where
        T: Copy,
        F: Fn(T) -> f32,
    {
        if channels == 0 {
            return;
        }
        let scale = 1.0 / channels as f32;
        self.push(
            interleaved
                .chunks_exact(channels)
                .map(|frame| frame.iter().map(|&s| convert(s)).sum::<f32>() * scale),
        );
    }

    /// Copy the latest samples into `out`, zero-padding at the front when short
    pub fn snapshot_into(&self, out: &mut [f32]) {
        let buf = self.lock();
        let available = buf.len().min(out.len());
        let pad = out.len() - available;
        out[..pad].fill(0.0);
        for (dst, src) in out[pad..].iter_mut().zip(buf.iter().skip(buf.len() - available)) {
            *dst = *src;
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<f32>> {
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
