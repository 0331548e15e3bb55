/// Audio sink for the board's write FIFO via rodio.
///
/// The terminal board drains FIFO samples at the codec rate and hands them
/// here; they are batched into one stereo buffer per flush and appended to a
/// single long-lived Sink, so playback stays in order.
///
/// Compile with `--no-default-features` or without "sound" feature
/// to disable audio entirely (the stub SoundEngine discards samples).

/// Register samples are 18-bit; keep the top 16.
const PCM_SHIFT: u32 = 2;

pub fn to_pcm(sample: i32) -> i16 {
    (sample >> PCM_SHIFT).clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

#[cfg(feature = "sound")]
mod inner {
    use rodio::buffer::SamplesBuffer;
    use rodio::{OutputStream, OutputStreamHandle, Sink};

    use super::to_pcm;

    pub struct SoundEngine {
        _stream: OutputStream,
        _handle: OutputStreamHandle,
        sink: Sink,
        sample_rate: u32,
        pending: Vec<i16>,
    }

    impl SoundEngine {
        pub fn new(sample_rate: u32, volume: f32) -> Option<Self> {
            let (stream, handle) = match OutputStream::try_default() {
                Ok(pair) => pair,
                Err(e) => {
                    tracing::warn!("no audio output: {e}");
                    return None;
                }
            };
            let sink = Sink::try_new(&handle).ok()?;
            sink.set_volume(volume);
            Some(SoundEngine {
                _stream: stream,
                _handle: handle,
                sink,
                sample_rate,
                pending: Vec::with_capacity(4096),
            })
        }

        pub fn queue(&mut self, samples: &[(i32, i32)]) {
            for &(l, r) in samples {
                self.pending.push(to_pcm(l));
                self.pending.push(to_pcm(r));
            }
        }

        pub fn flush(&mut self) {
            if self.pending.is_empty() {
                return;
            }
            let data = std::mem::take(&mut self.pending);
            self.sink.append(SamplesBuffer::new(2, self.sample_rate, data));
        }
    }
}

#[cfg(feature = "sound")]
pub use inner::SoundEngine;

#[cfg(not(feature = "sound"))]
pub struct SoundEngine;

#[cfg(not(feature = "sound"))]
impl SoundEngine {
    pub fn new(_sample_rate: u32, _volume: f32) -> Option<Self> { Some(SoundEngine) }
    pub fn queue(&mut self, _samples: &[(i32, i32)]) {}
    pub fn flush(&mut self) {}
}
