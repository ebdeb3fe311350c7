//! Real audio output: cpal stream plus a lock-free ring into the callback.
//!
//! The control side (the engine) pushes [`ToneSpec`]s into an rtrb SPSC ring;
//! the audio callback drains the ring into a small fixed voice pool, renders
//! and mixes the active voices, and retires finished ones. Nothing on the
//! control side ever blocks on the audio thread.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Producer, RingBuffer};

use super::{SynthBackend, SynthError, ToneSpec};
use crate::dsp::decay::Decay;
use crate::dsp::oscillator::Oscillator;

/// Capacity of the control → audio ring. A full ring drops tones.
const TONE_QUEUE_SIZE: usize = 64;

/// Upper bound on simultaneously sounding tones. Sixteen is far beyond what
/// the effect library can trigger at once.
const MAX_VOICES: usize = 16;

/// One sounding tone inside the audio callback: oscillator, decay envelope,
/// optional linear frequency sweep, and a sample countdown.
struct ToneVoice {
    osc: Oscillator,
    decay: Decay,
    frequency: f32,
    sweep_to: Option<f32>,
    delay_samples: u32,
    elapsed_samples: u32,
    total_samples: u32,
}

impl ToneVoice {
    fn new(spec: &ToneSpec, sample_rate: f32) -> Self {
        let total_samples = (spec.duration * sample_rate).round().max(1.0) as u32;
        let delay_samples = (spec.offset.as_secs_f32() * sample_rate).round() as u32;
        Self {
            osc: Oscillator::new(spec.waveform),
            decay: Decay::new(spec.volume, spec.curve),
            frequency: spec.frequency,
            sweep_to: spec.sweep_to,
            delay_samples,
            elapsed_samples: 0,
            total_samples,
        }
    }

    fn next_sample(&mut self, sample_rate: f32) -> f32 {
        if self.delay_samples > 0 {
            self.delay_samples -= 1;
            return 0.0;
        }
        if self.elapsed_samples >= self.total_samples {
            return 0.0;
        }

        let progress = self.elapsed_samples as f32 / self.total_samples as f32;
        let frequency = match self.sweep_to {
            Some(target) => self.frequency + (target - self.frequency) * progress,
            None => self.frequency,
        };

        let sample = self.osc.next_sample(frequency, sample_rate) * self.decay.level_at(progress);
        self.elapsed_samples += 1;
        sample
    }

    fn is_finished(&self) -> bool {
        self.delay_samples == 0 && self.elapsed_samples >= self.total_samples
    }
}

/// cpal-backed [`SynthBackend`].
///
/// The stream is built lazily on the first `activate` call; every later call
/// just replays `stream.play()`, which is the resume point after the host
/// pauses the output.
pub struct DeviceBackend {
    stream: Option<cpal::Stream>,
    tx: Option<Producer<ToneSpec>>,
}

impl DeviceBackend {
    pub fn new() -> Self {
        Self {
            stream: None,
            tx: None,
        }
    }

    fn build_stream(&mut self) -> Result<(), SynthError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(SynthError::NoOutputDevice)?;
        let config = device
            .default_output_config()
            .map_err(|err| SynthError::Stream(err.to_string()))?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;

        let (tx, mut rx) = RingBuffer::<ToneSpec>::new(TONE_QUEUE_SIZE);
        // Pre-allocated so the callback never grows the pool.
        let mut voices: Vec<ToneVoice> = Vec::with_capacity(MAX_VOICES);

        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _| {
                    while let Ok(spec) = rx.pop() {
                        if voices.len() < MAX_VOICES {
                            voices.push(ToneVoice::new(&spec, sample_rate));
                        }
                    }

                    for frame in data.chunks_mut(channels) {
                        let mut mixed = 0.0;
                        for voice in voices.iter_mut() {
                            mixed += voice.next_sample(sample_rate);
                        }
                        for out in frame.iter_mut() {
                            *out = mixed;
                        }
                    }

                    voices.retain(|v| !v.is_finished());
                },
                |err| eprintln!("audio error: {err}"),
                None,
            )
            .map_err(|err| SynthError::Stream(err.to_string()))?;

        self.stream = Some(stream);
        self.tx = Some(tx);
        Ok(())
    }
}

impl SynthBackend for DeviceBackend {
    fn activate(&mut self) -> Result<(), SynthError> {
        if self.stream.is_none() {
            self.build_stream()?;
        }
        if let Some(stream) = &self.stream {
            stream
                .play()
                .map_err(|err| SynthError::Stream(err.to_string()))?;
        }
        Ok(())
    }

    fn schedule_tone(&mut self, tone: &ToneSpec) {
        if let Some(tx) = &mut self.tx {
            // Ring full means the host is flooding effects; dropping one is
            // the degrade-to-silence contract.
            let _ = tx.push(*tone);
        }
    }
}

impl Default for DeviceBackend {
    fn default() -> Self {
        Self::new()
    }
}
