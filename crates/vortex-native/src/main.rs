use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use glam::Vec3;
use rand::prelude::*;
use vortex_core::{
    AudioCommand, IntersectionResult, ParticipantId, ProximityReadout, VortexConfig,
    VortexSession,
};

const FRAME: Duration = Duration::from_millis(16);
const EYE_HEIGHT: f32 = 1.6;
const WALK_SWAY: f32 = 0.04; // metres of random lateral sway per frame
const SOUND_VOLUME: f32 = 0.8; // sink's configured gain, captured as nominal
const STEP_RATE_HZ: f32 = 1.8; // footsteps per second in the synthesized loop
const HUD_EVERY: u32 = 7; // log one HUD readout per this many intersection events

/// What the cpal callback needs to know about the walking sound.
#[derive(Clone, Copy)]
struct SinkState {
    gain: f32,
    playing: bool,
}

impl SinkState {
    fn apply(&mut self, command: AudioCommand) {
        match command {
            AudioCommand::SetGain(g) => self.gain = g,
            AudioCommand::Play => self.playing = true,
            AudioCommand::Pause => self.playing = false,
        }
    }
}

// ---------------- Scripted walk ----------------

#[derive(Clone, Copy, Debug)]
enum Leg {
    Walk { to: Vec3, secs: f32 },
    Orbit { radius: f32, turns: f32, secs: f32 },
    Stand { secs: f32 },
}

fn script() -> Vec<Leg> {
    vec![
        Leg::Stand { secs: 0.5 },
        Leg::Walk {
            to: Vec3::new(5.0, 0.0, 0.0),
            secs: 3.0,
        },
        Leg::Stand { secs: 1.5 },
        Leg::Orbit {
            radius: 5.0,
            turns: 0.5,
            secs: 4.0,
        },
        Leg::Walk {
            to: Vec3::new(0.5, 0.0, 0.2),
            secs: 2.5,
        },
        Leg::Stand { secs: 1.0 },
        Leg::Walk {
            to: Vec3::new(-12.0, 0.0, 0.0),
            secs: 3.0,
        },
        Leg::Stand { secs: 1.5 },
    ]
}

struct Walker {
    position: Vec3,
    rng: StdRng,
}

impl Walker {
    /// Advance along `leg` to fraction `t` of it, starting from `from`. Returns whether the walker moved.
    fn follow(&mut self, leg: Leg, from: Vec3, t: f32) -> bool {
        let target = match leg {
            Leg::Stand { .. } => return false,
            Leg::Walk { to, .. } => from.lerp(to, t),
            Leg::Orbit { radius, turns, .. } => {
                let start_angle = from.z.atan2(from.x);
                let angle = start_angle + t * turns * std::f32::consts::TAU;
                Vec3::new(radius * angle.cos(), 0.0, radius * angle.sin())
            }
        };
        let sway = Vec3::new(
            self.rng.gen_range(-WALK_SWAY..WALK_SWAY),
            0.0,
            self.rng.gen_range(-WALK_SWAY..WALK_SWAY),
        );
        self.position = target + sway;
        true
    }
}

fn leg_secs(leg: Leg) -> f32 {
    match leg {
        Leg::Walk { secs, .. } | Leg::Orbit { secs, .. } | Leg::Stand { secs } => secs,
    }
}

fn run_simulation(sink: Arc<Mutex<SinkState>>) -> anyhow::Result<()> {
    let config = VortexConfig {
        nominal_gain: SOUND_VOLUME,
        ..VortexConfig::default()
    };
    let mut session = VortexSession::new(config)?;
    session.place(Vec3::ZERO);
    session.track(ParticipantId::LOCAL);
    log::info!(
        "[sim] vortex height={:.2} pool radius={:.2}",
        session.shape().total_height,
        session.shape().proximity_threshold()
    );

    let mut events = 0u32;
    let hud = session.subscribe(move |result: &IntersectionResult| {
        events += 1;
        if events % HUD_EVERY == 1 {
            log::info!("[hud]\n{}", ProximityReadout::from(result));
        }
    });

    let apply = |commands: &mut dyn Iterator<Item = AudioCommand>| {
        if let Ok(mut guard) = sink.lock() {
            for cmd in commands {
                log::debug!("[sink] {:?}", cmd);
                guard.apply(cmd);
            }
        }
    };

    let mut walker = Walker {
        position: Vec3::new(11.0, 0.0, 0.0),
        rng: StdRng::seed_from_u64(7),
    };
    let mut last = Instant::now();
    for (i, leg) in script().into_iter().enumerate() {
        log::info!("[sim] leg {}: {:?}", i, leg);
        let from = walker.position;
        let total = leg_secs(leg).max(f32::EPSILON);
        let mut elapsed = 0.0_f32;
        while elapsed < total {
            thread::sleep(FRAME);
            let now = Instant::now();
            let dt = now - last;
            last = now;
            elapsed += dt.as_secs_f32();

            if walker.follow(leg, from, (elapsed / total).min(1.0)) {
                let mut cmds = session
                    .participant_moved(ParticipantId::LOCAL, walker.position)
                    .into_iter();
                apply(&mut cmds);
            }
            let observer = walker.position + Vec3::new(0.0, EYE_HEIGHT, 0.0);
            let report = session.frame(dt, Some(observer));
            let mut cmds = report.audio.into_iter().map(|(_, cmd)| cmd);
            apply(&mut cmds);
        }
        if let Ok(guard) = sink.lock() {
            log::info!(
                "[sim] leg {} done: gain={:.2} playing={}",
                i,
                guard.gain,
                guard.playing
            );
        }
    }

    session.unsubscribe(hud);
    session.teardown();
    Ok(())
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let sink = Arc::new(Mutex::new(SinkState {
        gain: 0.0,
        playing: false,
    }));

    // Native audio output (footstep loop gated by the fade controller)
    let audio_stream = start_audio_output(Arc::clone(&sink));
    if audio_stream.is_none() {
        log::warn!("no audio output available; running silent");
    }

    let sim_sink = Arc::clone(&sink);
    let handle = thread::Builder::new()
        .name("walk-simulator".into())
        .spawn(move || run_simulation(sim_sink));
    match handle {
        Ok(h) => match h.join() {
            Ok(Ok(())) => log::info!("simulation finished"),
            Ok(Err(e)) => log::error!("simulation error: {:?}", e),
            Err(_) => log::error!("simulation thread panicked"),
        },
        Err(e) => log::error!("could not spawn simulation thread: {e}"),
    }
    drop(audio_stream);
}

// ---------------- Native audio (cpal) ----------------

struct Footsteps {
    sample_rate: f32,
    phase: f32, // 0..1 within one step
    noise_seed: u32,
    lowpass: f32,
}

impl Footsteps {
    fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            phase: 0.0,
            noise_seed: 0x1234ABCD,
            lowpass: 0.0,
        }
    }

    fn next_sample(&mut self, state: SinkState) -> f32 {
        if !state.playing {
            return 0.0;
        }
        // simple xorshift32 for deterministic noise
        let mut x = self.noise_seed;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.noise_seed = x;
        let n = (x as f32 / u32::MAX as f32) * 2.0 - 1.0;
        self.lowpass += (n - self.lowpass) * 0.08;
        // sharp attack, exponential decay per footstep
        let env = (-self.phase * 18.0).exp();
        self.phase += STEP_RATE_HZ / self.sample_rate;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        (self.lowpass * env * 3.0 * state.gain).tanh()
    }
}

fn start_audio_output(sink: Arc<Mutex<SinkState>>) -> Option<cpal::Stream> {
    let host = cpal::default_host();
    let device = host.default_output_device()?;
    let config = device.default_output_config().ok()?;
    let sample_rate = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;
    let err_fn = |err: cpal::StreamError| log::error!("audio stream error: {err}");

    let stream = match config.sample_format() {
        cpal::SampleFormat::F32 => build_stream::<f32>(
            &device,
            &config.into(),
            channels,
            sample_rate,
            sink,
            |s| s,
            err_fn,
        )
        .ok()?,
        cpal::SampleFormat::I16 => build_stream::<i16>(
            &device,
            &config.into(),
            channels,
            sample_rate,
            sink,
            |s| (s * i16::MAX as f32) as i16,
            err_fn,
        )
        .ok()?,
        cpal::SampleFormat::U16 => build_stream::<u16>(
            &device,
            &config.into(),
            channels,
            sample_rate,
            sink,
            |s| (((s * 0.5 + 0.5).clamp(0.0, 1.0)) * u16::MAX as f32) as u16,
            err_fn,
        )
        .ok()?,
        _ => return None,
    };

    stream.play().ok()?;
    Some(stream)
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    sample_rate: f32,
    sink: Arc<Mutex<SinkState>>,
    convert: fn(f32) -> T,
    err_fn: impl Fn(cpal::StreamError) + Send + 'static,
) -> Result<cpal::Stream, cpal::BuildStreamError>
where
    T: cpal::SizedSample + Send + 'static,
{
    let mut steps = Footsteps::new(sample_rate);
    device.build_output_stream(
        config,
        move |data: &mut [T], _| {
            let state = match sink.lock() {
                Ok(guard) => *guard,
                Err(_) => SinkState {
                    gain: 0.0,
                    playing: false,
                },
            };
            for frame in data.chunks_mut(channels.max(1)) {
                let v = convert(steps.next_sample(state));
                for sample in frame.iter_mut() {
                    *sample = v;
                }
            }
        },
        err_fn,
        None,
    )
}
