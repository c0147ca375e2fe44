use crate::constants::*;
use vortex_core::AudioCommand;
use web_sys as web;

fn create_gain(audio_ctx: &web::AudioContext, value: f32, label: &str) -> anyhow::Result<web::GainNode> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("{} GainNode error: {:?}", label, e);
            Err(anyhow::anyhow!("{} GainNode error: {:?}", label, e))
        }
    }
}

/// Looping walking sound whose gain is owned by the proximity fade controller.
///
/// An oscillator can only be started once, so every `Play` builds a fresh
/// source into the persistent gain node and `Pause` stops and drops it.
pub struct WalkingSound {
    audio_ctx: web::AudioContext,
    gain: web::GainNode,
    source: Option<web::OscillatorNode>,
}

impl WalkingSound {
    pub fn new(audio_ctx: &web::AudioContext) -> anyhow::Result<Self> {
        let master = create_gain(audio_ctx, MASTER_GAIN, "Master")?;
        _ = master.connect_with_audio_node(&audio_ctx.destination());
        // no source is connected until Play, so the configured level is silent until then
        let gain = create_gain(audio_ctx, WALKING_SOUND_VOLUME, "Walking")?;
        _ = gain.connect_with_audio_node(&master);
        Ok(Self {
            audio_ctx: audio_ctx.clone(),
            gain,
            source: None,
        })
    }

    /// Gain the sink is configured to play at; captured once as the nominal gain.
    pub fn configured_volume(&self) -> f32 {
        self.gain.gain().value()
    }

    pub fn is_playing(&self) -> bool {
        self.source.is_some()
    }

    pub fn apply(&mut self, command: AudioCommand) {
        match command {
            AudioCommand::SetGain(v) => self.gain.gain().set_value(v),
            AudioCommand::Play => self.play(),
            AudioCommand::Pause => self.pause(),
        }
    }

    pub fn apply_all(&mut self, commands: impl IntoIterator<Item = AudioCommand>) {
        for cmd in commands {
            self.apply(cmd);
        }
    }

    fn play(&mut self) {
        if self.source.is_some() {
            return;
        }
        if self.audio_ctx.state() == web::AudioContextState::Suspended {
            _ = self.audio_ctx.resume();
        }
        let src = match web::OscillatorNode::new(&self.audio_ctx) {
            Ok(s) => s,
            Err(e) => {
                log::error!("OscillatorNode error: {:?}", e);
                return;
            }
        };
        src.set_type(web::OscillatorType::Triangle);
        src.frequency().set_value(WALKING_SOUND_HZ);
        _ = src.connect_with_audio_node(&self.gain);
        _ = src.start();
        self.source = Some(src);
    }

    fn pause(&mut self) {
        if let Some(src) = self.source.take() {
            _ = src.stop();
            _ = src.disconnect();
        }
    }
}
