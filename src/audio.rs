use pano_core::Fade;
use web_sys as web;

struct Track {
    element: web::HtmlAudioElement,
    gain: web::GainNode,
    _source: web::MediaElementAudioSourceNode,
}

/// Looped ambience streamed from media elements, each through its own gain.
pub struct StreamingAudio {
    _ctx: web::AudioContext,
    tracks: Vec<Track>,
}

fn create_track(audio_ctx: &web::AudioContext, path: &str) -> anyhow::Result<Track> {
    let element =
        web::HtmlAudioElement::new_with_src(path).map_err(|e| anyhow::anyhow!("{:?}", e))?;
    element.set_loop(true);
    let source = audio_ctx
        .create_media_element_source(&element)
        .map_err(|e| anyhow::anyhow!("MediaElementSource {}: {:?}", path, e))?;
    let gain = web::GainNode::new(audio_ctx).map_err(|e| anyhow::anyhow!("GainNode: {:?}", e))?;
    gain.gain().set_value(0.0);
    _ = source.connect_with_audio_node(&gain);
    _ = gain.connect_with_audio_node(&audio_ctx.destination());
    Ok(Track {
        element,
        gain,
        _source: source,
    })
}

impl StreamingAudio {
    /// Must run inside a user gesture so the context is allowed to start.
    pub fn start(paths: &[String]) -> anyhow::Result<Self> {
        let audio_ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
        _ = audio_ctx.resume();
        let mut tracks = Vec::with_capacity(paths.len());
        for path in paths {
            match create_track(&audio_ctx, path) {
                Ok(track) => tracks.push(track),
                Err(e) => log::error!("[audio] {}", e),
            }
        }
        for track in &tracks {
            if let Err(e) = track.element.play() {
                log::error!("[audio] play error: {:?}", e);
            }
        }
        log::info!("[audio] streaming {} track(s)", tracks.len());
        Ok(Self {
            _ctx: audio_ctx,
            tracks,
        })
    }

    pub fn set_volume(&self, volume: f32) {
        for track in &self.tracks {
            track.gain.gain().set_value(volume);
        }
    }
}

/// Gain ramp from silence to full volume, stepped by the frame loop.
pub struct AudioFade {
    audio: StreamingAudio,
    fade: Fade,
    done: bool,
}

impl AudioFade {
    pub fn new(audio: StreamingAudio, secs: f64) -> Self {
        Self {
            audio,
            fade: Fade::from_secs(secs),
            done: false,
        }
    }

    pub fn step(&mut self, now_ms: f64) {
        if self.done {
            return;
        }
        self.audio.set_volume(self.fade.progress(now_ms));
        self.done = self.fade.is_complete(now_ms);
    }
}
