use crate::constants::{ANALYSER_FFT_SIZE, MUSIC_VOLUME};
use crate::dom::js_err;
use cake_core::{average_energy, AudioLevelSource};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Live microphone capture feeding a byte-spectrum analyser.
pub struct Microphone {
    ctx: web::AudioContext,
    analyser: web::AnalyserNode,
    stream: web::MediaStream,
    bins: Vec<u8>,
    closed: bool,
}

impl Microphone {
    /// Ask for microphone permission and build the capture graph.
    pub async fn request() -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let devices = window
            .navigator()
            .media_devices()
            .map_err(js_err("mediaDevices"))?;
        let constraints = web::MediaStreamConstraints::new();
        constraints.set_audio(&JsValue::TRUE);
        constraints.set_video(&JsValue::FALSE);
        let promise = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(js_err("getUserMedia"))?;
        let stream: web::MediaStream = JsFuture::from(promise)
            .await
            .map_err(js_err("microphone permission"))?
            .dyn_into()
            .map_err(js_err("MediaStream cast"))?;

        let ctx = web::AudioContext::new().map_err(js_err("AudioContext"))?;
        let analyser = ctx.create_analyser().map_err(js_err("AnalyserNode"))?;
        analyser.set_fft_size(ANALYSER_FFT_SIZE);
        let source = ctx
            .create_media_stream_source(&stream)
            .map_err(js_err("MediaStreamSource"))?;
        source
            .connect_with_audio_node(&analyser)
            .map_err(js_err("connect analyser"))?;
        let bins = vec![0u8; analyser.frequency_bin_count() as usize];
        log::info!("[mic] analyser ready ({} bins)", bins.len());
        Ok(Self {
            ctx,
            analyser,
            stream,
            bins,
            closed: false,
        })
    }

    /// Stop the capture tracks and close the audio context.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        for track in self.stream.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<web::MediaStreamTrack>() {
                track.stop();
            }
        }
        if let Err(e) = self.ctx.close() {
            log::warn!("[mic] close failed: {:?}", e);
        }
        log::info!("[mic] released");
    }
}

impl AudioLevelSource for Microphone {
    fn sample(&mut self) -> f32 {
        if self.closed {
            return 0.0;
        }
        self.analyser.get_byte_frequency_data(&mut self.bins);
        average_energy(&self.bins)
    }
}

/// The page's `<audio>` element, played best-effort.
#[derive(Clone)]
pub struct BackgroundMusic {
    audio: web::HtmlAudioElement,
}

impl BackgroundMusic {
    pub fn new(audio: web::HtmlAudioElement) -> Self {
        audio.set_volume(MUSIC_VOLUME);
        Self { audio }
    }

    /// Try to start playback now; a blocked autoplay retries on the first
    /// click or touch anywhere on the page.
    pub fn autoplay(&self) {
        let music = self.clone();
        self.play_then(move |e| {
            log::info!("[music] autoplay blocked ({:?}); waiting for interaction", e);
            music.play_on_first_interaction();
        });
    }

    /// Start playback, logging any failure.
    pub fn play(&self) {
        self.play_then(|e| log::info!("[music] play failed: {:?}", e));
    }

    fn play_then(&self, on_error: impl FnOnce(JsValue) + 'static) {
        match self.audio.play() {
            Ok(promise) => spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    on_error(e);
                }
            }),
            Err(e) => on_error(e),
        }
    }

    fn play_on_first_interaction(&self) {
        let Some(document) = crate::dom::window_document() else {
            return;
        };
        let fired = Rc::new(Cell::new(false));
        for event in ["click", "touchstart"] {
            let music = self.clone();
            let fired = fired.clone();
            let closure = Closure::wrap(Box::new(move || {
                if fired.replace(true) {
                    return;
                }
                music.play();
            }) as Box<dyn FnMut()>);
            let opts = web::AddEventListenerOptions::new();
            opts.set_once(true);
            let _ = document.add_event_listener_with_callback_and_add_event_listener_options(
                event,
                closure.as_ref().unchecked_ref(),
                &opts,
            );
            closure.forget();
        }
    }
}
