use crate::audio::{BackgroundMusic, Microphone};
use crate::celebrate;
use crate::dom;
use crate::render::{CakeRenderer, OverlayRenderer};
use cake_core::{Camera, OrbitControls, Session, Silence};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub session: Rc<RefCell<Session>>,
    pub camera: Rc<RefCell<Camera>>,
    pub controls: Rc<RefCell<OrbitControls>>,
    pub mic: Rc<RefCell<Option<Microphone>>>,
    pub music: Option<BackgroundMusic>,
    pub document: web::Document,

    pub scene: CakeRenderer,
    pub overlay: OverlayRenderer,

    pub last_instant: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;

        let viewport = dom::window_viewport();
        let cues = {
            let mut session = self.session.borrow_mut();
            let mut mic = self.mic.borrow_mut();
            let report = match mic.as_mut() {
                Some(m) => session.tick(dt, viewport, m),
                None => session.tick(dt, viewport, &mut Silence),
            };
            if report.blowing {
                log::trace!(
                    "[mic] level {:.1}, {} out",
                    report.level.unwrap_or_default(),
                    report.extinguished
                );
            }
            session.drain_cues()
        };
        for cue in &cues {
            celebrate::apply(cue, &self.document, self.music.as_ref(), &self.mic);
        }

        // Orbit speeds are tuned per 60 Hz frame; scale by the real frame time.
        {
            let mut camera = self.camera.borrow_mut();
            camera.aspect = self.scene.aspect();
            self.controls
                .borrow_mut()
                .update(&mut camera, dt.as_secs_f32() * 60.0);
        }

        let session = self.session.borrow();
        self.scene.draw(&self.camera.borrow(), &session);
        let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
        self.overlay.draw(
            session.balloons().particles(),
            session.confetti().pieces(),
            dpr,
        );
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
