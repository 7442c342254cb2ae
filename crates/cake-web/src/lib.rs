#![cfg(target_arch = "wasm32")]
mod audio;
mod celebrate;
mod config;
mod constants;
mod dom;
mod events;
mod frame;
mod guestbook;
mod input;
mod render;

use crate::audio::BackgroundMusic;
use crate::constants::*;
use crate::render::{CakeRenderer, OverlayRenderer};
use cake_core::{Camera, OrbitControls, SceneLayout, Session};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("cake-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    // Every visit starts at the cake.
    if let Ok(history) = window.history() {
        let _ = history.set_scroll_restoration(web::ScrollRestoration::Manual);
    }
    window.scroll_to_with_x_and_y(0.0, 0.0);

    let container: web::Element = dom::element(&document, CANVAS_CONTAINER_ID)?;
    let page = config::page_config(|name| container.get_attribute(name));
    let seed = page
        .seed
        .unwrap_or_else(|| (js_sys::Math::random() * u32::MAX as f64) as u64);

    // Procedural scene: the cake is drawn directly, so it is ready at once.
    let layout = SceneLayout::default();
    let session = Rc::new(RefCell::new(Session::new(page.params, layout, seed)?));

    let scene_canvas = dom::append_canvas(&document, &container)?;
    dom::sync_canvas_backing_size(&scene_canvas);
    let scene = CakeRenderer::new(scene_canvas.clone(), dom::context_2d(&scene_canvas)?);
    let camera = Rc::new(RefCell::new(Camera::framing(
        layout.reference_size,
        scene.aspect(),
    )));

    let overlay_parent: web::Element = dom::element(&document, BALLOON_OVERLAY_ID)?;
    let overlay_canvas = dom::append_canvas(&document, &overlay_parent)?;
    dom::sync_canvas_backing_size(&overlay_canvas);
    let overlay = OverlayRenderer::new(overlay_canvas.clone(), dom::context_2d(&overlay_canvas)?);

    let music = dom::element::<web::HtmlAudioElement>(&document, MUSIC_ID)
        .map(BackgroundMusic::new)
        .map_err(|e| log::warn!("[music] {}", e))
        .ok();
    if let Some(m) = &music {
        m.autoplay();
    }

    let mic = Rc::new(RefCell::new(None));
    let controls = Rc::new(RefCell::new(OrbitControls::new()));
    events::wire_pointer(
        scene_canvas.clone(),
        session.clone(),
        camera.clone(),
        controls.clone(),
    );
    events::wire_mic_button(document.clone(), session.clone(), mic.clone());
    events::wire_resize(vec![scene_canvas, overlay_canvas]);
    guestbook::init(&document);

    dom::set_timeout(LOADING_FADE_DELAY_MS, {
        let document = document.clone();
        move || dom::dismiss_loading_screen(&document, LOADING_ID, LOADING_REMOVE_DELAY_MS)
    });

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        session,
        camera,
        controls,
        mic,
        music,
        document,
        scene,
        overlay,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    log::info!("cake ready (seed {})", seed);
    Ok(())
}
