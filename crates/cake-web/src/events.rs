use crate::audio::Microphone;
use crate::constants::*;
use crate::dom;
use crate::input;
use cake_core::{Camera, ClickOutcome, MicStatus, OrbitControls, Release, Session};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

// Presses over the cake start an orbit drag; one that ends without moving
// past the slop is hit-tested against the lit flames.
pub fn wire_pointer(
    canvas: web::HtmlCanvasElement,
    session: Rc<RefCell<Session>>,
    camera: Rc<RefCell<Camera>>,
    controls: Rc<RefCell<OrbitControls>>,
) {
    let Some(window) = web::window() else {
        return;
    };

    let down = {
        let (canvas, controls) = (canvas.clone(), controls.clone());
        Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            if input::pointer_ndc(&ev, &canvas).is_some_and(input::within_canvas) {
                controls.borrow_mut().press(input::pointer_client(&ev));
            }
        }) as Box<dyn FnMut(_)>)
    };
    let moved = {
        let (canvas, controls) = (canvas.clone(), controls.clone());
        Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let height = canvas.get_bounding_client_rect().height() as f32;
            controls
                .borrow_mut()
                .drag_to(input::pointer_client(&ev), height);
        }) as Box<dyn FnMut(_)>)
    };
    let up = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let height = canvas.get_bounding_client_rect().height() as f32;
        let release = controls
            .borrow_mut()
            .release(input::pointer_client(&ev), height);
        if release != Release::Click || session.borrow().all_out() {
            return;
        }
        let Some(ray) =
            input::pointer_ndc(&ev, &canvas).and_then(|ndc| input::pointer_ray(&camera.borrow(), ndc))
        else {
            return;
        };
        match session.borrow_mut().click(&ray) {
            ClickOutcome::Extinguished { index, won } => {
                log::info!("[input] candle {} clicked out{}", index, if won { " (last)" } else { "" });
            }
            ClickOutcome::Miss | ClickOutcome::Ignored => {}
        }
    }) as Box<dyn FnMut(_)>);

    for (event, closure) in [("pointerdown", down), ("pointermove", moved), ("pointerup", up)] {
        let _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// The microphone button requests permission once; on success the button
/// gives way to the blowing instructions.
pub fn wire_mic_button(
    document: web::Document,
    session: Rc<RefCell<Session>>,
    mic: Rc<RefCell<Option<Microphone>>>,
) {
    let pending = Rc::new(Cell::new(false));
    let doc = document.clone();
    dom::add_click_listener(&document, MIC_BUTTON_ID, move || {
        if pending.get() || session.borrow().mic_status() != MicStatus::Idle {
            return;
        }
        pending.set(true);
        let (doc, session, mic, pending) = (doc.clone(), session.clone(), mic.clone(), pending.clone());
        spawn_local(async move {
            match Microphone::request().await {
                Ok(mut m) => {
                    if session.borrow_mut().mic_granted() {
                        *mic.borrow_mut() = Some(m);
                        dom::add_class(&doc, MIC_BUTTON_ID, &[HIDDEN]);
                        dom::remove_class(&doc, INSTRUCTION_ID, &[HIDDEN]);
                    } else {
                        m.close();
                    }
                }
                Err(e) => {
                    log::error!("[mic] {:?}", e);
                    session.borrow_mut().mic_denied();
                    dom::alert(MIC_DENIED_NOTICE);
                }
            }
            pending.set(false);
        });
    });
}

/// Keep both canvases' backing stores in step with their CSS size.
pub fn wire_resize(canvases: Vec<web::HtmlCanvasElement>) {
    let Some(window) = web::window() else {
        return;
    };
    let closure = Closure::wrap(Box::new(move || {
        for canvas in &canvases {
            dom::sync_canvas_backing_size(canvas);
        }
    }) as Box<dyn FnMut()>);
    let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}
