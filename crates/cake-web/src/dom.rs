use crate::input::backing_size;
use cake_core::Viewport;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Adapter for `map_err` on calls that fail with a bare `JsValue`.
pub fn js_err(what: &str) -> impl FnOnce(wasm_bindgen::JsValue) -> anyhow::Error + '_ {
    move |e| anyhow::anyhow!("{}: {:?}", what, e)
}

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn element<T: JsCast>(document: &web::Document, id: &str) -> anyhow::Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?
        .dyn_into::<T>()
        .map_err(|e| anyhow::anyhow!("#{} has unexpected type: {:?}", id, e))
}

#[inline]
pub fn add_class(document: &web::Document, id: &str, classes: &[&str]) {
    if let Some(el) = document.get_element_by_id(id) {
        for class in classes {
            let _ = el.class_list().add_1(class);
        }
    }
}

#[inline]
pub fn remove_class(document: &web::Document, id: &str, classes: &[&str]) {
    if let Some(el) = document.get_element_by_id(id) {
        for class in classes {
            let _ = el.class_list().remove_1(class);
        }
    }
}

#[inline]
pub fn set_text(document: &web::Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

/// Window size in CSS pixels.
pub fn window_viewport() -> Viewport {
    let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    match web::window() {
        Some(w) => Viewport {
            width: dim(w.inner_width()),
            height: dim(w.inner_height()),
        },
        None => Viewport {
            width: 0.0,
            height: 0.0,
        },
    }
}

pub fn alert(message: &str) {
    if let Some(w) = web::window() {
        let _ = w.alert_with_message(message);
    }
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Fire-and-forget timeout on the window.
pub fn set_timeout(delay_ms: i32, handler: impl FnOnce() + 'static) {
    let Some(w) = web::window() else {
        return;
    };
    let closure = Closure::once(handler);
    let _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        delay_ms,
    );
    closure.forget();
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let rect = canvas.get_bounding_client_rect();
        let (w_px, h_px) = backing_size(rect.width(), rect.height(), w.device_pixel_ratio());
        canvas.set_width(w_px);
        canvas.set_height(h_px);
    }
}

/// Canvas covering `parent`, appended as its last child.
pub fn append_canvas(
    document: &web::Document,
    parent: &web::Element,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("create canvas: {:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("canvas cast: {:?}", e))?;
    let _ = canvas.set_attribute("style", "display:block;width:100%;height:100%");
    parent
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("append canvas: {:?}", e))?;
    Ok(canvas)
}

pub fn context_2d(
    canvas: &web::HtmlCanvasElement,
) -> anyhow::Result<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!("get_context: {:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow::anyhow!("2d context cast: {:?}", e))
}

/// Fade out the loading screen, then drop it from the document.
pub fn dismiss_loading_screen(document: &web::Document, id: &'static str, fade_ms: i32) {
    if let Some(el) = document.get_element_by_id(id) {
        if let Some(html) = el.dyn_ref::<web::HtmlElement>() {
            let _ = html.style().set_property("opacity", "0");
        }
        set_timeout(fade_ms, move || el.remove());
    }
}
