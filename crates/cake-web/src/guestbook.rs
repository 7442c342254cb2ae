// Guestbook form and wish bubbles.

use crate::config::{guestbook_config, GuestbookConfig};
use crate::constants::*;
use crate::dom::{self, js_err};
use cake_core::guestbook::{parse_proxy_reply, BubbleStyle, Wish, WishCache, WishDraft};
use cake_core::GuestbookError;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub struct Guestbook {
    document: web::Document,
    config: GuestbookConfig,
    storage: Option<web::Storage>,
    busy: Cell<bool>,
}

/// Render the stored wishes and wire the form, when the page has one.
pub fn init(document: &web::Document) {
    let form = document
        .query_selector(WISH_FORM_SELECTOR)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web::HtmlFormElement>().ok());
    let config = guestbook_config(|name| form.as_ref().and_then(|f| f.get_attribute(name)));
    let storage = web::window().and_then(|w| w.local_storage().ok().flatten());
    if storage.is_none() {
        log::warn!("[guestbook] localStorage unavailable; wishes will not be cached");
    }
    let book = Rc::new(Guestbook {
        document: document.clone(),
        config,
        storage,
        busy: Cell::new(false),
    });

    book.clone().show_initial();
    if let Some(form) = form {
        wire_submit(&form, book);
    }
}

impl Guestbook {
    fn load_cache(&self) -> WishCache {
        let raw = self
            .storage
            .as_ref()
            .and_then(|s| s.get_item(&self.config.cache_key).ok().flatten());
        WishCache::decode(raw.as_deref()).unwrap_or_else(|e| {
            log::warn!("[guestbook] {}", e);
            WishCache::default()
        })
    }

    fn show_initial(self: Rc<Self>) {
        let Some(url) = self.config.wishes_url.clone() else {
            self.render(self.load_cache().wishes());
            return;
        };
        spawn_local(async move {
            match fetch_wishes(&url).await {
                Ok(wishes) => self.render(&wishes),
                Err(e) => {
                    log::warn!("[guestbook] {:?}; showing cached wishes", e);
                    self.render(self.load_cache().wishes());
                }
            }
        });
    }

    fn render(&self, wishes: &[Wish]) {
        let Some(container) = self.document.get_element_by_id(WISHES_CONTAINER_ID) else {
            return;
        };
        if wishes.is_empty() {
            dom::remove_class(&self.document, NO_WISHES_ID, &[HIDDEN]);
            return;
        }
        dom::add_class(&self.document, NO_WISHES_ID, &[HIDDEN]);
        container.set_text_content(None);
        let mut rng = rand::thread_rng();
        for wish in wishes {
            let appended = self
                .bubble(wish, BubbleStyle::pick(&mut rng))
                .and_then(|b| container.append_child(&b));
            if let Err(e) = appended {
                log::error!("[guestbook] bubble: {:?}", e);
            }
        }
    }

    fn bubble(&self, wish: &Wish, style: BubbleStyle) -> Result<web::Element, JsValue> {
        let doc = &self.document;
        let bubble = doc.create_element("div")?;
        bubble.set_class_name(&format!("{} {}", BUBBLE_CLASS, style.palette));
        bubble.set_attribute(
            "style",
            &format!("transform: rotate({:.2}deg)", style.rotation_deg),
        )?;

        let message = doc.create_element("p")?;
        message.set_class_name(BUBBLE_MESSAGE_CLASS);
        message.set_text_content(Some(&format!("\"{}\"", wish.message)));
        let sender = doc.create_element("p")?;
        sender.set_class_name(BUBBLE_SENDER_CLASS);
        sender.set_text_content(Some(&format!("- {}", wish.sender())));

        bubble.append_child(&message)?;
        bubble.append_child(&sender)?;
        Ok(bubble)
    }

    fn set_busy(&self, busy: bool) {
        self.busy.set(busy);
        if let Ok(button) = dom::element::<web::HtmlButtonElement>(&self.document, SAVE_WISH_ID) {
            button.set_disabled(busy);
            button.set_text_content(Some(if busy { SAVE_BUSY_LABEL } else { SAVE_LABEL }));
        }
    }

    /// POST the draft; resolves to the reply's HTTP status.
    async fn post(&self, draft: &WishDraft) -> anyhow::Result<u16> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let params = web::UrlSearchParams::new().map_err(js_err("URLSearchParams"))?;
        for (key, value) in draft.form_fields() {
            params.append(key, value);
        }
        let headers = web::Headers::new().map_err(js_err("Headers"))?;
        headers
            .set("Content-Type", "application/x-www-form-urlencoded")
            .map_err(js_err("Content-Type"))?;
        let body: JsValue = params.to_string().into();
        let init = web::RequestInit::new();
        init.set_method("POST");
        init.set_headers(&headers);
        init.set_body(&body);
        let request = web::Request::new_with_str_and_init(&self.config.endpoint, &init)
            .map_err(js_err("Request"))?;
        let response: web::Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_err("fetch"))?
            .dyn_into()
            .map_err(js_err("Response cast"))?;
        Ok(response.status())
    }

    /// Record `draft` if the backend answered `status` 2xx.
    fn settle(&self, draft: WishDraft, status: u16) -> Result<(), GuestbookError> {
        let mut cache = self.load_cache();
        let timestamp = String::from(js_sys::Date::new_0().to_iso_string());
        cache.settle(draft, status, timestamp)?;
        match (cache.encode(), &self.storage) {
            (Ok(json), Some(storage)) => {
                if let Err(e) = storage.set_item(&self.config.cache_key, &json) {
                    log::warn!("[guestbook] cache write failed: {:?}", e);
                }
            }
            (Err(e), _) => log::error!("[guestbook] {}", e),
            (Ok(_), None) => {}
        }
        self.render(cache.wishes());
        Ok(())
    }
}

async fn fetch_wishes(url: &str) -> anyhow::Result<Vec<Wish>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let response: web::Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(js_err("fetch"))?
        .dyn_into()
        .map_err(js_err("Response cast"))?;
    let status = response.status();
    let text = JsFuture::from(response.text().map_err(js_err("body"))?)
        .await
        .map_err(js_err("body"))?
        .as_string()
        .unwrap_or_default();
    Ok(parse_proxy_reply(status, &text)?)
}

fn field_value(document: &web::Document, id: &str) -> String {
    if let Ok(area) = dom::element::<web::HtmlTextAreaElement>(document, id) {
        return area.value();
    }
    dom::element::<web::HtmlInputElement>(document, id)
        .map(|input| input.value())
        .unwrap_or_default()
}

fn clear_field(document: &web::Document, id: &str) {
    if let Ok(area) = dom::element::<web::HtmlTextAreaElement>(document, id) {
        area.set_value("");
    } else if let Ok(input) = dom::element::<web::HtmlInputElement>(document, id) {
        input.set_value("");
    }
}

fn wire_submit(form: &web::HtmlFormElement, book: Rc<Guestbook>) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        ev.prevent_default();
        if book.busy.get() {
            return;
        }
        let doc = &book.document;
        let draft = match WishDraft::new(
            &field_value(doc, NAME_INPUT_ID),
            &field_value(doc, WISH_INPUT_ID),
        ) {
            Ok(d) => d,
            Err(_) => {
                dom::alert(WISH_MISSING_FIELDS);
                return;
            }
        };
        let book = book.clone();
        spawn_local(async move {
            book.set_busy(true);
            let sender = draft.name().to_string();
            let sent = match book.post(&draft).await {
                Ok(status) => book.settle(draft, status).map_err(anyhow::Error::from),
                Err(e) => Err(e),
            };
            match sent {
                Ok(()) => {
                    log::info!("[guestbook] wish from {} sent", sender);
                    clear_field(&book.document, WISH_INPUT_ID);
                    clear_field(&book.document, NAME_INPUT_ID);
                    dom::alert(WISH_SENT);
                }
                Err(e) => {
                    log::error!("[guestbook] submit failed: {:?}", e);
                    dom::alert(WISH_FAILED);
                }
            }
            book.set_busy(false);
        });
    }) as Box<dyn FnMut(_)>);
    let _ = form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref());
    closure.forget();
}
