use crate::audio::{BackgroundMusic, Microphone};
use crate::constants::*;
use crate::dom;
use cake_core::Cue;
use std::cell::RefCell;
use web_sys as web;

/// Carry out one celebration cue on the page.
pub fn apply(
    cue: &Cue,
    document: &web::Document,
    music: Option<&BackgroundMusic>,
    mic: &RefCell<Option<Microphone>>,
) {
    log::debug!("[celebration] {:?}", cue);
    match cue {
        Cue::ReleaseMicrophone => {
            if let Some(m) = mic.borrow_mut().as_mut() {
                m.close();
            }
        }
        Cue::ShowMessage(text) => dom::set_text(document, INSTRUCTION_ID, text),
        Cue::StartMusic => match music {
            Some(m) => m.play(),
            None => log::info!("[music] no #{} element", MUSIC_ID),
        },
        Cue::UnlockScroll => {
            if let Some(body) = document.body() {
                let _ = body.class_list().remove_1(SCROLL_LOCK);
            }
        }
        Cue::RevealContent => reveal(document),
    }
}

fn reveal(document: &web::Document) {
    dom::remove_class(document, CONTENT_ID, &[FADED, INERT]);
    dom::add_class(document, CONTENT_ID, &[INTERACTIVE]);
    dom::remove_class(document, NUMBERS_ID, &[FADED, SLID_DOWN]);
    dom::remove_class(document, NAV_ID, &[FADED, INERT]);
    dom::add_class(document, CONTROLS_ID, &[FADED, INERT]);

    if let Some(gallery) = document.get_element_by_id(GALLERY_ID) {
        let opts = web::ScrollIntoViewOptions::new();
        opts.set_behavior(web::ScrollBehavior::Smooth);
        gallery.scroll_into_view_with_scroll_into_view_options(&opts);
    }
}
