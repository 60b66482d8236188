use crate::constants::{is_activation_key, CARD_SELECTOR, REVEAL_BUTTON_ID};
use crate::dom;
use crate::shared;
use crate::style;
use crate::{PageManager, SharedManager};
use effects_core::Tilt;
use web_sys as web;

/// Run `f` against the manager unless it is already borrowed further up the stack.
pub fn with_manager(manager: &SharedManager, f: impl FnOnce(&mut PageManager)) {
    if !shared::try_update(manager, f) {
        log::warn!("[events] manager busy; event dropped");
    }
}

// Click or Enter/Space on the reveal control shows the surprise and starts hearts.
pub fn wire_reveal_button(document: &web::Document, manager: &SharedManager) {
    let Some(button) = document.get_element_by_id(REVEAL_BUTTON_ID) else {
        log::error!("[events] reveal control #{} not found", REVEAL_BUTTON_ID);
        return;
    };

    let m = manager.clone();
    dom::listen(&button, "click", move |_: web::MouseEvent| {
        log::info!("[events] reveal clicked");
        with_manager(&m, |m| m.reveal_surprise());
    });

    let m = manager.clone();
    dom::listen(&button, "keydown", move |ev: web::KeyboardEvent| {
        if is_activation_key(&ev.key()) {
            ev.prevent_default();
            with_manager(&m, |m| m.reveal_surprise());
        }
    });
}

pub fn wire_cards(document: &web::Document, manager: &SharedManager) {
    let cards = dom::element_list(document.query_selector_all(CARD_SELECTOR));
    for (index, card) in cards.into_iter().enumerate() {
        let m = manager.clone();
        dom::listen(&card, "click", move |ev: web::MouseEvent| {
            let pointer = (ev.client_x() as f64, ev.client_y() as f64);
            with_manager(&m, |m| m.press_card(index, Some(pointer)));
        });

        let el = card.clone();
        dom::listen(&card, "mouseenter", move |_: web::MouseEvent| {
            dom::set_style_property(&el, "transform", &style::tilt_transform(&Tilt::resting()));
        });

        let el = card.clone();
        dom::listen(&card, "mouseleave", move |_: web::MouseEvent| {
            dom::set_style_property(&el, "transform", "");
        });

        let el = card.clone();
        dom::listen(&card, "mousemove", move |ev: web::MouseEvent| {
            let tilt = Tilt::follow(&dom::rect_of(&el), ev.client_x() as f64, ev.client_y() as f64);
            dom::set_style_property(&el, "transform", &style::tilt_transform(&tilt));
        });
    }
}

pub fn wire_resize(window: &web::Window, manager: &SharedManager) {
    let m = manager.clone();
    dom::listen(window, "resize", move |_: web::Event| {
        with_manager(&m, |m| m.notify_resize());
    });
}

pub fn wire_unload(window: &web::Window, manager: &SharedManager) {
    let m = manager.clone();
    dom::listen(window, "beforeunload", move |_: web::Event| {
        with_manager(&m, |m| m.teardown());
    });
}
