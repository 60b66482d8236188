use crate::constants::{
    CARD_SELECTOR, HEART_CLASS, MESSAGE_LINE_SELECTOR, PARTICLE_CLASS, RIPPLE_STYLE_ID,
};
use crate::style;
use effects_core::constants::HEART_GLYPH;
use effects_core::{ElementKind, Rect, RippleGeometry, Stage, VisualElement};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Attach `handler` for `event` on `target`, for the lifetime of the page.
pub fn listen<E>(target: &web::EventTarget, event: &str, mut handler: impl FnMut(E) + 'static)
where
    E: JsCast + 'static,
{
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            handler(ev);
        }
    }) as Box<dyn FnMut(web::Event)>);
    _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn has_global(window: &web::Window, name: &str) -> bool {
    js_sys::Reflect::has(window, &JsValue::from_str(name)).unwrap_or(false)
}

/// Resolve once the document has finished parsing.
pub async fn document_ready(document: &web::Document) -> anyhow::Result<()> {
    if document.ready_state() != "loading" {
        return Ok(());
    }
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let done = Closure::once_into_js(move || {
            _ = resolve.call0(&JsValue::NULL);
        });
        _ = document.add_event_listener_with_callback("DOMContentLoaded", done.unchecked_ref());
    });
    JsFuture::from(promise)
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(())
}

pub fn element_list(list: Result<web::NodeList, JsValue>) -> Vec<web::Element> {
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|n| n.dyn_into::<web::Element>().ok())
        .collect()
}

pub fn set_style_property(el: &web::Element, name: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<web::HtmlElement>() {
        _ = html.style().set_property(name, value);
    }
}

pub fn rect_of(el: &web::Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.width(), r.height())
}

/// The live document, as the manager's [`Stage`].
pub struct DomStage {
    window: web::Window,
    document: web::Document,
}

impl DomStage {
    pub fn new(window: web::Window, document: web::Document) -> Self {
        Self { window, document }
    }

    fn ensure_ripple_keyframes(&self) {
        if self.document.get_element_by_id(RIPPLE_STYLE_ID).is_some() {
            return;
        }
        let (Ok(style_el), Some(head)) =
            (self.document.create_element("style"), self.document.head())
        else {
            return;
        };
        style_el.set_id(RIPPLE_STYLE_ID);
        style_el.set_text_content(Some(style::RIPPLE_KEYFRAMES));
        _ = head.append_child(&style_el);
    }
}

impl Stage for DomStage {
    type Node = web::Element;

    fn lookup(&self, id: &str) -> Option<web::Element> {
        self.document.get_element_by_id(id)
    }

    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    fn attach_visual(
        &mut self,
        container: &web::Element,
        element: &VisualElement,
    ) -> Option<web::Element> {
        let node = self.document.create_element("div").ok()?;
        match element.kind {
            ElementKind::Ambient => node.set_class_name(PARTICLE_CLASS),
            ElementKind::Heart => {
                node.set_class_name(HEART_CLASS);
                node.set_text_content(Some(HEART_GLYPH));
            }
        }
        node.set_attribute("style", &style::visual_css(element)).ok()?;
        container.append_child(&node).ok()?;
        Some(node)
    }

    fn detach(&mut self, node: &web::Element) {
        if node.parent_node().is_some() {
            node.remove();
        }
    }

    fn add_class(&mut self, node: &web::Element, class: &str) {
        _ = node.class_list().add_1(class);
    }

    fn remove_class(&mut self, node: &web::Element, class: &str) {
        _ = node.class_list().remove_1(class);
    }

    fn scroll_into_center(&mut self, node: &web::Element) {
        let opts = web::ScrollIntoViewOptions::new();
        opts.set_behavior(web::ScrollBehavior::Smooth);
        opts.set_block(web::ScrollLogicalPosition::Center);
        node.scroll_into_view_with_scroll_into_view_options(&opts);
    }

    fn message_lines(&self, section: &web::Element) -> Vec<web::Element> {
        element_list(section.query_selector_all(MESSAGE_LINE_SELECTOR))
    }

    fn reveal_line(&mut self, line: &web::Element) {
        set_style_property(line, "opacity", "1");
        set_style_property(line, "transform", "translateX(0)");
    }

    fn card(&self, index: usize) -> Option<web::Element> {
        element_list(self.document.query_selector_all(CARD_SELECTOR))
            .into_iter()
            .nth(index)
    }

    fn bounding_rect(&self, node: &web::Element) -> Rect {
        rect_of(node)
    }

    fn attach_ripple(
        &mut self,
        host: &web::Element,
        ripple: &RippleGeometry,
    ) -> Option<web::Element> {
        self.ensure_ripple_keyframes();
        let node = self.document.create_element("div").ok()?;
        node.set_attribute("style", &style::ripple_css(ripple)).ok()?;
        set_style_property(host, "position", "relative");
        host.append_child(&node).ok()?;
        Some(node)
    }
}
