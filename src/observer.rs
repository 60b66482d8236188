use crate::constants::{
    ANIMATE_IN_CLASS, ANIMATE_ON_VIEW_SELECTOR, OBSERVER_ROOT_MARGIN, OBSERVER_THRESHOLD,
};
use crate::dom;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Add `animate-in` to each designated element the first time it scrolls
/// into view, then stop watching it.
pub fn observe_animate_in(document: &web::Document) -> anyhow::Result<web::IntersectionObserver> {
    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: web::IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let target = entry.target();
                    _ = target.class_list().add_1(ANIMATE_IN_CLASS);
                    observer.unobserve(&target);
                }
            }
        },
    ) as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

    let init = web::IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(OBSERVER_THRESHOLD));
    init.set_root_margin(OBSERVER_ROOT_MARGIN);
    let observer =
        web::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
            .map_err(|e| anyhow::anyhow!("IntersectionObserver: {:?}", e))?;
    callback.forget();

    let targets = dom::element_list(document.query_selector_all(ANIMATE_ON_VIEW_SELECTOR));
    for el in &targets {
        observer.observe(el);
    }
    log::info!("[observer] watching {} elements", targets.len());
    Ok(observer)
}
