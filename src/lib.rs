#![cfg(target_arch = "wasm32")]
use effects_core::{EffectConfig, EffectManager, ElementKind, Task};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod observer;
mod shared;
mod style;
mod timers;

use dom::DomStage;
use timers::BrowserTimers;

pub(crate) type PageManager = EffectManager<BrowserTimers, DomStage, StdRng>;
pub(crate) type SharedManager = Rc<RefCell<PageManager>>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("page-effects loaded");
    Ok(())
}

/// Wait for the document, then mount the effects. The returned handle is the
/// only reference the page gets; keep it to reveal or tear down later.
#[wasm_bindgen]
pub async fn boot() -> Result<PageEffects, JsValue> {
    mount()
        .await
        .map_err(|e| JsValue::from_str(&format!("{:?}", e)))
}

async fn mount() -> anyhow::Result<PageEffects> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    dom::document_ready(&document).await?;

    let missing: Vec<&str> = constants::REQUIRED_GLOBALS
        .into_iter()
        .filter(|name| !dom::has_global(&window, name))
        .collect();
    if !missing.is_empty() {
        log::warn!("[boot] missing {:?}; running without effects", missing);
        if let Some(body) = document.body() {
            _ = body.class_list().add_1(constants::LEGACY_BROWSER_CLASS);
        }
        return Ok(PageEffects { manager: None });
    }

    let manager: SharedManager = Rc::new_cyclic(|weak: &Weak<RefCell<PageManager>>| {
        let weak = weak.clone();
        let dispatch: timers::Dispatch = Rc::new(move |task: Task| {
            if let Some(m) = weak.upgrade() {
                events::with_manager(&m, |m| m.fire(task));
            }
        });
        RefCell::new(EffectManager::new(
            BrowserTimers::new(window.clone(), dispatch),
            DomStage::new(window.clone(), document.clone()),
            StdRng::from_entropy(),
            EffectConfig::default(),
        ))
    });

    events::wire_reveal_button(&document, &manager);
    events::wire_cards(&document, &manager);
    events::wire_resize(&window, &manager);
    events::wire_unload(&window, &manager);
    if let Err(e) = observer::observe_animate_in(&document) {
        log::warn!("[boot] visibility observer unavailable: {:?}", e);
    }

    manager.borrow_mut().initialize();
    log::info!("[boot] effects mounted");
    Ok(PageEffects {
        manager: Some(manager),
    })
}

/// Handle to the mounted effects, owned by the host page.
#[wasm_bindgen]
pub struct PageEffects {
    manager: Option<SharedManager>,
}

#[wasm_bindgen]
impl PageEffects {
    /// False when the browser lacked a required capability at boot.
    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.manager.is_some()
    }

    pub fn reveal(&self) {
        self.with(|m| m.reveal_surprise());
    }

    pub fn teardown(&self) {
        self.with(|m| m.teardown());
    }

    #[wasm_bindgen(js_name = ambientCount)]
    pub fn ambient_count(&self) -> usize {
        self.live(ElementKind::Ambient)
    }

    #[wasm_bindgen(js_name = heartCount)]
    pub fn heart_count(&self) -> usize {
        self.live(ElementKind::Heart)
    }

    #[wasm_bindgen(js_name = heartsRunning)]
    pub fn hearts_running(&self) -> bool {
        self.manager.as_ref().is_some_and(|m| {
            shared::read_or(m, false, |m| {
                m.population(ElementKind::Heart).is_running()
            })
        })
    }
}

impl PageEffects {
    fn with(&self, f: impl FnOnce(&mut PageManager)) {
        if let Some(m) = &self.manager {
            events::with_manager(m, f);
        }
    }

    fn live(&self, kind: ElementKind) -> usize {
        self.manager
            .as_ref()
            .map_or(0, |m| shared::read_or(m, 0, |m| m.population(kind).live_count()))
    }
}
