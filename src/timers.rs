use effects_core::{Scheduler, Task, TimerHandle};
use fnv::FnvHashMap;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Receives tasks when their browser timer fires.
pub type Dispatch = Rc<dyn Fn(Task)>;

struct Interval {
    js_id: i32,
    _closure: Closure<dyn FnMut()>,
}

/// `setTimeout`/`setInterval` behind the core `Scheduler` trait.
pub struct BrowserTimers {
    window: web::Window,
    dispatch: Dispatch,
    next_handle: u64,
    // one-shot closures free themselves after running; the map only keeps
    // what `clearTimeout` needs and is pruned by the callback
    timeouts: Rc<RefCell<FnvHashMap<TimerHandle, i32>>>,
    intervals: FnvHashMap<TimerHandle, Interval>,
}

impl BrowserTimers {
    pub fn new(window: web::Window, dispatch: Dispatch) -> Self {
        Self {
            window,
            dispatch,
            next_handle: 0,
            timeouts: Rc::new(RefCell::new(FnvHashMap::default())),
            intervals: FnvHashMap::default(),
        }
    }

    fn next(&mut self) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }
}

impl Scheduler for BrowserTimers {
    fn now_ms(&self) -> f64 {
        instant::now()
    }

    fn schedule_once(&mut self, delay_ms: u32, task: Task) -> TimerHandle {
        let handle = self.next();
        let dispatch = self.dispatch.clone();
        let timeouts = self.timeouts.clone();
        let callback = Closure::once_into_js(move || {
            timeouts.borrow_mut().remove(&handle);
            dispatch(task);
        });
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                delay_ms.min(i32::MAX as u32) as i32,
            ) {
            Ok(js_id) => {
                self.timeouts.borrow_mut().insert(handle, js_id);
            }
            Err(e) => log::error!("[timers] setTimeout failed: {:?}", e),
        }
        handle
    }

    fn schedule_repeating(&mut self, period_ms: u32, task: Task) -> TimerHandle {
        let handle = self.next();
        let dispatch = self.dispatch.clone();
        let closure = Closure::wrap(Box::new(move || dispatch(task.clone())) as Box<dyn FnMut()>);
        match self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                period_ms.min(i32::MAX as u32) as i32,
            ) {
            Ok(js_id) => {
                self.intervals.insert(
                    handle,
                    Interval {
                        js_id,
                        _closure: closure,
                    },
                );
            }
            Err(e) => log::error!("[timers] setInterval failed: {:?}", e),
        }
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(js_id) = self.timeouts.borrow_mut().remove(&handle) {
            self.window.clear_timeout_with_handle(js_id);
        }
        // repeating tasks never cancel their own interval, so the closure is
        // not running when it drops here
        if let Some(interval) = self.intervals.remove(&handle) {
            self.window.clear_interval_with_handle(interval.js_id);
        }
    }
}
