use crate::card::RippleGeometry;
use crate::config::EffectConfig;
use crate::constants::{CLICKED_CLASS, SHOW_CLASS};
use crate::element::{ElementId, ElementKind, VisualElement};
use crate::error::EffectError;
use crate::population::Population;
use crate::scheduler::{Scheduler, Task, TimerHandle, TimerQueue};
use crate::stage::Stage;
use fnv::FnvHashMap;
use rand::Rng;

struct Reveal<N> {
    section: N,
    lines: Vec<N>,
}

struct Press<N> {
    card: N,
    ripple: Option<N>,
}

/// Owns both element populations and every timer that drives them.
///
/// All mutation happens on the caller's thread, either through the public
/// operations or through [`EffectManager::fire`] when a scheduled [`Task`]
/// comes due. Missing page targets make an operation a logged no-op.
pub struct EffectManager<S: Scheduler, D: Stage, R: Rng> {
    scheduler: S,
    stage: D,
    rng: R,
    config: EffectConfig,
    ambient: Population<D::Node>,
    hearts: Population<D::Node>,
    next_element: u64,
    resize_timer: Option<TimerHandle>,
    reveal: Option<Reveal<D::Node>>,
    presses: FnvHashMap<u64, Press<D::Node>>,
    next_press: u64,
}

impl<S: Scheduler, D: Stage, R: Rng> EffectManager<S, D, R> {
    pub fn new(scheduler: S, stage: D, rng: R, config: EffectConfig) -> Self {
        Self {
            scheduler,
            stage,
            rng,
            config,
            ambient: Population::new(ElementKind::Ambient),
            hearts: Population::new(ElementKind::Heart),
            next_element: 0,
            resize_timer: None,
            reveal: None,
            presses: FnvHashMap::default(),
            next_press: 0,
        }
    }

    /// Start the ambient population. Page wiring (triggers, resize, visibility
    /// observer) belongs to the front-end and is installed before this runs.
    pub fn initialize(&mut self) {
        log::info!("[effects] initializing");
        self.start_population(ElementKind::Ambient);
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn stage(&self) -> &D {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut D {
        &mut self.stage
    }

    pub fn population(&self, kind: ElementKind) -> &Population<D::Node> {
        match kind {
            ElementKind::Ambient => &self.ambient,
            ElementKind::Heart => &self.hearts,
        }
    }

    fn population_mut(&mut self, kind: ElementKind) -> &mut Population<D::Node> {
        match kind {
            ElementKind::Ambient => &mut self.ambient,
            ElementKind::Heart => &mut self.hearts,
        }
    }

    pub fn pending_presses(&self) -> usize {
        self.presses.len()
    }

    /// Show `section`, scroll it into view shortly after, and cascade its
    /// message lines in one by one. A missing section is logged and ignored.
    pub fn trigger_reveal(&mut self, section: Option<D::Node>) {
        let Some(section) = section else {
            log::error!("[reveal] {}", EffectError::missing("reveal section"));
            return;
        };
        self.stage.add_class(&section, SHOW_CLASS);
        let reveal = &self.config.reveal;
        let (scroll_delay, stagger) = (reveal.scroll_delay_ms, reveal.line_stagger_ms);
        self.scheduler.schedule_once(scroll_delay, Task::ScrollToReveal);

        let lines = self.stage.message_lines(&section);
        for index in 0..lines.len() {
            self.scheduler
                .schedule_once(stagger_delay(index, stagger), Task::RevealLine { index });
        }
        log::info!("[reveal] showing section with {} lines", lines.len());
        self.reveal = Some(Reveal { section, lines });
    }

    /// What the reveal control does: reveal the configured section and start
    /// the heart burst.
    pub fn reveal_surprise(&mut self) {
        let section = self.stage.lookup(&self.config.reveal.section_id);
        self.trigger_reveal(section);
        self.start_population(ElementKind::Heart);
    }

    /// Start `kind`'s spawn loop. Returns `false` when it was already running
    /// or its container is missing.
    pub fn start_population(&mut self, kind: ElementKind) -> bool {
        match self.try_start(kind) {
            Ok(true) => {
                log::info!("[{kind}] started");
                true
            }
            Ok(false) => {
                log::debug!("[{kind}] already running; start ignored");
                false
            }
            Err(e) => {
                log::warn!("[{kind}] not started: {e}");
                false
            }
        }
    }

    fn try_start(&mut self, kind: ElementKind) -> Result<bool, EffectError> {
        if self.population(kind).is_running() {
            return Ok(false);
        }
        let params = self.config.population(kind).clone();
        let container = self
            .stage
            .lookup(&params.container_id)
            .ok_or_else(|| EffectError::missing(format!("#{} container", params.container_id)))?;
        let generation = self.population_mut(kind).begin(container);

        for i in 0..params.burst_count {
            self.scheduler.schedule_once(
                stagger_delay(i, params.burst_stagger_ms),
                Task::Spawn { kind, generation },
            );
        }
        let spawn = self
            .scheduler
            .schedule_repeating(params.spawn_period_ms, Task::Spawn { kind, generation });
        let window = params
            .run_window_ms
            .map(|ms| self.scheduler.schedule_once(ms, Task::Expire { kind, generation }));
        self.population_mut(kind).set_timers(spawn, window);
        Ok(true)
    }

    /// Stop spawning `kind`. Elements already on screen finish their animation.
    pub fn stop_population(&mut self, kind: ElementKind) {
        let was_running = self.population(kind).is_running();
        for handle in self.population_mut(kind).halt().into_iter().flatten() {
            self.scheduler.cancel(handle);
        }
        if was_running {
            log::info!("[{kind}] stopped");
        }
    }

    /// Create one element in `container` and schedule its removal.
    pub fn spawn_element(&mut self, kind: ElementKind, container: &D::Node) -> Option<ElementId> {
        match self.try_spawn(kind, container) {
            Ok(id) => Some(id),
            Err(e) => {
                log::warn!("[{kind}] spawn skipped: {e}");
                None
            }
        }
    }

    fn try_spawn(
        &mut self,
        kind: ElementKind,
        container: &D::Node,
    ) -> Result<ElementId, EffectError> {
        let id = ElementId(self.next_element);
        self.next_element += 1;
        let element = VisualElement::sample(
            kind,
            id,
            self.stage.viewport_width(),
            self.scheduler.now_ms(),
            &mut self.rng,
        );
        let node = self
            .stage
            .attach_visual(container, &element)
            .ok_or(EffectError::AttachFailed { kind })?;
        let ttl = element.ttl_ms;
        self.population_mut(kind).track(element, node);
        self.scheduler.schedule_once(ttl, Task::Retire { kind, id });
        Ok(id)
    }

    fn retire(&mut self, kind: ElementKind, id: ElementId) {
        // Already gone when a resize or teardown cleared the population first.
        if let Some(live) = self.population_mut(kind).untrack(id) {
            self.stage.detach(&live.node);
        }
    }

    fn clear(&mut self, kind: ElementKind) -> usize {
        let drained = self.population_mut(kind).drain();
        for live in &drained {
            self.stage.detach(&live.node);
        }
        drained.len()
    }

    /// Viewport size changed; restart the ambient population once the resize
    /// has been quiet for the debounce delay.
    pub fn notify_resize(&mut self) {
        if let Some(handle) = self.resize_timer.take() {
            self.scheduler.cancel(handle);
        }
        let delay = self.config.resize_debounce_ms;
        self.resize_timer = Some(self.scheduler.schedule_once(delay, Task::ResizeSettled));
    }

    /// Drop every ambient element and restart the population from empty.
    /// Positions were sampled against the old width, so they are discarded
    /// rather than rescaled.
    pub fn handle_resize(&mut self) {
        let cleared = self.clear(ElementKind::Ambient);
        self.stop_population(ElementKind::Ambient);
        log::debug!("[ambient] resize cleared {cleared} elements");
        self.start_population(ElementKind::Ambient);
    }

    /// Cancel all timers and remove every tracked node. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        for kind in ElementKind::ALL {
            self.stop_population(kind);
        }
        if let Some(handle) = self.resize_timer.take() {
            self.scheduler.cancel(handle);
        }
        let cleared = self.clear(ElementKind::Ambient) + self.clear(ElementKind::Heart);
        self.reveal = None;
        for (_, press) in self.presses.drain() {
            self.stage.remove_class(&press.card, CLICKED_CLASS);
            if let Some(ripple) = press.ripple {
                self.stage.detach(&ripple);
            }
        }
        log::info!("[effects] teardown removed {cleared} elements");
    }

    /// Mark card `index` as clicked and drop a ripple under the pointer; both
    /// are cleared after the press duration.
    pub fn press_card(&mut self, index: usize, pointer: Option<(f64, f64)>) {
        let Some(card) = self.stage.card(index) else {
            log::warn!("[card] {}", EffectError::missing(format!("card {index}")));
            return;
        };
        let rect = self.stage.bounding_rect(&card);
        let geometry = RippleGeometry::at(&rect, pointer);
        self.stage.add_class(&card, CLICKED_CLASS);
        let ripple = self.stage.attach_ripple(&card, &geometry);

        let press = self.next_press;
        self.next_press += 1;
        self.presses.insert(press, Press { card, ripple });
        let delay = self.config.card_press_ms;
        self.scheduler.schedule_once(delay, Task::SettleCard { press });
    }

    /// Run a task handed back by the scheduler.
    pub fn fire(&mut self, task: Task) {
        match task {
            Task::Spawn { kind, generation } => {
                let pop = self.population(kind);
                if !pop.accepts(generation) {
                    return;
                }
                let container = pop.container().cloned();
                if let Some(container) = container {
                    self.spawn_element(kind, &container);
                }
            }
            Task::Retire { kind, id } => self.retire(kind, id),
            Task::Expire { kind, generation } => {
                if self.population(kind).accepts(generation) {
                    self.stop_population(kind);
                }
            }
            Task::ScrollToReveal => {
                if let Some(reveal) = &self.reveal {
                    self.stage.scroll_into_center(&reveal.section);
                }
            }
            Task::RevealLine { index } => {
                if let Some(line) = self.reveal.as_ref().and_then(|r| r.lines.get(index)) {
                    self.stage.reveal_line(line);
                }
            }
            Task::ResizeSettled => {
                self.resize_timer = None;
                self.handle_resize();
            }
            Task::SettleCard { press } => {
                if let Some(press) = self.presses.remove(&press) {
                    self.stage.remove_class(&press.card, CLICKED_CLASS);
                    if let Some(ripple) = press.ripple {
                        self.stage.detach(&ripple);
                    }
                }
            }
        }
    }
}

impl<D: Stage, R: Rng> EffectManager<TimerQueue, D, R> {
    /// Fire every task due up to `until_ms` on the virtual clock, in order.
    pub fn advance_to(&mut self, until_ms: u64) {
        while let Some(task) = self.scheduler.pop_due(until_ms) {
            self.fire(task);
        }
        self.scheduler.settle(until_ms);
    }

    pub fn advance_by(&mut self, ms: u64) {
        let until = self.scheduler.now() + ms;
        self.advance_to(until);
    }
}

#[inline]
fn stagger_delay(index: usize, stagger_ms: u32) -> u32 {
    u32::try_from(index)
        .unwrap_or(u32::MAX)
        .saturating_mul(stagger_ms)
}
