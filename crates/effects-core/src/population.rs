use crate::element::{ElementId, ElementKind, VisualElement};
use crate::scheduler::TimerHandle;
use fnv::FnvHashMap;

/// A live element together with the page node rendering it.
#[derive(Clone, Debug)]
pub struct Live<N> {
    pub element: VisualElement,
    pub node: N,
}

/// Bookkeeping for one kind of element: what is on screen, whether the spawn
/// loop runs, and the timers driving it.
///
/// Each run gets a fresh generation. Tasks scheduled under an older generation
/// are ignored, so a stop never has to hunt down its one-shot timers.
#[derive(Debug)]
pub struct Population<N> {
    kind: ElementKind,
    live: FnvHashMap<ElementId, Live<N>>,
    running: bool,
    generation: u64,
    container: Option<N>,
    spawn_timer: Option<TimerHandle>,
    window_timer: Option<TimerHandle>,
    spawned_total: u64,
}

impl<N: Clone> Population<N> {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            live: FnvHashMap::default(),
            running: false,
            generation: 0,
            container: None,
            spawn_timer: None,
            window_timer: None,
            spawned_total: 0,
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn spawned_total(&self) -> u64 {
        self.spawned_total
    }

    pub fn spawn_timer(&self) -> Option<TimerHandle> {
        self.spawn_timer
    }

    pub fn window_timer(&self) -> Option<TimerHandle> {
        self.window_timer
    }

    pub fn container(&self) -> Option<&N> {
        self.container.as_ref()
    }

    pub fn get(&self, id: ElementId) -> Option<&Live<N>> {
        self.live.get(&id)
    }

    pub fn elements(&self) -> impl Iterator<Item = &VisualElement> {
        self.live.values().map(|l| &l.element)
    }

    /// True when a task scheduled under `generation` should still act.
    pub fn accepts(&self, generation: u64) -> bool {
        self.running && self.generation == generation
    }

    /// Enter the running state against `container`; returns the new generation.
    pub(crate) fn begin(&mut self, container: N) -> u64 {
        self.running = true;
        self.container = Some(container);
        self.generation
    }

    pub(crate) fn set_timers(&mut self, spawn: TimerHandle, window: Option<TimerHandle>) {
        self.spawn_timer = Some(spawn);
        self.window_timer = window;
    }

    /// Leave the running state. Returns the timers the caller must cancel.
    pub(crate) fn halt(&mut self) -> [Option<TimerHandle>; 2] {
        self.running = false;
        self.generation += 1;
        [self.spawn_timer.take(), self.window_timer.take()]
    }

    pub(crate) fn track(&mut self, element: VisualElement, node: N) {
        self.spawned_total += 1;
        self.live.insert(element.id, Live { element, node });
    }

    pub(crate) fn untrack(&mut self, id: ElementId) -> Option<Live<N>> {
        self.live.remove(&id)
    }

    /// Take every live element out of the collection.
    pub(crate) fn drain(&mut self) -> Vec<Live<N>> {
        let mut all: Vec<_> = self.live.drain().map(|(_, l)| l).collect();
        all.sort_by_key(|l| l.element.id);
        all
    }
}
