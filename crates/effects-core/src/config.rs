//! Tunable parameters for the lifecycle manager.
//!
//! Defaults reproduce the page's stock behavior; tests shrink or stretch them
//! freely since nothing in the manager hard-codes a timing.

use crate::constants::*;
use crate::element::ElementKind;

/// Spawn schedule for one population.
#[derive(Clone, Debug, PartialEq)]
pub struct PopulationParams {
    /// DOM id of the container elements are attached to.
    pub container_id: String,
    /// Number of elements in the initial burst.
    pub burst_count: usize,
    /// Delay between consecutive burst spawns; burst element `i` fires at `i * stagger`.
    pub burst_stagger_ms: u32,
    /// Period of the repeating spawn tick.
    pub spawn_period_ms: u32,
    /// When set, the population stops itself this long after starting.
    pub run_window_ms: Option<u32>,
}

impl PopulationParams {
    pub fn ambient() -> Self {
        Self {
            container_id: AMBIENT_CONTAINER_ID.to_string(),
            burst_count: AMBIENT_BURST_COUNT,
            burst_stagger_ms: AMBIENT_BURST_STAGGER_MS,
            spawn_period_ms: AMBIENT_SPAWN_PERIOD_MS,
            run_window_ms: None,
        }
    }

    pub fn hearts() -> Self {
        Self {
            container_id: HEART_CONTAINER_ID.to_string(),
            burst_count: HEART_BURST_COUNT,
            burst_stagger_ms: HEART_BURST_STAGGER_MS,
            spawn_period_ms: HEART_SPAWN_PERIOD_MS,
            run_window_ms: Some(HEART_RUN_WINDOW_MS),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RevealParams {
    pub section_id: String,
    pub scroll_delay_ms: u32,
    pub line_stagger_ms: u32,
}

impl Default for RevealParams {
    fn default() -> Self {
        Self {
            section_id: REVEAL_SECTION_ID.to_string(),
            scroll_delay_ms: REVEAL_SCROLL_DELAY_MS,
            line_stagger_ms: REVEAL_LINE_STAGGER_MS,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EffectConfig {
    pub ambient: PopulationParams,
    pub hearts: PopulationParams,
    pub reveal: RevealParams,
    pub resize_debounce_ms: u32,
    pub card_press_ms: u32,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            ambient: PopulationParams::ambient(),
            hearts: PopulationParams::hearts(),
            reveal: RevealParams::default(),
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
            card_press_ms: CARD_PRESS_MS,
        }
    }
}

impl EffectConfig {
    pub fn population(&self, kind: ElementKind) -> &PopulationParams {
        match kind {
            ElementKind::Ambient => &self.ambient,
            ElementKind::Heart => &self.hearts,
        }
    }
}
