//! Lifecycle manager for the celebration page's timer-driven effects.
//!
//! Nothing in this crate touches a browser API. The page is reached through
//! [`Stage`] and time through [`Scheduler`], so the same manager runs in the
//! wasm front-end and, with [`MemoryStage`] and [`TimerQueue`], in host tests.

pub mod card;
pub mod config;
pub mod constants;
pub mod element;
pub mod error;
pub mod manager;
pub mod population;
pub mod scheduler;
pub mod stage;

pub use card::*;
pub use config::*;
pub use element::*;
pub use error::*;
pub use manager::*;
pub use population::*;
pub use scheduler::*;
pub use stage::*;
