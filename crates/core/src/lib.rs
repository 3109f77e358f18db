pub mod administrator;
pub mod agent;
pub mod error;
mod grid;
pub mod layout;
pub mod map;
pub mod observer;
pub mod types;

#[cfg(test)]
mod test_support;

pub use administrator::Administrator;
pub use agent::{Agent, DfsAgent, GreedyHeuristic, RandomAgent, Strategy, WavefrontAgent};
pub use error::{CoverageError, LayoutError, UnknownStrategy};
pub use layout::MapLayout;
pub use map::{Map, MapId};
pub use observer::{EventLog, Observer, ObserverId, ObserverSet, TraceObserver};
pub use types::*;
