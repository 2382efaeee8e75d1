//! Thruster trade-study toolkit.
//!
//! Ranks candidate thrusters for a mission by the total wet mass they imply under the
//! rocket equation, after discarding anything that exceeds the power budget. The logic
//! lives in member crates; this facade re-exports them so front-ends share one import path.

pub use select_config as config;
pub use select_core::{constants, numeric};
pub use select_export as export;
pub use select_propulsion as propulsion;
pub use select_ranking as ranking;

/// Returns the version of the library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
