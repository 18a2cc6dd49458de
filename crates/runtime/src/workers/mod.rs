//! Worker tasks that run beside the decision path.
//!
//! The decision path is synchronous and never waits on the network; anything
//! slow (currently only the feature status check) runs here on tokio and
//! publishes its result through shared atomics.

mod feature_status;

pub use feature_status::{
    FeatureGate, FeatureStatusWorker, HttpStatusEndpoint, MIN_REFRESH_INTERVAL, StatusEndpoint,
    parse_status,
};
