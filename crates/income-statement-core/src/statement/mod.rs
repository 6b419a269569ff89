pub mod details;
pub mod model;
pub mod reconcile;

#[cfg(feature = "analysis")]
pub mod analysis;
