pub mod client;
pub mod timings;

pub use client::ClientConfig;
pub use timings::{AnimationTimings, RoundTimings, SessionTimings};
