#![cfg_attr(not(feature = "simulator"), no_std)]

pub mod line;
pub mod relay;

pub use line::{Line, LineReader};
pub use relay::BridgeNode;
