#![cfg_attr(not(feature = "simulator"), no_std)]

pub mod config;
pub mod error;
pub mod hal;
pub mod logging;
pub mod protocol;
pub mod utils;

// 重新导出核心类型
pub use config::{NodeConfig, Pin, RadioSettings};
pub use error::{CapacityError, EncodeError, TransportError};
pub use hal::{AnalogInput, Clock, PacketReceiver, PacketSender, RadioDriver, Transport};
pub use protocol::{Frame, NodeId, PipePair, Role};
pub use utils::{ScratchBuffer, Timer};
