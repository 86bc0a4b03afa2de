#![cfg_attr(not(feature = "simulator"), no_std)]

pub mod aggregator;
pub mod node;
pub mod reader;
pub mod services;
pub mod transfer;

pub use aggregator::{SendError, SensorAggregator};
pub use node::{CycleSummary, SensorNode};
pub use reader::{SensorReader, SensorSample, Transform};
pub use services::{
    CommandStats, Service, ServiceCommand, ServiceId, ServiceManager, ServicesHandler,
    WaterService, WaterState,
};
