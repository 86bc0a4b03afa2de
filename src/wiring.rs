//! 出厂接线：默认的传感器通道与浇水服务

use core::fmt::Debug;

use embedded_hal::digital::v2::OutputPin;

use common::config::{LIGHT_PIN, TEMP_PIN, WATER_DURATION_MS, WATER_INTERVAL_MS};
use common::error::CapacityError;
use common::hal::AnalogInput;
use common::protocol::{NodeId, SensorKind};
use sensor::transfer::{read_light, read_temperature};
use sensor::{SensorNode, SensorReader, ServiceId, WaterService};

/// 节点 1：温度；节点 2：光照 + 温度
pub fn register_sensors<A: AnalogInput>(node: &mut SensorNode<'_, A>) -> Result<(), CapacityError> {
    let mut reader1 = SensorReader::new();
    reader1.add_sensor(TEMP_PIN, SensorKind::Temperature, read_temperature)?;

    let mut reader2 = SensorReader::new();
    reader2.add_sensor(LIGHT_PIN, SensorKind::Light, read_light)?;
    reader2.add_sensor(TEMP_PIN, SensorKind::Temperature, read_temperature)?;

    let aggregator = node.aggregator_mut();
    aggregator.add_node(NodeId(1), reader1)?;
    aggregator.add_node(NodeId(2), reader2)?;
    Ok(())
}

/// 两路水泵，接 WATER_PIN_1 / WATER_PIN_2
pub fn water_services<P>(pump1: P, pump2: P) -> [(ServiceId, WaterService<P>); 2]
where
    P: OutputPin,
    P::Error: Debug,
{
    [
        (
            ServiceId(1),
            WaterService::new(pump1, WATER_INTERVAL_MS, WATER_DURATION_MS),
        ),
        (
            ServiceId(2),
            WaterService::new(pump2, WATER_INTERVAL_MS, WATER_DURATION_MS),
        ),
    ]
}
