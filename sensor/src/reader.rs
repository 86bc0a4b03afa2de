use heapless::Vec;

use common::config::Pin;
use common::error::CapacityError;
use common::hal::AnalogInput;
use common::protocol::{Reading, SensorKind};

/// 原始采样值到物理量的换算函数
pub type Transform = fn(u16) -> f32;

/// 一个已注册的传感器通道
#[derive(Clone, Copy)]
pub struct SensorSample {
    pub pin: Pin,
    pub kind: SensorKind,
    pub transform: Transform,
}

/// 固定容量的传感器通道集合，按注册顺序采样
pub struct SensorReader<const N: usize> {
    samples: Vec<SensorSample, N>,
}

impl<const N: usize> Default for SensorReader<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> SensorReader<N> {
    pub const fn new() -> Self {
        Self {
            samples: Vec::new(),
        }
    }

    /// 注册一个通道；超出容量时返回错误，已注册的通道不受影响
    pub fn add_sensor(
        &mut self,
        pin: Pin,
        kind: SensorKind,
        transform: Transform,
    ) -> Result<(), CapacityError> {
        self.samples
            .push(SensorSample {
                pin,
                kind,
                transform,
            })
            .map_err(|_| CapacityError { capacity: N })
    }

    pub fn samples(&self) -> &[SensorSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// 依次采样全部通道
    pub fn read<A: AnalogInput>(&self, adc: &mut A) -> Result<Vec<Reading, N>, A::Error> {
        let mut readings = Vec::new();

        for sample in self.samples.iter() {
            let raw = adc.read_raw(sample.pin)?;
            // 读数与通道一一对应，容量相同
            let _ = readings.push(Reading {
                kind: sample.kind,
                value: (sample.transform)(raw),
            });
        }

        Ok(readings)
    }
}
