use heapless::Vec;
use serde::{Deserialize, Serialize};

use crate::config::MAX_SENSORS_PER_NODE;
use crate::error::EncodeError;
use crate::protocol::NodeId;

/// 传感器类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "lowercase")]
pub enum SensorKind {
    Temperature,
    Light,
}

/// 单个通道的读数（已换算为物理单位）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    #[serde(rename = "type")]
    pub kind: SensorKind,
    pub value: f32,
}

/// 一个逻辑节点的全部读数，作为一个数据包发往网桥。
///
/// 线上格式为 JSON，例如 `{"id":2,"sensors":[{"type":"light","value":58.6}]}`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReport<const N: usize = MAX_SENSORS_PER_NODE> {
    pub id: NodeId,
    pub sensors: Vec<Reading, N>,
}

impl<const N: usize> SensorReport<N> {
    pub fn new(id: NodeId, sensors: Vec<Reading, N>) -> Self {
        Self { id, sensors }
    }

    /// 编码到调用方提供的缓冲区，返回写入长度
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, EncodeError> {
        serde_json_core::to_slice(self, buffer).map_err(|_| EncodeError::Overflow {
            capacity: buffer.len(),
        })
    }

    /// 解析网桥收到的数据包负载
    pub fn decode(payload: &[u8]) -> Option<Self> {
        serde_json_core::from_slice(payload)
            .ok()
            .map(|(report, _)| report)
    }
}
