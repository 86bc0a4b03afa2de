use core::fmt;

use heapless::Vec;

use common::error::{CapacityError, EncodeError, TransportError};
use common::hal::{AnalogInput, PacketSender};
use common::logging::debug;
use common::protocol::{NodeId, SensorReport};
use common::utils::ScratchBuffer;

use crate::reader::SensorReader;

/// 单个节点数据发送失败的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SendError {
    /// 下标超出已注册节点数
    NoSuchNode(usize),
    /// 采样失败
    Sensor,
    /// 编码结果放不进共享缓冲区
    Encode(EncodeError),
    /// 传输层拒绝或发送失败
    Transport(TransportError),
}

impl From<EncodeError> for SendError {
    fn from(err: EncodeError) -> Self {
        SendError::Encode(err)
    }
}

impl From<TransportError> for SendError {
    fn from(err: TransportError) -> Self {
        SendError::Transport(err)
    }
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendError::NoSuchNode(index) => write!(f, "no node at index {}", index),
            SendError::Sensor => f.write_str("sensor read failed"),
            SendError::Encode(err) => write!(f, "{}", err),
            SendError::Transport(err) => write!(f, "{}", err),
        }
    }
}

/// 逻辑传感器节点集合。
///
/// 每个节点的全部读数打包成一个数据包，数据包数量只与节点数成正比。
/// 注册顺序即发送顺序；重复的编号会保留两条记录，按编号查找时以最后注册者为准。
pub struct SensorAggregator<const NODES: usize, const SENSORS: usize> {
    nodes: Vec<(NodeId, SensorReader<SENSORS>), NODES>,
}

impl<const NODES: usize, const SENSORS: usize> Default for SensorAggregator<NODES, SENSORS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const NODES: usize, const SENSORS: usize> SensorAggregator<NODES, SENSORS> {
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn add_node(
        &mut self,
        id: NodeId,
        reader: SensorReader<SENSORS>,
    ) -> Result<(), CapacityError> {
        self.nodes
            .push((id, reader))
            .map_err(|_| CapacityError { capacity: NODES })
    }

    /// 已注册节点数（等于 add_node 成功的次数）
    pub fn count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node_id(&self, index: usize) -> Option<NodeId> {
        self.nodes.get(index).map(|(id, _)| *id)
    }

    /// 按编号查找节点
    pub fn reader(&self, id: NodeId) -> Option<&SensorReader<SENSORS>> {
        self.nodes
            .iter()
            .rev()
            .find(|(node_id, _)| *node_id == id)
            .map(|(_, reader)| reader)
    }

    /// 采样第 index 个节点，编码后作为一个数据包发出，返回负载长度
    pub fn send_data<A, T, const J: usize>(
        &self,
        index: usize,
        adc: &mut A,
        transport: &mut T,
        scratch: &mut ScratchBuffer<J>,
    ) -> Result<usize, SendError>
    where
        A: AnalogInput,
        T: PacketSender,
    {
        let (id, reader) = self.nodes.get(index).ok_or(SendError::NoSuchNode(index))?;

        let sensors = reader.read(adc).map_err(|_| SendError::Sensor)?;
        let report = SensorReport::new(*id, sensors);

        let payload = scratch.encode(&report)?;
        transport.write(payload)?;
        transport.send()?;

        debug!("节点 {} 已发送 {} 字节", id.0, payload.len());
        Ok(payload.len())
    }
}
