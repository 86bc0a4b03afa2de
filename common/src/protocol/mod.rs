pub mod frame;
pub mod packet;

pub use frame::{Frame, FrameInbox, FrameOutbox, FRAME_CAPACITY};
pub use packet::{Reading, SensorKind, SensorReport};

use serde::{Deserialize, Serialize};

use crate::config::{PIPE_A, PIPE_B};

/// 节点角色，启动时由操作员选定，之后不再改变
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Role {
    Sensor,
    Bridge,
}

impl Role {
    /// 角色选择输入：'1' 为传感器节点，其余任意字节为网桥节点
    pub fn from_selection(byte: u8) -> Self {
        if byte == b'1' {
            Role::Sensor
        } else {
            Role::Bridge
        }
    }

    /// 回显给操作员的角色名称
    pub fn label(&self) -> &'static str {
        match self {
            Role::Sensor => "sensor",
            Role::Bridge => "bridge",
        }
    }

    /// 角色对应的读写管道，两种角色互为镜像
    pub fn pipes(&self) -> PipePair {
        let sensor = PipePair {
            read: PIPE_A,
            write: PIPE_B,
        };

        match self {
            Role::Sensor => sensor,
            Role::Bridge => sensor.swapped(),
        }
    }
}

/// 读写管道地址对
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PipePair {
    pub read: u64,
    pub write: u64,
}

impl PipePair {
    pub fn new(read: u64, write: u64) -> Self {
        Self { read, write }
    }

    /// 对端角色使用的管道对
    pub fn swapped(&self) -> Self {
        Self {
            read: self.write,
            write: self.read,
        }
    }
}

/// 聚合器中的逻辑传感器节点编号（从 1 开始）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct NodeId(pub u8);

impl NodeId {
    pub fn new(id: u8) -> Self {
        Self(id)
    }
}
