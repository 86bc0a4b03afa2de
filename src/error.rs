use core::fmt;

use common::error::{CapacityError, TransportError};

/// 启动阶段的致命错误；进入主循环后不再有致命错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootError {
    /// 主机串口读写失败
    HostLink,
    /// 传输层初始化失败
    Transport(TransportError),
    /// 注册的传感器、节点或服务超出容量
    Registration(CapacityError),
}

impl From<TransportError> for BootError {
    fn from(err: TransportError) -> Self {
        BootError::Transport(err)
    }
}

impl From<CapacityError> for BootError {
    fn from(err: CapacityError) -> Self {
        BootError::Registration(err)
    }
}

impl fmt::Display for BootError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootError::HostLink => f.write_str("host link failure"),
            BootError::Transport(err) => write!(f, "transport init failed: {}", err),
            BootError::Registration(err) => write!(f, "registration failed: {}", err),
        }
    }
}
