use core::fmt;

/// 固定容量容器已满（传感器、节点或服务注册过多）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CapacityError {
    pub capacity: usize,
}

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "capacity of {} entries exceeded", self.capacity)
    }
}

/// 编码错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// 编码结果超出缓冲区容量
    Overflow { capacity: usize },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::Overflow { capacity } => {
                write!(f, "encoded packet does not fit in {} bytes", capacity)
            }
        }
    }
}

/// 传输层错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// 尚未调用 begin
    NotStarted,
    /// 待发送消息超过单帧负载上限
    Overflow,
    /// 无线电忙或对端不可达
    SendFailed,
    /// 底层链路（芯片配置或串口）故障
    Link,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::NotStarted => f.write_str("transport not started"),
            TransportError::Overflow => f.write_str("message exceeds frame payload"),
            TransportError::SendFailed => f.write_str("send failed"),
            TransportError::Link => f.write_str("link failure"),
        }
    }
}
