pub mod radio;
pub mod serial;
#[cfg(feature = "simulator")]
pub mod simulator;

pub use radio::RadioTransport;
pub use serial::SerialTransport;

use core::fmt::Debug;

use crate::config::Pin;
use crate::error::TransportError;
use crate::protocol::PipePair;

/// 单调毫秒时钟
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// 模拟量输入（ADC）
pub trait AnalogInput {
    type Error: Debug;

    /// 读取指定引脚的原始采样值
    fn read_raw(&mut self, pin: Pin) -> Result<u16, Self::Error>;
}

/// 多管道无线电芯片驱动抽象
pub trait RadioDriver {
    type Error: Debug;

    /// 配置信道与发射功率
    fn configure(&mut self, channel: u8, power: u8) -> Result<(), Self::Error>;

    /// 打开读写管道
    fn open_pipes(&mut self, pipes: PipePair) -> Result<(), Self::Error>;

    /// 进入接收模式
    fn start_listening(&mut self);

    /// 退出接收模式（发送前调用）
    fn stop_listening(&mut self);

    /// 向写管道发送一个完整帧，不等待确认
    fn transmit(&mut self, frame: &[u8]) -> Result<(), Self::Error>;

    /// 非阻塞接收：有数据时复制到 buffer 并返回长度
    fn receive(&mut self, buffer: &mut [u8]) -> Result<Option<usize>, Self::Error>;
}

/// 发送能力：先写入任意字节，再由 send 作为一个数据包发出
pub trait PacketSender {
    /// 追加到待发消息
    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError>;

    /// 把待发消息作为一个数据包发出。失败时消息被丢弃，不重试。
    fn send(&mut self) -> Result<(), TransportError>;
}

/// 接收能力
pub trait PacketReceiver {
    /// 非阻塞轮询是否有帧到达
    fn available(&mut self) -> bool;

    /// 消费帧的长度字节；0 表示损坏帧
    fn read(&mut self) -> u8;

    /// 最近一次 read 声明的负载
    fn data(&self) -> &[u8];
}

/// 双向、带地址的分包链路
pub trait Transport: PacketSender + PacketReceiver {
    /// 配置读写地址
    fn begin(&mut self, pipes: PipePair) -> Result<(), TransportError>;
}
