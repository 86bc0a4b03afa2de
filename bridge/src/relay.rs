use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::serial::{Read, Write};

use common::config::JSON_BUFFER_SIZE;
use common::hal::{PacketReceiver, PacketSender};
use common::logging::{debug, warn};

use crate::line::LineReader;

/// 网桥节点模式：主机串口与无线网络之间的透明中继。
///
/// 每一步先转发主机行，再处理一个收到的帧，最后固定延时。
pub struct BridgeNode {
    line: LineReader<JSON_BUFFER_SIZE>,
    forwarded: u32,
    echoed: u32,
    discarded: u32,
}

impl Default for BridgeNode {
    fn default() -> Self {
        Self::new()
    }
}

impl BridgeNode {
    pub const fn new() -> Self {
        Self {
            line: LineReader::new(),
            forwarded: 0,
            echoed: 0,
            discarded: 0,
        }
    }

    /// 已转发到无线网络的主机行数
    pub fn forwarded(&self) -> u32 {
        self.forwarded
    }

    /// 已回显给主机的帧数
    pub fn echoed(&self) -> u32 {
        self.echoed
    }

    /// 丢弃的零长度帧数
    pub fn discarded(&self) -> u32 {
        self.discarded
    }

    pub fn step<T, H, D>(&mut self, transport: &mut T, host: &mut H, delay: &mut D, poll_delay_ms: u32)
    where
        T: PacketSender + PacketReceiver,
        H: Read<u8> + Write<u8>,
        D: DelayMs<u32>,
    {
        self.forward_host_line(transport, host);
        self.drain_frame(transport, host);
        delay.delay_ms(poll_delay_ms);
    }

    /// 主机发来完整的一行时，原样作为一个数据包发出
    pub fn forward_host_line<T, H>(&mut self, transport: &mut T, host: &mut H) -> bool
    where
        T: PacketSender,
        H: Read<u8>,
    {
        let line = match self.line.poll(host) {
            Some(line) => line,
            None => return false,
        };

        if line.truncated {
            warn!("主机命令超过 {} 字节, 已截断", self.line.limit());
        }
        // 空帧在线上代表损坏帧，不发送
        if line.bytes.is_empty() {
            return false;
        }

        let result = transport.write(&line.bytes).and_then(|_| transport.send());
        match result {
            Ok(()) => {
                self.forwarded += 1;
                debug!("已转发 {} 字节主机命令", line.bytes.len());
                true
            }
            Err(err) => {
                warn!("主机命令发送失败: {}", err);
                false
            }
        }
    }

    /// 处理至多一个收到的帧：非空则逐字节写给主机，零长度帧丢弃
    pub fn drain_frame<T, H>(&mut self, transport: &mut T, host: &mut H) -> bool
    where
        T: PacketReceiver,
        H: Write<u8>,
    {
        if !transport.available() {
            return false;
        }

        let len = transport.read();
        if len == 0 {
            self.discarded += 1;
            debug!("丢弃零长度帧");
            return false;
        }

        for &byte in transport.data() {
            if nb::block!(host.write(byte)).is_err() {
                warn!("主机串口写入失败");
                return false;
            }
        }
        if nb::block!(host.flush()).is_err() {
            warn!("主机串口刷新失败");
        }

        self.echoed += 1;
        true
    }
}
