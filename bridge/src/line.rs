//! 主机串口的非阻塞行读取

use embedded_hal::serial::Read;
use heapless::Vec;

use common::logging::debug;

/// 一行主机输入（不含换行符）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<const N: usize> {
    pub bytes: Vec<u8, N>,
    /// 超长被截断
    pub truncated: bool,
}

/// 以换行结尾的行读取器，最多保留 N-1 字节。
///
/// 超长时立即交出截断后的行，其余字节一直丢弃到下一个换行。
pub struct LineReader<const N: usize> {
    buffer: Vec<u8, N>,
    discarding: bool,
}

impl<const N: usize> Default for LineReader<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> LineReader<N> {
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            discarding: false,
        }
    }

    /// 单行上限
    pub const fn limit(&self) -> usize {
        N - 1
    }

    /// 已收到但尚未成行的字节数
    pub fn partial(&self) -> usize {
        self.buffer.len()
    }

    /// 读取当前可用的字节，凑满一行即返回；没有完整行时返回 None
    pub fn poll<S: Read<u8>>(&mut self, host: &mut S) -> Option<Line<N>> {
        loop {
            let byte = match host.read() {
                Ok(byte) => byte,
                Err(nb::Error::WouldBlock) => return None,
                Err(nb::Error::Other(_)) => {
                    debug!("主机串口读取错误, 丢弃 {} 字节", self.buffer.len());
                    self.buffer.clear();
                    self.discarding = false;
                    return None;
                }
            };

            if self.discarding {
                if byte == b'\n' {
                    self.discarding = false;
                }
                continue;
            }

            if byte == b'\n' {
                return Some(self.take(false));
            }

            if self.buffer.len() >= self.limit() {
                self.discarding = true;
                return Some(self.take(true));
            }

            // 上限为 N-1，这里不会溢出
            let _ = self.buffer.push(byte);
        }
    }

    fn take(&mut self, truncated: bool) -> Line<N> {
        let bytes = self.buffer.clone();
        self.buffer.clear();
        Line { bytes, truncated }
    }
}
