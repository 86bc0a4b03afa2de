use serde::Serialize;

use crate::error::EncodeError;

/// 固定大小的共享编码缓冲区。
///
/// 所有发送方复用同一块缓冲：每次编码完整写入后立即发送，下一次编码才会覆盖它。
#[repr(align(4))]
pub struct ScratchBuffer<const N: usize> {
    buffer: [u8; N],
    len: usize,
}

impl<const N: usize> Default for ScratchBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ScratchBuffer<N> {
    /// 创建一个新的空缓冲区
    pub const fn new() -> Self {
        Self {
            buffer: [0; N],
            len: 0,
        }
    }

    /// 缓冲区容量
    pub const fn capacity(&self) -> usize {
        N
    }

    /// 有效数据
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer[..self.len]
    }

    /// 获取有效数据长度
    pub fn len(&self) -> usize {
        self.len
    }

    /// 判断缓冲区是否为空
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 清空缓冲区
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// 把 value 编码为 JSON 写入缓冲区。
    /// 超出容量时清空缓冲区并返回错误，绝不越界写入。
    pub fn encode<T: Serialize>(&mut self, value: &T) -> Result<&[u8], EncodeError> {
        match serde_json_core::to_slice(value, &mut self.buffer) {
            Ok(len) => {
                self.len = len;
                Ok(self.as_slice())
            }
            Err(_) => {
                self.len = 0;
                Err(EncodeError::Overflow { capacity: N })
            }
        }
    }
}
