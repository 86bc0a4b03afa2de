//! 线上帧格式：1 字节长度 (0 表示损坏帧) + 恰好该长度的负载

use heapless::Vec;

use crate::config::MAX_FRAME_PAYLOAD;
use crate::error::TransportError;

/// 长度前缀 + 最大负载
pub const FRAME_CAPACITY: usize = 1 + MAX_FRAME_PAYLOAD;

/// 一个完整的非空帧
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bytes: Vec<u8, FRAME_CAPACITY>,
}

impl Frame {
    /// 为负载加上长度前缀
    pub fn encode(payload: &[u8]) -> Result<Self, TransportError> {
        if payload.len() > MAX_FRAME_PAYLOAD {
            return Err(TransportError::Overflow);
        }

        let mut bytes = Vec::new();
        // 容量已在上面检查
        let _ = bytes.push(payload.len() as u8);
        let _ = bytes.extend_from_slice(payload);

        Ok(Self { bytes })
    }

    /// 解析收到的原始字节。
    /// 长度为 0、或实际字节数与声明长度不符时返回 None，不做部分解析。
    pub fn decode(raw: &[u8]) -> Option<Self> {
        let (&len, rest) = raw.split_first()?;
        let len = len as usize;

        if len == 0 || rest.len() != len {
            return None;
        }

        let mut bytes = Vec::new();
        bytes.extend_from_slice(raw).ok()?;
        Some(Self { bytes })
    }

    /// 声明的负载长度
    pub fn len(&self) -> u8 {
        self.bytes[0]
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn payload(&self) -> &[u8] {
        &self.bytes[1..]
    }

    /// 含长度前缀的完整线上字节
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// 发送侧待发消息缓冲，send 时整体成帧
#[derive(Debug, Default)]
pub struct FrameOutbox {
    pending: Vec<u8, MAX_FRAME_PAYLOAD>,
}

impl FrameOutbox {
    pub fn new() -> Self {
        Self { pending: Vec::new() }
    }

    /// 追加字节；放不下时整段拒绝，已有内容保持不变
    pub fn append(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        if self.pending.len() + bytes.len() > MAX_FRAME_PAYLOAD {
            return Err(TransportError::Overflow);
        }
        self.pending
            .extend_from_slice(bytes)
            .map_err(|_| TransportError::Overflow)
    }

    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// 取出待发消息并清空。空消息不成帧（否则对端会视为损坏帧）。
    pub fn take_frame(&mut self) -> Option<Frame> {
        if self.pending.is_empty() {
            return None;
        }
        let frame = Frame::encode(&self.pending).ok();
        self.pending.clear();
        frame
    }
}

/// 接收侧：保存最近一个有效帧，以及尚未被 read 消费的长度声明
#[derive(Debug)]
pub struct FrameInbox {
    last: Option<Frame>,
    announced: Option<u8>,
    discarded: u32,
}

impl Default for FrameInbox {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameInbox {
    pub fn new() -> Self {
        Self {
            last: None,
            announced: None,
            discarded: 0,
        }
    }

    /// 收到一段原始字节。损坏帧只记下长度 0，不覆盖上一个有效负载。
    pub fn accept(&mut self, raw: &[u8]) {
        match Frame::decode(raw) {
            Some(frame) => {
                self.announced = Some(frame.len());
                self.last = Some(frame);
            }
            None => {
                self.announced = Some(0);
                self.discarded = self.discarded.wrapping_add(1);
            }
        }
    }

    /// 是否有尚未消费的帧
    pub fn is_pending(&self) -> bool {
        self.announced.is_some()
    }

    /// 消费长度声明；没有待处理帧时返回 0
    pub fn take_len(&mut self) -> u8 {
        self.announced.take().unwrap_or(0)
    }

    /// 最近一个有效帧的负载
    pub fn payload(&self) -> &[u8] {
        self.last.as_ref().map(Frame::payload).unwrap_or(&[])
    }

    /// 累计丢弃的损坏帧数
    pub fn discarded(&self) -> u32 {
        self.discarded
    }
}
