//! 直连串口的传输实现，与无线电实现使用同一帧格式，可互换使用

use embedded_hal::serial::{Read, Write};
use heapless::Vec;

use crate::error::TransportError;
use crate::hal::{PacketReceiver, PacketSender, Transport};
use crate::logging::{debug, info};
use crate::protocol::{FrameInbox, FrameOutbox, PipePair, FRAME_CAPACITY};

pub struct SerialTransport<S> {
    serial: S,
    pipes: Option<PipePair>,
    outbox: FrameOutbox,
    inbox: FrameInbox,
    // 正在拼装的帧
    rx: Vec<u8, FRAME_CAPACITY>,
}

impl<S> SerialTransport<S>
where
    S: Read<u8> + Write<u8>,
{
    pub fn new(serial: S) -> Self {
        Self {
            serial,
            pipes: None,
            outbox: FrameOutbox::new(),
            inbox: FrameInbox::new(),
            rx: Vec::new(),
        }
    }

    pub fn discarded(&self) -> u32 {
        self.inbox.discarded()
    }

    /// 帧是否已完整收齐
    fn rx_complete(&self) -> bool {
        match self.rx.first() {
            Some(&len) => self.rx.len() == len as usize + 1,
            None => false,
        }
    }
}

impl<S> Transport for SerialTransport<S>
where
    S: Read<u8> + Write<u8>,
{
    fn begin(&mut self, pipes: PipePair) -> Result<(), TransportError> {
        // 点对点连线不需要寻址，只记录下来
        self.pipes = Some(pipes);
        info!("串口传输已启动");
        Ok(())
    }
}

impl<S> PacketSender for SerialTransport<S>
where
    S: Read<u8> + Write<u8>,
{
    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        self.outbox.append(bytes)
    }

    fn send(&mut self) -> Result<(), TransportError> {
        if self.pipes.is_none() {
            self.outbox.take_frame();
            return Err(TransportError::NotStarted);
        }

        let frame = match self.outbox.take_frame() {
            Some(frame) => frame,
            None => return Ok(()),
        };

        for &byte in frame.as_bytes() {
            nb::block!(self.serial.write(byte)).map_err(|_| TransportError::Link)?;
        }
        nb::block!(self.serial.flush()).map_err(|_| TransportError::Link)
    }
}

impl<S> PacketReceiver for SerialTransport<S>
where
    S: Read<u8> + Write<u8>,
{
    fn available(&mut self) -> bool {
        if self.inbox.is_pending() {
            return true;
        }
        if self.pipes.is_none() {
            return false;
        }

        loop {
            match self.serial.read() {
                Ok(byte) => {
                    // 容量等于最大帧长，完整帧之前不会溢出
                    let _ = self.rx.push(byte);
                    if self.rx_complete() {
                        self.inbox.accept(&self.rx);
                        self.rx.clear();
                        return true;
                    }
                }
                Err(nb::Error::WouldBlock) => return false,
                Err(nb::Error::Other(_)) => {
                    debug!("串口读取错误, 丢弃 {} 字节的半帧", self.rx.len());
                    self.rx.clear();
                    return false;
                }
            }
        }
    }

    fn read(&mut self) -> u8 {
        self.inbox.take_len()
    }

    fn data(&self) -> &[u8] {
        self.inbox.payload()
    }
}
