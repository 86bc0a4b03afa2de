//! 基于多管道无线电芯片的传输实现：尽力而为，无确认，无重传

use crate::config::RadioSettings;
use crate::error::TransportError;
use crate::hal::{PacketReceiver, PacketSender, RadioDriver, Transport};
use crate::logging::{debug, info};
use crate::protocol::{FrameInbox, FrameOutbox, PipePair, FRAME_CAPACITY};

pub struct RadioTransport<D: RadioDriver> {
    driver: D,
    settings: RadioSettings,
    pipes: Option<PipePair>,
    outbox: FrameOutbox,
    inbox: FrameInbox,
}

impl<D: RadioDriver> RadioTransport<D> {
    pub fn new(driver: D, settings: RadioSettings) -> Self {
        Self {
            driver,
            settings,
            pipes: None,
            outbox: FrameOutbox::new(),
            inbox: FrameInbox::new(),
        }
    }

    pub fn pipes(&self) -> Option<PipePair> {
        self.pipes
    }

    /// 尚未发送的消息
    pub fn pending(&self) -> &[u8] {
        self.outbox.pending()
    }

    /// 累计丢弃的损坏帧数
    pub fn discarded(&self) -> u32 {
        self.inbox.discarded()
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }
}

impl<D: RadioDriver> Transport for RadioTransport<D> {
    fn begin(&mut self, pipes: PipePair) -> Result<(), TransportError> {
        self.driver
            .configure(self.settings.channel, self.settings.power)
            .map_err(|_| TransportError::Link)?;
        self.driver
            .open_pipes(pipes)
            .map_err(|_| TransportError::Link)?;
        self.driver.start_listening();
        self.pipes = Some(pipes);

        info!(
            "无线电已启动: 信道 {}, 读管道 {:#x}, 写管道 {:#x}",
            self.settings.channel, pipes.read, pipes.write
        );
        Ok(())
    }
}

impl<D: RadioDriver> PacketSender for RadioTransport<D> {
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

        // 发送期间芯片不能处于接收模式
        self.driver.stop_listening();
        let result = self.driver.transmit(frame.as_bytes());
        self.driver.start_listening();

        result.map_err(|_| {
            debug!("无线电发送失败, 丢弃 {} 字节", frame.len());
            TransportError::SendFailed
        })
    }
}

impl<D: RadioDriver> PacketReceiver for RadioTransport<D> {
    fn available(&mut self) -> bool {
        if self.inbox.is_pending() {
            return true;
        }
        if self.pipes.is_none() {
            return false;
        }

        let mut raw = [0u8; FRAME_CAPACITY];
        match self.driver.receive(&mut raw) {
            Ok(Some(len)) => {
                self.inbox.accept(&raw[..len]);
                true
            }
            Ok(None) => false,
            Err(_) => {
                debug!("无线电接收失败");
                false
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
