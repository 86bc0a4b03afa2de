use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;
use embedded_hal::serial;

use crate::config::{Pin, LIGHT_PIN, TEMP_PIN};
use crate::hal::{AnalogInput, Clock, RadioDriver};
use crate::protocol::PipePair;

/// 模拟器错误类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulatorError {
    /// 空中信道被占用，发送失败
    RadioBusy,
    /// 非法的信道或功率配置
    ConfigError,
    /// 未配置的引脚
    UnknownPin,
}

/// 共享空中信道，用于在多个模拟节点之间传递帧
#[derive(Clone, Default)]
pub struct SimAir {
    frames: Arc<Mutex<VecDeque<(u64, Vec<u8>)>>>,
    jammed: Arc<AtomicUsize>,
}

impl SimAir {
    pub fn new() -> Self {
        Self::default()
    }

    /// 把帧投递到指定管道
    pub fn inject(&self, pipe: u64, frame: &[u8]) {
        if let Ok(mut frames) = self.frames.lock() {
            frames.push_back((pipe, frame.to_vec()));
        }
    }

    /// 取出第一个发往该管道的帧
    pub fn take(&self, pipe: u64) -> Option<Vec<u8>> {
        let mut frames = self.frames.lock().ok()?;
        let index = frames.iter().position(|(p, _)| *p == pipe)?;
        frames.remove(index).map(|(_, frame)| frame)
    }

    /// 查看发往该管道、尚未被接收的帧
    pub fn peek(&self, pipe: u64) -> Vec<Vec<u8>> {
        match self.frames.lock() {
            Ok(frames) => frames
                .iter()
                .filter(|(p, _)| *p == pipe)
                .map(|(_, frame)| frame.clone())
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    /// 空中尚未被接收的帧总数
    pub fn in_flight(&self) -> usize {
        self.frames.lock().map(|frames| frames.len()).unwrap_or(0)
    }

    /// 让接下来的 count 次发送失败
    pub fn jam(&self, count: usize) {
        self.jammed.store(count, Ordering::SeqCst);
    }

    fn consume_jam(&self) -> bool {
        self.jammed
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

/// 模拟无线电芯片
pub struct SimRadio {
    air: SimAir,
    channel: u8,
    power: u8,
    pipes: Option<PipePair>,
    listening: bool,
}

impl SimRadio {
    pub fn new(air: SimAir) -> Self {
        Self {
            air,
            channel: 0,
            power: 0,
            pipes: None,
            listening: false,
        }
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    pub fn power(&self) -> u8 {
        self.power
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }
}

impl RadioDriver for SimRadio {
    type Error = SimulatorError;

    fn configure(&mut self, channel: u8, power: u8) -> Result<(), Self::Error> {
        if channel > 125 || power > 3 {
            return Err(SimulatorError::ConfigError);
        }

        self.channel = channel;
        self.power = power;
        Ok(())
    }

    fn open_pipes(&mut self, pipes: PipePair) -> Result<(), Self::Error> {
        self.pipes = Some(pipes);
        Ok(())
    }

    fn start_listening(&mut self) {
        self.listening = true;
    }

    fn stop_listening(&mut self) {
        self.listening = false;
    }

    fn transmit(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
        let pipes = self.pipes.ok_or(SimulatorError::ConfigError)?;
        if self.air.consume_jam() {
            return Err(SimulatorError::RadioBusy);
        }

        self.air.inject(pipes.write, frame);
        Ok(())
    }

    fn receive(&mut self, buffer: &mut [u8]) -> Result<Option<usize>, Self::Error> {
        let pipes = match self.pipes {
            Some(pipes) if self.listening => pipes,
            _ => return Ok(None),
        };

        match self.air.take(pipes.read) {
            Some(frame) => {
                // 超出接收缓冲的部分被芯片丢弃
                let len = frame.len().min(buffer.len());
                buffer[..len].copy_from_slice(&frame[..len]);
                Ok(Some(len))
            }
            None => Ok(None),
        }
    }
}

/// 模拟串口：rx 为本端待读取字节，tx 为本端已写出字节
#[derive(Clone, Default)]
pub struct SimSerial {
    rx: Arc<Mutex<VecDeque<u8>>>,
    tx: Arc<Mutex<VecDeque<u8>>>,
}

impl SimSerial {
    pub fn new() -> Self {
        Self::default()
    }

    /// 两端交叉连接的一对串口
    pub fn pair() -> (Self, Self) {
        let a_to_b = Arc::new(Mutex::new(VecDeque::new()));
        let b_to_a = Arc::new(Mutex::new(VecDeque::new()));

        let a = Self {
            rx: b_to_a.clone(),
            tx: a_to_b.clone(),
        };
        let b = Self {
            rx: a_to_b,
            tx: b_to_a,
        };
        (a, b)
    }

    /// 模拟对端输入
    pub fn feed(&self, bytes: &[u8]) {
        if let Ok(mut rx) = self.rx.lock() {
            rx.extend(bytes.iter().copied());
        }
    }

    /// 取走本端写出的全部字节
    pub fn take_output(&self) -> Vec<u8> {
        match self.tx.lock() {
            Ok(mut tx) => tx.drain(..).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// 尚未被读取的输入字节数
    pub fn unread(&self) -> usize {
        self.rx.lock().map(|rx| rx.len()).unwrap_or(0)
    }
}

impl serial::Read<u8> for SimSerial {
    type Error = SimulatorError;

    fn read(&mut self) -> nb::Result<u8, Self::Error> {
        let mut rx = self.rx.lock().map_err(|_| nb::Error::WouldBlock)?;
        rx.pop_front().ok_or(nb::Error::WouldBlock)
    }
}

impl serial::Write<u8> for SimSerial {
    type Error = SimulatorError;

    fn write(&mut self, word: u8) -> nb::Result<(), Self::Error> {
        let mut tx = self.tx.lock().map_err(|_| nb::Error::WouldBlock)?;
        tx.push_back(word);
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        Ok(())
    }
}

/// 测试用时钟，时间只在 advance 或 delay_ms 时前进
#[derive(Clone, Default)]
pub struct MockClock {
    now: Arc<AtomicU64>,
}

impl MockClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }

    pub fn set(&self, ms: u64) {
        self.now.store(ms, Ordering::SeqCst);
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

impl DelayMs<u32> for MockClock {
    fn delay_ms(&mut self, ms: u32) {
        self.advance(ms as u64);
    }
}

/// 基于宿主机单调时钟的模拟时钟
#[derive(Clone, Copy)]
pub struct SimClock {
    start_time: Instant,
}

impl SimClock {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SimClock {
    fn now_ms(&self) -> u64 {
        self.start_time.elapsed().as_millis() as u64
    }
}

/// 真实休眠的延时
#[derive(Clone, Copy, Default)]
pub struct SimDelay;

impl DelayMs<u32> for SimDelay {
    fn delay_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(ms as u64));
    }
}

/// 模拟 ADC，每个引脚保存一个原始采样值
#[derive(Clone, Default)]
pub struct SimPins {
    values: Arc<Mutex<Vec<(Pin, u16)>>>,
}

impl SimPins {
    pub fn new() -> Self {
        Self::default()
    }

    /// 室温约 22°C、中等光照
    pub fn with_defaults() -> Self {
        let pins = Self::new();
        pins.set(TEMP_PIN, 45);
        pins.set(LIGHT_PIN, 600);
        pins
    }

    pub fn set(&self, pin: Pin, raw: u16) {
        if let Ok(mut values) = self.values.lock() {
            match values.iter_mut().find(|(p, _)| *p == pin) {
                Some(entry) => entry.1 = raw,
                None => values.push((pin, raw)),
            }
        }
    }
}

impl AnalogInput for SimPins {
    type Error = SimulatorError;

    fn read_raw(&mut self, pin: Pin) -> Result<u16, Self::Error> {
        let values = self.values.lock().map_err(|_| SimulatorError::UnknownPin)?;
        values
            .iter()
            .find(|(p, _)| *p == pin)
            .map(|(_, raw)| *raw)
            .ok_or(SimulatorError::UnknownPin)
    }
}

/// 模拟数字输出引脚，克隆体共享电平
#[derive(Clone, Default)]
pub struct SimOutputPin {
    high: Arc<AtomicBool>,
    toggles: Arc<AtomicUsize>,
}

impl SimOutputPin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_high(&self) -> bool {
        self.high.load(Ordering::SeqCst)
    }

    /// 电平实际变化的次数
    pub fn toggles(&self) -> usize {
        self.toggles.load(Ordering::SeqCst)
    }

    fn drive(&self, high: bool) {
        if self.high.swap(high, Ordering::SeqCst) != high {
            self.toggles.fetch_add(1, Ordering::SeqCst);
        }
    }
}

impl OutputPin for SimOutputPin {
    type Error = SimulatorError;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true);
        Ok(())
    }
}
