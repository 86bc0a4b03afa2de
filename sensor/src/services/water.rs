use core::fmt::Debug;

use embedded_hal::digital::v2::OutputPin;

use common::hal::Clock;
use common::logging::{info, warn};
use common::utils::Timer;

use super::Service;

/// 浇水服务状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WaterState {
    Idle,
    Watering,
}

/// 定时浇水：每隔 interval 打开水泵引脚，持续 duration 后关闭。
///
/// 也接受网桥转发的 `ON`/`OFF` 命令，手动开关水泵。
pub struct WaterService<P> {
    pin: P,
    interval: Timer,
    duration: Timer,
    state: WaterState,
}

impl<P> WaterService<P>
where
    P: OutputPin,
    P::Error: Debug,
{
    pub fn new(pin: P, interval_ms: u64, duration_ms: u64) -> Self {
        Self {
            pin,
            interval: Timer::new(interval_ms),
            duration: Timer::new(duration_ms),
            state: WaterState::Idle,
        }
    }

    pub fn state(&self) -> WaterState {
        self.state
    }

    fn drive(&mut self, on: bool) {
        let result = if on {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if result.is_err() {
            warn!("水泵引脚切换失败");
        }
    }

    fn start_watering(&mut self, clock: &dyn Clock) {
        self.drive(true);
        self.duration.start(clock);
        self.state = WaterState::Watering;
        info!("开始浇水");
    }

    // 下一轮从关闭时刻重新计时
    fn stop_watering(&mut self, clock: &dyn Clock) {
        self.drive(false);
        self.duration.stop();
        self.interval.start(clock);
        self.state = WaterState::Idle;
        info!("浇水结束");
    }
}

impl<P> Service for WaterService<P>
where
    P: OutputPin,
    P::Error: Debug,
{
    fn name(&self) -> &str {
        "regar"
    }

    fn step(&mut self, clock: &dyn Clock) {
        match self.state {
            WaterState::Idle => {
                // 第一次调度时才开始计时
                if !self.interval.is_armed() {
                    self.interval.start(clock);
                } else if self.interval.finished(clock) {
                    self.start_watering(clock);
                }
            }
            WaterState::Watering => {
                if self.duration.finished(clock) {
                    self.stop_watering(clock);
                }
            }
        }
    }

    fn handle_command(&mut self, command: &[u8], clock: &dyn Clock) -> bool {
        match command {
            b"ON" => self.start_watering(clock),
            b"OFF" => self.stop_watering(clock),
            _ => return false,
        }
        true
    }
}
