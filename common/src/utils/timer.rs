use crate::hal::Clock;

/// 单次区间定时器。
///
/// `start` 之后到期一次；到期后不会自动重新计时，由调用方再次 `start`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timer {
    period_ms: u64,
    deadline: Option<u64>,
}

impl Timer {
    pub const fn new(period_ms: u64) -> Self {
        Self {
            period_ms,
            deadline: None,
        }
    }

    /// 从当前时刻开始计时一个周期
    pub fn start<C: Clock + ?Sized>(&mut self, clock: &C) {
        self.deadline = Some(clock.now_ms().saturating_add(self.period_ms));
    }

    /// 是否已到期；从未启动时返回 false
    pub fn finished<C: Clock + ?Sized>(&self, clock: &C) -> bool {
        match self.deadline {
            Some(deadline) => clock.now_ms() >= deadline,
            None => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn stop(&mut self) {
        self.deadline = None;
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }
}
