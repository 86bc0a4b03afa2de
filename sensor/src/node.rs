use common::config::{MAX_NODES, MAX_SENSORS_PER_NODE, MAX_SERVICES};
use common::hal::{AnalogInput, Clock, PacketReceiver, PacketSender};
use common::logging::{info, warn};
use common::utils::{ScratchBuffer, Timer};

use crate::aggregator::SensorAggregator;
use crate::services::ServicesHandler;

/// 一次数据周期的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleSummary {
    pub sent: usize,
    pub failed: usize,
}

/// 传感器节点模式：先处理一帧命令并推进服务，再在采样定时器到期时逐个节点发送数据
pub struct SensorNode<'a, A> {
    aggregator: SensorAggregator<MAX_NODES, MAX_SENSORS_PER_NODE>,
    services: ServicesHandler<'a, MAX_SERVICES>,
    adc: A,
    timer: Timer,
}

impl<'a, A: AnalogInput> SensorNode<'a, A> {
    pub fn new(adc: A, period_ms: u64) -> Self {
        Self {
            aggregator: SensorAggregator::new(),
            services: ServicesHandler::new(),
            adc,
            timer: Timer::new(period_ms),
        }
    }

    pub fn aggregator(&self) -> &SensorAggregator<MAX_NODES, MAX_SENSORS_PER_NODE> {
        &self.aggregator
    }

    pub fn aggregator_mut(&mut self) -> &mut SensorAggregator<MAX_NODES, MAX_SENSORS_PER_NODE> {
        &mut self.aggregator
    }

    pub fn services(&self) -> &ServicesHandler<'a, MAX_SERVICES> {
        &self.services
    }

    pub fn services_mut(&mut self) -> &mut ServicesHandler<'a, MAX_SERVICES> {
        &mut self.services
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    /// 开始采样计时，第一个周期在一个完整周期之后
    pub fn arm<C: Clock>(&mut self, clock: &C) {
        self.timer.start(clock);
    }

    /// 主循环中的一步。只有发生了数据周期才返回统计
    pub fn step<C, T, const J: usize>(
        &mut self,
        clock: &C,
        transport: &mut T,
        scratch: &mut ScratchBuffer<J>,
    ) -> Option<CycleSummary>
    where
        C: Clock,
        T: PacketSender + PacketReceiver,
    {
        self.services.handle_services(clock, transport);

        if !self.timer.finished(clock) {
            return None;
        }

        info!("Sending data");
        let mut summary = CycleSummary::default();
        for index in 0..self.aggregator.count() {
            match self
                .aggregator
                .send_data(index, &mut self.adc, transport, scratch)
            {
                Ok(_) => summary.sent += 1,
                Err(err) => {
                    // 节点编号从 1 开始
                    warn!("节点 {} 数据发送失败: {}", index + 1, err);
                    summary.failed += 1;
                }
            }
        }

        self.timer.start(clock);
        Some(summary)
    }
}
