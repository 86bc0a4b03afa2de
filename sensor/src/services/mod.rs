//! 执行器服务：每次主循环迭代按注册顺序各推进一次，任何服务都不得阻塞

mod command;
mod handler;
mod manager;
mod water;

pub use command::ServiceCommand;
pub use handler::{CommandStats, ServicesHandler};
pub use manager::{ServiceId, ServiceManager};
pub use water::{WaterService, WaterState};

use common::hal::Clock;

/// 可被调度的执行器服务
pub trait Service {
    /// 服务名称，用于日志
    fn name(&self) -> &str;

    /// 推进一步：检查自身定时器并驱动控制引脚，立即返回
    fn step(&mut self, clock: &dyn Clock);

    /// 处理网桥转发来的命令，认识该命令时返回 true
    fn handle_command(&mut self, _command: &[u8], _clock: &dyn Clock) -> bool {
        false
    }
}
