use common::error::CapacityError;
use common::hal::{Clock, PacketReceiver};
use common::logging::{debug, info};

use super::{Service, ServiceCommand, ServiceId, ServiceManager};

/// 收到的命令帧统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandStats {
    /// 至少有一个服务接受的命令
    pub handled: u32,
    /// 没有服务接受的命令
    pub unrouted: u32,
    /// 长度错误或命令体为空的帧
    pub discarded: u32,
}

/// 主循环面向的服务入口
pub struct ServicesHandler<'a, const N: usize> {
    manager: ServiceManager<'a, N>,
    stats: CommandStats,
}

impl<'a, const N: usize> Default for ServicesHandler<'a, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, const N: usize> ServicesHandler<'a, N> {
    pub const fn new() -> Self {
        Self {
            manager: ServiceManager::new(),
            stats: CommandStats {
                handled: 0,
                unrouted: 0,
                discarded: 0,
            },
        }
    }

    pub fn add_service(
        &mut self,
        id: ServiceId,
        service: &'a mut dyn Service,
    ) -> Result<(), CapacityError> {
        self.manager.add_service(id, service)?;
        info!("服务 {} 已注册", id.0);
        Ok(())
    }

    pub fn manager(&self) -> &ServiceManager<'a, N> {
        &self.manager
    }

    pub fn stats(&self) -> CommandStats {
        self.stats
    }

    /// 每次迭代最多取一帧命令分发给服务，然后推进全部服务。没有帧时立即返回
    pub fn handle_services<C, R>(&mut self, clock: &C, receiver: &mut R)
    where
        C: Clock,
        R: PacketReceiver,
    {
        if receiver.available() {
            self.route_command(clock, receiver);
        }

        self.manager.step_all(clock);
    }

    fn route_command<C, R>(&mut self, clock: &C, receiver: &mut R)
    where
        C: Clock,
        R: PacketReceiver,
    {
        if receiver.read() == 0 {
            debug!("丢弃损坏的命令帧");
            self.stats.discarded = self.stats.discarded.wrapping_add(1);
            return;
        }

        let command = match ServiceCommand::parse(receiver.data()) {
            Some(command) => command,
            None => {
                debug!("丢弃空命令");
                self.stats.discarded = self.stats.discarded.wrapping_add(1);
                return;
            }
        };

        match self.manager.dispatch(&command, clock) {
            0 => {
                debug!("没有服务接受 {} 字节的命令", command.body.len());
                self.stats.unrouted = self.stats.unrouted.wrapping_add(1);
            }
            accepted => {
                debug!("命令已交给 {} 个服务", accepted);
                self.stats.handled = self.stats.handled.wrapping_add(1);
            }
        }
    }
}
