use heapless::Vec;

use common::error::CapacityError;
use common::hal::Clock;

use super::{Service, ServiceCommand};

/// 服务编号
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServiceId(pub u8);

/// 已注册服务的有序集合。服务本体由调用方持有，这里只借用
pub struct ServiceManager<'a, const N: usize> {
    services: Vec<(ServiceId, &'a mut dyn Service), N>,
}

impl<'a, const N: usize> Default for ServiceManager<'a, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, const N: usize> ServiceManager<'a, N> {
    pub const fn new() -> Self {
        Self {
            services: Vec::new(),
        }
    }

    pub fn add_service(
        &mut self,
        id: ServiceId,
        service: &'a mut dyn Service,
    ) -> Result<(), CapacityError> {
        self.services
            .push((id, service))
            .map_err(|_| CapacityError { capacity: N })
    }

    pub fn count(&self) -> usize {
        self.services.len()
    }

    pub fn name(&self, id: ServiceId) -> Option<&str> {
        self.services
            .iter()
            .find(|(service_id, _)| *service_id == id)
            .map(|(_, service)| service.name())
    }

    /// 把命令交给它指向的服务，返回接受了命令的服务数
    pub fn dispatch(&mut self, command: &ServiceCommand<'_>, clock: &dyn Clock) -> usize {
        let mut accepted = 0;
        for (id, service) in self.services.iter_mut() {
            if command.addresses(*id) && service.handle_command(command.body, clock) {
                accepted += 1;
            }
        }
        accepted
    }

    /// 每个服务恰好推进一次
    pub fn step_all(&mut self, clock: &dyn Clock) {
        for (_, service) in self.services.iter_mut() {
            service.step(clock);
        }
    }
}
