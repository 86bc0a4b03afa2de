//! Microplants 节点核心：启动时选定角色，之后在单线程协作式主循环中
//! 执行传感器节点或网桥节点的行为。

#![cfg_attr(not(feature = "simulator"), no_std)]

pub mod error;
pub mod role;
pub mod wiring;

pub use error::BootError;

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;
use embedded_hal::serial::{Read, Write};

use bridge::BridgeNode;
use common::config::{NodeConfig, JSON_BUFFER_SIZE};
use common::hal::{AnalogInput, Clock, Transport};
use common::logging::{info, warn};
use common::protocol::{PipePair, Role};
use common::utils::ScratchBuffer;
use sensor::{CycleSummary, SensorNode, Service, ServiceId};

/// 启动时交给核心的全部外设
pub struct Board<T, H, A, C, D, L> {
    pub transport: T,
    pub host: H,
    pub adc: A,
    pub clock: C,
    pub delay: D,
    pub debug_led: L,
}

/// 选定角色后的运行模式
pub enum Mode<'a, A> {
    Sensor(SensorNode<'a, A>),
    Bridge(BridgeNode),
}

/// 一次主循环迭代做了什么
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tick {
    /// 传感器节点；定时器到期时带有本周期统计
    Sensor(Option<CycleSummary>),
    Bridge,
}

pub struct Microplants<'a, T, H, A, C, D> {
    role: Role,
    pipes: PipePair,
    config: NodeConfig,
    transport: T,
    host: H,
    clock: C,
    delay: D,
    scratch: ScratchBuffer<JSON_BUFFER_SIZE>,
    mode: Mode<'a, A>,
}

impl<'a, T, H, A, C, D> Microplants<'a, T, H, A, C, D>
where
    T: Transport,
    H: Read<u8> + Write<u8>,
    A: AnalogInput,
    C: Clock,
    D: DelayMs<u32>,
{
    /// 启动流程：点亮调试灯，询问角色，配置管道，传感器节点再注册通道与服务。
    ///
    /// 网桥节点忽略 `services`。任何一步失败都是致命的。
    pub fn setup<L, S>(board: Board<T, H, A, C, D, L>, config: NodeConfig, services: S) -> Result<Self, BootError>
    where
        L: OutputPin,
        S: IntoIterator<Item = (ServiceId, &'a mut dyn Service)>,
    {
        let Board {
            mut transport,
            mut host,
            adc,
            clock,
            mut delay,
            mut debug_led,
        } = board;

        if debug_led.set_high().is_err() {
            warn!("调试灯点亮失败");
        }

        let role = role::select_role(&mut host, &mut delay, config.role_poll_delay_ms)?;
        info!("角色: {}", role.label());

        let pipes = role.pipes();
        transport.begin(pipes)?;

        let mode = match role {
            Role::Sensor => {
                let mut node = SensorNode::new(adc, config.sensor_period_ms);
                wiring::register_sensors(&mut node)?;
                for (id, service) in services {
                    node.services_mut().add_service(id, service)?;
                }
                node.arm(&clock);
                info!(
                    "传感器节点就绪: {} 个节点, 周期 {} ms",
                    node.aggregator().count(),
                    config.sensor_period_ms
                );
                Mode::Sensor(node)
            }
            Role::Bridge => {
                info!("网桥节点就绪");
                Mode::Bridge(BridgeNode::new())
            }
        };

        Ok(Self {
            role,
            pipes,
            config,
            transport,
            host,
            clock,
            delay,
            scratch: ScratchBuffer::new(),
            mode,
        })
    }

    /// 主循环的一次迭代
    pub fn tick(&mut self) -> Tick {
        match &mut self.mode {
            Mode::Sensor(node) => {
                Tick::Sensor(node.step(&self.clock, &mut self.transport, &mut self.scratch))
            }
            Mode::Bridge(bridge) => {
                bridge.step(
                    &mut self.transport,
                    &mut self.host,
                    &mut self.delay,
                    self.config.bridge_poll_delay_ms,
                );
                Tick::Bridge
            }
        }
    }

    /// 永不返回的主循环
    pub fn run(mut self) -> ! {
        loop {
            self.tick();
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn pipes(&self) -> PipePair {
        self.pipes
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub fn mode(&self) -> &Mode<'a, A> {
        &self.mode
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
