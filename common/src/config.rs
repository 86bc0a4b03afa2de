//! 固件编译期配置：引脚分配、管道地址、缓冲区容量与调度周期

/// 单片机引脚编号
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pin(pub u8);

/// 独立运行时的调试指示灯
pub const DEBUG_PIN: Pin = Pin(2);
/// 无线电芯片使能引脚
pub const CE_PIN: Pin = Pin(9);
/// 无线电芯片 SPI 片选引脚
pub const CSN_PIN: Pin = Pin(10);

// 模拟输入 A0..A3 依次对应 14..17
pub const WATER_PIN_1: Pin = Pin(14);
pub const WATER_PIN_2: Pin = Pin(15);
pub const LIGHT_PIN: Pin = Pin(16);
pub const TEMP_PIN: Pin = Pin(17);

/// 传感器节点读取、网桥节点写入的管道
pub const PIPE_A: u64 = 0xF0F0_F0F0_D2;
/// 网桥节点读取、传感器节点写入的管道
pub const PIPE_B: u64 = 0xF0F0_F0F0_E1;

/// 共享 JSON 编码缓冲区容量（字节）
pub const JSON_BUFFER_SIZE: usize = 128;

/// 单帧负载上限，由 1 字节长度前缀决定
pub const MAX_FRAME_PAYLOAD: usize = u8::MAX as usize;

/// 传感器数据发送周期
pub const SENSOR_PERIOD_MS: u64 = 5_000;
/// 网桥每次循环末尾的节流延时
pub const BRIDGE_POLL_DELAY_MS: u32 = 30;
/// 等待角色选择输入时的轮询间隔
pub const ROLE_POLL_DELAY_MS: u32 = 50;

pub const MAX_NODES: usize = 4;
pub const MAX_SENSORS_PER_NODE: usize = 2;
pub const MAX_SERVICES: usize = 4;

/// 两次浇水之间的间隔
pub const WATER_INTERVAL_MS: u64 = 60 * 60 * 1000;
/// 单次浇水持续时间
pub const WATER_DURATION_MS: u64 = 10 * 1000;

pub const RADIO_CHANNEL: u8 = 76;
/// 发射功率档位 (0..=3)
pub const RADIO_POWER: u8 = 3;

/// 无线电信道与功率
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RadioSettings {
    pub channel: u8,
    pub power: u8,
}

impl Default for RadioSettings {
    fn default() -> Self {
        Self {
            channel: RADIO_CHANNEL,
            power: RADIO_POWER,
        }
    }
}

/// 运行期可调参数，测试中可以注入更短的周期
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NodeConfig {
    pub sensor_period_ms: u64,
    pub bridge_poll_delay_ms: u32,
    pub role_poll_delay_ms: u32,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            sensor_period_ms: SENSOR_PERIOD_MS,
            bridge_poll_delay_ms: BRIDGE_POLL_DELAY_MS,
            role_poll_delay_ms: ROLE_POLL_DELAY_MS,
        }
    }
}
