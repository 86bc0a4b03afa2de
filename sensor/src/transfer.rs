//! 默认换算函数，输入为 10 位 ADC 原始值（0..=1023，参考电压 5 V）

const ADC_FULL_SCALE: f32 = 1023.0;

/// 10 mV/°C 的模拟温度传感器，返回摄氏度
pub fn read_temperature(raw: u16) -> f32 {
    raw as f32 * 500.0 / ADC_FULL_SCALE
}

/// 光敏分压，返回满量程百分比
pub fn read_light(raw: u16) -> f32 {
    raw as f32 * 100.0 / ADC_FULL_SCALE
}
