//! 启动时的角色选择提示

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::serial::{Read, Write};

use common::protocol::Role;

use crate::error::BootError;

pub const ROLE_PROMPT: &str = "ROLE: sensor(1), bridge(0)?";

/// 输出提示并等待操作员输入一个字节，然后回显角色名称。
///
/// 这是整个系统唯一的阻塞等待，只发生在进入主循环之前。
pub fn select_role<H, D>(host: &mut H, delay: &mut D, poll_ms: u32) -> Result<Role, BootError>
where
    H: Read<u8> + Write<u8>,
    D: DelayMs<u32>,
{
    write_line(host, ROLE_PROMPT.as_bytes())?;

    let selection = loop {
        match host.read() {
            Ok(byte) => break byte,
            Err(nb::Error::WouldBlock) => delay.delay_ms(poll_ms),
            Err(nb::Error::Other(_)) => return Err(BootError::HostLink),
        }
    };

    let role = Role::from_selection(selection);
    write_line(host, role.label().as_bytes())?;
    Ok(role)
}

/// 写一行文本到主机，附加 CRLF
pub fn write_line<H: Write<u8>>(host: &mut H, text: &[u8]) -> Result<(), BootError> {
    for &byte in text.iter().chain(b"\r\n".iter()) {
        nb::block!(host.write(byte)).map_err(|_| BootError::HostLink)?;
    }
    nb::block!(host.flush()).map_err(|_| BootError::HostLink)
}
