//! 网桥转发给传感器节点的文本命令。
//!
//! `<编号>:<命令>` 只发给该编号的服务，不带编号的命令发给全部服务，例如 `1:ON`、`LEDON`。

use super::ServiceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceCommand<'p> {
    /// None 表示广播
    pub target: Option<ServiceId>,
    pub body: &'p [u8],
}

impl<'p> ServiceCommand<'p> {
    /// 解析一帧负载；命令体为空时返回 None
    pub fn parse(payload: &'p [u8]) -> Option<Self> {
        let (target, body) = match payload.iter().position(|&b| b == b':') {
            Some(split) => match parse_id(&payload[..split]) {
                Some(id) => (Some(id), &payload[split + 1..]),
                None => (None, payload),
            },
            None => (None, payload),
        };

        let body = trim_line_end(body);
        if body.is_empty() {
            return None;
        }
        Some(Self { target, body })
    }

    pub fn addresses(&self, id: ServiceId) -> bool {
        self.target.map_or(true, |target| target == id)
    }
}

fn parse_id(digits: &[u8]) -> Option<ServiceId> {
    if digits.is_empty() || digits.len() > 3 {
        return None;
    }

    let mut value: u16 = 0;
    for &digit in digits {
        if !digit.is_ascii_digit() {
            return None;
        }
        value = value * 10 + (digit - b'0') as u16;
    }
    u8::try_from(value).ok().map(ServiceId)
}

// 终端可能带上回车
fn trim_line_end(mut body: &[u8]) -> &[u8] {
    while let [rest @ .., b'\r' | b'\n'] = body {
        body = rest;
    }
    body
}
