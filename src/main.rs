//! 模拟器入口：本进程的标准输入输出充当主机串口，后台另有一个传感器节点，
//! 两者共享同一段模拟空中信道。选择网桥角色即可看到实时数据。

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use common::config::{NodeConfig, RadioSettings};
use common::hal::simulator::{SimAir, SimClock, SimDelay, SimOutputPin, SimPins, SimRadio, SimSerial};
use common::hal::RadioTransport;
use common::protocol::Role;
use log::{error, info};
use microplants::{wiring, Board, BootError, Microplants};
use sensor::Service;

type SimNode<'a> = Microplants<'a, RadioTransport<SimRadio>, SimSerial, SimPins, SimClock, SimDelay>;

fn board(air: &SimAir, host: SimSerial) -> Board<RadioTransport<SimRadio>, SimSerial, SimPins, SimClock, SimDelay, SimOutputPin> {
    Board {
        transport: RadioTransport::new(SimRadio::new(air.clone()), RadioSettings::default()),
        host,
        adc: SimPins::with_defaults(),
        clock: SimClock::new(),
        delay: SimDelay,
        debug_led: SimOutputPin::new(),
    }
}

/// 传感器节点不做节流，模拟时让出一点 CPU
fn drive(mut node: SimNode<'_>) -> ! {
    loop {
        node.tick();
        if node.role() == Role::Sensor {
            thread::sleep(Duration::from_millis(1));
        }
    }
}

fn run_node(air: SimAir, host: SimSerial) -> Result<(), BootError> {
    let [(id1, mut water1), (id2, mut water2)] =
        wiring::water_services(SimOutputPin::new(), SimOutputPin::new());
    let services: [(_, &mut dyn Service); 2] = [(id1, &mut water1), (id2, &mut water2)];

    let node = Microplants::setup(board(&air, host), NodeConfig::default(), services)?;
    drive(node)
}

fn main() {
    env_logger::init();
    info!("启动 Microplants（模拟器模式）");

    let air = SimAir::new();

    // 后台传感器节点，自动选择传感器角色
    let sensor_air = air.clone();
    thread::spawn(move || {
        let host = SimSerial::new();
        host.feed(b"1");
        if let Err(err) = run_node(sensor_air, host) {
            error!("后台传感器节点启动失败: {}", err);
        }
    });

    // 标准输入 -> 主机串口
    let host = SimSerial::new();
    let input = host.clone();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    input.feed(line.as_bytes());
                    input.feed(b"\n");
                }
                Err(_) => break,
            }
        }
    });

    // 主机串口 -> 标准输出
    let output = host.clone();
    thread::spawn(move || loop {
        let bytes = output.take_output();
        if !bytes.is_empty() {
            let mut stdout = io::stdout().lock();
            let _ = stdout.write_all(&bytes);
            let _ = stdout.flush();
        }
        thread::sleep(Duration::from_millis(10));
    });

    if let Err(err) = run_node(air, host) {
        error!("节点启动失败: {}", err);
        std::process::exit(1);
    }
}
