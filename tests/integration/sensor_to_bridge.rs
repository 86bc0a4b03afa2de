#[cfg(test)]
mod sensor_to_bridge_tests {
    use common::config::{NodeConfig, RadioSettings};
    use common::hal::simulator::{MockClock, SimAir, SimOutputPin, SimPins, SimRadio, SimSerial};
    use common::hal::{RadioTransport, SerialTransport, Transport};
    use common::protocol::{NodeId, Role, SensorKind, SensorReport};
    use microplants::{Board, Microplants, Tick};
    use common::hal::Clock;
    use microplants::Mode;
    use sensor::{CycleSummary, Service, ServiceId, WaterService};
    use std::cell::RefCell;
    use std::rc::Rc;

    const PERIOD_MS: u64 = 1_000;

    fn board<T: Transport>(
        transport: T,
        selection: &[u8],
        clock: &MockClock,
    ) -> (Board<T, SimSerial, SimPins, MockClock, MockClock, SimOutputPin>, SimSerial) {
        let host = SimSerial::new();
        host.feed(selection);
        let board = Board {
            transport,
            host: host.clone(),
            adc: SimPins::with_defaults(),
            clock: clock.clone(),
            delay: clock.clone(),
            debug_led: SimOutputPin::new(),
        };
        (board, host)
    }

    fn radio(air: &SimAir) -> RadioTransport<SimRadio> {
        RadioTransport::new(SimRadio::new(air.clone()), RadioSettings::default())
    }

    fn config() -> NodeConfig {
        NodeConfig {
            sensor_period_ms: PERIOD_MS,
            ..NodeConfig::default()
        }
    }

    fn no_services<'a>() -> Vec<(ServiceId, &'a mut dyn Service)> {
        Vec::new()
    }

    /// 记录收到的每条命令
    struct CommandLog {
        seen: Rc<RefCell<Vec<Vec<u8>>>>,
    }

    impl Service for CommandLog {
        fn name(&self) -> &str {
            "led"
        }

        fn step(&mut self, _clock: &dyn Clock) {}

        fn handle_command(&mut self, command: &[u8], _clock: &dyn Clock) -> bool {
            self.seen.borrow_mut().push(command.to_vec());
            true
        }
    }

    fn decode(bytes: &[u8]) -> SensorReport {
        SensorReport::decode(bytes).unwrap()
    }

    #[test]
    fn test_two_nodes_two_packets() {
        let air = SimAir::new();
        let clock = MockClock::new();

        let (sensor_board, sensor_host) = board(radio(&air), b"1", &clock);
        let (bridge_board, bridge_host) = board(radio(&air), b"0", &clock);
        let mut sensor = Microplants::setup(sensor_board, config(), no_services()).unwrap();
        let mut bridge = Microplants::setup(bridge_board, config(), no_services()).unwrap();
        assert_eq!(sensor.role(), Role::Sensor);
        assert_eq!(bridge.role(), Role::Bridge);
        assert_eq!(sensor.pipes().write, bridge.pipes().read);

        // 丢掉启动提示
        assert_eq!(sensor_host.take_output(), b"ROLE: sensor(1), bridge(0)?\r\nsensor\r\n");
        assert_eq!(bridge_host.take_output(), b"ROLE: sensor(1), bridge(0)?\r\nbridge\r\n");

        // 启动后一个完整周期内不发送
        assert_eq!(sensor.tick(), Tick::Sensor(None));
        assert_eq!(air.in_flight(), 0);

        clock.advance(PERIOD_MS);
        assert_eq!(
            sensor.tick(),
            Tick::Sensor(Some(CycleSummary { sent: 2, failed: 0 }))
        );
        assert_eq!(air.in_flight(), 2);

        // 网桥每步回显一个帧，原样写给主机
        bridge.tick();
        let first = decode(&bridge_host.take_output());
        assert_eq!(first.id, NodeId(1));
        assert_eq!(first.sensors.len(), 1);
        assert_eq!(first.sensors[0].kind, SensorKind::Temperature);
        assert!((first.sensors[0].value - 21.99).abs() < 0.01);

        bridge.tick();
        let second = decode(&bridge_host.take_output());
        assert_eq!(second.id, NodeId(2));
        assert_eq!(second.sensors.len(), 2);
        assert_eq!(second.sensors[0].kind, SensorKind::Light);
        assert_eq!(second.sensors[1].kind, SensorKind::Temperature);

        bridge.tick();
        assert!(bridge_host.take_output().is_empty());
        assert_eq!(air.in_flight(), 0);

        // 网桥的延时推进了共享时钟，下一个周期照常触发
        assert!(matches!(sensor.tick(), Tick::Sensor(_)));
        assert_eq!(sensor_host.take_output(), b"");
    }

    #[test]
    fn test_sensor_keeps_period_after_late_check() {
        let air = SimAir::new();
        let clock = MockClock::new();
        let (sensor_board, _) = board(radio(&air), b"1", &clock);
        let mut sensor = Microplants::setup(sensor_board, config(), no_services()).unwrap();

        // 迟到的检查只触发一次，不补发
        clock.advance(PERIOD_MS * 5);
        assert!(matches!(sensor.tick(), Tick::Sensor(Some(_))));
        assert_eq!(sensor.tick(), Tick::Sensor(None));
        assert_eq!(air.in_flight(), 2);

        clock.advance(PERIOD_MS - 1);
        assert_eq!(sensor.tick(), Tick::Sensor(None));
        clock.advance(1);
        assert!(matches!(sensor.tick(), Tick::Sensor(Some(_))));
        assert_eq!(air.in_flight(), 4);
    }

    #[test]
    fn test_failed_send_is_logged_and_skipped() {
        let air = SimAir::new();
        let clock = MockClock::new();
        let (sensor_board, _) = board(radio(&air), b"1", &clock);
        let mut sensor = Microplants::setup(sensor_board, config(), no_services()).unwrap();

        air.jam(2);
        clock.advance(PERIOD_MS);
        assert_eq!(
            sensor.tick(),
            Tick::Sensor(Some(CycleSummary { sent: 0, failed: 2 }))
        );
        assert_eq!(air.in_flight(), 0);

        clock.advance(PERIOD_MS);
        assert_eq!(
            sensor.tick(),
            Tick::Sensor(Some(CycleSummary { sent: 2, failed: 0 }))
        );
    }

    #[test]
    fn test_same_roles_over_serial_wire() {
        let clock = MockClock::new();
        let (a, b) = SimSerial::pair();

        let (sensor_board, _) = board(SerialTransport::new(a), b"1", &clock);
        let (bridge_board, bridge_host) = board(SerialTransport::new(b), b"0", &clock);
        let mut sensor = Microplants::setup(sensor_board, config(), no_services()).unwrap();
        let mut bridge = Microplants::setup(bridge_board, config(), no_services()).unwrap();
        bridge_host.take_output();

        clock.advance(PERIOD_MS);
        sensor.tick();

        bridge.tick();
        assert_eq!(decode(&bridge_host.take_output()).id, NodeId(1));
        bridge.tick();
        assert_eq!(decode(&bridge_host.take_output()).id, NodeId(2));
    }

    #[test]
    fn test_host_command_reaches_sensor_service() {
        let air = SimAir::new();
        let clock = MockClock::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut led = CommandLog { seen: seen.clone() };
        let pump = SimOutputPin::new();
        let mut water = WaterService::new(pump.clone(), 60_000, 5_000);

        let services: Vec<(ServiceId, &mut dyn Service)> =
            vec![(ServiceId(1), &mut led), (ServiceId(2), &mut water)];
        let (sensor_board, _) = board(radio(&air), b"1", &clock);
        let (bridge_board, bridge_host) = board(radio(&air), b"0", &clock);
        let mut sensor = Microplants::setup(sensor_board, config(), services).unwrap();
        let mut bridge = Microplants::setup(bridge_board, config(), no_services()).unwrap();

        bridge_host.feed(b"LEDON\n2:ON\n");
        bridge.tick();
        sensor.tick();
        assert_eq!(*seen.borrow(), [b"LEDON".to_vec()]);
        assert!(!pump.is_high());

        // 带编号的命令只交给水泵服务
        bridge.tick();
        sensor.tick();
        assert_eq!(seen.borrow().len(), 1);
        assert!(pump.is_high());

        // 每次迭代消费一帧，读管道不会积压
        for n in 0..50 {
            bridge_host.feed(format!("CMD{n}\n").as_bytes());
            bridge.tick();
            sensor.tick();
        }
        assert_eq!(seen.borrow().len(), 51);
        assert_eq!(seen.borrow()[50], b"CMD49".to_vec());
        assert!(air.peek(Role::Sensor.pipes().read).is_empty());

        match sensor.mode() {
            Mode::Sensor(node) => assert_eq!(node.services().stats().handled, 52),
            Mode::Bridge(_) => panic!("expected sensor mode"),
        }
    }
}
