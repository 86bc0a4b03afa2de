#[cfg(test)]
mod bridge_commands_tests {
    use common::config::{NodeConfig, RadioSettings, BRIDGE_POLL_DELAY_MS, JSON_BUFFER_SIZE};
    use common::hal::simulator::{MockClock, SimAir, SimOutputPin, SimPins, SimRadio, SimSerial};
    use common::hal::{Clock, RadioTransport};
    use common::protocol::Role;
    use microplants::{Board, Microplants, Mode, Tick};
    use sensor::{Service, ServiceId};

    type Bridge<'a> = Microplants<'a, RadioTransport<SimRadio>, SimSerial, SimPins, MockClock, MockClock>;

    struct Rig<'a> {
        air: SimAir,
        host: SimSerial,
        clock: MockClock,
        node: Bridge<'a>,
    }

    fn rig<'a>() -> Rig<'a> {
        let air = SimAir::new();
        let clock = MockClock::new();
        let host = SimSerial::new();
        host.feed(b"0");

        let board = Board {
            transport: RadioTransport::new(SimRadio::new(air.clone()), RadioSettings::default()),
            host: host.clone(),
            adc: SimPins::new(),
            clock: clock.clone(),
            delay: clock.clone(),
            debug_led: SimOutputPin::new(),
        };
        let services: Vec<(ServiceId, &'a mut dyn Service)> = Vec::new();
        let node = Microplants::setup(board, NodeConfig::default(), services).unwrap();
        host.take_output();

        Rig {
            air,
            host,
            clock,
            node,
        }
    }

    impl Rig<'_> {
        /// 网桥写管道上已发出的帧
        fn sent(&self) -> Vec<Vec<u8>> {
            self.air.peek(Role::Bridge.pipes().write)
        }

        fn discarded(&self) -> u32 {
            match self.node.mode() {
                Mode::Bridge(bridge) => bridge.discarded(),
                Mode::Sensor(_) => panic!("expected bridge mode"),
            }
        }
    }

    #[test]
    fn test_host_line_becomes_one_packet() {
        let mut rig = rig();
        rig.host.feed(b"LEDON\n");

        assert_eq!(rig.node.tick(), Tick::Bridge);
        assert_eq!(rig.sent(), vec![b"\x05LEDON".to_vec()]);
        assert!(rig.host.take_output().is_empty());

        // 固定节流延时
        assert_eq!(rig.clock.now_ms(), BRIDGE_POLL_DELAY_MS as u64);
    }

    #[test]
    fn test_zero_length_frame_is_dropped() {
        let mut rig = rig();
        rig.air.inject(Role::Bridge.pipes().read, b"\x02ok");
        rig.node.tick();
        assert_eq!(rig.host.take_output(), b"ok");

        rig.air.inject(Role::Bridge.pipes().read, &[0]);
        rig.node.tick();
        assert!(rig.host.take_output().is_empty());
        assert!(rig.sent().is_empty());
        assert_eq!(rig.discarded(), 1);

        // 之后的帧正常处理
        rig.air.inject(Role::Bridge.pipes().read, b"\x03abc");
        rig.node.tick();
        assert_eq!(rig.host.take_output(), b"abc");
    }

    #[test]
    fn test_overlong_line_is_truncated() {
        let mut rig = rig();
        let mut line: Vec<u8> = (0..JSON_BUFFER_SIZE * 2).map(|i| b'a' + (i % 26) as u8).collect();
        line.extend_from_slice(b"\nLEDOFF\n");
        rig.host.feed(&line);

        rig.node.tick();
        rig.node.tick();

        let sent = rig.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].len(), JSON_BUFFER_SIZE);
        assert_eq!(sent[0][0] as usize, JSON_BUFFER_SIZE - 1);
        assert_eq!(&sent[0][1..], &line[..JSON_BUFFER_SIZE - 1]);
        // 截断的余下部分不会变成新的命令
        assert_eq!(sent[1], b"\x06LEDOFF".to_vec());
    }

    #[test]
    fn test_forward_precedes_drain_in_one_tick() {
        let mut rig = rig();
        rig.host.feed(b"PING\n");
        rig.air.inject(Role::Bridge.pipes().read, b"\x04PONG");

        rig.node.tick();
        assert_eq!(rig.sent(), vec![b"\x04PING".to_vec()]);
        assert_eq!(rig.host.take_output(), b"PONG");
        assert_eq!(rig.air.in_flight(), 1);
    }

    #[test]
    fn test_radio_down_does_not_stop_loop() {
        let mut rig = rig();
        rig.air.jam(1);
        rig.host.feed(b"lost\nkept\n");

        rig.node.tick();
        rig.node.tick();
        assert_eq!(rig.sent(), vec![b"\x04kept".to_vec()]);
    }
}
