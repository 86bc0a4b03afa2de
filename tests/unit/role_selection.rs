#[cfg(test)]
mod role_selection_tests {
    use common::config::ROLE_POLL_DELAY_MS;
    use common::hal::simulator::{MockClock, SimSerial};
    use common::hal::Clock;
    use common::protocol::Role;
    use microplants::role::{select_role, write_line, ROLE_PROMPT};

    #[test]
    fn test_prompt_and_sensor_echo() {
        let mut host = SimSerial::new();
        let mut clock = MockClock::new();
        host.feed(b"1");

        let role = select_role(&mut host, &mut clock, ROLE_POLL_DELAY_MS).unwrap();
        assert_eq!(role, Role::Sensor);
        assert_eq!(
            host.take_output(),
            b"ROLE: sensor(1), bridge(0)?\r\nsensor\r\n"
        );
        // 输入已就绪，不需要等待
        assert_eq!(clock.now_ms(), 0);
    }

    #[test]
    fn test_any_other_byte_selects_bridge() {
        for byte in [b'0', b'2', b'b', b'\n'] {
            let mut host = SimSerial::new();
            let mut clock = MockClock::new();
            host.feed(&[byte]);

            let role = select_role(&mut host, &mut clock, ROLE_POLL_DELAY_MS).unwrap();
            assert_eq!(role, Role::Bridge);
            assert!(host.take_output().ends_with(b"bridge\r\n"));
        }
    }

    #[test]
    fn test_only_one_byte_is_consumed() {
        let mut host = SimSerial::new();
        let mut clock = MockClock::new();
        host.feed(b"0\nLEDON\n");

        select_role(&mut host, &mut clock, ROLE_POLL_DELAY_MS).unwrap();
        assert_eq!(host.unread(), 7);
    }

    #[test]
    fn test_polls_until_input_arrives() {
        let mut host = SimSerial::new();
        let input = host.clone();
        let clock = MockClock::new();

        // 延时由时钟推进，输入在第三次轮询时到达
        struct ArrivingInput {
            clock: MockClock,
            input: SimSerial,
            polls: u32,
        }

        impl embedded_hal::blocking::delay::DelayMs<u32> for ArrivingInput {
            fn delay_ms(&mut self, ms: u32) {
                self.clock.advance(ms as u64);
                self.polls += 1;
                if self.polls == 3 {
                    self.input.feed(b"1");
                }
            }
        }

        let mut delay = ArrivingInput {
            clock: clock.clone(),
            input,
            polls: 0,
        };
        let role = select_role(&mut host, &mut delay, ROLE_POLL_DELAY_MS).unwrap();

        assert_eq!(role, Role::Sensor);
        assert_eq!(delay.polls, 3);
        assert_eq!(clock.now_ms(), 3 * ROLE_POLL_DELAY_MS as u64);
    }

    #[test]
    fn test_write_line_appends_crlf() {
        let mut host = SimSerial::new();
        write_line(&mut host, ROLE_PROMPT.as_bytes()).unwrap();
        let out = host.take_output();
        assert!(out.starts_with(ROLE_PROMPT.as_bytes()));
        assert!(out.ends_with(b"\r\n"));
    }
}
