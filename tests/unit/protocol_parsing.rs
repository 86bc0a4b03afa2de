#[cfg(test)]
mod protocol_parsing_tests {
    use common::config::{MAX_FRAME_PAYLOAD, PIPE_A, PIPE_B};
    use common::protocol::{Frame, FrameInbox, NodeId, Reading, Role, SensorKind, SensorReport};
    use common::utils::ScratchBuffer;
    use common::TransportError;

    #[test]
    fn test_roles_use_swapped_pipes() {
        let sensor = Role::Sensor.pipes();
        let bridge = Role::Bridge.pipes();

        assert_eq!(sensor.read, PIPE_A);
        assert_eq!(sensor.write, PIPE_B);
        assert_eq!(sensor.read, bridge.write);
        assert_eq!(sensor.write, bridge.read);
        assert_ne!(sensor.read, sensor.write);
    }

    #[test]
    fn test_role_selection_byte() {
        assert_eq!(Role::from_selection(b'1'), Role::Sensor);
        assert_eq!(Role::from_selection(b'0'), Role::Bridge);
        assert_eq!(Role::from_selection(b'x'), Role::Bridge);
        assert_eq!(Role::Sensor.label(), "sensor");
        assert_eq!(Role::Bridge.label(), "bridge");
    }

    #[test]
    fn test_frame_wire_format() {
        let frame = Frame::encode(b"LEDON").unwrap();
        assert_eq!(frame.as_bytes(), b"\x05LEDON");
        assert_eq!(frame.len(), 5);
        assert_eq!(frame.payload(), b"LEDON");

        assert_eq!(Frame::decode(b"\x05LEDON"), Some(frame));
        assert_eq!(Frame::decode(&[0]), None);
        assert_eq!(Frame::decode(b"\x09short"), None);
        assert_eq!(Frame::decode(&[]), None);
    }

    #[test]
    fn test_frame_payload_limit() {
        let max = [b'a'; MAX_FRAME_PAYLOAD];
        assert!(Frame::encode(&max).is_ok());

        let over = [b'a'; MAX_FRAME_PAYLOAD + 1];
        assert_eq!(Frame::encode(&over), Err(TransportError::Overflow));
    }

    #[test]
    fn test_inbox_discards_corrupt_frames() {
        let mut inbox = FrameInbox::new();
        inbox.accept(b"\x03abc");
        assert_eq!(inbox.take_len(), 3);
        assert_eq!(inbox.payload(), b"abc");

        // 声明长度与实际不符同样视为损坏
        inbox.accept(b"\x04ab");
        assert!(inbox.is_pending());
        assert_eq!(inbox.take_len(), 0);
        assert_eq!(inbox.payload(), b"abc");
        assert_eq!(inbox.discarded(), 1);
    }

    #[test]
    fn test_sensor_report_through_scratch_buffer() {
        let mut sensors = heapless::Vec::new();
        sensors
            .push(Reading {
                kind: SensorKind::Temperature,
                value: 22.0,
            })
            .unwrap();
        let report: SensorReport = SensorReport::new(NodeId(1), sensors);

        let mut scratch = ScratchBuffer::<128>::new();
        let payload = scratch.encode(&report).unwrap();
        assert_eq!(payload, br#"{"id":1,"sensors":[{"type":"temperature","value":22.0}]}"#);

        let decoded: SensorReport = SensorReport::decode(payload).unwrap();
        assert_eq!(decoded, report);
    }
}
