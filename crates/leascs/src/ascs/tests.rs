//! Tests for the ASCS server core

#[cfg(test)]
mod tests {
    use super::super::constants::*;
    use super::super::error::{AscsError, AscsErrorCode, RejectReason};
    use super::super::events::AscsEvent;
    use super::super::server::AscsServer;
    use super::super::state_machine::{transition, ClientOperation, DrivingEvent};
    use super::super::types::*;
    use crate::le_audio::{
        AudioContextMask, AudioLocation, CodecId, FrameDuration, Framing, Metadata, Phy, PhyMask,
        Role, SamplingFrequency, TargetLatency, TargetPhy,
    };

    const CON_HANDLE: ConnectionHandle = 0x0040;

    fn lc3_48_2_specific() -> SpecificCodecConfiguration {
        SpecificCodecConfiguration {
            sampling_frequency: Some(SamplingFrequency::Hz48000),
            frame_duration: Some(FrameDuration::Us10000),
            audio_channel_allocation: Some(AudioLocation::FRONT_LEFT),
            octets_per_codec_frame: Some(100),
            codec_frame_blocks_per_sdu: Some(1),
        }
    }

    fn lc3_request() -> ClientCodecConfigurationRequest {
        ClientCodecConfigurationRequest {
            target_latency: TargetLatency::Balanced,
            target_phy: TargetPhy::Le2M,
            codec_id: CodecId::lc3(),
            specific_codec_configuration: lc3_48_2_specific(),
        }
    }

    fn sample_qos() -> QosConfiguration {
        QosConfiguration {
            cig_id: 1,
            cis_id: 2,
            sdu_interval_us: 10_000,
            framing: Framing::Unframed,
            phy: Phy::Le2M,
            max_sdu_size: 100,
            retransmission_number: 5,
            max_transport_latency_ms: 20,
            presentation_delay_us: 40_000,
        }
    }

    fn sample_codec_configuration() -> CodecConfiguration {
        CodecConfiguration {
            framing: Framing::Unframed,
            preferred_phy: PhyMask(PhyMask::LE_2M),
            preferred_retransmission_number: 5,
            max_transport_latency_ms: 25,
            presentation_delay_min_us: 0,
            presentation_delay_max_us: 40_000,
            preferred_presentation_delay_min_us: 0,
            preferred_presentation_delay_max_us: 0,
            codec_id: CodecId::lc3(),
            specific_codec_configuration: lc3_48_2_specific(),
        }
    }

    fn media_metadata() -> Metadata {
        Metadata {
            streaming_audio_contexts: Some(AudioContextMask::MEDIA),
            ..Default::default()
        }
    }

    // -- codec: specific codec configuration LTVs --

    #[test]
    fn test_specific_codec_configuration_wire_format() {
        let config = lc3_48_2_specific();
        let bytes = config.to_bytes();
        assert_eq!(
            hex::encode(&bytes),
            "02010802020105030100000003046400020501"
        );

        let parsed = SpecificCodecConfiguration::parse(&bytes).unwrap();
        assert_eq!(parsed, config);
        assert_eq!(parsed.mask(), SpecificCodecConfigurationMask::all());
    }

    #[test]
    fn test_specific_codec_configuration_masked_serialize() {
        let config = lc3_48_2_specific();
        let mask = SpecificCodecConfigurationMask(
            SpecificCodecConfigurationMask::SAMPLING_FREQUENCY
                | SpecificCodecConfigurationMask::OCTETS_PER_CODEC_FRAME,
        );
        assert_eq!(config.serialized_length_with_mask(mask), 3 + 4);

        let mut buffer = [0u8; 16];
        let written = config.serialize_with_mask(mask, &mut buffer).unwrap();
        assert_eq!(hex::encode(&buffer[..written]), "02010803046400");

        // A masked-in field that is absent contributes nothing
        let sparse = SpecificCodecConfiguration {
            codec_frame_blocks_per_sdu: Some(2),
            ..Default::default()
        };
        let written = sparse
            .serialize_with_mask(SpecificCodecConfigurationMask::all(), &mut buffer)
            .unwrap();
        assert_eq!(hex::encode(&buffer[..written]), "020502");
    }

    #[test]
    fn test_specific_codec_configuration_unknown_type_skipped() {
        // 0x06 is not a defined type; its declared bytes are consumed
        let bytes = hex::decode("0306aabb020108").unwrap();
        let parsed = SpecificCodecConfiguration::parse(&bytes).unwrap();
        assert_eq!(parsed.sampling_frequency, Some(SamplingFrequency::Hz48000));
        assert_eq!(parsed.frame_duration, None);
        assert_eq!(parsed.octets_per_codec_frame, None);
    }

    #[test]
    fn test_specific_codec_configuration_declared_length_mismatch() {
        // Sampling frequency entry with length 5 instead of the defined 2
        let bytes = [0x05, 0x01, 0x08, 0x00, 0x00, 0x00];
        assert_eq!(
            SpecificCodecConfiguration::parse(&bytes),
            Err(AscsError::InvalidLength)
        );
    }

    #[test]
    fn test_specific_codec_configuration_truncated() {
        // Declared length runs past the end of the buffer
        let bytes = [0x05, 0x03, 0x01];
        assert_eq!(
            SpecificCodecConfiguration::parse(&bytes),
            Err(AscsError::InvalidLength)
        );
        // Zero-length entry
        assert_eq!(
            SpecificCodecConfiguration::parse(&[0x00]),
            Err(AscsError::InvalidLength)
        );
    }

    #[test]
    fn test_specific_codec_configuration_invalid_index() {
        // Sampling frequency index 0x00 is not defined
        assert_eq!(
            SpecificCodecConfiguration::parse(&[0x02, 0x01, 0x00]),
            Err(AscsError::UnsupportedConfigurationParameterValue(
                RejectReason::SpecificCodecConfiguration
            ))
        );
        // Frame duration index 0x02 is not defined
        assert_eq!(
            SpecificCodecConfiguration::parse(&[0x02, 0x02, 0x02]),
            Err(AscsError::UnsupportedConfigurationParameterValue(
                RejectReason::SpecificCodecConfiguration
            ))
        );
    }

    // -- codec: fixed-layout records --

    #[test]
    fn test_codec_configuration_round_trip() {
        let config = sample_codec_configuration();
        let bytes = config.to_bytes().unwrap();
        assert_eq!(
            bytes.len(),
            ASCS_CODEC_CONFIGURATION_FIXED_SIZE
                + config.specific_codec_configuration.serialized_length()
        );

        let (parsed, consumed) = CodecConfiguration::parse(&bytes).unwrap();
        assert_eq!(parsed, config);
        assert_eq!(consumed, bytes.len());
    }

    #[test]
    fn test_codec_configuration_max_transport_latency_range() {
        let mut bytes = sample_codec_configuration().to_bytes().unwrap();
        // Latency lives at offset 3..5
        bytes[3..5].copy_from_slice(&(ASCS_MAX_TRANSPORT_LATENCY_MS_MAX + 1).to_le_bytes());
        assert_eq!(
            CodecConfiguration::parse(&bytes),
            Err(AscsError::InvalidConfigurationParameterValue(
                RejectReason::MaxTransportLatency
            ))
        );
        bytes[3..5].copy_from_slice(&(ASCS_MAX_TRANSPORT_LATENCY_MS_MIN - 1).to_le_bytes());
        assert_eq!(
            CodecConfiguration::parse(&bytes),
            Err(AscsError::InvalidConfigurationParameterValue(
                RejectReason::MaxTransportLatency
            ))
        );
    }

    #[test]
    fn test_codec_configuration_presentation_delay_ordering() {
        let mut bytes = sample_codec_configuration().to_bytes().unwrap();
        // min (offset 5..8) above max (offset 8..11)
        bytes[5..8].copy_from_slice(&[0x30, 0x75, 0x00]); // 30000
        bytes[8..11].copy_from_slice(&[0x20, 0x4E, 0x00]); // 20000
        assert_eq!(
            CodecConfiguration::parse(&bytes),
            Err(AscsError::InvalidConfigurationParameterValue(
                RejectReason::PresentationDelay
            ))
        );
    }

    #[test]
    fn test_codec_configuration_truncated() {
        let bytes = sample_codec_configuration().to_bytes().unwrap();
        assert_eq!(
            CodecConfiguration::parse(&bytes[..10]),
            Err(AscsError::InvalidLength)
        );

        // Specific-configuration length byte claims more than is present
        let mut bytes = bytes;
        bytes[ASCS_CODEC_CONFIGURATION_FIXED_SIZE - 1] = 200;
        assert_eq!(
            CodecConfiguration::parse(&bytes),
            Err(AscsError::InvalidLength)
        );
    }

    #[test]
    fn test_client_codec_configuration_request_round_trip() {
        let request = lc3_request();
        let bytes = request.to_bytes();
        assert_eq!(
            bytes.len(),
            ASCS_CODEC_CONFIGURATION_REQUEST_FIXED_SIZE
                + request.specific_codec_configuration.serialized_length()
        );

        let (parsed, consumed) = ClientCodecConfigurationRequest::parse(&bytes).unwrap();
        assert_eq!(parsed, request);
        assert_eq!(consumed, bytes.len());
    }

    #[test]
    fn test_client_codec_configuration_request_unknown_coding_format() {
        let mut bytes = lc3_request().to_bytes();
        // Coding format lives at offset 2
        bytes[2] = 0x55;
        assert_eq!(
            ClientCodecConfigurationRequest::parse(&bytes),
            Err(AscsError::UnsupportedConfigurationParameterValue(
                RejectReason::CodecId
            ))
        );
    }

    #[test]
    fn test_qos_configuration_wire_format() {
        let qos = sample_qos();
        let bytes = qos.to_bytes().unwrap();
        assert_eq!(hex::encode(&bytes), "010210270000026400051400409c00");

        let parsed = QosConfiguration::parse(&bytes).unwrap();
        assert_eq!(parsed, qos);
    }

    #[test]
    fn test_qos_configuration_validation() {
        let patch = |offset: usize, replacement: &[u8]| {
            let mut bytes = sample_qos().to_bytes().unwrap();
            bytes[offset..offset + replacement.len()].copy_from_slice(replacement);
            QosConfiguration::parse(&bytes)
        };

        // SDU interval below 0xFF and above 0xFFFFF
        assert_eq!(
            patch(2, &[0xFE, 0x00, 0x00]),
            Err(AscsError::InvalidConfigurationParameterValue(
                RejectReason::SduInterval
            ))
        );
        assert_eq!(
            patch(2, &[0x00, 0x00, 0x10]),
            Err(AscsError::InvalidConfigurationParameterValue(
                RejectReason::SduInterval
            ))
        );
        // Framing 0x02 is not defined
        assert_eq!(
            patch(5, &[0x02]),
            Err(AscsError::InvalidConfigurationParameterValue(
                RejectReason::Framing
            ))
        );
        // PHY 0x00 is not defined
        assert_eq!(
            patch(6, &[0x00]),
            Err(AscsError::InvalidConfigurationParameterValue(
                RejectReason::Phy
            ))
        );
        // Max SDU above 0xFFF
        assert_eq!(
            patch(7, &[0x00, 0x10]),
            Err(AscsError::InvalidConfigurationParameterValue(
                RejectReason::MaximumSduSize
            ))
        );
        // Max transport latency above 4000 ms
        assert_eq!(
            patch(10, &[0xA1, 0x0F]),
            Err(AscsError::InvalidConfigurationParameterValue(
                RejectReason::MaxTransportLatency
            ))
        );
    }

    #[test]
    fn test_qos_configuration_truncated() {
        let bytes = sample_qos().to_bytes().unwrap();
        assert_eq!(
            QosConfiguration::parse(&bytes[..ASCS_QOS_CONFIGURATION_SIZE - 1]),
            Err(AscsError::InvalidLength)
        );
    }

    #[test]
    fn test_control_point_response_round_trip() {
        let response = ControlPointResponse {
            ase_id: 1,
            response_code: AscsErrorCode::RejectedConfigurationParameterValue,
            reason: ASCS_REJECT_REASON_INVALID_ASE_CIS_MAPPING,
        };
        let bytes = response.to_bytes();
        assert_eq!(bytes, vec![0x01, 0x08, 0x0A]);
        assert_eq!(ControlPointResponse::parse(&bytes).unwrap(), response);
    }

    #[test]
    fn test_characteristic_value_per_state() {
        let mut record = AseRecord::new(1, Role::Sink);
        assert_eq!(record.characteristic_value().unwrap(), vec![0x00]);

        record.state = AseState::Releasing;
        assert_eq!(record.characteristic_value().unwrap(), vec![0x06]);

        record.state = AseState::CodecConfigured;
        record.codec_configuration = sample_codec_configuration();
        let value = record.characteristic_value().unwrap();
        assert_eq!(value[0], ASCS_STATE_CODEC_CONFIGURED);
        assert_eq!(value[1..], record.codec_configuration.to_bytes().unwrap());

        record.state = AseState::QosConfigured;
        record.qos_configuration = sample_qos();
        let value = record.characteristic_value().unwrap();
        assert_eq!(value[0], ASCS_STATE_QOS_CONFIGURED);
        assert_eq!(value.len(), 1 + ASCS_QOS_CONFIGURATION_SIZE);

        record.state = AseState::Streaming;
        record.metadata = media_metadata();
        let metadata_bytes = record.metadata.to_bytes();
        let value = record.characteristic_value().unwrap();
        assert_eq!(value[0], ASCS_STATE_STREAMING);
        assert_eq!(value[1], 1); // cig_id
        assert_eq!(value[2], 2); // cis_id
        assert_eq!(value[3] as usize, metadata_bytes.len());
        assert_eq!(value[4..], metadata_bytes);
    }

    // -- state machine --

    const ALL_STATES: [AseState; 7] = [
        AseState::Idle,
        AseState::CodecConfigured,
        AseState::QosConfigured,
        AseState::Enabling,
        AseState::Streaming,
        AseState::Disabling,
        AseState::Releasing,
    ];

    fn all_operations() -> Vec<ClientOperation> {
        vec![
            ClientOperation::ConfigCodec(lc3_request()),
            ClientOperation::ConfigQos(sample_qos()),
            ClientOperation::Enable(media_metadata()),
            ClientOperation::ReceiverStartReady,
            ClientOperation::Disable,
            ClientOperation::ReceiverStopReady,
            ClientOperation::UpdateMetadata(media_metadata()),
            ClientOperation::Release,
        ]
    }

    /// Expected successor state for a sink ASE, `None` where the
    /// operation must be rejected
    fn sink_successor(state: AseState, opcode: Opcode) -> Option<AseState> {
        use AseState::*;
        match (opcode, state) {
            (Opcode::ConfigCodec, Idle | CodecConfigured | QosConfigured) => Some(CodecConfigured),
            (Opcode::ConfigQos, CodecConfigured | QosConfigured) => Some(QosConfigured),
            (Opcode::Enable, QosConfigured) => Some(Enabling),
            (Opcode::ReceiverStartReady, Enabling) => Some(Streaming),
            (Opcode::Disable, Enabling | Streaming) => Some(Disabling),
            (Opcode::ReceiverStopReady, Disabling) => Some(QosConfigured),
            (Opcode::UpdateMetadata, Enabling | Streaming) => Some(state),
            (Opcode::Release, state) if state != Idle => Some(Releasing),
            _ => None,
        }
    }

    #[test]
    fn test_transition_table_is_total_for_sink() {
        for state in ALL_STATES {
            for operation in all_operations() {
                let opcode = operation.opcode();
                let mut record = AseRecord::new(1, Role::Sink);
                record.state = state;
                let before = record.clone();

                let result = transition(&mut record, DrivingEvent::Client(operation), true);
                match sink_successor(state, opcode) {
                    Some(successor) => {
                        assert_eq!(result, Ok(()), "{state:?} {opcode:?}");
                        assert_eq!(record.state, successor, "{state:?} {opcode:?}");
                    }
                    None => {
                        assert_eq!(
                            result,
                            Err(AscsError::InvalidAseStateMachineTransition),
                            "{state:?} {opcode:?}"
                        );
                        // Rejected events leave the record untouched
                        assert_eq!(record, before, "{state:?} {opcode:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_receiver_start_ready_rejected_for_source() {
        let mut record = AseRecord::new(1, Role::Source);
        record.state = AseState::Enabling;
        let before = record.clone();
        assert_eq!(
            transition(
                &mut record,
                DrivingEvent::Client(ClientOperation::ReceiverStartReady),
                true
            ),
            Err(AscsError::InvalidAseDirection)
        );
        assert_eq!(record, before);
    }

    #[test]
    fn test_disable_skips_disabling_for_source() {
        let mut record = AseRecord::new(1, Role::Source);
        record.state = AseState::Streaming;
        transition(
            &mut record,
            DrivingEvent::Client(ClientOperation::Disable),
            true,
        )
        .unwrap();
        assert_eq!(record.state, AseState::QosConfigured);
    }

    #[test]
    fn test_config_qos_requires_known_cis() {
        let mut record = AseRecord::new(1, Role::Sink);
        record.state = AseState::CodecConfigured;
        let before = record.clone();
        assert_eq!(
            transition(
                &mut record,
                DrivingEvent::Client(ClientOperation::ConfigQos(sample_qos())),
                false
            ),
            Err(AscsError::RejectedConfigurationParameterValue(
                RejectReason::InvalidAseCisMapping
            ))
        );
        assert_eq!(record, before);
    }

    #[test]
    fn test_cis_established_requires_enabling_source() {
        let mut record = AseRecord::new(1, Role::Source);
        record.state = AseState::Enabling;
        transition(&mut record, DrivingEvent::CisEstablished, true).unwrap();
        assert_eq!(record.state, AseState::Streaming);

        let mut record = AseRecord::new(1, Role::Sink);
        record.state = AseState::Enabling;
        assert_eq!(
            transition(&mut record, DrivingEvent::CisEstablished, true),
            Err(AscsError::InvalidAseStateMachineTransition)
        );
    }

    #[test]
    fn test_released_clears_configuration() {
        let mut record = AseRecord::new(1, Role::Sink);
        record.state = AseState::Releasing;
        record.codec_configuration = sample_codec_configuration();
        record.qos_configuration = sample_qos();
        record.metadata = media_metadata();
        transition(&mut record, DrivingEvent::Released, true).unwrap();
        assert_eq!(record.state, AseState::Idle);
        assert_eq!(record.codec_configuration, CodecConfiguration::default());
        assert_eq!(record.qos_configuration, QosConfiguration::default());
        assert!(record.metadata.is_empty());

        // Released is only valid from Releasing
        assert_eq!(
            transition(&mut record, DrivingEvent::Released, true),
            Err(AscsError::InvalidAseStateMachineTransition)
        );
    }

    #[test]
    fn test_client_disconnected_total_over_states() {
        for state in ALL_STATES {
            let mut record = AseRecord::new(1, Role::Sink);
            record.state = state;
            record.value_changed_pending_notification = true;
            transition(&mut record, DrivingEvent::ClientDisconnected, true).unwrap();
            assert_eq!(record.state, AseState::Idle);
            assert!(!record.value_changed_pending_notification);
        }
    }

    #[test]
    fn test_codec_negotiation_follows_target_latency() {
        let mut low = lc3_request();
        low.target_latency = TargetLatency::Low;
        let mut record = AseRecord::new(1, Role::Sink);
        transition(
            &mut record,
            DrivingEvent::Client(ClientOperation::ConfigCodec(low)),
            true,
        )
        .unwrap();
        assert_eq!(record.codec_configuration.preferred_retransmission_number, 2);
        assert_eq!(record.codec_configuration.max_transport_latency_ms, 10);
        assert_eq!(record.codec_configuration.preferred_phy, PhyMask(PhyMask::LE_2M));

        let mut reliable = lc3_request();
        reliable.target_latency = TargetLatency::HighReliability;
        reliable.target_phy = TargetPhy::Rfu(0x07);
        let mut record = AseRecord::new(1, Role::Sink);
        transition(
            &mut record,
            DrivingEvent::Client(ClientOperation::ConfigCodec(reliable)),
            true,
        )
        .unwrap();
        assert_eq!(record.codec_configuration.preferred_retransmission_number, 13);
        assert_eq!(record.codec_configuration.max_transport_latency_ms, 100);
        // No usable PHY preference: offer both standard PHYs
        assert_eq!(
            record.codec_configuration.preferred_phy,
            PhyMask(PhyMask::LE_1M | PhyMask::LE_2M)
        );
    }

    // -- server --

    fn config_codec_pdu(ase_id: u8, request: &ClientCodecConfigurationRequest) -> Vec<u8> {
        let mut pdu = vec![ASCS_OPCODE_CONFIG_CODEC, ase_id];
        pdu.extend_from_slice(&request.to_bytes());
        pdu
    }

    fn config_qos_pdu(ase_id: u8, qos: &QosConfiguration) -> Vec<u8> {
        let mut pdu = vec![ASCS_OPCODE_CONFIG_QOS, ase_id];
        pdu.extend_from_slice(&qos.to_bytes().unwrap());
        pdu
    }

    fn metadata_pdu(opcode: u8, ase_id: u8, metadata: &Metadata) -> Vec<u8> {
        let ltvs = metadata.to_bytes();
        let mut pdu = vec![opcode, ase_id, ltvs.len() as u8];
        pdu.extend_from_slice(&ltvs);
        pdu
    }

    fn connected_server(role: Role) -> AscsServer {
        let mut server = AscsServer::new(&[role]).unwrap();
        server.connect(CON_HANDLE).unwrap();
        server.set_client_configuration(CON_HANDLE, 1, true).unwrap();
        server
    }

    fn drain_events(server: &mut AscsServer) -> Vec<AscsEvent> {
        let mut events = Vec::new();
        while let Some(event) = server.poll_event() {
            events.push(event);
        }
        events
    }

    /// Codec config + QoS config + Enable, leaving ASE 1 in Enabling
    fn drive_to_enabling(server: &mut AscsServer) {
        let response = server
            .control_point_write(CON_HANDLE, &config_codec_pdu(1, &lc3_request()))
            .unwrap();
        assert_eq!(response, ControlPointResponse::success(1));
        server.cig_created(1, &[2]);
        let response = server
            .control_point_write(CON_HANDLE, &config_qos_pdu(1, &sample_qos()))
            .unwrap();
        assert_eq!(response, ControlPointResponse::success(1));
        let response = server
            .control_point_write(
                CON_HANDLE,
                &metadata_pdu(ASCS_OPCODE_ENABLE, 1, &media_metadata()),
            )
            .unwrap();
        assert_eq!(response, ControlPointResponse::success(1));
    }

    #[test]
    fn test_server_config_codec_accepted() {
        let mut server = connected_server(Role::Sink);
        let response = server
            .control_point_write(CON_HANDLE, &config_codec_pdu(1, &lc3_request()))
            .unwrap();
        assert_eq!(response, ControlPointResponse::success(1));

        let record = server.record(CON_HANDLE, 1).unwrap();
        assert_eq!(record.state, AseState::CodecConfigured);
        assert_eq!(record.codec_configuration, sample_codec_configuration());
        assert!(record.value_change_initiated_by_client);

        let events = drain_events(&mut server);
        assert_eq!(
            events,
            vec![
                AscsEvent::StreamendpointStateChanged {
                    con_handle: CON_HANDLE,
                    ase_id: 1,
                    state: AseState::CodecConfigured,
                },
                AscsEvent::CodecConfigurationChanged {
                    con_handle: CON_HANDLE,
                    ase_id: 1,
                    state: AseState::CodecConfigured,
                    codec_configuration: sample_codec_configuration(),
                },
                AscsEvent::ControlPointOperationResponse {
                    con_handle: CON_HANDLE,
                    response,
                },
            ]
        );

        let (ase_id, value) = server.next_notification(CON_HANDLE).unwrap().unwrap();
        assert_eq!(ase_id, 1);
        assert_eq!(value[0], ASCS_STATE_CODEC_CONFIGURED);
        assert_eq!(value[1..], sample_codec_configuration().to_bytes().unwrap());
        assert_eq!(server.next_notification(CON_HANDLE).unwrap(), None);
    }

    #[test]
    fn test_server_config_qos_unknown_cis_rejected() {
        let mut server = connected_server(Role::Sink);
        server
            .control_point_write(CON_HANDLE, &config_codec_pdu(1, &lc3_request()))
            .unwrap();
        server.next_notification(CON_HANDLE).unwrap();

        // No cig_created announcement: the referenced CIS is unknown
        let response = server
            .control_point_write(CON_HANDLE, &config_qos_pdu(1, &sample_qos()))
            .unwrap();
        assert_eq!(
            response.response_code,
            AscsErrorCode::RejectedConfigurationParameterValue
        );
        assert_eq!(response.reason, ASCS_REJECT_REASON_INVALID_ASE_CIS_MAPPING);

        let record = server.record(CON_HANDLE, 1).unwrap();
        assert_eq!(record.state, AseState::CodecConfigured);
        assert_eq!(server.next_notification(CON_HANDLE).unwrap(), None);
    }

    #[test]
    fn test_server_sink_reaches_streaming() {
        let mut server = connected_server(Role::Sink);
        drive_to_enabling(&mut server);

        let record = server.record(CON_HANDLE, 1).unwrap();
        assert_eq!(record.state, AseState::Enabling);
        assert_eq!(
            record.metadata.streaming_audio_contexts,
            Some(AudioContextMask::MEDIA)
        );

        let response = server
            .control_point_write(CON_HANDLE, &[ASCS_OPCODE_RECEIVER_START_READY, 1])
            .unwrap();
        assert_eq!(response, ControlPointResponse::success(1));
        assert_eq!(
            server.record(CON_HANDLE, 1).unwrap().state,
            AseState::Streaming
        );

        let (_, value) = server.next_notification(CON_HANDLE).unwrap().unwrap();
        assert_eq!(value[0], ASCS_STATE_STREAMING);
        assert_eq!(value[1], 1);
        assert_eq!(value[2], 2);
    }

    #[test]
    fn test_server_source_streams_on_cis_establishment() {
        let mut server = connected_server(Role::Source);
        drive_to_enabling(&mut server);

        // A source ASE does not take Receiver Start Ready
        let response = server
            .control_point_write(CON_HANDLE, &[ASCS_OPCODE_RECEIVER_START_READY, 1])
            .unwrap();
        assert_eq!(response.response_code, AscsErrorCode::InvalidAseDirection);
        assert_eq!(
            server.record(CON_HANDLE, 1).unwrap().state,
            AseState::Enabling
        );
        drain_events(&mut server);
        server.next_notification(CON_HANDLE).unwrap();

        // CIS establishment on a different CIS changes nothing
        server.cis_established(CON_HANDLE, 1, 9).unwrap();
        assert_eq!(
            server.record(CON_HANDLE, 1).unwrap().state,
            AseState::Enabling
        );

        server.cis_established(CON_HANDLE, 1, 2).unwrap();
        let record = server.record(CON_HANDLE, 1).unwrap();
        assert_eq!(record.state, AseState::Streaming);
        // Server-initiated change
        assert!(!record.value_change_initiated_by_client);
        assert_eq!(
            drain_events(&mut server),
            vec![AscsEvent::StreamendpointStateChanged {
                con_handle: CON_HANDLE,
                ase_id: 1,
                state: AseState::Streaming,
            }]
        );

        // Disable takes a source ASE straight back to QoS Configured
        let response = server
            .control_point_write(CON_HANDLE, &[ASCS_OPCODE_DISABLE, 1])
            .unwrap();
        assert_eq!(response, ControlPointResponse::success(1));
        assert_eq!(
            server.record(CON_HANDLE, 1).unwrap().state,
            AseState::QosConfigured
        );
    }

    #[test]
    fn test_server_sink_disable_then_receiver_stop_ready() {
        let mut server = connected_server(Role::Sink);
        drive_to_enabling(&mut server);
        server
            .control_point_write(CON_HANDLE, &[ASCS_OPCODE_RECEIVER_START_READY, 1])
            .unwrap();

        let response = server
            .control_point_write(CON_HANDLE, &[ASCS_OPCODE_DISABLE, 1])
            .unwrap();
        assert_eq!(response, ControlPointResponse::success(1));
        assert_eq!(
            server.record(CON_HANDLE, 1).unwrap().state,
            AseState::Disabling
        );

        let response = server
            .control_point_write(CON_HANDLE, &[ASCS_OPCODE_RECEIVER_STOP_READY, 1])
            .unwrap();
        assert_eq!(response, ControlPointResponse::success(1));
        assert_eq!(
            server.record(CON_HANDLE, 1).unwrap().state,
            AseState::QosConfigured
        );
    }

    #[test]
    fn test_server_release_flow() {
        let mut server = connected_server(Role::Sink);
        drive_to_enabling(&mut server);
        server.next_notification(CON_HANDLE).unwrap();

        let response = server
            .control_point_write(CON_HANDLE, &[ASCS_OPCODE_RELEASE, 1])
            .unwrap();
        assert_eq!(response, ControlPointResponse::success(1));
        assert_eq!(
            server.record(CON_HANDLE, 1).unwrap().state,
            AseState::Releasing
        );
        let (_, value) = server.next_notification(CON_HANDLE).unwrap().unwrap();
        assert_eq!(value, vec![ASCS_STATE_RELEASING]);

        server.release_complete(CON_HANDLE, 1).unwrap();
        let record = server.record(CON_HANDLE, 1).unwrap();
        assert_eq!(record.state, AseState::Idle);
        assert_eq!(record.codec_configuration, CodecConfiguration::default());
        let (_, value) = server.next_notification(CON_HANDLE).unwrap().unwrap();
        assert_eq!(value, vec![ASCS_STATE_IDLE]);

        // Completion is only valid while Releasing
        assert_eq!(
            server.release_complete(CON_HANDLE, 1),
            Err(AscsError::InvalidAseStateMachineTransition)
        );
    }

    #[test]
    fn test_server_update_metadata_notifies_without_state_change() {
        let mut server = connected_server(Role::Sink);
        drive_to_enabling(&mut server);
        server
            .control_point_write(CON_HANDLE, &[ASCS_OPCODE_RECEIVER_START_READY, 1])
            .unwrap();
        server.next_notification(CON_HANDLE).unwrap();
        drain_events(&mut server);

        let mut updated = media_metadata();
        updated.ccid_list = Some(vec![0x03]);
        let response = server
            .control_point_write(
                CON_HANDLE,
                &metadata_pdu(ASCS_OPCODE_UPDATE_METADATA, 1, &updated),
            )
            .unwrap();
        assert_eq!(response, ControlPointResponse::success(1));

        let record = server.record(CON_HANDLE, 1).unwrap();
        assert_eq!(record.state, AseState::Streaming);
        assert_eq!(record.metadata, updated);

        // No state change, but the value changed: a notification is due
        let (_, value) = server.next_notification(CON_HANDLE).unwrap().unwrap();
        assert_eq!(value[0], ASCS_STATE_STREAMING);

        let events = drain_events(&mut server);
        assert_eq!(
            events,
            vec![
                AscsEvent::MetadataChanged {
                    con_handle: CON_HANDLE,
                    ase_id: 1,
                    state: AseState::Streaming,
                    metadata: updated,
                },
                AscsEvent::ControlPointOperationResponse {
                    con_handle: CON_HANDLE,
                    response,
                },
            ]
        );
    }

    #[test]
    fn test_server_enable_with_rfu_metadata_rejected() {
        let mut server = connected_server(Role::Sink);
        server
            .control_point_write(CON_HANDLE, &config_codec_pdu(1, &lc3_request()))
            .unwrap();
        server.cig_created(1, &[2]);
        server
            .control_point_write(CON_HANDLE, &config_qos_pdu(1, &sample_qos()))
            .unwrap();

        // Metadata LTV of RFU type 0x08
        let pdu = vec![ASCS_OPCODE_ENABLE, 1, 3, 0x02, 0x08, 0x00];
        let response = server.control_point_write(CON_HANDLE, &pdu).unwrap();
        assert_eq!(response.response_code, AscsErrorCode::UnsupportedMetadata);
        assert_eq!(response.reason, 0x08);
        assert_eq!(
            server.record(CON_HANDLE, 1).unwrap().state,
            AseState::QosConfigured
        );
    }

    #[test]
    fn test_server_config_codec_bad_ltv_length_rejected() {
        let mut server = connected_server(Role::Sink);

        // Request with a sampling frequency entry claiming length 5
        // inside a 3-byte specific configuration
        let mut pdu = vec![
            ASCS_OPCODE_CONFIG_CODEC,
            1,
            0x02, // target latency: balanced
            0x02, // target PHY: 2M
        ];
        pdu.extend_from_slice(&[0x06, 0x00, 0x00, 0x00, 0x00]); // LC3 codec id
        pdu.push(3); // specific configuration length
        pdu.extend_from_slice(&[0x05, 0x01, 0x08]);

        let response = server.control_point_write(CON_HANDLE, &pdu).unwrap();
        assert_eq!(response.ase_id, 1);
        assert_eq!(response.response_code, AscsErrorCode::InvalidLength);
        assert_eq!(response.reason, 0);
        assert_eq!(server.record(CON_HANDLE, 1).unwrap().state, AseState::Idle);
    }

    #[test]
    fn test_server_pdu_framing_rejections() {
        let mut server = connected_server(Role::Sink);

        // Too short to carry an opcode and ASE id
        let response = server
            .control_point_write(CON_HANDLE, &[ASCS_OPCODE_CONFIG_CODEC])
            .unwrap();
        assert_eq!(response.ase_id, 0);
        assert_eq!(response.response_code, AscsErrorCode::InvalidLength);

        // 0x00 and the server-driven Released value are not client opcodes
        for opcode in [0x00, ASCS_OPCODE_RELEASED, 0xFF] {
            let response = server.control_point_write(CON_HANDLE, &[opcode, 1]).unwrap();
            assert_eq!(
                response.response_code,
                AscsErrorCode::UnsupportedOpcode,
                "{opcode:#04x}"
            );
        }

        // Trailing bytes after a parameterless operation
        let response = server
            .control_point_write(CON_HANDLE, &[ASCS_OPCODE_RELEASE, 1, 0xAA])
            .unwrap();
        assert_eq!(response.response_code, AscsErrorCode::InvalidLength);

        // Unknown ASE id
        let response = server
            .control_point_write(CON_HANDLE, &config_codec_pdu(7, &lc3_request()))
            .unwrap();
        assert_eq!(response.ase_id, 7);
        assert_eq!(response.response_code, AscsErrorCode::InvalidAseId);
        assert_eq!(server.record(CON_HANDLE, 1).unwrap().state, AseState::Idle);
    }

    #[test]
    fn test_server_unknown_connection() {
        let mut server = AscsServer::new(&[Role::Sink]).unwrap();
        assert_eq!(
            server.control_point_write(0x0099, &[ASCS_OPCODE_RELEASE, 1]),
            Err(AscsError::UnknownConnection(0x0099))
        );
        assert_eq!(
            server.next_notification(0x0099),
            Err(AscsError::UnknownConnection(0x0099))
        );
        assert_eq!(
            server.disconnect(0x0099),
            Err(AscsError::UnknownConnection(0x0099))
        );
    }

    #[test]
    fn test_server_client_slots() {
        let mut server = AscsServer::new(&[Role::Sink, Role::Source]).unwrap();
        assert_eq!(server.streamendpoint_count(), 2);

        for handle in 0..ASCS_CLIENTS_MAX_NUM as u16 {
            server.connect(0x0100 + handle).unwrap();
        }
        assert_eq!(
            server.connect(0x0200),
            Err(AscsError::InsufficientResources)
        );
        assert_eq!(
            server.connect(0x0100),
            Err(AscsError::AlreadyConnected(0x0100))
        );

        // Disconnecting frees the slot for a new client
        server.disconnect(0x0100).unwrap();
        server.connect(0x0200).unwrap();
    }

    #[test]
    fn test_server_endpoint_registration_limits() {
        assert_eq!(
            AscsServer::new(&[]).err(),
            Some(AscsError::InsufficientResources)
        );
        assert_eq!(
            AscsServer::new(&[Role::Sink; ASCS_STREAMENDPOINTS_MAX_NUM + 1]).err(),
            Some(AscsError::InsufficientResources)
        );
        let server = AscsServer::new(&[Role::Sink; ASCS_STREAMENDPOINTS_MAX_NUM]).unwrap();
        assert_eq!(server.streamendpoint_count(), ASCS_STREAMENDPOINTS_MAX_NUM);
    }

    #[test]
    fn test_server_disconnect_resets_endpoints() {
        let mut server = connected_server(Role::Sink);
        drive_to_enabling(&mut server);
        server
            .control_point_write(CON_HANDLE, &[ASCS_OPCODE_RECEIVER_START_READY, 1])
            .unwrap();

        server.disconnect(CON_HANDLE).unwrap();

        // Same client reconnects: everything is back at reset values
        server.connect(CON_HANDLE).unwrap();
        let record = server.record(CON_HANDLE, 1).unwrap();
        assert_eq!(record.state, AseState::Idle);
        assert_eq!(record.codec_configuration, CodecConfiguration::default());
        assert_eq!(record.qos_configuration, QosConfiguration::default());
        assert!(record.metadata.is_empty());
        assert!(!record.notifications_enabled);
        // Pending notifications did not survive the disconnect
        assert_eq!(server.next_notification(CON_HANDLE).unwrap(), None);
    }

    #[test]
    fn test_server_notifications_coalesce() {
        let mut server = connected_server(Role::Sink);
        server
            .control_point_write(CON_HANDLE, &config_codec_pdu(1, &lc3_request()))
            .unwrap();
        server.cig_created(1, &[2]);
        server
            .control_point_write(CON_HANDLE, &config_qos_pdu(1, &sample_qos()))
            .unwrap();

        // Two state changes before the transport caught up: one
        // notification carrying the latest value
        let (_, value) = server.next_notification(CON_HANDLE).unwrap().unwrap();
        assert_eq!(value[0], ASCS_STATE_QOS_CONFIGURED);
        assert_eq!(server.next_notification(CON_HANDLE).unwrap(), None);
    }

    #[test]
    fn test_server_notifications_wait_for_client_configuration() {
        let mut server = AscsServer::new(&[Role::Sink]).unwrap();
        server.connect(CON_HANDLE).unwrap();
        server
            .control_point_write(CON_HANDLE, &config_codec_pdu(1, &lc3_request()))
            .unwrap();

        // Notifications off: the change stays pending
        assert_eq!(server.next_notification(CON_HANDLE).unwrap(), None);

        server.set_client_configuration(CON_HANDLE, 1, true).unwrap();
        let (ase_id, value) = server.next_notification(CON_HANDLE).unwrap().unwrap();
        assert_eq!(ase_id, 1);
        assert_eq!(value[0], ASCS_STATE_CODEC_CONFIGURED);
    }

    #[test]
    fn test_server_cig_removed_invalidates_mapping() {
        let mut server = connected_server(Role::Sink);
        server
            .control_point_write(CON_HANDLE, &config_codec_pdu(1, &lc3_request()))
            .unwrap();
        server.cig_created(1, &[2]);
        server.cig_removed(1);

        let response = server
            .control_point_write(CON_HANDLE, &config_qos_pdu(1, &sample_qos()))
            .unwrap();
        assert_eq!(
            response.response_code,
            AscsErrorCode::RejectedConfigurationParameterValue
        );
        assert_eq!(response.reason, ASCS_REJECT_REASON_INVALID_ASE_CIS_MAPPING);
    }

    #[test]
    fn test_server_records_are_per_client() {
        let mut server = AscsServer::new(&[Role::Sink]).unwrap();
        server.connect(0x0040).unwrap();
        server.connect(0x0041).unwrap();

        server
            .control_point_write(0x0040, &config_codec_pdu(1, &lc3_request()))
            .unwrap();

        assert_eq!(
            server.record(0x0040, 1).unwrap().state,
            AseState::CodecConfigured
        );
        assert_eq!(server.record(0x0041, 1).unwrap().state, AseState::Idle);
    }

    #[test]
    fn test_error_code_round_trip() {
        for code in 0x00..=0x0E {
            assert_eq!(u8::from(AscsErrorCode::from(code)), code);
        }
        assert_eq!(AscsErrorCode::from(0x42), AscsErrorCode::Unknown(0x42));
    }

    #[test]
    fn test_reject_reason_round_trip() {
        for value in ASCS_REJECT_REASON_CODEC_ID..=ASCS_REJECT_REASON_INVALID_ASE_CIS_MAPPING {
            let reason = RejectReason::from_u8(value).unwrap();
            assert_eq!(reason.to_u8(), value);
        }
        assert_eq!(RejectReason::from_u8(0x00), None);
        assert_eq!(RejectReason::from_u8(0x0B), None);
    }
}
