//! ASCS server: record table, control point dispatcher, and
//! notification bookkeeping
//!
//! The server owns a fixed table of ASE records, one record per
//! registered endpoint per client slot, created up front and reset
//! rather than freed. All record mutation goes through the state
//! machine's transition function; `&mut self` on every entry point keeps
//! the module the sole writer.

use std::collections::{HashMap, VecDeque};

use log::{debug, info, warn};

use super::constants::*;
use super::error::{AscsError, AscsResult};
use super::events::AscsEvent;
use super::state_machine::{transition, ClientOperation, DrivingEvent};
use super::types::{
    AseRecord, AseState, ClientCodecConfigurationRequest, ConnectionHandle, ControlPointResponse,
    Opcode, QosConfiguration,
};
use crate::le_audio::{Metadata, Role};

/// One client slot: its bound connection (if any) and one record per
/// registered endpoint
#[derive(Debug)]
struct ClientSlot {
    con_handle: Option<ConnectionHandle>,
    records: Vec<AseRecord>,
}

/// The ASCS server core
#[derive(Debug)]
pub struct AscsServer {
    clients: Vec<ClientSlot>,
    /// CIG id -> CIS ids the link layer manager has created
    iso_groups: HashMap<u8, Vec<u8>>,
    events: VecDeque<AscsEvent>,
}

impl AscsServer {
    /// Register the server's endpoints, one per entry in `roles`.
    /// ASE ids are assigned in order starting at 1.
    pub fn new(roles: &[Role]) -> AscsResult<Self> {
        if roles.is_empty() || roles.len() > ASCS_STREAMENDPOINTS_MAX_NUM {
            return Err(AscsError::InsufficientResources);
        }
        let records: Vec<AseRecord> = roles
            .iter()
            .enumerate()
            .map(|(index, role)| AseRecord::new(index as u8 + 1, *role))
            .collect();
        let clients = (0..ASCS_CLIENTS_MAX_NUM)
            .map(|_| ClientSlot {
                con_handle: None,
                records: records.clone(),
            })
            .collect();
        Ok(Self {
            clients,
            iso_groups: HashMap::new(),
            events: VecDeque::new(),
        })
    }

    /// Number of registered endpoints
    pub fn streamendpoint_count(&self) -> usize {
        self.clients.first().map_or(0, |slot| slot.records.len())
    }

    /// Bind a newly connected client to a free slot
    pub fn connect(&mut self, con_handle: ConnectionHandle) -> AscsResult<()> {
        if self.find_slot(con_handle).is_some() {
            return Err(AscsError::AlreadyConnected(con_handle));
        }
        let slot = self
            .clients
            .iter_mut()
            .find(|slot| slot.con_handle.is_none())
            .ok_or(AscsError::InsufficientResources)?;
        slot.con_handle = Some(con_handle);
        info!("ASCS: client 0x{con_handle:04x} connected");
        Ok(())
    }

    /// Unbind a disconnected client: every one of its records returns to
    /// Idle with configuration cleared, pending notifications are
    /// discarded, and the slot becomes free. No events are emitted; the
    /// client is gone.
    pub fn disconnect(&mut self, con_handle: ConnectionHandle) -> AscsResult<()> {
        let slot_index = self
            .find_slot(con_handle)
            .ok_or(AscsError::UnknownConnection(con_handle))?;
        let slot = &mut self.clients[slot_index];
        for record in &mut slot.records {
            // Total for every state, cannot fail
            let _ = transition(record, DrivingEvent::ClientDisconnected, true);
            record.notifications_enabled = false;
        }
        slot.con_handle = None;
        info!("ASCS: client 0x{con_handle:04x} disconnected, endpoints reset");
        Ok(())
    }

    /// Client configuration descriptor write: toggle state-change
    /// notifications for one ASE
    pub fn set_client_configuration(
        &mut self,
        con_handle: ConnectionHandle,
        ase_id: u8,
        notifications_enabled: bool,
    ) -> AscsResult<()> {
        let record = self.record_mut(con_handle, ase_id)?;
        record.notifications_enabled = notifications_enabled;
        Ok(())
    }

    /// Process one control point write (`opcode | ase_id | payload`).
    ///
    /// Always produces exactly one response; protocol-level rejections
    /// are reported in the response, not as `Err`. `Err` is reserved for
    /// transport-level problems (unknown connection handle).
    pub fn control_point_write(
        &mut self,
        con_handle: ConnectionHandle,
        data: &[u8],
    ) -> AscsResult<ControlPointResponse> {
        let slot_index = self
            .find_slot(con_handle)
            .ok_or(AscsError::UnknownConnection(con_handle))?;

        if data.len() < 2 {
            return Ok(self.reject(con_handle, 0, AscsError::InvalidLength));
        }
        let opcode_byte = data[0];
        let ase_id = data[1];
        let payload = &data[2..];

        let Some(opcode) = Opcode::from_u8(opcode_byte) else {
            return Ok(self.reject(con_handle, ase_id, AscsError::UnsupportedOpcode(opcode_byte)));
        };

        let Some(record_index) = self.clients[slot_index]
            .records
            .iter()
            .position(|record| record.ase_id == ase_id)
        else {
            return Ok(self.reject(con_handle, ase_id, AscsError::InvalidAseId(ase_id)));
        };

        let operation = match parse_operation(opcode, payload) {
            Ok(operation) => operation,
            Err(error) => return Ok(self.reject(con_handle, ase_id, error)),
        };

        let cis_known = match &operation {
            ClientOperation::ConfigQos(qos) => self.cis_exists(qos.cig_id, qos.cis_id),
            _ => true,
        };

        let record = &mut self.clients[slot_index].records[record_index];
        let previous_state = record.state;
        if let Err(error) = transition(record, DrivingEvent::Client(operation), cis_known) {
            return Ok(self.reject(con_handle, ase_id, error));
        }

        record.value_change_initiated_by_client = true;
        let state = record.state;
        let state_changed = state != previous_state;
        if state_changed || opcode == Opcode::UpdateMetadata {
            record.value_changed_pending_notification = true;
        }
        debug!(
            "ASCS: client 0x{con_handle:04x} ASE {ase_id} {opcode:?}: {previous_state:?} -> {state:?}"
        );

        let codec_configuration = record.codec_configuration;
        let qos_configuration = record.qos_configuration;
        let metadata = record.metadata.clone();

        if state_changed {
            self.events.push_back(AscsEvent::StreamendpointStateChanged {
                con_handle,
                ase_id,
                state,
            });
        }
        match opcode {
            Opcode::ConfigCodec => self.events.push_back(AscsEvent::CodecConfigurationChanged {
                con_handle,
                ase_id,
                state,
                codec_configuration,
            }),
            Opcode::ConfigQos => self.events.push_back(AscsEvent::QosConfigurationChanged {
                con_handle,
                ase_id,
                state,
                qos_configuration,
            }),
            Opcode::Enable | Opcode::UpdateMetadata => {
                self.events.push_back(AscsEvent::MetadataChanged {
                    con_handle,
                    ase_id,
                    state,
                    metadata,
                })
            }
            _ => {}
        }

        let response = ControlPointResponse::success(ase_id);
        self.events.push_back(AscsEvent::ControlPointOperationResponse {
            con_handle,
            response,
        });
        Ok(response)
    }

    /// Link layer manager announcement: a CIG with the given CIS ids has
    /// been created. Config QoS operations referencing other ids are
    /// rejected with an invalid ASE/CIS mapping.
    pub fn cig_created(&mut self, cig_id: u8, cis_ids: &[u8]) {
        let entry = self.iso_groups.entry(cig_id).or_default();
        for cis_id in cis_ids {
            if !entry.contains(cis_id) {
                entry.push(*cis_id);
            }
        }
    }

    /// Link layer manager announcement: the CIG was terminated
    pub fn cig_removed(&mut self, cig_id: u8) {
        self.iso_groups.remove(&cig_id);
    }

    fn cis_exists(&self, cig_id: u8, cis_id: u8) -> bool {
        self.iso_groups
            .get(&cig_id)
            .is_some_and(|cis_ids| cis_ids.contains(&cis_id))
    }

    /// Link layer completion: the CIS carrying this client's streams is
    /// up. Source ASEs in Enabling that reference it move to Streaming
    /// autonomously.
    pub fn cis_established(
        &mut self,
        con_handle: ConnectionHandle,
        cig_id: u8,
        cis_id: u8,
    ) -> AscsResult<()> {
        let slot_index = self
            .find_slot(con_handle)
            .ok_or(AscsError::UnknownConnection(con_handle))?;

        let mut changed = Vec::new();
        for record in &mut self.clients[slot_index].records {
            if record.state != AseState::Enabling
                || record.role != Role::Source
                || record.qos_configuration.cig_id != cig_id
                || record.qos_configuration.cis_id != cis_id
            {
                continue;
            }
            // Matches the filter above, cannot fail
            let _ = transition(record, DrivingEvent::CisEstablished, true);
            record.value_change_initiated_by_client = false;
            record.value_changed_pending_notification = true;
            changed.push((record.ase_id, record.state));
            debug!(
                "ASCS: client 0x{con_handle:04x} ASE {} streaming (CIS {cig_id}.{cis_id} established)",
                record.ase_id
            );
        }
        for (ase_id, state) in changed {
            self.events.push_back(AscsEvent::StreamendpointStateChanged {
                con_handle,
                ase_id,
                state,
            });
        }
        Ok(())
    }

    /// Server-side completion of a Release: the ASE returns to Idle and
    /// all stored configuration is cleared
    pub fn release_complete(
        &mut self,
        con_handle: ConnectionHandle,
        ase_id: u8,
    ) -> AscsResult<()> {
        let record = self.record_mut(con_handle, ase_id)?;
        transition(record, DrivingEvent::Released, true)?;
        record.value_change_initiated_by_client = false;
        record.value_changed_pending_notification = true;
        let state = record.state;
        debug!("ASCS: client 0x{con_handle:04x} ASE {ase_id} released");
        self.events.push_back(AscsEvent::StreamendpointStateChanged {
            con_handle,
            ase_id,
            state,
        });
        Ok(())
    }

    /// Drain the next pending state notification for this client:
    /// `(ase_id, [state | state-specific fields])`.
    ///
    /// Records with notifications disabled are skipped and stay pending,
    /// so a later descriptor write can still pick the change up. Repeated
    /// changes before the transport catches up coalesce into one payload
    /// carrying the latest value.
    pub fn next_notification(
        &mut self,
        con_handle: ConnectionHandle,
    ) -> AscsResult<Option<(u8, Vec<u8>)>> {
        let slot_index = self
            .find_slot(con_handle)
            .ok_or(AscsError::UnknownConnection(con_handle))?;
        for record in &mut self.clients[slot_index].records {
            if record.value_changed_pending_notification && record.notifications_enabled {
                record.value_changed_pending_notification = false;
                let value = record.characteristic_value()?;
                return Ok(Some((record.ase_id, value)));
            }
        }
        Ok(None)
    }

    /// Dequeue the next application event
    pub fn poll_event(&mut self) -> Option<AscsEvent> {
        self.events.pop_front()
    }

    /// Inspect one ASE record
    pub fn record(&self, con_handle: ConnectionHandle, ase_id: u8) -> AscsResult<&AseRecord> {
        let slot_index = self
            .find_slot(con_handle)
            .ok_or(AscsError::UnknownConnection(con_handle))?;
        self.clients[slot_index]
            .records
            .iter()
            .find(|record| record.ase_id == ase_id)
            .ok_or(AscsError::InvalidAseId(ase_id))
    }

    fn record_mut(
        &mut self,
        con_handle: ConnectionHandle,
        ase_id: u8,
    ) -> AscsResult<&mut AseRecord> {
        let slot_index = self
            .find_slot(con_handle)
            .ok_or(AscsError::UnknownConnection(con_handle))?;
        self.clients[slot_index]
            .records
            .iter_mut()
            .find(|record| record.ase_id == ase_id)
            .ok_or(AscsError::InvalidAseId(ase_id))
    }

    fn find_slot(&self, con_handle: ConnectionHandle) -> Option<usize> {
        self.clients
            .iter()
            .position(|slot| slot.con_handle == Some(con_handle))
    }

    fn reject(
        &mut self,
        con_handle: ConnectionHandle,
        ase_id: u8,
        error: AscsError,
    ) -> ControlPointResponse {
        warn!("ASCS: client 0x{con_handle:04x} ASE {ase_id} operation rejected: {error}");
        let response = ControlPointResponse::from_error(ase_id, &error);
        self.events.push_back(AscsEvent::ControlPointOperationResponse {
            con_handle,
            response,
        });
        response
    }
}

/// Parse one opcode's payload into a client operation. Trailing bytes
/// beyond the opcode's defined payload are a framing error.
fn parse_operation(opcode: Opcode, payload: &[u8]) -> AscsResult<ClientOperation> {
    match opcode {
        Opcode::ConfigCodec => {
            let (request, consumed) = ClientCodecConfigurationRequest::parse(payload)?;
            if consumed != payload.len() {
                return Err(AscsError::InvalidLength);
            }
            Ok(ClientOperation::ConfigCodec(request))
        }
        Opcode::ConfigQos => {
            if payload.len() != ASCS_QOS_CONFIGURATION_SIZE {
                return Err(AscsError::InvalidLength);
            }
            Ok(ClientOperation::ConfigQos(QosConfiguration::parse(payload)?))
        }
        Opcode::Enable | Opcode::UpdateMetadata => {
            let metadata = parse_metadata_payload(payload)?;
            if opcode == Opcode::Enable {
                Ok(ClientOperation::Enable(metadata))
            } else {
                Ok(ClientOperation::UpdateMetadata(metadata))
            }
        }
        Opcode::ReceiverStartReady => expect_empty(payload, ClientOperation::ReceiverStartReady),
        Opcode::Disable => expect_empty(payload, ClientOperation::Disable),
        Opcode::ReceiverStopReady => expect_empty(payload, ClientOperation::ReceiverStopReady),
        Opcode::Release => expect_empty(payload, ClientOperation::Release),
    }
}

/// `metadata_length(1) | metadata LTVs`, the length must cover the rest
/// of the payload exactly
fn parse_metadata_payload(payload: &[u8]) -> AscsResult<Metadata> {
    if payload.is_empty() {
        return Err(AscsError::InvalidLength);
    }
    let metadata_length = payload[0] as usize;
    if payload.len() != 1 + metadata_length {
        return Err(AscsError::InvalidLength);
    }
    Ok(Metadata::parse(&payload[1..])?)
}

fn expect_empty(payload: &[u8], operation: ClientOperation) -> AscsResult<ClientOperation> {
    if !payload.is_empty() {
        return Err(AscsError::InvalidLength);
    }
    Ok(operation)
}
