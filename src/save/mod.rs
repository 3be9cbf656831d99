//! Session snapshot — in-memory save/restore of the whole core.
//!
//! The presentation layer tears scenes down and rebuilds them freely; the
//! core must survive that. A snapshot serializes every durable resource to
//! a JSON string held in memory (nothing touches disk — state lives only
//! for the session) and a restore swaps it back in wholesale. Pot
//! deadlines are absolute clock timestamps, so time spent between snapshot
//! and restore elapses like any other away time.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::billing::Bills;
use crate::clock::GameClock;
use crate::growth::GrowingArea;
use crate::ledger::Ledger;
use crate::shared::*;

pub const SNAPSHOT_VERSION: u32 = 1;

// ═══════════════════════════════════════════════════════════════════════
// PUBLIC TYPES
// ═══════════════════════════════════════════════════════════════════════

/// Everything durable, in one serializable bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    pub ledger: Ledger,
    pub growing_area: GrowingArea,
    pub bills: Bills,
    pub selection: Selection,
    /// Clock reading when the snapshot was taken. Metadata only — the
    /// live clock keeps running across a restore.
    pub taken_at: f64,
}

/// Holds the most recent snapshot for the session.
#[derive(Resource, Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub json: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS
// ═══════════════════════════════════════════════════════════════════════

/// Sent by the presentation layer before tearing down a scene.
#[derive(Event, Debug, Clone)]
pub struct SnapshotRequestEvent;

/// Sent by the presentation layer to reinstate the stored snapshot.
#[derive(Event, Debug, Clone)]
pub struct RestoreRequestEvent;

#[derive(Event, Debug, Clone)]
pub struct SnapshotTakenEvent {
    pub success: bool,
    pub error_message: Option<String>,
}

#[derive(Event, Debug, Clone)]
pub struct RestoreCompleteEvent {
    pub success: bool,
    pub error_message: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SessionSnapshot>()
            .add_event::<SnapshotRequestEvent>()
            .add_event::<RestoreRequestEvent>()
            .add_event::<SnapshotTakenEvent>()
            .add_event::<RestoreCompleteEvent>()
            .add_systems(
                Update,
                (handle_snapshot_request, handle_restore_request)
                    .run_if(in_state(GameState::Ready)),
            );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Systems
// ─────────────────────────────────────────────────────────────────────────────

fn handle_snapshot_request(
    mut snapshot_events: EventReader<SnapshotRequestEvent>,
    ledger: Res<Ledger>,
    area: Res<GrowingArea>,
    bills: Res<Bills>,
    selection: Res<Selection>,
    clock: Res<GameClock>,
    mut snapshot: ResMut<SessionSnapshot>,
    mut taken_events: EventWriter<SnapshotTakenEvent>,
) {
    for _ in snapshot_events.read() {
        let data = SaveData {
            version: SNAPSHOT_VERSION,
            ledger: ledger.clone(),
            growing_area: area.clone(),
            bills: bills.clone(),
            selection: selection.clone(),
            taken_at: clock.now(),
        };
        match serde_json::to_string(&data) {
            Ok(json) => {
                info!("[Save] Snapshot taken ({} bytes)", json.len());
                snapshot.json = Some(json);
                taken_events.send(SnapshotTakenEvent {
                    success: true,
                    error_message: None,
                });
            }
            Err(err) => {
                warn!("[Save] Snapshot failed: {}", err);
                taken_events.send(SnapshotTakenEvent {
                    success: false,
                    error_message: Some(err.to_string()),
                });
            }
        }
    }
}

fn handle_restore_request(
    mut restore_events: EventReader<RestoreRequestEvent>,
    snapshot: Res<SessionSnapshot>,
    mut ledger: ResMut<Ledger>,
    mut area: ResMut<GrowingArea>,
    mut bills: ResMut<Bills>,
    mut selection: ResMut<Selection>,
    mut complete_events: EventWriter<RestoreCompleteEvent>,
) {
    for _ in restore_events.read() {
        let Some(json) = snapshot.json.as_deref() else {
            warn!("[Save] No snapshot to restore");
            complete_events.send(RestoreCompleteEvent {
                success: false,
                error_message: Some("no snapshot taken this session".to_string()),
            });
            continue;
        };
        match serde_json::from_str::<SaveData>(json) {
            Ok(data) if data.version == SNAPSHOT_VERSION => {
                *ledger = data.ledger;
                *area = data.growing_area;
                *bills = data.bills;
                *selection = data.selection;
                info!("[Save] Snapshot restored (taken at t={:.1})", data.taken_at);
                complete_events.send(RestoreCompleteEvent {
                    success: true,
                    error_message: None,
                });
            }
            Ok(data) => {
                warn!(
                    "[Save] Snapshot version {} != {}, refusing restore",
                    data.version, SNAPSHOT_VERSION
                );
                complete_events.send(RestoreCompleteEvent {
                    success: false,
                    error_message: Some(format!("snapshot version {}", data.version)),
                });
            }
            Err(err) => {
                warn!("[Save] Snapshot restore failed: {}", err);
                complete_events.send(RestoreCompleteEvent {
                    success: false,
                    error_message: Some(err.to_string()),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_data_round_trips() {
        let mut ledger = Ledger::default();
        ledger.add(Pool::Seeds, "rose", 3);
        ledger.add(Pool::Flowers, "rose", 1);

        let mut area = GrowingArea::default();
        area.register_pot();

        let data = SaveData {
            version: SNAPSHOT_VERSION,
            ledger,
            growing_area: area,
            bills: Bills::default(),
            selection: Selection {
                flower_id: Some("rose".to_string()),
            },
            taken_at: 12.5,
        };

        let json = serde_json::to_string(&data).unwrap();
        let back: SaveData = serde_json::from_str(&json).unwrap();

        assert_eq!(back.version, SNAPSHOT_VERSION);
        assert_eq!(back.ledger.count(Pool::Seeds, "rose"), 3);
        assert_eq!(back.growing_area.len(), 1);
        assert_eq!(back.selection.flower_id.as_deref(), Some("rose"));
        assert_eq!(back.taken_at, 12.5);
    }
}
