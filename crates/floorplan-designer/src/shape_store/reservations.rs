//! Table reservation link.
//!
//! The engine only stores the reservation record on table shapes; seating
//! logic lives with the reservation collaborator.

use super::ShapeStore;
use crate::model::{Reservation, ReservationPatch, ReservationStatus, Shape, ShapeCategory};
use chrono::Utc;
use floorplan_core::ids::{new_id, IdKind};

const DEFAULT_PARTY_SIZE: u32 = 2;
const DEFAULT_CUSTOMER: &str = "Guest";

impl ShapeStore {
    /// Chairs on `floor_id` linked to `table_id`.
    pub fn chairs_for_table(&self, floor_id: &str, table_id: &str) -> Vec<&Shape> {
        self.floor(floor_id)
            .map(|floor| {
                floor
                    .shapes
                    .iter()
                    .filter(|s| {
                        s.category == ShapeCategory::Chair
                            && s.table_id.as_deref() == Some(table_id)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Attaches a new reservation to a table.
    ///
    /// Without an explicit party size the number of linked chairs is used,
    /// falling back to 2. Returns the reservation id, or `None` when the
    /// shape is missing or not a table.
    pub fn reserve_table(
        &mut self,
        floor_id: &str,
        table_id: &str,
        party_size: Option<u32>,
    ) -> Option<String> {
        let chairs = self.chairs_for_table(floor_id, table_id).len() as u32;
        let party_size = party_size
            .filter(|&n| n > 0)
            .or((chairs > 0).then_some(chairs))
            .unwrap_or(DEFAULT_PARTY_SIZE);

        let table = self
            .shape_mut(floor_id, table_id)
            .filter(|s| s.is_table())?;
        let reservation = Reservation {
            id: new_id(IdKind::Reservation),
            time: Utc::now(),
            customer_name: DEFAULT_CUSTOMER.to_string(),
            party_size,
            notes: None,
            status: ReservationStatus::Reserved,
        };
        let id = reservation.id.clone();
        table.reservation = Some(reservation);
        tracing::debug!("Reserved table {} for {}", table_id, party_size);
        Some(id)
    }

    /// Clears a table's reservation. `false` if the shape is not a table.
    pub fn unreserve_table(&mut self, floor_id: &str, table_id: &str) -> bool {
        match self.shape_mut(floor_id, table_id).filter(|s| s.is_table()) {
            Some(table) => {
                table.reservation = None;
                true
            }
            None => false,
        }
    }

    /// Merges `patch` into an existing reservation. Does nothing when the
    /// table has no reservation yet.
    pub fn update_reservation(
        &mut self,
        floor_id: &str,
        table_id: &str,
        patch: ReservationPatch,
    ) -> bool {
        let reservation = self
            .shape_mut(floor_id, table_id)
            .filter(|s| s.is_table())
            .and_then(|s| s.reservation.as_mut());
        match reservation {
            Some(reservation) => {
                patch.apply(reservation);
                true
            }
            None => false,
        }
    }
}
