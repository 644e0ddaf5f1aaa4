//! Day-view calendar layout.
//!
//! Packs possibly-overlapping intervals into visual columns: greedy interval
//! coloring with a run reset. Columns are computed per connected run of
//! overlapping intervals, so a crowded morning never forces narrow columns on
//! a sparse afternoon. Appointments, administrative blocks and availability
//! are laid out in independent passes; the kinds render as separate visual
//! layers and never compete for the same column space.

use serde::{Deserialize, Serialize};

use crate::grouping::{aggregate, RenderableUnit};
use crate::interval::{TimeInterval, TimeOfDay};
use crate::models::{AvailabilitySlot, TimeBlock};
use crate::scheduler::DaySchedule;

/// Column position of one interval, valid only for the pass that produced it.
///
/// `total_columns` is the number of columns used by the item's run, not a
/// global maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutAssignment {
    pub column: usize,
    pub total_columns: usize,
}

/// Assign `(column, total_columns)` to every interval.
///
/// The output is positionally aligned with the input. Guarantees:
/// - overlapping intervals never share a column;
/// - within each maximal run of transitively-overlapping intervals,
///   `total_columns` equals the number of columns that run actually used;
/// - the tie-break order (start asc, end asc, input index) is deterministic,
///   so the same day always lays out the same way.
pub fn assign_columns(items: &[TimeInterval]) -> Vec<LayoutAssignment> {
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by_key(|&i| (items[i].start, items[i].end, i));

    let mut out = vec![
        LayoutAssignment {
            column: 0,
            total_columns: 1,
        };
        items.len()
    ];

    // Each open column remembers only its last-placed item's end time.
    let mut column_ends: Vec<TimeOfDay> = Vec::new();
    // Original indices placed since the last reset.
    let mut run_members: Vec<usize> = Vec::new();

    for &idx in &order {
        let item = items[idx];

        // The run has ended once every tracked end time is <= this start.
        let run_over = !column_ends.is_empty()
            && column_ends.iter().all(|&end| end <= item.start);
        if run_over {
            close_run(&mut out, &mut run_members, column_ends.len());
            column_ends.clear();
        }

        // First column whose last item does not overlap; half-open intervals
        // make "does not overlap" exactly "ends at or before our start".
        match column_ends.iter().position(|&end| end <= item.start) {
            Some(col) => {
                column_ends[col] = item.end;
                out[idx].column = col;
            }
            None => {
                column_ends.push(item.end);
                out[idx].column = column_ends.len() - 1;
            }
        }
        run_members.push(idx);
    }

    close_run(&mut out, &mut run_members, column_ends.len());
    out
}

fn close_run(out: &mut [LayoutAssignment], members: &mut Vec<usize>, columns_used: usize) {
    for idx in members.drain(..) {
        out[idx].total_columns = columns_used;
    }
}

/// Fully laid-out day, one independent pass per kind.
#[derive(Debug, Clone, Serialize)]
pub struct DayLayout {
    pub units: Vec<(RenderableUnit, LayoutAssignment)>,
    pub time_blocks: Vec<(TimeBlock, LayoutAssignment)>,
    pub availability: Vec<(AvailabilitySlot, LayoutAssignment)>,
}

/// Aggregate group appointments, then lay out each kind on its own.
/// Free availability slots denote bookable time and are skipped.
pub fn layout_day_schedule(schedule: &DaySchedule) -> DayLayout {
    let units = aggregate(schedule.appointments.clone());
    let unit_assignments =
        assign_columns(&units.iter().map(|u| u.interval()).collect::<Vec<_>>());

    let block_assignments = assign_columns(
        &schedule
            .time_blocks
            .iter()
            .map(|b| b.interval())
            .collect::<Vec<_>>(),
    );

    let blocking_slots: Vec<AvailabilitySlot> = schedule
        .availability
        .iter()
        .filter(|s| s.slot_type.is_blocking())
        .cloned()
        .collect();
    let slot_assignments =
        assign_columns(&blocking_slots.iter().map(|s| s.interval()).collect::<Vec<_>>());

    DayLayout {
        units: units.into_iter().zip(unit_assignments).collect(),
        time_blocks: schedule
            .time_blocks
            .iter()
            .cloned()
            .zip(block_assignments)
            .collect(),
        availability: blocking_slots.into_iter().zip(slot_assignments).collect(),
    }
}
