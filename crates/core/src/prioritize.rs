//! Reordering within a date group
//!
//! A positive step raises priority: the item moves toward the front of its
//! group and takes a smaller id. The destination is clamped to the group
//! bounds, there is no wraparound.

use std::collections::HashMap;

use crate::item::ItemId;

/// Outcome of moving one id inside an ascending id group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reprioritization {
    /// Id the target ends up with
    pub new_id: ItemId,
    /// Signed number of slots actually travelled, positive toward the front
    pub actual_step: i64,
    /// Old id to new id, covering the target and every displaced neighbour
    pub moves: HashMap<ItemId, ItemId>,
}

impl Reprioritization {
    pub fn is_noop(&self) -> bool {
        self.actual_step == 0
    }

    pub fn step_sign(&self) -> i64 {
        if self.actual_step > 0 { 1 } else { -1 }
    }

    /// Id an item carries after the move
    pub fn apply(&self, id: ItemId) -> ItemId {
        self.moves.get(&id).copied().unwrap_or(id)
    }
}

/// Destination index for `index` shifted by `step` in a list of `len` slots
///
/// Returns the clamped index and the distance actually travelled.
pub fn clamped_shift(index: usize, step: i64, len: usize) -> (usize, i64) {
    if len == 0 {
        return (0, 0);
    }
    let wanted = (index as i64).saturating_sub(step);
    let dest = wanted.clamp(0, len as i64 - 1) as usize;
    (dest, index as i64 - dest as i64)
}

/// Move `id` by `step` slots inside `group`, rotating the window in between
///
/// `group` holds the ascending ids of one date group. Returns `None` when `id`
/// is not a member. The resulting id set equals the input id set.
pub fn reprioritize(group: &[ItemId], id: ItemId, step: i64) -> Option<Reprioritization> {
    let index = group.iter().position(|&member| member == id)?;
    let (dest, actual_step) = clamped_shift(index, step, group.len());
    let new_id = group[dest];

    let mut moves = HashMap::new();
    if actual_step != 0 {
        moves.insert(id, new_id);
        if actual_step > 0 {
            for slot in dest..index {
                moves.insert(group[slot], group[slot + 1]);
            }
        } else {
            for slot in index + 1..=dest {
                moves.insert(group[slot], group[slot - 1]);
            }
        }
    }

    Some(Reprioritization {
        new_id,
        actual_step,
        moves,
    })
}
