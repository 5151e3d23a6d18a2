//! In-memory working set for one account partition.
//!
//! Persistent storage is an external collaborator; the core operates on
//! collections handed to it by value. `Schedule` is that collection, and
//! carries the lifecycle operations the storage contract names: upsert,
//! delete, per-block and group-level visibility, group cascade delete.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::block::Block;
use crate::conflict::{find_conflicts, ConflictPair};
use crate::expand::{expand_window, DateWindow};
use crate::guard::{validate_move, MoveRejection};
use crate::ics::{export_occurrences, serialize_calendar};
use crate::interval::TimeInterval;
use crate::occurrence::ConcreteOccurrence;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    blocks: Vec<Block>,
}

impl Schedule {
    pub fn new() -> Self {
        Schedule::default()
    }

    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Schedule { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id() == id)
    }

    /// Insert, or replace the block with the same id.
    pub fn upsert(&mut self, block: Block) {
        match self.blocks.iter_mut().find(|b| b.id() == block.id()) {
            Some(existing) => *existing = block,
            None => self.blocks.push(block),
        }
    }

    /// Returns whether a block was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.blocks.len();
        self.blocks.retain(|b| b.id() != id);
        before != self.blocks.len()
    }

    /// Soft-hide toggle for one fixed block. Returns `false` when `id`
    /// does not name a fixed block; flexible blocks have no hidden state.
    pub fn set_visible(&mut self, id: &str, visible: bool) -> bool {
        for block in &mut self.blocks {
            if let Block::Fixed(fixed) = block {
                if fixed.id == id {
                    fixed.visible = visible;
                    return true;
                }
            }
        }
        false
    }

    /// Bulk visibility for every fixed block sharing `group_id`. Returns
    /// how many blocks were touched.
    pub fn set_group_visibility(&mut self, group_id: &str, visible: bool) -> usize {
        let mut touched = 0;
        for block in &mut self.blocks {
            if let Block::Fixed(fixed) = block {
                if fixed.group_id.as_deref() == Some(group_id) {
                    fixed.visible = visible;
                    touched += 1;
                }
            }
        }
        debug!(group_id, visible, touched, "group visibility toggle");
        touched
    }

    /// Delete every fixed block sharing `group_id` (deleting a group
    /// cascades). Returns how many blocks were removed.
    pub fn remove_group(&mut self, group_id: &str) -> usize {
        let before = self.blocks.len();
        self.blocks
            .retain(|b| !matches!(b, Block::Fixed(f) if f.group_id.as_deref() == Some(group_id)));
        before - self.blocks.len()
    }

    /// Concrete occurrences of the visible block set within `window`.
    pub fn occurrences(&self, window: &DateWindow) -> Vec<ConcreteOccurrence> {
        expand_window(&self.blocks, window)
    }

    /// Conflicts among the visible occurrences within `window`. Recomputed
    /// from scratch on every call; the stored patterns are the only state.
    pub fn conflicts(&self, window: &DateWindow) -> Vec<ConflictPair> {
        find_conflicts(&self.occurrences(window))
    }

    /// Validate a move/resize and commit it only on acceptance. A rejected
    /// proposal leaves the stored interval untouched.
    pub fn apply_move(
        &mut self,
        id: &str,
        proposed_start: DateTime<Utc>,
        proposed_end: DateTime<Utc>,
    ) -> Result<TimeInterval, MoveRejection> {
        let block = self
            .blocks
            .iter_mut()
            .find(|b| b.id() == id)
            .ok_or_else(|| MoveRejection::UnknownBlock(id.to_string()))?;

        let accepted = validate_move(block, proposed_start, proposed_end)?;
        if let Block::Flexible(flexible) = block {
            flexible.occurrence = accepted;
        }
        Ok(accepted)
    }

    /// Export the visible block set as an interchange document.
    pub fn to_ics(&self, calendar_name: &str, today: NaiveDate, zone: Option<Tz>) -> String {
        serialize_calendar(
            &export_occurrences(&self.blocks, today),
            calendar_name,
            zone,
        )
    }
}
