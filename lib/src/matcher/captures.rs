/*! The per-line store for texts captured by groups.

Slots are handed out by reservation: when the matcher starts evaluating
a capturing group it reserves the first free slot, and only writes the
captured text once the subpattern has succeeded. Reserving up front
keeps slot order equal to source order even when a right sibling group
is evaluated before a left sibling finishes, which happens during
backtracking. A reservation outlives a failed attempt on purpose, the
store only returns slots on [`CaptureStore::reset`], between starting
offsets and between lines.
*/

use bstr::{BStr, BString, ByteSlice};

/// One capture position: the reserved flag and the captured text.
#[derive(Debug, Clone, Default)]
struct CaptureSlot {
    text: BString,
    reserved: bool,
}

/// The ordered container of capture slots for one line.
///
/// Its length is fixed at construction to the pattern's group count.
/// The searcher owns the store and lends it to the matcher for the
/// duration of one match attempt.
#[derive(Debug, Clone)]
pub struct CaptureStore {
    slots: Vec<CaptureSlot>,
}

impl CaptureStore {
    /// Creates a store with one empty, unreserved slot per capturing
    /// group.
    pub fn new(group_count: usize) -> Self {
        Self { slots: vec![CaptureSlot::default(); group_count] }
    }

    /// Number of slots in the store.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the pattern declared no capturing groups.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns all slots to empty and unreserved.
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            slot.text.clear();
            slot.reserved = false;
        }
    }

    /// Reserves the first unreserved slot and returns its index, or
    /// `None` when every slot is already taken by an enclosing or
    /// earlier group of this attempt.
    pub(crate) fn reserve_first_free(&mut self) -> Option<usize> {
        let index = self.slots.iter().position(|slot| !slot.reserved)?;
        self.slots[index].reserved = true;
        Some(index)
    }

    /// Stores the text captured by the group holding `slot`.
    pub(crate) fn set_text(&mut self, slot: usize, text: &[u8]) {
        let captured = &mut self.slots[slot].text;
        captured.clear();
        captured.extend_from_slice(text);
    }

    /// Returns a reservation without storing text. Used when a
    /// repeated group succeeded while consuming nothing.
    pub(crate) fn release(&mut self, slot: usize) {
        self.slots[slot].reserved = false;
    }

    /// The text currently held by `slot`. Empty both before the owning
    /// group has matched and when it captured an empty string.
    pub(crate) fn text(&self, slot: usize) -> &BStr {
        self.slots[slot].text.as_bstr()
    }

    /// Whether `slot` is currently reserved.
    pub(crate) fn is_reserved(&self, slot: usize) -> bool {
        self.slots[slot].reserved
    }
}
