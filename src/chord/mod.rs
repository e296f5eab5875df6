// Purpose: turn trigger and modifier keys into owned, range-bound chords

pub mod ledger;
pub mod modifier;
pub mod names;
pub mod note_set;
pub mod range;
pub mod voicing;

pub use ledger::{is_trigger_note, Ledger, RetriggerMode};
pub use modifier::{is_modifier_note, Extension, Intervals, ModifierState, Triad};
pub use names::{chord_name, note_label, note_name};
pub use note_set::NoteSet;
pub use range::{fit_note_to_range, RangeBounds};
pub use voicing::{voice, ChordShape};
