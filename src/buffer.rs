//! The bounded phoneme buffer every stage works on.

use alloc::vec::Vec;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, InvariantViolation};
use crate::phoneme::Phoneme;

/// Default number of slots in a buffer, END sentinel included.
pub const BUFFER_CAPACITY: usize = 256;

/// Bit that must never be set on a stored stress value.
pub(crate) const STRESS_RESERVED: u8 = 0x80;

/// One slot of a [`PhonemeBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PhonemeEntry {
    pub phoneme: Phoneme,
    /// duration in frames
    pub length: u8,
    pub stress: u8,
}

impl PhonemeEntry {
    #[must_use]
    pub const fn new(phoneme: Phoneme, length: u8, stress: u8) -> Self {
        Self {
            phoneme,
            length,
            stress,
        }
    }

    const fn end() -> Self {
        Self::new(Phoneme::End, 0, 0)
    }

    /// `(phoneme index, length, stress)` as handed to a renderer.
    #[must_use]
    pub const fn as_triple(&self) -> (u8, u8, u8) {
        (self.phoneme.index(), self.length, self.stress)
    }
}

/// An ordered sequence of phoneme entries, always terminated by exactly one END entry.
///
/// Positions are logical: `0..len()` are real entries and `len()` is the END
/// sentinel. Reads at or beyond the sentinel observe `End` with length and
/// stress 0. Writes are bounds checked and never touch the sentinel.
#[derive(Clone, PartialEq, Eq)]
pub struct PhonemeBuffer {
    entries: Vec<PhonemeEntry>,
    capacity: usize,
}

impl Default for PhonemeBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl PhonemeBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(BUFFER_CAPACITY)
    }

    /// An empty buffer with room for `capacity` slots, END included.
    /// A capacity of 0 is raised to 1 so the sentinel always fits.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut entries = Vec::with_capacity(capacity);
        entries.push(PhonemeEntry::end());
        Self { entries, capacity }
    }

    /// Builds a buffer from entries. An END entry in the input ends the buffer early.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::BufferOverflow`] if the entries do not fit, or with an
    /// [`InvariantViolation`] if an entry carries the reserved stress bit.
    pub fn from_entries(
        capacity: usize,
        entries: impl IntoIterator<Item = PhonemeEntry>,
    ) -> Result<Self, Error> {
        let mut buffer = Self::with_capacity(capacity);
        for entry in entries
            .into_iter()
            .take_while(|entry| entry.phoneme != Phoneme::End)
        {
            buffer.push(entry)?;
        }
        Ok(buffer)
    }

    /// Number of entries before the END sentinel.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len() - 1
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots still free for insertion.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.entries.len())
    }

    /// Appends an entry in front of the END sentinel.
    ///
    /// # Errors
    ///
    /// See [`PhonemeBuffer::insert`].
    pub fn push(&mut self, entry: PhonemeEntry) -> Result<(), Error> {
        self.insert(self.len(), entry)
    }

    /// Inserts `entry` at `pos`, shifting everything from `pos` on (the sentinel included)
    /// one slot to the right. Nothing changes if the insertion fails.
    ///
    /// # Errors
    ///
    /// - [`Error::BufferOverflow`] when every slot is in use.
    /// - [`InvariantViolation::OutOfBounds`] when `pos` is past the sentinel.
    /// - [`InvariantViolation::EndSentinel`] when `entry` is an END entry.
    /// - [`InvariantViolation::InvalidStressFlag`] when the stress has bit 0x80 set.
    pub fn insert(&mut self, pos: usize, entry: PhonemeEntry) -> Result<(), Error> {
        if pos > self.len() {
            return Err(self.out_of_bounds(pos).into());
        }
        check_entry(pos, entry)?;
        if self.entries.len() >= self.capacity {
            return Err(Error::BufferOverflow {
                capacity: self.capacity,
            });
        }
        self.entries.insert(pos, entry);
        Ok(())
    }

    /// The entry at `pos`, or the END sentinel for any position at or past it.
    #[must_use]
    pub fn get(&self, pos: usize) -> PhonemeEntry {
        self.entries
            .get(pos)
            .copied()
            .unwrap_or(PhonemeEntry::end())
    }

    #[must_use]
    pub fn phoneme(&self, pos: usize) -> Phoneme {
        self.get(pos).phoneme
    }

    /// The phoneme right before `pos`. Position 0 has END in front of it.
    #[must_use]
    pub fn preceding(&self, pos: usize) -> Phoneme {
        pos.checked_sub(1)
            .map_or(Phoneme::End, |prior| self.phoneme(prior))
    }

    #[must_use]
    pub fn length(&self, pos: usize) -> u8 {
        self.get(pos).length
    }

    #[must_use]
    pub fn stress(&self, pos: usize) -> u8 {
        self.get(pos).stress
    }

    /// # Errors
    ///
    /// Fails when `pos` is not a logical entry or `phoneme` is END.
    pub fn set_phoneme(&mut self, pos: usize, phoneme: Phoneme) -> Result<(), Error> {
        if phoneme == Phoneme::End {
            return Err(InvariantViolation::EndSentinel { position: pos }.into());
        }
        self.slot(pos)?.phoneme = phoneme;
        Ok(())
    }

    /// # Errors
    ///
    /// Fails when `pos` is not a logical entry.
    pub fn set_length(&mut self, pos: usize, length: u8) -> Result<(), Error> {
        self.slot(pos)?.length = length;
        Ok(())
    }

    /// # Errors
    ///
    /// Fails when `pos` is not a logical entry or `stress` carries the reserved 0x80 bit.
    pub fn set_stress(&mut self, pos: usize, stress: u8) -> Result<(), Error> {
        if stress & STRESS_RESERVED != 0 {
            return Err(InvariantViolation::InvalidStressFlag {
                position: pos,
                stress,
            }
            .into());
        }
        self.slot(pos)?.stress = stress;
        Ok(())
    }

    /// Overwrites the whole entry at `pos`.
    ///
    /// # Errors
    ///
    /// The checks of [`PhonemeBuffer::set_phoneme`] and [`PhonemeBuffer::set_stress`] apply.
    pub fn replace(&mut self, pos: usize, entry: PhonemeEntry) -> Result<(), Error> {
        check_entry(pos, entry)?;
        *self.slot(pos)? = entry;
        Ok(())
    }

    /// Makes `pos` the END sentinel, dropping it and everything after it.
    /// Positions at or past the current sentinel leave the buffer alone.
    pub fn truncate_at(&mut self, pos: usize) {
        if pos < self.len() {
            self.entries.truncate(pos);
            self.entries.push(PhonemeEntry::end());
        }
    }

    /// Logical entries, END excluded.
    pub fn iter(&self) -> impl Iterator<Item = &PhonemeEntry> {
        self.entries[..self.len()].iter()
    }

    /// Every slot in use, END sentinel last.
    #[must_use]
    pub fn as_slice(&self) -> &[PhonemeEntry] {
        &self.entries
    }

    /// The renderer-facing `(phoneme index, length, stress)` triples, END excluded.
    pub fn triples(&self) -> impl Iterator<Item = (u8, u8, u8)> + '_ {
        self.iter().map(PhonemeEntry::as_triple)
    }

    fn slot(&mut self, pos: usize) -> Result<&mut PhonemeEntry, InvariantViolation> {
        let len = self.len();
        if pos >= len {
            return Err(InvariantViolation::OutOfBounds { position: pos, len });
        }
        Ok(&mut self.entries[pos])
    }

    fn out_of_bounds(&self, pos: usize) -> InvariantViolation {
        InvariantViolation::OutOfBounds {
            position: pos,
            len: self.len(),
        }
    }
}

fn check_entry(pos: usize, entry: PhonemeEntry) -> Result<(), InvariantViolation> {
    if entry.phoneme == Phoneme::End {
        return Err(InvariantViolation::EndSentinel { position: pos });
    }
    if entry.stress & STRESS_RESERVED != 0 {
        return Err(InvariantViolation::InvalidStressFlag {
            position: pos,
            stress: entry.stress,
        });
    }
    Ok(())
}

impl fmt::Debug for PhonemeBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = &self.entries[..self.len()];
        f.debug_struct("PhonemeBuffer")
            .field("capacity", &self.capacity)
            .field("entries", &entries)
            .finish()
    }
}

/// The "internal phoneme presentation" table: position, index, mnemonic, length and stress.
impl fmt::Display for PhonemeBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==================================")?;
        writeln!(f, "Internal Phoneme presentation:")?;
        writeln!(f, " pos  idx  phoneme  length  stress")?;
        writeln!(f, "----------------------------------")?;
        for (pos, entry) in self.iter().enumerate() {
            writeln!(
                f,
                " {pos:03}  {:03}  {}       {:03}     {:03}",
                entry.phoneme.index(),
                entry.phoneme,
                entry.length,
                entry.stress
            )?;
        }
        write!(f, "==================================")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::ToString;

    fn entry(phoneme: Phoneme) -> PhonemeEntry {
        PhonemeEntry::new(phoneme, 0, 0)
    }

    #[test]
    fn debug_hides_the_sentinel() {
        let buffer = PhonemeBuffer::from_entries(4, [PhonemeEntry::new(Phoneme::Aa, 11, 2)]).unwrap();
        let debug = format!("{buffer:?}");
        assert!(debug.starts_with("PhonemeBuffer { capacity: 4, entries: ["), "{debug}");
        assert!(debug.contains("Aa"), "{debug}");
        assert!(!debug.contains("End"), "{debug}");
        assert_eq!(format!("{:?}", PhonemeBuffer::new()).matches("PhonemeEntry").count(), 0);
    }

    #[test]
    fn new_buffer_holds_only_the_sentinel() {
        let buffer = PhonemeBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.as_slice(), &[PhonemeEntry::end()]);
        assert_eq!(buffer.phoneme(0), Phoneme::End);
        assert_eq!(buffer.phoneme(100), Phoneme::End);
        assert_eq!(buffer.preceding(0), Phoneme::End);
    }

    #[test]
    fn insert_shifts_the_tail() {
        let mut buffer = PhonemeBuffer::from_entries(8, [entry(Phoneme::S), entry(Phoneme::Aa)]).unwrap();
        buffer.insert(1, entry(Phoneme::T)).unwrap();
        let phonemes: Vec<_> = buffer.as_slice().iter().map(|e| e.phoneme).collect();
        assert_eq!(
            phonemes,
            [Phoneme::S, Phoneme::T, Phoneme::Aa, Phoneme::End]
        );
        assert_eq!(buffer.preceding(2), Phoneme::T);
    }

    #[test]
    fn overflow_leaves_buffer_untouched() {
        let mut buffer = PhonemeBuffer::from_entries(3, [entry(Phoneme::S), entry(Phoneme::Aa)]).unwrap();
        let before = buffer.clone();
        assert_eq!(
            buffer.insert(0, entry(Phoneme::T)),
            Err(Error::BufferOverflow { capacity: 3 })
        );
        assert_eq!(buffer, before);
        assert_eq!(
            PhonemeBuffer::from_entries(1, [entry(Phoneme::S)]),
            Err(Error::BufferOverflow { capacity: 1 })
        );
    }

    #[test]
    fn writes_are_checked() {
        let mut buffer = PhonemeBuffer::from_entries(8, [entry(Phoneme::Aa)]).unwrap();
        assert_eq!(
            buffer.set_stress(0, 0x84),
            Err(InvariantViolation::InvalidStressFlag {
                position: 0,
                stress: 0x84
            }
            .into())
        );
        assert_eq!(
            buffer.set_length(1, 3),
            Err(InvariantViolation::OutOfBounds {
                position: 1,
                len: 1
            }
            .into())
        );
        assert_eq!(
            buffer.set_phoneme(0, Phoneme::End),
            Err(InvariantViolation::EndSentinel { position: 0 }.into())
        );
        assert!(buffer.insert(2, entry(Phoneme::T)).is_err());
        assert!(buffer.push(entry(Phoneme::End)).is_err());
        buffer.set_stress(0, 5).unwrap();
        assert_eq!(buffer.stress(0), 5);
    }

    #[test]
    fn truncate_moves_the_sentinel() {
        let mut buffer = PhonemeBuffer::from_entries(
            8,
            [entry(Phoneme::S), entry(Phoneme::Aa), entry(Phoneme::T)],
        )
        .unwrap();
        buffer.truncate_at(5);
        assert_eq!(buffer.len(), 3);
        buffer.truncate_at(1);
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.phoneme(1), Phoneme::End);
        assert_eq!(buffer.as_slice().len(), 2);
    }

    #[test]
    fn from_entries_stops_at_end() {
        let buffer = PhonemeBuffer::from_entries(
            8,
            [entry(Phoneme::S), entry(Phoneme::End), entry(Phoneme::T)],
        )
        .unwrap();
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn display_renders_table() {
        let buffer = PhonemeBuffer::from_entries(
            8,
            [
                PhonemeEntry::new(Phoneme::H, 2, 0),
                PhonemeEntry::new(Phoneme::Break, 0, 0),
            ],
        )
        .unwrap();
        let table = buffer.to_string();
        assert!(table.contains(" 000  036  /H       002     000"));
        assert!(table.contains(" 001  254           000     000"));
    }
}
