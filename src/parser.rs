use tracing::{debug, debug_span, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::allophones::transform_allophones;
use crate::breath::insert_breaths;
use crate::buffer::{BUFFER_CAPACITY, PhonemeBuffer};
use crate::error::Error;
use crate::flags::PhonemeFlags;
use crate::lengths::{adjust_lengths, assign_lengths};
use crate::phoneme::Phoneme;
use crate::plosives::prolong_plosives;
use crate::stress::copy_stress;
use crate::tables::DescriptorTable;
use crate::tokenizer::tokenize;

/// Frames of speech allowed between two breaths by default.
pub const BREATH_THRESHOLD: u16 = 232;

/// Which leading stop consonant lets two adjacent stops shorten each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StopClusterRule {
    /// Any stop followed by a stop.
    #[default]
    AnyStop,
    /// Only B, D, G and GX lead a cluster.
    VoicedLead,
    /// Only P, T, K and KX lead a cluster.
    UnvoicedLead,
}

impl StopClusterRule {
    /// Returns `true` if a stop with these flags may lead a shortened cluster.
    #[must_use]
    pub const fn allows(self, lead: PhonemeFlags) -> bool {
        match self {
            StopClusterRule::AnyStop => true,
            StopClusterRule::VoicedLead => !lead.is_unvoiced_stop(),
            StopClusterRule::UnvoicedLead => lead.is_unvoiced_stop(),
        }
    }
}

/// Parameters for a parser run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ParserParms {
    /// buffer slots, END included
    pub capacity: usize,
    /// frames accumulated before a breath is forced
    pub breath_threshold: u16,
    pub stop_cluster_rule: StopClusterRule,
}

impl Default for ParserParms {
    fn default() -> Self {
        Self {
            capacity: BUFFER_CAPACITY,
            breath_threshold: BREATH_THRESHOLD,
            stop_cluster_rule: StopClusterRule::default(),
        }
    }
}

/// Runs every stage on `input` and returns the buffer ready for rendering.
///
/// ```
/// use articulate::{DescriptorTable, Phoneme, ParserParms, parse_phonemes};
///
/// let buffer = parse_phonemes(&ParserParms::default(), DescriptorTable::standard(), "/HEHLOW").unwrap();
/// assert_eq!(buffer.phoneme(0), Phoneme::H);
/// assert_eq!(buffer.phoneme(buffer.len()), Phoneme::End);
/// ```
///
/// # Errors
///
/// Input that does not tokenize yields [`Error::Parse`], an utterance that
/// outgrows `parms.capacity` yields [`Error::BufferOverflow`]. No partial
/// buffer is returned.
pub fn parse_phonemes(
    parms: &ParserParms,
    table: &DescriptorTable,
    input: &str,
) -> Result<PhonemeBuffer, Error> {
    let span = debug_span!("parse_phonemes", input);
    let _guard = span.enter();

    let mut buffer = tokenize(table, input, parms.capacity)?;
    debug!(entries = buffer.len(), "tokenized");
    transform_allophones(&mut buffer, table)?;
    debug!(entries = buffer.len(), "allophones");
    copy_stress(&mut buffer, table)?;
    debug!(entries = buffer.len(), "stress copied");
    assign_lengths(&mut buffer, table)?;
    debug!(entries = buffer.len(), "lengths assigned");
    adjust_lengths(&mut buffer, table, parms.stop_cluster_rule)?;
    debug!(entries = buffer.len(), "lengths adjusted");
    prolong_plosives(&mut buffer, table)?;
    debug!(entries = buffer.len(), "plosives prolonged");
    sanitize(&mut buffer, table);
    debug!(entries = buffer.len(), "sanitized");
    insert_breaths(&mut buffer, table, parms.breath_threshold)?;
    debug!(entries = buffer.len(), "breaths inserted");

    trace!("\n{buffer}");
    Ok(buffer)
}

/// Truncates the buffer at the first entry the table has no descriptor for.
/// BREAK markers are kept.
pub fn sanitize(buffer: &mut PhonemeBuffer, table: &DescriptorTable) {
    let unknown = buffer
        .iter()
        .position(|entry| entry.phoneme != Phoneme::Break && table.descriptor(entry.phoneme).is_none());
    if let Some(pos) = unknown {
        trace!(pos, "unknown phoneme, truncating");
        buffer.truncate_at(pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::PhonemeEntry;

    #[test]
    fn sanitize_stops_at_missing_descriptor() {
        let standard = DescriptorTable::standard();
        let short = DescriptorTable::from_descriptors(
            standard.iter().take(70).map(|(_, d)| *d).collect(),
        )
        .unwrap();
        let mut buffer = PhonemeBuffer::from_entries(
            8,
            [
                PhonemeEntry::new(Phoneme::Break, 0, 0),
                PhonemeEntry::new(Phoneme::T, 4, 0),
                PhonemeEntry::new(Phoneme::TBurst, 2, 0),
                PhonemeEntry::new(Phoneme::TAspiration, 2, 0),
                PhonemeEntry::new(Phoneme::Aa, 11, 0),
            ],
        )
        .unwrap();
        let mut untouched = buffer.clone();
        sanitize(&mut untouched, standard);
        assert_eq!(untouched, buffer);

        sanitize(&mut buffer, &short);
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.phoneme(2), Phoneme::End);
    }

    #[test]
    fn default_parms() {
        let parms = ParserParms::default();
        assert_eq!(parms.capacity, 256);
        assert_eq!(parms.breath_threshold, 232);
        assert_eq!(parms.stop_cluster_rule, StopClusterRule::AnyStop);
    }
}
