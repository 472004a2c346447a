use alloc::vec::Vec;

use tracing::trace;

use crate::buffer::{PhonemeBuffer, PhonemeEntry};
use crate::error::{Error, ParseError};
use crate::tables::DescriptorTable;

/// Stress characters from weakest to strongest; the rank is the position.
/// Rank 0 is never a valid stress.
const STRESS_MARKERS: [char; 9] = ['*', '1', '2', '3', '4', '5', '6', '7', '8'];

/// Turns a transcription such as `DHAX KAET IHZ AH5GLIY.` into a fresh buffer.
///
/// At every character the tokenizer tries, in order: an exact two character
/// mnemonic, a one character wildcard mnemonic, then a stress digit that
/// applies to the most recently added phoneme.
///
/// # Errors
///
/// - [`ParseError::EmptyInput`] for an empty string.
/// - [`ParseError::UnrecognizedCharacter`] for a character nothing matches.
/// - [`ParseError::StressWithoutPhoneme`] for a stress digit in front of every phoneme.
/// - [`Error::BufferOverflow`] when the phonemes do not fit in `capacity` slots.
pub fn tokenize(
    table: &DescriptorTable,
    input: &str,
    capacity: usize,
) -> Result<PhonemeBuffer, Error> {
    if input.is_empty() {
        return Err(ParseError::EmptyInput.into());
    }
    let chars: Vec<char> = input.chars().collect();
    let mut buffer = PhonemeBuffer::with_capacity(capacity);
    let mut pos = 0;
    while let Some(&first) = chars.get(pos) {
        if let Some(&second) = chars.get(pos + 1)
            && let Some(phoneme) = table.full_match(first, second)
        {
            trace!(pos, %phoneme, "full match");
            buffer.push(PhonemeEntry::new(phoneme, 0, 0))?;
            pos += 2;
            continue;
        }
        if let Some(phoneme) = table.wild_match(first) {
            trace!(pos, %phoneme, "wildcard match");
            buffer.push(PhonemeEntry::new(phoneme, 0, 0))?;
            pos += 1;
            continue;
        }
        let rank = stress_rank(first).ok_or(ParseError::UnrecognizedCharacter {
            position: pos,
            character: first,
        })?;
        let last = buffer
            .len()
            .checked_sub(1)
            .ok_or(ParseError::StressWithoutPhoneme {
                position: pos,
                character: first,
            })?;
        buffer.set_stress(last, rank)?;
        pos += 1;
    }
    Ok(buffer)
}

/// Searches the stress markers from the strongest down to rank 1.
fn stress_rank(c: char) -> Option<u8> {
    (1..STRESS_MARKERS.len())
        .rev()
        .find(|&rank| STRESS_MARKERS[rank] == c)
        .and_then(|rank| u8::try_from(rank).ok())
}
