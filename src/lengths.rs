//! Base durations and the rules that stretch or shorten them in context.
//!
//! All duration arithmetic is done on `u8` with wrapping, so results match
//! the reference byte tables bit for bit.

use tracing::trace;

use crate::buffer::PhonemeBuffer;
use crate::error::Error;
use crate::flags::PhonemeFlags;
use crate::parser::StopClusterRule;
use crate::phoneme::Phoneme;
use crate::tables::DescriptorTable;

/// Sets every entry's length to its descriptor's stressed or unstressed length.
/// Entries without a descriptor keep their length.
///
/// # Errors
///
/// Only fails if the buffer is corrupted.
pub fn assign_lengths(buffer: &mut PhonemeBuffer, table: &DescriptorTable) -> Result<(), Error> {
    for pos in 0..buffer.len() {
        if let Some(length) = table.base_length(buffer.phoneme(pos), buffer.stress(pos)) {
            buffer.set_length(pos, length)?;
        }
    }
    Ok(())
}

/// Runs the pre-punctuation lengthening pass, then the contextual shortening pass.
///
/// # Errors
///
/// Only fails if the buffer is corrupted.
pub fn adjust_lengths(
    buffer: &mut PhonemeBuffer,
    table: &DescriptorTable,
    stop_cluster_rule: StopClusterRule,
) -> Result<(), Error> {
    lengthen_before_punctuation(buffer, table)?;
    for pos in 0..buffer.len() {
        shorten(buffer, table, stop_cluster_rule, pos)?;
    }
    Ok(())
}

//--- Lengthening --------------------------------------------------------------

/// Stretches everything from the last vowel up to each punctuation mark by 1.5.
/// Punctuation with no vowel in front of it ends the whole pass.
fn lengthen_before_punctuation(
    buffer: &mut PhonemeBuffer,
    table: &DescriptorTable,
) -> Result<(), Error> {
    let mut punct = 0;
    while punct < buffer.len() {
        if !table.flags(buffer.phoneme(punct)).is_punctuation() {
            punct += 1;
            continue;
        }
        let Some(vowel) = (1..punct)
            .rev()
            .find(|&pos| table.flags(buffer.phoneme(pos)).is_vowel())
        else {
            trace!(punct, "no vowel before punctuation, stop lengthening");
            return Ok(());
        };
        for pos in vowel..punct {
            let flags = table.flags(buffer.phoneme(pos));
            if !flags.is_fricative() || flags.is_voiced() {
                let length = buffer.length(pos);
                trace!(pos, "lengthen <!FRICATIVE> or <VOICED> between VOWEL and PUNCTUATION by 1.5");
                buffer.set_length(pos, (length >> 1).wrapping_add(length).wrapping_add(1))?;
            }
        }
        punct += 1;
    }
    Ok(())
}

//--- Shortening ---------------------------------------------------------------

fn shorten(
    buffer: &mut PhonemeBuffer,
    table: &DescriptorTable,
    stop_cluster_rule: StopClusterRule,
    pos: usize,
) -> Result<(), Error> {
    let flags = table.flags(buffer.phoneme(pos));
    let next = buffer.phoneme(pos + 1);
    let length = buffer.length(pos);

    if flags.is_vowel() {
        let next_flags = if next == Phoneme::End {
            PhonemeFlags::CONSONANT | PhonemeFlags::UNVOICED_STOP
        } else {
            table.flags(next)
        };
        if !next_flags.is_consonant() {
            if matches!(next, Phoneme::Rx | Phoneme::Lx)
                && table.flags(buffer.phoneme(pos + 2)).is_consonant()
            {
                trace!(pos, "<VOWEL> <RX | LX> <CONSONANT> - decrease vowel by 1");
                buffer.set_length(pos, length.wrapping_sub(1))?;
            }
        } else if !next_flags.is_voiced() {
            if next_flags.is_unvoiced_stop() {
                trace!(pos, "<VOWEL> <UNVOICED PLOSIVE> - decrease vowel by 1/8th");
                buffer.set_length(pos, length.wrapping_sub(length >> 3))?;
            }
        } else {
            trace!(pos, "<VOWEL> <VOICED CONSONANT> - increase vowel by 1/4 + 1");
            buffer.set_length(pos, (length >> 2).wrapping_add(length).wrapping_add(1))?;
        }
        return Ok(());
    }

    if flags.is_nasal() {
        if next != Phoneme::End && table.flags(next).is_stop() {
            trace!(pos, "<NASAL> <STOP CONSONANT> - set nasal = 5, consonant = 6");
            buffer.set_length(pos + 1, 6)?;
            buffer.set_length(pos, 5)?;
        }
        return Ok(());
    }

    if flags.is_stop() {
        let mut other = pos + 1;
        while buffer.phoneme(other) == Phoneme::Pause {
            other += 1;
        }
        let other_phoneme = buffer.phoneme(other);
        if other_phoneme != Phoneme::End
            && table.flags(other_phoneme).is_stop()
            && stop_cluster_rule.allows(flags)
        {
            trace!(pos, other, "<STOP CONSONANT> {{optional silence}} <STOP CONSONANT> - shorten both to 1/2 + 1");
            buffer.set_length(other, (buffer.length(other) >> 1) + 1)?;
            buffer.set_length(pos, (length >> 1) + 1)?;
        }
        return Ok(());
    }

    if flags.is_liquid() && table.flags(buffer.preceding(pos)).is_stop() {
        trace!(pos, "<STOP CONSONANT> <LIQUID> - decrease liquid by 2");
        buffer.set_length(pos, length.wrapping_sub(2))?;
    }
    Ok(())
}
