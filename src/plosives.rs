use tracing::trace;

use crate::buffer::{PhonemeBuffer, PhonemeEntry};
use crate::error::Error;
use crate::phoneme::Phoneme;
use crate::tables::DescriptorTable;

/// Splits every stop consonant into hold, burst and aspiration.
///
/// The two parts following a stop in the descriptor table are inserted right
/// after it with the stop's stress. An unvoiced stop in front of a cluster
/// phoneme, `/H` or `/X` (pauses skipped) stays a single entry.
///
/// # Errors
///
/// Fails with [`Error::BufferOverflow`] when the parts do not fit. A stop is
/// either split completely or left as it was.
pub fn prolong_plosives(buffer: &mut PhonemeBuffer, table: &DescriptorTable) -> Result<(), Error> {
    let mut pos = 0;
    while pos < buffer.len() {
        let phoneme = buffer.phoneme(pos);
        let flags = table.flags(phoneme);
        if !flags.is_stop() || (flags.is_unvoiced_stop() && joins_next(buffer, table, pos)) {
            pos += 1;
            continue;
        }
        let (Some(burst), Some(aspiration)) = (phoneme.offset(1), phoneme.offset(2)) else {
            pos += 1;
            continue;
        };
        if buffer.remaining() < 2 {
            return Err(Error::BufferOverflow {
                capacity: buffer.capacity(),
            });
        }
        let stress = buffer.stress(pos);
        trace!(pos, %phoneme, "prolong plosive");
        for (i, part) in [burst, aspiration].into_iter().enumerate() {
            let length = table.base_length(part, stress).unwrap_or(0);
            buffer.insert(pos + 1 + i, PhonemeEntry::new(part, length, stress))?;
        }
        pos += 3;
    }
    Ok(())
}

fn joins_next(buffer: &PhonemeBuffer, table: &DescriptorTable, pos: usize) -> bool {
    let mut next = pos + 1;
    while buffer.phoneme(next) == Phoneme::Pause {
        next += 1;
    }
    match buffer.phoneme(next) {
        Phoneme::End => false,
        Phoneme::H | Phoneme::X => true,
        other => table.flags(other).is_cluster(),
    }
}
