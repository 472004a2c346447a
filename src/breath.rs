use tracing::trace;

use crate::buffer::{PhonemeBuffer, PhonemeEntry};
use crate::error::Error;
use crate::phoneme::Phoneme;
use crate::tables::DescriptorTable;

/// Length given to the glottal stop that replaces a pause before a breath.
const GLOTTAL_BREATH_LENGTH: u8 = 4;

/// Inserts BREAK markers so that no stretch of speech lasts `threshold` frames or more.
///
/// Punctuation reached below the threshold is followed by a BREAK and starts a
/// new phrase. Once the threshold is reached, the most recent pause of the
/// phrase turns into a short glottal stop followed by a BREAK and the count
/// restarts after it. Without a pause to use, the BREAK goes right after the
/// current entry.
///
/// # Errors
///
/// Fails with [`Error::BufferOverflow`] when a BREAK does not fit.
pub fn insert_breaths(
    buffer: &mut PhonemeBuffer,
    table: &DescriptorTable,
    threshold: u16,
) -> Result<(), Error> {
    let threshold = u32::from(threshold);
    let mut total: u32 = 0;
    let mut tracked_pause: Option<usize> = None;
    let mut pos = 0;
    while pos < buffer.len() {
        let phoneme = buffer.phoneme(pos);
        total += u32::from(buffer.length(pos));
        if total < threshold {
            if table.flags(phoneme).is_punctuation() {
                trace!(pos, "breath after punctuation");
                total = 0;
                tracked_pause = None;
                buffer.insert(pos + 1, break_entry())?;
                pos += 2;
                continue;
            }
            if phoneme == Phoneme::Pause {
                tracked_pause = Some(pos);
            }
            pos += 1;
            continue;
        }
        total = 0;
        let at = if let Some(pause) = tracked_pause.take() {
            trace!(pos = pause, "forced breath at pause");
            buffer.replace(
                pause,
                PhonemeEntry::new(Phoneme::Q, GLOTTAL_BREATH_LENGTH, 0),
            )?;
            pause
        } else {
            trace!(pos, "forced breath without pause");
            pos
        };
        buffer.insert(at + 1, break_entry())?;
        pos = at + 2;
    }
    Ok(())
}

const fn break_entry() -> PhonemeEntry {
    PhonemeEntry::new(Phoneme::Break, 0, 0)
}
