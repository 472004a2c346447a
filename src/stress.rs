use tracing::trace;

use crate::buffer::{PhonemeBuffer, STRESS_RESERVED};
use crate::error::Error;
use crate::phoneme::Phoneme;
use crate::tables::DescriptorTable;

/// Lets a consonant anticipate the stress of the vowel after it.
///
/// A consonant directly followed by a stressed vowel gets that stress plus
/// one, e.g. the L of `LOY5TER` ends up with stress 6.
///
/// # Errors
///
/// Fails with an internal error if the copied stress would carry the reserved 0x80 bit.
pub fn copy_stress(buffer: &mut PhonemeBuffer, table: &DescriptorTable) -> Result<(), Error> {
    for pos in 0..buffer.len() {
        if !table.flags(buffer.phoneme(pos)).is_consonant() {
            continue;
        }
        let next = buffer.phoneme(pos + 1);
        if next == Phoneme::End || !table.flags(next).is_vowel() {
            continue;
        }
        let stress = buffer.stress(pos + 1);
        if stress != 0 && stress & STRESS_RESERVED == 0 {
            trace!(pos, stress = stress + 1, "copy stress from following vowel");
            buffer.set_stress(pos, stress + 1)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::PhonemeEntry;
    use crate::error::InvariantViolation;

    #[test]
    fn consonant_takes_vowel_stress_plus_one() {
        let table = DescriptorTable::standard();
        let mut buffer = PhonemeBuffer::from_entries(
            16,
            [
                PhonemeEntry::new(Phoneme::L, 0, 0),
                PhonemeEntry::new(Phoneme::Oy, 0, 5),
                PhonemeEntry::new(Phoneme::Yx, 0, 5),
                PhonemeEntry::new(Phoneme::T, 0, 0),
                PhonemeEntry::new(Phoneme::Er, 0, 0),
            ],
        )
        .unwrap();
        copy_stress(&mut buffer, table).unwrap();
        let stresses: alloc::vec::Vec<u8> = buffer.iter().map(|e| e.stress).collect();
        assert_eq!(stresses, [6, 5, 5, 0, 0]);
    }

    #[test]
    fn stress_127_overflows_into_reserved_bit() {
        let table = DescriptorTable::standard();
        let mut buffer = PhonemeBuffer::from_entries(
            16,
            [
                PhonemeEntry::new(Phoneme::M, 0, 0),
                PhonemeEntry::new(Phoneme::Aa, 0, 0x7F),
            ],
        )
        .unwrap();
        assert_eq!(
            copy_stress(&mut buffer, table),
            Err(InvariantViolation::InvalidStressFlag {
                position: 0,
                stress: 0x80
            }
            .into())
        );
    }
}
