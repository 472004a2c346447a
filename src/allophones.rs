//! Context rules that replace phonemes with the variant spoken in that position.

use tracing::trace;

use crate::buffer::{PhonemeBuffer, PhonemeEntry};
use crate::error::Error;
use crate::phoneme::Phoneme;
use crate::tables::DescriptorTable;

/// Rewrites phonemes into their allophones in one forward pass.
///
/// Entries inserted by a rule shift the rest of the buffer and are visited by
/// the same pass, except for the consonant split off UL/UM/UN.
///
/// # Errors
///
/// Fails with [`Error::BufferOverflow`] when an insertion does not fit.
pub fn transform_allophones(
    buffer: &mut PhonemeBuffer,
    table: &DescriptorTable,
) -> Result<(), Error> {
    let mut pos = 0;
    while pos < buffer.len() {
        pos += apply_rules(buffer, table, pos)?;
    }
    Ok(())
}

/// Applies the first rule family that matches at `pos` and returns how far to advance.
fn apply_rules(
    buffer: &mut PhonemeBuffer,
    table: &DescriptorTable,
    pos: usize,
) -> Result<usize, Error> {
    let phoneme = buffer.phoneme(pos);
    if phoneme == Phoneme::Pause {
        return Ok(1);
    }
    let flags = table.flags(phoneme);
    let stress = buffer.stress(pos);

    if flags.is_diphthong() {
        // OIL, COW
        let glide = if flags.ends_in_iy() {
            Phoneme::Yx
        } else {
            Phoneme::Wx
        };
        trace!(pos, %phoneme, %glide, "insert glide after diphthong");
        buffer.insert(pos + 1, PhonemeEntry::new(glide, 0, stress))?;
        uw_ch_j(buffer, table, pos, phoneme)?;
        return Ok(1);
    }

    let split = match phoneme {
        Phoneme::Ul => Some(Phoneme::L),
        Phoneme::Um => Some(Phoneme::M),
        Phoneme::Un => Some(Phoneme::N),
        _ => None,
    };
    if let Some(consonant) = split {
        // MEDDLE, ASTRONOMY
        trace!(pos, %phoneme, %consonant, "-> AX <consonant>");
        buffer.set_phoneme(pos, Phoneme::Ax)?;
        buffer.insert(pos + 1, PhonemeEntry::new(consonant, 0, stress))?;
        return Ok(2);
    }

    if flags.is_vowel() && stress != 0 {
        // <STRESSED VOWEL> <PAUSE> <STRESSED VOWEL> -> <STRESSED VOWEL> <PAUSE> Q <STRESSED VOWEL>
        // AWAY EIGHT
        if buffer.phoneme(pos + 1) == Phoneme::Pause {
            let after = buffer.phoneme(pos + 2);
            if after != Phoneme::End && table.flags(after).is_vowel() && buffer.stress(pos + 2) != 0
            {
                trace!(pos = pos + 2, "insert glottal stop between stressed vowels");
                buffer.insert(pos + 2, PhonemeEntry::new(Phoneme::Q, 0, 0))?;
            }
        }
        return Ok(1);
    }

    neighbour_rules(buffer, table, pos)?;
    Ok(1)
}

/// Rules driven by the phonemes right before and after `pos`.
fn neighbour_rules(
    buffer: &mut PhonemeBuffer,
    table: &DescriptorTable,
    pos: usize,
) -> Result<(), Error> {
    let mut phoneme = buffer.phoneme(pos);
    let mut flags = table.flags(phoneme);
    let prior = buffer.preceding(pos);

    if phoneme == Phoneme::R {
        match prior {
            // TRACK
            Phoneme::T => {
                trace!(pos, "T* R* -> CH R*");
                buffer.set_phoneme(pos - 1, Phoneme::Ch)?;
            }
            // DRY
            Phoneme::D => {
                trace!(pos, "D* R* -> J* R*");
                buffer.set_phoneme(pos - 1, Phoneme::J)?;
            }
            // ART
            _ if table.flags(prior).is_vowel() => {
                trace!(pos, "<VOWEL> R* -> <VOWEL> RX");
                buffer.set_phoneme(pos, Phoneme::Rx)?;
            }
            _ => {}
        }
        return Ok(());
    }

    if phoneme == Phoneme::L && table.flags(prior).is_vowel() {
        // ALL
        trace!(pos, "<VOWEL> L* -> <VOWEL> LX");
        buffer.set_phoneme(pos, Phoneme::Lx)?;
        return Ok(());
    }

    if prior == Phoneme::G && phoneme == Phoneme::S {
        trace!(pos, "G S -> G Z");
        buffer.set_phoneme(pos, Phoneme::Z)?;
        return Ok(());
    }

    if phoneme == Phoneme::G {
        // GO
        let next = buffer.phoneme(pos + 1);
        if next != Phoneme::End && !table.flags(next).ends_in_iy() {
            trace!(pos, "G <VOWEL OR DIPHTHONG NOT ENDING WITH IY> -> GX");
            buffer.set_phoneme(pos, Phoneme::Gx)?;
            return Ok(());
        }
    }

    if phoneme == Phoneme::K {
        // COW
        let next = buffer.phoneme(pos + 1);
        if next == Phoneme::End || !table.flags(next).ends_in_iy() {
            trace!(pos, "K <VOWEL OR DIPHTHONG NOT ENDING WITH IY> -> KX");
            buffer.set_phoneme(pos, Phoneme::Kx)?;
            phoneme = Phoneme::Kx;
            flags = table.flags(phoneme);
        }
    }

    if flags.is_unvoiced_stop() {
        if prior == Phoneme::S {
            // SPY, STY, SKY, SCOWL
            if let Some(softer) = phoneme.offset(-12) {
                trace!(pos, %phoneme, %softer, "S* <UNVOICED STOP> -> S* <VOICED STOP>");
                buffer.set_phoneme(pos, softer)?;
            }
        }
    } else {
        uw_ch_j(buffer, table, pos, phoneme)?;
    }

    if matches!(phoneme, Phoneme::T | Phoneme::D) && table.flags(prior).is_vowel() {
        // PARTY, TARDY
        let mut next = buffer.phoneme(pos + 1);
        if next == Phoneme::Pause {
            next = buffer.phoneme(pos + 2);
        }
        if table.flags(next).is_vowel() && buffer.stress(pos + 1) == 0 {
            trace!(pos, "soften T or D between vowel and unstressed vowel -> DX");
            buffer.set_phoneme(pos, Phoneme::Dx)?;
        }
    }
    Ok(())
}

/// UW after an alveolar becomes UX; CH and J get their release part appended.
fn uw_ch_j(
    buffer: &mut PhonemeBuffer,
    table: &DescriptorTable,
    pos: usize,
    phoneme: Phoneme,
) -> Result<(), Error> {
    let stress = buffer.stress(pos);
    match phoneme {
        // NEW, DEW, SUE, ZOO, THOO, TOO
        Phoneme::Uw if table.flags(buffer.preceding(pos)).is_alveolar() => {
            trace!(pos, "<ALVEOLAR> UW -> <ALVEOLAR> UX");
            buffer.set_phoneme(pos, Phoneme::Ux)?;
        }
        // CHEW
        Phoneme::Ch => {
            trace!(pos, "CH -> CH CH+1");
            buffer.insert(pos + 1, PhonemeEntry::new(Phoneme::ChRelease, 0, stress))?;
        }
        // JAY
        Phoneme::J => {
            trace!(pos, "J -> J J+1");
            buffer.insert(pos + 1, PhonemeEntry::new(Phoneme::JRelease, 0, stress))?;
        }
        _ => {}
    }
    Ok(())
}
