#[cfg(test)]
use super::{
    BUFFER_CAPACITY, DescriptorTable, ParserParms, Phoneme, PhonemeBuffer, copy_stress,
    parse_phonemes, tokenize, transform_allophones,
};
use alloc::vec::Vec;

fn allophones(input: &str) -> PhonemeBuffer {
    let table = DescriptorTable::standard();
    let mut buffer = tokenize(table, input, BUFFER_CAPACITY).unwrap();
    transform_allophones(&mut buffer, table).unwrap();
    buffer
}

fn phonemes(buffer: &PhonemeBuffer) -> Vec<Phoneme> {
    buffer.iter().map(|entry| entry.phoneme).collect()
}

#[test]
fn diphthongs_get_a_glide() {
    assert_eq!(phonemes(&allophones("OY")), [Phoneme::Oy, Phoneme::Yx]);
    assert_eq!(phonemes(&allophones("AW")), [Phoneme::Aw, Phoneme::Wx]);
    let buffer = allophones("EY4");
    assert_eq!(buffer.stress(1), 4);
}

#[test]
fn syllabic_consonants_split() {
    assert_eq!(phonemes(&allophones("UL")), [Phoneme::Ax, Phoneme::L]);
    assert_eq!(phonemes(&allophones("UM")), [Phoneme::Ax, Phoneme::M]);
    assert_eq!(phonemes(&allophones("UN")), [Phoneme::Ax, Phoneme::N]);
    let buffer = allophones("UL3");
    assert_eq!(buffer.stress(1), 3);
}

#[test]
fn glottal_stop_between_stressed_vowels() {
    assert_eq!(
        phonemes(&allophones("AA5 AA5")),
        [Phoneme::Aa, Phoneme::Pause, Phoneme::Q, Phoneme::Aa]
    );
    assert_eq!(
        phonemes(&allophones("AA5 AA")),
        [Phoneme::Aa, Phoneme::Pause, Phoneme::Aa]
    );
}

#[test]
fn r_rules() {
    assert_eq!(phonemes(&allophones("TR")), [Phoneme::Ch, Phoneme::R]);
    assert_eq!(phonemes(&allophones("DR")), [Phoneme::J, Phoneme::R]);
    assert_eq!(phonemes(&allophones("AAR")), [Phoneme::Aa, Phoneme::Rx]);
    assert_eq!(phonemes(&allophones("R")), [Phoneme::R]);
}

#[test]
fn l_after_vowel() {
    assert_eq!(phonemes(&allophones("AAL")), [Phoneme::Aa, Phoneme::Lx]);
    assert_eq!(phonemes(&allophones("L")), [Phoneme::L]);
}

#[test]
fn g_and_k_before_back_vowels() {
    assert_eq!(phonemes(&allophones("GIY")), [Phoneme::G, Phoneme::Iy]);
    assert_eq!(phonemes(&allophones("GS")), [Phoneme::Gx, Phoneme::S]);
    assert_eq!(phonemes(&allophones("G")), [Phoneme::G]);
    assert_eq!(
        phonemes(&allophones("KOW")),
        [Phoneme::Kx, Phoneme::Ow, Phoneme::Wx]
    );
    assert_eq!(phonemes(&allophones("KAE")), [Phoneme::K, Phoneme::Ae]);
}

#[test]
fn s_softens_following_stop() {
    assert_eq!(
        phonemes(&allophones("STAA")),
        [Phoneme::S, Phoneme::D, Phoneme::Aa]
    );
    assert_eq!(
        phonemes(&allophones("SKUH")),
        [Phoneme::S, Phoneme::Gx, Phoneme::Uh]
    );
}

#[test]
fn uw_ch_j() {
    assert_eq!(
        phonemes(&allophones("SUW")),
        [Phoneme::S, Phoneme::Ux, Phoneme::Wx]
    );
    assert_eq!(
        phonemes(&allophones("MUW")),
        [Phoneme::M, Phoneme::Uw, Phoneme::Wx]
    );
    assert_eq!(
        phonemes(&allophones("CHAA")),
        [Phoneme::Ch, Phoneme::ChRelease, Phoneme::Aa]
    );
    assert_eq!(
        phonemes(&allophones("JAA")),
        [Phoneme::J, Phoneme::JRelease, Phoneme::Aa]
    );
}

#[test]
fn flapping() {
    assert_eq!(
        phonemes(&allophones("AATAA")),
        [Phoneme::Aa, Phoneme::Dx, Phoneme::Aa]
    );
    assert_eq!(
        phonemes(&allophones("AAD AA")),
        [Phoneme::Aa, Phoneme::Dx, Phoneme::Pause, Phoneme::Aa]
    );
    assert_eq!(
        phonemes(&allophones("AATAA5")),
        [Phoneme::Aa, Phoneme::T, Phoneme::Aa]
    );
}

#[test]
fn stress_anticipation() {
    let table = DescriptorTable::standard();
    let mut buffer = allophones("LOY5TER");
    assert_eq!(
        phonemes(&buffer),
        [Phoneme::L, Phoneme::Oy, Phoneme::Yx, Phoneme::Dx, Phoneme::Er]
    );
    copy_stress(&mut buffer, table).unwrap();
    let stresses: Vec<u8> = buffer.iter().map(|entry| entry.stress).collect();
    assert_eq!(stresses, [6, 5, 5, 0, 0]);
}

#[test]
fn hello_end_to_end() {
    let buffer = parse_phonemes(
        &ParserParms::default(),
        DescriptorTable::standard(),
        "/HEHLOW",
    )
    .unwrap();
    let triples: Vec<_> = buffer.triples().collect();
    assert_eq!(
        triples,
        [
            (Phoneme::H.index(), 2, 0),
            (Phoneme::Eh.index(), 8, 0),
            (Phoneme::Lx.index(), 9, 0),
            (Phoneme::Ow.index(), 14, 0),
            (Phoneme::Wx.index(), 7, 0),
        ]
    );
}

#[test]
fn cat_end_to_end() {
    let buffer = parse_phonemes(
        &ParserParms::default(),
        DescriptorTable::standard(),
        "KAET",
    )
    .unwrap();
    let triples: Vec<_> = buffer
        .iter()
        .map(|entry| (entry.phoneme, entry.length))
        .collect();
    assert_eq!(
        triples,
        [
            (Phoneme::K, 6),
            (Phoneme::KBurst, 1),
            (Phoneme::KAspiration, 4),
            (Phoneme::Ae, 7),
            (Phoneme::T, 4),
            (Phoneme::TBurst, 2),
            (Phoneme::TAspiration, 2),
        ]
    );
}

#[test]
fn sentence_gets_breath_after_period() {
    let buffer = parse_phonemes(
        &ParserParms::default(),
        DescriptorTable::standard(),
        "MAY NEYM IHZ SAEM.",
    )
    .unwrap();
    let period = buffer
        .iter()
        .position(|entry| entry.phoneme == Phoneme::Period)
        .unwrap();
    assert_eq!(buffer.phoneme(period + 1), Phoneme::Break);
    assert_eq!(buffer.len(), period + 2);
}
