//! The phoneme descriptor table.
//!
//! Every rule of the parser asks the table two questions about a phoneme:
//! what its property flags are, and how long it lasts. The table is built
//! once and only ever read; the standard one is a `static`.

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::TableError;
use crate::flags::PhonemeFlags;
use crate::phoneme::{PHONEME_COUNT, Phoneme};

/// Second mnemonic character that matches any single input character.
pub const WILDCARD: u8 = b'*';

/// The one or two character code of a phoneme.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Mnemonic([u8; 2]);

impl Mnemonic {
    #[must_use]
    pub const fn new(code: &[u8; 2]) -> Self {
        Self(*code)
    }

    #[must_use]
    pub const fn first(self) -> u8 {
        self.0[0]
    }

    #[must_use]
    pub const fn second(self) -> u8 {
        self.0[1]
    }

    /// Returns `true` if the second character is the wildcard.
    #[must_use]
    pub const fn is_wild(self) -> bool {
        self.0[1] == WILDCARD
    }

    /// Exact two character match. Wildcard mnemonics never match this way.
    #[must_use]
    pub fn matches_pair(self, first: char, second: char) -> bool {
        !self.is_wild() && char::from(self.0[0]) == first && char::from(self.0[1]) == second
    }

    /// One character match against a wildcard mnemonic.
    #[must_use]
    pub fn matches_wild(self, first: char) -> bool {
        self.is_wild() && char::from(self.0[0]) == first
    }
}

impl TryFrom<&str> for Mnemonic {
    type Error = TableError;

    /// A single character is completed with the wildcard.
    fn try_from(code: &str) -> Result<Self, TableError> {
        match *code.as_bytes() {
            [first] if first.is_ascii() => Ok(Self([first, WILDCARD])),
            [first, second] if first.is_ascii() && second.is_ascii() => Ok(Self([first, second])),
            _ => Err(TableError::InvalidMnemonic(String::from(code))),
        }
    }
}

impl TryFrom<String> for Mnemonic {
    type Error = TableError;

    fn try_from(code: String) -> Result<Self, TableError> {
        Self::try_from(code.as_str())
    }
}

impl From<Mnemonic> for String {
    fn from(mnemonic: Mnemonic) -> String {
        let mut code = String::with_capacity(2);
        code.push(char::from(mnemonic.0[0]));
        code.push(char::from(mnemonic.0[1]));
        code
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", char::from(self.0[0]), char::from(self.0[1]))
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mnemonic({self})")
    }
}

/// Everything the parser knows about one phoneme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Descriptor {
    pub mnemonic: Mnemonic,
    pub flags: PhonemeFlags,
    /// length in frames when unstressed
    pub unstressed_length: u8,
    /// length in frames when stressed
    pub stressed_length: u8,
}

impl Descriptor {
    #[must_use]
    pub const fn new(
        mnemonic: &[u8; 2],
        flags: u16,
        unstressed_length: u8,
        stressed_length: u8,
    ) -> Self {
        Self {
            mnemonic: Mnemonic::new(mnemonic),
            flags: PhonemeFlags::from_bits(flags),
            unstressed_length,
            stressed_length,
        }
    }

    /// Picks the length for a stress value.
    /// Stress 0 and stress values carrying the reserved 0x80 bit use the unstressed length.
    #[must_use]
    pub const fn length_for(&self, stress: u8) -> u8 {
        if stress == 0 || stress & 0x80 != 0 {
            self.unstressed_length
        } else {
            self.stressed_length
        }
    }
}

/// Descriptor lookup for every phoneme index.
///
/// Phonemes beyond the end of a short table, and the `Break`/`End` markers,
/// have no descriptor: their flags are empty and they have no length.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "Vec<Descriptor>", into = "Vec<Descriptor>")
)]
pub struct DescriptorTable {
    descriptors: Cow<'static, [Descriptor]>,
}

impl DescriptorTable {
    /// The standard American English table.
    #[must_use]
    pub fn standard() -> &'static DescriptorTable {
        &STANDARD
    }

    /// Builds a table from descriptors listed in phoneme index order.
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`] when the list is empty or longer than the 81 addressable phonemes.
    pub fn from_descriptors(descriptors: Vec<Descriptor>) -> Result<Self, TableError> {
        if descriptors.is_empty() {
            return Err(TableError::Empty);
        }
        if descriptors.len() > PHONEME_COUNT {
            return Err(TableError::TooManyDescriptors {
                count: descriptors.len(),
            });
        }
        Ok(Self {
            descriptors: Cow::Owned(descriptors),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// A table always has at least one descriptor.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    #[must_use]
    pub fn descriptor(&self, phoneme: Phoneme) -> Option<&Descriptor> {
        if phoneme.is_marker() {
            return None;
        }
        self.descriptors.get(usize::from(phoneme.index()))
    }

    #[must_use]
    pub fn flags(&self, phoneme: Phoneme) -> PhonemeFlags {
        self.descriptor(phoneme)
            .map_or(PhonemeFlags::empty(), |descriptor| descriptor.flags)
    }

    /// The base length of `phoneme` for the given stress, if it has a descriptor.
    #[must_use]
    pub fn base_length(&self, phoneme: Phoneme, stress: u8) -> Option<u8> {
        self.descriptor(phoneme)
            .map(|descriptor| descriptor.length_for(stress))
    }

    /// First phoneme, in index order, whose non-wildcard mnemonic is exactly `first` `second`.
    #[must_use]
    pub fn full_match(&self, first: char, second: char) -> Option<Phoneme> {
        self.position(|mnemonic| mnemonic.matches_pair(first, second))
    }

    /// First phoneme, in index order, whose wildcard mnemonic starts with `first`.
    #[must_use]
    pub fn wild_match(&self, first: char) -> Option<Phoneme> {
        self.position(|mnemonic| mnemonic.matches_wild(first))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Phoneme, &Descriptor)> {
        Phoneme::ALL.into_iter().zip(self.descriptors.iter())
    }

    fn position(&self, pred: impl Fn(Mnemonic) -> bool) -> Option<Phoneme> {
        self.descriptors
            .iter()
            .position(|descriptor| pred(descriptor.mnemonic))
            .and_then(|i| Phoneme::ALL.get(i).copied())
    }
}

impl TryFrom<Vec<Descriptor>> for DescriptorTable {
    type Error = TableError;

    fn try_from(descriptors: Vec<Descriptor>) -> Result<Self, TableError> {
        Self::from_descriptors(descriptors)
    }
}

impl From<DescriptorTable> for Vec<Descriptor> {
    fn from(table: DescriptorTable) -> Vec<Descriptor> {
        table.descriptors.into_owned()
    }
}

//--- Standard table -----------------------------------------------------------

static STANDARD: DescriptorTable = DescriptorTable {
    descriptors: Cow::Borrowed(&STANDARD_DESCRIPTORS),
};

// mnemonic, flags, unstressed length, stressed length
#[rustfmt::skip]
const STANDARD_DESCRIPTORS: [Descriptor; PHONEME_COUNT] = [
    Descriptor::new(b" *", 0x8000, 0x00, 0x00), // 00
    Descriptor::new(b".*", 0xC100, 0x12, 0x12), // 01
    Descriptor::new(b"?*", 0xC100, 0x12, 0x12), // 02
    Descriptor::new(b",*", 0xC100, 0x12, 0x12), // 03
    Descriptor::new(b"-*", 0xC100, 0x08, 0x08), // 04
    Descriptor::new(b"IY", 0x00A4, 0x08, 0x0B), // 05
    Descriptor::new(b"IH", 0x00A4, 0x08, 0x09), // 06
    Descriptor::new(b"EH", 0x00A4, 0x08, 0x0B), // 07
    Descriptor::new(b"AE", 0x00A4, 0x08, 0x0E), // 08
    Descriptor::new(b"AA", 0x00A4, 0x0B, 0x0F), // 09
    Descriptor::new(b"AH", 0x00A4, 0x06, 0x0B), // 10
    Descriptor::new(b"AO", 0x0084, 0x0C, 0x10), // 11
    Descriptor::new(b"UH", 0x0084, 0x0A, 0x0C), // 12
    Descriptor::new(b"AX", 0x00A4, 0x05, 0x06), // 13
    Descriptor::new(b"IX", 0x00A4, 0x05, 0x06), // 14
    Descriptor::new(b"ER", 0x0084, 0x0B, 0x0E), // 15
    Descriptor::new(b"UX", 0x0084, 0x0A, 0x0C), // 16
    Descriptor::new(b"OH", 0x0084, 0x0A, 0x0E), // 17
    Descriptor::new(b"RX", 0x0084, 0x0A, 0x0C), // 18
    Descriptor::new(b"LX", 0x0084, 0x09, 0x0B), // 19
    Descriptor::new(b"WX", 0x0084, 0x08, 0x08), // 20
    Descriptor::new(b"YX", 0x0084, 0x07, 0x08), // 21
    Descriptor::new(b"WH", 0x0044, 0x09, 0x0B), // 22
    Descriptor::new(b"R*", 0x1044, 0x07, 0x0A), // 23
    Descriptor::new(b"L*", 0x1044, 0x06, 0x09), // 24
    Descriptor::new(b"W*", 0x1044, 0x08, 0x08), // 25
    Descriptor::new(b"Y*", 0x1044, 0x06, 0x08), // 26
    Descriptor::new(b"M*", 0x084C, 0x07, 0x08), // 27
    Descriptor::new(b"N*", 0x0C4C, 0x07, 0x08), // 28
    Descriptor::new(b"NX", 0x084C, 0x07, 0x08), // 29
    Descriptor::new(b"DX", 0x0448, 0x02, 0x03), // 30
    Descriptor::new(b"Q*", 0x404C, 0x05, 0x05), // 31
    Descriptor::new(b"S*", 0x2440, 0x02, 0x02), // 32
    Descriptor::new(b"SH", 0x2040, 0x02, 0x02), // 33
    Descriptor::new(b"F*", 0x2040, 0x02, 0x02), // 34
    Descriptor::new(b"TH", 0x2440, 0x02, 0x02), // 35
    Descriptor::new(b"/H", 0x0040, 0x02, 0x02), // 36
    Descriptor::new(b"/X", 0x0040, 0x02, 0x02), // 37
    Descriptor::new(b"Z*", 0x2444, 0x06, 0x06), // 38
    Descriptor::new(b"ZH", 0x2044, 0x06, 0x06), // 39
    Descriptor::new(b"V*", 0x2044, 0x07, 0x08), // 40
    Descriptor::new(b"DH", 0x2444, 0x06, 0x06), // 41
    Descriptor::new(b"CH", 0x2048, 0x06, 0x06), // 42
    Descriptor::new(b"**", 0x2040, 0x02, 0x02), // 43
    Descriptor::new(b"J*", 0x004C, 0x08, 0x09), // 44
    Descriptor::new(b"**", 0x2044, 0x03, 0x04), // 45
    Descriptor::new(b"**", 0x0000, 0x01, 0x02), // 46
    Descriptor::new(b"**", 0x0000, 0x1E, 0x01), // 47
    Descriptor::new(b"EY", 0x00B4, 0x0D, 0x0E), // 48
    Descriptor::new(b"AY", 0x00B4, 0x0C, 0x0F), // 49
    Descriptor::new(b"OY", 0x00B4, 0x0C, 0x0F), // 50
    Descriptor::new(b"AW", 0x0094, 0x0C, 0x0F), // 51
    Descriptor::new(b"OW", 0x0094, 0x0E, 0x0E), // 52
    Descriptor::new(b"UW", 0x0094, 0x09, 0x0E), // 53
    Descriptor::new(b"B*", 0x004E, 0x06, 0x08), // 54
    Descriptor::new(b"**", 0x004E, 0x01, 0x02), // 55
    Descriptor::new(b"**", 0x004E, 0x02, 0x02), // 56
    Descriptor::new(b"D*", 0x044E, 0x05, 0x07), // 57
    Descriptor::new(b"**", 0x044E, 0x01, 0x02), // 58
    Descriptor::new(b"**", 0x044E, 0x01, 0x01), // 59
    Descriptor::new(b"G*", 0x004E, 0x06, 0x07), // 60
    Descriptor::new(b"**", 0x004E, 0x01, 0x02), // 61
    Descriptor::new(b"**", 0x004E, 0x02, 0x02), // 62
    Descriptor::new(b"GX", 0x004E, 0x06, 0x07), // 63
    Descriptor::new(b"**", 0x004E, 0x01, 0x02), // 64
    Descriptor::new(b"**", 0x004E, 0x02, 0x02), // 65
    Descriptor::new(b"P*", 0x004B, 0x08, 0x08), // 66
    Descriptor::new(b"**", 0x004B, 0x02, 0x02), // 67
    Descriptor::new(b"**", 0x004B, 0x02, 0x02), // 68
    Descriptor::new(b"T*", 0x044B, 0x04, 0x06), // 69
    Descriptor::new(b"**", 0x044B, 0x02, 0x02), // 70
    Descriptor::new(b"**", 0x044B, 0x02, 0x02), // 71
    Descriptor::new(b"K*", 0x004B, 0x06, 0x07), // 72
    Descriptor::new(b"**", 0x004B, 0x01, 0x02), // 73
    Descriptor::new(b"**", 0x004B, 0x04, 0x04), // 74
    Descriptor::new(b"KX", 0x004B, 0x06, 0x07), // 75
    Descriptor::new(b"**", 0x004B, 0x01, 0x01), // 76
    Descriptor::new(b"**", 0x004B, 0x04, 0x04), // 77
    Descriptor::new(b"UL", 0x0080, 0xC7, 0x05), // 78
    Descriptor::new(b"UM", 0x00C1, 0xFF, 0x05), // 79
    Descriptor::new(b"UN", 0x00C1, 0xFF, 0x05), // 80
];
