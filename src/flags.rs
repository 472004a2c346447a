use core::fmt;
use core::ops::{BitOr, BitOrAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The property mask of a phoneme descriptor.
///
/// The bit layout is the one of the reference descriptor tables, so a mask
/// can be copied verbatim from a table asset.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct PhonemeFlags(u16);

impl PhonemeFlags {
    /// Pause and punctuation.
    pub const SILENCE: Self = Self(0x8000);
    /// Punctuation and the glottal stop.
    pub const CLOSURE: Self = Self(0x4000);
    pub const FRICATIVE: Self = Self(0x2000);
    pub const LIQUID: Self = Self(0x1000);
    pub const NASAL: Self = Self(0x0800);
    pub const ALVEOLAR: Self = Self(0x0400);
    pub const PUNCTUATION: Self = Self(0x0100);
    pub const VOWEL: Self = Self(0x0080);
    pub const CONSONANT: Self = Self(0x0040);
    /// Diphthong (or vowel) ending in the IY sound; glides into YX instead of WX.
    pub const IY_ENDING: Self = Self(0x0020);
    pub const DIPHTHONG: Self = Self(0x0010);
    /// Allophone cluster marker. Unvoiced plosives followed by one of these keep a single entry.
    pub const CLUSTER: Self = Self(0x0008);
    pub const VOICED: Self = Self(0x0004);
    pub const STOP: Self = Self(0x0002);
    pub const UNVOICED_STOP: Self = Self(0x0001);

    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns `true` if any bit of `other` is set in `self`.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns `true` if every bit of `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_vowel(self) -> bool {
        self.intersects(Self::VOWEL)
    }

    #[must_use]
    pub const fn is_consonant(self) -> bool {
        self.intersects(Self::CONSONANT)
    }

    #[must_use]
    pub const fn is_diphthong(self) -> bool {
        self.intersects(Self::DIPHTHONG)
    }

    #[must_use]
    pub const fn ends_in_iy(self) -> bool {
        self.intersects(Self::IY_ENDING)
    }

    #[must_use]
    pub const fn is_punctuation(self) -> bool {
        self.intersects(Self::PUNCTUATION)
    }

    #[must_use]
    pub const fn is_fricative(self) -> bool {
        self.intersects(Self::FRICATIVE)
    }

    #[must_use]
    pub const fn is_liquid(self) -> bool {
        self.intersects(Self::LIQUID)
    }

    #[must_use]
    pub const fn is_nasal(self) -> bool {
        self.intersects(Self::NASAL)
    }

    #[must_use]
    pub const fn is_alveolar(self) -> bool {
        self.intersects(Self::ALVEOLAR)
    }

    #[must_use]
    pub const fn is_voiced(self) -> bool {
        self.intersects(Self::VOICED)
    }

    #[must_use]
    pub const fn is_stop(self) -> bool {
        self.intersects(Self::STOP)
    }

    #[must_use]
    pub const fn is_unvoiced_stop(self) -> bool {
        self.intersects(Self::UNVOICED_STOP)
    }

    #[must_use]
    pub const fn is_cluster(self) -> bool {
        self.intersects(Self::CLUSTER)
    }
}

impl BitOr for PhonemeFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for PhonemeFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl fmt::Debug for PhonemeFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(PhonemeFlags, &str); 15] = [
            (PhonemeFlags::SILENCE, "SILENCE"),
            (PhonemeFlags::CLOSURE, "CLOSURE"),
            (PhonemeFlags::FRICATIVE, "FRICATIVE"),
            (PhonemeFlags::LIQUID, "LIQUID"),
            (PhonemeFlags::NASAL, "NASAL"),
            (PhonemeFlags::ALVEOLAR, "ALVEOLAR"),
            (PhonemeFlags::PUNCTUATION, "PUNCTUATION"),
            (PhonemeFlags::VOWEL, "VOWEL"),
            (PhonemeFlags::CONSONANT, "CONSONANT"),
            (PhonemeFlags::IY_ENDING, "IY_ENDING"),
            (PhonemeFlags::DIPHTHONG, "DIPHTHONG"),
            (PhonemeFlags::CLUSTER, "CLUSTER"),
            (PhonemeFlags::VOICED, "VOICED"),
            (PhonemeFlags::STOP, "STOP"),
            (PhonemeFlags::UNVOICED_STOP, "UNVOICED_STOP"),
        ];
        write!(f, "PhonemeFlags({:#06x}", self.0)?;
        let mut sep = ": ";
        for (flag, name) in NAMES {
            if self.contains(flag) {
                write!(f, "{sep}{name}")?;
                sep = " | ";
            }
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::PhonemeFlags;
    use alloc::format;

    #[test]
    fn predicates_follow_bits() {
        let nasal = PhonemeFlags::from_bits(0x0C4C);
        assert!(nasal.is_nasal());
        assert!(nasal.is_alveolar());
        assert!(nasal.is_consonant());
        assert!(nasal.is_cluster());
        assert!(nasal.is_voiced());
        assert!(!nasal.is_vowel());
        assert!(!nasal.is_stop());
    }

    #[test]
    fn debug_lists_names() {
        let flags = PhonemeFlags::CONSONANT | PhonemeFlags::UNVOICED_STOP;
        assert_eq!(
            format!("{flags:?}"),
            "PhonemeFlags(0x0041: CONSONANT | UNVOICED_STOP)"
        );
        assert_eq!(format!("{:?}", PhonemeFlags::empty()), "PhonemeFlags(0x0000)");
    }
}
