use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::tables::DescriptorTable;

/// A phoneme, named after its mnemonic in the standard descriptor table.
///
/// The discriminant is the descriptor index. Stop consonants and affricates
/// are followed by the unnamed parts they are split into for rendering
/// (`B`, `BBurst`, `BAspiration`, ...). `Break` and `End` are buffer
/// markers without a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Phoneme {
    Pause = 0,
    Period,
    Question,
    Comma,
    Dash,
    Iy,
    Ih,
    Eh,
    Ae,
    Aa,
    Ah,
    Ao,
    Uh,
    Ax,
    Ix,
    Er,
    Ux,
    Oh,
    Rx,
    Lx,
    Wx,
    Yx,
    Wh,
    R,
    L,
    W,
    Y,
    M,
    N,
    Nx,
    Dx,
    /// Glottal stop.
    Q,
    S,
    Sh,
    F,
    Th,
    /// `/H`
    H,
    /// `/X`
    X,
    Z,
    Zh,
    V,
    Dh,
    Ch,
    ChRelease,
    J,
    JRelease,
    Unused46,
    Unused47,
    Ey,
    Ay,
    Oy,
    Aw,
    Ow,
    Uw,
    B,
    BBurst,
    BAspiration,
    D,
    DBurst,
    DAspiration,
    G,
    GBurst,
    GAspiration,
    Gx,
    GxBurst,
    GxAspiration,
    P,
    PBurst,
    PAspiration,
    T,
    TBurst,
    TAspiration,
    K,
    KBurst,
    KAspiration,
    Kx,
    KxBurst,
    KxAspiration,
    Ul,
    Um,
    Un = 80,
    /// Breath pause inserted by the parser.
    Break = 254,
    /// Logical end of a phoneme buffer.
    End = 255,
}

/// Number of phonemes that can carry a descriptor.
pub const PHONEME_COUNT: usize = 81;

use Phoneme::{
    Aa, Ae, Ah, Ao, Aw, Ax, Ay, B, BAspiration, BBurst, Ch, ChRelease, Comma, D, DAspiration,
    DBurst, Dash, Dh, Dx, Eh, Er, Ey, F, G, GAspiration, GBurst, Gx, GxAspiration, GxBurst, H, Ih,
    Ix, Iy, J, JRelease, K, KAspiration, KBurst, Kx, KxAspiration, KxBurst, L, Lx, M, N, Nx, Oh,
    Ow, Oy, P, PAspiration, PBurst, Pause, Period, Q, Question, R, Rx, S, Sh, T, TAspiration,
    TBurst, Th, Uh, Ul, Um, Un, Unused46, Unused47, Uw, Ux, V, W, Wh, Wx, X, Y, Yx, Z, Zh,
};

const ALL: [Phoneme; PHONEME_COUNT] = [
    Pause, Period, Question, Comma, Dash, Iy, Ih, Eh, Ae, Aa, Ah, Ao, Uh, Ax, Ix, Er, Ux, Oh, Rx,
    Lx, Wx, Yx, Wh, R, L, W, Y, M, N, Nx, Dx, Q, S, Sh, F, Th, H, X, Z, Zh, V, Dh, Ch, ChRelease,
    J, JRelease, Unused46, Unused47, Ey, Ay, Oy, Aw, Ow, Uw, B, BBurst, BAspiration, D, DBurst,
    DAspiration, G, GBurst, GAspiration, Gx, GxBurst, GxAspiration, P, PBurst, PAspiration, T,
    TBurst, TAspiration, K, KBurst, KAspiration, Kx, KxBurst, KxAspiration, Ul, Um, Un,
];

impl Phoneme {
    /// Every phoneme that can carry a descriptor, in index order.
    pub const ALL: [Phoneme; PHONEME_COUNT] = ALL;

    /// Returns the phoneme with the given descriptor index, or one of the markers for 254/255.
    #[must_use]
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            254 => Some(Phoneme::Break),
            255 => Some(Phoneme::End),
            _ => ALL.get(usize::from(index)).copied(),
        }
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// The phoneme `delta` descriptor slots away.
    /// Markers have no neighbours.
    #[must_use]
    pub fn offset(self, delta: i16) -> Option<Self> {
        if self.is_marker() {
            return None;
        }
        let index = i16::from(self.index()) + delta;
        usize::try_from(index)
            .ok()
            .and_then(|i| ALL.get(i))
            .copied()
    }

    /// `Break` and `End` are markers, every other phoneme is a descriptor index.
    #[must_use]
    pub const fn is_marker(self) -> bool {
        matches!(self, Phoneme::Break | Phoneme::End)
    }
}

impl fmt::Display for Phoneme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phoneme::Break => write!(f, "  "),
            Phoneme::End => write!(f, "??"),
            p => match DescriptorTable::standard().descriptor(*p) {
                Some(descriptor) => write!(f, "{}", descriptor.mnemonic),
                None => write!(f, "??"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Phoneme;
    use alloc::string::ToString;

    #[test]
    fn indices_line_up() {
        for (i, p) in Phoneme::ALL.iter().enumerate() {
            assert_eq!(usize::from(p.index()), i);
        }
        assert_eq!(Phoneme::R.index(), 23);
        assert_eq!(Phoneme::D.index(), 57);
        assert_eq!(Phoneme::T.index(), 69);
        assert_eq!(Phoneme::Un.index(), 80);
        assert_eq!(Phoneme::from_index(81), None);
        assert_eq!(Phoneme::from_index(254), Some(Phoneme::Break));
        assert_eq!(Phoneme::from_index(255), Some(Phoneme::End));
    }

    #[test]
    fn offsets() {
        assert_eq!(Phoneme::P.offset(-12), Some(Phoneme::B));
        assert_eq!(Phoneme::Kx.offset(-12), Some(Phoneme::Gx));
        assert_eq!(Phoneme::T.offset(2), Some(Phoneme::TAspiration));
        assert_eq!(Phoneme::Un.offset(1), None);
        assert_eq!(Phoneme::Pause.offset(-1), None);
        assert_eq!(Phoneme::End.offset(-1), None);
    }

    #[test]
    fn display_uses_mnemonic() {
        assert_eq!(Phoneme::H.to_string(), "/H");
        assert_eq!(Phoneme::R.to_string(), "R*");
        assert_eq!(Phoneme::Aa.to_string(), "AA");
        assert_eq!(Phoneme::Break.to_string(), "  ");
    }
}
