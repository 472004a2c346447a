//! Phoneme transformation pipeline for articulatory speech synthesis.
//!
//! Turns a phonetic transcription such as `DHAX KAET IHZ AH5GLIY.` into
//! `(phoneme, length, stress)` triples a synthesizer can render directly.
//!
//! *NOTE*: This is _not_ a text-to-speech engine.
//! English text has to be transcribed into phonemes first, and the result
//! still needs a renderer to become audio.
//!
//! ```
//! use articulate::{DescriptorTable, ParserParms, Phoneme, parse_phonemes};
//!
//! let buffer = parse_phonemes(
//!     &ParserParms::default(),
//!     DescriptorTable::standard(),
//!     "/HEHLOW , MAY NEYM IHZ SAEM.",
//! )
//! .unwrap();
//! let (phoneme, length, stress) = buffer.triples().next().unwrap();
//! assert_eq!(phoneme, Phoneme::H.index());
//! assert_eq!((length, stress), (2, 0));
//! ```
//!
//! Every stage is public as well, so a host can run them one by one on a
//! [`PhonemeBuffer`].
//!
//! ## `no_std`
//!
//! This library is `no_std` compatible when the default `std` feature is disabled.
//! `alloc` is required.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(
    clippy::all,
    clippy::cargo,
    clippy::pedantic,
    unsafe_code,
    rustdoc::all
)]

extern crate alloc;

mod allophones;
pub use allophones::transform_allophones;
mod breath;
pub use breath::insert_breaths;
mod buffer;
pub use buffer::{BUFFER_CAPACITY, PhonemeBuffer, PhonemeEntry};
mod error;
pub use error::{Error, InvariantViolation, ParseError, TableError};
mod flags;
pub use flags::PhonemeFlags;
mod lengths;
pub use lengths::{adjust_lengths, assign_lengths};
mod parser;
pub use parser::{BREATH_THRESHOLD, ParserParms, StopClusterRule, parse_phonemes, sanitize};
mod phoneme;
pub use phoneme::{PHONEME_COUNT, Phoneme};
mod plosives;
pub use plosives::prolong_plosives;
mod stress;
pub use stress::copy_stress;
mod tables;
pub use tables::{Descriptor, DescriptorTable, Mnemonic, WILDCARD};
mod tokenizer;
pub use tokenizer::tokenize;

#[cfg(test)]
mod lib_tests;
