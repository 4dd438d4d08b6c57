//! Wire flag byte of a tic command diff.
//!
//! One bit per field group. The in-memory [`TicDiff`](crate::diff::TicDiff)
//! never stores these bits; they are derived from which groups are present.

use bitflags::bitflags;

bitflags! {
    /// Field groups present in an encoded diff (8 bits).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DiffFlags: u8 {
        const FORWARD = 0b0000_0001;
        const SIDE = 0b0000_0010;
        const TURN = 0b0000_0100;
        const BUTTONS = 0b0000_1000;
        const CONSISTANCY = 0b0001_0000;
        const CHATCHAR = 0b0010_0000;
        /// Heretic/Hexen look/fly and artifact.
        const RAVEN = 0b0100_0000;
        /// Strife secondary buttons and inventory.
        const STRIFE = 0b1000_0000;
    }
}

impl DiffFlags {
    /// Every bit of the byte names a group, so any value is valid.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Self {
        Self::from_bits_retain(byte)
    }

    #[must_use]
    pub const fn to_byte(self) -> u8 {
        self.bits()
    }
}

impl Default for DiffFlags {
    fn default() -> Self {
        Self::empty()
    }
}
