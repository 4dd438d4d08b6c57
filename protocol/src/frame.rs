//! Per-tic frame carrying every active player's diff.
//!
//! Layout: `i16` latency, `u8` presence bitmap, then one [`TicDiff`] per set
//! bit in ascending slot order. The bitmap is the only count on the wire, so
//! writer and reader must walk the slots in the same order.

use serde::{Deserialize, Serialize};
use ticnet_common::MAX_PLAYERS;

use crate::diff::{TicDiff, TurnPrecision};
use crate::error::Result;
use crate::packet::{PacketReader, PacketWriter};

const _: () = assert!(MAX_PLAYERS <= u8::BITS as usize, "presence bitmap is one byte");

/// Diffs for every player in one tic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullTicCmd {
    pub latency: i16,
    pub cmds: [Option<TicDiff>; MAX_PLAYERS],
}

impl FullTicCmd {
    #[must_use]
    pub fn new(latency: i16) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    /// Stores the diff for `slot`. Slots outside the session are ignored.
    pub fn set(&mut self, slot: usize, diff: TicDiff) {
        if let Some(entry) = self.cmds.get_mut(slot) {
            *entry = Some(diff);
        }
    }

    /// Presence bitmap: bit `i` is set when slot `i` carries a diff.
    #[must_use]
    pub fn player_mask(&self) -> u8 {
        self.cmds
            .iter()
            .enumerate()
            .filter(|(_, cmd)| cmd.is_some())
            .fold(0u8, |mask, (slot, _)| mask | (1 << slot))
    }

    /// Active slots and their diffs in wire order.
    pub fn active_slots(&self) -> impl Iterator<Item = (usize, &TicDiff)> + '_ {
        self.cmds
            .iter()
            .enumerate()
            .filter_map(|(slot, cmd)| cmd.as_ref().map(|diff| (slot, diff)))
    }

    pub fn write_to(&self, writer: &mut PacketWriter, precision: TurnPrecision) {
        writer.write_i16(self.latency);
        writer.write_u8(self.player_mask());

        for (_, diff) in self.active_slots() {
            diff.write_to(writer, precision);
        }
    }

    pub fn read_from(reader: &mut PacketReader<'_>, precision: TurnPrecision) -> Result<Self> {
        let latency = reader.read_i16()?;
        let mask = reader.read_u8()?;

        let mut frame = Self::new(latency);
        for (slot, entry) in frame.cmds.iter_mut().enumerate() {
            if mask & (1 << slot) == 0 {
                continue;
            }
            match TicDiff::read_from(reader, precision) {
                Ok(diff) => *entry = Some(diff),
                Err(err) => {
                    log::debug!("dropping tic frame: diff for slot {slot} unreadable: {err}");
                    return Err(err);
                }
            }
        }

        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;

    fn turn(angle: i16) -> TicDiff {
        TicDiff {
            turn: Some(angle),
            ..TicDiff::default()
        }
    }

    #[test]
    fn empty_frame_is_three_bytes() {
        let frame = FullTicCmd::new(-5);
        let mut writer = PacketWriter::new();
        frame.write_to(&mut writer, TurnPrecision::Full);
        assert_eq!(writer.as_slice(), &[0xFF, 0xFB, 0x00]);
    }

    #[test]
    fn slots_are_written_in_ascending_order() {
        let mut frame = FullTicCmd::new(12);
        frame.set(6, turn(0x0606));
        frame.set(1, turn(0x0101));
        assert_eq!(frame.player_mask(), 0b0100_0010);

        let mut writer = PacketWriter::new();
        frame.write_to(&mut writer, TurnPrecision::Full);
        assert_eq!(
            writer.as_slice(),
            &[0x00, 0x0C, 0x42, 0x04, 0x01, 0x01, 0x04, 0x06, 0x06]
        );

        let bytes = writer.finish();
        let decoded = FullTicCmd::read_from(&mut PacketReader::new(&bytes), TurnPrecision::Full);
        assert_eq!(decoded, Ok(frame));
    }

    #[test]
    fn set_ignores_out_of_range_slot() {
        let mut frame = FullTicCmd::new(0);
        frame.set(MAX_PLAYERS, turn(1));
        assert_eq!(frame.player_mask(), 0);
    }

    #[test]
    fn missing_diff_fails_whole_frame() {
        // Slots 0 and 1 announced, only slot 0 present.
        let bytes = [0x00, 0x00, 0b0000_0011, 0x00];
        let err = FullTicCmd::read_from(&mut PacketReader::new(&bytes), TurnPrecision::Full)
            .unwrap_err();
        assert!(matches!(err, CodecError::Truncated { .. }));
    }

    #[test]
    fn missing_bitmap_fails() {
        let err = FullTicCmd::read_from(&mut PacketReader::new(&[0x00, 0x01]), TurnPrecision::Full)
            .unwrap_err();
        assert!(err.is_malformed());
    }
}
