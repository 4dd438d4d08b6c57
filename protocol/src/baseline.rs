//! Per-slot baselines that tic diffs are computed against.
//!
//! Sender and receiver each keep one table. As long as both see the same
//! frames in the same order, their tables stay identical.

use ticnet_common::MAX_PLAYERS;

use crate::codec::NetCodec;
use crate::diff::{TicCmd, TicDiff, TurnPrecision};
use crate::error::Result;
use crate::frame::FullTicCmd;

/// Commands for every slot of one tic; `None` for slots not in the game.
pub type TicCmds = [Option<TicCmd>; MAX_PLAYERS];

/// Last command known to be held by the other side, per slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BaselineTable {
    cmds: [TicCmd; MAX_PLAYERS],
}

impl BaselineTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn baseline(&self, slot: usize) -> Option<&TicCmd> {
        self.cmds.get(slot)
    }

    /// Clears one slot, e.g. when a player joins or leaves.
    pub fn reset_slot(&mut self, slot: usize) {
        if let Some(cmd) = self.cmds.get_mut(slot) {
            *cmd = TicCmd::default();
        }
    }

    pub fn reset(&mut self) {
        self.cmds = [TicCmd::default(); MAX_PLAYERS];
    }

    /// Builds the frame for one tic and advances the baselines to it.
    ///
    /// Turns are quantized first so the stored baseline is exactly what the
    /// receiver will reconstruct.
    pub fn encode_tick(
        &mut self,
        latency: i16,
        cmds: &TicCmds,
        precision: TurnPrecision,
    ) -> FullTicCmd {
        let mut frame = FullTicCmd::new(latency);

        for (slot, cmd) in cmds.iter().enumerate() {
            let Some(cmd) = cmd else {
                continue;
            };
            let mut target = *cmd;
            target.angleturn = precision.quantize(target.angleturn);

            frame.set(slot, TicDiff::between(&self.cmds[slot], &target));
            self.cmds[slot] = target;
        }

        frame
    }

    /// Patches a decoded frame onto the baselines and returns the commands.
    pub fn apply(&mut self, frame: &FullTicCmd) -> TicCmds {
        let mut cmds = [None; MAX_PLAYERS];

        for (slot, diff) in frame.active_slots() {
            let cmd = diff.apply(&self.cmds[slot]);
            self.cmds[slot] = cmd;
            cmds[slot] = Some(cmd);
        }

        cmds
    }

    /// Decodes a tic datagram and applies it. On error nothing is patched.
    pub fn receive(&mut self, datagram: &[u8], codec: &NetCodec) -> Result<TicCmds> {
        let frame = codec.decode_tics(datagram)?;
        Ok(self.apply(&frame))
    }
}
