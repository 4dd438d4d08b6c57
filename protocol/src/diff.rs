//! Tic command diffs.
//!
//! A sender never transmits a whole [`TicCmd`]. It sends a [`TicDiff`]
//! against the last command the receiver holds for that slot, and the
//! receiver patches the diff onto its copy.
//!
//! Transient fields (`chatchar`, `arti`, `inventory`) are events: they are
//! sent whenever nonzero and read back as zero on any tick that does not
//! carry them, no matter what the baseline held.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::flags::DiffFlags;
use crate::packet::{PacketReader, PacketWriter};

/// One player's input for one tic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicCmd {
    pub forwardmove: i8,
    pub sidemove: i8,
    pub angleturn: i16,
    pub buttons: u8,
    pub consistancy: u8,
    pub chatchar: u8,
    pub lookfly: u8,
    pub arti: u8,
    pub buttons2: u8,
    pub inventory: u16,
}

/// Angular resolution negotiated for the `angleturn` field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPrecision {
    /// Full 16-bit turn.
    #[default]
    Full,
    /// High byte only: one byte saved per tic, low 8 bits lost.
    Reduced,
}

impl TurnPrecision {
    #[must_use]
    pub const fn from_lowres(lowres_turn: bool) -> Self {
        if lowres_turn { Self::Reduced } else { Self::Full }
    }

    #[must_use]
    pub const fn is_reduced(self) -> bool {
        matches!(self, Self::Reduced)
    }

    /// The value a receiver reconstructs for `angle`.
    #[must_use]
    pub const fn quantize(self, angle: i16) -> i16 {
        match self {
            Self::Full => angle,
            Self::Reduced => (angle / 256) * 256,
        }
    }

    fn write(self, writer: &mut PacketWriter, angle: i16) {
        match self {
            Self::Full => writer.write_i16(angle),
            // i16 / 256 always fits in i8.
            Self::Reduced => writer.write_i8((angle / 256) as i8),
        }
    }

    fn read(self, reader: &mut PacketReader<'_>) -> Result<i16> {
        match self {
            Self::Full => reader.read_i16(),
            Self::Reduced => Ok(i16::from(reader.read_i8()?) * 256),
        }
    }

    const fn encoded_len(self) -> usize {
        match self {
            Self::Full => 2,
            Self::Reduced => 1,
        }
    }
}

/// Heretic/Hexen extension group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RavenInput {
    pub lookfly: u8,
    pub arti: u8,
}

/// Strife extension group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StrifeInput {
    pub buttons2: u8,
    pub inventory: u16,
}

/// A field whose zero value means "no event this tic".
struct TransientField {
    group: DiffFlags,
    is_active: fn(&TicCmd) -> bool,
    clear: fn(&mut TicCmd),
}

/// Transient fields and the group that carries each of them. A group holding
/// an active event is always sent; a transient field whose group is absent
/// is zeroed on patch.
const TRANSIENT_FIELDS: [TransientField; 3] = [
    TransientField {
        group: DiffFlags::CHATCHAR,
        is_active: |cmd| cmd.chatchar != 0,
        clear: |cmd| cmd.chatchar = 0,
    },
    TransientField {
        group: DiffFlags::RAVEN,
        is_active: |cmd| cmd.arti != 0,
        clear: |cmd| cmd.arti = 0,
    },
    TransientField {
        group: DiffFlags::STRIFE,
        is_active: |cmd| cmd.inventory != 0,
        clear: |cmd| cmd.inventory = 0,
    },
];

fn active_events(cmd: &TicCmd) -> DiffFlags {
    TRANSIENT_FIELDS
        .iter()
        .filter(|field| (field.is_active)(cmd))
        .fold(DiffFlags::empty(), |flags, field| flags | field.group)
}

/// Difference between two tic commands.
///
/// Each group is `Some(target value)` when it is sent and `None` when the
/// receiver keeps its baseline. The wire flag byte is derived from this by
/// [`TicDiff::flags`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicDiff {
    pub forward: Option<i8>,
    pub side: Option<i8>,
    pub turn: Option<i16>,
    pub buttons: Option<u8>,
    pub consistancy: Option<u8>,
    pub chat: Option<u8>,
    pub raven: Option<RavenInput>,
    pub strife: Option<StrifeInput>,
}

impl TicDiff {
    /// Computes the diff that turns `base` into `target`.
    #[must_use]
    pub fn between(base: &TicCmd, target: &TicCmd) -> Self {
        let events = active_events(target);
        let raven_changed = base.lookfly != target.lookfly || events.contains(DiffFlags::RAVEN);
        let strife_changed =
            base.buttons2 != target.buttons2 || events.contains(DiffFlags::STRIFE);

        Self {
            forward: (base.forwardmove != target.forwardmove).then_some(target.forwardmove),
            side: (base.sidemove != target.sidemove).then_some(target.sidemove),
            turn: (base.angleturn != target.angleturn).then_some(target.angleturn),
            buttons: (base.buttons != target.buttons).then_some(target.buttons),
            consistancy: (base.consistancy != target.consistancy).then_some(target.consistancy),
            chat: events
                .contains(DiffFlags::CHATCHAR)
                .then_some(target.chatchar),
            raven: raven_changed.then_some(RavenInput {
                lookfly: target.lookfly,
                arti: target.arti,
            }),
            strife: strife_changed.then_some(StrifeInput {
                buttons2: target.buttons2,
                inventory: target.inventory,
            }),
        }
    }

    /// The flag byte announcing which groups follow on the wire.
    #[must_use]
    pub fn flags(&self) -> DiffFlags {
        let mut flags = DiffFlags::empty();
        flags.set(DiffFlags::FORWARD, self.forward.is_some());
        flags.set(DiffFlags::SIDE, self.side.is_some());
        flags.set(DiffFlags::TURN, self.turn.is_some());
        flags.set(DiffFlags::BUTTONS, self.buttons.is_some());
        flags.set(DiffFlags::CONSISTANCY, self.consistancy.is_some());
        flags.set(DiffFlags::CHATCHAR, self.chat.is_some());
        flags.set(DiffFlags::RAVEN, self.raven.is_some());
        flags.set(DiffFlags::STRIFE, self.strife.is_some());
        flags
    }

    /// True when no group is sent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags().is_empty()
    }

    /// Reconstructs the target command from the receiver's baseline.
    #[must_use]
    pub fn apply(&self, base: &TicCmd) -> TicCmd {
        let mut cmd = *base;

        if let Some(forward) = self.forward {
            cmd.forwardmove = forward;
        }
        if let Some(side) = self.side {
            cmd.sidemove = side;
        }
        if let Some(turn) = self.turn {
            cmd.angleturn = turn;
        }
        if let Some(buttons) = self.buttons {
            cmd.buttons = buttons;
        }
        if let Some(consistancy) = self.consistancy {
            cmd.consistancy = consistancy;
        }
        if let Some(chatchar) = self.chat {
            cmd.chatchar = chatchar;
        }
        if let Some(raven) = self.raven {
            cmd.lookfly = raven.lookfly;
            cmd.arti = raven.arti;
        }
        if let Some(strife) = self.strife {
            cmd.buttons2 = strife.buttons2;
            cmd.inventory = strife.inventory;
        }

        let present = self.flags();
        for field in &TRANSIENT_FIELDS {
            if !present.contains(field.group) {
                (field.clear)(&mut cmd);
            }
        }

        cmd
    }

    /// Number of bytes [`TicDiff::write_to`] produces.
    #[must_use]
    pub fn encoded_len(&self, precision: TurnPrecision) -> usize {
        1 + usize::from(self.forward.is_some())
            + usize::from(self.side.is_some())
            + self.turn.map_or(0, |_| precision.encoded_len())
            + usize::from(self.buttons.is_some())
            + usize::from(self.consistancy.is_some())
            + usize::from(self.chat.is_some())
            + self.raven.map_or(0, |_| 2)
            + self.strife.map_or(0, |_| 3)
    }

    /// Writes the flag byte followed by the present groups in canonical order.
    pub fn write_to(&self, writer: &mut PacketWriter, precision: TurnPrecision) {
        writer.write_u8(self.flags().to_byte());

        if let Some(forward) = self.forward {
            writer.write_i8(forward);
        }
        if let Some(side) = self.side {
            writer.write_i8(side);
        }
        if let Some(turn) = self.turn {
            precision.write(writer, turn);
        }
        if let Some(buttons) = self.buttons {
            writer.write_u8(buttons);
        }
        if let Some(consistancy) = self.consistancy {
            writer.write_u8(consistancy);
        }
        if let Some(chatchar) = self.chat {
            writer.write_u8(chatchar);
        }
        if let Some(raven) = self.raven {
            writer.write_u8(raven.lookfly);
            writer.write_u8(raven.arti);
        }
        if let Some(strife) = self.strife {
            writer.write_u8(strife.buttons2);
            writer.write_u16(strife.inventory);
        }
    }

    /// Reads a diff written by [`TicDiff::write_to`] with the same precision.
    pub fn read_from(reader: &mut PacketReader<'_>, precision: TurnPrecision) -> Result<Self> {
        let flags = DiffFlags::from_byte(reader.read_u8()?);
        let mut diff = Self::default();

        if flags.contains(DiffFlags::FORWARD) {
            diff.forward = Some(reader.read_i8()?);
        }
        if flags.contains(DiffFlags::SIDE) {
            diff.side = Some(reader.read_i8()?);
        }
        if flags.contains(DiffFlags::TURN) {
            diff.turn = Some(precision.read(reader)?);
        }
        if flags.contains(DiffFlags::BUTTONS) {
            diff.buttons = Some(reader.read_u8()?);
        }
        if flags.contains(DiffFlags::CONSISTANCY) {
            diff.consistancy = Some(reader.read_u8()?);
        }
        if flags.contains(DiffFlags::CHATCHAR) {
            diff.chat = Some(reader.read_u8()?);
        }
        if flags.contains(DiffFlags::RAVEN) {
            diff.raven = Some(RavenInput {
                lookfly: reader.read_u8()?,
                arti: reader.read_u8()?,
            });
        }
        if flags.contains(DiffFlags::STRIFE) {
            diff.strife = Some(StrifeInput {
                buttons2: reader.read_u8()?,
                inventory: reader.read_u16()?,
            });
        }

        Ok(diff)
    }
}
