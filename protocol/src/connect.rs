//! Handshake record sent by a client when it asks to join.

use serde::{Deserialize, Serialize};
use ticnet_common::{GameMission, GameMode};

use crate::blob::{Sha1Digest, read_sha1sum, write_sha1sum};
use crate::diff::TurnPrecision;
use crate::error::Result;
use crate::packet::{PacketReader, PacketWriter};

/// What a joining client is running, checked by the server before it is
/// admitted.
///
/// Flag bytes are kept as received; any nonzero value means set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectData {
    pub game_mode: u8,
    pub game_mission: u8,
    pub lowres_turn: u8,
    /// Spectator that receives tics but sends none.
    pub drone: u8,
    pub max_players: u8,
    pub is_freedoom: u8,
    pub wad_sha1sum: Sha1Digest,
    pub deh_sha1sum: Sha1Digest,
    pub player_class: u8,
}

impl ConnectData {
    #[must_use]
    pub fn game_mode(&self) -> Option<GameMode> {
        GameMode::from_id(self.game_mode)
    }

    #[must_use]
    pub fn game_mission(&self) -> Option<GameMission> {
        GameMission::from_id(self.game_mission)
    }

    #[must_use]
    pub const fn turn_precision(&self) -> TurnPrecision {
        TurnPrecision::from_lowres(self.lowres_turn != 0)
    }

    #[must_use]
    pub const fn is_drone(&self) -> bool {
        self.drone != 0
    }

    #[must_use]
    pub const fn is_freedoom(&self) -> bool {
        self.is_freedoom != 0
    }

    pub fn write_to(&self, writer: &mut PacketWriter) {
        writer.write_u8(self.game_mode);
        writer.write_u8(self.game_mission);
        writer.write_u8(self.lowres_turn);
        writer.write_u8(self.drone);
        writer.write_u8(self.max_players);
        writer.write_u8(self.is_freedoom);
        write_sha1sum(writer, &self.wad_sha1sum);
        write_sha1sum(writer, &self.deh_sha1sum);
        writer.write_u8(self.player_class);
    }

    pub fn read_from(reader: &mut PacketReader<'_>) -> Result<Self> {
        Ok(Self {
            game_mode: reader.read_u8()?,
            game_mission: reader.read_u8()?,
            lowres_turn: reader.read_u8()?,
            drone: reader.read_u8()?,
            max_players: reader.read_u8()?,
            is_freedoom: reader.read_u8()?,
            wad_sha1sum: read_sha1sum(reader)?,
            deh_sha1sum: read_sha1sum(reader)?,
            player_class: reader.read_u8()?,
        })
    }
}
