//! Waiting-room status, sent to every client until the game launches.

use serde::{Deserialize, Serialize};

use crate::blob::{Sha1Digest, read_sha1sum, write_sha1sum};
use crate::config::CodecLimits;
use crate::error::Result;
use crate::packet::{PacketReader, PacketWriter};

/// A connected player as listed in the waiting room.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitPlayer {
    pub name: String,
    pub address: String,
}

/// Waiting-room state. `num_players` is the length of `players`. Flag bytes
/// are kept as received; any nonzero value means set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitData {
    pub num_drones: u8,
    pub ready_players: u8,
    pub max_players: u8,
    pub is_controller: u8,
    pub consoleplayer: i8,
    pub players: Vec<WaitPlayer>,
    pub wad_sha1sum: Sha1Digest,
    pub deh_sha1sum: Sha1Digest,
    pub is_freedoom: u8,
}

impl WaitData {
    #[must_use]
    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    /// True when this client may launch the game.
    #[must_use]
    pub const fn is_controller(&self) -> bool {
        self.is_controller != 0
    }

    #[must_use]
    pub const fn is_freedoom(&self) -> bool {
        self.is_freedoom != 0
    }

    pub fn write_to(&self, writer: &mut PacketWriter, limits: &CodecLimits) -> Result<()> {
        limits.check_player_count(self.num_players())?;
        for player in &self.players {
            limits.check_player_name("player name", &player.name)?;
            limits.check_player_name("player address", &player.address)?;
        }

        // Bounded by max_players above.
        writer.write_u8(self.num_players() as u8);
        writer.write_u8(self.num_drones);
        writer.write_u8(self.ready_players);
        writer.write_u8(self.max_players);
        writer.write_u8(self.is_controller);
        writer.write_i8(self.consoleplayer);

        for player in &self.players {
            writer.write_string(&player.name)?;
            writer.write_string(&player.address)?;
        }

        write_sha1sum(writer, &self.wad_sha1sum);
        write_sha1sum(writer, &self.deh_sha1sum);
        writer.write_u8(self.is_freedoom);
        Ok(())
    }

    pub fn read_from(reader: &mut PacketReader<'_>, limits: &CodecLimits) -> Result<Self> {
        let num_players = usize::from(reader.read_u8()?);
        let mut data = Self {
            num_drones: reader.read_u8()?,
            ready_players: reader.read_u8()?,
            max_players: reader.read_u8()?,
            is_controller: reader.read_u8()?,
            consoleplayer: reader.read_i8()?,
            ..Self::default()
        };

        limits.check_player_count(num_players)?;
        data.players = Vec::with_capacity(num_players);
        for _ in 0..num_players {
            let name = reader.read_string()?;
            limits.check_player_name("player name", &name)?;
            let address = reader.read_string()?;
            limits.check_player_name("player address", &address)?;
            data.players.push(WaitPlayer { name, address });
        }

        data.wad_sha1sum = read_sha1sum(reader)?;
        data.deh_sha1sum = read_sha1sum(reader)?;
        data.is_freedoom = reader.read_u8()?;
        Ok(data)
    }
}
