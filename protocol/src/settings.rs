//! Game settings broadcast by the server when the game starts.

use serde::{Deserialize, Serialize};

use crate::config::CodecLimits;
use crate::diff::TurnPrecision;
use crate::error::Result;
use crate::packet::{PacketReader, PacketWriter};

/// Settings every peer must agree on before the first tic.
///
/// `num_players` is not stored separately: it is the length of
/// `player_classes`, which holds one class per player. Flag bytes are kept as
/// received so re-encoding reproduces them; any nonzero value means set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    pub ticdup: u8,
    pub extratics: u8,
    pub deathmatch: u8,
    pub nomonsters: u8,
    pub fast_monsters: u8,
    pub respawn_monsters: u8,
    pub episode: u8,
    pub map: u8,
    pub skill: i8,
    pub gameversion: u8,
    pub lowres_turn: u8,
    pub new_sync: u8,
    pub timelimit: i32,
    pub loadgame: i8,
    pub random: u8,
    pub consoleplayer: i8,
    pub drop_weapons: u8,
    pub no_player_collisions: u8,
    pub player_classes: Vec<u8>,
}

impl GameSettings {
    #[must_use]
    pub fn num_players(&self) -> usize {
        self.player_classes.len()
    }

    #[must_use]
    pub const fn turn_precision(&self) -> TurnPrecision {
        TurnPrecision::from_lowres(self.lowres_turn != 0)
    }

    #[must_use]
    pub const fn monsters_disabled(&self) -> bool {
        self.nomonsters != 0
    }

    #[must_use]
    pub const fn monsters_fast(&self) -> bool {
        self.fast_monsters != 0
    }

    #[must_use]
    pub const fn monsters_respawn(&self) -> bool {
        self.respawn_monsters != 0
    }

    #[must_use]
    pub const fn uses_new_sync(&self) -> bool {
        self.new_sync != 0
    }

    #[must_use]
    pub const fn random_items(&self) -> bool {
        self.random != 0
    }

    #[must_use]
    pub const fn drops_weapons(&self) -> bool {
        self.drop_weapons != 0
    }

    #[must_use]
    pub const fn player_collisions(&self) -> bool {
        self.no_player_collisions == 0
    }

    pub fn write_to(&self, writer: &mut PacketWriter, limits: &CodecLimits) -> Result<()> {
        limits.check_player_count(self.num_players())?;

        writer.write_u8(self.ticdup);
        writer.write_u8(self.extratics);
        writer.write_u8(self.deathmatch);
        writer.write_u8(self.nomonsters);
        writer.write_u8(self.fast_monsters);
        writer.write_u8(self.respawn_monsters);
        writer.write_u8(self.episode);
        writer.write_u8(self.map);
        writer.write_i8(self.skill);
        writer.write_u8(self.gameversion);
        writer.write_u8(self.lowres_turn);
        writer.write_u8(self.new_sync);
        writer.write_i32(self.timelimit);
        writer.write_i8(self.loadgame);
        writer.write_u8(self.random);
        // Bounded by max_players above.
        writer.write_u8(self.num_players() as u8);
        writer.write_i8(self.consoleplayer);
        writer.write_u8(self.drop_weapons);
        writer.write_u8(self.no_player_collisions);

        for &class in &self.player_classes {
            writer.write_u8(class);
        }
        Ok(())
    }

    pub fn read_from(reader: &mut PacketReader<'_>, limits: &CodecLimits) -> Result<Self> {
        let mut settings = Self {
            ticdup: reader.read_u8()?,
            extratics: reader.read_u8()?,
            deathmatch: reader.read_u8()?,
            nomonsters: reader.read_u8()?,
            fast_monsters: reader.read_u8()?,
            respawn_monsters: reader.read_u8()?,
            episode: reader.read_u8()?,
            map: reader.read_u8()?,
            skill: reader.read_i8()?,
            gameversion: reader.read_u8()?,
            lowres_turn: reader.read_u8()?,
            new_sync: reader.read_u8()?,
            timelimit: reader.read_i32()?,
            loadgame: reader.read_i8()?,
            random: reader.read_u8()?,
            ..Self::default()
        };
        let num_players = usize::from(reader.read_u8()?);
        settings.consoleplayer = reader.read_i8()?;
        settings.drop_weapons = reader.read_u8()?;
        settings.no_player_collisions = reader.read_u8()?;

        limits.check_player_count(num_players)?;
        settings.player_classes = (0..num_players)
            .map(|_| reader.read_u8())
            .collect::<Result<_>>()?;

        Ok(settings)
    }
}
