//! Discovery reply describing a server to clients browsing for games.

use serde::{Deserialize, Serialize};
use ticnet_common::{GameMission, GameMode, ServerState};

use crate::error::Result;
use crate::packet::{PacketReader, PacketWriter};
use crate::registry::{Protocol, read_protocol_list, write_protocol_list};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryData {
    pub version: String,
    pub server_state: u8,
    pub num_players: u8,
    pub max_players: u8,
    pub game_mode: u8,
    pub game_mission: u8,
    pub description: String,
    /// Protocol negotiated from the server's list. Only set when receiving;
    /// the writer always sends every registered protocol.
    pub protocol: Protocol,
}

impl QueryData {
    #[must_use]
    pub fn server_state(&self) -> Option<ServerState> {
        ServerState::from_id(self.server_state)
    }

    #[must_use]
    pub fn game_mode(&self) -> Option<GameMode> {
        GameMode::from_id(self.game_mode)
    }

    #[must_use]
    pub fn game_mission(&self) -> Option<GameMission> {
        GameMission::from_id(self.game_mission)
    }

    pub fn write_to(&self, writer: &mut PacketWriter) -> Result<()> {
        writer.write_string(&self.version)?;
        writer.write_u8(self.server_state);
        writer.write_u8(self.num_players);
        writer.write_u8(self.max_players);
        writer.write_u8(self.game_mode);
        writer.write_u8(self.game_mission);
        writer.write_string(&self.description)?;
        write_protocol_list(writer)
    }

    /// Reads a query reply. Servers that predate protocol negotiation stop
    /// after the description; their replies, like those whose list is cut
    /// short, decode with [`Protocol::Unknown`].
    pub fn read_from(reader: &mut PacketReader<'_>) -> Result<Self> {
        Ok(Self {
            version: reader.read_safe_string()?,
            server_state: reader.read_u8()?,
            num_players: reader.read_u8()?,
            max_players: reader.read_u8()?,
            game_mode: reader.read_u8()?,
            game_mission: reader.read_u8()?,
            description: reader.read_safe_string()?,
            protocol: read_protocol_list(reader),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> QueryData {
        QueryData {
            version: "ticnet 0.1.0".into(),
            server_state: ServerState::WaitingLaunch as u8,
            num_players: 2,
            max_players: 4,
            game_mode: GameMode::Commercial as u8,
            game_mission: GameMission::PackPlut as u8,
            description: "coop MAP07, no monsters".into(),
            protocol: Protocol::Unknown,
        }
    }

    fn encode_without_protocols(query: &QueryData) -> Vec<u8> {
        let mut writer = PacketWriter::new();
        writer.write_string(&query.version).unwrap();
        for value in [
            query.server_state,
            query.num_players,
            query.max_players,
            query.game_mode,
            query.game_mission,
        ] {
            writer.write_u8(value);
        }
        writer.write_string(&query.description).unwrap();
        writer.as_slice().to_vec()
    }

    #[test]
    fn round_trip_negotiates_registered_protocol() {
        let query = sample();

        let mut writer = PacketWriter::new();
        query.write_to(&mut writer).unwrap();
        let bytes = writer.finish();

        let decoded = QueryData::read_from(&mut PacketReader::new(&bytes)).unwrap();
        assert_eq!(decoded.protocol, Protocol::ChocolateDoom0);
        assert_eq!(decoded.description, query.description);
        assert_eq!(decoded.server_state(), Some(ServerState::WaitingLaunch));
        assert_eq!(decoded.game_mission(), Some(GameMission::PackPlut));
    }

    #[test]
    fn old_server_without_protocol_list_decodes() {
        let bytes = encode_without_protocols(&sample());
        let decoded = QueryData::read_from(&mut PacketReader::new(&bytes)).unwrap();
        assert_eq!(decoded, sample());
        assert_eq!(decoded.protocol, Protocol::Unknown);
    }

    #[test]
    fn truncated_protocol_name_still_decodes() {
        let mut bytes = encode_without_protocols(&sample());
        bytes.extend_from_slice(&[1, 0x00, 0x10, b'C']);
        let decoded = QueryData::read_from(&mut PacketReader::new(&bytes)).unwrap();
        assert_eq!(decoded, sample());
    }

    #[test]
    fn missing_description_fails() {
        let mut writer = PacketWriter::new();
        writer.write_string("ticnet 0.1.0").unwrap();
        for value in [0u8, 1, 4, 2, 1] {
            writer.write_u8(value);
        }
        let bytes = writer.finish();
        assert!(QueryData::read_from(&mut PacketReader::new(&bytes)).is_err());
    }

    #[test]
    fn invalid_utf8_description_still_decodes() {
        let mut writer = PacketWriter::new();
        writer.write_string("ticnet 0.1.0").unwrap();
        for value in [0u8, 1, 4, 2, 1] {
            writer.write_u8(value);
        }
        let mut bytes = writer.as_slice().to_vec();
        bytes.extend_from_slice(&[0x00, 0x04, b'c', b'o', 0xC0, b'p']);

        let decoded = QueryData::read_from(&mut PacketReader::new(&bytes)).unwrap();
        assert_eq!(decoded.description, "co\u{FFFD}p");
        assert_eq!(decoded.protocol, Protocol::Unknown);
    }

    #[test]
    fn control_characters_are_stripped() {
        let mut query = sample();
        query.version = "ticnet\r\x1b 0.1.0".into();
        let bytes = encode_without_protocols(&query);

        let decoded = QueryData::read_from(&mut PacketReader::new(&bytes)).unwrap();
        assert_eq!(decoded.version, "ticnet 0.1.0");
    }
}
