//! Configured entry point turning datagrams into records and back.

use bytes::Bytes;

use crate::config::{CodecConfig, CodecLimits};
use crate::connect::ConnectData;
use crate::diff::TurnPrecision;
use crate::error::{CodecError, Result};
use crate::frame::FullTicCmd;
use crate::packet::{PacketReader, PacketWriter};
use crate::query::QueryData;
use crate::settings::GameSettings;
use crate::wait::WaitData;

/// Typical size of one tic frame for a full game.
const FRAME_CAPACITY_HINT: usize = 64;

/// Codec bound to the turn precision and limits negotiated for a session.
///
/// Holds no buffers; every call owns its own cursor, so one codec can be
/// shared freely.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NetCodec {
    turn: TurnPrecision,
    limits: CodecLimits,
}

impl NetCodec {
    #[must_use]
    pub const fn new(turn: TurnPrecision, limits: CodecLimits) -> Self {
        Self { turn, limits }
    }

    #[must_use]
    pub const fn from_config(config: &CodecConfig) -> Self {
        Self::new(config.turn_precision(), config.limits)
    }

    #[must_use]
    pub const fn turn_precision(&self) -> TurnPrecision {
        self.turn
    }

    #[must_use]
    pub const fn limits(&self) -> CodecLimits {
        self.limits
    }

    pub fn encode_tics(&self, frame: &FullTicCmd) -> Result<Bytes> {
        let mut writer = PacketWriter::with_capacity(FRAME_CAPACITY_HINT);
        frame.write_to(&mut writer, self.turn);
        self.finish(writer)
    }

    pub fn decode_tics(&self, datagram: &[u8]) -> Result<FullTicCmd> {
        let mut reader = self.reader(datagram)?;
        FullTicCmd::read_from(&mut reader, self.turn)
    }

    pub fn encode_connect(&self, data: &ConnectData) -> Result<Bytes> {
        let mut writer = PacketWriter::new();
        data.write_to(&mut writer);
        self.finish(writer)
    }

    pub fn decode_connect(&self, datagram: &[u8]) -> Result<ConnectData> {
        ConnectData::read_from(&mut self.reader(datagram)?)
    }

    pub fn encode_settings(&self, settings: &GameSettings) -> Result<Bytes> {
        let mut writer = PacketWriter::new();
        settings.write_to(&mut writer, &self.limits)?;
        self.finish(writer)
    }

    pub fn decode_settings(&self, datagram: &[u8]) -> Result<GameSettings> {
        GameSettings::read_from(&mut self.reader(datagram)?, &self.limits)
    }

    pub fn encode_wait(&self, data: &WaitData) -> Result<Bytes> {
        let mut writer = PacketWriter::new();
        data.write_to(&mut writer, &self.limits)?;
        self.finish(writer)
    }

    pub fn decode_wait(&self, datagram: &[u8]) -> Result<WaitData> {
        WaitData::read_from(&mut self.reader(datagram)?, &self.limits)
    }

    pub fn encode_query(&self, query: &QueryData) -> Result<Bytes> {
        let mut writer = PacketWriter::new();
        query.write_to(&mut writer)?;
        self.finish(writer)
    }

    pub fn decode_query(&self, datagram: &[u8]) -> Result<QueryData> {
        QueryData::read_from(&mut self.reader(datagram)?)
    }

    fn finish(&self, writer: PacketWriter) -> Result<Bytes> {
        self.limits.check_datagram(writer.len())?;
        Ok(writer.finish())
    }

    fn reader<'a>(&self, datagram: &'a [u8]) -> Result<PacketReader<'a>> {
        if datagram.is_empty() {
            return Err(CodecError::Truncated {
                needed: 1,
                remaining: 0,
            });
        }
        self.limits.check_datagram(datagram.len())?;
        Ok(PacketReader::new(datagram))
    }
}
