//! Protocol name registry.
//!
//! Protocols are negotiated by name, never by number, so the enum can be
//! reordered freely. Every variant except [`Protocol::Unknown`] must have an
//! entry in [`PROTOCOL_NAMES`].

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, Result};
use crate::packet::{PacketReader, PacketWriter};

/// Wire protocol variants this build speaks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Protocol {
    ChocolateDoom0,
    /// No mutually understood protocol.
    #[default]
    Unknown,
}

/// Registered protocols in wire order.
pub const PROTOCOL_NAMES: &[(Protocol, &str)] =
    &[(Protocol::ChocolateDoom0, "CHOCOLATE_DOOM_0")];

impl Protocol {
    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match name_of(*self) {
            Ok(name) => f.write_str(name),
            Err(_) => f.write_str("UNKNOWN"),
        }
    }
}

/// Canonical wire name of `protocol`.
pub fn name_of(protocol: Protocol) -> Result<&'static str> {
    PROTOCOL_NAMES
        .iter()
        .find(|(candidate, _)| *candidate == protocol)
        .map(|(_, name)| *name)
        .ok_or(CodecError::UnregisteredProtocol(protocol))
}

/// Protocol for a received name; unrecognized names are [`Protocol::Unknown`].
#[must_use]
pub fn id_of(name: &str) -> Protocol {
    id_of_bytes(name.as_bytes())
}

fn id_of_bytes(name: &[u8]) -> Protocol {
    PROTOCOL_NAMES
        .iter()
        .find(|(_, candidate)| candidate.as_bytes() == name)
        .map_or(Protocol::Unknown, |(protocol, _)| *protocol)
}

/// Writes a single protocol name.
pub fn write_protocol(writer: &mut PacketWriter, protocol: Protocol) -> Result<()> {
    let name = name_of(protocol).inspect_err(|_| {
        log::error!("protocol {protocol:?} missing from PROTOCOL_NAMES; add an entry");
    })?;
    writer.write_string(name)
}

/// Reads a single protocol name. An unreadable name is [`Protocol::Unknown`].
pub fn read_protocol(reader: &mut PacketReader<'_>) -> Protocol {
    match reader.read_raw_string() {
        Ok(name) => id_of_bytes(name),
        Err(_) => Protocol::Unknown,
    }
}

/// Writes every registered protocol. Callers cannot pick a subset.
pub fn write_protocol_list(writer: &mut PacketWriter) -> Result<()> {
    // PROTOCOL_NAMES is a handful of entries; the count always fits.
    writer.write_u8(PROTOCOL_NAMES.len() as u8);
    for (protocol, _) in PROTOCOL_NAMES {
        write_protocol(writer, *protocol)?;
    }
    Ok(())
}

/// Reads a protocol list and returns the last entry this build recognizes.
///
/// The list never fails its record: peers that predate it send nothing, and a
/// list cut short anywhere reads as [`Protocol::Unknown`].
pub fn read_protocol_list(reader: &mut PacketReader<'_>) -> Protocol {
    let Ok(count) = reader.read_u8() else {
        return Protocol::Unknown;
    };

    let mut result = Protocol::Unknown;
    for _ in 0..count {
        let Ok(name) = reader.read_raw_string() else {
            log::debug!("protocol list truncated after {count} announced names");
            return Protocol::Unknown;
        };
        match id_of_bytes(name) {
            Protocol::Unknown => {
                log::trace!("skipping unknown protocol {:?}", String::from_utf8_lossy(name));
            }
            protocol => result = protocol,
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(names: &[&str]) -> Vec<u8> {
        let mut writer = PacketWriter::new();
        writer.write_u8(names.len() as u8);
        for name in names {
            writer.write_string(name).unwrap();
        }
        writer.as_slice().to_vec()
    }

    fn read(bytes: &[u8]) -> Protocol {
        read_protocol_list(&mut PacketReader::new(bytes))
    }

    #[test]
    fn every_known_protocol_is_registered() {
        for protocol in [Protocol::ChocolateDoom0] {
            let name = name_of(protocol).unwrap();
            assert_eq!(id_of(name), protocol);
        }
    }

    #[test]
    fn unknown_has_no_wire_name() {
        assert_eq!(
            name_of(Protocol::Unknown),
            Err(CodecError::UnregisteredProtocol(Protocol::Unknown))
        );
        let mut writer = PacketWriter::new();
        assert!(write_protocol(&mut writer, Protocol::Unknown).is_err());
        assert!(writer.is_empty());
    }

    #[test]
    fn unrecognized_name_is_unknown() {
        assert_eq!(id_of("DOOM_LEGACY_7"), Protocol::Unknown);
        assert_eq!(id_of(""), Protocol::Unknown);
        assert_eq!(id_of("chocolate_doom_0"), Protocol::Unknown);
    }

    #[test]
    fn list_contains_all_protocols_in_order() {
        let mut writer = PacketWriter::new();
        write_protocol_list(&mut writer).unwrap();
        assert_eq!(writer.as_slice(), list(&["CHOCOLATE_DOOM_0"]).as_slice());
    }

    #[test]
    fn recognized_entry_after_unknowns_wins() {
        let bytes = list(&["FUTURE_DOOM_9", "CHOCOLATE_DOOM_0", "FUTURE_DOOM_9"]);
        assert_eq!(read(&bytes), Protocol::ChocolateDoom0);

        let bytes = list(&["FUTURE_DOOM_9", "DOOM_LEGACY_7"]);
        assert_eq!(read(&bytes), Protocol::Unknown);
    }

    #[test]
    fn repeated_entries_keep_last_recognized() {
        let bytes = list(&[
            "CHOCOLATE_DOOM_0",
            "FUTURE_DOOM_9",
            "CHOCOLATE_DOOM_0",
            "",
        ]);
        assert_eq!(read(&bytes), Protocol::ChocolateDoom0);
    }

    #[test]
    fn missing_count_is_unknown() {
        assert_eq!(read(&[]), Protocol::Unknown);
    }

    #[test]
    fn truncated_list_is_unknown() {
        let mut bytes = list(&["CHOCOLATE_DOOM_0"]);
        bytes[0] = 2;
        assert_eq!(read(&bytes), Protocol::Unknown);

        // Count 1, name length 16, one name byte.
        assert_eq!(read(&[1, 0x00, 0x10, b'C']), Protocol::Unknown);
    }

    #[test]
    fn non_utf8_name_is_skipped() {
        let mut bytes = vec![2, 0x00, 0x02, 0xC3, 0x28];
        bytes.extend_from_slice(&list(&["CHOCOLATE_DOOM_0"])[1..]);
        assert_eq!(read(&bytes), Protocol::ChocolateDoom0);
    }

    #[test]
    fn single_protocol_round_trip() {
        let mut writer = PacketWriter::new();
        write_protocol(&mut writer, Protocol::ChocolateDoom0).unwrap();
        let bytes = writer.finish();
        assert_eq!(
            read_protocol(&mut PacketReader::new(&bytes)),
            Protocol::ChocolateDoom0
        );
        assert_eq!(read_protocol(&mut PacketReader::new(&[0x00])), Protocol::Unknown);
    }

    #[test]
    fn display_uses_wire_name() {
        assert_eq!(Protocol::ChocolateDoom0.to_string(), "CHOCOLATE_DOOM_0");
        assert_eq!(Protocol::Unknown.to_string(), "UNKNOWN");
    }
}
