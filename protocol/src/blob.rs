//! Fixed-length byte blobs: file digests and PRNG seeds.
//!
//! Blobs carry no length prefix; each element is one `u8` on the wire.

use ticnet_common::{PRNG_SEED_LEN, SHA1_DIGEST_LEN};

use crate::error::Result;
use crate::packet::{PacketReader, PacketWriter};

/// SHA-1 digest of a WAD or dehacked file.
pub type Sha1Digest = [u8; SHA1_DIGEST_LEN];

/// Seed shared by all peers for the game's random number generator.
pub type PrngSeed = [u8; PRNG_SEED_LEN];

pub fn write_blob(writer: &mut PacketWriter, blob: &[u8]) {
    for &byte in blob {
        writer.write_u8(byte);
    }
}

pub fn read_blob<const N: usize>(reader: &mut PacketReader<'_>) -> Result<[u8; N]> {
    let mut blob = [0u8; N];
    for byte in &mut blob {
        *byte = reader.read_u8()?;
    }
    Ok(blob)
}

pub fn write_sha1sum(writer: &mut PacketWriter, digest: &Sha1Digest) {
    write_blob(writer, digest);
}

pub fn read_sha1sum(reader: &mut PacketReader<'_>) -> Result<Sha1Digest> {
    read_blob(reader)
}

pub fn write_prng_seed(writer: &mut PacketWriter, seed: &PrngSeed) {
    write_blob(writer, seed);
}

pub fn read_prng_seed(reader: &mut PacketReader<'_>) -> Result<PrngSeed> {
    read_blob(reader)
}
