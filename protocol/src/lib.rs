//! Wire protocol for lockstep tic-command netplay.
//!
//! Each tic, peers exchange a [`FullTicCmd`]: one [`TicDiff`] per active
//! player, computed against the last command the receiver already holds.
//! Around the game loop sit the session records ([`ConnectData`],
//! [`GameSettings`], [`WaitData`], [`QueryData`]) and the protocol name
//! registry used to negotiate a version with servers found by query.
//!
//! [`NetCodec`] is the usual entry point; [`BaselineTable`] keeps the per-slot
//! baselines on each side.

pub mod baseline;
pub mod blob;
pub mod codec;
pub mod config;
pub mod connect;
pub mod diff;
pub mod error;
pub mod flags;
pub mod frame;
pub mod packet;
pub mod query;
pub mod registry;
pub mod settings;
pub mod wait;

pub use baseline::{BaselineTable, TicCmds};
pub use blob::{PrngSeed, Sha1Digest};
pub use codec::NetCodec;
pub use config::{CodecConfig, CodecLimits, ConfigError};
pub use connect::ConnectData;
pub use diff::{RavenInput, StrifeInput, TicCmd, TicDiff, TurnPrecision};
pub use error::{CodecError, Result};
pub use flags::DiffFlags;
pub use frame::FullTicCmd;
pub use packet::{PacketReader, PacketWriter};
pub use query::QueryData;
pub use registry::Protocol;
pub use settings::GameSettings;
pub use wait::{WaitData, WaitPlayer};

/// Returns the protocol crate version string.
pub fn protocol_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
