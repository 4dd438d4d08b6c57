//! Shared game definitions for the tic netcode.
//!
//! This crate holds the identifiers exchanged during the handshake and
//! discovery phases together with the fixed limits of a session. Enum
//! discriminant values are the raw bytes placed on the wire, so they must
//! never be renumbered.

/// Maximum number of player slots in one session.
pub const MAX_PLAYERS: usize = 8;

/// Size of the fixed player name/address buffers, including the terminator
/// slot. Names of this length or longer are rejected.
pub const MAX_PLAYER_NAME: usize = 30;

/// Length of a SHA-1 digest in bytes.
pub const SHA1_DIGEST_LEN: usize = 20;

/// Length of a PRNG seed in bytes.
pub const PRNG_SEED_LEN: usize = 32;

/// Game release a peer is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum GameMode {
    /// Episode 1 only.
    Shareware = 0,
    /// Episodes 1-3.
    Registered = 1,
    /// Single 32-map game (Doom II and derivatives).
    Commercial = 2,
    /// Episodes 1-4.
    Retail = 3,
    /// Could not be determined from the IWAD.
    Indetermined = 4,
}

impl GameMode {
    /// Returns the mode for a raw wire identifier.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(GameMode::Shareware),
            1 => Some(GameMode::Registered),
            2 => Some(GameMode::Commercial),
            3 => Some(GameMode::Retail),
            4 => Some(GameMode::Indetermined),
            _ => None,
        }
    }

    /// Human readable name.
    pub fn name(&self) -> &'static str {
        match self {
            GameMode::Shareware => "Shareware",
            GameMode::Registered => "Registered",
            GameMode::Commercial => "Commercial",
            GameMode::Retail => "Retail",
            GameMode::Indetermined => "Unknown",
        }
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Which game (and which IWAD family) a peer is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum GameMission {
    Doom = 0,
    Doom2 = 1,
    /// Final Doom: TNT Evilution
    PackTnt = 2,
    /// Final Doom: The Plutonia Experiment
    PackPlut = 3,
    PackChex = 4,
    PackHacx = 5,
    Heretic = 6,
    Hexen = 7,
    Strife = 8,
    None = 9,
}

impl GameMission {
    /// Returns the mission for a raw wire identifier.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(GameMission::Doom),
            1 => Some(GameMission::Doom2),
            2 => Some(GameMission::PackTnt),
            3 => Some(GameMission::PackPlut),
            4 => Some(GameMission::PackChex),
            5 => Some(GameMission::PackHacx),
            6 => Some(GameMission::Heretic),
            7 => Some(GameMission::Hexen),
            8 => Some(GameMission::Strife),
            9 => Some(GameMission::None),
            _ => None,
        }
    }

    /// Human readable name.
    pub fn name(&self) -> &'static str {
        match self {
            GameMission::Doom => "Doom",
            GameMission::Doom2 => "Doom II",
            GameMission::PackTnt => "TNT: Evilution",
            GameMission::PackPlut => "The Plutonia Experiment",
            GameMission::PackChex => "Chex Quest",
            GameMission::PackHacx => "Hacx",
            GameMission::Heretic => "Heretic",
            GameMission::Hexen => "Hexen",
            GameMission::Strife => "Strife",
            GameMission::None => "None",
        }
    }

    /// Heretic and Hexen send the look/fly and artifact fields.
    pub fn uses_raven_input(&self) -> bool {
        matches!(self, GameMission::Heretic | GameMission::Hexen)
    }

    /// Strife sends the secondary buttons and inventory fields.
    pub fn uses_strife_input(&self) -> bool {
        matches!(self, GameMission::Strife)
    }
}

impl std::fmt::Display for GameMission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Lifecycle state a server advertises in discovery replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ServerState {
    /// Waiting for the controller to launch the game.
    WaitingLaunch = 0,
    /// Launched, waiting for all clients to send their settings.
    WaitingStart = 1,
    InGame = 2,
}

impl ServerState {
    /// Returns the state for a raw wire identifier.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(ServerState::WaitingLaunch),
            1 => Some(ServerState::WaitingStart),
            2 => Some(ServerState::InGame),
            _ => None,
        }
    }

    /// Whether new players can still join.
    pub fn is_joinable(&self) -> bool {
        matches!(self, ServerState::WaitingLaunch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_mask_fits_one_byte() {
        assert!(MAX_PLAYERS <= 8);
    }

    #[test]
    fn test_game_mode_from_id() {
        assert_eq!(GameMode::from_id(0), Some(GameMode::Shareware));
        assert_eq!(GameMode::from_id(2), Some(GameMode::Commercial));
        assert_eq!(GameMode::from_id(4), Some(GameMode::Indetermined));
        assert_eq!(GameMode::from_id(5), None);
        assert_eq!(GameMode::Retail as u8, 3);
    }

    #[test]
    fn test_game_mission_from_id() {
        assert_eq!(GameMission::from_id(1), Some(GameMission::Doom2));
        assert_eq!(GameMission::from_id(7), Some(GameMission::Hexen));
        assert_eq!(GameMission::from_id(9), Some(GameMission::None));
        assert_eq!(GameMission::from_id(200), None);
    }

    #[test]
    fn test_mission_input_extensions() {
        assert!(GameMission::Heretic.uses_raven_input());
        assert!(GameMission::Hexen.uses_raven_input());
        assert!(!GameMission::Doom2.uses_raven_input());
        assert!(GameMission::Strife.uses_strife_input());
        assert!(!GameMission::Hexen.uses_strife_input());
    }

    #[test]
    fn test_server_state() {
        assert_eq!(ServerState::from_id(2), Some(ServerState::InGame));
        assert_eq!(ServerState::from_id(3), None);
        assert!(ServerState::WaitingLaunch.is_joinable());
        assert!(!ServerState::InGame.is_joinable());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", GameMission::PackPlut), "The Plutonia Experiment");
        assert_eq!(format!("{}", GameMode::Registered), "Registered");
    }
}
