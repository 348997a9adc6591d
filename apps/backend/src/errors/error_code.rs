//! Error codes for the impostor game core.
//!
//! Add new codes here; never pass ad-hoc strings as error codes. All codes
//! are SCREAMING_SNAKE_CASE and are what a UI keys its message catalog on.

use core::fmt;

use super::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, PreconditionKind, ValidationKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Input validation
    /// Player name empty or too long
    InvalidName,
    /// Room code is not 4 characters of [A-Z0-9]
    InvalidRoomCode,
    /// Impostor count outside 1..players
    InvalidImpostorCount,
    /// General validation error
    ValidationError,

    // Not found
    /// No room with that code
    RoomNotFound,
    /// No player with that id in the room
    PlayerNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// Name already used in the room
    NameTaken,
    /// Voter already recorded a vote this phase
    AlreadyVoted,
    /// Room code generation kept colliding
    StoreExhausted,
    /// Generic conflict
    Conflict,

    // Preconditions
    /// Only the host may do this
    NotHost,
    /// Fewer than the minimum number of players
    NotEnoughPlayers,
    /// Impostor count not below player count
    TooManyImpostors,
    /// Action not valid in the current phase
    PhaseMismatch,
    /// Vote submitted without a valid target
    NoTargetSelected,
    /// Generic precondition failure
    PreconditionFailed,

    // Infrastructure
    /// Store lock not acquired in time
    StoreTimeout,
    /// Store I/O failed
    StoreIo,
    /// Persisted data could not be decoded
    DataCorruption,
    /// Internal error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidName => "INVALID_NAME",
            Self::InvalidRoomCode => "INVALID_ROOM_CODE",
            Self::InvalidImpostorCount => "INVALID_IMPOSTOR_COUNT",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::RoomNotFound => "ROOM_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::NameTaken => "NAME_TAKEN",
            Self::AlreadyVoted => "ALREADY_VOTED",
            Self::StoreExhausted => "STORE_EXHAUSTED",
            Self::Conflict => "CONFLICT",

            Self::NotHost => "NOT_HOST",
            Self::NotEnoughPlayers => "NOT_ENOUGH_PLAYERS",
            Self::TooManyImpostors => "TOO_MANY_IMPOSTORS",
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::NoTargetSelected => "NO_TARGET_SELECTED",
            Self::PreconditionFailed => "PRECONDITION_FAILED",

            Self::StoreTimeout => "STORE_TIMEOUT",
            Self::StoreIo => "STORE_IO",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }

    /// True for failures of the caller's action that can simply be retried
    /// after fixing input or waiting for other players.
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Internal | Self::ConfigError | Self::DataCorruption)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&DomainError> for ErrorCode {
    fn from(err: &DomainError) -> Self {
        match err {
            DomainError::Validation(kind, _) => match kind {
                ValidationKind::InvalidName => Self::InvalidName,
                ValidationKind::InvalidRoomCode => Self::InvalidRoomCode,
                ValidationKind::InvalidImpostorCount => Self::InvalidImpostorCount,
                ValidationKind::Other(_) => Self::ValidationError,
            },
            DomainError::NotFound(kind, _) => match kind {
                NotFoundKind::Room => Self::RoomNotFound,
                NotFoundKind::Player => Self::PlayerNotFound,
                NotFoundKind::Other(_) => Self::NotFound,
            },
            DomainError::Conflict(kind, _) => match kind {
                ConflictKind::NameTaken => Self::NameTaken,
                ConflictKind::AlreadyVoted => Self::AlreadyVoted,
                ConflictKind::RoomCodeExhausted => Self::StoreExhausted,
                ConflictKind::Other(_) => Self::Conflict,
            },
            DomainError::Precondition(kind, _) => match kind {
                PreconditionKind::NotHost => Self::NotHost,
                PreconditionKind::NotEnoughPlayers => Self::NotEnoughPlayers,
                PreconditionKind::TooManyImpostors => Self::TooManyImpostors,
                PreconditionKind::PhaseMismatch => Self::PhaseMismatch,
                PreconditionKind::NoTargetSelected => Self::NoTargetSelected,
                PreconditionKind::Other(_) => Self::PreconditionFailed,
            },
            DomainError::Infra(kind, _) => match kind {
                InfraErrorKind::Timeout => Self::StoreTimeout,
                InfraErrorKind::Io => Self::StoreIo,
                InfraErrorKind::DataCorruption => Self::DataCorruption,
                InfraErrorKind::Other(_) => Self::Internal,
            },
        }
    }
}
