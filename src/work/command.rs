//! Globally addressable play/pause/stop commands.

use uuid::Uuid;

/// Host commands routed to a work slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkCommand {
    /// Start immediately
    Play,
    /// Suspend without discarding the worker
    Pause,
    /// Discard the worker
    Stop,
}

impl WorkCommand {
    pub const PLAY_ID: Uuid = Uuid::from_u128(0x1a2e_5f3c_7b41_4d8e_9c0a_6f2d_8e41_b7c3);
    pub const PAUSE_ID: Uuid = Uuid::from_u128(0x2b3f_6a4d_8c52_4e9f_ad1b_7a3e_9f52_c8d4);
    pub const STOP_ID: Uuid = Uuid::from_u128(0x3c4a_7b5e_9d63_4fa0_be2c_8b4f_a063_d9e5);

    pub fn id(self) -> Uuid {
        match self {
            Self::Play => Self::PLAY_ID,
            Self::Pause => Self::PAUSE_ID,
            Self::Stop => Self::STOP_ID,
        }
    }

    /// Map a command id back to a command; `None` for ids we don't handle.
    pub fn from_id(id: Uuid) -> Option<Self> {
        match id {
            id if id == Self::PLAY_ID => Some(Self::Play),
            id if id == Self::PAUSE_ID => Some(Self::Pause),
            id if id == Self::STOP_ID => Some(Self::Stop),
            _ => None,
        }
    }
}
