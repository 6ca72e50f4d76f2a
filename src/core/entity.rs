//! Identifiers for the things a battle tracks.
//!
//! ## ID Layout
//!
//! - `AgentId(0)` is always the player.
//! - `AgentId(1..)` are enemies, in encounter order. Ids stay stable when
//!   earlier enemies die and leave the active list.
//! - `CardUid` is allocated by the battle for every card instance, including
//!   copies created mid-battle.
//!
//! ```
//! use card_battler::core::AgentId;
//!
//! assert!(AgentId::PLAYER.is_player());
//! assert!(!AgentId::enemy(0).is_player());
//! assert_eq!(AgentId::enemy(0).raw(), 1);
//! ```

use serde::{Deserialize, Serialize};

/// Identifier of a combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgentId(pub u8);

impl AgentId {
    /// The player's id.
    pub const PLAYER: AgentId = AgentId(0);

    /// Id of the enemy at `index` in encounter order.
    #[must_use]
    pub const fn enemy(index: u8) -> Self {
        Self(index + 1)
    }

    #[must_use]
    pub const fn is_player(self) -> bool {
        self.0 == 0
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_player() {
            write!(f, "Player")
        } else {
            write!(f, "Enemy({})", self.0)
        }
    }
}

/// Identifier of a single card instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardUid(pub u32);

impl CardUid {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardUid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}
