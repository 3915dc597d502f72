//! Hit points and melee stats.

use serde::{Deserialize, Serialize};

/// Combat stats. `base_power` and `base_defense` exclude equipment
/// bonuses; use the entity-level accessors for effective values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fighter {
    pub max_hp: i32,
    pub hp: i32,
    pub base_defense: i32,
    pub base_power: i32,
}

impl Fighter {
    pub fn new(hp: i32, defense: i32, power: i32) -> Self {
        Self {
            max_hp: hp,
            hp,
            base_defense: defense,
            base_power: power,
        }
    }

    /// Restore up to `amount` hit points, clamped at `max_hp`.
    /// Returns the amount actually recovered.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let new_hp = (self.hp + amount).min(self.max_hp);
        let recovered = new_hp - self.hp;
        self.hp = new_hp;
        recovered
    }

    /// Apply damage, clamped at zero. Death handling (corpse
    /// conversion, messages) is the caller's job.
    pub fn take_damage(&mut self, amount: i32) {
        self.hp = (self.hp - amount).max(0);
    }

    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }
}
