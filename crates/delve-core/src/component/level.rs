//! Experience and level-up bookkeeping.

use serde::{Deserialize, Serialize};

/// Experience counters. The stat choice on level-up comes from the
/// external layer; the core only flags that one is pending and applies
/// the chosen increase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub current_level: u32,
    pub current_xp: u32,
    pub level_up_base: u32,
    pub level_up_factor: u32,
    /// XP awarded to the killer when this entity dies
    pub xp_given: u32,
}

impl Level {
    pub fn new(level_up_base: u32, xp_given: u32) -> Self {
        Self {
            current_level: 1,
            current_xp: 0,
            level_up_base,
            level_up_factor: 150,
            xp_given,
        }
    }

    /// XP needed to reach the next level. Non-decreasing in
    /// `current_level`.
    pub fn experience_to_next_level(&self) -> u32 {
        self.level_up_base + self.current_level * self.level_up_factor
    }

    pub fn requires_level_up(&self) -> bool {
        self.level_up_base > 0 && self.current_xp >= self.experience_to_next_level()
    }

    pub fn add_xp(&mut self, xp: u32) {
        self.current_xp += xp;
    }

    /// Consume one level's worth of XP and advance. Call only when
    /// [`Self::requires_level_up`] is true.
    pub fn increase_level(&mut self) {
        self.current_xp -= self.experience_to_next_level();
        self.current_level += 1;
    }
}
