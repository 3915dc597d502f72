//! Color definitions for entities and message-log tags.

use serde::{Deserialize, Serialize};

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const BLACK: Rgb = Rgb(0, 0, 0);

pub const PLAYER_ATK: Rgb = Rgb(224, 224, 224);
pub const ENEMY_ATK: Rgb = Rgb(255, 192, 192);
pub const NEEDS_TARGET: Rgb = Rgb(63, 255, 255);
pub const STATUS_EFFECT_APPLIED: Rgb = Rgb(63, 255, 63);
pub const DESCEND: Rgb = Rgb(159, 63, 255);

pub const PLAYER_DIE: Rgb = Rgb(255, 48, 48);
pub const ENEMY_DIE: Rgb = Rgb(255, 160, 48);

pub const INVALID: Rgb = Rgb(255, 255, 0);
pub const IMPOSSIBLE: Rgb = Rgb(128, 128, 128);
pub const ERROR: Rgb = Rgb(255, 64, 64);

pub const WELCOME_TEXT: Rgb = Rgb(32, 160, 255);
pub const HEALTH_RECOVERED: Rgb = Rgb(0, 255, 0);

pub const CORPSE: Rgb = Rgb(191, 0, 0);
