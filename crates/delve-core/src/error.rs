//! Fatal-tier errors.
//!
//! User-facing, turn-preserving rejections ("no target in range",
//! "health already full") are not errors; they surface as
//! [`ActionResult::Impossible`](crate::ActionResult::Impossible)
//! messages. The variants here abort the current operation.

use thiserror::Error;

use crate::save::SaveError;

/// Unrecoverable conditions surfaced to the operator.
#[derive(Error, Debug)]
pub enum GameError {
    /// Room placement rejected every candidate; the map would be empty.
    #[error("dungeon generation failed: no room accepted in {attempts} attempts")]
    GenerationFailed { attempts: u32 },

    #[error(transparent)]
    Save(#[from] SaveError),
}
