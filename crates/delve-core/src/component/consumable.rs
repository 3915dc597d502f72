//! One-shot item effects.

use serde::{Deserialize, Serialize};

use crate::action::TargetRequest;

/// Effect invoked when an item is used. The effect resolvers live in
/// [`crate::action::items`]; this component only carries the numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Consumable {
    Healing { amount: i32 },
    Lightning { damage: i32, maximum_range: i32 },
    Confusion { turns: u32 },
    Fireball { damage: i32, radius: i32 },
}

impl Consumable {
    /// The target the external layer must supply before this item can
    /// resolve, if any. Healing and lightning self-target.
    pub fn target_request(&self) -> Option<TargetRequest> {
        match self {
            Consumable::Healing { .. } | Consumable::Lightning { .. } => None,
            Consumable::Confusion { .. } => Some(TargetRequest::Cell),
            Consumable::Fireball { radius, .. } => Some(TargetRequest::Area { radius: *radius }),
        }
    }
}
