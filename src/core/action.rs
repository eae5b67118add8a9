//! Turn actions and the action history.
//!
//! A turn ends with exactly one of two actions:
//! - `PickUpOrPass`: draw the top pool tile, or pass if the pool is empty
//! - `FinalizeUpdateSets`: commit the staged arrangement of the table
//!
//! Clients send an `ActionRequest` with one boolean per action. It converts
//! into an `Action` only when exactly one flag is set.

use serde::{Deserialize, Serialize};

use super::ids::UserId;
use crate::error::ValidationError;

/// A turn-ending action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    PickUpOrPass,
    FinalizeUpdateSets,
}

/// Wire payload for `play`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionRequest {
    pub pick_up_tile_or_pass: bool,
    pub finalize_update_sets: bool,
}

impl ActionRequest {
    #[must_use]
    pub fn pick_up_tile_or_pass() -> Self {
        Self {
            pick_up_tile_or_pass: true,
            finalize_update_sets: false,
        }
    }

    #[must_use]
    pub fn finalize_update_sets() -> Self {
        Self {
            pick_up_tile_or_pass: false,
            finalize_update_sets: true,
        }
    }
}

impl TryFrom<ActionRequest> for Action {
    type Error = ValidationError;

    fn try_from(request: ActionRequest) -> Result<Self, Self::Error> {
        match (request.pick_up_tile_or_pass, request.finalize_update_sets) {
            (true, false) => Ok(Action::PickUpOrPass),
            (false, true) => Ok(Action::FinalizeUpdateSets),
            _ => Err(ValidationError::new("Exactly one action must be selected.")),
        }
    }
}

/// What an applied action did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    /// A tile moved from the pool to the hand.
    Drew,
    /// The pool was empty.
    Passed,
    /// The staged arrangement was committed.
    Melded { tiles_added: usize },
}

/// Record of an applied action, for replay and audit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub user_id: UserId,
    pub action: Action,
    pub outcome: ActionOutcome,
    /// Round number, starting at 1.
    pub round: u32,
    /// Turn number within the round, starting at 1.
    pub turn: u32,
}
