//! Typed player commands accepted by a `GameSession`.

use crate::battle::{BattleError, FlankPosition};
use crate::board::{RegionId, Side, TroopCounts, TroopType};
use crate::turn::TurnState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Pick an owned region to move from.
    SelectOrigin(RegionId),
    /// Pick a neighbour of the selected origin; queues the action.
    SelectDestination(RegionId),
    /// Drop the current origin selection.
    Cancel,
    EndTurn,
    /// Deposit banked reinforcements into an owned region. `None` deposits
    /// everything that is left.
    Reinforce {
        region: RegionId,
        counts: Option<TroopCounts>,
    },
    DismissReinforcementNotice,
    BeginAllocation(TroopType),
    ApplyAllocation { flank: FlankPosition, count: u32 },
    CancelAllocation,
    AutoAllocate,
    CommitAllocation,
}

/// Why a command was ignored. The session is unchanged whenever one of these
/// is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("the game is over")]
    GameOver,
    #[error("command not accepted in state {0}")]
    WrongState(TurnState),
    #[error("region {0} is not on the board")]
    UnknownRegion(RegionId),
    #[error("region {region} is not held by {side}")]
    NotOwned { region: RegionId, side: Side },
    #[error("region {0} has no troops")]
    NoTroops(RegionId),
    #[error("region {0} already moved this turn")]
    AlreadyMoved(RegionId),
    #[error("{destination} is not adjacent to {origin}")]
    NotAdjacent { origin: RegionId, destination: RegionId },
    #[error("no reinforcements are waiting")]
    NoReinforcements,
    #[error("no battle is awaiting allocation")]
    NoBattle,
    #[error(transparent)]
    Battle(#[from] BattleError),
}
