use crate::{ledger::LedgerError, oracle::OracleError};
use bearcave_types::{Address, RoundStatus};

/// Fatal inconsistencies between the event stream and derived state. Any of
/// these aborts the offending event: either the source ledger emitted
/// something impossible or events were applied out of order, and silently
/// skipping would corrupt every downstream aggregate.
#[derive(Debug, thiserror::Error)]
pub enum IntegrityError {
    #[error("cave {0} was not found")]
    CaveNotFound(u64),
    #[error("cave {0} already exists")]
    CaveAlreadyExists(u64),
    #[error("cave {cave}: party size {players} is outside the supported range")]
    InvalidPartySize { cave: u64, players: u32 },
    #[error("cave {cave}: protocol fee {fee_bp}bp exceeds the basis point divisor")]
    InvalidFeeRate { cave: u64, fee_bp: u16 },
    #[error("round {round} from cave {cave} was not found")]
    RoundNotFound { cave: u64, round: u64 },
    #[error("round {round} from cave {cave} is already {status:?}")]
    TerminalRound {
        cave: u64,
        round: u64,
        status: RoundStatus,
    },
    #[error("player {0} was not found")]
    PlayerNotFound(Address),
    #[error("player {player} already entered round {round} of cave {cave}")]
    DuplicateEntry {
        player: Address,
        cave: u64,
        round: u64,
    },
    #[error("player round {player}-{cave}-{round} was not found")]
    PlayerRoundNotFound {
        player: Address,
        cave: u64,
        round: u64,
    },
    #[error("round {round} from cave {cave} revealed without a loser among {entrants} entrants")]
    NoLoser {
        cave: u64,
        round: u64,
        entrants: usize,
    },
    #[error("round {round} from cave {cave} revealed more than one loser")]
    MultipleLosers { cave: u64, round: u64 },
    #[error("amount overflow while computing {0}")]
    AmountOverflow(&'static str),
    #[error("amount underflow while unwinding entry for player {0}")]
    AmountUnderflow(Address),
    #[error(transparent)]
    Oracle(#[from] OracleError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
