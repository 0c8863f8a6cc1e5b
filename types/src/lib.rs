mod address;
mod codec;
mod currency;
pub mod entities;
pub mod events;

pub use address::Address;
pub use codec::{read_string, string_encode_size, write_string};
pub use currency::Currency;
pub use entities::{
    Cave, Game, GameDailyData, Key, Player, PlayerDailyData, PlayerRound, Round, RoundStatus,
    Value,
};
pub use events::{
    Event, STATUS_CANCELLED, STATUS_DRAWING, STATUS_DRAWN, STATUS_OPEN, STATUS_REVEALED,
};

/// Seconds in a UTC day; daily aggregates are bucketed by
/// `timestamp / SECONDS_PER_DAY * SECONDS_PER_DAY`.
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Fee rates are expressed in basis points out of this divisor.
pub const BASIS_POINT_DIVISOR: u128 = 10_000;

/// Upper bound on entrants a round can decode; the cave registry rejects
/// party sizes above it so a filled round always round-trips.
pub const MAX_ROUND_ENTRANTS: usize = 256;

/// Upper bound on a resolved display name.
pub const MAX_NAME_LENGTH: usize = 256;

/// Truncate a timestamp to the start of its UTC day.
pub fn day_bucket(timestamp: u64) -> u64 {
    timestamp / SECONDS_PER_DAY * SECONDS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_bucket() {
        assert_eq!(day_bucket(0), 0);
        assert_eq!(day_bucket(86_399), 0);
        assert_eq!(day_bucket(86_400), 86_400);
        assert_eq!(day_bucket(1_700_000_000), 1_699_920_000);
    }
}
