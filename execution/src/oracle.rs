//! Conversion of settlement-currency amounts into the USD accounting unit.
//!
//! Mirrors the reference pools: ETH is priced from the spot reserves of an
//! ETH/USD AMM pool (the USD side holds 6 decimals and is pushed to 18),
//! LOOKS from a time-weighted price quoted in ETH wei. All divisions
//! truncate toward zero; small conversions systematically round down and
//! the dust is accepted.

use crate::math::mul_div;
use bearcave_types::Currency;
use std::future::Future;

/// Fixed-point multiplier keeping precision through the per-ETH quote.
pub const PRECISION_MULTIPLIER: u128 = 10_000;

/// Decimals of the pool's USD-side token.
pub const USD_RESERVE_DECIMALS: u32 = 6;

const WEI_PER_TOKEN: u128 = 1_000_000_000_000_000_000;

/// Spot reserves of the ETH/USD reference pool, in each token's own
/// smallest units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolReserves {
    pub eth: u128,
    pub usd: u128,
}

#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("price query failed: {0}")]
    Query(String),
    #[error("reference pool has an empty reserve")]
    EmptyReserve,
    #[error("conversion overflow")]
    Overflow,
}

/// External price reference. Queries are synchronous from the handler's
/// point of view: a failure fails the whole event, never a partial one.
pub trait PriceSource {
    /// Current reserves of the ETH/USD reference pool.
    fn pool_reserves(&self) -> impl Future<Output = Result<PoolReserves, OracleError>>;

    /// Time-weighted price of one whole LOOKS token, in ETH wei.
    fn looks_twap(&self) -> impl Future<Output = Result<u128, OracleError>>;
}

/// Convert an amount of the given settlement currency to the USD
/// accounting unit.
pub async fn to_usd<P: PriceSource>(
    source: &P,
    amount: u128,
    currency: Currency,
) -> Result<u128, OracleError> {
    match currency {
        Currency::Eth => eth_to_usd(source, amount).await,
        Currency::Looks => looks_to_usd(source, amount).await,
    }
}

/// Scaled pool quote: USD wei per ETH wei, times `PRECISION_MULTIPLIER`.
async fn usd_per_eth<P: PriceSource>(source: &P) -> Result<u128, OracleError> {
    let reserves = source.pool_reserves().await?;
    if reserves.eth == 0 {
        return Err(OracleError::EmptyReserve);
    }

    // Push the 6-decimal USD reserve to 18 decimals so both sides of the
    // quote share the wei convention.
    let usd_reserve = reserves
        .usd
        .checked_mul(10u128.pow(18 - USD_RESERVE_DECIMALS))
        .ok_or(OracleError::Overflow)?;
    Ok(PRECISION_MULTIPLIER
        .checked_mul(usd_reserve)
        .ok_or(OracleError::Overflow)?
        / reserves.eth)
}

/// Convert ETH wei to USD units. A zero amount short-circuits without
/// touching the reference pool.
pub async fn eth_to_usd<P: PriceSource>(source: &P, amount: u128) -> Result<u128, OracleError> {
    if amount == 0 {
        return Ok(0);
    }

    let rate = usd_per_eth(source).await?;
    mul_div(amount, rate, PRECISION_MULTIPLIER).ok_or(OracleError::Overflow)
}

/// Convert LOOKS units to USD units: the raw `amount x TWAP` product goes
/// through the pool quote and the per-token divisor comes off last, so a
/// sub-token amount keeps its USD value instead of truncating to zero ETH
/// first.
pub async fn looks_to_usd<P: PriceSource>(source: &P, amount: u128) -> Result<u128, OracleError> {
    if amount == 0 {
        return Ok(0);
    }

    let price_in_wei = source.looks_twap().await?;
    let rate = usd_per_eth(source).await?;
    let scaled_rate = price_in_wei
        .checked_mul(rate)
        .ok_or(OracleError::Overflow)?;
    let divisor = PRECISION_MULTIPLIER
        .checked_mul(WEI_PER_TOKEN)
        .ok_or(OracleError::Overflow)?;

    mul_div(amount, scaled_rate, divisor).ok_or(OracleError::Overflow)
}
