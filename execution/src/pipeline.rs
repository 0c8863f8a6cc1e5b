use crate::{
    ens::NameResolver,
    error::IntegrityError,
    layer::Layer,
    ledger::RoundLedger,
    oracle::PriceSource,
    state::{Adb, State},
};
use anyhow::{bail, Context};
use bearcave_types::{Event, Value};
use commonware_cryptography::{sha256::Digest, Sha256};
use commonware_runtime::{Clock, Metrics, Spawner, Storage};
use commonware_storage::{mmr::hasher::Standard, translator::Translator};
use tracing::error;

/// Apply one event against any entity store. The event's full fan-out of
/// mutations lands atomically: an integrity error leaves the store exactly
/// as it was.
pub async fn apply_event<S: State, P: PriceSource, L: RoundLedger, N: NameResolver>(
    state: &mut S,
    oracle: &P,
    ledger: &L,
    names: &N,
    event: &Event,
) -> Result<(), IntegrityError> {
    let mut layer = Layer::new(&*state, oracle, ledger, names);
    layer.apply(event).await?;
    let changes = layer.commit();
    state.apply(changes).await;
    Ok(())
}

/// Result of driving a slice of the event log through the durable store.
pub struct ExecutionResult {
    pub state_root: Digest,
    /// Absolute index of the next unapplied event.
    pub next: u64,
    /// Events newly applied by this call (replayed prefixes are skipped).
    pub applied: u64,
}

/// Apply a contiguous slice of the event log, starting at absolute index
/// `start`, to the authenticated store.
///
/// A checkpoint stored in the database metadata records the next expected
/// index. Events below it were already applied by an earlier run and are
/// skipped, so replaying an overlapping slice after a crash or a source
/// reorganization converges on the same state and root. The checkpoint is
/// committed only after every new event in the slice lands; an integrity
/// error aborts the call and leaves the last committed state intact.
pub async fn execute_log<S, T, P, L, N>(
    state: &mut Adb<S, T>,
    oracle: &P,
    ledger: &L,
    names: &N,
    start: u64,
    events: &[Event],
) -> anyhow::Result<ExecutionResult>
where
    S: Spawner + Storage + Clock + Metrics,
    T: Translator,
    P: PriceSource,
    L: RoundLedger,
    N: NameResolver,
{
    let next = state
        .get_metadata()
        .await
        .context("failed to read state metadata")?
        .and_then(|(_, v)| match v {
            Some(Value::Checkpoint { next }) => Some(next),
            _ => None,
        })
        .unwrap_or(0);
    if start > next {
        bail!("event log gap: checkpoint expects index {next}, slice starts at {start}");
    }

    let mut applied = 0u64;
    for (offset, event) in events.iter().enumerate() {
        let index = start + offset as u64;
        if index < next {
            continue;
        }

        let mut layer = Layer::new(&*state, oracle, ledger, names);
        if let Err(e) = layer.apply(event).await {
            error!(index, error = %e, "event stream is inconsistent, halting");
            return Err(e).with_context(|| format!("integrity violation at event {index}"));
        }
        state.apply(layer.commit()).await;
        applied += 1;
    }

    let end = next.max(start + events.len() as u64);
    if applied > 0 {
        state
            .commit(Some(Value::Checkpoint { next: end }))
            .await
            .context("failed to commit state")?;
    }

    let mut hasher = Standard::<Sha256>::new();
    Ok(ExecutionResult {
        state_root: state.root(&mut hasher),
        next: end,
        applied,
    })
}
