use super::Layer;
use crate::{
    ens::NameResolver, error::IntegrityError, ledger::RoundLedger, oracle::PriceSource,
    state::State,
};
use bearcave_types::{Address, Cave, Game, Key, Player, PlayerRound, Round, Value};
use tracing::debug;

/// Entity access for handlers. Each kind exposes the retrieval mode its
/// call sites are entitled to: get-or-create where the current event is the
/// canonical creation trigger, get-or-fail where a prior event must already
/// have created the entity and absence is a stream-integrity fault.
impl<'a, S: State, P: PriceSource, L: RoundLedger, N: NameResolver> Layer<'a, S, P, L, N> {
    pub(in crate::layer) async fn game(&self) -> Game {
        match self.get(&Key::Game).await {
            Some(Value::Game(game)) => game,
            _ => Game::new(),
        }
    }

    pub(in crate::layer) async fn cave(&self, cave_id: u64) -> Result<Cave, IntegrityError> {
        match self.get(&Key::Cave(cave_id)).await {
            Some(Value::Cave(cave)) => Ok(cave),
            _ => Err(IntegrityError::CaveNotFound(cave_id)),
        }
    }

    pub(in crate::layer) async fn round(
        &self,
        cave_id: u64,
        round_id: u64,
    ) -> Result<Round, IntegrityError> {
        match self
            .get(&Key::Round {
                cave: cave_id,
                round: round_id,
            })
            .await
        {
            Some(Value::Round(round)) => Ok(round),
            _ => Err(IntegrityError::RoundNotFound {
                cave: cave_id,
                round: round_id,
            }),
        }
    }

    /// Fetch a round, creating it OPEN and empty on first reference. A
    /// lazily created round counts toward its cave's lifetime round total,
    /// so the cave must already exist.
    pub(in crate::layer) async fn round_or_create(
        &mut self,
        cave_id: u64,
        round_id: u64,
    ) -> Result<Round, IntegrityError> {
        let key = Key::Round {
            cave: cave_id,
            round: round_id,
        };
        if let Some(Value::Round(round)) = self.get(&key).await {
            return Ok(round);
        }

        let mut cave = self.cave(cave_id).await?;
        cave.rounds_count += 1;
        self.stage(Key::Cave(cave_id), Value::Cave(cave));

        let round = Round::new();
        self.stage(key, Value::Round(round.clone()));
        Ok(round)
    }

    pub(in crate::layer) async fn player(
        &self,
        address: Address,
    ) -> Result<Player, IntegrityError> {
        match self.get(&Key::Player(address)).await {
            Some(Value::Player(player)) => Ok(player),
            _ => Err(IntegrityError::PlayerNotFound(address)),
        }
    }

    pub(in crate::layer) async fn player_or_create(&mut self, address: Address) -> Player {
        match self.get(&Key::Player(address)).await {
            Some(Value::Player(player)) => player,
            _ => {
                let player = Player::new();
                self.stage(Key::Player(address), Value::Player(player.clone()));
                player
            }
        }
    }

    /// Best-effort display-name refresh. Resolution failures keep whatever
    /// name is already recorded; they never fail the surrounding event.
    pub(in crate::layer) async fn refresh_player_name(&self, address: Address, player: &mut Player) {
        match self.names.resolve(&address).await {
            Ok(Some(name)) if !name.is_empty() => player.ens_name = Some(name),
            Ok(_) => player.ens_name = None,
            Err(e) => debug!(player = %address, error = %e, "display name resolution failed"),
        }
    }

    pub(in crate::layer) async fn player_round(
        &self,
        player: Address,
        cave_id: u64,
        round_id: u64,
    ) -> Result<PlayerRound, IntegrityError> {
        match self
            .get(&Key::PlayerRound {
                player,
                cave: cave_id,
                round: round_id,
            })
            .await
        {
            Some(Value::PlayerRound(record)) => Ok(record),
            _ => Err(IntegrityError::PlayerRoundNotFound {
                player,
                cave: cave_id,
                round: round_id,
            }),
        }
    }

    /// Record a participation exactly once. The source ledger guarantees a
    /// player cannot enter the same round twice, so a pre-existing record
    /// means the stream is inconsistent.
    pub(in crate::layer) async fn create_player_round(
        &mut self,
        player: Address,
        cave_id: u64,
        round_id: u64,
        record: PlayerRound,
    ) -> Result<(), IntegrityError> {
        let key = Key::PlayerRound {
            player,
            cave: cave_id,
            round: round_id,
        };
        if self.get(&key).await.is_some() {
            return Err(IntegrityError::DuplicateEntry {
                player,
                cave: cave_id,
                round: round_id,
            });
        }
        self.stage(key, Value::PlayerRound(record));
        Ok(())
    }
}
