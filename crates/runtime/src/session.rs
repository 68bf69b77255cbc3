//! Headless session pump.
//!
//! A [`Session`] owns a [`Game`] and answers its yields the way an
//! interactive front end would: it asks an [`InputProvider`] for player
//! commands, reports effects, offers cancels and stops at game over.

use std::collections::VecDeque;

use dungeon_core::{
    Action, Direction, EntityId, Game, GameFlags, GameResult, RestAction, RestBehavior,
    RunBehavior, WalkAction,
};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::scenario::Scenario;

/// A player command, at the granularity a keyboard front end produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Walk(Direction),
    Run(Direction),
    Rest,
    /// Rest repeatedly until healed, disturbed or cancelled.
    RestUntilHealed,
}

impl Command {
    /// Parses one roguelike key: `hjklyubn` walk, the same keys uppercased
    /// run, `.` rests one turn and `R` rests until healed.
    pub fn from_key(key: char) -> Option<Self> {
        let direction = |key: char| {
            Some(match key {
                'h' => Direction::West,
                'j' => Direction::South,
                'k' => Direction::North,
                'l' => Direction::East,
                'y' => Direction::NorthWest,
                'u' => Direction::NorthEast,
                'b' => Direction::SouthWest,
                'n' => Direction::SouthEast,
                _ => return None,
            })
        };
        match key {
            '.' => Some(Self::Rest),
            'R' => Some(Self::RestUntilHealed),
            key if key.is_ascii_uppercase() => {
                direction(key.to_ascii_lowercase()).map(Self::Run)
            }
            key => direction(key).map(Self::Walk),
        }
    }
}

/// Source of player commands.
pub trait InputProvider {
    /// Next command, or `None` when the provider has nothing more to say.
    fn next_command(&mut self, game: &Game) -> Option<Command>;

    /// Whether to interrupt the current run or rest.
    fn should_cancel(&mut self, _game: &Game) -> bool {
        false
    }
}

/// Replays a fixed list of commands.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    commands: VecDeque<Command>,
    /// Cancel at the n-th check-for-cancel yield (1-based), once.
    cancel_at: Option<u32>,
    cancel_checks: u32,
}

impl ScriptedInput {
    pub fn new(commands: impl IntoIterator<Item = Command>) -> Self {
        Self {
            commands: commands.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Parses a key string; whitespace is ignored.
    pub fn from_keys(keys: &str) -> Result<Self> {
        let commands = keys
            .chars()
            .filter(|key| !key.is_whitespace())
            .map(|key| Command::from_key(key).ok_or(RuntimeError::UnknownCommand(key)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(commands))
    }

    pub fn cancel_at(mut self, check: u32) -> Self {
        self.cancel_at = Some(check);
        self
    }

    pub fn remaining(&self) -> usize {
        self.commands.len()
    }
}

impl InputProvider for ScriptedInput {
    fn next_command(&mut self, _game: &Game) -> Option<Command> {
        self.commands.pop_front()
    }

    fn should_cancel(&mut self, _game: &Game) -> bool {
        self.cancel_checks += 1;
        if self.cancel_at == Some(self.cancel_checks) {
            self.cancel_at = None;
            return true;
        }
        false
    }
}

/// Why a session stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    GameOver,
    InputExhausted,
    TurnLimit,
}

/// Counters collected while pumping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub commands: u32,
    pub pauses: u32,
    pub effects: u32,
    pub cancels: u32,
    pub tiles_explored: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    pub outcome: Outcome,
    pub turn: u64,
    pub stats: SessionStats,
}

pub struct Session<P> {
    game: Game,
    input: P,
    turn_limit: u64,
    stats: SessionStats,
}

impl<P: InputProvider> Session<P> {
    pub fn new(scenario: &Scenario, config: &RuntimeConfig, input: P) -> Result<Self> {
        let world = scenario.build(&config.sim)?;
        let game = Game::new(world, config.sim.clone())?;
        Ok(Self {
            game,
            input,
            turn_limit: config.turn_limit,
            stats: SessionStats::default(),
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn input(&self) -> &P {
        &self.input
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Pumps the game until it ends, the input runs dry or the turn limit is
    /// reached.
    pub fn run(&mut self) -> Result<SessionSummary> {
        let outcome = loop {
            if self.game.world().turn() >= self.turn_limit {
                break Outcome::TurnLimit;
            }

            let result = self.game.process()?;

            if result.is_game_over() {
                break Outcome::GameOver;
            }
            if let Some(outcome) = self.handle(result)? {
                break outcome;
            }
        };

        self.stats.tiles_explored = self.explored_tiles();
        let summary = SessionSummary {
            outcome,
            turn: self.game.world().turn(),
            stats: self.stats.clone(),
        };
        tracing::info!(
            outcome = ?summary.outcome,
            turn = summary.turn,
            commands = summary.stats.commands,
            effects = summary.stats.effects,
            "session finished"
        );
        Ok(summary)
    }

    fn handle(&mut self, result: GameResult) -> Result<Option<Outcome>> {
        if result.flags.contains(GameFlags::NEEDS_PAUSE) {
            self.stats.pauses += 1;
            for effect in self.game.effects().iter() {
                let name: &str = effect.as_ref();
                tracing::info!(effect = name, detail = ?effect, "effect");
                self.stats.effects += 1;
            }
        }

        if result.flags.contains(GameFlags::CHECK_FOR_CANCEL)
            && self.input.should_cancel(&self.game)
            && self.game.cancel_eligible_actor()
        {
            tracing::debug!(actor = ?result.actor, "cancelled");
            self.stats.cancels += 1;
        }

        if result.needs_input() {
            let Some(command) = self.input.next_command(&self.game) else {
                return Ok(Some(Outcome::InputExhausted));
            };
            self.apply(command)?;
        }
        Ok(None)
    }

    fn apply(&mut self, command: Command) -> Result<()> {
        tracing::debug!(?command, turn = self.game.world().turn(), "command");
        self.stats.commands += 1;
        let player = EntityId::PLAYER;
        match command {
            Command::Walk(direction) => {
                let action: Box<dyn Action> = Box::new(WalkAction::new(player, direction));
                self.game.supply_player_action(action)?;
            }
            Command::Rest => {
                self.game
                    .supply_player_action(Box::new(RestAction::new(player)))?;
            }
            Command::Run(direction) => {
                self.game
                    .set_player_behavior(Box::new(RunBehavior::new(direction)))?;
            }
            Command::RestUntilHealed => {
                self.game
                    .set_player_behavior(Box::new(RestBehavior::new(REST_TURNS)))?;
            }
        }
        Ok(())
    }

    fn explored_tiles(&self) -> usize {
        let grid = self.game.world().grid();
        grid.dimensions()
            .bounds()
            .positions()
            .filter(|&position| grid.get(position).is_some_and(|tile| tile.is_explored()))
            .count()
    }
}

/// Upper bound on a single rest-until-healed command.
const REST_TURNS: u32 = 100;
