use rand::RngCore;

use super::board::Board;
use super::evaluate;
use super::score::ScoreTracker;
use super::shift::{self, Direction};
use super::spawn::{self, Difficulty};
use super::timer::RoundTimer;

/// Phase of the session state machine. Won is not terminal: play continues
/// so the player can chase a higher score. Lost rejects every move until
/// the next reset.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Phase {
    Playing,
    Won,
    Lost,
}

/// MoveOutcome is what the host sees after submitting a direction. `won` is
/// raised exactly once per round, on the move that reaches the winning tile.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct MoveOutcome {
    pub(crate) moved: bool,
    pub(crate) score_delta: u32,
    pub(crate) won: bool,
    pub(crate) lost: bool,
}

/// GameSession orchestrates the move pipeline: shift, spawn, score, timer,
/// win/lose evaluation. One instance, one in-flight move at a time; every
/// call runs the whole pipeline to completion.
pub(crate) struct GameSession {
    rng: Box<dyn RngCore>,
    board: Board,
    difficulty: Difficulty,
    score: ScoreTracker,
    timer: RoundTimer,
    phase: Phase,
    move_count: u32,
    won_already: bool,
}

impl GameSession {
    pub(crate) fn new(
        rng: impl RngCore + 'static,
        size: usize,
        difficulty: Difficulty,
        round_millis: u64,
    ) -> Self {
        let mut session = Self {
            rng: Box::new(rng),
            board: Board::new(size),
            difficulty,
            score: ScoreTracker::new(),
            timer: RoundTimer::new(round_millis),
            phase: Phase::Playing,
            move_count: 0,
            won_already: false,
        };
        session.reset_game();
        session
    }

    /// Run the full move pipeline for one direction. The transform produces
    /// a candidate board which is only committed when something changed, so
    /// a rejected move leaves every part of the session exactly as it was.
    pub(crate) fn submit_move(&mut self, direction: &Direction) -> MoveOutcome {
        if self.phase == Phase::Lost {
            log::debug!("ignoring {:?}, session is lost until reset", direction);
            return MoveOutcome {
                lost: true,
                ..MoveOutcome::default()
            };
        }

        let result = shift::apply(&self.board, direction);
        if !result.moved {
            return MoveOutcome::default();
        }

        self.board = result.board;
        spawn::spawn(&mut self.rng, &mut self.board, &self.difficulty);
        self.score.add(result.score_delta);
        self.timer.reset();
        self.move_count += 1;
        log::trace!("board after {:?}:\n{}", direction, self.board);

        let won = !self.won_already && evaluate::check_win(&self.board);
        if won {
            self.won_already = true;
            self.phase = Phase::Won;
            log::info!(
                "reached {} in {} moves, score {}",
                evaluate::WIN_VALUE,
                self.move_count,
                self.score.total()
            );
        }
        let lost = evaluate::check_lose(&self.board);
        if lost {
            self.phase = Phase::Lost;
            log::info!(
                "no moves left after {} moves, final score {}",
                self.move_count,
                self.score.total()
            );
        }

        MoveOutcome {
            moved: true,
            score_delta: result.score_delta,
            won,
            lost,
        }
    }

    /// Start a fresh round: empty board, two spawned tiles, zeroed score
    /// and move counter, full round timer.
    pub(crate) fn reset_game(&mut self) {
        self.board = self.board.resize(self.board.size());
        spawn::spawn(&mut self.rng, &mut self.board, &self.difficulty);
        spawn::spawn(&mut self.rng, &mut self.board, &self.difficulty);
        self.score.reset();
        self.move_count = 0;
        self.timer.reset();
        self.phase = Phase::Playing;
        self.won_already = false;
        log::info!(
            "new round: {0}x{0} board, {1} difficulty",
            self.board.size(),
            self.difficulty
        );
    }

    /// Change the board size and start a fresh round. Sizes below 2 are
    /// ignored and the current configuration retained.
    pub(crate) fn set_board_size(&mut self, size: usize) {
        if size < 2 {
            log::warn!("ignoring invalid board size {}", size);
            return;
        }
        self.board = self.board.resize(size);
        self.reset_game();
    }

    pub(crate) fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Reconfigure the round duration. Zero is ignored and the previous
    /// duration retained.
    pub(crate) fn set_round_duration(&mut self, millis: u64) {
        if millis == 0 {
            log::warn!("ignoring zero round duration");
            return;
        }
        self.timer.set_max(millis);
    }

    /// Cooperative clock sample from the host's update loop.
    pub(crate) fn tick(&mut self, now_millis: u64) {
        self.timer.tick(now_millis);
    }

    pub(crate) fn board(&self) -> &Board {
        &self.board
    }

    pub(crate) fn score(&self) -> u32 {
        self.score.total()
    }

    pub(crate) fn on_score_change(&mut self, listener: impl FnMut(u32, u32) + 'static) {
        self.score.on_change(listener);
    }

    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn move_count(&self) -> u32 {
        self.move_count
    }

    pub(crate) fn time_remaining(&self) -> u64 {
        self.timer.remaining()
    }

    pub(crate) fn round_expired(&self) -> bool {
        self.timer.is_expired()
    }

    pub(crate) fn difficulty(&self) -> &Difficulty {
        &self.difficulty
    }

    #[cfg(test)]
    pub(crate) fn set_board(&mut self, board: Board) {
        self.board = board;
    }
}
