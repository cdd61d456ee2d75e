use std::fmt;

use rand::distributions::Distribution;
use rand::distributions::WeightedIndex;
use rand::seq::SliceRandom;
use rand::Rng;

use super::board::{Board, Idx, Tile};

const SPAWN_CHOICES: [Tile; 2] = [2, 4];

/// Difficulty controls how often a spawned tile is a 4 rather than a 2.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    /// Weights over [`SPAWN_CHOICES`]: 10% fours on Easy, 30% on Normal,
    /// 50% on Hard.
    fn spawn_weights(&self) -> [u8; 2] {
        match self {
            Difficulty::Easy => [9, 1],
            Difficulty::Normal => [7, 3],
            Difficulty::Hard => [5, 5],
        }
    }

    /// Lenient configuration parsing. Anything unrecognized falls back to
    /// Normal rather than erroring.
    pub(crate) fn from_label(label: &str) -> Difficulty {
        match label.to_lowercase().as_str() {
            "easy" | "facil" | "fácil" => Difficulty::Easy,
            "normal" => Difficulty::Normal,
            "hard" | "dificil" | "difícil" => Difficulty::Hard,
            other => {
                log::warn!("unrecognized difficulty {:?}, using normal", other);
                Difficulty::Normal
            }
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Normal => write!(f, "normal"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

/// spawn places one new tile in a uniformly random empty cell and returns
/// where it landed. A full board is a no-op, not an error.
pub(crate) fn spawn<T: Rng>(
    rng: &mut T,
    board: &mut Board,
    difficulty: &Difficulty,
) -> Option<Idx> {
    let empties = board.empty_cells();
    let idx = empties.choose(rng)?.clone();
    let weighted = WeightedIndex::new(difficulty.spawn_weights())
        .expect("spawn weights should never be empty");
    let value = SPAWN_CHOICES[weighted.sample(rng)];
    board.set(&idx, value);
    log::debug!("spawned {} at {}", value, idx);
    Some(idx)
}

#[cfg(test)]
mod test {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    #[test]
    fn spawn_fills_exactly_one_empty_cell() {
        let mut rng = rng();
        let mut board = Board::new(4);
        let idx = spawn(&mut rng, &mut board, &Difficulty::Normal).expect("board has room");
        let value = board.get(&idx);
        assert!(value == 2 || value == 4);
        assert_eq!(board.empty_cells().len(), 15);
    }

    #[test]
    fn full_board_is_a_noop() {
        let mut rng = rng();
        let mut board = Board::new(2);
        for idx in board.empty_cells() {
            board.set(&idx, 2);
        }
        let before = board.clone();
        assert_eq!(spawn(&mut rng, &mut board, &Difficulty::Normal), None);
        assert_eq!(board, before);
    }

    #[test]
    fn hard_spawns_fours_about_half_the_time() {
        let mut rng = rng();
        let trials = 10_000u32;
        let mut fours = 0u32;
        for _ in 0..trials {
            let mut board = Board::new(4);
            let idx = spawn(&mut rng, &mut board, &Difficulty::Hard).expect("board has room");
            if board.get(&idx) == 4 {
                fours += 1;
            }
        }
        let fraction = f64::from(fours) / f64::from(trials);
        assert!(
            (fraction - 0.5).abs() < 0.02,
            "observed four-fraction {}",
            fraction
        );
    }

    #[test]
    fn easy_spawns_fours_about_a_tenth_of_the_time() {
        let mut rng = rng();
        let trials = 10_000u32;
        let mut fours = 0u32;
        for _ in 0..trials {
            let mut board = Board::new(4);
            let idx = spawn(&mut rng, &mut board, &Difficulty::Easy).expect("board has room");
            if board.get(&idx) == 4 {
                fours += 1;
            }
        }
        let fraction = f64::from(fours) / f64::from(trials);
        assert!(
            (fraction - 0.1).abs() < 0.02,
            "observed four-fraction {}",
            fraction
        );
    }

    #[test]
    fn labels_parse_leniently() {
        assert_eq!(Difficulty::from_label("EASY"), Difficulty::Easy);
        assert_eq!(Difficulty::from_label("hard"), Difficulty::Hard);
        assert_eq!(Difficulty::from_label("normal"), Difficulty::Normal);
        assert_eq!(Difficulty::from_label("nightmare"), Difficulty::Normal);
        assert_eq!(Difficulty::from_label(""), Difficulty::Normal);
    }
}
