use super::board::{Board, Idx, Tile};

/// The tile value that wins the round.
pub(crate) const WIN_VALUE: Tile = 2048;

/// check_win reports whether any cell holds the winning value.
pub(crate) fn check_win(board: &Board) -> bool {
    let size = board.size();
    (0..size).any(|r| (0..size).any(|c| board.get(&Idx(r, c)) == WIN_VALUE))
}

/// check_lose reports whether the board admits no further move: every cell
/// occupied and no equal orthogonally-adjacent pair. Such a board is stable;
/// no direction can change it, so the lose state holds until a reset.
pub(crate) fn check_lose(board: &Board) -> bool {
    if !board.is_full() {
        return false;
    }
    let size = board.size();
    for r in 0..size {
        for c in 0..size - 1 {
            if board.get(&Idx(r, c)) == board.get(&Idx(r, c + 1)) {
                return false;
            }
        }
    }
    for c in 0..size {
        for r in 0..size - 1 {
            if board.get(&Idx(r, c)) == board.get(&Idx(r + 1, c)) {
                return false;
            }
        }
    }
    true
}
