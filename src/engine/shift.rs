use super::board::{Board, Idx, Tile};

/// Direction represents the direction indicated by the player.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) enum Direction {
    #[default]
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub(crate) fn all() -> [Direction; 4] {
        [
            Direction::Left,
            Direction::Right,
            Direction::Up,
            Direction::Down,
        ]
    }
}

/// MoveResult is the outcome of applying a single directional transform.
/// `board` is a candidate; the caller decides whether to commit it.
#[derive(Debug, PartialEq)]
pub(crate) struct MoveResult {
    pub(crate) board: Board,
    pub(crate) moved: bool,
    pub(crate) score_delta: u32,
}

/// apply slides and merges every lane of the board toward the given
/// direction. Each lane is handled independently: nonzero values are
/// compacted toward the leading edge preserving relative order, then equal
/// adjacent pairs collapse into a doubled tile, closest-to-leading-edge pair
/// first. A tile produced by a merge never merges again within the same
/// move. The doubled values accumulate into `score_delta`.
///
/// The input board is left untouched; `moved` is true iff any cell of the
/// candidate differs from it.
pub(crate) fn apply(board: &Board, direction: &Direction) -> MoveResult {
    let size = board.size();
    let mut candidate = board.clone();
    let mut score_delta = 0u32;

    let idxs = Indices::new(size, direction.clone()).collect::<Vec<Idx>>();
    for lane in idxs.chunks(size) {
        let mut values = lane
            .iter()
            .map(|idx| board.get(idx))
            .filter(|&value| value != 0)
            .collect::<Vec<Tile>>();

        let mut vdx = 0;
        while vdx + 1 < values.len() {
            if values[vdx] == values[vdx + 1] {
                values[vdx] *= 2;
                score_delta += values[vdx];
                values.remove(vdx + 1);
            }
            // the slot just written, merged or not, is final for this move
            vdx += 1;
        }

        let padded = values.into_iter().chain(std::iter::repeat(0));
        for (idx, value) in lane.iter().zip(padded) {
            candidate.set(idx, value);
        }
    }

    let moved = candidate != *board;
    MoveResult {
        board: candidate,
        moved,
        score_delta,
    }
}

/// Indices walks every cell of an n x n board lane by lane: rows for
/// Left/Right, columns for Up/Down. Within a lane the indices run from the
/// edge the tiles travel toward, so the first element of each chunk of n is
/// the leading edge for all four directions.
struct Indices {
    direction: Direction,
    size: usize,
    lane: usize,
    slot: usize,
}

impl Indices {
    fn new(size: usize, direction: Direction) -> Self {
        Indices {
            direction,
            size,
            lane: 0,
            slot: 0,
        }
    }
}

impl Iterator for Indices {
    type Item = Idx;

    fn next(&mut self) -> Option<Self::Item> {
        if self.lane == self.size {
            return None;
        }
        let (lane, slot) = (self.lane, self.slot);
        if slot == self.size - 1 {
            self.slot = 0;
            self.lane += 1;
        } else {
            self.slot += 1;
        }
        let far = self.size - 1;
        Some(match self.direction {
            Direction::Left => Idx(lane, slot),
            Direction::Right => Idx(lane, far - slot),
            Direction::Up => Idx(slot, lane),
            Direction::Down => Idx(far - slot, lane),
        })
    }
}

#[cfg(test)]
mod test {
    use rstest::*;

    use super::*;

    fn board<R: AsRef<[Tile]>>(rows: &[R]) -> Board {
        let mut board = Board::new(rows.len());
        for (r, row) in rows.iter().enumerate() {
            for (c, &value) in row.as_ref().iter().enumerate() {
                board.set(&Idx(r, c), value);
            }
        }
        board
    }

    #[rstest]
    #[case::left(Direction::Left, [Idx(0, 0), Idx(0, 1), Idx(1, 0), Idx(1, 1)])]
    #[case::right(Direction::Right, [Idx(0, 1), Idx(0, 0), Idx(1, 1), Idx(1, 0)])]
    #[case::up(Direction::Up, [Idx(0, 0), Idx(1, 0), Idx(0, 1), Idx(1, 1)])]
    #[case::down(Direction::Down, [Idx(1, 0), Idx(0, 0), Idx(1, 1), Idx(0, 1)])]
    fn indices_lead_with_the_target_edge(#[case] direction: Direction, #[case] expected: [Idx; 4]) {
        let walked = Indices::new(2, direction).collect::<Vec<Idx>>();
        assert_eq!(walked, expected);
    }

    #[rstest]
    #[case::merge_then_pair(
        Direction::Left,
        &[&[2, 2, 4, 0], &[0; 4], &[0; 4], &[0; 4]],
        &[&[4, 4, 0, 0], &[0; 4], &[0; 4], &[0; 4]],
        4,
    )]
    #[case::pairwise_no_triple(
        Direction::Left,
        &[&[2, 2, 2, 2], &[0; 4], &[0; 4], &[0; 4]],
        &[&[4, 4, 0, 0], &[0; 4], &[0; 4], &[0; 4]],
        8,
    )]
    #[case::leading_edge_pair_wins(
        Direction::Left,
        &[&[2, 0, 2, 2], &[0; 4], &[0; 4], &[0; 4]],
        &[&[4, 2, 0, 0], &[0; 4], &[0; 4], &[0; 4]],
        4,
    )]
    #[case::merged_tile_is_final(
        Direction::Left,
        &[&[4, 2, 2, 0], &[0; 4], &[0; 4], &[0; 4]],
        &[&[4, 4, 0, 0], &[0; 4], &[0; 4], &[0; 4]],
        4,
    )]
    #[case::mirror_right(
        Direction::Right,
        &[&[2, 2, 4, 0], &[0; 4], &[0; 4], &[0; 4]],
        &[&[0, 0, 4, 4], &[0; 4], &[0; 4], &[0; 4]],
        4,
    )]
    #[case::mirror_right_pairwise(
        Direction::Right,
        &[&[2, 2, 2, 2], &[0; 4], &[0; 4], &[0; 4]],
        &[&[0, 0, 4, 4], &[0; 4], &[0; 4], &[0; 4]],
        8,
    )]
    #[case::trailing_edge_pair_wins_right(
        Direction::Right,
        &[&[2, 2, 0, 2], &[0; 4], &[0; 4], &[0; 4]],
        &[&[0, 0, 2, 4], &[0; 4], &[0; 4], &[0; 4]],
        4,
    )]
    #[case::column_up(
        Direction::Up,
        &[&[0, 0, 0, 0], &[0, 0, 0, 0], &[2, 0, 0, 0], &[2, 0, 0, 0]],
        &[&[4, 0, 0, 0], &[0, 0, 0, 0], &[0, 0, 0, 0], &[0, 0, 0, 0]],
        4,
    )]
    #[case::column_down(
        Direction::Down,
        &[&[2, 0, 0, 0], &[2, 0, 0, 0], &[0, 0, 0, 0], &[0, 0, 0, 0]],
        &[&[0, 0, 0, 0], &[0, 0, 0, 0], &[0, 0, 0, 0], &[4, 0, 0, 0]],
        4,
    )]
    #[case::independent_lanes(
        Direction::Left,
        &[&[2, 2, 0, 0], &[4, 0, 4, 0], &[2, 4, 2, 4], &[0, 0, 0, 8]],
        &[&[4, 0, 0, 0], &[8, 0, 0, 0], &[2, 4, 2, 4], &[8, 0, 0, 0]],
        12,
    )]
    fn shift(
        #[case] direction: Direction,
        #[case] initial: &[&[Tile; 4]; 4],
        #[case] expected: &[&[Tile; 4]; 4],
        #[case] score_delta: u32,
    ) {
        let initial = board(initial);
        let expected = board(expected);

        let result = apply(&initial, &direction);
        assert_eq!(result.board, expected, "shifting {:?}", direction);
        assert_eq!(result.score_delta, score_delta, "shifting {:?}", direction);
        assert!(result.moved, "shifting {:?}", direction);
    }

    #[rstest]
    #[case::packed_row(Direction::Left, &[&[2, 4, 8, 16], &[0; 4], &[0; 4], &[0; 4]])]
    #[case::already_at_edge(Direction::Left, &[&[2, 0, 0, 0], &[4, 0, 0, 0], &[8, 0, 0, 0], &[16, 0, 0, 0]])]
    #[case::already_at_bottom(Direction::Down, &[&[0; 4], &[0; 4], &[0; 4], &[2, 4, 2, 4]])]
    fn unmovable_boards_report_no_move(
        #[case] direction: Direction,
        #[case] initial: &[&[Tile; 4]; 4],
    ) {
        let initial = board(initial);
        let result = apply(&initial, &direction);
        assert!(!result.moved, "shifting {:?}", direction);
        assert_eq!(result.board, initial);
        assert_eq!(result.score_delta, 0);
    }

    #[test]
    fn slide_without_merge_scores_nothing() {
        let initial = board(&[&[0, 2, 0, 0], &[0; 4], &[0; 4], &[0; 4]]);
        let result = apply(&initial, &Direction::Left);
        assert!(result.moved);
        assert_eq!(result.score_delta, 0);
        assert_eq!(
            result.board,
            board(&[&[2, 0, 0, 0], &[0; 4], &[0; 4], &[0; 4]])
        );
    }

    #[test]
    fn input_board_is_untouched() {
        let initial = board(&[&[2, 2, 0, 0], &[0; 4], &[0; 4], &[0; 4]]);
        let copy = initial.clone();
        let _ = apply(&initial, &Direction::Left);
        assert_eq!(initial, copy);
    }

    #[test]
    fn six_by_six_lanes() {
        let initial = board(&[
            &[2, 2, 2, 2, 2, 2],
            &[0; 6],
            &[0; 6],
            &[0; 6],
            &[0; 6],
            &[4, 0, 0, 0, 0, 4],
        ]);
        let result = apply(&initial, &Direction::Left);
        assert_eq!(
            result.board,
            board(&[
                &[4, 4, 4, 0, 0, 0],
                &[0; 6],
                &[0; 6],
                &[0; 6],
                &[0; 6],
                &[8, 0, 0, 0, 0, 0],
            ])
        );
        assert_eq!(result.score_delta, 20);
    }

    #[test]
    fn merge_conserves_board_sum() {
        let initial = board(&[&[2, 2, 4, 4], &[8, 8, 0, 0], &[0; 4], &[0; 4]]);
        let result = apply(&initial, &Direction::Left);
        assert_eq!(result.board.sum(), initial.sum());
        assert_eq!(result.score_delta, 28);
    }
}
