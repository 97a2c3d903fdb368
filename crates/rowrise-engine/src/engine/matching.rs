use crate::core::{Board, Cell, PieceColor, Position, connectivity::Worklist};

/// Minimum group size for an ordinary match.
pub const MATCH_THRESHOLD: usize = 4;
/// Cells locked after this many in one lock pass receive the bonus flag.
pub const BONUS_THRESHOLD: usize = 4;

/// Result of [`evaluate_match`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum MatchOutcome {
    NoMatch,
    /// An ordinary group reached [`MATCH_THRESHOLD`] and was locked.
    Group { locked: usize, bonus: usize },
    /// A bomb touched its color and locked every cell of that color.
    Detonation { color: PieceColor, locked: usize },
}

impl MatchOutcome {
    #[must_use]
    pub fn is_match(self) -> bool {
        !self.is_no_match()
    }
}

#[derive(Debug, Default)]
struct LockTally {
    locked: usize,
    bonus: usize,
}

/// Checks whether the cell at `pos` completes a match and locks it if so.
///
/// - An ordinary piece matches when its group has at least
///   [`MATCH_THRESHOLD`] cells. The group is locked; when `frozen` is set
///   (a freeze is already pending) the lock counter starts at
///   [`BONUS_THRESHOLD`], so every cell of a cascade match is a bonus cell.
/// - A bomb detonates when its group has more than one cell. The bombs of
///   its color connected to it are locked first, with bonus counting, then
///   every other cell of the bomb's base color on the whole board.
///   Ordinary pieces are never bonus cells of a detonation.
///
/// Empty and already locked cells never match.
///
/// Entering the frozen state is left to the caller.
///
/// # Example
///
/// ```
/// use rowrise_engine::{Board, Cell, MatchOutcome, PieceColor, Position, evaluate_match};
///
/// let mut board = Board::new();
/// for column in 0..4 {
///     board.set_cell_at(Position::new(10, column), Cell::piece(PieceColor::Red));
/// }
///
/// let outcome = evaluate_match(&mut board, Position::new(10, 0), false);
/// assert_eq!(outcome, MatchOutcome::Group { locked: 4, bonus: 0 });
/// assert!(board.cell_at(Position::new(10, 3)).is_locked());
/// ```
pub fn evaluate_match(board: &mut Board, pos: Position, frozen: bool) -> MatchOutcome {
    let cell = board.cell_at(pos);
    let Some(color) = cell.base_color() else {
        return MatchOutcome::NoMatch;
    };
    if cell.is_locked() {
        return MatchOutcome::NoMatch;
    }

    let connected = board.count_connected(pos);
    if cell.is_bomb() {
        if connected <= 1 {
            return MatchOutcome::NoMatch;
        }
        let group = lock_group(board, pos, 0, |cell| cell.has_color(color) && cell.is_bomb());
        let purged = lock_color(board, color);
        return MatchOutcome::Detonation {
            color,
            locked: group.locked + purged,
        };
    }

    if connected < MATCH_THRESHOLD {
        return MatchOutcome::NoMatch;
    }
    let counted_before = if frozen { BONUS_THRESHOLD } else { 0 };
    let LockTally { locked, bonus } =
        lock_group(board, pos, counted_before, |cell| cell.has_color(color));
    MatchOutcome::Group { locked, bonus }
}

/// Locks `start` and every unlocked cell connected to it through cells
/// accepted by `joins`.
///
/// The lock flag doubles as the visited mark. Every cell locked after the
/// running counter passes [`BONUS_THRESHOLD`] also gets the bonus flag.
fn lock_group(
    board: &mut Board,
    start: Position,
    counted_before: usize,
    joins: impl Fn(Cell) -> bool,
) -> LockTally {
    let mut tally = LockTally::default();
    let mut counter = counted_before;
    let mut lock = |board: &mut Board, pos: Position| {
        counter += 1;
        let cell = board.cell_at(pos);
        let cell = if counter > BONUS_THRESHOLD {
            tally.bonus += 1;
            cell.with_bonus()
        } else {
            cell.with_lock()
        };
        board.set_cell_at(pos, cell);
        tally.locked += 1;
    };

    let mut stack = Worklist::new();
    lock(board, start);
    stack.push(start);
    while let Some(pos) = stack.pop() {
        for next in pos.neighbors() {
            let cell = board.cell_at(next);
            if joins(cell) && !cell.is_locked() {
                lock(board, next);
                stack.push(next);
            }
        }
    }
    tally
}

/// Locks every unlocked cell of `color`, returning how many were locked.
fn lock_color(board: &mut Board, color: PieceColor) -> usize {
    let mut locked = 0;
    for pos in Position::all() {
        let cell: Cell = board.cell_at(pos);
        if cell.has_color(color) && !cell.is_locked() {
            board.set_cell_at(pos, cell.with_lock());
            locked += 1;
        }
    }
    locked
}
