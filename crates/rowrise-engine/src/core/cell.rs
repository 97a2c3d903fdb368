use std::fmt;

/// Playable piece colors.
///
/// The discriminants match the color numbers used by renderers (`1..=5`);
/// `0` is reserved for the empty cell and never appears here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceColor {
    Red = 1,
    Green = 2,
    Blue = 3,
    Yellow = 4,
    Purple = 5,
}

impl PieceColor {
    pub const LEN: usize = 5;
    pub const ALL: [Self; Self::LEN] = [
        Self::Red,
        Self::Green,
        Self::Blue,
        Self::Yellow,
        Self::Purple,
    ];

    /// Returns the color number (`1..=5`).
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Converts a color number back into a color.
    ///
    /// Returns `None` for `0` (empty) and for anything above `5`.
    #[must_use]
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|color| color.index() == index)
    }
}

/// One of the two transient traversal marks.
///
/// A cell carries at most one of them at a time, and neither survives a
/// connectivity query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitTag {
    First,
    Second,
}

/// Pending-removal state of a matched cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum LockState {
    /// Part of a match, scored at the base rate.
    Matched,
    /// Part of a large match, scored at the base rate plus the bonus.
    Combo,
}

/// State of a single grid position.
///
/// An empty cell never carries any flag: every `with_*` builder is a no-op
/// on [`Cell::EMPTY`], so the invariant holds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    color: Option<PieceColor>,
    bomb: bool,
    visited: Option<VisitTag>,
    locked: bool,
    bonus: bool,
}

impl Cell {
    pub const EMPTY: Self = Self {
        color: None,
        bomb: false,
        visited: None,
        locked: false,
        bonus: false,
    };

    /// Creates an ordinary piece.
    #[must_use]
    pub const fn piece(color: PieceColor) -> Self {
        Self {
            color: Some(color),
            ..Self::EMPTY
        }
    }

    /// Creates a bomb piece.
    #[must_use]
    pub const fn bomb(color: PieceColor) -> Self {
        Self {
            color: Some(color),
            bomb: true,
            ..Self::EMPTY
        }
    }

    /// Creates a cell from a color number, `0` meaning empty.
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than 5.
    #[must_use]
    pub fn from_color_index(index: u8) -> Self {
        if index == 0 {
            return Self::EMPTY;
        }
        let color = PieceColor::from_index(index)
            .unwrap_or_else(|| panic!("color number {index} is not a piece color"));
        Self::piece(color)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.color.is_none()
    }

    #[must_use]
    pub const fn is_bomb(self) -> bool {
        self.bomb
    }

    #[must_use]
    pub const fn is_locked(self) -> bool {
        self.locked
    }

    #[must_use]
    pub const fn is_bonus(self) -> bool {
        self.bonus
    }

    /// Returns the color with every flag stripped, or `None` for an empty cell.
    #[must_use]
    pub const fn base_color(self) -> Option<PieceColor> {
        self.color
    }

    #[must_use]
    pub fn has_color(self, color: PieceColor) -> bool {
        self.color == Some(color)
    }

    #[must_use]
    pub const fn lock_state(self) -> Option<LockState> {
        match (self.locked, self.bonus) {
            (false, _) => None,
            (true, false) => Some(LockState::Matched),
            (true, true) => Some(LockState::Combo),
        }
    }

    #[must_use]
    pub const fn with_bomb_flag(self) -> Self {
        Self {
            bomb: self.color.is_some(),
            ..self
        }
    }

    #[must_use]
    pub const fn with_lock(self) -> Self {
        Self {
            locked: self.color.is_some(),
            ..self
        }
    }

    /// Marks the cell as a bonus cell. A bonus cell is always locked.
    #[must_use]
    pub const fn with_bonus(self) -> Self {
        let colored = self.color.is_some();
        Self {
            locked: colored,
            bonus: colored,
            ..self
        }
    }

    /// Sets `tag`, replacing the other tag if it was set.
    #[must_use]
    pub const fn with_visited(self, tag: VisitTag) -> Self {
        if self.color.is_none() {
            return self;
        }
        Self {
            visited: Some(tag),
            ..self
        }
    }

    /// Clears `tag` if it is set; the other tag is left untouched.
    #[must_use]
    pub fn cleared_visited(self, tag: VisitTag) -> Self {
        if self.visited == Some(tag) {
            Self {
                visited: None,
                ..self
            }
        } else {
            self
        }
    }

    #[must_use]
    pub fn has_visited(self, tag: VisitTag) -> bool {
        self.visited == Some(tag)
    }

    #[must_use]
    pub const fn has_any_visit(self) -> bool {
        self.visited.is_some()
    }

    /// Single character used by the board's text form.
    ///
    /// `.` empty, `1`-`5` pieces, `a`-`e` bombs, `x` matched, `X` combo.
    #[must_use]
    pub fn symbol(self) -> char {
        let Some(color) = self.color else {
            return '.';
        };
        match (self.lock_state(), self.bomb) {
            (Some(LockState::Matched), _) => 'x',
            (Some(LockState::Combo), _) => 'X',
            (None, false) => char::from(b'0' + color.index()),
            (None, true) => char::from(b'a' + color.index() - 1),
        }
    }

    /// Inverse of [`Self::symbol`] for unlocked cells.
    #[cfg(test)]
    pub(crate) fn from_symbol(symbol: char) -> Self {
        match symbol {
            '.' => Self::EMPTY,
            '1'..='5' => Self::from_color_index(symbol as u8 - b'0'),
            'a'..='e' => Self::from_color_index(symbol as u8 - b'a' + 1).with_bomb_flag(),
            _ => panic!("unknown cell symbol {symbol:?}"),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cell_ignores_flags() {
        let cell = Cell::EMPTY
            .with_bomb_flag()
            .with_lock()
            .with_bonus()
            .with_visited(VisitTag::First);
        assert_eq!(cell, Cell::EMPTY);
        assert!(cell.is_empty());
        assert_eq!(cell.base_color(), None);
    }

    #[test]
    fn test_flags_keep_base_color() {
        let cell = Cell::piece(PieceColor::Blue)
            .with_bomb_flag()
            .with_lock()
            .with_visited(VisitTag::Second);
        assert_eq!(cell.base_color(), Some(PieceColor::Blue));
        assert!(cell.is_bomb());
        assert!(cell.is_locked());
        assert!(cell.has_visited(VisitTag::Second));
    }

    #[test]
    fn test_visit_tags_are_exclusive() {
        let cell = Cell::piece(PieceColor::Red).with_visited(VisitTag::First);
        assert!(cell.has_visited(VisitTag::First));

        let cell = cell.with_visited(VisitTag::Second);
        assert!(!cell.has_visited(VisitTag::First));
        assert!(cell.has_visited(VisitTag::Second));

        // Clearing the tag that is not set leaves the other one alone
        let cell = cell.cleared_visited(VisitTag::First);
        assert!(cell.has_visited(VisitTag::Second));

        let cell = cell.cleared_visited(VisitTag::Second);
        assert!(!cell.has_any_visit());
        assert_eq!(cell, Cell::piece(PieceColor::Red));
    }

    #[test]
    fn test_lock_states() {
        let cell = Cell::piece(PieceColor::Green);
        assert_eq!(cell.lock_state(), None);
        assert_eq!(cell.with_lock().lock_state(), Some(LockState::Matched));
        assert_eq!(cell.with_bonus().lock_state(), Some(LockState::Combo));
        assert!(cell.with_bonus().is_locked());
    }

    #[test]
    fn test_color_index_conversion() {
        assert_eq!(Cell::from_color_index(0), Cell::EMPTY);
        for color in PieceColor::ALL {
            let cell = Cell::from_color_index(color.index());
            assert_eq!(cell.base_color(), Some(color));
            assert!(!cell.is_bomb());
        }
        assert_eq!(PieceColor::from_index(0), None);
        assert_eq!(PieceColor::from_index(6), None);
    }

    #[test]
    #[should_panic(expected = "not a piece color")]
    fn test_color_index_out_of_range() {
        let _ = Cell::from_color_index(7);
    }

    #[test]
    fn test_symbols() {
        assert_eq!(Cell::EMPTY.symbol(), '.');
        assert_eq!(Cell::piece(PieceColor::Red).symbol(), '1');
        assert_eq!(Cell::bomb(PieceColor::Purple).symbol(), 'e');
        assert_eq!(Cell::bomb(PieceColor::Red).with_lock().symbol(), 'x');
        assert_eq!(Cell::piece(PieceColor::Red).with_bonus().symbol(), 'X');
        for symbol in ['.', '1', '3', '5', 'a', 'c', 'e'] {
            assert_eq!(Cell::from_symbol(symbol).symbol(), symbol);
        }
    }
}
