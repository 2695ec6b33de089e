use super::board::Board;
use super::types::{Mark, WinningLine};

pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Returns the first completed line in `WINNING_LINES` order.
pub fn check_win_with_line(board: &Board) -> Option<WinningLine> {
    WINNING_LINES.iter().find_map(|&[a, b, c]| {
        let mark = board.get(a).mark()?;
        if board.get(b).mark() == Some(mark) && board.get(c).mark() == Some(mark) {
            Some(WinningLine::new(mark, [a, b, c]))
        } else {
            None
        }
    })
}

pub fn check_win(board: &Board) -> Option<Mark> {
    check_win_with_line(board).map(|line| line.mark)
}
