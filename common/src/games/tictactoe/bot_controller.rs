use crate::games::SessionRng;
use super::board::Board;

/// Picks one of the empty cells uniformly at random.
pub fn calculate_random_move(board: &Board, rng: &mut SessionRng) -> Option<usize> {
    let available_moves = board.available_moves();
    if available_moves.is_empty() {
        return None;
    }
    let idx = rng.random_range(0..available_moves.len());
    Some(available_moves[idx])
}
