//! Random tile placement.

use rand::Rng;

use super::state::{Board, CELL_COUNT};

/// Percentage of spawns that produce a 2 rather than a 4.
pub const TWO_PERCENT: u32 = 90;

impl Board {
    /// Drops a 2 (90%) or a 4 (10%) onto a random empty cell.
    ///
    /// Returns the number of empty cells before the drop. Zero means the board
    /// was full and nothing changed.
    ///
    /// A single 31-bit draw picks both the cell and the value: empty cells are
    /// walked from the highest index down, the draw is tested against the
    /// free count and decremented at each one, and the first multiple wins.
    pub fn spawn_tile<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let free = self.empty_count();
        if free == 0 {
            return 0;
        }

        let free_u32 = free as u32;
        let mut r = rng.gen::<u32>() & 0x7fff_ffff;
        for idx in (0..CELL_COUNT).rev() {
            if self.cells[idx] != 0 {
                continue;
            }
            let hit = r % free_u32 == 0;
            r = r.wrapping_sub(1);
            if hit {
                self.cells[idx] = if r % 100 < TWO_PERCENT { 2 } else { 4 };
                break;
            }
        }
        free
    }
}
