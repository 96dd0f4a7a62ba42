use gridtrace_core::Grid;
use rand::Rng;

/// A `rows x cols` grid where each cell is a wall with probability
/// `wall_chance`.
pub(crate) fn random_grid(rng: &mut impl Rng, rows: usize, cols: usize, wall_chance: f64) -> Grid {
    let mut bits = Vec::with_capacity(rows);
    for _ in 0..rows {
        let mut row = Vec::with_capacity(cols);
        for _ in 0..cols {
            row.push(u8::from(rng.random_bool(wall_chance)));
        }
        bits.push(row);
    }
    Grid::from_bits(&bits).unwrap()
}
