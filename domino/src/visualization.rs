use crate::Tile;

/// Width of one rendered tile, e.g. `[6|3]`.
pub const TILE_WIDTH: usize = 5;

/// Renders the line of tiles on the table inside a box, wrapping after
/// `tiles_per_row` tiles.
pub fn visualize_table(tiles: &[Tile], tiles_per_row: usize) -> String {
    let tiles_per_row = tiles_per_row.max(1);
    let inner_width = TILE_WIDTH * tiles_per_row.min(tiles.len().max(1));

    let mut result = String::from("╭");
    result += &"─".repeat(inner_width);
    result += "╮\n";
    if tiles.is_empty() {
        result += &format!("│{:^width$}│\n", "", width = inner_width);
    }
    for row in tiles.chunks(tiles_per_row) {
        result += "│";
        for tile in row {
            result += &tile.to_string();
        }
        // Pad the last row
        result += &" ".repeat(inner_width - TILE_WIDTH * row.len());
        result += "│\n";
    }
    result += "╰";
    result += &"─".repeat(inner_width);
    result += "╯";
    result
}

/// E.g. "6 or 3", or "any" before the first tile is placed.
pub fn visualize_playable_numbers(numbers: &[u8]) -> String {
    if numbers.is_empty() {
        return String::from("any");
    }
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(" or ")
}
