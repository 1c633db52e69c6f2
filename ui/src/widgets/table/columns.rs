//! Column definitions for the generic table.

use egui_extras::Column;
use institutions_business::table::HeaderCell;

pub const ROW_HEIGHT: f32 = 30.0;
pub const HEADER_HEIGHT: f32 = 24.0;

/// Used for columns whose header declares no width.
pub const DEFAULT_MIN_WIDTH: f32 = 60.0;

/// Auto-sized columns stop growing here. Longer text is truncated.
pub const MAX_AUTO_WIDTH: f32 = 320.0;

/// One column per header, at least as wide as the header asks for. The last
/// column takes the remaining space.
pub fn table_columns(headers: &[HeaderCell<'_>]) -> Vec<Column> {
    let last = headers.len().saturating_sub(1);
    headers
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            let min = cell.header.width().unwrap_or(DEFAULT_MIN_WIDTH);
            if index == last {
                Column::remainder().at_least(min)
            } else {
                Column::auto()
                    .at_least(min)
                    .at_most(MAX_AUTO_WIDTH.max(min))
                    .resizable(true)
            }
        })
        .collect()
}
