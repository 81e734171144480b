use serde::Serialize;

/// Number of columns in a row of the form.
const GRID_COLUMNS: u8 = 12;

const SIDE_SPAN: u8 = 2;

/// Column spans of the parts of the search form.
///
/// A part that is not rendered has no span at all.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnWidths {
    pub query_span: u8,
    pub suggestion_span: Option<u8>,
    pub target_span: Option<u8>,
}

/// Distributes the grid between the target selector, the query input and the
/// suggestion buttons.
///
/// The query input takes over the columns of the parts that are not shown.
pub fn widths(has_target: bool, show_suggestions: bool) -> ColumnWidths {
    let suggestion_span = show_suggestions.then_some(SIDE_SPAN);
    let target_span = has_target.then_some(SIDE_SPAN);
    ColumnWidths {
        query_span: GRID_COLUMNS - suggestion_span.unwrap_or(0) - target_span.unwrap_or(0),
        suggestion_span,
        target_span,
    }
}
