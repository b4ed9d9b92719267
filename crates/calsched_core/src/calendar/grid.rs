//! Calendar grid builder.
//!
//! # Invariants
//! - A grid always holds exactly `TOTAL_CELLS` cells: 7 weekday headers
//!   followed by 42 grid cells.
//! - Leading blanks equal the Sunday-based weekday of day 1.
//! - Cell classification priority: today > selected > has tasks > plain.

use crate::model::date::{days_in_month, DateKey};
use crate::model::validation::ValidationError;

/// Sunday-first weekday initials.
pub const WEEKDAY_HEADERS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];
pub const GRID_COLUMNS: usize = 7;
pub const GRID_CELLS: usize = 42;
pub const TOTAL_CELLS: usize = GRID_COLUMNS + GRID_CELLS;

/// Resolved visual class of a day cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayCellKind {
    Today,
    Selected,
    HasTasks,
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: DateKey,
    /// Day number as text, e.g. `"7"`.
    pub label: String,
    pub is_today: bool,
    pub is_selected: bool,
    pub has_tasks: bool,
    pub clickable: bool,
    pub kind: DayCellKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridCell {
    Header(&'static str),
    Blank,
    Day(DayCell),
}

impl GridCell {
    pub fn as_day(&self) -> Option<&DayCell> {
        match self {
            Self::Day(cell) => Some(cell),
            Self::Header(_) | Self::Blank => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank)
    }
}

/// Render-ready month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGrid {
    year: i32,
    month: u32,
    leading_blanks: usize,
    cells: Vec<GridCell>,
}

impl CalendarGrid {
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// All cells in render order.
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn headers(&self) -> &[GridCell] {
        &self.cells[..GRID_COLUMNS]
    }

    /// The 42 cells below the header row.
    pub fn body(&self) -> &[GridCell] {
        &self.cells[GRID_COLUMNS..]
    }

    pub fn leading_blanks(&self) -> usize {
        self.leading_blanks
    }

    pub fn day_cells(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter_map(GridCell::as_day)
    }

    /// Seven rows of seven cells, header row first.
    pub fn rows(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(GRID_COLUMNS)
    }
}

/// Builds the grid for `month` of `year`.
///
/// `has_tasks` is consulted once per day of the month.
///
/// # Errors
/// - `InvalidMonth` when `month` is outside `1..=12`.
/// - `InvalidYear` when `year` is outside `1..=9999`.
pub fn build_calendar_grid<F>(
    year: i32,
    month: u32,
    selected: DateKey,
    today: DateKey,
    has_tasks: F,
) -> Result<CalendarGrid, ValidationError>
where
    F: Fn(DateKey) -> bool,
{
    if !(1..=12).contains(&month) {
        return Err(ValidationError::InvalidMonth(month));
    }
    let day_count = days_in_month(year, month)?;
    let first = DateKey::new(year, month, 1)?;
    let leading_blanks = first.weekday_from_sunday() as usize;

    let mut cells = Vec::with_capacity(TOTAL_CELLS);
    cells.extend(WEEKDAY_HEADERS.into_iter().map(GridCell::Header));
    cells.extend(std::iter::repeat(GridCell::Blank).take(leading_blanks));

    for day in 1..=day_count {
        let date = DateKey::new(year, month, day)?;
        let is_today = date == today;
        let is_selected = date == selected;
        let has_tasks = has_tasks(date);
        let kind = if is_today {
            DayCellKind::Today
        } else if is_selected {
            DayCellKind::Selected
        } else if has_tasks {
            DayCellKind::HasTasks
        } else {
            DayCellKind::Plain
        };
        cells.push(GridCell::Day(DayCell {
            date,
            label: day.to_string(),
            is_today,
            is_selected,
            has_tasks,
            clickable: true,
            kind,
        }));
    }

    let used = leading_blanks + day_count as usize;
    let trailing_blanks = GRID_CELLS.saturating_sub(used);
    cells.extend(std::iter::repeat(GridCell::Blank).take(trailing_blanks));

    Ok(CalendarGrid {
        year,
        month,
        leading_blanks,
        cells,
    })
}
