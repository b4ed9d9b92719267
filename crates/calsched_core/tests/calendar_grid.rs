use calsched_core::{
    build_calendar_grid, DateKey, DayCellKind, GridCell, MonthCursor, GRID_CELLS, TOTAL_CELLS,
};
use std::collections::HashSet;

fn date(text: &str) -> DateKey {
    DateKey::parse(text).unwrap()
}

#[test]
fn february_2024_layout_and_markers() {
    let with_tasks: HashSet<DateKey> = [date("10-02-2024")].into_iter().collect();
    let grid = build_calendar_grid(
        2024,
        2,
        date("15-02-2024"),
        date("01-02-2024"),
        |day| with_tasks.contains(&day),
    )
    .unwrap();

    assert_eq!(grid.cells().len(), TOTAL_CELLS);
    assert_eq!(grid.body().len(), GRID_CELLS);
    assert_eq!(grid.leading_blanks(), 4);
    assert!(grid.body()[..4].iter().all(GridCell::is_blank));

    let days: Vec<_> = grid.day_cells().collect();
    assert_eq!(days.len(), 29);
    assert_eq!(days[0].label, "1");
    assert_eq!(days[28].label, "29");

    assert_eq!(days[0].kind, DayCellKind::Today);
    assert_eq!(days[14].kind, DayCellKind::Selected);
    assert_eq!(days[9].kind, DayCellKind::HasTasks);
    assert_eq!(days[1].kind, DayCellKind::Plain);
    assert!(days.iter().all(|cell| cell.clickable));

    let trailing = &grid.body()[4 + 29..];
    assert_eq!(trailing.len(), 9);
    assert!(trailing.iter().all(GridCell::is_blank));
}

#[test]
fn today_wins_over_selection_and_tasks() {
    let today = date("10-02-2024");
    let grid = build_calendar_grid(2024, 2, today, today, |_| true).unwrap();

    let cell = grid
        .day_cells()
        .find(|cell| cell.date == today)
        .unwrap();
    assert_eq!(cell.kind, DayCellKind::Today);
    assert!(cell.is_today);
    assert!(cell.is_selected);
    assert!(cell.has_tasks);
}

#[test]
fn rows_walk_the_grid_week_by_week() {
    let grid =
        build_calendar_grid(2024, 2, date("15-02-2024"), date("18-10-2026"), |_| false).unwrap();

    let rows: Vec<_> = grid.rows().collect();
    assert_eq!(rows.len(), 7);
    assert!(rows[0].iter().all(|cell| matches!(cell, GridCell::Header(_))));
    assert!(rows.iter().all(|row| row.len() == 7));
}

#[test]
fn cursor_drives_year_rollover() {
    let december = MonthCursor::new(2024, 12).unwrap();
    let january = december.next().unwrap();
    assert_eq!((january.year(), january.month()), (2025, 1));

    let grid = build_calendar_grid(
        january.year(),
        january.month(),
        date("01-01-2025"),
        date("01-01-2025"),
        |_| false,
    )
    .unwrap();
    assert_eq!(grid.day_cells().count(), 31);
    assert_eq!(grid.leading_blanks(), 3);
}
