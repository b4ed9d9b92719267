//! CLI day view over the scheduler core.
//!
//! # Responsibility
//! - Start persistence from environment configuration.
//! - Print the month grid, tasks, note and quote for one day.
//! - Write the snapshot back on exit.
//!
//! Usage: `calsched [dd-MM-yyyy]` (defaults to today).

use calsched_core::{
    build_calendar_grid, init_logging, CalendarGrid, DateKey, DayCellKind, GridCell,
    MonthCursor, PersistenceManager, QuoteStore, SchedulerConfig, StartupSource,
};
use log::warn;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = SchedulerConfig::from_env();
    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("logging disabled: {err}");
    }

    let today = DateKey::today();
    let selected = match std::env::args().nth(1) {
        Some(raw) => match DateKey::parse(&raw) {
            Ok(date) => date,
            Err(err) => {
                eprintln!("{err}");
                return ExitCode::FAILURE;
            }
        },
        None => today,
    };

    let (manager, report) = match PersistenceManager::start(&config) {
        Ok(started) => started,
        Err(err) => {
            eprintln!("startup failed: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let StartupSource::Recovered {
        reason,
        quarantined,
    } = &report.source
    {
        if *quarantined {
            eprintln!("snapshot could not be loaded and was set aside: {reason}");
        } else {
            eprintln!(
                "snapshot could not be loaded and is left untouched; changes will not be saved: {reason}"
            );
        }
    }

    let printed = print_day(&manager, selected, today);
    if let Err(err) = &printed {
        eprintln!("{err}");
    }

    if let Err(err) = manager.shutdown() {
        warn!("event=cli_shutdown module=cli status=error error={err}");
        eprintln!("snapshot not saved: {err}");
        return ExitCode::FAILURE;
    }

    if printed.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_day(
    manager: &PersistenceManager,
    selected: DateKey,
    today: DateKey,
) -> Result<(), Box<dyn std::error::Error>> {
    let tasks = manager.task_service()?;
    let month = MonthCursor::containing(selected);
    let grid = build_calendar_grid(
        month.year(),
        month.month(),
        selected,
        today,
        |date| tasks.has_tasks_or_false(date),
    )?;
    print_grid(&grid);

    println!();
    println!("Tasks for {selected}:");
    let day_tasks = tasks.get_tasks_by_time(selected)?;
    if day_tasks.is_empty() {
        println!("  (none)");
    }
    for task in day_tasks {
        let mark = if task.done { 'x' } else { ' ' };
        println!("  [{mark}] {} {} ({})", task.time, task.title, task.category);
        if !task.description.is_empty() {
            println!("      {}", task.description);
        }
    }

    let note = manager.note_service()?.get_notes(selected)?;
    if !note.is_empty() {
        println!();
        println!("Notes:");
        println!("  {note}");
    }

    let quote = manager.quotes()?.quote_for_date(selected)?;
    if !quote.is_empty() {
        println!();
        println!("\"{quote}\"");
    }
    Ok(())
}

fn print_grid(grid: &CalendarGrid) {
    println!("{:02}-{}", grid.month(), grid.year());
    for row in grid.rows() {
        let line: Vec<String> = row.iter().map(render_cell).collect();
        println!("{}", line.join(" "));
    }
}

fn render_cell(cell: &GridCell) -> String {
    match cell {
        GridCell::Header(label) => format!("{label:>3}"),
        GridCell::Blank => "   ".to_string(),
        GridCell::Day(day) => {
            let marker = match day.kind {
                DayCellKind::Today => '*',
                DayCellKind::Selected => '>',
                DayCellKind::HasTasks => '+',
                DayCellKind::Plain => ' ',
            };
            format!("{marker}{:>2}", day.label)
        }
    }
}
