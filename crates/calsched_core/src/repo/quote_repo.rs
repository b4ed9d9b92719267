//! Quote store: read-only day-of-year lookup.
//!
//! # Responsibility
//! - Answer `get_quote(day_of_year)` for the daily quote banner.
//! - Accept the one-time seed from the quote source.
//!
//! # Invariants
//! - Lookups never fail for an unknown index; they return empty text.
//! - Seeding only ever happens into an empty table.

use super::error::RepoResult;
use super::schema::ensure_table;
use crate::model::date::DateKey;
use crate::model::quote::{Quote, MAX_DAY_OF_YEAR};
use log::{info, warn};
use rusqlite::{params, Connection};

pub trait QuoteStore {
    /// Quote registered for `day_of_year`, or empty text.
    fn get_quote(&self, day_of_year: u32) -> RepoResult<String>;
    /// Number of registered quotes.
    fn quote_count(&self) -> RepoResult<u32>;
    /// Every quote ordered by day.
    fn list_all_quotes(&self) -> RepoResult<Vec<Quote>>;

    /// Quote for the day-of-year of `date`.
    fn quote_for_date(&self, date: DateKey) -> RepoResult<String> {
        self.get_quote(date.day_of_year())
    }
}

pub struct SqliteQuoteStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteQuoteStore<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table(conn, "quotes")?;
        Ok(Self { conn })
    }

    /// Registers line N as the quote for day N.
    ///
    /// Blank lines keep their slot without registering a quote; lines past
    /// day 366 are dropped. Does nothing if quotes are already present.
    /// Returns the number of quotes inserted.
    pub fn seed_quotes<S: AsRef<str>>(&self, lines: &[S]) -> RepoResult<u32> {
        if self.quote_count()? > 0 {
            info!("event=quote_seed module=repo status=skipped reason=already_seeded");
            return Ok(0);
        }

        let overflow = lines.len().saturating_sub(MAX_DAY_OF_YEAR as usize);
        if overflow > 0 {
            warn!("event=quote_seed module=repo status=truncated dropped_lines={overflow}");
        }

        let tx = self.conn.unchecked_transaction()?;
        let mut inserted = 0_u32;
        for (day_of_year, line) in (1..=MAX_DAY_OF_YEAR).zip(lines) {
            let text = line.as_ref();
            if text.is_empty() {
                continue;
            }
            tx.execute(
                "INSERT INTO quotes (day_of_year, quote) VALUES (?1, ?2);",
                params![day_of_year, text],
            )?;
            inserted += 1;
        }
        tx.commit()?;

        info!("event=quote_seed module=repo status=ok inserted={inserted}");
        Ok(inserted)
    }
}

impl QuoteStore for SqliteQuoteStore<'_> {
    fn get_quote(&self, day_of_year: u32) -> RepoResult<String> {
        let mut stmt = self
            .conn
            .prepare("SELECT quote FROM quotes WHERE day_of_year = ?1;")?;
        let mut rows = stmt.query([day_of_year])?;
        match rows.next()? {
            Some(row) => Ok(row.get(0)?),
            None => Ok(String::new()),
        }
    }

    fn quote_count(&self) -> RepoResult<u32> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM quotes;", [], |row| row.get::<_, u32>(0))?;
        Ok(count)
    }

    fn list_all_quotes(&self) -> RepoResult<Vec<Quote>> {
        let mut stmt = self
            .conn
            .prepare("SELECT day_of_year, quote FROM quotes ORDER BY day_of_year ASC;")?;
        let mut rows = stmt.query([])?;
        let mut quotes = Vec::new();
        while let Some(row) = rows.next()? {
            quotes.push(Quote {
                day_of_year: row.get(0)?,
                text: row.get(1)?,
            });
        }
        Ok(quotes)
    }
}

/// Inserts one quote under its index. Used by snapshot import only.
pub(crate) fn insert_quote(conn: &Connection, quote: &Quote) -> RepoResult<()> {
    quote.validate()?;
    conn.execute(
        "INSERT INTO quotes (day_of_year, quote) VALUES (?1, ?2);",
        params![quote.day_of_year, quote.text.as_str()],
    )?;
    Ok(())
}
