use crate::{Error, Result};
use chrono::NaiveDate;
use dbferry_core::{BackupConfig, DatabaseConfig, extract_file_name};
use postgres::{Client, NoTls, SimpleQueryMessage};
use std::fs;
use std::path::{Path, PathBuf};

/// One completed table-day extract.
#[derive(Debug, Clone)]
pub struct ExtractSummary {
    pub table: String,
    pub date: NaiveDate,
    pub path: PathBuf,
    pub rows: u64,
}

/// Writes one table's rows for one calendar day to a dated CSV file.
///
/// A fresh connection is opened per call and dropped when the call returns,
/// success or failure. The table and time column are checked against the
/// database catalog before either identifier reaches the query text.
pub struct TableExtractor<'a> {
    database: &'a DatabaseConfig,
    backup: &'a BackupConfig,
}

impl<'a> TableExtractor<'a> {
    pub fn new(database: &'a DatabaseConfig, backup: &'a BackupConfig) -> Self {
        Self { database, backup }
    }

    pub fn extract(&self, table: &str, day: NaiveDate) -> Result<ExtractSummary> {
        let mut client = self.connect()?;
        self.validate_identifiers(&mut client, table)?;

        let query = day_range_query(table, &self.backup.time_column, day, &self.backup.utc_offset);

        // Run the query to completion before the output file exists. A file
        // in the backup directory is a completed extract as far as the
        // bundler is concerned, so a failed query must leave nothing behind.
        let messages = client.simple_query(&query)?;

        let path = self.backup.dir.join(extract_file_name(table, day));
        match write_messages(&path, &messages) {
            Ok(rows) => Ok(ExtractSummary {
                table: table.to_string(),
                date: day,
                path,
                rows,
            }),
            Err(err) => {
                // A partial file must not ride along in the next bundle.
                let _ = fs::remove_file(&path);
                Err(err)
            }
        }
    }

    fn connect(&self) -> Result<Client> {
        let mut pg = postgres::Config::new();
        pg.host(&self.database.host)
            .port(self.database.port)
            .user(&self.database.user)
            .password(&self.database.password)
            .dbname(&self.database.dbname);
        Ok(pg.connect(NoTls)?)
    }

    /// Allow-list check: the configured table/column pair must exist in
    /// `information_schema.columns` before it is spliced into query text.
    fn validate_identifiers(&self, client: &mut Client, table: &str) -> Result<()> {
        let column = self.backup.time_column.as_str();
        let row = client.query_one(
            "SELECT count(*) FROM information_schema.columns \
             WHERE table_name = $1 AND column_name = $2",
            &[&table, &column],
        )?;

        let found: i64 = row.get(0);
        if found == 0 {
            return Err(Error::UnknownColumn {
                table: table.to_string(),
                column: column.to_string(),
            });
        }
        Ok(())
    }
}

/// Write the buffered result set as CSV. simple_query returns every value
/// in text form, which is exactly the CSV contract: header from the row
/// description, fields as the server's own stringification, NULL as an
/// empty field.
fn write_messages(path: &Path, messages: &[SimpleQueryMessage]) -> Result<u64> {
    let mut writer = csv::Writer::from_path(path)?;
    let mut rows = 0u64;

    for message in messages {
        match message {
            SimpleQueryMessage::RowDescription(columns) => {
                writer.write_record(columns.iter().map(|c| c.name()))?;
            }
            SimpleQueryMessage::Row(row) => {
                writer.write_record((0..row.len()).map(|i| row.get(i).unwrap_or("")))?;
                rows += 1;
            }
            SimpleQueryMessage::CommandComplete(_) => {}
            _ => {}
        }
    }

    writer.flush()?;
    Ok(rows)
}

/// Double-quote an identifier, escaping embedded quotes.
fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// `SELECT *` over one local calendar day, inclusive at both bounds, in
/// ascending time order.
fn day_range_query(table: &str, column: &str, day: NaiveDate, utc_offset: &str) -> String {
    let table = quote_ident(table);
    let column = quote_ident(column);
    let day = day.format("%Y-%m-%d");
    format!(
        "SELECT * FROM {table} \
         WHERE {column} BETWEEN '{day} 00:00:00.000{utc_offset}' AND '{day} 23:59:59.999{utc_offset}' \
         ORDER BY {column} ASC"
    )
}
