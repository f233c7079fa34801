use std::collections::HashSet;
use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::SqliteConnection;
use shared::coerce::coerce_i32;
use shared::{PartResponse, StockStatus};

mod schema {
    diesel::table! {
        czesci (id) {
            id -> Integer,
            nazwa -> Text,
            kategoria -> Text,
            ilosc -> Integer,
            zarezerwowane -> Integer,
            min_stan -> Integer,
            status -> Text,
        }
    }

    diesel::table! {
        dostawy (id) {
            id -> Integer,
            dostawca -> Text,
            czesc_id -> Integer,
            ilosc -> Integer,
            termin -> Date,
            status -> Text,
        }
    }

    diesel::table! {
        harmonogram (id) {
            id -> Integer,
            zadanie -> Text,
            lokalizacja -> Text,
            zasob_id -> Text,
            priorytet -> Text,
            godzina -> Text,
            czas_trwania -> Text,
        }
    }

    diesel::joinable!(dostawy -> czesci (czesc_id));

    diesel::allow_tables_to_appear_in_same_query!(czesci, dostawy, harmonogram);
}

use schema::*;

// ============================================================================
// CLI
// ============================================================================

#[derive(Parser)]
#[command(name = "warehouse-tracker-cli")]
#[command(about = "Admin CLI for Warehouse Tracker")]
struct Cli {
    /// Path to the SQLite database file
    #[arg(long, env = "DATABASE_URL", default_value = "fabryka.db", global = true)]
    database: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all parts with derived availability
    ListParts {
        /// Print JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List all deliveries
    ListDeliveries,
    /// List the work schedule
    ListSchedule,
    /// Add a signed delta to a part's quantity
    AdjustStock {
        #[arg(long)]
        id: i32,
        #[arg(long, allow_hyphen_values = true)]
        change: i32,
    },
    /// Rewrite stored statuses that disagree with quantity vs. minimum stock
    ReconcileStatus {
        /// Report mismatches without writing
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Import parts from a CSV file
    ImportParts {
        /// Path to the CSV file (columns: Name,Category,Quantity,Reserved,Min Stock)
        #[arg(long)]
        file: PathBuf,
        /// Dry run - parse and validate without writing to the database
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
}

// ============================================================================
// Models
// ============================================================================

#[derive(Queryable)]
struct Part {
    id: i32,
    name: String,
    category: String,
    quantity: i32,
    reserved: i32,
    min_stock: i32,
    status: String,
}

#[derive(Insertable)]
#[diesel(table_name = czesci)]
struct NewPart {
    nazwa: String,
    kategoria: String,
    ilosc: i32,
    zarezerwowane: i32,
    min_stan: i32,
    status: String,
}

#[derive(Queryable)]
struct Delivery {
    id: i32,
    supplier: String,
    quantity: i32,
    due_date: NaiveDate,
    status: String,
}

#[derive(Queryable)]
struct ScheduleEntry {
    task: String,
    location: String,
    resource_id: String,
    priority: String,
    start_time: String,
    duration: String,
}

// ============================================================================
// CSV import
// ============================================================================

#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Quantity")]
    quantity: String,
    #[serde(rename = "Reserved", default)]
    reserved: String,
    #[serde(rename = "Min Stock")]
    min_stock: String,
}

#[derive(Debug, Clone, PartialEq)]
struct ParsedPart {
    name: String,
    category: String,
    quantity: i32,
    reserved: i32,
    min_stock: i32,
}

impl ParsedPart {
    fn status(&self) -> StockStatus {
        StockStatus::for_levels(self.quantity, self.min_stock)
    }
}

fn read_rows(reader: impl Read) -> anyhow::Result<Vec<CsvRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let row: CsvRow = result?;
        // Skip blank lines exported as empty records
        if row.name.is_empty() {
            continue;
        }
        rows.push(row);
    }
    Ok(rows)
}

fn parse_count(field: &str, raw: &str) -> anyhow::Result<i32> {
    let value = coerce_i32(raw).context(field.to_string())?;
    if value < 0 {
        anyhow::bail!("{}: must not be negative (got {})", field, value);
    }
    Ok(value)
}

fn parse_row(row: &CsvRow) -> anyhow::Result<ParsedPart> {
    if row.category.is_empty() {
        anyhow::bail!("Category is empty");
    }
    let reserved = if row.reserved.is_empty() {
        0
    } else {
        parse_count("Reserved", &row.reserved)?
    };
    Ok(ParsedPart {
        name: row.name.clone(),
        category: row.category.clone(),
        quantity: parse_count("Quantity", &row.quantity)?,
        reserved,
        min_stock: parse_count("Min Stock", &row.min_stock)?,
    })
}

/// Parses every row, collecting all problems instead of stopping at the first.
fn validate_rows(rows: &[CsvRow]) -> (Vec<ParsedPart>, Vec<String>) {
    let mut parsed = Vec::new();
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (i, row) in rows.iter().enumerate() {
        let line = i + 1;
        if !seen.insert(row.name.to_lowercase()) {
            errors.push(format!("Row {}: duplicate part name '{}'", line, row.name));
            continue;
        }
        match parse_row(row) {
            Ok(p) => parsed.push(p),
            Err(e) => errors.push(format!("Row {}: {:#}", line, e)),
        }
    }

    (parsed, errors)
}

fn import_parts(conn: &mut SqliteConnection, file: PathBuf, dry_run: bool) -> anyhow::Result<()> {
    let reader = std::fs::File::open(&file)
        .with_context(|| format!("Failed to read file: {}", file.display()))?;
    let rows = read_rows(reader)?;

    if rows.is_empty() {
        println!("No parts found in CSV.");
        return Ok(());
    }

    println!("Parsed {} parts", rows.len());

    let (parts, errors) = validate_rows(&rows);
    if !errors.is_empty() {
        println!("\nValidation errors:");
        for e in &errors {
            println!("  ERROR: {}", e);
        }
        anyhow::bail!("{} validation error(s) found", errors.len());
    }

    println!("\nAll rows validated successfully.");

    if dry_run {
        println!("\n[DRY RUN] Would import {} parts.", parts.len());
        for p in &parts {
            println!(
                "  {} ({}) qty={} min={} -> {}",
                p.name,
                p.category,
                p.quantity,
                p.min_stock,
                p.status().as_str()
            );
        }
        return Ok(());
    }

    conn.transaction::<_, anyhow::Error, _>(|conn| {
        let mut imported = 0;
        let mut skipped = 0;

        for p in &parts {
            let exists: bool = diesel::select(diesel::dsl::exists(
                czesci::table.filter(czesci::nazwa.eq(&p.name)),
            ))
            .get_result(conn)?;

            if exists {
                println!("  SKIP {} (already exists)", p.name);
                skipped += 1;
                continue;
            }

            let new_part = NewPart {
                nazwa: p.name.clone(),
                kategoria: p.category.clone(),
                ilosc: p.quantity,
                zarezerwowane: p.reserved,
                min_stan: p.min_stock,
                status: p.status().as_str().to_string(),
            };
            diesel::insert_into(czesci::table)
                .values(&new_part)
                .execute(conn)?;

            println!("  IMPORTED {} ({})", p.name, p.status().as_str());
            imported += 1;
        }

        println!(
            "\nImport complete: {} imported, {} skipped",
            imported, skipped
        );

        Ok(())
    })
}

// ============================================================================
// Commands
// ============================================================================

fn list_parts(conn: &mut SqliteConnection, json: bool) -> anyhow::Result<()> {
    let parts: Vec<Part> = czesci::table.order(czesci::id.desc()).load(conn)?;

    if json {
        let out: Vec<PartResponse> = parts
            .into_iter()
            .map(|p| PartResponse {
                available: shared::available(p.quantity, p.reserved),
                progress: shared::fill_progress(p.quantity, p.min_stock),
                id: p.id,
                name: p.name,
                category: p.category,
                quantity: p.quantity,
                reserved: p.reserved,
                min_stock: p.min_stock,
                status: p.status,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!(
        "{:<5} {:<30} {:<20} {:>8} {:>8} {:>8} {:<10}",
        "ID", "Name", "Category", "Qty", "Avail", "Min", "Status"
    );
    println!("{}", "-".repeat(95));
    for p in parts {
        println!(
            "{:<5} {:<30} {:<20} {:>8} {:>8} {:>8} {:<10}",
            p.id,
            p.name,
            p.category,
            p.quantity,
            shared::available(p.quantity, p.reserved),
            p.min_stock,
            p.status
        );
    }
    Ok(())
}

fn list_deliveries(conn: &mut SqliteConnection) -> anyhow::Result<()> {
    let rows: Vec<(Delivery, String)> = dostawy::table
        .inner_join(czesci::table)
        .order(dostawy::termin.asc())
        .select((
            (
                dostawy::id,
                dostawy::dostawca,
                dostawy::ilosc,
                dostawy::termin,
                dostawy::status,
            ),
            czesci::nazwa,
        ))
        .load(conn)?;

    println!(
        "{:<5} {:<20} {:<30} {:>6} {:<12} {:<12}",
        "ID", "Supplier", "Part", "Qty", "Due", "Status"
    );
    println!("{}", "-".repeat(90));
    for (d, part) in rows {
        println!(
            "{:<5} {:<20} {:<30} {:>6} {:<12} {:<12}",
            d.id, d.supplier, part, d.quantity, d.due_date, d.status
        );
    }
    Ok(())
}

fn list_schedule(conn: &mut SqliteConnection) -> anyhow::Result<()> {
    let entries: Vec<ScheduleEntry> = harmonogram::table
        .order(harmonogram::godzina.asc())
        .select((
            harmonogram::zadanie,
            harmonogram::lokalizacja,
            harmonogram::zasob_id,
            harmonogram::priorytet,
            harmonogram::godzina,
            harmonogram::czas_trwania,
        ))
        .load(conn)?;

    println!(
        "{:<6} {:<6} {:<25} {:<15} {:<10} {:<8}",
        "Start", "Dur.", "Task", "Location", "Resource", "Priority"
    );
    println!("{}", "-".repeat(75));
    for e in entries {
        println!(
            "{:<6} {:<6} {:<25} {:<15} {:<10} {:<8}",
            e.start_time, e.duration, e.task, e.location, e.resource_id, e.priority
        );
    }
    Ok(())
}

fn adjust_stock(conn: &mut SqliteConnection, id: i32, change: i32) -> anyhow::Result<()> {
    conn.transaction::<_, anyhow::Error, _>(|conn| {
        let (name, quantity, min_stock): (String, i32, i32) = czesci::table
            .filter(czesci::id.eq(id))
            .select((czesci::nazwa, czesci::ilosc, czesci::min_stan))
            .first(conn)
            .optional()?
            .with_context(|| format!("Part {} not found", id))?;

        let level = shared::apply_change(quantity, min_stock, change);

        diesel::update(czesci::table.filter(czesci::id.eq(id)))
            .set((
                czesci::ilosc.eq(level.quantity),
                czesci::status.eq(level.status.as_str()),
            ))
            .execute(conn)?;

        println!(
            "{}: {} -> {} ({})",
            name,
            quantity,
            level.quantity,
            level.status.as_str()
        );
        Ok(())
    })
}

fn reconcile_status(conn: &mut SqliteConnection, dry_run: bool) -> anyhow::Result<()> {
    conn.transaction::<_, anyhow::Error, _>(|conn| {
        let parts: Vec<Part> = czesci::table.order(czesci::id.asc()).load(conn)?;
        let mut fixed = 0;

        for p in &parts {
            let expected = StockStatus::for_levels(p.quantity, p.min_stock);
            if StockStatus::parse(&p.status) == Some(expected) {
                continue;
            }

            println!(
                "  {} {} (qty={} min={}): '{}' -> '{}'",
                if dry_run { "WOULD FIX" } else { "FIX" },
                p.name,
                p.quantity,
                p.min_stock,
                p.status,
                expected.as_str()
            );

            if !dry_run {
                diesel::update(czesci::table.filter(czesci::id.eq(p.id)))
                    .set(czesci::status.eq(expected.as_str()))
                    .execute(conn)?;
            }
            fixed += 1;
        }

        println!("{} of {} parts out of date", fixed, parts.len());
        Ok(())
    })
}

// ============================================================================
// Main
// ============================================================================

fn establish_connection(database_url: &str) -> anyhow::Result<SqliteConnection> {
    let mut conn = SqliteConnection::establish(database_url)
        .with_context(|| format!("Error connecting to {}", database_url))?;
    conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")?;
    Ok(conn)
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut conn = establish_connection(&cli.database)?;

    match cli.command {
        Commands::ListParts { json } => list_parts(&mut conn, json),
        Commands::ListDeliveries => list_deliveries(&mut conn),
        Commands::ListSchedule => list_schedule(&mut conn),
        Commands::AdjustStock { id, change } => adjust_stock(&mut conn, id, change),
        Commands::ReconcileStatus { dry_run } => reconcile_status(&mut conn, dry_run),
        Commands::ImportParts { file, dry_run } => import_parts(&mut conn, file, dry_run),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Name,Category,Quantity,Reserved,Min Stock
Sprzęgło, Napęd ,12,2,20
Sprężyny,Zawieszenie,40,,10

Lusterka,Wyposażenie,5,0,5
";

    #[test]
    fn reads_rows_and_skips_blank_lines() {
        let rows = read_rows(SAMPLE.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].category, "Napęd");
    }

    #[test]
    fn validated_rows_derive_status() {
        let rows = read_rows(SAMPLE.as_bytes()).unwrap();
        let (parts, errors) = validate_rows(&rows);
        assert!(errors.is_empty(), "{:?}", errors);
        assert_eq!(parts.len(), 3);

        assert_eq!(parts[0].status(), StockStatus::LowStock);
        assert_eq!(parts[1].reserved, 0);
        assert_eq!(parts[1].status(), StockStatus::Ok);
        // Exactly at the minimum is not low
        assert_eq!(parts[2].status(), StockStatus::Ok);
    }

    #[test]
    fn reports_every_bad_row() {
        let csv = "\
Name,Category,Quantity,Reserved,Min Stock
A,X,abc,0,1
B,X,-4,0,1
A,X,1,0,1
C,,1,0,1
";
        let rows = read_rows(csv.as_bytes()).unwrap();
        let (parts, errors) = validate_rows(&rows);
        assert!(parts.is_empty());
        assert_eq!(errors.len(), 4);
        assert!(errors[0].contains("Quantity"));
        assert!(errors[0].contains("invalid literal"));
        assert!(errors[1].contains("must not be negative"));
        assert!(errors[2].contains("duplicate"));
        assert!(errors[3].contains("Category is empty"));
    }
}
