use std::collections::HashMap;

use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use shared::{DeliveryStatus, Priority};

use super::schema::{czesci, dostawy, harmonogram};
use super::{DbConnection, DbError};
use crate::models::{NewDelivery, NewPart, NewScheduleEntry};

// (name, category, quantity, reserved, min stock)
const PARTS: &[(&str, &str, i32, i32, i32)] = &[
    ("Koła jezdne Ø920mm", "Podwozie", 156, 80, 100),
    ("Silniki trakcyjne 6MW", "Napęd", 24, 12, 30),
    ("Pantografy typu DSA-200", "Odbieraki prądu", 18, 5, 20),
    ("Hamulce tarczowe", "Układ hamulcowy", 245, 40, 150),
    ("Fotele pasażerskie", "Wyposażenie", 850, 200, 500),
];

// (supplier, part name, quantity, due date, status)
const DELIVERIES: &[(&str, &str, i32, (i32, u32, u32), DeliveryStatus)] = &[
    ("Siemens AG", "Silniki trakcyjne 6MW", 8, (2026, 1, 15), DeliveryStatus::InTransit),
    ("Bosch Rexroth", "Hamulce tarczowe", 50, (2026, 1, 10), DeliveryStatus::Delayed),
    ("Knorr-Bremse", "Pantografy typu DSA-200", 30, (2026, 1, 20), DeliveryStatus::Ordered),
];

// (task, location, resource, priority, start, duration)
const SCHEDULE: &[(&str, &str, &str, Priority, &str, &str)] = &[
    ("Montaż podwozia", "Hala A", "EU47-001", Priority::High, "08:00", "4h"),
    ("Malowanie", "Lakiernia", "EU48-002", Priority::Medium, "10:00", "8h"),
];

fn sample_parts() -> Vec<NewPart> {
    PARTS
        .iter()
        .map(|&(name, category, quantity, reserved, min_stock)| {
            NewPart::new(name, category, quantity, reserved, min_stock)
        })
        .collect()
}

fn sample_deliveries(part_ids: &HashMap<String, i32>) -> Vec<NewDelivery> {
    DELIVERIES
        .iter()
        .filter_map(|&(supplier, part, quantity, (y, m, d), status)| {
            Some(NewDelivery {
                supplier: supplier.to_string(),
                part_id: *part_ids.get(part)?,
                quantity,
                due_date: NaiveDate::from_ymd_opt(y, m, d)?,
                status: status.as_str().to_string(),
            })
        })
        .collect()
}

fn sample_schedule() -> Vec<NewScheduleEntry> {
    SCHEDULE
        .iter()
        .map(
            |&(task, location, resource_id, priority, start_time, duration)| NewScheduleEntry {
                task: task.to_string(),
                location: location.to_string(),
                resource_id: resource_id.to_string(),
                priority: priority.as_str().to_string(),
                start_time: start_time.to_string(),
                duration: duration.to_string(),
            },
        )
        .collect()
}

/// Inserts the sample data set unless the parts table already has rows.
/// Returns whether anything was written.
pub async fn seed_if_empty(conn: &mut DbConnection) -> Result<bool, DbError> {
    let existing: i64 = czesci::table.count().get_result(conn).await?;
    if existing > 0 {
        tracing::debug!(parts = existing, "Database already populated, skipping seed");
        return Ok(false);
    }

    tracing::info!("Seeding database with sample data");

    conn.transaction::<_, diesel::result::Error, _>(|conn| {
        async move {
            // Row at a time: SQLite has no DEFAULT keyword for batch inserts
            for part in sample_parts() {
                diesel::insert_into(czesci::table)
                    .values(&part)
                    .execute(conn)
                    .await?;
            }

            // Deliveries reference parts by name in the sample set
            let part_ids: HashMap<String, i32> = czesci::table
                .select((czesci::nazwa, czesci::id))
                .load::<(String, i32)>(conn)
                .await?
                .into_iter()
                .collect();

            for delivery in sample_deliveries(&part_ids) {
                diesel::insert_into(dostawy::table)
                    .values(&delivery)
                    .execute(conn)
                    .await?;
            }

            for entry in sample_schedule() {
                diesel::insert_into(harmonogram::table)
                    .values(&entry)
                    .execute(conn)
                    .await?;
            }

            Ok(())
        }
        .scope_boxed()
    })
    .await?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::StockStatus;

    #[test]
    fn sample_statuses_follow_stock_levels() {
        let statuses: Vec<String> = sample_parts().into_iter().map(|p| p.status).collect();
        assert_eq!(
            statuses,
            vec![
                StockStatus::Ok.as_str(),
                StockStatus::LowStock.as_str(),
                StockStatus::LowStock.as_str(),
                StockStatus::Ok.as_str(),
                StockStatus::Ok.as_str(),
            ]
        );
    }

    #[test]
    fn sample_totals() {
        let parts = sample_parts();
        let quantity: i32 = parts.iter().map(|p| p.quantity).sum();
        let min_stock: i32 = parts.iter().map(|p| p.min_stock).sum();
        assert_eq!(quantity, 1293);
        assert_eq!(min_stock, 800);
    }

    #[test]
    fn deliveries_skip_unknown_parts() {
        let mut ids = HashMap::new();
        ids.insert("Hamulce tarczowe".to_string(), 4);
        let deliveries = sample_deliveries(&ids);
        assert_eq!(deliveries.len(), 1);
        assert_eq!(deliveries[0].supplier, "Bosch Rexroth");
        assert_eq!(deliveries[0].part_id, 4);
    }
}
