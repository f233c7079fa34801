use chrono::NaiveDate;
use diesel::prelude::*;
use shared::{PartResponse, ScheduleEntryResponse, StockStatus};

use crate::db::schema::*;

// ============================================================================
// Part
// ============================================================================

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = czesci)]
pub struct Part {
    pub id: i32,
    #[diesel(column_name = nazwa)]
    pub name: String,
    #[diesel(column_name = kategoria)]
    pub category: String,
    #[diesel(column_name = ilosc)]
    pub quantity: i32,
    #[diesel(column_name = zarezerwowane)]
    pub reserved: i32,
    #[diesel(column_name = min_stan)]
    pub min_stock: i32,
    pub status: String,
}

impl From<Part> for PartResponse {
    fn from(p: Part) -> Self {
        PartResponse {
            available: shared::available(p.quantity, p.reserved),
            progress: shared::fill_progress(p.quantity, p.min_stock),
            id: p.id,
            name: p.name,
            category: p.category,
            quantity: p.quantity,
            reserved: p.reserved,
            min_stock: p.min_stock,
            status: p.status,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = czesci)]
pub struct NewPart {
    #[diesel(column_name = nazwa)]
    pub name: String,
    #[diesel(column_name = kategoria)]
    pub category: String,
    #[diesel(column_name = ilosc)]
    pub quantity: i32,
    #[diesel(column_name = zarezerwowane)]
    pub reserved: i32,
    #[diesel(column_name = min_stan)]
    pub min_stock: i32,
    pub status: String,
}

impl NewPart {
    /// Builds an insertable row whose status matches its stock levels.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        quantity: i32,
        reserved: i32,
        min_stock: i32,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            quantity,
            reserved,
            min_stock,
            status: StockStatus::for_levels(quantity, min_stock)
                .as_str()
                .to_string(),
        }
    }
}

// ============================================================================
// Delivery
// ============================================================================

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = dostawy)]
pub struct Delivery {
    pub id: i32,
    #[diesel(column_name = dostawca)]
    pub supplier: String,
    #[diesel(column_name = czesc_id)]
    pub part_id: i32,
    #[diesel(column_name = ilosc)]
    pub quantity: i32,
    #[diesel(column_name = termin)]
    pub due_date: NaiveDate,
    pub status: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = dostawy)]
pub struct NewDelivery {
    #[diesel(column_name = dostawca)]
    pub supplier: String,
    #[diesel(column_name = czesc_id)]
    pub part_id: i32,
    #[diesel(column_name = ilosc)]
    pub quantity: i32,
    #[diesel(column_name = termin)]
    pub due_date: NaiveDate,
    pub status: String,
}

// ============================================================================
// ScheduleEntry
// ============================================================================

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = harmonogram)]
pub struct ScheduleEntry {
    pub id: i32,
    #[diesel(column_name = zadanie)]
    pub task: String,
    #[diesel(column_name = lokalizacja)]
    pub location: String,
    #[diesel(column_name = zasob_id)]
    pub resource_id: String,
    #[diesel(column_name = priorytet)]
    pub priority: String,
    #[diesel(column_name = godzina)]
    pub start_time: String,
    #[diesel(column_name = czas_trwania)]
    pub duration: String,
}

impl From<ScheduleEntry> for ScheduleEntryResponse {
    fn from(e: ScheduleEntry) -> Self {
        ScheduleEntryResponse {
            id: e.id,
            task: e.task,
            location: e.location,
            resource_id: e.resource_id,
            priority: e.priority,
            start_time: e.start_time,
            duration: e.duration,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = harmonogram)]
pub struct NewScheduleEntry {
    #[diesel(column_name = zadanie)]
    pub task: String,
    #[diesel(column_name = lokalizacja)]
    pub location: String,
    #[diesel(column_name = zasob_id)]
    pub resource_id: String,
    #[diesel(column_name = priorytet)]
    pub priority: String,
    #[diesel(column_name = godzina)]
    pub start_time: String,
    #[diesel(column_name = czas_trwania)]
    pub duration: String,
}
