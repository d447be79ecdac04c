//! Keyword-driven responder.
//!
//! The prompt is lower-cased, split into words and checked against each
//! topic's keyword list in [`Topic::PRIORITY`] order; the first hit picks the
//! template. A keyword matches at the start of a word, so `item` matches
//! "items" but `hey` does not match "they". Counts are computed from the
//! [`WarehouseData`] at answer time.

use std::fmt::Write as _;

use serde::Serialize;

use logihub_inventory::{InventoryStats, LOW_STOCK_THRESHOLD};
use logihub_maintenance::{EquipmentCounts, EquipmentStatus, TaskCounts};
use logihub_shipments::StatusCounts;
use logihub_space::{SpaceTotals, utilization};

use crate::context::WarehouseData;
use crate::error::AssistantError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Inventory,
    Shipments,
    Maintenance,
    Equipment,
    Space,
    Performance,
    Overview,
    Greeting,
    Help,
}

impl Topic {
    /// Keyword topics in the order they are tried.
    pub const PRIORITY: [Topic; 7] = [
        Topic::Inventory,
        Topic::Shipments,
        Topic::Maintenance,
        Topic::Equipment,
        Topic::Space,
        Topic::Performance,
        Topic::Greeting,
    ];

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Topic::Inventory => &["inventory", "stock", "item", "product", "sku"],
            Topic::Shipments => &["shipment", "shipping", "deliver", "transit", "carrier", "tracking"],
            Topic::Maintenance => &["maintenance", "repair", "task", "technician"],
            Topic::Equipment => &["equipment", "forklift", "conveyor", "machine", "broken"],
            Topic::Space => &["space", "capacity", "utilization", "utilisation", "room", "full"],
            Topic::Performance => &["performance", "kpi", "metric", "efficiency", "accuracy"],
            Topic::Greeting => &["hello", "hey", "good morning", "help"],
            Topic::Overview | Topic::Help => &[],
        }
    }

    /// Topic for the page the question was asked from.
    pub fn for_page(page: &str) -> Option<Topic> {
        match page.trim().to_lowercase().as_str() {
            "inventory" => Some(Topic::Inventory),
            "shipment" | "shipments" => Some(Topic::Shipments),
            "maintenance" => Some(Topic::Maintenance),
            "equipment" => Some(Topic::Equipment),
            "space" => Some(Topic::Space),
            "performance" => Some(Topic::Performance),
            "dashboard" | "" => Some(Topic::Overview),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleAnswer {
    pub topic: Topic,
    pub text: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RuleResponder;

impl RuleResponder {
    pub fn classify(&self, prompt: &str, page: Option<&str>) -> Topic {
        let lowered = prompt.to_lowercase();
        let words: Vec<&str> = lowered.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()).collect();
        Topic::PRIORITY
            .into_iter()
            .find(|t| t.keywords().iter().any(|k| mentions(&words, k)))
            .or_else(|| page.and_then(Topic::for_page))
            .unwrap_or(Topic::Help)
    }

    pub fn respond(
        &self,
        prompt: &str,
        page: Option<&str>,
        data: &WarehouseData,
    ) -> Result<RuleAnswer, AssistantError> {
        if prompt.trim().is_empty() {
            return Err(AssistantError::EmptyPrompt);
        }
        let topic = self.classify(prompt, page);
        let text = match topic {
            Topic::Inventory => inventory_answer(data),
            Topic::Shipments => shipments_answer(data),
            Topic::Maintenance => maintenance_answer(data),
            Topic::Equipment => equipment_answer(data),
            Topic::Space => space_answer(data),
            Topic::Performance => performance_answer(data),
            Topic::Overview => overview_answer(data),
            Topic::Greeting => format!("Hello! {}", capabilities()),
            Topic::Help => format!("I'm not sure what you're asking. {}", capabilities()),
        };
        Ok(RuleAnswer { topic, text })
    }
}

/// Whether `keyword` (one or more words) appears in `words`. The last keyword
/// word may be a prefix of the prompt word.
fn mentions(words: &[&str], keyword: &str) -> bool {
    let parts: Vec<&str> = keyword.split_whitespace().collect();
    let Some((last, leading)) = parts.split_last() else {
        return false;
    };
    words.windows(parts.len()).any(|window| {
        window[..leading.len()] == *leading && window[leading.len()].starts_with(last)
    })
}

fn capabilities() -> &'static str {
    "I can summarize inventory levels, shipment status, maintenance tasks, \
     equipment health, space utilization and performance metrics. \
     Try asking \"which items are low on stock?\" or \"how full are the warehouses?\""
}

fn inventory_answer(data: &WarehouseData) -> String {
    let stats = InventoryStats::from_items(&data.inventory);
    let mut out = format!(
        "You have {} inventory items totalling {} units across {} warehouses.",
        stats.item_count,
        stats.total_quantity,
        stats.by_warehouse.len()
    );
    if stats.low_stock.is_empty() {
        let _ = write!(out, " No items are below {LOW_STOCK_THRESHOLD} units.");
    } else {
        let names: Vec<String> = stats
            .low_stock
            .iter()
            .map(|i| format!("{} ({})", i.name, i.quantity))
            .collect();
        let _ = write!(
            out,
            " {} item(s) are below {LOW_STOCK_THRESHOLD} units: {}.",
            stats.low_stock.len(),
            names.join(", ")
        );
    }
    out
}

fn shipments_answer(data: &WarehouseData) -> String {
    let c = StatusCounts::from_shipments(&data.shipments);
    format!(
        "There are {} shipments: {} pending, {} in transit and {} delivered.",
        c.all, c.pending, c.in_transit, c.delivered
    )
}

fn maintenance_answer(data: &WarehouseData) -> String {
    let c = TaskCounts::from_tasks(&data.maintenance);
    format!(
        "{} maintenance tasks are open ({} pending, {} in progress) and {} are completed.",
        c.open(),
        c.pending,
        c.in_progress,
        c.completed
    )
}

fn equipment_answer(data: &WarehouseData) -> String {
    let c = EquipmentCounts::from_equipment(&data.equipment);
    let mut out = format!(
        "{} pieces of equipment are registered: {} operational, {} under maintenance and {} out of order.",
        c.total, c.operational, c.maintenance, c.broken
    );
    let broken: Vec<&str> = data
        .equipment
        .iter()
        .filter(|e| e.status == EquipmentStatus::Broken)
        .map(|e| e.name.as_str())
        .collect();
    if !broken.is_empty() {
        let _ = write!(out, " Needs attention: {}.", broken.join(", "));
    }
    out
}

fn space_answer(data: &WarehouseData) -> String {
    let rows = utilization(&data.warehouses, &data.inventory);
    let totals = SpaceTotals::from_rows(&rows);
    let mut out = format!(
        "Average space utilization is {}% across {} warehouses, with {} of {} units of capacity available.",
        totals.average_utilization,
        rows.len(),
        totals.total_available,
        totals.total_capacity
    );
    if let Some(busiest) = rows.iter().max_by_key(|r| r.percent_used) {
        let _ = write!(out, " {} is the fullest at {}%.", busiest.name, busiest.percent_used);
    }
    out
}

fn performance_answer(data: &WarehouseData) -> String {
    if data.performance.is_empty() {
        return "No performance metrics are available yet.".to_string();
    }
    let lines: Vec<String> = data
        .performance
        .iter()
        .map(|m| format!("- {}: {} ({})", m.name, m.display_value(), m.display_change()))
        .collect();
    format!("Current performance metrics:\n{}", lines.join("\n"))
}

fn overview_answer(data: &WarehouseData) -> String {
    let stock = InventoryStats::from_items(&data.inventory);
    let ships = StatusCounts::from_shipments(&data.shipments);
    let tasks = TaskCounts::from_tasks(&data.maintenance);
    format!(
        "Overview: {} units in stock, {} shipments pending, {} in transit, {} open maintenance tasks.",
        stock.total_quantity, ships.pending, ships.in_transit, tasks.open()
    )
}
