use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use logihub_core::{DomainError, DomainResult, Entity, RecordId, require_text};
use logihub_inventory::InventoryItem;

/// Shipment status lifecycle: pending → in_transit → delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    Pending,
    #[serde(alias = "dispatched")]
    InTransit,
    Delivered,
}

impl ShipmentStatus {
    fn rank(self) -> u8 {
        match self {
            ShipmentStatus::Pending => 0,
            ShipmentStatus::InTransit => 1,
            ShipmentStatus::Delivered => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ShipmentStatus::Pending => "Pending",
            ShipmentStatus::InTransit => "In Transit",
            ShipmentStatus::Delivered => "Delivered",
        }
    }
}

impl core::str::FromStr for ShipmentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "in_transit" | "dispatched" => Ok(Self::InTransit),
            "delivered" => Ok(Self::Delivered),
            other => Err(DomainError::validation(format!("unknown shipment status '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShipmentPriority {
    #[default]
    Standard,
    Express,
    Rush,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentLine {
    pub item_id: RecordId,
    pub item_name: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    pub id: RecordId,
    pub origin: String,
    pub destination: String,
    pub items: Vec<ShipmentLine>,
    pub status: ShipmentStatus,
    pub carrier: String,
    pub tracking_number: String,
    #[serde(with = "logihub_core::time::date")]
    pub departure_date: NaiveDate,
    #[serde(with = "logihub_core::time::date")]
    pub estimated_arrival: NaiveDate,
    pub priority: ShipmentPriority,
    #[serde(with = "logihub_core::time::date")]
    pub created_at: NaiveDate,
}

impl Entity for Shipment {
    type Id = RecordId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// One line of the shipment form; blank rows are allowed and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShipmentLine {
    #[serde(default)]
    pub item_id: String,
    #[serde(default)]
    pub quantity: u32,
}

/// Submitted shipment form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShipment {
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub carrier: String,
    #[serde(default, with = "logihub_core::time::opt_date")]
    pub departure_date: Option<NaiveDate>,
    #[serde(default, with = "logihub_core::time::opt_date")]
    pub estimated_arrival: Option<NaiveDate>,
    #[serde(default)]
    pub priority: ShipmentPriority,
    #[serde(default)]
    pub items: Vec<NewShipmentLine>,
    #[serde(default)]
    pub tracking_number: Option<String>,
}

/// Validated shipment, ready to be assigned an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipmentDraft {
    pub origin: String,
    pub destination: String,
    pub carrier: String,
    pub departure_date: NaiveDate,
    pub estimated_arrival: NaiveDate,
    pub priority: ShipmentPriority,
    pub items: Vec<ShipmentLine>,
    pub tracking_number: String,
    pub created_at: NaiveDate,
}

const MISSING_FIELDS: &str = "please fill all required fields";

impl NewShipment {
    pub fn resolve(&self, inventory: &[InventoryItem], today: NaiveDate) -> DomainResult<ShipmentDraft> {
        let origin = require_text("origin", &self.origin).map_err(|_| DomainError::validation(MISSING_FIELDS))?;
        let destination =
            require_text("destination", &self.destination).map_err(|_| DomainError::validation(MISSING_FIELDS))?;
        let (Some(departure_date), Some(estimated_arrival)) = (self.departure_date, self.estimated_arrival) else {
            return Err(DomainError::validation(MISSING_FIELDS));
        };

        if estimated_arrival < departure_date {
            return Err(DomainError::validation(
                "estimated arrival cannot be before departure date",
            ));
        }

        let mut items = Vec::new();
        for line in self
            .items
            .iter()
            .filter(|l| !l.item_id.trim().is_empty() && l.quantity > 0)
        {
            let item_id = line.item_id.trim();
            let stocked = inventory
                .iter()
                .find(|i| i.id == item_id)
                .ok_or_else(|| DomainError::validation(format!("unknown inventory item '{item_id}'")))?;
            items.push(ShipmentLine {
                item_id: stocked.id.clone(),
                item_name: stocked.name.clone(),
                quantity: line.quantity,
            });
        }

        if items.is_empty() {
            return Err(DomainError::validation(
                "please add at least one item to the shipment",
            ));
        }

        let tracking_number = match self.tracking_number.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => generate_tracking_number(),
        };

        Ok(ShipmentDraft {
            origin,
            destination,
            carrier: self.carrier.trim().to_string(),
            departure_date,
            estimated_arrival,
            priority: self.priority,
            items,
            tracking_number,
            created_at: today,
        })
    }
}

/// `TRK-` followed by seven digits.
pub fn generate_tracking_number() -> String {
    let n = uuid::Uuid::now_v7().as_u128() % 10_000_000;
    format!("TRK-{n:07}")
}

impl Shipment {
    pub fn create(id: RecordId, draft: ShipmentDraft) -> Self {
        Self {
            id,
            origin: draft.origin,
            destination: draft.destination,
            items: draft.items,
            status: ShipmentStatus::Pending,
            carrier: draft.carrier,
            tracking_number: draft.tracking_number,
            departure_date: draft.departure_date,
            estimated_arrival: draft.estimated_arrival,
            priority: draft.priority,
            created_at: draft.created_at,
        }
    }

    /// Move the shipment forward in its lifecycle. Steps may be skipped
    /// (a pending shipment can be marked delivered) but never reversed.
    pub fn advance_to(&self, next: ShipmentStatus) -> DomainResult<Shipment> {
        if next.rank() <= self.status.rank() {
            return Err(DomainError::invariant(format!(
                "shipment {} cannot move from {} to {}",
                self.id,
                self.status.label(),
                next.label()
            )));
        }
        let mut updated = self.clone();
        updated.status = next;
        Ok(updated)
    }

    pub fn total_units(&self) -> u64 {
        self.items.iter().map(|l| u64::from(l.quantity)).sum()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn today() -> NaiveDate {
        d("2023-09-14")
    }

    fn inventory() -> Vec<InventoryItem> {
        let ts = NaiveDateTime::parse_from_str("2023-09-15 14:30:22", "%Y-%m-%d %H:%M:%S").unwrap();
        vec![InventoryItem {
            id: "1".into(),
            name: "Smartphone X500".into(),
            quantity: 150,
            category_id: "1".into(),
            category_name: "Electronics".into(),
            warehouse_id: "1".into(),
            warehouse_name: "Main Storage".into(),
            location: "Rack A-123".into(),
            last_updated: ts,
        }]
    }

    fn form() -> NewShipment {
        NewShipment {
            origin: "Main Storage".into(),
            destination: "Retail Store #123".into(),
            carrier: "FastShip Inc.".into(),
            departure_date: Some(d("2023-09-15")),
            estimated_arrival: Some(d("2023-09-18")),
            priority: ShipmentPriority::Express,
            items: vec![
                NewShipmentLine { item_id: "1".into(), quantity: 20 },
                NewShipmentLine { item_id: "".into(), quantity: 3 },
                NewShipmentLine { item_id: "1".into(), quantity: 0 },
            ],
            tracking_number: None,
        }
    }

    #[test]
    fn blank_and_zero_lines_are_dropped() {
        let draft = form().resolve(&inventory(), today()).unwrap();
        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.items[0].item_name, "Smartphone X500");
        assert!(draft.tracking_number.starts_with("TRK-"));
        assert_eq!(draft.tracking_number.len(), 11);
    }

    #[test]
    fn no_valid_lines_is_rejected() {
        let mut f = form();
        f.items.retain(|l| l.quantity == 0);
        assert_eq!(
            f.resolve(&inventory(), today()).unwrap_err(),
            DomainError::validation("please add at least one item to the shipment")
        );
    }

    #[test]
    fn required_fields() {
        let mut f = form();
        f.departure_date = None;
        assert_eq!(f.resolve(&inventory(), today()).unwrap_err(), DomainError::validation(MISSING_FIELDS));

        let mut f = form();
        f.destination = "  ".into();
        assert_eq!(f.resolve(&inventory(), today()).unwrap_err(), DomainError::validation(MISSING_FIELDS));
    }

    #[test]
    fn arrival_before_departure_is_rejected() {
        let mut f = form();
        f.estimated_arrival = Some(d("2023-09-10"));
        assert!(matches!(f.resolve(&inventory(), today()), Err(DomainError::Validation(_))));
    }

    #[test]
    fn unknown_item_is_rejected() {
        let mut f = form();
        f.items = vec![NewShipmentLine { item_id: "42".into(), quantity: 1 }];
        assert!(f.resolve(&inventory(), today()).is_err());
    }

    #[test]
    fn supplied_tracking_number_is_kept() {
        let mut f = form();
        f.tracking_number = Some(" FS23945832 ".into());
        assert_eq!(f.resolve(&inventory(), today()).unwrap().tracking_number, "FS23945832");
    }

    #[test]
    fn lifecycle_only_moves_forward() {
        let draft = form().resolve(&inventory(), today()).unwrap();
        let s = Shipment::create("SH-1006".into(), draft);
        assert_eq!(s.created_at, today());
        assert_eq!(s.status, ShipmentStatus::Pending);

        let moving = s.advance_to(ShipmentStatus::InTransit).unwrap();
        let done = moving.advance_to(ShipmentStatus::Delivered).unwrap();
        assert_eq!(done.status, ShipmentStatus::Delivered);

        assert!(matches!(
            done.advance_to(ShipmentStatus::Pending),
            Err(DomainError::InvariantViolation(_))
        ));
        assert!(moving.advance_to(ShipmentStatus::InTransit).is_err());
        assert!(s.advance_to(ShipmentStatus::Delivered).is_ok());
    }

    #[test]
    fn dispatched_is_read_as_in_transit() {
        let status: ShipmentStatus = serde_json::from_str("\"dispatched\"").unwrap();
        assert_eq!(status, ShipmentStatus::InTransit);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"in_transit\"");
        assert_eq!("dispatched".parse::<ShipmentStatus>().unwrap(), ShipmentStatus::InTransit);
    }
}
