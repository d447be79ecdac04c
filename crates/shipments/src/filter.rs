//! Shipment list filtering and per-status counts.

use chrono::{Days, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use logihub_core::{DomainError, matches_any};

use crate::shipment::{Shipment, ShipmentStatus};

/// Creation-date window relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateWindow {
    #[default]
    All,
    Today,
    Week,
    Month,
}

impl DateWindow {
    /// Earliest admitted creation date, or `None` when unbounded.
    pub fn start(self, now: NaiveDateTime) -> Option<NaiveDate> {
        let today = now.date();
        match self {
            DateWindow::All => None,
            DateWindow::Today => Some(today),
            DateWindow::Week => today.checked_sub_days(Days::new(7)),
            DateWindow::Month => today.checked_sub_months(Months::new(1)),
        }
    }

    pub fn admits(self, created_at: NaiveDate, now: NaiveDateTime) -> bool {
        self.start(now).is_none_or(|start| created_at >= start)
    }
}

impl core::str::FromStr for DateWindow {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "all" => Ok(Self::All),
            "today" => Ok(Self::Today),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(DomainError::validation(format!("unknown date window '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentFilter {
    #[serde(default)]
    pub status: Option<ShipmentStatus>,
    #[serde(default)]
    pub window: DateWindow,
    #[serde(default)]
    pub search: String,
}

impl ShipmentFilter {
    pub fn matches(&self, shipment: &Shipment, now: NaiveDateTime) -> bool {
        if self.status.is_some_and(|s| s != shipment.status) {
            return false;
        }
        if !self.window.admits(shipment.created_at, now) {
            return false;
        }
        let fields = [
            shipment.id.as_str(),
            shipment.origin.as_str(),
            shipment.destination.as_str(),
        ]
        .into_iter()
        .chain(shipment.items.iter().map(|l| l.item_name.as_str()));
        matches_any(&self.search, fields)
    }

    pub fn apply<'a>(&self, shipments: &'a [Shipment], now: NaiveDateTime) -> Vec<&'a Shipment> {
        shipments.iter().filter(|s| self.matches(s, now)).collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub all: usize,
    pub pending: usize,
    pub in_transit: usize,
    pub delivered: usize,
}

impl StatusCounts {
    pub fn from_shipments(shipments: &[Shipment]) -> Self {
        let mut counts = StatusCounts { all: shipments.len(), ..Default::default() };
        for s in shipments {
            match s.status {
                ShipmentStatus::Pending => counts.pending += 1,
                ShipmentStatus::InTransit => counts.in_transit += 1,
                ShipmentStatus::Delivered => counts.delivered += 1,
            }
        }
        counts
    }
}
