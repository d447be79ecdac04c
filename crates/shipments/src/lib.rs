//! Shipments domain: outbound shipments, their lines and status lifecycle.

pub mod filter;
pub mod shipment;

pub use filter::{DateWindow, ShipmentFilter, StatusCounts};
pub use shipment::{
    NewShipment, NewShipmentLine, Shipment, ShipmentDraft, ShipmentLine, ShipmentPriority, ShipmentStatus,
};
