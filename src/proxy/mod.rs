//! Proxy module
//!
//! Handles request forwarding to the RajaOngkir shipping API.

pub mod headers;
pub mod logging;
pub mod provider;
pub mod rajaongkir;
pub mod types;

pub use provider::ShippingProvider;
pub use rajaongkir::RajaOngkirClient;
pub use types::{CostForm, DestinationQuery, FieldValue, ShippingCostRequest};
