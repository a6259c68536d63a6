//! Request payloads accepted by the shipping proxy

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{AppError, AppResult};

/// Message returned when a cost request is missing mandatory fields
pub const MISSING_FIELDS_MESSAGE: &str =
    "Missing or empty required fields: origin, destination, weight, courier";

fn default_limit() -> u32 {
    10
}

/// Query for the destination search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DestinationQuery {
    /// Free text matched against province, city, district and postal code
    pub search: Option<String>,
    /// Page size
    #[serde(default = "default_limit")]
    #[param(default = 10)]
    pub limit: u32,
    /// Page offset
    #[serde(default)]
    #[param(default = 0)]
    pub offset: u32,
}

impl Default for DestinationQuery {
    fn default() -> Self {
        Self {
            search: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl DestinationQuery {
    /// Upstream query parameters, `search` only when non-empty
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
        ];
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            params.push(("search", search.to_string()));
        }
        params
    }
}

/// A form field sent by the storefront as either a string or a number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl FieldValue {
    /// Encoded form value, `None` when the field counts as absent
    ///
    /// Blank strings and numeric zero are treated as missing.
    pub fn to_form_value(&self) -> Option<String> {
        match self {
            FieldValue::Text(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            FieldValue::Number(number) => (*number != 0.0).then(|| number.to_string()),
        }
    }
}

/// Shipping cost calculation request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ShippingCostRequest {
    /// Origin location code from the destination search
    pub origin: Option<FieldValue>,
    /// Destination location code from the destination search
    pub destination: Option<FieldValue>,
    /// Parcel weight in grams
    pub weight: Option<FieldValue>,
    /// Courier code(s), e.g. `jne` or `jne:pos:tiki`
    pub courier: Option<FieldValue>,
    /// Result ordering requested from upstream, `lowest` or `highest`
    pub price: Option<FieldValue>,
}

impl ShippingCostRequest {
    /// Validate mandatory fields and produce the upstream form
    pub fn into_form(self) -> AppResult<CostForm> {
        let required = |field: &Option<FieldValue>| {
            field
                .as_ref()
                .and_then(FieldValue::to_form_value)
                .ok_or_else(|| AppError::Validation(MISSING_FIELDS_MESSAGE.to_string()))
        };

        Ok(CostForm {
            origin: required(&self.origin)?,
            destination: required(&self.destination)?,
            weight: required(&self.weight)?,
            courier: required(&self.courier)?,
            price: self.price.as_ref().and_then(FieldValue::to_form_value),
        })
    }
}

/// Validated cost request ready to be form-encoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostForm {
    pub origin: String,
    pub destination: String,
    pub weight: String,
    pub courier: String,
    pub price: Option<String>,
}

impl CostForm {
    /// Form fields in upstream order
    pub fn to_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![
            ("origin", self.origin.as_str()),
            ("destination", self.destination.as_str()),
            ("weight", self.weight.as_str()),
            ("courier", self.courier.as_str()),
        ];
        if let Some(price) = &self.price {
            pairs.push(("price", price.as_str()));
        }
        pairs
    }
}
