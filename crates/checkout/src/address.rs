use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, ValueObject};

/// Where an order ships. Every field is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub full_name: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub phone_number: String,
}

impl ValueObject for ShippingAddress {}

impl ShippingAddress {
    /// Reject the first blank field, in form order.
    pub fn validate(&self) -> DomainResult<()> {
        let fields = [
            ("full name", &self.full_name),
            ("address", &self.address),
            ("city", &self.city),
            ("postal code", &self.postal_code),
            ("country", &self.country),
            ("phone number", &self.phone_number),
        ];
        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((label, _)) => Err(DomainError::validation(format!("please fill in {label}"))),
            None => Ok(()),
        }
    }
}

/// How the shopper pays. No payment is actually processed.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    Paypal,
}

impl core::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PaymentMethod::CreditCard => f.write_str("credit-card"),
            PaymentMethod::Paypal => f.write_str("paypal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ShippingAddress {
        ShippingAddress {
            full_name: "Ada Lovelace".to_string(),
            address: "12 Analytical Row".to_string(),
            city: "London".to_string(),
            postal_code: "NW1 2AB".to_string(),
            country: "UK".to_string(),
            phone_number: "+44 20 7946 0000".to_string(),
        }
    }

    #[test]
    fn complete_address_validates() {
        assert!(complete().validate().is_ok());
    }

    #[test]
    fn first_blank_field_is_reported() {
        let address = ShippingAddress {
            city: "   ".to_string(),
            country: String::new(),
            ..complete()
        };
        match address.validate().unwrap_err() {
            DomainError::Validation(msg) => assert_eq!(msg, "please fill in city"),
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn payment_method_uses_kebab_case() {
        assert_eq!(serde_json::to_string(&PaymentMethod::CreditCard).unwrap(), "\"credit-card\"");
        assert_eq!(PaymentMethod::Paypal.to_string(), "paypal");
    }
}
