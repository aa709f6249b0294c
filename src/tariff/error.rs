use chrono::NaiveDate;
use thiserror::Error;

/// Everything that can stop a quotation from being produced.
///
/// No variant carries a partial breakdown: a calculation either succeeds in
/// full or fails before any charge is computed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TariffError {
    #[error("carry-out date {carry_out} is before carry-in date {carry_in}")]
    InvalidDateRange {
        carry_in: NaiveDate,
        carry_out: NaiveDate,
    },

    #[error("{field} must be positive, got {value}")]
    InvalidQuantity { field: &'static str, value: String },

    #[error("{field} is too large to calculate")]
    AmountOverflow { field: &'static str },

    #[error("unknown shipment type '{0}' (expected MAWB or CONSO)")]
    UnknownShipmentType(String),

    #[error("unknown cargo class '{0}' (expected DG or NOT)")]
    UnknownCargoClass(String),

    #[error("unknown shipment category '{0}' (expected AIR, LCL, 20FT or 40FT)")]
    UnknownCategory(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_range_message_names_both_dates() {
        let err = TariffError::InvalidDateRange {
            carry_in: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            carry_out: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
        };
        let msg = err.to_string();
        assert!(msg.contains("2024-03-09"));
        assert!(msg.contains("2024-03-10"));
    }

    #[test]
    fn test_quantity_message() {
        let err = TariffError::InvalidQuantity {
            field: "weight",
            value: "0".to_string(),
        };
        assert_eq!(err.to_string(), "weight must be positive, got 0");
    }

    #[test]
    fn test_overflow_message_names_the_line() {
        let err = TariffError::AmountOverflow {
            field: "Storage Charges",
        };
        assert_eq!(err.to_string(), "Storage Charges is too large to calculate");
    }
}
