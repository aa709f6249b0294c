//! Port and airport storage and handling charges.
//!
//! The [`tariff`] module is the calculation engine: pure functions that turn a
//! storage period and a shipment description into an ordered breakdown of
//! charges. [`config`], [`output`] and [`interactive`] are the front end used
//! by the `port-tariff` binary.
//!
//! ```
//! use chrono::NaiveDate;
//! use port_tariff::tariff::{calculate, CalculationRequest, DateRange, LclRequest, RateTable};
//! use rust_decimal_macros::dec;
//!
//! let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
//! let request = CalculationRequest::Lcl(LclRequest {
//!     cbm: dec!(10),
//!     dates: DateRange::new(day, day).unwrap(),
//! });
//! let quotation = calculate(&request, &RateTable::default()).unwrap();
//! assert_eq!(quotation.days, 1);
//! assert_eq!(quotation.total(), dec!(148.68));
//! ```

pub mod config;
pub mod interactive;
pub mod output;
pub mod tariff;
