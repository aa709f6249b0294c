pub mod bands;
pub mod config;
pub mod engine;
pub mod error;
pub mod types;
pub mod validation;

pub use bands::WeightBand;
pub use config::*;
pub use engine::{
    calculate, calculate_20ft_charges, calculate_40ft_charges, calculate_air_charges,
    calculate_lcl_charges, charge,
};
pub use error::TariffError;
pub use types::*;
pub use validation::validate_rates;
