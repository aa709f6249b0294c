use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::bands::{default_equipment_bands, WeightBand};

/// Complete tariff: one rate table per shipment category.
///
/// Every table defaults to the published tariff. Air and LCL fields may be
/// omitted individually and inherit their defaults, so a config can override
/// one constant:
/// ```yaml
/// rates:
///   lcl:
///     shore_handling_per_cbm: 7.5
/// ```
/// The two container tables share one type with different defaults, so a
/// container section, when present, lists every rate.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RateTable {
    pub air: AirRates,
    pub lcl: LclRates,
    pub twenty_foot: ContainerRates,
    pub forty_foot: ContainerRates,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            air: AirRates::default(),
            lcl: LclRates::default(),
            twenty_foot: ContainerRates::twenty_foot(),
            forty_foot: ContainerRates::forty_foot(),
        }
    }
}

/// Airport handling, storage and authority rates for air cargo (per kg unless noted).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AirRates {
    /// Flat equipment charge by weight
    pub equipment_bands: Vec<WeightBand>,

    pub dangerous_handling_per_kg: Decimal,
    pub dangerous_handling_min: Decimal,
    /// Dangerous goods are stored from day one, per kg per day
    pub dangerous_storage_per_kg_day: Decimal,
    pub dangerous_storage_min: Decimal,

    pub general_handling_per_kg: Decimal,
    pub general_handling_min: Decimal,
    /// General cargo storage starts after this many days
    pub general_free_days: i64,
    pub general_storage_per_kg_day: Decimal,
    pub general_storage_min: Decimal,

    pub data_discharge_fee: Decimal,
    /// Authority fee, added after tax without a floor
    pub airport_authority_per_kg: Decimal,
    pub security_per_kg: Decimal,
    pub security_min: Decimal,
    pub notification_fee: Decimal,
    /// Charged on master air waybills only
    pub documentation_fee: Decimal,
    /// Charged on consolidations only
    pub break_bulk_fee: Decimal,

    pub tax_multiplier: Decimal,
}

impl Default for AirRates {
    fn default() -> Self {
        Self {
            equipment_bands: default_equipment_bands(),
            dangerous_handling_per_kg: dec!(0.185),
            dangerous_handling_min: dec!(40),
            dangerous_storage_per_kg_day: dec!(0.1854),
            dangerous_storage_min: dec!(40),
            general_handling_per_kg: dec!(0.085),
            general_handling_min: dec!(22),
            general_free_days: 3,
            general_storage_per_kg_day: dec!(0.0515),
            general_storage_min: dec!(20),
            data_discharge_fee: dec!(2),
            airport_authority_per_kg: dec!(0.04),
            security_per_kg: dec!(0.025),
            security_min: dec!(5),
            notification_fee: dec!(1),
            documentation_fee: dec!(20),
            break_bulk_fee: dec!(78),
            tax_multiplier: dec!(1.18),
        }
    }
}

/// Port and ICD rates for loose cargo, all per cbm.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LclRates {
    pub free_days: i64,
    pub storage_per_cbm_day: Decimal,
    pub corridor_levy_per_cbm: Decimal,
    pub shore_handling_per_cbm: Decimal,
    pub stripping_per_cbm: Decimal,
    pub removal_per_cbm: Decimal,
    /// Customs rent applies once chargeable days reach this count
    pub warehouse_rent_threshold_days: i64,
    /// Subtracted from chargeable days when pricing customs rent
    pub warehouse_rent_offset_days: i64,
    pub warehouse_rent_per_cbm_day: Decimal,
    pub tax_multiplier: Decimal,
}

impl Default for LclRates {
    fn default() -> Self {
        Self {
            free_days: 5,
            storage_per_cbm_day: dec!(1),
            corridor_levy_per_cbm: dec!(0.3),
            shore_handling_per_cbm: dec!(7),
            stripping_per_cbm: dec!(5.3),
            removal_per_cbm: dec!(2),
            warehouse_rent_threshold_days: 21,
            warehouse_rent_offset_days: 14,
            warehouse_rent_per_cbm_day: dec!(0.33),
            tax_multiplier: dec!(1.18),
        }
    }
}

/// Per-container port and ICD rates. Shared by 20ft and 40ft containers,
/// which differ only in the numbers.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ContainerRates {
    pub free_days: i64,
    /// Length of the cheaper first storage tier, in billable days
    pub first_tier_days: i64,
    pub first_tier_rate: Decimal,
    pub second_tier_rate: Decimal,
    pub removal_per_container: Decimal,

    pub shore_handling: Decimal,
    pub corridor_levy: Decimal,
    pub customs_verification: Decimal,
    pub icd_handling: Decimal,
    pub container_transfer: Decimal,
    /// Listed in the tariff but not billed
    pub equipment: Decimal,

    /// Customs rent applies when storage days exceed this count
    pub warehouse_rent_threshold_days: i64,
    /// Subtracted from storage days when pricing customs rent
    pub warehouse_rent_offset_days: i64,
    pub warehouse_rent_rate: Decimal,
    /// Rent units charged per container
    pub warehouse_rent_units: Decimal,

    pub tax_multiplier: Decimal,
}

impl ContainerRates {
    pub fn twenty_foot() -> Self {
        Self {
            free_days: 5,
            first_tier_days: 10,
            first_tier_rate: dec!(20),
            second_tier_rate: dec!(40),
            removal_per_container: dec!(100),
            shore_handling: dec!(79),
            corridor_levy: dec!(6),
            customs_verification: dec!(70),
            icd_handling: dec!(90),
            container_transfer: dec!(65),
            equipment: dec!(75000),
            warehouse_rent_threshold_days: 21,
            warehouse_rent_offset_days: 14,
            warehouse_rent_rate: dec!(0.33),
            warehouse_rent_units: dec!(36),
            tax_multiplier: dec!(1.18),
        }
    }

    pub fn forty_foot() -> Self {
        Self {
            first_tier_rate: dec!(40),
            second_tier_rate: dec!(80),
            removal_per_container: dec!(150),
            shore_handling: dec!(119),
            corridor_levy: dec!(12),
            customs_verification: dec!(140),
            icd_handling: dec!(140),
            equipment: dec!(150000),
            warehouse_rent_offset_days: 21,
            warehouse_rent_units: dec!(72),
            ..Self::twenty_foot()
        }
    }
}
