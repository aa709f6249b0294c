use log::debug;
use rust_decimal::Decimal;

use super::bands::band_charge;
use super::config::{AirRates, ContainerRates, LclRates, RateTable};
use super::error::TariffError;
use super::types::{
    AirRequest, AirShipmentType, CalculationRequest, CargoClass, ChargeBreakdown,
    ContainerRequest, LclRequest, Quotation, ShipmentCategory,
};

/// Line item names, in the order they are displayed.
pub mod charge {
    pub const AIRPORT_AUTHORITY: &str = "Airport Authority Fee";
    pub const DATA_DISCHARGE: &str = "Data Discharge Fee";
    pub const DOCUMENTATION: &str = "Documentation";
    pub const EQUIPMENT: &str = "Equipment Charges";
    pub const HANDLING: &str = "Handling Charges";
    pub const NOTIFICATION: &str = "Notification Charges";
    pub const GENERAL_CARGO_STORAGE: &str = "General Cargo Storage";
    pub const SECURITY: &str = "Security Surcharge";
    pub const BREAK_BULK: &str = "Break Bulk Charges";

    pub const STORAGE: &str = "Storage Charges";
    pub const CORRIDOR_LEVY: &str = "Corridor Levy Charges";
    pub const REMOVAL: &str = "Removal Charges";
    pub const SHORE_HANDLING: &str = "Shore Handling Charges";
    pub const STRIPPING: &str = "Stripping Charges";
    pub const CUSTOMS_VERIFICATION: &str = "Customs Verification Charges";
    pub const ICD_HANDLING: &str = "ICD Handling Charges";
    pub const CONTAINER_TRANSFER: &str = "Container Transfer Charges";
    pub const WAREHOUSE_RENT: &str = "Customs Warehouse Rent";

    pub const TOTAL: &str = "Total";
}

/// Run one calculation against the matching rate table.
pub fn calculate(request: &CalculationRequest, rates: &RateTable) -> Result<Quotation, TariffError> {
    let dates = request.dates();
    debug!(
        "calculating {} charges from {} to {}",
        request.category(),
        dates.carry_in(),
        dates.carry_out()
    );
    match request {
        CalculationRequest::Air(r) => calculate_air_charges(r, &rates.air),
        CalculationRequest::Lcl(r) => calculate_lcl_charges(r, &rates.lcl),
        CalculationRequest::TwentyFoot(r) => calculate_20ft_charges(r, &rates.twenty_foot),
        CalculationRequest::FortyFoot(r) => calculate_40ft_charges(r, &rates.forty_foot),
    }
}

fn require_positive(field: &'static str, value: Decimal) -> Result<(), TariffError> {
    if value <= Decimal::ZERO {
        return Err(TariffError::InvalidQuantity {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

fn overflow(field: &'static str) -> TariffError {
    TariffError::AmountOverflow { field }
}

/// Multiply factors, failing instead of overflowing.
fn product(field: &'static str, factors: &[Decimal]) -> Result<Decimal, TariffError> {
    factors
        .iter()
        .try_fold(Decimal::ONE, |acc, f| acc.checked_mul(*f))
        .ok_or_else(|| overflow(field))
}

/// Add terms, failing instead of overflowing.
fn sum(field: &'static str, terms: &[Decimal]) -> Result<Decimal, TariffError> {
    terms
        .iter()
        .try_fold(Decimal::ZERO, |acc, t| acc.checked_add(*t))
        .ok_or_else(|| overflow(field))
}

fn finish(category: ShipmentCategory, days: i64, breakdown: ChargeBreakdown) -> Quotation {
    let quotation = Quotation {
        category,
        days,
        breakdown,
    };
    debug!(
        "{} quotation: {} days, {} lines, total {}",
        category,
        days,
        quotation.breakdown.len(),
        quotation.total()
    );
    quotation
}

/// Air cargo: weight-banded equipment charge, handling and storage with
/// minimums, flat fees, then tax on the bundle plus the untaxed authority fee.
///
/// Break bulk is listed for consolidations but is not part of the total.
pub fn calculate_air_charges(request: &AirRequest, rates: &AirRates) -> Result<Quotation, TariffError> {
    require_positive("weight", request.weight)?;

    let weight = request.weight;
    let days = request.dates.storage_days();

    let equipment = band_charge(&rates.equipment_bands, weight);

    let (handling, storage) = match request.cargo {
        CargoClass::Dangerous => {
            let handling = product(charge::HANDLING, &[rates.dangerous_handling_per_kg, weight])?
                .max(rates.dangerous_handling_min);
            let storage = product(
                charge::GENERAL_CARGO_STORAGE,
                &[rates.dangerous_storage_per_kg_day, weight, Decimal::from(days)],
            )?
            .max(rates.dangerous_storage_min);
            (handling, storage)
        }
        CargoClass::General => {
            let handling = product(charge::HANDLING, &[rates.general_handling_per_kg, weight])?
                .max(rates.general_handling_min);
            let storage = if days < rates.general_free_days {
                Decimal::ZERO
            } else {
                let billable = Decimal::from(days - rates.general_free_days);
                product(
                    charge::GENERAL_CARGO_STORAGE,
                    &[rates.general_storage_per_kg_day, weight, billable],
                )?
                .max(rates.general_storage_min)
            };
            (handling, storage)
        }
    };

    let data_discharge = rates.data_discharge_fee;
    let authority = product(charge::AIRPORT_AUTHORITY, &[rates.airport_authority_per_kg, weight])?;
    let security = product(charge::SECURITY, &[rates.security_per_kg, weight])?.max(rates.security_min);
    let notification = rates.notification_fee;

    let (documentation, break_bulk) = match request.shipment {
        AirShipmentType::MasterAirWaybill => (rates.documentation_fee, Decimal::ZERO),
        AirShipmentType::Consolidated => (Decimal::ZERO, rates.break_bulk_fee),
    };

    let subtotal = sum(
        charge::TOTAL,
        &[data_discharge, documentation, equipment, handling, notification, security, storage],
    )?;
    let total = sum(
        charge::TOTAL,
        &[product(charge::TOTAL, &[subtotal, rates.tax_multiplier])?, authority],
    )?;

    let mut breakdown = ChargeBreakdown::new();
    breakdown
        .push(charge::AIRPORT_AUTHORITY, authority)
        .push(charge::DATA_DISCHARGE, data_discharge)
        .push(charge::DOCUMENTATION, documentation)
        .push(charge::EQUIPMENT, equipment)
        .push(charge::HANDLING, handling)
        .push(charge::NOTIFICATION, notification)
        .push(charge::GENERAL_CARGO_STORAGE, storage)
        .push(charge::SECURITY, security)
        .push(charge::BREAK_BULK, break_bulk)
        .push(charge::TOTAL, total);

    Ok(finish(ShipmentCategory::Air, days, breakdown))
}

/// Loose cargo billed by volume. Storage, removal and customs rent start
/// after the free period; customs rent is listed but not part of the total.
pub fn calculate_lcl_charges(request: &LclRequest, rates: &LclRates) -> Result<Quotation, TariffError> {
    require_positive("cbm", request.cbm)?;

    let cbm = request.cbm;
    let days = request.dates.storage_days();
    let chargeable = (days - rates.free_days).max(0);
    let within_free_period = days <= rates.free_days;

    let storage = product(
        charge::STORAGE,
        &[Decimal::from(chargeable), cbm, rates.storage_per_cbm_day],
    )?;
    let corridor_levy = product(charge::CORRIDOR_LEVY, &[rates.corridor_levy_per_cbm, cbm])?;
    let shore_handling = product(charge::SHORE_HANDLING, &[rates.shore_handling_per_cbm, cbm])?;
    let stripping = product(charge::STRIPPING, &[rates.stripping_per_cbm, cbm])?;

    let removal = if within_free_period {
        Decimal::ZERO
    } else {
        product(charge::REMOVAL, &[rates.removal_per_cbm, cbm])?
    };

    let warehouse_rent = if within_free_period || chargeable < rates.warehouse_rent_threshold_days {
        Decimal::ZERO
    } else {
        product(
            charge::WAREHOUSE_RENT,
            &[
                rates.warehouse_rent_per_cbm_day,
                cbm,
                Decimal::from(chargeable - rates.warehouse_rent_offset_days),
            ],
        )?
    };

    let subtotal = sum(
        charge::TOTAL,
        &[storage, corridor_levy, shore_handling, stripping, removal],
    )?;
    let total = product(charge::TOTAL, &[subtotal, rates.tax_multiplier])?;

    let mut breakdown = ChargeBreakdown::new();
    breakdown
        .push(charge::STORAGE, storage)
        .push(charge::CORRIDOR_LEVY, corridor_levy)
        .push(charge::REMOVAL, removal)
        .push(charge::SHORE_HANDLING, shore_handling)
        .push(charge::STRIPPING, stripping)
        .push(charge::WAREHOUSE_RENT, warehouse_rent)
        .push(charge::TOTAL, total);

    Ok(finish(ShipmentCategory::Lcl, days, breakdown))
}

pub fn calculate_20ft_charges(
    request: &ContainerRequest,
    rates: &ContainerRates,
) -> Result<Quotation, TariffError> {
    calculate_container_charges(ShipmentCategory::TwentyFoot, request, rates)
}

pub fn calculate_40ft_charges(
    request: &ContainerRequest,
    rates: &ContainerRates,
) -> Result<Quotation, TariffError> {
    calculate_container_charges(ShipmentCategory::FortyFoot, request, rates)
}

/// Full container load. Storage runs in two tiers after the free period,
/// removal is flat once storage starts, and customs rent only kicks in past
/// the second tier and the rent threshold. Fixed per-container charges are
/// listed untaxed and taxed into the total; customs rent is not totalled.
fn calculate_container_charges(
    category: ShipmentCategory,
    request: &ContainerRequest,
    rates: &ContainerRates,
) -> Result<Quotation, TariffError> {
    if request.containers == 0 {
        return Err(TariffError::InvalidQuantity {
            field: "containers",
            value: request.containers.to_string(),
        });
    }

    let count = Decimal::from(request.containers);
    let days = request.dates.storage_days();
    let tax = rates.tax_multiplier;

    let (storage, removal, warehouse_rent) = if days <= rates.free_days {
        (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
    } else {
        let billable = days - rates.free_days;
        let first_tier = billable.min(rates.first_tier_days);
        let second_tier = (billable - rates.first_tier_days).max(0);

        let per_container = sum(
            charge::STORAGE,
            &[
                product(charge::STORAGE, &[Decimal::from(first_tier), rates.first_tier_rate, tax])?,
                product(charge::STORAGE, &[Decimal::from(second_tier), rates.second_tier_rate, tax])?,
            ],
        )?;
        let storage = product(charge::STORAGE, &[per_container, count])?;
        let removal = product(charge::REMOVAL, &[rates.removal_per_container, count, tax])?;

        let warehouse_rent = if second_tier > 0 && days > rates.warehouse_rent_threshold_days {
            product(
                charge::WAREHOUSE_RENT,
                &[
                    rates.warehouse_rent_rate,
                    rates.warehouse_rent_units,
                    Decimal::from(days - rates.warehouse_rent_offset_days),
                    count,
                ],
            )?
        } else {
            Decimal::ZERO
        };

        (storage, removal, warehouse_rent)
    };

    let shore_handling = product(charge::SHORE_HANDLING, &[rates.shore_handling, count])?;
    let corridor_levy = product(charge::CORRIDOR_LEVY, &[rates.corridor_levy, count])?;
    let customs_verification =
        product(charge::CUSTOMS_VERIFICATION, &[rates.customs_verification, count])?;
    let icd_handling = product(charge::ICD_HANDLING, &[rates.icd_handling, count])?;
    let container_transfer =
        product(charge::CONTAINER_TRANSFER, &[rates.container_transfer, count])?;

    debug!(
        "{} equipment value {} per container is not billed",
        category, rates.equipment
    );

    let fixed = sum(
        charge::TOTAL,
        &[shore_handling, corridor_levy, customs_verification, icd_handling, container_transfer],
    )?;
    let total = sum(
        charge::TOTAL,
        &[product(charge::TOTAL, &[fixed, tax])?, storage, removal],
    )?;

    let mut breakdown = ChargeBreakdown::new();
    breakdown
        .push(charge::STORAGE, storage)
        .push(charge::REMOVAL, removal)
        .push(charge::SHORE_HANDLING, shore_handling)
        .push(charge::CUSTOMS_VERIFICATION, customs_verification)
        .push(charge::CORRIDOR_LEVY, corridor_levy)
        .push(charge::ICD_HANDLING, icd_handling)
        .push(charge::CONTAINER_TRANSFER, container_transfer)
        .push(charge::WAREHOUSE_RENT, warehouse_rent)
        .push(charge::TOTAL, total);

    Ok(finish(category, days, breakdown))
}
