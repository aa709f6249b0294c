use rust_decimal::Decimal;

use super::bands::WeightBand;
use super::config::{AirRates, ContainerRates, LclRates, RateTable};

/// Validate a rate table at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_rates(rates: &RateTable) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    validate_air(&rates.air, &mut errors);
    validate_lcl(&rates.lcl, &mut errors);
    validate_container("rates.twenty_foot", &rates.twenty_foot, &mut errors);
    validate_container("rates.forty_foot", &rates.forty_foot, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_non_negative(path: &str, field: &str, value: Decimal, errors: &mut Vec<String>) {
    if value < Decimal::ZERO {
        errors.push(format!("{}.{}: must be non-negative, got {}", path, field, value));
    }
}

fn check_days(path: &str, field: &str, value: i64, errors: &mut Vec<String>) {
    if value < 0 {
        errors.push(format!("{}.{}: must be non-negative, got {}", path, field, value));
    }
}

fn check_positive_days(path: &str, field: &str, value: i64, errors: &mut Vec<String>) {
    if value < 1 {
        errors.push(format!("{}.{}: must be at least 1 day, got {}", path, field, value));
    }
}

fn check_tax(path: &str, value: Decimal, errors: &mut Vec<String>) {
    if value < Decimal::ONE {
        errors.push(format!(
            "{}.tax_multiplier: must be at least 1, got {}",
            path, value
        ));
    }
}

fn validate_bands(path: &str, bands: &[WeightBand], errors: &mut Vec<String>) {
    if bands.is_empty() {
        errors.push(format!("{}: at least one band is required", path));
        return;
    }

    let mut previous: Option<Decimal> = None;
    for (i, band) in bands.iter().enumerate() {
        check_non_negative(&format!("{}[{}]", path, i), "charge", band.charge, errors);

        let is_last = i == bands.len() - 1;
        match band.below {
            Some(limit) => {
                if is_last {
                    errors.push(format!(
                        "{}[{}].below: last band must be open-ended (omit 'below')",
                        path, i
                    ));
                }
                if let Some(prev) = previous {
                    if limit <= prev {
                        errors.push(format!(
                            "{}[{}].below: thresholds must be strictly ascending ({} after {})",
                            path, i, limit, prev
                        ));
                    }
                }
                previous = Some(limit);
            }
            None => {
                if !is_last {
                    errors.push(format!(
                        "{}[{}].below: only the last band may be open-ended",
                        path, i
                    ));
                }
            }
        }
    }
}

fn validate_air(air: &AirRates, errors: &mut Vec<String>) {
    let path = "rates.air";
    validate_bands("rates.air.equipment_bands", &air.equipment_bands, errors);

    let amounts = [
        ("dangerous_handling_per_kg", air.dangerous_handling_per_kg),
        ("dangerous_handling_min", air.dangerous_handling_min),
        ("dangerous_storage_per_kg_day", air.dangerous_storage_per_kg_day),
        ("dangerous_storage_min", air.dangerous_storage_min),
        ("general_handling_per_kg", air.general_handling_per_kg),
        ("general_handling_min", air.general_handling_min),
        ("general_storage_per_kg_day", air.general_storage_per_kg_day),
        ("general_storage_min", air.general_storage_min),
        ("data_discharge_fee", air.data_discharge_fee),
        ("airport_authority_per_kg", air.airport_authority_per_kg),
        ("security_per_kg", air.security_per_kg),
        ("security_min", air.security_min),
        ("notification_fee", air.notification_fee),
        ("documentation_fee", air.documentation_fee),
        ("break_bulk_fee", air.break_bulk_fee),
    ];
    for (field, value) in amounts {
        check_non_negative(path, field, value, errors);
    }
    check_days(path, "general_free_days", air.general_free_days, errors);
    check_tax(path, air.tax_multiplier, errors);
}

fn validate_lcl(lcl: &LclRates, errors: &mut Vec<String>) {
    let path = "rates.lcl";
    let amounts = [
        ("storage_per_cbm_day", lcl.storage_per_cbm_day),
        ("corridor_levy_per_cbm", lcl.corridor_levy_per_cbm),
        ("shore_handling_per_cbm", lcl.shore_handling_per_cbm),
        ("stripping_per_cbm", lcl.stripping_per_cbm),
        ("removal_per_cbm", lcl.removal_per_cbm),
        ("warehouse_rent_per_cbm_day", lcl.warehouse_rent_per_cbm_day),
    ];
    for (field, value) in amounts {
        check_non_negative(path, field, value, errors);
    }
    check_positive_days(path, "free_days", lcl.free_days, errors);
    check_days(path, "warehouse_rent_offset_days", lcl.warehouse_rent_offset_days, errors);

    // Rent is priced on (chargeable - offset) days, which must not go negative
    if lcl.warehouse_rent_offset_days > lcl.warehouse_rent_threshold_days {
        errors.push(format!(
            "{}.warehouse_rent_offset_days: must not exceed warehouse_rent_threshold_days ({} > {})",
            path, lcl.warehouse_rent_offset_days, lcl.warehouse_rent_threshold_days
        ));
    }
    check_tax(path, lcl.tax_multiplier, errors);
}

fn validate_container(path: &str, rates: &ContainerRates, errors: &mut Vec<String>) {
    let amounts = [
        ("first_tier_rate", rates.first_tier_rate),
        ("second_tier_rate", rates.second_tier_rate),
        ("removal_per_container", rates.removal_per_container),
        ("shore_handling", rates.shore_handling),
        ("corridor_levy", rates.corridor_levy),
        ("customs_verification", rates.customs_verification),
        ("icd_handling", rates.icd_handling),
        ("container_transfer", rates.container_transfer),
        ("equipment", rates.equipment),
        ("warehouse_rent_rate", rates.warehouse_rent_rate),
        ("warehouse_rent_units", rates.warehouse_rent_units),
    ];
    for (field, value) in amounts {
        check_non_negative(path, field, value, errors);
    }
    check_positive_days(path, "free_days", rates.free_days, errors);
    check_positive_days(path, "first_tier_days", rates.first_tier_days, errors);
    check_days(path, "warehouse_rent_offset_days", rates.warehouse_rent_offset_days, errors);

    if rates.warehouse_rent_offset_days > rates.warehouse_rent_threshold_days {
        errors.push(format!(
            "{}.warehouse_rent_offset_days: must not exceed warehouse_rent_threshold_days ({} > {})",
            path, rates.warehouse_rent_offset_days, rates.warehouse_rent_threshold_days
        ));
    }
    check_tax(path, rates.tax_multiplier, errors);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_rates_are_valid() {
        assert!(validate_rates(&RateTable::default()).is_ok());
    }

    #[test]
    fn test_negative_rate() {
        let mut rates = RateTable::default();
        rates.lcl.shore_handling_per_cbm = dec!(-1);
        let errors = validate_rates(&rates).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("rates.lcl.shore_handling_per_cbm"));
    }

    #[test]
    fn test_tax_multiplier_below_one() {
        let mut rates = RateTable::default();
        rates.forty_foot.tax_multiplier = dec!(0.18);
        let errors = validate_rates(&rates).unwrap_err();
        assert!(errors[0].contains("rates.forty_foot.tax_multiplier"));
    }

    #[test]
    fn test_bands_must_ascend() {
        let mut rates = RateTable::default();
        rates.air.equipment_bands = vec![
            WeightBand::bounded(dec!(50), dec!(1)),
            WeightBand::bounded(dec!(40), dec!(2)),
            WeightBand::open(dec!(3)),
        ];
        let errors = validate_rates(&rates).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("equipment_bands[1].below"));
        assert!(errors[0].contains("ascending"));
    }

    #[test]
    fn test_bands_must_end_open() {
        let mut rates = RateTable::default();
        rates.air.equipment_bands = vec![WeightBand::bounded(dec!(50), dec!(1))];
        let errors = validate_rates(&rates).unwrap_err();
        assert!(errors[0].contains("open-ended"));
    }

    #[test]
    fn test_open_band_in_the_middle() {
        let mut rates = RateTable::default();
        rates.air.equipment_bands = vec![WeightBand::open(dec!(1)), WeightBand::open(dec!(2))];
        let errors = validate_rates(&rates).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("equipment_bands[0]"));
    }

    #[test]
    fn test_empty_bands() {
        let mut rates = RateTable::default();
        rates.air.equipment_bands.clear();
        let errors = validate_rates(&rates).unwrap_err();
        assert!(errors[0].contains("at least one band"));
    }

    #[test]
    fn test_rent_offset_beyond_threshold() {
        let mut rates = RateTable::default();
        rates.twenty_foot.warehouse_rent_offset_days = 30;
        let errors = validate_rates(&rates).unwrap_err();
        assert!(errors[0].contains("rates.twenty_foot.warehouse_rent_offset_days"));
    }

    #[test]
    fn test_zero_free_days() {
        let mut rates = RateTable::default();
        rates.lcl.free_days = 0;
        rates.forty_foot.free_days = 0;
        let errors = validate_rates(&rates).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("rates.lcl.free_days: must be at least 1 day"));
        assert!(errors[1].contains("rates.forty_foot.free_days"));
    }

    #[test]
    fn test_zero_first_tier_days() {
        let mut rates = RateTable::default();
        rates.twenty_foot.first_tier_days = 0;
        let errors = validate_rates(&rates).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("rates.twenty_foot.first_tier_days"));
    }

    #[test]
    fn test_air_may_have_no_free_days() {
        let mut rates = RateTable::default();
        rates.air.general_free_days = 0;
        assert!(validate_rates(&rates).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut rates = RateTable::default();
        rates.air.security_min = dec!(-5); // Error 1
        rates.lcl.free_days = -1; // Error 2
        rates.twenty_foot.icd_handling = dec!(-90); // Error 3
        let errors = validate_rates(&rates).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
