use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// One step of a weight-based flat charge.
///
/// Applies to weights strictly below `below`; the last band of a table leaves
/// `below` unset and catches everything heavier. Bands are checked in order
/// and the first match wins, so a table of ascending thresholds partitions
/// `[0, inf)` with no gaps.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WeightBand {
    #[serde(default)]
    pub below: Option<Decimal>,
    pub charge: Decimal,
}

impl WeightBand {
    pub fn bounded(below: Decimal, charge: Decimal) -> Self {
        Self {
            below: Some(below),
            charge,
        }
    }

    pub fn open(charge: Decimal) -> Self {
        Self {
            below: None,
            charge,
        }
    }

    pub fn matches(&self, weight: Decimal) -> bool {
        match self.below {
            Some(limit) => weight < limit,
            None => true,
        }
    }
}

/// Published air equipment bands:
/// <33 kg free, 33-50 kg 10.5, 51-500 kg 26, 501-5000 kg 67,
/// 5001-9999 kg 115, 10000 kg and up 432.
/// The bands are contiguous, so a weight between two published ranges
/// (50.5 kg) takes the lower band instead of falling through to 432.
pub fn default_equipment_bands() -> Vec<WeightBand> {
    vec![
        WeightBand::bounded(dec!(33), dec!(0)),
        WeightBand::bounded(dec!(51), dec!(10.5)),
        WeightBand::bounded(dec!(501), dec!(26)),
        WeightBand::bounded(dec!(5001), dec!(67)),
        WeightBand::bounded(dec!(10000), dec!(115)),
        WeightBand::open(dec!(432)),
    ]
}

/// First band matching `weight`, if any.
pub fn find_band(bands: &[WeightBand], weight: Decimal) -> Option<&WeightBand> {
    bands.iter().find(|band| band.matches(weight))
}

/// Flat charge for `weight`. A table without an open-ended band charges
/// nothing above its last threshold; validation rejects such tables.
pub fn band_charge(bands: &[WeightBand], weight: Decimal) -> Decimal {
    find_band(bands, weight)
        .map(|band| band.charge)
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equipment_band_boundaries() {
        let bands = default_equipment_bands();
        let cases = [
            (dec!(0), dec!(0)),
            (dec!(32.9), dec!(0)),
            (dec!(33), dec!(10.5)),
            (dec!(50), dec!(10.5)),
            (dec!(51), dec!(26)),
            (dec!(500), dec!(26)),
            (dec!(501), dec!(67)),
            (dec!(5000), dec!(67)),
            (dec!(5001), dec!(115)),
            (dec!(9999), dec!(115)),
            (dec!(10000), dec!(432)),
            (dec!(250000), dec!(432)),
        ];
        for (weight, expected) in cases {
            assert_eq!(band_charge(&bands, weight), expected, "weight {}", weight);
        }
    }

    #[test]
    fn test_fractional_weights_between_published_steps() {
        let bands = default_equipment_bands();
        assert_eq!(band_charge(&bands, dec!(50.5)), dec!(10.5));
        assert_eq!(band_charge(&bands, dec!(500.5)), dec!(26));
        assert_eq!(band_charge(&bands, dec!(9999.5)), dec!(115));
    }

    #[test]
    fn test_first_match_wins() {
        let bands = vec![
            WeightBand::bounded(dec!(100), dec!(1)),
            WeightBand::bounded(dec!(200), dec!(2)),
        ];
        assert_eq!(band_charge(&bands, dec!(50)), dec!(1));
        assert_eq!(band_charge(&bands, dec!(150)), dec!(2));
    }

    #[test]
    fn test_no_open_band_charges_nothing_past_end() {
        let bands = vec![WeightBand::bounded(dec!(100), dec!(1))];
        assert!(find_band(&bands, dec!(100)).is_none());
        assert_eq!(band_charge(&bands, dec!(100)), Decimal::ZERO);
    }

    #[test]
    fn test_band_parse() {
        let yaml = r#"
- below: 33
  charge: 0
- charge: 432
"#;
        let bands: Vec<WeightBand> = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(bands.len(), 2);
        assert_eq!(bands[0].below, Some(dec!(33)));
        assert!(bands[1].below.is_none());
        assert_eq!(bands[1].charge, dec!(432));
    }
}
