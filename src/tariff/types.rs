use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::error::TariffError;

/// Inclusive number of storage days between two dates.
///
/// Both the carry-in and the carry-out day are billed, so a same-day
/// carry-out counts as one day. Callers must pass `end >= start`; use
/// [`DateRange`] to get that checked.
pub fn count_days(start: NaiveDate, end: NaiveDate) -> i64 {
    end.signed_duration_since(start).num_days() + 1
}

/// Storage period of a consignment. Carry-out is never before carry-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    carry_in: NaiveDate,
    carry_out: NaiveDate,
}

impl DateRange {
    pub fn new(carry_in: NaiveDate, carry_out: NaiveDate) -> Result<Self, TariffError> {
        if carry_out < carry_in {
            return Err(TariffError::InvalidDateRange {
                carry_in,
                carry_out,
            });
        }
        Ok(Self {
            carry_in,
            carry_out,
        })
    }

    pub fn carry_in(&self) -> NaiveDate {
        self.carry_in
    }

    pub fn carry_out(&self) -> NaiveDate {
        self.carry_out
    }

    /// Billable days, always >= 1.
    pub fn storage_days(&self) -> i64 {
        count_days(self.carry_in, self.carry_out)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ShipmentCategory {
    Air,
    Lcl,
    TwentyFoot,
    FortyFoot,
}

impl ShipmentCategory {
    pub const ALL: [ShipmentCategory; 4] = [
        ShipmentCategory::Air,
        ShipmentCategory::Lcl,
        ShipmentCategory::TwentyFoot,
        ShipmentCategory::FortyFoot,
    ];

    /// Heading shown above a breakdown.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Air => "Air Cargo Charges",
            Self::Lcl => "Port and ICD Charges for LCL Shipment",
            Self::TwentyFoot => "Port and ICD Charges for 20FT Container",
            Self::FortyFoot => "Port and ICD Charges for 40FT Container",
        }
    }
}

impl fmt::Display for ShipmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Air => write!(f, "AIR"),
            Self::Lcl => write!(f, "LCL"),
            Self::TwentyFoot => write!(f, "20FT"),
            Self::FortyFoot => write!(f, "40FT"),
        }
    }
}

impl FromStr for ShipmentCategory {
    type Err = TariffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AIR" => Ok(Self::Air),
            "LCL" => Ok(Self::Lcl),
            "20FT" => Ok(Self::TwentyFoot),
            "40FT" => Ok(Self::FortyFoot),
            _ => Err(TariffError::UnknownCategory(s.to_string())),
        }
    }
}

/// Whether air cargo is declared as dangerous goods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CargoClass {
    Dangerous,
    General,
}

impl fmt::Display for CargoClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dangerous => write!(f, "DG"),
            Self::General => write!(f, "NOT"),
        }
    }
}

impl FromStr for CargoClass {
    type Err = TariffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DG" => Ok(Self::Dangerous),
            "NOT" => Ok(Self::General),
            _ => Err(TariffError::UnknownCargoClass(s.to_string())),
        }
    }
}

/// Air waybill arrangement: a direct master waybill or a consolidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AirShipmentType {
    MasterAirWaybill,
    Consolidated,
}

impl fmt::Display for AirShipmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MasterAirWaybill => write!(f, "MAWB"),
            Self::Consolidated => write!(f, "CONSO"),
        }
    }
}

impl FromStr for AirShipmentType {
    type Err = TariffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MAWB" => Ok(Self::MasterAirWaybill),
            "CONSO" => Ok(Self::Consolidated),
            _ => Err(TariffError::UnknownShipmentType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AirRequest {
    /// Chargeable weight in kg
    pub weight: Decimal,
    pub cargo: CargoClass,
    pub shipment: AirShipmentType,
    pub dates: DateRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LclRequest {
    /// Volume in cubic meters
    pub cbm: Decimal,
    pub dates: DateRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContainerRequest {
    pub containers: u32,
    pub dates: DateRange,
}

/// One calculation, tagged by shipment category.
#[derive(Debug, Clone, PartialEq)]
pub enum CalculationRequest {
    Air(AirRequest),
    Lcl(LclRequest),
    TwentyFoot(ContainerRequest),
    FortyFoot(ContainerRequest),
}

impl CalculationRequest {
    pub fn category(&self) -> ShipmentCategory {
        match self {
            Self::Air(_) => ShipmentCategory::Air,
            Self::Lcl(_) => ShipmentCategory::Lcl,
            Self::TwentyFoot(_) => ShipmentCategory::TwentyFoot,
            Self::FortyFoot(_) => ShipmentCategory::FortyFoot,
        }
    }

    pub fn dates(&self) -> DateRange {
        match self {
            Self::Air(r) => r.dates,
            Self::Lcl(r) => r.dates,
            Self::TwentyFoot(r) | Self::FortyFoot(r) => r.dates,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChargeLine {
    pub name: String,
    pub amount: Decimal,
}

/// Named charges in display order. The last line is the grand total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChargeBreakdown {
    lines: Vec<ChargeLine>,
}

impl ChargeBreakdown {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, name: &str, amount: Decimal) -> &mut Self {
        self.lines.push(ChargeLine {
            name: name.to_string(),
            amount,
        });
        self
    }

    pub fn lines(&self) -> &[ChargeLine] {
        &self.lines
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChargeLine> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Amount of the first line with this name.
    pub fn get(&self, name: &str) -> Option<Decimal> {
        self.lines.iter().find(|l| l.name == name).map(|l| l.amount)
    }

    pub fn total(&self) -> Decimal {
        self.lines.last().map(|l| l.amount).unwrap_or(Decimal::ZERO)
    }
}

impl<'a> IntoIterator for &'a ChargeBreakdown {
    type Item = &'a ChargeLine;
    type IntoIter = std::slice::Iter<'a, ChargeLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

/// Result of one calculation: the breakdown plus the storage period it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quotation {
    pub category: ShipmentCategory,
    pub days: i64,
    pub breakdown: ChargeBreakdown,
}

impl Quotation {
    pub fn total(&self) -> Decimal {
        self.breakdown.total()
    }
}
