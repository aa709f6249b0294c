use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::tariff::{
    calculate, AirRequest, AirShipmentType, CalculationRequest, CargoClass, ContainerRequest,
    DateRange, LclRequest, Quotation, RateTable, ShipmentCategory,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Question-and-answer calculator form.
///
/// Asks for the shipment category, the storage period and the category's
/// inputs, re-asking on anything invalid, then runs the calculation.
pub struct Session<R, W> {
    input: R,
    output: W,
    today: NaiveDate,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, today: NaiveDate) -> Self {
        Self {
            input,
            output,
            today,
        }
    }

    /// Prompt with a message and return the trimmed input.
    fn prompt(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{}", message).context("Failed to write prompt")?;
        self.output.flush().context("Failed to flush output")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            bail!("Input closed before the form was complete");
        }
        Ok(line.trim().to_string())
    }

    /// Prompt with a default value. Returns the default if input is empty.
    fn prompt_with_default(&mut self, message: &str, default: &str) -> Result<String> {
        let input = self.prompt(&format!("{} [{}]: ", message, default))?;
        if input.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(input)
        }
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message).context("Failed to write output")
    }

    /// Keep asking until the answer parses and passes `check`.
    fn ask<T, E, F>(&mut self, message: &str, default: &str, check: F) -> Result<T>
    where
        T: FromStr<Err = E>,
        E: Display,
        F: Fn(&T) -> Result<(), String>,
    {
        loop {
            let answer = self.prompt_with_default(message, default)?;
            match answer.parse::<T>() {
                Ok(value) => match check(&value) {
                    Ok(()) => return Ok(value),
                    Err(reason) => self.say(&format!("  Invalid: {}. Try again.", reason))?,
                },
                Err(e) => self.say(&format!("  Invalid: {}. Try again.", e))?,
            }
        }
    }

    fn ask_date(&mut self, message: &str, default: NaiveDate) -> Result<NaiveDate> {
        let default_str = default.format(DATE_FORMAT).to_string();
        loop {
            let answer = self.prompt_with_default(message, &default_str)?;
            match NaiveDate::parse_from_str(&answer, DATE_FORMAT) {
                Ok(date) => return Ok(date),
                Err(_) => self.say("  Invalid: expected a date like 2024-06-01. Try again.")?,
            }
        }
    }

    fn ask_dates(&mut self) -> Result<DateRange> {
        loop {
            let carry_in = self.ask_date("Carry-in date", self.today)?;
            let carry_out = self.ask_date("Carry-out date", carry_in)?;
            match DateRange::new(carry_in, carry_out) {
                Ok(range) => return Ok(range),
                Err(_) => self.say("  Carry-out date cannot be before carry-in date!")?,
            }
        }
    }

    fn ask_positive(&mut self, message: &str, default: &str) -> Result<Decimal> {
        self.ask(message, default, |v: &Decimal| {
            if *v > Decimal::ZERO {
                Ok(())
            } else {
                Err("must be greater than zero".to_string())
            }
        })
    }

    /// Collect one complete request from the form.
    pub fn read_request(&mut self) -> Result<CalculationRequest> {
        let category: ShipmentCategory =
            self.ask("Shipment type (AIR, LCL, 20FT, 40FT)", "AIR", |_| Ok(()))?;
        let dates = self.ask_dates()?;

        let request = match category {
            ShipmentCategory::Air => {
                let weight = self.ask_positive("Cargo weight (kg)", "100.0")?;
                let cargo: CargoClass = self.ask("Cargo type (DG, NOT)", "DG", |_| Ok(()))?;
                let shipment: AirShipmentType =
                    self.ask("Air shipment type (MAWB, CONSO)", "MAWB", |_| Ok(()))?;
                CalculationRequest::Air(AirRequest {
                    weight,
                    cargo,
                    shipment,
                    dates,
                })
            }
            ShipmentCategory::Lcl => {
                let cbm = self.ask_positive("CBM (cubic meters)", "10.0")?;
                CalculationRequest::Lcl(LclRequest { cbm, dates })
            }
            ShipmentCategory::TwentyFoot | ShipmentCategory::FortyFoot => {
                let containers: u32 = self.ask("Number of containers", "1", |n: &u32| {
                    if *n >= 1 {
                        Ok(())
                    } else {
                        Err("at least one container is required".to_string())
                    }
                })?;
                let request = ContainerRequest { containers, dates };
                if category == ShipmentCategory::TwentyFoot {
                    CalculationRequest::TwentyFoot(request)
                } else {
                    CalculationRequest::FortyFoot(request)
                }
            }
        };

        Ok(request)
    }

    /// Run the whole form and calculate.
    pub fn run(&mut self, rates: &RateTable) -> Result<Quotation> {
        let request = self.read_request()?;
        let quotation = calculate(&request, rates)?;
        Ok(quotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Cursor;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn run_form(input: &str) -> (Result<Quotation>, String) {
        let mut output = Vec::new();
        let result = {
            let mut session = Session::new(Cursor::new(input.to_string()), &mut output, today());
            session.run(&RateTable::default())
        };
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_lcl_form() {
        let (result, _) = run_form("LCL\n2024-06-01\n2024-06-05\n10\n");
        let quotation = result.unwrap();
        assert_eq!(quotation.category, ShipmentCategory::Lcl);
        assert_eq!(quotation.days, 5);
        assert_eq!(quotation.total(), dec!(148.68));
    }

    #[test]
    fn test_defaults_give_same_day_air_quote() {
        // AIR, today, today, 100 kg, DG, MAWB
        let (result, output) = run_form("\n\n\n\n\n\n");
        let quotation = result.unwrap();
        assert_eq!(quotation.category, ShipmentCategory::Air);
        assert_eq!(quotation.days, 1);
        assert!(output.contains("[2024-06-01]"));
        assert!(output.contains("[100.0]"));
    }

    #[test]
    fn test_reversed_dates_are_asked_again() {
        let (result, output) =
            run_form("20FT\n2024-06-10\n2024-06-01\n2024-06-01\n2024-06-20\n1\n");
        assert!(output.contains("Carry-out date cannot be before carry-in date!"));
        let quotation = result.unwrap();
        assert_eq!(quotation.days, 20);
        assert_eq!(quotation.total(), dec!(955.8));
    }

    #[test]
    fn test_invalid_answers_are_asked_again() {
        let input = "SHIP\n40ft\nnot-a-date\n2024-06-01\n2024-06-22\n0\nmany\n1\n";
        let (result, output) = run_form(input);
        assert!(output.contains("unknown shipment category 'SHIP'"));
        assert!(output.contains("expected a date"));
        assert!(output.contains("at least one container"));
        let quotation = result.unwrap();
        assert_eq!(quotation.category, ShipmentCategory::FortyFoot);
        assert_eq!(quotation.total(), dec!(1871.48));
    }

    #[test]
    fn test_air_flags_are_asked_again() {
        let input = "AIR\n2024-06-01\n2024-06-04\n-5\n1000\nmaybe\nDG\nHAWB\nCONSO\n";
        let (result, output) = run_form(input);
        assert!(output.contains("must be greater than zero"));
        assert!(output.contains("unknown cargo class 'maybe'"));
        assert!(output.contains("unknown shipment type 'HAWB'"));
        assert_eq!(result.unwrap().total(), dec!(1245.488));
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let (result, _) = run_form("LCL\n");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Input closed"));
    }
}
