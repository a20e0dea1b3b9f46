use crate::domain::model::{PassengerForm, PassengerRecord};
use crate::utils::error::{PredictError, Result};
use crate::utils::validation::validate_input_range;
use chrono::{Datelike, NaiveDate};

pub const MAX_SIB_SP: u32 = 10;
pub const MAX_FARE: u32 = 10;

/// Earliest date of birth the form accepts.
pub fn min_birth_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Whole years between `date_of_birth` and `today`.
///
/// The birth date is first clamped to `[1900-01-01, today]`, so the result
/// always lies in `[0, today.year() - 1900]`.
pub fn age_from_birth_date(date_of_birth: NaiveDate, today: NaiveDate) -> u32 {
    let dob = date_of_birth.clamp(min_birth_date(), today.max(min_birth_date()));

    let mut years = today.year() - dob.year();
    // 生日還沒到就少一歲
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        years -= 1;
    }
    years.max(0) as u32
}

/// Parse a birth date as entered in the form (DD/MM/YYYY), also accepting ISO dates.
pub fn parse_birth_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(input, "%Y-%m-%d"))
        .map_err(|_| PredictError::ValidationError {
            message: format!("date of birth '{}' is not DD/MM/YYYY", input),
        })
}

impl PassengerForm {
    /// Apply the form's bounds and derive the record the classifier sees.
    pub fn to_record(&self, today: NaiveDate) -> Result<PassengerRecord> {
        validate_input_range("sib_sp", self.sib_sp, 0, MAX_SIB_SP)?;
        validate_input_range("fare", self.fare, 0, MAX_FARE)?;

        if self.date_of_birth > today || self.date_of_birth < min_birth_date() {
            tracing::warn!(
                "Date of birth {} outside [{}, {}], clamping",
                self.date_of_birth,
                min_birth_date(),
                today
            );
        }

        tracing::debug!(
            "'# of parents / children aboard' = {} is bound to the Fare feature",
            self.fare
        );

        Ok(PassengerRecord {
            pclass: self.pclass,
            sex: self.sex,
            age: age_from_birth_date(self.date_of_birth, today),
            sib_sp: self.sib_sp,
            fare: self.fare,
        })
    }
}
