use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::PredictError;

/// Column names in the order the classifier was trained on.
pub const FEATURE_NAMES: [&str; 5] = ["Pclass", "Sex", "Age", "SibSp", "Fare"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Female => "female",
            Sex::Male => "male",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = PredictError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "female" => Ok(Sex::Female),
            "male" => Ok(Sex::Male),
            other => Err(PredictError::ValidationError {
                message: format!("sex must be 'female' or 'male', got '{}'", other),
            }),
        }
    }
}

/// Ticket class. Serialized as the bare number 1, 2 or 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Pclass {
    First,
    Second,
    Third,
}

impl Pclass {
    pub fn number(&self) -> u8 {
        match self {
            Pclass::First => 1,
            Pclass::Second => 2,
            Pclass::Third => 3,
        }
    }
}

impl TryFrom<u8> for Pclass {
    type Error = PredictError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Pclass::First),
            2 => Ok(Pclass::Second),
            3 => Ok(Pclass::Third),
            other => Err(PredictError::ValidationError {
                message: format!("pclass must be 1, 2 or 3, got {}", other),
            }),
        }
    }
}

impl From<Pclass> for u8 {
    fn from(value: Pclass) -> Self {
        value.number()
    }
}

impl fmt::Display for Pclass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// One hypothetical passenger, built fresh for every form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerRecord {
    #[serde(rename = "Pclass")]
    pub pclass: Pclass,
    #[serde(rename = "Sex")]
    pub sex: Sex,
    #[serde(rename = "Age")]
    pub age: u32,
    #[serde(rename = "SibSp")]
    pub sib_sp: u32,
    /// Collected by the form as "# of parents / children aboard" but fed to
    /// the classifier's `Fare` column.
    #[serde(rename = "Fare")]
    pub fare: u32,
}

/// A single cell value handed to the classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue {
    Numeric(f64),
    Category(&'static str),
}

impl PassengerRecord {
    /// Named columns in [`FEATURE_NAMES`] order.
    pub fn columns(&self) -> [(&'static str, FeatureValue); 5] {
        [
            ("Pclass", FeatureValue::Numeric(f64::from(self.pclass.number()))),
            ("Sex", FeatureValue::Category(self.sex.as_str())),
            ("Age", FeatureValue::Numeric(f64::from(self.age))),
            ("SibSp", FeatureValue::Numeric(f64::from(self.sib_sp))),
            ("Fare", FeatureValue::Numeric(f64::from(self.fare))),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Died,
    Survived,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Died => "died",
            Label::Survived => "survived",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: Label,
    pub probability_survived: f64,
}

/// Raw form submission before age derivation and range checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerForm {
    pub sex: Sex,
    pub date_of_birth: NaiveDate,
    pub sib_sp: u32,
    pub pclass: Pclass,
    pub fare: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sex_parse_is_case_insensitive() {
        assert_eq!("Female".parse::<Sex>().unwrap(), Sex::Female);
        assert_eq!(" male ".parse::<Sex>().unwrap(), Sex::Male);
        assert!("other".parse::<Sex>().is_err());
    }

    #[test]
    fn test_pclass_bounds() {
        assert_eq!(Pclass::try_from(1).unwrap(), Pclass::First);
        assert_eq!(Pclass::try_from(3).unwrap(), Pclass::Third);
        assert!(Pclass::try_from(0).is_err());
        assert!(Pclass::try_from(4).is_err());
    }

    #[test]
    fn test_columns_follow_training_order() {
        let record = PassengerRecord {
            pclass: Pclass::Second,
            sex: Sex::Male,
            age: 40,
            sib_sp: 1,
            fare: 2,
        };
        let names: Vec<&str> = record.columns().iter().map(|(name, _)| *name).collect();
        assert_eq!(names, FEATURE_NAMES);
        assert_eq!(record.columns()[1].1, FeatureValue::Category("male"));
    }

    #[test]
    fn test_form_deserializes_from_json() {
        let form: PassengerForm = serde_json::from_value(serde_json::json!({
            "sex": "female",
            "date_of_birth": "1995-04-12",
            "sib_sp": 1,
            "pclass": 2,
            "fare": 0
        }))
        .unwrap();
        assert_eq!(form.pclass, Pclass::Second);
        assert_eq!(form.date_of_birth, NaiveDate::from_ymd_opt(1995, 4, 12).unwrap());

        let bad = serde_json::from_value::<PassengerForm>(serde_json::json!({
            "sex": "female",
            "date_of_birth": "1995-04-12",
            "sib_sp": 1,
            "pclass": 5,
            "fare": 0
        }));
        assert!(bad.is_err());
    }
}
