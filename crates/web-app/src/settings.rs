use std::fmt;

use crate::SlotError;

pub trait SettingsService {
    fn get_settings(&self) -> Result<Settings, SlotError>;
    fn set_settings(&self, settings: Settings) -> Result<(), SlotError>;
}

pub trait SettingsRepository {
    fn read_settings(&self) -> Result<Settings, SlotError>;
    fn write_settings(&self, settings: Settings) -> Result<(), SlotError>;
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub weight_unit: WeightUnit,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Lbs,
    Kg,
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WeightUnit::Lbs => write!(f, "lbs"),
            WeightUnit::Kg => write!(f, "kg"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(WeightUnit::Lbs, "lbs")]
    #[case(WeightUnit::Kg, "kg")]
    fn test_weight_unit_display(#[case] unit: WeightUnit, #[case] expected: &str) {
        assert_eq!(unit.to_string(), expected);
    }

    #[test]
    fn test_settings_default() {
        assert_eq!(Settings::default().weight_unit, WeightUnit::Lbs);
    }
}
