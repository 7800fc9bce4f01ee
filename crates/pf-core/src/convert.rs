//! Enumerated engineering units and conversion to/from each family's base unit.
//!
//! Four independent families are supported:
//!
//! | Family      | Base unit | Rule                        |
//! |-------------|-----------|-----------------------------|
//! | Pressure    | Pa        | linear factor               |
//! | Flow rate   | m³/s      | linear factor               |
//! | Length      | m         | linear factor               |
//! | Temperature | °C        | affine, routed through °C   |
//!
//! Units are closed enums, so a conversion can never see an unknown unit.
//! Text only becomes a unit at the parsing boundary ([`FromStr`] and
//! [`parse_quantity`]), which reports [`UnitError::UnknownUnit`].

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error in unit parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    /// Input text did not parse to a number + optional unit
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Unit not recognized for this quantity
    #[error("Unknown unit '{unit}' for {quantity}")]
    UnknownUnit { unit: String, quantity: Quantity },
}

/// Dimension/quantity family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Quantity {
    /// Pressure (base: Pa)
    Pressure,
    /// Volumetric flow rate (base: m³/s)
    FlowRate,
    /// Length (base: m)
    Length,
    /// Temperature (base: °C)
    Temperature,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pressure => write!(f, "Pressure"),
            Self::FlowRate => write!(f, "Flow Rate"),
            Self::Length => write!(f, "Length"),
            Self::Temperature => write!(f, "Temperature"),
        }
    }
}

impl FromStr for Quantity {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pressure" | "p" => Ok(Self::Pressure),
            "flow" | "flow_rate" | "flowrate" | "q" => Ok(Self::FlowRate),
            "length" | "l" => Ok(Self::Length),
            "temperature" | "temp" | "t" => Ok(Self::Temperature),
            other => Err(UnitError::ParseError(format!("unknown quantity '{other}'"))),
        }
    }
}

/// A unit whose family converts through a single multiplicative factor.
pub trait LinearUnit: Copy + PartialEq {
    /// How many base units one of this unit is.
    fn factor(self) -> f64;
}

/// Convert between two units of the same linear family.
///
/// Same-unit conversion returns `value` untouched.
pub fn convert<U: LinearUnit>(value: f64, from: U, to: U) -> f64 {
    if from == to {
        return value;
    }
    value * from.factor() / to.factor()
}

// ---------------------------------------------------------------------------
// Pressure
// ---------------------------------------------------------------------------

/// Pressure unit. Base unit is the pascal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PressureUnit {
    #[cfg_attr(feature = "serde", serde(rename = "Pa"))]
    Pascal,
    #[cfg_attr(feature = "serde", serde(rename = "kPa"))]
    Kilopascal,
    #[cfg_attr(feature = "serde", serde(rename = "MPa"))]
    Megapascal,
    #[cfg_attr(feature = "serde", serde(rename = "bar"))]
    Bar,
    #[cfg_attr(feature = "serde", serde(rename = "mbar"))]
    Millibar,
    #[cfg_attr(feature = "serde", serde(rename = "psi"))]
    Psi,
    #[cfg_attr(feature = "serde", serde(rename = "atm"))]
    Atmosphere,
    #[cfg_attr(feature = "serde", serde(rename = "mmHg"))]
    MillimeterMercury,
}

impl PressureUnit {
    pub const ALL: [Self; 8] = [
        Self::Pascal,
        Self::Kilopascal,
        Self::Megapascal,
        Self::Bar,
        Self::Millibar,
        Self::Psi,
        Self::Atmosphere,
        Self::MillimeterMercury,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Pascal => "Pa",
            Self::Kilopascal => "kPa",
            Self::Megapascal => "MPa",
            Self::Bar => "bar",
            Self::Millibar => "mbar",
            Self::Psi => "psi",
            Self::Atmosphere => "atm",
            Self::MillimeterMercury => "mmHg",
        }
    }
}

impl LinearUnit for PressureUnit {
    fn factor(self) -> f64 {
        match self {
            Self::Pascal => 1.0,
            Self::Kilopascal => 1e3,
            Self::Megapascal => 1e6,
            Self::Bar => 1e5,
            Self::Millibar => 100.0,
            Self::Psi => 6_894.757_293_168,
            Self::Atmosphere => 101_325.0,
            Self::MillimeterMercury => 133.322_387_415,
        }
    }
}

impl FromStr for PressureUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pa" | "pascal" => Ok(Self::Pascal),
            "kpa" => Ok(Self::Kilopascal),
            "mpa" => Ok(Self::Megapascal),
            "bar" => Ok(Self::Bar),
            "mbar" | "millibar" => Ok(Self::Millibar),
            "psi" => Ok(Self::Psi),
            "atm" => Ok(Self::Atmosphere),
            "mmhg" | "torr" => Ok(Self::MillimeterMercury),
            _ => Err(UnitError::UnknownUnit {
                unit: s.to_string(),
                quantity: Quantity::Pressure,
            }),
        }
    }
}

/// Convert a pressure between two units.
pub fn convert_pressure(value: f64, from: PressureUnit, to: PressureUnit) -> f64 {
    convert(value, from, to)
}

// ---------------------------------------------------------------------------
// Flow rate
// ---------------------------------------------------------------------------

/// Volumetric flow rate unit. Base unit is m³/s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlowRateUnit {
    #[cfg_attr(feature = "serde", serde(rename = "m3/s"))]
    CubicMeterPerSecond,
    #[cfg_attr(feature = "serde", serde(rename = "m3/h"))]
    CubicMeterPerHour,
    #[cfg_attr(feature = "serde", serde(rename = "L/s"))]
    LiterPerSecond,
    #[cfg_attr(feature = "serde", serde(rename = "L/min"))]
    LiterPerMinute,
    /// US gallons per minute
    #[cfg_attr(feature = "serde", serde(rename = "gpm"))]
    GallonPerMinute,
}

impl FlowRateUnit {
    pub const ALL: [Self; 5] = [
        Self::CubicMeterPerSecond,
        Self::CubicMeterPerHour,
        Self::LiterPerSecond,
        Self::LiterPerMinute,
        Self::GallonPerMinute,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Self::CubicMeterPerSecond => "m3/s",
            Self::CubicMeterPerHour => "m3/h",
            Self::LiterPerSecond => "L/s",
            Self::LiterPerMinute => "L/min",
            Self::GallonPerMinute => "gpm",
        }
    }
}

impl LinearUnit for FlowRateUnit {
    fn factor(self) -> f64 {
        match self {
            Self::CubicMeterPerSecond => 1.0,
            Self::CubicMeterPerHour => 1.0 / 3_600.0,
            Self::LiterPerSecond => 1e-3,
            Self::LiterPerMinute => 1e-3 / 60.0,
            Self::GallonPerMinute => 3.785_411_784e-3 / 60.0,
        }
    }
}

impl FromStr for FlowRateUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m3/s" | "m³/s" | "m^3/s" => Ok(Self::CubicMeterPerSecond),
            "m3/h" | "m³/h" | "m^3/h" | "m3/hr" => Ok(Self::CubicMeterPerHour),
            "l/s" | "lps" => Ok(Self::LiterPerSecond),
            "l/min" | "lpm" => Ok(Self::LiterPerMinute),
            "gpm" | "usgpm" => Ok(Self::GallonPerMinute),
            _ => Err(UnitError::UnknownUnit {
                unit: s.to_string(),
                quantity: Quantity::FlowRate,
            }),
        }
    }
}

/// Convert a volumetric flow rate between two units.
pub fn convert_flow_rate(value: f64, from: FlowRateUnit, to: FlowRateUnit) -> f64 {
    convert(value, from, to)
}

// ---------------------------------------------------------------------------
// Length
// ---------------------------------------------------------------------------

/// Length unit. Base unit is the meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LengthUnit {
    #[cfg_attr(feature = "serde", serde(rename = "m"))]
    Meter,
    #[cfg_attr(feature = "serde", serde(rename = "mm"))]
    Millimeter,
    #[cfg_attr(feature = "serde", serde(rename = "cm"))]
    Centimeter,
    #[cfg_attr(feature = "serde", serde(rename = "in"))]
    Inch,
    #[cfg_attr(feature = "serde", serde(rename = "ft"))]
    Foot,
}

impl LengthUnit {
    pub const ALL: [Self; 5] = [
        Self::Meter,
        Self::Millimeter,
        Self::Centimeter,
        Self::Inch,
        Self::Foot,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Meter => "m",
            Self::Millimeter => "mm",
            Self::Centimeter => "cm",
            Self::Inch => "in",
            Self::Foot => "ft",
        }
    }
}

impl LinearUnit for LengthUnit {
    fn factor(self) -> f64 {
        match self {
            Self::Meter => 1.0,
            Self::Millimeter => 1e-3,
            Self::Centimeter => 1e-2,
            Self::Inch => 0.0254,
            Self::Foot => 0.3048,
        }
    }
}

impl FromStr for LengthUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "meter" | "metre" => Ok(Self::Meter),
            "mm" => Ok(Self::Millimeter),
            "cm" => Ok(Self::Centimeter),
            "in" | "inch" | "\"" => Ok(Self::Inch),
            "ft" | "foot" | "feet" | "'" => Ok(Self::Foot),
            _ => Err(UnitError::UnknownUnit {
                unit: s.to_string(),
                quantity: Quantity::Length,
            }),
        }
    }
}

/// Convert a length between two units.
pub fn convert_length(value: f64, from: LengthUnit, to: LengthUnit) -> f64 {
    convert(value, from, to)
}

// ---------------------------------------------------------------------------
// Temperature
// ---------------------------------------------------------------------------

/// Temperature unit. Conversions pivot on degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TemperatureUnit {
    #[cfg_attr(feature = "serde", serde(rename = "C"))]
    Celsius,
    #[cfg_attr(feature = "serde", serde(rename = "F"))]
    Fahrenheit,
    #[cfg_attr(feature = "serde", serde(rename = "K"))]
    Kelvin,
}

impl TemperatureUnit {
    pub const ALL: [Self; 3] = [Self::Celsius, Self::Fahrenheit, Self::Kelvin];

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "C",
            Self::Fahrenheit => "F",
            Self::Kelvin => "K",
        }
    }

    fn to_celsius(self, value: f64) -> f64 {
        match self {
            Self::Celsius => value,
            Self::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            Self::Kelvin => value - 273.15,
        }
    }

    fn from_celsius(self, value_c: f64) -> f64 {
        match self {
            Self::Celsius => value_c,
            Self::Fahrenheit => value_c * 9.0 / 5.0 + 32.0,
            Self::Kelvin => value_c + 273.15,
        }
    }
}

impl FromStr for TemperatureUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "°c" | "degc" | "celsius" => Ok(Self::Celsius),
            "f" | "°f" | "degf" | "fahrenheit" => Ok(Self::Fahrenheit),
            "k" | "kelvin" => Ok(Self::Kelvin),
            _ => Err(UnitError::UnknownUnit {
                unit: s.to_string(),
                quantity: Quantity::Temperature,
            }),
        }
    }
}

/// Convert a temperature between two units via Celsius.
pub fn convert_temperature(value: f64, from: TemperatureUnit, to: TemperatureUnit) -> f64 {
    if from == to {
        return value;
    }
    to.from_celsius(from.to_celsius(value))
}

macro_rules! impl_unit_display {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.symbol())
                }
            }
        )*
    };
}

impl_unit_display!(PressureUnit, FlowRateUnit, LengthUnit, TemperatureUnit);

// ---------------------------------------------------------------------------
// Text parsing boundary
// ---------------------------------------------------------------------------

/// Parse a quantity value from text and return it in the family's base unit.
///
/// A missing unit means the value is already in the base unit.
///
/// - `"10 m3/h"` as [`Quantity::FlowRate`] → `0.002777…` (m³/s)
/// - `"68F"` as [`Quantity::Temperature`] → `20.0` (°C)
pub fn parse_quantity(raw_text: &str, quantity: Quantity) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(raw_text)?;
    if unit.is_empty() {
        return Ok(value);
    }

    let base = match quantity {
        Quantity::Pressure => value * unit.parse::<PressureUnit>()?.factor(),
        Quantity::FlowRate => value * unit.parse::<FlowRateUnit>()?.factor(),
        Quantity::Length => value * unit.parse::<LengthUnit>()?.factor(),
        Quantity::Temperature => unit.parse::<TemperatureUnit>()?.to_celsius(value),
    };
    Ok(base)
}

/// Parse a value with its unit and express it in `target_unit`.
///
/// `convert_text("10 m3/h", "gpm", Quantity::FlowRate)` → `44.028…`
pub fn convert_text(
    raw_text: &str,
    target_unit: &str,
    quantity: Quantity,
) -> Result<f64, UnitError> {
    let base = parse_quantity(raw_text, quantity)?;
    let converted = match quantity {
        Quantity::Pressure => convert(base, PressureUnit::Pascal, target_unit.parse()?),
        Quantity::FlowRate => {
            convert(base, FlowRateUnit::CubicMeterPerSecond, target_unit.parse()?)
        }
        Quantity::Length => convert(base, LengthUnit::Meter, target_unit.parse()?),
        Quantity::Temperature => {
            convert_temperature(base, TemperatureUnit::Celsius, target_unit.parse()?)
        }
    };
    Ok(converted)
}

/// Split a value+unit string into (numeric_value, unit_string).
///
/// Examples:
/// - "68F" -> (68.0, "F")
/// - "14.7 psi" -> (14.7, "psi")
/// - "300" -> (300.0, "")
fn split_value_and_unit(input: &str) -> Result<(f64, String), UnitError> {
    let trimmed = input.trim();

    let split_idx = trimmed
        .char_indices()
        .find(|&(i, c)| {
            let exponent = (c == 'e' || c == 'E')
                && trimmed[i + 1..]
                    .starts_with(|n: char| n.is_ascii_digit() || n == '-' || n == '+');
            !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+' || exponent)
        })
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());

    let (num_part, unit_part) = trimmed.split_at(split_idx);
    let value: f64 = num_part.trim().parse().map_err(|_| {
        UnitError::ParseError(format!("Could not parse numeric value from '{input}'"))
    })?;

    Ok((value, unit_part.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_unit_is_identity() {
        for u in PressureUnit::ALL {
            assert_eq!(convert_pressure(123.456, u, u), 123.456);
        }
        for u in TemperatureUnit::ALL {
            assert_eq!(convert_temperature(-40.0, u, u), -40.0);
        }
    }

    #[test]
    fn pressure_known_values() {
        let kpa = convert_pressure(1.0, PressureUnit::Atmosphere, PressureUnit::Kilopascal);
        assert!((kpa - 101.325).abs() < 1e-12);
        let psi = convert_pressure(1.0, PressureUnit::Bar, PressureUnit::Psi);
        assert!((psi - 14.503_773_8).abs() < 1e-6);
        let mmhg = convert_pressure(1.0, PressureUnit::Atmosphere, PressureUnit::MillimeterMercury);
        assert!((mmhg - 760.0).abs() < 1e-3);
    }

    #[test]
    fn flow_known_values() {
        use FlowRateUnit::*;
        let m3s = convert_flow_rate(36.0, CubicMeterPerHour, CubicMeterPerSecond);
        assert!((m3s - 0.01).abs() < 1e-15);
        let gpm = convert_flow_rate(1.0, CubicMeterPerHour, GallonPerMinute);
        assert!((gpm - 4.402_868).abs() < 1e-5);
        let lpm = convert_flow_rate(1.0, LiterPerSecond, LiterPerMinute);
        assert!((lpm - 60.0).abs() < 1e-12);
    }

    #[test]
    fn length_known_values() {
        let mm = convert_length(2.0, LengthUnit::Inch, LengthUnit::Millimeter);
        assert!((mm - 50.8).abs() < 1e-12);
        let ft = convert_length(1.0, LengthUnit::Meter, LengthUnit::Foot);
        assert!((ft - 3.280_839_9).abs() < 1e-6);
    }

    #[test]
    fn temperature_is_affine() {
        use TemperatureUnit::*;
        assert!((convert_temperature(100.0, Celsius, Fahrenheit) - 212.0).abs() < 1e-12);
        assert!((convert_temperature(32.0, Fahrenheit, Kelvin) - 273.15).abs() < 1e-12);
        assert!((convert_temperature(-40.0, Fahrenheit, Celsius) + 40.0).abs() < 1e-12);
        // 0 K is not 0 °F: a single factor would get this wrong.
        assert!((convert_temperature(0.0, Kelvin, Fahrenheit) + 459.67).abs() < 1e-9);
    }

    #[test]
    fn unit_symbols_parse_back() {
        for u in PressureUnit::ALL {
            assert_eq!(u.symbol().parse::<PressureUnit>().unwrap(), u);
        }
        for u in FlowRateUnit::ALL {
            assert_eq!(u.to_string().parse::<FlowRateUnit>().unwrap(), u);
        }
        for u in LengthUnit::ALL {
            assert_eq!(u.symbol().parse::<LengthUnit>().unwrap(), u);
        }
        for u in TemperatureUnit::ALL {
            assert_eq!(u.symbol().parse::<TemperatureUnit>().unwrap(), u);
        }
    }

    #[test]
    fn unknown_unit_is_rejected() {
        assert!(matches!(
            "furlong".parse::<LengthUnit>(),
            Err(UnitError::UnknownUnit { quantity: Quantity::Length, .. })
        ));
        assert!(matches!(
            parse_quantity("5 parsec", Quantity::Length),
            Err(UnitError::UnknownUnit { .. })
        ));
    }

    #[test]
    fn parse_quantity_to_base() {
        let q = parse_quantity("10 m3/h", Quantity::FlowRate).unwrap();
        assert!((q - 10.0 / 3600.0).abs() < 1e-15);
        let t = parse_quantity("68F", Quantity::Temperature).unwrap();
        assert!((t - 20.0).abs() < 1e-12);
        let p = parse_quantity("1.5e5 Pa", Quantity::Pressure).unwrap();
        assert_eq!(p, 1.5e5);
        let l = parse_quantity("52.5", Quantity::Length).unwrap();
        assert_eq!(l, 52.5);
        assert!(matches!(parse_quantity("abc", Quantity::Length), Err(UnitError::ParseError(_))));
    }

    #[test]
    fn convert_text_reaches_target_unit() {
        let gpm = convert_text("10 m3/h", "gpm", Quantity::FlowRate).unwrap();
        assert!((gpm - 44.028_68).abs() < 1e-4);
        let f = convert_text("-40 C", "F", Quantity::Temperature).unwrap();
        assert!((f + 40.0).abs() < 1e-12);
        let bar = convert_text("14.503774 psi", "bar", Quantity::Pressure).unwrap();
        assert!((bar - 1.0).abs() < 1e-6);
        // bare numbers are read in the base unit
        let inch = convert_text("0.0254", "in", Quantity::Length).unwrap();
        assert!((inch - 1.0).abs() < 1e-12);
        assert!(matches!(
            convert_text("3 ft", "furlong", Quantity::Length),
            Err(UnitError::UnknownUnit { .. })
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn rel_close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    proptest! {
        #[test]
        fn pressure_round_trip(x in -1e7_f64..1e7, i in 0usize..8, j in 0usize..8) {
            let (a, b) = (PressureUnit::ALL[i], PressureUnit::ALL[j]);
            let back = convert_pressure(convert_pressure(x, a, b), b, a);
            prop_assert!(rel_close(back, x));
        }

        #[test]
        fn flow_round_trip(x in 0.0_f64..1e5, i in 0usize..5, j in 0usize..5) {
            let (a, b) = (FlowRateUnit::ALL[i], FlowRateUnit::ALL[j]);
            let back = convert_flow_rate(convert_flow_rate(x, a, b), b, a);
            prop_assert!(rel_close(back, x));
        }

        #[test]
        fn length_round_trip(x in -1e5_f64..1e5, i in 0usize..5, j in 0usize..5) {
            let (a, b) = (LengthUnit::ALL[i], LengthUnit::ALL[j]);
            let back = convert_length(convert_length(x, a, b), b, a);
            prop_assert!(rel_close(back, x));
        }

        #[test]
        fn temperature_round_trip(x in -273.0_f64..2000.0, i in 0usize..3, j in 0usize..3) {
            let (a, b) = (TemperatureUnit::ALL[i], TemperatureUnit::ALL[j]);
            let back = convert_temperature(convert_temperature(x, a, b), b, a);
            prop_assert!(rel_close(back, x));
        }
    }
}
