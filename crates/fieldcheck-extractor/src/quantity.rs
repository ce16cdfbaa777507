//! Number + unit extraction shared by all verifiers
//!
//! Every verifier asks this module for quantities instead of running its own
//! regular expressions, so "4,000 kg", "4000kg" and "4 tonnes" are read the
//! same way everywhere.

use once_cell::sync::Lazy;
use regex::Regex;

/// A plain or digit-grouped number ("4000", "4,000", "1,00,000", "3.5")
const NUMBER: &str = r"(?P<num>\d{1,3}(?:,\d{2,3})+(?:\.\d+)?|\d+(?:\.\d+)?)";

static MASS: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(
        r"(?i){NUMBER}\s*(?P<unit>kilograms?|kilos?|kgs?|quintals?|qtls?|tonnes?|tons?|mt)\b"
    ))
});

static DURATION: Lazy<Regex> =
    Lazy::new(|| compile(&format!(r"(?i){NUMBER}\s*(?P<unit>days?|weeks?|months?)\b")));

static TEMPERATURE: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(
        r"(?i){NUMBER}\s*(?P<unit>°\s*c(?:elsius)?\b|℃|degrees?\s+(?:c|celsius|centigrade)\b|celsius\b)"
    ))
});

static PERCENT: Lazy<Regex> =
    Lazy::new(|| compile(&format!(r"(?i){NUMBER}\s*(?P<unit>%|percent\b|per\s+cent\b)")));

static RUPEE_PREFIX: Lazy<Regex> =
    Lazy::new(|| compile(&format!(r"(?i)(?P<unit>₹|\brs\b\.?|\binr\b)\s*{NUMBER}")));

static RUPEE_SUFFIX: Lazy<Regex> =
    Lazy::new(|| compile(&format!(r"(?i){NUMBER}\s*(?P<unit>rupees?|rs)\b")));

static PLAIN_NUMBER: Lazy<Regex> = Lazy::new(|| compile(NUMBER));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid quantity pattern {pattern}: {e}"))
}

/// Physical dimension of a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Kilograms, quintals, tonnes
    Mass,
    /// Days, weeks, months
    Duration,
    /// Degrees Celsius
    Temperature,
    /// Percentages
    Ratio,
    /// Indian rupees
    Currency,
}

/// Unit recognized after (or, for rupees, before) a number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// kg, kgs, kilogram(s), kilo(s)
    Kilogram,
    /// quintal(s), qtl(s)
    Quintal,
    /// tonne(s), ton(s), mt
    Tonne,
    /// day(s)
    Day,
    /// week(s)
    Week,
    /// month(s); counted as 30 days
    Month,
    /// °C, ℃, degrees Celsius
    Celsius,
    /// %, percent, per cent
    Percent,
    /// ₹, Rs, INR, rupees
    Rupee,
}

impl Unit {
    /// Dimension of the unit
    pub fn dimension(&self) -> Dimension {
        match self {
            Unit::Kilogram | Unit::Quintal | Unit::Tonne => Dimension::Mass,
            Unit::Day | Unit::Week | Unit::Month => Dimension::Duration,
            Unit::Celsius => Dimension::Temperature,
            Unit::Percent => Dimension::Ratio,
            Unit::Rupee => Dimension::Currency,
        }
    }

    /// Factor converting a value in this unit to the dimension's base unit
    /// (kilograms for mass, days for duration, 1 otherwise)
    pub fn base_factor(&self) -> f64 {
        match self {
            Unit::Kilogram => 1.0,
            Unit::Quintal => 100.0,
            Unit::Tonne => 1000.0,
            Unit::Day => 1.0,
            Unit::Week => 7.0,
            Unit::Month => 30.0,
            Unit::Celsius | Unit::Percent | Unit::Rupee => 1.0,
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        let token = token.to_lowercase();
        let token = token.trim();
        let unit = if token.starts_with("kg") || token.starts_with("kilo") {
            Unit::Kilogram
        } else if token.starts_with("quintal") || token.starts_with("qtl") {
            Unit::Quintal
        } else if token.starts_with("ton") || token == "mt" {
            Unit::Tonne
        } else if token.starts_with("day") {
            Unit::Day
        } else if token.starts_with("week") {
            Unit::Week
        } else if token.starts_with("month") {
            Unit::Month
        } else if token.starts_with('°') || token == "℃" || token.starts_with("degree") || token == "celsius" {
            Unit::Celsius
        } else if token == "%" || token.starts_with("per") {
            Unit::Percent
        } else if token == "₹" || token.starts_with("rs") || token == "inr" || token.starts_with("rupee") {
            Unit::Rupee
        } else {
            return None;
        };
        Some(unit)
    }
}

/// A number with its unit, located in the source text
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    /// Numeric value as written (sign applied for temperatures)
    pub value: f64,
    /// Recognized unit
    pub unit: Unit,
    /// Byte offset of the number in the source text
    pub start: usize,
    /// Byte offset just past the number
    pub end: usize,
}

impl Quantity {
    /// Value converted to the dimension's base unit
    pub fn base_value(&self) -> f64 {
        self.value * self.unit.base_factor()
    }

    /// Dimension of the quantity
    pub fn dimension(&self) -> Dimension {
        self.unit.dimension()
    }
}

/// Parse a number, ignoring digit-group commas
///
/// ```
/// use fieldcheck_extractor::quantity::parse_number;
///
/// assert_eq!(parse_number("1,00,000"), Some(100000.0));
/// assert_eq!(parse_number("3.5"), Some(3.5));
/// assert_eq!(parse_number("abc"), None);
/// ```
pub fn parse_number(s: &str) -> Option<f64> {
    let cleaned: String = s.chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Extract every recognized quantity, ordered by position in the text
pub fn extract_quantities(text: &str) -> Vec<Quantity> {
    let patterns: [&Regex; 6] = [
        &MASS,
        &DURATION,
        &TEMPERATURE,
        &PERCENT,
        &RUPEE_PREFIX,
        &RUPEE_SUFFIX,
    ];

    let mut quantities: Vec<Quantity> = Vec::new();
    for pattern in patterns {
        for caps in pattern.captures_iter(text) {
            let (Some(num), Some(unit)) = (caps.name("num"), caps.name("unit")) else {
                continue;
            };
            let (Some(mut value), Some(unit)) = (parse_number(num.as_str()), Unit::from_token(unit.as_str()))
            else {
                continue;
            };
            if unit == Unit::Celsius && has_minus_sign(text, num.start()) {
                value = -value;
            }
            // One number carries one unit; the first pattern to claim it wins
            if quantities.iter().any(|q| q.start == num.start()) {
                continue;
            }
            quantities.push(Quantity {
                value,
                unit,
                start: num.start(),
                end: num.end(),
            });
        }
    }

    quantities.sort_by_key(|q| q.start);
    quantities
}

/// Extract the quantities of one dimension
pub fn quantities_of(text: &str, dimension: Dimension) -> Vec<Quantity> {
    extract_quantities(text)
        .into_iter()
        .filter(|q| q.dimension() == dimension)
        .collect()
}

/// A number without regard to its unit, located in the source text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlainNumber {
    /// Numeric value as written
    pub value: f64,
    /// Byte offset of the number in the source text
    pub start: usize,
    /// Byte offset just past the number
    pub end: usize,
}

/// Every number in the text, with or without a unit
pub fn plain_numbers(text: &str) -> Vec<PlainNumber> {
    PLAIN_NUMBER
        .captures_iter(text)
        .filter_map(|caps| caps.name("num"))
        .filter_map(|m| {
            parse_number(m.as_str()).map(|value| PlainNumber {
                value,
                start: m.start(),
                end: m.end(),
            })
        })
        .collect()
}

/// A `-` directly before the number that is not a range dash ("20-25°C")
fn has_minus_sign(text: &str, num_start: usize) -> bool {
    let mut before = text[..num_start].chars().rev();
    match before.next() {
        Some('-') | Some('−') => !before.next().is_some_and(|c| c.is_alphanumeric()),
        _ => false,
    }
}
