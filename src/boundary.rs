use std::{fmt::Display, str::FromStr};

use serde::Deserialize;

/// End conditions closing the cubic spline system.
///
/// Parsed from `not-a-knot`, `natural`, `periodic` or `clamped:<left>,<right>`.
/// # Example
/// ```
/// use spline_plot::BoundaryCondition;
///
/// let clamped: BoundaryCondition = "clamped:0.5,-1".parse().unwrap();
/// assert_eq!(BoundaryCondition::Clamped { left: 0.5, right: -1.0 }, clamped);
/// assert!("cubic".parse::<BoundaryCondition>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum BoundaryCondition {
    /// First and second pieces (and last two pieces) are the same cubic.
    #[default]
    NotAKnot,
    /// Second derivative is zero at both ends.
    Natural,
    /// First derivative is fixed at both ends.
    Clamped { left: f64, right: f64 },
    /// First and second derivatives wrap around. End values must be equal.
    Periodic,
}

impl FromStr for BoundaryCondition {
    type Err = BoundaryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let lower = s.to_ascii_lowercase();
        match lower.as_str() {
            "not-a-knot" | "notaknot" => return Ok(BoundaryCondition::NotAKnot),
            "natural" => return Ok(BoundaryCondition::Natural),
            "periodic" => return Ok(BoundaryCondition::Periodic),
            _ => {}
        }

        let slopes = lower
            .strip_prefix("clamped:")
            .ok_or_else(|| BoundaryParseError(s.to_string()))?;
        let (left, right) = slopes
            .split_once(',')
            .ok_or_else(|| BoundaryParseError(s.to_string()))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| BoundaryParseError(s.to_string()))
        };
        Ok(BoundaryCondition::Clamped { left: parse(left)?, right: parse(right)? })
    }
}

impl Display for BoundaryCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundaryCondition::NotAKnot => write!(f, "not-a-knot"),
            BoundaryCondition::Natural => write!(f, "natural"),
            BoundaryCondition::Clamped { left, right } => write!(f, "clamped:{left},{right}"),
            BoundaryCondition::Periodic => write!(f, "periodic"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown boundary condition `{0}`, expected not-a-knot, natural, periodic or clamped:<left>,<right>")]
pub struct BoundaryParseError(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_named() {
        assert_eq!(BoundaryCondition::NotAKnot, "not-a-knot".parse().unwrap());
        assert_eq!(BoundaryCondition::Natural, " Natural ".parse().unwrap());
        assert_eq!(BoundaryCondition::Periodic, "periodic".parse().unwrap());
    }

    #[test]
    fn parse_clamped() {
        let boundary: BoundaryCondition = "clamped: 1.5 , -2e-1".parse().unwrap();
        assert_eq!(BoundaryCondition::Clamped { left: 1.5, right: -0.2 }, boundary);

        assert!("clamped:1".parse::<BoundaryCondition>().is_err());
        assert!("clamped:a,b".parse::<BoundaryCondition>().is_err());
        assert!("clamped:inf,0".parse::<BoundaryCondition>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        let boundary = BoundaryCondition::Clamped { left: 0.25, right: -3.0 };
        assert_eq!(boundary, boundary.to_string().parse().unwrap());
        assert_eq!("not-a-knot", BoundaryCondition::default().to_string());
    }

    #[test]
    fn deserialize_tagged() {
        #[derive(Deserialize)]
        struct Wrapper {
            boundary: BoundaryCondition,
        }

        let natural: Wrapper = toml::from_str(r#"boundary = { kind = "natural" }"#).unwrap();
        assert_eq!(BoundaryCondition::Natural, natural.boundary);

        let clamped: Wrapper =
            toml::from_str(r#"boundary = { kind = "clamped", left = 0.0, right = 1.0 }"#).unwrap();
        assert_eq!(BoundaryCondition::Clamped { left: 0.0, right: 1.0 }, clamped.boundary);

        assert!(toml::from_str::<Wrapper>(r#"boundary = { kind = "spiral" }"#).is_err());
    }
}
