//! Human-readable rendering of chance trees

use super::{Chance, Kind, Outcome};
use std::fmt;

/// Format a percentage with banded significant digits
///
/// Three significant digits at or above 100, one below 10, two otherwise:
/// `100%`, `62%`, `7.5%`, `0.6%`.
fn format_pct(pct: f64) -> String {
    let digits = if pct >= 100.0 {
        3
    } else if pct < 10.0 {
        1
    } else {
        2
    };
    format_sig(pct, digits)
}

fn format_sig(value: f64, digits: i32) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (digits - 1 - magnitude).max(0) as usize;
    let text = format!("{:.*}", decimals, value);
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

impl<T: fmt::Display> fmt::Display for Outcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Fixed(value) => value.fmt(f),
            Outcome::Random(chance) => chance.fmt(f),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Chance<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Chances: ")?;
        match &self.kind {
            Kind::Certain(outcome) => write!(f, "{} (100%)", outcome)?,
            Kind::Uniform(outcomes) => {
                let share = 100.0 / outcomes.len() as f64;
                write_outcomes(f, outcomes.iter().map(|o| (o, share)))?;
            }
            Kind::Weighted {
                outcomes, weights, ..
            } => {
                let total: f64 = weights.iter().sum();
                let shares = outcomes
                    .iter()
                    .zip(weights)
                    .map(|(o, w)| (o, w / total * 100.0));
                write_outcomes(f, shares)?;
            }
            Kind::Percent { percent, yes, no } => {
                write_outcomes(f, [(yes, *percent), (no, 100.0 - *percent)])?;
            }
            Kind::Unary { name, operand, .. } => write!(f, "{}({})", name, operand)?,
            Kind::Binary { name, lhs, rhs, .. } => write!(f, "{}({}, {})", name, lhs, rhs)?,
            Kind::FoldSeq { name, items, .. } => {
                write!(f, "{}([", name)?;
                for (position, item) in items.iter().enumerate() {
                    if position > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "])")?;
            }
            Kind::FoldMap { name, entries, .. } => {
                write!(f, "{}({{", name)?;
                for (position, (key, value)) in entries.iter().enumerate() {
                    if position > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}})")?;
            }
        }
        write!(f, ">")
    }
}

fn write_outcomes<'a, T: fmt::Display + 'a>(
    f: &mut fmt::Formatter<'_>,
    shares: impl IntoIterator<Item = (&'a Outcome<T>, f64)>,
) -> fmt::Result {
    for (position, (outcome, pct)) in shares.into_iter().enumerate() {
        if position > 0 {
            write!(f, " | ")?;
        }
        write!(f, "{} ({}%)", outcome, format_pct(pct))?;
    }
    Ok(())
}

impl<T: fmt::Debug> fmt::Debug for Chance<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

impl<T: fmt::Debug> fmt::Debug for Kind<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Certain(outcome) => f.debug_tuple("Certain").field(outcome).finish(),
            Kind::Uniform(outcomes) => f.debug_tuple("Uniform").field(outcomes).finish(),
            Kind::Weighted {
                outcomes, weights, ..
            } => f
                .debug_struct("Weighted")
                .field("outcomes", outcomes)
                .field("weights", weights)
                .finish(),
            Kind::Percent { percent, yes, no } => f
                .debug_struct("Percent")
                .field("percent", percent)
                .field("yes", yes)
                .field("no", no)
                .finish(),
            Kind::Unary { name, operand, .. } => f
                .debug_struct("Unary")
                .field("name", name)
                .field("operand", operand)
                .finish(),
            Kind::Binary { name, lhs, rhs, .. } => f
                .debug_struct("Binary")
                .field("name", name)
                .field("lhs", lhs)
                .field("rhs", rhs)
                .finish(),
            Kind::FoldSeq { name, items, .. } => f
                .debug_struct("FoldSeq")
                .field("name", name)
                .field("items", items)
                .finish(),
            Kind::FoldMap { name, entries, .. } => f
                .debug_struct("FoldMap")
                .field("name", name)
                .field("entries", entries)
                .finish(),
        }
    }
}
