use std::fmt;

use crate::map::AggregateTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tenths(pub i64);

impl fmt::Display for Tenths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{}", sign, abs / 10, abs % 10)
    }
}

#[inline]
pub fn round_half_away(value: f64) -> i64 {
    value.round() as i64
}

/// Renders `{name=min/mean/max, ...}` followed by a newline, stations in
/// byte order.
pub fn format_summary(table: &AggregateTable) -> String {
    let results = table
        .sorted()
        .into_iter()
        .map(|(station, aggregate)| {
            format!(
                "{}={}/{}/{}",
                String::from_utf8_lossy(station),
                Tenths(aggregate.min as i64),
                Tenths(round_half_away(aggregate.mean_tenths())),
                Tenths(aggregate.max as i64)
            )
        })
        .collect::<Vec<String>>();
    format!("{{{}}}\n", results.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(degrees: f64) -> String {
        Tenths(round_half_away(degrees * 10.0)).to_string()
    }

    #[test]
    fn rounding() {
        assert_eq!("1.6", round(1.55));
        assert_eq!("1.2", round(1.2345));
        assert_eq!("1.0", round(1.0));
        assert_eq!("-0.1", round(-0.05));
        assert_eq!("0.1", round(0.05));
        assert_eq!("0.0", round(-0.04));
    }

    #[test]
    fn tenths() {
        assert_eq!("0.0", Tenths(0).to_string());
        assert_eq!("-0.3", Tenths(-3).to_string());
        assert_eq!("-99.9", Tenths(-999).to_string());
        assert_eq!("12.0", Tenths(120).to_string());
    }

    #[test]
    fn summary() {
        let mut table = AggregateTable::new();
        table.record(b"Hamburg", 120);
        table.record(b"Bulawayo", 89);
        table.record(b"Hamburg", -34);
        assert_eq!(
            "{Bulawayo=8.9/8.9/8.9, Hamburg=-3.4/4.3/12.0}\n",
            format_summary(&table)
        );
    }

    #[test]
    fn mean_ties_round_away_from_zero() {
        let mut table = AggregateTable::new();
        table.record(b"Up", 1);
        table.record(b"Up", 2);
        table.record(b"Down", -1);
        table.record(b"Down", -2);
        table.record(b"Zero", -1);
        table.record(b"Zero", 0);
        table.record(b"Zero", 0);
        assert_eq!(
            "{Down=-0.2/-0.2/-0.1, Up=0.1/0.2/0.2, Zero=-0.1/0.0/0.0}\n",
            format_summary(&table)
        );
    }

    #[test]
    fn empty_summary() {
        assert_eq!("{}\n", format_summary(&AggregateTable::new()));
    }
}
