//! Backtest result ordering and per-signal summaries.

use std::cmp::Ordering;

use crate::api::BacktestRow;
use crate::signal::Signal;

/// Stable sort by descending `perf_pct`.
///
/// Rows without a numeric `perf_pct` go after every row that has one,
/// negative performances included, and keep their input order.
pub fn sort_by_performance(rows: &mut [BacktestRow]) {
    rows.sort_by(|a, b| match (a.perf_pct, b.perf_pct) {
        (Some(pa), Some(pb)) => pb.partial_cmp(&pa).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Count and mean performance for one signal group.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SummaryGroup {
    pub count: usize,
    sum: f64,
}

impl SummaryGroup {
    fn add(&mut self, perf: f64) {
        self.count += 1;
        self.sum += perf;
    }

    /// Arithmetic mean, or `None` for an empty group.
    pub fn average(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Per-signal summary of a backtest.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SignalSummary {
    pub buy: SummaryGroup,
    pub hold: SummaryGroup,
    pub sell: SummaryGroup,
}

impl SignalSummary {
    /// Group rows by `signal_start`. Only rows with both a signal and a
    /// numeric `perf_pct` are counted.
    pub fn from_rows(rows: &[BacktestRow]) -> Self {
        let mut summary = SignalSummary::default();
        for row in rows {
            if let (Some(signal), Some(perf)) = (row.signal_start, row.perf_pct) {
                summary.group_mut(signal).add(perf);
            }
        }
        summary
    }

    pub fn group(&self, signal: Signal) -> &SummaryGroup {
        match signal {
            Signal::Buy => &self.buy,
            Signal::Hold => &self.hold,
            Signal::Sell => &self.sell,
        }
    }

    fn group_mut(&mut self, signal: Signal) -> &mut SummaryGroup {
        match signal {
            Signal::Buy => &mut self.buy,
            Signal::Hold => &mut self.hold,
            Signal::Sell => &mut self.sell,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn row(ticker: &str, signal: Option<Signal>, perf: Option<f64>) -> BacktestRow {
        BacktestRow {
            signal_start: signal,
            ..BacktestRow::with_perf(ticker, perf)
        }
    }

    fn tickers(rows: &[BacktestRow]) -> Vec<&str> {
        rows.iter().map(|r| r.ticker.as_str()).collect()
    }

    #[test]
    fn missing_perf_sorts_last() {
        let mut rows = vec![
            row("C", None, None),
            row("B", None, Some(-2.0)),
            row("A", None, Some(5.0)),
        ];
        sort_by_performance(&mut rows);
        assert_eq!(tickers(&rows), vec!["A", "B", "C"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let mut rows = vec![
            row("X", None, Some(1.0)),
            row("Y", None, Some(1.0)),
            row("N1", None, None),
            row("N2", None, None),
        ];
        sort_by_performance(&mut rows);
        assert_eq!(tickers(&rows), vec!["X", "Y", "N1", "N2"]);
    }

    #[test]
    fn summary_averages_per_signal() {
        let rows = vec![
            row("A", Some(Signal::Buy), Some(10.0)),
            row("B", Some(Signal::Buy), Some(-4.0)),
            row("C", Some(Signal::Sell), Some(2.5)),
            row("D", Some(Signal::Sell), None),
            row("E", None, Some(99.0)),
        ];
        let s = SignalSummary::from_rows(&rows);
        assert_eq!(s.buy.count, 2);
        assert_eq!(s.buy.average(), Some(3.0));
        assert_eq!(s.sell.count, 1);
        assert_eq!(s.sell.average(), Some(2.5));
        assert_eq!(s.hold.count, 0);
        assert_eq!(s.hold.average(), None);
    }

    fn arb_signal() -> impl Strategy<Value = Option<Signal>> {
        prop_oneof![
            Just(None),
            Just(Some(Signal::Buy)),
            Just(Some(Signal::Hold)),
            Just(Some(Signal::Sell)),
        ]
    }

    proptest! {
        #[test]
        fn sort_is_descending_with_missing_after_present(
            perfs in proptest::collection::vec(proptest::option::of(-100.0..100.0_f64), 0..30),
        ) {
            let mut rows: Vec<BacktestRow> = perfs
                .iter()
                .enumerate()
                .map(|(i, p)| row(&i.to_string(), None, *p))
                .collect();
            sort_by_performance(&mut rows);

            let first_missing = rows.iter().position(|r| r.perf_pct.is_none()).unwrap_or(rows.len());
            prop_assert!(rows[first_missing..].iter().all(|r| r.perf_pct.is_none()));
            for w in rows[..first_missing].windows(2) {
                prop_assert!(w[0].perf_pct >= w[1].perf_pct);
            }
        }

        #[test]
        fn summary_mean_matches_matching_rows(
            items in proptest::collection::vec((arb_signal(), proptest::option::of(-50.0..50.0_f64)), 0..40),
        ) {
            let rows: Vec<BacktestRow> = items
                .iter()
                .enumerate()
                .map(|(i, (s, p))| row(&i.to_string(), *s, *p))
                .collect();
            let summary = SignalSummary::from_rows(&rows);
            for signal in Signal::ALL {
                let perfs: Vec<f64> = rows
                    .iter()
                    .filter(|r| r.signal_start == Some(signal))
                    .filter_map(|r| r.perf_pct)
                    .collect();
                let group = summary.group(signal);
                prop_assert_eq!(group.count, perfs.len());
                match group.average() {
                    None => prop_assert!(perfs.is_empty()),
                    Some(avg) => {
                        let expected = perfs.iter().sum::<f64>() / perfs.len() as f64;
                        prop_assert!((avg - expected).abs() < 1e-9);
                    }
                }
            }
        }
    }
}
