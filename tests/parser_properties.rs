//! Property tests for the benchmark log parser

mod common;

use std::collections::BTreeMap;

use common::block;
use proptest::prelude::*;
use spmv_report::parse_benchmark;

type Block = (u64, u64, u64, BTreeMap<String, f64>);

fn metric_value() -> impl Strategy<Value = f64> {
    // Six decimals, matching the benchmark's %f output
    (0u32..100_000_000).prop_map(|micros| f64::from(micros) / 1_000_000.0)
}

fn block_strategy() -> impl Strategy<Value = Block> {
    (
        1u64..100_000,
        1u64..100_000,
        1u64..512,
        prop::collection::btree_map("[a-z_][a-z0-9_]{0,12}", metric_value(), 1..6),
    )
}

fn render(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(|(rows, cols, processes, metrics)| {
            let metrics: Vec<(&str, f64)> =
                metrics.iter().map(|(k, v)| (k.as_str(), *v)).collect();
            block(*rows, *cols, *processes, &metrics)
        })
        .collect()
}

/// Header, metric, and arbitrary printable lines in any order.
const NOISY_LOG: &str = concat!(
    "(# Row: [0-9]{1,3} - Columns: [0-9]{1,3} - Processes: [0-9]{1,2}\n",
    "|[a-z]{1,6}: [0-9.]{1,6}\n",
    "|[ -~]{0,20}\n){0,30}",
);

proptest! {
    #[test]
    fn one_record_per_header_with_metrics(
        blocks in prop::collection::vec(block_strategy(), 0..20)
    ) {
        let dataset = parse_benchmark(&render(&blocks));
        prop_assert_eq!(dataset.len(), blocks.len());

        for (record, (rows, cols, processes, metrics)) in dataset.iter().zip(&blocks) {
            prop_assert_eq!(record.rows, *rows);
            prop_assert_eq!(record.cols, *cols);
            prop_assert_eq!(record.processes, *processes);
            prop_assert_eq!(record.metrics.len(), metrics.len());
            for (name, value) in metrics {
                let parsed = record.metric(name);
                prop_assert!(parsed.is_some());
                prop_assert!((parsed.unwrap_or_default() - value).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn bare_headers_keep_only_the_last(
        headers in prop::collection::vec((1u64..1000, 1u64..1000, 1u64..64), 1..10)
    ) {
        let text: String = headers
            .iter()
            .map(|(r, c, p)| block(*r, *c, *p, &[]))
            .collect();
        let dataset = parse_benchmark(&text);
        prop_assert_eq!(dataset.len(), 1);
        let (rows, cols, processes) = headers[headers.len() - 1];
        let record = &dataset.records()[0];
        prop_assert_eq!((record.rows, record.cols, record.processes), (rows, cols, processes));
    }

    #[test]
    fn parsing_is_deterministic(text in NOISY_LOG) {
        prop_assert_eq!(parse_benchmark(&text), parse_benchmark(&text));
    }
}
