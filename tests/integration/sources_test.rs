//! Metric sources against fabricated and live proc trees

use crate::common::{fake_process, STAT_LINE};
use procmet::monitor::metrics::{CPU_PERCENT, FD, READ_BYTES, VM_RSS, VM_SIZE, WRITE_BYTES};
use procmet::monitor::{
    default_sources, Aggregator, CpuSource, FdSource, IoSource, MemorySource, MetricSource,
};
use procmet::{MetricValue, ProcmetError};
use std::fs;
use std::path::Path;

const PID: u32 = 4242;
const GONE: u32 = 999_999_999;

fn all_names() -> Vec<String> {
    [VM_SIZE, VM_RSS, FD, CPU_PERCENT, READ_BYTES, WRITE_BYTES]
        .iter()
        .map(|n| n.to_string())
        .collect()
}

#[test]
fn test_fake_tree_sample() {
    let root = tempfile::tempdir().unwrap();
    fake_process(root.path(), PID, 4, "205.00 400.00\n");

    let sources: Vec<Box<dyn MetricSource>> = vec![
        Box::new(MemorySource::new(root.path())),
        Box::new(FdSource::new(root.path())),
        Box::new(CpuSource::with_ticks_per_second(root.path(), 100)),
        Box::new(IoSource::new(root.path())),
    ];
    let sample = Aggregator::new(sources)
        .collect(&all_names(), PID)
        .unwrap()
        .unwrap();

    assert_eq!(sample.get(VM_SIZE), Some(&MetricValue::Count(8228)));
    assert_eq!(sample.get(VM_RSS), Some(&MetricValue::Count(936)));
    assert_eq!(sample.get(FD), Some(&MetricValue::Count(4)));
    // 150 ticks over 200 s of lifetime
    assert_eq!(sample.get(CPU_PERCENT), Some(&MetricValue::Percent(0.75)));
    assert_eq!(sample.get(READ_BYTES), Some(&MetricValue::Count(4096)));
    assert_eq!(sample.get(WRITE_BYTES), Some(&MetricValue::Count(0)));
}

#[test]
fn test_fake_tree_fresh_process_reports_zero_cpu() {
    let root = tempfile::tempdir().unwrap();
    // uptime equals the start time: no elapsed lifetime yet
    fake_process(root.path(), PID, 1, "5.00 10.00\n");

    let source = CpuSource::with_ticks_per_second(root.path(), 100);
    let sample = source.sample(PID).unwrap().unwrap();
    assert_eq!(sample.get(CPU_PERCENT), Some(&MetricValue::Percent(0.0)));
}

#[test]
fn test_fake_tree_missing_uptime_is_absent() {
    let root = tempfile::tempdir().unwrap();
    fake_process(root.path(), PID, 1, "1.0 1.0\n");
    fs::remove_file(root.path().join("uptime")).unwrap();

    let source = CpuSource::with_ticks_per_second(root.path(), 100);
    assert!(source.sample(PID).unwrap().is_none());
}

#[test]
fn test_fake_tree_process_vanishes() {
    let root = tempfile::tempdir().unwrap();
    fake_process(root.path(), PID, 2, "205.00 400.00\n");
    let aggregator = Aggregator::new(default_sources(root.path()));
    assert!(aggregator.collect(&all_names(), PID).unwrap().is_some());

    fs::remove_dir_all(root.path().join(PID.to_string())).unwrap();
    assert!(aggregator.collect(&all_names(), PID).unwrap().is_none());
}

#[test]
fn test_fake_tree_malformed_status_is_an_error() {
    let root = tempfile::tempdir().unwrap();
    fake_process(root.path(), PID, 1, "205.00 400.00\n");
    fs::write(
        root.path().join(PID.to_string()).join("status"),
        "VmSize:\t8228 pages\n",
    )
    .unwrap();

    let err = MemorySource::new(root.path()).sample(PID).unwrap_err();
    assert!(matches!(err, ProcmetError::Parse { .. }));
}

#[test]
fn test_fake_tree_non_utf8_name_still_sampled() {
    let root = tempfile::tempdir().unwrap();
    fake_process(root.path(), PID, 1, "205.00 400.00\n");
    fs::write(
        root.path().join(PID.to_string()).join("status"),
        b"Name:\tbad\xff\xfename\nVmSize:\t    8228 kB\nVmRSS:\t     936 kB\n",
    )
    .unwrap();

    let aggregator = Aggregator::new(default_sources(root.path()));
    let sample = aggregator
        .collect(&[VM_RSS.to_string()], PID)
        .unwrap()
        .unwrap();
    assert_eq!(sample.get(VM_RSS), Some(&MetricValue::Count(936)));
}

#[test]
fn test_fake_tree_stat_line_is_complete() {
    assert_eq!(STAT_LINE.split_whitespace().count(), 52);
}

#[test]
fn test_missing_process_every_source_absent() {
    let root = Path::new("/proc");
    for source in default_sources(root) {
        assert!(
            source.sample(GONE).unwrap().is_none(),
            "{} source returned data for a missing process",
            source.label()
        );
    }
    let aggregator = Aggregator::new(default_sources(root));
    assert!(aggregator.collect(&all_names(), GONE).unwrap().is_none());
}

#[test]
fn test_live_process_declared_names_present() {
    let pid = std::process::id();
    for source in default_sources(Path::new("/proc")) {
        let sample = source.sample(pid).unwrap();
        if source.label() == "io" && sample.is_none() {
            // restricted in some sandboxes
            continue;
        }
        let sample = sample.unwrap_or_else(|| panic!("{} source saw no data", source.label()));
        for name in source.names() {
            assert!(sample.contains(name), "{} missing {}", source.label(), name);
        }
    }
}

#[test]
fn test_live_process_values_are_plausible() {
    let pid = std::process::id();
    let sample = Aggregator::new(default_sources(Path::new("/proc")))
        .collect(&all_names(), pid)
        .unwrap()
        .unwrap();

    match sample.get(FD) {
        // stdin, stdout and stderr at least
        Some(MetricValue::Count(n)) => assert!(*n >= 3),
        other => panic!("unexpected fd value {other:?}"),
    }
    match (sample.get(VM_SIZE), sample.get(VM_RSS)) {
        (Some(MetricValue::Count(size)), Some(MetricValue::Count(rss))) => {
            assert!(size >= rss)
        }
        other => panic!("unexpected memory values {other:?}"),
    }
    match sample.get(CPU_PERCENT) {
        Some(MetricValue::Percent(p)) => assert!(*p >= 0.0),
        other => panic!("unexpected cpu value {other:?}"),
    }
}
