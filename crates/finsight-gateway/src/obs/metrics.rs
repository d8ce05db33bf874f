//! Minimal metrics registry for the service.
//!
//! Counter/gauge/histogram types with dynamic labels backed by `DashMap`.
//! Labels are flattened into sorted key vectors to keep deterministic
//! ordering. Histogram buckets are fixed in microseconds.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};
use std::time::Duration;

type LabelKey = Vec<(String, String)>;

fn label_key(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// `k="v",k2="v2"` (no braces).
fn label_body(key: &LabelKey) -> String {
    key.iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

/// `{k="v"}`, or nothing for an unlabelled series.
fn label_set(key: &LabelKey) -> String {
    if key.is_empty() {
        String::new()
    } else {
        format!("{{{}}}", label_body(key))
    }
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self.map.entry(label_key(labels)).or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value for an exact label set; 0 if never touched.
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} counter", name);
        for r in self.map.iter() {
            let val = r.value().load(Ordering::Relaxed);
            let _ = writeln!(out, "{}{} {}", name, label_set(r.key()), val);
        }
    }
}

#[derive(Default)]
pub struct GaugeVec {
    map: DashMap<LabelKey, AtomicI64>,
}

impl GaugeVec {
    pub fn inc(&self, labels: &[(&str, &str)]) { self.add(labels, 1); }
    pub fn dec(&self, labels: &[(&str, &str)]) { self.add(labels, -1); }

    pub fn add(&self, labels: &[(&str, &str)], v: i64) {
        let gauge = self.map.entry(label_key(labels)).or_insert_with(|| AtomicI64::new(0));
        gauge.fetch_add(v, Ordering::Relaxed);
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} gauge", name);
        for r in self.map.iter() {
            let val = r.value().load(Ordering::Relaxed);
            let _ = writeln!(out, "{}{} {}", name, label_set(r.key()), val);
        }
    }
}

// 1ms, 5ms, 10ms, 50ms, 100ms, 250ms, 500ms, 1s, 5s
const BUCKETS_MICROS: [u64; 9] = [
    1_000, 5_000, 10_000, 50_000, 100_000, 250_000, 500_000, 1_000_000, 5_000_000,
];

#[derive(Default)]
struct AtomicHistogram {
    count: AtomicU64,
    sum: AtomicU64,
    buckets: [AtomicU64; 9],
}

#[derive(Default)]
pub struct HistogramVec {
    map: DashMap<LabelKey, AtomicHistogram>,
}

impl HistogramVec {
    /// Observe a duration into cumulative buckets (microsecond scale).
    pub fn observe(&self, labels: &[(&str, &str)], duration: Duration) {
        let hist = self.map.entry(label_key(labels)).or_default();
        let micros = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);

        hist.count.fetch_add(1, Ordering::Relaxed);
        hist.sum.fetch_add(micros, Ordering::Relaxed);
        for (i, &b) in BUCKETS_MICROS.iter().enumerate() {
            if micros <= b {
                hist.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} histogram", name);
        for r in self.map.iter() {
            let key = r.key();
            let hist = r.value();

            let body = label_body(key);
            let prefix = if body.is_empty() { String::new() } else { format!("{},", body) };

            for (i, &le) in BUCKETS_MICROS.iter().enumerate() {
                let count = hist.buckets[i].load(Ordering::Relaxed);
                let _ = writeln!(out, "{}_bucket{{{}le=\"{}\"}} {}", name, prefix, le, count);
            }
            let count = hist.count.load(Ordering::Relaxed);
            let _ = writeln!(out, "{}_bucket{{{}le=\"+Inf\"}} {}", name, prefix, count);

            let sum = hist.sum.load(Ordering::Relaxed);
            let _ = writeln!(out, "{}_sum{} {}", name, label_set(key), sum);
            let _ = writeln!(out, "{}_count{} {}", name, label_set(key), count);
        }
    }
}

#[derive(Default)]
pub struct ServiceMetrics {
    pub http_requests: CounterVec,
    pub requests_in_flight: GaugeVec,
    pub handler_duration: HistogramVec, // microseconds
    pub records_loaded: CounterVec,
    pub records_skipped: CounterVec,
    pub load_errors: CounterVec,
    pub charts_rendered: CounterVec,
    draining: AtomicBool,
}

impl ServiceMetrics {
    pub fn set_draining(&self) { self.draining.store(true, Ordering::Relaxed); }
    pub fn is_draining(&self) -> bool { self.draining.load(Ordering::Relaxed) }

    /// Render all registered metrics plus any extra lines provided by callers.
    pub fn render(&self, extra: &[(&str, u64)]) -> String {
        let mut out = String::new();
        self.http_requests.render("finsight_http_requests_total", &mut out);
        self.requests_in_flight.render("finsight_requests_in_flight", &mut out);
        self.handler_duration.render("finsight_handler_duration_micros", &mut out);
        self.records_loaded.render("finsight_records_loaded_total", &mut out);
        self.records_skipped.render("finsight_records_skipped_total", &mut out);
        self.load_errors.render("finsight_load_errors_total", &mut out);
        self.charts_rendered.render("finsight_charts_rendered_total", &mut out);

        let _ = writeln!(
            out,
            "# TYPE finsight_draining gauge\nfinsight_draining {}",
            u8::from(self.is_draining())
        );
        for (k, v) in extra { let _ = writeln!(out, "{} {}", k, v); }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_labelled_and_bare_series() {
        let m = ServiceMetrics::default();
        m.http_requests.inc(&[("status", "200"), ("route", "/heatmap")]);
        m.http_requests.inc(&[("route", "/heatmap"), ("status", "200")]);
        m.records_loaded.add(&[], 42);
        m.handler_duration.observe(&[("route", "/heatmap")], Duration::from_millis(3));

        let out = m.render(&[("finsight_uptime_seconds", 7)]);
        assert!(out.contains("finsight_http_requests_total{route=\"/heatmap\",status=\"200\"} 2"));
        assert!(out.contains("finsight_records_loaded_total 42"));
        assert!(out.contains("finsight_handler_duration_micros_bucket{route=\"/heatmap\",le=\"1000\"} 0"));
        assert!(out.contains("finsight_handler_duration_micros_bucket{route=\"/heatmap\",le=\"5000\"} 1"));
        assert!(out.contains("finsight_handler_duration_micros_count{route=\"/heatmap\"} 1"));
        assert!(out.contains("finsight_draining 0"));
        assert!(out.contains("finsight_uptime_seconds 7"));
    }

    #[test]
    fn counter_get_is_label_order_insensitive() {
        let c = CounterVec::default();
        c.add(&[("a", "1"), ("b", "2")], 3);
        assert_eq!(c.get(&[("b", "2"), ("a", "1")]), 3);
        assert_eq!(c.get(&[("a", "9")]), 0);
    }
}
