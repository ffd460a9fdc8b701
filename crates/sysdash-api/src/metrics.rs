//! Prometheus registry served on `/metrics`.
use prometheus::{Encoder, Histogram, HistogramOpts, IntCounterVec, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct ReportMetrics {
    registry: Registry,
    reports_total: IntCounterVec,
    report_duration: Histogram,
}

impl ReportMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let reports_total = IntCounterVec::new(
            Opts::new("sysdash_reports_total", "Systems status reports built"),
            &["status"],
        )?;
        let report_duration = Histogram::with_opts(HistogramOpts::new(
            "sysdash_report_duration_seconds",
            "Time to assemble one systems status report",
        ))?;

        registry.register(Box::new(reports_total.clone()))?;
        registry.register(Box::new(report_duration.clone()))?;

        Ok(Self {
            registry,
            reports_total,
            report_duration,
        })
    }

    pub fn observe(&self, ok: bool, seconds: f64) {
        let status = if ok { "ok" } else { "failed" };
        self.reports_total.with_label_values(&[status]).inc();
        self.report_duration.observe(seconds);
    }

    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observe_and_encode() {
        let metrics = ReportMetrics::new().unwrap();
        metrics.observe(true, 0.01);
        metrics.observe(false, 0.02);

        let text = metrics.encode().unwrap();
        assert!(text.contains("sysdash_reports_total{status=\"ok\"} 1"));
        assert!(text.contains("sysdash_reports_total{status=\"failed\"} 1"));
        assert!(text.contains("sysdash_report_duration_seconds_count 2"));
    }
}
