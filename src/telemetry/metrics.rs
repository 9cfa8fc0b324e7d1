//! Prometheus metrics

use std::time::Duration;

/// Latency metric types
#[derive(Debug, Clone, Copy)]
pub enum LatencyMetric {
    /// Target page fetch
    PageFetch,
    /// Structured completion call
    Completion,
    /// Hero image or icon generation call
    ImageGeneration,
}

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Drafts returned to a caller
    DraftsGenerated,
    /// Pipeline runs that ended in a failure envelope
    PipelineFailures,
    /// Image or icon requests that failed and were skipped
    ImageFallbacks,
}

impl LatencyMetric {
    fn name(self) -> &'static str {
        match self {
            LatencyMetric::PageFetch => "quickbet_page_fetch_latency_ms",
            LatencyMetric::Completion => "quickbet_completion_latency_ms",
            LatencyMetric::ImageGeneration => "quickbet_image_generation_latency_ms",
        }
    }
}

impl CounterMetric {
    fn name(self) -> &'static str {
        match self {
            CounterMetric::DraftsGenerated => "quickbet_drafts_generated_total",
            CounterMetric::PipelineFailures => "quickbet_pipeline_failures_total",
            CounterMetric::ImageFallbacks => "quickbet_image_fallbacks_total",
        }
    }
}

/// Record a latency measurement
pub fn record_latency(metric: LatencyMetric, duration: Duration) {
    let metric_name = metric.name();
    let value_ms = duration.as_secs_f64() * 1000.0;

    ::metrics::histogram!(metric_name).record(value_ms);
    tracing::debug!(metric = metric_name, value_ms, "Recording latency");
}

/// Increment a counter
pub fn increment(metric: CounterMetric) {
    ::metrics::counter!(metric.name()).increment(1);
}
