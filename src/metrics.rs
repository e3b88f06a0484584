//! Stage counters recorded through the `metrics` facade.
//!
//! Every counter carries a `stage` label with the configured stage name.

use ::metrics::counter;

pub(crate) fn record_emitted(stage: &str) {
    counter!("pipefeed_items_emitted_total", "stage" => stage.to_string()).increment(1);
}

pub(crate) fn record_failed(stage: &str) {
    counter!("pipefeed_items_failed_total", "stage" => stage.to_string()).increment(1);
}

pub(crate) fn record_forwarded(stage: &str) {
    counter!("pipefeed_items_forwarded_total", "stage" => stage.to_string()).increment(1);
}

pub(crate) fn record_skipped(stage: &str) {
    counter!("pipefeed_items_skipped_total", "stage" => stage.to_string()).increment(1);
}

pub(crate) fn record_setup_failure(stage: &str) {
    counter!("pipefeed_setup_failures_total", "stage" => stage.to_string()).increment(1);
}
