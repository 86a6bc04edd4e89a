const REPORTS_RETRIEVED_METRIC_NAME: &str = "reports_retrieved";
const REPORTS_CREATED_METRIC_NAME: &str = "num_reports_created";
const REPORTS_UPDATED_METRIC_NAME: &str = "num_reports_updated";
const REPORTS_DELETED_METRIC_NAME: &str = "num_reports_deleted";
const REPORTS_REJECTED_METRIC_NAME: &str = "num_reports_rejected";

#[inline]
pub fn increment_reports_retrieved_by(amt: usize) {
    metrics::counter!(REPORTS_RETRIEVED_METRIC_NAME).increment(amt as u64);
}

#[inline]
pub fn increment_reports_created() {
    metrics::counter!(REPORTS_CREATED_METRIC_NAME).increment(1);
}

#[inline]
pub fn increment_reports_updated() {
    metrics::counter!(REPORTS_UPDATED_METRIC_NAME).increment(1);
}

#[inline]
pub fn increment_reports_deleted() {
    metrics::counter!(REPORTS_DELETED_METRIC_NAME).increment(1);
}

/// Counts reports turned away by validation, labelled with the first empty field.
#[inline]
pub fn increment_reports_rejected(field: &'static str) {
    metrics::counter!(REPORTS_REJECTED_METRIC_NAME, "field" => field).increment(1);
}
