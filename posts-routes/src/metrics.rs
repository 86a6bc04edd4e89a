const POSTS_RETRIEVED_METRIC_NAME: &str = "posts_retrieved";
const POSTS_CREATED_METRIC_NAME: &str = "num_posts_created";
const POSTS_UPDATED_METRIC_NAME: &str = "num_posts_updated";
const POSTS_DELETED_METRIC_NAME: &str = "num_posts_deleted";

#[inline]
pub fn increment_posts_retrieved_by(amt: usize) {
    metrics::counter!(POSTS_RETRIEVED_METRIC_NAME).increment(amt as u64);
}

#[inline]
pub fn increment_posts_created() {
    metrics::counter!(POSTS_CREATED_METRIC_NAME).increment(1);
}

#[inline]
pub fn increment_posts_updated() {
    metrics::counter!(POSTS_UPDATED_METRIC_NAME).increment(1);
}

#[inline]
pub fn increment_posts_deleted() {
    metrics::counter!(POSTS_DELETED_METRIC_NAME).increment(1);
}
