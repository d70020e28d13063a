//! Reading time estimation.

/// Assumed reading speed.
pub const WORDS_PER_MINUTE: usize = 200;

/// Number of whitespace-separated tokens in `body`.
pub fn word_count(body: &str) -> usize {
    body.split_whitespace().count()
}

/// `ceil(word_count / 200)` minutes; any non-empty body reads in at least one.
pub fn reading_time(body: &str) -> i32 {
    let minutes = word_count(body).div_ceil(WORDS_PER_MINUTE);
    i32::try_from(minutes).unwrap_or(i32::MAX)
}
