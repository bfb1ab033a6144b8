//! Reading progress rules.
//!
//! Readers report progress as a percentage of a chapter. Saves are throttled
//! so a reader scrolling through a chapter does not produce a write per
//! scroll event.

/// Minimum change in percentage points before a new value is persisted.
pub const PROGRESS_SAVE_STEP: f64 = 5.0;

pub const MIN_PROGRESS: f64 = 0.0;
pub const MAX_PROGRESS: f64 = 100.0;

/// Validate that a percentage is finite and within `0..=100`.
pub fn validate_progress(percent: f64) -> Result<(), String> {
    if !percent.is_finite() || !(MIN_PROGRESS..=MAX_PROGRESS).contains(&percent) {
        return Err(format!(
            "progress_percent must be between {MIN_PROGRESS} and {MAX_PROGRESS}, got {percent}"
        ));
    }
    Ok(())
}

/// Decide whether `current` should overwrite the stored value.
///
/// The first report is always saved, as is reaching the end of the chapter.
/// Otherwise the value must differ from the stored one by at least
/// [`PROGRESS_SAVE_STEP`] in either direction.
pub fn should_persist(stored: Option<f64>, current: f64) -> bool {
    match stored {
        None => true,
        Some(prev) if current >= MAX_PROGRESS => prev < MAX_PROGRESS,
        Some(prev) => (current - prev).abs() >= PROGRESS_SAVE_STEP,
    }
}
