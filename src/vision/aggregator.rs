//! Reduction of a detection batch into a single [`TargetState`].
//!
//! The aggregator is pure: every call looks only at the batch it is given.
//! Nothing seen in an earlier frame can leak into the result, so a target
//! that leaves the image is reported absent on the very next frame.

use log::{trace, warn};

use super::{detection::RawDetection, target::TargetState};

fn matches_filter(det: &RawDetection, filter_identity: Option<i32>) -> bool {
    match filter_identity {
        Some(id) => det.identity == Some(id),
        None => true,
    }
}

/// Repairs out-of-range measurements.
///
/// Only a NaN bearing makes a detection unusable. Bearing is clamped to
/// `[-180, 180]`, area to `[0, 1]` with NaN as `0`, and a non-finite
/// elevation becomes `0`.
fn sanitize_detection(det: &RawDetection) -> Option<RawDetection> {
    if det.bearing_deg.is_nan() {
        warn!("Discarding detection {:?} with NaN bearing", det.identity);
        return None;
    }

    let mut clean = *det;
    if !(-180.0..=180.0).contains(&clean.bearing_deg) {
        warn!("Clamping detection bearing {} to [-180, 180]", clean.bearing_deg);
        clean.bearing_deg = clean.bearing_deg.clamp(-180.0, 180.0);
    }
    if clean.area.is_nan() {
        warn!("Treating NaN detection area as 0");
        clean.area = 0.0;
    } else if !(0.0..=1.0).contains(&clean.area) {
        warn!("Clamping detection area {} to [0, 1]", clean.area);
        clean.area = clean.area.clamp(0.0, 1.0);
    }
    if !clean.elevation_deg.is_finite() {
        warn!("Treating non-finite elevation {} as 0", clean.elevation_deg);
        clean.elevation_deg = 0.0;
    }
    Some(clean)
}

fn get_candidates(batch: &[RawDetection], filter_identity: Option<i32>) -> Vec<RawDetection> {
    batch
        .iter()
        .filter(|det| matches_filter(det, filter_identity))
        .filter_map(sanitize_detection)
        .collect()
}

// Tagged detections sort before untagged ones, lower IDs first.
fn identity_rank(det: &RawDetection) -> (u8, i32) {
    match det.identity {
        Some(id) => (0, id),
        None => (1, 0),
    }
}

/// Returns `true` if `a` should be picked over `b`.
///
/// Larger area wins. Equal areas fall back to the lower identity. Full ties
/// keep the incumbent so the earlier detection in the batch is chosen.
fn outranks(a: &RawDetection, b: &RawDetection) -> bool {
    if a.area != b.area {
        return a.area > b.area;
    }
    identity_rank(a) < identity_rank(b)
}

fn get_best(candidates: &[RawDetection]) -> Option<&RawDetection> {
    let mut best: Option<&RawDetection> = None;
    for det in candidates {
        match best {
            Some(current) if !outranks(det, current) => {}
            _ => best = Some(det),
        }
    }
    best
}

/// Aggregates one frame's detections into a [`TargetState`].
///
/// Detections whose identity does not match `filter_identity` are discarded
/// first, so other tags in view never affect a tag-specific pursuit. Among
/// the remaining detections the one with the largest area is selected.
///
/// # Arguments
///
/// * `batch` - Every detection of the current frame. May be empty and may
///   contain the same identity more than once.
/// * `filter_identity` - Restricts aggregation to one tag ID. `None` accepts
///   any detection.
///
/// # Returns
///
/// The selected target, or [`TargetState::absent`] if nothing matched.
pub fn aggregate(batch: &[RawDetection], filter_identity: Option<i32>) -> TargetState {
    let candidates = get_candidates(batch, filter_identity);
    match get_best(&candidates) {
        Some(best) => {
            trace!(
                "Selected target {:?} out of {} candidates",
                best.identity,
                candidates.len()
            );
            TargetState::from_detection(best, candidates.len())
        }
        None => TargetState::absent(),
    }
}
