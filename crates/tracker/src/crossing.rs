//! Crossing detection: which regions did a move from `last` to `current` cross,
//! and in what order would a continuous sweep have crossed them?
//!
//! # Algorithm
//!
//! 1. **Classify** every region (no short-circuit; backwards moves can cross
//!    regions anywhere in the list) as Skip, Enter, Exit, or untouched.
//! 2. **Key** each event by the boundary it crosses, nudged by a tiny epsilon
//!    so an Exit sorts before an Enter on a shared forward boundary.
//! 3. **Negate** the keys when moving backwards, so boundaries are visited
//!    from high to low.
//! 4. **Stable sort** ascending; ties keep region order.

use regionwatch_region_model::{Region, TransitionEvent, TransitionKind};

/// Tie-break nudge applied to Exit (`-`) and Enter (`+`) sort keys.
pub const ORDER_EPSILON: f64 = 5e-10;

/// Classify how a move from `last` to `current` crosses `region`, if at all.
///
/// Skip is checked first and excludes Enter/Exit. NaN positions never match.
pub fn classify(region: &Region, last: f64, current: f64) -> Option<TransitionKind> {
    let in_point = region.in_point();
    let out_point = region.out_point();

    // Jumped clean over the region, or landed on a point region.
    let jumped_over =
        (last < in_point && current > out_point) || (last > out_point && current < in_point);
    let landed_on_point = region.is_point() && current == in_point && last != current;

    if jumped_over || landed_on_point {
        Some(TransitionKind::Skip)
    } else if region.contains(current) && (last < in_point || last >= out_point) {
        Some(TransitionKind::Enter)
    } else if region.contains(last) && (current < in_point || current >= out_point) {
        Some(TransitionKind::Exit)
    } else {
        None
    }
}

/// Sort key placing an event where a continuous sweep would meet it.
pub fn sweep_key(kind: TransitionKind, region: &Region, backwards: bool) -> f64 {
    let key = match kind {
        TransitionKind::Exit => {
            let boundary = if backwards {
                region.in_point()
            } else {
                region.out_point()
            };
            boundary - ORDER_EPSILON
        }
        TransitionKind::Skip => region.in_point(),
        TransitionKind::Enter => {
            let boundary = if backwards {
                region.out_point()
            } else {
                region.in_point()
            };
            boundary + ORDER_EPSILON
        }
    };

    if backwards {
        -key
    } else {
        key
    }
}

/// Every transition caused by moving from `last` to `current`, in sweep order.
pub fn collect_transitions(regions: &[Region], last: f64, current: f64) -> Vec<TransitionEvent> {
    let backwards = last > current;

    let mut keyed: Vec<(f64, TransitionEvent)> = regions
        .iter()
        .filter_map(|region| {
            classify(region, last, current).map(|kind| {
                (
                    sweep_key(kind, region, backwards),
                    TransitionEvent::new(kind, region.clone(), last, current),
                )
            })
        })
        .collect();

    // `sort_by` is stable, so equal keys keep region order.
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    keyed.into_iter().map(|(_, event)| event).collect()
}
