//! Sweep direction analysis.
//!
//! The instrument sweeps frequency monotonically in one direction, reaches a
//! turning point, then sweeps back over an overlapping range. Downstream
//! consumers want only the non-overlapping tail beyond the turning point,
//! so the decoder records the last index before the direction change.

/// Shape of a frequency sweep: initial direction and trimming point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SweepShape {
    /// Whether the sweep starts ascending (sample 0 to sample 1).
    pub first_up: bool,
    /// Index of the last sample before the detected reversal. `None` when
    /// the sweep never changes direction.
    pub reverse_index: Option<usize>,
}

/// Scan a frequency sequence for the first direction change.
///
/// Sequences shorter than two samples have no direction; they report
/// `first_up = false` and no reversal, so all views stay untrimmed.
pub(crate) fn analyze(frequency: &[f64]) -> SweepShape {
    if frequency.len() < 2 {
        return SweepShape {
            first_up: false,
            reverse_index: None,
        };
    }

    let first_up = frequency[0] < frequency[1];
    let mut previous = frequency[0];
    for (i, &current) in frequency.iter().enumerate() {
        let turned = if first_up {
            previous > current
        } else {
            previous < current
        };
        if turned {
            // `i` is never 0 here: the first comparison sees previous ==
            // frequency[0] and both checks are strict.
            return SweepShape {
                first_up,
                reverse_index: i.checked_sub(1),
            };
        }
        previous = current;
    }

    SweepShape {
        first_up,
        reverse_index: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascending_sweep_with_return() {
        let shape = analyze(&[1.0, 2.0, 3.0, 2.0]);
        assert!(shape.first_up);
        assert_eq!(shape.reverse_index, Some(2));
    }

    #[test]
    fn descending_sweep_with_return() {
        let shape = analyze(&[1000.0, 100.0, 10.0, 100.0, 1000.0]);
        assert!(!shape.first_up);
        assert_eq!(shape.reverse_index, Some(2));
    }

    #[test]
    fn monotonic_sweep_has_no_reversal() {
        let shape = analyze(&[1.0, 2.0, 4.0, 8.0]);
        assert!(shape.first_up);
        assert_eq!(shape.reverse_index, None);
    }

    #[test]
    fn plateau_does_not_count_as_a_reversal() {
        // Equal neighbours are not a strict direction change.
        let shape = analyze(&[1.0, 2.0, 2.0, 3.0]);
        assert!(shape.first_up);
        assert_eq!(shape.reverse_index, None);
    }

    #[test]
    fn immediate_turn_after_first_step() {
        let shape = analyze(&[1.0, 2.0, 1.5]);
        assert!(shape.first_up);
        assert_eq!(shape.reverse_index, Some(1));
    }

    #[test]
    fn single_sample_has_no_direction() {
        let shape = analyze(&[42.0]);
        assert!(!shape.first_up);
        assert_eq!(shape.reverse_index, None);
    }
}
