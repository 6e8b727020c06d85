//! Accordion fold markers for fan-fold tape

/// Whether a drawing carries fold markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoldPolicy {
    /// A marker every `fold_period` frames, starting at the first frame
    Periodic,
    Off,
}

impl FoldPolicy {
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled {
            FoldPolicy::Periodic
        } else {
            FoldPolicy::Off
        }
    }

    /// Slice offsets (0-based, relative to the first drawn frame) whose
    /// leading boundary gets a fold marker.
    pub fn offsets(self, frame_count: usize, period: usize) -> impl Iterator<Item = usize> {
        let count = match self {
            FoldPolicy::Periodic if period > 0 => frame_count.div_ceil(period),
            _ => 0,
        };
        (0..count).map(move |i| i * period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_hundred_frames_fold_three_times() {
        let offsets: Vec<_> = FoldPolicy::Periodic.offsets(200, 85).collect();
        assert_eq!(offsets, vec![0, 85, 170]);
    }

    #[test]
    fn fold_on_exact_period_boundary() {
        assert_eq!(FoldPolicy::Periodic.offsets(85, 85).collect::<Vec<_>>(), vec![0]);
        assert_eq!(FoldPolicy::Periodic.offsets(86, 85).collect::<Vec<_>>(), vec![0, 85]);
        assert_eq!(FoldPolicy::Periodic.offsets(1, 85).collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn off_draws_nothing() {
        assert_eq!(FoldPolicy::Off.offsets(500, 85).count(), 0);
        assert_eq!(FoldPolicy::from_enabled(false), FoldPolicy::Off);
        assert_eq!(FoldPolicy::from_enabled(true), FoldPolicy::Periodic);
    }

    #[test]
    fn zero_period_draws_nothing() {
        assert_eq!(FoldPolicy::Periodic.offsets(10, 0).count(), 0);
    }
}
