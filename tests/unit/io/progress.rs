//! Tests for the cell progress bar

#[cfg(test)]
mod tests {
    use chromatile::algorithm::completion::FillProgress;
    use chromatile::algorithm::scheduler::{FillState, RunSummary};
    use chromatile::io::progress::ProgressManager;
    use chromatile::math::color::Rgb;
    use chromatile::spatial::cell::{Assignment, SourceRef};
    use std::time::Duration;

    fn assignment() -> Assignment {
        Assignment {
            row: 1,
            col: 2,
            source: SourceRef::new("s"),
            color: Rgb::BLACK,
        }
    }

    // Tests each observed assignment advances the bar
    #[test]
    fn test_observe_advances() {
        let progress = ProgressManager::hidden(FillProgress {
            filled: 2,
            total: 9,
        });
        assert_eq!(progress.position(), 2);

        progress.observe(&assignment());
        progress.observe(&assignment());
        assert_eq!(progress.position(), 4);
    }

    // Tests the message names the latest filled cell
    #[test]
    fn test_observe_reports_cell() {
        let progress = ProgressManager::new(
            "target.png",
            FillProgress {
                filled: 0,
                total: 9,
            },
        );
        progress.observe(&assignment());
        assert_eq!(progress.message(), "target.png (1, 2)");
    }

    fn summary(state: FillState, filled: usize) -> RunSummary {
        RunSummary {
            state,
            elapsed: Duration::from_millis(5),
            ticks: 3,
            dispatched: 3,
            acquisition_failures: 0,
            reduction_failures: 0,
            unmatched: 0,
            discarded: 0,
            assignments: filled,
            progress: FillProgress { filled, total: 4 },
        }
    }

    // Tests a complete run fills the bar
    #[test]
    fn test_finish_complete() {
        let progress = ProgressManager::new(
            "target.png",
            FillProgress {
                filled: 0,
                total: 4,
            },
        );
        progress.finish(&summary(FillState::Complete, 4));
        assert_eq!(progress.position(), 4);
        assert!(progress.message().contains("complete"));
    }

    // Tests a stopped run keeps the bar at the final fill level
    #[test]
    fn test_finish_uses_summary() {
        let progress = ProgressManager::new(
            "target.png",
            FillProgress {
                filled: 0,
                total: 4,
            },
        );
        progress.finish(&summary(FillState::Stopped, 3));
        assert_eq!(progress.position(), 3);
        assert!(progress.message().contains("1 cells left"));
    }
}
