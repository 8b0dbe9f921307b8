//! Tests for completion detection and progress snapshots

#[cfg(test)]
mod tests {
    use chromatile::Result;
    use chromatile::algorithm::completion::{FillProgress, is_complete};
    use chromatile::analysis::target::TargetColorMatrix;
    use chromatile::math::color::Rgb;
    use chromatile::spatial::cell::SourceRef;
    use chromatile::spatial::grid::MosaicGrid;

    // Tests completion flips only once the last cell fills
    #[test]
    fn test_is_complete() -> Result<()> {
        let mut grid = MosaicGrid::new(TargetColorMatrix::uniform(2, Rgb::WHITE));
        let source = SourceRef::new("s");

        grid.assign(0, 0, &source)?;
        grid.assign(0, 1, &source)?;
        grid.assign(1, 0, &source)?;
        assert!(!is_complete(&grid));

        grid.assign(1, 1, &source)?;
        assert!(is_complete(&grid));
        Ok(())
    }

    // Tests progress snapshot arithmetic
    #[test]
    fn test_progress_snapshot() -> Result<()> {
        let mut grid = MosaicGrid::new(TargetColorMatrix::uniform(2, Rgb::WHITE));
        grid.assign(1, 1, &SourceRef::new("s"))?;

        let progress = FillProgress::of(&grid);
        assert_eq!(progress, FillProgress { filled: 1, total: 4 });
        assert_eq!(progress.remaining(), 3);
        assert!(!progress.is_complete());
        assert!((progress.fraction() - 0.25).abs() < f64::EPSILON);
        Ok(())
    }

    // Tests an empty total counts as done
    #[test]
    fn test_empty_progress_is_complete() {
        let progress = FillProgress { filled: 0, total: 0 };
        assert!(progress.is_complete());
        assert!((progress.fraction() - 1.0).abs() < f64::EPSILON);
        assert_eq!(progress.remaining(), 0);
    }
}
