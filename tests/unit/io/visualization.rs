//! Tests for fill capture and GIF generation

#[cfg(test)]
mod tests {
    use chromatile::Result;
    use chromatile::analysis::target::TargetColorMatrix;
    use chromatile::io::visualization::{FillEvent, VisualizationCapture};
    use chromatile::math::color::Rgb;
    use chromatile::spatial::cell::{Assignment, SourceRef};

    fn assignment(row: usize, col: usize) -> Assignment {
        Assignment {
            row,
            col,
            source: SourceRef::new("tile"),
            color: Rgb::new(200, 10, 10),
        }
    }

    // Tests events are recorded in arrival order
    #[test]
    fn test_record_events() {
        let mut capture = VisualizationCapture::new(TargetColorMatrix::uniform(2, Rgb::WHITE));
        capture.record(&assignment(1, 0));
        capture.record(&assignment(0, 1));

        assert_eq!(capture.event_count(), 2);
        assert_eq!(
            capture.events().first(),
            Some(&FillEvent {
                row: 1,
                col: 0,
                color: Rgb::new(200, 10, 10)
            })
        );
    }

    // Tests exporting without events fails
    #[test]
    fn test_export_requires_events() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let capture = VisualizationCapture::new(TargetColorMatrix::uniform(2, Rgb::WHITE));
        assert!(capture.export_gif(&dir.path().join("fill.gif"), 5).is_err());
        Ok(())
    }

    // Tests a GIF file is produced for captured fills
    #[test]
    fn test_export_gif() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join("fill.gif");

        let mut capture = VisualizationCapture::new(TargetColorMatrix::uniform(3, Rgb::BLACK));
        for row in 0..3 {
            for col in 0..3 {
                capture.record(&assignment(row, col));
            }
        }
        capture.export_gif(&path, 5)?;

        let size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
        assert!(size > 0);
        Ok(())
    }
}
