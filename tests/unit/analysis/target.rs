//! Tests for target color matrix extraction

#[cfg(test)]
mod tests {
    use chromatile::Result;
    use chromatile::analysis::target::TargetColorMatrix;
    use chromatile::io::error::FailureKind;
    use chromatile::math::color::Rgb;
    use image::RgbImage;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const GREEN: Rgb = Rgb::new(0, 255, 0);
    const BLUE: Rgb = Rgb::new(0, 0, 255);

    fn quadrants() -> RgbImage {
        RgbImage::from_fn(8, 8, |x, y| match (x < 4, y < 4) {
            (true, true) => RED.into(),
            (false, true) => GREEN.into(),
            (true, false) => BLUE.into(),
            (false, false) => Rgb::WHITE.into(),
        })
    }

    // Tests each quadrant lands in its matrix cell
    #[test]
    fn test_extract_quadrants() -> Result<()> {
        let matrix = TargetColorMatrix::extract(&quadrants(), 2)?;

        assert_eq!(matrix.size(), 2);
        assert_eq!(matrix.get(0, 0), Some(RED));
        assert_eq!(matrix.get(0, 1), Some(GREEN));
        assert_eq!(matrix.get(1, 0), Some(BLUE));
        assert_eq!(matrix.get(1, 1), Some(Rgb::WHITE));
        assert_eq!(matrix.get(2, 0), None);
        Ok(())
    }

    // Tests extraction is deterministic for a fixed image and size
    #[test]
    fn test_extract_deterministic() -> Result<()> {
        let image = RgbImage::from_fn(13, 9, |x, y| image::Rgb([(x * 19) as u8, (y * 23) as u8, 7]));
        let first = TargetColorMatrix::extract(&image, 5)?;
        let second = TargetColorMatrix::extract(&image, 5)?;
        assert_eq!(first, second);
        Ok(())
    }

    // Tests zero grid size and empty images are rejected
    #[test]
    fn test_extract_rejects_degenerate_inputs() {
        assert!(TargetColorMatrix::extract(&quadrants(), 0).is_err());
        assert!(TargetColorMatrix::extract(&RgbImage::new(0, 0), 3).is_err());
    }

    // Tests explicit rows must form a non-empty square
    #[test]
    fn test_from_rows_validation() -> Result<()> {
        let matrix = TargetColorMatrix::from_rows(&[vec![RED, BLUE], vec![GREEN, RED]])?;
        assert_eq!(matrix.get(1, 0), Some(GREEN));

        let ragged = TargetColorMatrix::from_rows(&[vec![RED, BLUE], vec![GREEN]]).err();
        assert!(ragged.is_some_and(|e| e.kind() == FailureKind::Configuration));

        assert!(TargetColorMatrix::from_rows(&[]).is_err());
        assert!(TargetColorMatrix::from_rows(&[vec![RED, BLUE]]).is_err());
        Ok(())
    }

    // Tests uniform matrices carry one color everywhere
    #[test]
    fn test_uniform() {
        let matrix = TargetColorMatrix::uniform(3, BLUE);
        assert_eq!(matrix.size(), 3);
        assert!(matrix.colors().iter().all(|&c| c == BLUE));
    }
}
