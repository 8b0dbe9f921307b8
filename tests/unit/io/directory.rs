//! Tests for the directory-backed candidate source

#[cfg(test)]
mod tests {
    use chromatile::Result;
    use chromatile::io::directory::{DirectorySource, is_image_path};
    use chromatile::io::error::FailureKind;
    use chromatile::io::source::CandidateSource;
    use image::RgbImage;
    use std::path::Path;

    fn write_png(dir: &Path, name: &str, rgb: [u8; 3]) -> Result<()> {
        let path = dir.join(name);
        RgbImage::from_pixel(4, 4, image::Rgb(rgb))
            .save(&path)
            .map_err(|e| chromatile::MosaicError::ImageExport { path, source: e })
    }

    // Tests extension matching is case-insensitive
    #[test]
    fn test_is_image_path() {
        assert!(is_image_path(Path::new("a/b.png")));
        assert!(is_image_path(Path::new("photo.JPEG")));
        assert!(!is_image_path(Path::new("notes.txt")));
        assert!(!is_image_path(Path::new("no_extension")));
    }

    // Tests only image files are indexed, in sorted order
    #[test]
    fn test_open_indexes_images() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write_png(dir.path(), "b.png", [0, 0, 255])?;
        write_png(dir.path(), "a.png", [255, 0, 0])?;
        std::fs::write(dir.path().join("readme.txt"), "not an image")?;
        std::fs::create_dir(dir.path().join("nested.png"))?;

        let source = DirectorySource::open(dir.path(), 1)?;
        let names: Vec<_> = source
            .files()
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.png", "b.png"]);
        assert_eq!(source.root(), dir.path());
        Ok(())
    }

    // Tests empty and missing directories are rejected
    #[test]
    fn test_open_rejects_unusable_directories() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let empty = DirectorySource::open(dir.path(), 1).err();
        assert!(empty.is_some_and(|e| e.kind() == FailureKind::Configuration));

        let missing = DirectorySource::open(dir.path().join("absent"), 1).err();
        assert!(missing.is_some_and(|e| e.kind() == FailureKind::Io));
        Ok(())
    }

    // Tests excluded files leave the pool
    #[test]
    fn test_exclude() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write_png(dir.path(), "a.png", [255, 0, 0])?;
        write_png(dir.path(), "b.png", [0, 0, 255])?;

        let mut source = DirectorySource::open(dir.path(), 1)?;
        source.exclude(&dir.path().join("a.png"));
        assert_eq!(source.files().len(), 1);
        assert!(source.files().iter().all(|p| p.ends_with("b.png")));
        Ok(())
    }

    // Tests acquired candidates decode and reference their file
    #[tokio::test]
    async fn test_acquire_decodes_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write_png(dir.path(), "only.png", [10, 20, 30])?;

        let source = DirectorySource::open(dir.path(), 7)?;
        let candidate = source.acquire().await?;

        assert_eq!(candidate.image.dimensions(), (4, 4));
        assert!(candidate.image.pixels().all(|p| p.0 == [10, 20, 30]));
        assert!(candidate.source.as_str().ends_with("only.png"));
        Ok(())
    }

    // Tests undecodable bytes surface as a reduction failure
    #[tokio::test]
    async fn test_acquire_corrupt_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::write(dir.path().join("broken.png"), b"definitely not a png")?;

        let source = DirectorySource::open(dir.path(), 7)?;
        let err = source.acquire().await.err();
        assert!(err.is_some_and(|e| e.kind() == FailureKind::Reduction));
        Ok(())
    }

    // Tests a file removed after indexing surfaces as an acquisition failure
    #[tokio::test]
    async fn test_acquire_vanished_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write_png(dir.path(), "gone.png", [1, 1, 1])?;

        let source = DirectorySource::open(dir.path(), 7)?;
        std::fs::remove_file(dir.path().join("gone.png"))?;

        let err = source.acquire().await.err();
        assert!(err.is_some_and(|e| e.kind() == FailureKind::Acquisition));
        Ok(())
    }
}
