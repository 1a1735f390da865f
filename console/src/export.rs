use assistant::Result;
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes the merged report under the reports directory as
/// `report_<YYYY-MM-DD_HH-MM-SS>.md`, prefixed with its topic heading.
/// The directory is created if absent. Nothing in the session reads
/// these files back.
pub fn write_report(dir: &Path, topic: &str, report: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;

    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let path = dir.join(format!("report_{}.md", timestamp));

    std::fs::write(&path, format!("# Detailed Report on {}\n\n{}", topic, report))?;

    info!(path = %path.display(), "report exported");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::write_report;
    use assistant::Result;

    #[test]
    fn test_write_report() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let reports_dir = dir.path().join("reports");

        let path = write_report(&reports_dir, "rust", "body text")?;

        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("report_"));
        assert!(name.ends_with(".md"));
        // report_YYYY-MM-DD_HH-MM-SS.md
        assert_eq!(name.len(), "report_0000-00-00_00-00-00.md".len());

        let contents = std::fs::read_to_string(&path)?;
        assert_eq!(contents, "# Detailed Report on rust\n\nbody text");

        Ok(())
    }
}
