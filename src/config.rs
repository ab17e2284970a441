/// Layout constants and runtime settings.
use std::path::{Path, PathBuf};

/// Cells in the month grid: six full weeks.
pub const MONTH_GRID_CELLS: usize = 42;
pub const DAYS_PER_WEEK: usize = 7;
/// Colour used for projects without a resolvable crew.
pub const FALLBACK_COLOR: &str = "#666";

const APP_DIR: &str = "crewboard";
const DB_FILE: &str = "crewboard.db";

/// Geometry used by the week and Gantt projections. All values share one
/// unit chosen by the presentation (pixels for the web reference, character
/// cells for the terminal).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridLayout {
    /// Width of one day column in the Gantt timeline.
    pub day_width: u32,
    /// Inset subtracted from every Gantt bar so neighbours don't touch.
    pub bar_gap: u32,
    /// Offset of the first stacked project in a week column.
    pub stack_top: u32,
    /// Distance between consecutive stacked projects in a week column.
    pub stack_offset: u32,
    pub stack_height: u32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            day_width: 40,
            bar_gap: 4,
            stack_top: 10,
            stack_offset: 45,
            stack_height: 40,
        }
    }
}

impl GridLayout {
    /// Character-cell geometry for the terminal board.
    pub fn terminal() -> Self {
        Self {
            day_width: 3,
            bar_gap: 0,
            stack_top: 0,
            stack_offset: 1,
            stack_height: 1,
        }
    }
}

/// Where the board keeps its data and logs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl Settings {
    /// Resolves settings from optional overrides, falling back to the user's
    /// local data directory, or the working directory when there is none.
    pub fn resolve(db_path: Option<PathBuf>, log_level: Option<String>) -> Self {
        let data_dir = default_data_dir();
        std::fs::create_dir_all(&data_dir).ok();
        Self::resolve_in(&data_dir, db_path, log_level)
    }

    /// Same as [`Settings::resolve`] with an explicit data directory. Touches
    /// nothing on disk.
    pub fn resolve_in(data_dir: &Path, db_path: Option<PathBuf>, log_level: Option<String>) -> Self {
        let db_path = db_path.unwrap_or_else(|| data_dir.join(DB_FILE));
        let log_dir = data_dir.join("logs");
        let log_level =
            log_level.unwrap_or_else(|| crate::logging::default_log_level().to_string());
        Self {
            db_path,
            log_dir,
            log_level,
        }
    }
}

/// The default data directory. It is not created here.
pub fn default_data_dir() -> PathBuf {
    match dirs::data_local_dir() {
        Some(data_dir) => data_dir.join(APP_DIR),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_db_path_wins() {
        let base = Path::new("/srv/crewboard");
        let settings = Settings::resolve_in(base, Some(PathBuf::from("/tmp/board.db")), None);
        assert_eq!(settings.db_path, PathBuf::from("/tmp/board.db"));
        assert_eq!(settings.log_dir, base.join("logs"));
    }

    #[test]
    fn defaults_live_under_the_data_dir() {
        let dir = tempfile::tempdir().expect("temp dir");
        let base = dir.path().join("data");
        let base = base.as_path();
        let settings = Settings::resolve_in(base, None, None);
        assert_eq!(settings.db_path, base.join(DB_FILE));
        assert_eq!(settings.log_level, crate::logging::default_log_level());
        assert!(!base.exists());
        let settings = Settings::resolve_in(base, None, Some("warn".to_string()));
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn reference_layout_matches_web_units() {
        let layout = GridLayout::default();
        assert_eq!(layout.day_width, 40);
        assert_eq!(layout.bar_gap, 4);
        assert_eq!(layout.stack_offset, 45);
    }
}
