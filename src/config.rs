use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::level::LevelTable;

const APP_DIR_NAME: &str = "arcade-snake";
const LEVELS_FILE_NAME: &str = "levels.json";
const LOG_FILE_NAME: &str = "arcade-snake.log";

/// Frame rate used when `--fps` is not given.
pub const DEFAULT_FPS: u16 = 60;

/// Slowest and fastest accepted `--fps` values.
pub const MIN_FPS: u16 = 10;
pub const MAX_FPS: u16 = 240;

/// Returns the default per-user level file path, if the platform has a
/// config directory.
#[must_use]
pub fn default_levels_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir()?;
    base.push(APP_DIR_NAME);
    base.push(LEVELS_FILE_NAME);
    Some(base)
}

/// Returns the default diagnostics log path under the per-user cache
/// directory. Logs go to a file because stderr is hidden behind the alternate
/// screen while the game runs.
#[must_use]
pub fn default_log_path() -> Option<PathBuf> {
    let mut base = dirs::cache_dir()?;
    base.push(APP_DIR_NAME);
    base.push(LOG_FILE_NAME);
    Some(base)
}

/// Opens `path` for appending, creating it and its parent directories.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    OpenOptions::new().create(true).append(true).open(path)
}

/// Resolves the level table for this run.
///
/// An explicit `path` must exist. Without one, the per-user file is used when
/// present and the built-in table otherwise. Every loaded table is validated.
pub fn load_levels(path: Option<&Path>) -> Result<LevelTable, ConfigError> {
    if let Some(path) = path {
        return load_levels_from_path(path);
    }

    match default_levels_path() {
        Some(path) if path.exists() => load_levels_from_path(&path),
        _ => {
            log::debug!("no level file found, using built-in levels");
            Ok(LevelTable::builtin())
        }
    }
}

fn load_levels_from_path(path: &Path) -> Result<LevelTable, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let table = parse_levels(path, &raw)?;
    log::info!("loaded {} levels from {}", table.len(), path.display());
    Ok(table)
}

fn parse_levels(path: &Path, raw: &str) -> Result<LevelTable, ConfigError> {
    let table =
        serde_json::from_str::<LevelTable>(raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    if let Err(error) = table.validate() {
        log::warn!("rejecting level file {}: {error}", path.display());
        return Err(error);
    }

    Ok(table)
}

/// Writes `table` as pretty JSON, creating parent directories when needed.
///
/// Used by `--dump-levels` to give players a starting point for edits.
pub fn save_levels(path: &Path, table: &LevelTable) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(table)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;

    fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use crate::error::ConfigError;
    use crate::grid::GridSize;
    use crate::level::LevelTable;

    use super::{load_levels, open_log_file, save_levels};

    #[test]
    fn saved_table_loads_back() {
        let path = unique_test_path("saved");

        save_levels(&path, &LevelTable::builtin()).expect("level save should succeed");
        let loaded = load_levels(Some(&path)).expect("load should succeed");

        assert_eq!(loaded, LevelTable::builtin());
        cleanup_test_path(&path);
    }

    #[test]
    fn missing_fields_fall_back_to_level_one() {
        let path = unique_test_path("partial");
        write_test_file(
            &path,
            r#"{ "levels": [ { "name": "Tiny", "bounds": { "width": 12, "height": 12 } } ] }"#,
        );

        let table = load_levels(Some(&path)).expect("partial profile should load");
        let level = table.get(0).expect("one level");

        assert_eq!(level.name, "Tiny");
        assert_eq!(level.bounds, GridSize::new(12, 12));
        assert_eq!(level.move_interval, 0.15);
        assert!(level.hazard.is_none());
        cleanup_test_path(&path);
    }

    #[test]
    fn missing_explicit_file_is_an_io_error() {
        let path = unique_test_path("missing");

        assert!(matches!(
            load_levels(Some(&path)),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let path = unique_test_path("malformed");
        write_test_file(&path, "not-json");

        assert!(matches!(
            load_levels(Some(&path)),
            Err(ConfigError::Parse { .. })
        ));
        cleanup_test_path(&path);
    }

    #[test]
    fn invalid_profile_rejects_the_table() {
        let path = unique_test_path("invalid");
        write_test_file(
            &path,
            r#"{ "levels": [ {}, { "move_interval": -1.0 } ] }"#,
        );

        assert!(matches!(
            load_levels(Some(&path)),
            Err(ConfigError::MoveInterval { level: 2, .. })
        ));
        cleanup_test_path(&path);
    }

    #[test]
    fn empty_table_is_rejected() {
        let path = unique_test_path("empty");
        write_test_file(&path, r#"{ "levels": [] }"#);

        assert!(matches!(load_levels(Some(&path)), Err(ConfigError::NoLevels)));
        cleanup_test_path(&path);
    }

    #[test]
    fn log_file_is_created_and_appended_to() {
        use std::io::Write;

        let dir = unique_test_path("logs");
        let path = dir.join("nested").join("arcade-snake.log");

        let mut first = open_log_file(&path).expect("log file opens");
        writeln!(first, "one").expect("log write should succeed");
        drop(first);
        let mut second = open_log_file(&path).expect("log file reopens");
        writeln!(second, "two").expect("log write should succeed");
        drop(second);

        let content = fs::read_to_string(&path).expect("log file reads back");
        assert_eq!(content, "one\ntwo\n");
        let _ = fs::remove_dir_all(&dir);
    }

    fn write_test_file(path: &PathBuf, content: &str) {
        fs::write(path, content).expect("test file write should succeed");
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir().join(format!("arcade-snake-levels-{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
    }
}
