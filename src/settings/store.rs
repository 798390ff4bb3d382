use crate::error::{CcsettingsError, Result};
use crate::settings::document::Settings;
use crate::settings::schema::{parse_settings_str, validate_settings};
use std::path::{Path, PathBuf};

pub const SETTINGS_DIR: &str = ".claude";
pub const SETTINGS_FILE: &str = "settings.json";
pub const LOCAL_SETTINGS_FILE: &str = "settings.local.json";

/// Find the nearest `.claude` directory, starting at `start_dir` and walking
/// up through its ancestors.
pub fn find_claude_directory(start_dir: &Path) -> Option<PathBuf> {
	start_dir
		.ancestors()
		.map(|dir| dir.join(SETTINGS_DIR))
		.find(|candidate| candidate.is_dir())
}

/// Resolve the settings file path without touching the filesystem.
///
/// Falls back to `<start_dir>/.claude` when no ancestor has a `.claude`
/// directory.
pub fn resolve_settings_path(start_dir: &Path, local: bool) -> PathBuf {
	let claude_dir =
		find_claude_directory(start_dir).unwrap_or_else(|| start_dir.join(SETTINGS_DIR));
	claude_dir.join(settings_file_name(local))
}

/// Resolve the settings file path, creating `<start_dir>/.claude` if no
/// `.claude` directory exists yet.
pub fn settings_path(start_dir: &Path, local: bool) -> Result<PathBuf> {
	let path = resolve_settings_path(start_dir, local);
	if let Some(dir) = path.parent()
		&& !dir.is_dir()
	{
		std::fs::create_dir_all(dir).map_err(|source| CcsettingsError::SettingsWriteError {
			path: dir.to_path_buf(),
			source,
		})?;
	}
	Ok(path)
}

fn settings_file_name(local: bool) -> &'static str {
	if local {
		LOCAL_SETTINGS_FILE
	} else {
		SETTINGS_FILE
	}
}

/// Read and validate the settings file. A missing file is `Ok(None)`.
pub fn read_settings(path: &Path) -> Result<Option<Settings>> {
	let content = match std::fs::read_to_string(path) {
		Ok(content) => content,
		Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
		Err(source) => {
			return Err(CcsettingsError::SettingsReadError {
				path: path.to_path_buf(),
				source,
			});
		}
	};

	let settings = parse_settings_str(&content, &path.display().to_string())?;
	tracing::debug!(path = %path.display(), "loaded existing settings");
	Ok(Some(settings))
}

/// Validate and write settings as pretty JSON.
pub fn write_settings(path: &Path, settings: &Settings) -> Result<()> {
	let validated = validate_settings(settings.clone().into_value(), &path.display().to_string())?;
	std::fs::write(path, validated.to_pretty_json()).map_err(|source| {
		CcsettingsError::SettingsWriteError {
			path: path.to_path_buf(),
			source,
		}
	})?;
	tracing::info!(path = %path.display(), "wrote settings");
	Ok(())
}

/// Copy the settings file to `<stem>.backup-<timestamp>.json` next to it.
pub fn create_backup(path: &Path) -> Result<PathBuf> {
	if !path.is_file() {
		return Err(CcsettingsError::NoSettingsToBackup);
	}

	let backup_path = backup_path_for(path, chrono::Utc::now());
	std::fs::copy(path, &backup_path).map_err(|source| CcsettingsError::BackupFailed {
		path: backup_path.clone(),
		source,
	})?;

	tracing::info!(backup = %backup_path.display(), "created settings backup");
	Ok(backup_path)
}

fn backup_path_for(path: &Path, now: chrono::DateTime<chrono::Utc>) -> PathBuf {
	let timestamp = now
		.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
		.replace([':', '.'], "-");
	let stem = path
		.file_stem()
		.map(|s| s.to_string_lossy().into_owned())
		.unwrap_or_else(|| "settings".to_string());
	path.with_file_name(format!("{stem}.backup-{timestamp}.json"))
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;
	use std::fs;

	#[test]
	fn test_find_claude_directory_in_current_dir() {
		let temp_dir = tempfile::tempdir().unwrap();
		fs::create_dir(temp_dir.path().join(".claude")).unwrap();

		let found = find_claude_directory(temp_dir.path());
		assert_eq!(found, Some(temp_dir.path().join(".claude")));
	}

	#[test]
	fn test_find_claude_directory_in_parent() {
		let temp_dir = tempfile::tempdir().unwrap();
		fs::create_dir(temp_dir.path().join(".claude")).unwrap();
		let subdir = temp_dir.path().join("a").join("b");
		fs::create_dir_all(&subdir).unwrap();

		let found = find_claude_directory(&subdir);
		assert_eq!(found, Some(temp_dir.path().join(".claude")));
	}

	#[test]
	fn test_settings_path_creates_claude_dir() {
		let temp_dir = tempfile::tempdir().unwrap();
		let project = temp_dir.path().join("project");
		fs::create_dir(&project).unwrap();

		let path = settings_path(&project, false).unwrap();
		assert_eq!(path, project.join(".claude").join("settings.json"));
		assert!(project.join(".claude").is_dir());

		let local = settings_path(&project, true).unwrap();
		assert_eq!(local, project.join(".claude").join("settings.local.json"));
	}

	#[test]
	fn test_read_missing_settings_is_none() {
		let temp_dir = tempfile::tempdir().unwrap();
		let result = read_settings(&temp_dir.path().join("settings.json")).unwrap();
		assert!(result.is_none());
	}

	#[test]
	fn test_read_invalid_settings_errors() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join("settings.json");
		fs::write(&path, r#"{ "permissions": { "defaultMode": "yolo" } }"#).unwrap();

		match read_settings(&path).unwrap_err() {
			CcsettingsError::InvalidSettings { .. } => {}
			other => panic!("Expected InvalidSettings error, got {other:?}"),
		}
	}

	#[test]
	fn test_write_then_read_settings() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join("settings.json");
		let settings =
			parse_settings_str(r#"{ "model": "opus", "env": { "A": "1" } }"#, "test").unwrap();

		write_settings(&path, &settings).unwrap();
		let content = fs::read_to_string(&path).unwrap();
		assert!(content.ends_with("}\n"));
		assert_eq!(read_settings(&path).unwrap(), Some(settings));
	}

	#[test]
	fn test_backup_without_settings_errors() {
		let temp_dir = tempfile::tempdir().unwrap();
		let result = create_backup(&temp_dir.path().join("settings.json"));
		assert!(matches!(result, Err(CcsettingsError::NoSettingsToBackup)));
	}

	#[test]
	fn test_backup_copies_file() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join("settings.json");
		fs::write(&path, "{}\n").unwrap();

		let backup = create_backup(&path).unwrap();
		assert_eq!(backup.parent(), Some(temp_dir.path()));
		assert_eq!(fs::read_to_string(backup).unwrap(), "{}\n");
	}

	#[test]
	fn test_backup_path_format() {
		let now = chrono::Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
		let backup = backup_path_for(Path::new("/p/.claude/settings.local.json"), now);
		assert_eq!(
			backup,
			PathBuf::from("/p/.claude/settings.local.backup-2025-01-02T03-04-05-000Z.json")
		);
	}
}
