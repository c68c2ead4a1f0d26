//! Platform-specific directory utilities

use std::path::PathBuf;

/// Get the platform-specific log directory
///
/// Follows platform conventions:
/// - macOS: `~/Library/Caches/hook-deployer/logs`
/// - Linux: `~/.cache/hook-deployer/logs` (or `$XDG_CACHE_HOME/hook-deployer/logs`)
/// - Windows: `%LOCALAPPDATA%\hook-deployer\logs`
/// - Fallback: `/tmp/hook-deployer/logs`
pub fn log_dir() -> PathBuf {
    let base_dir = directories::ProjectDirs::from("", "", "hook-deployer")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/hook-deployer"));

    base_dir.join("logs")
}
