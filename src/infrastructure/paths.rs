//! Path helpers for the Zellij plugin sandbox.

use std::path::PathBuf;

/// Returns the plugin data directory, where trace files are written.
///
/// Zellij mounts a per-plugin directory at `/data`; it survives plugin
/// reloads.
///
/// # Examples
///
/// ```
/// use image_finder::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/data"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/data")
}

/// Rewrites a `~`-prefixed path to its location under `/host`.
///
/// Used for user-supplied theme file paths.
///
/// # Examples
///
/// ```
/// use image_finder::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/nord.toml"), "/host/themes/nord.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => "/host".to_string(),
        Some(rest) if rest.starts_with('/') => format!("/host{rest}"),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_only_expands_as_a_path_component() {
        assert_eq!(expand_tilde("~user/x"), "~user/x");
        assert_eq!(expand_tilde("themes/~/x"), "themes/~/x");
    }
}
