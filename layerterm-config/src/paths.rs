//! Path expansion for profile settings that name files or directories.
//!
//! Supports `${VAR}`, `%VAR%` and a leading `~`. Unknown variables are left
//! untouched so the caller can see what failed to expand.

use regex::{Captures, Regex};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Matches `${VAR}` (group 1) or `%VAR%` (group 2).
static VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}|%([A-Za-z_][A-Za-z0-9_()]*)%")
        .expect("path variable regex is a compile-time constant and must be valid")
});

/// Expand `input` against the process environment and the user's home directory.
pub fn expand_path(input: &str) -> String {
    let home = dirs::home_dir();
    expand_path_with(input, |name| std::env::var(name).ok(), home.as_deref())
}

/// Expand `input` with an explicit variable lookup and home directory.
pub fn expand_path_with<F>(input: &str, lookup: F, home: Option<&Path>) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let expanded = VAR_PATTERN.replace_all(input, |caps: &Captures| {
        let name = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
        lookup(name).unwrap_or_else(|| caps[0].to_string())
    });
    expand_tilde(&expanded, home)
}

/// The user's home directory as a string, or an empty string if unknown.
pub fn home_dir_string() -> String {
    dirs::home_dir()
        .map(|home| home.display().to_string())
        .unwrap_or_default()
}

fn expand_tilde(path: &str, home: Option<&Path>) -> String {
    let Some(home) = home else {
        return path.to_string();
    };
    if path == "~" {
        return home.display().to_string();
    }
    match path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        Some(rest) => PathBuf::from(home).join(rest).display().to_string(),
        None => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "HOME" => Some("/home/ada".to_string()),
            "USERPROFILE" => Some("C:\\Users\\ada".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_dollar_brace_variables() {
        assert_eq!(
            expand_path_with("${HOME}/src", lookup, None),
            "/home/ada/src"
        );
    }

    #[test]
    fn test_percent_variables() {
        assert_eq!(
            expand_path_with("%USERPROFILE%\\Pictures", lookup, None),
            "C:\\Users\\ada\\Pictures"
        );
    }

    #[test]
    fn test_unknown_variables_are_kept() {
        assert_eq!(
            expand_path_with("${NOPE}/x and %ALSO_NOPE%", lookup, None),
            "${NOPE}/x and %ALSO_NOPE%"
        );
    }

    #[test]
    fn test_tilde_expansion() {
        let home = Path::new("/home/ada");
        assert_eq!(expand_path_with("~", lookup, Some(home)), "/home/ada");
        assert_eq!(
            expand_path_with("~/projects", lookup, Some(home)),
            "/home/ada/projects"
        );
        assert_eq!(expand_path_with("a/~/b", lookup, Some(home)), "a/~/b");
        assert_eq!(expand_path_with("~/projects", lookup, None), "~/projects");
    }

    #[test]
    fn test_plain_paths_untouched() {
        assert_eq!(expand_path_with("/usr/bin", lookup, None), "/usr/bin");
        assert_eq!(expand_path_with("100%", lookup, None), "100%");
    }
}
