//! Store path construction and validation

use crate::error::{Result, SkillsError};

/// Join store path segments with `/`
#[must_use]
pub fn join(base: &str, segments: &[&str]) -> String {
    let mut path = base.to_string();
    for segment in segments {
        if !path.is_empty() && !path.ends_with('/') {
            path.push('/');
        }
        path.push_str(segment);
    }
    path
}

/// Check that `name` is a single safe directory name
///
/// # Errors
/// Returns [`SkillsError::UnsafePath`] for empty names, `.`, `..`, or names
/// containing a path separator
pub fn check_name(name: &str) -> Result<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(SkillsError::UnsafePath(name.to_string()));
    }
    Ok(())
}

/// Check that `path` stays inside the directory it is joined to
///
/// # Errors
/// Returns [`SkillsError::UnsafePath`] for empty or absolute paths and for
/// empty, `.` or `..` components
pub fn check_relative(path: &str) -> Result<()> {
    let unsafe_component = |c: &str| c.is_empty() || c == "." || c == ".." || c.contains('\\');
    if path.starts_with('/') || path.split('/').any(unsafe_component) {
        return Err(SkillsError::UnsafePath(path.to_string()));
    }
    Ok(())
}
