//! Skill discovery over a decoded snapshot
//!
//! Pass 1 locates every SKILL.md. Pass 2 tests each remaining file against
//! every skill directory independently, so a file under nested skills lands
//! in the bucket of each enclosing skill, not only the nearest one.

use skillpull_types::{DiscoveredSkill, FileSet, SKILL_MD};
use tracing::{debug, trace};

/// Group a decoded file set into skills, in SKILL.md order
pub fn discover_skills(files: &FileSet) -> Vec<DiscoveredSkill> {
    let descriptors: Vec<(&str, &[u8])> = files
        .iter()
        .filter_map(|(path, content)| skill_dir(path).map(|dir| (dir, content)))
        .collect();

    if descriptors.is_empty() {
        debug!("No SKILL.md found among {} files", files.len());
        return Vec::new();
    }

    let mut buckets = vec![FileSet::new(); descriptors.len()];
    for (path, content) in files.iter() {
        if skill_dir(path).is_some() {
            continue;
        }
        for ((dir, _), bucket) in descriptors.iter().zip(buckets.iter_mut()) {
            if let Some(relative) = relative_path(dir, path) {
                bucket.insert(relative, content.to_vec());
            }
        }
    }

    let skills: Vec<DiscoveredSkill> = descriptors
        .into_iter()
        .zip(buckets)
        .map(|((dir, skill_md), files)| {
            trace!(dir, files = files.len(), "Discovered skill");
            DiscoveredSkill {
                path: if dir.is_empty() { ".".to_string() } else { dir.to_string() },
                directory_name: directory_name(dir).to_string(),
                skill_md: skill_md.to_vec(),
                files,
            }
        })
        .collect();

    debug!("Discovered {} skills", skills.len());
    skills
}

/// Short identifier for a skill directory: its last segment, or "root"
pub fn directory_name(skill_dir: &str) -> &str {
    if skill_dir.is_empty() {
        return "root";
    }
    skill_dir
        .rsplit_once('/')
        .map_or(skill_dir, |(_, last)| last)
}

/// Directory holding `path` if it is a SKILL.md ("" for the root)
fn skill_dir(path: &str) -> Option<&str> {
    if path == SKILL_MD {
        Some("")
    } else {
        path.strip_suffix(SKILL_MD)
            .and_then(|dir| dir.strip_suffix('/'))
    }
}

/// `path` relative to `dir` when it belongs in that skill's bucket
fn relative_path<'a>(dir: &str, path: &'a str) -> Option<&'a str> {
    if dir.is_empty() {
        (!path.contains('/')).then_some(path)
    } else {
        path.strip_prefix(dir).and_then(|rest| rest.strip_prefix('/'))
    }
}
