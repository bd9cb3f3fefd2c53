//! Migration catalog: the ordered, immutable set of migration scripts.
//!
//! Scripts live in a directory as `{version}_{title}.up.sql` and
//! `{version}_{title}.down.sql` pairs. Loading validates that every version
//! has both halves and that no version appears twice; gaps between versions
//! are allowed.

use crate::error::{CatalogError, CatalogResult};
use dw_core::{Direction, Version};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const UP_SUFFIX: &str = ".up.sql";
const DOWN_SUFFIX: &str = ".down.sql";

/// One versioned migration: the SQL that applies it and the SQL that reverts it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationScript {
    /// Schema version this script moves to when applied
    pub version: Version,
    /// Human-readable title (may be empty)
    pub name: String,
    /// Statements run when advancing
    pub up_sql: String,
    /// Statements run when reverting
    pub down_sql: String,
}

impl MigrationScript {
    /// Create a script from its parts
    pub fn new(
        version: Version,
        name: impl Into<String>,
        up_sql: impl Into<String>,
        down_sql: impl Into<String>,
    ) -> Self {
        Self {
            version,
            name: name.into(),
            up_sql: up_sql.into(),
            down_sql: down_sql.into(),
        }
    }

    /// SQL for the given direction
    pub fn sql(&self, direction: Direction) -> &str {
        match direction {
            Direction::Up => &self.up_sql,
            Direction::Down => &self.down_sql,
        }
    }
}

/// Ordered set of all known migration scripts.
///
/// Read-only after construction; safe to share across stepper runs.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    scripts: Vec<MigrationScript>,
}

/// A `.up.sql` or `.down.sql` file found while scanning.
struct ScriptFile {
    version: Version,
    title: String,
    direction: Direction,
    path: PathBuf,
}

impl Catalog {
    /// Load every script pair from `dir`.
    pub fn load(dir: &Path) -> CatalogResult<Self> {
        let entries = fs::read_dir(dir).map_err(|e| CatalogError::SourceUnreadable {
            path: dir.display().to_string(),
            source: e,
        })?;

        let mut ups: BTreeMap<Version, ScriptFile> = BTreeMap::new();
        let mut downs: BTreeMap<Version, ScriptFile> = BTreeMap::new();

        for entry in entries {
            let entry = entry.map_err(|e| CatalogError::SourceUnreadable {
                path: dir.display().to_string(),
                source: e,
            })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(file) = parse_file_name(&path)? else {
                log::debug!("Ignoring non-migration file {}", path.display());
                continue;
            };

            let slot = match file.direction {
                Direction::Up => &mut ups,
                Direction::Down => &mut downs,
            };
            if let Some(existing) = slot.get(&file.version) {
                return Err(CatalogError::DuplicateVersion {
                    version: file.version,
                    direction: file.direction,
                    first: file_label(&existing.path),
                    second: file_label(&file.path),
                });
            }
            slot.insert(file.version, file);
        }

        if let Some(version) = downs.keys().find(|v| !ups.contains_key(v)) {
            return Err(CatalogError::MissingPair {
                version: *version,
                missing: Direction::Up,
            });
        }

        let mut scripts = Vec::with_capacity(ups.len());
        for (version, up) in ups {
            let down = downs.remove(&version).ok_or(CatalogError::MissingPair {
                version,
                missing: Direction::Down,
            })?;
            scripts.push(MigrationScript {
                version,
                name: up.title,
                up_sql: read_script(&up.path)?,
                down_sql: read_script(&down.path)?,
            });
        }

        log::debug!(
            "Loaded {} migration(s) from {}",
            scripts.len(),
            dir.display()
        );
        Ok(Self { scripts })
    }

    /// Build a catalog from scripts already in memory.
    ///
    /// Input order does not matter; duplicate versions are rejected.
    pub fn from_scripts(mut scripts: Vec<MigrationScript>) -> CatalogResult<Self> {
        scripts.sort_by_key(|s| s.version);
        if let Some(pair) = scripts.windows(2).find(|w| w[0].version == w[1].version) {
            return Err(CatalogError::DuplicateVersion {
                version: pair[0].version,
                direction: Direction::Up,
                first: pair[0].name.clone(),
                second: pair[1].name.clone(),
            });
        }
        Ok(Self { scripts })
    }

    /// All scripts in ascending version order
    pub fn scripts(&self) -> &[MigrationScript] {
        &self.scripts
    }

    /// Number of scripts
    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    /// True when no scripts were found
    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    /// Look up a script by version
    pub fn get(&self, version: Version) -> Option<&MigrationScript> {
        self.position(version).map(|i| &self.scripts[i])
    }

    /// Whether `version` is part of the catalog
    pub fn contains(&self, version: Version) -> bool {
        self.position(version).is_some()
    }

    /// Lowest-versioned script
    pub fn first(&self) -> Option<&MigrationScript> {
        self.scripts.first()
    }

    /// Highest-versioned script
    pub fn last(&self) -> Option<&MigrationScript> {
        self.scripts.last()
    }

    /// The script immediately below `version`, if any.
    ///
    /// `version` itself need not be in the catalog.
    pub fn previous(&self, version: Version) -> Option<&MigrationScript> {
        let idx = self.scripts.partition_point(|s| s.version < version);
        idx.checked_sub(1).map(|i| &self.scripts[i])
    }

    /// Next free sequential version (highest + 1, or 1 when empty)
    pub fn next_version(&self) -> Version {
        self.last()
            .and_then(|s| Version::new(s.version.get().saturating_add(1)))
            .unwrap_or(Version::FIRST)
    }

    fn position(&self, version: Version) -> Option<usize> {
        self.scripts
            .binary_search_by_key(&version, |s| s.version)
            .ok()
    }
}

/// Write an empty up/down pair for `version` into `dir`.
///
/// The title is lower-cased and reduced to letters, digits and underscores.
/// Returns the paths of the up and down files.
pub fn write_script_pair(
    dir: &Path,
    version: Version,
    title: &str,
) -> CatalogResult<(PathBuf, PathBuf)> {
    fs::create_dir_all(dir).map_err(|e| CatalogError::WriteFailed {
        path: dir.display().to_string(),
        source: e,
    })?;

    let slug = slugify(title);
    let stem = if slug.is_empty() {
        version.to_string()
    } else {
        format!("{version}_{slug}")
    };

    let up_path = dir.join(format!("{stem}{UP_SUFFIX}"));
    let down_path = dir.join(format!("{stem}{DOWN_SUFFIX}"));

    for (path, direction) in [(&up_path, Direction::Up), (&down_path, Direction::Down)] {
        let header = format!("-- Migration {version} ({direction}): {title}\n");
        fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .and_then(|mut f| std::io::Write::write_all(&mut f, header.as_bytes()))
            .map_err(|e| CatalogError::WriteFailed {
                path: path.display().to_string(),
                source: e,
            })?;
    }

    Ok((up_path, down_path))
}

/// Parse `{version}[_{title}].{up|down}.sql`.
///
/// Returns `Ok(None)` for files that are not migration scripts at all.
fn parse_file_name(path: &Path) -> CatalogResult<Option<ScriptFile>> {
    let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
        return Ok(None);
    };

    let (stem, direction) = if let Some(stem) = file_name.strip_suffix(UP_SUFFIX) {
        (stem, Direction::Up)
    } else if let Some(stem) = file_name.strip_suffix(DOWN_SUFFIX) {
        (stem, Direction::Down)
    } else {
        return Ok(None);
    };

    let (version_part, title) = match stem.split_once('_') {
        Some((v, t)) => (v, t.replace('_', " ")),
        None => (stem, String::new()),
    };

    let invalid = |reason: String| CatalogError::InvalidFileName {
        file: file_name.to_string(),
        reason,
    };

    let version: Version = version_part
        .parse()
        .map_err(|_| invalid(format!("'{version_part}' is not a positive integer version")))?;
    if version.to_i64().is_none() {
        return Err(invalid(format!("version {version} exceeds the storable range")));
    }

    Ok(Some(ScriptFile {
        version,
        title,
        direction,
        path: path.to_path_buf(),
    }))
}

fn read_script(path: &Path) -> CatalogResult<String> {
    fs::read_to_string(path).map_err(|e| CatalogError::SourceUnreadable {
        path: path.display().to_string(),
        source: e,
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('_') {
            slug.push('_');
        }
    }
    slug.trim_matches('_').to_string()
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
