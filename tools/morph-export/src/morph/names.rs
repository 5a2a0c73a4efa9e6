//! Morph name resolution
//!
//! Engine-facing morph names double as animation curve names, so they must
//! be safe identifiers and unique within the mesh. Raw blend-shape names
//! from import are sanitized and deduplicated here; an exact re-encounter
//! of a raw name marks the variant as a duplicate of the first one.

use hashbrown::HashSet;

/// Prefix used when a sanitized name still contains nothing usable and has
/// to be rebuilt from a fixed pattern.
pub const RENAME_PATCH_PREFIX: &str = "morph_patch";

/// Outcome of one name resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedName {
    /// Final engine-safe name, unique among all names returned so far.
    Unique(String),
    /// Exact duplicate of an earlier variant; discard it (first wins).
    Duplicate,
}

/// Shared name state for one conversion run.
#[derive(Debug, Default)]
pub struct NameRegistry {
    /// Every final name handed out so far.
    resolved: HashSet<String>,
    /// Raw names already seen, regardless of what they resolved to.
    raw_seen: HashSet<String>,
    /// Final names in resolution order.
    order: Vec<String>,
}

impl NameRegistry {
    /// Resolve `raw_name` to a final, unique, engine-safe name.
    ///
    /// With `use_original` set the raw name is used unchanged and collisions
    /// discard the variant. Otherwise a changed sanitization goes through
    /// the dedup-suffix loop, so the returned name never collides.
    pub fn resolve(&mut self, raw_name: &str, use_original: bool) -> ResolvedName {
        if self.raw_seen.contains(raw_name) {
            return ResolvedName::Duplicate;
        }

        let name = if use_original {
            raw_name.to_string()
        } else {
            let sanitized = sanitize_morph_name(raw_name);
            if sanitized == raw_name {
                sanitized
            } else {
                self.dedup_candidate(sanitized)
            }
        };

        // collision on the raw/unchanged path means an earlier variant
        // already owns this name
        if self.resolved.contains(&name) {
            return ResolvedName::Duplicate;
        }

        self.resolved.insert(name.clone());
        self.raw_seen.insert(raw_name.to_string());
        self.order.push(name.clone());
        ResolvedName::Unique(name)
    }

    /// First free name derived from a sanitized form that differs from the
    /// raw name. Unsafe sanitized forms restart from the patch pattern.
    fn dedup_candidate(&self, sanitized: String) -> String {
        let (stem, mut candidate) = if is_unsafe_name(&sanitized) {
            let stem = format!("{RENAME_PATCH_PREFIX}_{sanitized}");
            let candidate = format!("{stem}_0");
            (stem, candidate)
        } else {
            (sanitized.clone(), sanitized)
        };

        let mut suffix = 0u32;
        while self.resolved.contains(&candidate) {
            suffix += 1;
            candidate = format!("{stem}_{suffix}");
        }
        candidate
    }

    /// Final names in resolution order, including names whose variant later
    /// produced no deltas.
    pub fn into_names(self) -> Vec<String> {
        self.order
    }
}

/// Replace every character the engine cannot accept in a curve name.
pub fn sanitize_morph_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// A sanitized name with no alphanumeric characters left carries no usable
/// identity and must be rebuilt from the patch pattern.
fn is_unsafe_name(name: &str) -> bool {
    !name.chars().any(|c| c.is_ascii_alphanumeric())
}
