//! Hashing of rendered plan outputs for change detection.
//!
//! The scheduler compares these hashes between reconciliation passes, so the
//! inputs are fed to the hasher in a fixed order.

use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Hasher for rendered documents and task invocations.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArtifactHasher;

impl ArtifactHasher {
    /// Creates a new hasher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Computes the hash of a rendered table document.
    #[must_use]
    pub fn hash_document(&self, document: &str) -> String {
        hex::encode(Sha256::digest(document.as_bytes()))
    }

    /// Computes the hash of a task invocation.
    ///
    /// Each field is length-prefixed so that moving bytes between adjacent
    /// arguments changes the hash.
    #[must_use]
    pub fn hash_invocation(
        &self,
        image: &str,
        args: &[String],
        annotations: Option<&BTreeMap<String, String>>,
    ) -> String {
        let mut hasher = Sha256::new();

        update_field(&mut hasher, image);

        hasher.update((args.len() as u64).to_be_bytes());
        for arg in args {
            update_field(&mut hasher, arg);
        }

        if let Some(annotations) = annotations {
            hasher.update((annotations.len() as u64).to_be_bytes());
            for (key, value) in annotations {
                update_field(&mut hasher, key);
                update_field(&mut hasher, value);
            }
        }

        hex::encode(hasher.finalize())
    }

    /// Returns the first 8 characters of a hash, for labels and display.
    #[must_use]
    pub fn short_hash(&self, hash: &str) -> String {
        hash.chars().take(8).collect()
    }
}

fn update_field(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u64).to_be_bytes());
    hasher.update(value.as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_document_hash_deterministic() {
        let hasher = ArtifactHasher::new();
        let doc = "database: db\nname: name\nschema:\n  postgres: {}\n";
        assert_eq!(hasher.hash_document(doc), hasher.hash_document(doc));
        assert_ne!(hasher.hash_document(doc), hasher.hash_document("database: db\n"));
    }

    #[test]
    fn test_invocation_hash_sensitive_to_argument_boundaries() {
        let hasher = ArtifactHasher::new();
        let a = hasher.hash_invocation("img", &args(&["ab", "c"]), None);
        let b = hasher.hash_invocation("img", &args(&["a", "bc"]), None);
        assert_ne!(a, b);
    }

    #[test]
    fn test_invocation_hash_includes_annotations() {
        let hasher = ArtifactHasher::new();
        let mut annotations = BTreeMap::new();
        annotations.insert(String::from("k"), String::from("v"));

        let plain = hasher.hash_invocation("img", &args(&["plan"]), None);
        let annotated = hasher.hash_invocation("img", &args(&["plan"]), Some(&annotations));
        assert_ne!(plain, annotated);
    }

    #[test]
    fn test_short_hash() {
        let hasher = ArtifactHasher::new();
        let short = hasher.short_hash("abcdef1234567890abcdef1234567890");
        assert_eq!(short, "abcdef12");
    }
}
