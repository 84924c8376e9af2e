use serde::{Deserialize, Serialize};

/// Insertion-ordered set of user-entered strings, unique under case-insensitive comparison.
///
/// Values are trimmed on insert and keep the spelling they were first entered with.
/// Profile skills and manual filter tags both use this.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TagSet {
    items: Vec<String>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` unless it is blank or already present. Returns whether it was added.
    pub fn insert(&mut self, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() || self.contains(value) {
            return false;
        }
        self.items.push(value.to_string());
        true
    }

    /// Removes the entry equal to `value` ignoring case. Returns the stored spelling.
    pub fn remove(&mut self, value: &str) -> Option<String> {
        let position = self.position(value)?;
        Some(self.items.remove(position))
    }

    pub fn contains(&self, value: &str) -> bool {
        self.position(value).is_some()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    fn position(&self, value: &str) -> Option<usize> {
        self.items.iter().position(|v| same_tag(v, value))
    }
}

/// Tag equality used everywhere a user-entered tag meets a stored one:
/// surrounding whitespace and case (Unicode-aware) are ignored.
pub fn same_tag(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

impl From<Vec<String>> for TagSet {
    fn from(values: Vec<String>) -> Self {
        let mut set = TagSet::new();
        for value in &values {
            set.insert(value);
        }
        set
    }
}

impl From<TagSet> for Vec<String> {
    fn from(set: TagSet) -> Self {
        set.items
    }
}

impl<'a> FromIterator<&'a str> for TagSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = TagSet::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_ignores_case_duplicates() {
        let mut set = TagSet::new();
        assert!(set.insert("python"));
        assert!(!set.insert("Python"));
        assert!(!set.insert("  PYTHON "));
        assert_eq!(set.as_slice(), ["python"]);
    }

    #[test]
    fn test_insert_rejects_blank() {
        let mut set = TagSet::new();
        assert!(!set.insert("   "));
        assert!(set.is_empty());
    }

    #[test]
    fn test_remove_matches_stored_spelling() {
        let mut set: TagSet = ["python", "Rust"].into_iter().collect();
        assert_eq!(set.remove("Python").as_deref(), Some("python"));
        assert_eq!(set.as_slice(), ["Rust"]);
        assert_eq!(set.remove("go"), None);
    }

    #[test]
    fn test_preserves_insertion_order() {
        let set: TagSet = ["senior", "remote", "Senior", "css"].into_iter().collect();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["senior", "remote", "css"]);
    }

    #[test]
    fn test_deserialize_dedupes_stored_values() {
        let set: TagSet = serde_json::from_str(r#"["React", "react", " Vue "]"#).unwrap();
        assert_eq!(set.as_slice(), ["React", "Vue"]);
    }

    #[test]
    fn test_same_tag_folds_non_ascii_case() {
        assert!(same_tag("Ökonomie", " ökonomie"));
        let mut set: TagSet = ["Ökonomie"].into_iter().collect();
        assert!(!set.insert("ÖKONOMIE"));
        assert!(!same_tag("React", "Vue"));
    }
}
