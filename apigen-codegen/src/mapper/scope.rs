//! Identifier scopes with deterministic collision handling.

use std::collections::HashMap;

/// An identifier handed out by a [`NameScope`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: String,
    /// Set when the preferred identifier was already taken.
    pub collision: Option<Collision>,
}

/// Two raw names mapped to the same identifier and one was renamed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    /// Raw name that was renamed.
    pub raw: String,
    /// Identifier it would have received.
    pub preferred: String,
    /// Raw name that already owns `preferred`.
    pub existing: String,
    /// Identifier actually assigned.
    pub assigned: String,
}

impl std::fmt::Display for Collision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "'{}' maps to identifier '{}' already used by '{}'; renamed to '{}'",
            self.raw, self.preferred, self.existing, self.assigned
        )
    }
}

/// A namespace in which every identifier is unique.
///
/// Identifiers are claimed in first-seen order. When an identifier is already
/// owned by a different raw name, the newcomer gets the smallest numeric
/// suffix (starting at 2) that is free and not reserved.
#[derive(Debug, Clone, Default)]
pub struct NameScope {
    by_raw: HashMap<String, String>,
    owners: HashMap<String, String>,
}

impl NameScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier previously assigned to a raw name.
    pub fn get(&self, raw: &str) -> Option<&str> {
        self.by_raw.get(raw).map(String::as_str)
    }

    pub fn is_taken(&self, identifier: &str) -> bool {
        self.owners.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Claim `preferred` for `raw`. Claiming the same raw name again returns
    /// the identifier it already holds.
    pub fn claim(
        &mut self,
        raw: &str,
        preferred: String,
        is_reserved: impl Fn(&str) -> bool,
    ) -> Identifier {
        if let Some(existing) = self.by_raw.get(raw) {
            return Identifier {
                name: existing.clone(),
                collision: None,
            };
        }
        self.claim_fresh(raw, preferred, is_reserved)
    }

    /// Claim a new identifier even if `raw` was seen before.
    pub fn claim_fresh(
        &mut self,
        raw: &str,
        preferred: String,
        is_reserved: impl Fn(&str) -> bool,
    ) -> Identifier {
        let collision = match self.owners.get(&preferred) {
            None => None,
            Some(existing) => {
                let existing = existing.clone();
                let assigned = (2u32..)
                    .map(|n| format!("{preferred}{n}"))
                    .find(|candidate| !self.owners.contains_key(candidate) && !is_reserved(candidate))
                    .unwrap_or_else(|| format!("{preferred}_"));
                Some(Collision {
                    raw: raw.to_string(),
                    preferred: preferred.clone(),
                    existing,
                    assigned,
                })
            }
        };

        let name = collision
            .as_ref()
            .map(|c| c.assigned.clone())
            .unwrap_or(preferred);

        self.owners.insert(name.clone(), raw.to_string());
        self.by_raw
            .entry(raw.to_string())
            .or_insert_with(|| name.clone());

        Identifier { name, collision }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn never(_: &str) -> bool {
        false
    }

    #[test]
    fn test_claim_is_stable_for_same_raw() {
        let mut scope = NameScope::new();
        let first = scope.claim("My-Model", "MyModel".into(), never);
        let again = scope.claim("My-Model", "MyModel".into(), never);
        assert_eq!(first.name, "MyModel");
        assert_eq!(again.name, "MyModel");
        assert!(again.collision.is_none());
        assert_eq!(scope.len(), 1);
    }

    #[test]
    fn test_collision_gets_numeric_suffix() {
        let mut scope = NameScope::new();
        scope.claim("My-Model", "MyModel".into(), never);
        let second = scope.claim("My_Model", "MyModel".into(), never);
        let third = scope.claim("my model", "MyModel".into(), never);

        assert_eq!(second.name, "MyModel2");
        assert_eq!(third.name, "MyModel3");
        let collision = second.collision.unwrap();
        assert_eq!(collision.existing, "My-Model");
        assert_eq!(collision.assigned, "MyModel2");
        assert_eq!(scope.get("My_Model"), Some("MyModel2"));
    }

    #[test]
    fn test_suffix_skips_taken_and_reserved() {
        let mut scope = NameScope::new();
        scope.claim("a", "item".into(), never);
        scope.claim("b", "item2".into(), never);
        let next = scope.claim("c", "item".into(), |name| name == "item3");
        assert_eq!(next.name, "item4");
    }

    #[test]
    fn test_claim_fresh_for_repeated_raw() {
        let mut scope = NameScope::new();
        scope.claim_fresh("listPets", "listPets".into(), never);
        let dup = scope.claim_fresh("listPets", "listPets".into(), never);
        assert_eq!(dup.name, "listPets2");
        assert!(dup.collision.is_some());
        assert_eq!(scope.get("listPets"), Some("listPets"));
    }
}
