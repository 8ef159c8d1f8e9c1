//! Authorization registry.
//!
//! # Responsibilities
//! - Hold the authoritative set of user ids allowed through this node
//! - Answer membership queries from connection handlers
//! - Swap in a whole new generation after each synchronization
//!
//! # Design Decisions
//! - One immutable `HashSet` per generation, published through `ArcSwap`
//! - Readers load a snapshot without locking, so a swap in progress never
//!   blocks them and they never observe a half-replaced set
//! - Replacement is wholesale; entries are never merged

use arc_swap::ArcSwap;
use std::collections::HashSet;
use std::sync::Arc;

/// Opaque user identifier (usually a UUID string).
pub type UserId = String;

/// The set of users currently permitted to use this node.
#[derive(Debug)]
pub struct AuthorizationRegistry {
    current: ArcSwap<HashSet<UserId>>,
}

impl AuthorizationRegistry {
    /// Create a registry seeded with `users`.
    pub fn new<I, S>(users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<UserId>,
    {
        let set: HashSet<UserId> = users.into_iter().map(Into::into).collect();
        Self {
            current: ArcSwap::from_pointee(set),
        }
    }

    /// Returns true if `user_id` is in the current generation.
    pub fn is_authorized(&self, user_id: &str) -> bool {
        let allowed = self.current.load().contains(user_id);
        if !allowed {
            tracing::warn!(user_id = %user_id, "Unauthorized user");
        }
        allowed
    }

    /// Atomically replace the whole set. Returns the size of the previous generation.
    pub fn replace_all(&self, users: HashSet<UserId>) -> usize {
        let previous = self.current.swap(Arc::new(users));
        previous.len()
    }

    /// Number of users in the current generation.
    pub fn len(&self) -> usize {
        self.current.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the current generation.
    pub fn snapshot(&self) -> Arc<HashSet<UserId>> {
        self.current.load_full()
    }
}

impl Default for AuthorizationRegistry {
    fn default() -> Self {
        Self::new(Vec::<UserId>::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[&str]) -> HashSet<UserId> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_seeded_users_are_authorized() {
        let registry = AuthorizationRegistry::new(["u1", "u2"]);
        assert!(registry.is_authorized("u1"));
        assert!(registry.is_authorized("u2"));
        assert!(!registry.is_authorized("u3"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_empty_registry_denies_everyone() {
        let registry = AuthorizationRegistry::default();
        assert!(registry.is_empty());
        assert!(!registry.is_authorized("anyone"));
        assert!(!registry.is_authorized(""));
    }

    #[test]
    fn test_replace_all_discards_previous_generation() {
        let registry = AuthorizationRegistry::new(["old-1", "old-2", "old-3"]);
        let previous = registry.replace_all(set(&["a", "b"]));

        assert_eq!(previous, 3);
        assert!(registry.is_authorized("a"));
        assert!(registry.is_authorized("b"));
        assert!(!registry.is_authorized("c"));
        assert!(!registry.is_authorized("old-1"));
    }

    #[test]
    fn test_replace_with_empty_deauthorizes_all() {
        let registry = AuthorizationRegistry::new(["a"]);
        registry.replace_all(HashSet::new());
        assert!(!registry.is_authorized("a"));
    }

    #[test]
    fn test_snapshot_is_stable_across_replace() {
        let registry = AuthorizationRegistry::new(["a"]);
        let before = registry.snapshot();
        registry.replace_all(set(&["b"]));

        assert!(before.contains("a"));
        assert!(!before.contains("b"));
        assert!(registry.snapshot().contains("b"));
    }

    #[test]
    fn test_readers_never_see_mixed_generations() {
        use std::thread;

        let gen_a = set(&["a1", "a2", "a3", "a4"]);
        let gen_b = set(&["b1", "b2", "b3", "b4"]);
        let registry = Arc::new(AuthorizationRegistry::new(gen_a.clone()));

        let writer = {
            let registry = Arc::clone(&registry);
            let (gen_a, gen_b) = (gen_a.clone(), gen_b.clone());
            thread::spawn(move || {
                for i in 0..500 {
                    let next = if i % 2 == 0 { gen_b.clone() } else { gen_a.clone() };
                    registry.replace_all(next);
                }
            })
        };

        let mut readers = vec![];
        for _ in 0..4 {
            let registry = Arc::clone(&registry);
            readers.push(thread::spawn(move || {
                for _ in 0..500 {
                    let snap = registry.snapshot();
                    let has_a = snap.iter().any(|u| u.starts_with('a'));
                    let has_b = snap.iter().any(|u| u.starts_with('b'));
                    assert!(has_a ^ has_b, "observed a mixed generation");
                    assert_eq!(snap.len(), 4);
                }
            }));
        }

        writer.join().unwrap();
        for r in readers {
            r.join().unwrap();
        }
    }
}
