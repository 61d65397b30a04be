//! Link entity representing a shortened URL mapping.

/// A shortened URL owned by a person.
///
/// `owner` is an opaque partition key (a UUID issued by the identity
/// middleware), not an authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub short_id: String,
    pub long_url: String,
    pub owner: String,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        short_id: impl Into<String>,
        long_url: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            short_id: short_id.into(),
            long_url: long_url.into(),
            owner: owner.into(),
        }
    }

    /// Returns true if the link belongs to `person`.
    pub fn is_owned_by(&self, person: &str) -> bool {
        self.owner == person
    }
}

/// Full contents of a backend, used to rebuild the in-memory index at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub active: Vec<Link>,
    pub deleted: Vec<Link>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.deleted.is_empty()
    }

    pub fn len(&self) -> usize {
        self.active.len() + self.deleted.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_creation() {
        let link = Link::new("obrnfe4", "http://yandex.ru", "person-1");

        assert_eq!(link.short_id, "obrnfe4");
        assert_eq!(link.long_url, "http://yandex.ru");
        assert_eq!(link.owner, "person-1");
        assert!(link.is_owned_by("person-1"));
        assert!(!link.is_owned_by("person-2"));
    }

    #[test]
    fn test_snapshot_len() {
        let mut snapshot = Snapshot::default();
        assert!(snapshot.is_empty());

        snapshot.active.push(Link::new("a", "http://a.example", "p"));
        snapshot.deleted.push(Link::new("b", "http://b.example", "p"));

        assert!(!snapshot.is_empty());
        assert_eq!(snapshot.len(), 2);
    }
}
