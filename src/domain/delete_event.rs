//! Soft-delete event model for asynchronous backend mirroring.

/// A soft-delete that still has to be mirrored to the backend.
///
/// The facade updates the in-memory index synchronously and queues one of
/// these for [`crate::domain::delete_worker::run_delete_worker`], so the
/// caller never waits on backend IO.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteEvent {
    pub person: String,
    pub short_id: String,
}

impl DeleteEvent {
    pub fn new(person: impl Into<String>, short_id: impl Into<String>) -> Self {
        Self {
            person: person.into(),
            short_id: short_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_event_creation() {
        let event = DeleteEvent::new("person-1", "obrnfe4");

        assert_eq!(event.person, "person-1");
        assert_eq!(event.short_id, "obrnfe4");
    }

    #[test]
    fn test_delete_event_clone() {
        let event = DeleteEvent::new("p", "id");
        let cloned = event.clone();

        assert_eq!(cloned, event);
    }
}
