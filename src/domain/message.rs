use time::OffsetDateTime;

/// Maximum length of `owner_name`, counted in characters.
pub const OWNER_NAME_MAX_CHARS: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: i32,
    pub title: String,
    pub text: String,
    pub owner_name: String,
    pub created_at: OffsetDateTime,
}

/// Fields accepted when creating a message. `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub title: String,
    pub text: String,
    pub owner_name: String,
}

/// A partial update. `None` means the field was absent from the request and stays untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessagePatch {
    pub title: Option<String>,
    pub text: Option<String>,
    pub owner_name: Option<String>,
}

impl MessagePatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.text.is_none() && self.owner_name.is_none()
    }

    /// Column/value pairs for the fields that were present.
    pub fn changes(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [("title", &self.title), ("text", &self.text), ("owner_name", &self.owner_name)]
            .into_iter()
            .filter_map(|(column, value)| value.as_deref().map(|v| (column, v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_patch() {
        let patch = MessagePatch::default();
        assert!(patch.is_empty());
        assert_eq!(patch.changes().count(), 0);
    }

    #[test]
    fn test_changes_only_yield_present_fields() {
        let patch = MessagePatch { text: Some("new text".into()), ..MessagePatch::default() };

        assert!(!patch.is_empty());
        assert_eq!(patch.changes().collect::<Vec<_>>(), vec![("text", "new text")]);
    }
}
