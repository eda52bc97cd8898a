//! Narrative text with embedded cross-references, resolved lazily.

use once_cell::sync::Lazy;
use regex_lite::Regex;

use crate::ids::Id;

/// Matches `{room|some_id}` / `{item|some_id}` reference tokens.
static REF_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(\w+)\|(\w+)\}").expect("reference token pattern"));

/// Parsed narrative text with references to rooms and items.
///
/// Construction only captures the referenced ids in token order; the
/// world's finalize pass resolves them into validated [`Id`] lists,
/// failing with `IdMissing` when a reference never materializes.
#[derive(Debug, Default)]
pub struct Description {
    pub(crate) id: Id,
    pub(crate) text: String,
    pub(crate) pending_rooms: Vec<String>,
    pub(crate) pending_items: Vec<String>,
    pub(crate) rooms: Vec<Id>,
    pub(crate) items: Vec<Id>,
}

impl Description {
    /// Parse a text, capturing its reference tokens.
    ///
    /// Unknown token kinds are logged and skipped.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();

        let mut pending_rooms = Vec::new();
        let mut pending_items = Vec::new();

        for caps in REF_TOKEN.captures_iter(&text) {
            let kind = &caps[1];
            let target = caps[2].to_string();

            match kind {
                "room" => pending_rooms.push(target),
                "item" => pending_items.push(target),
                other => {
                    log::warn!("'{}' is not a valid reference kind, ignoring", other);
                }
            }
        }

        Self {
            id: Id::default(),
            text,
            pending_rooms,
            pending_items,
            rooms: Vec::new(),
            items: Vec::new(),
        }
    }

    /// The description's registry id (assigned when its owner is added
    /// to a world).
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// The raw narrative text, tokens included.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Referenced rooms, in token order. Empty before finalize.
    pub fn rooms(&self) -> &[Id] {
        &self.rooms
    }

    /// Referenced items, in token order. Empty before finalize.
    pub fn items(&self) -> &[Id] {
        &self.items
    }

    /// True once every captured reference has been resolved.
    pub fn resolved(&self) -> bool {
        self.pending_rooms.is_empty() && self.pending_items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captures_tokens_in_order() {
        let desc = Description::new(
            "go to {room|cave}, grab the {item|flint}, then on to {room|meadow}",
        );

        assert_eq!(desc.pending_rooms, vec!["cave", "meadow"]);
        assert_eq!(desc.pending_items, vec!["flint"]);
        assert!(!desc.resolved());
    }

    #[test]
    fn test_plain_text_has_no_references() {
        let desc = Description::new("a quiet meadow");
        assert!(desc.resolved());
        assert!(desc.rooms().is_empty());
        assert!(desc.items().is_empty());
    }

    #[test]
    fn test_unknown_kind_is_skipped() {
        let desc = Description::new("beware the {monster|dragon} in {room|cave}");
        assert_eq!(desc.pending_rooms, vec!["cave"]);
        assert!(desc.pending_items.is_empty());
    }

    #[test]
    fn test_text_keeps_tokens_verbatim() {
        let raw = "go to {room|cave}";
        assert_eq!(Description::new(raw).text(), raw);
    }
}
