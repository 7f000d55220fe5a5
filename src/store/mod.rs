//! Ordered, append-only conversation history.

use crate::error::{ParleyError, Result};
use crate::types::{Message, Role};

/// Ordered history of conversation messages.
///
/// History is append-only during a turn: messages are never reordered or
/// mutated once inserted. The single invariant enforced here is that a
/// function-result message must directly follow an assistant message whose
/// function call names the same function.
#[derive(Debug, Clone, Default)]
pub struct MessageStore {
    messages: Vec<Message>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message, enforcing the function-result pairing invariant.
    pub fn append(&mut self, message: Message) -> Result<()> {
        if message.role == Role::FunctionResult {
            self.check_pairing(&message)?;
        }
        self.messages.push(message);
        Ok(())
    }

    /// Owned copy of the history. Later appends do not show up in a
    /// previously taken snapshot.
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.clone()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    fn check_pairing(&self, result: &Message) -> Result<()> {
        let result_name = result.name.as_deref().unwrap_or_default();
        let preceding_call = self
            .messages
            .last()
            .filter(|m| m.role == Role::Assistant)
            .and_then(|m| m.function_call.as_ref());

        match preceding_call {
            Some(call) if call.name == result_name => Ok(()),
            Some(call) => Err(ParleyError::OrphanedResult(format!(
                "result for '{result_name}' follows a call to '{}'",
                call.name
            ))),
            None => Err(ParleyError::OrphanedResult(format!(
                "result for '{result_name}' has no preceding assistant function call"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_order() {
        let mut store = MessageStore::new();
        store.append(Message::human("one")).unwrap();
        store.append(Message::assistant("two")).unwrap();

        let history = store.snapshot();
        assert_eq!(history[0].text(), "one");
        assert_eq!(history[1].text(), "two");
    }

    #[test]
    fn result_must_follow_matching_call() {
        let mut store = MessageStore::new();
        store
            .append(Message::assistant_function_call("add", "{}"))
            .unwrap();
        store.append(Message::function_result("add", "2")).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn orphaned_result_is_rejected() {
        let mut store = MessageStore::new();
        let err = store
            .append(Message::function_result("add", "2"))
            .unwrap_err();
        assert!(matches!(err, ParleyError::OrphanedResult(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn result_with_mismatched_name_is_rejected() {
        let mut store = MessageStore::new();
        store
            .append(Message::assistant_function_call("add", "{}"))
            .unwrap();
        let err = store
            .append(Message::function_result("subtract", "0"))
            .unwrap_err();
        assert!(matches!(err, ParleyError::OrphanedResult(_)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn result_after_plain_assistant_text_is_rejected() {
        let mut store = MessageStore::new();
        store.append(Message::assistant("hello")).unwrap();
        let err = store
            .append(Message::function_result("add", "2"))
            .unwrap_err();
        assert!(matches!(err, ParleyError::OrphanedResult(_)));
    }

    #[test]
    fn snapshot_is_isolated_from_later_appends() {
        let mut store = MessageStore::new();
        store.append(Message::human("first")).unwrap();
        let snapshot = store.snapshot();
        store.append(Message::human("second")).unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn clear_empties_history() {
        let mut store = MessageStore::new();
        store.append(Message::human("hi")).unwrap();
        store.clear();
        assert!(store.snapshot().is_empty());
    }
}
