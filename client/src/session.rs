use crate::models::*;
use uuid::Uuid;

/// Conversation history in the order the turns happened. Only grows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Everything one interactive session remembers between turns.
#[derive(Debug, Clone)]
pub struct SessionState {
    id: Uuid,
    collection_name: CollectionName,
    transcript: Transcript,
}

impl SessionState {
    pub fn new() -> Self {
        let id = Uuid::new_v4();
        log::debug!("Started session {}", id);
        Self {
            id,
            collection_name: CollectionName::default(),
            transcript: Transcript::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn collection_name(&self) -> &CollectionName {
        &self.collection_name
    }

    /// Replaces the collection the next question is asked against. Used both by a
    /// successful upload and by the user typing a name in.
    pub fn set_collection_name(&mut self, name: impl Into<CollectionName>) {
        let name = name.into();
        log::info!("Session {} now targets collection `{}`", self.id, name);
        self.collection_name = name;
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub(crate) fn record(&mut self, message: ChatMessage) {
        log::debug!(
            "Session {} recorded {} turn #{}",
            self.id,
            message.role,
            self.transcript.len() + 1
        );
        self.transcript.push(message);
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
