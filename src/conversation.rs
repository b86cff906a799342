use std::rc::Rc;

use log::debug;

/// One line of dialogue.
pub struct Interaction {
    pub speaker: String,
    pub line: String,
}

impl Interaction {
    pub fn new(speaker: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            line: line.into(),
        }
    }
}

/// An ordered sequence of interactions. Must not be empty.
pub struct Conversation {
    pub interactions: Vec<Interaction>,
}

/// Broadcast payload delivered to subscribers. Fire-and-forget, synchronous,
/// on the calling thread.
pub enum ConversationEvent<'a> {
    Started(&'a Interaction),
    Advanced(&'a Interaction),
    Stopped,
}

/// Handle returned by [`ConversationManager::subscribe`], used to
/// unsubscribe later.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SubscriberId(u64);

type Subscriber = Rc<dyn Fn(&ConversationEvent<'_>)>;

/// Linear conversation stepper: one active sequence, a cursor, and an
/// ordered observer registry.
///
/// Owned by the app and passed where needed; there is no global instance.
/// Subscribers are delivered to in registration order, over a snapshot of
/// the registry taken before the first callback, so unsubscribing during
/// delivery neither skips nor double-delivers.
pub struct ConversationManager {
    active: Option<Conversation>,
    cursor: usize,
    subscribers: Vec<(SubscriberId, Subscriber)>,
    next_id: u64,
}

impl ConversationManager {
    pub fn new() -> Self {
        Self {
            active: None,
            cursor: 0,
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Register a subscriber; it will receive every subsequent event.
    pub fn subscribe(&mut self, subscriber: impl Fn(&ConversationEvent<'_>) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Rc::new(subscriber)));
        id
    }

    /// Remove a subscriber. Unknown ids are ignored. Takes effect for the
    /// next broadcast; a delivery already in flight runs to completion.
    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.subscribers.retain(|(sid, _)| *sid != id);
    }

    /// Begin a conversation: broadcast `Started` with step 0 and park the
    /// cursor on step 1.
    ///
    /// If another conversation is active it is stopped first (subscribers
    /// see its `Stopped` before the new `Started`).
    pub fn start(&mut self, conversation: Conversation) {
        assert!(
            !conversation.interactions.is_empty(),
            "cannot start an empty conversation"
        );
        if self.active.is_some() {
            self.stop();
        }

        debug!(
            "conversation: start ({} interactions)",
            conversation.interactions.len()
        );
        self.emit(ConversationEvent::Started(&conversation.interactions[0]));
        self.active = Some(conversation);
        self.cursor = 1;
    }

    /// Broadcast the interaction under the cursor and move past it; once
    /// the sequence is exhausted, stop instead.
    ///
    /// # Panics
    /// Panics if no conversation is active: advancing a dead conversation
    /// means the caller's view of the dialogue has desynchronized.
    pub fn advance(&mut self) {
        let active = self
            .active
            .as_ref()
            .expect("advance called with no active conversation");

        if self.cursor < active.interactions.len() {
            self.emit(ConversationEvent::Advanced(&active.interactions[self.cursor]));
            self.cursor += 1;
        } else {
            self.stop();
        }
    }

    /// Clear the active conversation, reset the cursor, and broadcast
    /// `Stopped`. Safe to call when nothing is active; the observable end
    /// state is the same.
    pub fn stop(&mut self) {
        debug!("conversation: stop");
        self.active = None;
        self.cursor = 0;
        self.emit(ConversationEvent::Stopped);
    }

    fn emit(&self, event: ConversationEvent<'_>) {
        // Snapshot so subscriber changes made mid-broadcast apply to the
        // next broadcast, not this one.
        let snapshot: Vec<Subscriber> = self
            .subscribers
            .iter()
            .map(|(_, subscriber)| Rc::clone(subscriber))
            .collect();
        for subscriber in snapshot {
            subscriber(&event);
        }
    }
}

impl Default for ConversationManager {
    fn default() -> Self {
        Self::new()
    }
}
