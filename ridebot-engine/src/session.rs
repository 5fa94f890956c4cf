//! Per-chat conversation state: the active workflow, the input step being
//! collected, and any draft record under construction.

use ridebot_store::{Driver, SortOrder, Travel};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Which multi-step workflow is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    None,
    RateDriver,
    AddDriver,
    ModifyDriver,
    DeleteDriver,
    AddTravel,
    ModifyTravel,
    DeleteTravel,
    SearchTravels,
    BookTravel,
}

/// Which field the dialogue is currently collecting. Orthogonal to
/// [`Command`]: the pair determines the transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Idle,
    SelectDriver,
    SelectTravel,
    Rating,
    Name,
    Age,
    Vehicle,
    Destination,
    Date,
    DriverId,
    Price,
    Seats,
    SortOrder,
    Query,
    Confirm,
}

/// Per-chat state bundle. Created on the first message from a chat; reset to
/// `(None, Idle)` on cancel, confirmation-reject, or commit.
#[derive(Debug)]
pub struct Conversation {
    pub command: Command,
    pub step: Step,
    /// Driver under construction or edit; owned here until commit.
    pub draft_driver: Option<Driver>,
    /// Travel under construction, edit, or booking target.
    pub draft_travel: Option<Travel>,
    /// Booking quantity or search seat filter, depending on the command.
    pub pending_seats: i64,
    pub sort_order: SortOrder,
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            command: Command::None,
            step: Step::Idle,
            draft_driver: None,
            draft_travel: None,
            pending_seats: 0,
            sort_order: SortOrder::Price,
        }
    }

    /// Drops any draft and returns to (None, Idle). Never touches the store.
    pub fn reset(&mut self) {
        self.command = Command::None;
        self.step = Step::Idle;
        self.draft_driver = None;
        self.draft_travel = None;
        self.pending_seats = 0;
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

/// Chat id → conversation. The per-conversation mutex serializes messages
/// from the same chat in arrival order; distinct chats proceed in parallel.
pub struct Sessions {
    inner: RwLock<HashMap<i64, Arc<Mutex<Conversation>>>>,
}

impl Sessions {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the conversation for the chat, creating it on first contact.
    pub async fn get_or_create(&self, chat_id: i64) -> Arc<Mutex<Conversation>> {
        if let Some(conversation) = self.inner.read().await.get(&chat_id) {
            return conversation.clone();
        }

        let mut sessions = self.inner.write().await;
        sessions
            .entry(chat_id)
            .or_insert_with(|| Arc::new(Mutex::new(Conversation::new())))
            .clone()
    }
}

impl Default for Sessions {
    fn default() -> Self {
        Self::new()
    }
}
