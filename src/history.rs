//! Per-user bounded conversation history.
//!
//! The store lives for the whole process and is kept in memory only: a restart
//! begins with empty history for every user. Each user's log is a sliding
//! window of the most recent turns; older turns are dropped first.
//!
//! Besides the turn log, the store hands out one async lock per user so the
//! relay can run at most one pipeline per user at a time while other users
//! proceed independently. A user's lock only exists while a pipeline holds or
//! waits for it.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::inference::prompt::{ASSISTANT_CUE, USER_CUE};

/// Turns kept per user.
pub const DEFAULT_MAX_TURNS: usize = 5;

/// Turns rendered into each new prompt.
pub const DEFAULT_CONTEXT_TURNS: usize = 3;

/// Identifies the person a conversation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One user utterance and the assistant reply it received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    user: String,
    assistant: String,
}

impl Turn {
    pub fn new(user: impl Into<String>, assistant: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            assistant: assistant.into(),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn assistant(&self) -> &str {
        &self.assistant
    }

    /// Renders the turn as the two prompt lines `User: …` / `Assistant: …`.
    pub fn render(&self) -> String {
        format!(
            "{USER_CUE} {}\n{ASSISTANT_CUE} {}",
            self.user, self.assistant
        )
    }
}

#[derive(Debug)]
pub struct ConversationStore {
    max_turns: usize,
    turns: Mutex<HashMap<UserId, VecDeque<Turn>>>,
    pipelines: Mutex<HashMap<UserId, Arc<AsyncMutex<()>>>>,
}

impl ConversationStore {
    /// Creates an empty store keeping at most `max_turns` per user (minimum 1).
    pub fn new(max_turns: usize) -> Self {
        Self {
            max_turns: max_turns.max(1),
            turns: Mutex::new(HashMap::new()),
            pipelines: Mutex::new(HashMap::new()),
        }
    }

    pub const fn max_turns(&self) -> usize {
        self.max_turns
    }

    /// Appends `turn` to the user's log, then drops the oldest turns beyond the limit.
    ///
    /// Unknown users are created on first append.
    pub fn append_turn(&self, user_id: UserId, turn: Turn) {
        let mut turns = lock(&self.turns);
        let log = turns.entry(user_id).or_default();
        log.push_back(turn);
        while log.len() > self.max_turns {
            log.pop_front();
        }
    }

    /// The last `n` turns rendered as prompt text, oldest first.
    pub fn recent_context(&self, user_id: UserId, n: usize) -> Vec<String> {
        let turns = lock(&self.turns);
        turns.get(&user_id).map_or_else(Vec::new, |log| {
            log.iter()
                .skip(log.len().saturating_sub(n))
                .map(Turn::render)
                .collect()
        })
    }

    /// All stored turns for the user, oldest first.
    pub fn turns(&self, user_id: UserId) -> Vec<Turn> {
        lock(&self.turns)
            .get(&user_id)
            .map(|log| log.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self, user_id: UserId) -> usize {
        lock(&self.turns).get(&user_id).map_or(0, VecDeque::len)
    }

    pub fn is_empty(&self, user_id: UserId) -> bool {
        self.len(user_id) == 0
    }

    /// Waits until no other pipeline holds this user's lock, then holds it
    /// until the returned guard is dropped.
    pub async fn lock_user(&self, user_id: UserId) -> UserGuard<'_> {
        let user_lock = {
            let mut pipelines = lock(&self.pipelines);
            Arc::clone(pipelines.entry(user_id).or_default())
        };
        UserGuard {
            store: self,
            user_id,
            guard: Some(user_lock.lock_owned().await),
        }
    }

    /// Users with a pipeline running or queued.
    pub fn active_users(&self) -> usize {
        lock(&self.pipelines).len()
    }

    /// Forgets the user's lock once neither a holder nor a waiter refers to it.
    fn release(&self, user_id: UserId) {
        let mut pipelines = lock(&self.pipelines);
        if pipelines
            .get(&user_id)
            .is_some_and(|user_lock| Arc::strong_count(user_lock) == 1)
        {
            pipelines.remove(&user_id);
        }
    }
}

/// Exclusive hold on one user's pipeline, released on drop.
#[must_use = "the user is unlocked as soon as the guard is dropped"]
pub struct UserGuard<'a> {
    store: &'a ConversationStore,
    user_id: UserId,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for UserGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        self.store.release(self.user_id);
    }
}

impl fmt::Debug for UserGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserGuard")
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TURNS)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
