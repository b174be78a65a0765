//! Session state - per-login UI context observed through a watch channel

use std::sync::Arc;

use huddle_core::Message;
use tokio::sync::watch;

/// Thread pane context
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadContext {
    /// Parent message of the open thread
    pub thread_id: Option<String>,
    pub thread_channel_name: String,
    pub thread_open: bool,
    /// Message currently being edited
    pub edit_message: Option<Message>,
    /// Text of the edited message before the edit started
    pub original_text: String,
}

/// Session-scoped UI state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub logged_user_id: Option<String>,
    pub private_message_user_id: Option<String>,
    pub profile_user_id: Option<String>,
    pub current_channel_id: Option<String>,
    pub thread: ThreadContext,
}

impl Session {
    #[inline]
    pub fn is_logged_in(&self) -> bool {
        self.logged_user_id.is_some()
    }
}

/// Shared, observable session
#[derive(Debug, Clone)]
pub struct SessionStore {
    sender: Arc<watch::Sender<Session>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(Session::default());
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Copy of the current session
    pub fn snapshot(&self) -> Session {
        self.sender.borrow().clone()
    }

    /// Mutate the session and notify observers
    pub fn update<F>(&self, mutate: F)
    where
        F: FnOnce(&mut Session),
    {
        self.sender.send_modify(mutate);
    }

    /// Observe session changes
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.sender.subscribe()
    }

    /// Open the thread pane for `thread_id`
    pub fn open_thread(&self, thread_id: impl Into<String>, channel_name: impl Into<String>) {
        let thread_id = thread_id.into();
        let channel_name = channel_name.into();
        self.update(|s| {
            s.thread.thread_id = Some(thread_id);
            s.thread.thread_channel_name = channel_name;
            s.thread.thread_open = true;
        });
    }

    pub fn close_thread(&self) {
        self.update(|s| {
            s.thread.thread_open = false;
            s.thread.thread_id = None;
        });
    }

    /// Start editing `message`, remembering its current text
    pub fn begin_edit(&self, message: Message) {
        self.update(|s| {
            s.thread.original_text.clone_from(&message.text);
            s.thread.edit_message = Some(message);
        });
    }

    /// Stop editing and hand back the original text
    pub fn end_edit(&self) -> String {
        let mut original = String::new();
        self.update(|s| {
            s.thread.edit_message = None;
            original = std::mem::take(&mut s.thread.original_text);
        });
        original
    }
}
