//! Notification Queue
//!
//! Transient dismissible banners. Components push messages through the
//! `Notifier` handle in context; `NotificationStack` renders the queue and
//! each notice auto-dismisses after a fixed interval.

use leptos::prelude::*;

/// Auto-dismiss interval
pub const AUTO_DISMISS_MS: u32 = 3_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
    Warning,
}

impl NoticeKind {
    pub fn css_class(self) -> &'static str {
        match self {
            NoticeKind::Info => "info",
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
            NoticeKind::Warning => "warning",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u32,
    pub message: String,
    pub kind: NoticeKind,
}

/// Cheap copyable handle over the notification signals
#[derive(Clone, Copy)]
pub struct Notifier {
    notices: ReadSignal<Vec<Notice>>,
    set_notices: WriteSignal<Vec<Notice>>,
    next_id: ReadSignal<u32>,
    set_next_id: WriteSignal<u32>,
}

impl Notifier {
    pub fn new() -> Self {
        let (notices, set_notices) = signal(Vec::new());
        let (next_id, set_next_id) = signal(0u32);
        Self {
            notices,
            set_notices,
            next_id,
            set_next_id,
        }
    }

    pub fn notices(&self) -> ReadSignal<Vec<Notice>> {
        self.notices
    }

    pub fn push(&self, message: impl Into<String>, kind: NoticeKind) {
        let id = self.next_id.get_untracked() + 1;
        self.set_next_id.set(id);
        self.set_notices.update(|queue| {
            queue.push(Notice {
                id,
                message: message.into(),
                kind,
            });
        });

        // Timers only exist in the browser; native tests dismiss manually
        #[cfg(target_arch = "wasm32")]
        {
            let handle = *self;
            gloo_timers::callback::Timeout::new(AUTO_DISMISS_MS, move || handle.dismiss(id))
                .forget();
        }
    }

    pub fn dismiss(&self, id: u32) {
        self.set_notices.update(|queue| {
            queue.retain(|notice| notice.id != id);
        });
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_increasing_ids() {
        let notifier = Notifier::new();
        notifier.push("first", NoticeKind::Success);
        notifier.push("second", NoticeKind::Error);
        let queue = notifier.notices().get_untracked();
        assert_eq!(queue.len(), 2);
        assert!(queue[0].id < queue[1].id);
        assert_eq!(queue[1].kind, NoticeKind::Error);
    }

    #[test]
    fn test_dismiss_removes_only_that_notice() {
        let notifier = Notifier::new();
        notifier.push("keep", NoticeKind::Info);
        notifier.push("drop", NoticeKind::Warning);
        let drop_id = notifier.notices().get_untracked()[1].id;
        notifier.dismiss(drop_id);
        let queue = notifier.notices().get_untracked();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].message, "keep");
    }

    #[test]
    fn test_kind_css_classes() {
        assert_eq!(NoticeKind::Success.css_class(), "success");
        assert_eq!(NoticeKind::Error.css_class(), "error");
    }
}
