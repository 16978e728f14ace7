use leptos::prelude::*;
use std::time::Duration;

const SUCCESS_DISMISS_AFTER: Duration = Duration::from_millis(3000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NoticeKind {
    Success,
    Error,
}

/// A user-visible message produced by a view model after an API call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// Per-page notice slot. Holds at most one notice; a newer one replaces it.
#[derive(Clone, Copy)]
pub(crate) struct Notices {
    current: RwSignal<Option<Notice>>,
    seq: RwSignal<u64>,
}

impl Notices {
    pub fn new() -> Self {
        Self {
            current: RwSignal::new(None),
            seq: RwSignal::new(0),
        }
    }

    pub fn current(&self) -> Option<Notice> {
        self.current.get()
    }

    pub fn show(&self, notice: Notice) {
        if notice.is_error() {
            tracing::warn!(message = %notice.message, "notice");
        }

        let kind = notice.kind;
        let _ = self.current.try_set(Some(notice));
        let seq = self.seq.try_update(|s| {
            *s += 1;
            *s
        });

        // Success notices are transient; errors stay until dismissed.
        if let (NoticeKind::Success, Some(seq)) = (kind, seq) {
            let this = *self;
            leptos_dom::helpers::set_timeout(
                move || {
                    if this.seq.try_get_untracked() == Some(seq) {
                        this.dismiss();
                    }
                },
                SUCCESS_DISMISS_AFTER,
            );
        }
    }

    pub fn show_opt(&self, notice: Option<Notice>) {
        if let Some(n) = notice {
            self.show(n);
        }
    }

    pub fn dismiss(&self) {
        let _ = self.current.try_set(None);
    }
}

impl Default for Notices {
    fn default() -> Self {
        Self::new()
    }
}
