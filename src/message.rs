use std::time::{Duration, Instant};

/// How long a transient notice stays on screen.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient status line. Each notice carries its own creation instant,
/// so the tick handler only expires the notice it was armed for; a newer
/// notice is never cleared by an older one's timeout.
#[derive(Clone, Debug)]
pub struct Notice {
    pub content: String,
    pub kind: NoticeKind,
    created: Instant,
}

impl Notice {
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: NoticeKind::Success,
            created: Instant::now(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: NoticeKind::Error,
            created: Instant::now(),
        }
    }

    pub fn expired(&self) -> bool {
        self.created.elapsed() >= NOTICE_TTL
    }
}
