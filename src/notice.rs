use std::time::Duration;

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

/// Longest time a notice may stay on screen.
pub const MAX_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

/// A short, dismissible message shown over the current screen.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Notice {
    pub id: Uuid,
    pub kind: NoticeKind,
    pub message: String,

    #[serde(with = "time::serde::timestamp")]
    pub raised_at: OffsetDateTime,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>, raised_at: OffsetDateTime) -> Self {
        Notice {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            raised_at,
        }
    }
}

/// The notices currently on screen. Each expires `ttl` after it was
/// raised unless dismissed earlier. The TTL is capped at [`MAX_TTL`].
#[derive(Clone, Debug)]
pub struct NoticeBoard {
    ttl: Duration,
    notices: Vec<Notice>,
}

impl NoticeBoard {
    pub fn new(ttl: Duration) -> Self {
        NoticeBoard {
            ttl: ttl.min(MAX_TTL),
            notices: Vec::new(),
        }
    }

    fn ttl(&self) -> time::Duration {
        time::Duration::milliseconds(self.ttl.as_millis() as i64)
    }

    fn prune(&mut self, now: OffsetDateTime) {
        let ttl = self.ttl();
        self.notices.retain(|n| now - n.raised_at < ttl);
    }

    /// Raises a notice now and returns its ID.
    pub fn push(&mut self, kind: NoticeKind, message: impl Into<String>) -> Uuid {
        self.push_at(kind, message, OffsetDateTime::now_utc())
    }

    pub fn push_at(
        &mut self,
        kind: NoticeKind,
        message: impl Into<String>,
        raised_at: OffsetDateTime,
    ) -> Uuid {
        self.prune(raised_at);

        let notice = Notice::new(kind, message, raised_at);
        let id = notice.id;
        self.notices.push(notice);

        id
    }

    /// Removes a notice. Returns whether it was still there.
    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.notices.len();
        self.notices.retain(|n| n.id != id);

        self.notices.len() != before
    }

    /// Drops expired notices and returns the rest, oldest first.
    pub fn active(&mut self, now: OffsetDateTime) -> &[Notice] {
        self.prune(now);

        &self.notices
    }

    /// The most recent notice that has not expired.
    pub fn latest(&self) -> Option<&Notice> {
        self.latest_at(OffsetDateTime::now_utc())
    }

    pub fn latest_at(&self, now: OffsetDateTime) -> Option<&Notice> {
        self.notices.last().filter(|n| now - n.raised_at < self.ttl())
    }

    pub fn clear(&mut self) {
        self.notices.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_expire_after_ttl() {
        let mut board = NoticeBoard::new(Duration::from_secs(4));
        let start = OffsetDateTime::now_utc();

        board.push_at(NoticeKind::Warning, "first", start);
        board.push_at(NoticeKind::Error, "second", start + time::Duration::seconds(2));

        assert_eq!(board.active(start + time::Duration::seconds(3)).len(), 2);

        let remaining = board.active(start + time::Duration::seconds(5));
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].message, "second");

        assert!(board.active(start + time::Duration::seconds(6)).is_empty());
    }

    #[test]
    fn dismissed_notices_are_removed() {
        let mut board = NoticeBoard::new(Duration::from_secs(4));

        let id = board.push(NoticeKind::Info, "hello");
        assert_eq!(board.latest().map(|n| n.kind), Some(NoticeKind::Info));

        assert!(board.dismiss(id));
        assert!(!board.dismiss(id));
        assert!(board.latest().is_none());
    }

    #[test]
    fn expired_notices_are_dropped_without_polling() {
        let mut board = NoticeBoard::new(Duration::from_secs(4));
        let start = OffsetDateTime::now_utc();

        board.push_at(NoticeKind::Success, "saved", start);
        assert_eq!(
            board.latest_at(start + time::Duration::seconds(1)).map(|n| n.kind),
            Some(NoticeKind::Success)
        );
        assert!(board.latest_at(start + time::Duration::seconds(4)).is_none());

        board.push_at(NoticeKind::Error, "failed", start + time::Duration::seconds(10));
        assert_eq!(board.notices.len(), 1);
        assert_eq!(board.notices[0].message, "failed");
    }

    #[test]
    fn huge_ttl_is_capped() {
        let mut board = NoticeBoard::new(Duration::from_secs(u64::MAX));
        let start = OffsetDateTime::now_utc();

        board.push_at(NoticeKind::Info, "hello", start);

        assert_eq!(board.active(start + time::Duration::hours(1)).len(), 1);
        assert!(board.active(start + time::Duration::hours(25)).is_empty());
    }
}
