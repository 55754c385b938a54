//! Short-lived messages for the user: validation problems, failed store
//! calls. Each notice expires on its own timer; nothing needs dismissing.

use bevy::prelude::*;

use crate::config::NOTICE_SECONDS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub level: NoticeLevel,
    timer: Timer,
}

impl Notice {
    /// Fraction of the display time still left, 1.0 when just posted.
    pub fn remaining_fraction(&self) -> f32 {
        1.0 - self.timer.fraction()
    }
}

/// Notices currently on screen, oldest first.
#[derive(Resource, Debug, Default)]
pub struct NoticeBoard {
    notices: Vec<Notice>,
}

impl NoticeBoard {
    pub fn post(&mut self, level: NoticeLevel, text: impl Into<String>) {
        self.notices.push(Notice {
            text: text.into(),
            level,
            timer: Timer::from_seconds(NOTICE_SECONDS, TimerMode::Once),
        });
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.post(NoticeLevel::Error, text);
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.post(NoticeLevel::Info, text);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    /// Advance every timer and drop the notices that ran out.
    pub fn tick(&mut self, delta: std::time::Duration) {
        for notice in &mut self.notices {
            notice.timer.tick(delta);
        }
        self.notices.retain(|n| !n.timer.finished());
    }
}

pub fn tick_notices(time: Res<Time>, mut board: ResMut<NoticeBoard>) {
    if !board.is_empty() {
        board.tick(time.delta());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_notice_expires() {
        let mut board = NoticeBoard::default();
        board.error("Parsel kaydedilemedi");
        assert_eq!(board.len(), 1);
        board.tick(Duration::from_secs_f32(NOTICE_SECONDS / 2.0));
        assert_eq!(board.len(), 1);
        let left = board.iter().next().map(Notice::remaining_fraction).unwrap_or(0.0);
        assert!((left - 0.5).abs() < 0.01, "got {left}");
        board.tick(Duration::from_secs_f32(NOTICE_SECONDS));
        assert!(board.is_empty());
    }

    #[test]
    fn test_levels_kept() {
        let mut board = NoticeBoard::default();
        board.info("ok");
        board.error("bad");
        let levels: Vec<NoticeLevel> = board.iter().map(|n| n.level).collect();
        assert_eq!(levels, vec![NoticeLevel::Info, NoticeLevel::Error]);
    }
}
