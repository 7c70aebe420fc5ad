use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// A user-visible message, shown until it's dismissed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: Uuid,
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct NoticeBoard {
    notices: Vec<Notice>,
}

impl NoticeBoard {
    pub fn push(&mut self, kind: NoticeKind, message: impl Into<String>) -> Uuid {
        let id = Uuid::new_v4();
        self.notices.push(Notice {
            id,
            kind,
            message: message.into(),
        });
        id
    }

    /// Returns false, if there was no notice with the given id
    pub fn dismiss(&mut self, id: &Uuid) -> bool {
        let before = self.notices.len();
        self.notices.retain(|n| n.id != *id);
        before != self.notices.len()
    }

    pub fn clear(&mut self) {
        self.notices.clear();
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.notices.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    pub fn of_kind(&self, kind: NoticeKind) -> Vec<&Notice> {
        self.notices.iter().filter(|n| n.kind == kind).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }
}
