//! Kanban board grouping

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::status::WorkStatus;

/// Board column a work status is shown in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KanbanColumn {
    Backlog,
    ReadyForDev,
    InProgress,
    Review,
    Done,
}

impl KanbanColumn {
    pub const ALL: [KanbanColumn; 5] = [
        KanbanColumn::Backlog,
        KanbanColumn::ReadyForDev,
        KanbanColumn::InProgress,
        KanbanColumn::Review,
        KanbanColumn::Done,
    ];

    /// `review` and `qa-review` share a column; unknown statuses land in backlog.
    pub fn from_status(status: &WorkStatus) -> Self {
        match status {
            WorkStatus::Done => KanbanColumn::Done,
            WorkStatus::InProgress => KanbanColumn::InProgress,
            WorkStatus::Review | WorkStatus::QaReview => KanbanColumn::Review,
            WorkStatus::ReadyForDev => KanbanColumn::ReadyForDev,
            WorkStatus::Backlog | WorkStatus::Other(_) => KanbanColumn::Backlog,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            KanbanColumn::Backlog => "Backlog",
            KanbanColumn::ReadyForDev => "Ready",
            KanbanColumn::InProgress => "In Progress",
            KanbanColumn::Review => "Review",
            KanbanColumn::Done => "Done",
        }
    }
}

/// What the board cards represent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    #[default]
    Stories,
    Epics,
    Capabilities,
    Themes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardItem {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardColumn {
    pub column: KanbanColumn,
    pub items: Vec<BoardItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub group_by: GroupBy,
    /// Always all five columns, in board order
    pub columns: Vec<BoardColumn>,
}

impl Board {
    pub fn new(group_by: GroupBy) -> Self {
        Self {
            group_by,
            columns: KanbanColumn::ALL
                .into_iter()
                .map(|column| BoardColumn {
                    column,
                    items: Vec::new(),
                })
                .collect(),
        }
    }

    /// Places a card in the column for `status`.
    pub fn place(&mut self, status: &WorkStatus, id: impl Into<String>, label: impl Into<String>) {
        let column = KanbanColumn::from_status(status);
        if let Some(col) = self.columns.iter_mut().find(|c| c.column == column) {
            col.items.push(BoardItem {
                id: id.into(),
                label: label.into(),
            });
        }
    }

    pub fn column(&self, column: KanbanColumn) -> &[BoardItem] {
        self.columns
            .iter()
            .find(|c| c.column == column)
            .map(|c| c.items.as_slice())
            .unwrap_or(&[])
    }
}

/// Rolls capability statuses up to a theme status.
///
/// All done gives `done`; any done or in progress gives `in-progress`;
/// otherwise (including no tracked capabilities) `backlog`.
pub fn rollup_status<'a>(statuses: impl IntoIterator<Item = &'a WorkStatus>) -> WorkStatus {
    let mut any = false;
    let mut all_done = true;
    let mut any_started = false;

    for status in statuses {
        any = true;
        match status {
            WorkStatus::Done => any_started = true,
            WorkStatus::InProgress => {
                all_done = false;
                any_started = true;
            }
            _ => all_done = false,
        }
    }

    if any && all_done {
        WorkStatus::Done
    } else if any_started {
        WorkStatus::InProgress
    } else {
        WorkStatus::Backlog
    }
}
