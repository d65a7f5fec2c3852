//! UI-side state of the interactive console: selection, search box, status line.
//!
//! Everything about the workflow list itself lives in `WorkflowApprovalList`;
//! this only tracks what the person at the keyboard is doing.

use crate::console::{ListPresenter, View, WorkflowApprovalList};
use crate::notify::{Notification, NotificationQueue};
use crate::tui::input::Command;
use crate::workflow::types::Decision;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

/// Work the event loop must start after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Reload,
    Dispatch {
        reference_id: String,
        decision: Decision,
    },
}

pub struct App {
    pub list: Arc<WorkflowApprovalList>,
    pub presenter: ListPresenter,
    pub notifications: NotificationQueue,
    pub mode: InputMode,
    pub search: String,
    pub selected: usize,
    /// Latest notification, shown in the status line
    pub status: Option<Notification>,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        list: Arc<WorkflowApprovalList>,
        presenter: ListPresenter,
        notifications: NotificationQueue,
    ) -> Self {
        Self {
            list,
            presenter,
            notifications,
            mode: InputMode::Normal,
            search: String::new(),
            selected: 0,
            status: None,
            should_quit: false,
        }
    }

    /// Move queued notifications into the status line.
    pub fn absorb_notifications(&mut self) {
        if let Some(latest) = self.notifications.drain().pop() {
            self.status = Some(latest);
        }
    }

    /// Keep the selection inside the visible rows.
    pub fn clamp_selection(&mut self, view: &View) {
        let len = match view {
            View::Table(table) => table.rows.len(),
            _ => 0,
        };
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    /// Apply a command against the view currently on screen.
    pub fn apply(&mut self, command: Command, view: &View) -> Option<Effect> {
        match command {
            Command::Quit => {
                self.should_quit = true;
                None
            }
            Command::Up => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            Command::Down => {
                if let View::Table(table) = view {
                    if self.selected + 1 < table.rows.len() {
                        self.selected += 1;
                    }
                }
                None
            }
            Command::Reload => Some(Effect::Reload),
            Command::Approve => self.decide(view, Decision::Approved),
            Command::Reject => self.decide(view, Decision::Rejected),
            Command::StartSearch => {
                self.mode = InputMode::Search;
                None
            }
            Command::SearchInput(c) => {
                self.search.push(c);
                self.selected = 0;
                None
            }
            Command::SearchBackspace => {
                self.search.pop();
                self.selected = 0;
                None
            }
            Command::EndSearch => {
                self.mode = InputMode::Normal;
                None
            }
            Command::ClearSearch => {
                self.search.clear();
                self.mode = InputMode::Normal;
                self.selected = 0;
                None
            }
        }
    }

    fn decide(&self, view: &View, decision: Decision) -> Option<Effect> {
        let View::Table(table) = view else {
            return None;
        };
        let row = table.rows.get(self.selected)?;
        if !row.actions_enabled {
            return None;
        }
        Some(Effect::Dispatch {
            reference_id: row.reference_id.clone(),
            decision,
        })
    }
}
