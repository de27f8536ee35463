//! Enumerations for TUI state management.

/// Which screen currently receives key presses.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum AppState {
    Browse,
    AddTask,
    AddProject,
    EditUser,
    Confirm,
    Help,
}

/// Top-level tabs, in display order.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Tab {
    Tasks,
    Report,
    Users,
}

impl Tab {
    pub fn title(self) -> &'static str {
        match self {
            Tab::Tasks => "Piano di lavoro",
            Tab::Report => "Report progetti",
            Tab::Users => "Utenti",
        }
    }

    /// Tabs visible to an actor. The users tab is for operai only.
    pub fn visible(privileged: bool) -> Vec<Tab> {
        if privileged {
            vec![Tab::Tasks, Tab::Report, Tab::Users]
        } else {
            vec![Tab::Tasks, Tab::Report]
        }
    }
}
