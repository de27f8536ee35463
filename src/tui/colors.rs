//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::{Priority, Role, Status};

/// Header and status bar for operai.
pub const SITE_ORANGE: Color = Color::Rgb(230, 120, 20);
/// Header and status bar for umarells.
pub const PENSIONER_GREY: Color = Color::Rgb(90, 90, 110);
/// Used for destructive confirmations and high priority.
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);
/// Used for completed work.
pub const DARK_GREEN: Color = Color::Rgb(0, 80, 0);

pub fn role_color(role: Role) -> Color {
    match role {
        Role::Operaio => SITE_ORANGE,
        Role::Umarell => PENSIONER_GREY,
    }
}

pub fn status_color(status: Status) -> Color {
    match status {
        Status::Todo => Color::Gray,
        Status::Doing => Color::Yellow,
        Status::Done => Color::Green,
    }
}

pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Alta => Color::Red,
        Priority::Media => Color::White,
        Priority::Bassa => Color::DarkGray,
    }
}
