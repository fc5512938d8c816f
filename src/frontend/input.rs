//! Decoding raw pointer and keyboard input into session commands
//!
//! Translation only: every gesture maps to a [`Command`] without touching
//! the session. The one mode-sensitive binding is the S key, which saves in
//! Normal mode but doubles as the downward nudge in Edit mode. Everything
//! else is decoded unconditionally and left to the dispatcher to ignore
//! when it has no meaning in the current mode.

use crate::axes::AxisKind;
use crate::cursor::Mode;
use crate::session::{Command, Direction};
use crate::types::ScreenPos;
use egui::{Key, Response, Ui};

/// Points of raw wheel travel that make up one scroll step
const SCROLL_NOTCH_POINTS: f32 = 50.0;

/// Collect the commands encoded in this frame's input
pub fn collect_commands(ui: &Ui, response: &Response, mode: &Mode) -> Vec<Command> {
    let mut commands = Vec::new();

    ui.input(|i| {
        let shift = i.modifiers.shift;

        if i.key_pressed(Key::E) {
            commands.push(Command::EnterEdit);
        }
        if i.key_pressed(Key::Escape) {
            commands.push(Command::LeaveEdit);
        }
        if i.key_pressed(Key::Enter) {
            commands.push(Command::NewSeries);
        }
        if i.key_pressed(Key::N) {
            commands.push(Command::NextSeries);
        }
        if i.key_pressed(Key::P) {
            commands.push(Command::PrevSeries);
        }
        if i.key_pressed(Key::M) {
            commands.push(Command::CycleShape);
        }
        if i.key_pressed(Key::X) {
            commands.push(Command::CaptureAxis(AxisKind::Horizontal));
        }
        if i.key_pressed(Key::Y) {
            commands.push(Command::CaptureAxis(AxisKind::Vertical));
        }
        if i.key_pressed(Key::C) {
            commands.push(Command::Export);
        }
        if i.key_pressed(Key::H) {
            commands.push(Command::ToggleHelp);
        }
        if i.key_pressed(Key::Space) {
            commands.push(Command::ResetView);
        }

        if i.key_pressed(Key::ArrowUp) {
            commands.push(Command::Arrow {
                direction: Direction::Up,
                coarse: shift,
            });
        }
        if i.key_pressed(Key::ArrowDown) {
            commands.push(Command::Arrow {
                direction: Direction::Down,
                coarse: shift,
            });
        }
        if i.key_pressed(Key::ArrowLeft) {
            commands.push(Command::Arrow {
                direction: Direction::Left,
                coarse: shift,
            });
        }
        if i.key_pressed(Key::ArrowRight) {
            commands.push(Command::Arrow {
                direction: Direction::Right,
                coarse: shift,
            });
        }

        if i.key_pressed(Key::Home) {
            commands.push(Command::First { series: shift });
        }
        if i.key_pressed(Key::End) {
            commands.push(Command::Last { series: shift });
        }

        if i.key_pressed(Key::W) {
            commands.push(Command::Nudge(Direction::Up));
        }
        if i.key_pressed(Key::A) {
            commands.push(Command::Nudge(Direction::Left));
        }
        if i.key_pressed(Key::D) {
            commands.push(Command::Nudge(Direction::Right));
        }
        if i.key_pressed(Key::S) {
            if mode.is_edit() {
                commands.push(Command::Nudge(Direction::Down));
            } else {
                commands.push(Command::SaveSession);
            }
        }

        if i.key_pressed(Key::Delete) {
            commands.push(if shift {
                Command::DeleteSeries
            } else {
                Command::DeleteMarker
            });
        }

        if response.hovered() {
            let scroll = i.raw_scroll_delta.y;
            if scroll != 0.0 {
                commands.push(Command::Scroll {
                    steps: (scroll / SCROLL_NOTCH_POINTS) as f64,
                    zoom: i.modifiers.ctrl,
                });
            }
        }
    });

    if response.secondary_clicked() {
        commands.push(Command::SecondaryPress);
    }
    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            let origin = response.rect.min;
            commands.push(Command::PrimaryPress(ScreenPos::new(
                (pos.x - origin.x) as i32,
                (pos.y - origin.y) as i32,
            )));
        }
    }

    commands
}
