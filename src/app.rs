//! Application event loop for interactive mode.
//!
//! The `App` struct ties together the Session, Screen, Terminal, and key
//! bindings into a main event loop.

use anyhow::Result;

use crate::keybind::{self, FormAction};
use crate::presets::PRESETS;
use crate::screen::{FormState, Screen};
use crate::session::{Input, Session};
use crate::terminal::Terminal;

/// The interactive application state.
pub struct App {
    pub session: Session,
    pub screen: Screen,
    pub state: FormState,
    pub running: bool,
}

impl App {
    pub fn new(session: Session, screen: Screen) -> Self {
        Self {
            session,
            screen,
            state: FormState::default(),
            running: true,
        }
    }

    /// Run the main event loop.
    pub fn run(&mut self, terminal: &mut dyn Terminal) -> Result<()> {
        terminal.init()?;
        tracing::info!("interactive session started");

        // Initial full redraw
        self.screen.resize(terminal.size());
        self.screen.invalidate();
        terminal.clear_screen();

        while self.running {
            self.screen.render(&mut self.session, &self.state, terminal);
            let key = match terminal.read_key() {
                Ok(key) => key,
                Err(e) => {
                    terminal.cleanup()?;
                    return Err(e);
                }
            };

            let action = keybind::resolve_key(key);
            self.handle_action(action, terminal);
        }

        terminal.cleanup()?;
        tracing::info!(clipboard = %self.session.clipboard_literal(), "interactive session ended");
        Ok(())
    }

    /// Handle a resolved key action.
    fn handle_action(&mut self, action: FormAction, terminal: &mut dyn Terminal) {
        // Messages last for one key press.
        self.state.message = None;
        let focus = self.state.focus;

        match action {
            FormAction::InsertChar(ch) => {
                self.session.edit(focus, |f| f.insert_char(ch));
            }
            FormAction::Backspace => {
                if !self.session.edit(focus, |f| f.delete_backward()) {
                    terminal.beep();
                }
            }
            FormAction::Delete => {
                if !self.session.edit(focus, |f| f.delete_forward()) {
                    terminal.beep();
                }
            }
            FormAction::Left => {
                if !self.session.edit(focus, |f| f.move_left()) {
                    terminal.beep();
                }
            }
            FormAction::Right => {
                if !self.session.edit(focus, |f| f.move_right()) {
                    terminal.beep();
                }
            }
            FormAction::Home => self.session.edit(focus, |f| f.move_home()),
            FormAction::End => self.session.edit(focus, |f| f.move_end()),
            FormAction::NextField | FormAction::PrevField => {
                self.state.focus = match focus {
                    Input::Pattern => Input::Sample,
                    Input::Sample => Input::Pattern,
                };
            }
            FormAction::Enter => match focus {
                Input::Pattern => self.state.focus = Input::Sample,
                Input::Sample => self.session.edit(focus, |f| f.insert_char('\n')),
            },
            FormAction::ToggleOption(option) => {
                let on = self.session.toggle(option);
                tracing::debug!(option = %option.code(), on, "option toggled");
            }
            FormAction::CyclePreset => self.cycle_preset(),
            FormAction::Copy => {
                let literal = self.session.clipboard_literal();
                terminal.copy_to_clipboard(&literal);
                self.state.message = Some(format!("Copied {literal} to clipboard"));
            }
            FormAction::Reset => {
                self.session.reset();
                self.state = FormState::default();
            }
            FormAction::Quit => {
                self.running = false;
            }
            FormAction::Resize => {
                let size = terminal.size();
                self.screen.resize(size);
                self.screen.invalidate();
                terminal.clear_screen();
            }
            FormAction::Ignore => {}
        }
    }

    /// Load the preset after the last one applied, wrapping round.
    fn cycle_preset(&mut self) {
        let index = self.state.preset.map_or(0, |i| (i + 1) % PRESETS.len());
        let preset = &PRESETS[index];
        self.session.apply_preset(preset);
        self.state.preset = Some(index);
        self.state.message = Some(format!("Preset: {}", preset.name));
    }
}
