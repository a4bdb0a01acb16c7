use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use deck_common::SessionInput;
use deck_core::{AppState, GenerationJob};
use std::path::PathBuf;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Editing,
    /// Typing the path of a file to load.
    FilePath(String),
}

/// Work the event loop must do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    None,
    Submit(GenerationJob),
    Paste,
    LoadFile(PathBuf),
    Quit,
}

pub struct App {
    pub state: AppState,
    pub mode: InputMode,
    pub running: bool,
    pub export_scroll: u16,
    tick: usize,
}

impl App {
    pub fn new(defaults: SessionInput) -> Self {
        Self {
            state: AppState::with_defaults(defaults),
            mode: InputMode::Editing,
            running: true,
            export_scroll: 0,
            tick: 0,
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn on_tick(&mut self) {
        if self.state.is_processing() {
            self.tick = self.tick.wrapping_add(1);
        }
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER[self.tick % SPINNER.len()]
    }

    /// Terminal bracketed paste goes straight into the input text.
    pub fn handle_paste(&mut self, text: &str) {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        match &mut self.mode {
            InputMode::FilePath(buffer) => buffer.push_str(text.trim()),
            InputMode::Editing if self.state.viewer().is_none() => self.state.push_str(&text),
            InputMode::Editing => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppCommand {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('q') {
            self.quit();
            return AppCommand::Quit;
        }
        if let InputMode::FilePath(_) = self.mode {
            return self.handle_file_prompt_key(key);
        }
        if self.state.viewer().is_some() {
            self.handle_viewer_key(key)
        } else {
            self.handle_form_key(key)
        }
    }

    fn handle_file_prompt_key(&mut self, key: KeyEvent) -> AppCommand {
        let InputMode::FilePath(buffer) = &mut self.mode else {
            return AppCommand::None;
        };
        match key.code {
            KeyCode::Esc => {
                self.mode = InputMode::Editing;
                AppCommand::None
            }
            KeyCode::Enter => {
                let path = buffer.trim().to_string();
                self.mode = InputMode::Editing;
                if path.is_empty() {
                    AppCommand::None
                } else {
                    AppCommand::LoadFile(PathBuf::from(path))
                }
            }
            KeyCode::Backspace => {
                buffer.pop();
                AppCommand::None
            }
            KeyCode::Char(c) => {
                buffer.push(c);
                AppCommand::None
            }
            _ => AppCommand::None,
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> AppCommand {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => {
                self.quit();
                AppCommand::Quit
            }
            KeyCode::F(5) => self.submit(),
            KeyCode::Char('g') if ctrl => self.submit(),
            KeyCode::Char('v') if ctrl => AppCommand::Paste,
            KeyCode::Char('o') if ctrl => {
                self.mode = InputMode::FilePath(String::new());
                AppCommand::None
            }
            KeyCode::Char('r') if ctrl => {
                self.state.reset();
                AppCommand::None
            }
            KeyCode::F(2) => {
                self.state.toggle_input_kind();
                AppCommand::None
            }
            KeyCode::F(3) => {
                self.state.cycle_language();
                AppCommand::None
            }
            KeyCode::F(4) => {
                self.state.toggle_extended_reasoning();
                AppCommand::None
            }
            KeyCode::Enter => {
                self.state.push_char('\n');
                AppCommand::None
            }
            KeyCode::Tab => {
                self.state.push_char('\t');
                AppCommand::None
            }
            KeyCode::Backspace => {
                self.state.pop_char();
                AppCommand::None
            }
            KeyCode::Char(c) if !ctrl => {
                self.state.push_char(c);
                AppCommand::None
            }
            _ => AppCommand::None,
        }
    }

    fn submit(&mut self) -> AppCommand {
        match self.state.begin_submit() {
            Ok(job) => {
                self.tick = 0;
                AppCommand::Submit(job)
            }
            // Validation errors are already in the error slot; Busy leaves
            // the in-flight request alone.
            Err(_) => AppCommand::None,
        }
    }

    fn handle_viewer_key(&mut self, key: KeyEvent) -> AppCommand {
        let Some(viewer) = self.state.viewer_mut() else {
            return AppCommand::None;
        };
        if viewer.export_panel_open() {
            match key.code {
                KeyCode::Esc | KeyCode::Char('e') | KeyCode::Char('q') => {
                    viewer.close_export_panel();
                    self.export_scroll = 0;
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.export_scroll = self.export_scroll.saturating_add(1);
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.export_scroll = self.export_scroll.saturating_sub(1);
                }
                KeyCode::PageDown => self.export_scroll = self.export_scroll.saturating_add(10),
                KeyCode::PageUp => self.export_scroll = self.export_scroll.saturating_sub(10),
                _ => {}
            }
            return AppCommand::None;
        }

        match key.code {
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') | KeyCode::PageDown => {
                viewer.next();
            }
            KeyCode::Left | KeyCode::Char('h') | KeyCode::PageUp => {
                viewer.prev();
            }
            KeyCode::Home => viewer.first(),
            KeyCode::End => viewer.last(),
            KeyCode::Char('e') => {
                viewer.toggle_export_panel();
                self.export_scroll = 0;
            }
            KeyCode::Char('b') => self.state.close_deck(),
            KeyCode::Char('n') => self.state.reset(),
            KeyCode::Char('q') | KeyCode::Esc => {
                self.quit();
                return AppCommand::Quit;
            }
            _ => {}
        }
        AppCommand::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_common::{Deck, InputKind, Language, Slide};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn deck() -> Deck {
        Deck {
            title: "T".to_string(),
            slides: vec![
                Slide { title: "A".to_string(), bullets: vec![] },
                Slide { title: "B".to_string(), bullets: vec![] },
            ],
        }
    }

    fn app_with_deck() -> App {
        let mut app = App::new(SessionInput::default());
        app.state.set_text("text");
        let job = app.state.begin_submit().unwrap();
        app.state.finish_submit(job.id, Ok(deck()));
        app
    }

    #[test]
    fn test_typing_and_toggles() {
        let mut app = App::new(SessionInput::default());
        for c in "hi".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::F(2)));
        app.handle_key(key(KeyCode::F(3)));
        app.handle_key(key(KeyCode::F(4)));

        let input = app.state.input();
        assert_eq!(input.text, "hi");
        assert_eq!(input.input_kind, InputKind::Youtube);
        assert_eq!(input.language, Language::Ru);
        assert!(input.extended_reasoning);
    }

    #[test]
    fn test_blank_submit_yields_no_job() {
        let mut app = App::new(SessionInput::default());
        assert_eq!(app.handle_key(ctrl('g')), AppCommand::None);
        assert!(app.state.error().is_some());
        assert!(!app.state.is_processing());
    }

    #[test]
    fn test_submit_only_once_while_processing() {
        let mut app = App::new(SessionInput::default());
        app.handle_paste("some\r\ntext");
        assert_eq!(app.state.input().text, "some\ntext");

        assert!(matches!(app.handle_key(key(KeyCode::F(5))), AppCommand::Submit(_)));
        assert_eq!(app.handle_key(key(KeyCode::F(5))), AppCommand::None);
        assert!(app.state.is_processing());
    }

    #[test]
    fn test_file_prompt() {
        let mut app = App::new(SessionInput::default());
        app.handle_key(ctrl('o'));
        assert_eq!(app.mode, InputMode::FilePath(String::new()));
        for c in "a.txt".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(
            app.handle_key(key(KeyCode::Enter)),
            AppCommand::LoadFile(PathBuf::from("a.txt"))
        );
        assert_eq!(app.mode, InputMode::Editing);
        assert!(app.state.input().text.is_empty());
    }

    #[test]
    fn test_viewer_navigation_and_dismiss() {
        let mut app = app_with_deck();
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.state.viewer().unwrap().cursor(), 0);
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.state.viewer().unwrap().cursor(), 1);

        app.handle_key(key(KeyCode::Char('e')));
        assert!(app.state.viewer().unwrap().export_panel_open());
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.state.viewer().unwrap().cursor(), 1);
        app.handle_key(key(KeyCode::Esc));
        assert!(!app.state.viewer().unwrap().export_panel_open());

        app.handle_key(key(KeyCode::Char('n')));
        assert!(app.state.viewer().is_none());
        assert!(app.state.input().text.is_empty());
        assert!(app.running);
    }

    #[test]
    fn test_back_keeps_input() {
        let mut app = app_with_deck();
        app.handle_key(key(KeyCode::Char('b')));
        assert!(app.state.viewer().is_none());
        assert_eq!(app.state.input().text, "text");
    }

    #[test]
    fn test_reset_during_generation_blocks_resubmit() {
        let mut app = App::new(SessionInput::default());
        app.handle_paste("first");
        let AppCommand::Submit(job) = app.handle_key(ctrl('g')) else {
            panic!("expected a submit");
        };
        app.handle_key(ctrl('r'));
        assert!(!app.state.is_processing());

        app.handle_paste("second");
        assert_eq!(app.handle_key(ctrl('g')), AppCommand::None);

        app.state.finish_submit(job.id, Ok(deck()));
        assert!(app.state.viewer().is_none());
        assert!(matches!(app.handle_key(ctrl('g')), AppCommand::Submit(_)));
    }

    #[test]
    fn test_ctrl_q_quits_everywhere() {
        let mut app = app_with_deck();
        assert_eq!(app.handle_key(ctrl('q')), AppCommand::Quit);
        assert!(!app.running);
    }
}
