use crate::app::{App, AppCommand};
use crate::render;
use anyhow::Result;
use crossterm::{
    event::{
        DisableBracketedPaste, EnableBracketedPaste, Event, EventStream, KeyEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use deck_common::{Deck, SessionInput};
use deck_core::clipboard::SystemClipboard;
use deck_core::{GenerationError, Generator};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tokio::sync::mpsc;
use tokio::time::{interval, Duration};
use tracing::{debug, info};

type Tui = Terminal<CrosstermBackend<io::Stdout>>;
type JobResult = (u64, Result<Deck, GenerationError>);

pub struct InteractiveApp {
    app: App,
    generator: Generator,
    clipboard: SystemClipboard,
}

impl InteractiveApp {
    pub fn new(generator: Generator, defaults: SessionInput) -> Self {
        Self {
            app: App::new(defaults),
            generator,
            clipboard: SystemClipboard::new(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal).await;

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            DisableBracketedPaste,
            LeaveAlternateScreen
        )?;
        terminal.show_cursor()?;

        result
    }

    async fn event_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<JobResult>();
        let mut events = EventStream::new();
        let mut tick_interval = interval(Duration::from_millis(100));
        info!("interactive session started");

        while self.app.running {
            terminal.draw(|f| render::draw(f, &self.app))?;

            tokio::select! {
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        let command = self.app.handle_key(key);
                        self.run_command(command, &tx).await;
                    }
                    Some(Ok(Event::Paste(text))) => self.app.handle_paste(&text),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                },
                Some((job_id, result)) = rx.recv() => {
                    self.app.state.finish_submit(job_id, result);
                }
                _ = tick_interval.tick() => self.app.on_tick(),
            }
        }

        info!("interactive session ended");
        Ok(())
    }

    async fn run_command(
        &mut self,
        command: AppCommand,
        tx: &mpsc::UnboundedSender<JobResult>,
    ) {
        match command {
            AppCommand::None | AppCommand::Quit => {}
            AppCommand::Submit(job) => {
                let generator = self.generator.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    let job_id = job.id;
                    let result = job.run(generator).await;
                    if tx.send((job_id, result)).is_err() {
                        debug!("generation finished after the UI closed");
                    }
                });
            }
            AppCommand::Paste => {
                self.app.state.paste_from_clipboard(&self.clipboard).await;
            }
            AppCommand::LoadFile(path) => {
                self.app.state.load_file(&path).await;
            }
        }
    }
}
