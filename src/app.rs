use anyhow::{bail, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::debug;
use tokio::sync::mpsc;

use crate::actions::{Request, Response};
use crate::controller::{RequestController, RequestState};
use crate::input::InputCollector;
use crate::render::{render, DisplayInstruction};

pub struct AppController {
    pub input: InputCollector,
    pub requests: RequestController,
    should_quit: bool,
}

impl AppController {
    pub fn new(req_tx: mpsc::Sender<Request>) -> Self {
        Self { input: InputCollector::new(), requests: RequestController::new(req_tx), should_quit: false }
    }

    pub fn state(&self) -> &RequestState {
        self.requests.state()
    }

    pub fn display(&self) -> DisplayInstruction {
        render(self.requests.state())
    }

    pub fn submit(&mut self) {
        let query = self.input.current_query();
        self.requests.submit(query);
    }

    /// Returns true when quit was requested.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('u') if ctrl => self.input.clear_focused(),
            KeyCode::Enter => self.submit(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => self.input.focus_next(),
            KeyCode::Backspace => self.input.pop_char(),
            KeyCode::Char(c) if !ctrl => self.input.push_char(c),
            _ => {}
        }
        self.should_quit
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn process_response(&mut self, resp: Response) {
        match resp {
            Response::PlaylistGenerated { generation, result } => {
                if !self.requests.apply(generation, result) {
                    debug!("Ignored response for superseded submission #{}", generation);
                }
            }
        }
    }

    /// Feed worker responses in until the current submission has settled.
    pub async fn wait_until_settled(&mut self, resp_rx: &mut mpsc::Receiver<Response>) -> Result<()> {
        while self.requests.is_loading() {
            match resp_rx.recv().await {
                Some(resp) => self.process_response(resp),
                None => bail!("playlist worker stopped before answering"),
            }
        }
        Ok(())
    }
}
