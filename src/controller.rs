use std::time::Duration;

use ratatui::crossterm::event::{self, Event, KeyCode};
use tracing::trace;

use crate::model::{Message, ViewerConfig};
use pageable::domain::PageableError;

pub struct Controller {
    event_poll_time: u64,
}

impl Controller {
    pub fn new(cfg: &ViewerConfig) -> Self {
        Self {
            event_poll_time: cfg.event_poll_time,
        }
    }

    pub fn handle_event(&self) -> Result<Option<Message>, PageableError> {
        if event::poll(Duration::from_millis(self.event_poll_time))?
            && let Event::Key(key) = event::read()?
            && key.kind == event::KeyEventKind::Press
        {
            return Ok(self.handle_key(key));
        }
        Ok(None)
    }

    fn handle_key(&self, key: event::KeyEvent) -> Option<Message> {
        let message = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Message::Quit),
            KeyCode::Right | KeyCode::Char('l') => Some(Message::NextPage),
            KeyCode::Left | KeyCode::Char('h') => Some(Message::PreviousPage),
            KeyCode::Char('g') | KeyCode::Home => Some(Message::FirstPage),
            KeyCode::Char('G') | KeyCode::End => Some(Message::LastPage),
            KeyCode::Tab => Some(Message::NextColumn),
            KeyCode::BackTab => Some(Message::PreviousColumn),
            KeyCode::Char('s') | KeyCode::Enter => Some(Message::SortSelected),
            KeyCode::Char('a') => Some(Message::SortAscending),
            KeyCode::Char('d') => Some(Message::SortDescending),
            KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
                c.to_digit(10).map(|d| Message::PageButton(d as usize))
            }
            _ => None,
        };
        trace!("Mapped: {key:?} => {message:?}");
        message
    }
}
