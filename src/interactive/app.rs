//! TUI application state and logic

use crate::core::{PredictiveTrie, ScoredOption};
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;

/// Application state
pub struct App {
    pub trie: PredictiveTrie,
    /// Words already committed with Space
    pub committed: Vec<String>,
    /// Word being typed
    pub current: String,
    pub predictions: Predictions,
    pub messages: Vec<Message>,
    pub limit: usize,
    pub should_quit: bool,
    rng: StdRng,
}

/// Predictions for the word being typed
#[derive(Debug, Clone, Default)]
pub struct Predictions {
    pub next_char: Option<char>,
    pub next_word: Option<String>,
    pub top_letters: Vec<ScoredOption>,
    pub alternative_letters: Vec<ScoredOption>,
    pub top_words: Vec<ScoredOption>,
    pub alternative_words: Vec<ScoredOption>,
}

/// How the current word relates to the vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordStatus {
    /// A complete known word
    Known,
    /// Nothing known continues this prefix
    Unknown,
    /// A prefix of known words
    Partial,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

impl App {
    #[must_use]
    pub fn new(trie: PredictiveTrie, limit: usize) -> Self {
        Self::with_rng(trie, limit, StdRng::from_rng(&mut rand::rng()))
    }

    /// Create an app with a fixed random source for the alternative lists
    #[must_use]
    pub fn with_rng(trie: PredictiveTrie, limit: usize, rng: StdRng) -> Self {
        let mut app = Self {
            trie,
            committed: Vec::new(),
            current: String::new(),
            predictions: Predictions::default(),
            messages: vec![Message {
                text: "Start typing. Space commits a word, Tab accepts the completion."
                    .to_string(),
                style: MessageStyle::Info,
            }],
            limit,
            should_quit: false,
            rng,
        };
        app.refresh();
        app
    }

    /// Recompute predictions for the current word
    pub fn refresh(&mut self) {
        let prefix = self.current.as_str();
        let trie = &self.trie;
        self.predictions = Predictions {
            next_char: trie.most_likely_next_char(prefix),
            next_word: trie.most_likely_next_word(prefix).map(str::to_string),
            top_letters: trie.ranked_next_letters(prefix, self.limit),
            alternative_letters: trie.alternative_next_letters(prefix, self.limit, &mut self.rng),
            top_words: trie.ranked_next_words(prefix, self.limit),
            alternative_words: trie.alternative_next_words(prefix, self.limit, &mut self.rng),
        };
    }

    #[must_use]
    pub fn status(&self) -> WordStatus {
        if self.current.is_empty() {
            WordStatus::Partial
        } else if self.trie.contains(&self.current) {
            WordStatus::Known
        } else if self.predictions.next_char.is_none() {
            WordStatus::Unknown
        } else {
            WordStatus::Partial
        }
    }

    #[must_use]
    pub fn is_known(&self, word: &str) -> bool {
        self.trie.contains(word)
    }

    /// Append a typed letter; anything but ASCII letters is ignored
    pub fn type_char(&mut self, c: char) {
        if c.is_ascii_alphabetic() {
            self.current.push(c.to_ascii_lowercase());
            self.refresh();
        }
    }

    /// Move the current word into the committed text
    pub fn commit_word(&mut self) {
        if self.current.is_empty() {
            return;
        }
        self.committed.push(std::mem::take(&mut self.current));
        self.refresh();
    }

    /// Delete a letter, or reopen the previous word when the current one is empty
    pub fn backspace(&mut self) {
        if self.current.pop().is_none() {
            match self.committed.pop() {
                Some(previous) => self.current = previous,
                None => return,
            }
        }
        self.refresh();
    }

    /// Replace the current word with the best completion
    pub fn accept_completion(&mut self) {
        if let Some(word) = self.predictions.next_word.clone() {
            self.current = word;
            self.refresh();
        }
    }

    /// Insert the current word into the trie
    pub fn learn_current(&mut self) {
        if self.current.is_empty() {
            self.add_message("Nothing to learn", MessageStyle::Error);
            return;
        }
        self.trie.insert(&self.current);
        let text = format!(
            "Learned '{}' (frequency {})",
            self.current,
            self.trie.frequency(&self.current)
        );
        self.add_message(&text, MessageStyle::Success);
        self.refresh();
    }

    /// Remove one occurrence of the current word from the trie
    pub fn forget_current(&mut self) {
        if self.trie.delete(&self.current) {
            let text = format!(
                "Forgot one '{}' (frequency {})",
                self.current,
                self.trie.frequency(&self.current)
            );
            self.add_message(&text, MessageStyle::Success);
            self.refresh();
        } else {
            let text = format!("'{}' is not a known word", self.current);
            self.add_message(&text, MessageStyle::Error);
        }
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 5 messages
        if self.messages.len() > 5 {
            self.messages.remove(0);
        }
    }

    /// Apply one key press
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);
        match code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('d') if ctrl => self.forget_current(),
            KeyCode::Char(' ') => self.commit_word(),
            KeyCode::Char(c) if !ctrl => self.type_char(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Tab => self.accept_completion(),
            KeyCode::Enter => self.learn_current(),
            _ => {}
        }
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            // Only process key press events (fixes Windows double-input bug)
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.handle_key(key.code, key.modifiers);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
