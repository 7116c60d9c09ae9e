use std::io::{self, Stdout, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{self, ClearType},
    ExecutableCommand,
};

use crate::cli::ui::menu_renderer::{MenuRenderError, MenuRenderer, MenuUI, MenuUIItem};
use crate::cli::ui::test_mode::{self, TextTestInput};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextPromptResult {
    Value(String),
    Keep,
    Back,
    Help,
    Cancel,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewPromptResult {
    Submit,
    Back,
    Quit,
}

/// Reads one line of input in raw mode. `default` is the value shown as
/// pre-filled; pressing Enter on an empty buffer keeps it.
pub fn text_input(label: &str, default: Option<&str>) -> io::Result<TextPromptResult> {
    if let Some(scripted) = test_mode::next_text_input(label) {
        return Ok(match scripted {
            TextTestInput::Value(value) => interpret_buffer(&value, default),
            TextTestInput::Keep => TextPromptResult::Keep,
            TextTestInput::Back => TextPromptResult::Back,
            TextTestInput::Help => TextPromptResult::Help,
            TextTestInput::Cancel => TextPromptResult::Cancel,
            TextTestInput::Escape => TextPromptResult::Escape,
        });
    }

    let mut guard = RawModeGuard::activate()?;
    let mut stdout = io::stdout();
    let mut buffer = String::new();
    redraw_input(&mut stdout, label, &buffer)?;

    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('C') => {
                    guard.deactivate();
                    println!();
                    return Ok(TextPromptResult::Cancel);
                }
                KeyCode::Char('u') | KeyCode::Char('U') => {
                    buffer.clear();
                    redraw_input(&mut stdout, label, &buffer)?;
                    continue;
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::Esc => {
                guard.deactivate();
                println!();
                return Ok(TextPromptResult::Escape);
            }
            KeyCode::Enter => {
                guard.deactivate();
                println!();
                return Ok(interpret_buffer(&buffer, default));
            }
            KeyCode::Backspace => {
                buffer.pop();
                redraw_input(&mut stdout, label, &buffer)?;
            }
            KeyCode::Char(ch) => {
                buffer.push(ch);
                redraw_input(&mut stdout, label, &buffer)?;
            }
            _ => {}
        }
    }
}

/// Review screen actions: submit, go back to payment, or leave the wizard.
pub fn review_menu(context_lines: &[String]) -> io::Result<ReviewPromptResult> {
    let items = vec![
        MenuUIItem::new("submit", "Submit", "Send the collected details"),
        MenuUIItem::new("back", "Back", "Return to Payment Details"),
        MenuUIItem::new("quit", "Quit", "Leave the wizard"),
    ];
    let menu = MenuUI::new("Review your details", items).with_context(context_lines.to_vec());

    match MenuRenderer::new().show(&menu) {
        Ok(Some(key)) if key == "submit" => Ok(ReviewPromptResult::Submit),
        Ok(Some(key)) if key == "back" => Ok(ReviewPromptResult::Back),
        Ok(_) => Ok(ReviewPromptResult::Quit),
        Err(MenuRenderError::Io(err)) => Err(err),
        Err(_) => Ok(ReviewPromptResult::Quit),
    }
}

/// Maps a typed line to a prompt result. Shared by the raw-mode prompt and
/// the stdin script reader so both understand the same commands.
pub fn interpret_buffer(buffer: &str, default: Option<&str>) -> TextPromptResult {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return match default {
            Some(existing) if !existing.is_empty() => TextPromptResult::Keep,
            _ => TextPromptResult::Value(buffer.to_string()),
        };
    }

    match trimmed.to_ascii_lowercase().as_str() {
        ":cancel" => TextPromptResult::Cancel,
        ":back" => TextPromptResult::Back,
        ":help" => TextPromptResult::Help,
        ":keep" => TextPromptResult::Keep,
        ":clear" => TextPromptResult::Value(String::new()),
        _ => TextPromptResult::Value(buffer.to_string()),
    }
}

fn redraw_input(stdout: &mut Stdout, label: &str, buffer: &str) -> io::Result<()> {
    stdout.execute(cursor::MoveToColumn(0))?;
    stdout.execute(terminal::Clear(ClearType::CurrentLine))?;
    write!(stdout, "{label}> {buffer}")?;
    stdout.flush()
}

struct RawModeGuard {
    active: bool,
}

impl RawModeGuard {
    fn activate() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self { active: true })
    }

    fn deactivate(&mut self) {
        if self.active {
            let _ = terminal::disable_raw_mode();
            self.active = false;
        }
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        self.deactivate();
    }
}
