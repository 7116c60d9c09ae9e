use std::io::{self, Stdout, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{self, ClearType},
    ExecutableCommand,
};

use crate::cli::output::{current_preferences, OutputPreferences};
use crate::cli::ui::formatting::Formatter;
use crate::cli::ui::test_mode::{self, MenuTestEvent};

#[derive(Clone, Debug)]
pub struct MenuUI {
    pub title: String,
    pub context: Vec<String>,
    pub items: Vec<MenuUIItem>,
}

impl MenuUI {
    pub fn new(title: impl Into<String>, items: Vec<MenuUIItem>) -> Self {
        Self {
            title: title.into(),
            context: Vec::new(),
            items,
        }
    }

    pub fn with_context(mut self, lines: Vec<String>) -> Self {
        self.context = lines;
        self
    }
}

#[derive(Clone, Debug)]
pub struct MenuUIItem {
    pub key: String,
    pub label: String,
    pub description: String,
}

impl MenuUIItem {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug)]
pub enum MenuRenderError {
    Interrupted,
    Io(io::Error),
}

impl From<io::Error> for MenuRenderError {
    fn from(err: io::Error) -> Self {
        MenuRenderError::Io(err)
    }
}

/// Keys understood by the menu, shared by the keyboard and scripted paths.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MenuKey {
    Up,
    Down,
    Home,
    End,
    Enter,
    Esc,
}

impl From<MenuTestEvent> for MenuKey {
    fn from(event: MenuTestEvent) -> Self {
        match event {
            MenuTestEvent::Up => MenuKey::Up,
            MenuTestEvent::Down => MenuKey::Down,
            MenuTestEvent::Home => MenuKey::Home,
            MenuTestEvent::End => MenuKey::End,
            MenuTestEvent::Enter => MenuKey::Enter,
            MenuTestEvent::Esc => MenuKey::Esc,
        }
    }
}

enum Step {
    Highlight(usize),
    Choose(usize),
    Dismiss,
}

fn apply_key(key: MenuKey, selected: usize, len: usize) -> Step {
    match key {
        MenuKey::Up => Step::Highlight(selected.checked_sub(1).unwrap_or(len - 1)),
        MenuKey::Down => Step::Highlight((selected + 1) % len),
        MenuKey::Home => Step::Highlight(0),
        MenuKey::End => Step::Highlight(len - 1),
        MenuKey::Enter => Step::Choose(selected),
        MenuKey::Esc => Step::Dismiss,
    }
}

/// Vertical keyboard menu opened on its first item. Returns the chosen item's
/// key, or `None` on ESC.
pub struct MenuRenderer {
    prefs: OutputPreferences,
}

impl Default for MenuRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuRenderer {
    pub fn new() -> Self {
        Self {
            prefs: current_preferences(),
        }
    }

    pub fn show(&self, menu: &MenuUI) -> Result<Option<String>, MenuRenderError> {
        if menu.items.is_empty() {
            return Ok(None);
        }

        if let Some(events) = test_mode::next_menu_events(&menu.title) {
            return Ok(self.show_with_script(menu, events));
        }

        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        stdout.execute(cursor::Hide)?;

        let result = self.read_keys(&mut stdout, menu);

        stdout.execute(cursor::Show).ok();
        terminal::disable_raw_mode().ok();
        result
    }

    fn read_keys(
        &self,
        stdout: &mut Stdout,
        menu: &MenuUI,
    ) -> Result<Option<String>, MenuRenderError> {
        let len = menu.items.len();
        let mut selected = 0;
        loop {
            self.render(stdout, menu, selected)?;
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if key.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
            {
                return Err(MenuRenderError::Interrupted);
            }
            let menu_key = match key.code {
                KeyCode::Up => MenuKey::Up,
                KeyCode::Down | KeyCode::Tab => MenuKey::Down,
                KeyCode::Home => MenuKey::Home,
                KeyCode::End => MenuKey::End,
                KeyCode::Enter => MenuKey::Enter,
                KeyCode::Esc => MenuKey::Esc,
                _ => continue,
            };
            match apply_key(menu_key, selected, len) {
                Step::Highlight(index) => selected = index,
                Step::Choose(index) => return Ok(Some(menu.items[index].key.clone())),
                Step::Dismiss => return Ok(None),
            }
        }
    }

    fn show_with_script(&self, menu: &MenuUI, events: Vec<MenuTestEvent>) -> Option<String> {
        let len = menu.items.len();
        let mut selected = 0;
        for event in events {
            match apply_key(event.into(), selected, len) {
                Step::Highlight(index) => selected = index,
                Step::Choose(index) => {
                    self.print_lines(menu, index);
                    return Some(menu.items[index].key.clone());
                }
                Step::Dismiss => {
                    self.print_lines(menu, selected);
                    return None;
                }
            }
        }
        self.print_lines(menu, selected);
        panic!(
            "Scripted menu events must end with ENTER or ESC for `{}`",
            menu.title
        );
    }

    fn print_lines(&self, menu: &MenuUI, selected: usize) {
        for line in self.lines(menu, selected) {
            println!("{line}");
        }
    }

    fn render(&self, stdout: &mut Stdout, menu: &MenuUI, selected: usize) -> io::Result<()> {
        stdout.execute(terminal::Clear(ClearType::All))?;
        stdout.execute(cursor::MoveTo(0, 0))?;
        // Raw mode does not translate `\n`, so every line needs its own `\r`.
        for line in self.lines(menu, selected) {
            write!(stdout, "{line}\r\n")?;
        }
        stdout.flush()
    }

    fn lines(&self, menu: &MenuUI, selected: usize) -> Vec<String> {
        let formatter = Formatter::with_preferences(self.prefs);
        let mut lines = Vec::new();
        if !menu.context.is_empty() {
            lines.extend(menu.context.iter().cloned());
            lines.push(String::new());
        }
        lines.push(formatter.header_text(&menu.title));

        let entries: Vec<(&str, &str)> = menu
            .items
            .iter()
            .map(|item| (item.label.as_str(), item.description.as_str()))
            .collect();
        for (index, row) in formatter.two_column_rows(&entries).into_iter().enumerate() {
            let pointer = match (index == selected, self.prefs.plain_mode) {
                (true, true) => ">",
                (true, false) => "▸",
                (false, _) => " ",
            };
            lines.push(format!(" {pointer}{row}"));
        }
        lines.push(String::new());
        lines.push("(Use arrow keys to move, Enter to select, ESC to dismiss)".to_string());
        lines
    }
}
