// Interactive terminal menus.
//
// A `Menu` renders its items as an in-place list: navigation redraws the
// rows where they stand instead of clearing the screen, raw mode is held
// only for the duration of each single key read, and the whole interaction
// loop runs against the `KeySource` and `io::Write` ports so it can be
// driven headlessly in tests.

mod key;
mod render;
mod select;
mod table;

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{cursor, queue, style::Print};

pub use key::{decode, Key, KeySource, Tty};
pub use select::{toggled, MultiSelect, Selection};
pub use table::{display_info_table, info_table, InfoRow};

/// One selectable entry: an opaque identifier handed back on commit and the
/// label rendered in the list.
#[derive(Debug, Clone)]
pub struct MenuItem {
    pub id: String,
    pub label: String,
}

/// A prompt plus an ordered item list with a cursor. Built once, displayed
/// blocking; the item sequence does not change while a display runs.
pub struct Menu {
    prompt: String,
    items: Vec<MenuItem>,
    cursor: usize,
}

impl Menu {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            items: Vec::new(),
            cursor: 0,
        }
    }

    /// Append one item. No deduplication; insertion order is display order.
    pub fn item(mut self, id: impl Into<String>, label: impl Into<String>) -> Self {
        self.items.push(MenuItem {
            id: id.into(),
            label: label.into(),
        });
        self
    }

    /// Show the menu on the controlling terminal and block until the user
    /// commits or cancels. Returns the committed item's id, or `None` on
    /// Escape. An empty menu cancels immediately without touching the
    /// terminal.
    pub fn display(&mut self) -> Result<Option<String>> {
        let mut keys = Tty::open()?;
        let stdout = io::stdout();
        self.display_on(&mut keys, &mut stdout.lock())
    }

    /// `display` against explicit input and output ports.
    pub fn display_on(
        &mut self,
        keys: &mut impl KeySource,
        out: &mut impl Write,
    ) -> Result<Option<String>> {
        self.run(keys, out, None)
    }

    /// Show the menu in checkbox mode. Space toggles the item under the
    /// cursor through `selection`; the checked boxes always reflect what
    /// `selection` reports. Enter commits the item under the cursor, not
    /// the selection set, which stays readable from `selection` afterwards;
    /// Escape cancels with `None`.
    pub fn display_multi(&mut self, selection: &mut impl MultiSelect) -> Result<Option<String>> {
        let mut keys = Tty::open()?;
        let stdout = io::stdout();
        self.display_multi_on(selection, &mut keys, &mut stdout.lock())
    }

    /// `display_multi` against explicit input and output ports.
    pub fn display_multi_on(
        &mut self,
        selection: &mut impl MultiSelect,
        keys: &mut impl KeySource,
        out: &mut impl Write,
    ) -> Result<Option<String>> {
        self.run(keys, out, Some(selection))
    }

    fn run(
        &mut self,
        keys: &mut impl KeySource,
        out: &mut impl Write,
        mut selection: Option<&mut dyn MultiSelect>,
    ) -> Result<Option<String>> {
        if self.items.is_empty() {
            // Defined behavior for the empty menu: immediate cancellation.
            return Ok(None);
        }

        render::draw_prompt(out, &self.prompt)?;
        self.draw(out, &selection, false)?;
        queue!(out, cursor::Hide)?;
        out.flush()?;

        loop {
            match keys.read_key()? {
                Key::Escape => {
                    queue!(out, cursor::Show)?;
                    out.flush()?;
                    return Ok(None);
                }
                Key::Enter => {
                    queue!(out, Print("\r\n"), cursor::Show)?;
                    out.flush()?;
                    return Ok(Some(self.items[self.cursor].id.clone()));
                }
                Key::Up => {
                    self.cursor = (self.cursor + self.items.len() - 1) % self.items.len();
                    self.draw(out, &selection, true)?;
                }
                Key::Down => {
                    self.cursor = (self.cursor + 1) % self.items.len();
                    self.draw(out, &selection, true)?;
                }
                Key::Space => {
                    if let Some(sel) = selection.as_mut() {
                        sel.toggle(&self.items[self.cursor].id);
                        self.draw(out, &selection, true)?;
                    }
                }
                Key::Other => {}
            }
        }
    }

    fn draw(
        &self,
        out: &mut impl Write,
        selection: &Option<&mut dyn MultiSelect>,
        redraw: bool,
    ) -> Result<()> {
        let checked = selection.as_ref().map(|s| s.selected());
        render::draw_items(out, &self.items, self.cursor, checked, redraw)
    }
}
