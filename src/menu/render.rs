// Drawing primitives for the menus. Everything is queued onto a generic
// `io::Write` so the interaction loop can be exercised against an in-memory
// sink; the real display just hands in a locked stdout.

use std::io::Write;

use anyhow::Result;
use crossterm::{
    cursor::{MoveToColumn, MoveUp},
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};

use super::MenuItem;

const CHECKED: &str = "\u{2612}";
const UNCHECKED: &str = "\u{2610}";

pub(crate) fn draw_prompt(out: &mut impl Write, prompt: &str) -> Result<()> {
    queue!(
        out,
        SetForegroundColor(Color::Cyan),
        SetAttribute(Attribute::Bold),
        Print(prompt),
        Print(":"),
        SetAttribute(Attribute::Reset),
        ResetColor,
        Print("\n"),
    )?;
    Ok(())
}

/// Print the item list, one row per item, the cursor row highlighted.
///
/// With `redraw` set the terminal cursor is first moved back up to the top
/// row of the previous print (the last row is printed without a trailing
/// newline, so the cursor rests on it) and every row is reprinted in place.
/// `selection` switches on the checkbox column; a box is checked when the
/// item's label is among the given labels.
pub(crate) fn draw_items(
    out: &mut impl Write,
    items: &[MenuItem],
    cursor: usize,
    selection: Option<&[String]>,
    redraw: bool,
) -> Result<()> {
    if redraw && items.len() > 1 {
        queue!(out, MoveUp((items.len() - 1) as u16))?;
    }

    for (index, item) in items.iter().enumerate() {
        let current = index == cursor;
        queue!(out, MoveToColumn(0))?;

        if current {
            queue!(out, SetForegroundColor(Color::Yellow), Print("> "))?;
        } else {
            queue!(out, Print("  "))?;
        }

        if let Some(labels) = selection {
            let glyph = if labels.iter().any(|l| l == &item.label) {
                CHECKED
            } else {
                UNCHECKED
            };
            queue!(out, Print(glyph), Print(" "))?;
        }

        queue!(out, Print(&item.label))?;
        if current {
            queue!(out, ResetColor)?;
        }
        if index + 1 < items.len() {
            queue!(out, Print("\n"))?;
        }
    }

    out.flush()?;
    Ok(())
}
