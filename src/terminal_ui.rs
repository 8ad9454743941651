use std::io::Write;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

pub fn grapheme_width(grapheme: &str) -> usize {
    grapheme.width()
}

pub fn text_width(text: &str) -> usize {
    text.graphemes(true).map(grapheme_width).sum()
}

pub struct Surface {
    rect: Rectangle,
    cells: Vec<Cell>,
}

impl Surface {
    pub fn empty<R: Into<Rectangle>>(rect: R) -> Self {
        let rect = rect.into();
        let cells = vec![Cell::empty(); rect.width * rect.height];

        Self { rect, cells }
    }

    pub fn width(&self) -> usize {
        self.rect.width
    }

    pub fn resize<R: Into<Rectangle>>(&mut self, rect: R) {
        *self = Self::empty(rect);
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::empty());
    }

    pub fn set_cell(&mut self, position: impl Into<Position>, glyph: char, style: Style) {
        self.write(position.into(), Cell::new(glyph.to_string(), style));
    }

    /// Writes `string` grapheme by grapheme on a single row and returns the
    /// number of columns it advanced. Anything past the right edge is clipped.
    pub fn put_string(
        &mut self,
        string: impl AsRef<str>,
        style: Style,
        position: impl Into<Position>,
    ) -> usize {
        let Position(start, y) = position.into();
        let mut x = start;

        for grapheme in string.as_ref().graphemes(true) {
            let width = grapheme_width(grapheme);
            if width == 0 {
                continue;
            }
            if x + width > self.rect.right() + 1 {
                break;
            }

            self.write(Position(x, y), Cell::new(grapheme.to_string(), style));
            for covered in x + 1..x + width {
                self.write(Position(covered, y), Cell::continuation(style));
            }
            x += width;
        }

        x - start
    }

    pub fn glyph_at(&self, position: impl Into<Position>) -> Option<char> {
        self.index(position.into())
            .and_then(|index| self.cells[index].symbol.chars().next())
    }

    pub fn style_at(&self, position: impl Into<Position>) -> Option<Style> {
        self.index(position.into()).map(|index| self.cells[index].style)
    }

    pub fn row_text(&self, y: usize) -> String {
        (0..self.rect.width)
            .filter_map(|x| self.index(Position(self.rect.x + x, y)))
            .map(|index| self.cells[index].symbol.as_str())
            .collect()
    }

    pub fn render(&self, stdout: &mut impl Write) -> std::io::Result<()> {
        use crossterm::{
            cursor::MoveTo,
            queue,
            style::{Print, SetAttribute},
        };

        let Rectangle {
            x,
            y,
            width,
            height,
        } = self.rect;

        let (left, top) = (x as u16, y as u16);

        let mut current = Style::default();
        queue!(stdout, SetAttribute(current.attribute()))?;

        let mut i = 0;
        for y in 0..height {
            queue!(stdout, MoveTo(left, top + y as u16))?;
            for _x in 0..width {
                let cell = &self.cells[i];
                i += 1;
                if cell.is_continuation() {
                    continue;
                }
                if cell.style != current {
                    current = cell.style;
                    queue!(stdout, SetAttribute(current.attribute()))?;
                }
                queue!(stdout, Print(&cell.symbol))?;
            }
        }

        stdout.flush()?;

        Ok(())
    }

    /// Overwriting either half of a wide glyph blanks the other half.
    fn write(&mut self, position: Position, cell: Cell) {
        let index = match self.index(position) {
            Some(index) => index,
            None => return,
        };
        let Position(x, _) = position;

        if self.cells[index].is_continuation() && x > self.rect.left() {
            self.cells[index - 1] = Cell::empty();
        }
        if x < self.rect.right() && self.cells[index + 1].is_continuation() {
            self.cells[index + 1] = Cell::empty();
        }
        self.cells[index] = cell;
    }

    fn index(&self, position: Position) -> Option<usize> {
        if !self.rect.contains(position) {
            return None;
        }
        let Position(x, y) = position;
        Some((y - self.rect.y) * self.rect.width + (x - self.rect.x))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position(pub usize, pub usize);

impl From<(usize, usize)> for Position {
    fn from((x, y): (usize, usize)) -> Self {
        Self(x, y)
    }
}

#[derive(Clone)]
struct Cell {
    // Empty for the columns covered by the glyph to the left.
    symbol: String,
    style: Style,
}

impl Cell {
    fn new(symbol: String, style: Style) -> Self {
        Self { symbol, style }
    }

    fn empty() -> Self {
        Self::new(String::from(" "), Style::default())
    }

    fn continuation(style: Style) -> Self {
        Self::new(String::new(), style)
    }

    fn is_continuation(&self) -> bool {
        self.symbol.is_empty()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Style {
    formatting: Formatting,
}

impl Style {
    pub const fn bold() -> Self {
        Self {
            formatting: Formatting::Bold,
        }
    }

    fn attribute(&self) -> crossterm::style::Attribute {
        use crossterm::style::Attribute;

        match self.formatting {
            Formatting::None => Attribute::Reset,
            Formatting::Bold => Attribute::Bold,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Formatting {
    #[default]
    None,
    Bold,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rectangle {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rectangle {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn left(&self) -> usize {
        self.x
    }

    pub fn right(&self) -> usize {
        self.x + self.width.saturating_sub(1)
    }

    pub fn top(&self) -> usize {
        self.y
    }

    pub fn bottom(&self) -> usize {
        self.y + self.height.saturating_sub(1)
    }

    pub fn contains(&self, Position(x, y): Position) -> bool {
        !self.is_empty()
            && self.left() <= x
            && x <= self.right()
            && self.top() <= y
            && y <= self.bottom()
    }
}

impl From<(u16, u16)> for Rectangle {
    fn from((width, height): (u16, u16)) -> Self {
        Self {
            x: 0,
            y: 0,
            width: width as _,
            height: height as _,
        }
    }
}
