use unicode_segmentation::UnicodeSegmentation;

use crate::terminal_ui::{grapheme_width, text_width, Rectangle, Style, Surface};

const TOP_LEFT: char = '┌';
const TOP_RIGHT: char = '┐';
const BOTTOM_LEFT: char = '└';
const BOTTOM_RIGHT: char = '┘';
const HORIZONTAL: char = '─';
const VERTICAL: char = '│';

pub trait Drawable {
    fn draw(&self, surface: &mut Surface, x: usize, y: usize);

    fn size(&self) -> (usize, usize);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// One line of text inside `width` columns. Wider text is truncated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextCell {
    text: String,
    width: usize,
    align: Align,
    style: Style,
}

impl TextCell {
    pub fn new(text: impl Into<String>, width: usize) -> Self {
        Self {
            text: text.into(),
            width,
            align: Align::default(),
            style: Style::default(),
        }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn visible_text(&self) -> &str {
        truncate(&self.text, self.width)
    }

    pub fn visible_width(&self) -> usize {
        text_width(self.visible_text())
    }

    pub fn offset(&self) -> usize {
        let free = self.width.saturating_sub(self.visible_width());
        match self.align {
            Align::Left => 0,
            Align::Center => free / 2,
            Align::Right => free,
        }
    }
}

impl Drawable for TextCell {
    fn draw(&self, surface: &mut Surface, x: usize, y: usize) {
        surface.put_string(self.visible_text(), self.style, (x + self.offset(), y));
    }

    fn size(&self) -> (usize, usize) {
        (self.width, 1)
    }
}

fn truncate(text: &str, width: usize) -> &str {
    let mut used = 0;
    for (index, grapheme) in text.grapheme_indices(true) {
        used += grapheme_width(grapheme);
        if used > width {
            return &text[..index];
        }
    }
    text
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    rect: Rectangle,
    title: String,
}

impl Frame {
    pub fn new(rect: Rectangle, title: impl Into<String>) -> Self {
        Self {
            rect,
            title: title.into(),
        }
    }

    pub fn rect(&self) -> Rectangle {
        self.rect
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn render(&self, surface: &mut Surface) {
        self.draw(surface, self.rect.x, self.rect.y);
    }

    fn draw_title(&self, surface: &mut Surface, x: usize, y: usize) {
        // One corner and one blank separator on each side.
        let room = self.rect.width.saturating_sub(4);
        if room == 0 || self.title.is_empty() {
            return;
        }

        let title = TextCell::new(self.title.as_str(), room)
            .align(Align::Center)
            .style(Style::bold());
        let start = x + 2 + title.offset();

        surface.set_cell((start - 1, y), ' ', Style::default());
        surface.set_cell((start + title.visible_width(), y), ' ', Style::default());
        title.draw(surface, x + 2, y);
    }
}

impl Drawable for Frame {
    fn draw(&self, surface: &mut Surface, x: usize, y: usize) {
        let Rectangle { width, height, .. } = self.rect;
        if width < 2 || height < 2 {
            return;
        }

        let (right, bottom) = (x + width - 1, y + height - 1);
        let style = Style::default();

        surface.set_cell((x, y), TOP_LEFT, style);
        surface.set_cell((right, y), TOP_RIGHT, style);
        surface.set_cell((x, bottom), BOTTOM_LEFT, style);
        surface.set_cell((right, bottom), BOTTOM_RIGHT, style);

        for column in x + 1..right {
            surface.set_cell((column, y), HORIZONTAL, style);
            surface.set_cell((column, bottom), HORIZONTAL, style);
        }
        for row in y + 1..bottom {
            surface.set_cell((x, row), VERTICAL, style);
            surface.set_cell((right, row), VERTICAL, style);
        }

        self.draw_title(surface, x, y);
    }

    fn size(&self) -> (usize, usize) {
        (self.rect.width, self.rect.height)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Row {
    Text(TextCell),
    Blank,
}

/// Rows past the box height are not drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextBox {
    rect: Rectangle,
    rows: Vec<Row>,
}

impl TextBox {
    pub fn new(rect: Rectangle) -> Self {
        Self {
            rect,
            rows: Vec::new(),
        }
    }

    pub fn rect(&self) -> Rectangle {
        self.rect
    }

    pub fn add_text(&mut self, cell: TextCell) {
        self.rows.push(Row::Text(cell));
    }

    pub fn add_line(&mut self, text: impl Into<String>) {
        self.add_text(TextCell::new(text, self.rect.width));
    }

    pub fn add_space(&mut self) {
        self.rows.push(Row::Blank);
    }

    pub fn render(&self, surface: &mut Surface) {
        self.draw(surface, self.rect.x, self.rect.y);
    }
}

impl Drawable for TextBox {
    fn draw(&self, surface: &mut Surface, x: usize, y: usize) {
        let mut cursor = 0;
        for row in &self.rows {
            if cursor >= self.rect.height {
                break;
            }
            if let Row::Text(cell) = row {
                cell.draw(surface, x, y + cursor);
            }
            cursor += 1;
        }
    }

    fn size(&self) -> (usize, usize) {
        (self.rect.width, self.rect.height)
    }
}

/// `size` is the declared size, not the sum of the children.
pub struct VBox {
    width: usize,
    height: usize,
    children: Vec<Box<dyn Drawable>>,
}

impl VBox {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            children: Vec::new(),
        }
    }

    pub fn push(&mut self, child: impl Drawable + 'static) {
        self.children.push(Box::new(child));
    }

    pub fn with(mut self, child: impl Drawable + 'static) -> Self {
        self.push(child);
        self
    }
}

impl Drawable for VBox {
    fn draw(&self, surface: &mut Surface, x: usize, y: usize) {
        let mut row = 0;
        for child in &self.children {
            let (width, height) = child.size();
            let child_x = x + self.width.saturating_sub(width) / 2;
            child.draw(surface, child_x, y + row);
            row += height;
        }
    }

    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

pub struct HBox {
    width: usize,
    height: usize,
    children: Vec<Box<dyn Drawable>>,
}

impl HBox {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            children: Vec::new(),
        }
    }

    pub fn push(&mut self, child: impl Drawable + 'static) {
        self.children.push(Box::new(child));
    }

    pub fn with(mut self, child: impl Drawable + 'static) -> Self {
        self.push(child);
        self
    }

}

impl Drawable for HBox {
    fn draw(&self, surface: &mut Surface, x: usize, y: usize) {
        let mut column = 0;
        for child in &self.children {
            let (width, height) = child.size();
            let child_y = y + self.height.saturating_sub(height) / 2;
            child.draw(surface, x + column, child_y);
            column += width;
        }
    }

    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}
