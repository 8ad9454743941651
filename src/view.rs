use crate::{
    format,
    location::Location,
    snapshot::{Daily, Hourly, WeatherSnapshot},
    terminal_ui::{Rectangle, Surface},
    widgets::{Align, Drawable, Frame, HBox, TextBox, TextCell, VBox},
};

pub const MAX_WIDTH: usize = 64;
pub const TOTAL_HEIGHT: usize = 23;

const HOURLY_COLUMNS: usize = 5;
const HOURLY_SPAN: usize = 10;
const DAILY_COLUMNS: usize = 4;

pub fn usable_width(terminal_width: usize) -> usize {
    terminal_width.min(MAX_WIDTH)
}

pub struct Layout {
    frames: Vec<Frame>,
    content: Vec<Placed>,
}

struct Placed {
    x: usize,
    y: usize,
    drawable: Box<dyn Drawable>,
}

impl Layout {
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame(&self, title: &str) -> Option<&Frame> {
        self.frames.iter().find(|frame| frame.title() == title)
    }

    pub fn draw(&self, surface: &mut Surface) {
        for frame in &self.frames {
            frame.render(surface);
        }
        for placed in &self.content {
            placed.drawable.draw(surface, placed.x, placed.y);
        }
    }

    fn place(&mut self, x: usize, y: usize, drawable: impl Drawable + 'static) {
        self.content.push(Placed {
            x,
            y,
            drawable: Box::new(drawable),
        });
    }
}

pub fn build(snapshot: &WeatherSnapshot, location: &Location, terminal_width: usize) -> Layout {
    let width = usable_width(terminal_width);
    let half = width / 2;

    let outer = Rectangle::new(0, 0, width, TOTAL_HEIGHT);
    let today = Rectangle::new(2, 2, half.saturating_sub(2), 6);
    let current = Rectangle::new(half + 1, 2, half.saturating_sub(3), 6);
    let hourly = Rectangle::new(2, 9, width.saturating_sub(4), 5);
    let daily = Rectangle::new(2, 15, width.saturating_sub(4), 7);

    let mut layout = Layout {
        frames: vec![
            Frame::new(outer, location.title()),
            Frame::new(today, "Today"),
            Frame::new(current, "Current"),
            Frame::new(hourly, "Hourly"),
            Frame::new(daily, "Daily"),
        ],
        content: Vec::new(),
    };

    let today = today_panel(snapshot, interior(today));
    layout.place(today.rect().x, today.rect().y, today);

    let current = current_panel(snapshot, interior(current));
    layout.place(current.rect().x, current.rect().y, current);

    let hourly = interior(hourly);
    layout.place(hourly.x, hourly.y, hourly_strip(snapshot, hourly));

    let daily = interior(daily);
    layout.place(daily.x, daily.y, daily_strip(snapshot, daily));

    layout
}

/// The area inside a frame's border, less one column of padding per side.
fn interior(frame: Rectangle) -> Rectangle {
    Rectangle::new(
        frame.x + 2,
        frame.y + 1,
        frame.width.saturating_sub(4),
        frame.height.saturating_sub(2),
    )
}

fn today_panel(snapshot: &WeatherSnapshot, rect: Rectangle) -> TextBox {
    let mut panel = TextBox::new(rect);
    if let Some(today) = snapshot.daily.first() {
        panel.add_line(today.condition());
        panel.add_line(format!("High: {}", format::temperature(today.temp.max)));
        panel.add_line(format!("Low: {}", format::temperature(today.temp.min)));
        panel.add_line(format!("% Precip: {}", format::percent(today.pop)));
    }
    panel
}

fn current_panel(snapshot: &WeatherSnapshot, rect: Rectangle) -> TextBox {
    let mut panel = TextBox::new(rect);
    let current = &snapshot.current;
    if current.is_available() {
        panel.add_line(current.condition());
        panel.add_line(format!("Temperature: {}", format::temperature(current.temp)));
        panel.add_line(format!("Feels Like: {}", format::temperature(current.feels_like)));
        panel.add_line(format!(
            "Wind: {} from the {}",
            format::wind_speed(current.wind_speed),
            format::compass(current.wind_deg)
        ));
    }
    panel
}

/// Every other hour of the next ten, skipping the hour in progress.
fn hourly_strip(snapshot: &WeatherSnapshot, rect: Rectangle) -> HBox {
    let column_width = rect.width / HOURLY_COLUMNS;
    snapshot
        .hourly
        .iter()
        .skip(1)
        .take(HOURLY_SPAN)
        .step_by(2)
        .map(|hour| hour_column(snapshot, hour, column_width, rect.height))
        .fold(HBox::new(rect.width, rect.height), HBox::with)
}

fn hour_column(snapshot: &WeatherSnapshot, hour: &Hourly, width: usize, height: usize) -> VBox {
    let time = snapshot.local_time(hour.dt).format("%-I:%M%p").to_string();
    column(
        width,
        height,
        [time, hour.condition().to_string(), format::temperature(hour.temp)],
    )
}

fn daily_strip(snapshot: &WeatherSnapshot, rect: Rectangle) -> HBox {
    let column_width = rect.width / DAILY_COLUMNS;
    snapshot
        .daily
        .iter()
        .skip(1)
        .take(DAILY_COLUMNS)
        .map(|day| day_column(snapshot, day, column_width, rect.height))
        .fold(HBox::new(rect.width, rect.height), HBox::with)
}

fn day_column(snapshot: &WeatherSnapshot, day: &Daily, width: usize, height: usize) -> VBox {
    let name = snapshot.local_time(day.dt).format("%a").to_string();
    column(
        width,
        height,
        [
            name,
            day.condition().to_string(),
            format!("H: {}", format::temperature(day.temp.max)),
            format!("L: {}", format::temperature(day.temp.min)),
            format!("Precip: {}", format::percent(day.pop)),
        ],
    )
}

fn column(width: usize, height: usize, lines: impl IntoIterator<Item = String>) -> VBox {
    lines
        .into_iter()
        .map(|line| TextCell::new(line, width).align(Align::Center))
        .fold(VBox::new(width, height), VBox::with)
}
