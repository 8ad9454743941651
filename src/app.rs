use std::{
    io::Write,
    ops::ControlFlow,
    sync::{
        mpsc::{self, Receiver, TryRecvError},
        Arc,
    },
    thread,
    time::Duration,
};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

use crate::{
    errors::WeatherError, location::Location, snapshot::WeatherSnapshot, source::WeatherSource,
    terminal_ui::Surface, view,
};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

type FetchResult = Result<WeatherSnapshot, WeatherError>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    Refresh,
    Resize(u16, u16),
    Ignore,
}

pub fn command_for(event: &Event) -> Command {
    match event {
        Event::Key(KeyEvent {
            code: KeyCode::Esc | KeyCode::Char('q'),
            ..
        }) => Command::Quit,
        Event::Key(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers,
            ..
        }) if modifiers.contains(KeyModifiers::CONTROL) => Command::Quit,
        Event::Key(KeyEvent {
            code: KeyCode::Char('r'),
            ..
        }) => Command::Refresh,
        Event::Resize(width, height) => Command::Resize(*width, *height),
        _ => Command::Ignore,
    }
}

pub struct App {
    surface: Surface,
    location: Location,
    snapshot: WeatherSnapshot,
    source: Arc<dyn WeatherSource>,
    // Present while a fetch is in flight.
    fetch_rx: Option<Receiver<FetchResult>>,
}

impl App {
    pub fn new(source: Arc<dyn WeatherSource>, location: Location, size: (u16, u16)) -> Self {
        Self {
            surface: Surface::empty(size),
            location,
            snapshot: WeatherSnapshot::default(),
            source,
            fetch_rx: None,
        }
    }

    pub fn run(&mut self, stdout: &mut impl Write) -> anyhow::Result<()> {
        tracing::info!(location = %self.location, "starting");

        self.refresh();
        self.redraw(stdout)?;

        loop {
            if event::poll(POLL_INTERVAL)? {
                let command = command_for(&event::read()?);
                if self.handle(command, stdout)?.is_break() {
                    return Ok(());
                }
            }

            if self.receive() {
                self.redraw(stdout)?;
            }
        }
    }

    pub fn handle(
        &mut self,
        command: Command,
        stdout: &mut impl Write,
    ) -> anyhow::Result<ControlFlow<()>> {
        match command {
            Command::Quit => {
                tracing::info!("quit requested");
                return Ok(ControlFlow::Break(()));
            }
            Command::Refresh => self.refresh(),
            Command::Resize(width, height) => {
                tracing::debug!(width, height, "terminal resized");
                self.surface.resize((width, height));
                self.redraw(stdout)?;
            }
            Command::Ignore => (),
        }

        Ok(ControlFlow::Continue(()))
    }

    /// Starts a fetch on a worker thread unless one is already running.
    pub fn refresh(&mut self) {
        if self.is_fetching() {
            tracing::debug!("refresh ignored, fetch already running");
            return;
        }

        let (fetch_tx, fetch_rx) = mpsc::channel();
        self.fetch_rx = Some(fetch_rx);

        let source = Arc::clone(&self.source);
        let location = self.location.clone();
        thread::spawn(move || {
            // The loop may already be gone when the user quit mid-fetch.
            let _ = fetch_tx.send(source.fetch(&location));
        });
    }

    /// Takes a finished fetch, if any. Returns whether the snapshot changed.
    pub fn receive(&mut self) -> bool {
        let received = match &self.fetch_rx {
            Some(fetch_rx) => fetch_rx.try_recv(),
            None => return false,
        };

        match received {
            Ok(result) => {
                self.fetch_rx = None;
                self.apply(result)
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                tracing::warn!("fetch worker exited without a result");
                self.fetch_rx = None;
                false
            }
        }
    }

    fn is_fetching(&self) -> bool {
        self.fetch_rx.is_some()
    }

    fn apply(&mut self, result: FetchResult) -> bool {
        match result {
            Ok(snapshot) => {
                if let (Some(latitude), Some(longitude)) = (snapshot.lat, snapshot.lon) {
                    self.location.coordinates = Some((latitude, longitude));
                }
                tracing::info!(
                    location = %self.location,
                    hourly = snapshot.hourly.len(),
                    daily = snapshot.daily.len(),
                    current = snapshot.current.is_available(),
                    "snapshot updated"
                );
                self.snapshot = snapshot;
                true
            }
            Err(error) => {
                tracing::warn!(%error, "fetch failed, keeping the last snapshot");
                false
            }
        }
    }

    pub fn compose(&mut self) {
        self.surface.clear();
        view::build(&self.snapshot, &self.location, self.surface.width()).draw(&mut self.surface);
    }

    fn redraw(&mut self, stdout: &mut impl Write) -> anyhow::Result<()> {
        self.compose();
        self.surface.render(stdout)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::atomic::{AtomicUsize, Ordering},
        time::Instant,
    };

    use super::*;
    use crate::snapshot::{Condition, Daily, Temperatures};

    struct Scripted {
        fetches: AtomicUsize,
        fail: bool,
    }

    impl WeatherSource for Scripted {
        fn fetch(&self, _location: &Location) -> Result<WeatherSnapshot, WeatherError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(WeatherError::InvalidLocation("nowhere".into()));
            }
            Ok(WeatherSnapshot {
                daily: vec![Daily {
                    dt: chrono::Utc::now(),
                    temp: Temperatures { min: 60.0, max: 75.0 },
                    pop: 0.0,
                    weather: vec![Condition {
                        main: "Clear".into(),
                    }],
                }],
                lat: Some(41.85),
                lon: Some(-87.65),
                ..WeatherSnapshot::default()
            })
        }
    }

    struct Panicking {
        fetches: AtomicUsize,
    }

    impl WeatherSource for Panicking {
        fn fetch(&self, _location: &Location) -> Result<WeatherSnapshot, WeatherError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            panic!("source blew up");
        }
    }

    fn chicago() -> Location {
        Location::parse("Chicago, IL, US").unwrap()
    }

    fn app(fail: bool) -> (App, Arc<Scripted>) {
        let source = Arc::new(Scripted {
            fetches: AtomicUsize::new(0),
            fail,
        });
        let app = App::new(source.clone(), chicago(), (64, 23));
        (app, source)
    }

    fn wait_for_fetch(app: &mut App) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.is_fetching() && Instant::now() < deadline {
            if app.receive() {
                return true;
            }
            thread::sleep(Duration::from_millis(5));
        }
        false
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn maps_keys_to_commands() {
        assert_eq!(command_for(&key(KeyCode::Char('q'))), Command::Quit);
        assert_eq!(command_for(&key(KeyCode::Esc)), Command::Quit);
        assert_eq!(command_for(&key(KeyCode::Char('r'))), Command::Refresh);
        assert_eq!(command_for(&key(KeyCode::Char('x'))), Command::Ignore);
        assert_eq!(command_for(&Event::Resize(40, 20)), Command::Resize(40, 20));
        assert_eq!(
            command_for(&Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL
            ))),
            Command::Quit
        );
    }

    #[test]
    fn refresh_delivers_a_snapshot_to_the_loop() {
        let (mut app, source) = app(false);

        app.refresh();
        assert!(wait_for_fetch(&mut app));
        assert!(!app.is_fetching());
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);

        app.compose();
        assert!(app.surface.row_text(3).contains("Clear"));
    }

    #[test]
    fn only_one_fetch_runs_at_a_time() {
        let (mut app, source) = app(false);

        app.refresh();
        app.refresh();
        wait_for_fetch(&mut app);

        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failed_fetch_keeps_the_last_snapshot() {
        let (mut app, _source) = app(true);

        app.refresh();
        assert!(!wait_for_fetch(&mut app));
        assert!(!app.is_fetching());
        assert_eq!(&app.snapshot, &WeatherSnapshot::default());

        app.compose();
        assert!(app.surface.row_text(0).contains("Chicago, IL, US"));
    }

    #[test]
    fn delivered_snapshot_fills_in_coordinates() {
        let (mut app, _source) = app(false);
        assert_eq!(app.location.coordinates, None);

        app.refresh();
        assert!(wait_for_fetch(&mut app));

        assert_eq!(app.location.coordinates, Some((41.85, -87.65)));
        assert!(app.location.to_string().ends_with("(41.8500, -87.6500)"));
    }

    #[test]
    fn resize_rebuilds_the_surface_without_fetching() {
        let (mut app, source) = app(false);
        app.refresh();
        assert!(wait_for_fetch(&mut app));
        let snapshot = app.snapshot.clone();

        let mut out = Vec::new();
        let flow = app.handle(Command::Resize(40, 23), &mut out).unwrap();

        assert_eq!(flow, ControlFlow::Continue(()));
        assert_eq!(app.surface.width(), 40);
        assert_eq!(app.surface.row_text(0).chars().nth(39), Some('┐'));
        assert!(app.surface.row_text(3).contains("Clear"));
        assert!(!out.is_empty());
        assert_eq!(app.snapshot, snapshot);
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn quit_breaks_the_loop() {
        let (mut app, _source) = app(false);

        let flow = app.handle(Command::Quit, &mut Vec::new()).unwrap();

        assert_eq!(flow, ControlFlow::Break(()));
    }

    #[test]
    fn panicking_fetch_does_not_block_later_refreshes() {
        let source = Arc::new(Panicking {
            fetches: AtomicUsize::new(0),
        });
        let mut app = App::new(source.clone(), chicago(), (64, 23));

        app.refresh();
        assert!(!wait_for_fetch(&mut app));
        assert!(!app.is_fetching());

        app.refresh();
        assert!(!wait_for_fetch(&mut app));
        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
    }
}
