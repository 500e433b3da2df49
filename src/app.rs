use crate::config::PanelConfig;
use crate::event::{AppEvent, Event, EventHandler};
use crate::panel::{Alert, PanelEvent, SyslogPanel};
use crate::relay::NotificationRelay;
use crate::socket::{CONNECT_EVENT, DISCONNECT_EVENT};
use crate::{log_debug, log_info, log_warn};
use ratatui::{
    DefaultTerminal,
    crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use color_eyre::Result;
use std::time::{Duration, Instant};

/// The alert currently on screen, if any, and when it goes away.
#[derive(Debug, Default)]
pub struct AlertSlot {
    current: Option<(Alert, Instant)>,
}

impl AlertSlot {
    /// Replaces whatever is showing.
    pub fn show(&mut self, alert: Alert, now: Instant, ttl: Duration) {
        self.current = Some((alert, now + ttl));
    }

    pub fn dismiss(&mut self) -> bool {
        self.current.take().is_some()
    }

    /// Drops the alert once its time is up. Returns true if it did.
    pub fn expire(&mut self, now: Instant) -> bool {
        match &self.current {
            Some((_, until)) if now >= *until => self.dismiss(),
            _ => false,
        }
    }

    pub fn current(&self) -> Option<&Alert> {
        self.current.as_ref().map(|(alert, _)| alert)
    }
}

/// Maps a key press to what the app should do with it.
pub fn key_action(key_event: KeyEvent) -> Option<AppEvent> {
    match key_event.code {
        KeyCode::Esc | KeyCode::Char('q') => Some(AppEvent::Quit),
        KeyCode::Char('c' | 'C') if key_event.modifiers == KeyModifiers::CONTROL => Some(AppEvent::Quit),
        KeyCode::Enter | KeyCode::Char(' ') => Some(AppEvent::DismissAlert),
        KeyCode::Char('p') => Some(AppEvent::PingMaster),
        _ => None,
    }
}

/// Application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    pub running: bool,
    /// The syslog panel and its message buffer.
    pub panel: SyslogPanel,
    /// Connection to the master.
    pub relay: NotificationRelay,
    /// Popup raised for the latest message.
    pub alert: AlertSlot,
    /// Event handler.
    pub events: EventHandler,
}

impl App {
    /// Constructs a new instance of [`App`]. Must run inside the tokio runtime.
    pub async fn new(config: PanelConfig) -> Result<Self> {
        let master = config.master_url()?;
        let relay = NotificationRelay::new(&config.identity, &master)?;

        let endpoint = relay.endpoint().to_string();
        relay.socket().on(CONNECT_EVENT, move |_| log_info!("Connected to {}", endpoint));
        let endpoint = relay.endpoint().to_string();
        relay.socket().on(DISCONNECT_EVENT, move |_| log_warn!("Lost connection to {}", endpoint));

        let events = EventHandler::new();
        let panel = SyslogPanel::new(config);
        panel.start(&relay, events.sender());

        Ok(Self {
            running: true,
            panel,
            relay,
            alert: AlertSlot::default(),
            events,
        })
    }

    /// Run the application's main loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let mut needs_redraw = true;

        while self.running {
            if needs_redraw {
                terminal.draw(|frame| frame.render_widget(&self, frame.area()))?;
                // save power
                needs_redraw = false;
            }

            let event = self.events.next().await?;
            needs_redraw |= self.update(event);
        }
        Ok(())
    }

    /// Applies one event. Returns true if the screen needs a redraw.
    pub fn update(&mut self, event: Event) -> bool {
        match event {
            Event::Tick => self.alert.expire(Instant::now()),
            Event::Refresh => true,
            Event::Crossterm(event) => match event {
                CrosstermEvent::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    self.handle_key_events(key_event);
                    false
                }
                CrosstermEvent::Resize(_, _) => true,
                _ => false,
            },
            Event::App(app_event) => match app_event {
                AppEvent::Quit => {
                    self.quit();
                    false
                }
                AppEvent::DismissAlert => self.alert.dismiss(),
                AppEvent::PingMaster => {
                    self.panel.ping_master(&self.relay);
                    false
                }
            },
            Event::Notification { name, payload } => self.handle_notification(name, payload),
        }
    }

    /// Handles the key events and updates the state of [`App`].
    pub fn handle_key_events(&mut self, key_event: KeyEvent) {
        if let Some(app_event) = key_action(key_event) {
            self.events.send(app_event);
        }
    }

    /// Feeds one relay notification to the panel. Returns true if the
    /// screen needs a redraw.
    fn handle_notification(&mut self, name: String, payload: serde_json::Value) -> bool {
        let mut redraw = false;
        for event in self.panel.socket_notification_received(name, payload) {
            match event {
                PanelEvent::AlertRaised(alert) => {
                    let ttl = Duration::from_secs(self.panel.config().alert_seconds);
                    self.alert.show(alert, Instant::now(), ttl);
                }
                PanelEvent::MessageAdded { total } => log_debug!("Panel now holds {} messages", total),
                PanelEvent::RenderRequested => redraw = true,
            }
        }
        redraw
    }

    /// Set running to false to quit the application.
    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::{NEW_MESSAGE, PINGMASTER};
    use crate::socket::OutboundReceiver;
    use serde_json::json;
    use url::Url;

    fn detached_app(config: PanelConfig) -> (App, OutboundReceiver) {
        let master = Url::parse("http://localhost:8080").unwrap();
        let (relay, outbound) = NotificationRelay::detached(&config.identity, &master).unwrap();
        let app = App {
            running: true,
            panel: SyslogPanel::new(config),
            relay,
            alert: AlertSlot::default(),
            events: EventHandler::idle(),
        };
        (app, outbound)
    }

    fn new_message(payload: serde_json::Value) -> Event {
        Event::Notification { name: NEW_MESSAGE.to_string(), payload }
    }

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(key_action(press(KeyCode::Char('q'), KeyModifiers::NONE)), Some(AppEvent::Quit));
        assert_eq!(key_action(press(KeyCode::Esc, KeyModifiers::NONE)), Some(AppEvent::Quit));
        assert_eq!(key_action(press(KeyCode::Char('c'), KeyModifiers::CONTROL)), Some(AppEvent::Quit));
        assert_eq!(key_action(press(KeyCode::Enter, KeyModifiers::NONE)), Some(AppEvent::DismissAlert));
        assert_eq!(key_action(press(KeyCode::Char('p'), KeyModifiers::NONE)), Some(AppEvent::PingMaster));
        assert_eq!(key_action(press(KeyCode::Char('c'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_new_message_raises_alert_and_redraws() {
        let (mut app, _outbound) = detached_app(PanelConfig::default());

        let redraw = app.update(new_message(json!({"type": "ERROR", "message": "disk full", "timestamp": ""})));

        assert!(redraw);
        assert_eq!(app.panel.messages().len(), 1);
        assert_eq!(
            app.alert.current(),
            Some(&Alert { title: "ERROR".to_string(), message: "disk full".to_string() })
        );
    }

    #[test]
    fn test_silent_and_unrelated_notifications() {
        let (mut app, _outbound) = detached_app(PanelConfig::default());

        assert!(app.update(new_message(json!({"type": "INFO", "message": "quiet", "silent": true}))));
        assert!(app.alert.current().is_none());

        let status = Event::Notification { name: "STATUS".to_string(), payload: json!("ok") };
        assert!(!app.update(status));
        assert_eq!(app.panel.messages().len(), 1);
    }

    #[test]
    fn test_refresh_and_app_events() {
        let (mut app, mut outbound) = detached_app(PanelConfig::default());

        assert!(app.update(Event::Refresh));
        assert!(!app.update(Event::Tick));

        app.update(new_message(json!({"type": "WARNING", "message": "hot"})));
        assert!(app.update(Event::App(AppEvent::DismissAlert)));
        assert!(app.alert.current().is_none());

        app.update(Event::App(AppEvent::PingMaster));
        assert_eq!(outbound.try_recv().unwrap().data, vec![json!(PINGMASTER), json!({})]);

        app.update(Event::App(AppEvent::Quit));
        assert!(!app.running);
    }

    #[test]
    fn test_alert_expires_after_ttl() {
        let mut slot = AlertSlot::default();
        let start = Instant::now();
        let alert = Alert { title: "ERROR".to_string(), message: "disk full".to_string() };

        slot.show(alert.clone(), start, Duration::from_secs(5));
        assert!(!slot.expire(start + Duration::from_secs(4)));
        assert_eq!(slot.current(), Some(&alert));

        assert!(slot.expire(start + Duration::from_secs(5)));
        assert!(slot.current().is_none());
    }

    #[test]
    fn test_newer_alert_replaces_older_and_dismiss_clears() {
        let mut slot = AlertSlot::default();
        let now = Instant::now();
        slot.show(Alert { title: "INFO".to_string(), message: "a".to_string() }, now, Duration::from_secs(5));
        slot.show(Alert { title: "ERROR".to_string(), message: "b".to_string() }, now, Duration::from_secs(5));

        assert_eq!(slot.current().map(|a| a.message.as_str()), Some("b"));
        assert!(slot.dismiss());
        assert!(!slot.dismiss());
    }
}
