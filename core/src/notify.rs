//! User-facing notifications raised from code that has no UI of its own.
//!
//! # Design
//! `Notifier` is the capability the HTTP client reports failures through.
//! `NotificationSink` is a single-slot `Notifier`: whatever renders toasts
//! registers itself with `set_instance` once it is ready, and everything
//! sent before that (or after `clear_instance`) is dropped. There is exactly
//! one subscriber at a time; registering again replaces the previous one.

use std::sync::Arc;

use parking_lot::RwLock;

/// Four-channel toast capability. `title` is optional on every channel.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str, title: Option<&str>);
    fn info(&self, message: &str, title: Option<&str>);
    fn warning(&self, message: &str, title: Option<&str>);
    fn error(&self, message: &str, title: Option<&str>);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn success(&self, message: &str, title: Option<&str>) {
        (**self).success(message, title);
    }

    fn info(&self, message: &str, title: Option<&str>) {
        (**self).info(message, title);
    }

    fn warning(&self, message: &str, title: Option<&str>) {
        (**self).warning(message, title);
    }

    fn error(&self, message: &str, title: Option<&str>) {
        (**self).error(message, title);
    }
}

/// Single registration point for a `Notifier`.
#[derive(Default)]
pub struct NotificationSink {
    slot: RwLock<Option<Arc<dyn Notifier>>>,
}

impl NotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `instance`, replacing any previous one.
    pub fn set_instance(&self, instance: Arc<dyn Notifier>) {
        *self.slot.write() = Some(instance);
    }

    pub fn clear_instance(&self) {
        *self.slot.write() = None;
    }

    pub fn has_instance(&self) -> bool {
        self.slot.read().is_some()
    }

    // The lock is released before the handler runs, so a handler may
    // re-register without deadlocking.
    fn current(&self) -> Option<Arc<dyn Notifier>> {
        self.slot.read().clone()
    }
}

impl Notifier for NotificationSink {
    fn success(&self, message: &str, title: Option<&str>) {
        if let Some(instance) = self.current() {
            instance.success(message, title);
        }
    }

    fn info(&self, message: &str, title: Option<&str>) {
        if let Some(instance) = self.current() {
            instance.info(message, title);
        }
    }

    fn warning(&self, message: &str, title: Option<&str>) {
        if let Some(instance) = self.current() {
            instance.warning(message, title);
        }
    }

    fn error(&self, message: &str, title: Option<&str>) {
        if let Some(instance) = self.current() {
            instance.error(message, title);
        }
    }
}

impl std::fmt::Debug for NotificationSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationSink")
            .field("registered", &self.has_instance())
            .finish()
    }
}

/// Writes notifications to the `tracing` subscriber instead of a UI.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str, title: Option<&str>) {
        tracing::info!(title = title.unwrap_or_default(), "{message}");
    }

    fn info(&self, message: &str, title: Option<&str>) {
        tracing::info!(title = title.unwrap_or_default(), "{message}");
    }

    fn warning(&self, message: &str, title: Option<&str>) {
        tracing::warn!(title = title.unwrap_or_default(), "{message}");
    }

    fn error(&self, message: &str, title: Option<&str>) {
        tracing::error!(title = title.unwrap_or_default(), "{message}");
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use parking_lot::Mutex;

    use super::Notifier;

    /// Notifier that records `(channel, message, title)` triples.
    #[derive(Default)]
    pub struct Recorder {
        pub calls: Mutex<Vec<(&'static str, String, Option<String>)>>,
    }

    impl Recorder {
        pub fn calls(&self) -> Vec<(&'static str, String, Option<String>)> {
            self.calls.lock().clone()
        }

        fn push(&self, channel: &'static str, message: &str, title: Option<&str>) {
            self.calls
                .lock()
                .push((channel, message.to_string(), title.map(str::to_string)));
        }
    }

    impl Notifier for Recorder {
        fn success(&self, message: &str, title: Option<&str>) {
            self.push("success", message, title);
        }

        fn info(&self, message: &str, title: Option<&str>) {
            self.push("info", message, title);
        }

        fn warning(&self, message: &str, title: Option<&str>) {
            self.push("warning", message, title);
        }

        fn error(&self, message: &str, title: Option<&str>) {
            self.push("error", message, title);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::Recorder;
    use super::*;

    #[test]
    fn calls_before_registration_are_dropped() {
        let sink = NotificationSink::new();
        assert!(!sink.has_instance());
        sink.error("lost", Some("Erro da API"));
        sink.success("lost", None);

        let recorder = Arc::new(Recorder::default());
        sink.set_instance(recorder.clone());
        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn forwards_each_channel_to_the_registered_instance() {
        let sink = NotificationSink::new();
        let recorder = Arc::new(Recorder::default());
        sink.set_instance(recorder.clone());

        sink.success("saved", Some("Ok"));
        sink.info("heads up", None);
        sink.warning("careful", None);
        sink.error("broken", Some("Erro da API"));

        assert_eq!(
            recorder.calls(),
            vec![
                ("success", "saved".to_string(), Some("Ok".to_string())),
                ("info", "heads up".to_string(), None),
                ("warning", "careful".to_string(), None),
                ("error", "broken".to_string(), Some("Erro da API".to_string())),
            ]
        );
    }

    #[test]
    fn last_registration_wins() {
        let sink = NotificationSink::new();
        let first = Arc::new(Recorder::default());
        let second = Arc::new(Recorder::default());

        sink.set_instance(first.clone());
        sink.error("one", None);
        sink.set_instance(second.clone());
        sink.error("two", None);

        assert_eq!(first.calls(), vec![("error", "one".to_string(), None)]);
        assert_eq!(second.calls(), vec![("error", "two".to_string(), None)]);
    }

    #[test]
    fn clearing_stops_delivery() {
        let sink = NotificationSink::new();
        let recorder = Arc::new(Recorder::default());
        sink.set_instance(recorder.clone());
        sink.clear_instance();
        sink.warning("dropped", None);
        assert!(recorder.calls().is_empty());
        assert!(!sink.has_instance());
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<parking_lot::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn tracing_notifier_maps_channels_to_levels() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .with_target(false)
            .finish();

        let sink = NotificationSink::new();
        sink.set_instance(Arc::new(TracingNotifier));
        tracing::subscriber::with_default(subscriber, || {
            sink.success("saved", None);
            sink.info("heads up", None);
            sink.warning("careful", None);
            sink.error("broken", Some("Erro da API"));
        });

        let output = String::from_utf8(captured.0.lock().clone()).unwrap();
        let lines: Vec<&str> = output.lines().map(str::trim_start).collect();
        assert_eq!(lines.len(), 4, "{output}");
        assert!(lines[0].starts_with("INFO") && lines[0].contains("saved"));
        assert!(lines[1].starts_with("INFO") && lines[1].contains("heads up"));
        assert!(lines[2].starts_with("WARN") && lines[2].contains("careful"));
        assert!(lines[3].starts_with("ERROR") && lines[3].contains("broken"));
        assert!(lines[3].contains("Erro da API"));
    }

    struct Reregister {
        sink: Arc<NotificationSink>,
        next: Arc<Recorder>,
    }

    impl Notifier for Reregister {
        fn success(&self, _: &str, _: Option<&str>) {}
        fn info(&self, _: &str, _: Option<&str>) {}
        fn warning(&self, _: &str, _: Option<&str>) {}
        fn error(&self, _: &str, _: Option<&str>) {
            self.sink.set_instance(self.next.clone());
        }
    }

    #[test]
    fn handler_may_replace_itself() {
        let sink = Arc::new(NotificationSink::new());
        let next = Arc::new(Recorder::default());
        sink.set_instance(Arc::new(Reregister {
            sink: sink.clone(),
            next: next.clone(),
        }));

        sink.error("swap", None);
        sink.error("after", None);
        assert_eq!(next.calls(), vec![("error", "after".to_string(), None)]);
    }
}
