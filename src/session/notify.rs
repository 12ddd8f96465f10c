//! Freeze/thaw batching of change notifications.
//!
//! A command runs between `freeze` and `thaw`. In between, any number of
//! mutations may mark the pending flags; thaw then syncs the observable
//! properties and calls each listener at most once per kind:
//!
//! 1. sync `text` (if TEXT is pending)
//! 2. sync `selected_text` (if SELECTION is pending)
//! 3. `on_text_changed` (if TEXT)
//! 4. `on_selection_changed` (if SELECTION)
//!
//! Both syncs happen before either notification, so a listener never sees
//! fresh text next to a stale selection. The batching state is private to
//! the crate; hosts only register [`ChangeListener`]s on the session.

use crate::text::TextBuffer;
use bitflags::bitflags;

bitflags! {
    /// Pending change kinds for one freeze/thaw cycle.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub(crate) struct ChangeFlags: u8 {
        const SELECTION = 1 << 0;
        const TEXT = 1 << 1;
    }
}

/// The externally observable state of a text field, as of the last thaw.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SyncedProperties {
    text: String,
    selected_text: String,
    selection_start: usize,
    selection_length: usize,
}

impl SyncedProperties {
    /// Full text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Currently selected text (empty for a bare caret).
    #[must_use]
    pub fn selected_text(&self) -> &str {
        &self.selected_text
    }

    /// Lower end of the selection.
    #[must_use]
    pub fn selection_start(&self) -> usize {
        self.selection_start
    }

    /// Selection length in code points.
    #[must_use]
    pub fn selection_length(&self) -> usize {
        self.selection_length
    }
}

/// Receives change notifications from an edit session.
///
/// Notifications carry no delta: listeners read whatever they need from
/// the synced properties.
pub trait ChangeListener {
    /// The text changed.
    fn on_text_changed(&mut self, _props: &SyncedProperties) {}

    /// The selection (or caret) changed.
    fn on_selection_changed(&mut self, _props: &SyncedProperties) {}
}

/// Handle returned when registering a listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct TextChangedFn<F>(F);

impl<F: FnMut(&SyncedProperties)> ChangeListener for TextChangedFn<F> {
    fn on_text_changed(&mut self, props: &SyncedProperties) {
        (self.0)(props);
    }
}

struct SelectionChangedFn<F>(F);

impl<F: FnMut(&SyncedProperties)> ChangeListener for SelectionChangedFn<F> {
    fn on_selection_changed(&mut self, props: &SyncedProperties) {
        (self.0)(props);
    }
}

/// Per-session notification state: pending flags, synced properties and
/// listeners.
#[derive(Default)]
pub(crate) struct ChangeNotifier {
    pending: ChangeFlags,
    properties: SyncedProperties,
    listeners: Vec<(ListenerId, Box<dyn ChangeListener>)>,
    next_id: u64,
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("pending", &self.pending)
            .field("properties", &self.properties)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ChangeNotifier {
    /// Create a notifier with no listeners.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a listener.
    pub(crate) fn add_listener<L>(&mut self, listener: L) -> ListenerId
    where
        L: ChangeListener + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Register a closure called on text changes.
    pub(crate) fn on_text_changed<F>(&mut self, f: F) -> ListenerId
    where
        F: FnMut(&SyncedProperties) + 'static,
    {
        self.add_listener(TextChangedFn(f))
    }

    /// Register a closure called on selection changes.
    pub(crate) fn on_selection_changed<F>(&mut self, f: F) -> ListenerId
    where
        F: FnMut(&SyncedProperties) + 'static,
    {
        self.add_listener(SelectionChangedFn(f))
    }

    /// Unregister a listener. Returns `false` if the id is unknown.
    pub(crate) fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Start a command: clear the pending flags.
    pub(crate) fn freeze(&mut self) {
        self.pending = ChangeFlags::empty();
    }

    /// Record a pending change.
    pub(crate) fn mark(&mut self, flags: ChangeFlags) {
        self.pending |= flags;
    }

    /// Publish a new selection range and mark SELECTION pending.
    pub(crate) fn push_selection(&mut self, start: usize, length: usize) {
        self.properties.selection_start = start;
        self.properties.selection_length = length;
        self.mark(ChangeFlags::SELECTION);
    }

    /// The properties as of the last thaw.
    #[must_use]
    pub(crate) fn properties(&self) -> &SyncedProperties {
        &self.properties
    }

    /// Sync every property without notifying anyone.
    pub(crate) fn sync_all(&mut self, buffer: &TextBuffer, anchor: usize, cursor: usize) {
        let start = anchor.min(cursor);
        let length = anchor.abs_diff(cursor);
        self.properties.text = buffer.to_string();
        self.properties.selected_text = buffer.slice_to_string(start..start + length);
        self.properties.selection_start = start;
        self.properties.selection_length = length;
    }

    /// End a command: sync properties, then notify. Returns the flags that
    /// were pending.
    pub(crate) fn thaw(
        &mut self,
        buffer: &TextBuffer,
        anchor: usize,
        cursor: usize,
    ) -> ChangeFlags {
        let pending = std::mem::take(&mut self.pending);

        if pending.contains(ChangeFlags::TEXT) {
            self.properties.text = buffer.to_string();
        }
        if pending.contains(ChangeFlags::SELECTION) {
            let start = anchor.min(cursor);
            self.properties.selected_text =
                buffer.slice_to_string(start..start + anchor.abs_diff(cursor));
        }

        if pending.contains(ChangeFlags::TEXT) {
            for (_, listener) in &mut self.listeners {
                listener.on_text_changed(&self.properties);
            }
        }
        if pending.contains(ChangeFlags::SELECTION) {
            for (_, listener) in &mut self.listeners {
                listener.on_selection_changed(&self.properties);
            }
        }

        pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorder {
        events: Rc<RefCell<Vec<String>>>,
    }

    impl ChangeListener for Recorder {
        fn on_text_changed(&mut self, props: &SyncedProperties) {
            self.events
                .borrow_mut()
                .push(format!("text:{}|{}", props.text(), props.selected_text()));
        }

        fn on_selection_changed(&mut self, props: &SyncedProperties) {
            self.events
                .borrow_mut()
                .push(format!("selection:{}|{}", props.text(), props.selected_text()));
        }
    }

    #[test]
    fn test_thaw_without_changes_is_silent() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = ChangeNotifier::new();
        notifier.add_listener(Recorder {
            events: Rc::clone(&events),
        });

        let buffer = TextBuffer::with_text("abc");
        notifier.freeze();
        assert_eq!(notifier.thaw(&buffer, 0, 0), ChangeFlags::empty());
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_both_syncs_precede_notifications() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = ChangeNotifier::new();
        notifier.add_listener(Recorder {
            events: Rc::clone(&events),
        });

        let buffer = TextBuffer::with_text("hello");
        notifier.freeze();
        notifier.mark(ChangeFlags::TEXT);
        notifier.mark(ChangeFlags::TEXT);
        notifier.push_selection(1, 2);
        let flags = notifier.thaw(&buffer, 1, 3);

        assert_eq!(flags, ChangeFlags::TEXT | ChangeFlags::SELECTION);
        // The text listener already sees the new selected text
        assert_eq!(
            *events.borrow(),
            vec!["text:hello|el".to_string(), "selection:hello|el".to_string()]
        );
    }

    #[test]
    fn test_freeze_resets_pending() {
        let mut notifier = ChangeNotifier::new();
        notifier.mark(ChangeFlags::TEXT);
        notifier.freeze();
        let buffer = TextBuffer::new();
        assert!(notifier.thaw(&buffer, 0, 0).is_empty());
    }

    #[test]
    fn test_remove_listener() {
        let count = Rc::new(RefCell::new(0));
        let count_clone = Rc::clone(&count);
        let mut notifier = ChangeNotifier::new();
        let id = notifier.on_text_changed(move |_| *count_clone.borrow_mut() += 1);

        let buffer = TextBuffer::new();
        notifier.freeze();
        notifier.mark(ChangeFlags::TEXT);
        notifier.thaw(&buffer, 0, 0);
        assert_eq!(*count.borrow(), 1);

        assert!(notifier.remove_listener(id));
        assert!(!notifier.remove_listener(id));
        notifier.freeze();
        notifier.mark(ChangeFlags::TEXT);
        notifier.thaw(&buffer, 0, 0);
        assert_eq!(*count.borrow(), 1);
    }
}
