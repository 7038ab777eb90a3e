use super::availability::Availability;
use crate::models::ContentType;
use crate::util::SharedClock;
use std::sync::Arc;

/// Manual-selection cooldown in the single-tab viewer.
pub(crate) const SINGLE_VIEW_COOLDOWN_MS: i64 = 2_000;
/// Manual-selection cooldown in the two-column viewer.
pub(crate) const TWO_COLUMN_COOLDOWN_MS: i64 = 5_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SuppressReason {
    Editing,
    ManualCooldown,
    NotOnOriginal,
}

/// Decisions taken by [`AutoAdvanceController`], reported to an optional sink.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum AdvanceEvent {
    NoteChanged {
        note_id: String,
    },
    EditingStarted,
    ManualSelection {
        to: ContentType,
    },
    AutoAdvanced {
        to: ContentType,
    },
    Suppressed {
        candidate: ContentType,
        reason: SuppressReason,
    },
}

pub(crate) type EventSink = Arc<dyn Fn(&AdvanceEvent) + Send + Sync>;

/// Tracks the active content type and switches to new enhancements as they arrive.
///
/// Auto-advance only happens from `Original`, outside edit mode, and when no manual selection
/// was made within the cooldown window. The window is a deadline on the injected clock; it
/// expires on its own.
pub(crate) struct AutoAdvanceController {
    active: ContentType,
    note_id: Option<String>,
    editing: bool,
    cooldown_ms: i64,
    manual_until_ms: Option<i64>,
    last_seen: Availability,
    clock: SharedClock,
    events: Option<EventSink>,
}

impl AutoAdvanceController {
    pub fn new(cooldown_ms: i64, clock: SharedClock) -> Self {
        Self {
            active: ContentType::Original,
            note_id: None,
            editing: false,
            cooldown_ms,
            manual_until_ms: None,
            last_seen: Availability::default(),
            clock,
            events: None,
        }
    }

    pub fn with_events(mut self, sink: EventSink) -> Self {
        self.events = Some(sink);
        self
    }

    pub fn active(&self) -> ContentType {
        self.active
    }

    pub fn set_cooldown_ms(&mut self, cooldown_ms: i64) {
        self.cooldown_ms = cooldown_ms;
    }

    pub fn manual_cooldown_active(&self) -> bool {
        self.manual_until_ms
            .map(|until| self.clock.now_ms() < until)
            .unwrap_or(false)
    }

    fn emit(&self, event: AdvanceEvent) {
        tracing::debug!(?event, active = %self.active, "auto-advance");
        if let Some(sink) = &self.events {
            sink(&event);
        }
    }

    /// User picked a tab. Always allowed, including tabs without content.
    pub fn select(&mut self, ct: ContentType) {
        self.active = ct;
        self.manual_until_ms = Some(self.clock.now_ms() + self.cooldown_ms);
        self.emit(AdvanceEvent::ManualSelection { to: ct });
    }

    /// Point the controller at a note. A different id resets everything. Returns whether it did.
    pub fn set_note(&mut self, note_id: &str) -> bool {
        if self.note_id.as_deref() == Some(note_id) {
            return false;
        }
        self.note_id = Some(note_id.to_string());
        self.active = ContentType::Original;
        self.manual_until_ms = None;
        self.last_seen = Availability::default();
        self.emit(AdvanceEvent::NoteChanged {
            note_id: note_id.to_string(),
        });
        true
    }

    /// Editing always shows the original and forgets any manual choice.
    pub fn set_editing(&mut self, editing: bool) {
        let entering = editing && !self.editing;
        self.editing = editing;
        if entering {
            self.active = ContentType::Original;
            self.manual_until_ms = None;
            self.emit(AdvanceEvent::EditingStarted);
        }
    }

    /// Feed the latest availability. Acts only when it differs from the previous snapshot.
    /// Returns the new active type if an auto-advance happened.
    pub fn observe(&mut self, availability: &Availability) -> Option<ContentType> {
        if *availability == self.last_seen {
            return None;
        }
        self.last_seen = *availability;

        let candidate = availability.best_enhancement()?;

        let suppressed = if self.editing {
            Some(SuppressReason::Editing)
        } else if self.active != ContentType::Original {
            Some(SuppressReason::NotOnOriginal)
        } else if self.manual_cooldown_active() {
            Some(SuppressReason::ManualCooldown)
        } else {
            None
        };

        if let Some(reason) = suppressed {
            self.emit(AdvanceEvent::Suppressed { candidate, reason });
            return None;
        }

        self.active = candidate;
        self.emit(AdvanceEvent::AutoAdvanced { to: candidate });
        Some(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::ManualClock;
    use std::sync::Mutex;

    fn setup() -> (Arc<ManualClock>, AutoAdvanceController, Arc<Mutex<Vec<AdvanceEvent>>>) {
        let clock = Arc::new(ManualClock::at(10_000));
        let log: Arc<Mutex<Vec<AdvanceEvent>>> = Arc::new(Mutex::new(Vec::new()));
        let log2 = log.clone();
        let ctl = AutoAdvanceController::new(SINGLE_VIEW_COOLDOWN_MS, clock.clone()).with_events(
            Arc::new(move |e: &AdvanceEvent| {
                if let Ok(mut l) = log2.lock() {
                    l.push(e.clone());
                }
            }),
        );
        (clock, ctl, log)
    }

    fn with_summary() -> Availability {
        Availability {
            has_summary: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_advances_from_original_to_best_variant() {
        let (_clock, mut ctl, log) = setup();
        ctl.set_note("n1");

        let both = Availability {
            has_summary: true,
            has_key_points: true,
            ..Default::default()
        };
        assert_eq!(ctl.observe(&both), Some(ContentType::KeyPoints));
        assert_eq!(ctl.active(), ContentType::KeyPoints);

        let events = log.lock().map(|l| l.clone()).unwrap_or_default();
        assert_eq!(
            events.last(),
            Some(&AdvanceEvent::AutoAdvanced {
                to: ContentType::KeyPoints
            })
        );
    }

    #[test]
    fn test_unchanged_availability_is_ignored() {
        let (_clock, mut ctl, _log) = setup();
        ctl.set_note("n1");
        assert_eq!(ctl.observe(&with_summary()), Some(ContentType::Summary));
        ctl.select(ContentType::Original);
        assert_eq!(ctl.observe(&with_summary()), None);
    }

    #[test]
    fn test_manual_cooldown_blocks_then_expires() {
        let (clock, mut ctl, log) = setup();
        ctl.set_note("n1");
        ctl.select(ContentType::Original);
        assert!(ctl.manual_cooldown_active());

        clock.advance(SINGLE_VIEW_COOLDOWN_MS - 1);
        assert_eq!(ctl.observe(&with_summary()), None);
        assert_eq!(ctl.active(), ContentType::Original);
        let events = log.lock().map(|l| l.clone()).unwrap_or_default();
        assert_eq!(
            events.last(),
            Some(&AdvanceEvent::Suppressed {
                candidate: ContentType::Summary,
                reason: SuppressReason::ManualCooldown
            })
        );

        clock.advance(1);
        assert!(!ctl.manual_cooldown_active());
        let more = Availability {
            has_summary: true,
            has_markdown: true,
            ..Default::default()
        };
        assert_eq!(ctl.observe(&more), Some(ContentType::Summary));
    }

    #[test]
    fn test_never_overrides_non_original_selection() {
        let (clock, mut ctl, _log) = setup();
        ctl.set_note("n1");
        ctl.select(ContentType::Markdown);
        clock.advance(60_000);

        let improved = Availability {
            has_improved_clarity: true,
            ..Default::default()
        };
        assert_eq!(ctl.observe(&improved), None);
        assert_eq!(ctl.active(), ContentType::Markdown);
    }

    #[test]
    fn test_note_change_resets_everything() {
        let (_clock, mut ctl, _log) = setup();
        ctl.set_note("n1");
        ctl.select(ContentType::Improved);
        assert!(ctl.manual_cooldown_active());

        assert!(ctl.set_note("n2"));
        assert_eq!(ctl.active(), ContentType::Original);
        assert!(!ctl.manual_cooldown_active());

        // Same id again is a no-op.
        ctl.select(ContentType::Summary);
        assert!(!ctl.set_note("n2"));
        assert_eq!(ctl.active(), ContentType::Summary);
    }

    #[test]
    fn test_note_change_reobserves_existing_enhancements() {
        let (_clock, mut ctl, _log) = setup();
        ctl.set_note("n1");
        assert_eq!(ctl.observe(&with_summary()), Some(ContentType::Summary));
        ctl.set_note("n2");
        assert_eq!(ctl.observe(&with_summary()), Some(ContentType::Summary));
    }

    #[test]
    fn test_editing_forces_original_and_suppresses() {
        let (_clock, mut ctl, log) = setup();
        ctl.set_note("n1");
        ctl.select(ContentType::KeyPoints);

        ctl.set_editing(true);
        assert_eq!(ctl.active(), ContentType::Original);
        assert!(!ctl.manual_cooldown_active());

        assert_eq!(ctl.observe(&with_summary()), None);
        let events = log.lock().map(|l| l.clone()).unwrap_or_default();
        assert!(events.contains(&AdvanceEvent::EditingStarted));
        assert_eq!(
            events.last(),
            Some(&AdvanceEvent::Suppressed {
                candidate: ContentType::Summary,
                reason: SuppressReason::Editing
            })
        );
    }

    #[test]
    fn test_nothing_available_does_nothing() {
        let (_clock, mut ctl, _log) = setup();
        ctl.set_note("n1");
        let generating = Availability {
            summary_generating: true,
            ..Default::default()
        };
        assert_eq!(ctl.observe(&generating), None);
        assert_eq!(ctl.active(), ContentType::Original);
    }
}
