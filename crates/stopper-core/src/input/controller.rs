use log::{debug, info, warn};

use super::{ButtonLevels, Debouncer, InputConfig, PressPhase, RawButtons, classify_press};
use crate::{
    action::{ActionRequest, AttackLauncher, attack_message},
    model::NetworkListModel,
    text::TextDisplay,
};

/// Actions decided for one poll tick.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct InputEvents {
    pub up: bool,
    pub down: bool,
    pub long_press: bool,
}

impl InputEvents {
    pub const fn is_empty(&self) -> bool {
        !self.up && !self.down && !self.long_press
    }
}

/// Outcome of [`ButtonInputController::poll`].
#[derive(Debug)]
pub struct PollReport<E> {
    pub events: InputEvents,
    /// First render failure of the tick; later renders were still attempted.
    pub display_fault: Option<E>,
}

/// Edge and long-press state for UP, DOWN and SELECT.
pub struct ButtonInputController {
    config: InputConfig,
    up: Debouncer,
    down: Debouncer,
    select: Debouncer,
    up_latched: bool,
    down_latched: bool,
    select_since_ms: Option<u64>,
    long_press_fired: bool,
}

impl ButtonInputController {
    pub const fn new(config: InputConfig) -> Self {
        Self {
            config,
            up: Debouncer::new(config.debounce_polls),
            down: Debouncer::new(config.debounce_polls),
            select: Debouncer::new(config.debounce_polls),
            up_latched: false,
            down_latched: false,
            select_since_ms: None,
            long_press_fired: false,
        }
    }

    /// Phase of the current SELECT press as of `now_ms`.
    pub fn select_phase(&self, now_ms: u64) -> PressPhase {
        let held = self.select_since_ms.map(|since| now_ms.saturating_sub(since));
        classify_press(held, self.config.long_press_ms)
    }

    /// Advances the button state by one sample.
    ///
    /// `has_entries` gates the long press: while the list is empty the press
    /// keeps waiting and may still fire once entries appear. A release that
    /// the debouncer has not confirmed yet already blocks the long press.
    pub fn update(&mut self, now_ms: u64, raw: RawButtons, has_entries: bool) -> InputEvents {
        let mut events = InputEvents::default();

        let up = self.up.update(raw.up, now_ms);
        events.up = up && !self.up_latched;
        self.up_latched = up;

        let down = self.down.update(raw.down, now_ms);
        events.down = down && !self.down_latched;
        self.down_latched = down;

        let select = self.select.update(raw.select, now_ms);
        if !select {
            self.select_since_ms = None;
            self.long_press_fired = false;
        } else if self.select_since_ms.is_none() {
            self.select_since_ms = Some(self.select.stable_since_ms());
            self.long_press_fired = false;
        } else if !self.long_press_fired
            && has_entries
            && raw.select
            && self.select_phase(now_ms) == PressPhase::LongPress
        {
            self.long_press_fired = true;
            events.long_press = true;
        }

        events
    }

    /// Samples `buttons` and applies the resulting events.
    ///
    /// UP and DOWN move the cursor. A long press renders the attack banner and
    /// hands the selected record to `launcher`. Launcher failures are logged and
    /// do not re-arm the press.
    pub fn poll<B, D, L, const N: usize>(
        &mut self,
        now_ms: u64,
        buttons: &mut B,
        model: &mut NetworkListModel<D, N>,
        launcher: &mut L,
    ) -> Result<PollReport<D::Error>, B::Error>
    where
        B: ButtonLevels,
        D: TextDisplay,
        L: AttackLauncher,
    {
        let raw = buttons.read()?;
        let events = self.update(now_ms, raw, !model.list().is_empty());
        let mut display_fault = None;

        if events.up {
            if let Err(err) = model.select_previous() {
                display_fault.get_or_insert(err);
            }
        }

        if events.down {
            if let Err(err) = model.select_next() {
                display_fault.get_or_insert(err);
            }
        }

        if events.long_press {
            if let Some(banner) = model.selected().map(attack_message) {
                if let Err(err) = model.show_message(&banner) {
                    display_fault.get_or_insert(err);
                }
            }

            if let Some(target) = model.selected() {
                info!("input: long press on {:?} ch {}", target.name(), target.channel);
                if launcher.start(ActionRequest::long_press(target)).is_err() {
                    warn!("input: attack request rejected");
                }
            }
        }

        if !events.is_empty() {
            debug!("input: {:?}", events);
        }

        Ok(PollReport {
            events,
            display_fault,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        action::{AttackKind, AttackMethod},
        network::{AuthMode, NetworkRecord},
        testing::{BusFault, MemoryDisplay},
    };

    const TICK: u64 = 50;

    struct Pins(RawButtons);

    impl ButtonLevels for Pins {
        type Error = BusFault;

        fn read(&mut self) -> Result<RawButtons, Self::Error> {
            Ok(self.0)
        }
    }

    #[derive(Default)]
    struct Launcher {
        started: Vec<(AttackKind, AttackMethod, u16, NetworkRecord)>,
        reject: bool,
    }

    impl AttackLauncher for Launcher {
        type Error = ();

        fn start(&mut self, request: ActionRequest<'_>) -> Result<(), Self::Error> {
            self.started.push((
                request.kind,
                request.method,
                request.timeout_secs,
                request.target.clone(),
            ));
            if self.reject { Err(()) } else { Ok(()) }
        }
    }

    struct Rig {
        controller: ButtonInputController,
        pins: Pins,
        model: NetworkListModel<MemoryDisplay>,
        launcher: Launcher,
        now_ms: u64,
    }

    impl Rig {
        fn with_networks(names: &[&str]) -> Self {
            let mut model = NetworkListModel::new(MemoryDisplay::new());
            model
                .replace_all(
                    names
                        .iter()
                        .map(|name| NetworkRecord::new(name, [0; 6], 1, -60, AuthMode::Wpa2Psk)),
                )
                .unwrap();
            Self {
                controller: ButtonInputController::new(InputConfig::default()),
                pins: Pins(RawButtons::released()),
                model,
                launcher: Launcher::default(),
                now_ms: 0,
            }
        }

        fn tick(&mut self, raw: RawButtons) -> InputEvents {
            self.pins.0 = raw;
            let report = self
                .controller
                .poll(self.now_ms, &mut self.pins, &mut self.model, &mut self.launcher)
                .unwrap();
            self.now_ms += TICK;
            assert!(report.display_fault.is_none());
            report.events
        }

        fn hold_select_for(&mut self, ms: u64) {
            let held = RawButtons {
                select: true,
                ..RawButtons::released()
            };
            let start = self.now_ms;
            self.tick(held);
            while self.now_ms + TICK < start + ms {
                self.tick(held);
            }
            self.now_ms = start + ms;
            self.tick(held);
            self.tick(RawButtons::released());
        }
    }

    fn up() -> RawButtons {
        RawButtons {
            up: true,
            ..RawButtons::released()
        }
    }

    fn down() -> RawButtons {
        RawButtons {
            down: true,
            ..RawButtons::released()
        }
    }

    #[test]
    fn navigation_fires_on_press_edge_only() {
        let mut rig = Rig::with_networks(&["A", "B", "C"]);

        assert!(rig.tick(down()).down);
        assert!(!rig.tick(down()).down);
        assert!(!rig.tick(down()).down);
        assert_eq!(rig.model.list().selected_index(), Some(1));

        rig.tick(RawButtons::released());
        assert!(rig.tick(down()).down);
        assert_eq!(rig.model.list().selected_index(), Some(2));
    }

    #[test]
    fn up_wraps_to_last_entry() {
        let mut rig = Rig::with_networks(&["A", "B", "C"]);
        rig.tick(up());
        assert_eq!(rig.model.list().selected_index(), Some(2));
        assert!(rig.model.display().shows(" A\n B\n>C\n"));
    }

    #[test]
    fn both_buttons_in_one_tick_cancel_out() {
        let mut rig = Rig::with_networks(&["A", "B", "C"]);
        let events = rig.tick(RawButtons {
            up: true,
            down: true,
            select: false,
        });
        assert!(events.up && events.down);
        assert_eq!(rig.model.list().selected_index(), Some(0));
    }

    #[test]
    fn hold_just_under_threshold_fires_nothing() {
        let mut rig = Rig::with_networks(&["HOME"]);
        rig.hold_select_for(799);
        assert!(rig.launcher.started.is_empty());
    }

    #[test]
    fn hold_at_threshold_fires_once() {
        let mut rig = Rig::with_networks(&["HOME", "CAFE"]);
        rig.tick(down());
        rig.tick(RawButtons::released());
        rig.hold_select_for(800);

        assert_eq!(rig.launcher.started.len(), 1);
        let (kind, method, timeout, target) = &rig.launcher.started[0];
        assert_eq!(*kind, AttackKind::Dos);
        assert_eq!(*method, AttackMethod::CombineAll);
        assert_eq!(*timeout, 0);
        assert_eq!(target.name(), "CAFE");
        assert!(rig.model.display().shows("ATTACKING:\nCAFE"));
    }

    #[test]
    fn long_hold_fires_exactly_once() {
        let mut rig = Rig::with_networks(&["HOME"]);
        rig.hold_select_for(5_000);
        assert_eq!(rig.launcher.started.len(), 1);
    }

    #[test]
    fn release_rearms_the_long_press() {
        let mut rig = Rig::with_networks(&["HOME"]);
        rig.hold_select_for(900);
        rig.hold_select_for(900);
        assert_eq!(rig.launcher.started.len(), 2);
    }

    #[test]
    fn empty_list_never_fires_and_ignores_navigation() {
        let mut rig = Rig::with_networks(&[]);
        let flushes = rig.model.display().flush_count();

        rig.tick(up());
        rig.tick(down());
        rig.hold_select_for(2_000);

        assert!(rig.launcher.started.is_empty());
        assert_eq!(rig.model.display().flush_count(), flushes);
    }

    #[test]
    fn rejected_request_is_not_retried_during_the_same_press() {
        let mut rig = Rig::with_networks(&["HOME"]);
        rig.launcher.reject = true;
        rig.hold_select_for(3_000);
        assert_eq!(rig.launcher.started.len(), 1);
    }

    #[test]
    fn select_phase_tracks_the_injected_clock() {
        let mut controller = ButtonInputController::new(InputConfig::default());
        let held = RawButtons {
            select: true,
            ..RawButtons::released()
        };

        assert_eq!(controller.select_phase(0), PressPhase::Idle);
        controller.update(1_000, held, true);
        assert_eq!(controller.select_phase(1_799), PressPhase::Holding);
        assert_eq!(controller.select_phase(1_800), PressPhase::LongPress);
        assert!(controller.update(1_800, held, true).long_press);
        assert!(!controller.update(1_850, held, true).long_press);
    }

    #[test]
    fn list_filled_mid_press_can_still_fire() {
        let mut controller = ButtonInputController::new(InputConfig::default());
        let held = RawButtons {
            select: true,
            ..RawButtons::released()
        };

        controller.update(0, held, false);
        assert!(!controller.update(900, held, false).long_press);
        assert!(controller.update(950, held, true).long_press);
    }

    #[test]
    fn display_fault_is_reported_but_state_advances() {
        let mut rig = Rig::with_networks(&["A", "B"]);
        let mut display = rig.model.into_display();
        display.fail_flushes(true);
        rig.model = NetworkListModel::new(display);
        rig.model.replace_all([NetworkRecord::new("A", [0; 6], 1, -60, AuthMode::Open)]).ok();
        rig.pins.0 = down();

        let report = rig
            .controller
            .poll(0, &mut rig.pins, &mut rig.model, &mut rig.launcher)
            .unwrap();
        assert!(report.events.down);
        assert_eq!(report.display_fault, Some(BusFault));
    }

    #[test]
    fn debounced_controller_needs_a_stable_sample() {
        let mut controller =
            ButtonInputController::new(InputConfig::default().with_debounce_polls(1));

        assert!(!controller.update(0, down(), true).down);
        assert!(controller.update(50, down(), true).down);
    }

    #[test]
    fn debounced_long_press_counts_from_first_pressed_sample() {
        let mut controller =
            ButtonInputController::new(InputConfig::default().with_debounce_polls(1));
        let held = RawButtons {
            select: true,
            ..RawButtons::released()
        };

        let fired_at = (0..=20u64)
            .map(|tick| tick * TICK)
            .find(|&now_ms| controller.update(now_ms, held, true).long_press);
        assert_eq!(fired_at, Some(800));
    }

    #[test]
    fn debounced_hold_just_under_threshold_fires_nothing() {
        let mut controller =
            ButtonInputController::new(InputConfig::default().with_debounce_polls(1));
        let held = RawButtons {
            select: true,
            ..RawButtons::released()
        };

        for tick in 0..16u64 {
            assert!(!controller.update(tick * TICK, held, true).long_press);
        }
        assert!(!controller.update(799, held, true).long_press);
        assert!(!controller.update(800, RawButtons::released(), true).long_press);
        assert!(!controller.update(850, RawButtons::released(), true).long_press);
        assert_eq!(controller.select_phase(900), PressPhase::Idle);
    }
}
