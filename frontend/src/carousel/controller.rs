use tracing::debug;

use crate::config;

/// Auto-rotation state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rotation {
    /// No interval running and none pending.
    Stopped,
    Running,
    /// Paused after repeated manual navigation; a restart timer is pending.
    Suspended,
}

/// Timer work the owning component must carry out. Starting a timer always
/// replaces the previous handle of the same kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerCommand {
    StartRotation,
    StopRotation,
    ScheduleRestart,
    CancelRestart,
}

#[derive(Debug)]
pub struct CarouselController {
    slide_count: usize,
    current: usize,
    interactions: u32,
    rotation: Rotation,
    reduced_motion: bool,
}

impl CarouselController {
    pub fn new(slide_count: usize, reduced_motion: bool) -> Self {
        Self {
            slide_count,
            current: 0,
            interactions: 0,
            rotation: Rotation::Stopped,
            reduced_motion,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn is_active(&self, index: usize) -> bool {
        index == self.current
    }

    /// Begins auto-rotation unless it is already running, there is nothing to
    /// rotate, or the user prefers reduced motion.
    pub fn start(&mut self) -> Option<TimerCommand> {
        if self.reduced_motion || self.slide_count == 0 || self.rotation == Rotation::Running {
            return None;
        }
        self.rotation = Rotation::Running;
        Some(TimerCommand::StartRotation)
    }

    /// Moves to `index`, wrapping in both directions.
    pub fn go_to(&mut self, index: isize) -> usize {
        if self.slide_count == 0 {
            return 0;
        }
        self.current = index.rem_euclid(self.slide_count as isize) as usize;
        self.current
    }

    pub fn next(&mut self) -> usize {
        self.go_to(self.current as isize + 1)
    }

    pub fn prev(&mut self) -> usize {
        self.go_to(self.current as isize - 1)
    }

    /// Rotation interval fired.
    pub fn tick(&mut self) -> usize {
        if self.rotation == Rotation::Running {
            self.next();
        }
        self.current
    }

    /// Records a manual navigation. From the third one on, rotation is
    /// suspended and the idle restart timer is (re)armed.
    pub fn interact(&mut self) -> Vec<TimerCommand> {
        let mut commands = Vec::new();
        if self.rotation == Rotation::Suspended {
            commands.push(TimerCommand::CancelRestart);
        }
        self.interactions += 1;
        if self.interactions >= config::INTERACTIONS_BEFORE_PAUSE {
            if self.rotation == Rotation::Running {
                commands.push(TimerCommand::StopRotation);
            }
            self.rotation = Rotation::Suspended;
            commands.push(TimerCommand::ScheduleRestart);
            debug!(interactions = self.interactions, "carousel rotation suspended");
        }
        commands
    }

    /// The idle restart timer fired.
    pub fn restart_elapsed(&mut self) -> Option<TimerCommand> {
        if self.rotation != Rotation::Suspended {
            return None;
        }
        self.interactions = 0;
        self.rotation = Rotation::Stopped;
        self.start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use super::TimerCommand::*;

    /// Applies timer commands the way the component does, tracking which
    /// handles would be alive.
    #[derive(Default)]
    struct Timers {
        rotation: bool,
        restart: bool,
    }

    impl Timers {
        fn apply(&mut self, commands: impl IntoIterator<Item = TimerCommand>) {
            for command in commands {
                match command {
                    StartRotation => self.rotation = true,
                    StopRotation => self.rotation = false,
                    ScheduleRestart => self.restart = true,
                    CancelRestart => self.restart = false,
                }
            }
        }
    }

    #[test]
    fn go_to_wraps_both_directions() {
        let mut carousel = CarouselController::new(5, false);
        assert_eq!(carousel.go_to(5), 0);
        assert_eq!(carousel.go_to(-1), 4);
        assert_eq!(carousel.go_to(12), 2);
        assert_eq!(carousel.go_to(-6), 4);
        assert!(carousel.is_active(4));
        assert!(!carousel.is_active(0));
    }

    #[test]
    fn next_and_prev_cycle() {
        let mut carousel = CarouselController::new(3, false);
        assert_eq!(carousel.prev(), 2);
        assert_eq!(carousel.next(), 0);
        assert_eq!(carousel.next(), 1);
    }

    #[test]
    fn empty_carousel_never_rotates() {
        let mut carousel = CarouselController::new(0, false);
        assert_eq!(carousel.start(), None);
        assert_eq!(carousel.go_to(3), 0);
        assert_eq!(carousel.tick(), 0);
    }

    #[test]
    fn rotation_advances_on_tick_only_while_running() {
        let mut carousel = CarouselController::new(4, false);
        assert_eq!(carousel.tick(), 0);
        assert_eq!(carousel.start(), Some(StartRotation));
        assert_eq!(carousel.start(), None);
        assert_eq!(carousel.tick(), 1);
        assert_eq!(carousel.tick(), 2);
    }

    #[test]
    fn reduced_motion_never_starts_rotation() {
        let mut carousel = CarouselController::new(4, true);
        assert_eq!(carousel.start(), None);
        assert_eq!(carousel.rotation(), Rotation::Stopped);
    }

    #[test]
    fn third_interaction_suspends_and_idle_restart_resumes() {
        let mut carousel = CarouselController::new(5, false);
        let mut timers = Timers::default();
        timers.apply(carousel.start());

        timers.apply(carousel.interact());
        timers.apply(carousel.interact());
        assert_eq!(carousel.rotation(), Rotation::Running);
        assert!(timers.rotation && !timers.restart);

        let commands = carousel.interact();
        assert_eq!(commands, vec![StopRotation, ScheduleRestart]);
        timers.apply(commands);
        assert_eq!(carousel.rotation(), Rotation::Suspended);
        assert!(!timers.rotation && timers.restart);

        // Ticks from a stale interval are ignored while suspended.
        let before = carousel.current();
        assert_eq!(carousel.tick(), before);

        timers.restart = false;
        timers.apply(carousel.restart_elapsed());
        assert_eq!(carousel.rotation(), Rotation::Running);
        assert!(timers.rotation);
    }

    #[test]
    fn interaction_while_suspended_rearms_the_restart_timer() {
        let mut carousel = CarouselController::new(5, false);
        carousel.start();
        for _ in 0..3 {
            carousel.interact();
        }
        assert_eq!(carousel.interact(), vec![CancelRestart, ScheduleRestart]);
        assert_eq!(carousel.rotation(), Rotation::Suspended);
    }

    #[test]
    fn counter_resets_after_restart() {
        let mut carousel = CarouselController::new(5, false);
        carousel.start();
        for _ in 0..3 {
            carousel.interact();
        }
        carousel.restart_elapsed();
        assert_eq!(carousel.interact(), Vec::<TimerCommand>::new());
        assert_eq!(carousel.interact(), Vec::<TimerCommand>::new());
        assert_eq!(carousel.interact(), vec![StopRotation, ScheduleRestart]);
    }

    #[test]
    fn reduced_motion_stays_stopped_after_idle() {
        let mut carousel = CarouselController::new(5, true);
        carousel.start();
        for _ in 0..3 {
            carousel.interact();
        }
        assert_eq!(carousel.rotation(), Rotation::Suspended);
        assert_eq!(carousel.restart_elapsed(), None);
        assert_eq!(carousel.rotation(), Rotation::Stopped);
    }

    #[test]
    fn restart_without_suspension_is_ignored() {
        let mut carousel = CarouselController::new(5, false);
        carousel.start();
        assert_eq!(carousel.restart_elapsed(), None);
        assert_eq!(carousel.rotation(), Rotation::Running);
    }
}
