//! Focus-reminder app: tasks that periodically nudge the wearer and
//! adapt their interval to the responses.
//!
//! The app is a screen state machine over the persistent [`Store`].
//! Timer handling is split the same way as the keyboard: transitions
//! return an [`Effect`] describing what to schedule, and the embedded
//! shell owns the actual timers.

pub mod draw;
pub mod store;
pub mod task;


use crate::config::NUDGE_BUZZ_MS;
use crate::error::Error;
use store::Store;
use task::Task;

/// Screens (views) the app can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// Entry screen: new task / manage.
    MainMenu,
    /// A task is running; shows its title.
    Task,
    /// Are-you-on-task prompt with yes/no buttons.
    Nudge,
    /// Task interrupted; re-prioritize options.
    Prioritize,
}

/// What the shell should do with its timers after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    /// Arm the nudge timer for this many ms.
    ScheduleNudge(u64),
    /// Buzz and wait this long for a yes/no response.
    AwaitResponse { buzz_ms: u32, window_ms: u64 },
    /// Disarm any running timers.
    StopTimers,
}

/// Responses available on the nudge screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NudgeResponse {
    OnTask,
    Distracted,
}

pub struct App {
    pub store: Store,
    screen: Screen,
    active_task: Option<u32>,
}

impl App {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            screen: Screen::MainMenu,
            active_task: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn active_task(&self) -> Option<&Task> {
        self.store.task(self.active_task?)
    }

    /// Create a task from keyboard input and start it. `id` is the
    /// current wall-clock time in seconds, which doubles as a unique id.
    pub fn add_task(&mut self, id: u32, text: &str) -> Result<Effect, Error> {
        self.store.add_task(Task::new(id, text))?;
        Ok(self.start_task(id).unwrap_or(Effect::StopTimers))
    }

    /// Make `id` the active task and arm its nudge timer.
    pub fn start_task(&mut self, id: u32) -> Option<Effect> {
        let delay = self.store.task(id)?.next_nudge_delay_ms();
        self.active_task = Some(id);
        self.screen = Screen::Task;
        Some(Effect::ScheduleNudge(delay))
    }

    /// The nudge timer fired: prompt the wearer and wait for an answer.
    pub fn nudge_due(&mut self) -> Option<Effect> {
        let window = self.active_task()?.response_window_ms();
        self.screen = Screen::Nudge;
        Some(Effect::AwaitResponse {
            buzz_ms: NUDGE_BUZZ_MS,
            window_ms: window,
        })
    }

    /// Wearer answered the nudge prompt.
    pub fn respond(&mut self, response: NudgeResponse) -> Option<Effect> {
        let id = self.active_task?;
        {
            let task = self.store.task_mut(id)?;
            match response {
                NudgeResponse::OnTask => task.affirm_on_task(),
                NudgeResponse::Distracted => task.affirm_distracted(),
            }
        }
        self.start_task(id)
    }

    /// The response window elapsed without an answer: count it and
    /// nudge again immediately.
    pub fn response_timeout(&mut self) -> Option<Effect> {
        let id = self.active_task?;
        self.store.task_mut(id)?.affirm_unresponsive();
        self.nudge_due()
    }

    /// Touch on the task screen: interrupt the timers and offer
    /// re-prioritization.
    pub fn change_priority(&mut self) -> Effect {
        self.screen = Screen::Prioritize;
        Effect::StopTimers
    }

    pub fn take_break(&mut self) -> Effect {
        self.screen = Screen::MainMenu;
        self.active_task = None;
        Effect::StopTimers
    }

    /// Mark the active task complete and return to the menu.
    pub fn complete_active(&mut self) -> Effect {
        if let Some(id) = self.active_task.take() {
            if let Some(task) = self.store.task_mut(id) {
                task.mark_done();
            }
        }
        self.screen = Screen::MainMenu;
        Effect::StopTimers
    }
}
