//! Cooperative task scheduler
//!
//! Repeating and one-shot delays driven entirely by the owner's
//! `advance(dt)` calls, so there is no live timer thread to race with:
//! pausing is simply not advancing, which freezes every remaining delay
//! exactly where it was. Handles are typed, so cancellation never depends
//! on name matching.

/// Identifies a scheduled task. Stale handles are harmless: they no
/// longer match anything after cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u32);

#[derive(Debug)]
struct Task {
    handle: TaskHandle,
    remaining: f32,
    interval: f32,
    repeating: bool,
}

/// Single-threaded timer wheel for spawn, escalation and countdown work
#[derive(Debug, Default)]
pub struct Scheduler {
    tasks: Vec<Task>,
    next_handle: u32,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire every `interval` seconds until canceled.
    pub fn schedule_repeating(&mut self, interval: f32) -> TaskHandle {
        self.push(interval, true)
    }

    /// Fire once after `delay` seconds, then forget the task.
    pub fn schedule_once(&mut self, delay: f32) -> TaskHandle {
        self.push(delay, false)
    }

    fn push(&mut self, interval: f32, repeating: bool) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.tasks.push(Task {
            handle,
            remaining: interval,
            interval,
            repeating,
        });
        handle
    }

    /// Re-arm a task with a fresh full `interval`. Unknown handles are a
    /// logged no-op.
    pub fn reschedule(&mut self, handle: TaskHandle, interval: f32) {
        match self.tasks.iter_mut().find(|t| t.handle == handle) {
            Some(task) => {
                task.interval = interval;
                task.remaining = interval;
            }
            None => log::debug!("reschedule of unknown task {:?} ignored", handle),
        }
    }

    pub fn cancel(&mut self, handle: TaskHandle) {
        self.tasks.retain(|t| t.handle != handle);
    }

    /// Total cancellation: nothing previously scheduled may fire again.
    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    pub fn is_scheduled(&self, handle: TaskHandle) -> bool {
        self.tasks.iter().any(|t| t.handle == handle)
    }

    /// Advance time by `dt` and collect the handles that fired, in
    /// schedule order. A repeating task fires as many times as `dt`
    /// covers; a one-shot task is removed after its single fire.
    pub fn advance(&mut self, dt: f32) -> Vec<TaskHandle> {
        let mut fired = Vec::new();
        for task in &mut self.tasks {
            task.remaining -= dt;
            while task.remaining <= 0.0 {
                fired.push(task.handle);
                if !task.repeating {
                    break;
                }
                task.remaining += task.interval;
            }
        }
        self.tasks
            .retain(|t| t.repeating || !fired.contains(&t.handle));
        fired
    }
}
