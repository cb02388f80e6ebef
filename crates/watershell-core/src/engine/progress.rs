/// Events emitted by long-running workflows.
///
/// A phase groups related work under a name. Inside a phase, a task reports a
/// known number of steps (one per trajectory frame) so front-ends can draw a bar.
#[derive(Debug, Clone)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards [`Progress`] events to an optional callback.
///
/// A reporter without a callback discards every event, which keeps library calls
/// silent unless a front-end opts in.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    /// Runs `work` between `PhaseStart` and `PhaseFinish` events.
    ///
    /// `PhaseFinish` is only reported when `work` succeeds.
    pub fn phase<T, E>(&self, name: &'static str, work: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
        self.report(Progress::PhaseStart { name });
        let result = work()?;
        self.report(Progress::PhaseFinish);
        Ok(result)
    }
}
