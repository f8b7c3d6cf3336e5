//! Sequence runner: types an ordered list of lines under a fresh run.

use crate::run::RunToken;
use crate::surface::CursorMode;
use crate::terminal::Terminal;
use crate::typewriter::{Sleeper, TypeOutcome};

/// How a sequence ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceOutcome {
    /// All lines were typed and the prompt is armed
    Completed,
    /// A newer run took over before the sequence finished
    Superseded,
}

impl<S: Sleeper> Terminal<S> {
    /// Clear the surface and type the configured boot banner.
    pub async fn run_boot_sequence(&self) -> SequenceOutcome {
        log::info!("Starting boot sequence");
        self.run_sequence(&self.inner.boot_lines).await
    }

    /// Restart the boot sequence, superseding anything in flight.
    pub async fn rerun(&self) -> SequenceOutcome {
        log::info!("Rerun requested (current run {})", self.current_run());
        self.run_boot_sequence().await
    }

    /// Issue a new run, clear the surface and type `lines`, then arm the
    /// prompt and enable input.
    pub async fn run_sequence(&self, lines: &[String]) -> SequenceOutcome {
        let run = self.inner.runs.issue();

        self.inner.surface.lock().clear();
        self.inner.input.lock().reset();

        if self.type_lines(lines, &run).await == TypeOutcome::Abandoned {
            log::debug!("Run {} superseded during sequence", run.id());
            return SequenceOutcome::Superseded;
        }

        let mut surface = self.inner.surface.lock();
        surface.push_break();
        surface.push_break();
        surface.push_prompt(&self.inner.prompt);
        self.inner.input.lock().enabled = true;
        surface.set_cursor(CursorMode::Idle);

        log::debug!("Run {} completed, input enabled", run.id());
        SequenceOutcome::Completed
    }

    /// Type each line in order with a line break between lines.
    ///
    /// Returns [`TypeOutcome::Abandoned`] as soon as `run` goes stale; no break
    /// is appended on behalf of a stale run.
    pub(crate) async fn type_lines(&self, lines: &[String], run: &RunToken) -> TypeOutcome {
        for (index, line) in lines.iter().enumerate() {
            let outcome = self
                .inner
                .typewriter
                .type_line(&self.inner.surface, line, run)
                .await;
            if outcome == TypeOutcome::Abandoned || !run.is_current() {
                return TypeOutcome::Abandoned;
            }
            if index + 1 < lines.len() {
                self.inner.surface.lock().push_break();
            }
        }
        TypeOutcome::Completed
    }
}
