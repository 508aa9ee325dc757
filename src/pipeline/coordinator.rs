use std::sync::Arc;

use log::{debug, error, info, warn};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::data_capture::{CaptureRecorder, CaptureResult, CaptureSource};
use crate::location::{GeoFix, LocationProvider, LocationSource, UnavailableReason};
use crate::network::{UploadPayload, Uploader};
use crate::storage::RetentionPolicy;

use super::types::RunOutcome;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Start the location query alongside the capture instead of after it.
    pub prefetch_location: bool,
    pub retention: RetentionPolicy,
}

/// Drives capture → location → encode → upload runs.
///
/// Runs share nothing mutable: each owns its [`CaptureResult`] and
/// [`UploadPayload`], so runs may overlap freely and finish in any order.
/// A run never uploads more than once.
pub struct PipelineCoordinator<C, L, U> {
    recorder: CaptureRecorder<C>,
    locator: Arc<LocationProvider<L>>,
    uploader: U,
    options: PipelineOptions,
}

/// Location query started before the capture finished. Aborted if dropped
/// unresolved.
struct PrefetchedFix(JoinHandle<GeoFix>);

impl PrefetchedFix {
    async fn resolve(mut self) -> GeoFix {
        match (&mut self.0).await {
            Ok(fix) => fix,
            Err(e) => GeoFix::Unavailable(UnavailableReason::ProviderFailed(format!(
                "location task failed: {}",
                e
            ))),
        }
    }
}

impl Drop for PrefetchedFix {
    fn drop(&mut self) {
        self.0.abort();
    }
}

impl<C, L, U> PipelineCoordinator<C, L, U>
where
    C: CaptureSource + 'static,
    L: LocationSource + 'static,
    U: Uploader + 'static,
{
    pub fn new(
        recorder: CaptureRecorder<C>,
        locator: LocationProvider<L>,
        uploader: U,
        options: PipelineOptions,
    ) -> Self {
        Self {
            recorder,
            locator: Arc::new(locator),
            uploader,
            options,
        }
    }

    pub fn recorder(&self) -> &CaptureRecorder<C> {
        &self.recorder
    }

    pub fn options(&self) -> PipelineOptions {
        self.options
    }

    /// Runs the pipeline to its terminal outcome.
    ///
    /// A failed stage ends the run on the spot: no location query follows a
    /// failed capture (unless prefetching, in which case the query is
    /// aborted) and nothing is uploaded without a valid fix.
    pub async fn run_pipeline(&self) -> RunOutcome {
        let run_id = Uuid::new_v4();
        info!("[{}] Pipeline run started", run_id);

        let prefetched = self.options.prefetch_location.then(|| {
            let locator = Arc::clone(&self.locator);
            debug!("[{}] Prefetching location", run_id);
            PrefetchedFix(tokio::spawn(async move { locator.get_fix().await }))
        });

        let capture = match self.recorder.record().await {
            Ok(capture) => capture,
            Err(e) => {
                error!("[{}] Capture failed: {}", run_id, e);
                return RunOutcome::CaptureFailure(e.to_string());
            }
        };
        debug!(
            "[{}] Captured {} byte(s) at {}",
            run_id,
            capture.artifact().len(),
            capture.path().display()
        );

        let fix = match prefetched {
            Some(prefetched) => prefetched.resolve().await,
            None => self.locator.get_fix().await,
        };
        let coordinates = match fix {
            GeoFix::Valid(c) => c,
            GeoFix::Unavailable(reason) => {
                warn!("[{}] Location unavailable: {}", run_id, reason);
                return RunOutcome::LocationUnavailable(reason);
            }
        };
        debug!("[{}] Tagged with {}", run_id, coordinates);

        let outcome = {
            let payload = UploadPayload::new(capture.artifact(), coordinates);
            RunOutcome::from(self.uploader.upload(&payload).await)
        };
        info!("[{}] Pipeline run finished: {}", run_id, outcome);

        self.apply_retention(run_id, &capture, &outcome);
        outcome
    }

    fn apply_retention(&self, run_id: Uuid, capture: &CaptureResult, outcome: &RunOutcome) {
        if self.options.retention != RetentionPolicy::DeleteOnSuccess || !outcome.is_success() {
            return;
        }
        match self.recorder.storage().remove_artifact(capture.path()) {
            Ok(()) => debug!("[{}] Removed local artifact {}", run_id, capture.path().display()),
            Err(e) => warn!("[{}] Could not remove local artifact: {}", run_id, e),
        }
    }

    /// Starts a run in the background. The returned handle yields its
    /// outcome once.
    pub fn spawn_run(self: &Arc<Self>) -> RunHandle {
        let (tx, rx) = oneshot::channel();
        let this = Arc::clone(self);
        let task = tokio::spawn(async move {
            let outcome = this.run_pipeline().await;
            if tx.send(outcome).is_err() {
                debug!("Run outcome discarded: caller went away");
            }
        });
        RunHandle { outcome: rx, task }
    }

    /// Starts a run in the background and hands its outcome to `notify`.
    pub fn run_with_callback<F>(self: &Arc<Self>, notify: F) -> JoinHandle<()>
    where
        F: FnOnce(RunOutcome) + Send + 'static,
    {
        let this = Arc::clone(self);
        tokio::spawn(async move { notify(this.run_pipeline().await) })
    }
}

/// Handle to a run started with [`PipelineCoordinator::spawn_run`].
///
/// Dropping the handle detaches the run; it still finishes, its outcome is
/// discarded.
pub struct RunHandle {
    outcome: oneshot::Receiver<RunOutcome>,
    task: JoinHandle<()>,
}

impl RunHandle {
    /// Waits for the run's outcome. `None` if the run was torn down before
    /// finishing.
    pub async fn outcome(self) -> Option<RunOutcome> {
        self.outcome.await.ok()
    }

    /// Tears the run down wherever it is. No outcome is delivered.
    pub fn abandon(self) {
        self.task.abort();
    }
}
