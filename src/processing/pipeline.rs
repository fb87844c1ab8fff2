//! Pipeline orchestration: bounded concurrency, per-stage deadlines, and
//! per-image / per-job failure isolation.
//!
//! CPU-bound probe and transform work runs on `tokio::task::spawn_blocking`
//! guarded by `tokio::time::timeout`. A deadline firing discards that stage's
//! result and never cancels sibling stages; the blocking call itself is not
//! preempted. Each blocking closure owns its semaphore permit, so abandoned
//! work keeps its pool slot until it actually finishes and the pool can never
//! be oversubscribed.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::core::{
    BatchItem, ImageMetadata, ProcessOptions, ProcessingOutcome, TransformFailure, TransformJob,
};
use crate::processing::validation::validate_options;
use crate::processing::{executor, metadata, planner};
use crate::utils::{MetadataError, PipelineError, PipelineResult, TransformError};

/// Simultaneous decode/encode operations across all images.
const MAX_CONCURRENT_OPS: usize = 4;
const METADATA_DEADLINE: Duration = Duration::from_secs(10);
const TRANSFORM_DEADLINE: Duration = Duration::from_secs(30);

/// The variant generation pipeline.
///
/// Cheap to clone; clones share one worker pool.
#[derive(Clone)]
pub struct ImagePipeline {
    permits: Arc<Semaphore>,
    metadata_deadline: Duration,
    transform_deadline: Duration,
}

impl ImagePipeline {
    pub fn new() -> Self {
        debug!("Creating image pipeline with {} worker slots", MAX_CONCURRENT_OPS);
        Self {
            permits: Arc::new(Semaphore::new(MAX_CONCURRENT_OPS)),
            metadata_deadline: METADATA_DEADLINE,
            transform_deadline: TRANSFORM_DEADLINE,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_deadlines(metadata_deadline: Duration, transform_deadline: Duration) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(MAX_CONCURRENT_OPS)),
            metadata_deadline,
            transform_deadline,
        }
    }

    /// Processes one image into its requested variants.
    ///
    /// Fails only on malformed options or fatal metadata rejection; individual
    /// job failures are accumulated in the returned outcome.
    pub async fn process_image(
        &self,
        buffer: &[u8],
        options: &ProcessOptions,
    ) -> PipelineResult<ProcessingOutcome> {
        validate_options(options)?;
        self.run_single(Arc::new(buffer.to_vec()), options).await
    }

    /// Processes many images concurrently under one options bundle.
    ///
    /// The returned items match the input order by index regardless of which
    /// image finishes first. One image's fatal failure is reported in its own
    /// item and never aborts the batch; only malformed options fail the call.
    pub async fn process_batch(
        &self,
        buffers: Vec<Vec<u8>>,
        options: &ProcessOptions,
    ) -> PipelineResult<Vec<BatchItem>> {
        validate_options(options)?;
        info!("Processing batch of {} images", buffers.len());

        let mut handles: Vec<(usize, JoinHandle<PipelineResult<ProcessingOutcome>>)> =
            Vec::with_capacity(buffers.len());
        for (index, buffer) in buffers.into_iter().enumerate() {
            let pipeline = self.clone();
            let options = options.clone();
            handles.push((
                index,
                tokio::spawn(async move {
                    pipeline.run_single(Arc::new(buffer), &options).await
                }),
            ));
        }

        let mut items = Vec::with_capacity(handles.len());
        let mut failed = 0;
        for (index, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => Err(PipelineError::worker(format!("Image task aborted: {e}"))),
            };
            if let Err(e) = &outcome {
                warn!("Image {} failed: {}", index, e);
                failed += 1;
            }
            items.push(BatchItem { index, outcome });
        }

        if failed > 0 {
            warn!("Batch completed with {} failed images out of {}", failed, items.len());
        } else {
            info!("Batch completed successfully: {} images processed", items.len());
        }
        Ok(items)
    }

    /// Full single-image pipeline over an already-validated options bundle.
    async fn run_single(
        &self,
        buffer: Arc<Vec<u8>>,
        options: &ProcessOptions,
    ) -> PipelineResult<ProcessingOutcome> {
        let metadata = self.probe_metadata(Arc::clone(&buffer)).await?;
        let jobs = planner::plan_jobs(options, &metadata);
        debug!(
            "Planned {} transform jobs for {}x{} {} source",
            jobs.len(),
            metadata.width,
            metadata.height,
            metadata.source_format
        );

        let mut handles: Vec<(String, JoinHandle<Result<Vec<u8>, TransformError>>)> =
            Vec::with_capacity(jobs.len());
        for job in jobs {
            let permits = Arc::clone(&self.permits);
            let buffer = Arc::clone(&buffer);
            let deadline = self.transform_deadline;
            handles.push((
                job.key.clone(),
                tokio::spawn(run_transform(permits, deadline, buffer, job)),
            ));
        }

        let mut variants = HashMap::new();
        let mut failures = Vec::new();
        for (key, handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => Err(TransformError::processing(format!("Transform task aborted: {e}"))),
            };
            match result {
                Ok(bytes) => {
                    variants.insert(key, bytes);
                }
                Err(error) => {
                    warn!("Transform failed for '{}': {}", key, error);
                    failures.push(TransformFailure { key, error });
                }
            }
        }

        if failures.is_empty() {
            debug!("Image processed: {} variants produced", variants.len());
        } else {
            warn!(
                "Image processed with {} failed jobs, {} variants produced",
                failures.len(),
                variants.len()
            );
        }
        Ok(ProcessingOutcome { variants, failures, metadata })
    }

    /// Runs the header probe under the metadata deadline.
    async fn probe_metadata(&self, buffer: Arc<Vec<u8>>) -> PipelineResult<ImageMetadata> {
        let permit = Arc::clone(&self.permits).acquire_owned().await?;
        let handle = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            metadata::probe(&buffer)
        });

        match timeout(self.metadata_deadline, handle).await {
            Ok(Ok(result)) => result.map_err(PipelineError::Metadata),
            Ok(Err(e)) => Err(PipelineError::worker(format!("Metadata task aborted: {e}"))),
            Err(_) => Err(PipelineError::Metadata(MetadataError::Timeout(
                self.metadata_deadline,
            ))),
        }
    }
}

impl Default for ImagePipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs one job on the blocking pool under the transform deadline.
///
/// The permit travels into the blocking closure: a timed-out job's thread
/// keeps its pool slot until the work really ends, and its late result is
/// dropped with the join handle.
async fn run_transform(
    permits: Arc<Semaphore>,
    deadline: Duration,
    buffer: Arc<Vec<u8>>,
    job: TransformJob,
) -> Result<Vec<u8>, TransformError> {
    let permit = permits
        .acquire_owned()
        .await
        .map_err(|e| TransformError::processing(format!("Failed to acquire worker: {e}")))?;

    let handle = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        executor::execute_job(&buffer, &job)
    });

    match timeout(deadline, handle).await {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => Err(TransformError::processing(format!("Transform task panicked: {e}"))),
        Err(_) => Err(TransformError::Timeout(deadline)),
    }
}
