//! Per-sample worker fan-out.

use crate::run::{Model, ModelSpec, RunOutput};
use std::hash::Hash;
use std::time::Instant;
use weft_core::{RunError, UnitId};
use weft_grid::Grid;
use weft_solver::{Generator, GeneratorOptions, RunReport, SampleReport};

/// Like [`run()`](crate::run()), but generating the requested samples
/// on a pool of worker threads.
///
/// Samples are the engine's natural unit of parallelism: the model and
/// propagator are immutable after construction, every attempt owns its
/// wave exclusively, and the only values crossing threads are completed
/// unit grids. Because each sample owns a disjoint seed block, the
/// output is identical to the sequential [`run()`](crate::run()) —
/// grids and per-sample reports land in sample order regardless of
/// worker scheduling.
///
/// `workers` caps the pool; `None` sizes it from the machine's
/// available parallelism, never exceeding the sample count.
///
/// # Errors
///
/// Same contract as [`run()`](crate::run()).
pub fn run_parallel<T>(
    spec: ModelSpec<T>,
    options: &GeneratorOptions,
    workers: Option<usize>,
) -> Result<RunOutput<T>, RunError>
where
    T: Clone + Eq + Hash + Send + Sync,
{
    let start = Instant::now();
    let model = Model::build(spec)?;
    let generator = Generator::new(
        model.propagator(),
        model.weights(),
        model.ground(),
        options.clone(),
    )?;

    let sample_count = options.sample_count;
    let workers = resolved_worker_count(workers, sample_count);

    let (job_tx, job_rx) = crossbeam_channel::unbounded::<u32>();
    let (result_tx, result_rx) =
        crossbeam_channel::unbounded::<(u32, SampleReport, Option<Grid<UnitId>>)>();
    for sample in 0..sample_count {
        // The receiver outlives the loop; an unbounded send cannot block.
        let _ = job_tx.send(sample);
    }
    drop(job_tx);

    let mut slots: Vec<Option<(SampleReport, Option<Grid<UnitId>>)>> =
        vec![None; sample_count as usize];
    std::thread::scope(|scope| {
        for _ in 0..workers {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            let generator = &generator;
            scope.spawn(move || {
                while let Ok(sample) = job_rx.recv() {
                    let (report, grid) = generator.generate_sample(sample);
                    if result_tx.send((sample, report, grid)).is_err() {
                        break;
                    }
                }
            });
        }
        drop(result_tx);
        for (sample, report, grid) in result_rx.iter() {
            slots[sample as usize] = Some((report, grid));
        }
    });

    let mut grids = Vec::with_capacity(sample_count as usize);
    let mut samples = Vec::with_capacity(sample_count as usize);
    for slot in slots.into_iter().flatten() {
        let (report, grid) = slot;
        samples.push(report);
        grids.extend(grid.iter().map(|g| model.materialize(g)));
    }
    if grids.is_empty() {
        return Err(RunError::AllSamplesFailed {
            samples: sample_count,
            retry_budget: options.retry_budget,
        });
    }
    Ok(RunOutput {
        grids,
        report: RunReport {
            total_us: start.elapsed().as_micros() as u64,
            samples,
        },
    })
}

/// Worker pool size: the explicit request clamped to the useful range,
/// or the machine's available parallelism when unspecified. Never more
/// workers than samples.
fn resolved_worker_count(requested: Option<usize>, sample_count: u32) -> usize {
    let cap = (sample_count as usize).max(1);
    match requested {
        Some(n) => n.clamp(1, cap),
        None => {
            let cpus = std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4);
            cpus.clamp(1, cap)
        }
    }
}
