//! Job resolution and execution.
//!
//! A [`BatchJob`] turns a parsed `border` command into concrete
//! input/output pairs. Each [`Job`] then runs through
//! `decode -> [inner border] -> border -> encode` on its own buffers, so jobs
//! never share state and a failing file cannot affect the others.

use crate::buffer::PixelBuffer;
use crate::cli::{BorderCommand, BorderTarget, Config};
use crate::codec::{self, is_batch_input};
use crate::compositor::BorderPlan;
use crate::error::{Error, Result};
use crate::terminal::{
    ProcessingStats, Styled, Symbols, print_error, print_info, print_success, print_warning,
    stdout_supports_color,
};
use log::debug;
use rayon::prelude::*;
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// One image to border.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// The set of jobs for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchJob {
    /// Explicit input and output; any failure is fatal.
    Single(Job),
    /// Every matching file in `dir`; failures are counted per file.
    Directory { dir: PathBuf, jobs: Vec<Job> },
}

impl BatchJob {
    /// Resolve a target into jobs, enumerating the directory if needed.
    pub fn resolve(target: &BorderTarget, border_width: u32) -> Result<Self> {
        match target {
            BorderTarget::File { input, output } => Ok(BatchJob::Single(Job {
                input: input.clone(),
                output: output.clone(),
            })),
            BorderTarget::Directory(dir) => {
                let jobs = collect_batch_inputs(dir)?
                    .into_iter()
                    .map(|input| Job {
                        output: output_path_for(&input, border_width),
                        input,
                    })
                    .collect();
                Ok(BatchJob::Directory {
                    dir: dir.clone(),
                    jobs,
                })
            }
        }
    }

    pub fn jobs(&self) -> &[Job] {
        match self {
            BatchJob::Single(job) => std::slice::from_ref(job),
            BatchJob::Directory { jobs, .. } => jobs,
        }
    }
}

/// Regular files directly inside `dir` with a .jpg/.jpeg/.png extension,
/// sorted by path.
pub fn collect_batch_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(Error::NotFound {
            path: dir.to_path_buf(),
        });
    }
    if !dir.is_dir() {
        return Err(Error::InvalidArgument {
            argument: dir.display().to_string(),
            reason: String::from("Not a directory"),
        });
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::io_with_path(e, dir))? {
        let path = entry.map_err(|e| Error::io_with_path(e, dir))?.path();
        if path.is_file() && is_batch_input(&path) {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(Error::NoMatchingFiles {
            path: dir.to_path_buf(),
        });
    }

    files.sort();
    Ok(files)
}

/// `dir/photo.JPG` becomes `dir/photo_vanity_<width>.JPG`.
///
/// The name is built from the raw `OsStr` parts so that a non-UTF-8 stem is
/// kept byte for byte.
pub fn output_path_for(input: &Path, border_width: u32) -> PathBuf {
    let mut name = OsString::from(input.file_stem().unwrap_or_default());
    name.push(format!("_vanity_{}", border_width));
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    input.with_file_name(name)
}

/// Progress of a job through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum JobStage {
    Loaded,
    InnerBordered,
    Bordered,
    Written,
}

impl fmt::Display for JobStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            JobStage::Loaded => "loaded",
            JobStage::InnerBordered => "inner-bordered",
            JobStage::Bordered => "bordered",
            JobStage::Written => "written",
        })
    }
}

/// Result of running a single job.
#[derive(Debug)]
pub enum ProcessResult {
    /// The bordered image was written.
    Success {
        input: PathBuf,
        output: PathBuf,
        /// Decoded width, height and channel count.
        source: (u32, u32, u8),
        /// Written width and height.
        bordered: (u32, u32),
    },
    /// The job stopped; `reached` is the last stage it completed.
    Failed {
        path: PathBuf,
        reached: Option<JobStage>,
        error: Error,
    },
}

/// Run one job to completion or to its first failure.
///
/// All buffers are owned by this call and dropped before it returns.
pub fn run_job(job: &Job, plan: &BorderPlan, quality: Option<u8>) -> ProcessResult {
    let mut reached = None;
    match execute(job, plan, quality, &mut reached) {
        Ok((source, bordered)) => ProcessResult::Success {
            input: job.input.clone(),
            output: job.output.clone(),
            source,
            bordered,
        },
        Err(error) => {
            debug!(
                "{} failed after stage {:?}: {}",
                job.input.display(),
                reached,
                error
            );
            ProcessResult::Failed {
                path: job.input.clone(),
                reached,
                error,
            }
        }
    }
}

fn execute(
    job: &Job,
    plan: &BorderPlan,
    quality: Option<u8>,
    reached: &mut Option<JobStage>,
) -> Result<((u32, u32, u8), (u32, u32))> {
    let mut advance = |stage: JobStage| {
        debug!("{}: {}", job.input.display(), stage);
        *reached = Some(stage);
    };

    let mut image: PixelBuffer = codec::decode(&job.input)?;
    let source = (image.width(), image.height(), image.channels());
    advance(JobStage::Loaded);

    if let Some(inner) = plan.inner {
        image = inner.apply(&image)?;
        advance(JobStage::InnerBordered);
    }

    let bordered = plan.outer.apply(&image)?;
    drop(image);
    advance(JobStage::Bordered);

    codec::encode(&bordered, &job.output, quality)?;
    advance(JobStage::Written);

    Ok((source, (bordered.width(), bordered.height())))
}

/// Runs a parsed configuration and keeps the tallies.
pub struct Processor {
    config: Config,
    stats: ProcessingStats,
    start_time: Instant,
}

impl Processor {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            stats: ProcessingStats::new(),
            start_time: Instant::now(),
        }
    }

    /// Run the configured command.
    ///
    /// Single-file mode returns the job's error directly. Directory mode only
    /// fails as a whole when nothing could be enumerated; per-file failures
    /// are reported and counted in the returned stats.
    pub fn run(&mut self) -> Result<ProcessingStats> {
        let command: BorderCommand = self.config.border.clone().ok_or_else(|| {
            Error::MissingArgument {
                argument: String::from("<COMMAND>"),
            }
        })?;
        let plan = BorderPlan::new(command.border_width, command.inner);
        debug!("{:?}, {}px added per side", plan, plan.total_width());

        match BatchJob::resolve(&command.target, command.border_width)? {
            BatchJob::Single(job) => self.run_single(&job, &plan)?,
            BatchJob::Directory { dir, jobs } => self.run_directory(&dir, &jobs, &plan)?,
        }

        self.stats.set_duration(self.start_time.elapsed());
        Ok(self.stats.clone())
    }

    fn run_single(&mut self, job: &Job, plan: &BorderPlan) -> Result<()> {
        if self.config.jobs.is_some_and(|n| n > 1) && self.config.verbose {
            print_warning("--jobs only applies to directory mode");
        }

        match run_job(job, plan, self.config.quality) {
            ProcessResult::Failed { error, .. } => Err(error),
            success => {
                self.handle_result(success);
                Ok(())
            }
        }
    }

    fn run_directory(&mut self, dir: &Path, jobs: &[Job], plan: &BorderPlan) -> Result<()> {
        let threads = self.config.jobs.unwrap_or(1).min(jobs.len());
        let quality = self.config.quality;

        if !self.config.quiet {
            let parallel_info = if threads > 1 {
                format!(" (using {} threads)", threads)
            } else {
                String::new()
            };
            print_info(&format!(
                "Found {} image file(s) in {}{}",
                jobs.len(),
                dir.display(),
                parallel_info
            ));
        }

        if threads > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?;
            let results: Vec<ProcessResult> = pool.install(|| {
                jobs.par_iter()
                    .map(|job| run_job(job, plan, quality))
                    .collect()
            });
            for result in results {
                self.handle_result(result);
            }
        } else {
            for job in jobs {
                let result = run_job(job, plan, quality);
                self.handle_result(result);
            }
        }

        Ok(())
    }

    /// Count a result and report it.
    fn handle_result(&mut self, result: ProcessResult) {
        match result {
            ProcessResult::Success {
                input,
                output,
                source,
                bordered,
            } => {
                self.stats.add_success();

                if !self.config.quiet {
                    let color_enabled = stdout_supports_color();
                    let symbols = Symbols::new(color_enabled);
                    let input_name = input.file_name().unwrap_or_default().to_string_lossy();
                    let output_name = output.file_name().unwrap_or_default().to_string_lossy();
                    let detail = if self.config.verbose {
                        format!(
                            " ({}x{}, {} channel(s) {} {}x{})",
                            source.0, source.1, source.2, symbols.arrow(), bordered.0, bordered.1
                        )
                    } else {
                        format!(" ({}x{})", bordered.0, bordered.1)
                    };
                    print_success(&format!(
                        "Bordered {} {} {}{}",
                        Styled::with_color_support(input_name.as_ref(), color_enabled).blue(),
                        symbols.arrow(),
                        Styled::with_color_support(output_name.as_ref(), color_enabled).cyan(),
                        detail
                    ));
                }
            }
            ProcessResult::Failed {
                path,
                reached,
                error,
            } => {
                self.stats.add_failure();

                let name = path.file_name().unwrap_or_default().to_string_lossy();
                let stage = reached.map_or(String::new(), |s| format!(" after it was {}", s));
                print_error(&format!("Failed to process {}{}: {}", name, stage, error));
            }
        }
    }
}
