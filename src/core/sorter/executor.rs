//! Sort run execution: Extract → Classify → Build Path → Relocate, per file.

use super::walker::list_source;
use super::{PhotoFile, SkippedFile, SortConfig, SortReport};
use crate::core::classify::{classify_capture, Clock, SystemClock, YearSource};
use crate::core::layout::{build_path, ensure_dir, model_folder, sanitize_model};
use crate::core::metadata::{read_capture_metadata, ExifExtractor, MetadataExtractor};
use crate::core::relocate::{
    destination_for, relocate, sibling_set, Relocation, RelocateMode, SiblingMatch,
};
use crate::error::{ProcessError, SorterError};
use crate::events::{
    null_sender, Event, EventSender, FileEvent, FileProgress, RunEvent, RunSummary, ScanEvent,
};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Instant;

/// Builder for sorter configuration
pub struct SorterBuilder {
    config: SortConfig,
    extractor: Option<Box<dyn MetadataExtractor>>,
    clock: Option<Box<dyn Clock>>,
}

impl SorterBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            config: SortConfig::default(),
            extractor: None,
            clock: None,
        }
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: SortConfig) -> Self {
        self.config = config;
        self
    }

    /// Folder to sort
    pub fn source(mut self, source: impl Into<PathBuf>) -> Self {
        self.config.source = source.into();
        self
    }

    /// Root of the destination tree
    pub fn destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.config.destination = destination.into();
        self
    }

    /// Set the relocation mode
    pub fn mode(mut self, mode: RelocateMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Set how siblings are matched in [`RelocateMode::MoveWithSiblings`]
    pub fn sibling_match(mut self, sibling_match: SiblingMatch) -> Self {
        self.config.sibling_match = sibling_match;
        self
    }

    /// Set where the year folder comes from
    pub fn year_source(mut self, year_source: YearSource) -> Self {
        self.config.year_source = year_source;
        self
    }

    /// Folder name for photos without a usable model
    pub fn unknown_model(mut self, label: impl Into<String>) -> Self {
        self.config.unknown_model = label.into();
        self
    }

    /// Only report what would happen
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.config.dry_run = dry_run;
        self
    }

    /// Set the metadata extractor (defaults to EXIF)
    pub fn extractor(mut self, extractor: Box<dyn MetadataExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Set the clock (defaults to the system clock)
    pub fn clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Build the sorter
    pub fn build(self) -> Result<PhotoSorter, SorterError> {
        if sanitize_model(&self.config.unknown_model).as_deref()
            != Some(self.config.unknown_model.as_str())
        {
            return Err(SorterError::Config(format!(
                "unknown-model label {:?} is not a valid folder name",
                self.config.unknown_model
            )));
        }

        Ok(PhotoSorter {
            config: self.config,
            extractor: self.extractor.unwrap_or_else(|| Box::new(ExifExtractor)),
            clock: self.clock.unwrap_or_else(|| Box::new(SystemClock)),
        })
    }
}

impl Default for SorterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Sorts one flat folder of photos into the destination tree
pub struct PhotoSorter {
    config: SortConfig,
    extractor: Box<dyn MetadataExtractor>,
    clock: Box<dyn Clock>,
}

impl PhotoSorter {
    /// Create a new sorter builder
    pub fn builder() -> SorterBuilder {
        SorterBuilder::new()
    }

    /// The configuration this sorter runs with
    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    /// Run without events
    pub fn run(&self) -> Result<SortReport, SorterError> {
        self.run_with_events(&null_sender())
    }

    /// Run, reporting progress through `events`
    ///
    /// Only a failure to list the source directory is returned as an error.
    /// Per-file failures are logged and collected in [`SortReport::skipped`].
    pub fn run_with_events(&self, events: &EventSender) -> Result<SortReport, SorterError> {
        let start = Instant::now();
        events.send(Event::Run(RunEvent::Started));
        events.send(Event::Scan(ScanEvent::Started {
            source: self.config.source.clone(),
        }));

        let listing = match list_source(&self.config.source) {
            Ok(listing) => listing,
            Err(e) => {
                tracing::error!(source = %self.config.source.display(), error = %e, "cannot list source directory");
                events.send(Event::Run(RunEvent::Error {
                    message: e.to_string(),
                }));
                return Err(e.into());
            }
        };

        let total = listing.files.len();
        events.send(Event::Scan(ScanEvent::Completed {
            total_files: total,
            directories_skipped: listing.directories_skipped,
        }));
        tracing::info!(
            source = %listing.root.display(),
            files = total,
            directories_skipped = listing.directories_skipped,
            "listed source directory"
        );

        let mut relocated: Vec<Relocation> = Vec::new();
        let mut skipped: Vec<SkippedFile> = Vec::new();
        // Files already moved as someone else's sibling
        let mut done: HashSet<PathBuf> = HashSet::new();

        for (i, file) in listing.files.iter().enumerate() {
            events.send(Event::File(FileEvent::Progress(FileProgress {
                completed: i + 1,
                total,
                current_path: file.path.clone(),
            })));

            if done.contains(&file.path) {
                tracing::debug!(path = %file.path.display(), "already relocated as a sibling");
                continue;
            }

            let outcomes = match self.process_file(file) {
                Ok(outcomes) => outcomes,
                Err(e) => vec![Err(e)],
            };

            for outcome in outcomes {
                match outcome {
                    Ok(relocation) => {
                        tracing::info!(
                            source = %relocation.source.display(),
                            destination = %relocation.destination.display(),
                            dry_run = self.config.dry_run,
                            "relocated"
                        );
                        events.send(Event::File(FileEvent::Relocated {
                            source: relocation.source.clone(),
                            destination: relocation.destination.clone(),
                        }));
                        done.insert(relocation.source.clone());
                        relocated.push(relocation);
                    }
                    Err(e) => {
                        tracing::warn!(path = %e.path().display(), error = %e, "skipped");
                        events.send(Event::File(FileEvent::Skipped {
                            path: e.path().clone(),
                            message: e.to_string(),
                        }));
                        skipped.push(SkippedFile {
                            path: e.path().clone(),
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        let duration_ms = start.elapsed().as_millis() as u64;
        events.send(Event::Run(RunEvent::Completed {
            summary: RunSummary {
                files_seen: total,
                relocated: relocated.len(),
                skipped: skipped.len(),
                duration_ms,
            },
        }));

        Ok(SortReport {
            source: listing.root,
            destination: self.config.destination.clone(),
            mode: self.config.mode,
            dry_run: self.config.dry_run,
            files_seen: total,
            directories_skipped: listing.directories_skipped,
            relocated,
            skipped,
            duration_ms,
        })
    }

    /// Run the pipeline for one file
    ///
    /// The outer error means the file never got as far as relocation; the
    /// inner results are one per file touched (several with siblings).
    fn process_file(
        &self,
        file: &PhotoFile,
    ) -> Result<Vec<Result<Relocation, ProcessError>>, ProcessError> {
        let metadata = read_capture_metadata(&file.path, self.extractor.as_ref())?;

        if metadata.model.as_deref().and_then(sanitize_model).is_none() {
            tracing::warn!(
                path = %file.path.display(),
                model = ?metadata.model,
                fallback = %self.config.unknown_model,
                "no usable camera model"
            );
        }
        let model = model_folder(metadata.model.as_deref(), &self.config.unknown_model);

        let (year, quarter) =
            classify_capture(&metadata.captured_at, self.config.year_source, self.clock.as_ref());
        let dest_dir = build_path(&self.config.destination, &model, year, quarter);

        if self.config.dry_run {
            return self.plan(file, &dest_dir);
        }

        ensure_dir(&dest_dir)?;
        Ok(relocate(
            &file.path,
            &dest_dir,
            self.config.mode,
            self.config.sibling_match,
        ))
    }

    /// What [`relocate`] would do, without doing it
    fn plan(
        &self,
        file: &PhotoFile,
        dest_dir: &std::path::Path,
    ) -> Result<Vec<Result<Relocation, ProcessError>>, ProcessError> {
        let sources = match self.config.mode {
            RelocateMode::Copy | RelocateMode::Move => vec![file.path.clone()],
            RelocateMode::MoveWithSiblings => {
                sibling_set(&file.path, self.config.sibling_match)?
            }
        };

        Ok(sources
            .into_iter()
            .map(|source| {
                let destination = destination_for(&source, dest_dir)?;
                Ok(Relocation {
                    source,
                    destination,
                })
            })
            .collect())
    }
}
