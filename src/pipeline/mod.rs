//! The pipeline: load rows, normalize them, link persons to events, render
//! one digital object per person.

pub mod link;
pub mod normalize;

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use self::link::LinkWarning;
use crate::constants;
use crate::domain::{Event, Person};
use crate::error::{MemoError, Result};
use crate::render;
use crate::sink::OutputSink;
use crate::source::{RowSource, Sheet, SheetRow};

/// What to do with a row that fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Skip the row, record the error in the summary and keep going
    #[default]
    SkipRow,
    /// Abort the whole run on the first invalid row
    Strict,
}

/// Everything one run owns. Runs share nothing, so two pipelines over
/// different sources can execute side by side.
#[derive(Debug, Default)]
pub struct PipelineRun {
    pub persons: Vec<Person>,
    pub events: Vec<Event>,
    pub link_warnings: Vec<LinkWarning>,
    pub row_errors: Vec<String>,
}

impl PipelineRun {
    /// The events linked to `person`, in event-sheet order.
    pub fn linked_events<'a>(&'a self, person: &Person) -> Vec<&'a Event> {
        person
            .events
            .iter()
            .map(|&index| &self.events[index])
            .collect()
    }
}

/// Counters and timing for one pipeline invocation.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub persons_loaded: usize,
    pub events_loaded: usize,
    pub rows_skipped: usize,
    pub link_warnings: usize,
    pub objects_written: usize,
    pub objects_failed: usize,
    pub row_errors: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Drives a full run: rows in from a `RowSource`, artifacts out through an
/// `OutputSink`.
pub struct Pipeline {
    project_abbr: String,
    policy: FailurePolicy,
    source: Box<dyn RowSource>,
    sink: Arc<dyn OutputSink>,
}

impl Pipeline {
    pub fn new(project_abbr: String, source: Box<dyn RowSource>, sink: Arc<dyn OutputSink>) -> Self {
        Self {
            project_abbr,
            policy: FailurePolicy::default(),
            source,
            sink,
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Loads both sheets, links persons to events and writes every digital
    /// object. A render failure for one person never stops the others; it
    /// is logged and counted in the summary.
    pub fn run(&self) -> Result<RunSummary> {
        let started_at = Utc::now();
        let run = self.load_and_link()?;

        let mut objects_written = 0;
        let mut objects_failed = 0;
        for person in &run.persons {
            let events = run.linked_events(person);
            match self.render_object(person, &events) {
                Ok(()) => {
                    debug!("render: wrote digital object {}", person.id);
                    objects_written += 1;
                }
                Err(e) => {
                    error!("render: digital object {} failed: {}", person.id, e);
                    objects_failed += 1;
                }
            }
        }
        info!(
            "render: {} object(s) written, {} failed",
            objects_written, objects_failed
        );

        Ok(summarize(&run, started_at, objects_written, objects_failed))
    }

    /// Loads and links without rendering anything. Used by the `check`
    /// subcommand to validate the sheets.
    pub fn check(&self) -> Result<RunSummary> {
        let started_at = Utc::now();
        let run = self.load_and_link()?;
        Ok(summarize(&run, started_at, 0, 0))
    }

    fn load_and_link(&self) -> Result<PipelineRun> {
        let mut run = PipelineRun::default();

        let person_rows = self.source.rows(Sheet::Persons)?;
        run.persons = self.normalize_persons(&person_rows, &mut run.row_errors)?;
        info!(
            "persons: loaded {} of {} row(s)",
            run.persons.len(),
            person_rows.len()
        );

        let event_rows = self.source.rows(Sheet::Events)?;
        run.events = self.normalize_events(&event_rows, &mut run.row_errors)?;
        info!(
            "events: loaded {} of {} row(s)",
            run.events.len(),
            event_rows.len()
        );

        run.link_warnings = link::link_persons_to_events(&mut run.persons, &run.events);
        info!(
            "link: resolved references, {} warning(s)",
            run.link_warnings.len()
        );

        Ok(run)
    }

    fn normalize_persons(
        &self,
        rows: &[SheetRow],
        row_errors: &mut Vec<String>,
    ) -> Result<Vec<Person>> {
        let mut persons = Vec::new();
        let mut seen = HashSet::new();
        for row in rows {
            let normalized =
                normalize::normalize_person(row, &self.project_abbr).and_then(|person| {
                    if seen.insert(person.id.clone()) {
                        Ok(person)
                    } else {
                        Err(MemoError::DuplicateId {
                            row: format!("#{}", row.row_number()),
                            id: person.id,
                        })
                    }
                });
            match normalized {
                Ok(person) => persons.push(person),
                Err(e) => self.handle_row_error("persons", e, row_errors)?,
            }
        }
        Ok(persons)
    }

    fn normalize_events(
        &self,
        rows: &[SheetRow],
        row_errors: &mut Vec<String>,
    ) -> Result<Vec<Event>> {
        let mut events = Vec::new();
        let mut seen = HashSet::new();
        for row in rows {
            let normalized = normalize::normalize_event(row, &self.project_abbr).and_then(|event| {
                if seen.insert(event.id.clone()) {
                    Ok(event)
                } else {
                    Err(MemoError::DuplicateId {
                        row: format!("#{}", row.row_number()),
                        id: event.id,
                    })
                }
            });
            match normalized {
                Ok(event) => events.push(event),
                Err(e) => self.handle_row_error("events", e, row_errors)?,
            }
        }
        Ok(events)
    }

    fn handle_row_error(
        &self,
        stage: &str,
        error: MemoError,
        row_errors: &mut Vec<String>,
    ) -> Result<()> {
        match self.policy {
            FailurePolicy::Strict => Err(error),
            FailurePolicy::SkipRow => {
                warn!("{}: skipping row: {}", stage, error);
                row_errors.push(error.to_string());
                Ok(())
            }
        }
    }

    /// Renders the five artifacts of one digital object. `datastreams.csv`
    /// is rendered last, from the manifest of what was actually written.
    fn render_object(&self, person: &Person, events: &[&Event]) -> Result<()> {
        let mut manifest: Vec<String> = Vec::new();

        let dc = render::dublin_core::render(person)?;
        self.write(person, constants::DUBLIN_CORE_FILE, dc.as_bytes(), &mut manifest)?;

        let rdf = render::rdf::render(person, events)?;
        self.write(person, constants::RDF_FILE, rdf.as_bytes(), &mut manifest)?;

        let search = render::search::render(person, events)?;
        self.write(person, constants::SEARCH_FILE, search.as_bytes(), &mut manifest)?;

        let object = render::object_csv::render(person, &self.project_abbr)?;
        self.write(person, constants::OBJECT_CSV_FILE, object.as_bytes(), &mut manifest)?;

        let datastreams = render::datastreams::render(person, &manifest)?;
        self.write(
            person,
            constants::DATASTREAMS_FILE,
            datastreams.as_bytes(),
            &mut manifest,
        )?;

        Ok(())
    }

    fn write(
        &self,
        person: &Person,
        file_name: &str,
        contents: &[u8],
        manifest: &mut Vec<String>,
    ) -> Result<()> {
        self.sink.write_artifact(&person.id, file_name, contents)?;
        manifest.push(file_name.to_string());
        Ok(())
    }
}

fn summarize(
    run: &PipelineRun,
    started_at: DateTime<Utc>,
    objects_written: usize,
    objects_failed: usize,
) -> RunSummary {
    RunSummary {
        persons_loaded: run.persons.len(),
        events_loaded: run.events.len(),
        rows_skipped: run.row_errors.len(),
        link_warnings: run.link_warnings.len(),
        objects_written,
        objects_failed,
        row_errors: run.row_errors.clone(),
        started_at,
        finished_at: Utc::now(),
    }
}
