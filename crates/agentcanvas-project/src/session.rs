//! Project load/flush session with a stale-load guard.
//!
//! Loads run on tokio because they touch disk; everything else in the
//! application is synchronous on the UI loop. The session hands completed
//! loads back through a slot the UI thread drains, and a generation counter
//! guarantees that switching projects mid-load discards the superseded
//! result instead of merging it into the new project's model.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use agentcanvas_core::constants::WORKFLOW_FILE;
use agentcanvas_core::ProjectError;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use agentcanvas_designer::{Camera, GraphModel, WorkflowFile};

use crate::definitions::{AgentDefinition, AgentPayload, DefinitionStore};

/// Hydration state of the session. While `Loading`, the caller must treat
/// the model as empty rather than render a half-hydrated graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading { project: PathBuf },
    Loaded { project: PathBuf },
}

/// One palette agent with its definition payload resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedAgent {
    pub definition: AgentDefinition,
    pub payload: AgentPayload,
}

/// Everything a completed project load produced.
#[derive(Debug, Clone)]
pub struct LoadedProject {
    pub project: PathBuf,
    pub agents: Vec<LoadedAgent>,
    /// The flushed canvas layout, when the project has one.
    pub workflow: Option<WorkflowFile>,
}

struct LoadOutcome {
    generation: u64,
    result: Result<LoadedProject, ProjectError>,
}

/// Per-window project session: owns the current project path, runs loads,
/// and flushes the workflow layout on structural mutations.
pub struct ProjectSession<S: DefinitionStore> {
    store: Arc<S>,
    state: LoadState,
    generation: Arc<AtomicU64>,
    slot: Arc<Mutex<Option<LoadOutcome>>>,
}

impl<S: DefinitionStore> ProjectSession<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
            state: LoadState::Idle,
            generation: Arc::new(AtomicU64::new(0)),
            slot: Arc::new(Mutex::new(None)),
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// The currently open (or opening) project path.
    pub fn project(&self) -> Option<&Path> {
        match &self.state {
            LoadState::Idle => None,
            LoadState::Loading { project } | LoadState::Loaded { project } => Some(project),
        }
    }

    /// Starts hydrating a project. Any load still in flight is invalidated:
    /// its completion will carry a stale generation and be dropped.
    pub fn open_project(&mut self, project: impl Into<PathBuf>) {
        let project = project.into();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!(project = %project.display(), "Opening project");

        self.state = LoadState::Loading {
            project: project.clone(),
        };

        let store = Arc::clone(&self.store);
        let slot = Arc::clone(&self.slot);
        let current = Arc::clone(&self.generation);
        tokio::spawn(async move {
            let result = load_project(store.as_ref(), &project).await;
            // A newer open_project supersedes this load; don't let a slow
            // stale load clobber the current one's slot.
            if generation == current.load(Ordering::SeqCst) {
                *slot.lock() = Some(LoadOutcome { generation, result });
            } else {
                debug!(project = %project.display(), "Dropping superseded project load");
            }
        });
    }

    /// Drains a completed load on the UI thread.
    ///
    /// Returns `Some` only for the load matching the current generation;
    /// results of superseded loads are discarded here (the stale-write
    /// guard). Load errors surface as a non-blocking `warn` and leave the
    /// session in `Idle`.
    pub fn poll(&mut self) -> Option<LoadedProject> {
        let outcome = self.slot.lock().take()?;
        if outcome.generation != self.generation.load(Ordering::SeqCst) {
            debug!("Discarding stale project load");
            return None;
        }

        match outcome.result {
            Ok(loaded) => {
                self.state = LoadState::Loaded {
                    project: loaded.project.clone(),
                };
                Some(loaded)
            }
            Err(err) => {
                warn!(error = %err, "Project load failed");
                self.state = LoadState::Idle;
                None
            }
        }
    }

    /// Flushes the canvas layout into the project's workflow file. Called
    /// after every structural mutation.
    pub fn flush_workflow(
        &self,
        name: &str,
        model: &GraphModel,
        camera: &Camera,
    ) -> Result<(), ProjectError> {
        let Some(project) = self.project() else {
            return Ok(());
        };
        let path = project.join(WORKFLOW_FILE);
        WorkflowFile::from_model(name, model, camera)
            .save_to_file(&path)
            .map_err(|err| ProjectError::Other {
                message: format!("{err:#}"),
            })
    }
}

async fn load_project<S: DefinitionStore>(
    store: &S,
    project: &Path,
) -> Result<LoadedProject, ProjectError> {
    let definitions = store.list_agent_definitions(project).await?;

    let mut agents = Vec::with_capacity(definitions.len());
    for definition in definitions {
        let payload = match store.read_agent_definition(&definition.source_path).await {
            Ok(payload) => payload,
            Err(err) => {
                // One unreadable definition must not block the project.
                warn!(
                    path = %definition.source_path.display(),
                    error = %err,
                    "Falling back to default payload"
                );
                AgentPayload::default()
            }
        };
        agents.push(LoadedAgent {
            definition,
            payload,
        });
    }

    let workflow_path = project.join(WORKFLOW_FILE);
    let workflow = if workflow_path.is_file() {
        match WorkflowFile::load_from_file(&workflow_path) {
            Ok(file) => Some(file),
            Err(err) => {
                warn!(error = %format!("{err:#}"), "Ignoring unreadable workflow file");
                None
            }
        }
    } else {
        None
    };

    Ok(LoadedProject {
        project: project.to_path_buf(),
        agents,
        workflow,
    })
}
