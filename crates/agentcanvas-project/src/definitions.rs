//! Agent definition scanning.
//!
//! A project keeps one JSON file per agent inside `<project>/agents/`; the
//! file's base name is the agent's display name and the content carries at
//! least a `color`. The scan is resilient by design: a missing directory is
//! created empty, and an unreadable or malformed file degrades to a
//! placeholder definition so one corrupt file never blocks the rest of the
//! project from loading.

use std::path::{Path, PathBuf};

use agentcanvas_core::constants::{AGENTS_DIR, DEFAULT_AGENT_COLOR};
use agentcanvas_core::ProjectError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One entry of the agent palette: display name, color, and the definition
/// file it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentDefinition {
    pub name: String,
    pub color: String,
    pub source_path: PathBuf,
}

/// The kind-specific payload stored in an agent definition file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentPayload {
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub description: String,
}

/// On-disk shape of an agent definition file. Only `color` is expected;
/// everything else is optional.
#[derive(Debug, Deserialize)]
struct AgentFile {
    color: Option<String>,
    #[serde(default)]
    tools: Vec<String>,
    #[serde(default)]
    description: String,
}

/// Contract the project session consumes to hydrate a project.
///
/// Implementations own all filesystem access; the canvas core never reads
/// disk directly.
#[async_trait]
pub trait DefinitionStore: Send + Sync + 'static {
    /// Lists the agent definitions of a project, creating the default agents
    /// directory empty when it does not exist. Individual file failures
    /// degrade to placeholders and are not errors.
    async fn list_agent_definitions(
        &self,
        project: &Path,
    ) -> Result<Vec<AgentDefinition>, ProjectError>;

    /// Reads one definition file's payload. Failures here are per-file and
    /// the caller degrades them to a default payload.
    async fn read_agent_definition(&self, path: &Path) -> Result<AgentPayload, ProjectError>;
}

/// Filesystem-backed definition store.
#[derive(Debug, Clone, Default)]
pub struct FsDefinitionStore;

impl FsDefinitionStore {
    pub fn new() -> Self {
        Self
    }

    fn placeholder(path: &Path) -> AgentDefinition {
        AgentDefinition {
            name: file_stem(path),
            color: DEFAULT_AGENT_COLOR.to_string(),
            source_path: path.to_path_buf(),
        }
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[async_trait]
impl DefinitionStore for FsDefinitionStore {
    async fn list_agent_definitions(
        &self,
        project: &Path,
    ) -> Result<Vec<AgentDefinition>, ProjectError> {
        let agents_dir = project.join(AGENTS_DIR);
        if !agents_dir.is_dir() {
            tokio::fs::create_dir_all(&agents_dir)
                .await
                .map_err(|source| ProjectError::CreateDir {
                    path: agents_dir.clone(),
                    source,
                })?;
            debug!(path = %agents_dir.display(), "Created empty agents directory");
            return Ok(Vec::new());
        }

        let mut entries =
            tokio::fs::read_dir(&agents_dir)
                .await
                .map_err(|source| ProjectError::ReadDefinition {
                    path: agents_dir.clone(),
                    source,
                })?;

        let mut definitions = Vec::new();
        while let Some(entry) =
            entries
                .next_entry()
                .await
                .map_err(|source| ProjectError::ReadDefinition {
                    path: agents_dir.clone(),
                    source,
                })?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            let definition = match tokio::fs::read_to_string(&path).await {
                Ok(content) => match serde_json::from_str::<AgentFile>(&content) {
                    Ok(file) => AgentDefinition {
                        name: file_stem(&path),
                        color: file.color.unwrap_or_else(|| DEFAULT_AGENT_COLOR.to_string()),
                        source_path: path.clone(),
                    },
                    Err(err) => {
                        warn!(
                            path = %path.display(),
                            error = %err,
                            "Malformed agent definition, using placeholder"
                        );
                        Self::placeholder(&path)
                    }
                },
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "Unreadable agent definition, using placeholder"
                    );
                    Self::placeholder(&path)
                }
            };
            definitions.push(definition);
        }

        // Directory iteration order is filesystem-dependent; keep the
        // palette stable.
        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(definitions)
    }

    async fn read_agent_definition(&self, path: &Path) -> Result<AgentPayload, ProjectError> {
        let content =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ProjectError::ReadDefinition {
                    path: path.to_path_buf(),
                    source,
                })?;
        let file: AgentFile =
            serde_json::from_str(&content).map_err(|err| ProjectError::MalformedDefinition {
                path: path.to_path_buf(),
                reason: err.to_string(),
            })?;
        Ok(AgentPayload {
            tools: file.tools,
            description: file.description,
        })
    }
}
