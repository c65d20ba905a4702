//! Integration tests for project scanning and hydration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use agentcanvas_core::constants::{AGENTS_DIR, DEFAULT_AGENT_COLOR};
use agentcanvas_core::ProjectError;
use agentcanvas_designer::{Camera, GraphModel, ItemPayload, Point};
use agentcanvas_project::{
    AgentDefinition, AgentPayload, DefinitionStore, FsDefinitionStore, LoadState, LoadedProject,
    ProjectSession,
};
use async_trait::async_trait;

fn write_agent(project: &Path, name: &str, content: &str) {
    let dir = project.join(AGENTS_DIR);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(format!("{name}.json")), content).unwrap();
}

async fn poll_until_loaded(session: &mut ProjectSession<impl DefinitionStore>) -> LoadedProject {
    for _ in 0..200 {
        if let Some(loaded) = session.poll() {
            return loaded;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("project load did not complete");
}

#[tokio::test]
async fn test_malformed_definition_degrades_to_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    write_agent(
        dir.path(),
        "researcher",
        r##"{"color": "#ff6384", "tools": ["search"]}"##,
    );
    write_agent(dir.path(), "broken", "{ this is not json");

    let store = FsDefinitionStore::new();
    let defs = store.list_agent_definitions(dir.path()).await.unwrap();

    // Both entries survive; the malformed one falls back to the default
    // color and its file stem as the name.
    assert_eq!(defs.len(), 2);
    assert_eq!(defs[0].name, "broken");
    assert_eq!(defs[0].color, DEFAULT_AGENT_COLOR);
    assert_eq!(defs[1].name, "researcher");
    assert_eq!(defs[1].color, "#ff6384");
}

#[tokio::test]
async fn test_missing_agents_dir_created_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsDefinitionStore::new();

    let defs = store.list_agent_definitions(dir.path()).await.unwrap();
    assert!(defs.is_empty());
    assert!(dir.path().join(AGENTS_DIR).is_dir());
}

#[tokio::test]
async fn test_non_json_files_ignored() {
    let dir = tempfile::tempdir().unwrap();
    write_agent(dir.path(), "researcher", r##"{"color": "#36a2eb"}"##);
    std::fs::write(dir.path().join(AGENTS_DIR).join("notes.txt"), "x").unwrap();

    let store = FsDefinitionStore::new();
    let defs = store.list_agent_definitions(dir.path()).await.unwrap();
    assert_eq!(defs.len(), 1);
    assert_eq!(defs[0].name, "researcher");
}

#[tokio::test]
async fn test_session_hydrates_palette_and_workflow() {
    let dir = tempfile::tempdir().unwrap();
    write_agent(dir.path(), "planner", r##"{"color": "#36a2eb", "tools": ["plan"]}"##);

    // Flush a workflow first so the load has a layout to pick up.
    let mut model = GraphModel::new();
    model.add_item(
        "planner",
        "#36a2eb",
        ItemPayload::Agent {
            tools: vec!["plan".into()],
            source_path: None,
        },
        Point::new(120.0, 80.0),
    );
    let camera = Camera::new(1200.0, 800.0);

    let mut session = ProjectSession::new(FsDefinitionStore::new());
    session.open_project(dir.path());
    assert!(matches!(session.state(), LoadState::Loading { .. }));

    let first = poll_until_loaded(&mut session).await;
    assert!(first.workflow.is_none());

    session.flush_workflow("demo", &model, &camera).unwrap();

    session.open_project(dir.path());
    let loaded = poll_until_loaded(&mut session).await;
    assert!(matches!(session.state(), LoadState::Loaded { .. }));

    assert_eq!(loaded.agents.len(), 1);
    assert_eq!(loaded.agents[0].definition.name, "planner");
    assert_eq!(loaded.agents[0].payload.tools, vec!["plan".to_string()]);

    let workflow = loaded.workflow.expect("workflow flushed earlier");
    assert_eq!(workflow.items.len(), 1);

    let mut restored_model = GraphModel::new();
    let mut restored_camera = Camera::new(1200.0, 800.0);
    workflow.apply_to(&mut restored_model, &mut restored_camera);
    assert_eq!(restored_model.item_count(), 1);
}

/// Store that answers with a fixed palette after a configurable delay; used
/// to race two project loads deterministically.
struct SlowStore {
    delay: Duration,
    label: String,
}

#[async_trait]
impl DefinitionStore for SlowStore {
    async fn list_agent_definitions(
        &self,
        project: &Path,
    ) -> Result<Vec<AgentDefinition>, ProjectError> {
        tokio::time::sleep(self.delay).await;
        Ok(vec![AgentDefinition {
            name: self.label.clone(),
            color: DEFAULT_AGENT_COLOR.to_string(),
            source_path: project.join(AGENTS_DIR).join(format!("{}.json", self.label)),
        }])
    }

    async fn read_agent_definition(&self, _path: &Path) -> Result<AgentPayload, ProjectError> {
        Ok(AgentPayload::default())
    }
}

#[tokio::test]
async fn test_switching_projects_mid_load_discards_stale_result() {
    // The store is shared across both opens, so make the first project's
    // listing slow enough to still be in flight when the second one starts.
    let mut session = ProjectSession::new(SlowStore {
        delay: Duration::from_millis(50),
        label: "agent".into(),
    });

    session.open_project(PathBuf::from("/projects/alpha"));
    tokio::time::sleep(Duration::from_millis(5)).await;
    session.open_project(PathBuf::from("/projects/beta"));

    let loaded = poll_until_loaded(&mut session).await;
    assert_eq!(loaded.project, PathBuf::from("/projects/beta"));
    assert_eq!(
        session.state(),
        &LoadState::Loaded {
            project: PathBuf::from("/projects/beta")
        }
    );

    // Nothing else ever surfaces for the superseded load.
    tokio::time::sleep(Duration::from_millis(120)).await;
    assert!(session.poll().is_none());
}
