// On Windows, hide the console window for GUI applications
#![cfg_attr(
    all(target_os = "windows", not(debug_assertions)),
    windows_subsystem = "windows"
)]

use std::path::PathBuf;
use std::time::Duration;

use anyhow::bail;
use tracing::info;

use agentcanvas::{
    init_logging, EditorSurface, FolderDialog, FsDefinitionStore, LoadState, ProjectSession,
    RfdFolderDialog, WarehouseConfig,
};

fn main() -> anyhow::Result<()> {
    init_logging()?;

    // Project path from the command line, falling back to the OS folder
    // picker, matching the in-app "open project" flow.
    let project = match std::env::args().nth(1) {
        Some(path) => PathBuf::from(path),
        None => match RfdFolderDialog.pick_folder().single() {
            Some(path) => path.clone(),
            None => {
                println!("No project selected.");
                return Ok(());
            }
        },
    };

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(open_and_report(project))
}

async fn open_and_report(project: PathBuf) -> anyhow::Result<()> {
    let mut session = ProjectSession::new(FsDefinitionStore::new());
    session.open_project(&project);

    let loaded = loop {
        if let Some(loaded) = session.poll() {
            break loaded;
        }
        if matches!(session.state(), LoadState::Idle) {
            bail!("failed to open project {}", project.display());
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    };

    let mut surface = EditorSurface::new(1280.0, 800.0);
    if let Some(workflow) = &loaded.workflow {
        workflow.apply_to(&mut surface.model, &mut surface.camera);
    }
    info!(
        items = surface.model.item_count(),
        connections = surface.model.connection_count(),
        "Canvas hydrated"
    );

    println!("Project: {}", loaded.project.display());
    println!("Agents ({}):", loaded.agents.len());
    for agent in &loaded.agents {
        println!("  {}  {}", agent.definition.color, agent.definition.name);
    }
    println!(
        "Workflow: {} items, {} connections | {}",
        surface.model.item_count(),
        surface.model.connection_count(),
        surface.camera
    );

    match WarehouseConfig::maybe_from_env() {
        Some(config) => println!("Analytics warehouse: {}", config.server_hostname),
        None => println!("Analytics not configured (run agentcanvas-setup)."),
    }

    Ok(())
}
