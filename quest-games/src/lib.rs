//! The bundled promo games.
//!
//! Each game pairs a scene script with the processes its scenes name. Scripts are
//! compiled in; a content directory can replace them at run time.

pub mod bestin;
pub mod dosa;
pub mod inbase;
pub mod stage;
pub mod wonderland;

use std::path::Path;
use anyhow::Context;
use log::info;

use quest_core::config::SequencerConfig;
use quest_core::{Game, ProcessRegistry, SceneManager};

/// One bundled game.
pub struct Entry {
    pub id: &'static str,
    pub script: &'static str,
    pub registry: fn() -> ProcessRegistry,
    pub defaults: fn() -> SequencerConfig,
}

pub static CATALOG: [Entry; 4] = [
    Entry { id: dosa::ID, script: dosa::SCRIPT, registry: dosa::registry, defaults: dosa::defaults },
    Entry { id: wonderland::ID, script: wonderland::SCRIPT, registry: wonderland::registry, defaults: wonderland::defaults },
    Entry { id: bestin::ID, script: bestin::SCRIPT, registry: bestin::registry, defaults: bestin::defaults },
    Entry { id: inbase::ID, script: inbase::SCRIPT, registry: inbase::registry, defaults: inbase::defaults },
];

pub fn names() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|e| e.id)
}

pub fn entry(name: &str) -> anyhow::Result<&'static Entry> {
    CATALOG.iter()
        .find(|e| e.id == name)
        .with_context(|| format!("Unknown game '{}'. Available: {}", name, names().collect::<Vec<_>>().join(", ")))
}

/// Builds a game from its bundled script.
pub fn load(name: &str) -> anyhow::Result<Game> {
    let entry = entry(name)?;
    let mut manager = SceneManager::new();
    manager.load_str(entry.id, entry.script)?;
    assemble(entry, manager)
}

/// Builds a game from the scripts under `dir`, keeping the bundled processes.
pub fn load_from(name: &str, dir: impl AsRef<Path>) -> anyhow::Result<Game> {
    let entry = entry(name)?;
    let mut manager = SceneManager::new();
    manager.load_project(dir.as_ref())?;
    assemble(entry, manager)
}

fn assemble(entry: &Entry, mut manager: SceneManager) -> anyhow::Result<Game> {
    let graph = manager.finish().with_context(|| format!("Invalid scene graph for '{}'", entry.id))?;
    if graph.meta.id != entry.id {
        anyhow::bail!("Script declares game '{}' but '{}' was requested", graph.meta.id, entry.id);
    }
    info!("Loaded '{}' ({} scenes)", graph.meta.title, graph.len());
    Game::new(graph, (entry.registry)(), (entry.defaults)())
}
