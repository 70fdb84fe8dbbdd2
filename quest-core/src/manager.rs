use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use walkdir::WalkDir;
use log::{info};
use anyhow::{Result, Context};
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::scene::{GameMeta, MissionDef, Scene, SceneGraph, SceneId};

/// On-disk layout of one scene script.
#[derive(Debug, Deserialize)]
struct ScriptFile {
    #[serde(default)]
    game: Option<GameMeta>,
    #[serde(default)]
    missions: Vec<MissionDef>,
    #[serde(default)]
    scenes: Vec<Scene>,
}

/// Loads scene scripts, indexes them and checks the links before a game can start.
///
/// A game may be split over several files; exactly one of them carries the `[game]` table.
pub struct SceneManager {
    meta: Option<(GameMeta, String)>,
    missions: Vec<MissionDef>,
    scenes: FxHashMap<SceneId, Arc<Scene>>,

    scene_sources: HashMap<SceneId, String>,
}

impl SceneManager {
    pub fn new() -> Self {
        Self {
            meta: None,
            missions: Vec::new(),
            scenes: FxHashMap::default(),
            scene_sources: HashMap::new(),
        }
    }

    /// Loads every `*.toml` script below `root_dir`.
    pub fn load_project(&mut self, root_dir: impl AsRef<Path>) -> Result<&mut Self> {
        let root = root_dir.as_ref();
        info!("Scanning scene scripts at: {:?}", root);

        let mut paths: Vec<_> = WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| e.into_path())
            .filter(|p| p.is_file() && p.extension().is_some_and(|e| e == "toml"))
            .collect();
        paths.sort();

        if paths.is_empty() {
            anyhow::bail!("No scene scripts found under {:?}", root);
        }
        for path in &paths {
            self.load_file(path)?;
        }

        info!("Project loaded. Files: {}, Scenes: {}", paths.len(), self.scenes.len());
        Ok(self)
    }

    pub fn load_file(&mut self, path: &Path) -> Result<&mut Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script: {:?}", path))?;
        let source = path.file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        self.load_str(&source, &content)
    }

    /// Parses one script; `source` only names it in error reports.
    pub fn load_str(&mut self, source: &str, content: &str) -> Result<&mut Self> {
        let script: ScriptFile = toml::from_str(content)
            .with_context(|| format!("Parse failed for script '{}'", source))?;

        if let Some(meta) = script.game {
            if let Some((_, first)) = &self.meta {
                anyhow::bail!(
                    "Duplicate [game] table: defined in '{}' and '{}'",
                    first, source
                );
            }
            self.meta = Some((meta, source.to_string()));
        }
        self.missions.extend(script.missions);

        for scene in script.scenes {
            let Some(id) = scene.id else {
                anyhow::bail!("Scene without id in '{}'", source);
            };
            if let Some(existing) = self.scene_sources.get(&id) {
                anyhow::bail!(
                    "Scene collision detected!\n  Scene {} is defined in:\n    1. {}\n    2. {}",
                    id, existing, source
                );
            }
            self.scene_sources.insert(id, source.to_string());
            self.scenes.insert(id, Arc::new(scene));
        }
        log::debug!("Loaded script '{}': {} scenes total", source, self.scenes.len());
        Ok(self)
    }

    /// Validates the loaded scripts and hands out the graph.
    pub fn finish(&mut self) -> Result<SceneGraph> {
        let Some((meta, _)) = self.meta.take() else {
            anyhow::bail!("No [game] table in any loaded script");
        };
        let mut seen = HashMap::new();
        for m in &self.missions {
            if seen.insert(m.key.as_str(), ()).is_some() {
                anyhow::bail!("Mission '{}' declared twice", m.key);
            }
        }

        let graph = SceneGraph::new(
            meta,
            std::mem::take(&mut self.missions),
            std::mem::take(&mut self.scenes),
        );
        self.scene_sources.clear();

        let broken = graph.broken_links();
        if !broken.is_empty() {
            let report: Vec<String> = broken.iter()
                .map(|(from, to)| match from {
                    Some(f) => format!("{} -> {}", f, to),
                    None => format!("[game] -> {}", to),
                })
                .collect();
            anyhow::bail!("Broken scene links in '{}': {}", graph.meta.id, report.join(", "));
        }

        let cycles = graph.empty_cycles();
        if !cycles.is_empty() {
            let report: Vec<String> = cycles.iter()
                .map(|c| {
                    let mut ids: Vec<String> = c.iter().map(ToString::to_string).collect();
                    ids.push(c[0].to_string());
                    ids.join(" -> ")
                })
                .collect();
            anyhow::bail!("Scenes loop without a stop in '{}': {}", graph.meta.id, report.join(", "));
        }
        info!("Scene graph '{}' ready: {} scenes, start {}", graph.meta.id, graph.len(), graph.start());
        Ok(graph)
    }
}

impl Default for SceneManager {
    fn default() -> Self {
        Self::new()
    }
}
