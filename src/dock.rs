use tracing::trace;

use crate::cleanup::cleanup;
use crate::config::{Config, Viewport};
use crate::error::Result;
use crate::event::{DockEvent, Listener, Notification};
use crate::layout::{NodeId, NodeKind, Scene};
use crate::lookup::{find_with_limit, Found};
use crate::zorder::remap_z_index;

/// Owned position of a node, detached from the borrow of the scene.
#[derive(Clone, Debug)]
pub(crate) struct Located {
    pub path: Vec<usize>,
    pub index: usize,
    pub depth: usize,
}

impl Located {
    pub fn parent_path(&self) -> &[usize] {
        &self.path[..self.path.len() - 1]
    }

    pub fn window_index(&self) -> usize {
        self.path[0]
    }
}

/// The docking layout engine.
///
/// Owns the scene. Every mutator runs to completion, then commits: cleanup,
/// z-order renumbering, and synchronous listener notification. A mutator
/// that cannot apply (stale id, wrong kind, undersized pane) returns
/// `Ok(false)` without touching the scene.
///
/// Mutation discipline: the tree is a plain owned value edited in place
/// through `&mut self`. Nodes are located by id, then reached again by
/// their index path, so no references into the tree outlive a call.
pub struct Dock {
    pub(crate) scene: Scene,
    pub(crate) config: Config,
    pub(crate) home: bool,
    pub(crate) detach_count: u32,
    listeners: Vec<Listener>,
}

impl Dock {
    pub fn new(config: Config) -> Self {
        Self::with_scene(Scene::default(), config)
    }

    /// Adopt an existing scene, normalising it first.
    pub fn with_scene(scene: Scene, config: Config) -> Self {
        let mut dock = Self {
            scene,
            config,
            home: true,
            detach_count: 0,
            listeners: Vec::new(),
        };
        dock.commit();
        dock
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// True when there is nothing left on screen.
    pub fn home(&self) -> bool {
        self.home
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    pub fn window_ids(&self) -> Vec<NodeId> {
        self.scene.windows.iter().map(|w| w.id).collect()
    }

    /// Register an observer, called after every notifying commit.
    pub fn subscribe(&mut self, listener: impl FnMut(&Notification) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn find(&self, id: NodeId) -> Result<Option<Found<'_>>> {
        find_with_limit(&self.scene, id, self.config.behavior.max_depth)
    }

    /// Record the host's new client size. Later maximize/minimize/detach
    /// calls place windows within it.
    pub fn resize_scene(&mut self, width: f64, height: f64) -> bool {
        let viewport = Viewport { width, height };
        if viewport == self.config.viewport || !(width > 0.0 && height > 0.0) {
            return false;
        }
        self.config.viewport = viewport;
        self.notify(DockEvent::SceneResized { width, height });
        true
    }

    pub(crate) fn locate(&self, id: NodeId, kind: NodeKind) -> Result<Option<Located>> {
        let located = self.find(id)?.and_then(|found| {
            (found.kind() == kind).then(|| Located {
                index: found.index,
                depth: found.depth,
                path: found.path,
            })
        });
        if located.is_none() {
            trace!(%id, ?kind, "ignoring stale or mistyped id");
        }
        Ok(located)
    }

    pub(crate) fn commit(&mut self) {
        self.home = cleanup(&mut self.scene);
        remap_z_index(&mut self.scene);
    }

    pub(crate) fn notify(&mut self, event: DockEvent) {
        if self.listeners.is_empty() {
            return;
        }
        let notification = Notification {
            event,
            windows: self.scene.windows.clone(),
        };
        for listener in &mut self.listeners {
            listener(&notification);
        }
    }
}

impl Default for Dock {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl std::fmt::Debug for Dock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dock")
            .field("scene", &self.scene)
            .field("home", &self.home)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
