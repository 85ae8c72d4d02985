use crate::layout::{NodeId, Window};

/// What a committed mutation did, for UI observers.
#[derive(Clone, Debug, PartialEq)]
pub enum DockEvent {
    TabAdded { tab_id: NodeId, view_id: NodeId },
    TabClosed { tab_id: NodeId, view_id: NodeId },
    TabMoved { tab_id: NodeId, from_view: NodeId, to_view: NodeId },
    WindowResized { window_id: NodeId, width: f64, height: f64, top: f64, left: f64 },
    WindowMoved { window_id: NodeId, top: f64, left: f64 },
    SceneResized { width: f64, height: f64 },
    ViewDetached { view_id: NodeId, window_id: NodeId },
}

/// An event plus the window list as it stood after the commit.
#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub event: DockEvent,
    pub windows: Vec<Window>,
}

pub type Listener = Box<dyn FnMut(&Notification)>;
