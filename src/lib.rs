//! Layout state engine for a docking workspace.
//!
//! A [`Scene`] holds windows, each window holds split groups, groups hold
//! further groups or tab views, and tab views hold tabs. A [`Dock`] owns
//! the scene and exposes every mutation; after each one it sweeps empty
//! containers, collapses redundant groups, renumbers window z-order and
//! notifies subscribers.

pub mod cleanup;
pub mod config;
pub mod dock;
pub mod error;
pub mod event;
pub mod layout;
pub mod logging;
pub mod lookup;
pub mod tab_ops;
mod validate;
mod view_ops;
mod window_ops;
pub mod zorder;

pub use cleanup::cleanup;
pub use config::{Behavior, Config, Viewport};
pub use dock::Dock;
pub use error::{LayoutError, Result, Violation};
pub use event::{DockEvent, Notification};
pub use layout::{
    Direction, GroupMember, GroupView, NodeId, NodeKind, NodeMut, NodeRef, Placement, Scene, Tab,
    TabView, Window,
};
pub use lookup::{find, Found};
pub use tab_ops::TabMove;
pub use zorder::{next_z_index, remap_z_index};
