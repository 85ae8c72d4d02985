use serde_json::Value;
use tracing::debug;

use crate::dock::Dock;
use crate::error::Result;
use crate::event::DockEvent;
use crate::layout::{GroupMember, GroupView, NodeId, NodeKind, Tab, TabView, Window};

/// Relocation request for [`Dock::move_tab`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TabMove {
    pub tab_id: NodeId,
    pub to_view_id: NodeId,
    /// Insert before this tab of the destination; append when absent or
    /// not found there.
    pub before_tab_id: Option<NodeId>,
}

impl Dock {
    /// Build a tab ready for [`Dock::add_tab`]. Without a title it is named
    /// `Untitled N`, taking the lowest N no tab in the scene uses.
    pub fn new_tab(&self, title: Option<&str>, content: Value) -> Tab {
        let title = match title {
            Some(t) => t.to_string(),
            None => self.scene.next_untitled_title(),
        };
        Tab::new(title, content)
    }

    /// Seed a tab into the first attached window, creating the window, its
    /// first group and a TabView as needed.
    pub fn add_tab_initial(&mut self, tab: Tab) -> Result<bool> {
        if self.scene.contains(tab.id) {
            return Ok(false);
        }
        let tab_id = tab.id;

        let host_idx = match self.scene.windows.iter().position(|w| !w.floating) {
            Some(idx) => idx,
            None => {
                let viewport = self.config.viewport;
                let host = Window::attached(Vec::new(), viewport.width, viewport.height);
                self.scene.windows.push(host);
                self.scene.windows.len() - 1
            }
        };
        let host = &mut self.scene.windows[host_idx];
        if host.members.is_empty() {
            host.members.push(GroupView::new(Vec::new()));
        }
        let group = &mut host.members[0];
        if group.first_view_mut().is_none() {
            group.members.push(GroupMember::View(TabView::new()));
        }
        let Some(view) = group.first_view_mut() else {
            self.commit();
            return Ok(false);
        };
        let view_id = view.id;
        view.members.push(tab);
        view.active_tab_id = Some(tab_id);

        debug!(%tab_id, %view_id, "initial tab added");
        self.commit();
        self.notify(DockEvent::TabAdded { tab_id, view_id });
        Ok(true)
    }

    /// Append `tab` to a TabView and make it active.
    pub fn add_tab(&mut self, view_id: NodeId, tab: Tab) -> Result<bool> {
        if self.scene.contains(tab.id) {
            return Ok(false);
        }
        let Some(loc) = self.locate(view_id, NodeKind::TabView)? else {
            return Ok(false);
        };
        let Some(view) = self.scene.view_mut(&loc.path) else {
            return Ok(false);
        };
        let tab_id = tab.id;
        view.members.push(tab);
        view.active_tab_id = Some(tab_id);

        debug!(%tab_id, %view_id, "tab added");
        self.commit();
        self.notify(DockEvent::TabAdded { tab_id, view_id });
        Ok(true)
    }

    /// Select a tab within its TabView.
    pub fn change_tab(&mut self, tab_id: NodeId) -> Result<bool> {
        let Some(loc) = self.locate(tab_id, NodeKind::Tab)? else {
            return Ok(false);
        };
        let Some(view) = self.scene.view_mut(loc.parent_path()) else {
            return Ok(false);
        };
        let tab = &mut view.members[loc.index];
        let fresh = std::mem::replace(&mut tab.recently_created, false);
        if view.active_tab_id == Some(tab_id) && !fresh {
            return Ok(false);
        }
        view.active_tab_id = Some(tab_id);

        self.commit();
        Ok(true)
    }

    /// Remove a tab. The previous sibling inherits the selection; an
    /// emptied view is swept away by cleanup.
    pub fn close_tab(&mut self, tab_id: NodeId) -> Result<bool> {
        let Some(loc) = self.locate(tab_id, NodeKind::Tab)? else {
            return Ok(false);
        };
        let Some(view) = self.scene.view_mut(loc.parent_path()) else {
            return Ok(false);
        };
        let view_id = view.id;
        view.remove_tab(loc.index);

        debug!(%tab_id, %view_id, "tab closed");
        self.commit();
        self.notify(DockEvent::TabClosed { tab_id, view_id });
        Ok(true)
    }

    /// Reorder a tab within its TabView, or hand it to another one where it
    /// becomes the active tab.
    pub fn move_tab(&mut self, request: TabMove) -> Result<bool> {
        let TabMove {
            tab_id,
            to_view_id,
            before_tab_id,
        } = request;
        if before_tab_id == Some(tab_id) {
            return Ok(false);
        }
        let (Some(source), Some(dest)) = (
            self.locate(tab_id, NodeKind::Tab)?,
            self.locate(to_view_id, NodeKind::TabView)?,
        ) else {
            return Ok(false);
        };

        let Some(from_view) = self.scene.view_mut(source.parent_path()).map(|v| v.id) else {
            return Ok(false);
        };

        if from_view == to_view_id {
            let Some(view) = self.scene.view_mut(&dest.path) else {
                return Ok(false);
            };
            let order: Vec<NodeId> = view.members.iter().map(|t| t.id).collect();
            let mut tab = view.members.remove(source.index);
            let fresh = std::mem::replace(&mut tab.recently_created, false);
            view.insert_tab(tab, before_tab_id);
            if view.members.iter().map(|t| t.id).eq(order) {
                view.members[source.index].recently_created = fresh;
                return Ok(false);
            }
        } else {
            let Some(from) = self.scene.view_mut(source.parent_path()) else {
                return Ok(false);
            };
            let mut tab = from.remove_tab(source.index);
            tab.recently_created = false;
            let Some(to) = self.scene.view_mut(&dest.path) else {
                return Ok(false);
            };
            to.insert_tab(tab, before_tab_id);
            to.active_tab_id = Some(tab_id);
        }

        debug!(%tab_id, %from_view, %to_view_id, "tab moved");
        self.commit();
        self.notify(DockEvent::TabMoved {
            tab_id,
            from_view,
            to_view: to_view_id,
        });
        Ok(true)
    }

    pub fn rename_tab(&mut self, tab_id: NodeId, title: impl Into<String>) -> Result<bool> {
        let Some(loc) = self.locate(tab_id, NodeKind::Tab)? else {
            return Ok(false);
        };
        let Some(tab) = self.scene.tab_mut(&loc.path) else {
            return Ok(false);
        };
        let title = title.into();
        if tab.title == title {
            return Ok(false);
        }
        tab.title = title;
        tab.recently_created = false;
        self.commit();
        Ok(true)
    }

    /// Clear the transient `recently_created` flag once the UI has seen it.
    pub fn acknowledge_tab(&mut self, tab_id: NodeId) -> Result<bool> {
        let Some(loc) = self.locate(tab_id, NodeKind::Tab)? else {
            return Ok(false);
        };
        let Some(tab) = self.scene.tab_mut(&loc.path) else {
            return Ok(false);
        };
        Ok(std::mem::replace(&mut tab.recently_created, false))
    }
}
