use tracing::{debug, trace};

use crate::dock::Dock;
use crate::error::Result;
use crate::event::DockEvent;
use crate::layout::{
    Direction, GroupMember, GroupView, NodeId, NodeKind, NodeMut, Placement, TabView, Window,
};
use crate::zorder::next_z_index;

impl Dock {
    /// Lift a TabView out of its split into a new floating window.
    ///
    /// Without explicit coordinates the window is centred in the viewport,
    /// shifted by a cascading offset so repeated detaches stay visible.
    pub fn detach_view(
        &mut self,
        view_id: NodeId,
        x: Option<f64>,
        y: Option<f64>,
    ) -> Result<bool> {
        let Some(view) = self.take_view(view_id)? else {
            return Ok(false);
        };

        let placement = self.detach_placement(x, y);
        let mut window = Window::floating(vec![GroupView::with_view(view)], placement);
        window.z_index = next_z_index(&self.scene);
        let window_id = window.id;
        self.scene.windows.push(window);

        debug!(%view_id, %window_id, "view detached");
        self.commit();
        self.notify(DockEvent::ViewDetached { view_id, window_id });
        Ok(true)
    }

    /// Move a TabView from a floating window into the first attached window,
    /// creating one if there is none.
    pub fn attach_view(&mut self, view_id: NodeId) -> Result<bool> {
        let Some(loc) = self.locate(view_id, NodeKind::TabView)? else {
            return Ok(false);
        };
        if !self.scene.windows[loc.window_index()].floating {
            return Ok(false);
        }
        let Some(mut view) = self.take_view(view_id)? else {
            return Ok(false);
        };
        view.width = None;
        view.height = None;

        let group = GroupView::with_view(view);
        match self.scene.windows.iter_mut().find(|w| !w.floating) {
            Some(host) => host.members.push(group),
            None => {
                let viewport = self.config.viewport;
                let host = Window::attached(vec![group], viewport.width, viewport.height);
                self.scene.windows.push(host);
            }
        }

        debug!(%view_id, "view attached");
        self.commit();
        Ok(true)
    }

    /// Move the active tab into a new TabView.
    ///
    /// Along the view's own axis the new view becomes its next sibling.
    /// Across it, the view is replaced by a new group holding the view and
    /// the new one, opening a split boundary at that spot. A view with a
    /// single tab has nothing to split off and is left alone.
    pub fn split_tab_view(&mut self, view_id: NodeId, direction: Direction) -> Result<bool> {
        let Some(loc) = self.locate(view_id, NodeKind::TabView)? else {
            return Ok(false);
        };
        let implied = Direction::for_view_depth(loc.depth);
        // A cross split pushes this view's tabs one level deeper.
        let max_depth = self.config.behavior.max_depth;
        if direction != implied && loc.depth + 2 > max_depth {
            trace!(%view_id, depth = loc.depth, max_depth, "split would exceed depth cap");
            return Ok(false);
        }
        let Some(view) = self.scene.view_mut(&loc.path) else {
            return Ok(false);
        };
        if view.members.len() < 2 {
            return Ok(false);
        }
        let active_idx = view
            .active_tab_id
            .and_then(|id| view.position(id))
            .unwrap_or(view.members.len() - 1);
        let mut tab = view.remove_tab(active_idx);
        tab.recently_created = false;
        let split_off = TabView::with_tabs(vec![tab]);

        let Some(parent) = self.scene.group_mut(loc.parent_path()) else {
            return Ok(false);
        };
        if direction == implied {
            parent
                .members
                .insert(loc.index + 1, GroupMember::View(split_off));
        } else {
            match parent.members.remove(loc.index) {
                GroupMember::View(mut original) => {
                    let mut wrapper = GroupView::new(Vec::new());
                    wrapper.width = original.width.take();
                    wrapper.height = original.height.take();
                    wrapper.members =
                        vec![GroupMember::View(original), GroupMember::View(split_off)];
                    parent.members.insert(loc.index, GroupMember::Group(wrapper));
                }
                other => {
                    parent.members.insert(loc.index, other);
                    parent
                        .members
                        .insert(loc.index + 1, GroupMember::View(split_off));
                }
            }
        }

        debug!(%view_id, ?direction, ?implied, "tab view split");
        self.commit();
        Ok(true)
    }

    /// Move every tab of `source_id` into `target_id`, before `before_tab_id`
    /// when it names a target tab, else at the end.
    pub fn merge_tab_views(
        &mut self,
        source_id: NodeId,
        target_id: NodeId,
        before_tab_id: Option<NodeId>,
    ) -> Result<bool> {
        if source_id == target_id {
            return Ok(false);
        }
        let (Some(source), Some(target)) = (
            self.locate(source_id, NodeKind::TabView)?,
            self.locate(target_id, NodeKind::TabView)?,
        ) else {
            return Ok(false);
        };

        let Some(source_view) = self.scene.view_mut(&source.path) else {
            return Ok(false);
        };
        let tabs = std::mem::take(&mut source_view.members);
        let active = source_view.active_tab_id.take();

        let Some(target_view) = self.scene.view_mut(&target.path) else {
            return Ok(false);
        };
        let at = before_tab_id
            .and_then(|id| target_view.position(id))
            .unwrap_or(target_view.members.len());
        let moved = tabs.len();
        for (offset, mut tab) in tabs.into_iter().enumerate() {
            tab.recently_created = false;
            target_view.members.insert(at + offset, tab);
        }
        if active.is_some() {
            target_view.active_tab_id = active;
        }

        debug!(%source_id, %target_id, moved, "tab views merged");
        self.commit();
        Ok(true)
    }

    /// Set a pane's width (horizontal) or height (vertical), and its next
    /// sibling's when `next_item_size` is given. Sizes under the minimum
    /// abort the whole call.
    pub fn resize_view(
        &mut self,
        direction: Direction,
        size: f64,
        id: NodeId,
        next_item_size: Option<f64>,
    ) -> Result<bool> {
        let min = self.config.behavior.min_view_size;
        if !(size >= min) || next_item_size.is_some_and(|n| !(n >= min)) {
            trace!(%id, size, ?next_item_size, min, "pane size below minimum");
            return Ok(false);
        }
        let Some(found) = self.find(id)? else {
            return Ok(false);
        };
        if !matches!(found.kind(), NodeKind::TabView | NodeKind::GroupView) {
            return Ok(false);
        }
        let path = found.path;
        let mut next_path = path.clone();
        if let Some(last) = next_path.last_mut() {
            *last += 1;
        }

        if let Some(node) = self.scene.node_mut(&path) {
            set_extent(node, direction, size);
        }
        if let Some(next_size) = next_item_size {
            if let Some(node) = self.scene.node_mut(&next_path) {
                set_extent(node, direction, next_size);
            }
        }

        self.commit();
        Ok(true)
    }

    /// Close a TabView together with all of its tabs.
    pub fn close_view(&mut self, view_id: NodeId) -> Result<bool> {
        let Some(view) = self.take_view(view_id)? else {
            return Ok(false);
        };
        debug!(%view_id, tabs = view.members.len(), "view closed");
        self.commit();
        for tab in &view.members {
            self.notify(DockEvent::TabClosed {
                tab_id: tab.id,
                view_id,
            });
        }
        Ok(true)
    }

    /// Unlink a TabView from its parent group. The caller commits.
    fn take_view(&mut self, view_id: NodeId) -> Result<Option<TabView>> {
        let Some(loc) = self.locate(view_id, NodeKind::TabView)? else {
            return Ok(None);
        };
        let Some(parent) = self.scene.group_mut(loc.parent_path()) else {
            return Ok(None);
        };
        match parent.members.remove(loc.index) {
            GroupMember::View(view) => Ok(Some(view)),
            other => {
                parent.members.insert(loc.index, other);
                Ok(None)
            }
        }
    }

    fn detach_placement(&mut self, x: Option<f64>, y: Option<f64>) -> Placement {
        let behavior = &self.config.behavior;
        let viewport = self.config.viewport;
        let (width, height) = (behavior.floating_width, behavior.floating_height);
        if let (Some(left), Some(top)) = (x, y) {
            return Placement {
                top,
                left,
                width,
                height,
            };
        }
        let step = (self.detach_count % behavior.cascade_limit.max(1)) as f64;
        let offset = step * behavior.cascade_step;
        self.detach_count = self.detach_count.wrapping_add(1);
        Placement {
            top: y.unwrap_or(((viewport.height - height) / 2.0).max(0.0) + offset),
            left: x.unwrap_or(((viewport.width - width) / 2.0).max(0.0) + offset),
            width,
            height,
        }
    }
}

fn set_extent(node: NodeMut<'_>, direction: Direction, size: f64) {
    let (width, height) = match node {
        NodeMut::TabView(v) => (&mut v.width, &mut v.height),
        NodeMut::GroupView(g) => (&mut g.width, &mut g.height),
        NodeMut::Tab(_) | NodeMut::Window(_) => return,
    };
    match direction {
        Direction::Horizontal => *width = Some(size),
        Direction::Vertical => *height = Some(size),
    }
}
