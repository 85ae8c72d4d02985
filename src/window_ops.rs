use tracing::{debug, trace};

use crate::dock::Dock;
use crate::error::Result;
use crate::event::DockEvent;
use crate::layout::{NodeId, NodeKind, NodeMut, Placement};
use crate::zorder::bring_to_top;

impl Dock {
    /// Set a window's geometry, scaling every fixed-size descendant by the
    /// same ratio. Any effective resize drops the maximized state.
    pub fn resize_window(
        &mut self,
        window_id: NodeId,
        width: f64,
        height: f64,
        top: f64,
        left: f64,
    ) -> Result<bool> {
        let min = self.config.behavior.min_view_size;
        if !(width >= min && height >= min) || !top.is_finite() || !left.is_finite() {
            trace!(%window_id, width, height, min, "rejected window geometry");
            return Ok(false);
        }
        let Some(loc) = self.locate(window_id, NodeKind::Window)? else {
            return Ok(false);
        };
        let Some(window) = self.scene.window_mut(&loc.path) else {
            return Ok(false);
        };
        let target = Placement {
            top,
            left,
            width,
            height,
        };
        if window.placement() == target {
            return Ok(false);
        }

        let sx = if window.width > 0.0 { width / window.width } else { 1.0 };
        let sy = if window.height > 0.0 { height / window.height } else { 1.0 };
        NodeMut::Window(&mut *window).scale_sizes(sx, sy);
        window.set_placement(target);
        if window.maximized {
            window.maximized = false;
            window.previous_position = None;
        }

        debug!(%window_id, width, height, top, left, "window resized");
        self.commit();
        self.notify(DockEvent::WindowResized {
            window_id,
            width,
            height,
            top,
            left,
        });
        Ok(true)
    }

    /// Fill the viewport, remembering where the window was.
    pub fn maximize_window(&mut self, window_id: NodeId) -> Result<bool> {
        let Some(loc) = self.locate(window_id, NodeKind::Window)? else {
            return Ok(false);
        };
        let viewport = self.config.viewport;
        let Some(window) = self.scene.window_mut(&loc.path) else {
            return Ok(false);
        };
        if window.previous_position.is_none() {
            window.previous_position = Some(window.placement());
        }
        window.set_placement(Placement {
            top: 0.0,
            left: 0.0,
            width: viewport.width,
            height: viewport.height,
        });
        window.minimized = false;
        window.maximized = true;
        bring_to_top(&mut self.scene, loc.window_index());

        debug!(%window_id, "window maximized");
        self.commit();
        self.notify_geometry(window_id, loc.window_index());
        Ok(true)
    }

    /// Shrink into the first free slot of the bottom-of-screen grid.
    pub fn minimize_window(&mut self, window_id: NodeId) -> Result<bool> {
        let Some(loc) = self.locate(window_id, NodeKind::Window)? else {
            return Ok(false);
        };
        let (top, left) = self.minimized_slot(window_id);
        let behavior = &self.config.behavior;
        let (width, height) = (behavior.minimized_width, behavior.minimized_height);
        let Some(window) = self.scene.window_mut(&loc.path) else {
            return Ok(false);
        };
        if window.minimized {
            return Ok(false);
        }
        if window.previous_position.is_none() {
            window.previous_position = Some(window.placement());
        }
        window.set_placement(Placement {
            top,
            left,
            width,
            height,
        });
        window.minimized = true;
        window.maximized = false;
        window.z_index = 0;

        debug!(%window_id, top, left, "window minimized");
        self.commit();
        self.notify_geometry(window_id, loc.window_index());
        Ok(true)
    }

    /// Put a minimized or maximized window back where it was.
    pub fn restore_window(&mut self, window_id: NodeId) -> Result<bool> {
        let Some(loc) = self.locate(window_id, NodeKind::Window)? else {
            return Ok(false);
        };
        let Some(window) = self.scene.window_mut(&loc.path) else {
            return Ok(false);
        };
        let Some(previous) = window.previous_position.take() else {
            return Ok(false);
        };
        window.set_placement(previous);
        window.minimized = false;
        window.maximized = false;
        bring_to_top(&mut self.scene, loc.window_index());

        debug!(%window_id, "window restored");
        self.commit();
        self.notify_geometry(window_id, loc.window_index());
        Ok(true)
    }

    pub fn close_window(&mut self, window_id: NodeId) -> Result<bool> {
        let Some(loc) = self.locate(window_id, NodeKind::Window)? else {
            return Ok(false);
        };
        self.scene.windows.remove(loc.window_index());
        debug!(%window_id, "window closed");
        self.commit();
        Ok(true)
    }

    /// Shift a window by a pointer delta and raise it.
    pub fn move_window(&mut self, window_id: NodeId, dx: f64, dy: f64) -> Result<bool> {
        if !dx.is_finite() || !dy.is_finite() {
            return Ok(false);
        }
        let Some(loc) = self.locate(window_id, NodeKind::Window)? else {
            return Ok(false);
        };
        let Some(window) = self.scene.window_mut(&loc.path) else {
            return Ok(false);
        };
        window.top += dy;
        window.left += dx;
        let (top, left) = (window.top, window.left);
        bring_to_top(&mut self.scene, loc.window_index());

        self.commit();
        self.notify(DockEvent::WindowMoved {
            window_id,
            top,
            left,
        });
        Ok(true)
    }

    /// Raise without moving. Returns false if it was already on top.
    pub fn bring_to_front(&mut self, window_id: NodeId) -> Result<bool> {
        let Some(loc) = self.locate(window_id, NodeKind::Window)? else {
            return Ok(false);
        };
        let idx = loc.window_index();
        let before = self.scene.windows[idx].z_index;
        if !bring_to_top(&mut self.scene, idx) {
            return Ok(false);
        }
        self.commit();
        Ok(self.scene.windows[idx].z_index != before)
    }

    /// (top, left) of the first grid slot no other minimized window covers.
    /// Slots run left to right along the bottom edge, then row by row upward.
    fn minimized_slot(&self, exclude: NodeId) -> (f64, f64) {
        let behavior = &self.config.behavior;
        let viewport = self.config.viewport;
        let (w, h) = (behavior.minimized_width, behavior.minimized_height);
        let fallback = ((viewport.height - h).max(0.0), 0.0);
        if w <= 0.0 || h <= 0.0 {
            return fallback;
        }

        let occupied: Vec<(f64, f64)> = self
            .scene
            .windows
            .iter()
            .filter(|win| win.minimized && win.id != exclude)
            .map(|win| (win.top, win.left))
            .collect();
        let cols = ((viewport.width / w).floor() as usize).max(1);
        let rows = ((viewport.height / h).floor() as usize).max(1);

        for row in 0..rows {
            let top = viewport.height - (row + 1) as f64 * h;
            for col in 0..cols {
                let left = col as f64 * w;
                let taken = occupied
                    .iter()
                    .any(|&(t, l)| (t - top).abs() < h && (l - left).abs() < w);
                if !taken {
                    return (top, left);
                }
            }
        }
        fallback
    }

    fn notify_geometry(&mut self, window_id: NodeId, idx: usize) {
        let Some(window) = self.scene.windows.get(idx) else {
            return;
        };
        let event = DockEvent::WindowResized {
            window_id,
            width: window.width,
            height: window.height,
            top: window.top,
            left: window.left,
        };
        self.notify(event);
    }
}
