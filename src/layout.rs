use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type NodeId = uuid::Uuid;

/// Split axis. Orientation is never stored on a node; it follows from depth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Horizontal,
    Vertical,
}

impl Direction {
    /// Axis along which a GroupView at `depth` lays out its members.
    /// Windows sit at depth 1, so a window's top-level groups are rows.
    pub fn for_group_depth(depth: usize) -> Self {
        if depth % 2 == 0 {
            Direction::Horizontal
        } else {
            Direction::Vertical
        }
    }

    /// Implied orientation of a TabView at `depth`: the axis of its parent group.
    pub fn for_view_depth(depth: usize) -> Self {
        Self::for_group_depth(depth.saturating_sub(1))
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Horizontal => Direction::Vertical,
            Direction::Vertical => Direction::Horizontal,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Tab,
    TabView,
    GroupView,
    Window,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    pub id: NodeId,
    pub title: String,
    /// Owned by the UI layer; the engine never looks inside.
    pub content: Value,
    /// Set on creation, cleared by the consumer or by the next mutation
    /// that touches this tab.
    pub recently_created: bool,
}

impl Tab {
    pub fn new(title: impl Into<String>, content: Value) -> Self {
        Self {
            id: NodeId::new_v4(),
            title: title.into(),
            content,
            recently_created: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TabView {
    pub id: NodeId,
    pub members: Vec<Tab>,
    pub active_tab_id: Option<NodeId>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl TabView {
    pub fn new() -> Self {
        Self {
            id: NodeId::new_v4(),
            members: Vec::new(),
            active_tab_id: None,
            width: None,
            height: None,
        }
    }

    pub fn with_tabs(tabs: Vec<Tab>) -> Self {
        let active_tab_id = tabs.first().map(|t| t.id);
        Self {
            members: tabs,
            active_tab_id,
            ..Self::new()
        }
    }

    pub fn position(&self, tab_id: NodeId) -> Option<usize> {
        self.members.iter().position(|t| t.id == tab_id)
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        let id = self.active_tab_id?;
        self.members.iter().find(|t| t.id == id)
    }

    /// Remove the tab at `idx`, handing the active selection to the previous
    /// sibling, else the next one, else clearing it.
    pub fn remove_tab(&mut self, idx: usize) -> Tab {
        let tab = self.members.remove(idx);
        if self.active_tab_id == Some(tab.id) {
            let heir = if idx > 0 {
                self.members.get(idx - 1)
            } else {
                self.members.first()
            };
            self.active_tab_id = heir.map(|t| t.id);
        }
        tab
    }

    /// Insert before `before` when it names a member, else append.
    pub fn insert_tab(&mut self, tab: Tab, before: Option<NodeId>) {
        match before.and_then(|id| self.position(id)) {
            Some(idx) => self.members.insert(idx, tab),
            None => self.members.push(tab),
        }
    }
}

impl Default for TabView {
    fn default() -> Self {
        Self::new()
    }
}

/// A child of a split container.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GroupMember {
    Group(GroupView),
    View(TabView),
}

impl GroupMember {
    pub fn id(&self) -> NodeId {
        match self {
            GroupMember::Group(g) => g.id,
            GroupMember::View(v) => v.id,
        }
    }

    pub fn node(&self) -> NodeRef<'_> {
        match self {
            GroupMember::Group(g) => NodeRef::GroupView(g),
            GroupMember::View(v) => NodeRef::TabView(v),
        }
    }

    pub fn node_mut(&mut self) -> NodeMut<'_> {
        match self {
            GroupMember::Group(g) => NodeMut::GroupView(g),
            GroupMember::View(v) => NodeMut::TabView(v),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            GroupMember::Group(g) => g.members.is_empty(),
            GroupMember::View(v) => v.members.is_empty(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupView {
    pub id: NodeId,
    pub members: Vec<GroupMember>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl GroupView {
    pub fn new(members: Vec<GroupMember>) -> Self {
        Self {
            id: NodeId::new_v4(),
            members,
            width: None,
            height: None,
        }
    }

    pub fn with_view(view: TabView) -> Self {
        Self::new(vec![GroupMember::View(view)])
    }

    pub fn position(&self, id: NodeId) -> Option<usize> {
        self.members.iter().position(|m| m.id() == id)
    }

    /// First TabView in pre-order, descending into nested groups.
    pub fn first_view_mut(&mut self) -> Option<&mut TabView> {
        self.members.iter_mut().find_map(|m| match m {
            GroupMember::View(v) => Some(v),
            GroupMember::Group(g) => g.first_view_mut(),
        })
    }
}

/// Saved geometry for maximize/minimize restore.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub id: NodeId,
    pub members: Vec<GroupView>,
    pub floating: bool,
    pub width: f64,
    pub height: f64,
    pub top: f64,
    pub left: f64,
    pub minimized: bool,
    pub maximized: bool,
    pub previous_position: Option<Placement>,
    pub z_index: u32,
}

impl Window {
    /// A window laid out by the host container.
    pub fn attached(members: Vec<GroupView>, width: f64, height: f64) -> Self {
        Self {
            id: NodeId::new_v4(),
            members,
            floating: false,
            width,
            height,
            top: 0.0,
            left: 0.0,
            minimized: false,
            maximized: false,
            previous_position: None,
            z_index: 0,
        }
    }

    /// A free-positioned window. The caller assigns its z-index.
    pub fn floating(members: Vec<GroupView>, placement: Placement) -> Self {
        Self {
            floating: true,
            width: placement.width,
            height: placement.height,
            top: placement.top,
            left: placement.left,
            ..Self::attached(members, placement.width, placement.height)
        }
    }

    pub fn placement(&self) -> Placement {
        Placement {
            top: self.top,
            left: self.left,
            width: self.width,
            height: self.height,
        }
    }

    pub fn set_placement(&mut self, p: Placement) {
        self.top = p.top;
        self.left = p.left;
        self.width = p.width;
        self.height = p.height;
    }

    /// Floating and not minimized: the windows that compete for z-order.
    pub fn is_stacked(&self) -> bool {
        self.floating && !self.minimized
    }
}

/// Borrowed view of any node.
#[derive(Clone, Copy, Debug)]
pub enum NodeRef<'a> {
    Tab(&'a Tab),
    TabView(&'a TabView),
    GroupView(&'a GroupView),
    Window(&'a Window),
}

impl<'a> NodeRef<'a> {
    pub fn id(self) -> NodeId {
        match self {
            NodeRef::Tab(t) => t.id,
            NodeRef::TabView(v) => v.id,
            NodeRef::GroupView(g) => g.id,
            NodeRef::Window(w) => w.id,
        }
    }

    pub fn kind(self) -> NodeKind {
        match self {
            NodeRef::Tab(_) => NodeKind::Tab,
            NodeRef::TabView(_) => NodeKind::TabView,
            NodeRef::GroupView(_) => NodeKind::GroupView,
            NodeRef::Window(_) => NodeKind::Window,
        }
    }

    /// Members in order; empty for tabs.
    pub fn children(self) -> Vec<NodeRef<'a>> {
        match self {
            NodeRef::Tab(_) => Vec::new(),
            NodeRef::TabView(v) => v.members.iter().map(NodeRef::Tab).collect(),
            NodeRef::GroupView(g) => g.members.iter().map(GroupMember::node).collect(),
            NodeRef::Window(w) => w.members.iter().map(NodeRef::GroupView).collect(),
        }
    }

    pub fn member_count(self) -> usize {
        match self {
            NodeRef::Tab(_) => 0,
            NodeRef::TabView(v) => v.members.len(),
            NodeRef::GroupView(g) => g.members.len(),
            NodeRef::Window(w) => w.members.len(),
        }
    }
}

/// Mutable view of any node, reached by walking a path of member indices.
#[derive(Debug)]
pub enum NodeMut<'a> {
    Tab(&'a mut Tab),
    TabView(&'a mut TabView),
    GroupView(&'a mut GroupView),
    Window(&'a mut Window),
}

impl<'a> NodeMut<'a> {
    pub fn into_child(self, idx: usize) -> Option<NodeMut<'a>> {
        match self {
            NodeMut::Tab(_) => None,
            NodeMut::TabView(v) => v.members.get_mut(idx).map(NodeMut::Tab),
            NodeMut::GroupView(g) => g.members.get_mut(idx).map(GroupMember::node_mut),
            NodeMut::Window(w) => w.members.get_mut(idx).map(NodeMut::GroupView),
        }
    }

    /// Scale any stored fixed size on this node and every descendant.
    pub fn scale_sizes(self, sx: f64, sy: f64) {
        match self {
            NodeMut::Tab(_) => {}
            NodeMut::TabView(v) => scale_dims(&mut v.width, &mut v.height, sx, sy),
            NodeMut::GroupView(g) => {
                scale_dims(&mut g.width, &mut g.height, sx, sy);
                for m in &mut g.members {
                    m.node_mut().scale_sizes(sx, sy);
                }
            }
            NodeMut::Window(w) => {
                for g in &mut w.members {
                    NodeMut::GroupView(g).scale_sizes(sx, sy);
                }
            }
        }
    }
}

fn scale_dims(width: &mut Option<f64>, height: &mut Option<f64>, sx: f64, sy: f64) {
    if let Some(w) = width {
        *w *= sx;
    }
    if let Some(h) = height {
        *h *= sy;
    }
}

/// The top of the tree: an ordered list of windows.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub windows: Vec<Window>,
}

impl Scene {
    pub fn new(windows: Vec<Window>) -> Self {
        Self { windows }
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Walk `path` (window index first, then member indices) to a node.
    pub fn node_mut(&mut self, path: &[usize]) -> Option<NodeMut<'_>> {
        let (first, rest) = path.split_first()?;
        let mut node = NodeMut::Window(self.windows.get_mut(*first)?);
        for &idx in rest {
            node = node.into_child(idx)?;
        }
        Some(node)
    }

    pub fn window_mut(&mut self, path: &[usize]) -> Option<&mut Window> {
        match self.node_mut(path)? {
            NodeMut::Window(w) => Some(w),
            _ => None,
        }
    }

    pub fn group_mut(&mut self, path: &[usize]) -> Option<&mut GroupView> {
        match self.node_mut(path)? {
            NodeMut::GroupView(g) => Some(g),
            _ => None,
        }
    }

    pub fn view_mut(&mut self, path: &[usize]) -> Option<&mut TabView> {
        match self.node_mut(path)? {
            NodeMut::TabView(v) => Some(v),
            _ => None,
        }
    }

    pub fn tab_mut(&mut self, path: &[usize]) -> Option<&mut Tab> {
        match self.node_mut(path)? {
            NodeMut::Tab(t) => Some(t),
            _ => None,
        }
    }

    /// Every node in pre-order with its depth (windows are depth 1).
    pub fn walk(&self) -> Vec<(NodeRef<'_>, usize)> {
        let mut out = Vec::new();
        let mut stack: Vec<(NodeRef<'_>, usize)> = self
            .windows
            .iter()
            .rev()
            .map(|w| (NodeRef::Window(w), 1))
            .collect();
        while let Some((node, depth)) = stack.pop() {
            out.push((node, depth));
            for child in node.children().into_iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        out
    }

    pub fn tabs(&self) -> Vec<&Tab> {
        self.walk()
            .into_iter()
            .filter_map(|(node, _)| match node {
                NodeRef::Tab(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    pub fn tab_views(&self) -> Vec<&TabView> {
        self.walk()
            .into_iter()
            .filter_map(|(node, _)| match node {
                NodeRef::TabView(v) => Some(v),
                _ => None,
            })
            .collect()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.walk().iter().any(|(node, _)| node.id() == id)
    }

    /// Title for a tab created without one: `Untitled N` with the smallest
    /// N not already taken anywhere in the tree.
    pub fn next_untitled_title(&self) -> String {
        let taken: std::collections::HashSet<u32> = self
            .tabs()
            .iter()
            .filter_map(|t| t.title.strip_prefix("Untitled "))
            .filter_map(|n| n.trim().parse().ok())
            .collect();
        let n = (1..).find(|n| !taken.contains(n)).unwrap_or(1);
        format!("Untitled {}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab(title: &str) -> Tab {
        Tab::new(title, Value::Null)
    }

    fn scene_with_titles(titles: &[&str]) -> Scene {
        let view = TabView::with_tabs(titles.iter().map(|t| tab(t)).collect());
        let window = Window::attached(vec![GroupView::with_view(view)], 800.0, 600.0);
        Scene::new(vec![window])
    }

    #[test]
    fn test_direction_alternates_by_depth() {
        assert_eq!(Direction::for_group_depth(2), Direction::Horizontal);
        assert_eq!(Direction::for_group_depth(3), Direction::Vertical);
        assert_eq!(Direction::for_view_depth(3), Direction::Horizontal);
        assert_eq!(Direction::for_view_depth(4), Direction::Vertical);
        assert_eq!(Direction::Horizontal.opposite(), Direction::Vertical);
    }

    #[test]
    fn test_remove_active_tab_prefers_previous() {
        let mut view = TabView::with_tabs(vec![tab("a"), tab("b"), tab("c")]);
        let (a, b) = (view.members[0].id, view.members[1].id);
        view.active_tab_id = Some(b);
        view.remove_tab(1);
        assert_eq!(view.active_tab_id, Some(a));
    }

    #[test]
    fn test_remove_first_active_tab_falls_back_to_next() {
        let mut view = TabView::with_tabs(vec![tab("a"), tab("b")]);
        let b = view.members[1].id;
        view.remove_tab(0);
        assert_eq!(view.active_tab_id, Some(b));
    }

    #[test]
    fn test_remove_last_tab_clears_active() {
        let mut view = TabView::with_tabs(vec![tab("a")]);
        view.remove_tab(0);
        assert_eq!(view.active_tab_id, None);
        assert!(view.members.is_empty());
    }

    #[test]
    fn test_remove_inactive_tab_keeps_selection() {
        let mut view = TabView::with_tabs(vec![tab("a"), tab("b")]);
        let a = view.members[0].id;
        view.remove_tab(1);
        assert_eq!(view.active_tab_id, Some(a));
    }

    #[test]
    fn test_insert_tab_before_unknown_appends() {
        let mut view = TabView::with_tabs(vec![tab("a")]);
        view.insert_tab(tab("b"), Some(NodeId::new_v4()));
        assert_eq!(view.members[1].title, "b");
        view.insert_tab(tab("c"), Some(view.members[0].id));
        assert_eq!(view.members[0].title, "c");
    }

    #[test]
    fn test_node_mut_follows_path() {
        let mut scene = scene_with_titles(&["a", "b"]);
        let t = scene.tab_mut(&[0, 0, 0, 1]).unwrap();
        assert_eq!(t.title, "b");
        assert!(scene.view_mut(&[0, 0, 0]).is_some());
        assert!(scene.group_mut(&[0, 0, 0]).is_none());
        assert!(scene.node_mut(&[0, 0, 0, 2]).is_none());
        assert!(scene.node_mut(&[]).is_none());
    }

    #[test]
    fn test_walk_is_preorder_with_depth() {
        let scene = scene_with_titles(&["a", "b"]);
        let kinds: Vec<(NodeKind, usize)> =
            scene.walk().iter().map(|(n, d)| (n.kind(), *d)).collect();
        assert_eq!(
            kinds,
            vec![
                (NodeKind::Window, 1),
                (NodeKind::GroupView, 2),
                (NodeKind::TabView, 3),
                (NodeKind::Tab, 4),
                (NodeKind::Tab, 4),
            ]
        );
    }

    #[test]
    fn test_untitled_fills_first_gap() {
        let scene = scene_with_titles(&["Untitled 1", "Untitled 3"]);
        assert_eq!(scene.next_untitled_title(), "Untitled 2");
    }

    #[test]
    fn test_untitled_starts_at_one() {
        assert_eq!(Scene::default().next_untitled_title(), "Untitled 1");
        let scene = scene_with_titles(&["notes", "Untitled x"]);
        assert_eq!(scene.next_untitled_title(), "Untitled 1");
    }

    #[test]
    fn test_scale_sizes_only_touches_fixed_sizes() {
        let mut inner = TabView::with_tabs(vec![tab("a")]);
        inner.width = Some(100.0);
        let mut group = GroupView::new(vec![
            GroupMember::View(inner),
            GroupMember::View(TabView::new()),
        ]);
        group.height = Some(50.0);
        let mut window = Window::attached(vec![group], 400.0, 300.0);
        NodeMut::Window(&mut window).scale_sizes(2.0, 0.5);
        let group = &window.members[0];
        assert_eq!(group.height, Some(25.0));
        assert_eq!(group.width, None);
        match &group.members[0] {
            GroupMember::View(v) => {
                assert_eq!(v.width, Some(200.0));
                assert_eq!(v.height, None);
            }
            _ => panic!("Expected TabView"),
        }
    }
}
