use tracing::trace;

use crate::layout::{GroupMember, GroupView, Scene, TabView};

/// Restore the structural invariants after a mutation.
///
/// Repeats a full pass until nothing changes: empty containers are removed
/// (cascading up to the window), a group whose only member is another group
/// takes over that group's members, and dangling active-tab ids are repaired.
/// Every change either removes a node or removes a level, so the loop ends.
///
/// Returns `true` when the scene is left empty ("home").
pub fn cleanup(scene: &mut Scene) -> bool {
    let mut passes = 0usize;
    while clean_pass(scene) {
        passes += 1;
    }
    trace!(passes, windows = scene.windows.len(), "cleanup settled");
    scene.is_empty()
}

fn clean_pass(scene: &mut Scene) -> bool {
    let mut changed = false;
    for window in &mut scene.windows {
        for group in &mut window.members {
            changed |= clean_group(group);
        }
        let before = window.members.len();
        window.members.retain(|g| !g.members.is_empty());
        changed |= window.members.len() != before;
    }
    let before = scene.windows.len();
    scene.windows.retain(|w| !w.members.is_empty());
    changed || scene.windows.len() != before
}

fn clean_group(group: &mut GroupView) -> bool {
    let mut changed = false;
    for member in &mut group.members {
        changed |= match member {
            GroupMember::Group(g) => clean_group(g),
            GroupMember::View(v) => repair_active(v),
        };
    }

    let before = group.members.len();
    group.members.retain(|m| !m.is_empty());
    changed |= group.members.len() != before;

    if group.members.len() == 1 && matches!(group.members[0], GroupMember::Group(_)) {
        if let Some(GroupMember::Group(child)) = group.members.pop() {
            group.members = child.members;
            changed = true;
        }
    }
    changed
}

/// Point `active_tab_id` at a member, or clear it when there are none.
fn repair_active(view: &mut TabView) -> bool {
    let valid = match view.active_tab_id {
        Some(id) => view.members.iter().any(|t| t.id == id),
        None => view.members.is_empty(),
    };
    if valid {
        return false;
    }
    view.active_tab_id = view.members.first().map(|t| t.id);
    true
}
