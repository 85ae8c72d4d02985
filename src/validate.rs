use std::collections::HashSet;

use crate::error::Violation;
use crate::layout::{GroupMember, NodeRef, Scene};

impl Scene {
    /// Check every structural rule the engine maintains after a commit.
    pub fn validate(&self) -> Result<(), Violation> {
        let mut seen = HashSet::new();
        for (node, _) in self.walk() {
            let id = node.id();
            if !seen.insert(id) {
                return Err(Violation::DuplicateId { id });
            }
            if !matches!(node, NodeRef::Tab(_)) && node.member_count() == 0 {
                return Err(Violation::EmptyContainer { id });
            }
            match node {
                NodeRef::GroupView(g) => {
                    if let [GroupMember::Group(_)] = g.members.as_slice() {
                        return Err(Violation::RedundantGroup { id });
                    }
                }
                NodeRef::TabView(v) => match v.active_tab_id {
                    Some(active) if v.position(active).is_none() => {
                        return Err(Violation::DanglingActiveTab { id, active });
                    }
                    None if !v.members.is_empty() => {
                        return Err(Violation::MissingActiveTab { id });
                    }
                    _ => {}
                },
                NodeRef::Window(w) => {
                    if w.minimized && w.maximized {
                        return Err(Violation::MinimizedAndMaximized { id });
                    }
                }
                NodeRef::Tab(_) => {}
            }
        }

        let mut stacked: Vec<u32> = self
            .windows
            .iter()
            .filter(|w| w.is_stacked())
            .map(|w| w.z_index)
            .collect();
        stacked.sort_unstable();
        let dense = stacked.iter().enumerate().all(|(i, &z)| z == i as u32 + 1);
        if !dense {
            return Err(Violation::SparseZIndex {
                expected: stacked.len(),
                found: stacked,
            });
        }
        Ok(())
    }
}
