use crate::layout::Scene;

/// One more than the highest z-index held by any window.
pub fn next_z_index(scene: &Scene) -> u32 {
    scene
        .windows
        .iter()
        .map(|w| w.z_index)
        .max()
        .unwrap_or(0)
        + 1
}

/// Renumber stacked windows 1..=N in their current order.
///
/// Ties keep scene order. Minimized and attached windows are pinned to 0.
pub fn remap_z_index(scene: &mut Scene) -> bool {
    let mut stacked: Vec<usize> = (0..scene.windows.len())
        .filter(|&i| scene.windows[i].is_stacked())
        .collect();
    stacked.sort_by_key(|&i| scene.windows[i].z_index);

    let mut changed = false;
    for (rank, &i) in stacked.iter().enumerate() {
        let z = rank as u32 + 1;
        if scene.windows[i].z_index != z {
            scene.windows[i].z_index = z;
            changed = true;
        }
    }
    for window in scene.windows.iter_mut().filter(|w| !w.is_stacked()) {
        if window.z_index != 0 {
            window.z_index = 0;
            changed = true;
        }
    }
    changed
}

/// Give the window at `idx` the top z-index, then renumber.
pub fn bring_to_top(scene: &mut Scene, idx: usize) -> bool {
    let z = next_z_index(scene);
    let Some(window) = scene.windows.get_mut(idx) else {
        return false;
    };
    if !window.is_stacked() {
        return false;
    }
    window.z_index = z;
    remap_z_index(scene);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{GroupView, Placement, Window};

    fn floating(z: u32) -> Window {
        let placement = Placement {
            top: 0.0,
            left: 0.0,
            width: 100.0,
            height: 100.0,
        };
        let mut w = Window::floating(vec![GroupView::new(Vec::new())], placement);
        w.z_index = z;
        w
    }

    fn z_indices(scene: &Scene) -> Vec<u32> {
        scene.windows.iter().map(|w| w.z_index).collect()
    }

    #[test]
    fn test_next_z_index() {
        assert_eq!(next_z_index(&Scene::default()), 1);
        let scene = Scene::new(vec![floating(3), floating(7)]);
        assert_eq!(next_z_index(&scene), 8);
    }

    #[test]
    fn test_remap_is_dense_and_order_preserving() {
        let mut scene = Scene::new(vec![floating(40), floating(5), floating(12)]);
        assert!(remap_z_index(&mut scene));
        assert_eq!(z_indices(&scene), vec![3, 1, 2]);
        assert!(!remap_z_index(&mut scene));
    }

    #[test]
    fn test_remap_breaks_ties_by_scene_order() {
        let mut scene = Scene::new(vec![floating(2), floating(2), floating(1)]);
        remap_z_index(&mut scene);
        assert_eq!(z_indices(&scene), vec![2, 3, 1]);
    }

    #[test]
    fn test_remap_pins_minimized_and_attached() {
        let mut minimized = floating(9);
        minimized.minimized = true;
        let mut attached = Window::attached(vec![GroupView::new(Vec::new())], 10.0, 10.0);
        attached.z_index = 4;
        let mut scene = Scene::new(vec![minimized, attached, floating(6)]);
        remap_z_index(&mut scene);
        assert_eq!(z_indices(&scene), vec![0, 0, 1]);
    }

    #[test]
    fn test_bring_to_top() {
        let mut scene = Scene::new(vec![floating(1), floating(2), floating(3)]);
        assert!(bring_to_top(&mut scene, 0));
        assert_eq!(z_indices(&scene), vec![3, 1, 2]);
    }

    #[test]
    fn test_bring_to_top_ignores_attached() {
        let attached = Window::attached(vec![GroupView::new(Vec::new())], 10.0, 10.0);
        let mut scene = Scene::new(vec![attached, floating(1)]);
        assert!(!bring_to_top(&mut scene, 0));
        assert!(!bring_to_top(&mut scene, 5));
        assert_eq!(z_indices(&scene), vec![0, 1]);
    }
}
