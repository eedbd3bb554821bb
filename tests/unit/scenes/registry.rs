use super::*;
use crate::render::surface::CpuSurfaceBackend;
use crate::scene::frame::SceneView;
use crate::scene::lifecycle::LifecycleState;
use crate::scroll::tracker::ScrollProgress;

#[test]
fn ids_parse_back_to_their_kind() {
    for kind in SceneKind::ALL {
        assert_eq!(kind.id().parse::<SceneKind>().unwrap(), kind);
        assert_eq!(kind.to_string(), kind.id());
    }
}

#[test]
fn unknown_id_lists_the_known_ones() {
    let err = "newsroom".parse::<SceneKind>().unwrap_err().to_string();
    assert!(err.contains("unknown scene 'newsroom'"), "{err}");
    for kind in SceneKind::ALL {
        assert!(err.contains(kind.id()), "{err}");
    }
}

#[test]
fn serde_uses_the_same_ids() {
    for kind in SceneKind::ALL {
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, format!("\"{}\"", kind.id()));
        assert_eq!(serde_json::from_str::<SceneKind>(&json).unwrap(), kind);
    }
}

#[test]
fn every_scene_is_described() {
    let mut ids: Vec<&str> = SceneKind::ALL.iter().map(|k| k.id()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), SceneKind::ALL.len());

    for kind in SceneKind::ALL {
        let info = kind.info();
        assert!(!info.aria_label.is_empty(), "{kind}");
        assert!(!info.fallback_text.is_empty(), "{kind}");
        assert!(!info.caption.is_empty(), "{kind}");
    }
}

#[test]
fn every_scene_mounts_activates_and_tears_down() {
    for kind in SceneKind::ALL {
        let backend = CpuSurfaceBackend::new();
        let render_loop = RenderLoop::new();
        let mut slot = kind.mount(
            backend.clone(),
            render_loop.clone(),
            MotionPreference::from_query(Some(false)),
        );
        slot.sync(ScrollProgress {
            progress: 0.5,
            is_in_view: true,
        });
        assert_eq!(slot.state(), LifecycleState::Active, "{kind}");
        assert_eq!(render_loop.labels(), [kind.id().to_owned()]);

        for _ in 0..5 {
            assert!(slot.on_frame());
        }
        let SceneView::Live(frame) = slot.view().unwrap() else {
            panic!("{kind} should be live");
        };
        assert_eq!((frame.width, frame.height), (320, 180));
        // Something other than the transparent clear colour got painted.
        assert!(frame.data.chunks_exact(4).any(|px| px[3] != 0), "{kind}");

        slot.unmount();
        assert_eq!(backend.stats().live(), 0, "{kind}");
        assert_eq!(render_loop.live(), 0, "{kind}");
    }
}
