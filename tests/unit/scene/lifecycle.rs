use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::foundation::core::Rgb8;
use crate::foundation::error::SceneError;
use crate::render::layer::LayerId;
use crate::render::surface::{CpuSurfaceBackend, DeferredSurfaceBackend};

const RECORDER_INFO: SceneInfo = SceneInfo {
    id: "recorder",
    aria_label: "recorder scene",
    fallback_text: "[ recorder ]",
    caption: "recorder caption",
};

type Log = Rc<RefCell<Vec<String>>>;

struct Recorder {
    log: Log,
    fail_setup: bool,
}

impl Recorder {
    fn new() -> (Self, Log) {
        let log = Log::default();
        (
            Self {
                log: log.clone(),
                fail_setup: false,
            },
            log,
        )
    }
}

impl SceneDefinition for Recorder {
    type Handles = LayerId;

    fn info(&self) -> &SceneInfo {
        &RECORDER_INFO
    }

    fn setup(&self, _ctx: &SetupCtx, tree: &mut LayerTree) -> SceneResult<LayerId> {
        self.log.borrow_mut().push("setup".to_owned());
        if self.fail_setup {
            return Err(SceneError::setup("recorder refused"));
        }
        tree.add_graphics(tree.root(), "recorder")
    }

    fn tick(&self, handles: &mut LayerId, frame: FrameCounter, tree: &mut LayerTree) {
        self.log.borrow_mut().push(format!("tick {}", frame.0));
        if let Some(g) = tree.graphics_mut(*handles) {
            g.clear()
                .rect(frame.t(), 0.0, 1.0, 1.0, Rgb8::hex(0xffffff));
        }
    }

    fn progress(&self, _handles: &LayerId, progress: f64, _tree: &mut LayerTree) {
        self.log.borrow_mut().push(format!("progress {progress}"));
    }

    fn cleanup(&self, _handles: LayerId, _tree: &mut LayerTree) {
        self.log.borrow_mut().push("cleanup".to_owned());
    }
}

fn in_view(progress: f64) -> ScrollProgress {
    ScrollProgress {
        progress,
        is_in_view: true,
    }
}

fn out_of_view(progress: f64) -> ScrollProgress {
    ScrollProgress {
        progress,
        is_in_view: false,
    }
}

fn count(log: &Log, entry: &str) -> usize {
    log.borrow().iter().filter(|e| *e == entry).count()
}

#[test]
fn entering_view_activates_and_relays_progress_after_setup() {
    let (recorder, log) = Recorder::new();
    let backend = CpuSurfaceBackend::new();
    let rl = RenderLoop::new();
    let mut lc =
        SceneLifecycle::new(recorder, backend.clone(), rl.clone(), MotionPreference::default());
    assert_eq!(lc.state(), LifecycleState::Uninitialized);

    lc.sync(in_view(0.2));
    assert_eq!(lc.state(), LifecycleState::Active);
    assert_eq!(rl.live(), 1);
    assert_eq!(backend.stats().live(), 1);
    assert_eq!(lc.frame_counter(), Some(FrameCounter(0)));
    assert_eq!(log.borrow()[0], "setup");
    assert!(log.borrow().iter().any(|e| e == "progress 0.2"));
}

#[test]
fn activation_is_idempotent() {
    let (recorder, log) = Recorder::new();
    let backend = CpuSurfaceBackend::new();
    let mut lc =
        SceneLifecycle::new(recorder, backend.clone(), RenderLoop::new(), MotionPreference::default());
    lc.sync(in_view(0.1));
    lc.sync(in_view(0.1));
    lc.sync(in_view(0.4));
    assert_eq!(lc.stats().requests, 1);
    assert_eq!(lc.stats().activations, 1);
    assert_eq!(count(&log, "setup"), 1);
    assert_eq!(backend.stats().allocated, 1);
}

#[test]
fn progress_is_not_relayed_while_uninitialized() {
    let (recorder, log) = Recorder::new();
    let mut lc = SceneLifecycle::new(
        recorder,
        DeferredSurfaceBackend::new(),
        RenderLoop::new(),
        MotionPreference::default(),
    );
    lc.sync(in_view(0.1));
    lc.sync(in_view(0.5));
    assert!(log.borrow().is_empty());
    assert_eq!(lc.progress(), 0.5);
}

#[test]
fn leaving_view_tears_down_once() {
    let (recorder, log) = Recorder::new();
    let backend = CpuSurfaceBackend::new();
    let rl = RenderLoop::new();
    let mut lc =
        SceneLifecycle::new(recorder, backend.clone(), rl.clone(), MotionPreference::default());
    lc.sync(in_view(0.5));
    lc.sync(out_of_view(1.0));
    lc.sync(out_of_view(1.0));
    lc.unmount();

    assert_eq!(lc.state(), LifecycleState::Uninitialized);
    assert_eq!(count(&log, "cleanup"), 1);
    assert_eq!(rl.live(), 0);
    assert_eq!(backend.stats().live(), 0);
    assert!(lc.tree().is_none());
}

#[test]
fn ticker_counts_frames_from_one_within_a_period() {
    let (recorder, log) = Recorder::new();
    let mut lc = SceneLifecycle::new(
        recorder,
        CpuSurfaceBackend::new(),
        RenderLoop::new(),
        MotionPreference::default(),
    );
    assert!(!lc.on_frame());
    lc.sync(in_view(0.5));
    assert!(lc.on_frame());
    assert!(lc.on_frame());
    assert_eq!(lc.frame_counter(), Some(FrameCounter(2)));
    assert!(log.borrow().iter().any(|e| e == "tick 1"));

    lc.sync(out_of_view(1.0));
    lc.sync(in_view(0.5));
    assert_eq!(lc.frame_counter(), Some(FrameCounter(0)));
    lc.on_frame();
    assert_eq!(count(&log, "tick 1"), 2);
}

#[test]
fn leaving_view_while_allocating_discards_the_surface() {
    let (recorder, log) = Recorder::new();
    let backend = DeferredSurfaceBackend::new();
    let rl = RenderLoop::new();
    let mut lc =
        SceneLifecycle::new(recorder, backend.clone(), rl.clone(), MotionPreference::default());

    lc.sync(in_view(0.05));
    assert!(lc.is_allocating());
    assert_eq!(backend.in_flight(), 1);

    lc.sync(out_of_view(0.0));
    assert!(!lc.is_allocating());
    assert_eq!(lc.in_flight(), 1);

    assert!(backend.resolve_next());
    lc.poll();

    assert_eq!(lc.state(), LifecycleState::Uninitialized);
    assert_eq!(lc.stats().discarded_surfaces, 1);
    assert_eq!(count(&log, "setup"), 0);
    assert_eq!(rl.live(), 0);
    assert_eq!(backend.stats().allocated, 1);
    assert_eq!(backend.stats().live(), 0);
}

#[test]
fn flapping_never_attaches_two_surfaces() {
    let (recorder, log) = Recorder::new();
    let backend = DeferredSurfaceBackend::new();
    let mut lc = SceneLifecycle::new(
        recorder,
        backend.clone(),
        RenderLoop::new(),
        MotionPreference::default(),
    );

    lc.sync(in_view(0.05));
    lc.sync(out_of_view(0.05));
    lc.sync(in_view(0.05));
    assert_eq!(backend.in_flight(), 2);

    assert_eq!(backend.resolve_all(), 2);
    lc.poll();

    assert_eq!(lc.state(), LifecycleState::Active);
    assert_eq!(count(&log, "setup"), 1);
    assert_eq!(lc.stats().discarded_surfaces, 1);
    assert_eq!(backend.stats().live(), 1);

    lc.sync(out_of_view(1.0));
    assert_eq!(backend.stats().live(), 0);
}

#[test]
fn allocation_failure_leaves_scene_uninitialized() {
    let (recorder, log) = Recorder::new();
    let backend = DeferredSurfaceBackend::new();
    let rl = RenderLoop::new();
    let mut lc =
        SceneLifecycle::new(recorder, backend.clone(), rl.clone(), MotionPreference::default());

    lc.sync(in_view(0.3));
    assert!(backend.fail_next("no adapter"));
    lc.poll();

    assert_eq!(lc.state(), LifecycleState::Uninitialized);
    assert_eq!(lc.stats().alloc_failures, 1);
    assert_eq!(rl.live(), 0);
    assert!(log.borrow().is_empty());
    assert_eq!(lc.view().unwrap(), SceneView::Pending);

    // No retry storm while still in view; coming back into view retries.
    lc.sync(in_view(0.4));
    assert_eq!(backend.stats().requested, 1);
    lc.sync(out_of_view(1.0));
    lc.sync(in_view(0.4));
    assert_eq!(backend.stats().requested, 2);
}

#[test]
fn setup_failure_releases_the_surface() {
    let (mut recorder, log) = Recorder::new();
    recorder.fail_setup = true;
    let backend = CpuSurfaceBackend::new();
    let rl = RenderLoop::new();
    let mut lc =
        SceneLifecycle::new(recorder, backend.clone(), rl.clone(), MotionPreference::default());

    lc.sync(in_view(0.3));
    assert_eq!(lc.state(), LifecycleState::Uninitialized);
    assert_eq!(lc.stats().setup_failures, 1);
    assert_eq!(backend.stats().live(), 0);
    assert_eq!(rl.live(), 0);
    lc.sync(in_view(0.4));
    assert_eq!(backend.stats().requested, 1);
    lc.unmount();
    assert_eq!(count(&log, "cleanup"), 0);
}

#[test]
fn reduced_motion_at_mount_never_allocates() {
    let (recorder, log) = Recorder::new();
    let backend = CpuSurfaceBackend::new();
    let mut lc = SceneLifecycle::new(
        recorder,
        backend.clone(),
        RenderLoop::new(),
        MotionPreference::from_query(Some(true)),
    );
    assert_eq!(lc.state(), LifecycleState::ReducedMotionFallback);

    for p in [0.0, 0.3, 0.9] {
        lc.sync(in_view(p));
        lc.poll();
        lc.on_frame();
    }
    assert_eq!(backend.stats().requested, 0);
    assert!(log.borrow().is_empty());
    assert_eq!(
        lc.view().unwrap(),
        SceneView::Fallback {
            text: "[ recorder ]".to_owned()
        }
    );
}

#[test]
fn reduced_motion_toggle_tears_down_before_next_frame() {
    let (recorder, log) = Recorder::new();
    let backend = CpuSurfaceBackend::new();
    let rl = RenderLoop::new();
    let motion = MotionPreference::from_query(Some(false));
    let mut lc = SceneLifecycle::new(recorder, backend.clone(), rl.clone(), motion.clone());

    lc.sync(in_view(0.5));
    lc.on_frame();
    assert_eq!(lc.state(), LifecycleState::Active);

    motion.set(true);
    assert!(!lc.on_frame());
    assert_eq!(lc.state(), LifecycleState::ReducedMotionFallback);
    assert_eq!(count(&log, "cleanup"), 1);
    assert_eq!(backend.stats().live(), 0);
    assert_eq!(rl.live(), 0);

    lc.sync(in_view(0.6));
    assert_eq!(backend.stats().requested, 1);

    motion.set(false);
    lc.sync(in_view(0.6));
    assert_eq!(lc.state(), LifecycleState::Active);
    assert_eq!(lc.frame_counter(), Some(FrameCounter(0)));
    assert_eq!(count(&log, "setup"), 2);
}

#[test]
fn reduced_motion_toggle_applies_to_the_very_next_view() {
    let (recorder, log) = Recorder::new();
    let backend = CpuSurfaceBackend::new();
    let rl = RenderLoop::new();
    let motion = MotionPreference::from_query(Some(false));
    let mut lc = SceneLifecycle::new(recorder, backend.clone(), rl.clone(), motion.clone());
    lc.sync(in_view(0.5));
    assert!(lc.view().unwrap().is_live());

    motion.set(true);
    assert_eq!(
        lc.view().unwrap(),
        SceneView::Fallback {
            text: "[ recorder ]".to_owned()
        }
    );
    assert_eq!(lc.state(), LifecycleState::ReducedMotionFallback);
    assert_eq!(count(&log, "cleanup"), 1);
    assert_eq!(backend.stats().live(), 0);
    assert_eq!(rl.live(), 0);
}

#[test]
fn reduced_motion_toggle_stops_render_before_it_draws() {
    let (recorder, _log) = Recorder::new();
    let backend = CpuSurfaceBackend::new();
    let motion = MotionPreference::from_query(Some(false));
    let mut lc = SceneLifecycle::new(recorder, backend.clone(), RenderLoop::new(), motion.clone());
    lc.sync(in_view(0.5));
    assert!(lc.render().unwrap().is_some());

    motion.set(true);
    assert!(lc.render().unwrap().is_none());
    assert_eq!(backend.stats().live(), 0);

    // Clearing the preference goes back to waiting for the next in-view sync.
    motion.set(false);
    assert_eq!(lc.view().unwrap(), SceneView::Pending);
    assert_eq!(lc.state(), LifecycleState::Uninitialized);
}

#[test]
fn unmount_releases_a_surface_that_resolved_before_poll() {
    let (recorder, log) = Recorder::new();
    let backend = DeferredSurfaceBackend::new();
    let mut lc =
        SceneLifecycle::new(recorder, backend.clone(), RenderLoop::new(), MotionPreference::default());
    lc.sync(in_view(0.5));
    assert!(backend.resolve_next());

    lc.unmount();
    assert_eq!(lc.stats().discarded_surfaces, 1);
    drop(lc);
    let st = backend.stats();
    assert_eq!((st.allocated, st.released), (1, 1));
    assert_eq!(st.live(), 0);
    assert_eq!(count(&log, "setup"), 0);
}

#[test]
fn drop_releases_a_surface_that_resolved_before_poll() {
    let (recorder, _log) = Recorder::new();
    let backend = DeferredSurfaceBackend::new();
    {
        let mut lc = SceneLifecycle::new(
            recorder,
            backend.clone(),
            RenderLoop::new(),
            MotionPreference::default(),
        );
        lc.sync(in_view(0.5));
        lc.sync(out_of_view(1.0));
        lc.sync(in_view(0.5));
        // First attempt resolves cancelled, second resolves live; neither is polled.
        assert_eq!(backend.resolve_all(), 2);
    }
    assert_eq!(backend.stats().live(), 0);
}

#[test]
fn handles_from_an_old_period_do_not_resolve() {
    let (recorder, _log) = Recorder::new();
    let mut lc = SceneLifecycle::new(
        recorder,
        CpuSurfaceBackend::new(),
        RenderLoop::new(),
        MotionPreference::default(),
    );
    lc.sync(in_view(0.5));
    let old = lc.tree().and_then(|t| t.find("recorder")).unwrap();

    lc.sync(out_of_view(1.0));
    lc.sync(in_view(0.5));
    let tree = lc.tree().unwrap();
    assert!(tree.node(old).is_none());
    assert!(tree.find("recorder").is_some());
}

#[test]
fn unmount_stops_reacting() {
    let (recorder, log) = Recorder::new();
    let backend = CpuSurfaceBackend::new();
    let mut lc =
        SceneLifecycle::new(recorder, backend.clone(), RenderLoop::new(), MotionPreference::default());
    lc.unmount();
    lc.sync(in_view(0.5));
    assert!(!lc.on_frame());
    assert_eq!(backend.stats().requested, 0);
    assert!(log.borrow().is_empty());
}

#[test]
fn live_view_has_logical_resolution() {
    let (recorder, _log) = Recorder::new();
    let mut lc = SceneLifecycle::new(
        recorder,
        CpuSurfaceBackend::new(),
        RenderLoop::new(),
        MotionPreference::default(),
    );
    assert_eq!(lc.view().unwrap(), SceneView::Pending);
    lc.sync(in_view(0.5));
    lc.on_frame();
    match lc.view().unwrap() {
        SceneView::Live(frame) => {
            assert_eq!((frame.width, frame.height), (320, 180));
            assert_eq!(frame.data.len(), 320 * 180 * 4);
        }
        other => panic!("expected a live frame, got {other:?}"),
    }
}
