use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::task::Poll;

use futures::channel::oneshot;

use crate::foundation::core::{Canvas, Rgba8Premul};
use crate::foundation::error::{SceneError, SceneResult};

/// Parameters for one drawing surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceDesc {
    /// Logical resolution. Display scaling happens later and never changes this.
    pub canvas: Canvas,
    /// Colour the surface is cleared to before each raster pass.
    pub clear: Rgba8Premul,
    /// Whether display scaling may interpolate. Scenes are pixel art, so this defaults to off.
    pub smoothing: bool,
}

impl Default for SurfaceDesc {
    fn default() -> Self {
        Self {
            canvas: Canvas::BASE,
            clear: Rgba8Premul::transparent(),
            smoothing: false,
        }
    }
}

impl SurfaceDesc {
    /// Return a descriptor with a different logical resolution.
    pub fn with_canvas(mut self, canvas: Canvas) -> Self {
        self.canvas = canvas;
        self
    }

    /// Return a descriptor with a different clear colour.
    pub fn with_clear(mut self, clear: Rgba8Premul) -> Self {
        self.clear = clear;
        self
    }
}

/// Backend-unique surface id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u64);

/// A CPU pixmap at a fixed logical resolution, owned by exactly one scene at a time.
pub struct Surface {
    id: SurfaceId,
    desc: SurfaceDesc,
    pixmap: vello_cpu::Pixmap,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("id", &self.id)
            .field("desc", &self.desc)
            .finish_non_exhaustive()
    }
}

impl Surface {
    pub(crate) fn allocate(id: SurfaceId, desc: SurfaceDesc) -> SceneResult<Self> {
        let w: u16 = desc
            .canvas
            .width
            .try_into()
            .map_err(|_| SceneError::backend("surface width exceeds u16"))?;
        let h: u16 = desc
            .canvas
            .height
            .try_into()
            .map_err(|_| SceneError::backend("surface height exceeds u16"))?;
        if w == 0 || h == 0 {
            return Err(SceneError::backend("surface dimensions must be > 0"));
        }
        let mut surface = Self {
            id,
            desc,
            pixmap: vello_cpu::Pixmap::new(w, h),
        };
        surface.clear();
        Ok(surface)
    }

    /// Surface id.
    pub fn id(&self) -> SurfaceId {
        self.id
    }

    /// Descriptor the surface was created with.
    pub fn desc(&self) -> SurfaceDesc {
        self.desc
    }

    /// Logical resolution.
    pub fn canvas(&self) -> Canvas {
        self.desc.canvas
    }

    pub(crate) fn pixmap_mut(&mut self) -> &mut vello_cpu::Pixmap {
        &mut self.pixmap
    }

    /// Premultiplied RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    pub(crate) fn clear(&mut self) {
        let c = self.desc.clear;
        let rgba = [c.r, c.g, c.b, c.a];
        for px in self.pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }
}

/// An allocation that may resolve later.
///
/// Polling never blocks. A backend that drops the request without answering resolves it as
/// [`SceneError::Backend`].
#[derive(Debug)]
pub struct PendingSurface {
    rx: oneshot::Receiver<SceneResult<Surface>>,
}

impl PendingSurface {
    /// Create a pending allocation and the sender that completes it.
    pub fn channel() -> (oneshot::Sender<SceneResult<Surface>>, Self) {
        let (tx, rx) = oneshot::channel();
        (tx, Self { rx })
    }

    /// An allocation that is already resolved.
    pub fn ready(result: SceneResult<Surface>) -> Self {
        let (tx, pending) = Self::channel();
        // The receiver is alive in `pending`, so this cannot fail.
        let _ = tx.send(result);
        pending
    }

    /// Check whether the allocation has resolved.
    pub fn poll(&mut self) -> Poll<SceneResult<Surface>> {
        match self.rx.try_recv() {
            Ok(Some(result)) => Poll::Ready(result),
            Ok(None) => Poll::Pending,
            Err(oneshot::Canceled) => Poll::Ready(Err(SceneError::backend(
                "allocation dropped before resolving",
            ))),
        }
    }
}

/// Surface accounting kept by every backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SurfaceStats {
    /// Allocation requests received.
    pub requested: u64,
    /// Surfaces successfully created.
    pub allocated: u64,
    /// Surfaces handed back through [`SurfaceBackend::release`].
    pub released: u64,
    /// Requests that resolved with an error.
    pub failed: u64,
}

impl SurfaceStats {
    /// Surfaces created and not yet released.
    pub fn live(&self) -> u64 {
        self.allocated.saturating_sub(self.released)
    }
}

/// Produces drawing surfaces for scene lifecycles.
pub trait SurfaceBackend {
    /// Start an allocation. The result may arrive on a later poll.
    fn request(&mut self, desc: SurfaceDesc) -> PendingSurface;

    /// Give a surface back. After this the surface is destroyed.
    fn release(&mut self, surface: Surface);

    /// Accounting snapshot.
    fn stats(&self) -> SurfaceStats;
}

#[derive(Debug, Default)]
struct Ledger {
    next_id: u64,
    stats: SurfaceStats,
}

impl Ledger {
    fn allocate(&mut self, desc: SurfaceDesc) -> SceneResult<Surface> {
        let id = SurfaceId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        match Surface::allocate(id, desc) {
            Ok(s) => {
                self.stats.allocated = self.stats.allocated.saturating_add(1);
                Ok(s)
            }
            Err(e) => {
                self.stats.failed = self.stats.failed.saturating_add(1);
                Err(e)
            }
        }
    }

    fn release(&mut self, surface: Surface) {
        self.stats.released = self.stats.released.saturating_add(1);
        drop(surface);
    }
}

/// Backend that allocates synchronously. Clones share accounting.
#[derive(Clone, Debug, Default)]
pub struct CpuSurfaceBackend {
    ledger: Rc<RefCell<Ledger>>,
}

impl CpuSurfaceBackend {
    /// Create a backend.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SurfaceBackend for CpuSurfaceBackend {
    fn request(&mut self, desc: SurfaceDesc) -> PendingSurface {
        let mut ledger = self.ledger.borrow_mut();
        ledger.stats.requested = ledger.stats.requested.saturating_add(1);
        PendingSurface::ready(ledger.allocate(desc))
    }

    fn release(&mut self, surface: Surface) {
        self.ledger.borrow_mut().release(surface);
    }

    fn stats(&self) -> SurfaceStats {
        self.ledger.borrow().stats
    }
}

#[derive(Default)]
struct DeferredInner {
    ledger: Ledger,
    queue: VecDeque<(SurfaceDesc, oneshot::Sender<SceneResult<Surface>>)>,
}

/// Backend whose allocations stay in flight until the host resolves them.
///
/// Models backends that initialize asynchronously. Clones share the queue, so a host (or a
/// test) can keep one handle while a scene lifecycle owns another.
#[derive(Clone, Default)]
pub struct DeferredSurfaceBackend {
    inner: Rc<RefCell<DeferredInner>>,
}

impl std::fmt::Debug for DeferredSurfaceBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("DeferredSurfaceBackend")
            .field("in_flight", &inner.queue.len())
            .field("stats", &inner.ledger.stats)
            .finish()
    }
}

impl DeferredSurfaceBackend {
    /// Create a backend with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests not yet resolved.
    pub fn in_flight(&self) -> usize {
        self.inner.borrow().queue.len()
    }

    /// Resolve the oldest request successfully. Returns `false` when nothing was queued.
    ///
    /// If the requester has already gone away, the fresh surface is released on the spot.
    pub fn resolve_next(&self) -> bool {
        let mut inner = self.inner.borrow_mut();
        let Some((desc, tx)) = inner.queue.pop_front() else {
            return false;
        };
        let result = inner.ledger.allocate(desc);
        if let Err(Ok(orphan)) = tx.send(result) {
            inner.ledger.release(orphan);
        }
        true
    }

    /// Fail the oldest request with a backend error.
    pub fn fail_next(&self, reason: &str) -> bool {
        let mut inner = self.inner.borrow_mut();
        let Some((_, tx)) = inner.queue.pop_front() else {
            return false;
        };
        inner.ledger.stats.failed = inner.ledger.stats.failed.saturating_add(1);
        let _ = tx.send(Err(SceneError::backend(reason)));
        true
    }

    /// Resolve every queued request. Returns how many were resolved.
    pub fn resolve_all(&self) -> usize {
        let mut n = 0;
        while self.resolve_next() {
            n += 1;
        }
        n
    }
}

impl SurfaceBackend for DeferredSurfaceBackend {
    fn request(&mut self, desc: SurfaceDesc) -> PendingSurface {
        let (tx, pending) = PendingSurface::channel();
        let mut inner = self.inner.borrow_mut();
        inner.ledger.stats.requested = inner.ledger.stats.requested.saturating_add(1);
        inner.queue.push_back((desc, tx));
        pending
    }

    fn release(&mut self, surface: Surface) {
        self.inner.borrow_mut().ledger.release(surface);
    }

    fn stats(&self) -> SurfaceStats {
        self.inner.borrow().ledger.stats
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
