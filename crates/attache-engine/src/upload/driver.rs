use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use crate::surface::EditorSurface;
use crate::upload::SourceFile;
use crate::upload::preview::{self, PreviewError};
use crate::upload::reconcile::{self, ReconcileError};
use crate::upload::registry::{TaskId, UploadRegistry};

/// Outcome of the caller-supplied upload operation: the final reference
/// (typically a URL) or an opaque error that gets logged, never parsed.
pub type UploadFuture = Pin<Box<dyn Future<Output = anyhow::Result<String>>>>;

/// The upload transport itself. Everything on the wire — protocol, retries,
/// timeouts — lives inside this function; the engine only awaits it.
pub type UploadFn = Box<dyn Fn(SourceFile) -> UploadFuture>;

pub type PreviewFuture = Pin<Box<dyn Future<Output = Result<String, PreviewError>>>>;

/// Local read producing the placeholder's visual content. Defaults to
/// in-memory data-URL encoding; hosts with real file handles override it.
pub type PreviewFn = Box<dyn Fn(SourceFile) -> PreviewFuture>;

#[derive(Default)]
pub struct UploadOptions {
    pub upload: Option<UploadFn>,
    pub preview: Option<PreviewFn>,
}

impl UploadOptions {
    pub fn new<F>(upload: F) -> Self
    where
        F: Fn(SourceFile) -> UploadFuture + 'static,
    {
        Self {
            upload: Some(Box::new(upload)),
            preview: None,
        }
    }

    pub fn with_preview<F>(mut self, preview: F) -> Self
    where
        F: Fn(SourceFile) -> PreviewFuture + 'static,
    {
        self.preview = Some(Box::new(preview));
        self
    }
}

/// Drives image attachment for one editing surface.
///
/// `attach` inserts a placeholder as soon as the local preview is ready,
/// runs the upload concurrently, and reconciles the placeholder when the
/// upload settles. Several attachments may be in flight at once; each one is
/// isolated by its own anchor, so settlement order does not matter.
///
/// Everything runs on one logical thread. Construct with an
/// `Rc<RefCell<_>>` of the surface; the uploader never holds a borrow across
/// a suspension point.
pub struct ImageUploader<S> {
    surface: Rc<RefCell<S>>,
    registry: RefCell<UploadRegistry>,
    upload: Option<UploadFn>,
    preview: PreviewFn,
}

impl<S: EditorSurface + 'static> ImageUploader<S> {
    pub fn new(surface: Rc<RefCell<S>>, options: UploadOptions) -> Rc<Self> {
        if options.upload.is_none() {
            log::warn!(
                "no upload operation configured; attached images will show a preview but never finalize"
            );
        }
        let preview = options
            .preview
            .unwrap_or_else(|| Box::new(|file| Box::pin(async move { preview::data_url(&file) })));
        Rc::new(Self {
            surface,
            registry: RefCell::new(UploadRegistry::new()),
            upload: options.upload,
            preview,
        })
    }

    /// Attach one file at the given content-unit offset.
    ///
    /// Resolves once the upload has settled and the document has been
    /// patched. The local preview read and the upload run concurrently: the
    /// read result inserts the placeholder, the upload result reconciles it.
    /// If the upload settles before the read finishes, the placeholder is
    /// never inserted at all.
    pub async fn attach(&self, file: SourceFile, at: usize) {
        self.surface.borrow_mut().focus();

        let Some(upload) = &self.upload else {
            // Feature is inert without an upload operation: show the local
            // preview, which nothing will ever resolve.
            if let Ok(visual) = (self.preview)(file.clone()).await {
                self.place(&file, at, visual);
            }
            return;
        };

        let settled = Cell::new(false);
        let upload_fut = upload(file.clone());

        let place_half = async {
            match (self.preview)(file.clone()).await {
                Ok(visual) if !settled.get() => Some(self.place(&file, at, visual)),
                Ok(_) => None, // upload already settled; nothing left to anchor
                Err(err) => {
                    log::debug!("no preview for attached file: {err}");
                    None
                }
            }
        };
        let upload_half = async {
            let outcome = upload_fut.await;
            settled.set(true);
            outcome
        };

        let (task, outcome) = tokio::join!(place_half, upload_half);

        match outcome {
            Ok(url) => {
                if let Some(id) = task {
                    if let Err(err) = self.resolve_success(id, &url) {
                        log::debug!("upload finished but placeholder was gone: {err}");
                    }
                }
            }
            Err(err) => {
                log::warn!("image upload failed: {err:#}");
                if let Some(id) = task {
                    if let Err(err) = self.resolve_failure(id) {
                        log::debug!("placeholder already gone after failed upload: {err}");
                    }
                }
            }
        }
    }

    /// Fire-and-forget variant of [`attach`](Self::attach) for hosts driving
    /// a tokio `LocalSet`.
    pub fn spawn_attach(
        self: &Rc<Self>,
        file: SourceFile,
        at: usize,
    ) -> tokio::task::JoinHandle<()> {
        let this = Rc::clone(self);
        tokio::task::spawn_local(async move { this.attach(file, at).await })
    }

    /// Success path: swap the task's placeholder for the final reference.
    /// Stale ids and lost anchors are recoverable no-ops.
    pub fn resolve_success(&self, id: TaskId, url: &str) -> Result<(), ReconcileError> {
        let mut surface = self.surface.borrow_mut();
        let mut registry = self.registry.borrow_mut();
        reconcile::apply_success(&mut *surface, &mut registry, id, url)
    }

    /// Failure path: excise the task's placeholder.
    pub fn resolve_failure(&self, id: TaskId) -> Result<(), ReconcileError> {
        let mut surface = self.surface.borrow_mut();
        let mut registry = self.registry.borrow_mut();
        reconcile::apply_failure(&mut *surface, &mut registry, id)
    }

    /// Number of uploads still awaiting settlement.
    pub fn pending(&self) -> usize {
        self.registry.borrow().len()
    }

    fn place(&self, file: &SourceFile, at: usize, visual: String) -> TaskId {
        let mut surface = self.surface.borrow_mut();
        let mut registry = self.registry.borrow_mut();
        reconcile::insert_placeholder(&mut *surface, &mut registry, file.clone(), at, visual)
    }
}
