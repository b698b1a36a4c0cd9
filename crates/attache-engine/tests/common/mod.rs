#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use attache_engine::{Document, PreviewError, SourceFile, UploadOptions};
use tokio::sync::oneshot;

pub fn png_file() -> SourceFile {
    SourceFile::new("image/png", vec![0x89u8, b'P', b'N', b'G', 1, 2, 3])
}

pub fn shared_doc(text: &str) -> Rc<RefCell<Document>> {
    Rc::new(RefCell::new(Document::from_text(text)))
}

/// Upload operation whose settlement the test body controls. Each attach
/// consumes one gate, in attach order.
pub fn gated_upload(
    slots: usize,
) -> (UploadOptions, Vec<oneshot::Sender<anyhow::Result<String>>>) {
    let mut senders = Vec::with_capacity(slots);
    let mut receivers = VecDeque::with_capacity(slots);
    for _ in 0..slots {
        let (tx, rx) = oneshot::channel();
        senders.push(tx);
        receivers.push_back(rx);
    }
    let receivers = RefCell::new(receivers);
    let options = UploadOptions::new(move |_file| {
        let rx = receivers
            .borrow_mut()
            .pop_front()
            .expect("more uploads started than gates prepared");
        Box::pin(async move { rx.await.expect("upload gate dropped") })
    });
    (options, senders)
}

pub fn instant_upload(url: &str) -> UploadOptions {
    let url = url.to_string();
    UploadOptions::new(move |_file| {
        let url = url.clone();
        Box::pin(async move { Ok(url) })
    })
}

pub fn failing_upload(message: &'static str) -> UploadOptions {
    UploadOptions::new(move |_file| Box::pin(async move { Err(anyhow::anyhow!(message)) }))
}

/// Replace the built-in preview with one the test body releases by hand.
pub fn gate_preview(
    options: UploadOptions,
) -> (
    UploadOptions,
    oneshot::Sender<Result<String, PreviewError>>,
) {
    let (tx, rx) = oneshot::channel();
    let rx = RefCell::new(Some(rx));
    let options = options.with_preview(move |_file| {
        let rx = rx
            .borrow_mut()
            .take()
            .expect("gated preview is single-use");
        Box::pin(async move { rx.await.expect("preview gate dropped") })
    });
    (options, tx)
}

/// Let spawned local tasks run until they block on their gates.
pub async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}
