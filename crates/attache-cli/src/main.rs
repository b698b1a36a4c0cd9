use anyhow::{Context, Result};
use attache_engine::{Document, Embed, ImageUploader, SourceFile, UploadOptions};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::{env, fs, process};
use tokio::task::LocalSet;

fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        _ => "image/png",
    }
}

/// Stand-in transport: copy the file into the temp dir and hand back a
/// `file://` URL, or reject when asked to simulate a failed upload.
fn demo_upload(image_path: PathBuf, fail: bool) -> UploadOptions {
    UploadOptions::new(move |file: SourceFile| {
        let image_path = image_path.clone();
        Box::pin(async move {
            if fail {
                anyhow::bail!("simulated upload failure");
            }
            let name = image_path
                .file_name()
                .context("image path has no file name")?;
            let dest = env::temp_dir().join(name);
            fs::write(&dest, &file.data[..])
                .with_context(|| format!("copying upload to {}", dest.display()))?;
            Ok(format!("file://{}", dest.display()))
        })
    })
}

fn render(doc: &Document) {
    println!("  text:    {:?}", doc.text());
    for (at, embed) in doc.embeds() {
        match embed {
            Embed::PendingImage { preview } => {
                let head: String = preview.chars().take(40).collect();
                println!("  embed @{at}: pending ({head}...)");
            }
            Embed::Image { src } => println!("  embed @{at}: {src}"),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let (image_path, fail) = match args.len() {
        2 => (PathBuf::from(&args[1]), false),
        3 if args[2] == "--fail" => (PathBuf::from(&args[1]), true),
        _ => {
            eprintln!("Usage: {} <image-path> [--fail]", args[0]);
            process::exit(1);
        }
    };

    let data = fs::read(&image_path)
        .with_context(|| format!("reading image {}", image_path.display()))?;
    let file = SourceFile::new(mime_for(&image_path), data);

    let surface = Rc::new(RefCell::new(Document::from_text("An attached image:\n")));
    let uploader = ImageUploader::new(surface.clone(), demo_upload(image_path, fail));

    println!("before attach:");
    render(&surface.borrow());

    let runtime = tokio::runtime::Builder::new_current_thread().build()?;
    let local = LocalSet::new();
    let at = surface.borrow().len();
    runtime.block_on(local.run_until(uploader.attach(file, at)));

    println!("after settlement:");
    render(&surface.borrow());
    println!("pending uploads: {}", uploader.pending());

    Ok(())
}
