//! Reading `<input type="file">` selections into uploadable images.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use payloads::requests::ImageUpload;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, HtmlInputElement};

/// Files currently picked in `input`.
pub fn picked_files(input: &HtmlInputElement) -> Vec<File> {
    let Some(list) = input.files() else {
        return Vec::new();
    };
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}

pub async fn read_image(file: &File) -> Result<ImageUpload, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Could not read {}: {e:?}", file.name()))?;
    Ok(ImageUpload {
        file_name: file.name(),
        mime_type: file.type_(),
        bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
    })
}

/// Read every file, skipping (and logging) those the browser refuses.
pub async fn read_images(files: Vec<File>) -> Vec<ImageUpload> {
    let mut images = Vec::with_capacity(files.len());
    for file in &files {
        match read_image(file).await {
            Ok(image) => images.push(image),
            Err(e) => tracing::warn!("{e}"),
        }
    }
    images
}

/// A `data:` URL for previewing an image before it is uploaded.
pub fn preview_url(image: &ImageUpload) -> String {
    format!(
        "data:{};base64,{}",
        image.mime_type,
        STANDARD.encode(&image.bytes)
    )
}
