use crate::constant::*;

/// Image-generation URL for `title`. The endpoint renders the image lazily
/// when the URL is fetched, so nothing is requested here.
pub fn image_url(title: &str, seed: i64) -> String {
    let prompt = format!("{title}, {IMAGE_STYLE}");
    format!(
        "{IMAGE_ENDPOINT}/{}?width={IMAGE_WIDTH}&height={IMAGE_HEIGHT}&nologo=true&seed={seed}&model={IMAGE_MODEL}",
        urlencoding::encode(&prompt)
    )
}

/// Centered `<img>` fragment seeded with the current Unix time.
pub fn image_html(title: &str) -> String {
    let seed = chrono::Utc::now().timestamp();
    format!(
        r#"<div style="text-align:center; margin-bottom:20px;"><img src="{}" style="width:100%; max-width:800px; border-radius:12px;"></div>"#,
        image_url(title, seed)
    )
}
