use yew::prelude::*;

const APP_NAME: &str = "Admin Panel";

/// Sets the document title to "{title} | Admin Panel".
#[hook]
pub fn use_title(title: &str) {
    let title = format!("{title} | {APP_NAME}");
    use_effect_with(title, |title| {
        if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
            doc.set_title(title);
        }
    });
}
