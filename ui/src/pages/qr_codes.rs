use payloads::forms::QrSelection;
use payloads::requests::{ImageUpload, QR_MAX_FILES};
use payloads::responses::QrCode;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::{
    ConfirmDialog, PageHeader, primary_button, row_action, secondary_button,
};
use crate::contexts::toast::use_toast;
use crate::get_api_client;
use crate::hooks::{use_fetch, use_title};
use crate::utils::files::{picked_files, preview_url, read_image, read_images};
use crate::utils::format_timestamp;

#[function_component]
pub fn QrCodesPage() -> Html {
    use_title("QR Codes");
    let toast = use_toast();
    let qrs = use_fetch(Some(()), |_| async {
        get_api_client().list_qrs().await
    });
    let selection = use_state(QrSelection::default);
    let is_uploading = use_state(|| false);
    let deleting = use_state(|| None::<QrCode>);
    let picker = use_node_ref();

    let on_pick = {
        let selection = selection.clone();
        let toast = toast.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let files = picked_files(&input);
            // Picking the same file twice must fire change again.
            input.set_value("");
            let selection = selection.clone();
            let toast = toast.clone();
            yew::platform::spawn_local(async move {
                let images = read_images(files).await;
                let mut next = (*selection).clone();
                for notice in next.add(images) {
                    toast.error(notice.to_string());
                }
                selection.set(next);
            });
        })
    };

    let on_upload = {
        let selection = selection.clone();
        let toast = toast.clone();
        let is_uploading = is_uploading.clone();
        let refetch = qrs.refetch.clone();
        Callback::from(move |_: MouseEvent| {
            if selection.is_empty() {
                return toast.error("Select at least one image");
            }
            let files = selection.files().to_vec();
            let selection = selection.clone();
            let toast = toast.clone();
            let is_uploading = is_uploading.clone();
            let refetch = refetch.clone();
            yew::platform::spawn_local(async move {
                is_uploading.set(true);
                match get_api_client().upload_qrs(&files).await {
                    Ok(message) => {
                        toast.success(message);
                        selection.set(QrSelection::default());
                        refetch.emit(());
                    }
                    Err(e) => toast.error(e.to_string()),
                }
                is_uploading.set(false);
            });
        })
    };

    let on_clear = {
        let selection = selection.clone();
        Callback::from(move |_: MouseEvent| {
            selection.set(QrSelection::default())
        })
    };

    let on_browse = {
        let picker = picker.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(input) = picker.cast::<HtmlInputElement>() {
                input.click();
            }
        })
    };

    let previews = selection
        .files()
        .iter()
        .enumerate()
        .map(|(index, image)| {
            let on_remove = {
                let selection = selection.clone();
                Callback::from(move |_: MouseEvent| {
                    let mut next = (*selection).clone();
                    next.remove(index);
                    selection.set(next);
                })
            };
            html! {
                <SelectedPreview
                    key={format!("{index}-{}", image.file_name)}
                    image={image.clone()}
                    {on_remove}
                />
            }
        })
        .collect::<Html>();

    let on_delete = {
        let deleting = deleting.clone();
        let toast = toast.clone();
        let refetch = qrs.refetch.clone();
        Callback::from(move |_| {
            let Some(qr) = (*deleting).clone() else {
                return;
            };
            let deleting = deleting.clone();
            let toast = toast.clone();
            let refetch = refetch.clone();
            yew::platform::spawn_local(async move {
                match get_api_client().delete_qr(&qr.id).await {
                    Ok(message) => {
                        toast.success(message);
                        refetch.emit(());
                    }
                    Err(e) => toast.error(e.to_string()),
                }
                deleting.set(None);
            });
        })
    };
    let close_delete = {
        let deleting = deleting.clone();
        Callback::from(move |_| deleting.set(None))
    };

    let gallery = {
        let deleting = deleting.clone();
        let refetch = qrs.refetch.clone();
        qrs.render("QR codes", move |codes, is_loading| {
            if codes.is_empty() {
                return html! {
                    <p class="text-sm text-neutral-500">
                        {"No QR codes uploaded yet"}
                    </p>
                };
            }
            html! {
                <div class={classes!(
                    "grid", "gap-4", "sm:grid-cols-2", "lg:grid-cols-4",
                    is_loading.then_some("opacity-60"),
                )}>
                    {for codes.iter().map(|qr| {
                        let on_delete = {
                            let deleting = deleting.clone();
                            let qr = qr.clone();
                            Callback::from(move |_| {
                                deleting.set(Some(qr.clone()))
                            })
                        };
                        html! {
                            <QrCard
                                key={qr.id.to_string()}
                                qr={qr.clone()}
                                on_replaced={refetch.clone()}
                                {on_delete}
                            />
                        }
                    })}
                </div>
            }
        })
    };

    html! {
        <div class="space-y-8">
            <PageHeader title="QR Codes" />
            <section class="bg-white rounded-lg shadow-sm border border-neutral-200 p-6 space-y-4">
                <p class="text-sm text-neutral-600">
                    {format!(
                        "{} of {QR_MAX_FILES} images selected",
                        selection.len()
                    )}
                </p>
                <input
                    ref={picker}
                    type="file"
                    accept="image/*"
                    multiple=true
                    onchange={on_pick}
                    class="hidden"
                />
                <div class="flex flex-wrap gap-3">
                    <button
                        type="button"
                        onclick={on_browse}
                        disabled={selection.is_full()}
                        class={secondary_button()}
                    >
                        {"Choose images"}
                    </button>
                    <button
                        type="button"
                        onclick={on_upload}
                        disabled={selection.is_empty() || *is_uploading}
                        class={primary_button()}
                    >
                        {if *is_uploading { "Uploading..." } else { "Upload" }}
                    </button>
                    if !selection.is_empty() {
                        <button type="button" onclick={on_clear} class={secondary_button()}>
                            {"Clear"}
                        </button>
                    }
                </div>
                if !selection.is_empty() {
                    <div class="grid gap-3 grid-cols-2 sm:grid-cols-4">
                        {previews}
                    </div>
                }
            </section>
            <section>
                <h2 class="text-lg font-semibold text-neutral-900 mb-4">
                    {"Uploaded QR codes"}
                </h2>
                {gallery}
            </section>
            if let Some(qr) = &*deleting {
                <ConfirmDialog
                    title="Delete QR code"
                    message={format!("{} will be removed.", qr.filename)}
                    on_confirm={on_delete}
                    on_close={close_delete}
                />
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct SelectedPreviewProps {
    image: ImageUpload,
    on_remove: Callback<MouseEvent>,
}

#[function_component]
fn SelectedPreview(props: &SelectedPreviewProps) -> Html {
    let url = use_memo(props.image.clone(), preview_url);

    html! {
        <figure class="relative border border-neutral-200 rounded-md p-2">
            <img src={(*url).clone()} alt={props.image.file_name.clone()} class="h-32 w-full object-contain" />
            <figcaption class="mt-1 text-xs text-neutral-600 truncate">
                {&props.image.file_name}
            </figcaption>
            <button
                type="button"
                onclick={props.on_remove.clone()}
                class="absolute top-1 right-1 text-xs text-red-600 bg-white rounded px-1"
            >
                {"×"}
            </button>
        </figure>
    }
}

#[derive(Properties, PartialEq)]
struct QrCardProps {
    qr: QrCode,
    on_replaced: Callback<()>,
    on_delete: Callback<()>,
}

#[function_component]
fn QrCard(props: &QrCardProps) -> Html {
    let toast = use_toast();
    let picker = use_node_ref();
    let is_replacing = use_state(|| false);

    let on_pick = {
        let qr_id = props.qr.id.clone();
        let toast = toast.clone();
        let on_replaced = props.on_replaced.clone();
        let is_replacing = is_replacing.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Some(file) = picked_files(&input).into_iter().next() else {
                return;
            };
            input.set_value("");
            let qr_id = qr_id.clone();
            let toast = toast.clone();
            let on_replaced = on_replaced.clone();
            let is_replacing = is_replacing.clone();
            yew::platform::spawn_local(async move {
                let image = match read_image(&file).await {
                    Ok(image) if image.is_image() => image,
                    Ok(image) => {
                        return toast.error(format!(
                            "{} is not an image",
                            image.file_name
                        ));
                    }
                    Err(e) => return toast.error(e),
                };
                is_replacing.set(true);
                match get_api_client().replace_qr(&qr_id, &image).await {
                    Ok(_) => {
                        toast.success("QR code replaced");
                        on_replaced.emit(());
                    }
                    Err(e) => toast.error(e.to_string()),
                }
                is_replacing.set(false);
            });
        })
    };

    let on_replace = {
        let picker = picker.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(input) = picker.cast::<HtmlInputElement>() {
                input.click();
            }
        })
    };
    let on_delete = props.on_delete.reform(|_: MouseEvent| ());
    let qr = &props.qr;

    html! {
        <figure class="bg-white border border-neutral-200 rounded-lg p-3 space-y-2">
            <img src={qr.url.clone()} alt={qr.filename.clone()} class="h-40 w-full object-contain" />
            <figcaption class="text-xs text-neutral-600">
                <div class="truncate font-medium">{&qr.filename}</div>
                <div>{format_timestamp(qr.created_at)}</div>
            </figcaption>
            <input
                ref={picker}
                type="file"
                accept="image/*"
                onchange={on_pick}
                class="hidden"
            />
            <div class="flex justify-between">
                <button
                    type="button"
                    onclick={on_replace}
                    disabled={*is_replacing}
                    class={row_action(false)}
                >
                    {if *is_replacing { "Replacing..." } else { "Replace" }}
                </button>
                <button type="button" onclick={on_delete} class={row_action(true)}>
                    {"Delete"}
                </button>
            </div>
        </figure>
    }
}
