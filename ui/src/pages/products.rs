use payloads::forms::ProductForm;
use payloads::requests::{DEFAULT_CATEGORIES, DEFAULT_PURCHASE_TYPE};
use payloads::responses::{Badge, CycleType, Product};
use payloads::{
    ClientError, DEFAULT_PAGE_SIZE, PageRequest, PagedResult, ProductId,
};
use rust_decimal::Decimal;
use std::str::FromStr;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::{
    ConfirmDialog, Modal, PageHeader, PaginatedTable, SelectField, TextField,
    input_class, primary_button, row_action, secondary_button,
};
use crate::contexts::toast::use_toast;
use crate::get_api_client;
use crate::hooks::{use_paged_list, use_title};
use crate::utils::files::{picked_files, preview_url, read_image};
use crate::utils::{field_setter, format_amount};

const NEW_CATEGORY: &str = "addNewCategory";
const PURCHASE_TYPES: [&str; 2] = [DEFAULT_PURCHASE_TYPE, "All time"];

#[function_component]
pub fn ProductsPage() -> Html {
    use_title("Manage Products");
    let toast = use_toast();
    let form = use_state(ProductForm::default);
    let editing = use_state(|| None::<ProductId>);
    let deleting = use_state(|| None::<Product>);
    let explaining = use_state(|| None::<Product>);
    let adding_category = use_state(|| false);
    let is_saving = use_state(|| false);
    let file_input = use_node_ref();

    let list = use_paged_list(
        Some(PageRequest::first(DEFAULT_PAGE_SIZE)),
        |request: PageRequest| async move {
            let products = get_api_client().list_products().await?;
            Ok::<_, ClientError>(PagedResult::paginate_locally(
                products, &request,
            ))
        },
    );

    let reset_form = {
        let form = form.clone();
        let editing = editing.clone();
        let adding_category = adding_category.clone();
        let file_input = file_input.clone();
        Callback::from(move |_: ()| {
            form.set(ProductForm::default());
            editing.set(None);
            adding_category.set(false);
            if let Some(input) = file_input.cast::<HtmlInputElement>() {
                input.set_value("");
            }
        })
    };

    let on_submit = {
        let form = form.clone();
        let editing = editing.clone();
        let toast = toast.clone();
        let is_saving = is_saving.clone();
        let reset_form = reset_form.clone();
        let refetch = list.refetch();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let details = match form.validate() {
                Ok(details) => details,
                Err(e) => return toast.error(e.to_string()),
            };
            let editing = (*editing).clone();
            let toast = toast.clone();
            let is_saving = is_saving.clone();
            let reset_form = reset_form.clone();
            let refetch = refetch.clone();
            yew::platform::spawn_local(async move {
                is_saving.set(true);
                let client = get_api_client();
                let result = match &editing {
                    Some(id) => client.update_product(id, &details).await,
                    None => client.create_product(&details).await,
                };
                match result {
                    Ok(product) => {
                        let verb = if editing.is_some() {
                            "updated"
                        } else {
                            "added"
                        };
                        toast.success(format!(
                            "{} {verb}",
                            product.product_name
                        ));
                        reset_form.emit(());
                        refetch.emit(());
                    }
                    Err(e) => toast.error(e.to_string()),
                }
                is_saving.set(false);
            });
        })
    };

    let on_image = {
        let form = form.clone();
        let toast = toast.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Some(file) = picked_files(&input).into_iter().next() else {
                return;
            };
            let form = form.clone();
            let toast = toast.clone();
            yew::platform::spawn_local(async move {
                match read_image(&file).await {
                    Ok(image) if image.is_image() => {
                        form.set(ProductForm {
                            image: Some(image),
                            ..(*form).clone()
                        });
                    }
                    Ok(image) => toast
                        .error(format!("{} is not an image", image.file_name)),
                    Err(e) => toast.error(e),
                }
            });
        })
    };

    let on_category = {
        let form = form.clone();
        let adding_category = adding_category.clone();
        Callback::from(move |value: String| {
            if value == NEW_CATEGORY {
                adding_category.set(true);
                form.set(ProductForm {
                    category_name: String::new(),
                    ..(*form).clone()
                });
            } else {
                adding_category.set(false);
                form.set(ProductForm {
                    category_name: value,
                    ..(*form).clone()
                });
            }
        })
    };

    let on_cycle_type = field_setter(&form, |f, v| {
        f.cycle_type = CycleType::parse(&v).unwrap_or_default();
    });
    let on_badge = field_setter(&form, |f, v| {
        f.badge = Badge::parse(&v).unwrap_or_default();
    });
    let on_daily_claim = field_setter(&form, |f, v| {
        f.is_daily_claim = v == "true";
    });

    let on_add_line = {
        let form = form.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*form).clone();
            next.add_explanation_line();
            form.set(next);
        })
    };

    let explanation_lines = form
        .explanation
        .iter()
        .enumerate()
        .map(|(index, line)| {
            let on_input = {
                let form = form.clone();
                Callback::from(move |e: InputEvent| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    let mut next = (*form).clone();
                    if let Some(line) = next.explanation.get_mut(index) {
                        *line = input.value();
                    }
                    form.set(next);
                })
            };
            let on_remove = {
                let form = form.clone();
                Callback::from(move |_: MouseEvent| {
                    let mut next = (*form).clone();
                    next.remove_explanation_line(index);
                    form.set(next);
                })
            };
            html! {
                <div key={index} class="flex items-center gap-2">
                    <input
                        type="text"
                        value={line.clone()}
                        oninput={on_input}
                        placeholder={format!("Line {}", index + 1)}
                        class={input_class()}
                    />
                    <button type="button" onclick={on_remove} class={row_action(true)}>
                        {"Remove"}
                    </button>
                </div>
            }
        })
        .collect::<Html>();

    let categories = {
        let mut names: Vec<String> =
            DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect();
        for product in list.rows() {
            if !product.category_name.is_empty()
                && !names.contains(&product.category_name)
            {
                names.push(product.category_name);
            }
        }
        let mut options: Vec<(AttrValue, AttrValue)> = names
            .into_iter()
            .map(|name| (AttrValue::from(name.clone()), AttrValue::from(name)))
            .collect();
        options.push((NEW_CATEGORY.into(), "Add New Category".into()));
        options
    };
    let selected_category = if *adding_category {
        AttrValue::from(NEW_CATEGORY)
    } else {
        AttrValue::from(form.category_name.clone())
    };

    let cycle_options = [CycleType::Day, CycleType::Hour]
        .into_iter()
        .map(|t| {
            let label = match t {
                CycleType::Day => "Day",
                CycleType::Hour => "Hour",
            };
            (AttrValue::from(t.to_string()), AttrValue::from(label))
        })
        .collect::<Vec<_>>();
    let badge_options = Badge::SELECTABLE
        .into_iter()
        .map(|b| (AttrValue::from(b.to_string()), AttrValue::from(b.label())))
        .collect::<Vec<_>>();
    let purchase_options = PURCHASE_TYPES
        .into_iter()
        .map(|p| (AttrValue::from(p), AttrValue::from(p)))
        .collect::<Vec<_>>();
    let daily_claim_options = vec![
        (AttrValue::from("true"), AttrValue::from("Yes")),
        (AttrValue::from("false"), AttrValue::from("No")),
    ];

    let (rate_label, rate_value, on_rate) = match form.cycle_type {
        CycleType::Day => (
            "Daily income (Rs)",
            form.daily.clone(),
            field_setter(&form, |f, v| f.daily = v),
        ),
        CycleType::Hour => (
            "Hourly income (Rs)",
            form.hour.clone(),
            field_setter(&form, |f, v| f.hour = v),
        ),
    };
    let cycle_label = match form.cycle_type {
        CycleType::Day => "Cycle (days)",
        CycleType::Hour => "Cycle (hours)",
    };
    let total_income = total_income(&rate_value, &form.cycle_value);

    let render_row = {
        let form = form.clone();
        let editing = editing.clone();
        let deleting = deleting.clone();
        let explaining = explaining.clone();
        let adding_category = adding_category.clone();
        Callback::from(move |(product, index): (Product, u64)| {
            let on_edit = {
                let form = form.clone();
                let editing = editing.clone();
                let adding_category = adding_category.clone();
                let product = product.clone();
                Callback::from(move |_: MouseEvent| {
                    form.set(ProductForm::from_product(&product));
                    editing.set(Some(product.id.clone()));
                    adding_category.set(false);
                })
            };
            let on_delete = {
                let deleting = deleting.clone();
                let product = product.clone();
                Callback::from(move |_: MouseEvent| {
                    deleting.set(Some(product.clone()))
                })
            };
            let on_explain = {
                let explaining = explaining.clone();
                let product = product.clone();
                Callback::from(move |_: MouseEvent| {
                    explaining.set(Some(product.clone()))
                })
            };
            let (cycle_unit, rate) = match product.cycle_type {
                CycleType::Day => ("days", product.daily),
                CycleType::Hour => ("hours", product.hour),
            };
            html! {
                <tr key={product.id.to_string()}>
                    <td class="px-4 py-3 text-neutral-500">{index + 1}</td>
                    <td class="px-4 py-3">
                        if let Some(url) = &product.image_url {
                            <img src={url.clone()} alt={product.product_name.clone()} class="h-10 w-10 rounded object-cover" />
                        }
                    </td>
                    <td class="px-4 py-3 font-medium">{&product.product_name}</td>
                    <td class="px-4 py-3">{&product.category_name}</td>
                    <td class="px-4 py-3">{format_amount(product.price)}</td>
                    <td class="px-4 py-3">
                        {format!("{} {cycle_unit}", product.cycle_value)}
                    </td>
                    <td class="px-4 py-3">{format_amount(rate)}</td>
                    <td class="px-4 py-3">{product.badge.label()}</td>
                    <td class="px-4 py-3">{&product.purchase_type}</td>
                    <td class="px-4 py-3">
                        {if product.is_daily_claim { "Yes" } else { "No" }}
                    </td>
                    <td class="px-4 py-3 whitespace-nowrap">
                        <button onclick={on_explain} class={row_action(false)}>
                            {"Explanation"}
                        </button>
                        <button onclick={on_edit} class={row_action(false)}>
                            {"Edit"}
                        </button>
                        <button onclick={on_delete} class={row_action(true)}>
                            {"Delete"}
                        </button>
                    </td>
                </tr>
            }
        })
    };

    let header = html! {
        <tr>
            <th class="px-4 py-3">{"#"}</th>
            <th class="px-4 py-3">{"Image"}</th>
            <th class="px-4 py-3">{"Name"}</th>
            <th class="px-4 py-3">{"Category"}</th>
            <th class="px-4 py-3">{"Price"}</th>
            <th class="px-4 py-3">{"Cycle"}</th>
            <th class="px-4 py-3">{"Income"}</th>
            <th class="px-4 py-3">{"Badge"}</th>
            <th class="px-4 py-3">{"Purchase Type"}</th>
            <th class="px-4 py-3">{"Daily Claim"}</th>
            <th class="px-4 py-3">{"Actions"}</th>
        </tr>
    };

    let on_delete = {
        let deleting = deleting.clone();
        let toast = toast.clone();
        let refetch = list.refetch();
        Callback::from(move |_| {
            let Some(product) = (*deleting).clone() else {
                return;
            };
            let deleting = deleting.clone();
            let toast = toast.clone();
            let refetch = refetch.clone();
            yew::platform::spawn_local(async move {
                match get_api_client().delete_product(&product.id).await {
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
    let close_explanation = {
        let explaining = explaining.clone();
        Callback::from(move |_| explaining.set(None))
    };
    let on_cancel_edit = reset_form.reform(|_: MouseEvent| ());

    html! {
        <div class="space-y-8">
            <PageHeader title="Manage Products" />
            <form onsubmit={on_submit} class="bg-white rounded-lg shadow-sm border border-neutral-200 p-6 space-y-4">
                <div class="grid gap-4 sm:grid-cols-3">
                    <SelectField
                        label="Category"
                        options={categories}
                        selected={selected_category}
                        on_change={on_category}
                    />
                    if *adding_category {
                        <TextField
                            label="New category name"
                            value={form.category_name.clone()}
                            on_change={field_setter(&form, |f, v| f.category_name = v)}
                        />
                    }
                    <TextField
                        label="Product name"
                        value={form.name.clone()}
                        on_change={field_setter(&form, |f, v| f.name = v)}
                    />
                    <TextField
                        label="Price (Rs)"
                        input_type="number"
                        value={form.price.clone()}
                        on_change={field_setter(&form, |f, v| f.price = v)}
                    />
                    <SelectField
                        label="Cycle type"
                        options={cycle_options}
                        selected={form.cycle_type.to_string()}
                        on_change={on_cycle_type}
                    />
                    <TextField
                        label={cycle_label}
                        input_type="number"
                        value={form.cycle_value.clone()}
                        on_change={field_setter(&form, |f, v| f.cycle_value = v)}
                    />
                    <TextField
                        label={rate_label}
                        input_type="number"
                        value={rate_value}
                        on_change={on_rate}
                    />
                    <div class="text-sm text-neutral-600 self-end pb-2">
                        {format!("Total income: {total_income}")}
                    </div>
                    <SelectField
                        label="Badge"
                        options={badge_options}
                        selected={form.badge.to_string()}
                        on_change={on_badge}
                    />
                    <SelectField
                        label="Purchase type"
                        options={purchase_options}
                        selected={form.purchase_type.clone()}
                        on_change={field_setter(&form, |f, v| f.purchase_type = v)}
                    />
                    <SelectField
                        label="Daily claim"
                        options={daily_claim_options}
                        selected={form.is_daily_claim.to_string()}
                        on_change={on_daily_claim}
                    />
                    <label class="block">
                        <span class="block text-sm font-medium text-neutral-700 mb-1">
                            {"Image"}
                        </span>
                        <input
                            ref={file_input}
                            type="file"
                            accept="image/*"
                            onchange={on_image}
                            class="block w-full text-sm"
                        />
                    </label>
                    if let Some(image) = &form.image {
                        <img src={preview_url(image)} alt={image.file_name.clone()} class="h-20 w-20 rounded object-cover" />
                    }
                </div>
                <div class="space-y-2">
                    <span class="block text-sm font-medium text-neutral-700">
                        {"Product explanations"}
                    </span>
                    {explanation_lines}
                    <button type="button" onclick={on_add_line} class={secondary_button()}>
                        {"Add line"}
                    </button>
                </div>
                <div class="flex gap-3">
                    <button type="submit" disabled={*is_saving} class={primary_button()}>
                        {if editing.is_some() { "Update Product" } else { "Add Product" }}
                    </button>
                    if editing.is_some() {
                        <button type="button" onclick={on_cancel_edit} class={secondary_button()}>
                            {"Cancel"}
                        </button>
                    }
                </div>
            </form>
            <div>
                <h2 class="text-lg font-semibold text-neutral-900 mb-4">{"Product List"}</h2>
                if let Some(error) = &list.fetch.error {
                    <p class="mb-4 text-sm text-red-600">{error}</p>
                }
                <PaginatedTable<Product>
                    rows={list.rows()}
                    header={header}
                    render_row={render_row}
                    empty_message="No products yet"
                    current_page={list.page}
                    total_pages={list.total_pages()}
                    total_items={list.total_items()}
                    page_size={list.page_size}
                    on_page_change={list.set_page.clone()}
                    loading={list.is_loading()}
                    columns={11}
                />
            </div>
            if let Some(product) = &*deleting {
                <ConfirmDialog
                    title="Delete product"
                    message={format!("{} will be removed.", product.product_name)}
                    on_confirm={on_delete}
                    on_close={close_delete}
                />
            }
            if let Some(product) = &*explaining {
                <Modal title={product.product_name.clone()} on_close={close_explanation}>
                    if product.product_explanation.is_empty() {
                        <p class="text-sm text-neutral-500">{"No explanation lines."}</p>
                    } else {
                        <ul class="list-disc pl-5 space-y-1 text-sm">
                            {for product.product_explanation.iter().map(|line| html! {
                                <li>{line}</li>
                            })}
                        </ul>
                    }
                </Modal>
            }
        </div>
    }
}

/// Rate times cycle length, or "-" until both parse.
fn total_income(rate: &str, cycle_value: &str) -> String {
    let rate = Decimal::from_str(rate.trim()).ok();
    let cycles = Decimal::from_str(cycle_value.trim()).ok();
    match rate.zip(cycles) {
        Some((rate, cycles)) => format_amount(rate * cycles),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_income_multiplies_rate_by_cycle() {
        assert_eq!(total_income("25", "30"), "₹750.00");
        assert_eq!(total_income(" 1.5 ", "4"), "₹6.00");
        assert_eq!(total_income("", "30"), "-");
        assert_eq!(total_income("25", "soon"), "-");
    }
}
