use payloads::paging::{Pager, TableBody};
use yew::prelude::*;

use super::PaginationControls;

#[derive(Properties, PartialEq)]
pub struct PaginatedTableProps<T: PartialEq + Clone + 'static> {
    /// Rows of the current page only.
    pub rows: Vec<T>,
    /// The `<tr>` of column headings.
    pub header: Html,
    /// Renders one row given the row and its zero-based position across
    /// the whole collection.
    pub render_row: Callback<(T, u64), Html>,
    #[prop_or_else(|| AttrValue::from("No records found"))]
    pub empty_message: AttrValue,
    pub current_page: u32,
    pub total_pages: u32,
    /// `None` until the first page has arrived.
    pub total_items: Option<u64>,
    pub page_size: u32,
    pub on_page_change: Callback<u32>,
    #[prop_or_default]
    pub loading: bool,
    /// Column count, for the single-cell loading and empty rows.
    pub columns: usize,
}

/// A table over one page of a server-paginated collection.
#[function_component]
pub fn PaginatedTable<T>(props: &PaginatedTableProps<T>) -> Html
where
    T: PartialEq + Clone + 'static,
{
    let pager = Pager::new(
        props.current_page,
        props.total_pages,
        props.total_items,
        props.page_size,
    );
    let colspan = props.columns.max(1).to_string();

    let kind = pager.body(props.loading, props.rows.len());
    let body = match kind {
        TableBody::Loading => html! {
            <tr>
                <td colspan={colspan} class="px-4 py-8 text-center text-sm text-neutral-500">
                    {"Loading..."}
                </td>
            </tr>
        },
        TableBody::Empty => html! {
            <tr>
                <td colspan={colspan} class="px-4 py-8 text-center text-sm text-neutral-500">
                    {&props.empty_message}
                </td>
            </tr>
        },
        TableBody::Rows => props
            .rows
            .iter()
            .enumerate()
            .map(|(local, row)| {
                props
                    .render_row
                    .emit((row.clone(), pager.global_index(local)))
            })
            .collect::<Html>(),
    };

    html! {
        <div>
            <div class="overflow-x-auto rounded-lg border border-neutral-200">
                <table class="min-w-full divide-y divide-neutral-200 text-sm">
                    if !matches!(kind, TableBody::Loading) {
                        <thead class="bg-neutral-50 text-left text-xs font-medium uppercase tracking-wider text-neutral-500">
                            {props.header.clone()}
                        </thead>
                    }
                    <tbody class="divide-y divide-neutral-200 bg-white">
                        {body}
                    </tbody>
                </table>
            </div>
            if pager.shows_controls() {
                <PaginationControls
                    pager={pager}
                    rows={props.rows.len()}
                    on_page_change={props.on_page_change.clone()}
                />
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yew::LocalServerRenderer;

    fn props(
        rows: Vec<u32>,
        current_page: u32,
        total_items: Option<u64>,
        loading: bool,
    ) -> PaginatedTableProps<u32> {
        let page_size = 10;
        let total_pages = total_items
            .map(|n| n.div_ceil(u64::from(page_size)).max(1) as u32)
            .unwrap_or(1);
        PaginatedTableProps {
            rows,
            header: html! { <tr><th>{"Phone"}</th></tr> },
            render_row: Callback::from(|(n, index): (u32, u64)| {
                html! { <tr><td>{format!("row {n} at {index}")}</td></tr> }
            }),
            empty_message: AttrValue::from("Nothing here"),
            current_page,
            total_pages,
            total_items,
            page_size,
            on_page_change: Callback::noop(),
            loading,
            columns: 4,
        }
    }

    async fn render(props: PaginatedTableProps<u32>) -> String {
        let renderer =
            LocalServerRenderer::<PaginatedTable<u32>>::with_props(props)
                .hydratable(false);
        tokio::task::LocalSet::new()
            .run_until(renderer.render())
            .await
    }

    /// The opening `<button ...>` tag of the button labelled `label`.
    fn button_tag<'a>(html: &'a str, label: &str) -> &'a str {
        let end = html.find(label).expect("button label rendered");
        let start = html[..end].rfind("<button").expect("button tag");
        &html[start..end]
    }

    #[tokio::test]
    async fn loading_replaces_header_and_rows() {
        let html = render(props(vec![1, 2], 2, Some(25), true)).await;

        assert!(html.contains("Loading..."));
        assert!(!html.contains("<thead"));
        assert!(!html.contains("Phone"));
        assert!(!html.contains("row 1"));
        assert!(html.contains(r#"colspan="4""#));
    }

    #[tokio::test]
    async fn empty_collection_spans_all_columns_without_controls() {
        // an empty collection wins over a loading flag
        let html = render(props(Vec::new(), 1, Some(0), true)).await;

        assert!(html.contains(r#"colspan="4""#));
        assert!(html.contains("Nothing here"));
        assert!(!html.contains("Loading..."));
        assert!(!html.contains("Previous"));
        assert!(!html.contains("Next"));
    }

    #[tokio::test]
    async fn one_page_of_rows_has_no_controls() {
        let rows = (0..10).collect();
        let html = render(props(rows, 1, Some(10), false)).await;

        assert!(html.contains("<thead"));
        assert!(html.contains("Phone"));
        assert!(html.contains("row 9 at 9"));
        assert!(!html.contains("Previous"));
        assert!(!html.contains("Showing"));
    }

    #[tokio::test]
    async fn rows_carry_their_global_index() {
        let html = render(props(vec![7, 8], 2, Some(12), false)).await;

        assert!(html.contains("row 7 at 10"));
        assert!(html.contains("row 8 at 11"));
        assert!(html.contains("Showing 11 to 12 of 12"));
        assert!(html.contains("Page 2 of 2"));
    }

    #[tokio::test]
    async fn edge_pages_disable_their_buttons() {
        let first = render(props(vec![1], 1, Some(25), false)).await;
        assert!(button_tag(&first, "Previous").contains("disabled"));
        assert!(!button_tag(&first, "Next").contains("disabled"));

        let middle = render(props(vec![1], 2, Some(25), false)).await;
        assert!(!button_tag(&middle, "Previous").contains("disabled"));
        assert!(!button_tag(&middle, "Next").contains("disabled"));

        let last = render(props(vec![1], 3, Some(25), false)).await;
        assert!(!button_tag(&last, "Previous").contains("disabled"));
        assert!(button_tag(&last, "Next").contains("disabled"));
    }
}
