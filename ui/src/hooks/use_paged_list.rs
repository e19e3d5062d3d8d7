use payloads::paging::Pager;
use payloads::{ClientError, PageRequest, PagedResult};
use std::future::Future;
use yew::prelude::*;

use super::{FetchHookReturn, use_fetch};

/// One server-paginated collection: its page cursor and its fetch state.
pub struct PagedList<T> {
    pub page: u32,
    pub page_size: u32,
    pub set_page: Callback<u32>,
    pub fetch: FetchHookReturn<PagedResult<T>>,
    totals: Option<(u64, u32)>,
}

impl<T: Clone> PagedList<T> {
    pub fn rows(&self) -> Vec<T> {
        self.fetch
            .data
            .as_ref()
            .map(|data| data.items.clone())
            .unwrap_or_default()
    }

    /// Counts from the latest answer for this collection. They survive
    /// page changes so the controls stay put while the next page loads.
    pub fn total_items(&self) -> Option<u64> {
        self.totals.map(|(total, _)| total)
    }

    pub fn total_pages(&self) -> u32 {
        self.totals.map(|(_, pages)| pages).unwrap_or(1)
    }

    pub fn pager(&self) -> Pager {
        Pager::new(
            self.page,
            self.total_pages(),
            self.total_items(),
            self.page_size,
        )
    }

    pub fn is_loading(&self) -> bool {
        self.fetch.is_loading
    }

    pub fn refetch(&self) -> Callback<()> {
        self.fetch.refetch.clone()
    }
}

/// Page through the collection `base` describes. `base` carries the page
/// size and filters; its own page number is ignored. Changing `base` starts
/// over at page one, and a page left empty by a deletion falls back to the
/// new last page.
#[hook]
pub fn use_paged_list<T, F, Fut>(
    base: Option<PageRequest>,
    fetch_fn: F,
) -> PagedList<T>
where
    T: Clone + 'static,
    F: Fn(PageRequest) -> Fut + 'static,
    Fut: Future<Output = Result<PagedResult<T>, ClientError>> + 'static,
{
    let cursor = use_state(|| (base.clone(), 1u32));
    let page = if cursor.0 == base { cursor.1 } else { 1 };
    let page_size = base
        .as_ref()
        .map(PageRequest::limit)
        .unwrap_or(payloads::DEFAULT_PAGE_SIZE);

    let request = base.as_ref().map(|base| base.at_page(page));
    let fetch = use_fetch(request, fetch_fn);

    // The first render after `base` changes still shows the old answer.
    let rendered_base = use_mut_ref(|| base.clone());
    let base_changed = *rendered_base.borrow() != base;
    *rendered_base.borrow_mut() = base.clone();

    let known = use_mut_ref(|| None::<(Option<PageRequest>, u64, u32)>);
    if let Some(data) = fetch.data.as_ref().filter(|_| !base_changed) {
        *known.borrow_mut() =
            Some((base.clone(), data.total, data.total_pages));
    }
    let totals = known
        .borrow()
        .as_ref()
        .filter(|(known_base, ..)| *known_base == base)
        .map(|(_, total, pages)| (*total, *pages));

    let set_page = {
        let cursor = cursor.clone();
        let base = base.clone();
        Callback::from(move |page: u32| cursor.set((base.clone(), page)))
    };

    let overflow = fetch
        .data
        .as_ref()
        .filter(|_| !base_changed)
        .map(|data| data.total_pages.max(1))
        .filter(|last| page > *last);
    {
        let set_page = set_page.clone();
        use_effect_with(overflow, move |overflow| {
            if let Some(last) = *overflow {
                tracing::debug!("Page {page} is gone, showing {last}");
                set_page.emit(last);
            }
        });
    }

    PagedList {
        page,
        page_size,
        set_page,
        fetch,
        totals,
    }
}
