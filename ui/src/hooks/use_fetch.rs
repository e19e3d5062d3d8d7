use payloads::ClientError;
use payloads::fetch::{FetchSnapshot, RequestSequence};
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use yew::prelude::*;

/// Generic fetch hook return type
pub struct FetchHookReturn<T> {
    pub data: Option<T>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub refetch: Callback<()>,
}

impl<T> FetchHookReturn<T> {
    pub fn is_initial_loading(&self) -> bool {
        self.is_loading && self.data.is_none()
    }

    /// Render the data if there is any, otherwise a loading or error
    /// message mentioning `context`.
    pub fn render<F>(&self, context: &str, render_fn: F) -> Html
    where
        F: Fn(&T, bool) -> Html,
    {
        match (&self.data, &self.error) {
            (Some(data), _) => render_fn(data, self.is_loading),
            (None, Some(error)) => html! {
                <div class="p-4 rounded-md bg-red-50 border border-red-200">
                    <p class="text-sm text-red-700">
                        {format!("Error loading {context}: {error}")}
                    </p>
                </div>
            },
            (None, None) => html! {
                <div class="text-center py-12">
                    <p class="text-neutral-600">
                        {format!("Loading {context}...")}
                    </p>
                </div>
            },
        }
    }
}

struct FetchCell<T>(FetchSnapshot<T>);

enum FetchAction<T> {
    Idle,
    Start,
    Restart,
    Settle(FetchSnapshot<T>),
}

impl<T: Clone> Reducible for FetchCell<T> {
    type Action = FetchAction<T>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = match action {
            FetchAction::Idle => FetchSnapshot::idle(),
            FetchAction::Start => FetchSnapshot::pending(),
            FetchAction::Restart => self.0.clone().refetching(),
            FetchAction::Settle(snapshot) => snapshot,
        };
        Rc::new(Self(next))
    }
}

/// Fetch whatever `request` identifies, and again whenever it changes.
///
/// `None` means there is nothing to fetch yet; the hook stays idle and any
/// in-flight response is discarded. A new request key clears the old data;
/// `refetch` keeps it on screen until the fresh answer arrives. Responses
/// are only applied if no later request was issued in the meantime.
#[hook]
pub fn use_fetch<R, T, F, Fut>(
    request: Option<R>,
    fetch_fn: F,
) -> FetchHookReturn<T>
where
    R: PartialEq + Clone + 'static,
    T: Clone + 'static,
    F: Fn(R) -> Fut + 'static,
    Fut: Future<Output = Result<T, ClientError>> + 'static,
{
    let state = use_reducer(|| FetchCell(FetchSnapshot::idle()));
    let sequence = use_mut_ref(RequestSequence::default);

    let run = {
        let state = state.dispatcher();
        let sequence = sequence.clone();
        let fetch_fn = Rc::new(fetch_fn);

        use_callback(request.clone(), move |keep_data: bool, request| {
            let Some(request) = request.clone() else {
                sequence.borrow_mut().invalidate();
                state.dispatch(FetchAction::Idle);
                return;
            };
            let ticket = sequence.borrow_mut().issue();
            state.dispatch(if keep_data {
                FetchAction::Restart
            } else {
                FetchAction::Start
            });

            let state = state.clone();
            let sequence: Rc<RefCell<RequestSequence>> = sequence.clone();
            let fetch_fn = fetch_fn.clone();
            yew::platform::spawn_local(async move {
                let result = fetch_fn(request).await;
                if let Err(e) = &result {
                    tracing::warn!("Fetch failed: {e}");
                }
                let snapshot = FetchSnapshot::settle(result);
                if let Some(snapshot) =
                    sequence.borrow().accept(ticket, snapshot)
                {
                    state.dispatch(FetchAction::Settle(snapshot));
                }
            });
        })
    };

    {
        let run = run.clone();
        use_effect_with(request, move |_| run.emit(false));
    }

    let refetch = Callback::from(move |_| run.emit(true));
    let FetchSnapshot {
        data,
        loading,
        error,
    } = state.0.clone();

    FetchHookReturn {
        data,
        is_loading: loading,
        error,
        refetch,
    }
}
