use std::rc::Rc;
use yew::prelude::*;

/// How long a toast stays up unless dismissed.
pub const TOAST_DURATION_MS: u32 = 4000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToastType {
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub toast_type: ToastType,
}

/// Visible toasts, oldest first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToastState {
    next_id: u64,
    pub toasts: Vec<Toast>,
}

pub enum ToastAction {
    Add(ToastType, String),
    Remove(u64),
}

impl Reducible for ToastState {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ToastAction::Add(toast_type, message) => {
                next.toasts.push(Toast {
                    id: next.next_id,
                    message,
                    toast_type,
                });
                next.next_id += 1;
            }
            ToastAction::Remove(id) => {
                next.toasts.retain(|toast| toast.id != id);
            }
        }
        Rc::new(next)
    }
}

pub type ToastContext = UseReducerHandle<ToastState>;

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

#[function_component]
pub fn ToastProvider(props: &ToastProviderProps) -> Html {
    let toast_state = use_reducer(ToastState::default);

    html! {
        <ContextProvider<ToastContext> context={toast_state}>
            {props.children.clone()}
        </ContextProvider<ToastContext>>
    }
}

#[derive(Clone)]
pub struct ToastHandle {
    context: ToastContext,
}

impl ToastHandle {
    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!("Error toast: {message}");
        self.context
            .dispatch(ToastAction::Add(ToastType::Error, message));
    }

    pub fn success(&self, message: impl Into<String>) {
        self.context
            .dispatch(ToastAction::Add(ToastType::Success, message.into()));
    }

    pub fn remove(&self, id: u64) {
        self.context.dispatch(ToastAction::Remove(id));
    }
}

#[hook]
pub fn use_toast() -> ToastHandle {
    let context = use_context::<ToastContext>()
        .expect("use_toast must be used within a ToastProvider");
    ToastHandle { context }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_keep_arrival_order() {
        let state = Rc::new(ToastState::default())
            .reduce(ToastAction::Add(ToastType::Success, "saved".into()))
            .reduce(ToastAction::Add(ToastType::Error, "failed".into()));
        let messages: Vec<_> =
            state.toasts.iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, ["saved", "failed"]);

        let first = state.toasts[0].id;
        let state = state.reduce(ToastAction::Remove(first));
        assert_eq!(state.toasts.len(), 1);
        assert_eq!(state.toasts[0].toast_type, ToastType::Error);

        // ids are not reused after removal
        let state = state
            .reduce(ToastAction::Add(ToastType::Success, "again".into()));
        assert_ne!(state.toasts[1].id, first);
    }
}
