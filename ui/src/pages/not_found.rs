use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::hooks::use_title;

#[function_component]
pub fn NotFoundPage() -> Html {
    use_title("Not Found");

    html! {
        <div class="text-center py-16">
            <h1 class="text-4xl font-bold text-neutral-900">{"404"}</h1>
            <p class="text-neutral-600 mb-6">{"Page not found"}</p>
            <Link<Route> to={Route::Users} classes="text-blue-600 hover:underline">
                {"Back to users"}
            </Link<Route>>
        </div>
    }
}
