use leptos::prelude::*;

use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// 错误页通用骨架
#[component]
fn ErrorHero(code: &'static str, message: &'static str) -> impl IntoView {
    let router = use_router();
    let on_home = move |_| router.navigate(AppRoute::Home);

    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-error">{code}</h1>
                <p class="text-xl mt-4">{message}</p>
                <button class="btn btn-primary mt-6" on:click=on_home>
                    "返回首页"
                </button>
            </div>
        </div>
    }
}

#[component]
pub fn AccessDeniedPage() -> impl IntoView {
    view! { <ErrorHero code="403" message="没有访问该资源的权限" /> }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! { <ErrorHero code="404" message="页面未找到" /> }
}

#[component]
pub fn NetworkErrorPage() -> impl IntoView {
    view! { <ErrorHero code="网络错误" message="无法连接到服务器，请稍后重试" /> }
}
