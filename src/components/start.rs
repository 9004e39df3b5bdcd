use leptos::prelude::*;

use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// 引导页：用户尚无可访问的项目时由守卫转入
#[component]
pub fn StartPage() -> impl IntoView {
    let router = use_router();

    let on_retry = {
        let router = router.clone();
        // 重新走一遍守卫：列表有了就进看板，否则回到这里
        move |_| router.navigate(AppRoute::Tasks)
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content text-center">
                <div class="max-w-md">
                    <h1 class="text-4xl font-bold">"欢迎使用 TaskDeck"</h1>
                    <p class="py-6 text-base-content/70">
                        "你还没有可访问的项目。请联系项目组管理员把你加入某个用户组，然后重试。"
                    </p>
                    <button class="btn btn-primary" on:click=on_retry>
                        "重新检查"
                    </button>
                </div>
            </div>
        </div>
    }
}
