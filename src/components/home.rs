use leptos::prelude::*;
use leptos::task::spawn_local;

use taskdeck_shared::Project;

use crate::error_page::redirect_for_error;
use crate::logging::log_error;
use crate::state::use_app_state;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// 首页概览：问候当前用户，列出可访问的项目
#[component]
pub fn HomePage() -> impl IntoView {
    let router = use_router();
    let state = use_app_state();

    let (projects, set_projects) = signal(Vec::<Project>::new());

    // 进入页面即刷新项目列表；失败交给错误分类器做一次性重定向
    spawn_local(async move {
        let state = state.get_value();
        let authenticated = state.session.is_authenticated();
        match state.selection.fetch_projects(authenticated).await {
            Ok(list) => set_projects.set(list),
            Err(e) => {
                log_error!("[Home] 项目加载失败: {}", e);
                let to = redirect_for_error(&state.gate, &e);
                router.navigate(to);
            }
        }
    });

    let user_name = move || {
        state
            .get_value()
            .session
            .user()
            .map(|u| u.name)
            .unwrap_or_else(|| "访客".to_string())
    };

    let on_board = move |_| router.navigate(AppRoute::Tasks);

    let on_logout = move |_| {
        spawn_local(async move {
            let state = state.get_value();
            state.session.logout().await;
            router.navigate(AppRoute::Login);
        });
    };

    view! {
        <div class="min-h-screen bg-base-200 p-8">
            <div class="navbar bg-base-100 rounded-box shadow mb-6">
                <div class="flex-1 px-2 text-xl font-bold">"TaskDeck"</div>
                <div class="flex-none gap-2 px-2">
                    <span class="text-base-content/70">{user_name}</span>
                    <button class="btn btn-ghost btn-sm" on:click=on_logout>
                        "注销"
                    </button>
                </div>
            </div>

            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h2 class="card-title">"我的项目"</h2>
                    <Show
                        when=move || !projects.get().is_empty()
                        fallback=|| view! { <p class="text-base-content/60">"暂无可访问的项目"</p> }
                    >
                        <ul class="menu">
                            {move || {
                                projects
                                    .get()
                                    .into_iter()
                                    .map(|p| view! { <li><span>{p.name.clone()}</span></li> })
                                    .collect_view()
                            }}
                        </ul>
                    </Show>
                    <div class="card-actions justify-end">
                        <button class="btn btn-primary" on:click=on_board>
                            "进入任务看板"
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
