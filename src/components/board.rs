use leptos::prelude::*;
use leptos::task::spawn_local;

use taskdeck_shared::{Priority, Sprint};

use crate::error_page::redirect_for_error;
use crate::logging::log_error;
use crate::state::use_app_state;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// 任务看板：项目/冲刺选择与优先级目录
///
/// 守卫保证进入此页时项目列表已经加载。
#[component]
pub fn BoardPage() -> impl IntoView {
    let router = use_router();
    let state = use_app_state();

    let (sprints, set_sprints) = signal(Vec::<Sprint>::new());
    let (priorities, set_priorities) = signal(Vec::<Priority>::new());
    let (current_project_name, set_current_project_name) = signal(Option::<String>::None);
    let (current_sprint_name, set_current_sprint_name) = signal(Option::<String>::None);

    let refresh_selection_labels = move || {
        let app = state.get_value();
        set_current_project_name.set(app.selection.current_project().map(|p| p.name));
        set_current_sprint_name.set(app.selection.current_sprint().map(|s| s.name));
    };

    // 拉取当前项目的冲刺，失败交给错误分类器
    let load_sprints = move || {
        spawn_local(async move {
            let app = state.get_value();
            let authenticated = app.session.is_authenticated();
            match app.selection.fetch_sprints(authenticated).await {
                Ok(list) => {
                    set_sprints.set(list);
                    refresh_selection_labels();
                }
                Err(e) => {
                    log_error!("[Board] 冲刺加载失败: {}", e);
                    let to = redirect_for_error(&app.gate, &e);
                    router.navigate(to);
                }
            }
        });
    };

    refresh_selection_labels();
    load_sprints();

    // 优先级目录加载一次；失败只记录，看板仍可使用
    spawn_local(async move {
        let app = state.get_value();
        match app.tasks.fetch_priorities().await {
            Ok(list) => set_priorities.set(list),
            Err(e) => log_error!("[Board] 优先级目录加载失败: {}", e),
        }
    });

    let project_buttons = move || {
        let app = state.get_value();
        let selected = app.selection.current_project().map(|p| p.id);
        app.selection
            .snapshot()
            .projects
            .into_iter()
            .map(|p| {
                let class = if selected == Some(p.id) {
                    "btn btn-sm btn-primary"
                } else {
                    "btn btn-sm btn-ghost"
                };
                let name = p.name.clone();
                let on_click = move |_| {
                    let app = state.get_value();
                    let authenticated = app.session.is_authenticated();
                    app.selection.set_current_project(p.clone(), authenticated);
                    load_sprints();
                };
                view! {
                    <button class=class on:click=on_click>
                        {name}
                    </button>
                }
            })
            .collect_view()
    };

    let sprint_buttons = move || {
        sprints
            .get()
            .into_iter()
            .map(|s| {
                let name = s.name.clone();
                let on_click = move |_| {
                    let app = state.get_value();
                    let authenticated = app.session.is_authenticated();
                    app.selection.set_current_sprint(s.clone(), authenticated);
                    refresh_selection_labels();
                };
                view! {
                    <li>
                        <a on:click=on_click>{name}</a>
                    </li>
                }
            })
            .collect_view()
    };

    let on_home = move |_| router.navigate(AppRoute::Home);

    view! {
        <div class="min-h-screen bg-base-200 p-8">
            <div class="navbar bg-base-100 rounded-box shadow mb-6">
                <div class="flex-1 px-2 text-xl font-bold">"任务看板"</div>
                <div class="flex-none px-2">
                    <button class="btn btn-ghost btn-sm" on:click=on_home>
                        "返回首页"
                    </button>
                </div>
            </div>

            <div class="card bg-base-100 shadow mb-6">
                <div class="card-body">
                    <h2 class="card-title">
                        "项目: "
                        {move || current_project_name.get().unwrap_or_else(|| "未选择".to_string())}
                    </h2>
                    <div class="flex flex-wrap gap-2">{project_buttons}</div>
                </div>
            </div>

            <div class="card bg-base-100 shadow mb-6">
                <div class="card-body">
                    <h2 class="card-title">
                        "冲刺: "
                        {move || current_sprint_name.get().unwrap_or_else(|| "未选择".to_string())}
                    </h2>
                    <Show
                        when=move || !sprints.get().is_empty()
                        fallback=|| view! { <p class="text-base-content/60">"该项目暂无冲刺"</p> }
                    >
                        <ul class="menu menu-horizontal">{sprint_buttons}</ul>
                    </Show>
                </div>
            </div>

            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h2 class="card-title">"优先级"</h2>
                    <div class="flex gap-2">
                        {move || {
                            priorities
                                .get()
                                .into_iter()
                                .map(|p: Priority| {
                                    view! {
                                        <span class="badge badge-outline">
                                            {format!("{:?} (w{})", p.kind, p.kind.weight())}
                                        </span>
                                    }
                                })
                                .collect_view()
                        }}
                    </div>
                </div>
            </div>
        </div>
    }
}
