use leptos::prelude::*;
use leptos::task::spawn_local;

use taskdeck_shared::protocol::LoginRequest;

use crate::state::use_app_state;
use crate::web::route::{AppRoute, redirect_param};
use crate::web::router::{current_search, use_router};

#[component]
pub fn LoginPage() -> impl IntoView {
    let router = use_router();
    let state = use_app_state();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if email.get().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("请填写所有字段".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            let state = state.get_value();
            let request = LoginRequest {
                email: email.get_untracked(),
                password: password.get_untracked(),
            };
            match state.api.login(&request).await {
                Ok(user) => {
                    state.session.set_user(Some(user));
                    // 守卫重定向时在查询串里留下了原始目标
                    let target = redirect_param(&current_search())
                        .unwrap_or_else(|| AppRoute::Home.to_path().to_string());
                    router.navigate_path(&target);
                }
                Err(e) => {
                    set_error_msg.set(Some(format!("登录失败: {}", e)));
                }
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"TaskDeck"</h1>
                    <p class="text-base-content/70">"登录以继续"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"邮箱"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="you@example.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"密码"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() { "登录中..." } else { "登录" }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            <a class="link link-primary" on:click=move |_| router.navigate(AppRoute::Register)>
                                "还没有账号？注册"
                            </a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
