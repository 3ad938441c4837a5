//! Task manager sub-app.
//!
//! Installable module mounted by the dynamic loader. The task workflow
//! itself is a leaf feature; this view keeps local demo state only.

use leptos::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Task {
    id: u32,
    title: String,
    done: bool,
}

#[component]
pub fn TaskManagerPage(account_id: String) -> impl IntoView {
    let (tasks, set_tasks) = signal(vec![
        Task {
            id: 1,
            title: "Review onboarding checklist".to_string(),
            done: true,
        },
        Task {
            id: 2,
            title: "Assign field technicians".to_string(),
            done: false,
        },
    ]);
    let (next_id, set_next_id) = signal(3u32);
    let (draft, set_draft) = signal(String::new());

    let on_add = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let title = draft.get_untracked();
        if title.is_empty() {
            return;
        }
        let id = next_id.get_untracked();
        set_next_id.set(id + 1);
        set_tasks.update(|list| {
            list.push(Task {
                id,
                title,
                done: false,
            })
        });
        set_draft.set(String::new());
    };

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-2xl font-bold">"Task Manager"</h1>
                <p class="text-base-content/60">"Account " {account_id}</p>
            </div>

            <div class="card bg-base-100 shadow-xl max-w-xl">
                <div class="card-body">
                    <form class="join" on:submit=on_add>
                        <input
                            type="text"
                            placeholder="New task"
                            class="input input-bordered join-item flex-1"
                            on:input=move |ev| set_draft.set(event_target_value(&ev))
                            prop:value=draft
                        />
                        <button class="btn btn-primary join-item">"Add"</button>
                    </form>

                    <ul class="mt-4 space-y-2">
                        {move || tasks.get().into_iter().map(|task| {
                            let id = task.id;
                            view! {
                                <li class="flex items-center gap-3">
                                    <input
                                        type="checkbox"
                                        class="checkbox checkbox-sm"
                                        prop:checked=task.done
                                        on:change=move |_| set_tasks.update(|list| {
                                            if let Some(t) = list.iter_mut().find(|t| t.id == id) {
                                                t.done = !t.done;
                                            }
                                        })
                                    />
                                    <span class=if task.done { "line-through text-base-content/50" } else { "" }>
                                        {task.title.clone()}
                                    </span>
                                </li>
                            }
                        }).collect_view()}
                    </ul>
                </div>
            </div>
        </div>
    }
}
