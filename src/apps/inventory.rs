//! Inventory sub-app.

use leptos::prelude::*;

#[component]
pub fn InventoryPage(account_id: String) -> impl IntoView {
    let items = [
        ("Drip line, 100m", 24),
        ("Pressure regulator", 7),
        ("Filter cartridge", 52),
    ];

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-2xl font-bold">"Inventory"</h1>
                <p class="text-base-content/60">"Account " {account_id}</p>
            </div>

            <div class="card bg-base-100 shadow-xl max-w-xl">
                <div class="card-body p-0">
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"Item"</th>
                                <th class="text-right">"In stock"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {items.iter().map(|(name, count)| view! {
                                <tr>
                                    <td>{*name}</td>
                                    <td class="text-right">{*count}</td>
                                </tr>
                            }).collect_view()}
                        </tbody>
                    </table>
                </div>
            </div>
        </div>
    }
}
