use leptos::prelude::*;

use worldmap_shared::ChartVariant;

use crate::map::WorldMapChart;

/// Root application component: one map per dataset.
#[component]
pub fn App() -> impl IntoView {
    let variants = [ChartVariant::population(), ChartVariant::iso_codes()];

    view! {
        <div class="App">
            {variants
                .into_iter()
                .map(|variant| {
                    let title = variant.title;
                    view! {
                        <section>
                            <h2 style="text-align: center; font-family: 'Inter', system-ui, sans-serif;">
                                {title}
                            </h2>
                            <WorldMapChart variant=variant />
                        </section>
                    }
                })
                .collect_view()}
        </div>
    }
}
