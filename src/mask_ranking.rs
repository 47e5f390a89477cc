use web_sys::HtmlInputElement;
use yew::prelude::*;

use saliency_survey_core::overlay::parse_transparency;
use saliency_survey_core::{
    ImageSet, OverlaySettings, RankingEntry, RankingStore, TRANSPARENCY_MAX, TRANSPARENCY_MIN,
    TRANSPARENCY_STEP,
};

use crate::image_card::ImageCard;

#[derive(Properties, PartialEq)]
pub(crate) struct MaskRankingProps {
    pub(crate) image_set: ImageSet,
    pub(crate) on_validate: Callback<Vec<RankingEntry>>,
}

/// Ranks the masks of one image set by click order. Validation is manual:
/// the ranking is only emitted when the user presses the validate button on
/// a complete ranking.
#[function_component(MaskRanking)]
pub(crate) fn mask_ranking(props: &MaskRankingProps) -> Html {
    let store = use_mut_ref(|| RankingStore::new(&props.image_set));
    if store.borrow_mut().sync_set(&props.image_set) {
        gloo::console::log!("ranking reset for image set", props.image_set.id.clone());
    }
    let overlay = use_state(OverlaySettings::default);
    let overlay_value = *overlay;
    let force_update = use_force_update();

    let on_select = {
        let store = store.clone();
        let force_update = force_update.clone();
        Callback::from(move |mask_id: String| {
            let assigned = store.borrow_mut().click(&mask_id);
            if assigned.is_some() {
                force_update.force_update();
            }
        })
    };
    let on_reset = {
        let store = store.clone();
        let force_update = force_update.clone();
        Callback::from(move |_: MouseEvent| {
            store.borrow_mut().reset();
            force_update.force_update();
        })
    };
    let on_validate = {
        let store = store.clone();
        let on_validate = props.on_validate.clone();
        Callback::from(move |_: MouseEvent| {
            let ranking = store.borrow().finalize();
            if let Some(ranking) = ranking {
                on_validate.emit(ranking);
            }
        })
    };
    let on_toggle_original = {
        let overlay = overlay.clone();
        Callback::from(move |_: MouseEvent| {
            overlay.set(overlay_value.toggle_original());
        })
    };
    let on_transparency = {
        let overlay = overlay.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            if let Some(value) = parse_transparency(&input.value()) {
                overlay.set(overlay_value.with_transparency(value));
            }
        })
    };

    let store_ref = store.borrow();
    let mask_count = props.image_set.masks.len();
    let cards: Html = props
        .image_set
        .masks
        .iter()
        .map(|mask| {
            html! {
                <ImageCard
                    key={mask.id.clone()}
                    mask={mask.clone()}
                    rank={store_ref.rank_of(&mask.id)}
                    original_image={props.image_set.original_image.clone()}
                    overlay={overlay_value}
                    on_select={on_select.clone()}
                />
            }
        })
        .collect();
    let ranking_list = if store_ref.is_empty() {
        html! {}
    } else {
        let rows: Html = store_ref
            .entries()
            .iter()
            .map(|entry| {
                let name = props
                    .image_set
                    .mask(&entry.mask_id)
                    .map(|mask| mask.name.clone())
                    .unwrap_or_default();
                html! {
                    <li key={entry.mask_id.clone()} class="ranking-row">
                        <span class="ranking-rank">{ entry.rank }</span>
                        <span class="ranking-name">{ name }</span>
                    </li>
                }
            })
            .collect();
        html! {
            <section class="ranking-list">
                <h3>{ "Votre classement actuel :" }</h3>
                <ol>{rows}</ol>
            </section>
        }
    };
    let toggle_label = if overlay_value.show_original {
        "Masquer l'original"
    } else {
        "Montrer l'original"
    };

    html! {
        <div class="mask-ranking">
            <div class="mask-ranking-header">
                <h2>{ "Évaluation des cartes de saillance" }</h2>
                <div class="mask-ranking-actions">
                    <button
                        class="reset"
                        onclick={on_reset}
                        disabled={store_ref.is_empty()}
                    >
                        { "Réinitialiser" }
                    </button>
                    <button
                        class="validate"
                        onclick={on_validate}
                        disabled={!store_ref.is_complete()}
                    >
                        { "Valider" }
                    </button>
                </div>
            </div>
            <div class="overlay-controls">
                <div class="overlay-controls-row">
                    <h3>{ "Superposition avec l'image originale" }</h3>
                    <button class="toggle-original" onclick={on_toggle_original}>
                        { toggle_label }
                    </button>
                </div>
                <label class="overlay-controls-row" for="overlay-transparency">
                    <span>{ "Transparence :" }</span>
                    <input
                        id="overlay-transparency"
                        type="range"
                        min={TRANSPARENCY_MIN.to_string()}
                        max={TRANSPARENCY_MAX.to_string()}
                        step={TRANSPARENCY_STEP.to_string()}
                        value={overlay_value.transparency.to_string()}
                        oninput={on_transparency}
                    />
                    <span class="control-value">
                        { format!("{}%", overlay_value.transparency_percent()) }
                    </span>
                </label>
            </div>
            <p class="mask-ranking-hint">
                { format!(
                    "Cliquez sur les images pour les classer par ordre de préférence (1 = préférée, {mask_count} = moins préférée)"
                ) }
            </p>
            <div class="mask-grid">{cards}</div>
            {ranking_list}
        </div>
    }
}
