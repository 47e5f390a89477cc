use yew::prelude::*;

use saliency_survey_core::{MaskImage, OverlaySettings};

#[derive(Properties, PartialEq)]
pub(crate) struct ImageCardProps {
    pub(crate) mask: MaskImage,
    pub(crate) rank: Option<u32>,
    pub(crate) original_image: String,
    pub(crate) overlay: OverlaySettings,
    pub(crate) on_select: Callback<String>,
}

#[function_component(ImageCard)]
pub(crate) fn image_card(props: &ImageCardProps) -> Html {
    let mask = &props.mask;
    let ranked = props.rank.is_some();
    // ranked cards are inert
    let onclick = if ranked {
        None
    } else {
        let on_select = props.on_select.clone();
        let mask_id = mask.id.clone();
        Some(Callback::from(move |_: MouseEvent| {
            on_select.emit(mask_id.clone());
        }))
    };
    let image = if props.overlay.show_original {
        let layer_style = format!(
            "opacity: {:.2}; mix-blend-mode: screen;",
            props.overlay.mask_opacity()
        );
        html! {
            <div class="mask-card-image overlay">
                <img class="mask-card-original" src={props.original_image.clone()} alt="Original" />
                <img
                    class="mask-card-layer"
                    src={mask.image_url.clone()}
                    alt={mask.name.clone()}
                    style={layer_style}
                />
            </div>
        }
    } else {
        html! {
            <div class="mask-card-image">
                <img class="mask-card-mask" src={mask.image_url.clone()} alt={mask.name.clone()} />
            </div>
        }
    };
    let badge = match props.rank {
        Some(rank) => html! { <div class="rank-badge">{ rank }</div> },
        None => html! {},
    };
    html! {
        <div
            class={classes!("mask-card", ranked.then_some("ranked"))}
            data-mask-id={mask.id.clone()}
            {onclick}
        >
            {image}
            <div class="mask-card-footer">
                <span class="mask-card-name">{ mask.name.clone() }</span>
            </div>
            {badge}
        </div>
    }
}
