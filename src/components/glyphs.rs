use yew::prelude::*;

use crate::state::AlertGlyph;

#[derive(Properties, PartialEq, Clone)]
pub struct GlyphProps {
    #[prop_or_default]
    pub style: AttrValue,
}

#[function_component(AlertIcon)]
pub fn alert_icon(props: &GlyphProps) -> Html {
    html! { <img src="/alert-icon.png" alt="Alert" width="120" height="120" style={props.style.clone()} /> }
}

#[function_component(SeismicGlyph)]
pub fn seismic_glyph(props: &GlyphProps) -> Html {
    html! {
        <svg viewBox="0 0 24 24" style={props.style.clone()} fill="currentColor" aria-hidden="true">
            <path d="M2 12l4-4 3 5 4-6 3 4 5-5v3l-4 4-3-4-4 6-3-5-5 5v-3z" />
        </svg>
    }
}

#[function_component(WaveGlyph)]
pub fn wave_glyph(props: &GlyphProps) -> Html {
    html! {
        <svg viewBox="0 0 24 24" style={props.style.clone()} fill="none" stroke="currentColor" stroke-width="2" aria-hidden="true">
            <path d="M2 14c2 2 4 2 6 0s4-2 6 0 4 2 8 0" />
            <path d="M2 18c2 2 4 2 6 0s4-2 6 0 4 2 8 0" />
        </svg>
    }
}

pub fn glyph_for(glyph: AlertGlyph) -> Html {
    match glyph {
        AlertGlyph::Seismic => html! { <SeismicGlyph style="width:20px; height:20px; color:#dc2626;" /> },
        AlertGlyph::Wave => html! { <WaveGlyph style="width:20px; height:20px; color:#2563eb;" /> },
    }
}
