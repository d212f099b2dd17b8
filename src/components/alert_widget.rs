use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Event, Node};
use yew::prelude::*;

use super::glyphs::{glyph_for, AlertIcon};
use crate::config::AlertConfig;
use crate::model::{AlertInput, DisasterEvent, Position};
use crate::state::{
    group_counts, row_label, AlertFeed, AlertGlyph, AlertRoute, DragController, FeedAction,
    PanelAction, PanelState,
};
use crate::util::clog;

#[derive(Properties, PartialEq, Clone)]
pub struct AlertWidgetProps {
    /// Legacy single-type input, paired with `count`.
    #[prop_or_default]
    pub kind: Option<AttrValue>,
    #[prop_or_default]
    pub count: Option<u32>,
    /// Takes precedence over `kind`/`count` when present.
    #[prop_or_default]
    pub disasters: Option<Vec<DisasterEvent>>,
    #[prop_or_default]
    pub config: AlertConfig,
}

#[function_component(AlertWidget)]
pub fn alert_widget(props: &AlertWidgetProps) -> Html {
    let input = AlertInput::from_props(
        props.disasters.as_deref(),
        props.kind.as_deref(),
        props.count,
    );
    let feed = use_reducer(AlertFeed::default);
    let generation = use_mut_ref(|| 0_u64);
    let drag = use_mut_ref(DragController::default);
    let position = use_state(Position::default);
    let dragging = use_state(|| false);
    let panel = use_reducer(PanelState::default);
    let hovered = use_state(|| false);
    let container_ref = use_node_ref();

    // Population: restarts on mount and on every input change; dropping the
    // timeout on cleanup cancels a pending completion.
    {
        let feed = feed.clone();
        let generation = generation.clone();
        let delay = props.config.population_delay_ms;
        use_effect_with(input, move |input| {
            let g = {
                let mut g = generation.borrow_mut();
                *g += 1;
                *g
            };
            feed.dispatch(FeedAction::Restart { generation: g });
            let input = input.clone();
            let timeout = Timeout::new(delay, move || {
                clog(&format!("alerts populated (generation {})", g));
                feed.dispatch(FeedAction::Complete {
                    generation: g,
                    input,
                });
            });
            move || drop(timeout)
        });
    }

    // Window listeners live for the whole mount: a drag may leave the element.
    {
        let drag = drag.clone();
        let position = position.clone();
        let dragging = dragging.clone();
        let panel = panel.clone();
        let container_ref = container_ref.clone();
        use_effect_with((), move |_| {
            let mut listeners: Vec<EventListener> = Vec::new();
            if let Some(window) = web_sys::window() {
                let drag_move = drag.clone();
                listeners.push(EventListener::new(&window, "pointermove", move |e: &Event| {
                    let Some(e) = e.dyn_ref::<web_sys::PointerEvent>() else {
                        return;
                    };
                    let next = drag_move
                        .borrow_mut()
                        .pointer_move(e.client_x() as f64, e.client_y() as f64);
                    if let Some(p) = next {
                        position.set(p);
                    }
                }));
                let (drag_up, released) = (drag.clone(), dragging.clone());
                listeners.push(EventListener::new(&window, "pointerup", move |_| {
                    let ended = drag_up.borrow_mut().pointer_up();
                    if ended {
                        released.set(false);
                    }
                }));
                let drag_cancel = drag.clone();
                listeners.push(EventListener::new(&window, "pointercancel", move |_| {
                    let ended = drag_cancel.borrow_mut().pointer_cancel();
                    if ended {
                        dragging.set(false);
                    }
                }));
                listeners.push(EventListener::new(&window, "click", move |e: &Event| {
                    let inside = match (container_ref.get(), e.target()) {
                        (Some(container), Some(target)) => target
                            .dyn_into::<Node>()
                            .map(|t| container.contains(Some(&t)))
                            .unwrap_or(false),
                        _ => false,
                    };
                    panel.dispatch(PanelAction::Click { inside });
                }));
            }
            move || drop(listeners)
        });
    }

    let onpointerdown = {
        let drag = drag.clone();
        let dragging = dragging.clone();
        Callback::from(move |e: PointerEvent| {
            // Suppress the native drag image.
            e.prevent_default();
            drag.borrow_mut().pointer_down(e.client_x() as f64, e.client_y() as f64);
            dragging.set(true);
        })
    };
    let ondblclick = {
        let panel = panel.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            panel.dispatch(PanelAction::Toggle);
        })
    };
    let onclick = Callback::from(|e: MouseEvent| e.prevent_default());
    let onmouseenter = {
        let hovered = hovered.clone();
        Callback::from(move |_| hovered.set(true))
    };
    let onmouseleave = {
        let hovered = hovered.clone();
        Callback::from(move |_| hovered.set(false))
    };

    let events = feed.visible();
    let loaded = feed.is_loaded();
    let counts = group_counts(events);
    let offset = *position;
    let cursor = if *dragging { "grabbing" } else { "grab" };

    let badges = if loaded && !counts.is_empty() {
        html! {<div style="position:absolute; bottom:4px; left:50%; transform:translateX(-50%); display:flex; gap:4px; pointer-events:none;">
            { for counts.iter().map(|(kind, n)| html!{
                <span style="background:#dc2626; color:#fff; border-radius:9999px; padding:1px 7px; font-size:11px; text-transform:capitalize; white-space:nowrap;">{ format!("{} {}", kind, n) }</span>
            }) }
        </div>}
    } else {
        html! {}
    };

    let panel_view = if panel.shows_panel(loaded, events.len()) {
        let last = events.len() - 1;
        html! {<div style="margin-top:8px; width:256px; background:#fff; border-radius:8px; box-shadow:0 10px 25px rgba(0,0,0,0.25); overflow:hidden;">
            <div style="padding:4px 0;">
                <div style="padding:8px 16px; background:#f3f4f6; color:#374151; font-weight:600; border-bottom:1px solid #e5e7eb;">
                    { format!("Active Alerts ({})", events.len()) }
                </div>
                { for events.iter().enumerate().map(|(i, e)| {
                    let border = if i != last { "border-bottom:1px solid #e5e7eb;" } else { "" };
                    html! {
                        <a key={e.id.clone()} href={AlertRoute::for_kind(&e.kind).href()}
                            style={format!("display:flex; align-items:center; padding:12px 16px; text-decoration:none; {}", border)}>
                            <div style="flex-shrink:0;">{ glyph_for(AlertGlyph::for_kind(&e.kind)) }</div>
                            <div style="margin-left:12px;">
                                <p style="margin:0; font-size:14px; font-weight:500; color:#111827; text-transform:capitalize;">{ row_label(&e.kind, i) }</p>
                                <p style="margin:0; font-size:12px; color:#6b7280;">{"Click for details"}</p>
                            </div>
                        </a>
                    }
                }) }
            </div>
        </div>}
    } else {
        html! {}
    };

    html! {
        <div ref={container_ref} data-alert-menu="true" data-hovered={hovered.to_string()}
            style={format!("position:fixed; top:4px; right:24px; z-index:50; display:flex; flex-direction:column; align-items:flex-end; transform:translate({}px, {}px);", offset.x, offset.y)}
            {onmouseenter} {onmouseleave}>
            <div style="position:relative;">
                <a href="#" aria-label={format!("{} alerts - Click for details", events.len())}
                    style={format!("position:relative; display:flex; width:160px; height:160px; align-items:center; justify-content:center; touch-action:none; cursor:{};", cursor)}
                    {onpointerdown} {ondblclick} {onclick}>
                    <span class="alert-ripple" style="position:absolute; inset:0; border-radius:9999px; border:2px solid #5eead4; opacity:0.4;"></span>
                    <span class="alert-ripple alert-ripple-late" style="position:absolute; inset:0; border-radius:9999px; border:2px solid #99f6e4; opacity:0.3;"></span>
                    {
                        if !loaded {
                            html! { <span style="color:#fff; font-size:14px;">{"..."}</span> }
                        } else {
                            html! {<div style="position:relative; width:128px; height:128px;">
                                <AlertIcon style="position:absolute; transition:opacity 300ms; opacity:1;" />
                            </div>}
                        }
                    }
                </a>
                { badges }
            </div>
            { panel_view }
        </div>
    }
}
