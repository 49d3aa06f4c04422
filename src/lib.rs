pub mod config;
pub mod controller;
pub mod data;
pub mod gesture;
pub mod session;
pub mod stack;
pub mod summary;

use config::AppConfig;
use controller::{AppAction, AppPhase, AppState, SUMMARY_DELAY_MS};
use data::fetch_cat_batch;
use gesture::{CardMotion, Point, SwipeDirection, EXIT_ANIMATION_MS};
use gloo_timers::callback::Timeout;
use log::Level;
use session::Item;
use stack::{card_style, StackSlot, STACK_DEPTH};
use std::cell::Cell;
use std::rc::Rc;
use summary::Summary;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[function_component(App)]
fn app() -> Html {
    let config = use_state(AppConfig::load);
    let state = use_reducer(AppState::default);

    {
        let state = state.clone();
        let config = (*config).clone();
        let attempt = state.attempt;

        use_effect_with_deps(
            move |_: &u32| {
                let cancelled = Rc::new(Cell::new(false));
                {
                    let cancelled = cancelled.clone();
                    spawn_local(async move {
                        let result = fetch_cat_batch(&config).await;
                        if cancelled.get() {
                            return;
                        }
                        match result {
                            Ok(items) => state.dispatch(AppAction::BatchLoaded(items)),
                            Err(err) => state.dispatch(AppAction::BatchFailed(err.to_string())),
                        }
                    });
                }
                move || cancelled.set(true)
            },
            attempt,
        );
    }

    // Dropping a Timeout cancels it, so a timer never outlives the state
    // that asked for it.
    {
        let pending = state.pending_exit();
        let state = state.clone();

        use_effect_with_deps(
            move |pending: &Option<u64>| {
                let timer = pending.map(|ticket| {
                    Timeout::new(EXIT_ANIMATION_MS, move || {
                        state.dispatch(AppAction::ExitFinished { ticket })
                    })
                });
                move || drop(timer)
            },
            pending,
        );
    }

    {
        let due = state.summary_due;
        let state = state.clone();

        use_effect_with_deps(
            move |due: &bool| {
                let timer = due.then(|| {
                    Timeout::new(SUMMARY_DELAY_MS, move || {
                        state.dispatch(AppAction::ShowSummary)
                    })
                });
                move || drop(timer)
            },
            due,
        );
    }

    match &state.phase {
        AppPhase::Loading => render_loading(),
        AppPhase::Failed(message) => render_failure(message, &state),
        AppPhase::Swiping => render_swiping(&state),
        AppPhase::Summary => render_summary(&Summary::from_session(&state.session), &state),
    }
}

fn render_loading() -> Html {
    html! {
        <div class="screen loading-screen">
            <div class="spinner"><span class="heart">{ "♥" }</span></div>
            <h1>{ "Cat Matcher" }</h1>
            <p class="subtitle">{ "Preparing adorable cats for you…" }</p>
            <div class="dots">
                <span></span>
                <span></span>
                <span></span>
            </div>
        </div>
    }
}

fn render_failure(message: &str, state: &UseReducerHandle<AppState>) -> Html {
    let on_retry = {
        let state = state.clone();
        Callback::from(move |_| state.dispatch(AppAction::Retry))
    };

    html! {
        <div class="screen failure-screen">
            <h1>{ "Cat Matcher" }</h1>
            <p class="subtitle">{ "The cats could not be fetched." }</p>
            <p class="error">{ message.to_owned() }</p>
            <button class="pill-button" onclick={on_retry}>{ "Try again" }</button>
        </div>
    }
}

fn render_swiping(state: &UseReducerHandle<AppState>) -> Html {
    let session = &state.session;
    let exhausted = session.is_exhausted();

    let on_pass = {
        let state = state.clone();
        Callback::from(move |_| state.dispatch(AppAction::Button(SwipeDirection::Left)))
    };
    let on_like = {
        let state = state.clone();
        Callback::from(move |_| state.dispatch(AppAction::Button(SwipeDirection::Right)))
    };
    let on_restart = {
        let state = state.clone();
        Callback::from(move |_| state.dispatch(AppAction::Restart))
    };

    let progress_style = format!("width: {:.1}%;", session.progress_percent());

    html! {
        <div class="screen swipe-screen">
            <header class="swipe-header">
                <h1>{ "Cat Matcher" }</h1>
                <p class="subtitle">{ "Swipe right to like, left to pass" }</p>
                <div class="progress-track">
                    <div class="progress-fill" style={progress_style}></div>
                </div>
                <div class="counter">
                    { format!("{} / {}", session.display_index(), session.len()) }
                </div>
            </header>

            <main class="swipe-main">
                <div class="card-stack">
                    { for session
                        .upcoming(STACK_DEPTH)
                        .iter()
                        .enumerate()
                        .map(|(depth, item)| render_card(item, StackSlot::at(depth), state)) }
                    {
                        if exhausted {
                            html! {
                                <div class="all-done">
                                    <p>{ "All done! 🎉" }</p>
                                </div>
                            }
                        } else {
                            html! {}
                        }
                    }
                </div>

                <div class="actions">
                    <button class="round-button pass" onclick={on_pass} disabled={exhausted}>
                        { "✕" }
                    </button>
                    <button class="round-button like" onclick={on_like} disabled={exhausted}>
                        { "♥" }
                    </button>
                </div>

                <div class="actions">
                    <button class="pill-button" onclick={on_restart}>{ "↺ Restart" }</button>
                </div>
            </main>
        </div>
    }
}

fn render_card(item: &Item, slot: StackSlot, state: &UseReducerHandle<AppState>) -> Html {
    let key = item.id.to_string();
    let body = render_card_body(item, slot, state);

    if !slot.is_active() {
        let style = card_style(&slot, &CardMotion::REST);
        return html! {
            <div key={key} class="card" style={style}>
                { body }
            </div>
        };
    }

    let style = card_style(&slot, &state.gesture.motion());
    let dragging = state.gesture.is_dragging();

    let pointer_down = {
        let state = state.clone();
        Callback::from(move |event: web_sys::PointerEvent| {
            event.prevent_default();
            if let Some(card) = event
                .current_target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            {
                let _ = card.set_pointer_capture(event.pointer_id());
            }
            state.dispatch(AppAction::PointerDown {
                pointer_id: event.pointer_id(),
                at: pointer_position(&event),
            });
        })
    };

    let pointer_move = {
        let state = state.clone();
        Callback::from(move |event: web_sys::PointerEvent| {
            if state.gesture.is_dragging() {
                event.prevent_default();
            }
            state.dispatch(AppAction::PointerMove {
                pointer_id: event.pointer_id(),
                at: pointer_position(&event),
            });
        })
    };

    let pointer_up = {
        let state = state.clone();
        Callback::from(move |event: web_sys::PointerEvent| {
            release_capture(&event);
            state.dispatch(AppAction::PointerUp {
                pointer_id: event.pointer_id(),
            });
        })
    };

    let pointer_cancel = {
        let state = state.clone();
        Callback::from(move |event: web_sys::PointerEvent| {
            release_capture(&event);
            state.dispatch(AppAction::PointerCancel {
                pointer_id: event.pointer_id(),
            });
        })
    };

    html! {
        <div key={key}
            class={classes!("card", "active", if dragging { Some("dragging") } else { None })}
            style={style}
            onpointerdown={pointer_down}
            onpointermove={pointer_move}
            onpointerup={pointer_up}
            onpointercancel={pointer_cancel}>
            { body }
        </div>
    }
}

fn render_card_body(item: &Item, slot: StackSlot, state: &UseReducerHandle<AppState>) -> Html {
    let overlays = if slot.is_active() {
        let indicators = state.gesture.indicators();
        html! {
            <>
                <div class="stamp like" style={format!("opacity: {:.3};", indicators.like)}>
                    { "LIKE" }
                </div>
                <div class="stamp nope" style={format!("opacity: {:.3};", indicators.nope)}>
                    { "NOPE" }
                </div>
            </>
        }
    } else {
        html! {}
    };

    let on_image_load = Callback::from(|event: web_sys::Event| {
        if let Some(image) = event
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok())
        {
            let _ = image.style().set_property("opacity", "1");
        }
    });

    html! {
        <div class="card-inner">
            { overlays }
            <div class="card-photo">
                <img src={item.url.clone()}
                    alt={format!("Cat {}", item.id)}
                    draggable="false"
                    onload={on_image_load} />
            </div>
            <div class="card-caption">
                <h3>{ format!("Adorable Cat #{}", item.id + 1) }</h3>
                <p>{ "Ready to steal your heart" }</p>
            </div>
        </div>
    }
}

fn render_summary(summary: &Summary, state: &UseReducerHandle<AppState>) -> Html {
    let on_back = {
        let state = state.clone();
        Callback::from(move |_| state.dispatch(AppAction::BackToSwiping))
    };
    let on_restart = {
        let state = state.clone();
        Callback::from(move |_| state.dispatch(AppAction::Restart))
    };

    let matches = if summary.has_matches() {
        html! {
            <section class="panel favourites">
                <h2>{ "♥ Your Favorite Cats" }</h2>
                <div class="liked-grid">
                    { for summary.liked.iter().map(|item| html! {
                        <div key={item.id.to_string()} class="liked-tile">
                            <div class="liked-photo">
                                <img src={item.url.clone()} alt={format!("Liked cat {}", item.id)} />
                            </div>
                            <p>{ format!("Cat #{}", item.id + 1) }</p>
                        </div>
                    }) }
                </div>
            </section>
        }
    } else {
        html! {
            <section class="panel empty">
                <div class="empty-face">{ "🙀" }</div>
                <h2>{ "No Matches Found" }</h2>
                <p>{ "Looks like you're pretty picky! Try again?" }</p>
            </section>
        }
    };

    html! {
        <div class="screen summary-screen">
            <header class="summary-header">
                <button class="round-button back" onclick={on_back}>{ "‹" }</button>
                <h1>{ "Your Cat Preferences" }</h1>
                <p class="subtitle">{ "Here's what you loved! 😻" }</p>
            </header>

            <div class="stats">
                { render_stat(summary.liked_count.to_string(), "Cats Liked") }
                { render_stat(summary.passed_count.to_string(), "Cats Passed") }
                { render_stat(format!("{}%", summary.like_rate), "Like Rate") }
            </div>

            { matches }

            <div class="actions">
                <button class="pill-button" onclick={on_restart}>{ "↺ Try Again" }</button>
            </div>
        </div>
    }
}

fn render_stat(value: String, label: &'static str) -> Html {
    html! {
        <div class="stat">
            <div class="stat-value">{ value }</div>
            <div class="stat-label">{ label }</div>
        </div>
    }
}

fn pointer_position(event: &web_sys::PointerEvent) -> Point {
    Point::new(event.client_x() as f64, event.client_y() as f64)
}

fn release_capture(event: &web_sys::PointerEvent) {
    if let Some(card) = event
        .current_target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
    {
        let _ = card.release_pointer_capture(event.pointer_id());
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    let level = if cfg!(debug_assertions) {
        Level::Debug
    } else {
        Level::Info
    };
    wasm_logger::init(wasm_logger::Config::new(level));
    yew::Renderer::<App>::new().render();
}
