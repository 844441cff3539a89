use std::{ops::Deref, rc::Rc};

use soniy_admin_shared::player::{Transport, TransportEvent};
use yew::prelude::*;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerState {
    transport: Transport,
}

impl Deref for PlayerState {
    type Target = Transport;

    fn deref(&self) -> &Self::Target {
        &self.transport
    }
}

pub enum PlayerAction {
    PlaySource {
        url: String,
        title: String,
    },
    /// Preview `[start_ms, end_ms)` and pause at the end.
    PlayRange {
        url: String,
        start_ms: i64,
        end_ms: i64,
        title: String,
    },
    TogglePlay,
    Pause,
    Close,
    SetDuration(f64),
    Seek(f64),
    SetVolume(f64),
    SetRate(f64),
    TimeUpdate(f64),
    Ended,
}

impl Reducible for PlayerState {
    type Action = PlayerAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        let transport = &mut next.transport;
        match action {
            PlayerAction::PlaySource {
                url,
                title,
            } => transport.play_source(&url, &title),
            PlayerAction::PlayRange {
                url,
                start_ms,
                end_ms,
                title,
            } => transport.play_range(&url, start_ms, end_ms, &title),
            PlayerAction::TogglePlay => transport.toggle(),
            PlayerAction::Pause => transport.pause(),
            PlayerAction::Close => transport.close(),
            PlayerAction::SetDuration(duration) => transport.set_duration(duration),
            PlayerAction::Seek(percent) => {
                transport.seek_percent(percent);
            },
            PlayerAction::SetVolume(percent) => {
                transport.set_volume_percent(percent);
            },
            PlayerAction::SetRate(rate) => {
                transport.set_rate(rate);
            },
            PlayerAction::TimeUpdate(position) => {
                // Pausing the element follows from `playing` flipping to false.
                if transport.time_update(position) == TransportEvent::BoundReached {
                    log_bound_reached(position);
                }
            },
            PlayerAction::Ended => transport.ended(),
        }
        if next == *self {
            return self;
        }
        Rc::new(next)
    }
}

fn log_bound_reached(position: f64) {
    web_sys::console::debug_1(&format!("segment preview stopped at {position:.3}s").into());
}

pub type PlayerContext = UseReducerHandle<PlayerState>;

#[derive(Properties, PartialEq)]
pub struct PlayerProviderProps {
    pub children: Html,
}

#[function_component(PlayerProvider)]
pub fn player_provider(props: &PlayerProviderProps) -> Html {
    let state = use_reducer(PlayerState::default);
    html! {
        <ContextProvider<PlayerContext> context={state}>
            {props.children.clone()}
        </ContextProvider<PlayerContext>>
    }
}
