use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{window, KeyboardEvent};
use yew::prelude::*;

use crate::i18n::current::common as t;

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub title: AttrValue,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub footer: Html,
    #[prop_or_default]
    pub children: Html,
}

/// Overlay dialog. Escape and a click on the backdrop both close it.
#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    use_effect_with(props.on_close.clone(), move |on_close| {
        let on_close = on_close.clone();
        let listener = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            if event.key() == "Escape" {
                on_close.emit(());
            }
        }) as Box<dyn FnMut(_)>);
        if let Some(win) = window() {
            let _ = win.add_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref());
        }

        move || {
            if let Some(win) = window() {
                let _ = win
                    .remove_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref());
            }
        }
    });

    let on_overlay = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let on_close_button = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let stop = Callback::from(|e: MouseEvent| e.stop_propagation());

    html! {
        <div class="modal-overlay" onclick={on_overlay}>
            <div class="modal" role="dialog" aria-modal="true" onclick={stop}>
                <div class="modal-header">
                    <h3>{ props.title.clone() }</h3>
                    <button
                        type="button"
                        class="modal-close"
                        aria-label={t::CLOSE}
                        onclick={on_close_button}
                    >
                        {"×"}
                    </button>
                </div>
                <div class="modal-body">{ props.children.clone() }</div>
                <div class="modal-footer">{ props.footer.clone() }</div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ConfirmDialogProps {
    pub message: AttrValue,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
    #[prop_or_default]
    pub danger: bool,
}

/// Yes/no question on top of [`Modal`].
#[function_component(ConfirmDialog)]
pub fn confirm_dialog(props: &ConfirmDialogProps) -> Html {
    let confirm = {
        let on_confirm = props.on_confirm.clone();
        Callback::from(move |_: MouseEvent| on_confirm.emit(()))
    };
    let cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };
    let confirm_class = if props.danger { "btn btn-danger" } else { "btn btn-primary" };

    let footer = html! {
        <>
            <button type="button" class="btn" onclick={cancel}>{ t::CANCEL }</button>
            <button type="button" class={confirm_class} onclick={confirm}>{ t::CONFIRM }</button>
        </>
    };

    html! {
        <Modal title={t::CONFIRM} on_close={props.on_cancel.clone()} footer={footer}>
            <p>{ props.message.clone() }</p>
        </Modal>
    }
}
