use dioxus::prelude::keyboard_types::Key;
use dioxus::prelude::*;
use dioxus_primitives::dialog::{
    self, DialogContentProps, DialogDescriptionProps, DialogRootProps, DialogTitleProps,
};

const DIALOG_CSS: Asset = asset!("./dialog.css");

/// Modal overlay around the primitives dialog. Clicking the backdrop or
/// pressing Escape reports `false` through `on_open_change`.
#[component]
pub fn DialogRoot(props: DialogRootProps) -> Element {
    let is_open = props.open.read().unwrap_or(false);
    let overlay_class = if is_open {
        "dialog-overlay open"
    } else {
        "dialog-overlay"
    };
    let on_click = props.on_open_change;
    let on_key = props.on_open_change;

    rsx! {
        document::Link { rel: "stylesheet", href: DIALOG_CSS }
        div {
            class: overlay_class,
            onclick: move |_| on_click.call(false),
            onkeydown: move |evt| {
                if evt.key() == Key::Escape {
                    on_key.call(false);
                }
            },
            dialog::DialogRoot {
                class: "dialog-backdrop-inner",
                id: props.id,
                is_modal: props.is_modal,
                open: props.open,
                default_open: props.default_open,
                on_open_change: props.on_open_change,
                attributes: props.attributes,
                {props.children}
            }
        }
    }
}

/// Dialog body. Clicks inside do not reach the overlay.
#[component]
pub fn DialogContent(props: DialogContentProps) -> Element {
    rsx! {
        div { onclick: move |e| e.stop_propagation(),
            dialog::DialogContent {
                class: "dialog",
                id: props.id,
                attributes: props.attributes,
                {props.children}
            }
        }
    }
}

#[component]
pub fn DialogTitle(props: DialogTitleProps) -> Element {
    rsx! {
        dialog::DialogTitle {
            class: "dialog-title",
            id: props.id,
            attributes: props.attributes,
            {props.children}
        }
    }
}

#[component]
pub fn DialogDescription(props: DialogDescriptionProps) -> Element {
    rsx! {
        dialog::DialogDescription {
            class: "dialog-description",
            id: props.id,
            attributes: props.attributes,
            {props.children}
        }
    }
}
