//! WASM application implementation
//!
//! Binds the form controller to the host page (see `demos/index.html`):
//! a form `#qr-form` with inputs `#email`, `#password`, `#submit` and an
//! output element `#output`.

use std::{cell::RefCell, rc::Rc};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, HtmlInputElement, KeyboardEvent};

use crate::app::form::{key_action, Field, FormController, KeyAction};
use crate::app::session::perform_request;
use crate::client::gloo::WasmClient;
use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::model::structs::{ResponseStatus, View, QR_ALT_TEXT};

pub const FORM_ID: &str = "qr-form";
pub const EMAIL_ID: &str = "email";
pub const PASSWORD_ID: &str = "password";
pub const SUBMIT_ID: &str = "submit";
pub const OUTPUT_ID: &str = "output";

struct FormState {
    document: Document,
    client: WasmClient,
    controller: RefCell<FormController>,
}

struct FormElements {
    email: HtmlInputElement,
    password: HtmlInputElement,
    submit: HtmlInputElement,
}

impl FormElements {
    fn lookup(document: &Document) -> Option<Self> {
        Some(Self {
            email: input_by_id(document, EMAIL_ID)?,
            password: input_by_id(document, PASSWORD_ID)?,
            submit: input_by_id(document, SUBMIT_ID)?,
        })
    }
}

fn input_by_id(document: &Document, id: &str) -> Option<HtmlInputElement> {
    document.get_element_by_id(id)?.dyn_into::<HtmlInputElement>().ok()
}

fn dom_err(value: JsValue) -> Error {
    ErrorKind::DomError(format!("{value:?}")).into()
}

/// Entry point for the host page, mounts against the public LernSax endpoints
#[wasm_bindgen(js_name = mountQrForm)]
pub fn mount_qr_form() -> std::result::Result<(), JsValue> {
    mount(ClientConfig::default()).map_err(|e| JsValue::from_str(&e.to_string()))
}

pub fn mount(config: ClientConfig) -> Result<()> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| ErrorKind::DomError("no document available".to_string()))?;

    let form = document
        .get_element_by_id(FORM_ID)
        .ok_or_else(|| ErrorKind::DomError(format!("missing #{FORM_ID}")))?;

    let state = Rc::new(FormState {
        document,
        controller: RefCell::new(FormController::new(config.email_suffix.clone())),
        client: WasmClient::with_config(config),
    });

    let on_submit = {
        let state = Rc::clone(&state);
        Closure::<dyn FnMut(Event)>::new(move |event: Event| handle_submit(&state, &event))
    };
    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())
        .map_err(dom_err)?;
    on_submit.forget();

    for (field, id) in [(Field::Email, EMAIL_ID), (Field::Password, PASSWORD_ID)] {
        let input = input_by_id(&state.document, id)
            .ok_or_else(|| ErrorKind::DomError(format!("missing #{id}")))?;

        let on_key = {
            let state = Rc::clone(&state);
            Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
                handle_key(&state, field, &event)
            })
        };
        input
            .add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref())
            .map_err(dom_err)?;
        on_key.forget();
    }

    log::debug!("QR form mounted");
    Ok(())
}

fn handle_key(state: &FormState, field: Field, event: &KeyboardEvent) {
    let action = key_action(field, &event.key());
    if action == KeyAction::Ignore {
        return;
    }

    event.prevent_default();
    let Some(elements) = FormElements::lookup(&state.document) else {
        return;
    };

    match action {
        KeyAction::FocusPassword => {
            if let Err(e) = elements.password.focus() {
                log::warn!("Cannot focus password input: {e:?}");
            }
        }
        KeyAction::ActivateSubmit => elements.submit.click(),
        KeyAction::Ignore => {}
    }
}

fn handle_submit(state: &Rc<FormState>, event: &Event) {
    event.prevent_default();

    // Page not fully there yet
    let Some(elements) = FormElements::lookup(&state.document) else {
        return;
    };

    let submission = state
        .controller
        .borrow_mut()
        .submit(&elements.email.value(), &elements.password.value());
    elements.email.set_value(&submission.credentials.email);
    render(&state.document, state.controller.borrow().status());

    let state = Rc::clone(state);
    spawn_local(async move {
        let status = perform_request(&state.client, &submission.credentials).await;
        let applied = state
            .controller
            .borrow_mut()
            .resolve(submission.generation, status);

        if applied {
            render(&state.document, state.controller.borrow().status());
        }
    });
}

fn render(document: &Document, status: &ResponseStatus) {
    let Some(output) = document.get_element_by_id(OUTPUT_ID) else {
        log::warn!("Missing #{OUTPUT_ID}, cannot show status");
        return;
    };

    if let Err(e) = render_view(document, &output, &View::from(status)) {
        log::error!("Failed to render status: {e}");
    }
}

fn render_view(document: &Document, output: &Element, view: &View) -> Result<()> {
    output.set_inner_html("");

    match view {
        View::Empty => {}
        View::Text(text) => {
            let paragraph = document.create_element("p").map_err(dom_err)?;
            paragraph.set_text_content(Some(text.as_str()));
            output.append_child(&paragraph).map_err(dom_err)?;
        }
        View::QrLink { href, src } => {
            let link = document.create_element("a").map_err(dom_err)?;
            link.set_attribute("href", href).map_err(dom_err)?;
            link.set_attribute("target", "_blank").map_err(dom_err)?;
            link.set_attribute("rel", "noreferrer").map_err(dom_err)?;

            let image = document.create_element("img").map_err(dom_err)?;
            image.set_attribute("class", "qr-image").map_err(dom_err)?;
            image.set_attribute("src", src).map_err(dom_err)?;
            image.set_attribute("alt", QR_ALT_TEXT).map_err(dom_err)?;

            link.append_child(&image).map_err(dom_err)?;
            output.append_child(&link).map_err(dom_err)?;
        }
    }

    Ok(())
}
