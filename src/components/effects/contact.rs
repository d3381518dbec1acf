//! Contact form: required-field check, a simulated send and a confirmation toast.

use std::time::Duration;

use leptos::prelude::*;
use log::info;

use super::dom::PendingTimeout;
use crate::components::particle_field::StopHandle;

pub const SUBMIT_LABEL: &str = "ENVIAR MISIÓN";
pub const SENDING_LABEL: &str = "ENVIANDO...";
pub const TOAST_MESSAGE: &str =
	"🎯 ¡Misión recibida! Te contactamos pronto. ¡Prepárate para la batalla!";
/// How long empty required fields stay highlighted.
pub const INVALID_HIGHLIGHT: Duration = Duration::from_millis(2000);
/// Simulated network time before the form resets.
pub const SEND_DELAY: Duration = Duration::from_millis(1400);
pub const TOAST_DURATION: Duration = Duration::from_millis(4500);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
	Name,
	Phone,
	Players,
	Message,
}

impl Field {
	pub const ALL: [Field; 4] = [Field::Name, Field::Phone, Field::Players, Field::Message];

	pub fn name(self) -> &'static str {
		match self {
			Field::Name => "nombre",
			Field::Phone => "telefono",
			Field::Players => "jugadores",
			Field::Message => "mensaje",
		}
	}

	pub fn required(self) -> bool {
		matches!(self, Field::Name | Field::Phone)
	}
}

/// Values typed so far.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContactDraft {
	pub name: String,
	pub phone: String,
	pub players: String,
	pub message: String,
}

impl ContactDraft {
	pub fn get(&self, field: Field) -> &str {
		match field {
			Field::Name => &self.name,
			Field::Phone => &self.phone,
			Field::Players => &self.players,
			Field::Message => &self.message,
		}
	}

	pub fn set(&mut self, field: Field, value: String) {
		let slot = match field {
			Field::Name => &mut self.name,
			Field::Phone => &mut self.phone,
			Field::Players => &mut self.players,
			Field::Message => &mut self.message,
		};
		*slot = value;
	}

	/// Required fields left blank or whitespace-only, in form order.
	pub fn missing(&self) -> Vec<Field> {
		Field::ALL
			.into_iter()
			.filter(|f| f.required() && self.get(*f).trim().is_empty())
			.collect()
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
	/// Nothing sent; these fields get highlighted.
	Invalid(Vec<Field>),
	Sending,
	/// A send is already in flight.
	Ignored,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContactFormState {
	pub draft: ContactDraft,
	invalid: Vec<Field>,
	sending: bool,
}

impl ContactFormState {
	pub fn submit(&mut self) -> SubmitOutcome {
		if self.sending {
			return SubmitOutcome::Ignored;
		}
		let missing = self.draft.missing();
		if !missing.is_empty() {
			self.invalid = missing.clone();
			return SubmitOutcome::Invalid(missing);
		}
		self.invalid.clear();
		self.sending = true;
		SubmitOutcome::Sending
	}

	/// The send went through: empties the form and restores the button.
	pub fn finish_sending(&mut self) {
		self.sending = false;
		self.draft = ContactDraft::default();
	}

	pub fn clear_invalid(&mut self) {
		self.invalid.clear();
	}

	pub fn is_invalid(&self, field: Field) -> bool {
		self.invalid.contains(&field)
	}

	pub fn is_sending(&self) -> bool {
		self.sending
	}

	pub fn button_label(&self) -> &'static str {
		if self.sending { SENDING_LABEL } else { SUBMIT_LABEL }
	}
}

fn text_field(
	form: RwSignal<ContactFormState>,
	field: Field,
	kind: &'static str,
	placeholder: &'static str,
) -> impl IntoView {
	view! {
		<input
			type=kind
			name=field.name()
			placeholder=placeholder
			class="cf-input"
			class:invalid=move || form.with(|f| f.is_invalid(field))
			prop:value=move || form.with(|f| f.draft.get(field).to_owned())
			on:input=move |ev| form.update(|f| f.draft.set(field, event_target_value(&ev)))
		/>
	}
}

/// Mission request form with its toast.
#[component]
pub fn ContactForm() -> impl IntoView {
	let form = RwSignal::new(ContactFormState::default());
	let (toast, set_toast) = signal(false);
	let (invalid_timer, send_timer, toast_timer) = (
		PendingTimeout::default(),
		PendingTimeout::default(),
		PendingTimeout::default(),
	);
	let stop = StopHandle::new();
	for timer in [&invalid_timer, &send_timer, &toast_timer] {
		timer.clear_on(&stop);
	}
	on_cleanup(move || stop.stop());

	let on_submit = move |ev: leptos::ev::SubmitEvent| {
		ev.prevent_default();
		let Some(outcome) = form.try_update(ContactFormState::submit) else {
			return;
		};
		match outcome {
			SubmitOutcome::Invalid(_) => {
				invalid_timer
					.restart(move || form.update(ContactFormState::clear_invalid), INVALID_HIGHLIGHT);
			}
			SubmitOutcome::Sending => {
				let toast_timer = toast_timer.clone();
				send_timer.restart(
					move || {
						form.update(ContactFormState::finish_sending);
						info!("contact form: mission request received");
						set_toast.set(true);
						toast_timer.restart(move || set_toast.set(false), TOAST_DURATION);
					},
					SEND_DELAY,
				);
			}
			SubmitOutcome::Ignored => {}
		}
	};

	view! {
		<form id="contactForm" class="contact-form" novalidate=true on:submit=on_submit>
			{text_field(form, Field::Name, "text", "Nombre *")}
			{text_field(form, Field::Phone, "tel", "Teléfono *")}
			{text_field(form, Field::Players, "number", "Número de jugadores")}
			<textarea
				name=Field::Message.name()
				placeholder="Cuéntanos tu misión"
				class="cf-input"
				prop:value=move || form.with(|f| f.draft.message.clone())
				on:input=move |ev| form.update(|f| f.draft.set(Field::Message, event_target_value(&ev)))
			/>
			<button
				type="submit"
				class="btn cf-submit"
				disabled=move || form.with(ContactFormState::is_sending)
			>
				<span class="btn-text">{move || form.with(ContactFormState::button_label)}</span>
			</button>
		</form>
		<div id="toast" class="toast" class:show=move || toast.get()>
			<span class="toast-msg">{TOAST_MESSAGE}</span>
		</div>
	}
}
