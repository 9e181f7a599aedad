//! Form flows: the menus a player walks through after running a command.
//!
//! A [`Session`] is a small state machine. Each state is one form on the
//! player's screen; the host feeds back the player's [`Response`] and gets a
//! [`Step`] with messages to show and the next form, if any. A step without a
//! form ends the session.
//!
//! ```text
//! Manage ──add──▶ AddWarp ──▶ (done)
//!   │ ──delete──▶ PickDelete ──▶ ConfirmDelete ──▶ (done)
//!   └ ──stop navigation──▶ (done)
//!
//! List ──▶ Detail ──navigate──▶ (done)
//!   ▲        │ ──delete──▶ ConfirmDelete ──▶ (done)
//!   └─back───┘
//! ```

pub mod form;

use jiff::tz::TimeZone;

use crate::format::code::{DARK_GREEN, GREEN, RED};
use crate::format::{format_position, warp_button, warp_details};
use crate::lang::{Locale, Text};
use crate::model::{Dimension, Player, Position, Warp};
use crate::nav::Navigator;
use crate::plugin::PLUGIN_NAME;
use crate::storage::{StorageError, WarpStore};

pub use form::{Field, FieldValue, Form, Response};

/// Everything a session needs from the running plugin.
pub struct Context<'a> {
    pub store: &'a WarpStore,
    pub navigator: &'a mut dyn Navigator,
    pub locale: Locale,
    pub time_zone: &'a TimeZone,
}

/// Which command opened the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    Manage,
    List,
}

/// Result of advancing a session.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// Chat lines for the player, in order.
    pub messages: Vec<String>,

    /// The next form, or `None` when the session is over.
    pub form: Option<Form>,
}

impl Step {
    fn show(form: Form) -> Self {
        Self {
            messages: Vec::new(),
            form: Some(form),
        }
    }

    fn done(messages: Vec<String>) -> Self {
        Self {
            messages,
            form: None,
        }
    }
}

/// Buttons on the detail form. Delete only appears for players allowed to use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DetailButton {
    Navigate,
    Delete,
    Back,
}

#[derive(Debug, Clone)]
enum State {
    Manage,
    AddWarp,
    PickDelete { candidates: Vec<Warp> },
    List { warps: Vec<Warp> },
    Detail { warp: Warp, buttons: Vec<DetailButton> },
    ConfirmDelete { warp: Warp },
}

/// One player's walk through the warp forms.
#[derive(Debug)]
pub struct Session {
    player: Player,
    state: Option<State>,
}

impl Session {
    /// Opens a session and returns the first form to show.
    pub fn start(player: Player, entry: Entry, cx: &mut Context<'_>) -> (Self, Step) {
        let mut session = Self {
            player,
            state: None,
        };
        let step = match entry {
            Entry::Manage => session.enter(State::Manage, cx),
            Entry::List => session.enter_list(cx),
        };
        (session, step)
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_none()
    }

    /// Applies the player's response to the current form.
    pub fn respond(&mut self, response: Response, cx: &mut Context<'_>) -> Step {
        let Some(state) = self.state.take() else {
            return Step::done(Vec::new());
        };

        match (state, response) {
            (State::Manage, Response::Button(0)) => self.enter(State::AddWarp, cx),
            (State::Manage, Response::Button(1)) => self.enter_pick_delete(cx),
            (State::Manage, Response::Button(2)) => {
                cx.navigator.clear_task(&self.player.xuid);
                Step::done(Vec::new())
            }

            (State::AddWarp, Response::Values(values)) => self.add_warp(&values, cx),

            (State::PickDelete { candidates }, Response::Button(index)) => {
                match candidates.into_iter().nth(index) {
                    Some(warp) => self.enter(State::ConfirmDelete { warp }, cx),
                    None => Step::done(Vec::new()),
                }
            }

            (State::List { warps }, Response::Button(index)) => match warps.into_iter().nth(index)
            {
                Some(warp) => self.enter_detail(warp, cx),
                None => Step::done(Vec::new()),
            },

            (State::Detail { warp, buttons }, Response::Button(index)) => {
                match buttons.get(index) {
                    Some(DetailButton::Navigate) => {
                        let xuid = &self.player.xuid;
                        if cx.navigator.has_task(xuid) {
                            cx.navigator.clear_task(xuid);
                        }
                        cx.navigator.new_task(xuid, &warp);
                        Step::done(Vec::new())
                    }
                    Some(DetailButton::Delete) => self.enter(State::ConfirmDelete { warp }, cx),
                    Some(DetailButton::Back) => self.enter_list(cx),
                    None => Step::done(Vec::new()),
                }
            }

            (State::ConfirmDelete { warp }, Response::Confirm(true)) => self.delete_warp(&warp, cx),

            (State::AddWarp | State::ConfirmDelete { .. }, Response::Closed)
            | (State::ConfirmDelete { .. }, Response::Confirm(false)) => {
                Step::done(vec![cx.locale.error(Text::Cancelled)])
            }

            // Closing a menu ends the session quietly.
            (_, Response::Closed) => Step::done(Vec::new()),

            (state, response) => {
                tracing::warn!(?state, ?response, "response does not fit the open form");
                Step::done(Vec::new())
            }
        }
    }

    fn enter(&mut self, state: State, cx: &Context<'_>) -> Step {
        let form = self.render(&state, cx);
        self.state = Some(state);
        Step::show(form)
    }

    fn enter_list(&mut self, cx: &Context<'_>) -> Step {
        match cx.store.load() {
            Ok(warps) => self.enter(State::List { warps }, cx),
            Err(e) => storage_failed(&e, cx.locale),
        }
    }

    fn enter_pick_delete(&mut self, cx: &Context<'_>) -> Step {
        match cx.store.load() {
            Ok(warps) => {
                let candidates = warps
                    .into_iter()
                    .filter(|w| self.player.can_delete(w))
                    .collect();
                self.enter(State::PickDelete { candidates }, cx)
            }
            Err(e) => storage_failed(&e, cx.locale),
        }
    }

    fn enter_detail(&mut self, warp: Warp, cx: &Context<'_>) -> Step {
        let mut buttons = vec![DetailButton::Navigate];
        if self.player.can_delete(&warp) {
            buttons.push(DetailButton::Delete);
        }
        buttons.push(DetailButton::Back);
        self.enter(State::Detail { warp, buttons }, cx)
    }

    fn add_warp(&mut self, values: &[FieldValue], cx: &Context<'_>) -> Step {
        let locale = cx.locale;
        let Some(input) = AddInput::parse(values, &self.player.pos) else {
            return Step::done(vec![locale.error(Text::InvalidInput)]);
        };

        let warp = Warp::new(self.player.snapshot(), input.pos, input.name, input.desc);
        if let Err(e) = cx.store.append(&warp) {
            return storage_failed(&e, locale);
        }

        tracing::info!(player = %self.player.name, warp = %warp.name, "warp created");
        let pos = format_position(&warp.pos, locale);
        Step::done(vec![locale.created(&warp.name, &pos)])
    }

    fn delete_warp(&mut self, warp: &Warp, cx: &Context<'_>) -> Step {
        let locale = cx.locale;
        match cx.store.remove_by_value(warp) {
            Ok(true) => {
                tracing::info!(player = %self.player.name, warp = %warp.name, "warp deleted");
                let pos = format_position(&warp.pos, locale);
                Step::done(vec![locale.deleted(&warp.name, &pos)])
            }
            Ok(false) => Step::done(vec![locale.error(Text::NotFound)]),
            Err(e) => storage_failed(&e, locale),
        }
    }

    fn render(&self, state: &State, cx: &Context<'_>) -> Form {
        let locale = cx.locale;
        let t = |text| locale.text(text).to_string();
        match state {
            State::Manage => Form::Simple {
                title: t(Text::ManageTitle),
                content: String::new(),
                buttons: vec![
                    t(Text::ManageAdd),
                    t(Text::ManageDelete),
                    t(Text::ManageStopNavigation),
                ],
            },
            State::AddWarp => self.add_form(locale),
            State::PickDelete { candidates } => Form::Simple {
                title: t(Text::DeleteTitle),
                content: t(Text::DeleteContent),
                buttons: candidates.iter().map(|w| warp_button(w, locale)).collect(),
            },
            State::List { warps } => Form::Simple {
                title: PLUGIN_NAME.to_string(),
                content: locale.warp_count(warps.len()),
                buttons: warps.iter().map(|w| warp_button(w, locale)).collect(),
            },
            State::Detail { warp, buttons } => Form::Simple {
                title: t(Text::DetailTitle),
                content: warp_details(warp, locale, cx.time_zone),
                buttons: buttons
                    .iter()
                    .map(|b| {
                        let label = match b {
                            DetailButton::Navigate => Text::DetailNavigate,
                            DetailButton::Delete => Text::DetailDelete,
                            DetailButton::Back => Text::DetailBack,
                        };
                        format!("{DARK_GREEN}{}", locale.text(label))
                    })
                    .collect(),
            },
            State::ConfirmDelete { warp } => Form::Modal {
                title: t(Text::ConfirmTitle),
                content: locale.confirm_delete(&warp.name, &format_position(&warp.pos, locale)),
                confirm: format!("{GREEN}{}", locale.text(Text::ConfirmYes)),
                cancel: format!("{RED}{}", locale.text(Text::ConfirmNo)),
            },
        }
    }

    fn add_form(&self, locale: Locale) -> Form {
        let pos = &self.player.pos;
        let coord = |label, value: f64| {
            let value = format!("{value:.2}");
            Field::Input {
                label: locale.text(label).to_string(),
                placeholder: value.clone(),
                default: value,
            }
        };
        let dim_default = Dimension::SELECTABLE
            .iter()
            .position(|d| *d == pos.dimension())
            .unwrap_or(0);

        Form::Custom {
            title: locale.text(Text::AddTitle).to_string(),
            fields: vec![
                Field::Input {
                    label: locale.text(Text::AddName).to_string(),
                    placeholder: String::new(),
                    default: locale.default_warp_name(&self.player.name),
                },
                coord(Text::AddX, pos.x),
                coord(Text::AddY, pos.y),
                coord(Text::AddZ, pos.z),
                Field::Dropdown {
                    label: locale.text(Text::AddDimension).to_string(),
                    options: Dimension::SELECTABLE
                        .iter()
                        .map(|d| locale.dimension(*d).to_string())
                        .collect(),
                    default: dim_default,
                },
                Field::Input {
                    label: locale.text(Text::AddDescription).to_string(),
                    placeholder: String::new(),
                    default: String::new(),
                },
            ],
        }
    }
}

/// Validated contents of the add form.
#[derive(Debug, PartialEq)]
struct AddInput {
    name: String,
    pos: Position,
    desc: Option<String>,
}

impl AddInput {
    /// Reads the add form's fields. Blank coordinates fall back to `current`.
    ///
    /// Returns `None` for a blank name, a coordinate that is not a finite
    /// number, or a dimension outside the dropdown.
    fn parse(values: &[FieldValue], current: &Position) -> Option<Self> {
        let [
            FieldValue::Text(name),
            FieldValue::Text(x),
            FieldValue::Text(y),
            FieldValue::Text(z),
            FieldValue::Choice(dim),
            FieldValue::Text(desc),
        ] = values
        else {
            return None;
        };

        if name.trim().is_empty() {
            return None;
        }
        let dim = Dimension::SELECTABLE.get(*dim)?;
        let pos = Position::new(
            parse_coord(x, current.x)?,
            parse_coord(y, current.y)?,
            parse_coord(z, current.z)?,
            dim.id(),
        );
        let desc = Some(desc.trim()).filter(|d| !d.is_empty()).map(String::from);

        Some(Self {
            name: name.trim().to_string(),
            pos,
            desc,
        })
    }
}

fn parse_coord(input: &str, fallback: f64) -> Option<f64> {
    let input = input.trim();
    if input.is_empty() {
        return Some(fallback);
    }
    input.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn storage_failed(error: &StorageError, locale: Locale) -> Step {
    tracing::error!(%error, "warp storage failed");
    Step::done(vec![locale.error(Text::StorageFailed)])
}
