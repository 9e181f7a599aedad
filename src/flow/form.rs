//! Forms the host shows to a player, and the responses it sends back.

/// A form to render.
#[derive(Debug, Clone, PartialEq)]
pub enum Form {
    /// Text plus a column of buttons. Answered with [`Response::Button`].
    Simple {
        title: String,
        content: String,
        buttons: Vec<String>,
    },

    /// Input fields. Answered with [`Response::Values`], one per field.
    Custom { title: String, fields: Vec<Field> },

    /// A yes/no question. Answered with [`Response::Confirm`].
    Modal {
        title: String,
        content: String,
        confirm: String,
        cancel: String,
    },
}

/// One field of a custom form.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Input {
        label: String,
        placeholder: String,
        default: String,
    },
    Dropdown {
        label: String,
        options: Vec<String>,
        default: usize,
    },
}

/// A filled-in field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Choice(usize),
}

/// What the player did with a form.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// The form was closed without an answer.
    Closed,
    Button(usize),
    Values(Vec<FieldValue>),
    Confirm(bool),
}

impl Form {
    pub fn title(&self) -> &str {
        match self {
            Self::Simple { title, .. } | Self::Custom { title, .. } | Self::Modal { title, .. } => {
                title
            }
        }
    }
}
