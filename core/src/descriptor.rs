//! Argument descriptors: the caller-supplied description of one argument.
//!
//! A descriptor pairs an immutable [`OptionKind`] with the source
//! [`ArgumentOptions`] it was created from. Descriptors are plain values:
//! finalizing one never mutates it, so the same descriptor can be reused
//! across syntax calls and commands.
//!
//! # Example
//!
//! ```
//! use slash_command_core::{ArgumentDescriptor, ArgumentOptions, OptionKind};
//!
//! let count = ArgumentDescriptor::integer(
//!     ArgumentOptions::new("count", "How many to roll.")
//!         .with_range(Some(1.0), Some(20.0)),
//! );
//! assert_eq!(count.kind(), OptionKind::Integer);
//! assert!(count.options().is_ranged());
//! ```

use serde::{Deserialize, Serialize};

use crate::{ChannelType, ChoiceValue, LocalizationMap, OptionKind};

/// Source options shared by every argument kind.
///
/// Kind-specific fields (`channel_types`, `range`, `choices`,
/// `autocomplete`) are honored by the finalizer based on whether they are
/// present, not on the descriptor's kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArgumentOptions {
    /// Name of the argument.
    pub name: String,
    /// Description of the argument.
    pub desc: String,
    /// Localized names keyed by locale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_name: Option<LocalizationMap>,
    /// Localized descriptions keyed by locale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_desc: Option<LocalizationMap>,
    /// Explicit required flag; wins over the template classification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub req: Option<bool>,
    /// Channel kinds allowed in a channel argument.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_types: Option<Vec<ChannelType>>,
    /// Minimum and/or maximum value (or length for strings).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<(Option<f64>, Option<f64>)>,
    /// Fixed set of accepted values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<ChoiceValue>>,
    /// Whether autocompletion is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autocomplete: Option<bool>,
}

impl ArgumentOptions {
    /// Creates options with a name and description.
    pub fn new(name: &str, desc: &str) -> Self {
        Self {
            name: name.to_string(),
            desc: desc.to_string(),
            ..Default::default()
        }
    }

    /// Sets the explicit required flag.
    pub fn with_required(mut self, required: bool) -> Self {
        self.req = Some(required);
        self
    }

    /// Sets localized names.
    pub fn with_local_name(mut self, names: LocalizationMap) -> Self {
        self.local_name = Some(names);
        self
    }

    /// Sets localized descriptions.
    pub fn with_local_desc(mut self, descs: LocalizationMap) -> Self {
        self.local_desc = Some(descs);
        self
    }

    /// Restricts a channel argument to the given channel kinds.
    pub fn with_channel_types(mut self, types: impl IntoIterator<Item = ChannelType>) -> Self {
        self.channel_types = Some(types.into_iter().collect());
        self
    }

    /// Sets the minimum and/or maximum value (length for strings).
    ///
    /// String lengths are unsigned integers: a bound is truncated toward
    /// zero and negative bounds clamp to `0`, so `-1.0` becomes `0` and
    /// `2.5` becomes `2`. Numeric bounds are kept as given.
    pub fn with_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.range = Some((min, max));
        self
    }

    /// Sets the accepted choices.
    pub fn with_choices<V, I>(mut self, choices: I) -> Self
    where
        V: Into<ChoiceValue>,
        I: IntoIterator<Item = V>,
    {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    /// Enables or disables autocompletion.
    pub fn with_autocomplete(mut self, enabled: bool) -> Self {
        self.autocomplete = Some(enabled);
        self
    }

    /// Returns `true` when channel restrictions were supplied.
    ///
    /// This is a structural check on the options; it ignores the kind.
    pub fn is_channel(&self) -> bool {
        self.channel_types.is_some()
    }

    /// Returns `true` when a range, choices or autocomplete setting was
    /// supplied.
    ///
    /// This is a structural check on the options; it ignores the kind.
    pub fn is_ranged(&self) -> bool {
        self.range.is_some() || self.choices.is_some() || self.autocomplete.is_some()
    }
}

/// Pre-finalization description of one argument.
///
/// Created through one of the per-kind constructors. The kind cannot be
/// changed after creation; `Clone` produces an independent copy of the
/// kind and source options.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentDescriptor {
    kind: OptionKind,
    options: ArgumentOptions,
}

impl ArgumentDescriptor {
    /// Creates a descriptor of an arbitrary kind. No validation happens here.
    pub fn new(kind: OptionKind, options: ArgumentOptions) -> Self {
        Self { kind, options }
    }

    /// String argument.
    pub fn string(options: ArgumentOptions) -> Self {
        Self::new(OptionKind::String, options)
    }

    /// Integer argument.
    pub fn integer(options: ArgumentOptions) -> Self {
        Self::new(OptionKind::Integer, options)
    }

    /// Floating point argument.
    pub fn number(options: ArgumentOptions) -> Self {
        Self::new(OptionKind::Number, options)
    }

    /// Boolean argument.
    pub fn boolean(options: ArgumentOptions) -> Self {
        Self::new(OptionKind::Boolean, options)
    }

    /// User argument.
    pub fn user(options: ArgumentOptions) -> Self {
        Self::new(OptionKind::User, options)
    }

    /// Role argument.
    pub fn role(options: ArgumentOptions) -> Self {
        Self::new(OptionKind::Role, options)
    }

    /// Channel argument.
    pub fn channel(options: ArgumentOptions) -> Self {
        Self::new(OptionKind::Channel, options)
    }

    /// Mention (user or role) argument.
    pub fn mentionable(options: ArgumentOptions) -> Self {
        Self::new(OptionKind::Mentionable, options)
    }

    /// File attachment argument.
    pub fn attachment(options: ArgumentOptions) -> Self {
        Self::new(OptionKind::Attachment, options)
    }

    /// Subcommand marker.
    pub fn subcommand(options: ArgumentOptions) -> Self {
        Self::new(OptionKind::Subcommand, options)
    }

    /// Subcommand group marker.
    pub fn subgroup(options: ArgumentOptions) -> Self {
        Self::new(OptionKind::SubcommandGroup, options)
    }

    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    /// Returns the source options.
    pub fn options(&self) -> &ArgumentOptions {
        &self.options
    }

    pub fn name(&self) -> &str {
        &self.options.name
    }

    /// Returns the explicit required flag, if one was given.
    pub fn required_hint(&self) -> Option<bool> {
        self.options.req
    }
}
