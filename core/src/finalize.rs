//! Descriptor finalization into wire-shaped records.
//!
//! A [`Finalizer`] owns a fresh [`CommandOption`] and fills it from an
//! [`ArgumentDescriptor`] with set-if-absent semantics: every setter only
//! writes a field that is still unset, so a value written explicitly before
//! [`finish`](Finalizer::finish) survives the pass that copies the source
//! options.
//!
//! # Example
//!
//! ```
//! use slash_command_core::{ArgumentDescriptor, ArgumentOptions, Finalizer};
//!
//! let arg = ArgumentDescriptor::string(ArgumentOptions::new("query", "Search text."));
//!
//! let plain = arg.finalize();
//! assert_eq!(plain.name.as_deref(), Some("query"));
//!
//! // An explicit earlier write wins over the descriptor's own name.
//! let mut finalizer = Finalizer::new(&arg);
//! finalizer.name(Some("q"));
//! assert_eq!(finalizer.finish().name.as_deref(), Some("q"));
//! ```

use crate::{
    ArgumentDescriptor, ArgumentOptions, ChannelType, Choice, ChoiceValue, CommandOption,
    LocalizationMap, OptionKind,
};

/// Builds one [`CommandOption`] from a descriptor.
#[derive(Debug)]
pub struct Finalizer<'a> {
    source: &'a ArgumentOptions,
    record: CommandOption,
}

impl<'a> Finalizer<'a> {
    /// Starts a finalization pass with an empty record of the descriptor's
    /// kind.
    pub fn new(descriptor: &'a ArgumentDescriptor) -> Self {
        Self {
            source: descriptor.options(),
            record: CommandOption::new(descriptor.kind()),
        }
    }

    pub fn name(&mut self, name: Option<&str>) -> &mut Self {
        if self.record.name.is_none() {
            self.record.name = name.map(String::from);
        }
        self
    }

    pub fn desc(&mut self, desc: Option<&str>) -> &mut Self {
        if self.record.description.is_none() {
            self.record.description = desc.map(String::from);
        }
        self
    }

    pub fn local_name(&mut self, names: Option<&LocalizationMap>) -> &mut Self {
        if self.record.name_localizations.is_none() {
            self.record.name_localizations = names.cloned();
        }
        self
    }

    pub fn local_desc(&mut self, descs: Option<&LocalizationMap>) -> &mut Self {
        if self.record.description_localizations.is_none() {
            self.record.description_localizations = descs.cloned();
        }
        self
    }

    pub fn required(&mut self, required: Option<bool>) -> &mut Self {
        if self.record.required.is_none() {
            self.record.required = required;
        }
        self
    }

    /// Sets the allowed channel kinds, translated to their numeric codes.
    pub fn channel_types(&mut self, types: Option<&[ChannelType]>) -> &mut Self {
        if self.record.channel_types.is_none() {
            self.record.channel_types =
                types.map(|types| types.iter().map(|t| t.code()).collect());
        }
        self
    }

    /// Sets the choice list; each value becomes `{name: value.to_string(), value}`.
    pub fn choices(&mut self, choices: Option<&[ChoiceValue]>) -> &mut Self {
        if self.record.choices.is_none() {
            self.record.choices = choices.map(|choices| {
                choices
                    .iter()
                    .cloned()
                    .map(Choice::from_value)
                    .collect()
            });
        }
        self
    }

    /// Sets the minimum and/or maximum.
    ///
    /// String records receive `min_length`/`max_length`, every other kind
    /// receives `min_value`/`max_value`. Ignored unless the source options
    /// are ranged.
    pub fn range(&mut self, range: Option<(Option<f64>, Option<f64>)>) -> &mut Self {
        if !self.source.is_ranged() {
            return self;
        }

        let (min, max) = range.unwrap_or((None, None));
        if self.record.kind == OptionKind::String {
            if self.record.min_length.is_none() {
                self.record.min_length = min.map(length_bound);
            }
            if self.record.max_length.is_none() {
                self.record.max_length = max.map(length_bound);
            }
        } else {
            if self.record.min_value.is_none() {
                self.record.min_value = min.and_then(value_bound);
            }
            if self.record.max_value.is_none() {
                self.record.max_value = max.and_then(value_bound);
            }
        }
        self
    }

    pub fn autocomplete(&mut self, enabled: Option<bool>) -> &mut Self {
        if self.record.autocomplete.is_none() {
            self.record.autocomplete = enabled;
        }
        self
    }

    /// Finalizes each descriptor into the record's nested options.
    ///
    /// Each nested record is built by its own pass, so no nested list is
    /// shared between records.
    pub fn suboptions(&mut self, descriptors: &[ArgumentDescriptor]) -> &mut Self {
        if self.record.options.is_none() {
            self.record.options = Some(descriptors.iter().map(|d| d.finalize()).collect());
        }
        self
    }

    /// Copies the source options into the record and returns it.
    pub fn finish(mut self) -> CommandOption {
        let source = self.source;
        self.name(Some(&source.name))
            .desc(Some(&source.desc))
            .local_name(source.local_name.as_ref())
            .local_desc(source.local_desc.as_ref())
            .required(source.req);

        if source.is_channel() {
            self.channel_types(source.channel_types.as_deref());
        }

        if source.is_ranged() {
            self.choices(source.choices.as_deref())
                .range(source.range)
                .autocomplete(Some(source.autocomplete.unwrap_or(false)));
        }

        self.record
    }
}

/// Truncates toward zero and saturates into `u32`; NaN maps to `0`.
fn length_bound(value: f64) -> u32 {
    value as u32
}

/// Integral bounds serialize as JSON integers, fractional ones as floats.
fn value_bound(value: f64) -> Option<serde_json::Number> {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Some(serde_json::Number::from(value as i64))
    } else {
        serde_json::Number::from_f64(value)
    }
}

impl ArgumentDescriptor {
    /// Produces a fresh, independent record from this descriptor.
    pub fn finalize(&self) -> CommandOption {
        Finalizer::new(self).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(name: &str) -> ArgumentOptions {
        ArgumentOptions::new(name, "Testing arguments.")
    }

    #[test]
    fn test_finalize_copies_base_fields() {
        let mut names = LocalizationMap::new();
        names.insert("en-US".into(), "usbasetestarg".into());
        let arg = ArgumentDescriptor::boolean(base("basetestarg").with_local_name(names.clone()));

        let record = arg.finalize();
        assert_eq!(record.kind, OptionKind::Boolean);
        assert_eq!(record.name.as_deref(), Some("basetestarg"));
        assert_eq!(record.description.as_deref(), Some("Testing arguments."));
        assert_eq!(record.name_localizations, Some(names));
        assert_eq!(record.required, None);
        assert_eq!(record.autocomplete, None);
    }

    #[test]
    fn test_finalize_channel_types_as_codes() {
        let arg = ArgumentDescriptor::channel(
            base("where").with_channel_types([ChannelType::GuildText, ChannelType::GuildForum]),
        );
        assert_eq!(arg.finalize().channel_types, Some(vec![0, 15]));
    }

    #[test]
    fn test_finalize_number_range_uses_value_fields() {
        let arg = ArgumentDescriptor::number(base("ratio").with_range(Some(1.5), Some(9.0)));
        let record = arg.finalize();
        assert_eq!(record.min_value.as_ref().and_then(|n| n.as_f64()), Some(1.5));
        assert_eq!(record.max_value, Some(serde_json::Number::from(9)));
        assert_eq!(record.min_length, None);
        assert_eq!(record.autocomplete, Some(false));
    }

    #[test]
    fn test_finalize_string_range_uses_length_fields() {
        let arg = ArgumentDescriptor::string(base("word").with_range(Some(2.0), Some(10.0)));
        let record = arg.finalize();
        assert_eq!(record.min_length, Some(2));
        assert_eq!(record.max_length, Some(10));
        assert_eq!(record.min_value, None);
    }

    #[test]
    fn test_finalize_string_range_clamps_lengths() {
        let arg = ArgumentDescriptor::string(base("word").with_range(Some(-1.0), Some(2.5)));
        let record = arg.finalize();
        assert_eq!(record.min_length, Some(0));
        assert_eq!(record.max_length, Some(2));
    }

    #[test]
    fn test_finalize_choices_are_stringified() {
        let arg = ArgumentDescriptor::integer(base("pick").with_choices([1, 5, 9]));
        let choices = arg.finalize().choices.unwrap();
        let names: Vec<&str> = choices.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["1", "5", "9"]);
        assert_eq!(choices[2].value, ChoiceValue::Integer(9));
    }

    #[test]
    fn test_channel_fields_leak_onto_non_channel_kind() {
        let arg = ArgumentDescriptor::string(base("odd").with_channel_types([ChannelType::Dm]));
        assert_eq!(arg.finalize().channel_types, Some(vec![1]));
    }

    #[test]
    fn test_explicit_write_wins_over_source() {
        let arg = ArgumentDescriptor::string(base("query").with_required(false));
        let mut finalizer = Finalizer::new(&arg);
        finalizer.required(Some(true)).desc(Some("Overridden."));
        let record = finalizer.finish();
        assert_eq!(record.required, Some(true));
        assert_eq!(record.description.as_deref(), Some("Overridden."));
        assert_eq!(record.name.as_deref(), Some("query"));
    }

    #[test]
    fn test_independent_finalize_of_clones() {
        let sub = ArgumentDescriptor::subcommand(base("sub"));
        let leaf = ArgumentDescriptor::string(base("leaf"));

        let first_clone = sub.clone();
        let second_clone = sub.clone();
        let mut first = Finalizer::new(&first_clone);
        first.suboptions(std::slice::from_ref(&leaf));
        let mut first = first.finish();
        let mut second = Finalizer::new(&second_clone);
        second.suboptions(std::slice::from_ref(&leaf));
        let second = second.finish();

        assert_eq!(first, second);
        first.suboptions_mut().push(leaf.finalize());
        assert_eq!(first.suboptions().len(), 2);
        assert_eq!(second.suboptions().len(), 1);
    }
}
