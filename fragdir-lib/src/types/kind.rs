use strum::Display;

/// The four fields of a text directive, in the order they appear on the wire
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum TextDirectiveKind {
    /// Prefix
    Prefix,
    /// Start
    #[default]
    Start,
    /// End
    End,
    /// Suffix
    Suffix,
}
