use strum::{Display, EnumString};

/// Keywords recognized by the catalog statement parser.
///
/// Matching is case-insensitive. A keyword can still be used as a name by
/// double-quoting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(ascii_case_insensitive, serialize_all = "UPPERCASE")]
pub enum Keyword {
    Create,
    Drop,
    Use,
    Show,

    Catalog,
    Catalogs,
    Tables,

    If,
    Not,
    Exists,

    Type,
    With,
    Current,
    From,
}
