//! Data structures shared by the character database builder and reader

use crate::error::{Error, Result};
use crate::text::Utf8Str;

/// Byte width of one main-table record.
pub const RECORD_WIDTH: usize = 30;

/// Byte width of one case-mapping table entry.
pub const CASE_RECORD_WIDTH: usize = 8;

/// Artifact file name: the main record table.
pub const MAIN_TABLE_FILE: &str = "chardata";
/// Artifact file name: the concatenated name blob.
pub const NAME_BLOB_FILE: &str = "charnames";
/// Artifact file name: the uppercase mapping table.
pub const TO_UPPER_FILE: &str = "chartoupper";
/// Artifact file name: the lowercase mapping table.
pub const TO_LOWER_FILE: &str = "chartolower";

/// The Unicode general category of a codepoint.
///
/// The stored discriminant is part of the record layout contract: the
/// builder writes it as the category byte of each main-table record and
/// the reader decodes it back with `TryFrom<u8>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum UnicodeCategory {
    LetterUppercase = 0,
    LetterLowercase,
    LetterTitlecase,
    MarkNonSpacing,
    MarkSpacingCombining,
    MarkEnclosing,
    NumberDecimalDigit,
    NumberLetter,
    NumberOther,
    SeparatorSpace,
    SeparatorLine,
    SeparatorParagraph,
    Control,
    Format,
    Surrogate,
    PrivateUse,
    NotAssigned,
    LetterModifier,
    LetterOther,
    PunctuationConnector,
    PunctuationDash,
    PunctuationOpen,
    PunctuationClose,
    PunctuationInitial,
    PunctuationFinal,
    PunctuationOther,
    SymbolMath,
    SymbolCurrency,
    SymbolModifier,
    SymbolOther,
}

impl UnicodeCategory {
    /// Every category, in stored-discriminant order.
    pub const ALL: [UnicodeCategory; 30] = [
        Self::LetterUppercase,
        Self::LetterLowercase,
        Self::LetterTitlecase,
        Self::MarkNonSpacing,
        Self::MarkSpacingCombining,
        Self::MarkEnclosing,
        Self::NumberDecimalDigit,
        Self::NumberLetter,
        Self::NumberOther,
        Self::SeparatorSpace,
        Self::SeparatorLine,
        Self::SeparatorParagraph,
        Self::Control,
        Self::Format,
        Self::Surrogate,
        Self::PrivateUse,
        Self::NotAssigned,
        Self::LetterModifier,
        Self::LetterOther,
        Self::PunctuationConnector,
        Self::PunctuationDash,
        Self::PunctuationOpen,
        Self::PunctuationClose,
        Self::PunctuationInitial,
        Self::PunctuationFinal,
        Self::PunctuationOther,
        Self::SymbolMath,
        Self::SymbolCurrency,
        Self::SymbolModifier,
        Self::SymbolOther,
    ];

    /// Map a two-letter UCD general-category code to its category. The
    /// table is closed: anything unrecognized is `None`.
    pub fn from_code(code: &[u8]) -> Option<UnicodeCategory> {
        match code {
            b"Lu" => Some(Self::LetterUppercase),
            b"Ll" => Some(Self::LetterLowercase),
            b"Lt" => Some(Self::LetterTitlecase),
            b"Mn" => Some(Self::MarkNonSpacing),
            b"Mc" => Some(Self::MarkSpacingCombining),
            b"Me" => Some(Self::MarkEnclosing),
            b"Nd" => Some(Self::NumberDecimalDigit),
            b"Nl" => Some(Self::NumberLetter),
            b"No" => Some(Self::NumberOther),
            b"Zs" => Some(Self::SeparatorSpace),
            b"Zl" => Some(Self::SeparatorLine),
            b"Zp" => Some(Self::SeparatorParagraph),
            b"Cc" => Some(Self::Control),
            b"Cf" => Some(Self::Format),
            b"Cs" => Some(Self::Surrogate),
            b"Co" => Some(Self::PrivateUse),
            b"Cn" => Some(Self::NotAssigned),
            b"Lm" => Some(Self::LetterModifier),
            b"Lo" => Some(Self::LetterOther),
            b"Pc" => Some(Self::PunctuationConnector),
            b"Pd" => Some(Self::PunctuationDash),
            b"Ps" => Some(Self::PunctuationOpen),
            b"Pe" => Some(Self::PunctuationClose),
            b"Pi" => Some(Self::PunctuationInitial),
            b"Pf" => Some(Self::PunctuationFinal),
            b"Po" => Some(Self::PunctuationOther),
            b"Sm" => Some(Self::SymbolMath),
            b"Sc" => Some(Self::SymbolCurrency),
            b"Sk" => Some(Self::SymbolModifier),
            b"So" => Some(Self::SymbolOther),
            _ => None,
        }
    }

    /// The two-letter UCD code for this category.
    pub fn code(&self) -> &'static str {
        match self {
            Self::LetterUppercase => "Lu",
            Self::LetterLowercase => "Ll",
            Self::LetterTitlecase => "Lt",
            Self::MarkNonSpacing => "Mn",
            Self::MarkSpacingCombining => "Mc",
            Self::MarkEnclosing => "Me",
            Self::NumberDecimalDigit => "Nd",
            Self::NumberLetter => "Nl",
            Self::NumberOther => "No",
            Self::SeparatorSpace => "Zs",
            Self::SeparatorLine => "Zl",
            Self::SeparatorParagraph => "Zp",
            Self::Control => "Cc",
            Self::Format => "Cf",
            Self::Surrogate => "Cs",
            Self::PrivateUse => "Co",
            Self::NotAssigned => "Cn",
            Self::LetterModifier => "Lm",
            Self::LetterOther => "Lo",
            Self::PunctuationConnector => "Pc",
            Self::PunctuationDash => "Pd",
            Self::PunctuationOpen => "Ps",
            Self::PunctuationClose => "Pe",
            Self::PunctuationInitial => "Pi",
            Self::PunctuationFinal => "Pf",
            Self::PunctuationOther => "Po",
            Self::SymbolMath => "Sm",
            Self::SymbolCurrency => "Sc",
            Self::SymbolModifier => "Sk",
            Self::SymbolOther => "So",
        }
    }
}

impl TryFrom<u8> for UnicodeCategory {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| Error::InvalidData(format!("unknown category byte {value:#04x}")))
    }
}

/// Everything the character database records about one codepoint.
#[derive(Debug, Clone)]
pub struct CharInfo {
    /// The codepoint this record describes, such as 0x41 for 'A'.
    pub codepoint: u32,
    /// The human-readable UCD name, such as "LATIN CAPITAL LETTER A".
    /// A zero-copy view into the database's shared name blob.
    pub name: Utf8Str,
    pub category: UnicodeCategory,
    /// NaN when the source line carried no numeric value.
    pub numeric_value: f32,
    pub mirrored: bool,
    /// Defaults to the record's own codepoint when the source had no
    /// override. For codepoint 0 this makes "no mapping" and "maps to
    /// codepoint 0" indistinguishable; that is the recorded behavior.
    pub uppercase: u32,
    pub lowercase: u32,
    pub titlecase: u32,
}
