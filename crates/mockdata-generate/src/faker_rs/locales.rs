use std::fmt;

/// Locales backed by the `fake` crate's data sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LocaleKey {
    EnUs,
    FrFr,
    DeDe,
    PtBr,
    JaJp,
    ZhCn,
    ZhTw,
    ArSa,
}

impl LocaleKey {
    pub const ALL: &'static [LocaleKey] = &[
        Self::EnUs,
        Self::FrFr,
        Self::DeDe,
        Self::PtBr,
        Self::JaJp,
        Self::ZhCn,
        Self::ZhTw,
        Self::ArSa,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "en_US" => Some(Self::EnUs),
            "fr_FR" => Some(Self::FrFr),
            "de_DE" => Some(Self::DeDe),
            "pt_BR" => Some(Self::PtBr),
            "ja_JP" => Some(Self::JaJp),
            "zh_CN" => Some(Self::ZhCn),
            "zh_TW" => Some(Self::ZhTw),
            "ar_SA" => Some(Self::ArSa),
            _ => None,
        }
    }

    /// Closest data set for a bare language code (`en`, `pt`, ...).
    pub fn for_language(language: &str) -> Option<Self> {
        match language {
            "en" => Some(Self::EnUs),
            "fr" => Some(Self::FrFr),
            "de" => Some(Self::DeDe),
            "pt" => Some(Self::PtBr),
            "ja" => Some(Self::JaJp),
            "zh" => Some(Self::ZhCn),
            "ar" => Some(Self::ArSa),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::EnUs => "en_US",
            Self::FrFr => "fr_FR",
            Self::DeDe => "de_DE",
            Self::PtBr => "pt_BR",
            Self::JaJp => "ja_JP",
            Self::ZhCn => "zh_CN",
            Self::ZhTw => "zh_TW",
            Self::ArSa => "ar_SA",
        }
    }
}

impl fmt::Display for LocaleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evaluates `$body` with `$l` bound to the `fake` locale marker for `$locale`.
macro_rules! localized {
    ($locale:expr, |$l:ident| $body:expr) => {
        match $locale {
            $crate::faker_rs::locales::LocaleKey::EnUs => {
                let $l = ::fake::locales::EN;
                $body
            }
            $crate::faker_rs::locales::LocaleKey::FrFr => {
                let $l = ::fake::locales::FR_FR;
                $body
            }
            $crate::faker_rs::locales::LocaleKey::DeDe => {
                let $l = ::fake::locales::DE_DE;
                $body
            }
            $crate::faker_rs::locales::LocaleKey::PtBr => {
                let $l = ::fake::locales::PT_BR;
                $body
            }
            $crate::faker_rs::locales::LocaleKey::JaJp => {
                let $l = ::fake::locales::JA_JP;
                $body
            }
            $crate::faker_rs::locales::LocaleKey::ZhCn => {
                let $l = ::fake::locales::ZH_CN;
                $body
            }
            $crate::faker_rs::locales::LocaleKey::ZhTw => {
                let $l = ::fake::locales::ZH_TW;
                $body
            }
            $crate::faker_rs::locales::LocaleKey::ArSa => {
                let $l = ::fake::locales::AR_SA;
                $body
            }
        }
    };
}

pub(crate) use localized;
