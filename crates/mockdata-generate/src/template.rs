use std::collections::BTreeSet;

use tracing::warn;

use crate::config::DatasetSchema;
use crate::errors::ConfigError;
use crate::faker_rs::catalog::DEFAULT_TEXT_CHARS;
use crate::generators::ProviderRegistry;
use crate::generators::custom::{CustomKind, SHORT_TEXT_CHARS};

/// How a column's value is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Random letters of the given length.
    DummyLength(usize),
    /// Registered zero-argument provider.
    Provider(String),
    /// Built-in custom datatype handler.
    Custom(CustomKind),
    /// Free text for specs nothing else recognises, bounded by
    /// [`Template::fallback_chars`].
    Fallback,
    /// Declared as a custom datatype but without a handler; fails at generation.
    Unsupported(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    Dummy,
    Named,
}

/// Resolved directives, one per schema column, in schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    kind: DatasetKind,
    directives: Vec<Directive>,
    fallback_chars: usize,
}

impl Template {
    /// Builds the template once per run. Only a malformed dummy length is an
    /// error; unknown specs of a named dataset degrade to [`Directive::Fallback`].
    pub fn resolve(
        schema: &DatasetSchema,
        custom_datatypes: &BTreeSet<String>,
        registry: &ProviderRegistry,
    ) -> Result<Self, ConfigError> {
        if schema.is_dummy() {
            let directives = schema
                .columns
                .iter()
                .map(|col| {
                    col.spec.parse::<usize>().map(Directive::DummyLength).map_err(|_| {
                        ConfigError::invalid(
                            format!("{}.{}", schema.name, col.name),
                            format!("dummy columns need a character count, got '{}'", col.spec),
                        )
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Self {
                kind: DatasetKind::Dummy,
                directives,
                fallback_chars: DEFAULT_TEXT_CHARS,
            });
        }

        let directives = schema
            .columns
            .iter()
            .map(|col| {
                let directive = resolve_spec(&col.spec, custom_datatypes, registry);
                if directive == Directive::Fallback {
                    warn!(
                        column = %col.name,
                        spec = %col.spec,
                        "unknown generator, falling back to free text"
                    );
                }
                directive
            })
            .collect();

        // Fallback columns take the short `text` form when `text` is custom.
        let fallback_chars = if custom_datatypes.contains(CustomKind::Text.as_str()) {
            SHORT_TEXT_CHARS
        } else {
            DEFAULT_TEXT_CHARS
        };

        Ok(Self {
            kind: DatasetKind::Named,
            directives,
            fallback_chars,
        })
    }

    pub fn kind(&self) -> DatasetKind {
        self.kind
    }

    pub fn is_dummy(&self) -> bool {
        self.kind == DatasetKind::Dummy
    }

    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Character limit of [`Directive::Fallback`] values.
    pub fn fallback_chars(&self) -> usize {
        self.fallback_chars
    }

    pub fn fallback_count(&self) -> usize {
        self.directives
            .iter()
            .filter(|directive| **directive == Directive::Fallback)
            .count()
    }
}

// Custom membership wins over a provider of the same name.
fn resolve_spec(
    spec: &str,
    custom_datatypes: &BTreeSet<String>,
    registry: &ProviderRegistry,
) -> Directive {
    if custom_datatypes.contains(spec) {
        return match CustomKind::parse(spec) {
            Some(kind) => Directive::Custom(kind),
            None => Directive::Unsupported(spec.to_string()),
        };
    }
    if registry.contains(spec) {
        return Directive::Provider(spec.to_string());
    }
    Directive::Fallback
}
