use crate::context::GenerationContext;
use crate::errors::GenerationError;
use crate::faker_rs::catalog;
use crate::generators::custom::{self, CustomKind};
use crate::generators::{GeneratedValue, ProviderRegistry, primitives};
use crate::template::Directive;
use crate::template::Template;

/// Seed range for ordinary fields: roughly five recurring "people" per block.
pub const ROW_SEED_BOUND: u64 = 4;
pub const TS_SEED_BOUND: u64 = 5000;
pub const GPS_SEED_BOUND: u64 = 2000;

/// Produces one row of field strings per call.
#[derive(Debug, Clone, Copy)]
pub struct RowGenerator<'a> {
    template: &'a Template,
    registry: &'a ProviderRegistry,
}

impl<'a> RowGenerator<'a> {
    pub fn new(template: &'a Template, registry: &'a ProviderRegistry) -> Self {
        Self { template, registry }
    }

    pub fn generate(&self, ctx: &mut GenerationContext) -> Result<Vec<String>, GenerationError> {
        if !self.template.is_dummy() {
            ctx.reseed_fields(ROW_SEED_BOUND);
        }

        self.template
            .directives()
            .iter()
            .map(|directive| self.field(directive, ctx))
            .collect()
    }

    fn field(
        &self,
        directive: &Directive,
        ctx: &mut GenerationContext,
    ) -> Result<String, GenerationError> {
        let value = match directive {
            Directive::DummyLength(len) => {
                return Ok(primitives::ascii_letters(*len, &mut ctx.rng));
            }
            Directive::Provider(id) => {
                let locale = ctx.locales.active().key();
                let value = self
                    .registry
                    .generate(id, locale, &mut ctx.field_rng)
                    .ok_or_else(|| GenerationError::UnknownProvider(id.clone()))?;
                ctx.report.record_generator_usage(id);
                value
            }
            Directive::Custom(kind) => {
                ctx.report.record_generator_usage(kind.as_str());
                custom_value(*kind, ctx)
            }
            Directive::Fallback => {
                ctx.report.record_generator_usage("fallback");
                let locale = ctx.locales.active().key();
                let max_chars = self.template.fallback_chars();
                GeneratedValue::Text(catalog::text(locale, max_chars, &mut ctx.field_rng))
            }
            Directive::Unsupported(name) => {
                return Err(GenerationError::UnexpectedColumnType(name.clone()));
            }
        };

        Ok(value.render().replace('\n', " "))
    }
}

fn custom_value(kind: CustomKind, ctx: &mut GenerationContext) -> GeneratedValue {
    match kind {
        CustomKind::Amount => custom::amount(&mut ctx.rng),
        CustomKind::Ts => {
            ctx.reseed_fields(TS_SEED_BOUND);
            custom::timestamp_between(ctx.now, ctx.days_back, &mut ctx.field_rng)
        }
        CustomKind::GpsLoc => {
            ctx.reseed_fields(GPS_SEED_BOUND);
            let country = ctx.locales.active().country().to_string();
            custom::gps_near(&country, &mut ctx.field_rng)
        }
        CustomKind::Text => {
            let locale = ctx.locales.active().key();
            custom::short_text(locale, &mut ctx.field_rng)
        }
    }
}
