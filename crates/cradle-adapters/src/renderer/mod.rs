//! Template renderers.

mod handlebars;
mod helpers;

pub use self::handlebars::HandlebarsRenderer;
