#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the plugboard workspace.
//!
//! ## Usage
//! Consumers depend on the crate through the workspace:
//! ```toml
//! [dependencies]
//! plugboard-derive.workspace = true
//! thiserror.workspace = true
//! ```
//!
//! Examples below are `ignore`d to avoid compiling in this crate.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for the error enums of the workspace.
///
/// Turns a plain enum into a `thiserror` error wired for the `?` operator and for
/// adding human context to failures.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` unless already present.
/// * **Context Support**: Generates a companion `<ErrorName>Ext` trait with `.context(...)`
///   for `Result<T, ErrorName>`. Only variants declaring a `context` field record it.
/// * **Source Conversions**: For variants whose payload is exactly `source` + `context`,
///   implements `From<Source>` and `<ErrorName>Ext` for `Result<T, Source>`.
/// * **Internal Fallback**: Implements `From<&'static str>` and `From<String>` when an
///   `Internal { message, context }` variant exists.
/// * **Formatting Helper**: Emits a module-private `format_context` helper for `#[error]` strings.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum**.
/// 2. Variants may be unit variants or carry named fields; tuple variants are rejected.
/// 3. A `context` field must have type `Option<Cow<'static, str>>`.
/// 4. Variants with a `source` field (or a field marked `#[source]`/`#[from]`) must declare `context`.
///
/// # Example
///
/// ```rust,ignore
/// use plugboard_derive::plugboard_error;
/// use std::borrow::Cow;
///
/// #[plugboard_error]
/// pub enum CatalogError {
///     #[error("Type already declared: {type_name}")]
///     AlreadyDeclared { type_name: String },
///
///     #[error("IO error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read() -> Result<String, CatalogError> {
///     let raw = std::fs::read_to_string("types.toml").context("Reading type manifest")?;
///     if raw.is_empty() {
///         return Err("Empty manifest".into());
///     }
///     Ok(raw)
/// }
/// ```
#[proc_macro_attribute]
pub fn plugboard_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}
