//! Compile-time Jet templates.
//!
//! - [`jet!`] compiles an inline template literal
//! - [`jet_file!`] compiles a template file relative to the crate root
//!
//! Both expand to a `&'static str` holding the generated JavaScript. A
//! template that fails to compile becomes a `compile_error!` carrying the
//! rendered diagnostic, so a logic-bearing template never reaches runtime.

use std::path::{Path, PathBuf};

use anyhow::Context;
use easley_jet::{CompileConfig, JetError};
use proc_macro::TokenStream;
use quote::quote;

use self::input::TemplateInput;

mod input;

/// Compiles an inline template.
///
/// # Example
///
/// ```ignore
/// use easley_jet_macros::jet;
///
/// const CARD: &str = jet!(r#"<div class="card">{ user.name }</div>"#);
/// const TYPED: &str = jet!("<div>{ user.name }</div>" as tsx);
/// ```
#[proc_macro]
pub fn jet(input: TokenStream) -> TokenStream {
    match jet_impl(input.into()) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn jet_impl(input: proc_macro2::TokenStream) -> syn::Result<proc_macro2::TokenStream> {
    let TemplateInput { src, syntax } = syn::parse2::<TemplateInput>(input)?;
    let source = src.value();
    let config = CompileConfig::default().syntax(syntax).filename("jet!");

    let code = easley_jet::compile_with_config(&source, &config)
        .map_err(|err| compile_failure(&src, &err, &source, &config))?;

    Ok(quote!(#code))
}

/// Compiles a template file, resolved against `CARGO_MANIFEST_DIR`.
///
/// The file is also pulled in with `include_str!` so that editing it
/// triggers a rebuild.
///
/// # Example
///
/// ```ignore
/// use easley_jet_macros::jet_file;
///
/// const PAGE: &str = jet_file!("templates/page.jsx");
/// ```
#[proc_macro]
pub fn jet_file(input: TokenStream) -> TokenStream {
    match jet_file_impl(input.into()) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn jet_file_impl(input: proc_macro2::TokenStream) -> syn::Result<proc_macro2::TokenStream> {
    let TemplateInput { src, syntax } = syn::parse2::<TemplateInput>(input)?;
    let relative = src.value();

    let (path, source) = read_template(&relative)
        .map_err(|err| syn::Error::new_spanned(&src, format!("{err:#}")))?;
    let config = CompileConfig::default().syntax(syntax).filename(relative);

    let code = easley_jet::compile_with_config(&source, &config)
        .map_err(|err| compile_failure(&src, &err, &source, &config))?;
    let path = path.display().to_string();

    Ok(quote! {
        {
            const _: &str = include_str!(#path);
            #code
        }
    })
}

fn read_template(relative: &str) -> anyhow::Result<(PathBuf, String)> {
    let root = std::env::var("CARGO_MANIFEST_DIR").context("CARGO_MANIFEST_DIR is not set")?;
    let path = Path::new(&root).join(relative);
    let source = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read template `{}`", path.display()))?;
    Ok((path, source))
}

fn compile_failure(
    src: &syn::LitStr,
    err: &JetError,
    source: &str,
    config: &CompileConfig,
) -> syn::Error {
    syn::Error::new_spanned(src, err.render(source, &config.filename))
}
